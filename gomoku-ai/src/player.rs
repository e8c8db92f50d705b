//! 玩家接口
//!
//! 对局驱动只通过 `Player` 与各类玩家交互；人类玩家在 CLI 中实现。

use gomoku_core::{Board, Move, Side};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::search::{AiConfig, AiEngine, SearchReport};

/// 玩家
pub trait Player {
    /// 显示名称
    fn name(&self) -> String;

    /// 执子方
    fn side(&self) -> Side;

    /// 换边（锦标赛中交替先手）
    fn set_side(&mut self, side: Side);

    /// 选择走法，放弃或无子可走时返回 None
    fn get_move(&mut self, board: &Board) -> Option<Move>;
}

/// 随机玩家：在候选走法中均匀随机选择
pub struct RandomPlayer {
    side: Side,
    rng: ChaCha8Rng,
}

impl RandomPlayer {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(side: Side, seed: u64) -> Self {
        Self {
            side,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> String {
        format!("Random Agent ({})", self.side)
    }

    fn side(&self) -> Side {
        self.side
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        board.get_valid_moves().choose(&mut self.rng).copied()
    }
}

/// AI 玩家
pub struct AiPlayer {
    side: Side,
    engine: AiEngine,
    last_report: Option<SearchReport>,
}

impl AiPlayer {
    pub fn new(side: Side, config: AiConfig) -> Self {
        Self {
            side,
            engine: AiEngine::new(config),
            last_report: None,
        }
    }

    pub fn config(&self) -> &AiConfig {
        self.engine.config()
    }

    /// 最近一次走子的搜索摘要
    pub fn last_report(&self) -> Option<&SearchReport> {
        self.last_report.as_ref()
    }
}

impl Player for AiPlayer {
    fn name(&self) -> String {
        let config = self.engine.config();
        format!(
            "{} Agent (Level {}) ({})",
            config.strategy.label(),
            config.max_depth,
            self.side
        )
    }

    fn side(&self) -> Side {
        self.side
    }

    fn set_side(&mut self, side: Side) {
        self.side = side;
    }

    fn get_move(&mut self, board: &Board) -> Option<Move> {
        let report = self.engine.analyze(board, self.side);
        debug!(
            player = %self.name(),
            decision = ?report.decision,
            nodes = report.nodes,
            "Move chosen"
        );
        let mv = report.best_move;
        self.last_report = Some(report);
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Decision, Strategy};

    #[test]
    fn test_names() {
        let random = RandomPlayer::with_seed(Side::X, 1);
        assert_eq!(random.name(), "Random Agent (X)");

        let minimax = AiPlayer::new(Side::O, AiConfig::minimax(2));
        assert_eq!(minimax.name(), "Minimax Agent (Level 2) (O)");

        let mut alpha_beta = AiPlayer::new(Side::X, AiConfig::from_level(Strategy::AlphaBeta, 10));
        assert_eq!(alpha_beta.name(), "Alpha-Beta Agent (Level 5) (X)");
        alpha_beta.set_side(Side::O);
        assert_eq!(alpha_beta.name(), "Alpha-Beta Agent (Level 5) (O)");
    }

    #[test]
    fn test_random_player_picks_valid_move() {
        let mut b = Board::new(9).unwrap();
        b.make_move(4, 4, Side::X);
        let mut player = RandomPlayer::with_seed(Side::O, 7);
        for _ in 0..20 {
            let mv = player.get_move(&b).unwrap();
            assert!(b.is_valid_move(mv.row, mv.col));
            assert!(b.get_valid_moves().contains(&mv));
        }
    }

    #[test]
    fn test_random_player_first_move_is_center() {
        let b = Board::new(15).unwrap();
        let mut player = RandomPlayer::with_seed(Side::X, 0);
        assert_eq!(player.get_move(&b), Some(Move::new(7, 7)));
    }

    #[test]
    fn test_ai_player_keeps_report() {
        let b = Board::new(15).unwrap();
        let mut player = AiPlayer::new(Side::X, AiConfig::alpha_beta(2).with_seed(1));
        assert!(player.last_report().is_none());

        assert_eq!(player.get_move(&b), Some(Move::new(7, 7)));
        assert_eq!(player.last_report().map(|r| r.decision), Some(Decision::Opening));
    }
}
