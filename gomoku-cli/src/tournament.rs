//! 循环赛
//!
//! 每对选手下若干局，先后手轮换；排名按 (3·胜 + 和) / (3·局数)。

use std::io::Write;

use anyhow::Result;
use gomoku_ai::{AiConfig, AiPlayer, Player, RandomPlayer, Strategy};
use gomoku_core::{Board, Side};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::game::{Game, GameOutcome};

/// 锦标赛默认棋盘边长
pub const TOURNAMENT_BOARD_SIZE: usize = 10;

/// 每对选手默认局数
pub const DEFAULT_GAMES_PER_PAIR: usize = 10;

/// 参赛选手
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entrant {
    Random,
    Ai(AiConfig),
}

impl Entrant {
    /// 不含执子方的名称
    pub fn label(&self) -> String {
        match self {
            Entrant::Random => "Random Agent".to_string(),
            Entrant::Ai(config) => format!(
                "{} Agent (Level {})",
                config.strategy.label(),
                config.max_depth
            ),
        }
    }

    fn build(&self, seed: u64) -> Box<dyn Player> {
        match self {
            Entrant::Random => Box::new(RandomPlayer::with_seed(Side::X, seed)),
            Entrant::Ai(config) => Box::new(AiPlayer::new(Side::X, config.clone().with_seed(seed))),
        }
    }
}

/// 默认阵容：随机、Minimax 1..=3、Alpha-Beta 1..=5
pub fn default_roster() -> Vec<Entrant> {
    let mut roster = vec![Entrant::Random];
    roster.extend((1..=3).map(|depth| Entrant::Ai(AiConfig::minimax(depth))));
    roster.extend((1..=5).map(|depth| Entrant::Ai(AiConfig::alpha_beta(depth))));
    roster
}

/// 按策略和深度列表构造阵容（不含随机选手）
pub fn roster_for(strategy: Strategy, depths: &[u8]) -> Vec<Entrant> {
    depths
        .iter()
        .map(|&depth| match strategy {
            Strategy::Minimax => Entrant::Ai(AiConfig::minimax(depth)),
            Strategy::AlphaBeta => Entrant::Ai(AiConfig::alpha_beta(depth)),
        })
        .collect()
}

/// 单个选手的战绩
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Standing {
    fn new(name: String) -> Self {
        Self {
            name,
            wins: 0,
            losses: 0,
            draws: 0,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// (3·胜 + 和) / (3·局数)，未下棋时为 0
    pub fn score(&self) -> f64 {
        let games = self.games();
        if games == 0 {
            return 0.0;
        }
        (3 * self.wins + self.draws) as f64 / (3 * games) as f64
    }
}

/// 循环赛
#[derive(Debug, Clone)]
pub struct Tournament {
    pub board_size: usize,
    pub games_per_pair: usize,
    pub seed: Option<u64>,
}

impl Default for Tournament {
    fn default() -> Self {
        Self {
            board_size: TOURNAMENT_BOARD_SIZE,
            games_per_pair: DEFAULT_GAMES_PER_PAIR,
            seed: None,
        }
    }
}

impl Tournament {
    /// 进行全部对局，返回按得分从高到低排好的战绩
    pub fn run(&self, roster: &[Entrant], out: &mut dyn Write) -> Result<Vec<Standing>> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut standings: Vec<Standing> = roster.iter().map(|e| Standing::new(e.label())).collect();

        for a in 0..roster.len() {
            for b in (a + 1)..roster.len() {
                writeln!(out, "{} vs {}", roster[a].label(), roster[b].label())?;

                for game_idx in 0..self.games_per_pair {
                    // 偶数局 a 先手，奇数局 b 先手
                    let (x_idx, o_idx) = if game_idx % 2 == 0 { (a, b) } else { (b, a) };
                    let board = Board::new(self.board_size)?;
                    let mut game = Game::new(
                        board,
                        roster[x_idx].build(rng.gen()),
                        roster[o_idx].build(rng.gen()),
                    );
                    let outcome = game.play(&mut std::io::sink())?;

                    match outcome {
                        GameOutcome::Winner(Side::X) => {
                            standings[x_idx].wins += 1;
                            standings[o_idx].losses += 1;
                        }
                        GameOutcome::Winner(Side::O) => {
                            standings[o_idx].wins += 1;
                            standings[x_idx].losses += 1;
                        }
                        GameOutcome::Draw | GameOutcome::Aborted => {
                            if outcome == GameOutcome::Aborted {
                                warn!(game = game_idx, "Automated game aborted, counted as draw");
                            }
                            standings[x_idx].draws += 1;
                            standings[o_idx].draws += 1;
                        }
                    }

                    writeln!(
                        out,
                        "  Game {}: {} (X) vs {} (O) -> {:?}",
                        game_idx + 1,
                        roster[x_idx].label(),
                        roster[o_idx].label(),
                        outcome
                    )?;
                }
            }
        }

        standings.sort_by(|l, r| r.score().total_cmp(&l.score()));
        info!(entrants = roster.len(), games_per_pair = self.games_per_pair, "Tournament finished");
        Ok(standings)
    }
}

/// 排名表
pub fn format_rankings(standings: &[Standing]) -> String {
    standings
        .iter()
        .enumerate()
        .map(|(rank, s)| {
            format!(
                "{}. {}: W {}, L {}, D {}, score {:.2}%\n",
                rank + 1,
                s.name,
                s.wins,
                s.losses,
                s.draws,
                s.score() * 100.0
            )
        })
        .collect()
}

/// 排名的 JSON 形式
pub fn rankings_json(standings: &[Standing]) -> Value {
    standings
        .iter()
        .enumerate()
        .map(|(rank, s)| {
            json!({
                "rank": rank + 1,
                "name": s.name,
                "wins": s.wins,
                "losses": s.losses,
                "draws": s.draws,
                "games": s.games(),
                "score": s.score(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let labels: Vec<String> = default_roster().iter().map(|e| e.label()).collect();
        assert_eq!(labels.len(), 9);
        assert_eq!(labels[0], "Random Agent");
        assert_eq!(labels[1], "Minimax Agent (Level 1)");
        assert_eq!(labels[8], "Alpha-Beta Agent (Level 5)");
    }

    #[test]
    fn test_roster_for() {
        let roster = roster_for(Strategy::AlphaBeta, &[1, 3]);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[1].label(), "Alpha-Beta Agent (Level 3)");
    }

    #[test]
    fn test_standing_score() {
        let mut s = Standing::new("a".to_string());
        assert_eq!(s.score(), 0.0);
        s.wins = 2;
        s.draws = 1;
        s.losses = 1;
        assert_eq!(s.games(), 4);
        assert!((s.score() - 7.0 / 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_tournament_is_consistent() {
        let tournament = Tournament {
            board_size: 7,
            games_per_pair: 2,
            seed: Some(3),
        };
        let roster = vec![Entrant::Random, Entrant::Random, Entrant::Ai(AiConfig::alpha_beta(1))];
        let mut out = Vec::new();
        let standings = tournament.run(&roster, &mut out).unwrap();

        assert_eq!(standings.len(), 3);
        for s in &standings {
            // 每人对另外两人各两局
            assert_eq!(s.games(), 4);
        }
        let wins: u32 = standings.iter().map(|s| s.wins).sum();
        let losses: u32 = standings.iter().map(|s| s.losses).sum();
        assert_eq!(wins, losses);
        assert!(standings.windows(2).all(|w| w[0].score() >= w[1].score()));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Game 2: "));
        assert!(format_rankings(&standings).starts_with("1. "));
    }

    #[test]
    fn test_rankings_json() {
        let s = Standing {
            name: "Random Agent".to_string(),
            wins: 1,
            losses: 0,
            draws: 1,
        };
        let value = rankings_json(&[s]);
        assert_eq!(value[0]["rank"], 1);
        assert_eq!(value[0]["name"], "Random Agent");
        assert_eq!(value[0]["games"], 2);
        assert_eq!(value[0]["draws"], 1);
        assert!((value[0]["score"].as_f64().unwrap() - 4.0 / 6.0).abs() < 1e-9);
    }
}
