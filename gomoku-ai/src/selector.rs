//! 走法排序
//!
//! 把全部候选走法缩减为一个按优先级排好的短列表，供搜索使用。

use std::collections::HashMap;

use gomoku_core::{Board, Move, Side};

/// 落子即成五 / 落子即挡住对方成五的加分
const WIN_BONUS: i32 = 10000;

/// 距离 1..=3 的邻近权重
const DISTANCE_WEIGHTS: [i32; 3] = [10, 5, 1];

/// 对方棋子的邻近倍数
const OPPONENT_PROXIMITY: i32 = 3;

/// 己方棋子的邻近倍数
const OWN_PROXIMITY: i32 = 2;

/// 威胁等级的放大倍数
const THREAT_WEIGHT: i32 = 20;

/// 历史表权重的缩放除数
const HISTORY_DIVISOR: u64 = 100;

/// 快速战术检查的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tactic {
    /// 一步成五
    Win(Move),
    /// 挡住对方的一步成五
    Block(Move),
}

impl Tactic {
    pub fn mv(&self) -> Move {
        match self {
            Tactic::Win(mv) | Tactic::Block(mv) => *mv,
        }
    }
}

/// 走法选择器
///
/// 持有走法历史表：迭代加深时，上一层搜索过的根走法按 2^depth 累加权重，
/// 用于下一层的排序。每次 `get_move` 开始时清空。
#[derive(Debug, Default)]
pub struct MoveSelector {
    history: HashMap<Move, u64>,
}

impl MoveSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// 清空历史表
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// 累加历史权重
    pub fn record(&mut self, mv: Move, weight: u64) {
        let entry = self.history.entry(mv).or_insert(0);
        *entry = entry.saturating_add(weight);
    }

    /// 历史权重
    pub fn history_weight(&self, mv: Move) -> u64 {
        self.history.get(&mv).copied().unwrap_or(0)
    }

    /// 按优先级从高到低排列候选走法（`side` 为引擎方）
    pub fn order_moves(&self, board: &mut Board, side: Side) -> Vec<Move> {
        let mut scored: Vec<(Move, i32)> = board
            .get_valid_moves()
            .into_iter()
            .map(|mv| (mv, self.score_move(board, mv, side)))
            .collect();

        // 稳定排序：同分保持生成顺序
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().map(|(mv, _)| mv).collect()
    }

    /// 单个走法的排序分
    pub fn score_move(&self, board: &mut Board, mv: Move, side: Side) -> i32 {
        let opponent = side.opponent();
        let mut score = 0;

        if board.would_win(mv.row, mv.col, side) {
            score += WIN_BONUS;
        }
        if board.would_win(mv.row, mv.col, opponent) {
            score += WIN_BONUS;
        }

        score += Self::proximity_score(board, mv, side);

        let to_center = mv.manhattan(board.center()) as i32;
        score += (board.size() as i32 - to_center) * 2;

        score += (board.threat_level(mv.row, mv.col, side)
            + board.threat_level(mv.row, mv.col, opponent))
            * THREAT_WEIGHT;

        let history = i32::try_from(self.history_weight(mv) / HISTORY_DIVISOR).unwrap_or(i32::MAX);
        score.saturating_add(history)
    }

    /// 邻近分：逐层扩大方框（半径 1..=3），对方子比己方子权重更高；
    /// 某一层方框内没有任何棋子时停止
    fn proximity_score(board: &Board, mv: Move, side: Side) -> i32 {
        let mut score = 0;

        for (distance, weight) in (1isize..=3).zip(DISTANCE_WEIGHTS) {
            let mut has_stone = false;
            for dr in -distance..=distance {
                for dc in -distance..=distance {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let Some(near) = mv.offset(dr, dc, board.size()) else {
                        continue;
                    };
                    match board.get(near.row, near.col) {
                        Some(stone) if stone == side => {
                            has_stone = true;
                            score += weight * OWN_PROXIMITY;
                        }
                        Some(_) => {
                            has_stone = true;
                            score += weight * OPPONENT_PROXIMITY;
                        }
                        None => {}
                    }
                }
            }
            if !has_stone {
                break;
            }
        }

        score
    }

    /// 快速战术检查：先找己方一步成五，再找需要挡的对方一步成五
    ///
    /// 两种搜索策略都扫描全部排序后的候选走法。
    pub fn quick_tactics(board: &Board, candidates: &[Move], side: Side) -> Option<Tactic> {
        if let Some(&mv) = candidates
            .iter()
            .find(|mv| board.would_win(mv.row, mv.col, side))
        {
            return Some(Tactic::Win(mv));
        }

        candidates
            .iter()
            .find(|mv| board.would_win(mv.row, mv.col, side.opponent()))
            .map(|&mv| Tactic::Block(mv))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board {
        Board::from_rows(rows).unwrap()
    }

    const OPEN_THREE: [&str; 15] = [
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "........X......",
        ".....OOO.......",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
        "...............",
    ];

    #[test]
    fn test_block_open_three_in_top_three() {
        let mut b = board(&OPEN_THREE);
        let selector = MoveSelector::new();
        let ordered = selector.order_moves(&mut b, Side::X);

        let blocks = [Move::new(7, 4), Move::new(7, 8)];
        assert!(
            ordered.iter().take(3).any(|mv| blocks.contains(mv)),
            "top-3 should contain a block, got {:?}",
            &ordered[..3]
        );
    }

    #[test]
    fn test_order_moves_is_permutation_of_valid_moves() {
        let mut b = board(&OPEN_THREE);
        let mut valid = b.get_valid_moves();
        let mut ordered = MoveSelector::new().order_moves(&mut b, Side::X);
        valid.sort();
        ordered.sort();
        assert_eq!(valid, ordered);
    }

    #[test]
    fn test_winning_move_ranked_first() {
        let mut b = board(&[
            ".........",
            ".........",
            ".........",
            "..XXXX...",
            ".O.O.O...",
            ".........",
            ".........",
            "......O..",
            ".........",
        ]);
        let ordered = MoveSelector::new().order_moves(&mut b, Side::X);
        let wins = [Move::new(3, 1), Move::new(3, 6)];
        assert!(wins.contains(&ordered[0]), "got {:?}", ordered[0]);
    }

    #[test]
    fn test_proximity_prefers_opponent_stones() {
        let b = board(&[
            ".......",
            ".......",
            "..X....",
            ".......",
            "....O..",
            ".......",
            ".......",
        ]);
        // (1,2) 紧挨 X，(5,4) 紧挨 O
        let near_own = MoveSelector::proximity_score(&b, Move::new(1, 2), Side::X);
        let near_opp = MoveSelector::proximity_score(&b, Move::new(5, 4), Side::X);
        assert!(near_opp > near_own);
    }

    #[test]
    fn test_proximity_stops_at_empty_ring() {
        let b = board(&[
            "X.......",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
            "........",
        ]);
        assert_eq!(MoveSelector::proximity_score(&b, Move::new(7, 7), Side::X), 0);
        // 距离 1 的方框内有子：10*2；距离 2、3 的方框各再数一次
        assert_eq!(MoveSelector::proximity_score(&b, Move::new(1, 1), Side::X), 20 + 10 + 2);
    }

    #[test]
    fn test_history_contributes() {
        let mut b = board(&[
            ".......",
            ".......",
            ".......",
            "...X...",
            ".......",
            ".......",
            ".......",
        ]);
        let mut selector = MoveSelector::new();
        let mv = Move::new(0, 0);
        let before = selector.score_move(&mut b, mv, Side::O);
        selector.record(mv, 1000);
        assert_eq!(selector.score_move(&mut b, mv, Side::O), before + 10);

        selector.clear_history();
        assert_eq!(selector.history_weight(mv), 0);
    }

    #[test]
    fn test_huge_history_weight_saturates() {
        let mut b = board(&[
            ".......",
            ".......",
            ".......",
            "...X...",
            ".......",
            ".......",
            ".......",
        ]);
        let mut selector = MoveSelector::new();
        let far = Move::new(0, 0);
        let near = Move::new(3, 4);
        // 深度 40 以上的 2^depth 累加
        selector.record(far, 1u64 << 45);
        selector.record(far, u64::MAX);
        assert_eq!(selector.history_weight(far), u64::MAX);

        let far_score = selector.score_move(&mut b, far, Side::O);
        assert!(far_score > selector.score_move(&mut b, near, Side::O));
        assert!(far_score > 0);
    }

    #[test]
    fn test_quick_tactics_prefers_win_over_block() {
        let b = board(&[
            ".........",
            ".XXXX....",
            ".........",
            ".OOOO....",
            ".........",
            ".........",
            ".........",
            ".........",
            ".........",
        ]);
        let candidates = b.get_valid_moves();
        let tactic = MoveSelector::quick_tactics(&b, &candidates, Side::O).unwrap();
        assert!(matches!(tactic, Tactic::Win(_)));
        assert_eq!(tactic.mv().row, 3);

        let tactic = MoveSelector::quick_tactics(&b, &candidates, Side::X).unwrap();
        assert!(matches!(tactic, Tactic::Win(_)));
        assert_eq!(tactic.mv().row, 1);
    }

    #[test]
    fn test_quick_tactics_block() {
        let b = board(&[
            ".........",
            ".........",
            ".........",
            "..OOOOX..",
            ".........",
            "....X....",
            ".........",
            ".........",
            ".........",
        ]);
        let candidates = b.get_valid_moves();
        assert_eq!(
            MoveSelector::quick_tactics(&b, &candidates, Side::X),
            Some(Tactic::Block(Move::new(3, 1)))
        );
    }

    #[test]
    fn test_quick_tactics_none() {
        let b = board(&[
            ".......",
            ".......",
            "..XO...",
            ".......",
            ".......",
            ".......",
            ".......",
        ]);
        let candidates = b.get_valid_moves();
        assert_eq!(MoveSelector::quick_tactics(&b, &candidates, Side::X), None);
    }
}
