//! 搜索用的局面评估函数
//!
//! 从每颗棋子出发沿四个方向数连续同色子和开放端，查形状分值表：
//! 己方形状加分，对方形状按防守权重（大于 1）扣分，再加中心控制分。
//! 两种搜索策略共用这一结构，只是常数和统计粒度不同。

use gomoku_core::{Board, Move, Side, DIRECTIONS, WIN_SCORE};

use crate::search::Strategy;

/// 形状分值表：(连子数, 开放端数) -> 分值
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternTable {
    /// 五连及以上
    pub five: i32,
    /// 四连 [一端开放, 两端开放]
    pub four: [i32; 2],
    /// 三连 [一端开放, 两端开放]
    pub three: [i32; 2],
    /// 二连 [一端开放, 两端开放]
    pub two: [i32; 2],
}

impl PatternTable {
    /// 查表
    pub fn score(&self, count: usize, open_ends: usize) -> i32 {
        if count >= 5 {
            return self.five;
        }
        let row = match count {
            4 => &self.four,
            3 => &self.three,
            2 => &self.two,
            _ => return 0,
        };
        match open_ends {
            1 => row[0],
            2 => row[1],
            _ => 0,
        }
    }
}

/// 评估参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalProfile {
    /// 形状分值表
    pub patterns: PatternTable,
    /// 防守权重（百分比，120 表示 1.2 倍）
    pub defense_percent: i32,
    /// 是否叠加棋盘自带的滑动窗口评估
    pub include_board_eval: bool,
    /// 每条连子只从端点统计一次（否则从连子中每颗子各统计一次）
    pub count_each_run_once: bool,
}

impl EvalProfile {
    /// Minimax 策略
    pub const MINIMAX: EvalProfile = EvalProfile {
        patterns: PatternTable {
            five: 10000,
            four: [100, 500],
            three: [10, 50],
            two: [2, 5],
        },
        defense_percent: 110,
        include_board_eval: false,
        count_each_run_once: true,
    };

    /// Alpha-Beta 策略
    pub const ALPHA_BETA: EvalProfile = EvalProfile {
        patterns: PatternTable {
            five: 10000,
            four: [500, 5000],
            three: [50, 200],
            two: [5, 10],
        },
        defense_percent: 120,
        include_board_eval: true,
        count_each_run_once: false,
    };
}

/// 评估器
#[derive(Debug, Clone)]
pub struct Evaluator {
    profile: EvalProfile,
}

impl Evaluator {
    pub fn new(profile: EvalProfile) -> Self {
        Self { profile }
    }

    /// 按搜索策略选择评估参数
    pub fn for_strategy(strategy: Strategy) -> Self {
        match strategy {
            Strategy::Minimax => Self::new(EvalProfile::MINIMAX),
            Strategy::AlphaBeta => Self::new(EvalProfile::ALPHA_BETA),
        }
    }

    pub fn profile(&self) -> &EvalProfile {
        &self.profile
    }

    /// 评估局面（`side` 视角，正值对 `side` 有利）
    pub fn evaluate(&self, board: &Board, side: Side) -> i32 {
        match board.check_winner() {
            Some(winner) if winner == side => return WIN_SCORE,
            Some(_) => return -WIN_SCORE,
            None => {}
        }

        let mut attack = 0;
        let mut defense = 0;

        for (pos, stone) in board.stones() {
            for &(dr, dc) in DIRECTIONS.iter() {
                if self.profile.count_each_run_once && Self::continues_run(board, pos, dr, dc, stone) {
                    continue;
                }
                let (count, open_ends) = Self::count_run(board, pos, dr, dc, stone);
                let points = self.profile.patterns.score(count, open_ends);
                if stone == side {
                    attack += points;
                } else {
                    defense += points;
                }
            }
        }

        let base = if self.profile.include_board_eval {
            board.evaluate(side)
        } else {
            0
        };

        base + attack - defense * self.profile.defense_percent / 100 + Self::center_control(board, side)
    }

    /// `pos` 的前一格（反方向）是否是同色子
    fn continues_run(board: &Board, pos: Move, dr: isize, dc: isize, stone: Side) -> bool {
        pos.offset(-dr, -dc, board.size())
            .is_some_and(|prev| board.get(prev.row, prev.col) == Some(stone))
    }

    /// 经过 `pos` 的连子长度和开放端数
    fn count_run(board: &Board, pos: Move, dr: isize, dc: isize, stone: Side) -> (usize, usize) {
        let mut count = 1;
        let mut open_ends = 0;

        for (sr, sc) in [(dr, dc), (-dr, -dc)] {
            let mut cur = pos;
            while let Some(next) = cur.offset(sr, sc, board.size()) {
                match board.get(next.row, next.col) {
                    Some(s) if s == stone => {
                        count += 1;
                        cur = next;
                    }
                    None => {
                        open_ends += 1;
                        break;
                    }
                    Some(_) => break,
                }
            }
        }

        (count, open_ends)
    }

    /// 中心控制：中心附近半径 size/4 内，权重随曼哈顿距离线性衰减，己方双倍、对方取负
    fn center_control(board: &Board, side: Side) -> i32 {
        let center = board.center();
        let radius = (board.size() / 4) as isize;

        let mut score = 0;
        for dr in -radius..=radius {
            for dc in -radius..=radius {
                let Some(pos) = center.offset(dr, dc, board.size()) else {
                    continue;
                };
                let Some(stone) = board.get(pos.row, pos.col) else {
                    continue;
                };
                let distance = (dr.abs() + dc.abs()) as i32;
                let weight = (radius as i32 - distance + 1).max(0);
                if stone == side {
                    score += weight * 2;
                } else {
                    score -= weight;
                }
            }
        }
        score
    }
}
