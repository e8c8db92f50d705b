//! 棋盘状态
//!
//! 包含落子、胜负判定、候选走法生成、走法重要度排序和静态评估

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BOARD_SIZE, DIRECTIONS, MAX_BOARD_SIZE, NEIGHBORHOOD_RADIUS, WIN_LENGTH, WIN_SCORE,
};
use crate::error::{GomokuError, Result};
use crate::moves::Move;
use crate::stone::{PlacedStone, Side};

/// 威胁形状分值
const OPEN_FOUR_THREAT: i32 = 100;
const HALF_OPEN_FOUR_THREAT: i32 = 50;
const OPEN_THREE_THREAT: i32 = 20;

/// 走法重要度中，威胁等级的放大倍数
const THREAT_IMPORTANCE: f64 = 20.0;

/// 走法重要度中，落子即成五的加分
const WIN_IMPORTANCE: f64 = 1000.0;

/// 中心控制的五个区域权重（角、边、中心、边、角）
const CENTER_ZONE_WEIGHTS: [i32; 5] = [1, 2, 3, 2, 1];

/// 棋盘
///
/// `threat_cache` 是派生数据：每次落子都会清空，复制棋盘时也不会带走。
#[derive(Debug, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    /// 边长
    size: usize,
    /// size x size 格子，索引为 row * size + col
    cells: Vec<Option<Side>>,
    /// 已落子数
    move_count: usize,
    /// 最后一步
    last_move: Option<Move>,
    /// 走法历史（只追加）
    history: Vec<PlacedStone>,
    /// (row, col, side) -> 威胁等级
    #[serde(skip)]
    threat_cache: HashMap<(usize, usize, Side), i32>,
}

/// 反序列化的原始形态，校验通过后才转换为 `Board`
#[derive(Deserialize)]
struct BoardSnapshot {
    size: usize,
    cells: Vec<Option<Side>>,
    move_count: usize,
    last_move: Option<Move>,
    history: Vec<PlacedStone>,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GomokuError;

    /// 按走法历史重放，其余字段必须与重放结果一致
    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let mut board = Board::new(snapshot.size)?;
        for stone in &snapshot.history {
            board.try_move(stone.row, stone.col, stone.side)?;
        }

        let mismatch = |field: &str| GomokuError::InconsistentSnapshot {
            reason: format!("{} does not match the move history", field),
        };
        if snapshot.cells != board.cells {
            return Err(mismatch("cells"));
        }
        if snapshot.move_count != board.move_count {
            return Err(mismatch("move_count"));
        }
        if snapshot.last_move != board.last_move {
            return Err(mismatch("last_move"));
        }
        Ok(board)
    }
}

impl Board {
    /// 创建指定边长的空棋盘
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(GomokuError::InvalidBoardSize {
                size,
                max: MAX_BOARD_SIZE,
            });
        }
        Ok(Self::empty(size))
    }

    fn empty(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
            move_count: 0,
            last_move: None,
            history: Vec::new(),
            threat_cache: HashMap::new(),
        }
    }

    /// 边长
    pub fn size(&self) -> usize {
        self.size
    }

    /// 已落子数
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    /// 最后一步
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// 走法历史
    pub fn history(&self) -> &[PlacedStone] {
        &self.history
    }

    /// 中心格
    pub fn center(&self) -> Move {
        let mid = self.size / 2;
        Move::new(mid, mid)
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.size + col
    }

    #[inline]
    fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    /// 获取指定格的棋子（越界或空格返回 None）
    pub fn get(&self, row: usize, col: usize) -> Option<Side> {
        if self.in_bounds(row, col) {
            self.cells[self.index(row, col)]
        } else {
            None
        }
    }

    /// 所有已落的棋子，按行优先顺序
    pub fn stones(&self) -> impl Iterator<Item = (Move, Side)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|side| (Move::new(idx / self.size, idx % self.size), side))
        })
    }

    /// 所有空格，按行优先顺序
    pub fn empty_cells(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(move |(idx, _)| Move::new(idx / self.size, idx % self.size))
    }

    /// 坐标在棋盘内且为空
    pub fn is_valid_move(&self, row: usize, col: usize) -> bool {
        self.in_bounds(row, col) && self.cells[self.index(row, col)].is_none()
    }

    /// 落子，失败时不修改棋盘
    pub fn try_move(&mut self, row: usize, col: usize, side: Side) -> Result<()> {
        if !self.in_bounds(row, col) {
            return Err(GomokuError::OutOfBounds {
                row,
                col,
                size: self.size,
            });
        }
        let idx = self.index(row, col);
        if self.cells[idx].is_some() {
            return Err(GomokuError::CellOccupied { row, col });
        }

        self.cells[idx] = Some(side);
        self.last_move = Some(Move::new(row, col));
        self.move_count += 1;
        self.history.push(PlacedStone { row, col, side });
        self.threat_cache.clear();
        Ok(())
    }

    /// 落子，返回是否成功
    pub fn make_move(&mut self, row: usize, col: usize, side: Side) -> bool {
        self.try_move(row, col, side).is_ok()
    }

    /// 深拷贝（不含威胁缓存）
    pub fn copy(&self) -> Board {
        self.clone()
    }

    /// 判断胜者
    ///
    /// 只检查经过最后一步的四条线，因此必须在每次落子后立即调用，
    /// 不能当作全盘扫描使用。
    pub fn check_winner(&self) -> Option<Side> {
        let last = self.last_move?;
        let side = self.get(last.row, last.col)?;

        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.line_length(last, dr, dc, side) >= WIN_LENGTH)
            .then_some(side)
    }

    /// 在 `origin` 处（视为 `side` 的子）沿 (dr, dc) 两个方向连续同色子的总数
    fn line_length(&self, origin: Move, dr: isize, dc: isize, side: Side) -> usize {
        1 + self.count_direction(origin, dr, dc, side) + self.count_direction(origin, -dr, -dc, side)
    }

    /// 从 `origin` 的下一格开始，沿一个方向数连续的 `side` 子
    fn count_direction(&self, origin: Move, dr: isize, dc: isize, side: Side) -> usize {
        let mut count = 0;
        let mut cur = origin;
        while let Some(next) = cur.offset(dr, dc, self.size) {
            if self.get(next.row, next.col) != Some(side) {
                break;
            }
            count += 1;
            cur = next;
        }
        count
    }

    /// 沿一个方向数连续同色子，并记录尽头是否为空格（开放端）
    fn scan_run(&self, origin: Move, dr: isize, dc: isize, side: Side) -> (usize, usize) {
        let mut count = 0;
        let mut cur = origin;
        while let Some(next) = cur.offset(dr, dc, self.size) {
            match self.get(next.row, next.col) {
                Some(s) if s == side => {
                    count += 1;
                    cur = next;
                }
                None => return (count, 1),
                Some(_) => break,
            }
        }
        (count, 0)
    }

    /// 在 (row, col) 放下 `side` 后是否成五（不修改棋盘）
    pub fn would_win(&self, row: usize, col: usize, side: Side) -> bool {
        let origin = Move::new(row, col);
        DIRECTIONS
            .iter()
            .any(|&(dr, dc)| self.line_length(origin, dr, dc, side) >= WIN_LENGTH)
    }

    /// 棋盘是否已满
    pub fn is_full(&self) -> bool {
        self.move_count == self.size * self.size
    }

    /// 候选走法
    ///
    /// 第一步只返回中心；之后返回距离任一已有棋子不超过 3 格（切比雪夫距离）的空格，
    /// 若为空则退化为所有空格。
    pub fn get_valid_moves(&self) -> Vec<Move> {
        if self.move_count == 0 {
            return vec![self.center()];
        }

        let mut moves = Vec::new();
        let mut seen = vec![false; self.size * self.size];

        for (stone, _) in self.stones() {
            for dr in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
                for dc in -NEIGHBORHOOD_RADIUS..=NEIGHBORHOOD_RADIUS {
                    let Some(mv) = stone.offset(dr, dc, self.size) else {
                        continue;
                    };
                    let idx = self.index(mv.row, mv.col);
                    if self.cells[idx].is_none() && !seen[idx] {
                        seen[idx] = true;
                        moves.push(mv);
                    }
                }
            }
        }

        if moves.is_empty() {
            moves.extend(self.empty_cells());
        }

        moves
    }

    /// 按重要度排序的候选走法，`max_moves` 为 None 时返回全部
    pub fn get_smart_moves(&mut self, max_moves: Option<usize>) -> Vec<Move> {
        if self.move_count == 0 {
            return vec![self.center()];
        }

        let mut scored: Vec<(Move, f64)> = self
            .get_valid_moves()
            .into_iter()
            .map(|mv| (mv, self.move_importance(mv)))
            .collect();

        // 稳定排序：同分保持生成顺序
        scored.sort_by(|a, b| b.1.total_cmp(&a.1));

        let limit = max_moves.unwrap_or(scored.len());
        scored.into_iter().take(limit).map(|(mv, _)| mv).collect()
    }

    /// 走法重要度：邻近密度 + 中心接近度 + 双方成五/威胁形状
    fn move_importance(&mut self, mv: Move) -> f64 {
        let mut importance = 0.0;

        for dr in -2isize..=2 {
            for dc in -2isize..=2 {
                let Some(near) = mv.offset(dr, dc, self.size) else {
                    continue;
                };
                if self.get(near.row, near.col).is_none() {
                    continue;
                }
                importance += match dr.abs() + dc.abs() {
                    1 => 5.0,
                    2 => 2.0,
                    3 => 1.0,
                    4 => 0.5,
                    _ => 0.0,
                };
            }
        }

        let half = (self.size / 2) as isize;
        let to_center = mv.manhattan(self.center()) as isize;
        importance += (half - to_center).max(0) as f64;

        for side in [Side::X, Side::O] {
            if self.would_win(mv.row, mv.col, side) {
                importance += WIN_IMPORTANCE;
            }
            importance += self.threat_level(mv.row, mv.col, side) as f64 * THREAT_IMPORTANCE;
        }

        importance
    }

    /// 在 (row, col) 放下 `side` 后形成的威胁等级（带缓存，落子后失效）
    ///
    /// 每个方向：活四 +100，冲四 +50，活三 +20。
    pub fn threat_level(&mut self, row: usize, col: usize, side: Side) -> i32 {
        if let Some(&cached) = self.threat_cache.get(&(row, col, side)) {
            return cached;
        }

        let origin = Move::new(row, col);
        let mut level = 0;
        for &(dr, dc) in DIRECTIONS.iter() {
            let (fwd, fwd_open) = self.scan_run(origin, dr, dc, side);
            let (bwd, bwd_open) = self.scan_run(origin, -dr, -dc, side);
            let consecutive = 1 + fwd + bwd;
            let open_ends = fwd_open + bwd_open;

            level += match (consecutive, open_ends) {
                (4, 2) => OPEN_FOUR_THREAT,
                (4, 1) => HALF_OPEN_FOUR_THREAT,
                (3, 2) => OPEN_THREE_THREAT,
                _ => 0,
            };
        }

        self.threat_cache.insert((row, col, side), level);
        level
    }

    /// 静态评估（`side` 视角）
    ///
    /// 已分胜负时返回 ±10000；否则对每行、每列、每条对角线做宽度为 6 的滑动窗口
    /// 形状打分，再加上分区的中心控制分。
    pub fn evaluate(&self, side: Side) -> i32 {
        match self.check_winner() {
            Some(winner) if winner == side => return WIN_SCORE,
            Some(_) => return -WIN_SCORE,
            None => {}
        }

        let n = self.size;
        let mut score = 0;

        for row in 0..n {
            let line: Vec<Option<Side>> = (0..n).map(|col| self.get(row, col)).collect();
            score += evaluate_line(&line, side);
        }

        for col in 0..n {
            let line: Vec<Option<Side>> = (0..n).map(|row| self.get(row, col)).collect();
            score += evaluate_line(&line, side);
        }

        let size = n as isize;

        // 主对角线：cell(i, i - offset)
        for offset in (-size + 5)..(size - 4) {
            let line: Vec<Option<Side>> = (offset.max(0)..size.min(size + offset))
                .map(|i| self.get(i as usize, (i - offset) as usize))
                .collect();
            if line.len() >= WIN_LENGTH {
                score += evaluate_line(&line, side);
            }
        }

        // 副对角线：cell(i, offset - i)
        for offset in 4..(2 * size - 5) {
            let line: Vec<Option<Side>> = ((offset - size + 1).max(0)..size.min(offset + 1))
                .map(|i| self.get(i as usize, (offset - i) as usize))
                .collect();
            if line.len() >= WIN_LENGTH {
                score += evaluate_line(&line, side);
            }
        }

        score + self.center_control(side)
    }

    /// 中心控制：把对角带分成五个区域，按 1,2,3,2,1 加权
    fn center_control(&self, side: Side) -> i32 {
        let n = self.size;
        let c = n / 2;
        let zones = [
            (0, c / 2),
            (c / 2, c * 3 / 4),
            (c * 3 / 4, c * 5 / 4),
            (c * 5 / 4, c * 3 / 2),
            (c * 3 / 2, n),
        ];

        let mut score = 0;
        for (&(start, end), &weight) in zones.iter().zip(CENTER_ZONE_WEIGHTS.iter()) {
            for row in start..end {
                for col in start..end {
                    match self.get(row, col) {
                        Some(s) if s == side => score += weight,
                        Some(_) => score -= weight,
                        None => {}
                    }
                }
            }
        }
        score
    }
}

/// 对一条线做宽度为 6 的滑动窗口打分
fn evaluate_line(line: &[Option<Side>], side: Side) -> i32 {
    if line.len() < 6 {
        return 0;
    }
    line.windows(6).map(|window| window_score(window, side)).sum()
}

/// 单个 6 格窗口的形状分
///
/// 各条件相互独立，不是互斥分支。
fn window_score(window: &[Option<Side>], side: Side) -> i32 {
    let opponent = side.opponent();
    let own = window.iter().filter(|c| **c == Some(side)).count();
    let opp = window.iter().filter(|c| **c == Some(opponent)).count();
    let empty = window.iter().filter(|c| c.is_none()).count();
    let open = |i: usize| window[i].is_none();

    let mut score = 0;

    // 成五
    if own == 5 && empty == 1 {
        score += 10000;
    }
    // 活四 _XXXX_ / 其他四
    if own == 4 && empty == 2 {
        score += if open(0) && open(5) { 5000 } else { 500 };
    }
    // 冲四
    if own == 4 && empty == 1 {
        score += 100;
    }
    // 活三 _XXX__
    if own == 3 && empty == 3 {
        score += if open(0) && open(4) { 50 } else { 10 };
    }
    // 眠三
    if own == 3 && empty == 2 && opp == 1 {
        score += 5;
    }
    // 活二
    if own == 2 && empty == 4 {
        score += 2;
    }

    // 防守
    if opp == 4 && empty == 2 {
        score -= if open(0) && open(5) { 4500 } else { 400 };
    }
    if opp == 4 && empty == 1 {
        score -= 90;
    }
    if opp == 3 && empty == 3 {
        score -= if open(0) && open(4) { 40 } else { 8 };
    }
    if opp == 3 && empty == 2 && own == 1 {
        score -= 4;
    }

    score
}

impl Clone for Board {
    fn clone(&self) -> Self {
        Self {
            size: self.size,
            cells: self.cells.clone(),
            move_count: self.move_count,
            last_move: self.last_move,
            history: self.history.clone(),
            threat_cache: HashMap::new(),
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size
            && self.cells == other.cells
            && self.move_count == other.move_count
            && self.last_move == other.last_move
            && self.history == other.history
    }
}

impl Eq for Board {}

impl Default for Board {
    fn default() -> Self {
        Self::empty(DEFAULT_BOARD_SIZE)
    }
}
