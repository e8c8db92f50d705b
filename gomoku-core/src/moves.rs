//! 走法

use serde::{Deserialize, Serialize};

/// 走法：落子坐标 (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    /// 创建新走法
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 到另一格的曼哈顿距离
    pub fn manhattan(&self, other: Move) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// 按偏移量移动，越界（小于 0 或不小于 size）时返回 None
    pub fn offset(&self, dr: isize, dc: isize, size: usize) -> Option<Move> {
        let row = self.row as isize + dr;
        let col = self.col as isize + dc;
        if row < 0 || col < 0 || row >= size as isize || col >= size as isize {
            return None;
        }
        Some(Move::new(row as usize, col as usize))
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_bounds() {
        let mv = Move::new(0, 14);
        assert_eq!(mv.offset(1, -1, 15), Some(Move::new(1, 13)));
        assert_eq!(mv.offset(-1, 0, 15), None);
        assert_eq!(mv.offset(0, 1, 15), None);
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Move::new(7, 7).manhattan(Move::new(5, 10)), 5);
        assert_eq!(Move::new(3, 3).manhattan(Move::new(3, 3)), 0);
    }
}
