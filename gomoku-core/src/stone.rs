//! 棋子（执子方）定义

use serde::{Deserialize, Serialize};

/// 执子方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 先手
    X,
    /// 后手
    O,
}

impl Side {
    /// 获取对方
    pub fn opponent(&self) -> Side {
        match self {
            Side::X => Side::O,
            Side::O => Side::X,
        }
    }

    /// 显示字符
    pub fn symbol(&self) -> char {
        match self {
            Side::X => 'X',
            Side::O => 'O',
        }
    }

    /// 从字符解析
    pub fn from_symbol(c: char) -> Option<Side> {
        match c {
            'x' | 'X' => Some(Side::X),
            'o' | 'O' => Some(Side::O),
            _ => None,
        }
    }

    /// 数组下标（Zobrist 等查表用）
    pub fn index(&self) -> usize {
        match self {
            Side::X => 0,
            Side::O => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// 一步已落下的棋（走法历史的元素）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacedStone {
    pub row: usize,
    pub col: usize,
    pub side: Side,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Side::X.opponent(), Side::O);
        assert_eq!(Side::O.opponent(), Side::X);
        assert_eq!(Side::X.opponent().opponent(), Side::X);
    }

    #[test]
    fn test_symbol_roundtrip() {
        assert_eq!(Side::from_symbol('X'), Some(Side::X));
        assert_eq!(Side::from_symbol('o'), Some(Side::O));
        assert_eq!(Side::from_symbol('.'), None);
        assert_eq!(Side::O.to_string(), "O");
    }
}
