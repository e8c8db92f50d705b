//! 文本棋盘格式
//!
//! 每行一个字符串，`.` 表示空格，`X` / `O` 表示棋子（不区分大小写）：
//!
//! ```text
//! .....
//! .XO..
//! ..X..
//! .....
//! .....
//! ```
//!
//! 解析时按行优先顺序落子，因此最后一步是扫描到的最后一颗子。

use crate::board::Board;
use crate::error::{GomokuError, Result};
use crate::stone::Side;

impl Board {
    /// 从文本行解析棋盘
    pub fn from_rows(rows: &[&str]) -> Result<Board> {
        let size = rows.len();
        let mut board = Board::new(size).map_err(|e| GomokuError::InvalidLayout {
            reason: e.to_string(),
        })?;

        for (row, line) in rows.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(GomokuError::InvalidLayout {
                    reason: format!("Row {} has {} columns, expected {}", row, width, size),
                });
            }

            for (col, c) in line.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let side = Side::from_symbol(c).ok_or_else(|| GomokuError::InvalidLayout {
                    reason: format!("Invalid cell character: {}", c),
                })?;
                board.try_move(row, col, side)?;
            }
        }

        Ok(board)
    }

    /// 转换为文本行
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.size())
            .map(|row| {
                (0..self.size())
                    .map(|col| self.get(row, col).map_or('.', |side| side.symbol()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;

    #[test]
    fn test_parse_layout() {
        let board = Board::from_rows(&[
            ".....",
            ".XO..",
            "..x..",
            ".....",
            ".....",
        ])
        .unwrap();

        assert_eq!(board.size(), 5);
        assert_eq!(board.move_count(), 3);
        assert_eq!(board.get(1, 1), Some(Side::X));
        assert_eq!(board.get(1, 2), Some(Side::O));
        assert_eq!(board.get(2, 2), Some(Side::X));
        assert_eq!(board.last_move(), Some(Move::new(2, 2)));
    }

    #[test]
    fn test_layout_roundtrip() {
        let rows = ["X....", ".O...", "..X..", "...O.", "....."];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.to_rows(), rows);
    }

    #[test]
    fn test_invalid_layout() {
        assert!(matches!(
            Board::from_rows(&["...", "..", "..."]),
            Err(GomokuError::InvalidLayout { .. })
        ));
        assert!(matches!(
            Board::from_rows(&["..", ".#"]),
            Err(GomokuError::InvalidLayout { .. })
        ));
        assert!(Board::from_rows(&[]).is_err());
    }

    #[test]
    fn test_layout_winner_uses_last_scanned_stone() {
        let board = Board::from_rows(&[
            "......",
            "XXXXX.",
            "......",
            "......",
            "......",
            "......",
        ])
        .unwrap();
        assert_eq!(board.check_winner(), Some(Side::X));
    }
}
