//! 终端棋盘渲染

use std::fmt::Write;

use gomoku_core::Board;

/// 把棋盘渲染为带行列编号的文本，最后一步用方括号标出
pub fn render(board: &Board) -> String {
    let size = board.size();
    let last = board.last_move();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..size {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..size {
        let _ = write!(out, "{:>3}", row);
        for col in 0..size {
            let symbol = board.get(row, col).map_or('.', |side| side.symbol());
            if last.is_some_and(|mv| mv.row == row && mv.col == col) {
                let _ = write!(out, "[{}]", symbol);
            } else {
                let _ = write!(out, " {} ", symbol);
            }
        }
        out.push('\n');
    }

    out
}
