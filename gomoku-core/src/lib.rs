//! 五子棋核心库
//!
//! 包含:
//! - 执子方、走法等基础类型
//! - 棋盘状态：落子、胜负判定、候选走法生成
//! - 棋盘静态评估和走法重要度排序
//! - 文本棋盘格式

mod board;
mod constants;
mod error;
mod layout;
mod moves;
mod stone;

pub use board::Board;
pub use constants::*;
pub use error::{GomokuError, Result};
pub use moves::Move;
pub use stone::{PlacedStone, Side};
