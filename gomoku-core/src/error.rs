//! 错误类型定义

use thiserror::Error;

/// 棋盘与规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GomokuError {
    /// 棋盘尺寸不合法
    #[error("Invalid board size: {size} (expected 1..={max})")]
    InvalidBoardSize { size: usize, max: usize },

    /// 坐标越界
    #[error("Position out of bounds: ({row}, {col}) on a {size}x{size} board")]
    OutOfBounds { row: usize, col: usize, size: usize },

    /// 该格已有棋子
    #[error("Cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },

    /// 无效的文本棋盘
    #[error("Invalid board layout: {reason}")]
    InvalidLayout { reason: String },

    /// 反序列化出的棋盘状态前后矛盾
    #[error("Inconsistent board snapshot: {reason}")]
    InconsistentSnapshot { reason: String },
}

/// 棋盘操作结果类型
pub type Result<T> = std::result::Result<T, GomokuError>;
