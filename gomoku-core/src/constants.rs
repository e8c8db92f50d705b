//! 棋盘常量定义

/// 默认棋盘边长
pub const DEFAULT_BOARD_SIZE: usize = 15;

/// 允许的最大棋盘边长
pub const MAX_BOARD_SIZE: usize = 32;

/// 连成几子获胜
pub const WIN_LENGTH: usize = 5;

/// 候选走法的邻域半径（距离已有棋子不超过该格数的空位才会被考虑）
pub const NEIGHBORHOOD_RADIUS: isize = 3;

/// 四个扫描方向：横、竖、主对角线、副对角线
pub const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// 已分胜负时的评估分
pub const WIN_SCORE: i32 = 10000;
