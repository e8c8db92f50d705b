//! 五子棋 AI 引擎
//!
//! 包含:
//! - 启发式评估函数
//! - 走法排序与快速战术检查
//! - Minimax + Alpha-Beta 搜索
//! - 迭代加深
//! - Zobrist 哈希
//! - 置换表
//! - 玩家接口

mod evaluate;
mod player;
mod search;
mod selector;
mod transposition;
mod zobrist;

pub use evaluate::{EvalProfile, Evaluator, PatternTable};
pub use player::{AiPlayer, Player, RandomPlayer};
pub use search::{AiConfig, AiEngine, Decision, Difficulty, SearchReport, Strategy, FORCED_WIN_THRESHOLD};
pub use selector::{MoveSelector, Tactic};
pub use transposition::{EntryType, TTEntry, TTStats, TranspositionTable};
pub use zobrist::ZobristTable;
