//! 五子棋命令行
//!
//! 包含:
//! - 对局控制
//! - 终端渲染
//! - 人类玩家输入
//! - 循环赛
//! - AI 配置加载

pub mod config;
pub mod game;
pub mod human;
pub mod render;
pub mod tournament;

pub use config::{load_ai_config, resolve_ai_config, DEFAULT_LEVEL};
pub use game::{Game, GameOutcome};
pub use human::{parse_command, Command, HumanPlayer, InputError, LineSource, SharedStdin};
pub use render::render;
pub use tournament::{default_roster, format_rankings, rankings_json, roster_for, Entrant, Standing, Tournament};
