//! AI 配置文件加载

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use gomoku_ai::{AiConfig, Strategy};
use tracing::{debug, info};

/// 未指定等级时使用的等级
pub const DEFAULT_LEVEL: u8 = 6;

/// 从 JSON 文件读取 AI 配置，缺省字段取默认值
pub fn load_ai_config(path: &Path) -> Result<AiConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: AiConfig = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    info!(path = ?path, ?config, "Loaded AI config");
    Ok(config)
}

/// 合并配置文件与命令行参数
///
/// 命令行给出的策略和等级优先，其余字段（时间预算、搜索宽度、剪枝、种子）
/// 取自配置文件。没有配置文件时按 `fallback` 策略和默认等级生成。
pub fn resolve_ai_config(
    file: Option<&AiConfig>,
    strategy: Option<Strategy>,
    level: Option<u8>,
    fallback: Strategy,
) -> AiConfig {
    let Some(base) = file else {
        return AiConfig::from_level(strategy.unwrap_or(fallback), level.unwrap_or(DEFAULT_LEVEL));
    };

    let mut config = base.clone();
    if let Some(strategy) = strategy {
        config.strategy = strategy;
    }
    if let Some(level) = level {
        config.max_depth = AiConfig::from_level(config.strategy, level).max_depth;
    }
    if strategy.is_some() || level.is_some() {
        debug!(?config, "Command line flags override the config file");
    }
    config
}
