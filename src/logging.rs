//! 控制台日志初始化.
//!
//! 基于 tracing-subscriber, 过滤级别由 `RUST_LOG` 环境变量控制,
//! 未设置时回落到传入的默认级别.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// 初始化控制台日志, 重复调用时第二次起返回错误
pub fn init(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("初始化日志失败: {err}"))?;

    tracing::debug!("日志已初始化, version={}", crate::version());
    Ok(())
}
