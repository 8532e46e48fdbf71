//! 日志初始化
//!
//! TUI 占用了标准输出，日志只能写入文件。
//! 核心库使用 `log` 宏，经 tracing-subscriber 的 log 桥接后一并写入。

use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE_PREFIX: &str = "team-settings.log";

/// 初始化按天滚动的文件日志
///
/// 返回的 guard 必须在程序退出前一直持有，否则缓冲中的日志会丢失。
pub fn init_logging(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .try_init()
        .context("Failed to install log subscriber")?;

    tracing::info!("Logging to {}", dir.display());
    Ok(guard)
}
