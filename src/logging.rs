//! 日志初始化
//!
//! 库内部只使用 tracing 宏；订阅器由可执行程序在启动时安装。

use crate::error::{Error, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 日志级别环境变量（RUST_LOG 优先）
pub const LOG_ENV: &str = "GRAPHWALK_LOG";

/// 根据命令行参数确定过滤规则
pub fn filter_directive(verbose: bool, log_level: Option<&str>) -> String {
    match (verbose, log_level) {
        (_, Some(level)) if level.contains('=') => level.to_string(),
        (_, Some(level)) => format!("graphwalk={}", level),
        (true, None) => "graphwalk=debug".to_string(),
        (false, None) => "graphwalk=warn".to_string(),
    }
}

/// 安装全局 tracing 订阅器，输出到 stderr
///
/// 已安装过全局订阅器时返回 [`Error::LoggingError`]。
pub fn init_tracing(verbose: bool, log_level: Option<&str>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbose, log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(false),
        )
        .try_init()
        .map_err(|e| Error::LoggingError(e.to_string()))?;

    Ok(())
}
