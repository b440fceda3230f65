//! 日志初始化模块

use tracing_subscriber::EnvFilter;

/// 初始化全局日志
///
/// 日志级别取自 `RUST_LOG` 环境变量，默认 `info`。
/// 重复调用是安全的（忽略二次初始化）。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init();
}
