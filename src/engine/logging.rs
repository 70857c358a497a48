//! ### English
//! Logger initialization for hosts that do not install their own `log` backend.
//!
//! ### 中文
//! 为未自行安装 `log` 后端的宿主提供日志初始化。

use std::sync::Once;

#[derive(Debug, Clone)]
/// ### English
/// Logger configuration. `env_filter` uses `env_logger` filter syntax
/// (e.g. `"info"`, `"offscreen_canvas=debug"`).
///
/// ### 中文
/// 日志配置。`env_filter` 使用 `env_logger` 的过滤语法
///（例如 `"info"`、`"offscreen_canvas=debug"`）。
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// ### English
/// Installs `env_logger` once; later calls are ignored. Falls back to `RUST_LOG`, then `info`.
/// If another logger is already installed, that logger is kept.
///
/// ### 中文
/// 仅安装一次 `env_logger`，之后的调用被忽略。依次回退到 `RUST_LOG`、`info`。
/// 若已安装其它 logger，则保留该 logger。
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();

        if let Some(filter) = config.env_filter {
            builder.parse_filters(&filter);
        } else if let Ok(filter) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filter);
        } else {
            builder.filter_level(log::LevelFilter::Info);
        }

        builder.write_style(config.write_style);

        if builder.try_init().is_ok() {
            log::debug!("logging initialized");
        }
    });
}
