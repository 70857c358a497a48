use std::ffi::{CStr, c_char};

use crate::engine::logging::{LoggingConfig, init_logging};

#[unsafe(no_mangle)]
/// ### English
/// Returns the C ABI version.
///
/// ### 中文
/// 返回 C ABI 版本号。
pub extern "C" fn offscreen_canvas_abi_version() -> u32 {
    super::OFFSCREEN_CANVAS_ABI_VERSION
}

#[unsafe(no_mangle)]
/// ### English
/// Installs the crate's `env_logger` backend (once per process).
///
/// `filter` is an optional NUL-terminated UTF-8 `env_logger` filter; NULL, empty or invalid UTF-8
/// falls back to `RUST_LOG`, then `info`.
///
/// ### 中文
/// 安装本 crate 的 `env_logger` 后端（每进程一次）。
///
/// `filter` 为可选的 NUL 结尾 UTF-8 `env_logger` 过滤串；NULL、空串或非法 UTF-8
/// 会依次回退到 `RUST_LOG`、`info`。
pub unsafe extern "C" fn offscreen_canvas_init_logging(filter: *const c_char) {
    let env_filter = if filter.is_null() {
        None
    } else {
        unsafe { CStr::from_ptr(filter) }
            .to_str()
            .ok()
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    };

    init_logging(LoggingConfig {
        env_filter,
        ..LoggingConfig::default()
    });
}
