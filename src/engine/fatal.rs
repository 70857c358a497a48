//! ### English
//! Unrecoverable rendering failures.
//!
//! A fatal error is logged and then unwinds with the `FatalError` itself as the panic payload.
//! Release builds are compiled with `panic = "abort"`, so the process terminates; inside an
//! `extern "C"` entry point the unwind aborts as well. Test harnesses (or a host that chooses to
//! catch unwinds) can recover the payload with `fatal_payload`.
//!
//! ### 中文
//! 不可恢复的渲染错误。
//!
//! 致命错误先写日志，然后以 `FatalError` 本身作为 panic payload 展开。Release 构建使用
//! `panic = "abort"`，因此进程会直接终止；在 `extern "C"` 入口内部展开同样会 abort。
//! 测试（或选择捕获展开的宿主）可通过 `fatal_payload` 取回该 payload。

use std::any::Any;

use crate::engine::rendering::ProviderError;

#[derive(Debug, thiserror::Error)]
/// ### English
/// Conditions after which rendering on the affected thread cannot continue.
///
/// ### 中文
/// 发生后受影响线程无法继续渲染的情况。
pub enum FatalError {
    #[error("failed to create offscreen canvas context: {0}")]
    ContextCreation(#[source] ProviderError),
    #[error("failed to create offscreen surface: {0}")]
    SurfaceCreation(#[source] ProviderError),
    #[error("offscreen surface is invalid")]
    InvalidSurface,
    #[error("unable to make offscreen surface current")]
    SurfaceProbe,
    #[error("unable to restore offscreen rendering context")]
    RestoreFailed,
}

/// ### English
/// Logs `err` and unwinds with it as payload. Never returns.
///
/// ### 中文
/// 记录 `err` 并以其作为 payload 展开。永不返回。
#[cold]
#[track_caller]
pub fn raise(err: FatalError) -> ! {
    log::error!("fatal: {err}");
    std::panic::panic_any(err)
}

/// ### English
/// Extracts the `FatalError` from a caught panic payload, if that is what it carries.
///
/// ### 中文
/// 若捕获的 panic payload 是 `FatalError`，则将其取出。
pub fn fatal_payload(payload: &(dyn Any + Send)) -> Option<&FatalError> {
    payload.downcast_ref::<FatalError>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::panic::{self, AssertUnwindSafe};

    #[test]
    fn raise_carries_error_as_payload() {
        let payload = panic::catch_unwind(AssertUnwindSafe(|| -> () {
            raise(FatalError::RestoreFailed)
        }))
        .expect_err("raise must unwind");
        assert!(matches!(
            fatal_payload(payload.as_ref()),
            Some(FatalError::RestoreFailed)
        ));
    }

    #[test]
    fn plain_panics_are_not_fatal_errors() {
        let payload = panic::catch_unwind(|| -> () { panic!("something else") })
            .expect_err("must unwind");
        assert!(fatal_payload(payload.as_ref()).is_none());
    }

    #[test]
    fn messages_include_provider_detail() {
        let err = FatalError::ContextCreation(ProviderError::ContextCreation(
            "no pixel format".to_string(),
        ));
        assert!(err.to_string().contains("no pixel format"));
    }
}
