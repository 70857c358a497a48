//! ### English
//! Abstraction over the platform surface/context provider consumed by `OffscreenCanvas`.
//!
//! ### 中文
//! `OffscreenCanvas` 所依赖的平台 surface/上下文 provider 抽象。

use std::thread::ThreadId;

use crate::engine::format::SurfaceFormat;

#[derive(Debug, thiserror::Error)]
/// ### English
/// Recoverable provider failures. `OffscreenCanvas` escalates creation errors to fatal.
///
/// ### 中文
/// provider 的可恢复错误。`OffscreenCanvas` 会把创建阶段的错误升级为致命错误。
pub enum ProviderError {
    #[error("GL provider is not available: {0}")]
    Unavailable(String),
    #[error("context creation failed: {0}")]
    ContextCreation(String),
    #[error("surface creation failed: {0}")]
    SurfaceCreation(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// ### English
/// Driver strings reported by a current context.
///
/// ### 中文
/// 由 current 上下文报告的驱动字符串。
pub struct DriverInfo {
    pub version: String,
    pub shading_language_version: String,
    pub vendor: String,
    pub renderer: String,
}

impl DriverInfo {
    /// ### English
    /// Whether the version string describes an OpenGL ES context.
    ///
    /// ### 中文
    /// 版本字符串是否表示 OpenGL ES 上下文。
    pub fn is_gles(&self) -> bool {
        self.version.starts_with("OpenGL ES")
    }

    /// ### English
    /// `(major, minor)` parsed from `version`, `(0, 0)` when it cannot be parsed.
    ///
    /// ### 中文
    /// 从 `version` 解析出的 `(major, minor)`，无法解析时为 `(0, 0)`。
    pub fn gl_version(&self) -> (u32, u32) {
        parse_gl_version(&self.version)
    }
}

/// ### English
/// Expected forms: `"4.6.0 ..."` or `"OpenGL ES 3.2 ..."`.
///
/// ### 中文
/// 期望的版本字符串形式：`"4.6.0 ..."` 或 `"OpenGL ES 3.2 ..."`。
pub(crate) fn parse_gl_version(version: &str) -> (u32, u32) {
    let Some(token) = version
        .split_whitespace()
        .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
    else {
        return (0, 0);
    };

    let mut parts = token.split('.');
    let major = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    let minor = parts.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    (major, minor)
}

/// ### English
/// Platform surface/context provider.
///
/// `Context` is a handle: cloning it does not duplicate the GPU context, and the canvas that
/// created it is the only party that destroys it (`destroy_context`). Every method runs on the
/// caller's thread; `make_current`/`done_current` affect the calling thread only.
///
/// ### 中文
/// 平台 surface/上下文 provider。
///
/// `Context` 是句柄：clone 不会复制 GPU 上下文，只有创建它的 canvas 会销毁它
///（`destroy_context`）。所有方法都在调用线程执行；`make_current`/`done_current`
/// 只影响调用线程。
pub trait GlProvider: Send + Sync + 'static {
    type Context: Clone + Send + Sync + 'static;
    type Surface: Send + Sync + 'static;

    /// ### English
    /// Creates a context for `format`. With `share`, GPU objects are shared with that context.
    ///
    /// ### 中文
    /// 按 `format` 创建上下文。传入 `share` 时与该上下文共享 GPU 对象。
    fn create_context(
        &self,
        format: &SurfaceFormat,
        share: Option<&Self::Context>,
    ) -> Result<Self::Context, ProviderError>;

    /// ### English
    /// Format actually granted by the driver for `context`, created from `requested`.
    ///
    /// ### 中文
    /// 驱动为 `context`（按 `requested` 创建）实际提供的格式。
    fn context_format(&self, context: &Self::Context, requested: &SurfaceFormat) -> SurfaceFormat;

    fn create_surface(
        &self,
        context: &Self::Context,
        format: &SurfaceFormat,
    ) -> Result<Self::Surface, ProviderError>;

    fn is_surface_valid(&self, surface: &Self::Surface) -> bool;

    /// ### English
    /// Makes `context` current on the calling thread, drawing into `surface`.
    ///
    /// ### 中文
    /// 将 `context` 设为调用线程的 current 上下文，绘制目标为 `surface`。
    fn make_current(&self, context: &Self::Context, surface: &Self::Surface) -> bool;

    /// ### English
    /// Releases `context` if it is current on the calling thread.
    ///
    /// ### 中文
    /// 若 `context` 是调用线程的 current 上下文则将其释放。
    fn done_current(&self, context: &Self::Context);

    /// ### English
    /// Driver strings; only meaningful while `context` is current. `None` when the query
    /// entry points are not available.
    ///
    /// ### 中文
    /// 驱动字符串；仅在 `context` 为 current 时有意义。查询入口不可用时返回 `None`。
    fn driver_info(&self, context: &Self::Context) -> Option<DriverInfo>;

    /// ### English
    /// Reassigns the context's thread affinity. Most providers have nothing to do here.
    ///
    /// ### 中文
    /// 重新指定上下文的线程归属。多数 provider 在此无需处理。
    fn move_context_to_thread(&self, _context: &Self::Context, _thread: ThreadId) {}

    fn destroy_context(&self, context: Self::Context);

    fn destroy_surface(&self, surface: Self::Surface);
}
