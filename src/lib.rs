/// ### English
/// `offscreen_canvas` crate root.
/// Core implementation lives under `engine`; `ffi` exposes it through a C ABI.
///
/// ### 中文
/// `offscreen_canvas` 的 crate 根。
/// 核心实现位于 `engine` 模块；`ffi` 通过 C ABI 对外导出。
mod engine;
mod ffi;

pub use engine::fatal::{FatalError, fatal_payload};
pub use engine::format::{GL_DEBUG_ENV, GlApi, GlProfile, SurfaceFormat, SurfaceProbe};
pub use engine::glfw::{EmbedderGlfwApi, GlfwApiError, install_embedder_glfw_api};
pub use engine::logging::{LoggingConfig, init_logging};
pub use engine::rendering::{
    DriverInfo, DriverInfoReport, GL_LOG_TARGET, GlProvider, GlfwContext, GlfwProvider,
    GlfwSurface, OffscreenCanvas, ProviderError, ThreadContextOwner, ThreadContextRegistry,
    reported_driver_info, restore_thread_context,
};
