//! ### English
//! Rendering module entry point.
//! Splits the provider abstraction, the GLFW provider, the per-thread registry and the offscreen
//! canvas into submodules.
//!
//! ### 中文
//! 渲染模块入口。
//! 将 provider 抽象、GLFW provider、每线程登记表与离屏 canvas 拆分到子模块。

mod canvas;
mod driver_report;
mod glfw_provider;
mod provider;
mod registry;

pub use canvas::{OffscreenCanvas, restore_thread_context};
pub use driver_report::{DriverInfoReport, GL_LOG_TARGET, reported_driver_info};
pub use glfw_provider::{GlfwContext, GlfwProvider, GlfwSurface};
pub use provider::{DriverInfo, GlProvider, ProviderError};
pub use registry::{ThreadContextOwner, ThreadContextRegistry};
