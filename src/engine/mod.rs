/// ### English
/// Engine internal modules (formats, GLFW binding, offscreen rendering, fatal errors, logging).
///
/// ### 中文
/// 引擎内部模块（格式、GLFW 绑定、离屏渲染、致命错误、日志）。
pub mod fatal;
pub mod format;
pub mod glfw;
pub mod logging;
pub mod rendering;
