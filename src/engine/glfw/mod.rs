/// ### English
/// Minimal GLFW binding driven by an embedder-provided function table.
/// Used to create invisible windows whose GL contexts back offscreen canvases.
///
/// ### 中文
/// 由宿主提供函数表驱动的最小 GLFW 绑定。
/// 用于创建不可见 window，其 GL 上下文作为离屏 canvas 的后端。
mod api;

pub use api::{GLFWwindow, GlfwApi, GlfwWindowPtr};

#[repr(C)]
#[derive(Clone, Copy, Default)]
/// ### English
/// Function pointer table for GLFW symbols provided by the embedder.
///
/// All fields are raw addresses (`usize`) and must be non-zero when installing.
///
/// ### 中文
/// 由宿主提供的 GLFW 符号函数指针表。
///
/// 所有字段都是原始地址（`usize`），安装时必须全部为非 0。
pub struct EmbedderGlfwApi {
    pub glfw_get_proc_address: usize,
    pub glfw_make_context_current: usize,
    pub glfw_get_current_context: usize,
    pub glfw_default_window_hints: usize,
    pub glfw_window_hint: usize,
    pub glfw_get_window_attrib: usize,
    pub glfw_create_window: usize,
    pub glfw_destroy_window: usize,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
/// ### English
/// Errors from installing or loading the embedder GLFW table.
///
/// ### 中文
/// 安装或加载宿主 GLFW 函数表时的错误。
pub enum GlfwApiError {
    #[error("EmbedderGlfwApi.{0} is NULL")]
    NullSymbol(&'static str),
    #[error("embedder GLFW API is already installed")]
    AlreadyInstalled,
    #[error("embedder GLFW API is not installed; call offscreen_canvas_set_glfw_api first")]
    NotInstalled,
}

/// ### English
/// Installs the embedder-provided GLFW function table. One-time per process.
/// Must be called before any canvas is created through the GLFW provider.
///
/// ### 中文
/// 安装由宿主提供的 GLFW 函数表。每个进程仅可安装一次。
/// 必须在通过 GLFW provider 创建任何 canvas 之前调用。
pub fn install_embedder_glfw_api(api: EmbedderGlfwApi) -> Result<(), GlfwApiError> {
    api::install(api)
}
