use crate::engine::glfw::{EmbedderGlfwApi, install_embedder_glfw_api};

#[unsafe(no_mangle)]
/// ### English
/// Installs an embedder-provided GLFW function table. Must be called before
/// `offscreen_canvas_create`.
///
/// All function pointers must come from the same GLFW library instance that produced any
/// `GLFWwindow*` later passed as a share window.
///
/// Returns `true` on success.
///
/// ### 中文
/// 安装由宿主提供的 GLFW 函数表。必须在 `offscreen_canvas_create` 之前调用。
///
/// 所有函数指针必须来自同一个 GLFW 库实例（即之后作为共享 window 传入的 `GLFWwindow*`
/// 所属的实例）。
///
/// 成功返回 `true`。
pub unsafe extern "C" fn offscreen_canvas_set_glfw_api(api: *const EmbedderGlfwApi) -> bool {
    if api.is_null() {
        return false;
    }

    let api = unsafe { *api };
    match install_embedder_glfw_api(api) {
        Ok(()) => true,
        Err(err) => {
            log::error!("offscreen_canvas_set_glfw_api: {err}");
            false
        }
    }
}
