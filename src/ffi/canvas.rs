//! ### English
//! C ABI bindings for the offscreen canvas lifecycle and per-thread context ownership.
//!
//! ### 中文
//! 离屏 canvas 生命周期与线程上下文归属相关的 C ABI 绑定。

use std::ffi::c_void;

use crate::engine::format::SurfaceFormat;
use crate::engine::rendering::{GlfwContext, GlfwProvider, OffscreenCanvas, restore_thread_context};

use super::{OffscreenCanvasFormat, OffscreenCanvasHandle};

#[unsafe(no_mangle)]
/// ### English
/// Creates an offscreen canvas on the calling thread.
///
/// - `share_window`: optional `GLFWwindow*` whose context shares objects with the new one (NULL for
///   none). It is released from the calling thread before the new context is created.
/// - `format`: optional requested format (NULL for the platform default).
///
/// Returns NULL if the GLFW table is not installed. Context/surface creation failures abort.
///
/// ### 中文
/// 在调用线程上创建离屏 canvas。
///
/// - `share_window`：可选的 `GLFWwindow*`，新上下文将与其共享对象（NULL 表示不共享）。
///   创建新上下文之前会先将其从调用线程释放。
/// - `format`：可选的请求格式（NULL 表示使用平台默认值）。
///
/// 若尚未安装 GLFW 函数表则返回 NULL。上下文/surface 创建失败会终止进程。
pub unsafe extern "C" fn offscreen_canvas_create(
    share_window: *mut c_void,
    format: *const OffscreenCanvasFormat,
) -> *mut OffscreenCanvasHandle {
    let provider = match GlfwProvider::load() {
        Ok(provider) => provider,
        Err(err) => {
            log::error!("offscreen_canvas_create: {err}");
            return std::ptr::null_mut();
        }
    };

    let canvas = OffscreenCanvas::new(provider);
    if !format.is_null() {
        canvas.set_format(SurfaceFormat::from(unsafe { *format }));
    }

    let share = unsafe { GlfwContext::from_raw(share_window.cast()) };
    canvas.create(share.as_ref());

    Box::into_raw(Box::new(OffscreenCanvasHandle { canvas }))
}

#[unsafe(no_mangle)]
/// ### English
/// Destroys a canvas created by `offscreen_canvas_create`. The context is made current on the
/// calling thread one last time before it is released.
///
/// ### 中文
/// 销毁由 `offscreen_canvas_create` 创建的 canvas。释放前会在调用线程上最后一次将上下文设为 current。
pub unsafe extern "C" fn offscreen_canvas_destroy(canvas: *mut OffscreenCanvasHandle) {
    if canvas.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(canvas));
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Makes the canvas's context current on the calling thread. Returns `false` on failure.
///
/// ### 中文
/// 将 canvas 的上下文设为调用线程的 current。失败返回 `false`。
pub unsafe extern "C" fn offscreen_canvas_make_current(
    canvas: *const OffscreenCanvasHandle,
) -> bool {
    let Some(handle) = (unsafe { canvas.as_ref() }) else {
        return false;
    };
    handle.canvas.make_current()
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offscreen_canvas_done_current(canvas: *const OffscreenCanvasHandle) {
    if let Some(handle) = unsafe { canvas.as_ref() } {
        handle.canvas.done_current();
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Registers the canvas as the calling thread's context (see
/// `offscreen_canvas_restore_thread_context`).
///
/// ### 中文
/// 将 canvas 登记为调用线程的上下文（参见 `offscreen_canvas_restore_thread_context`）。
pub unsafe extern "C" fn offscreen_canvas_set_thread_context(
    canvas: *const OffscreenCanvasHandle,
) {
    if let Some(handle) = unsafe { canvas.as_ref() } {
        handle.canvas.set_thread_context();
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn offscreen_canvas_clear_thread_context(
    canvas: *const OffscreenCanvasHandle,
) {
    if let Some(handle) = unsafe { canvas.as_ref() } {
        handle.canvas.clear_thread_context();
    }
}

#[unsafe(no_mangle)]
/// ### English
/// First half of a thread hand-off, called on the thread that currently drives the canvas:
/// releases the context from this thread and drops this thread's registration of the canvas.
///
/// ### 中文
/// 线程移交的前半步，在当前驱动该 canvas 的线程上调用：将上下文从本线程释放，
/// 并移除本线程对该 canvas 的登记。
pub unsafe extern "C" fn offscreen_canvas_release_thread(canvas: *const OffscreenCanvasHandle) {
    if let Some(handle) = unsafe { canvas.as_ref() } {
        handle.canvas.done_current();
        handle.canvas.clear_thread_context();
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Second half of a thread hand-off, called on the thread that takes the canvas over: from now
/// on only the calling thread may make the context current. Call
/// `offscreen_canvas_release_thread` on the previous thread first.
///
/// ### 中文
/// 线程移交的后半步，在接管 canvas 的线程上调用：此后只有调用线程可以将上下文设为 current。
/// 调用前应先在原线程上调用 `offscreen_canvas_release_thread`。
pub unsafe extern "C" fn offscreen_canvas_adopt_current_thread(
    canvas: *const OffscreenCanvasHandle,
) {
    if let Some(handle) = unsafe { canvas.as_ref() } {
        handle
            .canvas
            .move_to_thread_with_context(std::thread::current().id());
    }
}

#[unsafe(no_mangle)]
/// ### English
/// Makes the calling thread's registered canvas current again.
///
/// Returns `false` if no live canvas is registered for this thread. Aborts if a registered canvas
/// can no longer be made current.
///
/// ### 中文
/// 将调用线程登记的 canvas 重新设为 current。
///
/// 若该线程没有登记存活的 canvas 则返回 `false`。登记的 canvas 无法再设为 current 时终止进程。
pub extern "C" fn offscreen_canvas_restore_thread_context() -> bool {
    restore_thread_context()
}

#[unsafe(no_mangle)]
/// ### English
/// Returns the canvas's hidden `GLFWwindow*`, e.g. to share objects with another context.
/// NULL for a NULL handle.
///
/// ### 中文
/// 返回 canvas 的隐藏 `GLFWwindow*`，例如用于与其它上下文共享对象。句柄为 NULL 时返回 NULL。
pub unsafe extern "C" fn offscreen_canvas_context_window(
    canvas: *const OffscreenCanvasHandle,
) -> *mut c_void {
    unsafe { canvas.as_ref() }
        .and_then(|handle| handle.canvas.context())
        .map_or(std::ptr::null_mut(), |context| context.as_ptr().cast())
}
