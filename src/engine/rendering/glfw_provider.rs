//! ### English
//! `GlProvider` backed by invisible GLFW windows.
//!
//! Each context is a hidden 1x1 window; its default framebuffer serves as the offscreen surface.
//!
//! ### 中文
//! 基于不可见 GLFW window 的 `GlProvider`。
//!
//! 每个上下文对应一个隐藏的 1x1 window，其默认 framebuffer 作为离屏 surface。

use std::ffi::CString;
use std::ptr::NonNull;

use glow::HasContext as _;

use crate::engine::format::SurfaceFormat;
use crate::engine::glfw::{GLFWwindow, GlfwApi, GlfwApiError, GlfwWindowPtr};

use super::provider::{DriverInfo, GlProvider, ProviderError};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// ### English
/// Handle to a GLFW window's GL context.
///
/// ### 中文
/// GLFW window 的 GL 上下文句柄。
pub struct GlfwContext {
    window: NonNull<GLFWwindow>,
}

// GLFW contexts may be made current from any thread, one thread at a time; callers keep that
// invariant (see `OffscreenCanvas`).
unsafe impl Send for GlfwContext {}
unsafe impl Sync for GlfwContext {}

impl GlfwContext {
    /// ### English
    /// Wraps an embedder-owned window, e.g. the main window to share objects with.
    /// Returns `None` for NULL.
    ///
    /// # Safety
    /// `window` must be a live GLFW window from the installed GLFW instance.
    ///
    /// ### 中文
    /// 封装宿主持有的 window，例如需要与之共享对象的主 window。NULL 时返回 `None`。
    ///
    /// # Safety
    /// `window` 必须是来自已安装 GLFW 实例且仍存活的 window。
    pub unsafe fn from_raw(window: GlfwWindowPtr) -> Option<Self> {
        NonNull::new(window).map(|window| Self { window })
    }

    pub fn as_ptr(&self) -> GlfwWindowPtr {
        self.window.as_ptr()
    }
}

#[derive(Debug)]
/// ### English
/// Default framebuffer of the context's hidden window.
///
/// ### 中文
/// 上下文所属隐藏 window 的默认 framebuffer。
pub struct GlfwSurface {
    window: NonNull<GLFWwindow>,
}

unsafe impl Send for GlfwSurface {}
unsafe impl Sync for GlfwSurface {}

/// ### English
/// GLFW-backed provider. Requires the embedder GLFW table to be installed.
///
/// ### 中文
/// 基于 GLFW 的 provider。需要先安装宿主 GLFW 函数表。
pub struct GlfwProvider {
    glfw: GlfwApi,
}

impl GlfwProvider {
    pub fn load() -> Result<Self, GlfwApiError> {
        Ok(Self {
            glfw: GlfwApi::load()?,
        })
    }

    fn load_glow(&self) -> glow::Context {
        unsafe {
            glow::Context::from_loader_function(|name| match CString::new(name) {
                Ok(name) => self.glfw.get_proc_address(name.as_c_str()),
                Err(_) => std::ptr::null(),
            })
        }
    }
}

impl GlProvider for GlfwProvider {
    type Context = GlfwContext;
    type Surface = GlfwSurface;

    fn create_context(
        &self,
        format: &SurfaceFormat,
        share: Option<&GlfwContext>,
    ) -> Result<GlfwContext, ProviderError> {
        let share = share.map_or(std::ptr::null_mut(), GlfwContext::as_ptr);
        let window = unsafe { self.glfw.create_offscreen_window(format, share) }
            .map_err(ProviderError::ContextCreation)?;
        unsafe { GlfwContext::from_raw(window) }.ok_or_else(|| {
            ProviderError::ContextCreation("glfwCreateWindow returned NULL".to_string())
        })
    }

    fn context_format(&self, context: &GlfwContext, requested: &SurfaceFormat) -> SurfaceFormat {
        unsafe { self.glfw.window_format(context.as_ptr(), requested) }
    }

    fn create_surface(
        &self,
        context: &GlfwContext,
        _format: &SurfaceFormat,
    ) -> Result<GlfwSurface, ProviderError> {
        Ok(GlfwSurface {
            window: context.window,
        })
    }

    fn is_surface_valid(&self, surface: &GlfwSurface) -> bool {
        unsafe { self.glfw.window_has_context(surface.window.as_ptr()) }
    }

    fn make_current(&self, context: &GlfwContext, surface: &GlfwSurface) -> bool {
        if surface.window != context.window {
            return false;
        }
        unsafe {
            self.glfw.make_current(context.as_ptr());
            self.glfw.current_context() == context.as_ptr()
        }
    }

    fn done_current(&self, context: &GlfwContext) {
        unsafe {
            if self.glfw.current_context() == context.as_ptr() {
                self.glfw.make_current(std::ptr::null_mut());
            }
        }
    }

    fn driver_info(&self, _context: &GlfwContext) -> Option<DriverInfo> {
        let get_string = unsafe { self.glfw.get_proc_address(c"glGetString") };
        if get_string.is_null() {
            return None;
        }

        let gl = self.load_glow();
        unsafe {
            Some(DriverInfo {
                version: gl.get_parameter_string(glow::VERSION),
                shading_language_version: gl.get_parameter_string(glow::SHADING_LANGUAGE_VERSION),
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
            })
        }
    }

    fn destroy_context(&self, context: GlfwContext) {
        unsafe {
            if self.glfw.current_context() == context.as_ptr() {
                self.glfw.make_current(std::ptr::null_mut());
            }
            self.glfw.destroy_window(context.as_ptr());
        }
    }

    fn destroy_surface(&self, _surface: GlfwSurface) {}
}
