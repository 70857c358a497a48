//! ### English
//! Typed view over the embedder GLFW function table.
//!
//! ### 中文
//! 宿主 GLFW 函数表的类型化封装。

use std::ffi::{CStr, c_char, c_int, c_void};
use std::sync::OnceLock;

use crate::engine::format::{GlApi, GlProfile, SurfaceFormat};

use super::{EmbedderGlfwApi, GlfwApiError};

#[repr(C)]
/// ### English
/// Opaque GLFW window type (`GLFWwindow`).
///
/// ### 中文
/// 不透明 GLFW window 类型（`GLFWwindow`）。
pub struct GLFWwindow {
    _private: [u8; 0],
}

#[repr(C)]
/// ### English
/// Opaque GLFW monitor type (`GLFWmonitor`).
///
/// ### 中文
/// 不透明 GLFW monitor 类型（`GLFWmonitor`）。
pub struct GLFWmonitor {
    _private: [u8; 0],
}

pub type GlfwWindowPtr = *mut GLFWwindow;

type GLFWglproc = *const c_void;
type GlfwGetProcAddress = unsafe extern "C" fn(*const c_char) -> GLFWglproc;
type GlfwMakeContextCurrent = unsafe extern "C" fn(*mut GLFWwindow);
type GlfwGetCurrentContext = unsafe extern "C" fn() -> *mut GLFWwindow;
type GlfwDefaultWindowHints = unsafe extern "C" fn();
type GlfwWindowHint = unsafe extern "C" fn(c_int, c_int);
type GlfwGetWindowAttrib = unsafe extern "C" fn(*mut GLFWwindow, c_int) -> c_int;
type GlfwCreateWindow = unsafe extern "C" fn(
    c_int,
    c_int,
    *const c_char,
    *mut GLFWmonitor,
    *mut GLFWwindow,
) -> *mut GLFWwindow;
type GlfwDestroyWindow = unsafe extern "C" fn(*mut GLFWwindow);

const GLFW_TRUE: c_int = 1;
const GLFW_FALSE: c_int = 0;

const GLFW_FOCUSED: c_int = 0x0002_0001;
const GLFW_RESIZABLE: c_int = 0x0002_0003;
const GLFW_VISIBLE: c_int = 0x0002_0004;

const GLFW_RED_BITS: c_int = 0x0002_1001;
const GLFW_GREEN_BITS: c_int = 0x0002_1002;
const GLFW_BLUE_BITS: c_int = 0x0002_1003;
const GLFW_ALPHA_BITS: c_int = 0x0002_1004;
const GLFW_DEPTH_BITS: c_int = 0x0002_1005;
const GLFW_STENCIL_BITS: c_int = 0x0002_1006;

const GLFW_CLIENT_API: c_int = 0x0002_2001;
const GLFW_CONTEXT_VERSION_MAJOR: c_int = 0x0002_2002;
const GLFW_CONTEXT_VERSION_MINOR: c_int = 0x0002_2003;
const GLFW_OPENGL_FORWARD_COMPAT: c_int = 0x0002_2006;
const GLFW_OPENGL_DEBUG_CONTEXT: c_int = 0x0002_2007;
const GLFW_OPENGL_PROFILE: c_int = 0x0002_2008;

const GLFW_NO_API: c_int = 0;
const GLFW_OPENGL_API: c_int = 0x0003_0001;
const GLFW_OPENGL_ES_API: c_int = 0x0003_0002;

const GLFW_OPENGL_ANY_PROFILE: c_int = 0;
const GLFW_OPENGL_CORE_PROFILE: c_int = 0x0003_2001;
const GLFW_OPENGL_COMPAT_PROFILE: c_int = 0x0003_2002;

static EMBEDDER_GLFW_API: OnceLock<GlfwApi> = OnceLock::new();

/// ### English
/// Validates `api` and stores it for the process. Repeated calls return an error.
///
/// ### 中文
/// 校验 `api` 并为当前进程保存。重复调用返回错误。
pub(super) fn install(api: EmbedderGlfwApi) -> Result<(), GlfwApiError> {
    let table = GlfwApi::from_embedder(api)?;
    EMBEDDER_GLFW_API
        .set(table)
        .map_err(|_| GlfwApiError::AlreadyInstalled)
}

fn require(address: usize, name: &'static str) -> Result<usize, GlfwApiError> {
    if address == 0 {
        return Err(GlfwApiError::NullSymbol(name));
    }
    Ok(address)
}

fn hint_bits(bits: u8) -> c_int {
    c_int::from(bits)
}

fn hint_version(value: u32) -> Result<c_int, String> {
    c_int::try_from(value).map_err(|_| format!("context version component {value} is out of range"))
}

/// ### English
/// GLFW only accepts an explicit profile for desktop OpenGL 3.2 and newer.
///
/// ### 中文
/// GLFW 仅在桌面 OpenGL 3.2 及以上版本接受显式 profile。
fn requested_profile(format: &SurfaceFormat) -> c_int {
    if format.api == GlApi::OpenGl && format.version_at_least(3, 2) {
        profile_hint(format.profile)
    } else {
        GLFW_OPENGL_ANY_PROFILE
    }
}

fn api_hint(api: GlApi) -> c_int {
    match api {
        GlApi::OpenGl => GLFW_OPENGL_API,
        GlApi::OpenGlEs => GLFW_OPENGL_ES_API,
    }
}

fn profile_hint(profile: GlProfile) -> c_int {
    match profile {
        GlProfile::Any => GLFW_OPENGL_ANY_PROFILE,
        GlProfile::Core => GLFW_OPENGL_CORE_PROFILE,
        GlProfile::Compatibility => GLFW_OPENGL_COMPAT_PROFILE,
    }
}

#[derive(Clone, Copy)]
/// ### English
/// Loaded minimal GLFW API (context control, window creation, proc loading).
///
/// ### 中文
/// 已加载的最小 GLFW API（上下文控制、window 创建、函数指针加载）。
pub struct GlfwApi {
    glfw_get_proc_address: GlfwGetProcAddress,
    glfw_make_context_current: GlfwMakeContextCurrent,
    glfw_get_current_context: GlfwGetCurrentContext,
    glfw_default_window_hints: GlfwDefaultWindowHints,
    glfw_window_hint: GlfwWindowHint,
    glfw_get_window_attrib: GlfwGetWindowAttrib,
    glfw_create_window: GlfwCreateWindow,
    glfw_destroy_window: GlfwDestroyWindow,
}

impl GlfwApi {
    fn from_embedder(api: EmbedderGlfwApi) -> Result<Self, GlfwApiError> {
        let get_proc_address = require(api.glfw_get_proc_address, "glfw_get_proc_address")?;
        let make_context_current =
            require(api.glfw_make_context_current, "glfw_make_context_current")?;
        let get_current_context =
            require(api.glfw_get_current_context, "glfw_get_current_context")?;
        let default_window_hints =
            require(api.glfw_default_window_hints, "glfw_default_window_hints")?;
        let window_hint = require(api.glfw_window_hint, "glfw_window_hint")?;
        let get_window_attrib = require(api.glfw_get_window_attrib, "glfw_get_window_attrib")?;
        let create_window = require(api.glfw_create_window, "glfw_create_window")?;
        let destroy_window = require(api.glfw_destroy_window, "glfw_destroy_window")?;

        Ok(Self {
            glfw_get_proc_address: unsafe {
                std::mem::transmute::<usize, GlfwGetProcAddress>(get_proc_address)
            },
            glfw_make_context_current: unsafe {
                std::mem::transmute::<usize, GlfwMakeContextCurrent>(make_context_current)
            },
            glfw_get_current_context: unsafe {
                std::mem::transmute::<usize, GlfwGetCurrentContext>(get_current_context)
            },
            glfw_default_window_hints: unsafe {
                std::mem::transmute::<usize, GlfwDefaultWindowHints>(default_window_hints)
            },
            glfw_window_hint: unsafe { std::mem::transmute::<usize, GlfwWindowHint>(window_hint) },
            glfw_get_window_attrib: unsafe {
                std::mem::transmute::<usize, GlfwGetWindowAttrib>(get_window_attrib)
            },
            glfw_create_window: unsafe {
                std::mem::transmute::<usize, GlfwCreateWindow>(create_window)
            },
            glfw_destroy_window: unsafe {
                std::mem::transmute::<usize, GlfwDestroyWindow>(destroy_window)
            },
        })
    }

    /// ### English
    /// Returns the installed table. The embedder must have called
    /// `offscreen_canvas_set_glfw_api` first.
    ///
    /// ### 中文
    /// 返回已安装的函数表。宿主必须先调用 `offscreen_canvas_set_glfw_api`。
    #[inline]
    pub fn load() -> Result<Self, GlfwApiError> {
        EMBEDDER_GLFW_API
            .get()
            .copied()
            .ok_or(GlfwApiError::NotInstalled)
    }

    /// ### English
    /// Makes `window` current on the calling thread (NULL releases the current context).
    ///
    /// ### 中文
    /// 将 `window` 设为调用线程的 current 上下文（NULL 表示释放当前上下文）。
    #[inline]
    pub unsafe fn make_current(&self, window: GlfwWindowPtr) {
        unsafe { (self.glfw_make_context_current)(window) };
    }

    #[inline]
    pub unsafe fn current_context(&self) -> GlfwWindowPtr {
        unsafe { (self.glfw_get_current_context)() }
    }

    /// ### English
    /// Loads an OpenGL function pointer for the context current on the calling thread.
    ///
    /// #### Parameters
    /// - `name`: NUL-terminated proc name.
    ///
    /// ### 中文
    /// 为调用线程的 current 上下文加载 OpenGL 函数指针。
    ///
    /// #### 参数
    /// - `name`：以 NUL 结尾的函数名。
    #[inline]
    pub unsafe fn get_proc_address(&self, name: &CStr) -> *const c_void {
        unsafe { (self.glfw_get_proc_address)(name.as_ptr()) }
    }

    #[inline]
    pub unsafe fn window_attrib(&self, window: GlfwWindowPtr, attrib: c_int) -> c_int {
        unsafe { (self.glfw_get_window_attrib)(window, attrib) }
    }

    /// ### English
    /// Whether `window` owns a GL context. `GLFW_CLIENT_API` reads `GLFW_NO_API` (0) for windows
    /// created without one.
    ///
    /// ### 中文
    /// `window` 是否持有 GL 上下文。未创建上下文的 window 的 `GLFW_CLIENT_API` 为 `GLFW_NO_API`（0）。
    pub unsafe fn window_has_context(&self, window: GlfwWindowPtr) -> bool {
        unsafe { self.window_attrib(window, GLFW_CLIENT_API) != GLFW_NO_API }
    }

    #[inline]
    pub unsafe fn destroy_window(&self, window: GlfwWindowPtr) {
        unsafe { (self.glfw_destroy_window)(window) };
    }

    /// ### English
    /// Creates an invisible 1x1 window whose context matches `format` and, when `share` is
    /// non-NULL, shares objects with `share`. Window hints are reset afterwards so the embedder's
    /// own window creation is unaffected.
    ///
    /// GLFW requires window creation on the thread that initialized it; that is the embedder's
    /// responsibility.
    ///
    /// ### 中文
    /// 创建一个不可见的 1x1 window，其上下文符合 `format`；`share` 非 NULL 时与其共享对象。
    /// 之后会重置 window hint，避免影响宿主自身的 window 创建。
    ///
    /// GLFW 要求在其初始化线程上创建 window，这由宿主负责保证。
    pub unsafe fn create_offscreen_window(
        &self,
        format: &SurfaceFormat,
        share: GlfwWindowPtr,
    ) -> Result<GlfwWindowPtr, String> {
        let major = hint_version(format.major)?;
        let minor = hint_version(format.minor)?;
        let profile = requested_profile(format);
        let forward_compat = profile == GLFW_OPENGL_CORE_PROFILE && cfg!(target_os = "macos");
        let hints = [
            (GLFW_VISIBLE, GLFW_FALSE),
            (GLFW_FOCUSED, GLFW_FALSE),
            (GLFW_RESIZABLE, GLFW_FALSE),
            (GLFW_CLIENT_API, api_hint(format.api)),
            (GLFW_CONTEXT_VERSION_MAJOR, major),
            (GLFW_CONTEXT_VERSION_MINOR, minor),
            (GLFW_OPENGL_PROFILE, profile),
            (
                GLFW_OPENGL_FORWARD_COMPAT,
                if forward_compat { GLFW_TRUE } else { GLFW_FALSE },
            ),
            (
                GLFW_OPENGL_DEBUG_CONTEXT,
                if format.debug { GLFW_TRUE } else { GLFW_FALSE },
            ),
            (GLFW_RED_BITS, hint_bits(format.red_bits)),
            (GLFW_GREEN_BITS, hint_bits(format.green_bits)),
            (GLFW_BLUE_BITS, hint_bits(format.blue_bits)),
            (GLFW_ALPHA_BITS, hint_bits(format.alpha_bits)),
            (GLFW_DEPTH_BITS, hint_bits(format.depth_bits)),
            (GLFW_STENCIL_BITS, hint_bits(format.stencil_bits)),
        ];

        unsafe { (self.glfw_default_window_hints)() };
        for (hint, value) in hints {
            unsafe { (self.glfw_window_hint)(hint, value) };
        }

        let title = c"offscreen-canvas";
        let window =
            unsafe { (self.glfw_create_window)(1, 1, title.as_ptr(), std::ptr::null_mut(), share) };
        unsafe { (self.glfw_default_window_hints)() };

        if window.is_null() {
            return Err(format!(
                "glfwCreateWindow failed for {:?} {}.{} {:?}",
                format.api, format.major, format.minor, format.profile
            ));
        }
        Ok(window)
    }

    /// ### English
    /// Reads back the context attributes GLFW actually granted for `window`. Buffer bit depths
    /// are not queryable per window and are taken from `requested`.
    ///
    /// ### 中文
    /// 读取 GLFW 为 `window` 实际提供的上下文属性。缓冲位深无法按 window 查询，沿用 `requested`。
    pub unsafe fn window_format(
        &self,
        window: GlfwWindowPtr,
        requested: &SurfaceFormat,
    ) -> SurfaceFormat {
        let client_api = unsafe { self.window_attrib(window, GLFW_CLIENT_API) };
        let major = unsafe { self.window_attrib(window, GLFW_CONTEXT_VERSION_MAJOR) };
        let minor = unsafe { self.window_attrib(window, GLFW_CONTEXT_VERSION_MINOR) };
        let profile = unsafe { self.window_attrib(window, GLFW_OPENGL_PROFILE) };
        let debug = unsafe { self.window_attrib(window, GLFW_OPENGL_DEBUG_CONTEXT) };

        SurfaceFormat {
            api: match client_api {
                GLFW_OPENGL_ES_API => GlApi::OpenGlEs,
                GLFW_OPENGL_API => GlApi::OpenGl,
                _ => requested.api,
            },
            major: u32::try_from(major)
                .ok()
                .filter(|major| *major > 0)
                .unwrap_or(requested.major),
            minor: u32::try_from(minor).unwrap_or(requested.minor),
            profile: match profile {
                GLFW_OPENGL_CORE_PROFILE => GlProfile::Core,
                GLFW_OPENGL_COMPAT_PROFILE => GlProfile::Compatibility,
                _ => GlProfile::Any,
            },
            debug: debug == GLFW_TRUE,
            ..requested.clone()
        }
    }
}
