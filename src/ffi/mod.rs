//! ### English
//! C ABI surface for `offscreen_canvas`.
//!
//! All exported symbols are `extern "C"` functions; structs are `#[repr(C)]`.
//! A fatal canvas error raised inside an exported function cannot unwind into the host and
//! aborts the process.
//!
//! ### 中文
//! `offscreen_canvas` 的 C ABI 接口层。
//!
//! 所有导出符号均为 `extern "C"` 函数；结构体使用 `#[repr(C)]`。
//! 导出函数内部触发的 canvas 致命错误无法展开到宿主，会直接终止进程。
mod abi;
mod canvas;
mod glfw;

use crate::engine::format::{GlApi, GlProfile, SurfaceFormat};
use crate::engine::rendering::{GlfwProvider, OffscreenCanvas};

#[repr(C)]
/// ### English
/// Opaque canvas handle. Owned by the host between `offscreen_canvas_create` and
/// `offscreen_canvas_destroy`.
///
/// ### 中文
/// 不透明 canvas 句柄。在 `offscreen_canvas_create` 与 `offscreen_canvas_destroy` 之间由宿主持有。
pub struct OffscreenCanvasHandle {
    canvas: OffscreenCanvas<GlfwProvider>,
}

/// ### English
/// `OffscreenCanvasFormat.api` value for desktop OpenGL.
///
/// ### 中文
/// `OffscreenCanvasFormat.api` 的桌面 OpenGL 取值。
pub const OFFSCREEN_CANVAS_API_OPENGL: u32 = 0;
pub const OFFSCREEN_CANVAS_API_OPENGL_ES: u32 = 1;

pub const OFFSCREEN_CANVAS_PROFILE_ANY: u32 = 0;
pub const OFFSCREEN_CANVAS_PROFILE_CORE: u32 = 1;
pub const OFFSCREEN_CANVAS_PROFILE_COMPATIBILITY: u32 = 2;

#[repr(C)]
#[derive(Clone, Copy, Debug)]
/// ### English
/// C view of `SurfaceFormat`. Unknown `api`/`profile` values fall back to OpenGL / any profile.
///
/// ### 中文
/// `SurfaceFormat` 的 C 结构。未知的 `api`/`profile` 取值回退为 OpenGL / any profile。
pub struct OffscreenCanvasFormat {
    pub api: u32,
    pub major: u32,
    pub minor: u32,
    pub profile: u32,
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    pub debug: bool,
}

impl From<OffscreenCanvasFormat> for SurfaceFormat {
    fn from(value: OffscreenCanvasFormat) -> Self {
        Self {
            api: match value.api {
                OFFSCREEN_CANVAS_API_OPENGL_ES => GlApi::OpenGlEs,
                _ => GlApi::OpenGl,
            },
            major: value.major,
            minor: value.minor,
            profile: match value.profile {
                OFFSCREEN_CANVAS_PROFILE_CORE => GlProfile::Core,
                OFFSCREEN_CANVAS_PROFILE_COMPATIBILITY => GlProfile::Compatibility,
                _ => GlProfile::Any,
            },
            red_bits: value.red_bits,
            green_bits: value.green_bits,
            blue_bits: value.blue_bits,
            alpha_bits: value.alpha_bits,
            depth_bits: value.depth_bits,
            stencil_bits: value.stencil_bits,
            debug: value.debug,
        }
    }
}

/// ### English
/// C ABI version for `offscreen_canvas`.
///
/// ### 中文
/// `offscreen_canvas` 的 C ABI 版本号。
const OFFSCREEN_CANVAS_ABI_VERSION: u32 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn c_format_maps_enums() {
        let format = SurfaceFormat::from(OffscreenCanvasFormat {
            api: OFFSCREEN_CANVAS_API_OPENGL_ES,
            major: 3,
            minor: 1,
            profile: OFFSCREEN_CANVAS_PROFILE_ANY,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 0,
            depth_bits: 16,
            stencil_bits: 0,
            debug: true,
        });
        assert_eq!(format.api, GlApi::OpenGlEs);
        assert_eq!((format.major, format.minor), (3, 1));
        assert_eq!(format.profile, GlProfile::Any);
        assert_eq!(format.depth_bits, 16);
        assert!(format.debug);
    }

    #[test]
    fn unknown_c_enum_values_fall_back() {
        let format = SurfaceFormat::from(OffscreenCanvasFormat {
            api: 42,
            major: 4,
            minor: 5,
            profile: 7,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 24,
            stencil_bits: 8,
            debug: false,
        });
        assert_eq!(format.api, GlApi::OpenGl);
        assert_eq!(format.profile, GlProfile::Any);
    }
}
