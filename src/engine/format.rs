//! ### English
//! Surface/context format descriptor requested before a context is created.
//!
//! ### 中文
//! 创建上下文之前请求的 surface/上下文格式描述。

/// ### English
/// Environment variable that turns on debug contexts for the default format.
///
/// ### 中文
/// 为默认格式开启 debug 上下文的环境变量。
pub const GL_DEBUG_ENV: &str = "OFFSCREEN_CANVAS_GL_DEBUG";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// ### English
/// Client API of a rendering context.
///
/// ### 中文
/// 渲染上下文的客户端 API。
pub enum GlApi {
    OpenGl,
    OpenGlEs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// ### English
/// OpenGL profile. `Any` lets the driver pick (required for versions below 3.2 and for ES).
///
/// ### 中文
/// OpenGL profile。`Any` 表示由驱动决定（3.2 以下版本与 ES 必须使用）。
pub enum GlProfile {
    Any,
    Core,
    Compatibility,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// ### English
/// Requested (or resolved) configuration of a rendering context and its surface.
///
/// ### 中文
/// 渲染上下文及其 surface 的请求（或实际生效）配置。
pub struct SurfaceFormat {
    pub api: GlApi,
    pub major: u32,
    pub minor: u32,
    pub profile: GlProfile,
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub alpha_bits: u8,
    pub depth_bits: u8,
    pub stencil_bits: u8,
    /// ### English
    /// Request a debug context (enables `KHR_debug` output on most drivers).
    ///
    /// ### 中文
    /// 请求 debug 上下文（多数驱动会因此开启 `KHR_debug` 输出）。
    pub debug: bool,
}

impl SurfaceFormat {
    /// ### English
    /// Desktop OpenGL 4.1 core profile, RGBA8 + depth 24 + stencil 8.
    ///
    /// ### 中文
    /// 桌面 OpenGL 4.1 core profile，RGBA8 + 24 位深度 + 8 位模板。
    pub const fn desktop() -> Self {
        Self {
            api: GlApi::OpenGl,
            major: 4,
            minor: 1,
            profile: GlProfile::Core,
            red_bits: 8,
            green_bits: 8,
            blue_bits: 8,
            alpha_bits: 8,
            depth_bits: 24,
            stencil_bits: 8,
            debug: false,
        }
    }

    /// ### English
    /// OpenGL ES 3.2 with the same buffer depths as `desktop`.
    ///
    /// ### 中文
    /// OpenGL ES 3.2，缓冲位深与 `desktop` 相同。
    pub const fn embedded() -> Self {
        Self {
            api: GlApi::OpenGlEs,
            major: 3,
            minor: 2,
            profile: GlProfile::Any,
            ..Self::desktop()
        }
    }

    /// ### English
    /// Returns a copy with the debug flag replaced.
    ///
    /// ### 中文
    /// 返回替换了 debug 标记的副本。
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// ### English
    /// Whether this format asks for at least `major.minor`.
    ///
    /// ### 中文
    /// 该格式请求的版本是否不低于 `major.minor`。
    pub fn version_at_least(&self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }
}

impl Default for SurfaceFormat {
    /// ### English
    /// Platform default format; the debug flag follows `OFFSCREEN_CANVAS_GL_DEBUG`.
    ///
    /// ### 中文
    /// 平台默认格式；debug 标记取决于 `OFFSCREEN_CANVAS_GL_DEBUG`。
    fn default() -> Self {
        let base = if cfg!(any(target_os = "android", target_os = "ios")) {
            Self::embedded()
        } else {
            Self::desktop()
        };
        base.with_debug(debug_requested_by_env())
    }
}

fn debug_requested_by_env() -> bool {
    std::env::var(GL_DEBUG_ENV)
        .map(|value| parse_flag(&value))
        .unwrap_or(false)
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// ### English
/// How `create` decides that a freshly created offscreen surface is usable.
///
/// Some mobile drivers report surfaces as valid when they are not, so on those targets the
/// only trustworthy check is to make the context current on the surface once.
///
/// ### 中文
/// `create` 判断新建离屏 surface 是否可用的方式。
///
/// 部分移动端驱动会误报 surface 有效，因此在这些平台上唯一可靠的检查是把上下文在该 surface
/// 上 make current 一次。
pub enum SurfaceProbe {
    /// ### English
    /// Ask the provider whether the surface is valid.
    ///
    /// ### 中文
    /// 询问 provider 该 surface 是否有效。
    IsValid,
    /// ### English
    /// Make the context current on the surface, then release it.
    ///
    /// ### 中文
    /// 将上下文在该 surface 上 make current，随后释放。
    MakeCurrent,
}

impl SurfaceProbe {
    pub const fn platform_default() -> Self {
        if cfg!(any(target_os = "android", target_os = "ios")) {
            Self::MakeCurrent
        } else {
            Self::IsValid
        }
    }
}

impl Default for SurfaceProbe {
    fn default() -> Self {
        Self::platform_default()
    }
}
