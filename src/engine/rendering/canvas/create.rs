//! ### English
//! Context + surface creation for `OffscreenCanvas`.
//!
//! ### 中文
//! `OffscreenCanvas` 的上下文与 surface 创建逻辑。

use crate::engine::fatal::{self, FatalError};
use crate::engine::format::SurfaceProbe;
use crate::engine::rendering::provider::GlProvider;

use super::OffscreenCanvas;

impl<P: GlProvider> OffscreenCanvas<P> {
    /// ### English
    /// Creates the context and its offscreen surface.
    ///
    /// With `share`, the calling thread's claim on that context is released first (a context
    /// current on another thread stays current there) and the two are then linked so textures
    /// and buffers are visible to both contexts. Creation failures are fatal
    /// (`FatalError`); a canvas that already has a context is left untouched and `false` is
    /// returned.
    ///
    /// #### Parameters
    /// - `share`: Optional context whose GPU objects the new context shares.
    ///
    /// ### 中文
    /// 创建上下文及其离屏 surface。
    ///
    /// 传入 `share` 时，会先释放调用线程对该上下文的占用（在其它线程 current 的上下文保持不变），
    /// 再进行关联，使纹理与缓冲在两个上下文间可见。
    /// 创建失败属于致命错误（`FatalError`）；若 canvas 已有上下文，则保持不变并返回 `false`。
    ///
    /// #### 参数
    /// - `share`：可选的共享上下文，新上下文将与其共享 GPU 对象。
    pub fn create(&self, share: Option<&P::Context>) -> bool {
        let provider = &self.core.provider;
        let mut state = self.core.lock();
        if state.context.is_some() {
            log::warn!("offscreen canvas already has a context; ignoring create");
            return false;
        }

        if let Some(share) = share {
            provider.done_current(share);
        }

        let context = match provider.create_context(&state.format, share) {
            Ok(context) => context,
            Err(err) => {
                drop(state);
                fatal::raise(FatalError::ContextCreation(err));
            }
        };
        state.context = Some(context.clone());

        let format = provider.context_format(&context, &state.format);
        let surface = match provider.create_surface(&context, &format) {
            Ok(surface) => surface,
            Err(err) => {
                drop(state);
                fatal::raise(FatalError::SurfaceCreation(err));
            }
        };
        state.format = format;

        let probe_failure = match state.probe {
            SurfaceProbe::IsValid => {
                (!provider.is_surface_valid(&surface)).then_some(FatalError::InvalidSurface)
            }
            SurfaceProbe::MakeCurrent => {
                if provider.make_current(&context, &surface) {
                    provider.done_current(&context);
                    None
                } else {
                    Some(FatalError::SurfaceProbe)
                }
            }
        };
        state.surface = Some(surface);
        if let Some(err) = probe_failure {
            drop(state);
            fatal::raise(err);
        }

        log::debug!(
            "offscreen canvas created: {:?} {}.{} {:?}{}{}",
            state.format.api,
            state.format.major,
            state.format.minor,
            state.format.profile,
            if share.is_some() { ", shared" } else { "" },
            if state.format.debug { ", debug" } else { "" },
        );
        true
    }
}
