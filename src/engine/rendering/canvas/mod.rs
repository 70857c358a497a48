//! ### English
//! Offscreen rendering context + invisible surface, movable between threads.
//!
//! ### 中文
//! 离屏渲染上下文 + 不可见 surface，可在线程之间移交。

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::ThreadId;

use crate::engine::format::{SurfaceFormat, SurfaceProbe};

use super::driver_report::DriverInfoReport;
use super::provider::GlProvider;
use super::registry::ThreadContextOwner;

mod create;
mod teardown;
mod thread_context;

pub use thread_context::restore_thread_context;

/// ### English
/// Mutable canvas state. Guarded by a mutex so the canvas can be shared with the registry, but
/// GL work is still serialized by convention: one thread drives a canvas at a time.
///
/// ### 中文
/// canvas 的可变状态。用互斥锁保护以便与登记表共享，但 GL 操作仍按约定串行：
/// 同一时间只有一个线程驱动某个 canvas。
pub(super) struct CanvasState<P: GlProvider> {
    /// ### English
    /// Requested format before `create`, resolved format afterwards.
    ///
    /// ### 中文
    /// `create` 之前为请求格式，之后为实际生效的格式。
    pub(super) format: SurfaceFormat,
    pub(super) probe: SurfaceProbe,
    pub(super) context: Option<P::Context>,
    pub(super) surface: Option<P::Surface>,
    /// ### English
    /// Thread allowed to make the context current.
    ///
    /// ### 中文
    /// 允许将上下文设为 current 的线程。
    pub(super) affinity: ThreadId,
}

/// ### English
/// Shared part of a canvas. The registry holds weak references to it.
///
/// ### 中文
/// canvas 的共享部分。登记表持有指向它的弱引用。
pub(super) struct CanvasCore<P: GlProvider> {
    pub(super) provider: P,
    pub(super) state: Mutex<CanvasState<P>>,
}

impl<P: GlProvider> CanvasCore<P> {
    pub(super) fn lock(&self) -> MutexGuard<'_, CanvasState<P>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// ### English
    /// Makes the context current on the calling thread and emits the one-time driver report.
    ///
    /// ### 中文
    /// 将上下文设为调用线程的 current，并输出一次性的驱动报告。
    pub(super) fn activate(&self) -> bool {
        let state = self.lock();
        let (Some(context), Some(surface)) = (&state.context, &state.surface) else {
            log::warn!("make_current called on an offscreen canvas that was never created");
            return false;
        };

        let caller = std::thread::current().id();
        if caller != state.affinity {
            log::warn!(
                "cannot make offscreen canvas current on {caller:?}; it belongs to {:?}",
                state.affinity
            );
            return false;
        }

        let current = self.provider.make_current(context, surface);
        if current {
            DriverInfoReport::global().report_once(|| self.provider.driver_info(context));
        }
        current
    }
}

impl<P: GlProvider> ThreadContextOwner for CanvasCore<P> {
    fn make_current(&self) -> bool {
        self.activate()
    }
}

/// ### English
/// Owns one rendering context and one invisible surface.
///
/// Lifecycle: `new` → optional `set_format`/`set_surface_probe` → `create` → any number of
/// `make_current`/`done_current`, thread hand-offs via `move_to_thread_with_context` → drop.
///
/// ### 中文
/// 持有一个渲染上下文与一个不可见 surface。
///
/// 生命周期：`new` → 可选的 `set_format`/`set_surface_probe` → `create` → 任意次
/// `make_current`/`done_current`，可通过 `move_to_thread_with_context` 移交线程 → drop。
pub struct OffscreenCanvas<P: GlProvider> {
    core: Arc<CanvasCore<P>>,
}

impl<P: GlProvider> OffscreenCanvas<P> {
    /// ### English
    /// Creates an uninitialized canvas bound to the calling thread, with the platform default
    /// format and surface probe.
    ///
    /// ### 中文
    /// 创建一个绑定到调用线程、尚未初始化的 canvas，使用平台默认格式与 surface 探测策略。
    pub fn new(provider: P) -> Self {
        let state = CanvasState {
            format: SurfaceFormat::default(),
            probe: SurfaceProbe::platform_default(),
            context: None,
            surface: None,
            affinity: std::thread::current().id(),
        };
        Self {
            core: Arc::new(CanvasCore {
                provider,
                state: Mutex::new(state),
            }),
        }
    }

    /// ### English
    /// Sets the format used by `create`. Ignored (with a warning) once the context exists.
    ///
    /// ### 中文
    /// 设置 `create` 使用的格式。上下文创建之后调用会被忽略并给出警告。
    pub fn set_format(&self, format: SurfaceFormat) {
        let mut state = self.core.lock();
        if state.context.is_some() {
            log::warn!("set_format after create has no effect on an offscreen canvas");
            return;
        }
        state.format = format;
    }

    /// ### English
    /// Overrides the creation-time surface check. Ignored once the context exists.
    ///
    /// ### 中文
    /// 覆盖创建阶段的 surface 检查方式。上下文创建之后调用会被忽略。
    pub fn set_surface_probe(&self, probe: SurfaceProbe) {
        let mut state = self.core.lock();
        if state.context.is_some() {
            log::warn!("set_surface_probe after create has no effect on an offscreen canvas");
            return;
        }
        state.probe = probe;
    }

    /// ### English
    /// Makes the context current on the calling thread. Returns `false` if the canvas was never
    /// created, the calling thread is not the canvas's thread, or the provider refused.
    ///
    /// ### 中文
    /// 将上下文设为调用线程的 current。若 canvas 尚未创建、调用线程不是 canvas 所属线程、
    /// 或 provider 拒绝，则返回 `false`。
    pub fn make_current(&self) -> bool {
        self.core.activate()
    }

    /// ### English
    /// Releases the context from the calling thread without destroying it.
    ///
    /// ### 中文
    /// 在不销毁上下文的前提下，将其从调用线程释放。
    pub fn done_current(&self) {
        let state = self.core.lock();
        if let Some(context) = &state.context {
            self.core.provider.done_current(context);
        }
    }

    /// ### English
    /// Handle to the underlying context, e.g. to create another canvas sharing its objects.
    ///
    /// ### 中文
    /// 底层上下文句柄，例如用于创建与其共享对象的另一个 canvas。
    pub fn context(&self) -> Option<P::Context> {
        self.core.lock().context.clone()
    }

    pub fn format(&self) -> SurfaceFormat {
        self.core.lock().format.clone()
    }

    pub fn surface_probe(&self) -> SurfaceProbe {
        self.core.lock().probe
    }

    pub fn thread_affinity(&self) -> ThreadId {
        self.core.lock().affinity
    }

    pub fn is_created(&self) -> bool {
        self.core.lock().context.is_some()
    }

    pub fn provider(&self) -> &P {
        &self.core.provider
    }
}
