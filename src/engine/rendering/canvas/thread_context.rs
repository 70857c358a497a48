//! ### English
//! Per-thread ownership: registering a canvas as the calling thread's context, handing it to
//! another thread, and restoring it after unrelated code changed the current context.
//!
//! ### 中文
//! 线程归属：将 canvas 登记为调用线程的上下文、移交给其它线程，
//! 以及在其它代码切换 current 上下文之后将其恢复。

use std::sync::{Arc, Weak};
use std::thread::ThreadId;

use crate::engine::fatal::{self, FatalError};
use crate::engine::rendering::provider::GlProvider;
use crate::engine::rendering::registry::{ThreadContextOwner, ThreadContextRegistry, owner_key};

use super::{CanvasCore, OffscreenCanvas};

impl<P: GlProvider> CanvasCore<P> {
    pub(super) fn registry_key(&self) -> usize {
        owner_key(self as *const Self)
    }

    /// ### English
    /// Drops the calling thread's registry entry if it points at this canvas.
    ///
    /// ### 中文
    /// 若调用线程的登记表项指向本 canvas，则将其移除。
    pub(super) fn clear_thread_context(&self) {
        let Some(registry) = ThreadContextRegistry::get() else {
            return;
        };
        registry.clear_owner(self.registry_key());
    }
}

impl<P: GlProvider> OffscreenCanvas<P> {
    /// ### English
    /// Registers this canvas as the calling thread's context so `restore_thread_context` can find
    /// it later. Replaces whatever was registered for this thread before.
    ///
    /// ### 中文
    /// 将本 canvas 登记为调用线程的上下文，以便之后 `restore_thread_context` 能找到它。
    /// 会替换该线程之前的登记。
    pub fn set_thread_context(&self) {
        let owner: Weak<dyn ThreadContextOwner> = Arc::<CanvasCore<P>>::downgrade(&self.core);
        ThreadContextRegistry::global().set_owner(owner);
    }

    /// ### English
    /// Removes the calling thread's registration if (and only if) it is this canvas.
    ///
    /// ### 中文
    /// 仅当调用线程登记的是本 canvas 时，移除该登记。
    pub fn clear_thread_context(&self) {
        self.core.clear_thread_context();
    }

    /// ### English
    /// Whether this canvas is the registered context of the calling thread.
    ///
    /// ### 中文
    /// 本 canvas 是否为调用线程登记的上下文。
    pub fn is_thread_context(&self) -> bool {
        ThreadContextRegistry::get()
            .is_some_and(|registry| registry.is_owner(self.core.registry_key()))
    }

    /// ### English
    /// Hands the canvas and its context to `thread`, without making it current.
    ///
    /// Call on the thread that currently drives the canvas, after `done_current`; then send the
    /// canvas to `thread`, which may `set_thread_context` and `make_current`.
    ///
    /// #### Parameters
    /// - `thread`: Thread that will drive the canvas from now on.
    ///
    /// ### 中文
    /// 将 canvas 及其上下文移交给 `thread`，不会将其设为 current。
    ///
    /// 应在当前驱动该 canvas 的线程上、`done_current` 之后调用；随后把 canvas 发送给 `thread`，
    /// 由其调用 `set_thread_context` 与 `make_current`。
    ///
    /// #### 参数
    /// - `thread`：之后驱动该 canvas 的线程。
    pub fn move_to_thread_with_context(&self, thread: ThreadId) {
        self.core.clear_thread_context();

        let mut state = self.core.lock();
        state.affinity = thread;
        if let Some(context) = &state.context {
            self.core.provider.move_context_to_thread(context, thread);
        }
    }
}

/// ### English
/// Makes the calling thread's registered canvas current again.
///
/// Returns `false` when nothing is registered for this thread (or the registered canvas has been
/// dropped). A registered, live canvas that fails to become current is fatal: it has been current
/// on this thread before, so the failure means rendering here cannot go on.
///
/// ### 中文
/// 将调用线程登记的 canvas 重新设为 current。
///
/// 若该线程没有登记（或登记的 canvas 已被 drop）则返回 `false`。登记且存活的 canvas
/// 无法设为 current 属于致命错误：它此前已在该线程成功 current 过，失败意味着此处无法继续渲染。
pub fn restore_thread_context() -> bool {
    let Some(registry) = ThreadContextRegistry::get() else {
        return false;
    };
    let Some(owner) = registry.owner() else {
        return false;
    };

    if !owner.make_current() {
        drop(owner);
        fatal::raise(FatalError::RestoreFailed);
    }
    true
}
