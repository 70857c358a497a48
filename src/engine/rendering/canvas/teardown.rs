use std::sync::PoisonError;

use crate::engine::rendering::provider::GlProvider;

use super::CanvasCore;

impl<P: GlProvider> Drop for CanvasCore<P> {
    /// ### English
    /// Unregisters the canvas, then releases the context before the surface it was bound to.
    ///
    /// A context with debug output enabled must be current while it is destroyed so the driver
    /// can release its logging resources, hence the final `make_current`.
    ///
    /// ### 中文
    /// 取消登记，然后先释放上下文，再释放其绑定的 surface。
    ///
    /// 开启 debug 输出的上下文在销毁时必须是 current，驱动才能释放其日志资源，
    /// 因此最后还会 `make_current` 一次。
    fn drop(&mut self) {
        self.clear_thread_context();

        let state = self.state.get_mut().unwrap_or_else(PoisonError::into_inner);
        let context = state.context.take();
        let surface = state.surface.take();

        if let Some(context) = context {
            if let Some(surface) = &surface {
                let _ = self.provider.make_current(&context, surface);
            }
            self.provider.destroy_context(context);
        }
        if let Some(surface) = surface {
            self.provider.destroy_surface(surface);
        }
    }
}
