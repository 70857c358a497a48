//! ### English
//! One-shot logging of driver strings on the first successful context activation.
//!
//! ### 中文
//! 在首次成功激活上下文时记录一次驱动字符串。

use std::sync::{Once, OnceLock};

use super::provider::DriverInfo;

/// ### English
/// Log target used for driver diagnostics.
///
/// ### 中文
/// 驱动诊断信息使用的日志 target。
pub const GL_LOG_TARGET: &str = "offscreen_canvas::gl";

static GLOBAL: DriverInfoReport = DriverInfoReport::new();

/// ### English
/// Emits the driver report at most once for its lifetime.
///
/// `query` may run more than once when several threads race on their first activation, but only
/// one of them logs and stores the result.
///
/// ### 中文
/// 在其生命周期内最多输出一次驱动报告。
///
/// 多个线程同时首次激活时 `query` 可能被执行多次，但只有其中一个会写日志并保存结果。
pub struct DriverInfoReport {
    once: Once,
    info: OnceLock<DriverInfo>,
}

impl DriverInfoReport {
    pub const fn new() -> Self {
        Self {
            once: Once::new(),
            info: OnceLock::new(),
        }
    }

    /// ### English
    /// The process-wide report used by every canvas.
    ///
    /// ### 中文
    /// 所有 canvas 共用的进程级报告。
    pub fn global() -> &'static Self {
        &GLOBAL
    }

    /// ### English
    /// Runs `query` and logs its result unless a report was already emitted.
    /// A `None` from `query` leaves the report pending. Returns whether this call logged.
    ///
    /// ### 中文
    /// 若尚未输出过报告，则执行 `query` 并记录结果。`query` 返回 `None` 时报告保持待定。
    /// 返回本次调用是否输出了日志。
    pub fn report_once(&self, query: impl FnOnce() -> Option<DriverInfo>) -> bool {
        if self.once.is_completed() {
            return false;
        }
        let Some(info) = query() else {
            return false;
        };

        let mut emitted = false;
        self.once.call_once(|| {
            log::debug!(target: GL_LOG_TARGET, "GL Version: {}", info.version);
            log::debug!(
                target: GL_LOG_TARGET,
                "GL Shader Language Version: {}",
                info.shading_language_version
            );
            log::debug!(target: GL_LOG_TARGET, "GL Vendor: {}", info.vendor);
            log::debug!(target: GL_LOG_TARGET, "GL Renderer: {}", info.renderer);
            let (major, minor) = info.gl_version();
            let api = if info.is_gles() { "OpenGL ES" } else { "OpenGL" };
            log::debug!(target: GL_LOG_TARGET, "GL Context: {api} {major}.{minor}");
            let _ = self.info.set(info);
            emitted = true;
        });
        emitted
    }

    /// ### English
    /// The reported driver strings, once a report has been emitted.
    ///
    /// ### 中文
    /// 报告输出之后返回对应的驱动字符串。
    pub fn info(&self) -> Option<&DriverInfo> {
        self.info.get()
    }
}

impl Default for DriverInfoReport {
    fn default() -> Self {
        Self::new()
    }
}

/// ### English
/// Driver strings logged by the first successful activation in this process, if any.
///
/// ### 中文
/// 本进程首次成功激活时记录的驱动字符串（若已发生）。
pub fn reported_driver_info() -> Option<&'static DriverInfo> {
    DriverInfoReport::global().info()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample() -> DriverInfo {
        DriverInfo {
            version: "4.6.0 NVIDIA 550.54.14".to_string(),
            shading_language_version: "4.60 NVIDIA".to_string(),
            vendor: "NVIDIA Corporation".to_string(),
            renderer: "NVIDIA GeForce RTX 3070/PCIe/SSE2".to_string(),
        }
    }

    #[test]
    fn logs_once_across_many_activations() {
        let report = DriverInfoReport::new();
        let emitted = (0..32)
            .filter(|_| report.report_once(|| Some(sample())))
            .count();
        assert_eq!(emitted, 1);
        assert_eq!(report.info(), Some(&sample()));
    }

    #[test]
    fn missing_driver_strings_keep_report_pending() {
        let report = DriverInfoReport::new();
        assert!(!report.report_once(|| None));
        assert!(report.info().is_none());
        assert!(report.report_once(|| Some(sample())));
    }

    #[test]
    fn skips_query_after_report() {
        let report = DriverInfoReport::new();
        assert!(report.report_once(|| Some(sample())));
        let queried = AtomicUsize::new(0);
        for _ in 0..4 {
            report.report_once(|| {
                queried.fetch_add(1, Ordering::Relaxed);
                Some(sample())
            });
        }
        assert_eq!(queried.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn concurrent_first_activations_log_once() {
        let report = Arc::new(DriverInfoReport::new());
        let emitted = Arc::new(AtomicUsize::new(0));
        let workers: Vec<_> = (0..8)
            .map(|_| {
                let report = Arc::clone(&report);
                let emitted = Arc::clone(&emitted);
                std::thread::spawn(move || {
                    for _ in 0..16 {
                        if report.report_once(|| Some(sample())) {
                            emitted.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().expect("worker panicked");
        }
        assert_eq!(emitted.load(Ordering::Relaxed), 1);
    }
}
