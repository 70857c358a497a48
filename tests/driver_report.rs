mod common;

use std::sync::Mutex;
use std::thread;

use common::{created_canvas, sample_driver_info};
use offscreen_canvas::{GL_LOG_TARGET, reported_driver_info};

struct CaptureLogger {
    lines: Mutex<Vec<String>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.target() == GL_LOG_TARGET
    }

    fn log(&self, record: &log::Record) {
        if self.enabled(record.metadata()) {
            self.lines
                .lock()
                .expect("capture poisoned")
                .push(record.args().to_string());
        }
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    lines: Mutex::new(Vec::new()),
};

// Single test in this binary: the report is process-wide.
#[test]
fn driver_strings_are_logged_once_per_process() {
    log::set_logger(&LOGGER).expect("logger already set");
    log::set_max_level(log::LevelFilter::Debug);
    assert!(reported_driver_info().is_none());

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let (canvas, _) = created_canvas();
                for _ in 0..8 {
                    assert!(canvas.make_current());
                    canvas.done_current();
                }
            });
        }
    });

    let expected = sample_driver_info();
    assert_eq!(reported_driver_info(), Some(&expected));

    let lines = LOGGER.lines.lock().expect("capture poisoned").clone();
    assert_eq!(
        lines,
        vec![
            format!("GL Version: {}", expected.version),
            format!(
                "GL Shader Language Version: {}",
                expected.shading_language_version
            ),
            format!("GL Vendor: {}", expected.vendor),
            format!("GL Renderer: {}", expected.renderer),
            "GL Context: OpenGL 4.1".to_string(),
        ]
    );
}
