#![allow(dead_code)]

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;

use offscreen_canvas::{
    DriverInfo, FatalError, GlProvider, OffscreenCanvas, ProviderError, SurfaceFormat,
    fatal_payload,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    ContextCreated {
        id: usize,
        share: Option<usize>,
        share_current_on: Option<ThreadId>,
    },
    SurfaceCreated {
        id: usize,
    },
    MadeCurrent {
        id: usize,
        thread: ThreadId,
    },
    DoneCurrent {
        id: usize,
        thread: ThreadId,
    },
    MovedToThread {
        id: usize,
        thread: ThreadId,
    },
    ContextDestroyed {
        id: usize,
    },
    SurfaceDestroyed {
        id: usize,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MockContext {
    pub id: usize,
}

#[derive(Debug)]
pub struct MockSurface {
    pub id: usize,
}

/// In-memory driver model: a context is current on at most one thread, and a thread has at
/// most one current context.
#[derive(Default)]
pub struct DriverModel {
    next_id: AtomicUsize,
    current: Mutex<HashMap<usize, ThreadId>>,
    events: Mutex<Vec<Event>>,
    pub fail_context: AtomicBool,
    pub fail_surface: AtomicBool,
    pub invalid_surface: AtomicBool,
    pub refuse_make_current: AtomicBool,
}

impl DriverModel {
    fn push(&self, event: Event) {
        self.events.lock().expect("events poisoned").push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("events poisoned").clone()
    }

    pub fn current_thread(&self, id: usize) -> Option<ThreadId> {
        self.current.lock().expect("current poisoned").get(&id).copied()
    }

    pub fn refuse(&self, refuse: bool) {
        self.refuse_make_current.store(refuse, Ordering::SeqCst);
    }
}

#[derive(Clone, Default)]
pub struct RecordingProvider {
    pub driver: Arc<DriverModel>,
}

pub fn sample_driver_info() -> DriverInfo {
    DriverInfo {
        version: "4.1 Recording 1.0".to_string(),
        shading_language_version: "4.10".to_string(),
        vendor: "offscreen-canvas tests".to_string(),
        renderer: "recording provider".to_string(),
    }
}

impl GlProvider for RecordingProvider {
    type Context = MockContext;
    type Surface = MockSurface;

    fn create_context(
        &self,
        _format: &SurfaceFormat,
        share: Option<&MockContext>,
    ) -> Result<MockContext, ProviderError> {
        if self.driver.fail_context.load(Ordering::SeqCst) {
            return Err(ProviderError::ContextCreation("no pixel format".to_string()));
        }
        let id = self.driver.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.driver.push(Event::ContextCreated {
            id,
            share: share.map(|context| context.id),
            share_current_on: share.and_then(|context| self.driver.current_thread(context.id)),
        });
        Ok(MockContext { id })
    }

    fn context_format(&self, _context: &MockContext, requested: &SurfaceFormat) -> SurfaceFormat {
        requested.clone()
    }

    fn create_surface(
        &self,
        context: &MockContext,
        _format: &SurfaceFormat,
    ) -> Result<MockSurface, ProviderError> {
        if self.driver.fail_surface.load(Ordering::SeqCst) {
            return Err(ProviderError::SurfaceCreation("out of memory".to_string()));
        }
        self.driver.push(Event::SurfaceCreated { id: context.id });
        Ok(MockSurface { id: context.id })
    }

    fn is_surface_valid(&self, _surface: &MockSurface) -> bool {
        !self.driver.invalid_surface.load(Ordering::SeqCst)
    }

    fn make_current(&self, context: &MockContext, _surface: &MockSurface) -> bool {
        if self.driver.refuse_make_current.load(Ordering::SeqCst) {
            return false;
        }
        let thread = std::thread::current().id();
        {
            let mut current = self.driver.current.lock().expect("current poisoned");
            if current.get(&context.id).is_some_and(|owner| *owner != thread) {
                return false;
            }
            current.retain(|_, owner| *owner != thread);
            current.insert(context.id, thread);
        }
        self.driver.push(Event::MadeCurrent {
            id: context.id,
            thread,
        });
        true
    }

    fn done_current(&self, context: &MockContext) {
        let thread = std::thread::current().id();
        {
            let mut current = self.driver.current.lock().expect("current poisoned");
            if current.get(&context.id) == Some(&thread) {
                current.remove(&context.id);
            }
        }
        self.driver.push(Event::DoneCurrent {
            id: context.id,
            thread,
        });
    }

    fn driver_info(&self, _context: &MockContext) -> Option<DriverInfo> {
        Some(sample_driver_info())
    }

    fn move_context_to_thread(&self, context: &MockContext, thread: ThreadId) {
        self.driver.push(Event::MovedToThread {
            id: context.id,
            thread,
        });
    }

    fn destroy_context(&self, context: MockContext) {
        self.driver
            .current
            .lock()
            .expect("current poisoned")
            .remove(&context.id);
        self.driver.push(Event::ContextDestroyed { id: context.id });
    }

    fn destroy_surface(&self, surface: MockSurface) {
        self.driver.push(Event::SurfaceDestroyed { id: surface.id });
    }
}

pub fn new_canvas() -> (OffscreenCanvas<RecordingProvider>, Arc<DriverModel>) {
    let provider = RecordingProvider::default();
    let driver = Arc::clone(&provider.driver);
    (OffscreenCanvas::new(provider), driver)
}

pub fn created_canvas() -> (OffscreenCanvas<RecordingProvider>, Arc<DriverModel>) {
    let (canvas, driver) = new_canvas();
    assert!(canvas.create(None));
    (canvas, driver)
}

/// Runs `f`, which must unwind with a `FatalError`, and hands that error to `check`.
pub fn assert_fatal<R>(f: impl FnOnce() -> R, check: impl FnOnce(&FatalError) -> bool) {
    let payload = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(_) => panic!("expected a fatal error"),
        Err(payload) => payload,
    };
    match fatal_payload(payload.as_ref()) {
        Some(err) => assert!(check(err), "unexpected fatal error: {err}"),
        None => panic::resume_unwind(payload),
    }
}
