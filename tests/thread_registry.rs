mod common;

use std::thread;

use common::{Event, RecordingProvider, assert_fatal, created_canvas};
use offscreen_canvas::{FatalError, OffscreenCanvas, restore_thread_context};

#[test]
fn restore_without_registration_is_false() {
    let restored = thread::spawn(restore_thread_context)
        .join()
        .expect("worker panicked");
    assert!(!restored);
}

#[test]
fn restore_makes_registered_canvas_current() {
    let (canvas, driver) = created_canvas();
    let id = canvas.context().expect("created").id;
    canvas.set_thread_context();
    assert!(canvas.is_thread_context());

    assert!(restore_thread_context());
    assert_eq!(driver.current_thread(id), Some(thread::current().id()));
}

#[test]
fn registering_replaces_previous_owner() {
    let (first, _) = created_canvas();
    let (second, _) = created_canvas();

    first.set_thread_context();
    second.set_thread_context();
    assert!(!first.is_thread_context());
    assert!(second.is_thread_context());

    // Clearing a canvas that is not the owner leaves the entry alone.
    first.clear_thread_context();
    assert!(second.is_thread_context());

    second.clear_thread_context();
    assert!(!second.is_thread_context());
    assert!(!restore_thread_context());
}

#[test]
fn at_most_one_owner_per_thread() {
    let canvases: Vec<_> = (0..4).map(|_| created_canvas().0).collect();

    // Deterministic pseudo-random sequence of register/clear calls.
    let mut seed: u32 = 0x2545_f491;
    for _ in 0..64 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let canvas = &canvases[(seed >> 16) as usize % canvases.len()];
        if seed & 1 == 0 {
            canvas.set_thread_context();
        } else {
            canvas.clear_thread_context();
        }

        let owners = canvases
            .iter()
            .filter(|canvas| canvas.is_thread_context())
            .count();
        assert!(owners <= 1);
        assert_eq!(restore_thread_context(), owners == 1);
    }
}

#[test]
fn dropping_owner_clears_registration() {
    let (canvas, _) = created_canvas();
    canvas.set_thread_context();
    drop(canvas);
    assert!(!restore_thread_context());
}

#[test]
fn registrations_are_per_thread() {
    let (canvas, _) = created_canvas();
    canvas.set_thread_context();

    thread::scope(|scope| {
        let elsewhere = scope
            .spawn(|| (canvas.is_thread_context(), restore_thread_context()))
            .join()
            .expect("worker panicked");
        assert_eq!(elsewhere, (false, false));
    });
    assert!(canvas.is_thread_context());
}

#[test]
fn failed_restore_is_fatal() {
    let (canvas, driver) = created_canvas();
    canvas.set_thread_context();
    driver.refuse(true);

    assert_fatal(restore_thread_context, |err| {
        matches!(err, FatalError::RestoreFailed)
    });
}

#[test]
fn migrated_canvas_is_restored_on_target_thread() {
    let (canvas, driver) = created_canvas();
    let id = canvas.context().expect("created").id;
    assert!(canvas.make_current());
    canvas.set_thread_context();

    let (tx, rx) = crossbeam_channel::bounded::<OffscreenCanvas<RecordingProvider>>(1);
    let worker = thread::spawn(move || {
        let canvas = rx.recv().expect("main hung up");
        let before_registration = restore_thread_context();
        assert_eq!(canvas.thread_affinity(), thread::current().id());
        canvas.set_thread_context();
        let restored = restore_thread_context();
        (before_registration, restored, thread::current().id())
    });

    canvas.done_current();
    canvas.move_to_thread_with_context(worker.thread().id());
    assert!(!canvas.is_thread_context());
    assert!(!restore_thread_context());
    assert!(!canvas.make_current());
    tx.send(canvas).expect("worker hung up");

    let (before_registration, restored, worker_id) = worker.join().expect("worker panicked");
    assert!(!before_registration);
    assert!(restored);

    let events = driver.events();
    assert!(events.contains(&Event::MovedToThread {
        id,
        thread: worker_id,
    }));
    assert!(events.contains(&Event::MadeCurrent {
        id,
        thread: worker_id,
    }));
}
