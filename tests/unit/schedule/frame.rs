use super::*;
use std::rc::Rc;

fn recorder() -> (Rc<RefCell<Vec<u32>>>, impl Fn(u32) -> FrameCallback) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let l = log.clone();
    let make = move |v: u32| -> FrameCallback {
        let l = l.clone();
        Box::new(move || l.borrow_mut().push(v))
    };
    (log, make)
}

#[test]
fn callbacks_run_once_in_request_order() {
    let s = ManualScheduler::new();
    let (log, cb) = recorder();
    s.request_frame(cb(1));
    s.request_frame(cb(2));
    assert_eq!(s.pending_count(), 2);

    assert_eq!(s.run_frame(), 2);
    assert_eq!(*log.borrow(), vec![1, 2]);
    assert_eq!(s.run_frame(), 0);
    assert_eq!(s.frames_run(), 2);
}

#[test]
fn cancelled_callback_never_runs() {
    let s = ManualScheduler::new();
    let (log, cb) = recorder();
    let h = s.request_frame(cb(1));
    assert!(s.cancel_frame(h));
    assert!(!s.cancel_frame(h));
    s.run_frame();
    assert!(log.borrow().is_empty());
}

#[test]
fn requests_made_during_a_frame_run_next_frame() {
    let s = Rc::new(ManualScheduler::new());
    let log = Rc::new(RefCell::new(Vec::new()));

    let (s2, l2) = (s.clone(), log.clone());
    s.request_frame(Box::new(move || {
        l2.borrow_mut().push("first");
        let l3 = l2.clone();
        s2.request_frame(Box::new(move || l3.borrow_mut().push("second")));
    }));

    assert_eq!(s.run_frame(), 1);
    assert_eq!(*log.borrow(), vec!["first"]);
    assert_eq!(s.run_frame(), 1);
    assert_eq!(*log.borrow(), vec!["first", "second"]);
}

#[test]
fn cancel_within_same_frame_prevents_later_callback() {
    let s = Rc::new(ManualScheduler::new());
    let log = Rc::new(RefCell::new(Vec::new()));

    let victim_slot = Rc::new(Cell::new(None::<FrameHandle>));
    let (s2, v2, l2) = (s.clone(), victim_slot.clone(), log.clone());
    s.request_frame(Box::new(move || {
        l2.borrow_mut().push(1);
        if let Some(h) = v2.get() {
            assert!(s2.cancel_frame(h));
        }
    }));
    let l3 = log.clone();
    let victim = s.request_frame(Box::new(move || l3.borrow_mut().push(2)));
    victim_slot.set(Some(victim));

    assert_eq!(s.run_frame(), 1);
    assert_eq!(*log.borrow(), vec![1]);
}
