use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;

/// Opaque handle to a scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Callback invoked once on the next display frame.
pub type FrameCallback = Box<dyn FnOnce()>;

/// Cooperative, single-threaded display-frame source.
///
/// Callbacks run once, in request order, on the frame after they were requested. A recurring loop
/// re-requests itself from inside its callback.
pub trait FrameScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle;

    /// Cancel a pending callback. Returns `false` when the handle already ran, was already
    /// cancelled, or was never issued.
    fn cancel_frame(&self, handle: FrameHandle) -> bool;
}

/// Deterministic scheduler driven by explicit [`ManualScheduler::run_frame`] calls.
#[derive(Default)]
pub struct ManualScheduler {
    next_handle: Cell<u64>,
    frames_run: Cell<u64>,
    pending: RefCell<BTreeMap<FrameHandle, FrameCallback>>,
    // Callbacks due in the frame currently executing; cancellable until they run.
    running: RefCell<BTreeMap<FrameHandle, FrameCallback>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every callback that was pending when the frame started. Returns how many ran.
    pub fn run_frame(&self) -> usize {
        let due = std::mem::take(&mut *self.pending.borrow_mut());
        *self.running.borrow_mut() = due;
        self.frames_run.set(self.frames_run.get() + 1);

        let mut ran = 0usize;
        loop {
            let next = self.running.borrow_mut().pop_first();
            let Some((_, cb)) = next else {
                break;
            };
            cb();
            ran += 1;
        }
        ran
    }

    pub fn run_frames(&self, n: usize) -> usize {
        (0..n).map(|_| self.run_frame()).sum()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.borrow().contains_key(&handle)
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.pending.borrow_mut().insert(handle, callback);
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) -> bool {
        // Drop the callback outside of the borrow; it may own values with their own Drop logic.
        let removed = self.pending.borrow_mut().remove(&handle);
        let removed = removed.or_else(|| self.running.borrow_mut().remove(&handle));
        removed.is_some()
    }
}

impl fmt::Debug for ManualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualScheduler")
            .field("frames_run", &self.frames_run.get())
            .field("pending", &self.pending.borrow().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/frame.rs"]
mod tests;
