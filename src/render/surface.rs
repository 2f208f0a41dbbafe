use std::cell::Cell;

/// The rendering collaborator. It draws from the proxy registry and may only redraw when asked.
pub trait RenderSurface {
    fn request_redraw(&self);
}

/// Surface that only counts redraw requests; the headless stand-in for an on-demand renderer.
#[derive(Debug, Default)]
pub struct InvalidationCounter {
    requested: Cell<u64>,
}

impl InvalidationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requested(&self) -> u64 {
        self.requested.get()
    }

    /// Returns the number of requests since the last call and resets the count.
    pub fn take_requests(&self) -> u64 {
        self.requested.replace(0)
    }
}

impl RenderSurface for InvalidationCounter {
    fn request_redraw(&self) {
        self.requested.set(self.requested.get() + 1);
    }
}
