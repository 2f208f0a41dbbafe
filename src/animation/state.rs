use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use crate::foundation::core::Vec3;
use crate::schedule::frame::FrameHandle;

/// Identity of one interpolation loop instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LoopId(pub u64);

/// The scheduled callback that currently drives the shared state, and who owns it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActiveLoop {
    pub handle: FrameHandle,
    pub owner: LoopId,
}

/// Interpolated render values that outlive any single mounted view.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationState {
    pub position: Vec3,
    pub scale: Vec3,
    /// At most one loop drives the state; starting a loop cancels this handle first.
    pub active_loop: Option<ActiveLoop>,
    next_loop_id: u64,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            scale: Vec3::ONE,
            active_loop: None,
            next_loop_id: 0,
        }
    }
}

impl AnimationState {
    pub(crate) fn allocate_loop_id(&mut self) -> LoopId {
        let id = LoopId(self.next_loop_id);
        self.next_loop_id += 1;
        id
    }
}

/// Shared handle to the one [`AnimationState`] of a store.
pub type SharedState = Rc<RefCell<AnimationState>>;

/// Lazily-created holder for the shared animation state.
///
/// Clones share the same state. [`AnimationStore::global`] is the page-session store; isolated
/// stores from [`AnimationStore::new`] are used for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct AnimationStore {
    slot: Rc<OnceCell<SharedState>>,
}

thread_local! {
    static GLOBAL_STORE: AnimationStore = AnimationStore::new();
}

impl AnimationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The store shared by every view on this UI thread.
    pub fn global() -> Self {
        GLOBAL_STORE.with(Clone::clone)
    }

    /// Return the shared state, creating it on first call.
    pub fn get_state(&self) -> SharedState {
        Rc::clone(self.slot.get_or_init(|| {
            tracing::debug!("animation state created");
            Rc::new(RefCell::new(AnimationState::default()))
        }))
    }

    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Copy of the current values, for inspection.
    pub fn snapshot(&self) -> AnimationState {
        self.get_state().borrow().clone()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/state.rs"]
mod tests;
