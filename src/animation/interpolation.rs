use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::animation::state::{ActiveLoop, AnimationStore, LoopId, SharedState};
use crate::foundation::core::Smoothing;
use crate::geometry::anchor::AnchorRef;
use crate::geometry::layout::Viewport;
use crate::geometry::sampler;
use crate::render::proxy::{ProxyHandle, ProxyProps};
use crate::render::surface::RenderSurface;
use crate::schedule::frame::FrameScheduler;
use crate::visibility::tracker::VisibilityTracker;

/// Lifecycle of one loop instance. `Cancelled` is terminal; a remount builds a new instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
    Idle,
    Running,
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoopOpts {
    pub smoothing: Smoothing,
    /// Ask the surface to redraw after every update. On-demand surfaces need this.
    pub request_redraw: bool,
}

impl Default for LoopOpts {
    fn default() -> Self {
        Self {
            smoothing: Smoothing::DEFAULT,
            request_redraw: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Ticks that sampled the anchor and pushed new props.
    pub updates: u64,
    /// Ticks skipped because the anchor was unset.
    pub skipped: u64,
}

/// Collaborators a loop needs besides its anchor and proxy.
#[derive(Clone)]
pub struct LoopDeps {
    pub store: AnimationStore,
    pub scheduler: Rc<dyn FrameScheduler>,
    pub surface: Rc<dyn RenderSurface>,
    pub viewport: Rc<dyn Viewport>,
}

struct LoopShared {
    id: LoopId,
    target: String,
    alpha: f64,
    request_redraw: bool,
    state: SharedState,
    anchor: AnchorRef,
    tracker: VisibilityTracker,
    proxy: ProxyHandle,
    scheduler: Rc<dyn FrameScheduler>,
    surface: Rc<dyn RenderSurface>,
    viewport: Rc<dyn Viewport>,
    phase: Cell<LoopPhase>,
    stats: Cell<LoopStats>,
}

impl LoopShared {
    fn owns_state(&self) -> bool {
        self.state.borrow().active_loop.map(|a| a.owner) == Some(self.id)
    }
}

/// Per-mount driver that eases the shared animation state toward the tracked anchor once per
/// display frame and pushes the result to the render proxy.
///
/// Only one loop drives a store at a time: starting a loop cancels whatever handle the store
/// holds. Dropping the loop cancels it.
pub struct InterpolationLoop {
    shared: Rc<LoopShared>,
}

impl InterpolationLoop {
    pub fn new(
        deps: LoopDeps,
        target: impl Into<String>,
        anchor: AnchorRef,
        tracker: VisibilityTracker,
        proxy: ProxyHandle,
        opts: LoopOpts,
    ) -> Self {
        let state = deps.store.get_state();
        let id = state.borrow_mut().allocate_loop_id();
        Self {
            shared: Rc::new(LoopShared {
                id,
                target: target.into(),
                alpha: opts.smoothing.get(),
                request_redraw: opts.request_redraw,
                state,
                anchor,
                tracker,
                proxy,
                scheduler: deps.scheduler,
                surface: deps.surface,
                viewport: deps.viewport,
                phase: Cell::new(LoopPhase::Idle),
                stats: Cell::new(LoopStats::default()),
            }),
        }
    }

    /// Build and start in one step.
    pub fn spawn(
        deps: LoopDeps,
        target: impl Into<String>,
        anchor: AnchorRef,
        tracker: VisibilityTracker,
        proxy: ProxyHandle,
        opts: LoopOpts,
    ) -> Self {
        let l = Self::new(deps, target, anchor, tracker, proxy, opts);
        l.start();
        l
    }

    /// Cancel any loop currently driving the store, then schedule this loop's first tick.
    /// Returns `false` unless the loop was `Idle`.
    pub fn start(&self) -> bool {
        let s = &self.shared;
        if s.phase.get() != LoopPhase::Idle {
            return false;
        }

        let prior = s.state.borrow_mut().active_loop.take();
        if let Some(prior) = prior {
            s.scheduler.cancel_frame(prior.handle);
            tracing::debug!(
                target_id = %s.target,
                superseded = prior.owner.0,
                "cancelled previous interpolation loop"
            );
        }

        s.phase.set(LoopPhase::Running);
        schedule_next(s);
        tracing::debug!(
            target_id = %s.target,
            loop_id = s.id.0,
            alpha = s.alpha,
            "interpolation loop started"
        );
        true
    }

    /// Stop this loop. Clears the store's handle only if this loop still owns it. Idempotent:
    /// returns `false` when there was nothing left to do.
    pub fn cancel(&self) -> bool {
        let s = &self.shared;
        if s.phase.get() == LoopPhase::Cancelled {
            return false;
        }
        s.phase.set(LoopPhase::Cancelled);

        let owned = {
            let mut st = s.state.borrow_mut();
            match st.active_loop {
                Some(active) if active.owner == s.id => st.active_loop.take(),
                _ => None,
            }
        };
        if let Some(active) = owned {
            s.scheduler.cancel_frame(active.handle);
        }
        tracing::debug!(target_id = %s.target, loop_id = s.id.0, "interpolation loop cancelled");
        true
    }

    pub fn id(&self) -> LoopId {
        self.shared.id
    }

    pub fn phase(&self) -> LoopPhase {
        self.shared.phase.get()
    }

    pub fn stats(&self) -> LoopStats {
        self.shared.stats.get()
    }

    /// `true` while this instance holds the store's active handle.
    pub fn is_active(&self) -> bool {
        self.shared.phase.get() == LoopPhase::Running && self.shared.owns_state()
    }
}

impl Drop for InterpolationLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for InterpolationLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InterpolationLoop")
            .field("id", &self.shared.id)
            .field("target", &self.shared.target)
            .field("phase", &self.shared.phase.get())
            .finish()
    }
}

fn schedule_next(shared: &Rc<LoopShared>) {
    let next = Rc::clone(shared);
    let handle = shared
        .scheduler
        .request_frame(Box::new(move || tick(next)));
    shared.state.borrow_mut().active_loop = Some(ActiveLoop {
        handle,
        owner: shared.id,
    });
}

fn tick(shared: Rc<LoopShared>) {
    // A superseded or cancelled instance must never touch the state again.
    if shared.phase.get() != LoopPhase::Running || !shared.owns_state() {
        return;
    }

    let mut stats = shared.stats.get();
    match sampler::sample(&shared.anchor, &*shared.viewport) {
        None => {
            stats.skipped += 1;
            tracing::trace!(target_id = %shared.target, "anchor unset, holding position");
        }
        Some(target) => {
            let visible = shared.tracker.poll(&*shared.viewport);
            let props = {
                let mut st = shared.state.borrow_mut();
                st.position = st.position.lerp(target.position, shared.alpha);
                st.scale = st.scale.lerp(target.scale, shared.alpha);
                ProxyProps {
                    position: st.position,
                    scale: st.scale,
                    visible,
                }
            };
            shared.proxy.update(props);
            if shared.request_redraw {
                shared.surface.request_redraw();
            }
            stats.updates += 1;
            tracing::trace!(
                target_id = %shared.target,
                x = props.position.x,
                y = props.position.y,
                visible,
                "tick"
            );
        }
    }
    shared.stats.set(stats);

    schedule_next(&shared);
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interpolation.rs"]
mod tests;
