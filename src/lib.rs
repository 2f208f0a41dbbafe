//! A render proxy that appears to persist across page navigations.
//!
//! Each page declares an anchor element under a shared id. A single long-lived proxy object,
//! registered once under that id, is eased toward whichever anchor is currently mounted, so the
//! visual glides from one page's layout to the next while the pages themselves are torn down and
//! rebuilt.
//!
//! # Moving parts
//!
//! 1. [`AnimationStore`]: lazily-created shared position/scale plus the active loop handle.
//! 2. [`sample`]: element box -> viewport-centered position and size (Y up).
//! 3. [`InterpolationLoop`]: per-mount, per-frame exponential smoothing toward the sample.
//! 4. [`ProxyRegistry`]: keyed render objects, reused across remounts.
//! 5. [`VisibilityTracker`]: gates the proxy's `visible` flag on viewport intersection.
//!
//! [`ViewRuntime::mount`] wires all of it for one page and returns a [`MountedView`] whose drop is
//! the unmount.
//!
//! Everything is single-threaded and frame-driven; the host supplies a [`FrameScheduler`], a
//! [`RenderSurface`] and a [`Viewport`]. [`ManualScheduler`], [`InvalidationCounter`] and
//! [`FixedViewport`] are deterministic stand-ins used by tests and [`run_scenario`].
#![forbid(unsafe_code)]

mod animation;
mod foundation;
mod geometry;
mod render;
mod scenario;
mod schedule;
mod view;
mod visibility;

pub use animation::interpolation::{InterpolationLoop, LoopDeps, LoopOpts, LoopPhase, LoopStats};
pub use animation::state::{ActiveLoop, AnimationState, AnimationStore, LoopId, SharedState};
pub use foundation::core::{ClientRect, Point, Rect, Size, Smoothing, Vec3, ViewportDef};
pub use foundation::error::{ViewError, ViewResult};
pub use geometry::anchor::{AnchorRef, TrackedAnchor};
pub use geometry::layout::{FixedViewport, LayoutElement, StaticElement, Viewport};
pub use geometry::sampler::{DomSample, sample, sample_rect};
pub use render::proxy::{
    ProxyHandle, ProxyObjectId, ProxyProps, ProxyRegistry, ProxySnapshot, RegisterOpts,
};
pub use render::surface::{InvalidationCounter, RenderSurface};
pub use scenario::model::{MountOrder, PageDef, Scenario};
pub use scenario::runner::{FrameRecord, run_scenario};
pub use schedule::frame::{FrameCallback, FrameHandle, FrameScheduler, ManualScheduler};
pub use view::mount::{MountedView, ViewProps, ViewRuntime};
pub use visibility::tracker::{VisibilityOpts, VisibilityTracker, intersects_viewport};
