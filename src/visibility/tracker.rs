use std::cell::Cell;

use crate::foundation::core::{Rect, Size};
use crate::foundation::error::{ViewError, ViewResult};
use crate::geometry::anchor::AnchorRef;
use crate::geometry::layout::Viewport;

/// How close to the viewport an element must be to count as visible.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisibilityOpts {
    /// Pixels added to every side of the viewport before testing intersection.
    pub margin: f64,
    /// Minimum fraction of the element's area inside the expanded viewport, in `[0, 1]`.
    pub threshold: f64,
}

impl Default for VisibilityOpts {
    fn default() -> Self {
        Self {
            margin: 0.0,
            threshold: 0.0,
        }
    }
}

impl VisibilityOpts {
    pub fn validate(self) -> ViewResult<Self> {
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ViewError::validation("visibility margin must be >= 0"));
        }
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ViewError::validation(
                "visibility threshold must be in [0, 1]",
            ));
        }
        Ok(self)
    }
}

/// Whether `element` intersects the viewport grown by `opts.margin`, covering at least
/// `opts.threshold` of the element. Touching edges count as intersecting.
pub fn intersects_viewport(element: Rect, viewport: Size, opts: VisibilityOpts) -> bool {
    let root = Rect::from_origin_size((0.0, 0.0), viewport).inflate(opts.margin, opts.margin);
    let x0 = element.x0.max(root.x0);
    let y0 = element.y0.max(root.y0);
    let x1 = element.x1.min(root.x1);
    let y1 = element.y1.min(root.y1);
    if x0 > x1 || y0 > y1 {
        return false;
    }
    if opts.threshold <= 0.0 {
        return true;
    }
    let area = element.area();
    if area <= 0.0 {
        return true;
    }
    (x1 - x0) * (y1 - y0) / area >= opts.threshold
}

/// Observes the anchor's intersection with the (expanded) viewport.
///
/// Re-evaluated by [`VisibilityTracker::poll`], once per frame by the interpolation loop. While
/// the anchor is unset the last value is held.
#[derive(Debug)]
pub struct VisibilityTracker {
    anchor: AnchorRef,
    opts: VisibilityOpts,
    in_viewport: Cell<bool>,
}

impl VisibilityTracker {
    pub fn track(anchor: AnchorRef, opts: VisibilityOpts) -> Self {
        Self {
            anchor,
            opts,
            in_viewport: Cell::new(false),
        }
    }

    pub fn poll(&self, viewport: &dyn Viewport) -> bool {
        let Some(element) = self.anchor.get() else {
            return self.in_viewport.get();
        };
        let now = intersects_viewport(element.bounding_client_rect(), viewport.size(), self.opts);
        if self.in_viewport.replace(now) != now {
            tracing::debug!(in_viewport = now, "anchor visibility changed");
        }
        now
    }

    pub fn in_viewport(&self) -> bool {
        self.in_viewport.get()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/visibility/tracker.rs"]
mod tests;
