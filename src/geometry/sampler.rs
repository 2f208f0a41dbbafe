use crate::foundation::core::{Rect, Size, Vec3};
use crate::geometry::anchor::AnchorRef;
use crate::geometry::layout::Viewport;

/// Position and scale of an element in viewport-centered render space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DomSample {
    pub position: Vec3,
    pub scale: Vec3,
}

/// Sample whatever the anchor currently points at.
///
/// Returns `None` while the anchor is unset; callers skip the frame.
pub fn sample(anchor: &AnchorRef, viewport: &dyn Viewport) -> Option<DomSample> {
    let element = anchor.get()?;
    Some(sample_rect(element.bounding_client_rect(), viewport.size()))
}

/// Convert a top-left/Y-down client rect into center position and size with the origin at the
/// viewport center and Y up.
pub fn sample_rect(rect: Rect, viewport: Size) -> DomSample {
    let w = rect.width();
    let h = rect.height();
    let x = rect.x0 + w / 2.0 - viewport.width / 2.0;
    let y = -(rect.y0 + h / 2.0 - viewport.height / 2.0);
    DomSample {
        position: Vec3::new(x, y, 0.0),
        scale: Vec3::new(w, h, 1.0),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/sampler.rs"]
mod tests;
