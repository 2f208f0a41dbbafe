use std::cell::Cell;

use crate::foundation::core::{Rect, Size};

/// A laid-out element whose on-screen box can be queried.
pub trait LayoutElement {
    /// Bounding box in viewport pixel coordinates (origin top-left, Y down).
    fn bounding_client_rect(&self) -> Rect;
}

/// The visible area of the page. Read live on every query; never cache the result across frames.
pub trait Viewport {
    fn size(&self) -> Size;
}

/// An element with a settable box, used by headless drivers and tests.
#[derive(Debug)]
pub struct StaticElement {
    rect: Cell<Rect>,
}

impl StaticElement {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: Cell::new(rect),
        }
    }

    /// Move or resize the element, e.g. to emulate scrolling or a layout change.
    pub fn set_rect(&self, rect: Rect) {
        self.rect.set(rect);
    }
}

impl LayoutElement for StaticElement {
    fn bounding_client_rect(&self) -> Rect {
        self.rect.get()
    }
}

/// A viewport whose size only changes when told to.
#[derive(Debug)]
pub struct FixedViewport {
    size: Cell<Size>,
}

impl FixedViewport {
    pub fn new(size: Size) -> Self {
        Self {
            size: Cell::new(size),
        }
    }

    pub fn resize(&self, size: Size) {
        self.size.set(size);
    }
}

impl Viewport for FixedViewport {
    fn size(&self) -> Size {
        self.size.get()
    }
}
