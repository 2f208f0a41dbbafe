use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::geometry::layout::LayoutElement;

/// Nullable, shared slot pointing at the element a mounted view tracks.
///
/// The slot does not own the page: the page attaches its element after layout and detaches it
/// during teardown. Readers must tolerate the slot being empty at any frame.
#[derive(Clone, Default)]
pub struct AnchorRef {
    slot: Rc<RefCell<Option<Rc<dyn LayoutElement>>>>,
}

impl AnchorRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, element: Rc<dyn LayoutElement>) {
        *self.slot.borrow_mut() = Some(element);
    }

    pub fn detach(&self) -> Option<Rc<dyn LayoutElement>> {
        self.slot.borrow_mut().take()
    }

    pub fn get(&self) -> Option<Rc<dyn LayoutElement>> {
        self.slot.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.slot.borrow().is_some()
    }
}

impl fmt::Debug for AnchorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnchorRef")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// An anchor slot together with the identifier pages share for it.
#[derive(Clone, Debug)]
pub struct TrackedAnchor {
    pub id: String,
    pub element: AnchorRef,
}

impl TrackedAnchor {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            element: AnchorRef::new(),
        }
    }
}
