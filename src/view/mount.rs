use std::collections::BTreeMap;
use std::rc::Rc;

use crate::animation::interpolation::{
    InterpolationLoop, LoopDeps, LoopOpts, LoopPhase, LoopStats,
};
use crate::animation::state::AnimationStore;
use crate::foundation::core::Smoothing;
use crate::foundation::error::{ViewError, ViewResult};
use crate::geometry::anchor::{AnchorRef, TrackedAnchor};
use crate::geometry::layout::{LayoutElement, Viewport};
use crate::render::proxy::{ProxyProps, ProxyRegistry, RegisterOpts};
use crate::render::surface::RenderSurface;
use crate::schedule::frame::FrameScheduler;
use crate::visibility::tracker::{VisibilityOpts, VisibilityTracker};

/// Props a page passes to the persistent view element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ViewProps {
    /// Identifier shared by every page that shows the same persistent visual.
    pub id: String,
    #[serde(default)]
    pub smoothing: Smoothing,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub style: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
}

impl ViewProps {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            smoothing: Smoothing::DEFAULT,
            class_name: None,
            style: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_smoothing(mut self, smoothing: Smoothing) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<String>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn validate(&self) -> ViewResult<()> {
        if self.id.trim().is_empty() {
            return Err(ViewError::validation("view id must not be empty"));
        }
        Ok(())
    }
}

/// Everything a mounted view shares with the rest of the application: the animation store, the
/// proxy registry, and the scheduler/surface/viewport collaborators.
///
/// Clones share all of it. Build one per application and hand it to every page.
#[derive(Clone)]
pub struct ViewRuntime {
    pub store: AnimationStore,
    pub registry: ProxyRegistry,
    pub scheduler: Rc<dyn FrameScheduler>,
    pub surface: Rc<dyn RenderSurface>,
    pub viewport: Rc<dyn Viewport>,
    pub visibility: VisibilityOpts,
    pub request_redraw: bool,
}

impl ViewRuntime {
    /// Runtime backed by the global animation store and a fresh registry.
    pub fn new(
        scheduler: Rc<dyn FrameScheduler>,
        surface: Rc<dyn RenderSurface>,
        viewport: Rc<dyn Viewport>,
    ) -> Self {
        Self {
            store: AnimationStore::global(),
            registry: ProxyRegistry::new(),
            scheduler,
            surface,
            viewport,
            visibility: VisibilityOpts::default(),
            request_redraw: true,
        }
    }

    pub fn with_store(mut self, store: AnimationStore) -> Self {
        self.store = store;
        self
    }

    pub fn with_registry(mut self, registry: ProxyRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_visibility(mut self, visibility: VisibilityOpts) -> Self {
        self.visibility = visibility;
        self
    }

    /// Mount the persistent view for one page.
    ///
    /// Registers (or reuses) the proxy keyed by `props.id`, seeded with the current shared state,
    /// and starts the interpolation loop. The page attaches its element to the returned view once
    /// it is laid out.
    pub fn mount(&self, props: ViewProps) -> ViewResult<MountedView> {
        props.validate()?;
        let visibility = self.visibility.validate()?;

        // A remount keeps the object's visibility until the new anchor is sampled.
        let visible = self
            .registry
            .get(&props.id)
            .is_some_and(|existing| existing.props.visible);
        let initial = {
            let state = self.store.get_state();
            let st = state.borrow();
            ProxyProps {
                position: st.position,
                scale: st.scale,
                visible,
            }
        };
        let proxy = self
            .registry
            .register(props.id.clone(), initial, RegisterOpts::persistent(props.id.clone()));

        let anchor = TrackedAnchor::new(props.id.clone());
        let tracker = VisibilityTracker::track(anchor.element.clone(), visibility);
        let deps = LoopDeps {
            store: self.store.clone(),
            scheduler: Rc::clone(&self.scheduler),
            surface: Rc::clone(&self.surface),
            viewport: Rc::clone(&self.viewport),
        };
        let looper = InterpolationLoop::spawn(
            deps,
            props.id.clone(),
            anchor.element.clone(),
            tracker,
            proxy,
            LoopOpts {
                smoothing: props.smoothing,
                request_redraw: self.request_redraw,
            },
        );
        tracing::debug!(id = %props.id, "persistent view mounted");

        Ok(MountedView {
            props,
            anchor,
            looper,
        })
    }
}

/// A mounted persistent view. Dropping it is the unmount: the loop is cancelled and the anchor
/// detached, while the shared state and the proxy registration stay alive for the next mount.
#[derive(Debug)]
pub struct MountedView {
    props: ViewProps,
    anchor: TrackedAnchor,
    looper: InterpolationLoop,
}

impl MountedView {
    pub fn anchor(&self) -> &AnchorRef {
        &self.anchor.element
    }

    pub fn attach(&self, element: Rc<dyn LayoutElement>) {
        self.anchor.element.attach(element);
    }

    pub fn detach(&self) {
        self.anchor.element.detach();
    }

    pub fn id(&self) -> &str {
        &self.anchor.id
    }

    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    pub fn class_name(&self) -> Option<&str> {
        self.props.class_name.as_deref()
    }

    pub fn style(&self) -> &BTreeMap<String, String> {
        &self.props.style
    }

    pub fn children(&self) -> &[String] {
        &self.props.children
    }

    pub fn phase(&self) -> LoopPhase {
        self.looper.phase()
    }

    pub fn stats(&self) -> LoopStats {
        self.looper.stats()
    }

    pub fn is_active(&self) -> bool {
        self.looper.is_active()
    }

    pub fn unmount(self) {
        drop(self);
    }
}

impl Drop for MountedView {
    fn drop(&mut self) {
        self.looper.cancel();
        self.anchor.element.detach();
        tracing::debug!(id = %self.anchor.id, "persistent view unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/mount.rs"]
mod tests;
