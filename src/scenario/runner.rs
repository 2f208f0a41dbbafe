use std::rc::Rc;

use crate::animation::state::AnimationStore;
use crate::foundation::core::Vec3;
use crate::foundation::error::{ViewError, ViewResult};
use crate::geometry::layout::{FixedViewport, StaticElement};
use crate::render::proxy::ProxyObjectId;
use crate::render::surface::InvalidationCounter;
use crate::scenario::model::{MountOrder, Scenario};
use crate::schedule::frame::ManualScheduler;
use crate::view::mount::{MountedView, ViewProps, ViewRuntime};

/// Proxy state observed by the render surface after one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameRecord {
    pub frame: u64,
    pub page: String,
    pub key: String,
    pub object: ProxyObjectId,
    pub position: Vec3,
    pub scale: Vec3,
    pub visible: bool,
    pub anchored: bool,
    pub redraws: u64,
}

/// Drive a scenario headlessly with a manual scheduler and an isolated animation store.
#[tracing::instrument(skip(scenario), fields(pages = scenario.pages.len()))]
pub fn run_scenario(scenario: &Scenario) -> ViewResult<Vec<FrameRecord>> {
    scenario.validate()?;

    let scheduler = Rc::new(ManualScheduler::new());
    let surface = Rc::new(InvalidationCounter::new());
    let viewport = Rc::new(FixedViewport::new(scenario.viewport.size()));
    let runtime = ViewRuntime::new(scheduler.clone(), surface.clone(), viewport)
        .with_store(AnimationStore::new())
        .with_visibility(scenario.visibility);

    let mut records = Vec::with_capacity(scenario.total_frames() as usize);
    let mut current: Option<MountedView> = None;
    let mut frame = 0u64;

    for page in &scenario.pages {
        let props = ViewProps::new(scenario.view_id(page)).with_smoothing(scenario.smoothing);
        let view = match page.mount {
            MountOrder::UnmountFirst => {
                drop(current.take());
                runtime.mount(props)?
            }
            MountOrder::MountFirst => {
                let view = runtime.mount(props)?;
                drop(current.take());
                view
            }
        };
        tracing::debug!(page = %page.name, id = view.id(), "navigated");

        let element = Rc::new(StaticElement::new(page.rect.to_rect()));
        for local in 0..page.frames {
            if local == page.attach_after {
                view.attach(element.clone());
            }
            scheduler.run_frame();

            let proxy = runtime.registry.get(view.id()).ok_or_else(|| {
                ViewError::config(format!("proxy '{}' missing after mount", view.id()))
            })?;
            records.push(FrameRecord {
                frame,
                page: page.name.clone(),
                key: proxy.key,
                object: proxy.object,
                position: proxy.props.position,
                scale: proxy.props.scale,
                visible: proxy.props.visible,
                anchored: view.anchor().is_attached(),
                redraws: surface.take_requests(),
            });
            frame += 1;
        }
        current = Some(view);
    }
    drop(current);

    Ok(records)
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/runner.rs"]
mod tests;
