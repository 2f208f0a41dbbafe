use std::path::Path;

use anyhow::Context as _;

use crate::foundation::core::{ClientRect, Smoothing, ViewportDef};
use crate::foundation::error::{ViewError, ViewResult};
use crate::visibility::tracker::VisibilityOpts;

/// Order of the mount/unmount pair when navigating to a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MountOrder {
    /// The previous page's view is torn down before the new one mounts.
    #[default]
    UnmountFirst,
    /// The new page mounts while the previous view is still alive.
    MountFirst,
}

/// One page of a navigation scenario.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PageDef {
    pub name: String,
    /// Where the page lays out its anchor.
    pub rect: ClientRect,
    /// Frames to run while this page is current.
    pub frames: u32,
    /// Frames after mount before the anchor element is attached.
    #[serde(default)]
    pub attach_after: u32,
    #[serde(default)]
    pub mount: MountOrder,
    /// Overrides the scenario-wide view id for this page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// A headless navigation script: pages are visited in order, each mounting the persistent view
/// against its own anchor.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Scenario {
    pub viewport: ViewportDef,
    #[serde(default = "default_view_id")]
    pub id: String,
    #[serde(default)]
    pub smoothing: Smoothing,
    #[serde(default)]
    pub visibility: VisibilityOpts,
    pub pages: Vec<PageDef>,
}

fn default_view_id() -> String {
    "view".to_owned()
}

impl Scenario {
    pub fn from_json_str(s: &str) -> ViewResult<Self> {
        let scenario: Scenario = serde_json::from_str(s)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn from_path(path: impl AsRef<Path>) -> ViewResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read scenario '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> ViewResult<()> {
        self.viewport.validate()?;
        self.visibility.validate()?;
        if self.pages.is_empty() {
            return Err(ViewError::config("scenario must contain at least one page"));
        }
        for page in &self.pages {
            if page.frames == 0 {
                return Err(ViewError::config(format!(
                    "page '{}' must run at least one frame",
                    page.name
                )));
            }
            if page.rect.width < 0.0 || page.rect.height < 0.0 {
                return Err(ViewError::config(format!(
                    "page '{}' has a negative anchor size",
                    page.name
                )));
            }
            if self.view_id(page).trim().is_empty() {
                return Err(ViewError::config(format!(
                    "page '{}' has an empty view id",
                    page.name
                )));
            }
        }
        Ok(())
    }

    pub fn view_id<'a>(&'a self, page: &'a PageDef) -> &'a str {
        page.id.as_deref().unwrap_or(&self.id)
    }

    pub fn total_frames(&self) -> u64 {
        self.pages.iter().map(|p| u64::from(p.frames)).sum()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/model.rs"]
mod tests;
