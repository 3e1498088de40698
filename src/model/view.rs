//! Views: the image nodes of a project's navigation tree.

use serde::{Deserialize, Serialize};

use super::coordinate::ImageSize;
use super::unit::UnitId;

/// Unique identifier for a view.
pub type ViewId = String;

/// Unique identifier for a project.
pub type ProjectId = String;

/// What a view image shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    #[default]
    Overview,
    Facade,
    Floorplan,
}

impl ViewType {
    pub fn name(&self) -> &'static str {
        match self {
            ViewType::Overview => "Overview",
            ViewType::Facade => "Facade",
            ViewType::Floorplan => "Floorplan",
        }
    }
}

/// One image node in the view tree.
///
/// Views with no parent are the entry points of a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub id: ViewId,
    pub project_id: ProjectId,
    #[serde(rename = "type", default)]
    pub kind: ViewType,
    pub title: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub parent_id: Option<ViewId>,
    /// Units associated with the view, independent of hotspot links.
    #[serde(default)]
    pub unit_ids: Vec<UnitId>,
    /// Pixel dimensions of the image, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_size: Option<ImageSize>,
}

impl View {
    pub fn new(
        id: impl Into<ViewId>,
        project_id: impl Into<ProjectId>,
        kind: ViewType,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            kind,
            title: title.into(),
            image_url: String::new(),
            parent_id: None,
            unit_ids: Vec::new(),
            image_size: None,
        }
    }

    pub fn with_parent(mut self, parent_id: impl Into<ViewId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = url.into();
        self
    }

    pub fn with_image_size(mut self, size: ImageSize) -> Self {
        self.image_size = Some(size);
        self
    }

    /// Roots have no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}
