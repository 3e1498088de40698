//! Media assets a hotspot can open.

use serde::{Deserialize, Serialize};

use super::view::ProjectId;

/// Unique identifier for an asset.
pub type AssetId = String;

/// Kind of media behind an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    #[default]
    Image,
    Video,
    Panorama,
    Document,
}

/// A media file attached to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: AssetId,
    pub project_id: ProjectId,
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub kind: AssetKind,
}

impl Asset {
    pub fn new(
        id: impl Into<AssetId>,
        project_id: impl Into<ProjectId>,
        name: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            url: url.into(),
            kind: AssetKind::default(),
        }
    }

    pub fn with_kind(mut self, kind: AssetKind) -> Self {
        self.kind = kind;
        self
    }
}
