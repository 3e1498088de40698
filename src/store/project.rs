//! Serialized project document.
//!
//! # Versioning
//!
//! The file carries a MAJOR.MINOR.PATCH version. While the major version is
//! 0, only files with the same minor version are compatible; other 0.x files
//! are read with a warning.

use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::model::{Asset, Hotspot, ProjectId, Unit, View};
use crate::navigator;

/// Everything a project stores: the view tree, its catalog and all hotspots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectData {
    /// Format version for compatibility checking.
    pub version: String,

    #[serde(default)]
    pub metadata: ProjectMetadata,

    #[serde(default)]
    pub views: Vec<View>,

    #[serde(default)]
    pub units: Vec<Unit>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    /// Hotspots of every view, grouped by `view_id` on access.
    #[serde(default)]
    pub hotspots: Vec<Hotspot>,
}

impl ProjectData {
    /// Current version of the project data format.
    pub const CURRENT_VERSION: &'static str = "0.1.0";

    /// Major version number for compatibility checking.
    pub const VERSION_MAJOR: u32 = 0;

    /// Minor version number.
    pub const VERSION_MINOR: u32 = 1;

    pub fn new(project_id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            version: Self::CURRENT_VERSION.to_string(),
            metadata: ProjectMetadata {
                project_id: project_id.into(),
                name: name.into(),
                tool_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            },
            views: Vec::new(),
            units: Vec::new(),
            assets: Vec::new(),
            hotspots: Vec::new(),
        }
    }

    /// Parse a version string into (major, minor, patch).
    pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return None;
        }
        let major = parts[0].parse().ok()?;
        let minor = parts[1].parse().ok()?;
        let patch = parts[2].parse().ok()?;
        Some((major, minor, patch))
    }

    /// Check if a version is compatible with the current version.
    pub fn is_version_compatible(file_version: &str) -> bool {
        let Some((file_major, file_minor, _)) = Self::parse_version(file_version) else {
            return false;
        };

        if Self::VERSION_MAJOR == 0 {
            file_major == 0 && file_minor == Self::VERSION_MINOR
        } else {
            file_major == Self::VERSION_MAJOR
        }
    }

    /// Check if we can attempt to read a file, possibly with warnings.
    pub fn is_version_readable(file_version: &str) -> bool {
        let Some((file_major, _, _)) = Self::parse_version(file_version) else {
            return false;
        };
        file_major == 0 || file_major == Self::VERSION_MAJOR
    }

    /// Reject unreadable versions, warn about merely incompatible ones.
    pub fn check_version(&self) -> Result<(), StoreError> {
        if !Self::is_version_readable(&self.version) {
            return Err(StoreError::VersionMismatch {
                expected: Self::CURRENT_VERSION.to_string(),
                found: self.version.clone(),
            });
        }
        if !Self::is_version_compatible(&self.version) {
            log::warn!(
                "Project version {} differs from {}, reading anyway",
                self.version,
                Self::CURRENT_VERSION
            );
        }
        Ok(())
    }

    pub fn project_id(&self) -> &str {
        &self.metadata.project_id
    }

    pub fn has_view(&self, view_id: &str) -> bool {
        self.views.iter().any(|v| v.id == view_id)
    }

    /// Hotspots owned by a view, in stored order.
    pub fn hotspots_for(&self, view_id: &str) -> Vec<Hotspot> {
        self.hotspots
            .iter()
            .filter(|h| h.view_id == view_id)
            .cloned()
            .collect()
    }

    /// Replace the complete hotspot list of one view.
    ///
    /// Hotspots are stored with the given view id regardless of their own.
    pub fn replace_hotspots(&mut self, view_id: &str, hotspots: &[Hotspot]) -> Result<(), StoreError> {
        if !self.has_view(view_id) {
            return Err(StoreError::unknown_view(view_id));
        }
        self.hotspots.retain(|h| h.view_id != view_id);
        self.hotspots.extend(hotspots.iter().cloned().map(|mut h| {
            h.view_id = view_id.to_string();
            h
        }));
        log::debug!("Stored {} hotspots for view {}", hotspots.len(), view_id);
        Ok(())
    }

    /// Remove a view and its hotspots; children move up to its parent.
    pub fn remove_view(&mut self, view_id: &str) -> Result<View, StoreError> {
        let removed = navigator::splice_out_view(&mut self.views, view_id)
            .map_err(|_| StoreError::unknown_view(view_id))?;
        let before = self.hotspots.len();
        self.hotspots.retain(|h| h.view_id != view_id);
        log::info!(
            "Deleted view {} and {} of its hotspots",
            view_id,
            before - self.hotspots.len()
        );
        Ok(removed)
    }

    pub fn total_hotspots(&self) -> usize {
        self.hotspots.len()
    }
}

impl Default for ProjectData {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// Project metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectMetadata {
    #[serde(default)]
    pub project_id: ProjectId,

    #[serde(default)]
    pub name: String,

    /// Version of the tool that wrote the file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_version: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinate, ViewType};

    fn project() -> ProjectData {
        let mut data = ProjectData::new("p1", "Harbour Front");
        data.views = vec![
            View::new("root", "p1", ViewType::Overview, "Overview"),
            View::new("east", "p1", ViewType::Facade, "East").with_parent("root"),
            View::new("f1", "p1", ViewType::Floorplan, "Floor 1").with_parent("east"),
        ];
        data.hotspots = vec![
            Hotspot::polygon("a", "root", "Area 1", vec![Coordinate::new(1.0, 1.0)]),
            Hotspot::polygon("b", "east", "Area 1", vec![]),
            Hotspot::polygon("c", "east", "Area 2", vec![]),
        ];
        data
    }

    #[test]
    fn test_version_parsing() {
        assert_eq!(ProjectData::parse_version("0.1.0"), Some((0, 1, 0)));
        assert_eq!(ProjectData::parse_version("1.2"), None);
        assert_eq!(ProjectData::parse_version("a.b.c"), None);
    }

    #[test]
    fn test_version_checks() {
        assert!(ProjectData::is_version_compatible("0.1.7"));
        assert!(!ProjectData::is_version_compatible("0.2.0"));
        assert!(ProjectData::is_version_readable("0.2.0"));
        assert!(!ProjectData::is_version_readable("2.0.0"));

        let mut data = project();
        data.version = "3.0.0".to_string();
        assert!(matches!(
            data.check_version(),
            Err(StoreError::VersionMismatch { .. })
        ));
    }

    #[test]
    fn test_hotspots_for_view() {
        let data = project();
        let east: Vec<_> = data.hotspots_for("east").into_iter().map(|h| h.id).collect();
        assert_eq!(east, vec!["b", "c"]);
        assert!(data.hotspots_for("f1").is_empty());
    }

    #[test]
    fn test_replace_hotspots() {
        let mut data = project();
        let replacement = vec![Hotspot::polygon("d", "elsewhere", "Area 1", vec![])];
        data.replace_hotspots("east", &replacement).unwrap();

        let east = data.hotspots_for("east");
        assert_eq!(east.len(), 1);
        assert_eq!(east[0].id, "d");
        assert_eq!(data.hotspots_for("root").len(), 1);

        assert!(matches!(
            data.replace_hotspots("missing", &[]),
            Err(StoreError::UnknownView { .. })
        ));
    }

    #[test]
    fn test_remove_view_cascades() {
        let mut data = project();
        data.remove_view("east").unwrap();

        assert!(!data.has_view("east"));
        assert_eq!(data.total_hotspots(), 1);
        let floor = data.views.iter().find(|v| v.id == "f1").unwrap();
        assert_eq!(floor.parent_id.as_deref(), Some("root"));

        assert!(data.remove_view("east").is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_metadata() {
        let data = project();
        let json = serde_json::to_string(&data).unwrap();
        let back: ProjectData = serde_json::from_str(&json).unwrap();
        assert_eq!(back.project_id(), "p1");
        assert_eq!(back.views, data.views);
        assert_eq!(back.hotspots, data.hotspots);
    }
}
