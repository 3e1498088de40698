//! Project store backed by a single JSON file.

use std::path::{Path, PathBuf};

use super::{scoped, ProjectData, ProjectStore, StoreError};
use crate::model::{Asset, Hotspot, ImageSize, Unit, View};

/// Reads a project file once and writes it back on every change.
#[derive(Debug)]
pub struct JsonProjectStore {
    path: PathBuf,
    data: ProjectData,
}

impl JsonProjectStore {
    /// Open and validate an existing project file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        log::info!("Opening project {:?}", path);

        if !path.exists() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let json = std::fs::read_to_string(path)?;
        let data: ProjectData = serde_json::from_str(&json)?;
        data.check_version()?;

        log::info!(
            "Loaded project {} with {} views and {} hotspots (format version {})",
            data.project_id(),
            data.views.len(),
            data.total_hotspots(),
            data.version
        );

        Ok(Self {
            path: path.to_path_buf(),
            data,
        })
    }

    /// Create a store for new data, writing it to `path` immediately.
    pub fn create(path: impl AsRef<Path>, data: ProjectData) -> Result<Self, StoreError> {
        let store = Self {
            path: path.as_ref().to_path_buf(),
            data,
        };
        store.write()?;
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &ProjectData {
        &self.data
    }

    fn write(&self) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(&self.data)?;
        std::fs::write(&self.path, json)?;
        log::debug!("Wrote project file {:?}", self.path);
        Ok(())
    }

    /// Pixel size of a view image.
    ///
    /// Uses the recorded size when present, otherwise reads the header of a
    /// local image file relative to the project file. Remote URLs yield None.
    pub fn resolve_image_size(&self, view: &View) -> Option<ImageSize> {
        if let Some(size) = view.image_size {
            return Some(size);
        }
        if view.image_url.is_empty() || view.image_url.contains("://") {
            return None;
        }

        let base = self.path.parent().unwrap_or_else(|| Path::new("."));
        let image_path = base.join(&view.image_url);
        match image::image_dimensions(&image_path) {
            Ok((width, height)) => Some(ImageSize::new(width, height)),
            Err(e) => {
                log::warn!("Could not read image size of {:?}: {}", image_path, e);
                None
            }
        }
    }
}

impl ProjectStore for JsonProjectStore {
    fn load_hotspots(&self, view_id: &str) -> Result<Vec<Hotspot>, StoreError> {
        if !self.data.has_view(view_id) {
            return Err(StoreError::unknown_view(view_id));
        }
        Ok(self.data.hotspots_for(view_id))
    }

    fn save_hotspots(&mut self, view_id: &str, hotspots: &[Hotspot]) -> Result<(), StoreError> {
        let previous = self.data.clone();
        self.data.replace_hotspots(view_id, hotspots)?;
        if let Err(e) = self.write() {
            // Keep memory in sync with what is on disk
            self.data = previous;
            return Err(e);
        }
        Ok(())
    }

    fn load_views(&self, project_id: &str) -> Result<Vec<View>, StoreError> {
        Ok(scoped(&self.data, project_id, &self.data.views))
    }

    fn load_units(&self, project_id: &str) -> Result<Vec<Unit>, StoreError> {
        Ok(scoped(&self.data, project_id, &self.data.units))
    }

    fn load_assets(&self, project_id: &str) -> Result<Vec<Asset>, StoreError> {
        Ok(scoped(&self.data, project_id, &self.data.assets))
    }

    fn delete_view(&mut self, view_id: &str) -> Result<View, StoreError> {
        let previous = self.data.clone();
        let removed = self.data.remove_view(view_id)?;
        if let Err(e) = self.write() {
            self.data = previous;
            return Err(e);
        }
        Ok(removed)
    }
}
