//! In-memory project store.

use super::{scoped, ProjectData, ProjectStore, StoreError};
use crate::model::{Asset, Hotspot, Unit, View};

/// Keeps a whole project in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: ProjectData,
    reject_saves: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new(data: ProjectData) -> Self {
        Self {
            data,
            reject_saves: false,
            saves: 0,
        }
    }

    /// Make every following save fail with [`StoreError::Rejected`].
    pub fn set_reject_saves(&mut self, reject: bool) {
        self.reject_saves = reject;
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn data(&self) -> &ProjectData {
        &self.data
    }

    pub fn into_data(self) -> ProjectData {
        self.data
    }
}

impl ProjectStore for MemoryStore {
    fn load_hotspots(&self, view_id: &str) -> Result<Vec<Hotspot>, StoreError> {
        if !self.data.has_view(view_id) {
            return Err(StoreError::unknown_view(view_id));
        }
        Ok(self.data.hotspots_for(view_id))
    }

    fn save_hotspots(&mut self, view_id: &str, hotspots: &[Hotspot]) -> Result<(), StoreError> {
        if self.reject_saves {
            log::warn!("Memory store rejecting save of view {}", view_id);
            return Err(StoreError::Rejected("store is read-only".to_string()));
        }
        self.data.replace_hotspots(view_id, hotspots)?;
        self.saves += 1;
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
        self.data.remove_view(view_id)
    }
}
