//! Persistence collaborators.
//!
//! The editor and viewer never talk to a backend directly; they go through
//! [`ProjectStore`]. Two implementations ship with the crate:
//!
//! - [`MemoryStore`]: keeps a [`ProjectData`] in memory, can be told to
//!   reject saves (used in tests and demos)
//! - [`JsonProjectStore`]: a project JSON file on disk
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hotmap::store::{JsonProjectStore, ProjectStore};
//!
//! let mut store = JsonProjectStore::open("harbour.json")?;
//! let hotspots = store.load_hotspots("facade-east")?;
//! store.save_hotspots("facade-east", &hotspots)?;
//! ```

mod error;
mod json;
mod memory;
mod project;

pub use error::StoreError;
pub use json::JsonProjectStore;
pub use memory::MemoryStore;
pub use project::{ProjectData, ProjectMetadata};

use crate::model::{Asset, Hotspot, Unit, View};

/// Backend that loads and saves project data.
pub trait ProjectStore {
    /// All hotspots of a view.
    fn load_hotspots(&self, view_id: &str) -> Result<Vec<Hotspot>, StoreError>;

    /// Replace the complete hotspot list of a view.
    fn save_hotspots(&mut self, view_id: &str, hotspots: &[Hotspot]) -> Result<(), StoreError>;

    /// All views of a project.
    fn load_views(&self, project_id: &str) -> Result<Vec<View>, StoreError>;

    /// All units of a project.
    fn load_units(&self, project_id: &str) -> Result<Vec<Unit>, StoreError>;

    /// All assets of a project.
    fn load_assets(&self, project_id: &str) -> Result<Vec<Asset>, StoreError>;

    /// Delete a view with its hotspots, re-parenting its children.
    fn delete_view(&mut self, view_id: &str) -> Result<View, StoreError>;
}

/// Project-scoped records of a loaded document.
///
/// A document holds exactly one project; asking for another id yields nothing.
fn scoped<T: Clone>(data: &ProjectData, project_id: &str, items: &[T]) -> Vec<T> {
    if data.project_id() == project_id {
        items.to_vec()
    } else {
        log::debug!(
            "Requested project {} but store holds {}",
            project_id,
            data.project_id()
        );
        Vec::new()
    }
}
