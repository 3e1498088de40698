//! Editor error types.

use thiserror::Error;

use crate::geometry::GeometryError;
use crate::model::{HotspotId, HotspotKind, MIN_POLYGON_VERTICES, UnitId};
use crate::store::StoreError;

/// Errors surfaced by editing operations.
///
/// Every variant except [`EditorError::Persistence`] is a validation error:
/// the operation was refused and the hotspot set is unchanged.
#[derive(Error, Debug)]
pub enum EditorError {
    /// Finishing a drawing without enough points
    #[error("A polygon needs at least {min} points (got {count})", min = MIN_POLYGON_VERTICES)]
    TooFewPoints { count: usize },

    /// Drawing action while no drawing is in progress
    #[error("No drawing in progress")]
    NotDrawing,

    /// Vertex edit refused by the geometry engine
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// The unit is already linked from another hotspot of this view
    #[error("Unit {unit_id} is already linked from hotspot {hotspot_id}")]
    UnitAlreadyLinked { unit_id: UnitId, hotspot_id: HotspotId },

    #[error("Unknown hotspot: {0}")]
    UnknownHotspot(HotspotId),

    /// Operation does not apply to this kind of hotspot
    #[error("Hotspot {id} is not a {expected:?} hotspot")]
    WrongKind { id: HotspotId, expected: HotspotKind },

    /// Camera links must point at another polygon of the same view
    #[error("Camera {camera_id} cannot highlight {target_id}")]
    InvalidCameraLink {
        camera_id: HotspotId,
        target_id: HotspotId,
    },

    /// Image dimensions unknown, positions cannot be converted
    #[error("The view image has not loaded yet")]
    NoImage,

    #[error("No view is open")]
    NoView,

    /// Saving failed; local edits are kept
    #[error("Save failed: {0}")]
    Persistence(#[from] StoreError),
}

impl EditorError {
    /// Validation errors leave the editor unchanged and only need a message.
    pub fn is_validation(&self) -> bool {
        !matches!(self, EditorError::Persistence(_))
    }
}
