//! Pointer gesture state for the editor canvas.
//!
//! A gesture starts on pointer-down and ends on pointer-up (or Escape). What
//! the pointer-down landed on decides the gesture, in this order:
//! drawing click, handle drag, hotspot press, canvas pan.

use hotmap_ui::{PanDragState, Point};

use crate::model::{Coordinate, HotspotId};

/// A handle of the selected hotspot under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleHit {
    /// Existing vertex (or the position of a marker)
    Vertex(usize),
    /// Midpoint of the edge starting at vertex `after`
    Midpoint { after: usize },
}

/// In-progress pointer gesture.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    /// Press swallowed by the drawing guard; the matching release is ignored
    Suppressed,
    /// Press while drawing, completes as a drawing click on release
    DrawingClick,
    /// Press on a hotspot; becomes a click on release or a pan once moved
    PressedOnHotspot { id: HotspotId, origin: Point },
    /// Dragging a vertex. `preview` holds the full vertex list being edited
    DraggingVertex {
        hotspot_id: HotspotId,
        vertex_index: usize,
        preview: Vec<Coordinate>,
        /// Vertex came from a midpoint and is not committed yet
        inserted: bool,
        moved: bool,
    },
    /// Panning the canvas
    Panning { drag: PanDragState, moved: bool },
}

impl PointerState {
    pub fn is_idle(&self) -> bool {
        matches!(self, PointerState::Idle)
    }

    /// Drags and pans block undo and redo.
    pub fn is_dragging(&self) -> bool {
        matches!(
            self,
            PointerState::DraggingVertex { .. } | PointerState::Panning { .. }
        )
    }

    /// Preview coordinates of a hotspot being dragged.
    pub fn preview_for(&self, id: &str) -> Option<&[Coordinate]> {
        match self {
            PointerState::DraggingVertex {
                hotspot_id,
                preview,
                ..
            } if hotspot_id == id => Some(preview),
            _ => None,
        }
    }
}

/// Find the handle under `position`.
///
/// Vertices win over midpoints; among several candidates the closest wins.
pub fn hit_handle(
    position: Point,
    vertices: &[(usize, Point)],
    midpoints: &[(usize, Point)],
    radius: f32,
) -> Option<HandleHit> {
    let closest = |handles: &[(usize, Point)]| {
        handles
            .iter()
            .map(|(index, p)| (*index, p.distance_to(position)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    };

    closest(vertices)
        .map(HandleHit::Vertex)
        .or_else(|| closest(midpoints).map(|after| HandleHit::Midpoint { after }))
}
