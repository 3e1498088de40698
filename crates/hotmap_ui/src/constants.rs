//! Interaction constants shared by canvas editors.

/// Smallest allowed view scale (zoomed out).
pub const ZOOM_MIN: f32 = 0.25;

/// Largest allowed view scale (zoomed in).
pub const ZOOM_MAX: f32 = 4.0;

/// Scale multiplier applied per wheel notch.
pub const ZOOM_FACTOR: f32 = 1.2;

/// Maximum number of snapshots kept by an edit history.
pub const HISTORY_LIMIT: usize = 100;

/// Pointer travel (screen px) before a press turns into a drag.
pub const MIN_DRAG_DISTANCE: f32 = 3.0;
