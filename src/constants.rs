//! Global constants for the hotspot editor

/// Screen distance (px) within which a vertex or midpoint handle is hit
pub const DEFAULT_HANDLE_HIT_RADIUS: f32 = 8.0;

/// Screen distance (px) within which an info or camera marker is hit
pub const DEFAULT_MARKER_HIT_RADIUS: f32 = 12.0;

/// Marker hit radius in percentage units, for hosts without a transform
pub const VIEWER_MARKER_RADIUS: f32 = 1.5;

/// How long the drawing-start guard stays armed (ms)
pub const DEFAULT_DRAWING_GUARD_MS: u64 = 150;

/// Opacity multiplier for regions highlighted from a hovered camera
pub const HIGHLIGHT_OPACITY_BOOST: f32 = 1.8;

/// Stroke width of regions (px)
pub const REGION_STROKE_WIDTH: f32 = 2.0;

/// Stroke width of highlighted or hovered regions (px)
pub const HIGHLIGHT_STROKE_WIDTH: f32 = 4.0;

/// Key under which the editor config is persisted
pub const CONFIG_STORAGE_KEY: &str = "config";
