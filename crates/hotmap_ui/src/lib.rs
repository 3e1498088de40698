//! hotmap_ui - input events and interaction state for canvas editors
//!
//! Nothing in this crate knows about hotspots. It describes pointer and
//! keyboard input, screen-space geometry, and generic editing state (linear
//! undo history, pan drags) that the hotspot editor builds on.

pub mod constants;
mod event;
mod layout;
mod state;

pub use event::{Event, KeyCode, KeyModifiers, MouseButton};
pub use layout::{Point, Size};
pub use state::{EditHistory, PanDragState};
