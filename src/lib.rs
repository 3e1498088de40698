//! hotmap - hotspot editing and navigation engine
//!
//! Draw, edit and link polygon regions and point markers on building
//! renders, and navigate the resulting tree of views. Positions are stored
//! as percentages of the image size; the editor converts them to screen
//! space under pan and zoom.

pub mod config;
pub mod constants;
pub mod editor;
pub mod geometry;
pub mod keybindings;
pub mod kv_store;
pub mod model;
pub mod navigator;
pub mod store;
pub mod transform;
pub mod viewer;

pub use config::{ConfigError, EditorConfig};
pub use editor::{Editor, EditorError, EditorRequest};
pub use navigator::{Catalog, HotspotAction, NavigationError, Navigator};
pub use store::{JsonProjectStore, MemoryStore, ProjectData, ProjectStore, StoreError};
pub use viewer::ViewerScene;
