//! Data model for views, hotspots, units and assets.

mod asset;
mod coordinate;
mod hotspot;
mod unit;
mod view;

pub use asset::{Asset, AssetId, AssetKind};
pub use coordinate::{Coordinate, ImageSize};
pub use hotspot::{
    Hotspot, HotspotId, HotspotKind, HotspotLink, HotspotShape, HotspotStyle,
    MIN_POLYGON_VERTICES,
};
pub use unit::{Unit, UnitId, UnitStatus, UnitSummary};
pub use view::{ProjectId, View, ViewId, ViewType};
