//! Hotspot types: regions and point markers drawn over a view image.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::asset::AssetId;
use super::coordinate::Coordinate;
use super::unit::{UnitId, UnitStatus};
use super::view::ViewId;
use crate::geometry;

/// Unique identifier for a hotspot.
pub type HotspotId = String;

/// Minimum number of vertices required for a valid polygon.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// The kinds of hotspot a user can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotKind {
    /// Clickable region bounded by a polygon
    Polygon,
    /// Information point marker
    Info,
    /// Camera viewpoint marker
    Camera,
}

impl HotspotKind {
    /// Get the display name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            HotspotKind::Polygon => "Area",
            HotspotKind::Info => "Info Point",
            HotspotKind::Camera => "Camera Point",
        }
    }

    /// Generated label for the `n`-th hotspot in a view, e.g. "Area 3".
    pub fn default_label(&self, n: usize) -> String {
        format!("{} {}", self.name(), n)
    }

    /// Get all hotspot kinds.
    pub fn all() -> &'static [HotspotKind] {
        &[HotspotKind::Polygon, HotspotKind::Info, HotspotKind::Camera]
    }

    /// Point kinds are placed with a single click.
    pub fn is_point(&self) -> bool {
        !matches!(self, HotspotKind::Polygon)
    }
}

/// Geometry of a hotspot, in percentage space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum HotspotShape {
    /// Closed region. Vertex order defines the boundary.
    Polygon {
        vertices: Vec<Coordinate>,
        #[serde(default)]
        status: UnitStatus,
    },
    /// Information marker.
    Info { position: Coordinate },
    /// Camera marker, optionally tied to polygons visible from it.
    Camera {
        position: Coordinate,
        #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
        linked_hotspots: BTreeSet<HotspotId>,
    },
}

impl HotspotShape {
    /// Build the shape for a finished drawing of the given kind.
    ///
    /// Point kinds take the first coordinate; returns None when there is none.
    pub fn from_drawing(kind: HotspotKind, coordinates: Vec<Coordinate>) -> Option<Self> {
        match kind {
            HotspotKind::Polygon => Some(HotspotShape::Polygon {
                vertices: coordinates,
                status: UnitStatus::default(),
            }),
            HotspotKind::Info => coordinates
                .first()
                .map(|position| HotspotShape::Info { position: *position }),
            HotspotKind::Camera => coordinates.first().map(|position| HotspotShape::Camera {
                position: *position,
                linked_hotspots: BTreeSet::new(),
            }),
        }
    }

    pub fn kind(&self) -> HotspotKind {
        match self {
            HotspotShape::Polygon { .. } => HotspotKind::Polygon,
            HotspotShape::Info { .. } => HotspotKind::Info,
            HotspotShape::Camera { .. } => HotspotKind::Camera,
        }
    }

    /// All coordinates of the shape: the vertices of a polygon, or the single
    /// position of a point marker.
    pub fn coordinates(&self) -> &[Coordinate] {
        match self {
            HotspotShape::Polygon { vertices, .. } => vertices,
            HotspotShape::Info { position } | HotspotShape::Camera { position, .. } => {
                std::slice::from_ref(position)
            }
        }
    }

    /// Replace the coordinates of the shape.
    ///
    /// Point shapes only take the first coordinate. Returns false (and leaves
    /// the shape untouched) when a point shape is given no coordinates.
    pub fn set_coordinates(&mut self, coordinates: Vec<Coordinate>) -> bool {
        match self {
            HotspotShape::Polygon { vertices, .. } => {
                *vertices = coordinates;
                true
            }
            HotspotShape::Info { position } | HotspotShape::Camera { position, .. } => {
                match coordinates.first() {
                    Some(first) => {
                        *position = *first;
                        true
                    }
                    None => false,
                }
            }
        }
    }

    /// Check if a point is inside this shape.
    ///
    /// Polygon edges count as inside. Point markers are hit within
    /// `marker_radius` percentage units.
    pub fn contains_point(&self, point: Coordinate, marker_radius: f32) -> bool {
        match self {
            HotspotShape::Polygon { vertices, .. } => geometry::point_in_polygon(point, vertices),
            HotspotShape::Info { position } | HotspotShape::Camera { position, .. } => {
                position.distance_to(&point) <= marker_radius
            }
        }
    }
}

/// Where a hotspot leads when activated.
///
/// At most one target can be set; picking a new one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum HotspotLink {
    #[default]
    None,
    View(ViewId),
    Unit(UnitId),
    Asset(AssetId),
}

impl HotspotLink {
    pub fn is_none(&self) -> bool {
        matches!(self, HotspotLink::None)
    }

    pub fn unit_id(&self) -> Option<&UnitId> {
        match self {
            HotspotLink::Unit(id) => Some(id),
            _ => None,
        }
    }
}

/// Rendering style of a hotspot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HotspotStyle {
    /// RGB color
    pub color: [u8; 3],
    /// Fill opacity in `[0, 1]`
    pub opacity: f32,
}

impl HotspotStyle {
    pub fn new(color: [u8; 3], opacity: f32) -> Self {
        Self {
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    /// Built-in style for freshly drawn hotspots of a kind.
    pub fn default_for(kind: HotspotKind) -> Self {
        match kind {
            HotspotKind::Polygon => Self::new([59, 130, 246], 0.35),
            HotspotKind::Info => Self::new([245, 158, 11], 0.9),
            HotspotKind::Camera => Self::new([139, 92, 246], 0.9),
        }
    }

    /// Color as a `#rrggbb` string.
    pub fn hex(&self) -> String {
        let [r, g, b] = self.color;
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// A hotspot placed on a view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Unique identifier, immutable.
    pub id: HotspotId,
    /// Owning view.
    pub view_id: ViewId,
    /// Display name.
    pub label: String,
    /// Navigation target.
    #[serde(default)]
    pub link: HotspotLink,
    /// Rendering style.
    pub style: HotspotStyle,
    /// Geometry; its variant is the hotspot type and never changes.
    #[serde(flatten)]
    pub shape: HotspotShape,
}

impl Hotspot {
    /// Create a hotspot with no link.
    pub fn new(
        id: impl Into<HotspotId>,
        view_id: impl Into<ViewId>,
        label: impl Into<String>,
        shape: HotspotShape,
    ) -> Self {
        let style = HotspotStyle::default_for(shape.kind());
        Self {
            id: id.into(),
            view_id: view_id.into(),
            label: label.into(),
            link: HotspotLink::None,
            style,
            shape,
        }
    }

    /// Convenience constructor for a polygon hotspot.
    pub fn polygon(
        id: impl Into<HotspotId>,
        view_id: impl Into<ViewId>,
        label: impl Into<String>,
        vertices: Vec<Coordinate>,
    ) -> Self {
        Self::new(
            id,
            view_id,
            label,
            HotspotShape::Polygon {
                vertices,
                status: UnitStatus::default(),
            },
        )
    }

    /// Set the link target.
    pub fn with_link(mut self, link: HotspotLink) -> Self {
        self.link = link;
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: HotspotStyle) -> Self {
        self.style = style;
        self
    }

    pub fn kind(&self) -> HotspotKind {
        self.shape.kind()
    }

    pub fn is_polygon(&self) -> bool {
        matches!(self.shape, HotspotShape::Polygon { .. })
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        self.shape.coordinates()
    }

    /// Sale status, only meaningful for polygons.
    pub fn status(&self) -> Option<UnitStatus> {
        match &self.shape {
            HotspotShape::Polygon { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Ids of polygons highlighted from this camera. None for other kinds.
    pub fn linked_hotspots(&self) -> Option<&BTreeSet<HotspotId>> {
        match &self.shape {
            HotspotShape::Camera {
                linked_hotspots, ..
            } => Some(linked_hotspots),
            _ => None,
        }
    }

    /// Label anchor: the centroid of a polygon or the marker position.
    pub fn anchor(&self) -> Option<Coordinate> {
        geometry::centroid(self.coordinates())
    }
}
