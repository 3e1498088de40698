//! Read-only viewer scene.
//!
//! A [`ViewerScene`] is what a viewer host renders for one view: clickable
//! regions and markers with their resolved actions, the hovered hotspot,
//! the unit card to show for it and the regions a hovered camera lights up.
//! Nothing here mutates hotspots.

use std::collections::BTreeSet;

use crate::constants::{
    HIGHLIGHT_OPACITY_BOOST, HIGHLIGHT_STROKE_WIDTH, REGION_STROKE_WIDTH, VIEWER_MARKER_RADIUS,
};
use crate::geometry;
use crate::model::{
    Coordinate, Hotspot, HotspotId, HotspotKind, HotspotStyle, ImageSize, UnitStatus, UnitSummary,
    View, ViewId,
};
use crate::navigator::{camera_highlight, Catalog, HotspotAction};

/// Geometry of a scene item in percentage space.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneShape {
    /// Filled and stroked polygon
    Region { vertices: Vec<Coordinate> },
    /// Circle marker for info and camera hotspots
    Marker { position: Coordinate },
}

/// One clickable hotspot of the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub hotspot_id: HotspotId,
    pub label: String,
    pub kind: HotspotKind,
    pub shape: SceneShape,
    pub style: HotspotStyle,
    /// Sale status badge, polygons only
    pub status: Option<UnitStatus>,
    /// Action on click, broken links already resolved to `None`
    pub action: HotspotAction,
    /// Card data of the linked unit
    pub unit: Option<UnitSummary>,
    /// Regions of this view a camera highlights
    pub highlights: BTreeSet<HotspotId>,
}

impl SceneItem {
    /// `y_scale` is image height over width, so markers stay round on screen.
    fn contains(&self, point: Coordinate, marker_radius: f32, y_scale: f32) -> bool {
        match &self.shape {
            SceneShape::Region { vertices } => geometry::point_in_polygon(point, vertices),
            SceneShape::Marker { position } => {
                let dx = point.x - position.x;
                let dy = (point.y - position.y) * y_scale;
                dx.hypot(dy) <= marker_radius
            }
        }
    }

    pub fn is_marker(&self) -> bool {
        matches!(self.shape, SceneShape::Marker { .. })
    }

    /// Status badge color of a region.
    pub fn badge_color(&self) -> Option<[u8; 3]> {
        self.status.map(|s| s.badge_color())
    }
}

/// How a host should paint an item right now.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub color: [u8; 3],
    pub opacity: f32,
    pub stroke_width: f32,
    pub emphasized: bool,
}

#[derive(Debug, Clone)]
pub struct ViewerScene {
    view_id: ViewId,
    items: Vec<SceneItem>,
    hovered: Option<HotspotId>,
    marker_radius: f32,
    y_scale: f32,
}

impl ViewerScene {
    /// Build the scene of `view`. Hotspots owned by other views are skipped.
    pub fn new(view: &View, hotspots: &[Hotspot], catalog: &Catalog) -> Self {
        let region_ids: BTreeSet<&str> = hotspots
            .iter()
            .filter(|h| h.view_id == view.id && h.is_polygon())
            .map(|h| h.id.as_str())
            .collect();

        let items: Vec<SceneItem> = hotspots
            .iter()
            .filter(|h| {
                let own = h.view_id == view.id;
                if !own {
                    log::warn!("Hotspot {} belongs to view {}, not {}", h.id, h.view_id, view.id);
                }
                own
            })
            .map(|h| Self::build_item(h, catalog, &region_ids))
            .collect();

        log::debug!("Viewer scene for {}: {} items", view.id, items.len());
        Self {
            view_id: view.id.clone(),
            items,
            hovered: None,
            marker_radius: VIEWER_MARKER_RADIUS,
            y_scale: Self::y_scale_of(view.image_size),
        }
    }

    fn y_scale_of(size: Option<ImageSize>) -> f32 {
        match size {
            Some(size) if !size.is_empty() => size.height as f32 / size.width as f32,
            _ => 1.0,
        }
    }

    fn build_item(hotspot: &Hotspot, catalog: &Catalog, region_ids: &BTreeSet<&str>) -> SceneItem {
        let action = catalog.resolve(hotspot);
        let unit = match &action {
            HotspotAction::OpenUnit(id) => catalog.unit(id).map(|u| u.summary()),
            _ => None,
        };
        let shape = match hotspot.kind() {
            HotspotKind::Polygon => SceneShape::Region {
                vertices: hotspot.coordinates().to_vec(),
            },
            HotspotKind::Info | HotspotKind::Camera => SceneShape::Marker {
                position: hotspot.coordinates().first().copied().unwrap_or_default(),
            },
        };
        // Only regions of the same view can light up
        let highlights = camera_highlight(hotspot)
            .into_iter()
            .filter(|id| region_ids.contains(id.as_str()))
            .collect();

        SceneItem {
            hotspot_id: hotspot.id.clone(),
            label: hotspot.label.clone(),
            kind: hotspot.kind(),
            shape,
            style: hotspot.style,
            status: hotspot.status(),
            action,
            unit,
            highlights,
        }
    }

    /// Marker hit radius, in percent of the image width.
    pub fn with_marker_radius(mut self, radius: f32) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Image size for views whose size was not known when the scene was built.
    pub fn with_image_size(mut self, size: ImageSize) -> Self {
        self.y_scale = Self::y_scale_of(Some(size));
        self
    }

    pub fn view_id(&self) -> &str {
        &self.view_id
    }

    /// Items in paint order.
    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> Option<&SceneItem> {
        self.items.iter().find(|i| i.hotspot_id == id)
    }

    /// Top-most item at a percentage point: markers first, then later
    /// items before earlier ones.
    pub fn hit_test(&self, point: Coordinate) -> Option<&SceneItem> {
        let (radius, y_scale) = (self.marker_radius, self.y_scale);
        self.items
            .iter()
            .rev()
            .filter(|i| i.is_marker())
            .find(|i| i.contains(point, radius, y_scale))
            .or_else(|| {
                self.items
                    .iter()
                    .rev()
                    .filter(|i| !i.is_marker())
                    .find(|i| i.contains(point, radius, y_scale))
            })
    }

    /// Update the hover from a pointer position. Returns true if it changed.
    pub fn hover_at(&mut self, point: Coordinate) -> bool {
        let hit = self.hit_test(point).map(|i| i.hotspot_id.clone());
        self.replace_hover(hit)
    }

    /// Hover a hotspot by id, e.g. from a list outside the canvas.
    pub fn set_hovered(&mut self, id: Option<&str>) -> bool {
        let id = id.filter(|id| self.item(id).is_some()).map(str::to_string);
        self.replace_hover(id)
    }

    pub fn clear_hover(&mut self) -> bool {
        self.replace_hover(None)
    }

    fn replace_hover(&mut self, id: Option<HotspotId>) -> bool {
        if self.hovered == id {
            return false;
        }
        log::trace!("Hover {:?} -> {:?}", self.hovered, id);
        self.hovered = id;
        true
    }

    pub fn hovered(&self) -> Option<&SceneItem> {
        let id = self.hovered.as_deref()?;
        self.item(id)
    }

    /// Unit card for the hovered hotspot.
    pub fn unit_card(&self) -> Option<&UnitSummary> {
        self.hovered()?.unit.as_ref()
    }

    /// Regions lit up by the hovered camera. Empty when no camera is hovered.
    pub fn highlighted(&self) -> BTreeSet<HotspotId> {
        self.hovered()
            .map(|i| i.highlights.clone())
            .unwrap_or_default()
    }

    /// Action for a click at a percentage point.
    pub fn click_at(&self, point: Coordinate) -> HotspotAction {
        match self.hit_test(point) {
            Some(item) => {
                log::debug!("Clicked {} -> {:?}", item.hotspot_id, item.action);
                item.action.clone()
            }
            None => HotspotAction::None,
        }
    }

    /// Paint style of an item given the current hover.
    pub fn render_style(&self, id: &str) -> Option<RenderStyle> {
        let item = self.item(id)?;
        let hovered = self.hovered.as_deref() == Some(id);
        let highlighted = self
            .hovered()
            .is_some_and(|h| h.highlights.contains(id));
        let emphasized = hovered || highlighted;

        let opacity = if highlighted {
            (item.style.opacity * HIGHLIGHT_OPACITY_BOOST).min(1.0)
        } else {
            item.style.opacity
        };
        Some(RenderStyle {
            color: item.style.color,
            opacity,
            stroke_width: if emphasized {
                HIGHLIGHT_STROKE_WIDTH
            } else {
                REGION_STROKE_WIDTH
            },
            emphasized,
        })
    }
}
