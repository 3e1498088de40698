//! Sellable units referenced by hotspots and views.

use serde::{Deserialize, Serialize};

use super::view::ProjectId;

/// Unique identifier for a unit.
pub type UnitId = String;

/// Sale status of a unit, also shown on polygon hotspots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnitStatus {
    #[default]
    ForSale,
    Reserved,
    Sold,
    Forthcoming,
}

impl UnitStatus {
    /// Get the display name for this status.
    pub fn name(&self) -> &'static str {
        match self {
            UnitStatus::ForSale => "For sale",
            UnitStatus::Reserved => "Reserved",
            UnitStatus::Sold => "Sold",
            UnitStatus::Forthcoming => "Forthcoming",
        }
    }

    /// Badge color used when rendering a region with this status.
    pub fn badge_color(&self) -> [u8; 3] {
        match self {
            UnitStatus::ForSale => [34, 197, 94],
            UnitStatus::Reserved => [234, 179, 8],
            UnitStatus::Sold => [239, 68, 68],
            UnitStatus::Forthcoming => [148, 163, 184],
        }
    }
}

/// A sellable apartment or house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub project_id: ProjectId,
    pub name: String,
    /// Asking price
    #[serde(default)]
    pub price: Option<f64>,
    /// Floor area in square meters
    #[serde(default)]
    pub size: Option<f32>,
    #[serde(default)]
    pub rooms: Option<u32>,
    /// Monthly fee
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub status: UnitStatus,
}

impl Unit {
    pub fn new(id: impl Into<UnitId>, project_id: impl Into<ProjectId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            project_id: project_id.into(),
            name: name.into(),
            price: None,
            size: None,
            rooms: None,
            fee: None,
            floor: None,
            status: UnitStatus::default(),
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_rooms(mut self, rooms: u32) -> Self {
        self.rooms = Some(rooms);
        self
    }

    pub fn with_status(mut self, status: UnitStatus) -> Self {
        self.status = status;
        self
    }

    /// Card data shown when hovering a hotspot linked to this unit.
    pub fn summary(&self) -> UnitSummary {
        UnitSummary::from(self)
    }
}

/// Hover card projection of a unit.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitSummary {
    pub name: String,
    pub price: Option<f64>,
    pub size: Option<f32>,
    pub rooms: Option<u32>,
    pub fee: Option<f64>,
    pub status: UnitStatus,
}

impl From<&Unit> for UnitSummary {
    fn from(unit: &Unit) -> Self {
        Self {
            name: unit.name.clone(),
            price: unit.price,
            size: unit.size,
            rooms: unit.rooms,
            fee: unit.fee,
            status: unit.status,
        }
    }
}
