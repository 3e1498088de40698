//! Percentage-space coordinates and image dimensions.

use serde::{Deserialize, Serialize};

/// Position as a percentage of the image width/height.
///
/// Each axis is in `[0, 100]` for valid coordinates. This is the persisted,
/// resolution-independent form of every hotspot position.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: f32,
    pub y: f32,
}

impl Coordinate {
    /// Upper bound of each axis.
    pub const MAX: f32 = 100.0;

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Finite and within `[0, 100]` on both axes.
    pub fn is_valid(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && (0.0..=Self::MAX).contains(&self.x)
            && (0.0..=Self::MAX).contains(&self.y)
    }

    /// Clamp both axes into `[0, 100]`.
    pub fn clamped(self) -> Self {
        Self {
            x: self.x.clamp(0.0, Self::MAX),
            y: self.y.clamp(0.0, Self::MAX),
        }
    }

    /// Euclidean distance in percentage units.
    pub fn distance_to(&self, other: &Coordinate) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl From<(f32, f32)> for Coordinate {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of a view image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// An image with a zero side has not loaded yet.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
