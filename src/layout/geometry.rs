use serde::Serialize;

use crate::model::WordSize;

/// Axis-aligned box described by its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Usable region of a square tile centered on the origin.
    pub fn for_tile(tile_size: f64, padding_x: f64, padding_y: f64) -> Self {
        Self::new(
            0.0,
            0.0,
            (tile_size - 2.0 * padding_x).max(0.0),
            (tile_size - 2.0 * padding_y).max(0.0),
        )
    }

    pub fn centered(x: f64, y: f64, size: WordSize) -> Self {
        Self::new(x, y, size.width, size.height)
    }

    /// Strict overlap: boxes that only share an edge do not collide.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        2.0 * (self.x - other.x).abs() < self.width + other.width
            && 2.0 * (self.y - other.y).abs() < self.height + other.height
    }

    pub fn outside(&self, bounds: &BoundingBox) -> bool {
        self.x + self.width / 2.0 > bounds.x + bounds.width / 2.0
            || self.x - self.width / 2.0 < bounds.x - bounds.width / 2.0
            || self.y + self.height / 2.0 > bounds.y + bounds.height / 2.0
            || self.y - self.height / 2.0 < bounds.y - bounds.height / 2.0
    }
}
