use serde::{Deserialize, Serialize};

/// One word and how often it was seen inside a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub text: String,
    pub count: f64,
}

impl Tag {
    pub fn new(text: impl Into<String>, count: f64) -> Self {
        Self {
            text: text.into(),
            count,
        }
    }
}

/// Frequency extremes considered typical at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelRange {
    pub min: f64,
    pub max: f64,
}

impl LevelRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn clamp(&self, frequency: f64) -> f64 {
        frequency.min(self.max).max(self.min)
    }
}

/// Pixel box needed to draw a word at a given font size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WordSize {
    pub width: f64,
    pub height: f64,
}

impl WordSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Map tile address. `y` counts from the bottom (TMS scheme).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
    pub z: u8,
}

impl TileCoord {
    pub const fn new(x: u32, y: u32, z: u8) -> Self {
        Self { x, y, z }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_range_clamps_to_bounds() {
        let range = LevelRange::new(1.0, 50.0);
        assert_eq!(range.clamp(501.0), 50.0);
        assert_eq!(range.clamp(0.0), 1.0);
        assert_eq!(range.clamp(9.0), 9.0);
    }

    #[test]
    fn level_range_rejects_inverted_and_non_finite() {
        assert!(LevelRange::new(1.0, 1.0).is_valid());
        assert!(!LevelRange::new(5.0, 1.0).is_valid());
        assert!(!LevelRange::new(f64::NAN, 1.0).is_valid());
        assert!(!LevelRange::new(1.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn word_size_needs_positive_area() {
        assert!(WordSize::new(40.0, 20.0).is_drawable());
        assert!(!WordSize::new(0.0, 20.0).is_drawable());
        assert!(!WordSize::new(40.0, -1.0).is_drawable());
        assert!(!WordSize::new(f64::NAN, 20.0).is_drawable());
    }
}
