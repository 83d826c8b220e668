use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
    #[error("invalid level range: min {min} must not exceed max {max} and both must be finite")]
    InvalidRange { min: f64, max: f64 },

    #[error("measurement for {word:?} must be positive, got {width}x{height}")]
    InvalidMeasurement {
        word: String,
        width: f64,
        height: f64,
    },

    #[error("tag #{index} ({text:?}) has invalid count {count}")]
    InvalidTag {
        index: usize,
        text: String,
        count: f64,
    },

    #[error("font bounds must be finite, got {min_font}..{max_font}")]
    InvalidFontBounds { min_font: f64, max_font: f64 },
}

pub type Result<T> = std::result::Result<T, LayoutError>;
