// Frequency → font size mapping. Everything here is pure; equal inputs
// always give bit-identical outputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::LevelRange;

pub const DEFAULT_MIN_FONT_SIZE: f64 = 12.0;
pub const DEFAULT_MAX_FONT_SIZE: f64 = 22.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMethod {
    Linear,
    #[default]
    Log,
}

impl SizingMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SizingMethod::Linear => "linear",
            SizingMethod::Log => "log",
        }
    }
}

impl fmt::Display for SizingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizingMethod {
    type Err = String;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(SizingMethod::Linear),
            "log" => Ok(SizingMethod::Log),
            other => Err(format!("unknown font sizing method: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSpec {
    pub min_font_size: f64,
    pub max_font_size: f64,
    pub method: SizingMethod,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            min_font_size: DEFAULT_MIN_FONT_SIZE,
            max_font_size: DEFAULT_MAX_FONT_SIZE,
            method: SizingMethod::Linear,
        }
    }
}

/// Relative weight of `frequency` inside `[min, max]`, always in `[0, 1]`.
///
/// The frequency is pinned to the range first. A degenerate range
/// (`min == max`) yields 0 for both methods. In log space, values below 1
/// are treated as 1 so a zero count never produces `-inf`.
pub fn scale_factor(frequency: f64, min: f64, max: f64, method: SizingMethod) -> f64 {
    let clamped = LevelRange::new(min, max).clamp(frequency);
    let factor = match method {
        SizingMethod::Linear => {
            let delta = max - min;
            if delta == 0.0 {
                return 0.0;
            }
            (clamped - min) / delta
        }
        SizingMethod::Log => {
            let log_min = min.max(1.0).log10();
            let log_max = max.max(1.0).log10();
            if log_max == log_min {
                return 0.0;
            }
            (clamped.max(1.0).log10() - log_min) / (log_max - log_min)
        }
    };
    factor.clamp(0.0, 1.0)
}

pub fn font_size(frequency: f64, min: f64, max: f64, spec: &FontSpec) -> f64 {
    let factor = scale_factor(frequency, min, max, spec.method);
    spec.min_font_size + factor * (spec.max_font_size - spec.min_font_size)
}

/// Coarse styling tier: the scale factor as a percentage rounded to the
/// nearest multiple of ten.
pub fn percent_bucket(frequency: f64, min: f64, max: f64, method: SizingMethod) -> u8 {
    let percent = 100.0 * scale_factor(frequency, min, max, method);
    ((percent / 10.0).round() * 10.0) as u8
}

pub(crate) fn scale_in_range(frequency: f64, range: &LevelRange, spec: &FontSpec) -> (f64, u8) {
    (
        font_size(frequency, range.min, range.max, spec),
        percent_bucket(frequency, range.min, range.max, spec.method),
    )
}
