// Word cloud placement for a single tile: scale each tag, then walk a
// spiral out from the tile center until the label fits.

pub mod error;
pub mod geometry;
pub mod scale;
pub mod spiral;
pub mod text;

use serde::Serialize;
use std::cmp::Ordering;

use crate::model::{LevelRange, Tag, WordSize};

pub use error::{LayoutError, Result};
pub use geometry::BoundingBox;
pub use scale::{FontSpec, SizingMethod, font_size, percent_bucket, scale_factor};
pub use spiral::SpiralState;
pub use text::{CharWidthMeasurer, FixedMeasurer, Measure};

pub const DEFAULT_TILE_SIZE: f64 = 256.0;
pub const TILE_PADDING_WIDTH: f64 = 10.0;
pub const TILE_PADDING_HEIGHT: f64 = 24.0;

/// A placed word. `x`/`y` are the label center relative to the tile center.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelSpec {
    pub word: String,
    pub entry: Tag,
    pub font_size: f64,
    pub percent_bucket: u8,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl LabelSpec {
    pub fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.x, self.y, self.width, self.height)
    }
}

/// Result of laying out one tile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudLayout {
    pub tile_size: f64,
    pub bbox: BoundingBox,
    pub range: LevelRange,
    pub method: SizingMethod,
    pub labels: Vec<LabelSpec>,
    pub dropped: usize,
}

/// Place `tags` inside the default 256px tile with the font bounds given.
pub fn place_tags<M>(
    tags: &[Tag],
    range: LevelRange,
    method: SizingMethod,
    min_font: f64,
    max_font: f64,
    measure: &M,
) -> Result<Vec<LabelSpec>>
where
    M: Measure + ?Sized,
{
    let font = FontSpec {
        min_font_size: min_font,
        max_font_size: max_font,
        method,
    };
    let bbox = BoundingBox::for_tile(DEFAULT_TILE_SIZE, TILE_PADDING_WIDTH, TILE_PADDING_HEIGHT);
    place_tags_in(tags, range, &font, bbox, measure)
}

/// Place `tags` in descending count order (ties keep input order). Words
/// that cannot be fitted are left out, so the output may be shorter than
/// the input.
pub fn place_tags_in<M>(
    tags: &[Tag],
    range: LevelRange,
    font: &FontSpec,
    bbox: BoundingBox,
    measure: &M,
) -> Result<Vec<LabelSpec>>
where
    M: Measure + ?Sized,
{
    validate_inputs(tags, &range, font)?;

    let ordered = sort_by_count(tags);
    let total = ordered.len();
    let mut labels: Vec<LabelSpec> = Vec::with_capacity(total);

    for tag in ordered {
        let (font_size, percent_bucket) = scale::scale_in_range(tag.count, &range, font);
        let size = measure.measure(&tag.text, font_size);
        if !size.is_drawable() {
            return Err(LayoutError::InvalidMeasurement {
                word: tag.text.clone(),
                width: size.width,
                height: size.height,
            });
        }

        match find_position(size, &labels, &bbox, total) {
            Some((x, y)) => {
                tracing::trace!(word = %tag.text, x, y, font_size, "placed label");
                labels.push(LabelSpec {
                    word: tag.text.clone(),
                    entry: tag.clone(),
                    font_size,
                    percent_bucket,
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                });
            }
            None => {
                tracing::debug!(
                    word = %tag.text,
                    count = tag.count,
                    attempts = total,
                    "no room left for label, dropping"
                );
            }
        }
    }

    tracing::debug!(
        placed = labels.len(),
        dropped = total - labels.len(),
        "word cloud placement finished"
    );
    Ok(labels)
}

/// Walk the spiral until the candidate clears every placed label and the
/// bounding box. Gives up once `max_collisions` candidates fell outside
/// the box.
fn find_position(
    size: WordSize,
    placed: &[LabelSpec],
    bbox: &BoundingBox,
    max_collisions: usize,
) -> Option<(f64, f64)> {
    let mut state = SpiralState::default();
    while state.collisions < max_collisions {
        state = state.advance();
        let candidate = BoundingBox::centered(state.x, state.y, size);
        if placed.iter().any(|label| label.bounds().overlaps(&candidate)) {
            continue;
        }
        if candidate.outside(bbox) {
            state = state.escape();
            continue;
        }
        return Some((state.x, state.y));
    }
    None
}

fn validate_inputs(tags: &[Tag], range: &LevelRange, font: &FontSpec) -> Result<()> {
    if !range.is_valid() {
        return Err(LayoutError::InvalidRange {
            min: range.min,
            max: range.max,
        });
    }
    if !font.min_font_size.is_finite() || !font.max_font_size.is_finite() {
        return Err(LayoutError::InvalidFontBounds {
            min_font: font.min_font_size,
            max_font: font.max_font_size,
        });
    }
    if let Some((index, tag)) = tags
        .iter()
        .enumerate()
        .find(|(_, tag)| !tag.count.is_finite() || tag.count < 0.0)
    {
        return Err(LayoutError::InvalidTag {
            index,
            text: tag.text.clone(),
            count: tag.count,
        });
    }
    Ok(())
}

/// Stable descending sort by count.
pub(crate) fn sort_by_count(tags: &[Tag]) -> Vec<&Tag> {
    let mut ordered: Vec<&Tag> = tags.iter().collect();
    ordered.sort_by(|a, b| b.count.partial_cmp(&a.count).unwrap_or(Ordering::Equal));
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(width: f64, height: f64) -> FixedMeasurer {
        FixedMeasurer(WordSize::new(width, height))
    }

    fn scenario_tags() -> Vec<Tag> {
        vec![
            Tag::new("A", 501.0),
            Tag::new("B", 101.0),
            Tag::new("C", 73.0),
            Tag::new("D", 9.0),
        ]
    }

    #[test]
    fn empty_input_places_nothing() {
        let labels = place_tags(
            &[],
            LevelRange::new(1.0, 50.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &fixed(40.0, 20.0),
        )
        .unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn small_cloud_places_every_word_outward() {
        let labels = place_tags(
            &scenario_tags(),
            LevelRange::new(1.0, 50.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &fixed(40.0, 20.0),
        )
        .unwrap();
        let words: Vec<&str> = labels.iter().map(|l| l.word.as_str()).collect();
        assert_eq!(words, vec!["A", "B", "C", "D"]);

        let first = &labels[0];
        assert!((first.x.hypot(first.y) - 1.0).abs() < 1e-4);
        for pair in labels.windows(2) {
            assert!(pair[0].x.hypot(pair[0].y) <= pair[1].x.hypot(pair[1].y) + 1e-4);
            assert!(pair[0].font_size >= pair[1].font_size);
        }
        assert_eq!(labels[0].font_size, 20.0);
        assert_eq!(labels[3].percent_bucket, 60);
    }

    #[test]
    fn small_cloud_positions_are_pinned() {
        let labels = place_tags(
            &scenario_tags(),
            LevelRange::new(1.0, 50.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &fixed(40.0, 20.0),
        )
        .unwrap();
        let expected = [
            (0.8090169943749475, 0.5877852522924731),
            (3.3307817762499554, 20.734172102087925),
            (-4.287983142533165, -20.55755823460927),
            (40.9996785452479, 0.16235512415334102),
        ];
        for (label, (x, y)) in labels.iter().zip(expected) {
            assert!((label.x - x).abs() < 1e-9, "{}: x {} != {x}", label.word, label.x);
            assert!((label.y - y).abs() < 1e-9, "{}: y {} != {y}", label.word, label.y);
        }
    }

    #[test]
    fn oversized_words_are_dropped() {
        let tags: Vec<Tag> = (0..50).map(|i| Tag::new(format!("w{i}"), 10.0)).collect();
        let labels = place_tags(
            &tags,
            LevelRange::new(1.0, 50.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &fixed(200.0, 200.0),
        )
        .unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].word, "w0");
    }

    #[test]
    fn word_larger_than_tile_is_dropped_without_error() {
        let labels = place_tags(
            &[Tag::new("huge", 5.0)],
            LevelRange::new(1.0, 50.0),
            SizingMethod::Linear,
            10.0,
            20.0,
            &fixed(400.0, 20.0),
        )
        .unwrap();
        assert!(labels.is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let tags = vec![
            Tag::new("low", 1.0),
            Tag::new("first", 5.0),
            Tag::new("second", 5.0),
            Tag::new("third", 5.0),
        ];
        let labels = place_tags(
            &tags,
            LevelRange::new(1.0, 5.0),
            SizingMethod::Linear,
            10.0,
            20.0,
            &fixed(20.0, 10.0),
        )
        .unwrap();
        let words: Vec<&str> = labels.iter().map(|l| l.word.as_str()).collect();
        assert_eq!(words, vec!["first", "second", "third", "low"]);
    }

    #[test]
    fn inverted_range_is_rejected() {
        let err = place_tags(
            &scenario_tags(),
            LevelRange::new(50.0, 1.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &fixed(40.0, 20.0),
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::InvalidRange { min: 50.0, max: 1.0 });
    }

    #[test]
    fn negative_and_non_finite_counts_are_rejected() {
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let tags = vec![Tag::new("ok", 3.0), Tag::new("bad", bad)];
            let err = place_tags(
                &tags,
                LevelRange::new(1.0, 50.0),
                SizingMethod::Log,
                10.0,
                20.0,
                &fixed(40.0, 20.0),
            )
            .unwrap_err();
            assert!(matches!(err, LayoutError::InvalidTag { index: 1, .. }), "{err:?}");
        }
    }

    #[test]
    fn invalid_tag_is_reported_before_measuring() {
        let measure = |_: &str, _: f64| -> WordSize { panic!("measured before validation") };
        let err = place_tags(
            &[Tag::new("bad", -3.0)],
            LevelRange::new(1.0, 50.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &measure,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidTag { .. }));
    }

    #[test]
    fn non_positive_measurement_is_rejected() {
        let err = place_tags(
            &scenario_tags(),
            LevelRange::new(1.0, 50.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &fixed(0.0, 20.0),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidMeasurement { ref word, .. } if word == "A"));
    }

    #[test]
    fn zero_counts_are_sized_as_one() {
        let labels = place_tags(
            &[Tag::new("zero", 0.0)],
            LevelRange::new(0.0, 100.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &fixed(30.0, 12.0),
        )
        .unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].font_size, 10.0);
        assert_eq!(labels[0].percent_bucket, 0);
    }

    #[test]
    fn measure_sees_scaled_font_size() {
        let measure = |word: &str, font_size: f64| WordSize::new(word.len() as f64 * font_size * 0.6, font_size * 1.2);
        let labels = place_tags(
            &scenario_tags(),
            LevelRange::new(1.0, 50.0),
            SizingMethod::Log,
            10.0,
            20.0,
            &measure,
        )
        .unwrap();
        for label in &labels {
            assert!((label.height - label.font_size * 1.2).abs() < 1e-4);
        }
    }
}
