// Per-tile glue: pick the level range for the zoom and hand every tag to
// the packer. The tag count is also the packer's collision budget.

use thiserror::Error;

use crate::config::CloudConfig;
use crate::layout::{CloudLayout, LayoutError, Measure, place_tags_in};
use crate::model::{Tag, TileCoord};
use crate::source::TagSource;
use crate::text_metrics::FontMeasurer;
use crate::theme::Theme;

#[derive(Debug, Error)]
pub enum TileError {
    #[error("no level range configured for zoom {0}")]
    MissingLevel(u8),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error("malformed tag response: {0}")]
    Response(#[from] serde_json::Error),
}

/// Lay out one tile's tags at `zoom`.
pub fn compute_tile_cloud<M>(
    tags: &[Tag],
    zoom: u8,
    config: &CloudConfig,
    measure: &M,
) -> Result<CloudLayout, TileError>
where
    M: Measure + ?Sized,
{
    let range = config.level_range(zoom).ok_or(TileError::MissingLevel(zoom))?;
    let bbox = config.bbox();
    let labels = place_tags_in(tags, range, &config.font_spec(), bbox, measure)?;
    let dropped = tags.len() - labels.len();
    tracing::debug!(
        zoom,
        input = tags.len(),
        placed = labels.len(),
        "tile cloud computed"
    );
    Ok(CloudLayout {
        tile_size: config.tile_size,
        bbox,
        range,
        method: config.method,
        labels,
        dropped,
    })
}

/// Fetch the tags for `coord` from `source` and lay them out.
pub fn render_tile_cloud<S, M>(
    source: &S,
    coord: TileCoord,
    config: &CloudConfig,
    measure: &M,
) -> Result<CloudLayout, TileError>
where
    S: TagSource + ?Sized,
    M: Measure + ?Sized,
{
    let tags = source.tile_tags(coord)?;
    compute_tile_cloud(&tags, coord.z, config, measure)
}

/// Measurer configured from the cloud settings and the theme font stack.
pub fn default_measurer(config: &CloudConfig, theme: &Theme) -> FontMeasurer {
    FontMeasurer {
        font_family: theme.font_family.clone(),
        line_height: config.line_height,
        padding: config.label_padding,
        fast: config.fast_text_metrics,
    }
}
