pub mod alias;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod layout;
pub mod layout_dump;
pub mod model;
pub mod render;
pub mod source;
pub mod text_metrics;
pub mod theme;
pub mod tile;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{CloudConfig, Config, load_config};
pub use layout::{
    BoundingBox, CharWidthMeasurer, CloudLayout, FixedMeasurer, FontSpec, LabelSpec, LayoutError,
    Measure, SizingMethod, font_size, percent_bucket, place_tags, place_tags_in, scale_factor,
};
pub use model::{LevelRange, Tag, TileCoord, WordSize};
pub use render::render_tile_svg;
pub use source::{SearchResponse, StaticTagSource, TagSource};
pub use theme::Theme;
pub use tile::{TileError, compute_tile_cloud};

/// Everything needed to turn a tag response into a tile SVG.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub cloud: CloudConfig,
    pub highlight: Option<String>,
}

impl RenderOptions {
    pub fn dark() -> Self {
        Self::default()
    }

    pub fn light() -> Self {
        Self {
            theme: Theme::light(),
            ..Self::default()
        }
    }
}

/// Parse a popular-searches response and render the tile at `zoom`.
pub fn render_with_options(
    response_json: &str,
    zoom: u8,
    options: RenderOptions,
) -> Result<String, TileError> {
    let tags = SearchResponse::from_json(response_json)?.into_tags();
    let measure = tile::default_measurer(&options.cloud, &options.theme);
    let layout = compute_tile_cloud(&tags, zoom, &options.cloud, &measure)?;
    Ok(render_tile_svg(
        &layout,
        &options.theme,
        options.highlight.as_deref(),
    ))
}
