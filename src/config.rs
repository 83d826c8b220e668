use crate::layout::scale::SizingMethod;
use crate::layout::text::DEFAULT_LINE_HEIGHT;
use crate::layout::{BoundingBox, DEFAULT_TILE_SIZE, FontSpec, TILE_PADDING_HEIGHT, TILE_PADDING_WIDTH};
use crate::model::LevelRange;
use crate::source::QueryOptions;
use crate::theme::Theme;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

const DEFAULT_LEVEL_EXTENTS: [(u8, f64, f64); 7] = [
    (4, 1.0, 400.0),
    (5, 1.0, 300.0),
    (6, 1.0, 200.0),
    (7, 1.0, 100.0),
    (8, 1.0, 75.0),
    (9, 1.0, 50.0),
    (10, 1.0, 30.0),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudConfig {
    pub tile_size: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub min_font: f64,
    pub max_font: f64,
    pub method: SizingMethod,
    pub level_extents: BTreeMap<u8, LevelRange>,
    pub fast_text_metrics: bool,
    pub label_padding: f64,
    pub line_height: f64,
}

impl CloudConfig {
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::for_tile(self.tile_size, self.padding_x, self.padding_y)
    }

    pub fn font_spec(&self) -> FontSpec {
        FontSpec {
            min_font_size: self.min_font,
            max_font_size: self.max_font,
            method: self.method,
        }
    }

    pub fn level_range(&self, zoom: u8) -> Option<LevelRange> {
        self.level_extents.get(&zoom).copied()
    }
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            padding_x: TILE_PADDING_WIDTH,
            padding_y: TILE_PADDING_HEIGHT,
            min_font: 10.0,
            max_font: 20.0,
            method: SizingMethod::Log,
            level_extents: DEFAULT_LEVEL_EXTENTS
                .iter()
                .map(|(zoom, min, max)| (*zoom, LevelRange::new(*min, *max)))
                .collect(),
            fast_text_metrics: false,
            label_padding: 0.0,
            line_height: DEFAULT_LINE_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub scale: f64,
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            background: "transparent".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub theme: Theme,
    pub cloud: CloudConfig,
    pub query: QueryOptions,
    pub render: RenderConfig,
}

impl Default for Config {
    fn default() -> Self {
        let theme = Theme::dark();
        let render = RenderConfig {
            background: theme.background.clone(),
            ..Default::default()
        };
        Self {
            theme,
            cloud: CloudConfig::default(),
            query: QueryOptions::default(),
            render,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    background: Option<String>,
    text_color: Option<String>,
    highlight_color: Option<String>,
    bucket_colors: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    String(String),
}

impl NumberOrString {
    fn as_f64(&self) -> Option<f64> {
        match self {
            NumberOrString::Number(val) => Some(*val),
            NumberOrString::String(val) => val.trim().parse::<f64>().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct LevelRangeFile {
    min: NumberOrString,
    max: NumberOrString,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct CloudConfigFile {
    tile_size: Option<f64>,
    padding_x: Option<f64>,
    padding_y: Option<f64>,
    min_font: Option<f64>,
    max_font: Option<f64>,
    method: Option<String>,
    level_extents: Option<HashMap<String, LevelRangeFile>>,
    fast_text_metrics: Option<bool>,
    label_padding: Option<f64>,
    line_height: Option<f64>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct QueryConfigFile {
    size: Option<usize>,
    window: Option<String>,
    hostname: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct RenderConfigFile {
    scale: Option<f64>,
    background: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    cloud: Option<CloudConfigFile>,
    query: Option<QueryConfigFile>,
    render: Option<RenderConfigFile>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let is_json5 = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    if is_json5 {
        parse_config_json5(&contents)
    } else {
        parse_config(&contents)
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = serde_json::from_str(contents)?;
    apply_config_file(parsed)
}

pub fn parse_config_json5(contents: &str) -> anyhow::Result<Config> {
    let parsed: ConfigFile = json5::from_str(contents)?;
    apply_config_file(parsed)
}

fn apply_config_file(parsed: ConfigFile) -> anyhow::Result<Config> {
    let mut config = Config::default();

    if let Some(theme_name) = parsed.theme.as_deref() {
        match theme_name {
            "light" => config.theme = Theme::light(),
            "dark" | "default" => config.theme = Theme::dark(),
            other => tracing::warn!(theme = other, "unknown theme, keeping default"),
        }
    }

    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.text_color {
            config.theme.text_color = v;
        }
        if let Some(v) = vars.highlight_color {
            config.theme.highlight_color = v;
        }
        if let Some(v) = vars.bucket_colors {
            config.theme.bucket_colors = v;
        }
    }

    if let Some(cloud) = parsed.cloud {
        if let Some(v) = cloud.tile_size {
            config.cloud.tile_size = v;
        }
        if let Some(v) = cloud.padding_x {
            config.cloud.padding_x = v;
        }
        if let Some(v) = cloud.padding_y {
            config.cloud.padding_y = v;
        }
        if let Some(v) = cloud.min_font {
            config.cloud.min_font = v;
        }
        if let Some(v) = cloud.max_font {
            config.cloud.max_font = v;
        }
        if let Some(v) = cloud.method {
            config.cloud.method = v.parse::<SizingMethod>().map_err(anyhow::Error::msg)?;
        }
        if let Some(extents) = cloud.level_extents {
            for (zoom, range) in extents {
                let level: u8 = zoom
                    .trim()
                    .parse()
                    .with_context(|| format!("level extent key {zoom:?} is not a zoom level"))?;
                let (Some(min), Some(max)) = (range.min.as_f64(), range.max.as_f64()) else {
                    anyhow::bail!("level extent {level} must have numeric min and max");
                };
                config.cloud.level_extents.insert(level, LevelRange::new(min, max));
            }
        }
        if let Some(v) = cloud.fast_text_metrics {
            config.cloud.fast_text_metrics = v;
        }
        if let Some(v) = cloud.label_padding {
            config.cloud.label_padding = v;
        }
        if let Some(v) = cloud.line_height {
            config.cloud.line_height = v;
        }
    }

    if let Some(query) = parsed.query {
        if let Some(v) = query.size {
            config.query.size = v;
        }
        if let Some(v) = query.window {
            config.query.window = v;
        }
        if let Some(v) = query.hostname {
            config.query.hostname = v;
        }
    }

    config.render.background = config.theme.background.clone();
    if let Some(render) = parsed.render {
        if let Some(v) = render.scale {
            config.render.scale = v;
        }
        if let Some(v) = render.background {
            config.render.background = v;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_plugin_constants() {
        let config = Config::default();
        assert_eq!(config.cloud.bbox(), BoundingBox::new(0.0, 0.0, 236.0, 208.0));
        assert_eq!(config.cloud.method, SizingMethod::Log);
        assert_eq!(config.cloud.level_range(9), Some(LevelRange::new(1.0, 50.0)));
        assert_eq!(config.cloud.level_range(4), Some(LevelRange::new(1.0, 400.0)));
        assert_eq!(config.cloud.level_range(11), None);
    }

    #[test]
    fn overlays_partial_file_on_defaults() {
        let config = parse_config(
            r##"{
                "theme": "light",
                "themeVariables": { "highlightColor": "#FF0000" },
                "cloud": {
                    "method": "linear",
                    "levelExtents": { "9": { "min": 2, "max": "80" }, "12": { "min": 1, "max": 5 } }
                },
                "query": { "hostname": "shop.example.com" }
            }"##,
        )
        .unwrap();
        assert_eq!(config.theme.background, "#FFFFFF");
        assert_eq!(config.theme.highlight_color, "#FF0000");
        assert_eq!(config.cloud.method, SizingMethod::Linear);
        assert_eq!(config.cloud.level_range(9), Some(LevelRange::new(2.0, 80.0)));
        assert_eq!(config.cloud.level_range(12), Some(LevelRange::new(1.0, 5.0)));
        assert_eq!(config.cloud.level_range(10), Some(LevelRange::new(1.0, 30.0)));
        assert_eq!(config.cloud.min_font, 10.0);
        assert_eq!(config.query.hostname, "shop.example.com");
        assert_eq!(config.query.window, "week");
        assert_eq!(config.render.background, "#FFFFFF");
    }

    #[test]
    fn json5_config_allows_comments() {
        let config = parse_config_json5(
            r#"{
                // smaller tiles
                cloud: { tileSize: 128, paddingX: 4, paddingY: 8, },
            }"#,
        )
        .unwrap();
        assert_eq!(config.cloud.bbox(), BoundingBox::new(0.0, 0.0, 120.0, 112.0));
    }

    #[test]
    fn rejects_unknown_method_and_bad_level_key() {
        assert!(parse_config(r#"{ "cloud": { "method": "cubic" } }"#).is_err());
        assert!(
            parse_config(r#"{ "cloud": { "levelExtents": { "deep": { "min": 1, "max": 2 } } } }"#)
                .is_err()
        );
    }
}
