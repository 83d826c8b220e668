use serde::Deserialize;
use tile_wordcloud::{RenderOptions, SizingMethod, render_with_options};
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TileRenderOptions {
    theme: Option<String>,
    font_family: Option<String>,
    method: Option<SizingMethod>,
    min_font: Option<f64>,
    max_font: Option<f64>,
    fast_text: Option<bool>,
    highlight: Option<String>,
}

fn build_render_options(options: TileRenderOptions) -> RenderOptions {
    let mut render_options = if options.theme.as_deref() == Some("light") {
        RenderOptions::light()
    } else {
        RenderOptions::dark()
    };

    if let Some(font_family) = options.font_family {
        render_options.theme.font_family = font_family;
    }
    if let Some(method) = options.method {
        render_options.cloud.method = method;
    }
    if let Some(min_font) = options.min_font {
        render_options.cloud.min_font = min_font;
    }
    if let Some(max_font) = options.max_font {
        render_options.cloud.max_font = max_font;
    }
    // No system fonts in the browser sandbox.
    render_options.cloud.fast_text_metrics = options.fast_text.unwrap_or(true);
    render_options.highlight = options.highlight;

    render_options
}

#[wasm_bindgen]
pub fn render_word_cloud_svg(
    response_json: &str,
    zoom: u8,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<TileRenderOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        TileRenderOptions::default()
    };

    let render_options = build_render_options(options);
    render_with_options(response_json, zoom, render_options)
        .map_err(|error| JsValue::from_str(&error.to_string()))
}
