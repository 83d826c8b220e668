use crate::layout::{CloudLayout, LabelSpec};
use crate::theme::Theme;
use anyhow::Result;
use std::fmt::Write;
use std::path::Path;

/// Render a laid-out tile as a standalone SVG. Labels carry the
/// `word-cloud-label-<bucket>` class and a `data-word` attribute so the
/// host page can style tiers and wire hover/highlight.
pub fn render_tile_svg(layout: &CloudLayout, theme: &Theme, highlight: Option<&str>) -> String {
    let size = layout.tile_size.max(1.0);
    let half = size / 2.0;
    let mut svg = String::new();

    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\">",
    );
    let _ = write!(
        svg,
        "<style>.word-cloud-label.highlight{{fill:{};font-weight:bold}}.word-cloud.highlight .word-cloud-label:not(.highlight){{opacity:0.35}}</style>",
        theme.highlight_color
    );
    if theme.background != "transparent" {
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
            theme.background
        );
    }

    let highlighted = highlight.filter(|word| layout.labels.iter().any(|l| l.word == *word));
    if highlighted.is_some() {
        svg.push_str("<g class=\"word-cloud highlight\">");
    } else {
        svg.push_str("<g class=\"word-cloud\">");
    }
    for label in &layout.labels {
        let is_highlight = highlighted == Some(label.word.as_str());
        svg.push_str(&label_svg(label, half, theme, is_highlight));
    }
    svg.push_str("</g></svg>");
    svg
}

fn label_svg(label: &LabelSpec, half: f64, theme: &Theme, highlight: bool) -> String {
    let x = half + label.x;
    let y = half + label.y;
    let class = if highlight {
        format!("word-cloud-label word-cloud-label-{} highlight", label.percent_bucket)
    } else {
        format!("word-cloud-label word-cloud-label-{}", label.percent_bucket)
    };
    let word = escape_xml(&label.word);
    format!(
        "<text class=\"{class}\" data-word=\"{word}\" x=\"{x:.2}\" y=\"{y:.2}\" text-anchor=\"middle\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{:.2}\" fill=\"{}\">{word}</text>",
        escape_xml(&theme.font_family),
        label.font_size,
        theme.bucket_color(label.percent_bucket),
    )
}

pub fn write_output_svg(svg: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, svg)?;
        }
        None => {
            print!("{}", svg);
        }
    }
    Ok(())
}

#[cfg(feature = "png")]
pub fn write_output_png(
    svg: &str,
    output: &Path,
    render_cfg: &crate::config::RenderConfig,
    theme: &Theme,
) -> Result<()> {
    let mut opt = usvg::Options::default();
    opt.font_family = theme
        .font_family
        .split(',')
        .next()
        .map(|name| name.trim().trim_matches('"').to_string())
        .unwrap_or_else(|| "sans-serif".to_string());
    opt.fontdb_mut().load_system_fonts();

    let tree = usvg::Tree::from_str(svg, &opt)?;
    let scale = if render_cfg.scale > 0.0 { render_cfg.scale as f32 } else { 1.0 };
    let size = tree.size().to_int_size().scale_by(scale).unwrap_or(tree.size().to_int_size());
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| anyhow::anyhow!("Failed to allocate pixmap"))?;

    if render_cfg.background != "transparent"
        && let Some(color) = parse_hex_color(&render_cfg.background)
    {
        pixmap.fill(color);
    }

    let mut pixmap_mut = pixmap.as_mut();
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap_mut,
    );
    pixmap.save_png(output)?;
    Ok(())
}

#[cfg(feature = "png")]
fn parse_hex_color(value: &str) -> Option<resvg::tiny_skia::Color> {
    let hex = value.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    Some(resvg::tiny_skia::Color::from_rgba8(
        channel(0)?,
        channel(2)?,
        channel(4)?,
        255,
    ))
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
