use crate::alias::{AliasTable, WordListGenerator};
use crate::config::{Config, load_config};
use crate::layout::SizingMethod;
use crate::layout_dump::{CloudDump, write_layout_dump};
use crate::model::{Tag, TileCoord};
use crate::render::{render_tile_svg, write_output_svg};
use crate::source::{SearchResponse, search_query, tile_zone};
use crate::tile::{compute_tile_cloud, default_measurer};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tilecloud", version, about = "Lay out a map tile's word cloud")]
pub struct Args {
    /// Tag response JSON ({"result": [{"query", "count"}]} or [{"text", "count"}]) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON or JSON5 file
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Zoom level used to pick the frequency range
    #[arg(short = 'z', long = "zoom", default_value_t = 9)]
    pub zoom: u8,

    /// Word to render highlighted
    #[arg(long = "highlight")]
    pub highlight: Option<String>,

    /// Font sizing method, overrides the config file
    #[arg(long = "method")]
    pub method: Option<SizingMethod>,

    /// Estimate text widths instead of loading system fonts
    #[arg(long = "fast-text")]
    pub fast_text: bool,

    /// Print the geographic zone and search request for tile X,Y at --zoom instead of rendering
    #[arg(long = "zone", value_parser = parse_tile_xy)]
    pub zone: Option<(u32, u32)>,

    /// Newline-separated stand-in words; every term is replaced by one before layout
    #[arg(long = "mask-terms")]
    pub mask_terms: Option<PathBuf>,
}

const MASK_ATTEMPTS: usize = 8;

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Json,
}

pub fn run() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(io::stderr)
        .try_init();

    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args);

    if let Some((x, y)) = args.zone {
        let coord = TileCoord::new(x, y, args.zoom);
        let zone = tile_zone(coord);
        let body = serde_json::json!({
            "tile": coord,
            "zone": zone,
            "query": search_query(&zone, &config.query),
        });
        let text = serde_json::to_string_pretty(&body)?;
        return write_text(&text, args.output.as_deref());
    }

    let input = read_input(args.input.as_deref())?;
    let mut tags = parse_tags(&input)?;
    if let Some(path) = args.mask_terms.as_deref() {
        let words = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        tags = mask_tags_with(&tags, &words)?;
    }
    let measure = default_measurer(&config.cloud, &config.theme);
    let layout = compute_tile_cloud(&tags, args.zoom, &config.cloud, &measure)?;
    tracing::info!(
        placed = layout.labels.len(),
        dropped = layout.dropped,
        zoom = args.zoom,
        "tile laid out"
    );

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_tile_svg(&layout, &config.theme, args.highlight.as_deref());
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout, None)?,
            None => println!("{}", CloudDump::from_layout(&layout, None).to_json()?),
        },
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_png(&layout, &config, args.highlight.as_deref(), &output)?;
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, args: &Args) {
    if let Some(method) = args.method {
        config.cloud.method = method;
    }
    if args.fast_text {
        config.cloud.fast_text_metrics = true;
    }
}

#[cfg(feature = "png")]
fn write_png(
    layout: &crate::layout::CloudLayout,
    config: &Config,
    highlight: Option<&str>,
    output: &Path,
) -> Result<()> {
    let svg = render_tile_svg(layout, &config.theme, highlight);
    crate::render::write_output_png(&svg, output, &config.render, &config.theme)
}

#[cfg(not(feature = "png"))]
fn write_png(
    _layout: &crate::layout::CloudLayout,
    _config: &Config,
    _highlight: Option<&str>,
    _output: &Path,
) -> Result<()> {
    Err(anyhow::anyhow!("PNG output requires the `png` feature"))
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Accepts either a search response or a bare tag list.
fn parse_tags(input: &str) -> Result<Vec<Tag>> {
    if let Ok(response) = SearchResponse::from_json(input) {
        return Ok(response.into_tags());
    }
    serde_json::from_str::<Vec<Tag>>(input)
        .context("input is neither a search response nor a list of {text, count} tags")
}

fn mask_tags_with(tags: &[Tag], words: &str) -> Result<Vec<Tag>> {
    let words: Vec<&str> = words.lines().map(str::trim).filter(|w| !w.is_empty()).collect();
    let mut table = AliasTable::new(WordListGenerator::new(words), MASK_ATTEMPTS, tags.len());
    Ok(table.mask_tags(tags)?)
}

fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => println!("{text}"),
    }
    Ok(())
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}

fn parse_tile_xy(value: &str) -> Result<(u32, u32), String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {value:?}"))?;
    let x = x.trim().parse::<u32>().map_err(|err| err.to_string())?;
    let y = y.trim().parse::<u32>().map_err(|err| err.to_string())?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_input_shapes() {
        let from_response = parse_tags(r#"{"result":[{"query":"paper towels","count":9}]}"#).unwrap();
        assert_eq!(from_response, vec![Tag::new("paper_towels", 9.0)]);

        let from_list = parse_tags(r#"[{"text":"dog","count":501}]"#).unwrap();
        assert_eq!(from_list, vec![Tag::new("dog", 501.0)]);

        assert!(parse_tags("42").is_err());
    }

    #[test]
    fn mask_terms_replace_words_and_keep_counts() {
        let tags = vec![Tag::new("dog", 501.0), Tag::new("lice", 6.0), Tag::new("dog", 3.0)];
        let masked = mask_tags_with(&tags, "apple\n\n pear \n").unwrap();
        assert_eq!(
            masked,
            vec![Tag::new("apple", 501.0), Tag::new("pear", 6.0), Tag::new("apple", 3.0)]
        );
        assert!(mask_tags_with(&tags, "").is_err());
    }

    #[test]
    fn parses_tile_xy() {
        assert_eq!(parse_tile_xy("3, 7"), Ok((3, 7)));
        assert!(parse_tile_xy("3").is_err());
        assert!(parse_tile_xy("a,7").is_err());
    }

    #[test]
    fn args_accept_method_and_zone() {
        let args = Args::parse_from(["tilecloud", "--method", "linear", "--zone", "1,2", "-z", "5"]);
        assert_eq!(args.method, Some(SizingMethod::Linear));
        assert_eq!(args.zone, Some((1, 2)));
        assert_eq!(args.zoom, 5);
    }
}
