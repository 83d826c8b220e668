use crate::layout::CloudLayout;
use crate::model::TileCoord;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudDump {
    pub tile: Option<TileCoord>,
    pub tile_size: f64,
    pub bbox: [f64; 4],
    pub range: [f64; 2],
    pub method: String,
    pub dropped: usize,
    pub labels: Vec<LabelDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDump {
    pub word: String,
    pub count: f64,
    pub font_size: f64,
    pub percent_bucket: u8,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Top-left corner in tile pixels, as a host page would position it.
    pub left: f64,
    pub top: f64,
}

impl CloudDump {
    pub fn from_layout(layout: &CloudLayout, tile: Option<TileCoord>) -> Self {
        let half = layout.tile_size / 2.0;
        let labels = layout
            .labels
            .iter()
            .map(|label| LabelDump {
                word: label.word.clone(),
                count: label.entry.count,
                font_size: label.font_size,
                percent_bucket: label.percent_bucket,
                x: label.x,
                y: label.y,
                width: label.width,
                height: label.height,
                left: half + label.x - label.width / 2.0,
                top: half + label.y - label.height / 2.0,
            })
            .collect();
        Self {
            tile,
            tile_size: layout.tile_size,
            bbox: [
                layout.bbox.x,
                layout.bbox.y,
                layout.bbox.width,
                layout.bbox.height,
            ],
            range: [layout.range.min, layout.range.max],
            method: layout.method.to_string(),
            dropped: layout.dropped,
            labels,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub fn write_layout_dump(path: &Path, layout: &CloudLayout, tile: Option<TileCoord>) -> anyhow::Result<()> {
    let dump = CloudDump::from_layout(layout, tile);
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
