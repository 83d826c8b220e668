use serde::{Deserialize, Serialize};

/// Number of percent buckets (0, 10, ..., 100).
pub const BUCKET_COUNT: usize = 11;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub background: String,
    pub text_color: String,
    pub highlight_color: String,
    pub bucket_colors: Vec<String>,
}

impl Theme {
    /// Light labels for a dark basemap.
    pub fn dark() -> Self {
        Self {
            font_family: "\"Helvetica Neue\", Arial, sans-serif".to_string(),
            background: "transparent".to_string(),
            text_color: "#E6E6E6".to_string(),
            highlight_color: "#FFD24D".to_string(),
            bucket_colors: [
                "#5C7A99", "#62829F", "#6A8CA8", "#7597B2", "#82A3BC", "#90B0C6", "#A0BED1",
                "#B1CCDC", "#C3DAE7", "#D6E8F2", "#EAF5FC",
            ]
            .iter()
            .map(|value| value.to_string())
            .collect(),
        }
    }

    pub fn light() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            background: "#FFFFFF".to_string(),
            text_color: "#1C2430".to_string(),
            highlight_color: "#D9480F".to_string(),
            bucket_colors: [
                "#A6B4C8", "#97A7BE", "#899AB3", "#7A8DA8", "#6C809E", "#5E7393", "#506688",
                "#43597C", "#374C70", "#2B3F63", "#203356",
            ]
            .iter()
            .map(|value| value.to_string())
            .collect(),
        }
    }

    /// Fill for a percent bucket; falls back to `text_color` when the
    /// palette is short.
    pub fn bucket_color(&self, percent_bucket: u8) -> &str {
        let idx = usize::from(percent_bucket / 10);
        self.bucket_colors
            .get(idx)
            .map(String::as_str)
            .unwrap_or(self.text_color.as_str())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_cover_every_bucket() {
        assert_eq!(Theme::dark().bucket_colors.len(), BUCKET_COUNT);
        assert_eq!(Theme::light().bucket_colors.len(), BUCKET_COUNT);
    }

    #[test]
    fn short_palette_falls_back_to_text_color() {
        let mut theme = Theme::light();
        theme.bucket_colors.truncate(2);
        assert_eq!(theme.bucket_color(10), "#97A7BE");
        assert_eq!(theme.bucket_color(100), "#1C2430");
    }
}
