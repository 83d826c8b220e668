// Tag source collaborator: turns popular-search responses into tags.

pub mod query;
pub mod zone;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::model::{Tag, TileCoord};
use crate::tile::TileError;

pub use query::{QueryOptions, search_query};
pub use zone::{TileZone, tile_zone};

static TERM_SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ ']").unwrap());

/// Supplies the ranked tags for a tile.
pub trait TagSource {
    fn tile_tags(&self, coord: TileCoord) -> Result<Vec<Tag>, TileError>;
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub result: Vec<SearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub count: f64,
}

impl SearchResponse {
    pub fn from_json(input: &str) -> Result<Self, TileError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn into_tags(self) -> Vec<Tag> {
        self.result
            .into_iter()
            .map(|entry| Tag::new(clean_term(&entry.query), entry.count))
            .collect()
    }
}

/// Replace every space and apostrophe with `_` so the term is usable as a
/// single token in markup attributes.
pub fn clean_term(term: &str) -> String {
    TERM_SEPARATORS.replace_all(term, "_").into_owned()
}

/// Serves the same response for every tile.
#[derive(Debug, Clone)]
pub struct StaticTagSource {
    tags: Vec<Tag>,
}

impl StaticTagSource {
    pub fn new(tags: Vec<Tag>) -> Self {
        Self { tags }
    }

    pub fn from_response(response: SearchResponse) -> Self {
        Self::new(response.into_tags())
    }
}

impl TagSource for StaticTagSource {
    fn tile_tags(&self, coord: TileCoord) -> Result<Vec<Tag>, TileError> {
        tracing::trace!(x = coord.x, y = coord.y, z = coord.z, "serving static tags");
        Ok(self.tags.clone())
    }
}

impl<F> TagSource for F
where
    F: Fn(TileCoord) -> Result<Vec<Tag>, TileError>,
{
    fn tile_tags(&self, coord: TileCoord) -> Result<Vec<Tag>, TileError> {
        self(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"status":{"code":200,"message":"OK"},"result":[{"query":"hair bleach","count":73},{"query":"dog","count":501},{"query":"childrens mucinex","count":7},{"query":"l'oreal paris","count":4}],"serverTimestamp":"2017-03-05T20:12:21+00:00"}"#;

    #[test]
    fn parses_response_and_cleans_terms() {
        let tags = SearchResponse::from_json(SAMPLE).unwrap().into_tags();
        let texts: Vec<&str> = tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["hair_bleach", "dog", "childrens_mucinex", "l_oreal_paris"]
        );
        assert_eq!(tags[1].count, 501.0);
    }

    #[test]
    fn clean_term_replaces_each_separator() {
        assert_eq!(clean_term("a  b"), "a__b");
        assert_eq!(clean_term("o'neil"), "o_neil");
        assert_eq!(clean_term("plain"), "plain");
    }

    #[test]
    fn malformed_response_is_an_error() {
        assert!(matches!(
            SearchResponse::from_json(r#"{"result": 3}"#),
            Err(TileError::Response(_))
        ));
    }

    #[test]
    fn static_source_ignores_tile() {
        let source = StaticTagSource::new(vec![Tag::new("dog", 5.0)]);
        let a = source.tile_tags(TileCoord::new(0, 0, 4)).unwrap();
        let b = source.tile_tags(TileCoord::new(7, 3, 9)).unwrap();
        assert_eq!(a, b);
    }
}
