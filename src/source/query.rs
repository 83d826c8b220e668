use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::zone::TileZone;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryOptions {
    pub size: usize,
    pub window: String,
    pub hostname: String,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            size: 10,
            window: "week".to_string(),
            hostname: "www.xyz.com".to_string(),
        }
    }
}

/// Request body asking for the most popular searches issued within the
/// zone's radius.
pub fn search_query(zone: &TileZone, options: &QueryOptions) -> Value {
    json!({
        "size": options.size,
        "window": options.window,
        "matchExact": {
            "and": [{
                "visit": {
                    "generated": {
                        "geo": {
                            "location": {
                                "distance": format!("{}km", zone.radius_km),
                                "center": { "lat": zone.lat, "lon": zone.lon }
                            }
                        },
                        "parsedUri": { "hostname": options.hostname }
                    }
                }
            }]
        }
    })
}
