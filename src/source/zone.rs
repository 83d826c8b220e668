use serde::Serialize;
use std::f64::consts::PI;

use crate::model::TileCoord;

pub const TILE_PIXELS: f64 = 256.0;
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Geographic circle covering a tile: its center and the distance from
/// the center to a corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TileZone {
    pub lat: f64,
    pub lon: f64,
    pub radius_km: f64,
}

pub fn tile_zone(coord: TileCoord) -> TileZone {
    let world = TILE_PIXELS * 2f64.powi(i32::from(coord.z));
    let x = f64::from(coord.x);
    let y = f64::from(coord.y);
    // TMS rows count up from the bottom; pixel rows count down from the top.
    let (lat, lon) = unproject((x + 0.5) * TILE_PIXELS, world - (y + 0.5) * TILE_PIXELS, world);
    let (corner_lat, corner_lon) = unproject(x * TILE_PIXELS, world - (y + 1.0) * TILE_PIXELS, world);
    TileZone {
        lat,
        lon,
        radius_km: haversine_m(lat, lon, corner_lat, corner_lon) / 1000.0,
    }
}

/// Spherical Web-Mercator pixel → (lat, lon) in degrees.
fn unproject(px: f64, py: f64, world: f64) -> (f64, f64) {
    let lon = (px / world - 0.5) * 360.0;
    let lat = (PI * (1.0 - 2.0 * py / world)).sinh().atan().to_degrees();
    (lat, lon)
}

fn haversine_m(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lat2) = (lat1.to_radians(), lat2.to_radians());
    let sin_dlat = ((lat2 - lat1) / 2.0).sin();
    let sin_dlon = ((lon2 - lon1).to_radians() / 2.0).sin();
    let a = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_tile_is_centered_on_null_island() {
        let zone = tile_zone(TileCoord::new(0, 0, 0));
        assert!(zone.lat.abs() < 1e-9);
        assert!(zone.lon.abs() < 1e-9);
        assert!((zone.radius_km - 10_557.8).abs() < 5.0, "{}", zone.radius_km);
    }

    #[test]
    fn tms_rows_count_from_the_south() {
        let north_east = tile_zone(TileCoord::new(1, 1, 1));
        assert!((north_east.lon - 90.0).abs() < 1e-9);
        assert!((north_east.lat - 66.5133).abs() < 1e-3, "{}", north_east.lat);

        let south_east = tile_zone(TileCoord::new(1, 0, 1));
        assert!((south_east.lat + north_east.lat).abs() < 1e-9);
    }

    #[test]
    fn deeper_zoom_shrinks_radius() {
        let coarse = tile_zone(TileCoord::new(3, 9, 5));
        let fine = tile_zone(TileCoord::new(6, 18, 6));
        assert!(fine.radius_km < coarse.radius_km);
        assert!(fine.radius_km > 0.0);
    }

    #[test]
    fn haversine_quarter_meridian() {
        let d = haversine_m(0.0, 0.0, 90.0, 0.0);
        assert!((d - EARTH_RADIUS_M * PI / 2.0).abs() < 1e-6);
    }
}
