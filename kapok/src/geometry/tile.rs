use std::f64::consts::PI;
use std::fmt;
use thiserror::Error;

/// Highest zoom level the tile addressing accepts; tile indices at this level
/// still fit comfortably in `u32`.
pub const MAX_TILE_ZOOM: i32 = 30;

/// Latitude limit of the Web-Mercator projection; latitudes beyond it are
/// clamped onto the edge tile row.
const MAX_MERCATOR_LAT: f64 = 85.05112878;

/// Failures of the coordinate transforms.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Tile addressing is defined for whole zoom levels `0..=MAX_TILE_ZOOM`
    #[error("invalid zoom level {zoom}, tile addressing is defined for 0..={MAX_TILE_ZOOM}")]
    InvalidZoom { zoom: i32 },
    /// A viewport needs a positive degree span and positive pixel dimensions
    #[error("invalid viewport window: {span_deg} deg over {width}x{height} px")]
    InvalidWindow {
        span_deg: f64,
        width: f64,
        height: f64,
    },
}

/// Slippy-map tile address, the `zoom/x/y` scheme of web map tile servers.
/// This engine only computes indices; fetching imagery belongs to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileCoord {
    pub zoom: u8,
    pub x: u32,
    pub y: u32,
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.zoom, self.x, self.y)
    }
}

/// Tile containing the given coordinate at `zoom`, by the standard slippy-map
/// formula. Longitude wraps around the antimeridian; latitude beyond the
/// Web-Mercator limit clamps onto the polar tile rows.
pub fn geo_to_tile(lat: f64, lng: f64, zoom: i32) -> Result<TileCoord, TransformError> {
    if !(0..=MAX_TILE_ZOOM).contains(&zoom) {
        return Err(TransformError::InvalidZoom { zoom });
    }
    let n = 2f64.powi(zoom);
    let side = 1i64 << zoom;

    let lat_rad = lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = ((lng + 180.0) / 360.0 * n).floor();
    let y = ((1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0 * n).floor();

    Ok(TileCoord {
        zoom: zoom as u8,
        x: (x as i64).rem_euclid(side) as u32,
        y: (y as i64).clamp(0, side - 1) as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0.0, 0.0, 1, (1, 1); "origin at zoom 1")]
    #[test_case(0.0, 0.0, 0, (0, 0); "single tile world")]
    #[test_case(6.3, -10.8, 10, (481, 494); "monrovia at zoom 10")]
    #[test_case(7.225282, -9.003844, 15, (15564, 15724); "lofa plot at zoom 15")]
    fn test_geo_to_tile(lat: f64, lng: f64, zoom: i32, expected: (u32, u32)) {
        let tile = geo_to_tile(lat, lng, zoom).unwrap();
        assert_eq!((tile.x, tile.y), expected);
        assert_eq!(tile.zoom, zoom as u8);
    }

    #[test_case(-1)]
    #[test_case(-7)]
    #[test_case(MAX_TILE_ZOOM + 1)]
    fn test_invalid_zoom_is_rejected(zoom: i32) {
        assert_eq!(
            geo_to_tile(6.3, -10.8, zoom),
            Err(TransformError::InvalidZoom { zoom })
        );
    }

    #[test]
    fn test_longitude_wraps_around_antimeridian() {
        let wrapped = geo_to_tile(0.0, 190.0, 4).unwrap();
        let direct = geo_to_tile(0.0, -170.0, 4).unwrap();
        assert_eq!(wrapped, direct);
        //180 east is the same meridian as 180 west
        assert_eq!(geo_to_tile(0.0, 180.0, 4).unwrap().x, 0);
    }

    #[test]
    fn test_polar_latitude_clamps_to_edge_rows() {
        assert_eq!(geo_to_tile(89.9, 0.0, 2).unwrap().y, 0);
        assert_eq!(geo_to_tile(-89.9, 0.0, 2).unwrap().y, 3);
    }

    #[test]
    fn test_display_matches_server_path_shape() {
        let tile = geo_to_tile(6.3, -10.8, 10).unwrap();
        assert_eq!(tile.to_string(), "10/481/494");
    }
}
