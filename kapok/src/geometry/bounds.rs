use crate::geometry::GeoPoint;
use anyhow::{Result, ensure};

/// Axis-aligned window in geographic coordinates.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl GeoBounds {
    pub fn try_new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Result<Self> {
        ensure!(
            lat_min < lat_max && lng_min < lng_max,
            "invalid bounds, lat: [{lat_min}, {lat_max}], lng: [{lng_min}, {lng_max}]"
        );
        Ok(GeoBounds {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        })
    }

    /// Smallest window containing all `points`, `None` for an empty slice.
    pub fn enclosing(points: &[GeoPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let (mut lat_min, mut lng_min) = (f64::MAX, f64::MAX);
        let (mut lat_max, mut lng_max) = (f64::MIN, f64::MIN);

        for p in points {
            lat_min = lat_min.min(p.lat);
            lat_max = lat_max.max(p.lat);
            lng_min = lng_min.min(p.lng);
            lng_max = lng_max.max(p.lng);
        }
        Some(GeoBounds {
            lat_min,
            lat_max,
            lng_min,
            lng_max,
        })
    }

    pub fn contains(&self, p: &GeoPoint) -> bool {
        p.lat >= self.lat_min
            && p.lat <= self.lat_max
            && p.lng >= self.lng_min
            && p.lng <= self.lng_max
    }

    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.lat_min + self.lat_max) / 2.0,
            (self.lng_min + self.lng_max) / 2.0,
        )
    }

    pub fn lat_span(&self) -> f64 {
        self.lat_max - self.lat_min
    }

    pub fn lng_span(&self) -> f64 {
        self.lng_max - self.lng_min
    }

    /// Same center, expanded by `margin` degrees on every side.
    pub fn inflate(self, margin: f64) -> Self {
        GeoBounds {
            lat_min: self.lat_min - margin,
            lat_max: self.lat_max + margin,
            lng_min: self.lng_min - margin,
            lng_max: self.lng_max + margin,
        }
    }
}
