use jiff::Timestamp;

/// Geographic coordinate in decimal degrees (WGS 84).
///
/// Latitude is positive north of the equator, longitude positive east of
/// Greenwich. A point delivered by a GPS device additionally carries the
/// reported horizontal accuracy and capture time; a point derived from a map
/// interaction carries neither. Once recorded a point is never mutated.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct GeoPoint {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lng: f64,
    /// Horizontal uncertainty radius in meters, lower is better
    pub accuracy: Option<f64>,
    /// Moment the fix was reported by the device
    pub timestamp: Option<Timestamp>,
}

impl GeoPoint {
    /// Bare coordinate, no device metadata.
    pub fn new(lat: f64, lng: f64) -> Self {
        GeoPoint {
            lat,
            lng,
            accuracy: None,
            timestamp: None,
        }
    }

    /// Coordinate as reported by a device, with its accuracy in meters.
    pub fn with_accuracy(lat: f64, lng: f64, accuracy: f64) -> Self {
        GeoPoint {
            lat,
            lng,
            accuracy: Some(accuracy),
            timestamp: None,
        }
    }

    /// Same point, stamped with the moment it was captured.
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        GeoPoint::new(lat, lng)
    }
}

impl From<GeoPoint> for (f64, f64) {
    fn from(p: GeoPoint) -> Self {
        (p.lat, p.lng)
    }
}
