use crate::geometry::{GeoBounds, GeoPoint, TransformError};

/// Linear mapping of a small geographic window onto a pixel canvas, used for
/// tap-to-mark input and marker placement while walking a plot.
///
/// This is plain interpolation over the window, not a map projection; it is
/// only sound for the small windows (a few hundredths of a degree) that a
/// boundary walk covers, and is documented as not geodesically exact.
#[derive(Clone, Debug, PartialEq, Copy)]
pub struct Viewport {
    /// Geographic window covered by the canvas
    pub window: GeoBounds,
    /// Canvas width in pixels
    pub width: f64,
    /// Canvas height in pixels
    pub height: f64,
}

impl Viewport {
    /// Square window of `span_deg` degrees centered on `center`, drawn onto a
    /// `width` x `height` canvas.
    pub fn new(
        center: GeoPoint,
        span_deg: f64,
        width: f64,
        height: f64,
    ) -> Result<Self, TransformError> {
        if !(span_deg > 0.0 && width > 0.0 && height > 0.0) {
            return Err(TransformError::InvalidWindow {
                span_deg,
                width,
                height,
            });
        }
        let half = span_deg / 2.0;
        let window = GeoBounds {
            lat_min: center.lat - half,
            lat_max: center.lat + half,
            lng_min: center.lng - half,
            lng_max: center.lng + half,
        };
        Ok(Viewport {
            window,
            width,
            height,
        })
    }

    /// Pixel position of a coordinate, clamped onto the canvas. North is up:
    /// growing latitude maps to a shrinking y.
    ///
    /// Clamping means every input yields a usable canvas position; callers
    /// that need to detect off-window points check [`GeoBounds::contains`]
    /// on [`Viewport::window`] first.
    pub fn geo_to_pixel(&self, p: GeoPoint) -> (f64, f64) {
        let x = (p.lng - self.window.lng_min) / self.window.lng_span() * self.width;
        let y = self.height - (p.lat - self.window.lat_min) / self.window.lat_span() * self.height;
        (x.clamp(0.0, self.width), y.clamp(0.0, self.height))
    }

    /// Coordinate under a canvas position, the exact inverse of
    /// [`Viewport::geo_to_pixel`] for positions on the canvas.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> GeoPoint {
        let lng = self.window.lng_min + x / self.width * self.window.lng_span();
        let lat = self.window.lat_min + (self.height - y) / self.height * self.window.lat_span();
        GeoPoint::new(lat, lng)
    }
}
