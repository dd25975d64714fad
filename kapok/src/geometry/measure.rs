use crate::geometry::GeoPoint;
use itertools::Itertools;
use thiserror::Error;

/// Mean earth radius in meters, used by the haversine distance.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Kilometers spanned by one degree of latitude, and by one degree of
/// longitude at the equator.
const KM_PER_DEGREE: f64 = 111.32;

const HECTARES_PER_SQ_KM: f64 = 100.0;

/// Failures of the strict measurement variants.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Fewer vertices than a polygon requires
    #[error("degenerate boundary: {n} vertices, a polygon needs at least 3")]
    DegenerateBoundary { n: usize },
}

/// Whether a vertex chain is measured as-is or with the closing edge from the
/// last vertex back to the first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Closure {
    Open,
    Closed,
}

/// Area enclosed by the vertex sequence, in hectares.
///
/// Planar shoelace sum over decimal degrees, converted to hectares with a
/// meridian-convergence correction at the mean vertex latitude. This is a
/// small-area approximation, adequate for farm plots up to a few hundred
/// hectares; it is not a geodesic ellipsoidal area.
///
/// Fewer than 3 vertices enclose nothing and yield 0. Use
/// [`try_area_hectares`] to treat that as an error instead.
pub fn area_hectares(points: &[GeoPoint]) -> f64 {
    match mean_centroid(points) {
        Some(centroid) if points.len() >= 3 => {
            let sq_degrees = shoelace(points).abs() / 2.0;
            sq_degrees
                * KM_PER_DEGREE
                * KM_PER_DEGREE
                * centroid.lat.to_radians().cos()
                * HECTARES_PER_SQ_KM
        }
        _ => 0.0,
    }
}

/// Strict variant of [`area_hectares`]: fewer than 3 vertices is a
/// [`GeometryError::DegenerateBoundary`] rather than a zero area.
pub fn try_area_hectares(points: &[GeoPoint]) -> Result<f64, GeometryError> {
    match points.len() {
        n if n < 3 => Err(GeometryError::DegenerateBoundary { n }),
        _ => Ok(area_hectares(points)),
    }
}

//https://en.wikipedia.org/wiki/Shoelace_formula
//signed, in square degrees; winding determines the sign
fn shoelace(points: &[GeoPoint]) -> f64 {
    let mut sigma = 0.0;
    for i in 0..points.len() {
        let j = (i + 1) % points.len();
        sigma += points[i].lat * points[j].lng - points[j].lat * points[i].lng;
    }
    sigma
}

/// Great-circle distance between two coordinates in meters, by the haversine
/// formula on a spherical earth.
pub fn haversine_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi_a = a.lat.to_radians();
    let phi_b = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lng - a.lng).to_radians();

    let h = (d_phi / 2.0).sin().powi(2)
        + phi_a.cos() * phi_b.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Sum of haversine distances over consecutive vertices, in meters.
///
/// [`Closure::Closed`] adds the edge from the last vertex back to the first,
/// which only exists for chains of at least 3 vertices. A chain of fewer than
/// 2 vertices has no edges and measures 0.
pub fn perimeter_m(points: &[GeoPoint], closure: Closure) -> f64 {
    let chain: f64 = points
        .iter()
        .tuple_windows()
        .map(|(a, b)| haversine_m(*a, *b))
        .sum();
    match closure {
        Closure::Closed if points.len() >= 3 => {
            chain + haversine_m(points[points.len() - 1], points[0])
        }
        _ => chain,
    }
}

/// Arithmetic mean of the vertex coordinates, `None` for an empty sequence.
///
/// Adequate for risk-zone lookup and for anchoring local map windows; not an
/// area-weighted polygon centroid.
pub fn mean_centroid(points: &[GeoPoint]) -> Option<GeoPoint> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(|p| p.lat).sum::<f64>() / n;
    let lng = points.iter().map(|p| p.lng).sum::<f64>() / n;
    Some(GeoPoint::new(lat, lng))
}
