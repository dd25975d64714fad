use crate::entities::BoundaryVertex;
use crate::geometry::GeoPoint;
use crate::geometry::measure::{self, Closure};
use crate::util::assertions;
use itertools::Itertools;
use ordered_float::OrderedFloat;
use thiserror::Error;

/// Rejections from boundary and session mutations. None of these corrupt
/// captured state: the vertex sequence is unchanged after a rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoundaryError {
    /// The configured vertex capacity is used up
    #[error("boundary already holds its maximum of {max_points} vertices")]
    CapacityExceeded { max_points: usize },
    /// Too few vertices for the requested transition
    #[error("{got} vertices captured, at least {required} required")]
    InsufficientPoints { got: usize, required: usize },
    /// The session is sealed; reset before capturing again
    #[error("mapping is already complete")]
    AlreadyComplete,
}

/// Accuracy of the device fixes backing a boundary, in meters.
#[derive(Debug, Clone, PartialEq, Copy)]
pub struct AccuracyStats {
    pub mean_m: f64,
    /// Largest (worst) accuracy value among the vertices
    pub worst_m: f64,
}

/// Ordered sequence of captured vertices forming, once closed, the plot
/// polygon. Insertion order is polygon order; appending and clearing are the
/// only mutations, there is no in-place edit or reorder.
///
/// Derived metrics (area, perimeter, centroid, accuracy) are recomputed from
/// the current vertex sequence on every read, so a reader can never observe
/// a stale value.
#[derive(Debug, Clone)]
pub struct Boundary {
    vertices: Vec<BoundaryVertex>,
    max_points: usize,
}

impl Boundary {
    pub fn new(max_points: usize) -> Self {
        assert!(
            max_points >= 3,
            "max_points: {max_points}, a boundary that can never close is useless"
        );
        Boundary {
            vertices: vec![],
            max_points,
        }
    }

    /// Append `point` as the next vertex, labeled from its ordinal.
    /// Near-duplicate points are accepted: a stationary device produces
    /// jittered fixes and the raw walk history is kept as recorded.
    pub fn append(&mut self, point: GeoPoint) -> Result<(), BoundaryError> {
        if self.vertices.len() >= self.max_points {
            return Err(BoundaryError::CapacityExceeded {
                max_points: self.max_points,
            });
        }
        let ordinal = self.vertices.len();
        self.vertices.push(BoundaryVertex::new(ordinal, point));
        debug_assert!(assertions::ordinals_are_contiguous(&self.vertices));
        Ok(())
    }

    /// Discard every vertex. The only corrective action: there is no
    /// targeted delete.
    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn vertices(&self) -> &[BoundaryVertex] {
        &self.vertices
    }

    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// The coordinates alone, in vertex order.
    pub fn points(&self) -> Vec<GeoPoint> {
        self.vertices.iter().map(|v| v.point).collect_vec()
    }

    pub fn last_point(&self) -> Option<GeoPoint> {
        self.vertices.last().map(|v| v.point)
    }

    /// `true` once at least `min_points` vertices are captured.
    pub fn is_complete(&self, min_points: usize) -> bool {
        self.vertices.len() >= min_points
    }

    /// Enclosed area in hectares; zero below 3 vertices.
    pub fn area_hectares(&self) -> f64 {
        measure::area_hectares(&self.points())
    }

    /// Walked distance in meters; `closure` decides whether the edge back to
    /// vertex A is counted.
    pub fn perimeter_m(&self, closure: Closure) -> f64 {
        measure::perimeter_m(&self.points(), closure)
    }

    /// Mean vertex coordinate, `None` while empty.
    pub fn centroid(&self) -> Option<GeoPoint> {
        measure::mean_centroid(&self.points())
    }

    /// Mean and worst accuracy over the vertices that carry one; `None` when
    /// no vertex reported accuracy (tap-placed boundaries).
    pub fn accuracy_stats(&self) -> Option<AccuracyStats> {
        let reported = self
            .vertices
            .iter()
            .filter_map(|v| v.point.accuracy)
            .collect_vec();
        let worst = reported.iter().copied().max_by_key(|&a| OrderedFloat(a))?;
        let mean = reported.iter().sum::<f64>() / reported.len() as f64;
        Some(AccuracyStats {
            mean_m: mean,
            worst_m: worst,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn lofa_walk() -> Vec<GeoPoint> {
        vec![
            GeoPoint::with_accuracy(7.225282, -9.003844, 2.8),
            GeoPoint::with_accuracy(7.225390, -9.003720, 3.1),
            GeoPoint::with_accuracy(7.225450, -9.003580, 2.9),
        ]
    }

    #[test]
    fn test_append_orders_and_labels_vertices() {
        let mut boundary = Boundary::new(20);
        for p in lofa_walk() {
            boundary.append(p).unwrap();
        }
        let labels: Vec<_> = boundary
            .vertices()
            .iter()
            .map(|v| v.label.clone().unwrap())
            .collect();
        assert_eq!(labels, ["A", "B", "C"]);
        assert_eq!(boundary.n_vertices(), 3);
        assert_eq!(boundary.last_point(), lofa_walk().last().copied());
    }

    #[test]
    fn test_capacity_is_enforced_and_state_preserved() {
        let mut boundary = Boundary::new(3);
        for p in lofa_walk() {
            boundary.append(p).unwrap();
        }
        let before = boundary.points();
        assert_eq!(
            boundary.append(GeoPoint::new(7.2256, -9.0035)),
            Err(BoundaryError::CapacityExceeded { max_points: 3 })
        );
        assert_eq!(boundary.points(), before);
    }

    #[test]
    fn test_completion_threshold() {
        let mut boundary = Boundary::new(20);
        assert!(!boundary.is_complete(3));
        for p in lofa_walk() {
            boundary.append(p).unwrap();
        }
        assert!(boundary.is_complete(3));
        assert!(!boundary.is_complete(6));
    }

    #[test]
    fn test_derived_metrics_follow_mutation() {
        let mut boundary = Boundary::new(20);
        assert_eq!(boundary.area_hectares(), 0.0);
        assert_eq!(boundary.centroid(), None);

        for p in lofa_walk() {
            boundary.append(p).unwrap();
        }
        assert!(boundary.area_hectares() > 0.0);
        assert!(boundary.perimeter_m(Closure::Open) > 0.0);
        assert!(boundary.centroid().is_some());

        boundary.clear();
        assert_eq!(boundary.area_hectares(), 0.0);
        assert_eq!(boundary.perimeter_m(Closure::Open), 0.0);
        assert_eq!(boundary.centroid(), None);
    }

    #[test]
    fn test_accuracy_stats() {
        let mut boundary = Boundary::new(20);
        assert_eq!(boundary.accuracy_stats(), None);
        for p in lofa_walk() {
            boundary.append(p).unwrap();
        }
        let stats = boundary.accuracy_stats().unwrap();
        assert!(approx_eq!(f64, stats.worst_m, 3.1));
        assert!(approx_eq!(
            f64,
            stats.mean_m,
            (2.8 + 3.1 + 2.9) / 3.0,
            epsilon = 1e-12
        ));
    }

    #[test]
    fn test_tap_placed_points_have_no_accuracy_stats() {
        let mut boundary = Boundary::new(20);
        boundary.append(GeoPoint::new(7.2253, -9.0038)).unwrap();
        boundary.append(GeoPoint::new(7.2254, -9.0037)).unwrap();
        assert_eq!(boundary.accuracy_stats(), None);
    }
}
