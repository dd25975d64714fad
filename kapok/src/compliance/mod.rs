use crate::entities::{AccuracyStats, Boundary};
use crate::geometry::GeoPoint;
use crate::geometry::measure::Closure;
use crate::position::SignalQuality;
use crate::risk::{RiskLevel, RiskTable};
use serde::{Deserialize, Serialize};

/// Vertices needed before a boundary may be completed.
pub const MIN_BOUNDARY_POINTS: usize = 3;
/// Vertex capacity of a single plot walk.
pub const MAX_BOUNDARY_POINTS: usize = 20;
/// Above this area the EUDR forest definition applies, in hectares.
pub const FOREST_DEFINITION_HECTARES: f64 = 0.5;
/// Above this area a full polygon, not a single point, must be on file, in
/// hectares.
pub const POLYGON_MAPPING_HECTARES: f64 = 4.0;
/// Decimal digits per coordinate for the high precision classification.
pub const HIGH_PRECISION_DECIMAL_DIGITS: usize = 6;

/// Vertex count needed, with fully precise coordinates, for
/// [`GpsPrecision::High`].
const HIGH_PRECISION_MIN_POINTS: usize = 4;
/// Vertex count needed for at least [`GpsPrecision::Medium`].
const MEDIUM_PRECISION_MIN_POINTS: usize = 3;

/// Thresholds driving the compliance verdict. The defaults are the EUDR
/// values; stricter due-diligence programmes load their own.
#[derive(Serialize, Deserialize, Clone, Debug, Copy, PartialEq)]
pub struct ComplianceConfig {
    pub min_boundary_points: usize,
    pub max_boundary_points: usize,
    pub forest_definition_hectares: f64,
    pub polygon_mapping_hectares: f64,
    pub high_precision_decimal_digits: usize,
}

impl Default for ComplianceConfig {
    fn default() -> Self {
        ComplianceConfig {
            min_boundary_points: MIN_BOUNDARY_POINTS,
            max_boundary_points: MAX_BOUNDARY_POINTS,
            forest_definition_hectares: FOREST_DEFINITION_HECTARES,
            polygon_mapping_hectares: POLYGON_MAPPING_HECTARES,
            high_precision_decimal_digits: HIGH_PRECISION_DECIMAL_DIGITS,
        }
    }
}

impl ComplianceConfig {
    /// Profile for programmes that demand six-vertex minimum mapping.
    pub fn strict() -> Self {
        ComplianceConfig {
            min_boundary_points: 6,
            ..Self::default()
        }
    }
}

/// Coordinate precision classification of a captured vertex set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GpsPrecision {
    High,
    Medium,
    Low,
}

/// Decimal digits in the shortest round-trip rendering of `v`.
///
/// Trailing zeros a device never reported do not count, matching how
/// coordinates are judged when they arrive as decimal strings.
pub fn decimal_digits(v: f64) -> usize {
    let s = format!("{v}");
    match s.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => 0,
    }
}

/// Precision classification: high demands every coordinate of every vertex
/// at the configured digit count plus a dense enough walk; a three-vertex
/// boundary can reach at most medium.
pub fn classify_precision(points: &[GeoPoint], config: &ComplianceConfig) -> GpsPrecision {
    let digits = config.high_precision_decimal_digits;
    let full_precision = points
        .iter()
        .all(|p| decimal_digits(p.lat) >= digits && decimal_digits(p.lng) >= digits);

    if full_precision && points.len() >= HIGH_PRECISION_MIN_POINTS {
        GpsPrecision::High
    } else if points.len() >= MEDIUM_PRECISION_MIN_POINTS {
        GpsPrecision::Medium
    } else {
        GpsPrecision::Low
    }
}

/// Read-only compliance snapshot of one boundary state.
///
/// Derived afresh by [`assess`] on every call; a boundary mutation yields a
/// new assessment rather than an update of an old one. For an unchanged
/// boundary, reassessing yields an identical value.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplianceAssessment {
    pub boundary_points: usize,
    pub area_hectares: f64,
    pub perimeter_m: f64,
    pub centroid: Option<GeoPoint>,
    pub risk_level: RiskLevel,
    pub gps_precision: GpsPrecision,
    pub signal_quality: SignalQuality,
    pub accuracy: Option<AccuracyStats>,
    /// Area above the forest-definition threshold
    pub forest_definition_applies: bool,
    /// Area above the polygon-mapping threshold
    pub polygon_mapping_required: bool,
}

/// Assess `boundary` against the EUDR thresholds in `config`, with risk
/// looked up in `risk_table`. `closure` carries whether the boundary is
/// sealed, so the perimeter matches what was actually walked.
pub fn assess(
    boundary: &Boundary,
    risk_table: &RiskTable,
    config: &ComplianceConfig,
    closure: Closure,
) -> ComplianceAssessment {
    let points = boundary.points();
    let area_hectares = boundary.area_hectares();
    let stats = boundary.accuracy_stats();

    ComplianceAssessment {
        boundary_points: points.len(),
        area_hectares,
        perimeter_m: boundary.perimeter_m(closure),
        centroid: boundary.centroid(),
        risk_level: risk_table.classify_boundary(&points),
        gps_precision: classify_precision(&points, config),
        signal_quality: SignalQuality::classify(stats.map(|s| s.worst_m)),
        accuracy: stats,
        forest_definition_applies: area_hectares > config.forest_definition_hectares,
        polygon_mapping_required: area_hectares > config.polygon_mapping_hectares,
    }
}
