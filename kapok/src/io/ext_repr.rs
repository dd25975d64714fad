use crate::compliance::GpsPrecision;
use crate::position::SignalQuality;
use crate::risk::RiskLevel;
use serde::{Deserialize, Serialize};

/// External representation of one recorded plot walk, ready to replay
/// through a [`MappingSession`](crate::entities::MappingSession).
#[derive(Serialize, Deserialize, Clone)]
pub struct ExtMappingSession {
    /// Display name of the plot being mapped
    pub plot_name: String,
    /// Farmer the plot belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer: Option<String>,
    /// ISO 3166-1 alpha-2 code of the country the plot lies in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Seconds of walking time between consecutive fixes
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u32,
    /// Restart the script from the beginning once it runs out, for
    /// continuous-replay demos. The capture loop then runs until the
    /// boundary is full
    #[serde(default)]
    pub cycle: bool,
    /// Device output in walk order: fixes and injected failures
    pub script: Vec<ExtScriptedFix>,
}

fn default_interval_secs() -> u32 {
    2
}

/// One scripted step of a walk.
#[derive(Serialize, Deserialize, Clone)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum ExtScriptedFix {
    /// A fix the device delivers
    Fix(ExtFix),
    /// A failure the device raises instead of a fix
    Failure(ExtPositionFailure),
}

/// External representation of a [`GeoPoint`](crate::geometry::GeoPoint).
#[derive(Serialize, Deserialize, Clone, Copy)]
pub struct ExtFix {
    pub lat: f64,
    pub lng: f64,
    /// Horizontal accuracy radius in meters, lower is better.
    /// Unknown if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
}

/// Device failure kinds a script can inject, mirroring
/// [`PositionError`](crate::position::PositionError).
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExtPositionFailure {
    Unsupported,
    PermissionDenied,
    Unavailable,
    Timeout,
}

/// External representation of an assessed boundary, composed once a walk
/// ends. This is the record downstream reporting (due-diligence statements,
/// PDF exports) consumes.
#[derive(Serialize, Deserialize, Clone)]
pub struct ExtBoundaryReport {
    pub plot_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub farmer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    /// Whether the boundary was sealed by an explicit completion
    pub is_complete: bool,
    /// Captured vertices in polygon order
    pub points: Vec<ExtMappedPoint>,
    pub boundary_points_count: usize,
    pub area_hectares: f64,
    pub perimeter_meters: f64,
    /// Mean of the vertex coordinates as (lat, lng)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub centroid: Option<(f64, f64)>,
    pub risk_level: RiskLevel,
    pub gps_precision: GpsPrecision,
    pub signal_quality: SignalQuality,
    /// Mean reported accuracy over the vertices, in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_mean_m: Option<f64>,
    /// Worst reported accuracy over the vertices, in meters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy_worst_m: Option<f64>,
    pub forest_definition_applies: bool,
    pub polygon_mapping_required: bool,
}

/// External representation of a [`BoundaryVertex`](crate::entities::BoundaryVertex)
/// with its per-vertex risk classification.
#[derive(Serialize, Deserialize, Clone)]
pub struct ExtMappedPoint {
    /// Surveyor-facing marker label (`A`, `B`, ...)
    pub label: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub risk_level: RiskLevel,
}
