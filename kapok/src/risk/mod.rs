use crate::geometry::GeoPoint;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Deforestation risk of a zone, a vertex or a whole boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Standard,
    High,
}

/// Geographic predicate of one risk rule. All range checks are strict, open
/// intervals.
///
/// Serialized with a tag/content layout so rule tables read naturally from
/// JSON config files.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ZonePredicate {
    /// Latitude inside `(min, max)`, any longitude
    LatBand { min: f64, max: f64 },
    /// Longitude inside `(min, max)`, any latitude
    LngBand { min: f64, max: f64 },
    /// Both coordinates inside their ranges
    Rect {
        lat_min: f64,
        lat_max: f64,
        lng_min: f64,
        lng_max: f64,
    },
}

impl ZonePredicate {
    pub fn matches(&self, p: &GeoPoint) -> bool {
        match self {
            ZonePredicate::LatBand { min, max } => p.lat > *min && p.lat < *max,
            ZonePredicate::LngBand { min, max } => p.lng > *min && p.lng < *max,
            ZonePredicate::Rect {
                lat_min,
                lat_max,
                lng_min,
                lng_max,
            } => {
                p.lat > *lat_min && p.lat < *lat_max && p.lng > *lng_min && p.lng < *lng_max
            }
        }
    }
}

/// One ordered rule: where the predicate matches, the level applies.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RiskZone {
    pub predicate: ZonePredicate,
    pub level: RiskLevel,
}

/// Ordered risk-zone rule table. The first matching rule decides a point's
/// level; a point no rule covers is [`RiskLevel::Low`]. Rules are data: the
/// table is process-wide configuration, swappable without touching the
/// classifier.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct RiskTable {
    pub zones: Vec<RiskZone>,
}

impl RiskTable {
    pub fn new(zones: Vec<RiskZone>) -> Self {
        RiskTable { zones }
    }

    /// First-match-wins lookup over the ordered rules.
    pub fn classify_point(&self, p: &GeoPoint) -> RiskLevel {
        self.zones
            .iter()
            .find(|zone| zone.predicate.matches(p))
            .map_or(RiskLevel::Low, |zone| zone.level)
    }

    /// Aggregate level of a whole vertex sequence: any high vertex makes the
    /// boundary high; otherwise a strict majority of standard vertices makes
    /// it standard; otherwise low. The override-then-majority policy drives
    /// downstream compliance messaging and is preserved exactly.
    pub fn classify_boundary(&self, points: &[GeoPoint]) -> RiskLevel {
        let levels = points.iter().map(|p| self.classify_point(p)).collect_vec();
        if levels.contains(&RiskLevel::High) {
            return RiskLevel::High;
        }
        let n_standard = levels.iter().filter(|&&l| l == RiskLevel::Standard).count();
        match 2 * n_standard > points.len() {
            true => RiskLevel::Standard,
            false => RiskLevel::Low,
        }
    }
}

impl Default for RiskTable {
    /// Built-in Liberia zoning used when no table is configured: two
    /// protected-forest rectangles, the high-alert bands north of 6.5 N and
    /// west of -9.5 E, and the standard-monitoring bands next to them.
    /// More specific rules come first.
    fn default() -> Self {
        RiskTable::new(vec![
            RiskZone {
                predicate: ZonePredicate::Rect {
                    lat_min: 6.425,
                    lat_max: 6.44,
                    lng_min: -9.39,
                    lng_max: -9.375,
                },
                level: RiskLevel::High,
            },
            RiskZone {
                predicate: ZonePredicate::Rect {
                    lat_min: 6.415,
                    lat_max: 6.435,
                    lng_min: -9.375,
                    lng_max: -9.35,
                },
                level: RiskLevel::High,
            },
            RiskZone {
                predicate: ZonePredicate::LatBand { min: 6.5, max: 7.0 },
                level: RiskLevel::High,
            },
            RiskZone {
                predicate: ZonePredicate::LngBand {
                    min: -10.0,
                    max: -9.5,
                },
                level: RiskLevel::High,
            },
            RiskZone {
                predicate: ZonePredicate::LatBand { min: 6.3, max: 6.5 },
                level: RiskLevel::Standard,
            },
            RiskZone {
                predicate: ZonePredicate::LngBand {
                    min: -9.5,
                    max: -9.2,
                },
                level: RiskLevel::Standard,
            },
        ])
    }
}
