use serde::{Deserialize, Serialize};

use kapok::entities::SessionConfig;
use kapok::risk::RiskTable;

use crate::io::svg_util::SvgDrawOptions;

/// Configuration for a fieldwalk replay run
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WalkConfig {
    /// Capture policy and compliance thresholds of the mapping session
    pub session: SessionConfig,
    /// Risk zoning for the region. If not defined, the built-in Liberia table is used
    #[serde(default)]
    pub risk_zones: Option<RiskTable>,
    /// Seed for the jitter PRNG. If not defined, replays run in non-deterministic mode using entropy
    pub prng_seed: Option<u64>,
    /// Standard deviation of Gaussian jitter added to each replayed fix, in degrees
    pub jitter_sigma_deg: f64,
    /// Budget for a single-shot fix before it times out, in seconds
    pub fix_timeout_secs: u32,
    /// Zoom level of the imagery tile logged for the plot centroid
    pub centroid_tile_zoom: i32,
    /// Optional SVG drawing options
    #[serde(default)]
    pub svg_draw_options: SvgDrawOptions,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            risk_zones: None,
            prng_seed: Some(0),
            jitter_sigma_deg: 0.0,
            fix_timeout_secs: 10,
            centroid_tile_zoom: 16,
            svg_draw_options: SvgDrawOptions::default(),
        }
    }
}
