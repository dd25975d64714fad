use kapok::risk::RiskLevel;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct SvgDrawOptions {
    /// Theme of the rendered walk
    #[serde(default)]
    pub theme: SvgWalkThemes,
    /// Draws the reported accuracy radius around each vertex
    pub accuracy_discs: bool,
    /// Draws the marker label next to each vertex
    pub vertex_labels: bool,
    /// Draws the mean centroid of the captured vertices
    pub centroid_marker: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgWalkThemes::default(),
            accuracy_discs: false,
            vertex_labels: true,
            centroid_marker: true,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub enum SvgWalkThemes {
    FieldGreens,
    Gray,
}

impl SvgWalkThemes {
    pub fn get_theme(&self) -> SvgWalkTheme {
        match self {
            SvgWalkThemes::FieldGreens => FIELD_GREENS_THEME,
            SvgWalkThemes::Gray => GRAY_THEME,
        }
    }
}

impl Default for SvgWalkThemes {
    fn default() -> Self {
        SvgWalkThemes::FieldGreens
    }
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SvgWalkTheme {
    pub stroke_width_multiplier: f64,
    pub canvas_fill: &'static str,
    pub plot_fill: &'static str,
    pub label_fill: &'static str,
    pub centroid_fill: &'static str,
    pub risk_low_fill: &'static str,
    pub risk_standard_fill: &'static str,
    pub risk_high_fill: &'static str,
}

impl SvgWalkTheme {
    pub fn risk_fill(&self, level: RiskLevel) -> &'static str {
        match level {
            RiskLevel::Low => self.risk_low_fill,
            RiskLevel::Standard => self.risk_standard_fill,
            RiskLevel::High => self.risk_high_fill,
        }
    }
}

pub static FIELD_GREENS_THEME: SvgWalkTheme = SvgWalkTheme {
    stroke_width_multiplier: 2.0,
    canvas_fill: "#F2EFE9",
    plot_fill: "#A8C686",
    label_fill: "#2D2D2D",
    centroid_fill: "#1A4D2E",
    risk_low_fill: "#3E8914",
    risk_standard_fill: "#E8A013",
    risk_high_fill: "#D7263D",
};

pub static GRAY_THEME: SvgWalkTheme = SvgWalkTheme {
    stroke_width_multiplier: 2.5,
    canvas_fill: "#FFFFFF",
    plot_fill: "#C3C3C3",
    label_fill: "#2D2D2D",
    centroid_fill: "#000000",
    risk_low_fill: "#B0B0B0",
    risk_standard_fill: "#707070",
    risk_high_fill: "#303030",
};

/// Same hue at `fraction` of the brightness, for strokes derived from fills.
pub fn darken(color: &str, fraction: f64) -> String {
    let hex = color.trim_start_matches('#');
    let rgb = u32::from_str_radix(hex, 16).unwrap_or(0);
    let scale = |c: u32| ((c as f64) * fraction) as u32;
    let r = scale((rgb >> 16) & 0xFF);
    let g = scale((rgb >> 8) & 0xFF);
    let b = scale(rgb & 0xFF);
    format!("#{r:02X}{g:02X}{b:02X}")
}
