use serde::{Deserialize, Serialize};

/// Usability classification of the GPS signal, derived from the reported
/// horizontal accuracy of a fix. Lower accuracy values are better: the value
/// is the uncertainty radius in meters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalQuality {
    /// Accuracy within 5 m
    Excellent,
    /// Accuracy within 10 m
    Good,
    /// Accuracy within 20 m
    Fair,
    /// Accuracy worse than 20 m
    Poor,
    /// No accuracy reported, or no fix at all
    None,
}

impl SignalQuality {
    /// Pure classification of a reported accuracy; `None` input (no fix)
    /// maps to [`SignalQuality::None`].
    pub fn classify(accuracy_m: Option<f64>) -> Self {
        match accuracy_m {
            Some(acc) if acc <= 5.0 => SignalQuality::Excellent,
            Some(acc) if acc <= 10.0 => SignalQuality::Good,
            Some(acc) if acc <= 20.0 => SignalQuality::Fair,
            Some(_) => SignalQuality::Poor,
            None => SignalQuality::None,
        }
    }
}
