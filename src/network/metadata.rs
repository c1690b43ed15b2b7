use serde::{Deserialize, Serialize};

/// Cut-off used to turn a single sigmoid output into a 0/1 prediction when the
/// metadata does not set one.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Optional annotations attached to a saved network.
/// Every field is optional so sparse files deserialize cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ModelMetadata {
    #[serde(default)]
    pub description: Option<String>,
    /// Names of the input features, in input order.
    #[serde(default)]
    pub input_labels: Option<Vec<String>>,
    /// Human-readable labels for the output layer.
    #[serde(default)]
    pub output_labels: Option<Vec<String>>,
    #[serde(default)]
    pub decision_threshold: Option<f64>,
}

impl ModelMetadata {
    pub fn threshold(&self) -> f64 {
        self.decision_threshold.unwrap_or(DEFAULT_THRESHOLD)
    }

    /// `1` when `value` is strictly above the threshold, else `0`.
    pub fn classify(&self, value: f64) -> u8 {
        if value > self.threshold() { 1 } else { 0 }
    }
}
