use serde::{Serialize, Deserialize};
use std::f64::consts::E;

/// Elementwise transform applied after a layer's affine step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    /// Identity: values pass through unchanged.
    #[default]
    #[serde(alias = "identity")]
    None,
    Sigmoid,
    Relu,
}

/// Classic logistic sigmoid: `1 / (1 + e^(-x))`.
///
/// Saturates to exactly `0.0` or `1.0` for very large magnitudes.
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + E.powf(-x))
}

/// Rectified linear unit: `max(0, x)`.
pub fn relu(x: f64) -> f64 {
    if x > 0.0 { x } else { 0.0 }
}

impl ActivationKind {
    /// Scalar activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationKind::None => x,
            ActivationKind::Sigmoid => sigmoid(x),
            ActivationKind::Relu => relu(x),
        }
    }

    /// Transforms every element of `data` in place. An empty slice is a no-op.
    pub fn apply(&self, data: &mut [f64]) {
        match self {
            ActivationKind::None => {}
            ActivationKind::Sigmoid => data.iter_mut().for_each(|x| *x = sigmoid(*x)),
            ActivationKind::Relu => data.iter_mut().for_each(|x| *x = relu(*x)),
        }
    }
}

/// Applies `kind` to the first `count` elements of `data`.
///
/// `count` is clamped to `data.len()`, so a zero count or an empty buffer does
/// nothing.
pub fn apply_activation(kind: ActivationKind, data: &mut [f64], count: usize) {
    let n = count.min(data.len());
    kind.apply(&mut data[..n]);
}
