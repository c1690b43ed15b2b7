//! Failures raised while building, saving, or loading a network.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("network must have at least one layer")]
    NoLayers,

    #[error("expected {expected} layer specs, got {actual}")]
    LayerCountMismatch { expected: usize, actual: usize },

    #[error("layer {layer} has a zero input or output size")]
    ZeroSizedLayer { layer: usize },

    #[error("layer {layer} is too large: {input_size} x {output_size} weights overflow")]
    LayerTooLarge { layer: usize, input_size: usize, output_size: usize },

    #[error("layer {layer} needs {expected} weights, got {actual}")]
    WeightCountMismatch { layer: usize, expected: usize, actual: usize },

    #[error("layer {layer} needs {expected} biases, got {actual}")]
    BiasCountMismatch { layer: usize, expected: usize, actual: usize },

    #[error("{layers} layers but {activations} activations")]
    ActivationCountMismatch { layers: usize, activations: usize },

    #[error("layer {layer} expects {expected} inputs but the previous layer produces {actual}")]
    ChainMismatch { layer: usize, expected: usize, actual: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
