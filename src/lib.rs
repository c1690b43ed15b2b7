pub mod activation;
pub mod errors;
pub mod layers;
pub mod math;
pub mod model;
pub mod network;

// Convenience re-exports
pub use activation::{ActivationKind, apply_activation, relu, sigmoid};
pub use errors::{ForwardError, NetworkError};
pub use layers::dense::DenseLayer;
pub use math::matrix::Matrix;
pub use network::{
    create_network, free, LayerSpec, ModelMetadata, Network, NetworkSpec, ScratchBuffers,
};
