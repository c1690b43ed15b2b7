pub mod activation;

pub use activation::{ActivationKind, apply_activation, relu, sigmoid};
