pub mod metadata;
pub mod network;
pub mod scratch;
pub mod spec;

pub use metadata::ModelMetadata;
pub use network::{free, Network};
pub use scratch::ScratchBuffers;
pub use spec::{create_network, LayerSpec, NetworkSpec};
