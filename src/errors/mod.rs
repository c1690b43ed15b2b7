//! Error types.

pub mod forward_error;
pub mod network_error;

pub use forward_error::ForwardError;
pub use network_error::NetworkError;
