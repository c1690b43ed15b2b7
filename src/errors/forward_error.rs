//! Failures reported by a forward pass.

use thiserror::Error;

/// Why a forward pass was rejected. Nothing is written to the caller's output
/// buffer when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ForwardError {
    #[error("network has no layers or its activation list does not match its layers")]
    InvalidNetwork,

    #[error("input or output buffer is empty or too small")]
    InvalidBuffers,

    #[error("every layer reports a non-positive output width")]
    CorruptedConfiguration,

    #[error("input too short: first layer expects {expected} values, got {actual}")]
    InvalidInputSize { expected: usize, actual: usize },

    #[error("failed to allocate scratch buffers")]
    AllocationFailure,
}
