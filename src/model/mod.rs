//! Ready-made demo models.

pub mod xor;

pub use xor::{xor_network, xor_spec, XOR_TRUTH_TABLE};
