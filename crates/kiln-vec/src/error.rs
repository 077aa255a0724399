//! Array access error types.

use thiserror::Error;

pub use kiln_mem::{AllocError, AllocResult};

/// Checked access to an index outside the live range.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
#[error("index {index} out of bounds for array of length {len}")]
pub struct BoundsError {
    /// The rejected index.
    pub index: usize,
    /// Length of the array at the time of access.
    pub len: usize,
}
