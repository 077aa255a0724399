//! Storage allocation error types.

use thiserror::Error;

/// Result of a recoverable storage request.
pub type AllocResult<T> = Result<T, AllocError>;

/// Errors returned by [`try_allocate`](crate::try_allocate) and the
/// `try_*` container operations built on it.
///
/// The fail-fast [`allocate`](crate::allocate) never returns these: it
/// terminates instead.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum AllocError {
    /// The slot count cannot be represented as a single allocation.
    #[error("capacity overflow: requested {requested} slots, at most {max} fit in the address space")]
    CapacityOverflow {
        /// Number of slots requested.
        requested: usize,
        /// Largest slot count a block of this type may have.
        max: usize,
    },
    /// The global allocator refused the request.
    #[error("out of memory: could not allocate {bytes} bytes for {slots} slots")]
    OutOfMemory {
        /// Number of slots requested.
        slots: usize,
        /// Size of the refused request in bytes.
        bytes: usize,
    },
}
