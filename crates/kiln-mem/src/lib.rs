//! Typed raw storage and uninitialized-range construction for Kiln containers.
//!
//! This crate separates *storage* from *object lifetime*. A [`RawBlock`]
//! is memory sized for `n` values of `T` that holds no live objects until
//! something is constructed into it. Containers built on top decide which
//! slots are live and are responsible for destroying exactly those.
//! This crate is one of two that contain `unsafe` code (along with
//! `kiln-vec`).
//!
//! # Layers
//!
//! ```text
//! block      allocate / try_allocate / deallocate / max_slots   (RawBlock<T>)
//! construct  construct / construct_from / destroy               (one slot)
//! uninit     uninitialized_copy / _fill / _fill_n / destroy_range
//!            relocate / relocate_nonoverlapping                 (slot ranges)
//! ```
//!
//! # Allocation failure
//!
//! [`allocate`] is fail-fast: an allocator refusal is logged at error level
//! and handed to [`std::alloc::handle_alloc_error`], which terminates the
//! process. A request larger than [`max_slots`] panics with a capacity
//! overflow message. [`try_allocate`] reports both conditions as
//! [`AllocError`] instead.
//!
//! # Panic behaviour
//!
//! The bulk fill and copy operations destroy whatever they already built if
//! a `clone` panics part-way, so a failed bulk construction never leaves a
//! partially live range behind.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod block;
pub mod construct;
pub mod error;
pub mod uninit;

// Public re-exports for the primary API surface.
pub use block::{allocate, deallocate, max_slots, try_allocate, RawBlock};
pub use construct::{construct, construct_from, destroy};
pub use error::{AllocError, AllocResult};
pub use uninit::{
    destroy_range, relocate, relocate_nonoverlapping, uninitialized_copy, uninitialized_fill,
    uninitialized_fill_n,
};
