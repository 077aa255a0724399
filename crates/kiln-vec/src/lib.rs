//! Growable contiguous array over explicitly managed storage.
//!
//! [`DynArray`] keeps its elements in a [`kiln_mem::RawBlock`] and moves
//! every object through the primitives in `kiln-mem`: elements are
//! constructed into raw slots, relocated bitwise when the block grows or
//! the tail shifts, and destroyed exactly once.
//!
//! # Modules
//!
//! - [`array`]: [`DynArray`] and its operations.
//! - [`iter`]: [`IntoIter`], the owning iterator.
//! - [`config`]: [`GrowthPolicy`], how capacity grows.
//! - [`error`]: [`BoundsError`] plus the re-exported [`AllocError`].
//!
//! # Failure
//!
//! Checked access ([`DynArray::at`]) returns [`BoundsError`]. Indexing
//! and [`DynArray::erase`] panic with the same message. Growth through
//! [`DynArray::push_back`] or [`DynArray::reserve`] treats allocation
//! failure as fatal; [`DynArray::try_reserve`] reports it instead.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_op_in_unsafe_fn)]

#[macro_use]
mod macros;

pub mod array;
pub mod config;
pub mod error;
pub mod iter;

pub use array::DynArray;
pub use config::GrowthPolicy;
pub use error::{AllocError, AllocResult, BoundsError};
pub use iter::IntoIter;
