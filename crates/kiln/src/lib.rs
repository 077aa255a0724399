//! Kiln: growable arrays over explicitly managed uninitialized storage.
//!
//! This is the facade crate that re-exports the public API of the Kiln
//! sub-crates. Adding `kiln` as a single dependency is enough for most
//! users.
//!
//! # Quick start
//!
//! ```rust
//! use kiln::prelude::*;
//!
//! let mut names: DynArray<String> = DynArray::new();
//! names.push_back("ada".into());
//! names.push_back("grace".into());
//! names.push_back("edsger".into());
//! assert_eq!(names.capacity(), 4);
//!
//! names.erase(0);
//! assert_eq!(names.to_string(), "grace edsger");
//!
//! let copy = names.clone();
//! assert_eq!(copy, names);
//! assert_eq!(copy.capacity(), 2);
//!
//! assert!(names.at(5).is_err());
//! assert_eq!(names.pop_back().as_deref(), Some("edsger"));
//!
//! let zeros = dyn_array![0u32; 8];
//! assert_eq!(zeros.len(), 8);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`mem`] | `kiln-mem` | Raw blocks, construction and bulk range primitives |
//! | [`array`] | `kiln-vec` | `DynArray`, its iterator, growth policy and errors |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Raw storage and construction primitives (`kiln-mem`).
///
/// Use these to build other containers on [`mem::RawBlock`]; the
/// functions that touch raw slots are `unsafe`.
pub use kiln_mem as mem;

/// The dynamic array (`kiln-vec`).
///
/// [`array::DynArray`] is also available in the [`prelude`].
pub use kiln_vec as array;

pub use kiln_vec::dyn_array;

/// Common imports for typical Kiln usage.
///
/// ```rust
/// use kiln::prelude::*;
/// ```
pub mod prelude {
    // Array
    pub use kiln_vec::{dyn_array, DynArray, GrowthPolicy, IntoIter};

    // Errors
    pub use kiln_vec::{AllocError, BoundsError};
}
