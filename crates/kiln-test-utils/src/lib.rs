//! Test utilities for the Kiln workspace.
//!
//! Container tests need to know exactly how many values were built and
//! destroyed. [`LifeCounter`] hands out [`Tracked`] values that report
//! every construction, clone and drop back to it.

#![forbid(unsafe_code)]

mod tracked;

pub use tracked::{LifeCounter, Tracked};
