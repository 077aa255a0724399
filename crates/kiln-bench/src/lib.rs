//! Benchmark workloads for the Kiln containers.
//!
//! - [`filled`]: an array pre-populated with `0..n`
//! - [`strings`]: an array of short heap strings, for clone-heavy paths

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use kiln_vec::DynArray;

/// Array holding `0..n`, with capacity exactly `n`.
pub fn filled(n: usize) -> DynArray<u64> {
    (0..n as u64).collect()
}

/// Array of `n` distinct short strings.
pub fn strings(n: usize) -> DynArray<String> {
    (0..n).map(|i| format!("item-{i}")).collect()
}
