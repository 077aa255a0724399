//! Counting value type.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug)]
struct Counts {
    constructed: AtomicUsize,
    cloned: AtomicUsize,
    dropped: AtomicUsize,
    /// Clones still allowed before `clone()` panics.
    clone_budget: AtomicUsize,
}

/// Shared tally of [`Tracked`] lifetimes.
///
/// Cloning a `LifeCounter` shares the tally. Uses atomics so tracked
/// values stay `Send + Sync`.
#[derive(Clone, Debug)]
pub struct LifeCounter {
    counts: Arc<Counts>,
}

impl LifeCounter {
    /// A counter with no clone limit.
    pub fn new() -> Self {
        Self::with_clone_budget(usize::MAX)
    }

    /// A counter whose tracked values panic on clone once `budget`
    /// clones have succeeded.
    ///
    /// Useful for testing that bulk construction cleans up after a
    /// failing element.
    pub fn with_clone_budget(budget: usize) -> Self {
        Self {
            counts: Arc::new(Counts {
                constructed: AtomicUsize::new(0),
                cloned: AtomicUsize::new(0),
                dropped: AtomicUsize::new(0),
                clone_budget: AtomicUsize::new(budget),
            }),
        }
    }

    /// Build a new tracked value. Counts as one construction.
    pub fn track(&self, value: i64) -> Tracked {
        self.counts.constructed.fetch_add(1, Ordering::Relaxed);
        Tracked {
            value,
            counter: self.clone(),
        }
    }

    /// Constructions so far, clones included.
    pub fn constructed(&self) -> usize {
        self.counts.constructed.load(Ordering::Relaxed)
    }

    /// Successful clones so far.
    pub fn cloned(&self) -> usize {
        self.counts.cloned.load(Ordering::Relaxed)
    }

    /// Drops so far.
    pub fn dropped(&self) -> usize {
        self.counts.dropped.load(Ordering::Relaxed)
    }

    /// Values constructed and not yet dropped.
    pub fn live(&self) -> usize {
        self.constructed() - self.dropped()
    }
}

impl Default for LifeCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// An integer payload that reports its lifetime to a [`LifeCounter`].
pub struct Tracked {
    value: i64,
    counter: LifeCounter,
}

impl Tracked {
    /// The payload.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Replace the payload in place. Not a construction.
    pub fn set(&mut self, value: i64) {
        self.value = value;
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        let counts = &self.counter.counts;
        if counts
            .clone_budget
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |b| b.checked_sub(1))
            .is_err()
        {
            panic!("clone budget exhausted for Tracked({})", self.value);
        }
        counts.cloned.fetch_add(1, Ordering::Relaxed);
        self.counter.track(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counter.counts.dropped.fetch_add(1, Ordering::Relaxed);
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Tracked {}

impl PartialEq<i64> for Tracked {
    fn eq(&self, other: &i64) -> bool {
        self.value == *other
    }
}

impl fmt::Debug for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracked({})", self.value)
    }
}

impl fmt::Display for Tracked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
