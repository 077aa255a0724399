//! Storage growth policy.

/// How a [`DynArray`](crate::DynArray) picks its next capacity.
///
/// When a push finds the array full, the new capacity is
/// `max(min_capacity, current * factor)`, raised to whatever a bulk
/// request needs and clamped to the element type's slot ceiling.
///
/// Arrays always grow by [`GrowthPolicy::DOUBLING`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrowthPolicy {
    /// Capacity of the first allocation.
    min_capacity: usize,
    /// Multiplier applied to the current capacity on growth. At least 2.
    factor: usize,
}

impl GrowthPolicy {
    /// First allocation of [`GrowthPolicy::DOUBLING`], in slots.
    pub const DEFAULT_MIN_CAPACITY: usize = 1;

    /// Growth multiplier of [`GrowthPolicy::DOUBLING`].
    pub const DEFAULT_FACTOR: usize = 2;

    /// Capacity doubling starting from one slot: 1, 2, 4, 8, ...
    pub const DOUBLING: Self = Self {
        min_capacity: Self::DEFAULT_MIN_CAPACITY,
        factor: Self::DEFAULT_FACTOR,
    };

    /// Capacity of the first allocation.
    pub fn min_capacity(&self) -> usize {
        self.min_capacity
    }

    /// Multiplier applied on growth.
    pub fn factor(&self) -> usize {
        self.factor
    }

    /// Next capacity for storage holding `current` slots that must fit
    /// at least `required` slots, never exceeding `max`.
    ///
    /// Returns `None` when `required > max`.
    pub fn next_capacity(&self, current: usize, required: usize, max: usize) -> Option<usize> {
        debug_assert!(self.factor >= 2, "growth factor {} is below 2", self.factor);
        if required > max {
            return None;
        }
        let grown = current.saturating_mul(self.factor).max(self.min_capacity);
        Some(grown.max(required).min(max))
    }
}
