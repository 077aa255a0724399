//! The dynamic array.
//!
//! [`DynArray`] owns one [`RawBlock`] split into a live prefix
//! `[0, len)` and raw spare capacity `[len, capacity)`. Every object
//! enters the block through a construction primitive and leaves it
//! through a destruction primitive or a bitwise move, so each element is
//! built once per insertion and destroyed once per removal.
//!
//! Growth and shifting move elements bitwise and never call `clone`.
//! `Clone`, [`DynArray::from_elem`] and [`DynArray::resize`] are the only
//! operations that clone.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop};
use std::ops::{Bound, Deref, DerefMut, Index, IndexMut, RangeBounds};
use std::ptr;
use std::slice;

use kiln_mem::{
    allocate, construct, deallocate, destroy_range, max_slots, relocate,
    relocate_nonoverlapping, try_allocate, uninitialized_copy, uninitialized_fill_n, AllocError,
    AllocResult, RawBlock,
};

use crate::config::GrowthPolicy;
use crate::error::BoundsError;

/// A growable contiguous array built on explicitly managed raw storage.
///
/// # Invariants
///
/// - `len <= capacity`.
/// - Slots `[0, len)` hold live objects; slots `[len, capacity)` are raw.
/// - The array is the sole owner of its block; clones get a new block.
///
/// A new array allocates nothing. Pushing into a full array doubles its
/// capacity (1, 2, 4, ...), see [`GrowthPolicy::DOUBLING`].
///
/// # Examples
///
/// ```
/// use kiln_vec::DynArray;
///
/// let mut a = DynArray::new();
/// a.push_back(10);
/// a.push_back(20);
/// a.push_back(30);
/// a.erase(1);
/// assert_eq!(a, [10, 30]);
/// assert_eq!(a.capacity(), 4);
/// ```
pub struct DynArray<T> {
    block: RawBlock<T>,
    len: usize,
    /// The array owns and drops values of `T`.
    _owns: PhantomData<T>,
}

// SAFETY: `DynArray<T>` owns its `T`s exclusively, like `Vec<T>`. The raw
// pointer inside `RawBlock` is never shared between arrays.
unsafe impl<T: Send> Send for DynArray<T> {}
// SAFETY: shared access only hands out `&T`.
unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// An empty array with no storage.
    pub const fn new() -> Self {
        Self {
            block: RawBlock::dangling(),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// An empty array with room for exactly `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` exceeds [`DynArray::max_size`]. Aborts if the
    /// allocator refuses.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            block: allocate(capacity),
            len: 0,
            _owns: PhantomData,
        }
    }

    /// An array of `n` copies of `value`.
    ///
    /// `value` itself becomes the last element, so exactly `n` elements
    /// are constructed in total (`n - 1` clones). With `n == 0` the value
    /// is dropped and nothing is allocated.
    pub fn from_elem(n: usize, value: T) -> Self
    where
        T: Clone,
    {
        let mut array = Self::with_capacity(n);
        array.resize(n, value);
        array
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the current block.
    pub fn capacity(&self) -> usize {
        self.block.slots()
    }

    /// Largest length an array of `T` can reach.
    ///
    /// Derived from the address space: `isize::MAX / size_of::<T>()`, or
    /// `usize::MAX` for zero-sized types.
    pub fn max_size(&self) -> usize {
        max_slots::<T>()
    }

    /// The live elements as a slice.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: the first `len` slots are live, and the block pointer is
        // non-null and aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.block.as_ptr(), self.len) }
    }

    /// The live elements as a mutable slice.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: as in `as_slice`; `&mut self` guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.block.as_ptr(), self.len) }
    }

    /// Checked element access.
    pub fn at(&self, index: usize) -> Result<&T, BoundsError> {
        let len = self.len;
        self.as_slice().get(index).ok_or(BoundsError { index, len })
    }

    /// Checked mutable element access.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, BoundsError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(BoundsError { index, len })
    }

    /// First element, if any.
    pub fn front(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// First element, mutably.
    pub fn front_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().first_mut()
    }

    /// Last element, if any.
    pub fn back(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Last element, mutably.
    pub fn back_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Append `value` as the new last element.
    ///
    /// Grows the storage first when the array is full.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            self.reserve(1);
        }
        // SAFETY: `len < capacity`, so slot `len` is raw and inside the block.
        unsafe { construct(self.block.slot(self.len), value) };
        self.len += 1;
    }

    /// Remove the last element and hand it back. `None` when empty.
    ///
    /// Dropping the returned value destroys it.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        // SAFETY: slot `len` was live; lowering `len` first marks it raw so
        // it is not dropped again.
        Some(unsafe { ptr::read(self.block.slot(self.len).as_ptr()) })
    }

    /// Insert `value` at `index`, shifting the tail one slot right.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        let len = self.len;
        assert!(
            index <= len,
            "insertion index {index} is past the end of array of length {len}"
        );
        if len == self.capacity() {
            self.reserve(1);
        }
        // SAFETY: `len < capacity`, so the shifted tail `[index + 1, len + 1)`
        // fits in the block, and slot `index` is raw once the tail has moved.
        unsafe {
            let slot = self.block.slot(index);
            relocate(slot, self.block.slot(index + 1), len - index);
            construct(slot, value);
        }
        self.len = len + 1;
    }

    /// Remove the element at `index` and hand it back, shifting the tail
    /// one slot left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        let len = self.len;
        if index >= len {
            panic!("{}", BoundsError { index, len });
        }
        // SAFETY: slot `index` is live. After reading it out the slot is raw,
        // the live tail `[index + 1, len)` moves into `[index, len - 1)`, and
        // the old last slot becomes raw.
        unsafe {
            let slot = self.block.slot(index);
            let removed = ptr::read(slot.as_ptr());
            relocate(self.block.slot(index + 1), slot, len - index - 1);
            self.len = len - 1;
            removed
        }
    }

    /// Destroy the element at `index`, shifting the tail one slot left.
    ///
    /// The vacated last slot is raw afterwards: exactly `len` objects
    /// remain live.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) {
        drop(self.remove(index));
    }

    /// Destroy every element in `range`, shifting the tail left to close
    /// the gap.
    ///
    /// # Panics
    ///
    /// Panics if the range starts after it ends or ends past `len`.
    pub fn erase_range<R>(&mut self, range: R)
    where
        R: RangeBounds<usize>,
    {
        let (start, end) = self.resolve_range(range);
        let len = self.len;
        // A panicking destructor leaks the tail instead of dropping it twice.
        self.len = start;
        // SAFETY: `[start, end)` is live and is destroyed exactly once here;
        // the live tail `[end, len)` then moves onto the now raw gap.
        unsafe {
            destroy_range(self.block.range(start, end));
            relocate(self.block.slot(end), self.block.slot(start), len - end);
        }
        self.len = len - (end - start);
    }

    /// Destroy elements past `len`. No effect if the array is shorter.
    /// Capacity is unchanged.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }
        let old_len = mem::replace(&mut self.len, len);
        // SAFETY: `[len, old_len)` was live and is now outside the live prefix.
        unsafe { destroy_range(self.block.range(len, old_len)) };
    }

    /// Destroy every element. Capacity is unchanged, so the storage is
    /// reused by later pushes.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Grow or shrink to `new_len` elements.
    ///
    /// Growing clones `value` into the new slots, with `value` itself
    /// taking the last one. Shrinking destroys the tail and drops `value`.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        let len = self.len;
        if new_len <= len {
            self.truncate(new_len);
            return;
        }
        let extra = new_len - len;
        self.reserve(extra);
        // SAFETY: `reserve` made `[len, new_len)` raw capacity. If a clone
        // panics, `uninitialized_fill_n` destroys its partial work and `len`
        // still covers only the original elements.
        unsafe {
            let last = uninitialized_fill_n(self.block.slot(len), extra - 1, &value);
            construct(last, value);
        }
        self.len = new_len;
    }

    /// Make room for at least `additional` more elements.
    ///
    /// # Panics
    ///
    /// Panics if the new capacity would exceed [`DynArray::max_size`].
    /// Aborts if the allocator refuses.
    pub fn reserve(&mut self, additional: usize) {
        if self.capacity() - self.len >= additional {
            return;
        }
        let capacity = match self.grown_capacity(additional) {
            Ok(capacity) => capacity,
            Err(err) => {
                log::error!("DynArray::reserve: {err}");
                panic!("{err}");
            }
        };
        self.migrate(allocate(capacity));
    }

    /// Make room for at least `additional` more elements, reporting
    /// failure instead of aborting.
    ///
    /// On error the array is unchanged.
    pub fn try_reserve(&mut self, additional: usize) -> AllocResult<()> {
        if self.capacity() - self.len >= additional {
            return Ok(());
        }
        let capacity = self.grown_capacity(additional)?;
        let block = try_allocate(capacity)?;
        self.migrate(block);
        Ok(())
    }

    /// Release spare capacity so that `capacity() == len()`.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() > self.len {
            self.migrate(allocate(self.len));
        }
    }

    /// Split into the block and live count without dropping anything.
    pub(crate) fn into_raw_parts(self) -> (RawBlock<T>, usize) {
        let mut this = ManuallyDrop::new(self);
        let block = mem::replace(&mut this.block, RawBlock::dangling());
        (block, this.len)
    }

    fn grown_capacity(&self, additional: usize) -> AllocResult<usize> {
        let max = max_slots::<T>();
        let required = self
            .len
            .checked_add(additional)
            .ok_or(AllocError::CapacityOverflow {
                requested: usize::MAX,
                max,
            })?;
        GrowthPolicy::DOUBLING
            .next_capacity(self.capacity(), required, max)
            .ok_or(AllocError::CapacityOverflow {
                requested: required,
                max,
            })
    }

    /// Move every live element into `block`, release the old block and
    /// adopt the new one.
    fn migrate(&mut self, block: RawBlock<T>) {
        debug_assert!(block.slots() >= self.len);
        log::debug!(
            "DynArray: migrating {} elements from {} to {} slots",
            self.len,
            self.capacity(),
            block.slots()
        );
        // SAFETY: the old prefix `[0, len)` is live, the new block is fresh
        // and has room for it, and the blocks are distinct allocations.
        // The old slots are raw afterwards, so releasing the block drops
        // nothing.
        unsafe { relocate_nonoverlapping(self.block.start(), block.start(), self.len) };
        deallocate(mem::replace(&mut self.block, block));
    }

    fn resolve_range<R>(&self, range: R) -> (usize, usize)
    where
        R: RangeBounds<usize>,
    {
        let len = self.len;
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start
                .checked_add(1)
                .unwrap_or_else(|| panic!("range start past usize::MAX")),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end
                .checked_add(1)
                .unwrap_or_else(|| panic!("range end past usize::MAX")),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => len,
        };
        assert!(start <= end, "range starts at {start} but ends at {end}");
        assert!(
            end <= len,
            "range end {end} out of bounds for array of length {len}"
        );
        (start, end)
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        let len = mem::replace(&mut self.len, 0);
        // SAFETY: `[0, len)` is live and nothing else will drop it.
        unsafe { destroy_range(self.block.range(0, len)) };
        deallocate(mem::replace(&mut self.block, RawBlock::dangling()));
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep copy into a block of exactly `len` slots.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.len);
        // SAFETY: `copy` has `len` raw slots. If a clone panics the partial
        // copy is destroyed, and `copy` still has length 0.
        unsafe { uninitialized_copy(self.as_slice(), copy.block.start()) };
        copy.len = self.len;
        copy
    }

    /// Copy, then swap: `self` is untouched if cloning `source` panics.
    fn clone_from(&mut self, source: &Self) {
        let mut fresh = source.clone();
        mem::swap(self, &mut fresh);
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics with the [`BoundsError`] message when out of range.
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.reserve(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut array = Self::new();
        array.extend(iter);
        array
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(values: &[T]) -> Self {
        let mut array = Self::with_capacity(values.len());
        // SAFETY: `array` has `values.len()` raw slots.
        unsafe { uninitialized_copy(values, array.block.start()) };
        array.len = values.len();
        array
    }
}

impl<T> From<Vec<T>> for DynArray<T> {
    fn from(values: Vec<T>) -> Self {
        values.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Elements separated by single spaces.
impl<T: fmt::Display> fmt::Display for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(item, f)?;
        }
        Ok(())
    }
}

impl<T, U> PartialEq<DynArray<U>> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T, U, const N: usize> PartialEq<[U; N]> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U> PartialEq<[U]> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T, U> PartialEq<Vec<U>> for DynArray<T>
where
    T: PartialEq<U>,
{
    fn eq(&self, other: &Vec<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiln_test_utils::{LifeCounter, Tracked};

    fn values(array: &DynArray<Tracked>) -> Vec<i64> {
        array.iter().map(Tracked::value).collect()
    }

    #[test]
    fn new_allocates_nothing() {
        let a: DynArray<u64> = DynArray::new();
        assert_eq!(a.len(), 0);
        assert_eq!(a.capacity(), 0);
        assert!(a.is_empty());
    }

    #[test]
    fn push_doubles_capacity() {
        let mut a = DynArray::new();
        let mut caps = Vec::new();
        for i in 0..9 {
            a.push_back(i);
            caps.push(a.capacity());
        }
        assert_eq!(caps, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn growth_moves_without_cloning() {
        let counter = LifeCounter::new();
        let mut a = DynArray::new();
        for i in 0..100 {
            a.push_back(counter.track(i));
        }
        assert_eq!(counter.cloned(), 0);
        assert_eq!(counter.live(), 100);
        assert_eq!(values(&a), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn from_elem_constructs_exactly_n() {
        let counter = LifeCounter::new();
        let a = DynArray::from_elem(5, counter.track(3));
        assert_eq!(counter.constructed(), 5);
        assert_eq!(a.capacity(), 5);
        assert_eq!(values(&a), vec![3; 5]);
        drop(a);
        assert_eq!(counter.dropped(), 5);
    }

    #[test]
    fn from_elem_zero_drops_the_value() {
        let counter = LifeCounter::new();
        let a = DynArray::from_elem(0, counter.track(3));
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 0);
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn pop_back_on_empty_is_none() {
        let mut a: DynArray<String> = DynArray::new();
        assert!(a.pop_back().is_none());
        assert_eq!(a.len(), 0);
    }

    #[test]
    fn erase_shifts_tail_and_leaks_nothing() {
        let counter = LifeCounter::new();
        let mut a: DynArray<_> = [10, 20, 30, 40].map(|v| counter.track(v)).into();
        a.erase(1);
        assert_eq!(values(&a), vec![10, 30, 40]);
        assert_eq!(a.len(), 3);
        assert_eq!(counter.live(), 3);
        assert_eq!(counter.dropped(), 1);
    }

    #[test]
    fn erase_last_element() {
        let mut a = DynArray::from([1, 2, 3]);
        a.erase(2);
        assert_eq!(a, [1, 2]);
    }

    #[test]
    #[should_panic(expected = "index 3 out of bounds for array of length 3")]
    fn erase_out_of_range_panics() {
        let mut a = DynArray::from([1, 2, 3]);
        a.erase(3);
    }

    #[test]
    fn erase_range_closes_gap() {
        let counter = LifeCounter::new();
        let mut a: DynArray<_> = (0..6).map(|v| counter.track(v)).collect();
        a.erase_range(1..4);
        assert_eq!(values(&a), vec![0, 4, 5]);
        assert_eq!(counter.live(), 3);

        a.erase_range(..);
        assert!(a.is_empty());
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn erase_empty_range_is_noop() {
        let mut a = DynArray::from([1, 2, 3]);
        a.erase_range(1..1);
        assert_eq!(a, [1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn erase_range_past_end_panics() {
        let mut a = DynArray::from([1, 2, 3]);
        a.erase_range(2..=3);
    }

    #[test]
    fn insert_shifts_right() {
        let mut a = DynArray::from([1, 3]);
        a.insert(1, 2);
        a.insert(3, 4);
        a.insert(0, 0);
        assert_eq!(a, [0, 1, 2, 3, 4]);
    }

    #[test]
    fn insert_into_full_array_grows() {
        let mut a = DynArray::from([1, 2]);
        assert_eq!(a.capacity(), 2);
        a.insert(0, 0);
        assert_eq!(a.capacity(), 4);
        assert_eq!(a, [0, 1, 2]);
    }

    #[test]
    #[should_panic(expected = "past the end")]
    fn insert_past_end_panics() {
        let mut a = DynArray::from([1]);
        a.insert(2, 5);
    }

    #[test]
    fn resize_grows_and_shrinks() {
        let counter = LifeCounter::new();
        let mut a = DynArray::new();
        a.resize(3, counter.track(1));
        assert_eq!(values(&a), vec![1, 1, 1]);
        a.resize(1, counter.track(2));
        assert_eq!(values(&a), vec![1]);
        assert_eq!(counter.live(), 1);
        assert_eq!(a.capacity(), 3);
    }

    #[test]
    fn clear_keeps_capacity() {
        let counter = LifeCounter::new();
        let mut a: DynArray<_> = (0..5).map(|v| counter.track(v)).collect();
        let cap = a.capacity();
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), cap);
        assert_eq!(counter.live(), 0);
    }

    #[test]
    fn clone_is_deep_and_exact() {
        let mut a = DynArray::with_capacity(10);
        a.extend(["x".to_string(), "y".to_string()]);
        let mut b = a.clone();
        assert_eq!(b.capacity(), 2);
        b[0].push('!');
        assert_eq!(a[0], "x");
        assert_eq!(b[0], "x!");
    }

    #[test]
    fn clone_from_replaces_contents() {
        let counter = LifeCounter::new();
        let source: DynArray<_> = (0..3).map(|v| counter.track(v)).collect();
        let mut target: DynArray<_> = (10..15).map(|v| counter.track(v)).collect();
        target.clone_from(&source);
        assert_eq!(values(&target), vec![0, 1, 2]);
        assert_eq!(counter.live(), 6);
    }

    #[test]
    fn clone_from_leaves_target_on_panic() {
        let counter = LifeCounter::with_clone_budget(1);
        let source: DynArray<_> = (0..3).map(|v| counter.track(v)).collect();
        let mut target = DynArray::from([counter.track(9)]);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            target.clone_from(&source);
        }));
        assert!(result.is_err());
        assert_eq!(values(&target), vec![9]);
        assert_eq!(counter.live(), 4);
    }

    #[test]
    fn checked_access() {
        let mut a = DynArray::from([5, 6]);
        assert_eq!(a.at(1), Ok(&6));
        assert_eq!(a.at(2), Err(BoundsError { index: 2, len: 2 }));
        *a.at_mut(0).unwrap() = 7;
        assert_eq!(a[0], 7);
        assert_eq!(a.get(9), None);
        assert_eq!(unsafe { *a.get_unchecked(1) }, 6);
    }

    #[test]
    #[should_panic(expected = "index 4 out of bounds for array of length 2")]
    fn index_out_of_range_panics() {
        let a = DynArray::from([5, 6]);
        let _ = a[4];
    }

    #[test]
    fn front_and_back() {
        let mut a = DynArray::from([1, 2, 3]);
        assert_eq!(a.front(), Some(&1));
        assert_eq!(a.back(), Some(&3));
        *a.back_mut().unwrap() = 30;
        *a.front_mut().unwrap() = 10;
        assert_eq!(a, [10, 2, 30]);
        assert_eq!(DynArray::<i32>::new().front(), None);
    }

    #[test]
    fn shrink_to_fit_releases_spare_slots() {
        let mut a = DynArray::with_capacity(16);
        a.extend([1, 2, 3]);
        a.shrink_to_fit();
        assert_eq!(a.capacity(), 3);
        assert_eq!(a, [1, 2, 3]);
        a.clear();
        a.shrink_to_fit();
        assert_eq!(a.capacity(), 0);
    }

    #[test]
    fn reserve_uses_amortized_growth() {
        let mut a = DynArray::from([1, 2, 3, 4]);
        a.reserve(1);
        assert_eq!(a.capacity(), 8);
        a.reserve(20);
        assert_eq!(a.capacity(), 24);
        a.reserve(0);
        assert_eq!(a.capacity(), 24);
    }

    #[test]
    fn try_reserve_reports_overflow_and_leaves_array_intact() {
        let mut a = DynArray::from([1u64, 2]);
        let err = a.try_reserve(usize::MAX).unwrap_err();
        assert!(matches!(err, AllocError::CapacityOverflow { .. }));
        let err = a.try_reserve(max_slots::<u64>()).unwrap_err();
        assert!(matches!(err, AllocError::CapacityOverflow { .. }));
        assert_eq!(a, [1, 2]);
        assert_eq!(a.capacity(), 2);
        assert!(a.try_reserve(10).is_ok());
        assert!(a.capacity() >= 12);
    }

    #[test]
    fn zero_sized_elements() {
        let mut a = DynArray::new();
        for _ in 0..10 {
            a.push_back(());
        }
        assert_eq!(a.len(), 10);
        assert_eq!(a.capacity(), 16);
        assert_eq!(a.max_size(), usize::MAX);
        a.erase(3);
        assert_eq!(a.len(), 9);
        assert_eq!(a.pop_back(), Some(()));
    }

    #[test]
    fn display_separates_with_spaces() {
        let a = DynArray::from([1, 2, 3]);
        assert_eq!(a.to_string(), "1 2 3");
        assert_eq!(DynArray::<i32>::new().to_string(), "");
        assert_eq!(format!("{a:?}"), "[1, 2, 3]");
    }

    #[test]
    fn max_size_tracks_element_size() {
        assert_eq!(DynArray::<u8>::new().max_size(), isize::MAX as usize);
        assert_eq!(DynArray::<u32>::new().max_size(), isize::MAX as usize / 4);
    }

    #[test]
    fn from_slice_clones_each_element() {
        let counter = LifeCounter::new();
        let src = vec![counter.track(1), counter.track(2)];
        let a = DynArray::from(src.as_slice());
        assert_eq!(counter.cloned(), 2);
        assert_eq!(values(&a), vec![1, 2]);
    }
}
