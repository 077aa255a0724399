//! Bulk operations over ranges of raw or live slots.
//!
//! Ranges are passed as a start pointer plus a count, or as a slice
//! pointer (`NonNull<[T]>`) when both ends matter. None of these
//! functions check capacity: the caller guarantees the destination is
//! large enough and in the right raw/live state.

use std::mem;
use std::ptr::{self, NonNull};

use crate::construct::construct;

/// Tracks a prefix of slots constructed by an in-progress bulk operation.
///
/// Dropping the guard before [`InitGuard::finish`] (i.e. while unwinding
/// from a panicking `clone`) destroys that prefix.
struct InitGuard<T> {
    start: NonNull<T>,
    len: usize,
}

impl<T> InitGuard<T> {
    fn new(start: NonNull<T>) -> Self {
        Self { start, len: 0 }
    }

    /// # Safety
    ///
    /// Slot `start + len` must be raw and inside the destination range.
    unsafe fn push(&mut self, value: T) {
        // SAFETY: forwarded from the caller.
        unsafe { construct(self.start.add(self.len), value) };
        self.len += 1;
    }

    /// Keep everything constructed and return the end cursor.
    fn finish(self) -> NonNull<T> {
        // SAFETY: `len` slots past `start` were just constructed in range.
        let end = unsafe { self.start.add(self.len) };
        mem::forget(self);
        end
    }
}

impl<T> Drop for InitGuard<T> {
    fn drop(&mut self) {
        // SAFETY: exactly the first `len` slots were constructed by this guard.
        unsafe { destroy_range(NonNull::slice_from_raw_parts(self.start, self.len)) }
    }
}

/// Clone each element of `src`, in order, into consecutive raw slots
/// starting at `dst`. Returns the destination end cursor.
///
/// If a `clone` panics, the elements this call already constructed are
/// destroyed and the destination is raw again.
///
/// # Safety
///
/// - `dst` must start a range of raw, writable, aligned slots with room
///   for every item `src` yields.
/// - The destination must not overlap the source.
pub unsafe fn uninitialized_copy<'a, T, I>(src: I, dst: NonNull<T>) -> NonNull<T>
where
    T: Clone + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut guard = InitGuard::new(dst);
    for item in src {
        let value = item.clone();
        // SAFETY: the caller guarantees room for every source item.
        unsafe { guard.push(value) };
    }
    guard.finish()
}

/// Clone `value` into every raw slot of `dst`.
///
/// If a `clone` panics, the slots this call already constructed are
/// destroyed.
///
/// # Safety
///
/// Every slot of `dst` must be raw, writable and aligned.
pub unsafe fn uninitialized_fill<T: Clone>(dst: NonNull<[T]>, value: &T) {
    // SAFETY: forwarded; `dst.len()` slots are raw.
    unsafe { uninitialized_fill_n(dst.cast::<T>(), dst.len(), value) };
}

/// Clone `value` into the `n` raw slots starting at `dst`. Returns the
/// end cursor.
///
/// # Safety
///
/// The `n` slots starting at `dst` must be raw, writable and aligned.
pub unsafe fn uninitialized_fill_n<T: Clone>(dst: NonNull<T>, n: usize, value: &T) -> NonNull<T> {
    let mut guard = InitGuard::new(dst);
    for _ in 0..n {
        let copy = value.clone();
        // SAFETY: fewer than `n` slots have been pushed so far.
        unsafe { guard.push(copy) };
    }
    guard.finish()
}

/// Destroy every live object in `range`, front to back. Storage is not
/// released.
///
/// If a destructor panics the remaining objects are still destroyed.
///
/// # Safety
///
/// Every slot of `range` must hold a live object that is not used again.
pub unsafe fn destroy_range<T>(range: NonNull<[T]>) {
    if range.is_empty() || !mem::needs_drop::<T>() {
        return;
    }
    // SAFETY: the caller guarantees every slot is live and owned by us.
    unsafe { ptr::drop_in_place(range.as_ptr()) }
}

/// Move `n` live objects from `src` to `dst` bitwise.
///
/// Afterwards the destination slots are live and the source slots are
/// logically raw; no constructor or destructor runs. The ranges may
/// overlap, which is how containers shift elements in place.
///
/// # Safety
///
/// - The `n` slots at `src` must be live.
/// - The `n` slots at `dst` must be writable, aligned, and raw except
///   where they overlap `src`.
pub unsafe fn relocate<T>(src: NonNull<T>, dst: NonNull<T>, n: usize) {
    // SAFETY: forwarded from the caller; `ptr::copy` permits overlap.
    unsafe { ptr::copy(src.as_ptr(), dst.as_ptr(), n) }
}

/// Like [`relocate`], for ranges known not to overlap (e.g. migrating
/// into a fresh block).
///
/// # Safety
///
/// Same as [`relocate`], and the two ranges must be disjoint.
pub unsafe fn relocate_nonoverlapping<T>(src: NonNull<T>, dst: NonNull<T>, n: usize) {
    // SAFETY: forwarded from the caller.
    unsafe { ptr::copy_nonoverlapping(src.as_ptr(), dst.as_ptr(), n) }
}
