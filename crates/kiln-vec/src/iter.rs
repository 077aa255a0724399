//! Owning iteration.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::mem;
use std::ptr;
use std::slice;

use kiln_mem::{deallocate, destroy_range, RawBlock};

use crate::array::DynArray;

/// Moves elements out of a [`DynArray`], front to back or back to front.
///
/// Elements not yet yielded are destroyed, and the storage released,
/// when the iterator is dropped.
pub struct IntoIter<T> {
    block: RawBlock<T>,
    /// Slots `[front, back)` are still live.
    front: usize,
    back: usize,
    _owns: PhantomData<T>,
}

// SAFETY: the iterator owns its remaining `T`s exclusively.
unsafe impl<T: Send> Send for IntoIter<T> {}
// SAFETY: shared access only reads through `as_slice`.
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> IntoIter<T> {
    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: `[front, back)` is live and inside the block.
        unsafe { slice::from_raw_parts(self.block.slot(self.front).as_ptr(), self.back - self.front) }
    }

    /// Take the element in `slot`, which must be live and then treated as raw.
    unsafe fn read_slot(&self, slot: usize) -> T {
        // SAFETY: forwarded from the caller.
        unsafe { ptr::read(self.block.slot(slot).as_ptr()) }
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let (block, len) = self.into_raw_parts();
        IntoIter {
            block,
            front: 0,
            back: len,
            _owns: PhantomData,
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let slot = self.front;
        self.front += 1;
        // SAFETY: `slot` was live and is now outside `[front, back)`.
        Some(unsafe { self.read_slot(slot) })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        // SAFETY: slot `back` was live and is now outside `[front, back)`.
        Some(unsafe { self.read_slot(self.back) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let (front, back) = (self.front, self.back);
        self.front = back;
        // SAFETY: `[front, back)` still holds unyielded elements.
        unsafe { destroy_range(self.block.range(front, back)) };
        deallocate(mem::replace(&mut self.block, RawBlock::dangling()));
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.as_slice()).finish()
    }
}
