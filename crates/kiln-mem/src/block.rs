//! Typed raw storage blocks and their allocation.
//!
//! A [`RawBlock`] is the only way to own storage from this crate. It is
//! not `Clone`, and [`deallocate`] consumes it, so a block cannot be
//! released twice. Blocks of zero slots and blocks of zero-sized types
//! never touch the allocator.

use std::alloc::{self, Layout};
use std::fmt;
use std::mem;
use std::ptr::NonNull;

use crate::error::{AllocError, AllocResult};

/// Largest number of `T` slots a single block may hold.
///
/// Allocations are limited to `isize::MAX` bytes, so this is
/// `isize::MAX / size_of::<T>()`. Zero-sized types need no storage and
/// are limited only by the slot counter: `usize::MAX`.
pub const fn max_slots<T>() -> usize {
    match (isize::MAX as usize).checked_div(mem::size_of::<T>()) {
        Some(slots) => slots,
        None => usize::MAX,
    }
}

/// Storage sized for `slots` values of `T`, with no object lifetimes.
///
/// Which slots hold live objects is tracked by the owner of the block.
/// Dropping a `RawBlock` does not release its memory (and does not run
/// any destructor); hand it to [`deallocate`] once every live slot has
/// been destroyed or moved out.
#[must_use = "a RawBlock must be released with `deallocate`"]
pub struct RawBlock<T> {
    /// Start of the block. Dangling (but aligned) when no memory is owned.
    ptr: NonNull<T>,
    /// Capacity in slots of `T`.
    slots: usize,
}

impl<T> RawBlock<T> {
    /// An empty block: zero slots, no memory.
    pub const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            slots: 0,
        }
    }

    /// Capacity of the block in slots.
    pub fn slots(&self) -> usize {
        self.slots
    }

    /// Size of the block in bytes.
    pub fn bytes(&self) -> usize {
        self.slots * mem::size_of::<T>()
    }

    /// Whether this block owns allocator memory.
    pub fn is_allocated(&self) -> bool {
        self.bytes() != 0
    }

    /// Pointer to the first slot.
    pub fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Non-null pointer to the first slot.
    pub fn start(&self) -> NonNull<T> {
        self.ptr
    }

    /// Pointer to slot `index`. `index == slots()` yields the end cursor.
    ///
    /// # Panics
    ///
    /// Panics if `index > slots()`.
    pub fn slot(&self, index: usize) -> NonNull<T> {
        assert!(
            index <= self.slots,
            "slot {index} out of range for block of {} slots",
            self.slots
        );
        // SAFETY: `index <= slots`, so the offset stays within the block or
        // lands one past its end. For zero-sized types the offset is zero bytes.
        unsafe { self.ptr.add(index) }
    }

    /// Slot range `[start, end)` as a slice pointer.
    ///
    /// # Panics
    ///
    /// Panics if `start > end` or `end > slots()`.
    pub fn range(&self, start: usize, end: usize) -> NonNull<[T]> {
        assert!(start <= end, "range start {start} is past its end {end}");
        let _ = self.slot(end);
        NonNull::slice_from_raw_parts(self.slot(start), end - start)
    }

    fn layout(&self) -> Layout {
        // SAFETY: the block was built from `Layout::array::<T>(slots)`, which
        // checked that this size and alignment form a valid layout.
        unsafe { Layout::from_size_align_unchecked(self.bytes(), mem::align_of::<T>()) }
    }
}

impl<T> fmt::Debug for RawBlock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawBlock")
            .field("ptr", &self.ptr)
            .field("slots", &self.slots)
            .finish()
    }
}

fn layout_for<T>(slots: usize) -> AllocResult<Layout> {
    let max = max_slots::<T>();
    if slots > max {
        return Err(AllocError::CapacityOverflow {
            requested: slots,
            max,
        });
    }
    Layout::array::<T>(slots).map_err(|_| AllocError::CapacityOverflow {
        requested: slots,
        max,
    })
}

/// Ask the global allocator for `layout`, or build a memoryless block.
///
/// Returns `None` only when the allocator refuses.
fn allocate_layout<T>(slots: usize, layout: Layout) -> Option<RawBlock<T>> {
    if layout.size() == 0 {
        return Some(RawBlock {
            ptr: NonNull::dangling(),
            slots,
        });
    }
    // SAFETY: `layout` has a non-zero size.
    let raw = unsafe { alloc::alloc(layout) };
    let ptr = NonNull::new(raw.cast::<T>())?;
    log::trace!(
        "allocated block of {slots} slots ({} bytes) at {ptr:p}",
        layout.size()
    );
    Some(RawBlock { ptr, slots })
}

/// Allocate raw storage for `slots` values of `T`, failing fast.
///
/// # Panics
///
/// Panics with a capacity overflow message if `slots > max_slots::<T>()`.
///
/// # Aborts
///
/// If the allocator refuses the request, the failure is logged at error
/// level and [`std::alloc::handle_alloc_error`] terminates the process.
/// Use [`try_allocate`] to receive the failure as a value.
pub fn allocate<T>(slots: usize) -> RawBlock<T> {
    let layout = match layout_for::<T>(slots) {
        Ok(layout) => layout,
        Err(err) => {
            log::error!("allocate: {err}");
            panic!("{err}");
        }
    };
    match allocate_layout(slots, layout) {
        Some(block) => block,
        None => {
            log::error!(
                "allocate: out of memory requesting {} bytes for {slots} slots",
                layout.size()
            );
            alloc::handle_alloc_error(layout)
        }
    }
}

/// Allocate raw storage for `slots` values of `T`, reporting failure.
///
/// Returns [`AllocError::CapacityOverflow`] when the request exceeds
/// [`max_slots`], and [`AllocError::OutOfMemory`] when the allocator
/// refuses it.
pub fn try_allocate<T>(slots: usize) -> AllocResult<RawBlock<T>> {
    let layout = layout_for::<T>(slots)?;
    allocate_layout(slots, layout).ok_or(AllocError::OutOfMemory {
        slots,
        bytes: layout.size(),
    })
}

/// Release a block obtained from [`allocate`] or [`try_allocate`].
///
/// Live objects still in the block are not destroyed; their destructors
/// never run. Destroy or move them out first.
pub fn deallocate<T>(block: RawBlock<T>) {
    if !block.is_allocated() {
        return;
    }
    let layout = block.layout();
    log::trace!(
        "releasing block of {} slots ({} bytes) at {:p}",
        block.slots,
        layout.size(),
        block.ptr
    );
    // SAFETY: the block owns memory, so it came from `allocate_layout` with
    // this exact layout, and `RawBlock` is neither `Clone` nor reusable after
    // this call, so the memory has not been released before.
    unsafe { alloc::dealloc(block.ptr.as_ptr().cast::<u8>(), layout) }
}
