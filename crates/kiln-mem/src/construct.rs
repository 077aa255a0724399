//! Single-slot construction and destruction.

use std::ptr::{self, NonNull};

/// Move `value` into a raw slot, making it live.
///
/// # Safety
///
/// - `slot` must point into a block from this crate (or be valid for
///   writes of `T` and properly aligned).
/// - The slot must be raw. Constructing over a live object leaks it.
#[inline]
pub unsafe fn construct<T>(slot: NonNull<T>, value: T) {
    // SAFETY: the caller guarantees `slot` is writable, aligned and raw.
    unsafe { ptr::write(slot.as_ptr(), value) }
}

/// Convert `source` into a `T` and move it into a raw slot.
///
/// If the conversion panics the slot stays raw.
///
/// # Safety
///
/// Same contract as [`construct`].
#[inline]
pub unsafe fn construct_from<T, U>(slot: NonNull<T>, source: U)
where
    U: Into<T>,
{
    let value = source.into();
    // SAFETY: forwarded from the caller.
    unsafe { construct(slot, value) }
}

/// Run the destructor of the live object at `slot`, leaving it raw.
///
/// Storage is not released.
///
/// # Safety
///
/// - `slot` must point to a live, properly aligned `T`.
/// - The object must not be used or destroyed again afterwards.
#[inline]
pub unsafe fn destroy<T>(slot: NonNull<T>) {
    // SAFETY: the caller guarantees `slot` holds a live object that nobody
    // else will drop.
    unsafe { ptr::drop_in_place(slot.as_ptr()) }
}
