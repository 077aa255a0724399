//! Integration test: bulk construction primitives over real blocks.
//!
//! Drives the primitives the way a container does (fill, copy, shift,
//! migrate, destroy) and checks construction and destruction counts.

use std::panic::{self, AssertUnwindSafe};

use kiln_mem::{
    allocate, deallocate, destroy_range, relocate, relocate_nonoverlapping, try_allocate,
    uninitialized_copy, uninitialized_fill_n, AllocError,
};
use kiln_test_utils::LifeCounter;
use proptest::prelude::*;

proptest! {
    #[test]
    fn fill_then_destroy_balances(slots in 0usize..256, n in 0usize..256) {
        let n = n.min(slots);
        let counter = LifeCounter::new();
        let value = counter.track(42);
        let block = allocate(slots);
        let end = unsafe { uninitialized_fill_n(block.start(), n, &value) };
        prop_assert_eq!(end, block.slot(n));
        prop_assert_eq!(counter.cloned(), n);
        unsafe { destroy_range(block.range(0, n)) };
        deallocate(block);
        drop(value);
        prop_assert_eq!(counter.live(), 0);
    }

    #[test]
    fn partial_fill_unwinds_cleanly(n in 1usize..64, budget in 0usize..64) {
        let counter = LifeCounter::with_clone_budget(budget);
        let value = counter.track(1);
        let block = allocate(n);
        let start = block.start();
        let result = panic::catch_unwind(AssertUnwindSafe(|| unsafe {
            uninitialized_fill_n(start, n, &value);
        }));
        if budget >= n {
            prop_assert!(result.is_ok());
            prop_assert_eq!(counter.live(), n + 1);
            unsafe { destroy_range(block.range(0, n)) };
        } else {
            prop_assert!(result.is_err());
            prop_assert_eq!(counter.live(), 1);
        }
        deallocate(block);
    }
}

#[test]
fn migrate_and_shift_like_a_container() {
    let counter = LifeCounter::new();
    let source: Vec<_> = (0..4).map(|v| counter.track(v)).collect();

    let small = allocate(4);
    unsafe { uninitialized_copy(&source, small.start()) };
    drop(source);
    assert_eq!(counter.live(), 4);

    // Migrate into a larger block, then open a gap at the front.
    let large = allocate(8);
    unsafe { relocate_nonoverlapping(small.start(), large.start(), 4) };
    deallocate(small);
    unsafe {
        relocate(large.slot(0), large.slot(1), 4);
        kiln_mem::construct(large.slot(0), counter.track(-1));
    }

    let values: Vec<i64> = (0..5)
        .map(|i| unsafe { large.slot(i).as_ref().value() })
        .collect();
    assert_eq!(values, vec![-1, 0, 1, 2, 3]);
    assert_eq!(counter.cloned(), 4);
    assert_eq!(counter.live(), 5);

    unsafe { destroy_range(large.range(0, 5)) };
    deallocate(large);
    assert_eq!(counter.live(), 0);
}

#[test]
fn try_allocate_reports_overflow_as_a_value() {
    assert!(matches!(
        try_allocate::<u32>(usize::MAX),
        Err(AllocError::CapacityOverflow { .. })
    ));
    let block = try_allocate::<u32>(16).unwrap();
    assert_eq!(block.slots(), 16);
    deallocate(block);
}
