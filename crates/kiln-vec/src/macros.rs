//! Array literal macro.

/// Build a [`DynArray`](crate::DynArray) from a list of elements or from
/// a value and a count.
///
/// ```
/// use kiln_vec::dyn_array;
///
/// let a = dyn_array![1, 2, 3];
/// assert_eq!(a.capacity(), 3);
///
/// let b = dyn_array![0u8; 4];
/// assert_eq!(b, [0, 0, 0, 0]);
///
/// let c: kiln_vec::DynArray<String> = dyn_array![];
/// assert!(c.is_empty());
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynArray::new()
    };
    ($value:expr; $n:expr) => {
        $crate::DynArray::from_elem($n, $value)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynArray::from([$($value),+])
    };
}
