//! Lookups over sorted bin edge arrays.
//!
//! Edges are compared exactly, so these are written against [`Ord`] rather than
//! a floating point type.

/// The index of the first element of `array` that is greater than or equal to `q`
pub fn first_at_or_above<T: Ord>(array: &[T], q: &T) -> Option<usize> {
    let i = array.partition_point(|x| x < q);
    if i < array.len() {
        Some(i)
    } else {
        None
    }
}

/// The index of the last element of `array` that is less than or equal to `q`
pub fn last_at_or_below<T: Ord>(array: &[T], q: &T) -> Option<usize> {
    let i = array.partition_point(|x| x <= q);
    i.checked_sub(1)
}

/// Find the first and last indices of `array` whose elements fall in the
/// closed interval `[lo, hi]`, or `None` if no element does.
pub fn find_between<T: Ord>(array: &[T], lo: &T, hi: &T) -> Option<(usize, usize)> {
    let lo_i = first_at_or_above(array, lo)?;
    let hi_i = last_at_or_below(array, hi)?;
    if lo_i > hi_i {
        None
    } else {
        Some((lo_i, hi_i))
    }
}
