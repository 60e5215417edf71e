/// Rounds `value` up to the next multiple of `n`.
///
/// `n` is expected to be a power of two. An `n` of 0 or 1 returns `value` unchanged.
#[inline]
pub fn align_up(value: usize, n: usize) -> usize {
    if n <= 1 {
        return value;
    }
    debug_assert!(n.is_power_of_two(), "alignment {n} is not a power of two");
    (value + n - 1) & !(n - 1)
}

/// Returns `true` if `value` is a multiple of `n`. `n` is expected to be a power of two.
#[inline]
pub fn is_aligned(value: usize, n: usize) -> bool {
    align_up(value, n) == value
}
