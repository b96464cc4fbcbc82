//! Index arithmetic for fixed-capacity circular buffers.
//!
//! Every derived index is expressed through [`offset`], so the buffer code
//! never repeats its own modular formula.

/// `base + delta` reduced modulo `capacity`, for negative `delta` as well.
///
/// `capacity` must be non-zero.
pub fn offset(base: usize, delta: isize, capacity: usize) -> usize {
    let capacity = capacity as isize;
    (base as isize % capacity + delta % capacity).rem_euclid(capacity) as usize
}

/// Slot of the most recently written sample.
pub fn last_index(cursor: usize, capacity: usize) -> usize {
    offset(cursor, -1, capacity)
}

/// Slot of the sample written just before the last one.
pub fn next_to_last_index(cursor: usize, capacity: usize) -> usize {
    offset(cursor, -2, capacity)
}

/// Physical slot of the `i`-th retained sample counted from the oldest.
pub fn logical_index(cursor: usize, i: usize, capacity: usize) -> usize {
    offset(cursor, (i % capacity) as isize, capacity)
}

#[cfg(test)]
mod tests {
    use super::{last_index, logical_index, next_to_last_index, offset};

    #[test]
    fn offset_wraps_in_both_directions() {
        assert_eq!(offset(0, -1, 5), 4);
        assert_eq!(offset(4, 1, 5), 0);
        assert_eq!(offset(2, -12, 5), 0);
        assert_eq!(offset(3, 12, 5), 0);
        assert_eq!(offset(0, 0, 1), 0);
    }

    #[test]
    fn derived_indices_follow_cursor() {
        assert_eq!(last_index(0, 4), 3);
        assert_eq!(next_to_last_index(0, 4), 2);
        assert_eq!(next_to_last_index(1, 4), 3);
        assert_eq!(logical_index(3, 0, 4), 3);
        assert_eq!(logical_index(3, 3, 4), 2);
        assert_eq!(logical_index(3, 7, 4), 2);
    }
}
