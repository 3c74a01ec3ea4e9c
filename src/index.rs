//! Index normalization shared by collections and the path engines.
//!
//! Every user facing index may be negative, meaning "counted from the end",
//! and ranges are inclusive of their upper bound so that `(0, -1)` addresses
//! the whole sequence. All bounds arithmetic in the crate goes through here.

/// Resolves a possibly negative index against a sequence of length `len`.
///
/// Returns `None` when the index is out of bounds after adjustment.
///
/// # Example
///
/// ```
/// use yamlnub::index::abs_index;
///
/// assert_eq!(abs_index(4, -1), Some(3));
/// assert_eq!(abs_index(4, 2), Some(2));
/// assert_eq!(abs_index(4, 4), None);
/// assert_eq!(abs_index(4, -5), None);
/// ```
pub fn abs_index(len: usize, i: isize) -> Option<usize> {
    let len = len as isize;
    let i = if i < 0 { len + i } else { i };
    if i >= 0 && i < len {
        Some(i as usize)
    } else {
        None
    }
}

/// Resolves an inclusive `(i, j)` range into a half-open `start..end` pair.
///
/// Each bound is adjusted for negative notation first. A start that is still
/// negative is moved to `0` and an end past the last element is moved to
/// `len - 1`. Returns `None` when nothing is addressed, which happens when
/// the sequence is empty or the bounds cross.
///
/// # Example
///
/// ```
/// use yamlnub::index::abs_range;
///
/// assert_eq!(abs_range(4, 0, -1), Some((0, 4)));
/// assert_eq!(abs_range(4, -2, -1), Some((2, 4)));
/// assert_eq!(abs_range(4, -6, 6), Some((0, 4)));
/// assert_eq!(abs_range(4, 2, -3), None);
/// ```
pub fn abs_range(len: usize, i: isize, j: isize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let n = len as isize;

    let mut start = if i < 0 { n + i } else { i };
    let mut end = if j < 0 { n + j } else { j };
    if start < 0 {
        start = 0;
    }
    if end >= n {
        end = n - 1;
    }

    if start > end || start >= n || end < 0 {
        return None;
    }
    Some((start as usize, end as usize + 1))
}

/// The inclusive range covering a whole sequence, i.e. what "no indices" means.
pub fn full_range(len: usize) -> Option<(usize, usize)> {
    abs_range(len, 0, -1)
}

/// Resolves the offset at which an insert at index `i` places new elements.
///
/// A non-negative index inserts before the element currently at that
/// position. A negative index inserts after the resolved element, so `-1`
/// appends. Returns `None` when `i` does not resolve to an existing element.
///
/// # Example
///
/// ```
/// use yamlnub::index::insert_offset;
///
/// assert_eq!(insert_offset(2, 0), Some(0));
/// assert_eq!(insert_offset(2, 1), Some(1));
/// assert_eq!(insert_offset(2, -1), Some(2));
/// assert_eq!(insert_offset(2, -2), Some(1));
/// assert_eq!(insert_offset(2, 2), None);
/// ```
pub fn insert_offset(len: usize, i: isize) -> Option<usize> {
    let offset = abs_index(len, i)?;
    if i < 0 {
        Some(offset + 1)
    } else {
        Some(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abs_index_positive_and_negative() {
        assert_eq!(abs_index(4, 0), Some(0));
        assert_eq!(abs_index(4, 3), Some(3));
        assert_eq!(abs_index(4, -1), Some(3));
        assert_eq!(abs_index(4, -4), Some(0));
    }

    #[test]
    fn test_abs_index_out_of_bounds() {
        assert_eq!(abs_index(0, 0), None);
        assert_eq!(abs_index(0, -1), None);
        assert_eq!(abs_index(1, 3), None);
        assert_eq!(abs_index(1, -3), None);
    }

    #[test]
    fn test_abs_index_is_idempotent() {
        for len in 1..6usize {
            for i in -(len as isize)..(len as isize) {
                let once = abs_index(len, i).unwrap();
                assert_eq!(abs_index(len, once as isize), Some(once));
            }
        }
    }

    #[test]
    fn test_abs_range_whole() {
        assert_eq!(abs_range(3, 0, -1), Some((0, 3)));
        assert_eq!(abs_range(3, 0, 2), Some((0, 3)));
        assert_eq!(full_range(3), Some((0, 3)));
        assert_eq!(full_range(0), None);
    }

    #[test]
    fn test_abs_range_clamps_out_of_bounds() {
        assert_eq!(abs_range(1, 0, 2), Some((0, 1)));
        assert_eq!(abs_range(3, -6, 6), Some((0, 3)));
    }

    #[test]
    fn test_abs_range_singles() {
        assert_eq!(abs_range(4, -1, -1), Some((3, 4)));
        assert_eq!(abs_range(4, 0, 0), Some((0, 1)));
        assert_eq!(abs_range(4, 1, -3), Some((1, 2)));
        assert_eq!(abs_range(4, 2, -2), Some((2, 3)));
    }

    #[test]
    fn test_abs_range_mutually_exclusive() {
        assert_eq!(abs_range(4, 2, -3), None);
        assert_eq!(abs_range(4, 0, -5), None);
        assert_eq!(abs_range(4, 4, -1), None);
        assert_eq!(abs_range(4, 6, -1), None);
        assert_eq!(abs_range(4, 3, 2), None);
    }

    #[test]
    fn test_insert_offset() {
        assert_eq!(insert_offset(2, 0), Some(0));
        assert_eq!(insert_offset(2, -2), Some(1));
        assert_eq!(insert_offset(2, -1), Some(2));
        assert_eq!(insert_offset(2, 10), None);
        assert_eq!(insert_offset(2, -3), None);
        assert_eq!(insert_offset(0, 0), None);
    }
}
