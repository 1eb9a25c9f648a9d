//! Splitting output rows into contiguous ranges, one per participant.

use crate::error::{MxvError, Result};

/// Half-open row range [start, end) owned by one thread or process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub start: usize,
    pub end: usize,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Rows owned by participant `index` out of `parts`.
///
/// Every participant gets `rows / parts` rows; the last one also takes the
/// remainder, so 7 rows over 3 parts gives [0,2), [2,4), [4,7).
///
/// # Errors
///
/// `GroupTooLarge` if `parts` is zero or exceeds `rows` (someone would own
/// no rows at all).
///
/// # Panics
///
/// Panics if `index >= parts`.
pub fn row_partition(rows: usize, parts: usize, index: usize) -> Result<Partition> {
    if parts == 0 || parts > rows {
        return Err(MxvError::GroupTooLarge { group: parts, rows });
    }
    assert!(index < parts, "participant {} out of {}", index, parts);

    let chunk = rows / parts;
    let start = chunk * index;
    let end = if index == parts - 1 { rows } else { start + chunk };
    Ok(Partition { start, end })
}

/// All partitions of `rows` over `parts` participants, in participant order.
///
/// # Errors
///
/// `GroupTooLarge` if `parts` is zero or exceeds `rows`.
pub fn row_partitions(rows: usize, parts: usize) -> Result<Vec<Partition>> {
    if parts == 0 || parts > rows {
        return Err(MxvError::GroupTooLarge { group: parts, rows });
    }
    (0..parts).map(|p| row_partition(rows, parts, p)).collect()
}
