#![forbid(unsafe_code)]

//! Shift one run of a sequence by a uniform delta.

use std::ops::Range;

use crate::error::{DeltaError, Result};
use crate::numeric::Numeric;

/// Return a copy of `sequence` with `delta` added to every element in `range`.
///
/// Elements outside `range` are copied unchanged. The input is never
/// mutated. Fails with [`DeltaError::RangeOutOfBounds`] unless
/// `range.start <= range.end <= sequence.len()`.
pub fn apply<T: Numeric>(sequence: &[T], delta: T, range: Range<usize>) -> Result<Vec<T>> {
    if range.start > range.end || range.end > sequence.len() {
        return Err(DeltaError::RangeOutOfBounds {
            range,
            len: sequence.len(),
        });
    }
    let mut next = sequence.to_vec();
    for value in &mut next[range] {
        *value = *value + delta;
    }
    Ok(next)
}
