#![forbid(unsafe_code)]

//! Element-wise gaps between a current and a target sequence.
//!
//! A gap is `target[i] - current[i]`: the amount position `i` still has to
//! move. Gaps are recomputed from scratch for every snapshot; nothing here
//! keeps state.
//!
//! # Failure Modes
//!
//! - Lengths differ: [`DeltaError::LengthMismatch`].
//! - Sub-range starts after it ends, or ends past the sequences (an empty
//!   range included): [`DeltaError::RangeMapping`].
//! - A gap overflows the element type or is not finite:
//!   [`DeltaError::UnrepresentableGap`].

use std::ops::Range;

use crate::error::{DeltaError, Result};
use crate::numeric::Numeric;

/// Compute `target[i] - current[i]` for every index in `range`.
///
/// `range` defaults to the whole sequence. Output is in index order and has
/// exactly `range.len()` elements.
pub fn gaps<T: Numeric>(
    current: &[T],
    target: &[T],
    range: Option<Range<usize>>,
) -> Result<Vec<T>> {
    let range = resolve_range(current, target, range)?;
    current[range.clone()]
        .iter()
        .zip(&target[range.clone()])
        .enumerate()
        .map(|(offset, (&now, &goal))| {
            goal.checked_gap(now).ok_or(DeltaError::UnrepresentableGap {
                index: range.start + offset,
            })
        })
        .collect()
}

/// Check lengths and map `range` onto both sequences.
pub(crate) fn resolve_range<T>(
    current: &[T],
    target: &[T],
    range: Option<Range<usize>>,
) -> Result<Range<usize>> {
    if current.len() != target.len() {
        return Err(DeltaError::LengthMismatch {
            current: current.len(),
            target: target.len(),
        });
    }
    let len = current.len();
    let range = range.unwrap_or(0..len);
    if range.start > range.end || range.end > len {
        return Err(DeltaError::RangeMapping { range, len });
    }
    Ok(range)
}
