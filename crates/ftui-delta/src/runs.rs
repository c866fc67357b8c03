#![forbid(unsafe_code)]

//! Partition gaps into maximal same-signed runs.
//!
//! A run is a contiguous `[start, end)` span of non-zero gaps that all carry
//! the same sign. Each run carries the gap closest to zero as its delta:
//! adding that delta to every position in the run lands at least one
//! position exactly on target and moves no position past it.
//!
//! ```text
//! current   32   152   68    8
//! target     3    12   32   15
//! gap      -29  -140  -36    7
//!          [------ -29 ----) [7)
//! ```
//!
//! # Invariants
//!
//! 1. Runs are ordered by `start`, never overlap, and are maximal.
//! 2. The union of all runs is exactly the set of non-zero gap positions.
//! 3. Every gap in a run shares the delta's sign and `|delta| <= |gap|`.
//! 4. A sign flip closes the open run; the flipping position opens the next.

use std::cmp::Ordering;
use std::ops::Range;

use crate::error::Result;
use crate::gap::gaps;
use crate::numeric::{Numeric, Tolerance};

/// One movable run and the delta that is safe to apply to all of it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunDelta<T> {
    /// Half-open index span of the run.
    pub range: Range<usize>,
    /// Amount to add to every position in `range`.
    pub delta: T,
}

impl<T> RunDelta<T> {
    /// Create a run.
    #[must_use]
    pub fn new(range: Range<usize>, delta: T) -> Self {
        Self { range, delta }
    }

    /// Number of positions in the run.
    #[inline]
    #[must_use]
    pub fn width(&self) -> usize {
        self.range.len()
    }
}

/// Partition the gaps of `current` toward `target` using the default tolerance.
///
/// Returns an empty list once every position is on target.
pub fn find_runs<T: Numeric>(current: &[T], target: &[T]) -> Result<Vec<RunDelta<T>>> {
    find_runs_with(current, target, &Tolerance::default())
}

/// Partition the gaps of `current` toward `target` with an explicit tolerance.
///
/// Positions where `current` has settled on `target` (see
/// [`Tolerance::settled`]) count as zero gaps.
pub fn find_runs_with<T: Numeric>(
    current: &[T],
    target: &[T],
    tolerance: &Tolerance<T>,
) -> Result<Vec<RunDelta<T>>> {
    let mut gaps = gaps(current, target, None)?;
    assert_eq!(
        gaps.len(),
        current.len(),
        "gap count disagrees with the scanned index range"
    );
    for ((gap, &now), &goal) in gaps.iter_mut().zip(current).zip(target) {
        if tolerance.settled(now, goal) {
            *gap = T::ZERO;
        }
    }
    Ok(partition(&gaps, tolerance))
}

/// Scan a gap sequence left to right, emitting runs in opening order.
pub(crate) fn partition<T: Numeric>(gaps: &[T], tolerance: &Tolerance<T>) -> Vec<RunDelta<T>> {
    let mut runs = Vec::new();
    // Open run: (start, accumulated delta).
    let mut open: Option<(usize, T)> = None;

    for (i, &gap) in gaps.iter().enumerate() {
        if tolerance.is_zero(gap) {
            if let Some((start, acc)) = open.take() {
                runs.push(RunDelta::new(start..i, acc));
            }
            continue;
        }
        open = match open {
            None => Some((i, gap)),
            Some((start, acc)) if tolerance.opposed(acc, gap) => {
                runs.push(RunDelta::new(start..i, acc));
                Some((i, gap))
            }
            // Exact minimum: a delta larger than any member would overshoot it.
            Some((start, acc)) if gap.magnitude_cmp(acc) == Ordering::Less => Some((start, gap)),
            kept => kept,
        };
    }

    if let Some((start, acc)) = open {
        runs.push(RunDelta::new(start..gaps.len(), acc));
    }
    runs
}
