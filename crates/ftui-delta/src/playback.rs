#![forbid(unsafe_code)]

//! Step-wise replay over a finished [`Plan`].
//!
//! [`PlanCursor`] walks the snapshot history forward and backward so a
//! renderer can redraw one step at a time, seek, or scrub. Position `0` is
//! the initial sequence and position `plan.len()` is the converged one.
//! The cursor owns no timing; callers decide when to advance.
//!
//! # Invariants
//!
//! 1. `position() <= plan.len()` at all times.
//! 2. `current()` is always `plan.snapshot_at(position())`.
//! 3. `progress()` is `position / len`, or `1.0` for an empty plan.

use crate::plan::Plan;
use crate::runs::RunDelta;

/// Borrowing cursor over a plan's snapshots.
#[derive(Debug, Clone)]
pub struct PlanCursor<'a, T> {
    plan: &'a Plan<T>,
    position: usize,
}

impl<'a, T> PlanCursor<'a, T> {
    /// Cursor at the initial sequence.
    #[must_use]
    pub fn new(plan: &'a Plan<T>) -> Self {
        Self { plan, position: 0 }
    }

    /// Current position in `0..=plan.len()`.
    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The plan being replayed.
    #[inline]
    #[must_use]
    pub fn plan(&self) -> &'a Plan<T> {
        self.plan
    }

    /// Snapshot at the current position.
    #[must_use]
    pub fn current(&self) -> &'a [T] {
        match self.position {
            0 => self.plan.initial(),
            k => &self.plan.steps()[k - 1].snapshot,
        }
    }

    /// Whether the cursor sits on the converged snapshot.
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.position == self.plan.len()
    }

    /// Fraction of steps played, in `[0.0, 1.0]`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.plan.is_empty() {
            return 1.0;
        }
        (self.position as f64 / self.plan.len() as f64) as f32
    }

    /// Move one step forward, returning the run that was applied.
    ///
    /// Returns `None` (and stays put) when already finished.
    pub fn advance(&mut self) -> Option<&'a RunDelta<T>> {
        let step = self.plan.steps().get(self.position)?;
        self.position += 1;
        Some(&step.run)
    }

    /// Move one step back, returning the run that was undone.
    ///
    /// Returns `None` (and stays put) when at the initial sequence.
    pub fn retreat(&mut self) -> Option<&'a RunDelta<T>> {
        let index = self.position.checked_sub(1)?;
        self.position = index;
        Some(&self.plan.steps()[index].run)
    }

    /// Jump to `position`, clamped to `0..=plan.len()`.
    pub fn seek(&mut self, position: usize) {
        self.position = position.min(self.plan.len());
    }

    /// Jump to the initial sequence.
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Jump to the converged sequence.
    pub fn finish(&mut self) {
        self.position = self.plan.len();
    }
}

impl<'a, T> Iterator for PlanCursor<'a, T> {
    type Item = (&'a RunDelta<T>, &'a [T]);

    /// Advance and yield the applied run with the snapshot it produced.
    fn next(&mut self) -> Option<Self::Item> {
        let run = self.advance()?;
        Some((run, self.current()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl<T> ExactSizeIterator for PlanCursor<'_, T> {}

impl<T> Plan<T> {
    /// Cursor positioned at the initial sequence.
    #[must_use]
    pub fn cursor(&self) -> PlanCursor<'_, T> {
        PlanCursor::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::build_plan;
    use crate::policy::First;

    fn sample() -> Plan<i32> {
        build_plan(&[5, 5, 5], &[8, 6, 9], &First).unwrap()
    }

    #[test]
    fn starts_at_initial() {
        let plan = sample();
        let cursor = plan.cursor();
        assert_eq!(cursor.position(), 0);
        assert_eq!(cursor.current(), &[5, 5, 5]);
        assert!(!cursor.is_finished());
        assert!((cursor.progress() - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn advance_and_retreat() {
        let plan = sample();
        let mut cursor = plan.cursor();
        assert_eq!(cursor.advance(), Some(&RunDelta::new(0..3, 1)));
        assert_eq!(cursor.current(), &[6, 6, 6]);
        assert_eq!(cursor.retreat(), Some(&RunDelta::new(0..3, 1)));
        assert_eq!(cursor.current(), &[5, 5, 5]);
        assert_eq!(cursor.retreat(), None);
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn advance_past_end_is_noop() {
        let plan = sample();
        let mut cursor = plan.cursor();
        cursor.finish();
        assert!(cursor.is_finished());
        assert_eq!(cursor.advance(), None);
        assert_eq!(cursor.current(), &[8, 6, 9]);
        assert!((cursor.progress() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn seek_clamps() {
        let plan = sample();
        let mut cursor = plan.cursor();
        cursor.seek(100);
        assert_eq!(cursor.position(), 3);
        cursor.seek(2);
        assert_eq!(cursor.current(), &[8, 6, 6]);
        cursor.rewind();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn iterates_remaining_steps() {
        let plan = sample();
        let mut cursor = plan.cursor();
        cursor.advance();
        assert_eq!(cursor.plan().len(), 3);
        assert_eq!(cursor.len(), 2);
        let frames: Vec<Vec<i32>> = cursor.map(|(_, snap)| snap.to_vec()).collect();
        assert_eq!(frames, vec![vec![8, 6, 6], vec![8, 6, 9]]);
    }

    #[test]
    fn empty_plan_is_finished() {
        let plan = build_plan(&[1, 2], &[1, 2], &First).unwrap();
        let cursor = plan.cursor();
        assert_eq!(cursor.len(), 0);
        assert!(cursor.is_finished());
        assert!((cursor.progress() - 1.0).abs() < f32::EPSILON);
    }
}
