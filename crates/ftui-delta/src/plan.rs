#![forbid(unsafe_code)]

//! Plan construction: iterate partition → select → apply until converged.
//!
//! The planner is a small state machine over sequence snapshots:
//!
//! ```text
//!            find_runs(state, target)
//!   state ───────────────────────────► runs ──(empty)──► done
//!     ▲                                  │
//!     │ apply(state, delta, range)       │ policy.select(runs)
//!     └──────────────────────────── (range, delta) ──(none)──► PolicyAbstained
//! ```
//!
//! Every transition produces a new owned snapshot; earlier snapshots stay in
//! the [`Plan`] for replay (see [`crate::playback`]).
//!
//! # Termination
//!
//! Each applied delta is the closest-to-zero gap of its run, so at least one
//! position lands on target per step and no position ever leaves its target.
//! A plan therefore has at most as many steps as the initial sequence has
//! non-zero gaps. [`Planner::max_steps`] adds an explicit cap on top.

use std::ops::Range;

use crate::apply::apply;
use crate::config::DeltaConfig;
use crate::error::{DeltaError, Result};
use crate::gap::gaps;
use crate::numeric::{Numeric, Tolerance};
use crate::policy::SelectionPolicy;
use crate::runs::{RunDelta, find_runs_with};

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// One applied step: the run that moved and the snapshot it produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanStep<T> {
    /// Run and delta chosen by the policy.
    pub run: RunDelta<T>,
    /// Full sequence after applying `run`.
    pub snapshot: Vec<T>,
}

impl<T> PlanStep<T> {
    /// Index span that moved.
    #[inline]
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.run.range.clone()
    }
}

impl<T: Copy> PlanStep<T> {
    /// Amount added to every position in [`range`](Self::range).
    #[inline]
    #[must_use]
    pub fn delta(&self) -> T {
        self.run.delta
    }
}

/// Ordered record of moves from an initial sequence to its target.
///
/// `steps()[k].snapshot` is the state after step `k`. The initial sequence is
/// kept separately, so a plan with zero steps still knows where it started.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan<T> {
    initial: Vec<T>,
    steps: Vec<PlanStep<T>>,
}

impl<T> Plan<T> {
    /// The sequence the plan starts from.
    #[must_use]
    pub fn initial(&self) -> &[T] {
        &self.initial
    }

    /// Applied steps in execution order.
    #[must_use]
    pub fn steps(&self) -> &[PlanStep<T>] {
        &self.steps
    }

    /// Number of steps.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the initial sequence already matched the target.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The applied `(range, delta)` pairs in order.
    pub fn runs(&self) -> impl Iterator<Item = &RunDelta<T>> {
        self.steps.iter().map(|step| &step.run)
    }

    /// Snapshots after each step, in order (the initial sequence excluded).
    pub fn snapshots(&self) -> impl Iterator<Item = &[T]> {
        self.steps.iter().map(|step| step.snapshot.as_slice())
    }

    /// State at `position`, where `0` is the initial sequence and `k` is the
    /// state after step `k`.
    #[must_use]
    pub fn snapshot_at(&self, position: usize) -> Option<&[T]> {
        match position {
            0 => Some(&self.initial),
            k => self.steps.get(k - 1).map(|step| step.snapshot.as_slice()),
        }
    }

    /// The converged sequence (the initial one when the plan is empty).
    #[must_use]
    pub fn final_snapshot(&self) -> &[T] {
        self.steps
            .last()
            .map_or(self.initial.as_slice(), |step| step.snapshot.as_slice())
    }

    /// Positions touched by step `index`, or `None` if there is no such step.
    #[must_use]
    pub fn changed_positions(&self, index: usize) -> Option<Range<usize>> {
        self.steps.get(index).map(PlanStep::range)
    }

    /// Decompose into the initial sequence and the steps.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, Vec<PlanStep<T>>) {
        (self.initial, self.steps)
    }
}

impl<T: Numeric> Plan<T> {
    /// Re-check a plan against `target`.
    ///
    /// Confirms that every step is a non-empty run moving all of its
    /// positions toward target without crossing it, that each snapshot is
    /// the previous one with exactly that run shifted, and that the final
    /// snapshot matches `target` within `tolerance`. Returns the first
    /// violation found as a human-readable message.
    pub fn verify(
        &self,
        target: &[T],
        tolerance: &Tolerance<T>,
    ) -> std::result::Result<(), String> {
        if self.initial.len() != target.len() {
            return Err(format!(
                "initial length {} differs from target length {}",
                self.initial.len(),
                target.len()
            ));
        }
        let mut previous = self.initial.as_slice();
        for (k, step) in self.steps.iter().enumerate() {
            let range = step.range();
            if range.is_empty() || range.end > previous.len() {
                return Err(format!("step {k}: invalid range {range:?}"));
            }
            if tolerance.is_zero(step.delta()) {
                return Err(format!("step {k}: zero delta"));
            }
            let expected = apply(previous, step.delta(), range.clone())
                .map_err(|e| format!("step {k}: {e}"))?;
            if expected.len() != step.snapshot.len()
                || expected
                    .iter()
                    .zip(&step.snapshot)
                    .any(|(&a, &b)| !tolerance.approx_eq(a, b))
            {
                return Err(format!("step {k}: snapshot does not match applied run"));
            }
            let before = gaps(previous, target, Some(range.clone())).map_err(|e| e.to_string())?;
            let after =
                gaps(&step.snapshot, target, Some(range.clone())).map_err(|e| e.to_string())?;
            for (offset, (&b, &a)) in before.iter().zip(&after).enumerate() {
                let i = range.start + offset;
                if tolerance.settled(previous[i], target[i])
                    || tolerance.opposed(b, step.delta())
                {
                    return Err(format!("step {k}: position {i} moved away from target"));
                }
                if tolerance.opposed(a, b) && !tolerance.settled(step.snapshot[i], target[i]) {
                    return Err(format!("step {k}: position {i} overshot its target"));
                }
            }
            previous = &step.snapshot;
        }
        match previous
            .iter()
            .zip(target)
            .position(|(&now, &goal)| !tolerance.settled(now, goal))
        {
            Some(index) => Err(format!("final snapshot differs from target at {index}")),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

/// Builds plans with a fixed tolerance and optional step cap.
#[derive(Debug, Clone, Copy)]
pub struct Planner<T> {
    tolerance: Tolerance<T>,
    max_steps: Option<usize>,
}

impl<T: Numeric> Default for Planner<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Numeric> Planner<T> {
    /// Planner with the default tolerance and no step cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tolerance: Tolerance::default(),
            max_steps: None,
        }
    }

    /// Planner configured from a [`DeltaConfig`].
    #[must_use]
    pub fn from_config(config: &DeltaConfig) -> Self {
        Self {
            tolerance: Tolerance::new(config.epsilon),
            max_steps: config.max_steps,
        }
    }

    /// Replace the tolerance (builder).
    #[must_use]
    pub fn tolerance(mut self, tolerance: Tolerance<T>) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Cap the number of steps (builder). `None` removes the cap.
    #[must_use]
    pub fn max_steps(mut self, max_steps: Option<usize>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The tolerance in use.
    #[must_use]
    pub fn current_tolerance(&self) -> &Tolerance<T> {
        &self.tolerance
    }

    /// The step cap in use.
    #[must_use]
    pub fn step_limit(&self) -> Option<usize> {
        self.max_steps
    }

    /// Partition `current` toward `target` with this planner's tolerance.
    pub fn find_runs(&self, current: &[T], target: &[T]) -> Result<Vec<RunDelta<T>>> {
        find_runs_with(current, target, &self.tolerance)
    }

    /// Build a plan from `current` to `target`, letting `policy` pick each run.
    ///
    /// # Errors
    ///
    /// - [`DeltaError::LengthMismatch`] if the sequences differ in length.
    /// - [`DeltaError::UnrepresentableGap`] if a gap overflows.
    /// - [`DeltaError::PolicyAbstained`] if `policy` returns `None`.
    /// - [`DeltaError::StepLimitExceeded`] if the cap is reached first.
    ///
    /// # Panics
    ///
    /// If `policy` returns an index outside the options it was offered.
    pub fn build<P>(&self, current: &[T], target: &[T], policy: &P) -> Result<Plan<T>>
    where
        P: SelectionPolicy<T> + ?Sized,
    {
        let span = crate::debug_span!("delta.plan", len = current.len(), policy = policy.name());
        let _guard = span.enter();

        let mut state = current.to_vec();
        let mut steps: Vec<PlanStep<T>> = Vec::new();

        loop {
            let options = match self.find_runs(&state, target) {
                Ok(options) => options,
                Err(err) => {
                    crate::warn!(error = %err, "plan aborted");
                    return Err(err);
                }
            };
            if options.is_empty() {
                crate::debug!(steps = steps.len(), "plan converged");
                return Ok(Plan {
                    initial: current.to_vec(),
                    steps,
                });
            }
            if let Some(limit) = self.max_steps
                && steps.len() >= limit
            {
                crate::warn!(limit, remaining = options.len(), "plan step limit reached");
                return Err(DeltaError::StepLimitExceeded { limit });
            }

            let Some(choice) = policy.select(&options) else {
                crate::warn!(
                    step = steps.len(),
                    options = options.len(),
                    "selection policy abstained"
                );
                return Err(DeltaError::PolicyAbstained {
                    step: steps.len(),
                    options: options.len(),
                });
            };
            let run = match options.into_iter().nth(choice) {
                Some(run) => run,
                None => panic!(
                    "selection policy `{}` returned index {choice} outside the offered options",
                    policy.name()
                ),
            };

            // The range comes from a partition of `state`, so it is in bounds.
            let next = apply(&state, run.delta, run.range.clone())?;
            crate::trace!(
                step = steps.len(),
                start = run.range.start,
                end = run.range.end,
                delta = ?run.delta,
                "run applied"
            );
            state = next.clone();
            steps.push(PlanStep { run, snapshot: next });
        }
    }
}

/// Build a plan with the default [`Planner`].
pub fn build_plan<T, P>(current: &[T], target: &[T], policy: &P) -> Result<Plan<T>>
where
    T: Numeric,
    P: SelectionPolicy<T> + ?Sized,
{
    Planner::new().build(current, target, policy)
}
