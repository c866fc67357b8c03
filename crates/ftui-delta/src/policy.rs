#![forbid(unsafe_code)]

//! Selection policies: which eligible run to move next.
//!
//! The planner never chooses a run itself. Each iteration it hands the
//! current partition to a [`SelectionPolicy`] and applies whichever option
//! comes back. A policy returns an index into the offered slice, or `None`
//! to abstain, which aborts the whole plan.
//!
//! Any `Fn(&[RunDelta<T>]) -> Option<usize>` is a policy. The built-in
//! policies below are stateless and break ties toward the leftmost run.
//!
//! | Policy               | Picks                                |
//! |----------------------|--------------------------------------|
//! | [`First`]            | leftmost run                         |
//! | [`Last`]             | rightmost run                        |
//! | [`LargestMagnitude`] | run with the largest `abs(delta)`    |
//! | [`SmallestMagnitude`]| run with the smallest `abs(delta)`   |
//! | [`Widest`]           | run covering the most positions      |

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::numeric::Numeric;
use crate::runs::RunDelta;

/// Chooses one run per iteration.
///
/// `options` is never empty. Returning an index outside `options` is a bug
/// in the policy and makes the planner panic.
pub trait SelectionPolicy<T> {
    /// Pick the index of the run to apply, or `None` to abstain.
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "custom"
    }
}

impl<T, F> SelectionPolicy<T> for F
where
    F: Fn(&[RunDelta<T>]) -> Option<usize>,
{
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize> {
        self(options)
    }
}

/// Always the leftmost run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct First;

/// Always the rightmost run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Last;

/// The run whose delta has the largest magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LargestMagnitude;

/// The run whose delta has the smallest magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SmallestMagnitude;

/// The run covering the most positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Widest;

impl<T> SelectionPolicy<T> for First {
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize> {
        (!options.is_empty()).then_some(0)
    }

    fn name(&self) -> &str {
        "first"
    }
}

impl<T> SelectionPolicy<T> for Last {
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize> {
        options.len().checked_sub(1)
    }

    fn name(&self) -> &str {
        "last"
    }
}

impl<T: Numeric> SelectionPolicy<T> for LargestMagnitude {
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize> {
        leftmost_best(options, |a, b| a.delta.magnitude_cmp(b.delta))
    }

    fn name(&self) -> &str {
        "largest"
    }
}

impl<T: Numeric> SelectionPolicy<T> for SmallestMagnitude {
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize> {
        leftmost_best(options, |a, b| b.delta.magnitude_cmp(a.delta))
    }

    fn name(&self) -> &str {
        "smallest"
    }
}

impl<T> SelectionPolicy<T> for Widest {
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize> {
        leftmost_best(options, |a, b| a.width().cmp(&b.width()))
    }

    fn name(&self) -> &str {
        "widest"
    }
}

/// Index of the maximum under `rank`, keeping the earliest on ties.
fn leftmost_best<T>(
    options: &[RunDelta<T>],
    rank: impl Fn(&RunDelta<T>, &RunDelta<T>) -> Ordering,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, option) in options.iter().enumerate() {
        match best {
            Some(b) if rank(option, &options[b]) != Ordering::Greater => {}
            _ => best = Some(i),
        }
    }
    best
}

// ---------------------------------------------------------------------------
// PolicyKind
// ---------------------------------------------------------------------------

/// Built-in policy selected by name (config files, command lines).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PolicyKind {
    /// [`First`].
    #[default]
    First,
    /// [`Last`].
    Last,
    /// [`LargestMagnitude`].
    Largest,
    /// [`SmallestMagnitude`].
    Smallest,
    /// [`Widest`].
    Widest,
}

impl PolicyKind {
    /// Every built-in policy, in display order.
    pub const ALL: [PolicyKind; 5] = [
        PolicyKind::First,
        PolicyKind::Last,
        PolicyKind::Largest,
        PolicyKind::Smallest,
        PolicyKind::Widest,
    ];

    /// Canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Last => "last",
            Self::Largest => "largest",
            Self::Smallest => "smallest",
            Self::Widest => "widest",
        }
    }

    /// One-line description for help output.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::First => "leftmost run first",
            Self::Last => "rightmost run first",
            Self::Largest => "run with the largest delta magnitude",
            Self::Smallest => "run with the smallest delta magnitude",
            Self::Widest => "run covering the most positions",
        }
    }
}

impl<T: Numeric> SelectionPolicy<T> for PolicyKind {
    fn select(&self, options: &[RunDelta<T>]) -> Option<usize> {
        match self {
            Self::First => SelectionPolicy::<T>::select(&First, options),
            Self::Last => SelectionPolicy::<T>::select(&Last, options),
            Self::Largest => LargestMagnitude.select(options),
            Self::Smallest => SmallestMagnitude.select(options),
            Self::Widest => SelectionPolicy::<T>::select(&Widest, options),
        }
    }

    fn name(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection policy `{0}` (expected one of: first, last, largest, smallest, widest)")]
pub struct UnknownPolicy(pub String);

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| UnknownPolicy(s.to_string()))
    }
}
