#![forbid(unsafe_code)]

//! Recoverable failures for gap, run, apply, and plan operations.

use std::ops::Range;

use thiserror::Error;

/// Failure class, for callers that branch on the kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    LengthMismatch,
    RangeMapping,
    RangeOutOfBounds,
    PolicyAbstained,
    StepLimitExceeded,
    UnrepresentableGap,
}

/// Errors surfaced by this crate.
///
/// Every variant is a local, recoverable result. No variant carries a
/// partial plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeltaError {
    /// `current` and `target` have different lengths.
    #[error("sequence length mismatch: current has {current} elements, target has {target}")]
    LengthMismatch { current: usize, target: usize },

    /// A requested sub-range cannot be resolved against the compared sequences.
    #[error("range {range:?} cannot be mapped onto sequences of length {len}")]
    RangeMapping { range: Range<usize>, len: usize },

    /// An apply targeted positions outside the sequence.
    #[error("range {range:?} is out of bounds for a sequence of length {len}")]
    RangeOutOfBounds { range: Range<usize>, len: usize },

    /// The selection policy declined to pick among the offered runs.
    #[error("selection policy abstained at step {step} with {options} option(s)")]
    PolicyAbstained { step: usize, options: usize },

    /// The plan did not converge within the configured step limit.
    #[error("plan exceeded the step limit of {limit}")]
    StepLimitExceeded { limit: usize },

    /// `target[index] - current[index]` overflows or is not finite.
    #[error("gap at index {index} is not representable")]
    UnrepresentableGap { index: usize },
}

impl DeltaError {
    /// The failure class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::RangeMapping { .. } => ErrorKind::RangeMapping,
            Self::RangeOutOfBounds { .. } => ErrorKind::RangeOutOfBounds,
            Self::PolicyAbstained { .. } => ErrorKind::PolicyAbstained,
            Self::StepLimitExceeded { .. } => ErrorKind::StepLimitExceeded,
            Self::UnrepresentableGap { .. } => ErrorKind::UnrepresentableGap,
        }
    }
}

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, DeltaError>;
