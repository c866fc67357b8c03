#![forbid(unsafe_code)]

//! Numeric element contract and tolerant comparison.
//!
//! Every sequence element implements [`Numeric`]: addition, subtraction,
//! multiplication, a zero value, and a comparison mode chosen by the element
//! kind. Integers compare exactly. Floating-point values compare through a
//! [`Tolerance`] whose epsilon is relative: `a` and `b` are equal when
//! `|a - b| <= epsilon * max(1, |a|, |b|)`.
//!
//! Scaling by magnitude keeps the deadband wider than one ulp at any size,
//! so rounding left behind by applying a delta is never mistaken for a
//! remaining gap. Sign tests on gaps use the bare epsilon (scale `1`).
//!
//! # Invariants
//!
//! 1. `Tolerance::compare(a, b) == Equal` implies `Tolerance::compare(b, a) == Equal`.
//! 2. For [`NumericKind::Exact`] the epsilon is always zero.
//! 3. `signum` returns exactly `ONE`, `ZERO`, or `-ONE`, so the product of
//!    two signums never overflows.
//! 4. A tolerant epsilon is finite and in `[0, 1)`.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Default relative epsilon for floating-point elements.
pub const DEFAULT_EPSILON: f64 = 1e-4;

/// How an element type compares for equality and ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Direct comparison (integers).
    Exact,
    /// Epsilon deadband comparison (floating point).
    Tolerant,
}

/// Element type usable in gap, run, and plan computations.
///
/// Implemented for the signed integers and `f32`/`f64`. Unsigned integers are
/// not supported: a gap `target - current` must be able to go negative.
pub trait Numeric:
    Copy
    + fmt::Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
{
    /// Additive identity.
    const ZERO: Self;

    /// Multiplicative identity.
    const ONE: Self;

    /// Comparison mode for this element type.
    const KIND: NumericKind;

    /// Convert a configured epsilon to this element type.
    ///
    /// Exact kinds ignore the input and return zero.
    fn epsilon_from_f64(epsilon: f64) -> Self;

    /// `self - rhs`, or `None` when the result is not representable
    /// (integer overflow, or a non-finite float).
    fn checked_gap(self, rhs: Self) -> Option<Self>;

    /// Compare `|self|` with `|other|` without overflowing on `MIN`.
    fn magnitude_cmp(self, other: Self) -> Ordering;

    /// `|self|`, saturating at `MAX` for integer `MIN`.
    fn magnitude(self) -> Self;
}

macro_rules! impl_exact {
    ($($t:ty),* $(,)?) => {$(
        impl Numeric for $t {
            const ZERO: Self = 0;
            const ONE: Self = 1;
            const KIND: NumericKind = NumericKind::Exact;

            #[inline]
            fn epsilon_from_f64(_epsilon: f64) -> Self {
                0
            }

            #[inline]
            fn checked_gap(self, rhs: Self) -> Option<Self> {
                self.checked_sub(rhs)
            }

            #[inline]
            fn magnitude_cmp(self, other: Self) -> Ordering {
                self.unsigned_abs().cmp(&other.unsigned_abs())
            }

            #[inline]
            fn magnitude(self) -> Self {
                self.saturating_abs()
            }
        }
    )*};
}

macro_rules! impl_tolerant {
    ($($t:ty),* $(,)?) => {$(
        impl Numeric for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const KIND: NumericKind = NumericKind::Tolerant;

            #[inline]
            fn epsilon_from_f64(epsilon: f64) -> Self {
                epsilon.abs() as $t
            }

            #[inline]
            fn checked_gap(self, rhs: Self) -> Option<Self> {
                let gap = self - rhs;
                gap.is_finite().then_some(gap)
            }

            #[inline]
            fn magnitude_cmp(self, other: Self) -> Ordering {
                self.abs().total_cmp(&other.abs())
            }

            #[inline]
            fn magnitude(self) -> Self {
                self.abs()
            }
        }
    )*};
}

impl_exact!(i8, i16, i32, i64, i128, isize);
impl_tolerant!(f32, f64);

// ---------------------------------------------------------------------------
// Tolerance
// ---------------------------------------------------------------------------

/// Comparison strategy for one element type.
///
/// For exact kinds the epsilon is pinned to zero and every comparison is a
/// plain `partial_cmp`. For tolerant kinds `a` and `b` are equal when
/// `|a - b| <= epsilon * max(1, |a|, |b|)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<T> {
    epsilon: T,
}

impl<T: Numeric> Default for Tolerance<T> {
    fn default() -> Self {
        Self::new(DEFAULT_EPSILON)
    }
}

impl<T: Numeric> Tolerance<T> {
    /// Create a tolerance from a relative epsilon.
    ///
    /// Negative inputs are treated as their magnitude. Non-finite inputs and
    /// magnitudes of `1` or more fall back to [`DEFAULT_EPSILON`]. Ignored
    /// for exact kinds.
    #[must_use]
    pub fn new(epsilon: f64) -> Self {
        let epsilon = epsilon.abs();
        let epsilon = if epsilon.is_finite() && epsilon < 1.0 {
            epsilon
        } else {
            DEFAULT_EPSILON
        };
        let epsilon = match T::KIND {
            NumericKind::Exact => T::ZERO,
            NumericKind::Tolerant => T::epsilon_from_f64(epsilon),
        };
        Self { epsilon }
    }

    /// Exact comparison regardless of element kind.
    #[must_use]
    pub fn exact() -> Self {
        Self { epsilon: T::ZERO }
    }

    /// The effective epsilon.
    #[inline]
    #[must_use]
    pub fn epsilon(&self) -> T {
        self.epsilon
    }

    /// Compare `a` with `b`, treating values inside the scaled deadband as
    /// equal.
    ///
    /// Unordered inputs (NaN) compare as equal.
    #[must_use]
    pub fn compare(&self, a: T, b: T) -> Ordering {
        if T::KIND == NumericKind::Exact || self.epsilon == T::ZERO {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }
        let mut scale = T::ONE;
        for v in [a.magnitude(), b.magnitude()] {
            if v > scale {
                scale = v;
            }
        }
        self.compare_within(a - b, self.epsilon * scale)
    }

    /// Sign of `diff` outside `[-band, band]`.
    fn compare_within(&self, diff: T, band: T) -> Ordering {
        if T::KIND == NumericKind::Exact || self.epsilon == T::ZERO {
            return diff.partial_cmp(&T::ZERO).unwrap_or(Ordering::Equal);
        }
        if diff > band {
            Ordering::Greater
        } else if diff < T::ZERO - band {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Sign of a gap outside the unscaled deadband `[-epsilon, epsilon]`.
    #[inline]
    fn gap_sign(&self, value: T) -> Ordering {
        self.compare_within(value, self.epsilon)
    }

    /// Whether `a` and `b` are equal within the deadband.
    #[inline]
    #[must_use]
    pub fn approx_eq(&self, a: T, b: T) -> bool {
        self.compare(a, b) == Ordering::Equal
    }

    /// Whether the gap `value` is zero within the unscaled deadband.
    #[inline]
    #[must_use]
    pub fn is_zero(&self, value: T) -> bool {
        self.gap_sign(value) == Ordering::Equal
    }

    /// Whether `value` is strictly positive beyond the unscaled deadband.
    #[inline]
    #[must_use]
    pub fn is_positive(&self, value: T) -> bool {
        self.gap_sign(value) == Ordering::Greater
    }

    /// Whether `value` is strictly negative beyond the unscaled deadband.
    #[inline]
    #[must_use]
    pub fn is_negative(&self, value: T) -> bool {
        self.gap_sign(value) == Ordering::Less
    }

    /// Whether `current` has settled on `target`.
    ///
    /// Positions that are settled carry no run.
    #[inline]
    #[must_use]
    pub fn settled(&self, current: T, target: T) -> bool {
        self.approx_eq(current, target)
    }

    /// `ONE`, `ZERO`, or `-ONE` according to the tolerant sign of `value`.
    #[must_use]
    pub fn signum(&self, value: T) -> T {
        match self.gap_sign(value) {
            Ordering::Greater => T::ONE,
            Ordering::Less => T::ZERO - T::ONE,
            Ordering::Equal => T::ZERO,
        }
    }

    /// Whether `a` and `b` carry opposite non-zero signs.
    ///
    /// Multiplies the signums rather than the values, so large integer gaps
    /// cannot overflow and two tiny opposite gaps are never read as agreeing.
    /// The product is compared exactly; it is always `-1`, `0`, or `1`.
    #[inline]
    #[must_use]
    pub fn opposed(&self, a: T, b: T) -> bool {
        self.signum(a) * self.signum(b) < T::ZERO
    }
}
