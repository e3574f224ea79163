//! Tolerance-aware scalar comparisons.
//!
//! Every geometric equality and ordering in this crate goes through
//! [`is_close`]: two values are close when
//! `|a - b| <= max(relative * max(|a|, |b|), absolute)`.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use approx::RelativeEq;

/// Floating-point scalar the geometry types are generic over.
///
/// Implemented for `f32` and `f64`. Each type carries its own default
/// tolerances: single precision accumulates rounding from cross and dot
/// products much faster, so its tolerances are looser.
pub trait Real:
    Copy
    + Debug
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + RelativeEq<Epsilon = Self>
{
    const ZERO: Self;
    const ONE: Self;
    const HALF: Self;
    const NAN: Self;
    const INFINITY: Self;
    const NEG_INFINITY: Self;

    /// Default absolute tolerance for this type.
    const ABSOLUTE_TOLERANCE: Self;
    /// Default relative tolerance for this type.
    const RELATIVE_TOLERANCE: Self;

    fn sqrt(self) -> Self;
    fn abs(self) -> Self;
    fn is_finite(self) -> bool;
    fn min(self, other: Self) -> Self;
    fn max(self, other: Self) -> Self;
}

macro_rules! impl_real {
    ($t:ty, $abs:expr, $rel:expr) => {
        impl Real for $t {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const HALF: Self = 0.5;
            const NAN: Self = <$t>::NAN;
            const INFINITY: Self = <$t>::INFINITY;
            const NEG_INFINITY: Self = <$t>::NEG_INFINITY;

            const ABSOLUTE_TOLERANCE: Self = $abs;
            const RELATIVE_TOLERANCE: Self = $rel;

            fn sqrt(self) -> Self {
                <$t>::sqrt(self)
            }

            fn abs(self) -> Self {
                <$t>::abs(self)
            }

            fn is_finite(self) -> bool {
                <$t>::is_finite(self)
            }

            fn min(self, other: Self) -> Self {
                <$t>::min(self, other)
            }

            fn max(self, other: Self) -> Self {
                <$t>::max(self, other)
            }
        }
    };
}

impl_real!(f32, 1e-5, 1e-4);
impl_real!(f64, 1e-9, 1e-9);

/// Absolute/relative tolerance pair used by the comparison predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance<T> {
    /// Differences at or below this are always close.
    pub absolute: T,
    /// Differences at or below this fraction of the larger magnitude are close.
    pub relative: T,
}

impl<T: Real> Default for Tolerance<T> {
    fn default() -> Self {
        Self {
            absolute: T::ABSOLUTE_TOLERANCE,
            relative: T::RELATIVE_TOLERANCE,
        }
    }
}

impl<T: Real> Tolerance<T> {
    pub fn new(absolute: T, relative: T) -> Self {
        Self { absolute, relative }
    }
}

/// `a ≈ b` under the default tolerances of `T`.
pub fn is_close<T: Real>(a: T, b: T) -> bool {
    is_close_with(a, b, Tolerance::default())
}

/// `a ≈ b` under explicit tolerances.
///
/// NaN is never close to anything; infinities are only close to themselves.
pub fn is_close_with<T: Real>(a: T, b: T, tol: Tolerance<T>) -> bool {
    a.relative_eq(&b, tol.absolute, tol.relative)
}

/// `a ≈ b || a < b`.
pub fn is_less_close<T: Real>(a: T, b: T) -> bool {
    is_less_close_with(a, b, Tolerance::default())
}

pub fn is_less_close_with<T: Real>(a: T, b: T, tol: Tolerance<T>) -> bool {
    is_close_with(a, b, tol) || a < b
}

/// `a ≈ b || a > b`.
pub fn is_greater_close<T: Real>(a: T, b: T) -> bool {
    is_greater_close_with(a, b, Tolerance::default())
}

pub fn is_greater_close_with<T: Real>(a: T, b: T, tol: Tolerance<T>) -> bool {
    is_close_with(a, b, tol) || a > b
}
