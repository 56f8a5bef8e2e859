//! Coefficient scalars for coordinate vectors.
//!
//! Purpose
//! - One trait, [`Coeff`], abstracts the numeric type `T` of all elements and
//!   representations: exact integers, exact rationals, and floats.
//! - `EXACT` selects the scaled projection residual (no division, coefficient
//!   magnitude may grow); the general path divides and then reduces magnitude
//!   through [`Coeff::common_factor`].

use std::fmt;
use std::ops::Neg;

use nalgebra::{ClosedAddAssign, ClosedDivAssign, ClosedMulAssign, ClosedSubAssign, Scalar};
use num_integer::Integer;
use num_rational::Rational64;
use num_traits::{One, Zero};

/// Runtime tag for a coefficient type, used at the backend boundary.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum CoeffKind {
    Int,
    Rational,
    F32,
    F64,
}

impl fmt::Display for CoeffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoeffKind::Int => f.write_str("int"),
            CoeffKind::Rational => f.write_str("rational"),
            CoeffKind::F32 => f.write_str("f32"),
            CoeffKind::F64 => f.write_str("f64"),
        }
    }
}

/// Scalar coefficient of coordinate vectors and offsets.
///
/// Zero tests are exact (`Zero::is_zero`); any tolerance-based comparison is
/// an explicit parameter of the call site, never implicit in the type.
pub trait Coeff:
    Scalar
    + Zero
    + One
    + PartialOrd
    + ClosedAddAssign
    + ClosedSubAssign
    + ClosedMulAssign
    + ClosedDivAssign
    + Neg<Output = Self>
{
    /// Exact type: projection residuals use the scaled, division-free form.
    const EXACT: bool;
    /// Runtime tag matching this type.
    const KIND: CoeffKind;

    /// Positive factor that divides every value in `values` exactly, used to
    /// reduce coefficient magnitude after a projection. `None` means no
    /// reduction applies. Dividing a whole element by the factor must not
    /// change the represented geometric object.
    fn common_factor<'a>(values: impl Iterator<Item = &'a Self>) -> Option<Self>
    where
        Self: 'a;
}

impl Coeff for i64 {
    const EXACT: bool = true;
    const KIND: CoeffKind = CoeffKind::Int;

    fn common_factor<'a>(values: impl Iterator<Item = &'a Self>) -> Option<Self> {
        let g = values.fold(0i64, |g, v| g.gcd(v));
        (g > 1).then_some(g)
    }
}

impl Coeff for Rational64 {
    const EXACT: bool = false;
    const KIND: CoeffKind = CoeffKind::Rational;

    // gcd of numerators over lcm of denominators: dividing by it leaves
    // integer-valued entries with no common integer factor.
    fn common_factor<'a>(values: impl Iterator<Item = &'a Self>) -> Option<Self> {
        let mut g = 0i64;
        let mut l = 1i64;
        for v in values {
            if !v.is_zero() {
                g = g.gcd(&v.numer().abs());
                l = l.lcm(v.denom());
            }
        }
        if g == 0 {
            return None;
        }
        let factor = Rational64::new(g, l);
        (!factor.is_one()).then_some(factor)
    }
}

impl Coeff for f64 {
    const EXACT: bool = false;
    const KIND: CoeffKind = CoeffKind::F64;

    fn common_factor<'a>(_values: impl Iterator<Item = &'a Self>) -> Option<Self> {
        None
    }
}

impl Coeff for f32 {
    const EXACT: bool = false;
    const KIND: CoeffKind = CoeffKind::F32;

    fn common_factor<'a>(_values: impl Iterator<Item = &'a Self>) -> Option<Self> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_common_factor_is_gcd() {
        let vs = [6i64, -9, 12];
        assert_eq!(i64::common_factor(vs.iter()), Some(3));
        let coprime = [2i64, 3];
        assert_eq!(i64::common_factor(coprime.iter()), None);
        let zeros = [0i64, 0];
        assert_eq!(i64::common_factor(zeros.iter()), None);
    }

    #[test]
    fn rational_common_factor_clears_denominators() {
        let vs = [
            Rational64::new(4, 3),
            Rational64::new(2, 1),
            Rational64::new(-8, 5),
        ];
        let f = Rational64::common_factor(vs.iter()).unwrap();
        for v in &vs {
            let reduced = v / f;
            assert_eq!(*reduced.denom(), 1, "entry {} not integral", reduced);
        }
        // no residual common integer factor
        let nums: Vec<i64> = vs.iter().map(|v| *(v / f).numer()).collect();
        assert_eq!(i64::common_factor(nums.iter()), None);
    }

    #[test]
    fn float_path_never_rescales() {
        let vs = [0.5f64, 2.0];
        assert_eq!(f64::common_factor(vs.iter()), None);
    }
}
