//! Pairwise numeric promotion for mixed-type operands.
//!
//! The rule table is closed and explicit: a pair of coefficient types can be
//! combined iff a `promote_rule!` entry lists it. Unlisted pairs (for
//! example `Rational64` with `f64`) do not implement [`Promote`] and are
//! rejected when the operator is constructed. Over the listed pairs the
//! promoted type is associative and commutative.

use num_rational::Rational64;

use crate::num::Coeff;

/// Promotion of `Self` and `Rhs` to the common coefficient type `Wider`.
pub trait Promote<Rhs: Coeff>: Coeff {
    type Wider: Coeff;

    /// Lift a left-operand value into the common type.
    fn widen(self) -> Self::Wider;
    /// Lift a right-operand value into the common type.
    fn widen_rhs(rhs: Rhs) -> Self::Wider;
}

macro_rules! promote_rule {
    ($l:ty, $r:ty => $w:ty, |$a:ident| $wl:expr, |$b:ident| $wr:expr) => {
        impl Promote<$r> for $l {
            type Wider = $w;

            #[inline]
            fn widen(self) -> $w {
                let $a = self;
                $wl
            }

            #[inline]
            fn widen_rhs(rhs: $r) -> $w {
                let $b = rhs;
                $wr
            }
        }
    };
}

promote_rule!(i64, i64 => i64, |a| a, |b| b);
promote_rule!(Rational64, Rational64 => Rational64, |a| a, |b| b);
promote_rule!(f64, f64 => f64, |a| a, |b| b);
promote_rule!(f32, f32 => f32, |a| a, |b| b);

promote_rule!(i64, Rational64 => Rational64, |a| Rational64::from_integer(a), |b| b);
promote_rule!(Rational64, i64 => Rational64, |a| a, |b| Rational64::from_integer(b));

promote_rule!(f32, f64 => f64, |a| f64::from(a), |b| b);
promote_rule!(f64, f32 => f64, |a| a, |b| f64::from(b));

// Lossy by construction; documented trade-off when mixing exact integers
// with floating operands.
promote_rule!(i64, f64 => f64, |a| a as f64, |b| b);
promote_rule!(f64, i64 => f64, |a| a, |b| b as f64);
