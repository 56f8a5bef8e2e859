//! Errors shared across the representation algebra.

use std::fmt;

use crate::num::CoeffKind;

/// Errors surfaced by representation constructors and operators.
///
/// Every precondition is checked synchronously at the violating call; no
/// operation retries or returns a partial result.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// Ambient dimensions disagree where equality is required, or a
    /// transform matrix's shape disagrees with the operand dimension.
    DimensionMismatch { expected: usize, found: usize },
    /// A representation kind supplies no strategy for the requested
    /// operation (the backend contract is unfulfilled).
    NotImplemented { what: &'static str },
    /// A kind-restricted representation was asked to hold an element kind
    /// it does not support.
    IncompatibleKind { wanted: &'static str, found: &'static str },
    /// Coefficient types disagree at the backend boundary and cannot be
    /// promoted to a common numeric type.
    TypeMismatch { expected: CoeffKind, found: CoeffKind },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DimensionMismatch { expected, found } => write!(
                f,
                "ambient dimension mismatch (expected {}, found {})",
                expected, found
            ),
            Error::NotImplemented { what } => {
                write!(f, "representation kind supplies no strategy for {}", what)
            }
            Error::IncompatibleKind { wanted, found } => write!(
                f,
                "representation holds only {} elements, got a {}",
                wanted, found
            ),
            Error::TypeMismatch { expected, found } => write!(
                f,
                "coefficient type mismatch (backend expects {}, operand has {})",
                expected, found
            ),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
