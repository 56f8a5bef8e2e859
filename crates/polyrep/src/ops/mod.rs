//! Algebraic operators over representations.
//!
//! Purpose
//! - Every operator returns a lazy view that owns its operands and itself
//!   implements [`HRep`](crate::rep::HRep) / [`VRep`](crate::rep::VRep), so
//!   views compose into chains. Nothing is copied until a caller
//!   materializes via `concrete()` or hands the view to the backend.
//! - Preconditions (ambient dimension, matrix shapes) are checked when the
//!   view is constructed, never during iteration.
//! - Mixed coefficient types go through the [`Promote`](crate::promote::Promote)
//!   table; the promoted stream is produced element-wise on the fly.
//! - The result's storage mode ("kind") follows the FIRST operand. The
//!   operators are commutative in value but not in result kind; this
//!   asymmetry is deliberate and relied upon by callers.

mod combine;
mod sum;
mod transform;

pub use combine::{convex_hull, intersect, ConvexHull, Intersection};
pub use sum::{cartesian_product, cartesian_product_v, minkowski_sum, HProduct, MinkowskiSum, Padded};
pub use transform::{co_map, linear_image, linear_preimage, translate, LinearImage, NormalImage, Translation};
