//! Representation algebra for convex polyhedra.
//!
//! A polyhedron is described either as an intersection of hyperplanes and
//! halfspaces (H-representation) or as the convex hull of points, rays and
//! lines (V-representation). This crate provides the element types, the
//! capability traits over both sides, lazy algebraic operators (intersection,
//! convex hull, Minkowski sum, Cartesian product, linear maps), flats derived
//! from projection residuals, and the default backend that detects linearity
//! and caches both sides of a polyhedron.
//!
//! Coefficient types are generic over [`num::Coeff`]; mixing two types in one
//! operator promotes through the [`promote::Promote`] table at compile time.
//! No tolerance is ever applied implicitly: exact types compare exactly,
//! float comparisons take an explicit epsilon.

pub mod affine;
pub mod backend;
pub mod element;
pub mod error;
pub mod num;
pub mod ops;
pub mod promote;
pub mod rep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::affine::{AffineSpace, AffineSpaceBuilder, LinearSpace, LinearSpaceBuilder};
    pub use crate::backend::{
        affine_hull, dim, linear_span, polyhedron_from_h, polyhedron_from_v, BackendConfig,
        DetectLinearity, Polyhedron,
    };
    pub use crate::element::{
        HElement, HalfSpace, HyperPlane, Line, Point, Ray, VElement,
    };
    pub use crate::error::{Error, Result};
    pub use crate::num::{Coeff, CoeffKind};
    pub use crate::ops::{
        cartesian_product, cartesian_product_v, co_map, convex_hull, intersect, linear_image,
        linear_preimage, minkowski_sum, translate,
    };
    pub use crate::promote::Promote;
    pub use crate::rep::{
        ConcreteHRep, ConcreteVRep, HRep, MixedHRep, MixedVRep, Representation, SplitHRep,
        SplitVRep, VRep,
    };
}
