//! Linear transforms of representations.
//!
//! Forward maps act on V-side generators (`v ↦ P·v`); the H-side co-map
//! reparametrizes normals (`a ↦ P·a`, offsets unchanged), and the preimage
//! form `P \ H` is the co-map by `Pᵗ`. Matrix shapes are validated at view
//! construction. All views branch on the operand's storage mode only when
//! materializing; both branches yield the same logical elements.

use nalgebra::{DMatrix, DVector};

use crate::element::{HElement, HalfSpace, HyperPlane, Line, Point, Ray, VElement};
use crate::error::{Error, Result};
use crate::rep::{HRep, Representation, VRep};

/// Lazy `P · V`: every point, ray and line mapped through `P`.
#[derive(Clone, Debug)]
pub struct LinearImage<R: Representation> {
    matrix: DMatrix<R::Coeff>,
    rep: R,
}

/// Forward linear map of a V-representation. Requires
/// `ncols(P) == ambient_dim`; the image lives in `nrows(P)` dimensions.
pub fn linear_image<R: VRep>(matrix: DMatrix<R::Coeff>, rep: R) -> Result<LinearImage<R>> {
    if matrix.ncols() != rep.ambient_dim() {
        return Err(Error::DimensionMismatch {
            expected: rep.ambient_dim(),
            found: matrix.ncols(),
        });
    }
    Ok(LinearImage { matrix, rep })
}

impl<R: VRep> Representation for LinearImage<R> {
    type Coeff = R::Coeff;

    fn ambient_dim(&self) -> usize {
        self.matrix.nrows()
    }

    fn is_decomposed(&self) -> bool {
        self.rep.is_decomposed()
    }
}

impl<R: VRep> VRep for LinearImage<R> {
    fn points(&self) -> impl Iterator<Item = Point<Self::Coeff>> + '_ {
        self.rep.points().map(|p| &self.matrix * p)
    }

    fn rays(&self) -> impl Iterator<Item = Ray<Self::Coeff>> + '_ {
        self.rep.rays().map(|r| Ray::new(&self.matrix * r.r))
    }

    fn lines(&self) -> impl Iterator<Item = Line<Self::Coeff>> + '_ {
        self.rep.lines().map(|l| Line::new(&self.matrix * l.l))
    }

    fn elements(&self) -> impl Iterator<Item = VElement<Self::Coeff>> + '_ {
        self.rep.elements().map(|e| match e {
            VElement::Point(p) => VElement::Point(&self.matrix * p),
            VElement::Ray(r) => VElement::Ray(Ray::new(&self.matrix * r.r)),
            VElement::Line(l) => VElement::Line(Line::new(&self.matrix * l.l)),
        })
    }
}

/// Lazy `H / P`: every normal mapped through `P`, offsets unchanged.
#[derive(Clone, Debug)]
pub struct NormalImage<R: Representation> {
    matrix: DMatrix<R::Coeff>,
    rep: R,
}

/// Co-map of an H-representation (`H / P`): reparametrize `⟨a,x⟩ ≤ β` as
/// `⟨P·a, y⟩ ≤ β`. Requires `ncols(P) == ambient_dim`; the result lives in
/// `nrows(P)` dimensions.
pub fn co_map<R: HRep>(rep: R, matrix: DMatrix<R::Coeff>) -> Result<NormalImage<R>> {
    if matrix.ncols() != rep.ambient_dim() {
        return Err(Error::DimensionMismatch {
            expected: rep.ambient_dim(),
            found: matrix.ncols(),
        });
    }
    Ok(NormalImage { matrix, rep })
}

/// Preimage `P \ H = {x : P·x ∈ H}`, the co-map by `Pᵗ`. Requires
/// `nrows(P) == ambient_dim`; the result lives in `ncols(P)` dimensions.
pub fn linear_preimage<R: HRep>(matrix: DMatrix<R::Coeff>, rep: R) -> Result<NormalImage<R>> {
    if matrix.nrows() != rep.ambient_dim() {
        return Err(Error::DimensionMismatch {
            expected: rep.ambient_dim(),
            found: matrix.nrows(),
        });
    }
    Ok(NormalImage {
        matrix: matrix.transpose(),
        rep,
    })
}

impl<R: HRep> Representation for NormalImage<R> {
    type Coeff = R::Coeff;

    fn ambient_dim(&self) -> usize {
        self.matrix.nrows()
    }

    fn is_decomposed(&self) -> bool {
        self.rep.is_decomposed()
    }
}

impl<R: HRep> HRep for NormalImage<R> {
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<Self::Coeff>> + '_ {
        self.rep
            .hyperplanes()
            .map(|h| HyperPlane::new(&self.matrix * h.a, h.beta))
    }

    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<Self::Coeff>> + '_ {
        self.rep
            .halfspaces()
            .map(|h| HalfSpace::new(&self.matrix * h.a, h.beta))
    }

    fn elements(&self) -> impl Iterator<Item = HElement<Self::Coeff>> + '_ {
        self.rep.elements().map(|e| match e {
            HElement::HyperPlane(h) => {
                HElement::HyperPlane(HyperPlane::new(&self.matrix * h.a, h.beta))
            }
            HElement::HalfSpace(h) => {
                HElement::HalfSpace(HalfSpace::new(&self.matrix * h.a, h.beta))
            }
        })
    }
}

/// Lazy `V + t`: every point translated, rays and lines unchanged.
#[derive(Clone, Debug)]
pub struct Translation<R: Representation> {
    offset: DVector<R::Coeff>,
    rep: R,
}

/// Translate a V-representation by `t`.
pub fn translate<R: VRep>(rep: R, offset: DVector<R::Coeff>) -> Result<Translation<R>> {
    if offset.len() != rep.ambient_dim() {
        return Err(Error::DimensionMismatch {
            expected: rep.ambient_dim(),
            found: offset.len(),
        });
    }
    Ok(Translation { offset, rep })
}

impl<R: VRep> Representation for Translation<R> {
    type Coeff = R::Coeff;

    fn ambient_dim(&self) -> usize {
        self.rep.ambient_dim()
    }

    fn is_decomposed(&self) -> bool {
        self.rep.is_decomposed()
    }
}

impl<R: VRep> VRep for Translation<R> {
    fn points(&self) -> impl Iterator<Item = Point<Self::Coeff>> + '_ {
        self.rep.points().map(|p| p + &self.offset)
    }

    fn rays(&self) -> impl Iterator<Item = Ray<Self::Coeff>> + '_ {
        self.rep.rays()
    }

    fn lines(&self) -> impl Iterator<Item = Line<Self::Coeff>> + '_ {
        self.rep.lines()
    }
}
