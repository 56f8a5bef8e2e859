//! Affine subspaces (flats) implied by hyperplanes or lines.
//!
//! Purpose
//! - [`AffineSpace`]: H-side flat `{x : a_i·x = β_i ∀i}` holding only
//!   hyperplanes. [`LinearSpace`]: V-side span `{Σ λ_i l_i}` holding only
//!   lines. Both are closed under `λx + (1−λ)y` for any real `λ`.
//! - Incremental construction goes through a builder that grows one element
//!   at a time and keeps an orthogonalized companion basis, so the
//!   projection-residual membership test stays exact for non-orthogonal
//!   inputs (sequential `remproj` against an orthogonal basis computes true
//!   expansion coefficients).
//! - The kind restriction (hyperplanes only / lines only) is enforced by the
//!   builder signatures; dynamic entry points taking mixed elements report
//!   `IncompatibleKind`.

use nalgebra::DVector;

use crate::element::{remproj, Element, HElement, HalfSpace, HyperPlane, Line, Point, VElement};
use crate::error::{Error, Result};
use crate::num::Coeff;
use crate::rep::{HRep, Representation, VRep};

fn check_len(dim: usize, found: usize) -> Result<()> {
    if found == dim {
        Ok(())
    } else {
        Err(Error::DimensionMismatch {
            expected: dim,
            found,
        })
    }
}

// Projection step of the H-side fold. A basis residual with a zero
// coordinate part (an inconsistent `0·x = β` row) spans the offset axis
// alone; the cross-scaled form clears the offset exactly for every
// coefficient type.
fn project_out<T: Coeff>(r: HyperPlane<T>, b: &HyperPlane<T>) -> HyperPlane<T> {
    if b.a.iter().all(|c| c.is_zero()) {
        r.scale(&b.beta).sub(&b.scale(&r.beta)).simplified()
    } else {
        remproj(&r, b)
    }
}

/// Growing H-side flat. `insert` records every element; the orthogonal basis
/// only gains a residual when the element is independent of those before it.
#[derive(Clone, Debug)]
pub struct AffineSpaceBuilder<T> {
    dim: usize,
    planes: Vec<HyperPlane<T>>,
    basis: Vec<HyperPlane<T>>,
}

impl<T: Coeff> AffineSpaceBuilder<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            planes: Vec::new(),
            basis: Vec::new(),
        }
    }

    fn residual(&self, h: &HyperPlane<T>) -> HyperPlane<T> {
        let mut r = h.clone();
        for b in &self.basis {
            r = project_out(r, b);
        }
        r
    }

    /// Record `h`. Returns `Ok(true)` when `h` enlarged the flat's defining
    /// set (it was independent of everything inserted so far), `Ok(false)`
    /// when it was already a member. Members are still recorded; dropping
    /// them is the explicit [`AffineSpace::remove_duplicates`].
    pub fn insert(&mut self, h: HyperPlane<T>) -> Result<bool> {
        check_len(self.dim, h.a.len())?;
        let r = self.residual(&h);
        let independent = !r.is_zero();
        self.planes.push(h);
        if independent {
            self.basis.push(r);
        }
        Ok(independent)
    }

    /// Membership against the flat built so far.
    pub fn is_member(&self, h: &HyperPlane<T>) -> Result<bool> {
        check_len(self.dim, h.a.len())?;
        Ok(self.residual(h).is_zero())
    }

    /// Close the flat into an immutable snapshot.
    pub fn build(self) -> AffineSpace<T> {
        AffineSpace {
            dim: self.dim,
            planes: self.planes,
            basis: self.basis,
        }
    }
}

/// Closed H-side flat: the affine subspace `{x : a_i·x = β_i ∀i}`.
#[derive(Clone, Debug, PartialEq)]
pub struct AffineSpace<T> {
    dim: usize,
    planes: Vec<HyperPlane<T>>,
    basis: Vec<HyperPlane<T>>,
}

impl<T: Coeff> AffineSpace<T> {
    pub fn new(dim: usize, planes: Vec<HyperPlane<T>>) -> Result<Self> {
        let mut b = AffineSpaceBuilder::new(dim);
        for h in planes {
            b.insert(h)?;
        }
        Ok(b.build())
    }

    /// Build from a mixed stream; any halfspace is an `IncompatibleKind`
    /// error since a flat holds equalities only.
    pub fn from_elements(dim: usize, elems: Vec<HElement<T>>) -> Result<Self> {
        let mut planes = Vec::with_capacity(elems.len());
        for e in elems {
            match e {
                HElement::HyperPlane(h) => planes.push(h),
                HElement::HalfSpace(_) => {
                    return Err(Error::IncompatibleKind {
                        wanted: "hyperplane",
                        found: "halfspace",
                    })
                }
            }
        }
        Self::new(dim, planes)
    }

    /// Number of independent hyperplanes (rank of the linearity space).
    pub fn rank(&self) -> usize {
        self.basis.len()
    }

    /// Dimension of the flat: ambient dimension minus rank. An inconsistent
    /// defining set (empty flat) saturates at zero.
    pub fn dim(&self) -> usize {
        self.dim.saturating_sub(self.basis.len())
    }

    /// Exact projection-residual membership: `h` lies in the span of the
    /// defining hyperplanes (offsets included).
    pub fn is_member(&self, h: &HyperPlane<T>) -> Result<bool> {
        check_len(self.dim, h.a.len())?;
        let mut r = h.clone();
        for b in &self.basis {
            r = project_out(r, b);
        }
        Ok(r.is_zero())
    }

    /// Membership with an explicit residual tolerance on every coefficient.
    pub fn is_member_eps(&self, h: &HyperPlane<T>, eps: T) -> Result<bool> {
        check_len(self.dim, h.a.len())?;
        let mut r = h.clone();
        for b in &self.basis {
            r = project_out(r, b);
        }
        let small = |c: &T| c.clone() <= eps.clone() && -c.clone() <= eps.clone();
        Ok(r.a.iter().all(small) && small(&r.beta))
    }

    /// Fresh flat keeping only the first occurrence of each implied
    /// hyperplane: element `k` is dropped iff it is a member of the flat
    /// built from elements `0..k`. Idempotent.
    pub fn remove_duplicates(&self) -> Self {
        let mut b = AffineSpaceBuilder::new(self.dim);
        let mut planes = Vec::new();
        for h in &self.planes {
            // insert() cannot fail here; lengths were validated on the way in
            if b.insert(h.clone()).unwrap_or(false) {
                planes.push(h.clone());
            }
        }
        let built = b.build();
        AffineSpace {
            dim: self.dim,
            planes,
            basis: built.basis,
        }
    }
}

impl<T: Coeff> Representation for AffineSpace<T> {
    type Coeff = T;

    fn ambient_dim(&self) -> usize {
        self.dim
    }
}

impl<T: Coeff> HRep for AffineSpace<T> {
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<T>> + '_ {
        self.planes.iter().cloned()
    }

    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<T>> + '_ {
        std::iter::empty()
    }
}

/// Growing V-side span, the mirror image of [`AffineSpaceBuilder`].
#[derive(Clone, Debug)]
pub struct LinearSpaceBuilder<T> {
    dim: usize,
    lines: Vec<Line<T>>,
    basis: Vec<Line<T>>,
}

impl<T: Coeff> LinearSpaceBuilder<T> {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            lines: Vec::new(),
            basis: Vec::new(),
        }
    }

    fn residual(&self, x: &DVector<T>) -> DVector<T> {
        let mut r = x.clone();
        for b in &self.basis {
            r = remproj(&r, &b.l);
        }
        r
    }

    pub fn insert(&mut self, l: Line<T>) -> Result<bool> {
        check_len(self.dim, l.l.len())?;
        let r = self.residual(&l.l);
        let independent = !Element::<T>::is_zero(&r);
        self.lines.push(l);
        if independent {
            self.basis.push(Line::new(r));
        }
        Ok(independent)
    }

    pub fn build(self) -> LinearSpace<T> {
        LinearSpace {
            dim: self.dim,
            lines: self.lines,
            basis: self.basis,
        }
    }
}

/// Closed V-side span `{Σ λ_i l_i}` through the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSpace<T> {
    dim: usize,
    lines: Vec<Line<T>>,
    basis: Vec<Line<T>>,
}

impl<T: Coeff> LinearSpace<T> {
    pub fn new(dim: usize, lines: Vec<Line<T>>) -> Result<Self> {
        let mut b = LinearSpaceBuilder::new(dim);
        for l in lines {
            b.insert(l)?;
        }
        Ok(b.build())
    }

    /// Build from a mixed stream; points and rays are `IncompatibleKind`.
    pub fn from_elements(dim: usize, elems: Vec<VElement<T>>) -> Result<Self> {
        let mut lines = Vec::with_capacity(elems.len());
        for e in elems {
            match e {
                VElement::Line(l) => lines.push(l),
                other => {
                    return Err(Error::IncompatibleKind {
                        wanted: "line",
                        found: other.kind(),
                    })
                }
            }
        }
        Self::new(dim, lines)
    }

    /// Dimension of the span: the number of independent lines.
    pub fn dim(&self) -> usize {
        self.basis.len()
    }

    pub fn rank(&self) -> usize {
        self.basis.len()
    }

    /// Exact membership of a vector in the span.
    pub fn contains(&self, x: &Point<T>) -> Result<bool> {
        check_len(self.dim, x.len())?;
        let mut r = x.clone();
        for b in &self.basis {
            r = remproj(&r, &b.l);
        }
        Ok(Element::<T>::is_zero(&r))
    }

    /// Membership with an explicit residual tolerance per coordinate.
    pub fn contains_eps(&self, x: &Point<T>, eps: T) -> Result<bool> {
        check_len(self.dim, x.len())?;
        let mut r = x.clone();
        for b in &self.basis {
            r = remproj(&r, &b.l);
        }
        Ok(r
            .iter()
            .all(|c| c.clone() <= eps.clone() && -c.clone() <= eps.clone()))
    }

    pub fn is_member(&self, l: &Line<T>) -> Result<bool> {
        self.contains(&l.l)
    }

    /// Explicit dedup, as [`AffineSpace::remove_duplicates`].
    pub fn remove_duplicates(&self) -> Self {
        let mut b = LinearSpaceBuilder::new(self.dim);
        let mut lines = Vec::new();
        for l in &self.lines {
            if b.insert(l.clone()).unwrap_or(false) {
                lines.push(l.clone());
            }
        }
        let built = b.build();
        LinearSpace {
            dim: self.dim,
            lines,
            basis: built.basis,
        }
    }
}

impl<T: Coeff> Representation for LinearSpace<T> {
    type Coeff = T;

    fn ambient_dim(&self) -> usize {
        self.dim
    }
}

impl<T: Coeff> VRep for LinearSpace<T> {
    // A pure span always passes through the origin.
    fn points(&self) -> impl Iterator<Item = Point<T>> + '_ {
        std::iter::once(DVector::zeros(self.dim))
    }

    fn rays(&self) -> impl Iterator<Item = crate::element::Ray<T>> + '_ {
        std::iter::empty()
    }

    fn lines(&self) -> impl Iterator<Item = Line<T>> + '_ {
        self.lines.iter().cloned()
    }
}

#[cfg(test)]
mod tests;
