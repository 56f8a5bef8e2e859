//! Representation capability surfaces and concrete element containers.
//!
//! Purpose
//! - [`HRep`] / [`VRep`] are the two capability surfaces: an H-side
//!   representation exposes hyperplanes and halfspaces, a V-side one exposes
//!   points, rays and lines. Iterators are produced fresh from `&self`, so a
//!   representation (or a lazy operator view over one) can be traversed any
//!   number of times without shared cursor state.
//! - Concrete containers come in two storage modes: `Split…` keeps the
//!   element kinds in separate vectors (decomposed, cheap to iterate per
//!   kind), `Mixed…` keeps one tagged stream (undecomposed). The mode is a
//!   performance choice, never a semantic one.
//! - Element collections carry no uniqueness or order guarantees;
//!   deduplication is the explicit `remove_duplicates` call, never implicit.

use crate::element::{HElement, HalfSpace, HyperPlane, Line, Point, Ray, VElement};
use crate::error::{Error, Result};
use crate::num::Coeff;

/// Common surface of every representation: its coefficient type, its ambient
/// dimension, and whether per-kind streams are cheap to iterate separately.
pub trait Representation {
    type Coeff: Coeff;

    fn ambient_dim(&self) -> usize;

    /// Decomposed representations iterate equality/inequality (or
    /// point/ray/line) streams separately without filtering a mixed stream.
    fn is_decomposed(&self) -> bool {
        true
    }
}

/// Intersection-of-halfspaces/hyperplanes capability surface.
pub trait HRep: Representation {
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<Self::Coeff>> + '_;
    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<Self::Coeff>> + '_;

    /// Undecomposed view of the same elements.
    fn elements(&self) -> impl Iterator<Item = HElement<Self::Coeff>> + '_ {
        self.hyperplanes()
            .map(HElement::HyperPlane)
            .chain(self.halfspaces().map(HElement::HalfSpace))
    }

    /// Exact membership of a point: every hyperplane satisfied with
    /// equality, every halfspace with `a·x ≤ β`.
    fn contains(&self, x: &Point<Self::Coeff>) -> Result<bool> {
        if x.len() != self.ambient_dim() {
            return Err(Error::DimensionMismatch {
                expected: self.ambient_dim(),
                found: x.len(),
            });
        }
        Ok(self.hyperplanes().all(|h| h.a.dot(x) == h.beta)
            && self.halfspaces().all(|h| h.a.dot(x) <= h.beta))
    }

    /// Membership with an explicit slack `eps ≥ 0` on every comparison.
    /// This is the only tolerance policy; nothing in the crate applies one
    /// implicitly.
    fn contains_eps(&self, x: &Point<Self::Coeff>, eps: Self::Coeff) -> Result<bool> {
        if x.len() != self.ambient_dim() {
            return Err(Error::DimensionMismatch {
                expected: self.ambient_dim(),
                found: x.len(),
            });
        }
        let within = |d: Self::Coeff, around: Self::Coeff| {
            d.clone() <= around.clone() + eps.clone() && around <= d + eps.clone()
        };
        Ok(self.hyperplanes().all(|h| within(h.a.dot(x), h.beta))
            && self
                .halfspaces()
                .all(|h| h.a.dot(x) <= h.beta + eps.clone()))
    }

    /// Materialize into a concrete container. The storage mode follows this
    /// representation's own mode (for operator views: the first operand's).
    fn concrete(&self) -> ConcreteHRep<Self::Coeff> {
        if self.is_decomposed() {
            ConcreteHRep::Split(SplitHRep::from_streams(
                self.ambient_dim(),
                self.hyperplanes(),
                self.halfspaces(),
            ))
        } else {
            ConcreteHRep::Mixed(MixedHRep::from_stream(self.ambient_dim(), self.elements()))
        }
    }
}

/// Convex-combination-of-points/rays/lines capability surface.
pub trait VRep: Representation {
    fn points(&self) -> impl Iterator<Item = Point<Self::Coeff>> + '_;
    fn rays(&self) -> impl Iterator<Item = Ray<Self::Coeff>> + '_;
    fn lines(&self) -> impl Iterator<Item = Line<Self::Coeff>> + '_;

    /// Undecomposed view of the same elements.
    fn elements(&self) -> impl Iterator<Item = VElement<Self::Coeff>> + '_ {
        self.points()
            .map(VElement::Point)
            .chain(self.rays().map(VElement::Ray))
            .chain(self.lines().map(VElement::Line))
    }

    /// Materialize into a concrete container, storage mode as in
    /// [`HRep::concrete`].
    fn concrete(&self) -> ConcreteVRep<Self::Coeff> {
        if self.is_decomposed() {
            ConcreteVRep::Split(SplitVRep::from_streams(
                self.ambient_dim(),
                self.points(),
                self.rays(),
                self.lines(),
            ))
        } else {
            ConcreteVRep::Mixed(MixedVRep::from_stream(self.ambient_dim(), self.elements()))
        }
    }
}

impl<R: Representation> Representation for &R {
    type Coeff = R::Coeff;

    fn ambient_dim(&self) -> usize {
        (**self).ambient_dim()
    }

    fn is_decomposed(&self) -> bool {
        (**self).is_decomposed()
    }
}

impl<R: HRep> HRep for &R {
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<Self::Coeff>> + '_ {
        (**self).hyperplanes()
    }

    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<Self::Coeff>> + '_ {
        (**self).halfspaces()
    }

    // forwarded so a borrowed mixed rep keeps its stored stream order
    fn elements(&self) -> impl Iterator<Item = HElement<Self::Coeff>> + '_ {
        (**self).elements()
    }
}

impl<R: VRep> VRep for &R {
    fn points(&self) -> impl Iterator<Item = Point<Self::Coeff>> + '_ {
        (**self).points()
    }

    fn rays(&self) -> impl Iterator<Item = Ray<Self::Coeff>> + '_ {
        (**self).rays()
    }

    fn lines(&self) -> impl Iterator<Item = Line<Self::Coeff>> + '_ {
        (**self).lines()
    }

    fn elements(&self) -> impl Iterator<Item = VElement<Self::Coeff>> + '_ {
        (**self).elements()
    }
}

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

/// Decomposed H-representation: equalities and inequalities stored apart.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitHRep<T> {
    dim: usize,
    pub(crate) planes: Vec<HyperPlane<T>>,
    pub(crate) halves: Vec<HalfSpace<T>>,
    pub(crate) linearity_current: bool,
}

impl<T: Coeff> SplitHRep<T> {
    pub fn new(dim: usize, planes: Vec<HyperPlane<T>>, halves: Vec<HalfSpace<T>>) -> Result<Self> {
        for h in &planes {
            check_len(dim, h.a.len())?;
        }
        for h in &halves {
            check_len(dim, h.a.len())?;
        }
        Ok(Self {
            dim,
            planes,
            halves,
            linearity_current: false,
        })
    }

    pub(crate) fn from_streams(
        dim: usize,
        planes: impl Iterator<Item = HyperPlane<T>>,
        halves: impl Iterator<Item = HalfSpace<T>>,
    ) -> Self {
        Self {
            dim,
            planes: planes.collect(),
            halves: halves.collect(),
            linearity_current: false,
        }
    }

    pub fn planes(&self) -> &[HyperPlane<T>] {
        &self.planes
    }

    pub fn halves(&self) -> &[HalfSpace<T>] {
        &self.halves
    }

    /// Drop coincident elements, keeping first occurrences. Explicit; no
    /// constructor or operator ever deduplicates on its own.
    pub fn remove_duplicates(&self) -> Self {
        let mut planes: Vec<HyperPlane<T>> = Vec::with_capacity(self.planes.len());
        for h in &self.planes {
            if !planes.iter().any(|k| k.is_coincident(h)) {
                planes.push(h.clone());
            }
        }
        let mut halves: Vec<HalfSpace<T>> = Vec::with_capacity(self.halves.len());
        for h in &self.halves {
            if !halves.iter().any(|k| k.is_coincident(h)) {
                halves.push(h.clone());
            }
        }
        Self {
            dim: self.dim,
            planes,
            halves,
            linearity_current: false,
        }
    }
}

impl<T: Coeff> Representation for SplitHRep<T> {
    type Coeff = T;

    fn ambient_dim(&self) -> usize {
        self.dim
    }
}

impl<T: Coeff> HRep for SplitHRep<T> {
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<T>> + '_ {
        self.planes.iter().cloned()
    }

    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<T>> + '_ {
        self.halves.iter().cloned()
    }
}

/// Undecomposed H-representation: one tagged element stream.
#[derive(Clone, Debug, PartialEq)]
pub struct MixedHRep<T> {
    dim: usize,
    pub(crate) elems: Vec<HElement<T>>,
}

impl<T: Coeff> MixedHRep<T> {
    pub fn new(dim: usize, elems: Vec<HElement<T>>) -> Result<Self> {
        for e in &elems {
            check_len(dim, e.coord_len())?;
        }
        Ok(Self { dim, elems })
    }

    pub(crate) fn from_stream(dim: usize, elems: impl Iterator<Item = HElement<T>>) -> Self {
        Self {
            dim,
            elems: elems.collect(),
        }
    }

    pub fn remove_duplicates(&self) -> Self {
        let mut elems: Vec<HElement<T>> = Vec::with_capacity(self.elems.len());
        for e in &self.elems {
            let dup = elems.iter().any(|k| match (k, e) {
                (HElement::HyperPlane(a), HElement::HyperPlane(b)) => a.is_coincident(b),
                (HElement::HalfSpace(a), HElement::HalfSpace(b)) => a.is_coincident(b),
                _ => false,
            });
            if !dup {
                elems.push(e.clone());
            }
        }
        Self {
            dim: self.dim,
            elems,
        }
    }
}

impl<T: Coeff> Representation for MixedHRep<T> {
    type Coeff = T;

    fn ambient_dim(&self) -> usize {
        self.dim
    }

    fn is_decomposed(&self) -> bool {
        false
    }
}

impl<T: Coeff> HRep for MixedHRep<T> {
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<T>> + '_ {
        self.elems.iter().filter_map(|e| match e {
            HElement::HyperPlane(h) => Some(h.clone()),
            HElement::HalfSpace(_) => None,
        })
    }

    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<T>> + '_ {
        self.elems.iter().filter_map(|e| match e {
            HElement::HalfSpace(h) => Some(h.clone()),
            HElement::HyperPlane(_) => None,
        })
    }

    fn elements(&self) -> impl Iterator<Item = HElement<T>> + '_ {
        self.elems.iter().cloned()
    }
}

/// Decomposed V-representation: points, rays and lines stored apart.
#[derive(Clone, Debug, PartialEq)]
pub struct SplitVRep<T> {
    dim: usize,
    pub(crate) verts: Vec<Point<T>>,
    pub(crate) ray_dirs: Vec<Ray<T>>,
    pub(crate) line_dirs: Vec<Line<T>>,
    pub(crate) linearity_current: bool,
}

impl<T: Coeff> SplitVRep<T> {
    pub fn new(
        dim: usize,
        points: Vec<Point<T>>,
        rays: Vec<Ray<T>>,
        lines: Vec<Line<T>>,
    ) -> Result<Self> {
        for p in &points {
            check_len(dim, p.len())?;
        }
        for r in &rays {
            check_len(dim, r.r.len())?;
        }
        for l in &lines {
            check_len(dim, l.l.len())?;
        }
        Ok(Self {
            dim,
            verts: points,
            ray_dirs: rays,
            line_dirs: lines,
            linearity_current: false,
        })
    }

    pub fn from_points(dim: usize, points: Vec<Point<T>>) -> Result<Self> {
        Self::new(dim, points, Vec::new(), Vec::new())
    }

    pub(crate) fn from_streams(
        dim: usize,
        points: impl Iterator<Item = Point<T>>,
        rays: impl Iterator<Item = Ray<T>>,
        lines: impl Iterator<Item = Line<T>>,
    ) -> Self {
        Self {
            dim,
            verts: points.collect(),
            ray_dirs: rays.collect(),
            line_dirs: lines.collect(),
            linearity_current: false,
        }
    }

    pub fn remove_duplicates(&self) -> Self {
        let mut verts: Vec<Point<T>> = Vec::with_capacity(self.verts.len());
        for p in &self.verts {
            if !verts.iter().any(|k| k == p) {
                verts.push(p.clone());
            }
        }
        let mut ray_dirs: Vec<Ray<T>> = Vec::with_capacity(self.ray_dirs.len());
        for r in &self.ray_dirs {
            if !ray_dirs.iter().any(|k| k.is_coincident(r)) {
                ray_dirs.push(r.clone());
            }
        }
        let mut line_dirs: Vec<Line<T>> = Vec::with_capacity(self.line_dirs.len());
        for l in &self.line_dirs {
            if !line_dirs.iter().any(|k| k.is_coincident(l)) {
                line_dirs.push(l.clone());
            }
        }
        Self {
            dim: self.dim,
            verts,
            ray_dirs,
            line_dirs,
            linearity_current: false,
        }
    }
}

impl<T: Coeff> Representation for SplitVRep<T> {
    type Coeff = T;

    fn ambient_dim(&self) -> usize {
        self.dim
    }
}

impl<T: Coeff> VRep for SplitVRep<T> {
    fn points(&self) -> impl Iterator<Item = Point<T>> + '_ {
        self.verts.iter().cloned()
    }

    fn rays(&self) -> impl Iterator<Item = Ray<T>> + '_ {
        self.ray_dirs.iter().cloned()
    }

    fn lines(&self) -> impl Iterator<Item = Line<T>> + '_ {
        self.line_dirs.iter().cloned()
    }
}

/// Undecomposed V-representation: one tagged element stream.
#[derive(Clone, Debug, PartialEq)]
pub struct MixedVRep<T> {
    dim: usize,
    pub(crate) elems: Vec<VElement<T>>,
}

impl<T: Coeff> MixedVRep<T> {
    pub fn new(dim: usize, elems: Vec<VElement<T>>) -> Result<Self> {
        for e in &elems {
            check_len(dim, e.coord_len())?;
        }
        Ok(Self { dim, elems })
    }

    pub(crate) fn from_stream(dim: usize, elems: impl Iterator<Item = VElement<T>>) -> Self {
        Self {
            dim,
            elems: elems.collect(),
        }
    }

    pub fn remove_duplicates(&self) -> Self {
        let mut elems: Vec<VElement<T>> = Vec::with_capacity(self.elems.len());
        for e in &self.elems {
            let dup = elems.iter().any(|k| match (k, e) {
                (VElement::Point(a), VElement::Point(b)) => a == b,
                (VElement::Ray(a), VElement::Ray(b)) => a.is_coincident(b),
                (VElement::Line(a), VElement::Line(b)) => a.is_coincident(b),
                _ => false,
            });
            if !dup {
                elems.push(e.clone());
            }
        }
        Self {
            dim: self.dim,
            elems,
        }
    }
}

impl<T: Coeff> Representation for MixedVRep<T> {
    type Coeff = T;

    fn ambient_dim(&self) -> usize {
        self.dim
    }

    fn is_decomposed(&self) -> bool {
        false
    }
}

impl<T: Coeff> VRep for MixedVRep<T> {
    fn points(&self) -> impl Iterator<Item = Point<T>> + '_ {
        self.elems.iter().filter_map(|e| match e {
            VElement::Point(p) => Some(p.clone()),
            _ => None,
        })
    }

    fn rays(&self) -> impl Iterator<Item = Ray<T>> + '_ {
        self.elems.iter().filter_map(|e| match e {
            VElement::Ray(r) => Some(r.clone()),
            _ => None,
        })
    }

    fn lines(&self) -> impl Iterator<Item = Line<T>> + '_ {
        self.elems.iter().filter_map(|e| match e {
            VElement::Line(l) => Some(l.clone()),
            _ => None,
        })
    }

    fn elements(&self) -> impl Iterator<Item = VElement<T>> + '_ {
        self.elems.iter().cloned()
    }
}

/// Materialized H-representation; the variant records which storage mode the
/// source (or the first operand of an operator chain) used.
#[derive(Clone, Debug, PartialEq)]
pub enum ConcreteHRep<T> {
    Split(SplitHRep<T>),
    Mixed(MixedHRep<T>),
}

impl<T: Coeff> ConcreteHRep<T> {
    pub fn is_split(&self) -> bool {
        matches!(self, ConcreteHRep::Split(_))
    }

    pub fn as_split(&self) -> Option<&SplitHRep<T>> {
        match self {
            ConcreteHRep::Split(r) => Some(r),
            ConcreteHRep::Mixed(_) => None,
        }
    }

    pub fn as_mixed(&self) -> Option<&MixedHRep<T>> {
        match self {
            ConcreteHRep::Mixed(r) => Some(r),
            ConcreteHRep::Split(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConcreteHRep::Split(r) => r.planes.len() + r.halves.len(),
            ConcreteHRep::Mixed(r) => r.elems.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Materialized V-representation, split/mixed as [`ConcreteHRep`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConcreteVRep<T> {
    Split(SplitVRep<T>),
    Mixed(MixedVRep<T>),
}

impl<T: Coeff> ConcreteVRep<T> {
    pub fn is_split(&self) -> bool {
        matches!(self, ConcreteVRep::Split(_))
    }

    pub fn as_split(&self) -> Option<&SplitVRep<T>> {
        match self {
            ConcreteVRep::Split(r) => Some(r),
            ConcreteVRep::Mixed(_) => None,
        }
    }

    pub fn as_mixed(&self) -> Option<&MixedVRep<T>> {
        match self {
            ConcreteVRep::Mixed(r) => Some(r),
            ConcreteVRep::Split(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConcreteVRep::Split(r) => r.verts.len() + r.ray_dirs.len() + r.line_dirs.len(),
            ConcreteVRep::Mixed(r) => r.elems.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::dvector;

    #[test]
    fn construction_rejects_mismatched_coordinates() {
        let err = SplitHRep::new(
            2,
            vec![HyperPlane::new(dvector![1i64, 0, 0], 1)],
            Vec::new(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            Error::DimensionMismatch {
                expected: 2,
                found: 3
            }
        );
    }

    #[test]
    fn mixed_rep_filters_kinds_and_keeps_order() {
        let rep = MixedHRep::new(
            2,
            vec![
                HElement::HalfSpace(HalfSpace::new(dvector![1i64, 0], 1)),
                HElement::HyperPlane(HyperPlane::new(dvector![0i64, 1], 0)),
                HElement::HalfSpace(HalfSpace::new(dvector![0i64, -1], 0)),
            ],
        )
        .unwrap();
        assert!(!rep.is_decomposed());
        assert_eq!(rep.hyperplanes().count(), 1);
        assert_eq!(rep.halfspaces().count(), 2);
        assert_eq!(rep.elements().count(), 3);
    }

    #[test]
    fn duplicates_survive_until_explicit_removal() {
        let rep = SplitHRep::new(
            2,
            vec![
                HyperPlane::new(dvector![1i64, 1], 1),
                HyperPlane::new(dvector![2i64, 2], 2),
            ],
            vec![HalfSpace::new(dvector![1i64, 0], 1)],
        )
        .unwrap();
        assert_eq!(rep.hyperplanes().count(), 2);
        let deduped = rep.remove_duplicates();
        assert_eq!(deduped.hyperplanes().count(), 1);
        assert_eq!(deduped.halfspaces().count(), 1);
        // idempotent
        assert_eq!(deduped.remove_duplicates(), deduped);
    }

    #[test]
    fn point_membership_is_exact() {
        let rep = SplitHRep::new(
            2,
            vec![HyperPlane::new(dvector![0i64, 1], 1)],
            vec![HalfSpace::new(dvector![1i64, 0], 2)],
        )
        .unwrap();
        assert!(rep.contains(&dvector![2i64, 1]).unwrap());
        assert!(!rep.contains(&dvector![3i64, 1]).unwrap());
        assert!(!rep.contains(&dvector![0i64, 0]).unwrap());
        assert!(rep.contains(&dvector![0i64, 0, 0]).is_err());
    }

    #[test]
    fn borrowed_mixed_rep_keeps_its_stream_order() {
        fn through_borrow<R: HRep>(r: R) -> Vec<HElement<R::Coeff>> {
            r.elements().collect()
        }
        // halfspace stored before the hyperplane; the default chain would
        // reorder to hyperplanes-then-halfspaces
        let rep = MixedHRep::new(
            1,
            vec![
                HElement::HalfSpace(HalfSpace::new(dvector![1i64], 1)),
                HElement::HyperPlane(HyperPlane::new(dvector![1i64], 0)),
            ],
        )
        .unwrap();
        assert_eq!(through_borrow(&rep), rep.elements().collect::<Vec<_>>());

        fn through_borrow_v<R: VRep>(r: R) -> Vec<VElement<R::Coeff>> {
            r.elements().collect()
        }
        let rep = MixedVRep::new(
            1,
            vec![
                VElement::Ray(Ray::new(dvector![1i64])),
                VElement::Point(dvector![0i64]),
            ],
        )
        .unwrap();
        assert_eq!(through_borrow_v(&rep), rep.elements().collect::<Vec<_>>());
    }

    #[test]
    fn membership_slack_is_explicit() {
        let rep = SplitHRep::new(
            1,
            vec![HyperPlane::new(dvector![1.0f64], 1.0)],
            vec![HalfSpace::new(dvector![-1.0f64], -1.0)],
        )
        .unwrap();
        let near = dvector![1.0f64 + 1e-9];
        assert!(!rep.contains(&near).unwrap());
        assert!(rep.contains_eps(&near, 1e-6).unwrap());
        assert!(!rep.contains_eps(&near, 1e-12).unwrap());
    }

    #[test]
    fn repeated_traversals_are_independent() {
        let rep = SplitVRep::from_points(1, vec![dvector![1i64], dvector![2i64]]).unwrap();
        let first: Vec<_> = rep.points().collect();
        let second: Vec<_> = rep.points().collect();
        assert_eq!(first, second);
    }
}
