//! Minkowski sum and Cartesian product.
//!
//! The sum's point stream is the full pairwise cross product, an explicit
//! O(|P1|·|P2|) ceiling the caller accepts by using the operator; ray and
//! line streams are unioned, not summed. The V-side Cartesian product pads
//! both operands into disjoint coordinate blocks of the joint space and
//! reuses the Minkowski sum, which is exact because padded generators do not
//! interact across blocks.

use nalgebra::DVector;

use crate::element::{HElement, HalfSpace, HyperPlane, Line, Point, Ray, VElement};
use crate::error::{Error, Result};
use crate::num::Coeff;
use crate::promote::Promote;
use crate::rep::{HRep, Representation, VRep};

fn pad<T: Coeff>(v: &DVector<T>, before: usize, after: usize) -> DVector<T> {
    let mut out = DVector::zeros(before + v.len() + after);
    out.rows_mut(before, v.len()).copy_from(v);
    out
}

/// Lazy `V1 + V2` (Minkowski).
#[derive(Clone, Debug)]
pub struct MinkowskiSum<A, B> {
    pub(crate) first: A,
    pub(crate) second: B,
}

/// Minkowski sum of two V-representations over the same ambient dimension.
pub fn minkowski_sum<A, B>(first: A, second: B) -> Result<MinkowskiSum<A, B>>
where
    A: VRep,
    B: VRep,
    A::Coeff: Promote<B::Coeff>,
{
    if first.ambient_dim() != second.ambient_dim() {
        return Err(Error::DimensionMismatch {
            expected: first.ambient_dim(),
            found: second.ambient_dim(),
        });
    }
    Ok(MinkowskiSum { first, second })
}

impl<A, B> Representation for MinkowskiSum<A, B>
where
    A: VRep,
    B: VRep,
    A::Coeff: Promote<B::Coeff>,
{
    type Coeff = <A::Coeff as Promote<B::Coeff>>::Wider;

    fn ambient_dim(&self) -> usize {
        self.first.ambient_dim()
    }

    fn is_decomposed(&self) -> bool {
        self.first.is_decomposed()
    }
}

impl<A, B> VRep for MinkowskiSum<A, B>
where
    A: VRep,
    B: VRep,
    A::Coeff: Promote<B::Coeff>,
{
    // The second stream is buffered up front so one materialization
    // traverses each operand's stream exactly once, even for nested views.
    fn points(&self) -> impl Iterator<Item = Point<Self::Coeff>> + '_ {
        let second: Vec<Point<Self::Coeff>> = self
            .second
            .points()
            .map(|q| q.map(<A::Coeff as Promote<B::Coeff>>::widen_rhs))
            .collect();
        self.first.points().flat_map(move |p| {
            let p = p.map(<A::Coeff as Promote<B::Coeff>>::widen);
            let second = second.clone();
            second.into_iter().map(move |q| &p + q)
        })
    }

    fn rays(&self) -> impl Iterator<Item = Ray<Self::Coeff>> + '_ {
        self.first
            .rays()
            .map(|r| r.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen))
            .chain(
                self.second
                    .rays()
                    .map(|r| r.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs)),
            )
    }

    fn lines(&self) -> impl Iterator<Item = Line<Self::Coeff>> + '_ {
        self.first
            .lines()
            .map(|l| l.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen))
            .chain(
                self.second
                    .lines()
                    .map(|l| l.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs)),
            )
    }
}

/// Lazy H-side Cartesian product: operand normals zero-padded into disjoint
/// coordinate blocks of the `N1 + N2`-dimensional joint space.
#[derive(Clone, Debug)]
pub struct HProduct<A, B> {
    first: A,
    second: B,
}

/// Cartesian product of two H-representations (any ambient dimensions).
pub fn cartesian_product<A, B>(first: A, second: B) -> HProduct<A, B>
where
    A: HRep,
    B: HRep,
    A::Coeff: Promote<B::Coeff>,
{
    HProduct { first, second }
}

impl<A, B> HProduct<A, B>
where
    A: HRep,
    B: HRep,
    A::Coeff: Promote<B::Coeff>,
{
    fn pad_first(
        &self,
        h: HyperPlane<A::Coeff>,
    ) -> HyperPlane<<A::Coeff as Promote<B::Coeff>>::Wider> {
        let h = h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen);
        HyperPlane::new(pad(&h.a, 0, self.second.ambient_dim()), h.beta)
    }

    fn pad_second(
        &self,
        h: HyperPlane<B::Coeff>,
    ) -> HyperPlane<<A::Coeff as Promote<B::Coeff>>::Wider> {
        let h = h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs);
        HyperPlane::new(pad(&h.a, self.first.ambient_dim(), 0), h.beta)
    }

    fn pad_first_half(
        &self,
        h: HalfSpace<A::Coeff>,
    ) -> HalfSpace<<A::Coeff as Promote<B::Coeff>>::Wider> {
        let h = h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen);
        HalfSpace::new(pad(&h.a, 0, self.second.ambient_dim()), h.beta)
    }

    fn pad_second_half(
        &self,
        h: HalfSpace<B::Coeff>,
    ) -> HalfSpace<<A::Coeff as Promote<B::Coeff>>::Wider> {
        let h = h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs);
        HalfSpace::new(pad(&h.a, self.first.ambient_dim(), 0), h.beta)
    }
}

impl<A, B> Representation for HProduct<A, B>
where
    A: HRep,
    B: HRep,
    A::Coeff: Promote<B::Coeff>,
{
    type Coeff = <A::Coeff as Promote<B::Coeff>>::Wider;

    fn ambient_dim(&self) -> usize {
        self.first.ambient_dim() + self.second.ambient_dim()
    }

    fn is_decomposed(&self) -> bool {
        self.first.is_decomposed()
    }
}

impl<A, B> HRep for HProduct<A, B>
where
    A: HRep,
    B: HRep,
    A::Coeff: Promote<B::Coeff>,
{
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<Self::Coeff>> + '_ {
        self.first
            .hyperplanes()
            .map(|h| self.pad_first(h))
            .chain(self.second.hyperplanes().map(|h| self.pad_second(h)))
    }

    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<Self::Coeff>> + '_ {
        self.first
            .halfspaces()
            .map(|h| self.pad_first_half(h))
            .chain(self.second.halfspaces().map(|h| self.pad_second_half(h)))
    }

    fn elements(&self) -> impl Iterator<Item = HElement<Self::Coeff>> + '_ {
        let pad_first = |e: HElement<A::Coeff>| match e {
            HElement::HyperPlane(h) => HElement::HyperPlane(self.pad_first(h)),
            HElement::HalfSpace(h) => HElement::HalfSpace(self.pad_first_half(h)),
        };
        let pad_second = |e: HElement<B::Coeff>| match e {
            HElement::HyperPlane(h) => HElement::HyperPlane(self.pad_second(h)),
            HElement::HalfSpace(h) => HElement::HalfSpace(self.pad_second_half(h)),
        };
        self.first
            .elements()
            .map(pad_first)
            .chain(self.second.elements().map(pad_second))
    }
}

/// V-representation embedded into a larger space by zero-padding every
/// generator; used by the V-side Cartesian product.
#[derive(Clone, Debug)]
pub struct Padded<R> {
    rep: R,
    before: usize,
    after: usize,
}

impl<R: VRep> Representation for Padded<R> {
    type Coeff = R::Coeff;

    fn ambient_dim(&self) -> usize {
        self.before + self.rep.ambient_dim() + self.after
    }

    fn is_decomposed(&self) -> bool {
        self.rep.is_decomposed()
    }
}

impl<R: VRep> VRep for Padded<R> {
    fn points(&self) -> impl Iterator<Item = Point<Self::Coeff>> + '_ {
        self.rep.points().map(|p| pad(&p, self.before, self.after))
    }

    fn rays(&self) -> impl Iterator<Item = Ray<Self::Coeff>> + '_ {
        self.rep
            .rays()
            .map(|r| Ray::new(pad(&r.r, self.before, self.after)))
    }

    fn lines(&self) -> impl Iterator<Item = Line<Self::Coeff>> + '_ {
        self.rep
            .lines()
            .map(|l| Line::new(pad(&l.l, self.before, self.after)))
    }

    fn elements(&self) -> impl Iterator<Item = VElement<Self::Coeff>> + '_ {
        self.rep.elements().map(|e| match e {
            VElement::Point(p) => VElement::Point(pad(&p, self.before, self.after)),
            VElement::Ray(r) => VElement::Ray(Ray::new(pad(&r.r, self.before, self.after))),
            VElement::Line(l) => VElement::Line(Line::new(pad(&l.l, self.before, self.after))),
        })
    }
}

/// V-side Cartesian product: pad both operands into the joint space, then
/// Minkowski-sum the padded views. Generators of different operands live in
/// disjoint blocks, so the sum is exactly the product of the convex sets.
pub fn cartesian_product_v<A, B>(first: A, second: B) -> MinkowskiSum<Padded<A>, Padded<B>>
where
    A: VRep,
    B: VRep,
    A::Coeff: Promote<B::Coeff>,
{
    let n1 = first.ambient_dim();
    let n2 = second.ambient_dim();
    MinkowskiSum {
        first: Padded {
            rep: first,
            before: 0,
            after: n2,
        },
        second: Padded {
            rep: second,
            before: n1,
            after: 0,
        },
    }
}
