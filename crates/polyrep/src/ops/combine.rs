//! Intersection (H-side) and convex hull (V-side): stream concatenation
//! after promotion. No redundancy elimination happens here; coincident
//! elements from both operands survive until an explicit dedup or a backend
//! pass.

use crate::element::{HElement, HalfSpace, HyperPlane, Line, Point, Ray, VElement};
use crate::error::{Error, Result};
use crate::promote::Promote;
use crate::rep::{HRep, Representation, VRep};

/// Lazy `H1 ∩ H2`: both element streams, promoted to the common type.
#[derive(Clone, Debug)]
pub struct Intersection<A, B> {
    first: A,
    second: B,
}

/// Intersect two H-representations over the same ambient dimension.
pub fn intersect<A, B>(first: A, second: B) -> Result<Intersection<A, B>>
where
    A: HRep,
    B: HRep,
    A::Coeff: Promote<B::Coeff>,
{
    if first.ambient_dim() != second.ambient_dim() {
        return Err(Error::DimensionMismatch {
            expected: first.ambient_dim(),
            found: second.ambient_dim(),
        });
    }
    Ok(Intersection { first, second })
}

impl<A, B> Representation for Intersection<A, B>
where
    A: HRep,
    B: HRep,
    A::Coeff: Promote<B::Coeff>,
{
    type Coeff = <A::Coeff as Promote<B::Coeff>>::Wider;

    fn ambient_dim(&self) -> usize {
        self.first.ambient_dim()
    }

    // result kind follows the first operand
    fn is_decomposed(&self) -> bool {
        self.first.is_decomposed()
    }
}

impl<A, B> HRep for Intersection<A, B>
where
    A: HRep,
    B: HRep,
    A::Coeff: Promote<B::Coeff>,
{
    fn hyperplanes(&self) -> impl Iterator<Item = HyperPlane<Self::Coeff>> + '_ {
        self.first
            .hyperplanes()
            .map(|h| h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen))
            .chain(
                self.second
                    .hyperplanes()
                    .map(|h| h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs)),
            )
    }

    fn halfspaces(&self) -> impl Iterator<Item = HalfSpace<Self::Coeff>> + '_ {
        self.first
            .halfspaces()
            .map(|h| h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen))
            .chain(
                self.second
                    .halfspaces()
                    .map(|h| h.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs)),
            )
    }

    // one pass over each operand's mixed stream when undecomposed
    fn elements(&self) -> impl Iterator<Item = HElement<Self::Coeff>> + '_ {
        self.first
            .elements()
            .map(|e| e.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen))
            .chain(
                self.second
                    .elements()
                    .map(|e| e.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs)),
            )
    }
}

/// Lazy `conv(V1 ∪ V2)`: both generator streams, promoted.
#[derive(Clone, Debug)]
pub struct ConvexHull<A, B> {
    first: A,
    second: B,
}

/// Convex hull of two V-representations over the same ambient dimension.
pub fn convex_hull<A, B>(first: A, second: B) -> Result<ConvexHull<A, B>>
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
    Ok(ConvexHull { first, second })
}

impl<A, B> Representation for ConvexHull<A, B>
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

impl<A, B> VRep for ConvexHull<A, B>
where
    A: VRep,
    B: VRep,
    A::Coeff: Promote<B::Coeff>,
{
    fn points(&self) -> impl Iterator<Item = Point<Self::Coeff>> + '_ {
        self.first
            .points()
            .map(|p| p.map(<A::Coeff as Promote<B::Coeff>>::widen))
            .chain(
                self.second
                    .points()
                    .map(|p| p.map(<A::Coeff as Promote<B::Coeff>>::widen_rhs)),
            )
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

    fn elements(&self) -> impl Iterator<Item = VElement<Self::Coeff>> + '_ {
        self.first
            .elements()
            .map(|e| e.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen))
            .chain(
                self.second
                    .elements()
                    .map(|e| e.map_coeff(<A::Coeff as Promote<B::Coeff>>::widen_rhs)),
            )
    }
}
