//! Geometric element kinds shared by both representation sides.
//!
//! H-side: [`HyperPlane`] `a·x = β` and [`HalfSpace`] `a·x ≤ β`.
//! V-side: points (plain `DVector`), [`Ray`] from the origin and [`Line`]
//! spanned through the origin.
//!
//! Elements support the small arithmetic surface needed by projection
//! residuals (scaling, subtraction, exact zero test) through [`Element`];
//! dot products are always over the coordinate part only, while scaling and
//! subtraction also act on the offset β where one exists.

use nalgebra::DVector;

use crate::num::Coeff;

/// Point in ambient space. No wrapper type; a point is its coordinate vector.
pub type Point<T> = DVector<T>;

/// Hyperplane `{x : a·x = β}`.
#[derive(Clone, Debug, PartialEq)]
pub struct HyperPlane<T> {
    pub a: DVector<T>,
    pub beta: T,
}

/// Closed half-space `{x : a·x ≤ β}`. `a` is not normalized.
#[derive(Clone, Debug, PartialEq)]
pub struct HalfSpace<T> {
    pub a: DVector<T>,
    pub beta: T,
}

/// Ray from the origin through `r`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ray<T> {
    pub r: DVector<T>,
}

/// Line through the origin spanned by `l`.
#[derive(Clone, Debug, PartialEq)]
pub struct Line<T> {
    pub l: DVector<T>,
}

impl<T> HyperPlane<T> {
    #[inline]
    pub fn new(a: DVector<T>, beta: T) -> Self {
        Self { a, beta }
    }
}

impl<T> HalfSpace<T> {
    #[inline]
    pub fn new(a: DVector<T>, beta: T) -> Self {
        Self { a, beta }
    }
}

impl<T> Ray<T> {
    #[inline]
    pub fn new(r: DVector<T>) -> Self {
        Self { r }
    }
}

impl<T> Line<T> {
    #[inline]
    pub fn new(l: DVector<T>) -> Self {
        Self { l }
    }
}

/// Arithmetic surface used by projection residuals and deduplication.
pub trait Element<T: Coeff>: Clone {
    /// Coordinate part (normal for H-side elements, direction/position for
    /// V-side ones). Dot products in projections use this part only.
    fn coord(&self) -> &DVector<T>;
    /// Scale the whole element (coordinates and offset) by `t`.
    fn scale(&self, t: &T) -> Self;
    /// Subtract the whole of `rhs` (coordinates and offset).
    fn sub(&self, rhs: &Self) -> Self;
    /// Exact algebraic zero (all coordinates and the offset).
    fn is_zero(&self) -> bool;
    /// Reduce coefficient magnitude without changing the represented object.
    fn simplified(self) -> Self;
}

macro_rules! offset_element {
    ($ty:ident, $coord:ident) => {
        impl<T: Coeff> Element<T> for $ty<T> {
            #[inline]
            fn coord(&self) -> &DVector<T> {
                &self.$coord
            }

            fn scale(&self, t: &T) -> Self {
                Self {
                    $coord: self.$coord.map(|c| c * t.clone()),
                    beta: self.beta.clone() * t.clone(),
                }
            }

            fn sub(&self, rhs: &Self) -> Self {
                Self {
                    $coord: &self.$coord - &rhs.$coord,
                    beta: self.beta.clone() - rhs.beta.clone(),
                }
            }

            fn is_zero(&self) -> bool {
                self.beta.is_zero() && self.$coord.iter().all(|c| c.is_zero())
            }

            fn simplified(self) -> Self {
                match T::common_factor(self.$coord.iter().chain(std::iter::once(&self.beta))) {
                    Some(f) => Self {
                        $coord: self.$coord.map(|c| c / f.clone()),
                        beta: self.beta / f,
                    },
                    None => self,
                }
            }
        }
    };
}

offset_element!(HyperPlane, a);
offset_element!(HalfSpace, a);

macro_rules! direction_element {
    ($ty:ident, $coord:ident) => {
        impl<T: Coeff> Element<T> for $ty<T> {
            #[inline]
            fn coord(&self) -> &DVector<T> {
                &self.$coord
            }

            fn scale(&self, t: &T) -> Self {
                Self {
                    $coord: self.$coord.map(|c| c * t.clone()),
                }
            }

            fn sub(&self, rhs: &Self) -> Self {
                Self {
                    $coord: &self.$coord - &rhs.$coord,
                }
            }

            fn is_zero(&self) -> bool {
                self.$coord.iter().all(|c| c.is_zero())
            }

            fn simplified(self) -> Self {
                match T::common_factor(self.$coord.iter()) {
                    Some(f) => Self {
                        $coord: self.$coord.map(|c| c / f.clone()),
                    },
                    None => self,
                }
            }
        }
    };
}

direction_element!(Ray, r);
direction_element!(Line, l);

impl<T: Coeff> Element<T> for DVector<T> {
    #[inline]
    fn coord(&self) -> &DVector<T> {
        self
    }

    fn scale(&self, t: &T) -> Self {
        self.map(|c| c * t.clone())
    }

    fn sub(&self, rhs: &Self) -> Self {
        self - rhs
    }

    fn is_zero(&self) -> bool {
        self.iter().all(|c| c.is_zero())
    }

    fn simplified(self) -> Self {
        match T::common_factor(self.iter()) {
            Some(f) => self.map(|c| c / f.clone()),
            None => self,
        }
    }
}

/// Residual of `x` after removing its component along `l`.
///
/// Exact types use the scaled form `x·⟨l,l⟩ − l·⟨x,l⟩`, which stays inside
/// the coefficient ring. All other types use `x − l·(⟨x,l⟩/⟨l,l⟩)`. Both
/// paths divide the common factor out of the residual; without that
/// reduction the scaled form's magnitude compounds across sequential
/// projections and overflows fixed-width integers at small ranks.
/// `remproj(l, l)` is the zero element for every nonzero `l`.
pub fn remproj<T: Coeff, E: Element<T>>(x: &E, l: &E) -> E {
    let ll = l.coord().dot(l.coord());
    if ll.is_zero() {
        return x.clone();
    }
    let xl = x.coord().dot(l.coord());
    let r = if T::EXACT {
        x.scale(&ll).sub(&l.scale(&xl))
    } else {
        x.sub(&l.scale(&(xl / ll)))
    };
    r.simplified()
}

fn proportional<T: Coeff>(a: &DVector<T>, b: &DVector<T>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let a_zero = a.iter().all(|c| c.is_zero());
    let b_zero = b.iter().all(|c| c.is_zero());
    if a_zero || b_zero {
        return a_zero == b_zero;
    }
    // all 2x2 minors vanish; exact cross-multiplication, no division
    for i in 0..a.len() {
        for j in (i + 1)..a.len() {
            if a[i].clone() * b[j].clone() != a[j].clone() * b[i].clone() {
                return false;
            }
        }
    }
    true
}

fn same_orientation<T: Coeff>(a: &DVector<T>, b: &DVector<T>) -> bool {
    for i in 0..a.len() {
        if !a[i].is_zero() || !b[i].is_zero() {
            return a[i].clone() * b[i].clone() > T::zero();
        }
    }
    true
}

macro_rules! offset_coincident {
    ($ty:ident) => {
        impl<T: Coeff> $ty<T> {
            /// Duplicate test: `other` is a positive scalar multiple of
            /// `self` with the offset scaled by the same factor.
            pub fn is_coincident(&self, other: &Self) -> bool {
                if !proportional(&self.a, &other.a) || !same_orientation(&self.a, &other.a) {
                    return false;
                }
                match self.a.iter().position(|c| !c.is_zero()) {
                    Some(k) => {
                        self.beta.clone() * other.a[k].clone()
                            == other.beta.clone() * self.a[k].clone()
                    }
                    None => self.beta == other.beta,
                }
            }
        }
    };
}

offset_coincident!(HyperPlane);
offset_coincident!(HalfSpace);

impl<T: Coeff> HalfSpace<T> {
    /// `other` bounds the same hyperplane from the other side; together the
    /// two halfspaces force the equality `a·x = β`.
    pub fn is_opposite(&self, other: &Self) -> bool {
        let flipped = HalfSpace::new(other.a.map(|c| -c), -other.beta.clone());
        self.is_coincident(&flipped)
    }
}

impl<T: Coeff> Ray<T> {
    /// Duplicate test: directions agree up to a nonzero scalar multiple.
    pub fn is_coincident(&self, other: &Self) -> bool {
        proportional(&self.r, &other.r)
    }

    /// `other` points the exact opposite way; together the two rays span the
    /// line through both.
    pub fn is_opposite(&self, other: &Self) -> bool {
        !self.is_zero()
            && proportional(&self.r, &other.r)
            && !same_orientation(&self.r, &other.r)
    }
}

impl<T: Coeff> Line<T> {
    /// Duplicate test: directions agree up to a nonzero scalar multiple.
    pub fn is_coincident(&self, other: &Self) -> bool {
        proportional(&self.l, &other.l)
    }
}

macro_rules! map_coeff_offset {
    ($ty:ident, $coord:ident) => {
        impl<T: Coeff> $ty<T> {
            /// Convert the coefficient type entry-wise.
            pub fn map_coeff<U: Coeff>(self, mut f: impl FnMut(T) -> U) -> $ty<U> {
                $ty {
                    $coord: self.$coord.map(&mut f),
                    beta: f(self.beta),
                }
            }
        }
    };
}

map_coeff_offset!(HyperPlane, a);
map_coeff_offset!(HalfSpace, a);

impl<T: Coeff> Ray<T> {
    pub fn map_coeff<U: Coeff>(self, mut f: impl FnMut(T) -> U) -> Ray<U> {
        Ray {
            r: self.r.map(&mut f),
        }
    }
}

impl<T: Coeff> Line<T> {
    pub fn map_coeff<U: Coeff>(self, mut f: impl FnMut(T) -> U) -> Line<U> {
        Line {
            l: self.l.map(&mut f),
        }
    }
}

/// One element of an undecomposed H-side stream.
#[derive(Clone, Debug, PartialEq)]
pub enum HElement<T> {
    HyperPlane(HyperPlane<T>),
    HalfSpace(HalfSpace<T>),
}

impl<T: Coeff> HElement<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            HElement::HyperPlane(_) => "hyperplane",
            HElement::HalfSpace(_) => "halfspace",
        }
    }

    pub fn coord_len(&self) -> usize {
        match self {
            HElement::HyperPlane(h) => h.a.len(),
            HElement::HalfSpace(h) => h.a.len(),
        }
    }

    pub fn map_coeff<U: Coeff>(self, f: impl FnMut(T) -> U) -> HElement<U> {
        match self {
            HElement::HyperPlane(h) => HElement::HyperPlane(h.map_coeff(f)),
            HElement::HalfSpace(h) => HElement::HalfSpace(h.map_coeff(f)),
        }
    }
}

/// One element of an undecomposed V-side stream.
#[derive(Clone, Debug, PartialEq)]
pub enum VElement<T> {
    Point(Point<T>),
    Ray(Ray<T>),
    Line(Line<T>),
}

impl<T: Coeff> VElement<T> {
    pub fn kind(&self) -> &'static str {
        match self {
            VElement::Point(_) => "point",
            VElement::Ray(_) => "ray",
            VElement::Line(_) => "line",
        }
    }

    pub fn coord_len(&self) -> usize {
        match self {
            VElement::Point(p) => p.len(),
            VElement::Ray(r) => r.r.len(),
            VElement::Line(l) => l.l.len(),
        }
    }

    pub fn map_coeff<U: Coeff>(self, mut f: impl FnMut(T) -> U) -> VElement<U> {
        match self {
            VElement::Point(p) => VElement::Point(p.map(&mut f)),
            VElement::Ray(r) => VElement::Ray(r.map_coeff(f)),
            VElement::Line(l) => VElement::Line(l.map_coeff(f)),
        }
    }
}
