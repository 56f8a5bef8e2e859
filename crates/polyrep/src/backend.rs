//! Default backend: linearity detection, affine hulls, and the polyhedron
//! double cache.
//!
//! Purpose
//! - [`DetectLinearity`] promotes implicit linearity to explicit form in
//!   place: an opposite pair of halfspaces becomes a hyperplane, an opposite
//!   pair of rays becomes a line. Kinds without a detection strategy report
//!   `NotImplemented` instead of silently skipping.
//! - [`affine_hull`] / [`linear_span`] / [`dim`] fold a representation's
//!   explicit linearity into a flat; `current = true` trusts the stored
//!   linearity, `current = false` re-detects on a working copy first.
//! - [`Polyhedron`] caches both representation sides; construction goes
//!   through a [`BackendConfig`] whose coefficient kind must match the
//!   operand's, the one runtime type check in the crate.

use crate::affine::{AffineSpace, LinearSpace};
use crate::element::{HyperPlane, Line};
use crate::error::{Error, Result};
use crate::num::{Coeff, CoeffKind};
use crate::rep::{
    ConcreteHRep, ConcreteVRep, HRep, MixedHRep, MixedVRep, Representation, SplitHRep, SplitVRep,
    VRep,
};

/// In-place promotion of implicit linearity to explicit equalities or lines.
pub trait DetectLinearity: Representation {
    /// Rewrite the representation so all linearity it implies is explicit.
    /// Kinds without a strategy leave the representation untouched and
    /// return `NotImplemented`.
    fn detect_linearity(&mut self) -> Result<()> {
        Err(Error::NotImplemented {
            what: "linearity detection",
        })
    }

    /// Whether the stored linearity is known to reflect a completed
    /// detection pass.
    fn linearity_detected(&self) -> bool {
        false
    }
}

impl<T: Coeff> DetectLinearity for SplitHRep<T> {
    // Each opposite pair `a·x ≤ β`, `−a·x ≤ −β` collapses into the
    // hyperplane `a·x = β`. Unpaired and redundant halfspaces survive;
    // dropping them is the explicit remove_duplicates.
    fn detect_linearity(&mut self) -> Result<()> {
        if self.linearity_current {
            return Ok(());
        }
        let halves = std::mem::take(&mut self.halves);
        let mut kept = Vec::with_capacity(halves.len());
        for h in halves {
            match kept.iter().position(|g: &crate::element::HalfSpace<T>| g.is_opposite(&h)) {
                Some(k) => {
                    let g = kept.remove(k);
                    self.planes.push(HyperPlane::new(g.a, g.beta));
                }
                None => kept.push(h),
            }
        }
        self.halves = kept;
        self.linearity_current = true;
        Ok(())
    }

    fn linearity_detected(&self) -> bool {
        self.linearity_current
    }
}

impl<T: Coeff> DetectLinearity for SplitVRep<T> {
    // Each opposite pair of rays spans the line through both.
    fn detect_linearity(&mut self) -> Result<()> {
        if self.linearity_current {
            return Ok(());
        }
        let rays = std::mem::take(&mut self.ray_dirs);
        let mut kept = Vec::with_capacity(rays.len());
        for r in rays {
            match kept.iter().position(|g: &crate::element::Ray<T>| g.is_opposite(&r)) {
                Some(k) => {
                    let g = kept.remove(k);
                    self.line_dirs.push(Line::new(g.r));
                }
                None => kept.push(r),
            }
        }
        self.ray_dirs = kept;
        self.linearity_current = true;
        Ok(())
    }

    fn linearity_detected(&self) -> bool {
        self.linearity_current
    }
}

// Mixed streams carry no per-kind storage to rewrite; the defaults report
// the missing strategy.
impl<T: Coeff> DetectLinearity for MixedHRep<T> {}
impl<T: Coeff> DetectLinearity for MixedVRep<T> {}

// Flats are all linearity already.
impl<T: Coeff> DetectLinearity for AffineSpace<T> {
    fn detect_linearity(&mut self) -> Result<()> {
        Ok(())
    }

    fn linearity_detected(&self) -> bool {
        true
    }
}

impl<T: Coeff> DetectLinearity for LinearSpace<T> {
    fn detect_linearity(&mut self) -> Result<()> {
        Ok(())
    }

    fn linearity_detected(&self) -> bool {
        true
    }
}

/// Flat spanned by the representation's hyperplanes. With `current = false`
/// implicit linearity is detected on a working copy first.
pub fn affine_hull<R>(rep: &R, current: bool) -> Result<AffineSpace<R::Coeff>>
where
    R: HRep + DetectLinearity + Clone,
{
    let flat = if current || rep.linearity_detected() {
        AffineSpace::new(rep.ambient_dim(), rep.hyperplanes().collect())?
    } else {
        let mut work = rep.clone();
        work.detect_linearity()?;
        AffineSpace::new(work.ambient_dim(), work.hyperplanes().collect())?
    };
    Ok(flat.remove_duplicates())
}

/// Span of the representation's lines, the V-side mirror of [`affine_hull`].
pub fn linear_span<R>(rep: &R, current: bool) -> Result<LinearSpace<R::Coeff>>
where
    R: VRep + DetectLinearity + Clone,
{
    let span = if current || rep.linearity_detected() {
        LinearSpace::new(rep.ambient_dim(), rep.lines().collect())?
    } else {
        let mut work = rep.clone();
        work.detect_linearity()?;
        LinearSpace::new(work.ambient_dim(), work.lines().collect())?
    };
    Ok(span.remove_duplicates())
}

/// Dimension of the polyhedron an H-representation describes: ambient
/// dimension minus the rank of its (detected) affine hull.
pub fn dim<R>(rep: &R, current: bool) -> Result<usize>
where
    R: HRep + DetectLinearity + Clone,
{
    Ok(rep.ambient_dim().saturating_sub(affine_hull(rep, current)?.rank()))
}

/// Numeric contract of the backend: the one place where coefficient types
/// are checked at runtime instead of promoted at compile time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BackendConfig {
    kind: CoeffKind,
}

impl BackendConfig {
    pub fn new(kind: CoeffKind) -> Self {
        Self { kind }
    }

    /// Exact arithmetic end to end.
    pub fn exact() -> Self {
        Self::new(CoeffKind::Rational)
    }

    /// Double-precision floats; all tolerances remain explicit.
    pub fn float() -> Self {
        Self::new(CoeffKind::F64)
    }

    pub fn kind(&self) -> CoeffKind {
        self.kind
    }

    fn check<T: Coeff>(&self) -> Result<()> {
        if T::KIND == self.kind {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                expected: self.kind,
                found: T::KIND,
            })
        }
    }
}

/// Polyhedron with a cache of both representation sides. Whichever side it
/// was built from is present; the other appears once a conversion backend
/// supplies it.
#[derive(Clone, Debug, PartialEq)]
pub struct Polyhedron<T> {
    dim: usize,
    h: Option<ConcreteHRep<T>>,
    v: Option<ConcreteVRep<T>>,
}

impl<T: Coeff> Polyhedron<T> {
    pub fn ambient_dim(&self) -> usize {
        self.dim
    }

    pub fn hrep(&self) -> Option<&ConcreteHRep<T>> {
        self.h.as_ref()
    }

    pub fn vrep(&self) -> Option<&ConcreteVRep<T>> {
        self.v.as_ref()
    }

    /// The cached H-side, or `NotImplemented` when only the V-side is known
    /// and no conversion backend has run.
    pub fn to_hrep(&self) -> Result<&ConcreteHRep<T>> {
        self.h.as_ref().ok_or(Error::NotImplemented {
            what: "representation conversion",
        })
    }

    /// The cached V-side, as [`Polyhedron::to_hrep`].
    pub fn to_vrep(&self) -> Result<&ConcreteVRep<T>> {
        self.v.as_ref().ok_or(Error::NotImplemented {
            what: "representation conversion",
        })
    }
}

/// Materialize an H-side view into a polyhedron under `config`'s numeric
/// contract.
pub fn polyhedron_from_h<R: HRep>(rep: &R, config: &BackendConfig) -> Result<Polyhedron<R::Coeff>> {
    config.check::<R::Coeff>()?;
    Ok(Polyhedron {
        dim: rep.ambient_dim(),
        h: Some(rep.concrete()),
        v: None,
    })
}

/// Materialize a V-side view, as [`polyhedron_from_h`].
pub fn polyhedron_from_v<R: VRep>(rep: &R, config: &BackendConfig) -> Result<Polyhedron<R::Coeff>> {
    config.check::<R::Coeff>()?;
    Ok(Polyhedron {
        dim: rep.ambient_dim(),
        h: None,
        v: Some(rep.concrete()),
    })
}

/// Former combined entry point that re-detected linearity on every cached
/// side of a polyhedron. It no longer computes anything.
#[deprecated(note = "call DetectLinearity::detect_linearity on the representation instead")]
pub fn detect_linearities<T: Coeff>(_p: &mut Polyhedron<T>) -> Result<()> {
    eprintln!(
        "polyrep: detect_linearities is deprecated and performs no work; \
         call detect_linearity on the representation instead"
    );
    Ok(())
}
