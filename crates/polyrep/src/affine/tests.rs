use nalgebra::{dvector, DVector};
use num_rational::Rational64;
use proptest::prelude::*;

use super::*;
use crate::element::{remproj, Element, HyperPlane, Line};
use crate::rep::HRep;

fn hp(a: Vec<i64>, beta: i64) -> HyperPlane<i64> {
    HyperPlane::new(DVector::from_vec(a), beta)
}

#[test]
fn two_axis_planes_leave_a_line() {
    // y = 0 and z = 0 in 3-space: the flat is the x-axis.
    let l = AffineSpace::new(3, vec![hp(vec![0, 1, 0], 0), hp(vec![0, 0, 1], 0)]).unwrap();
    assert_eq!(l.rank(), 2);
    assert_eq!(l.dim(), 1);
    assert!(l.contains(&dvector![5i64, 0, 0]).unwrap());
    assert!(!l.contains(&dvector![5i64, 1, 0]).unwrap());
}

#[test]
fn nonparallel_planes_in_the_plane_pin_a_point() {
    // x + y = 1 and x = 0 meet exactly in (0, 1).
    let l = AffineSpace::new(2, vec![hp(vec![1, 1], 1), hp(vec![1, 0], 0)]).unwrap();
    assert_eq!(l.dim(), 0);
    assert!(l.contains(&dvector![0i64, 1]).unwrap());
    assert!(!l.contains(&dvector![1i64, 0]).unwrap());
}

#[test]
fn span_of_two_axes_is_the_xy_plane() {
    let s = LinearSpace::new(
        3,
        vec![Line::new(dvector![1i64, 0, 0]), Line::new(dvector![0i64, 1, 0])],
    )
    .unwrap();
    assert_eq!(s.dim(), 2);
    assert!(s.contains(&dvector![3i64, -2, 0]).unwrap());
    assert!(!s.contains(&dvector![3i64, -2, 1]).unwrap());
}

#[test]
fn affine_closure_holds_outside_the_unit_interval() {
    let l = AffineSpace::new(3, vec![hp(vec![0, 1, 0], 2), hp(vec![0, 0, 1], -1)]).unwrap();
    let x = dvector![4i64, 2, -1];
    let y = dvector![-7i64, 2, -1];
    assert!(l.contains(&x).unwrap());
    assert!(l.contains(&y).unwrap());
    for lambda in [2i64, -1] {
        let z = x.map(|c| c * lambda) + y.map(|c| c * (1 - lambda));
        assert!(l.contains(&z).unwrap());
    }
}

#[test]
fn membership_sees_linear_combinations_of_nonorthogonal_planes() {
    // y = 1 is (x + y = 1) - (x = 0); sequential projection against the
    // orthogonalized basis must recognize it.
    let l = AffineSpace::new(2, vec![hp(vec![1, 1], 1), hp(vec![1, 0], 0)]).unwrap();
    assert!(l.is_member(&hp(vec![0, 1], 1)).unwrap());
    // parallel flat with a different offset is not a member
    assert!(!l.is_member(&hp(vec![0, 1], 2)).unwrap());
}

#[test]
fn duplicates_are_kept_until_removed() {
    let l = AffineSpace::new(
        2,
        vec![hp(vec![1, 0], 1), hp(vec![2, 0], 2), hp(vec![0, 1], 0)],
    )
    .unwrap();
    // the scaled copy is recorded but does not change the rank
    assert_eq!(l.hyperplanes().count(), 3);
    assert_eq!(l.rank(), 2);
    let deduped = l.remove_duplicates();
    assert_eq!(deduped.hyperplanes().count(), 2);
    assert_eq!(deduped.rank(), 2);
    assert_eq!(deduped.remove_duplicates(), deduped);
}

#[test]
fn builder_reports_membership_incrementally() {
    let mut b = AffineSpaceBuilder::new(2);
    assert!(b.insert(hp(vec![1, 1], 1)).unwrap());
    assert!(b.is_member(&hp(vec![2, 2], 2)).unwrap());
    assert!(!b.is_member(&hp(vec![1, 0], 0)).unwrap());
    assert!(b.insert(hp(vec![1, 0], 0)).unwrap());
    // dependent element is recorded but adds nothing to the basis
    assert!(!b.insert(hp(vec![0, 1], 1)).unwrap());
    let l = b.build();
    assert_eq!(l.rank(), 2);
    assert_eq!(l.hyperplanes().count(), 3);
}

#[test]
fn integer_folds_survive_repeated_projection() {
    // without the per-step reduction the scaled residuals of this rank-3
    // system overflow i64 during the membership fold
    let planes = vec![
        hp(vec![3, 2, -3], 0),
        hp(vec![0, 6, 0], 0),
        hp(vec![6, 0, 5], 0),
    ];
    let l = AffineSpace::new(3, planes.clone()).unwrap();
    assert_eq!(l.rank(), 3);
    assert_eq!(l.dim(), 0);
    for h in &planes {
        assert!(l.is_member(h).unwrap());
    }
    assert_eq!(l.remove_duplicates().rank(), 3);
}

#[test]
fn mixed_streams_of_the_wrong_kind_are_rejected() {
    use crate::element::{HElement, HalfSpace, VElement};
    let err = AffineSpace::from_elements(
        2,
        vec![HElement::HalfSpace(HalfSpace::new(dvector![1i64, 0], 1))],
    )
    .unwrap_err();
    assert_eq!(
        err,
        Error::IncompatibleKind {
            wanted: "hyperplane",
            found: "halfspace"
        }
    );
    let err =
        LinearSpace::from_elements(2, vec![VElement::Point(dvector![0i64, 0])]).unwrap_err();
    assert_eq!(
        err,
        Error::IncompatibleKind {
            wanted: "line",
            found: "point"
        }
    );
}

#[test]
fn rational_flats_use_the_general_projection_path() {
    let q = Rational64::new;
    let l = AffineSpace::new(
        2,
        vec![
            HyperPlane::new(dvector![q(1, 2), q(1, 2)], q(1, 2)),
            HyperPlane::new(dvector![q(1, 1), q(0, 1)], q(0, 1)),
        ],
    )
    .unwrap();
    assert_eq!(l.dim(), 0);
    assert!(l.contains(&dvector![q(0, 1), q(1, 1)]).unwrap());
}

#[test]
fn float_membership_takes_an_explicit_tolerance() {
    let l = AffineSpace::new(
        2,
        vec![HyperPlane::new(dvector![1.0f64, 1.0], 1.0)],
    )
    .unwrap();
    let candidate = HyperPlane::new(dvector![3.0f64, 3.0], 3.0 + 1e-12);
    assert!(!l.is_member(&candidate).unwrap());
    assert!(l.is_member_eps(&candidate, 1e-6).unwrap());
}

proptest! {
    /// Inserted elements project to the algebraic zero against the flat.
    #[test]
    fn inserted_planes_are_members(
        rows in proptest::collection::vec(
            (proptest::collection::vec(-6i64..=6, 3), -6i64..=6),
            1..5,
        )
    ) {
        let planes: Vec<_> = rows
            .into_iter()
            .map(|(a, beta)| hp(a, beta))
            .collect();
        let l = AffineSpace::new(3, planes.clone()).unwrap();
        for h in &planes {
            prop_assert!(l.is_member(h).unwrap());
        }
        prop_assert!(l.rank() <= 3);
    }

    /// Dedup is idempotent: same rank, same member set, same count.
    #[test]
    fn remove_duplicates_is_idempotent(
        rows in proptest::collection::vec(
            (proptest::collection::vec(-4i64..=4, 3), -4i64..=4),
            1..6,
        )
    ) {
        let planes: Vec<_> = rows
            .into_iter()
            .map(|(a, beta)| hp(a, beta))
            .collect();
        let l = AffineSpace::new(3, planes).unwrap();
        let once = l.remove_duplicates();
        let twice = once.remove_duplicates();
        prop_assert_eq!(once.hyperplanes().count(), twice.hyperplanes().count());
        prop_assert_eq!(once.rank(), twice.rank());
        for h in once.hyperplanes() {
            prop_assert!(twice.is_member(&h).unwrap());
        }
    }

    /// Integer combinations of the spanning lines stay inside the span.
    #[test]
    fn span_contains_its_combinations(
        dirs in proptest::collection::vec(proptest::collection::vec(-5i64..=5, 3), 1..4),
        coeffs in proptest::collection::vec(-3i64..=3, 4),
    ) {
        let lines: Vec<_> = dirs
            .iter()
            .map(|d| Line::new(DVector::from_vec(d.clone())))
            .collect();
        let s = LinearSpace::new(3, lines).unwrap();
        let mut combo = DVector::zeros(3);
        for (d, c) in dirs.iter().zip(&coeffs) {
            combo += DVector::from_vec(d.clone()).map(|v| v * c);
        }
        prop_assert!(s.contains(&combo).unwrap());
    }

    /// The projection of any element on itself vanishes.
    #[test]
    fn remproj_on_self_is_zero(a in proptest::collection::vec(-9i64..=9, 3), beta in -9i64..=9) {
        let h = hp(a, beta);
        prop_assert!(remproj(&h, &h).is_zero());
    }
}
