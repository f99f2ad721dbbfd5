//! Curve group tests over points sampled with the quadratic solver.

use dstu4145::{
    AffinePoint, EncodedPoint, FieldElement, ORDER, Scalar, U192,
    arithmetic::{CURVE_EQUATION_A, CURVE_EQUATION_B},
};
use proptest::prelude::*;
use rand_core::OsRng;

/// `2n`: the curve has cofactor 2.
fn curve_order() -> U192 {
    ORDER.wrapping_add(&ORDER)
}

#[test]
fn random_points_lie_on_curve() {
    for _ in 0..16 {
        let p = AffinePoint::random(&mut OsRng);
        assert!(bool::from(p.is_on_curve()));
        assert!(!bool::from(p.is_identity()));
        assert_eq!(p.mul_vartime(&curve_order()), AffinePoint::IDENTITY);
    }
}

#[test]
fn group_law_on_random_points() {
    let p = AffinePoint::random(&mut OsRng);
    let q = AffinePoint::random(&mut OsRng);

    assert_eq!(p + AffinePoint::IDENTITY, p);
    assert_eq!(p + (-p), AffinePoint::IDENTITY);
    assert_eq!(p + p, p.double());
    assert_eq!(p + q, q + p);
    assert_eq!(p + q - q, p);
}

#[test]
fn scalar_multiplication_of_random_point() {
    let p = AffinePoint::random(&mut OsRng);
    assert_eq!(p.mul_vartime(&U192::ZERO), AffinePoint::IDENTITY);
    assert_eq!(p.mul_vartime(&U192::ONE), p);
    assert_eq!(p.mul_vartime(&U192::from_u8(2)), p.double());
    assert_eq!(p * Scalar::from(3), p.double() + p);
}

#[test]
fn generator_has_order_n() {
    let g = AffinePoint::GENERATOR;
    assert_eq!(g.mul_vartime(&ORDER), AffinePoint::IDENTITY);
    assert_ne!(g.mul_vartime(&ORDER.wrapping_sub(&U192::ONE)), AffinePoint::IDENTITY);
}

#[test]
fn solver_roots() {
    for _ in 0..16 {
        let u = FieldElement::random(&mut OsRng);
        let w = FieldElement::random(&mut OsRng);

        if let Some(z) = Option::<FieldElement>::from(FieldElement::solve_quadratic(&u, &w)) {
            assert_eq!(z.square() + u * z, w);

            // the other root
            let z = z + u;
            assert_eq!(z.square() + u * z, w);
        }
    }
}

/// Lift `x` to a curve point, if `x³ + A·x² + B` has a root.
fn lift_x(mut bytes: [u8; 21]) -> Option<AffinePoint> {
    bytes[0] &= 0x07;
    let u = Option::<FieldElement>::from(FieldElement::from_bytes(&bytes))?;
    let w = u.square() * u + CURVE_EQUATION_A * u.square() + CURVE_EQUATION_B;
    let z = Option::<FieldElement>::from(FieldElement::solve_quadratic(&u, &w))?;
    Option::from(AffinePoint::from_coordinates(u, z))
}

prop_compose! {
    fn point()(p in any::<[u8; 21]>().prop_filter_map("no root for x", lift_x)) -> AffinePoint {
        p
    }
}

proptest! {
    #[test]
    fn multiply_is_additive(p in point(), j in 0u64..1 << 16, k in 0u64..1 << 16) {
        let lhs = p.mul_vartime(&U192::from_u64(j + k));
        let rhs = p.mul_vartime(&U192::from_u64(j)) + p.mul_vartime(&U192::from_u64(k));
        prop_assert_eq!(lhs, rhs);
    }

    #[test]
    fn compressed_encoding_round_trips(p in point()) {
        let encoded = p.to_encoded_point(true);
        let decoded = EncodedPoint::from_bytes(encoded.as_bytes()).unwrap();
        prop_assert_eq!(AffinePoint::try_from(&decoded).unwrap(), p);
    }

    #[test]
    fn lifted_points_have_curve_order(p in point()) {
        prop_assert_eq!(p.mul_vartime(&curve_order()), AffinePoint::IDENTITY);
    }
}
