//! Pure Rust implementation of group operations on the DSTU 4145 M163 curve.
//!
//! The curve is the binary (characteristic 2) curve
//!
//! ```text
//! E: y² + xy = x³ + A·x² + B    over GF(2^163) = GF(2)[x] / (x^163 + x^7 + x^6 + x^3 + 1)
//! ```
//!
//! with `A = 1` and `B` as in [`CURVE_EQUATION_B`].

pub mod affine;
pub mod field;
pub mod scalar;

mod mul;

use self::field::FieldElement;

/// Curve coefficient `A`.
pub const CURVE_EQUATION_A: FieldElement = FieldElement::ONE;

/// Curve coefficient `B`.
///
/// ```text
/// B = 5 FF610846 2A2DC821 0AB40392 5E638A19 C1455D21
/// ```
pub const CURVE_EQUATION_B: FieldElement =
    FieldElement::from_be_hex("5FF6108462A2DC8210AB403925E638A19C1455D21");
