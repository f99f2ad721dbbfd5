//! Scalar multiplication.
//!
//! Right-to-left binary double-and-add over the bits of the scalar. None of
//! this runs in constant time.

use super::{affine::AffinePoint, scalar::Scalar};
use crate::U192;
use core::ops::{Mul, MulAssign};
use elliptic_curve::bigint::Encoding;

impl AffinePoint {
    /// Returns `k * self` for any non-negative integer `k`.
    ///
    /// `k` is not reduced modulo the group order, so this also works for
    /// points outside the subgroup generated by [`AffinePoint::GENERATOR`].
    pub fn mul_vartime(&self, k: &U192) -> Self {
        double_and_add(self, &k.to_be_bytes())
    }

    /// Returns `k * G`.
    pub fn mul_by_generator(k: &Scalar) -> Self {
        Self::GENERATOR.mul_vartime(k.as_uint())
    }

    /// Returns `a * p + b * q`.
    pub fn lincomb(p: &Self, a: &Scalar, q: &Self, b: &Scalar) -> Self {
        p.mul_vartime(a.as_uint()) + q.mul_vartime(b.as_uint())
    }
}

/// Walks the big endian bytes of `k` from the least significant bit,
/// doubling the addend after every bit.
fn double_and_add(point: &AffinePoint, k: &[u8]) -> AffinePoint {
    let mut acc = AffinePoint::IDENTITY;
    let mut addend = *point;

    // leading zero bytes contribute nothing
    let Some(top) = k.iter().position(|&byte| byte != 0) else {
        return acc;
    };

    for (i, &byte) in k[top..].iter().rev().enumerate() {
        let last = i == k.len() - top - 1;

        for bit in 0..8 {
            if (byte >> bit) & 1 == 1 {
                acc += addend;
            }

            if last && byte >> bit <= 1 {
                break;
            }

            addend = addend.double();
        }
    }

    acc
}

impl Mul<Scalar> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: Scalar) -> AffinePoint {
        self.mul_vartime(scalar.as_uint())
    }
}

impl Mul<&Scalar> for AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &Scalar) -> AffinePoint {
        self.mul_vartime(scalar.as_uint())
    }
}

impl Mul<&Scalar> for &AffinePoint {
    type Output = AffinePoint;

    fn mul(self, scalar: &Scalar) -> AffinePoint {
        self.mul_vartime(scalar.as_uint())
    }
}

impl MulAssign<Scalar> for AffinePoint {
    fn mul_assign(&mut self, scalar: Scalar) {
        *self = self.mul_vartime(scalar.as_uint());
    }
}

impl MulAssign<&Scalar> for AffinePoint {
    fn mul_assign(&mut self, scalar: &Scalar) {
        *self = self.mul_vartime(scalar.as_uint());
    }
}
