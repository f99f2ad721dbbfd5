//! Presignatures: ephemeral scalars paired with the x-coordinate of their
//! public point.
//!
//! ```text
//! 1: pick e in [1, n-1]
//! 2: calculate R = [e]P
//! 3: return to 1 if x(R) = 0
//! 4: the presignature is (e, Fe = x(R))
//! ```

use crate::{AffinePoint, FieldBytes, FieldElement, Scalar, arithmetic::scalar::ORDER_TOP_MASK};
use core::fmt::{self, Debug};
use elliptic_curve::{subtle::CtOption, zeroize::Zeroize};
use rfc6979::HmacDrbg;
use sha2::Sha256;
use signature::rand_core::CryptoRngCore;

/// Precomputed ephemeral value for a single DSTU 4145 signature.
///
/// # ⚠️ Warning
///
/// `e` is key material: two signatures made with the same presignature over
/// different messages reveal the signing key. Never sign twice with one.
#[derive(Clone)]
pub struct Presignature {
    /// Ephemeral scalar.
    e: Scalar,

    /// x-coordinate of `[e]P`.
    fe: FieldElement,
}

impl Presignature {
    /// Generate a fresh presignature.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        loop {
            let e = Scalar::random(rng);

            if let Some(presignature) = Option::from(Self::from_scalar(&e)) {
                return presignature;
            }
        }
    }

    /// Build a presignature from a chosen ephemeral scalar.
    ///
    /// Returns `None` if `e` is zero or `x([e]P) = 0`.
    pub fn from_scalar(e: &Scalar) -> CtOption<Self> {
        let fe = AffinePoint::mul_by_generator(e).x();
        let presignature = Self { e: *e, fe };
        CtOption::new(presignature, !(e.is_zero() | fe.is_zero()))
    }

    /// Draw presignatures from an HMAC-DRBG until one is valid.
    pub(super) fn from_drbg(drbg: &mut HmacDrbg<Sha256>) -> Self {
        let mut bytes = FieldBytes::default();

        loop {
            drbg.fill_bytes(&mut bytes);
            bytes[0] &= ORDER_TOP_MASK;

            let Some(e) = Option::<Scalar>::from(Scalar::from_bytes(&bytes)) else {
                continue;
            };

            if let Some(presignature) = Option::from(Self::from_scalar(&e)) {
                bytes.zeroize();
                return presignature;
            }
        }
    }

    /// Borrow the ephemeral scalar.
    pub(super) fn e(&self) -> &Scalar {
        &self.e
    }

    /// The x-coordinate of `[e]P`, written `Fe`.
    pub fn fe(&self) -> FieldElement {
        self.fe
    }
}

impl Debug for Presignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Presignature")
            .field("fe", &self.fe)
            .finish_non_exhaustive()
    }
}

impl Drop for Presignature {
    fn drop(&mut self) {
        self.e.zeroize();
    }
}
