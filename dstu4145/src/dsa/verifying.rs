//! Support for verifying DSTU 4145 signatures.
//!
//! ## Algorithm
//!
//! ```text
//! 1: verify whether r, s in [1, n-1], verification failed if not
//! 2: calculate h = H(M) as a field element, set h = 1 if h = 0
//! 3: calculate R = [s]P + [r]Q, verification failed if R = O
//! 4: calculate y = h * x(R) in GF(2^163)
//! 5: calculate r' = y truncated to L(n) - 1 bits
//! 6: verification pass if r' = r, otherwise failed
//! ```
//!
//! The public key is `Q = -[d]P`, which makes `[s]P + [r]Q = [e]P` for an
//! honest signature.

use super::{Signature, hash_to_field};
use crate::{AffinePoint, EncodedPoint, ORDER, Scalar};
use elliptic_curve::subtle::{Choice, ConstantTimeEq};
use sha2::{Digest, Sha256};
use signature::{DigestVerifier, Error, Result, Verifier, hazmat::PrehashVerifier};

/// DSTU 4145 public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for verifying:
///
/// - [`Verifier`]: verify a message against a provided key and signature
/// - [`DigestVerifier`]: verify a message [`Digest`] against a provided key and signature
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a message digest
///
/// ## Public point
///
/// The public point is `Q = -[d]P`, the negation of the textbook `Q = [d]P`.
/// DSTU 4145 signs with `s = e + d·r`, so only the negated point makes
/// `[s]P + [r]Q = [e]P` hold. A point computed as `[d]P` by another tool
/// must be negated before it is used here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifyingKey {
    /// Public point `Q`.
    point: AffinePoint,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Returns an [`Error`] unless the point is on the curve, is not the
    /// identity and lies in the subgroup of order `n`.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        let is_valid = point.is_on_curve()
            & !point.is_identity()
            & point.mul_vartime(&ORDER).is_identity();

        if is_valid.into() {
            Ok(Self { point })
        } else {
            Err(Error::new())
        }
    }

    /// Initialize [`VerifyingKey`] from an [`EncodedPoint`].
    pub fn from_encoded_point(encoded_point: &EncodedPoint) -> Result<Self> {
        Option::<AffinePoint>::from(AffinePoint::from_encoded_point(encoded_point))
            .ok_or_else(Error::new)
            .and_then(Self::from_affine)
    }

    /// Initialize [`VerifyingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let encoded_point = EncodedPoint::from_bytes(bytes).map_err(|_| Error::new())?;
        Self::from_encoded_point(&encoded_point)
    }

    /// Compute `Q = -[d]P` for a non-zero secret scalar `d`.
    pub(super) fn from_secret_scalar(secret_scalar: &Scalar) -> Self {
        Self {
            point: -AffinePoint::mul_by_generator(secret_scalar),
        }
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Serialize this [`VerifyingKey`] as a SEC1 [`EncodedPoint`], optionally
    /// applying point compression.
    pub fn to_encoded_point(&self, compress: bool) -> EncodedPoint {
        self.point.to_encoded_point(compress)
    }

    /// Check a signature over a message hashed with SHA-256.
    ///
    /// Equivalent to [`Verifier::verify`] with the error discarded.
    pub fn is_valid(&self, msg: &[u8], signature: &Signature) -> bool {
        self.verify(msg, signature).is_ok()
    }
}

//
// `*Verifier` trait impls
//

impl<D> DigestVerifier<D, Signature> for VerifyingKey
where
    D: Digest,
{
    fn verify_digest(&self, digest: D, signature: &Signature) -> Result<()> {
        self.verify_prehash(&digest.finalize(), signature)
    }
}

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> Result<()> {
        // 1: verify whether r, s in [1, n-1]
        let (r, s) = signature.split_scalars(); // checked at signature parse time

        // 2: calculate h = H(M), set h = 1 if h = 0
        let h = hash_to_field(prehash)?;

        // 3: calculate R = [s]P + [r]Q
        let point = AffinePoint::lincomb(&AffinePoint::GENERATOR, &s, &self.point, &r);

        if point.is_identity().into() {
            return Err(Error::new());
        }

        // 4: calculate y = h * x(R)
        let y = h * point.x();

        // 5: calculate r' = y truncated to L(n) - 1 bits
        let r_prime = Scalar::from_field_truncated(&y);

        // 6: verification pass if r' = r
        if r_prime.ct_eq(&r).into() {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> Result<()> {
        self.verify_digest(Sha256::new_with_prefix(msg), signature)
    }
}

//
// Other trait impls
//

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl ConstantTimeEq for VerifyingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.point.ct_eq(&other.point)
    }
}

impl From<VerifyingKey> for AffinePoint {
    fn from(verifying_key: VerifyingKey) -> AffinePoint {
        verifying_key.point
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(verifying_key: &VerifyingKey) -> AffinePoint {
        verifying_key.point
    }
}

impl From<VerifyingKey> for EncodedPoint {
    fn from(verifying_key: VerifyingKey) -> EncodedPoint {
        verifying_key.to_encoded_point(true)
    }
}

impl TryFrom<AffinePoint> for VerifyingKey {
    type Error = Error;

    fn try_from(point: AffinePoint) -> Result<Self> {
        Self::from_affine(point)
    }
}

impl TryFrom<&EncodedPoint> for VerifyingKey {
    type Error = Error;

    fn try_from(encoded_point: &EncodedPoint) -> Result<Self> {
        Self::from_encoded_point(encoded_point)
    }
}
