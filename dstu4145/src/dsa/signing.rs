//! Support for DSTU 4145 signing.
//!
//! ## Algorithm
//!
//! ```text
//! 1: calculate h = H(M) as a field element, set h = 1 if h = 0
//! 2: pick a presignature (e, Fe) with Fe = x([e]P) != 0
//! 3: calculate y = h * Fe in GF(2^163)
//! 4: calculate r = y truncated to L(n) - 1 bits, return to 2 if r = 0
//! 5: calculate s = (e + d * r) mod n, return to 2 if s = 0
//! 6: the digital signature of M is (r, s)
//! ```
//!
//! The presignature is derived from the secret scalar and `h` with the
//! HMAC-DRBG of RFC 6979, so signing the same message twice gives the same
//! signature while distinct messages get independent ephemerals.

use super::{Presignature, Signature, VerifyingKey, hash_to_field};
use crate::{FieldBytes, FieldElement, Scalar};
use core::fmt::{self, Debug};
use elliptic_curve::{
    subtle::{Choice, ConstantTimeEq},
    zeroize::Zeroize,
};
use rfc6979::HmacDrbg;
use sha2::{Digest, Sha256};
use signature::{
    DigestSigner, Error, KeypairRef, RandomizedDigestSigner, RandomizedSigner, Result, Signer,
    hazmat::{PrehashSigner, RandomizedPrehashSigner},
    rand_core::CryptoRngCore,
};

/// DSTU 4145 secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`Signer`]: sign a message using this key
/// - [`DigestSigner`]: sign the output of a [`Digest`] using this key
/// - [`PrehashSigner`]: sign the low-level raw output bytes of a message digest
#[derive(Clone)]
pub struct SigningKey {
    /// Secret scalar `d`.
    secret_scalar: Scalar,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Generate a cryptographically random [`SigningKey`].
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let secret_scalar = Scalar::random(rng);
        let verifying_key = VerifyingKey::from_secret_scalar(&secret_scalar);

        Self {
            secret_scalar,
            verifying_key,
        }
    }

    /// Parse signing key from big endian-encoded bytes.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        Self::from_slice(bytes)
    }

    /// Parse signing key from big endian-encoded byte slice containing a secret
    /// scalar value.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let secret_scalar =
            Option::<Scalar>::from(Scalar::from_slice(slice)).ok_or_else(Error::new)?;
        Self::from_nonzero_scalar(secret_scalar)
    }

    /// Create a signing key from a scalar, which must be non-zero.
    pub fn from_nonzero_scalar(secret_scalar: Scalar) -> Result<Self> {
        if secret_scalar.is_zero().into() {
            return Err(Error::new());
        }

        let verifying_key = VerifyingKey::from_secret_scalar(&secret_scalar);

        Ok(Self {
            secret_scalar,
            verifying_key,
        })
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret_scalar.to_bytes()
    }

    /// Borrow the secret [`Scalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &Scalar {
        &self.secret_scalar
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Sign a message digest with a caller-supplied presignature.
    ///
    /// Fails if the presignature yields `r = 0` or `s = 0`; the caller must
    /// discard it and try a fresh one. Each presignature must be used for at
    /// most one signature.
    pub fn sign_prehash_with_presignature(
        &self,
        prehash: &[u8],
        presignature: &Presignature,
    ) -> Result<Signature> {
        let h = hash_to_field(prehash)?;
        sign_with_presignature(&self.secret_scalar, &h, presignature)
    }
}

//
// `*Signer` trait impls
//

impl<D> DigestSigner<D, Signature> for SigningKey
where
    D: Digest,
{
    fn try_sign_digest(&self, digest: D) -> Result<Signature> {
        self.sign_prehash(&digest.finalize())
    }
}

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> Result<Signature> {
        sign_prehash_drbg(&self.secret_scalar, prehash, &[])
    }
}

impl<D> RandomizedDigestSigner<D, Signature> for SigningKey
where
    D: Digest,
{
    fn try_sign_digest_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        digest: D,
    ) -> Result<Signature> {
        self.sign_prehash_with_rng(rng, &digest.finalize())
    }
}

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> Result<Signature> {
        let mut data = FieldBytes::default();
        rng.try_fill_bytes(&mut data)?;
        sign_prehash_drbg(&self.secret_scalar, prehash, &data)
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Signature> {
        self.try_sign_digest_with_rng(rng, Sha256::new_with_prefix(msg))
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature> {
        self.try_sign_digest(Sha256::new_with_prefix(msg))
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_scalar.ct_eq(&other.secret_scalar)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_scalar.zeroize();
    }
}

/// Constant-time comparison
impl Eq for SigningKey {}
impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

/// Compute a signature with presignatures drawn from an HMAC-DRBG seeded
/// with the secret scalar, `h` and `data`.
fn sign_prehash_drbg(secret_scalar: &Scalar, prehash: &[u8], data: &[u8]) -> Result<Signature> {
    // 1: calculate h = H(M), set h = 1 if h = 0
    let h = hash_to_field(prehash)?;

    let mut secret_bytes = secret_scalar.to_bytes();
    let mut drbg = HmacDrbg::<Sha256>::new(&secret_bytes, &h.to_bytes(), data);
    secret_bytes.zeroize();

    loop {
        // 2: pick a presignature (e, Fe)
        let presignature = Presignature::from_drbg(&mut drbg);

        if let Ok(signature) = sign_with_presignature(secret_scalar, &h, &presignature) {
            return Ok(signature);
        }
    }
}

fn sign_with_presignature(
    secret_scalar: &Scalar,
    h: &FieldElement,
    presignature: &Presignature,
) -> Result<Signature> {
    // 3: calculate y = h * Fe
    let y = h * &presignature.fe();

    // 4: calculate r = y truncated to L(n) - 1 bits
    let r = Scalar::from_field_truncated(&y);

    if r.is_zero().into() {
        return Err(Error::new());
    }

    // 5: calculate s = (e + d * r) mod n
    let s = presignature.e() + &(secret_scalar * &r);

    // 6: the digital signature of M is (r, s)
    Signature::from_scalars(r, s)
}
