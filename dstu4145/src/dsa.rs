//! DSTU 4145-2002 digital signatures over the M163 polynomial-basis curve.
//!
//! ## Usage
//!
//! NOTE: requires the `dsa` crate feature enabled, and `rand_core` dependency
//! with `getrandom` feature enabled.
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use rand_core::OsRng; // requires 'getrandom` feature
//! use dstu4145::dsa::{Signature, SigningKey, signature::Signer};
//!
//! // Signing
//! let signing_key = SigningKey::random(&mut OsRng); // serialize with `::to_bytes()`
//! let verifying_key_bytes = signing_key.verifying_key().to_encoded_point(true);
//! let message = b"test message";
//! let signature: Signature = signing_key.sign(message);
//!
//! // Verifying
//! use dstu4145::dsa::{VerifyingKey, signature::Verifier};
//!
//! let verifying_key = VerifyingKey::from_sec1_bytes(verifying_key_bytes.as_bytes())?;
//! verifying_key.verify(message, &signature)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Hash function
//!
//! [`Signer`] and [`Verifier`] hash messages with SHA-256. Any other digest
//! of at least [`FIELD_BYTES_SIZE`] bytes can be used through the
//! [`DigestSigner`]/[`DigestVerifier`] traits or the prehash traits in
//! [`signature::hazmat`].
//!
//! [`Signer`]: signature::Signer
//! [`Verifier`]: signature::Verifier
//! [`DigestSigner`]: signature::DigestSigner
//! [`DigestVerifier`]: signature::DigestVerifier

mod presignature;
mod signing;
mod verifying;

pub use signature;

pub use self::{presignature::Presignature, signing::SigningKey, verifying::VerifyingKey};

use crate::{FIELD_BYTES_SIZE, FieldBytes, FieldElement, Scalar};
use core::fmt::{self, Debug};
use signature::{Error, Result, SignatureEncoding};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// DSTU 4145 signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// DSTU 4145 signature.
///
/// Both components are integers in `[1, n)`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Size of an encoded DSTU 4145 signature in bytes.
    pub const BYTE_SIZE: usize = 2 * FIELD_BYTES_SIZE;

    /// Parse a signature from a byte array of `r ‖ s`.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(Self::BYTE_SIZE / 2);
        let r = Option::<Scalar>::from(Scalar::from_slice(r_bytes)).ok_or_else(Error::new)?;
        let s = Option::<Scalar>::from(Scalar::from_slice(s_bytes)).ok_or_else(Error::new)?;

        if bool::from(r.is_zero() | s.is_zero()) {
            return Err(Error::new());
        }

        Ok(Self { r, s })
    }

    /// Parse a signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map_err(|_| Error::new())?
            .try_into()
    }

    /// Create a [`Signature`] from the `r` and `s` scalars which comprise
    /// the signature.
    ///
    /// Returns an error if either is zero.
    pub fn from_scalars(r: Scalar, s: Scalar) -> Result<Self> {
        if bool::from(r.is_zero() | s.is_zero()) {
            return Err(Error::new());
        }

        Ok(Self { r, s })
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(Self::BYTE_SIZE / 2);
        r_bytes.copy_from_slice(&self.r.to_bytes());
        s_bytes.copy_from_slice(&self.s.to_bytes());
        ret
    }

    /// Bytes for the `r` component of a signature.
    pub fn r_bytes(&self) -> FieldBytes {
        self.r.to_bytes()
    }

    /// Bytes for the `s` component of a signature.
    pub fn s_bytes(&self) -> FieldBytes {
        self.s.to_bytes()
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> Scalar {
        self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Split the signature into its `r` and `s` scalars.
    pub fn split_scalars(&self) -> (Scalar, Scalar) {
        (self.r, self.s)
    }

    /// Convert this signature into a byte vector.
    #[cfg(feature = "alloc")]
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "dstu4145::dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(&signature)
    }
}

impl TryFrom<&SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: &SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(signature)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}

/// Map a message digest to the field element `h`.
///
/// Keeps the low-order [`FIELD_BYTES_SIZE`] bytes of the digest; a zero
/// result is replaced with one. Digests narrower than the field are
/// rejected.
fn hash_to_field(prehash: &[u8]) -> Result<FieldElement> {
    if prehash.len() < FIELD_BYTES_SIZE {
        return Err(Error::new());
    }

    let h = FieldElement::from_digest(prehash);

    if h.is_zero().into() {
        Ok(FieldElement::ONE)
    } else {
        Ok(h)
    }
}

#[cfg(test)]
mod tests {
    use super::{Signature, hash_to_field};
    use crate::{FieldElement, Scalar};
    use hex_literal::hex;

    #[test]
    fn hash_to_field_keeps_low_bytes() {
        let digest = hex!("64ec88ca00b268e5ba1a35678a1b5316d212f4f366b2477232534a8aeca37f3c");
        assert_eq!(
            hash_to_field(&digest).unwrap(),
            FieldElement::from_be_hex("78A1B5316D212F4F366B2477232534A8AECA37F3C")
        );
    }

    #[test]
    fn hash_to_field_zero_is_one() {
        assert_eq!(hash_to_field(&[0u8; 32]).unwrap(), FieldElement::ONE);

        // only bits above degree 162 set
        let mut digest = [0u8; 21];
        digest[0] = 0xf8;
        assert_eq!(hash_to_field(&digest).unwrap(), FieldElement::ONE);
    }

    #[test]
    fn hash_to_field_rejects_short_digest() {
        assert!(hash_to_field(&[0xffu8; 20]).is_err());
    }

    #[test]
    fn signature_rejects_zero_components() {
        let mut bytes = [0u8; Signature::BYTE_SIZE];
        bytes[20] = 1;
        assert!(Signature::from_bytes(&bytes).is_err());

        bytes[41] = 1;
        let signature = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(signature.split_scalars(), (Scalar::ONE, Scalar::ONE));
        assert_eq!(signature.to_bytes(), bytes);

        assert!(Signature::from_scalars(Scalar::ZERO, Scalar::ONE).is_err());
    }

    #[test]
    fn signature_rejects_out_of_range() {
        let bytes = hex!(
            "0400000000000000000002BEC12BE2262D39BCF14D"
            "000000000000000000000000000000000000000001"
        );
        assert!(Signature::from_bytes(&bytes).is_err());
        assert!(Signature::from_slice(&bytes[..41]).is_err());
    }
}
