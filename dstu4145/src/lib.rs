#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[cfg(feature = "alloc")]
#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod arithmetic;

#[cfg(feature = "dsa")]
pub mod dsa;

pub use elliptic_curve::{self, bigint::U192};

pub use arithmetic::{
    affine::{AffinePoint, EncodedPoint},
    field::FieldElement,
    scalar::Scalar,
};

/// Order of the M163 base point (i.e. scalar modulus) serialized as
/// hexadecimal.
///
/// Left-padded to the width of [`U192`].
pub const ORDER_HEX: &str = "0000000400000000000000000002BEC12BE2262D39BCF14D";

/// Order of the M163 base point (i.e. scalar modulus).
pub const ORDER: U192 = U192::from_be_hex(ORDER_HEX);

/// Size of a serialized field element or scalar in bytes.
pub const FIELD_BYTES_SIZE: usize = 21;

/// M163 field element serialized as bytes.
///
/// Byte array containing a big-endian serialized field element value (base
/// field or scalar).
pub type FieldBytes = [u8; FIELD_BYTES_SIZE];

/// Compressed SEC1-encoded curve point.
pub type CompressedPoint = [u8; FIELD_BYTES_SIZE + 1];

/// Uncompressed SEC1-encoded curve point.
pub type UncompressedPoint = [u8; 2 * FIELD_BYTES_SIZE + 1];
