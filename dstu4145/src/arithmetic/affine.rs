//! Affine points

#![allow(clippy::op_ref)]

use super::{CURVE_EQUATION_A, CURVE_EQUATION_B, FieldElement};
use crate::{CompressedPoint, FIELD_BYTES_SIZE, FieldBytes, UncompressedPoint};
use core::{
    fmt,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    Error, Result,
    rand_core::CryptoRngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

/// M163 curve point expressed in affine coordinates.
///
/// The point at infinity has no affine coordinates; it is tracked with a
/// separate flag and reports `x = y = 0`.
#[derive(Clone, Copy, Debug)]
pub struct AffinePoint {
    /// x-coordinate
    pub(crate) x: FieldElement,

    /// y-coordinate
    pub(crate) y: FieldElement,

    /// Is this point the point at infinity? 0 = no, 1 = yes
    ///
    /// This is a proxy for [`Choice`], but uses `u8` instead to permit `const`
    /// constructors for `IDENTITY` and `GENERATOR`.
    pub(super) infinity: u8,
}

impl AffinePoint {
    /// Additive identity of the group: the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: 1,
    };

    /// Base point of M163.
    ///
    /// ```text
    /// Gₓ = 7 2D867F93 A93AC27D F9FF01AF FE74885C 8C540420
    /// Gᵧ = 0 224A9C39 47852B97 C5599D5F 4AB81122 ADC3FD9B
    /// ```
    pub const GENERATOR: Self = Self {
        x: FieldElement::from_be_hex("72D867F93A93AC27DF9FF01AFFE74885C8C540420"),
        y: FieldElement::from_be_hex("0224A9C3947852B97C5599D5F4AB81122ADC3FD9B"),
        infinity: 0,
    };

    /// Create a new [`AffinePoint`] with the given coordinates.
    pub(crate) const fn new(x: FieldElement, y: FieldElement) -> Self {
        Self { x, y, infinity: 0 }
    }

    /// Create a point from its coordinates, returning `None` if `(x, y)`
    /// does not satisfy the curve equation.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> CtOption<Self> {
        let point = Self::new(x, y);
        CtOption::new(point, point.is_on_curve())
    }

    /// Sample a uniformly random x-coordinate and solve the curve equation
    /// for y, resampling until a root exists.
    ///
    /// The result lies on the curve but not necessarily in the subgroup
    /// generated by [`AffinePoint::GENERATOR`].
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        loop {
            let u = FieldElement::random(rng);
            let u2 = u.square();
            let w = u2 * u + CURVE_EQUATION_A * u2 + CURVE_EQUATION_B;

            if let Some(z) = Option::from(FieldElement::solve_quadratic(&u, &w)) {
                return Self::new(u, z);
            }
        }
    }

    /// Is this point the identity point?
    pub fn is_identity(&self) -> Choice {
        Choice::from(self.infinity)
    }

    /// Does this point satisfy `y² + xy = x³ + A·x² + B`?
    ///
    /// The identity is always on the curve.
    pub fn is_on_curve(&self) -> Choice {
        let x2 = self.x.square();
        let lhs = self.y.square() + self.x * self.y;
        let rhs = x2 * self.x + CURVE_EQUATION_A * x2 + CURVE_EQUATION_B;
        lhs.ct_eq(&rhs) | self.is_identity()
    }

    /// Returns the x-coordinate.
    pub fn x(&self) -> FieldElement {
        self.x
    }

    /// Returns the y-coordinate.
    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// Returns `self + other`.
    pub fn add(&self, other: &Self) -> Self {
        if bool::from(self.is_identity()) {
            return *other;
        }

        if bool::from(other.is_identity()) {
            return *self;
        }

        let (x1, y1) = (self.x, self.y);
        let (x2, y2) = (other.x, other.y);

        if x1 == x2 {
            if y2 == x1 + y1 {
                return Self::IDENTITY;
            }

            // on the curve, equal x and distinct from the negation means
            // the points are equal
            return self.double();
        }

        let lambda = (y1 + y2) * (x1 + x2).invert_unchecked();
        let x3 = lambda.square() + lambda + x1 + x2 + CURVE_EQUATION_A;
        let y3 = lambda * (x1 + x3) + x3 + y1;
        Self::new(x3, y3)
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        if bool::from(self.is_identity() | self.x.is_zero()) {
            return Self::IDENTITY;
        }

        let (x1, y1) = (self.x, self.y);
        let lambda = x1 + y1 * x1.invert_unchecked();
        let x3 = lambda.square() + lambda + CURVE_EQUATION_A;
        let y3 = x1.square() + (lambda + FieldElement::ONE) * x3;
        Self::new(x3, y3)
    }

    /// Returns `-self`, which is `(x, x + y)` on a binary curve.
    pub fn negate(&self) -> Self {
        Self {
            x: self.x,
            y: self.x + self.y,
            infinity: self.infinity,
        }
    }

    /// Recover a point from its x-coordinate and the compression bit
    /// `ỹ = lsb(y / x)`.
    ///
    /// For `x ≠ 0`, writes `y = x·z` and solves `z² + z = x + A + B/x²`.
    /// `x = 0` has the single point `(0, √B)`, whose bit is 0.
    pub fn decompress(x_bytes: &FieldBytes, y_tilde: Choice) -> CtOption<Self> {
        FieldElement::from_bytes(x_bytes).and_then(|x| {
            if bool::from(x.is_zero()) {
                return CtOption::new(Self::new(x, CURVE_EQUATION_B.sqrt()), !y_tilde);
            }

            let w = x + CURVE_EQUATION_A + CURVE_EQUATION_B * x.invert_unchecked().square();

            FieldElement::solve_quadratic(&FieldElement::ONE, &w).map(|z| {
                let z = FieldElement::conditional_select(
                    &(z + FieldElement::ONE),
                    &z,
                    z.is_odd().ct_eq(&y_tilde),
                );

                Self::new(x, x * z)
            })
        })
    }

    /// Compression bit `lsb(y / x)`, or 0 when `x = 0`.
    fn y_tilde(&self) -> Choice {
        (self.y * self.x.invert_unchecked()).is_odd()
    }

    /// Serialize this point as SEC1 octets.
    pub fn to_encoded_point(&self, compress: bool) -> EncodedPoint {
        if bool::from(self.is_identity()) {
            return EncodedPoint::identity();
        }

        let x = self.x.to_bytes();

        if compress {
            EncodedPoint::from_compressed(&x, self.y_tilde())
        } else {
            EncodedPoint::from_affine_coordinates(&x, &self.y.to_bytes())
        }
    }

    /// Attempts to parse the given [`EncodedPoint`] as an [`AffinePoint`].
    ///
    /// # Returns
    ///
    /// `None` value if `encoded_point` is not on the M163 curve.
    pub fn from_encoded_point(encoded_point: &EncodedPoint) -> CtOption<Self> {
        let bytes = encoded_point.as_bytes();

        match encoded_point.tag() {
            Tag::Identity => CtOption::new(Self::IDENTITY, Choice::from(1)),
            Tag::Compressed(y_tilde) => {
                let mut x = FieldBytes::default();
                x.copy_from_slice(&bytes[1..]);
                Self::decompress(&x, Choice::from(y_tilde))
            }
            Tag::Uncompressed => {
                let x = FieldElement::from_slice(&bytes[1..=FIELD_BYTES_SIZE]);
                let y = FieldElement::from_slice(&bytes[FIELD_BYTES_SIZE + 1..]);
                x.and_then(|x| y.and_then(|y| Self::from_coordinates(x, y)))
            }
        }
    }
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &AffinePoint, b: &AffinePoint, choice: Choice) -> AffinePoint {
        AffinePoint {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            infinity: u8::conditional_select(&a.infinity, &b.infinity, choice),
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &AffinePoint) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y) & self.infinity.ct_eq(&other.infinity)
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl DefaultIsZeroes for AffinePoint {}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &AffinePoint) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AffinePoint {}

impl Add<AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &other)
    }
}

impl Add<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, other)
    }
}

impl Add<&AffinePoint> for &AffinePoint {
    type Output = AffinePoint;

    fn add(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(self, other)
    }
}

impl AddAssign<AffinePoint> for AffinePoint {
    fn add_assign(&mut self, rhs: AffinePoint) {
        *self = AffinePoint::add(self, &rhs);
    }
}

impl AddAssign<&AffinePoint> for AffinePoint {
    fn add_assign(&mut self, rhs: &AffinePoint) {
        *self = AffinePoint::add(self, rhs);
    }
}

impl Sub<AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &other.negate())
    }
}

impl Sub<&AffinePoint> for AffinePoint {
    type Output = AffinePoint;

    fn sub(self, other: &AffinePoint) -> AffinePoint {
        AffinePoint::add(&self, &other.negate())
    }
}

impl SubAssign<AffinePoint> for AffinePoint {
    fn sub_assign(&mut self, rhs: AffinePoint) {
        *self = AffinePoint::add(self, &rhs.negate());
    }
}

impl Neg for AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        self.negate()
    }
}

impl Neg for &AffinePoint {
    type Output = AffinePoint;

    fn neg(self) -> AffinePoint {
        self.negate()
    }
}

impl TryFrom<EncodedPoint> for AffinePoint {
    type Error = Error;

    fn try_from(point: EncodedPoint) -> Result<AffinePoint> {
        AffinePoint::try_from(&point)
    }
}

impl TryFrom<&EncodedPoint> for AffinePoint {
    type Error = Error;

    fn try_from(point: &EncodedPoint) -> Result<AffinePoint> {
        Option::from(AffinePoint::from_encoded_point(point)).ok_or(Error)
    }
}

impl From<AffinePoint> for EncodedPoint {
    fn from(affine_point: AffinePoint) -> EncodedPoint {
        EncodedPoint::from(&affine_point)
    }
}

impl From<&AffinePoint> for EncodedPoint {
    fn from(affine_point: &AffinePoint) -> EncodedPoint {
        affine_point.to_encoded_point(true)
    }
}

/// SEC1 leading octet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tag {
    /// `0x00`: the point at infinity.
    Identity,

    /// `0x02 | ỹ`: x-coordinate and compression bit.
    Compressed(u8),

    /// `0x04`: both coordinates.
    Uncompressed,
}

impl Tag {
    fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0x00 => Ok(Tag::Identity),
            0x02 | 0x03 => Ok(Tag::Compressed(byte & 1)),
            0x04 => Ok(Tag::Uncompressed),
            _ => Err(Error),
        }
    }

    const fn message_len(self) -> usize {
        match self {
            Tag::Identity => 1,
            Tag::Compressed(_) => 1 + FIELD_BYTES_SIZE,
            Tag::Uncompressed => 1 + 2 * FIELD_BYTES_SIZE,
        }
    }
}

/// SEC1-encoded M163 curve point.
///
/// Holds one of three octet strings: `00` for the identity,
/// `02 ‖ x` or `03 ‖ x` when compressed, `04 ‖ x ‖ y` otherwise.
/// The encoding is only checked for shape; [`AffinePoint::from_encoded_point`]
/// validates that it names a point on the curve.
#[derive(Clone, Copy)]
pub struct EncodedPoint {
    bytes: UncompressedPoint,
    len: usize,
}

impl EncodedPoint {
    /// Encoding of the point at infinity.
    pub const fn identity() -> Self {
        Self {
            bytes: [0u8; 2 * FIELD_BYTES_SIZE + 1],
            len: 1,
        }
    }

    /// Decode a SEC1 octet string, checking its tag and length.
    pub fn from_bytes(input: impl AsRef<[u8]>) -> Result<Self> {
        let input = input.as_ref();
        let tag = input.first().copied().ok_or(Error).and_then(Tag::from_u8)?;

        if input.len() != tag.message_len() {
            return Err(Error);
        }

        let mut bytes = [0u8; 2 * FIELD_BYTES_SIZE + 1];
        bytes[..input.len()].copy_from_slice(input);

        Ok(Self {
            bytes,
            len: input.len(),
        })
    }

    /// Encode both coordinates.
    pub fn from_affine_coordinates(x: &FieldBytes, y: &FieldBytes) -> Self {
        let mut bytes = [0u8; 2 * FIELD_BYTES_SIZE + 1];
        bytes[0] = 0x04;
        bytes[1..=FIELD_BYTES_SIZE].copy_from_slice(x);
        bytes[FIELD_BYTES_SIZE + 1..].copy_from_slice(y);

        Self {
            bytes,
            len: bytes.len(),
        }
    }

    fn from_compressed(x: &FieldBytes, y_tilde: Choice) -> Self {
        let mut bytes = [0u8; 2 * FIELD_BYTES_SIZE + 1];
        bytes[0] = 0x02 | y_tilde.unwrap_u8();
        bytes[1..=FIELD_BYTES_SIZE].copy_from_slice(x);

        Self {
            bytes,
            len: 1 + FIELD_BYTES_SIZE,
        }
    }

    /// Get the SEC1 octets.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Is this the encoding of the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.tag() == Tag::Identity
    }

    /// Is this a compressed encoding?
    pub fn is_compressed(&self) -> bool {
        matches!(self.tag(), Tag::Compressed(_))
    }

    fn tag(&self) -> Tag {
        match self.bytes[0] {
            0x02 | 0x03 => Tag::Compressed(self.bytes[0] & 1),
            0x04 => Tag::Uncompressed,
            _ => Tag::Identity,
        }
    }

    /// Copy a compressed encoding into a fixed-width array.
    ///
    /// Returns `None` unless this encoding is compressed.
    pub fn to_compressed(&self) -> Option<CompressedPoint> {
        if !self.is_compressed() {
            return None;
        }

        let mut out = CompressedPoint::default();
        out.copy_from_slice(self.as_bytes());
        Some(out)
    }
}

impl AsRef<[u8]> for EncodedPoint {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl PartialEq for EncodedPoint {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for EncodedPoint {}

impl fmt::Debug for EncodedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncodedPoint(")?;

        for byte in self.as_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl TryFrom<&[u8]> for EncodedPoint {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes(bytes)
    }
}
