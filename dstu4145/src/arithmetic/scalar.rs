//! Scalar arithmetic modulo the order of the M163 base point:
//!
//! ```text
//! n = 4 00000000 00000000 0002BEC1 2BE2262D 39BCF14D
//! ```

use self::monty::OrderResidue;
use crate::{FIELD_BYTES_SIZE, FieldBytes, ORDER, U192};
use core::{
    fmt,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    bigint::Encoding,
    rand_core::CryptoRngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

use super::field::FieldElement;

/// Width of [`U192`] in bytes.
const UINT_BYTES: usize = 24;

/// Bit length of the group order, `L(n)`.
pub const ORDER_BITS: usize = 163;

/// Mask for the top byte of an [`ORDER_BITS`]-bit big endian integer.
pub(crate) const ORDER_TOP_MASK: u8 = (1 << (ORDER_BITS - 8 * (FIELD_BYTES_SIZE - 1))) - 1;

/// Mask for the top byte of an integer truncated to `L(n) - 1` bits.
const TRUNCATED_TOP_MASK: u8 = ORDER_TOP_MASK >> 1;

mod monty {
    use crate::{ORDER_HEX, U192};
    use elliptic_curve::bigint::{impl_modulus, modular::constant_mod::Residue};

    impl_modulus!(OrderModulus, U192, ORDER_HEX);

    /// Montgomery form of an integer modulo `n`.
    pub(super) type OrderResidue = Residue<OrderModulus, { U192::LIMBS }>;
}

/// Scalars are elements in the finite field modulo `n`.
///
/// The inner value is an unsigned integer in `[0, n)`.
#[derive(Clone, Copy, Default)]
pub struct Scalar(U192);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self(U192::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(U192::ONE);

    /// Create a scalar from an integer, returning `None` unless it is less
    /// than the group order.
    pub fn from_uint(uint: U192) -> CtOption<Self> {
        CtOption::new(Self(uint), Choice::from(u8::from(uint < ORDER)))
    }

    /// Attempts to parse the given big endian byte array as a scalar.
    ///
    /// Returns `None` if the value is not less than the group order.
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let mut wide = [0u8; UINT_BYTES];
        wide[UINT_BYTES - FIELD_BYTES_SIZE..].copy_from_slice(bytes);
        Self::from_uint(U192::from_be_slice(&wide))
    }

    /// Parse a scalar from a big endian byte slice of exactly
    /// [`FIELD_BYTES_SIZE`] bytes.
    pub fn from_slice(slice: &[u8]) -> CtOption<Self> {
        match FieldBytes::try_from(slice) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(_) => CtOption::new(Self::ZERO, Choice::from(0)),
        }
    }

    /// Interpret the low `L(n) - 1` bits of a field element as an integer.
    ///
    /// The result is always less than `n`, so no reduction is needed.
    pub fn from_field_truncated(fe: &FieldElement) -> Self {
        let mut bytes = fe.to_bytes();
        bytes[0] &= TRUNCATED_TOP_MASK;
        let mut wide = [0u8; UINT_BYTES];
        wide[UINT_BYTES - FIELD_BYTES_SIZE..].copy_from_slice(&bytes);
        Self(U192::from_be_slice(&wide))
    }

    /// Returns a uniformly random non-zero scalar.
    ///
    /// Uses rejection sampling over 163-bit candidates.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let mut bytes = FieldBytes::default();

        loop {
            rng.fill_bytes(&mut bytes);
            bytes[0] &= ORDER_TOP_MASK;

            if let Some(scalar) = Option::<Self>::from(Self::from_bytes(&bytes)) {
                if !bool::from(scalar.is_zero()) {
                    return scalar;
                }
            }
        }
    }

    /// Returns the big endian encoding of this scalar.
    pub fn to_bytes(&self) -> FieldBytes {
        let wide = self.0.to_be_bytes();
        let mut bytes = FieldBytes::default();
        bytes.copy_from_slice(&wide[UINT_BYTES - FIELD_BYTES_SIZE..]);
        bytes
    }

    /// Borrow the inner integer.
    pub const fn as_uint(&self) -> &U192 {
        &self.0
    }

    /// Determine if this `Scalar` is zero.
    pub fn is_zero(&self) -> Choice {
        self.0.ct_eq(&U192::ZERO)
    }

    /// Returns `self + rhs mod n`.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self(self.0.add_mod(&rhs.0, &ORDER))
    }

    /// Returns `self - rhs mod n`.
    pub const fn sub(&self, rhs: &Self) -> Self {
        Self(self.0.sub_mod(&rhs.0, &ORDER))
    }

    /// Returns `2 * self mod n`.
    pub const fn double(&self) -> Self {
        Scalar::add(self, self)
    }

    /// Returns `-self mod n`.
    pub const fn negate(&self) -> Self {
        Scalar::sub(&Self::ZERO, self)
    }

    /// Returns `self * rhs mod n`, computed in Montgomery form.
    pub fn multiply(&self, rhs: &Self) -> Self {
        let product = OrderResidue::new(&self.0) * OrderResidue::new(&rhs.0);
        Self(product.retrieve())
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self(U192::conditional_select(&a.0, &b.0, choice))
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl DefaultIsZeroes for Scalar {}

impl Eq for Scalar {}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl fmt::Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<u64> for Scalar {
    fn from(n: u64) -> Scalar {
        // every u64 is below the 163-bit order
        Self(U192::from_u64(n))
    }
}

impl From<Scalar> for FieldBytes {
    fn from(scalar: Scalar) -> FieldBytes {
        scalar.to_bytes()
    }
}

impl From<&Scalar> for FieldBytes {
    fn from(scalar: &Scalar) -> FieldBytes {
        scalar.to_bytes()
    }
}

impl From<Scalar> for U192 {
    fn from(scalar: Scalar) -> U192 {
        scalar.0
    }
}

impl Add<Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: Scalar) -> Scalar {
        Scalar::add(&self, &other)
    }
}

impl Add<&Scalar> for Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(&self, other)
    }
}

impl Add<&Scalar> for &Scalar {
    type Output = Scalar;

    fn add(self, other: &Scalar) -> Scalar {
        Scalar::add(self, other)
    }
}

impl AddAssign<Scalar> for Scalar {
    fn add_assign(&mut self, rhs: Scalar) {
        *self = Scalar::add(self, &rhs);
    }
}

impl Sub<Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: Scalar) -> Scalar {
        Scalar::sub(&self, &other)
    }
}

impl Sub<&Scalar> for Scalar {
    type Output = Scalar;

    fn sub(self, other: &Scalar) -> Scalar {
        Scalar::sub(&self, other)
    }
}

impl SubAssign<Scalar> for Scalar {
    fn sub_assign(&mut self, rhs: Scalar) {
        *self = Scalar::sub(self, &rhs);
    }
}

impl Mul<Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: Scalar) -> Scalar {
        Scalar::multiply(&self, &other)
    }
}

impl Mul<&Scalar> for Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::multiply(&self, other)
    }
}

impl Mul<&Scalar> for &Scalar {
    type Output = Scalar;

    fn mul(self, other: &Scalar) -> Scalar {
        Scalar::multiply(self, other)
    }
}

impl MulAssign<Scalar> for Scalar {
    fn mul_assign(&mut self, rhs: Scalar) {
        *self = Scalar::multiply(self, &rhs);
    }
}

impl Neg for Scalar {
    type Output = Scalar;

    fn neg(self) -> Scalar {
        self.negate()
    }
}
