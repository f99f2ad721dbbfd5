//! Field arithmetic in GF(2^163) modulo f(x) = x^163 + x^7 + x^6 + x^3 + 1
//!
//! Elements are binary polynomials of degree < 163 stored as three 64-bit
//! limbs, least significant limb first. Addition is XOR; multiplication is a
//! carry-less product followed by word-level reduction modulo `f`.
//!
//! None of the operations in this module run in constant time.

use crate::{FIELD_BYTES_SIZE, FieldBytes};
use core::{
    cmp::Ordering,
    fmt,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    rand_core::CryptoRngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

/// Degree of the field extension.
pub const FIELD_BITS: usize = 163;

/// Number of 64-bit limbs in a field element.
const LIMBS: usize = 3;

/// Mask for the 35 significant bits of the most significant limb.
const TOP_LIMB_MASK: u64 = (1 << 35) - 1;

/// Mask for the 3 significant bits of the most significant serialized byte.
const TOP_BYTE_MASK: u8 = 0x07;

/// Reduction polynomial f(x) = x^163 + x^7 + x^6 + x^3 + 1.
const MODULUS: [u64; LIMBS] = [0xc9, 0, 1 << 35];

/// An element in the finite field GF(2^163) used for curve coordinates.
#[derive(Clone, Copy)]
pub struct FieldElement([u64; LIMBS]);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0]);

    /// Parse a field element from big endian hexadecimal.
    ///
    /// Accepts up to 41 hex digits; shorter (including odd-length) inputs are
    /// left-padded with zeros.
    ///
    /// # Panics
    ///
    /// - if the input contains a non-hex character
    /// - if the encoded value does not fit in 163 bits
    pub const fn from_be_hex(hex: &str) -> Self {
        let hex = hex.as_bytes();
        assert!(hex.len() <= 2 * FIELD_BYTES_SIZE - 1, "hex string too long");

        let mut limbs = [0u64; LIMBS];
        let mut i = 0;

        while i < hex.len() {
            let digit = match hex[i] {
                b'0'..=b'9' => hex[i] - b'0',
                b'a'..=b'f' => hex[i] - b'a' + 10,
                b'A'..=b'F' => hex[i] - b'A' + 10,
                _ => panic!("invalid hex digit"),
            };
            let shift = 4 * (hex.len() - 1 - i);
            limbs[shift / 64] |= (digit as u64) << (shift % 64);
            i += 1;
        }

        assert!(limbs[2] >> 35 == 0, "value exceeds field size");
        Self(limbs)
    }

    /// Decode a field element from big endian bytes, ignoring the bits above
    /// degree 162.
    pub(crate) const fn from_bytes_unchecked(bytes: &FieldBytes) -> Self {
        let mut limbs = [0u64; LIMBS];
        let mut i = 0;

        while i < FIELD_BYTES_SIZE {
            let shift = 8 * (FIELD_BYTES_SIZE - 1 - i);
            limbs[shift / 64] |= (bytes[i] as u64) << (shift % 64);
            i += 1;
        }

        limbs[2] &= TOP_LIMB_MASK;
        Self(limbs)
    }

    /// Attempts to parse the given big endian byte array as a field element.
    ///
    /// Returns `None` if any of the five most significant bits are set, i.e.
    /// the value is a polynomial of degree 163 or more.
    pub fn from_bytes(bytes: &FieldBytes) -> CtOption<Self> {
        let is_reduced = (bytes[0] & !TOP_BYTE_MASK).ct_eq(&0);
        CtOption::new(Self::from_bytes_unchecked(bytes), is_reduced)
    }

    /// Parse a field element from a big endian byte slice of at most
    /// [`FIELD_BYTES_SIZE`] bytes, left-padding shorter inputs with zeros.
    pub fn from_slice(slice: &[u8]) -> CtOption<Self> {
        if slice.len() > FIELD_BYTES_SIZE {
            return CtOption::new(Self::ZERO, Choice::from(0));
        }

        let mut bytes = FieldBytes::default();
        bytes[FIELD_BYTES_SIZE - slice.len()..].copy_from_slice(slice);
        Self::from_bytes(&bytes)
    }

    /// Map a message digest onto a field element.
    ///
    /// Keeps the low-order [`FIELD_BYTES_SIZE`] bytes of the big endian digest
    /// and discards the bits above degree 162.
    pub fn from_digest(digest: &[u8]) -> Self {
        let len = digest.len().min(FIELD_BYTES_SIZE);
        let mut bytes = FieldBytes::default();
        bytes[FIELD_BYTES_SIZE - len..].copy_from_slice(&digest[digest.len() - len..]);
        Self::from_bytes_unchecked(&bytes)
    }

    /// Returns the big endian encoding of this field element.
    pub fn to_bytes(&self) -> FieldBytes {
        let mut bytes = FieldBytes::default();

        for (i, byte) in bytes.iter_mut().enumerate() {
            let shift = 8 * (FIELD_BYTES_SIZE - 1 - i);
            *byte = (self.0[shift / 64] >> (shift % 64)) as u8;
        }

        bytes
    }

    /// Returns a uniformly random field element.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let mut bytes = FieldBytes::default();
        rng.fill_bytes(&mut bytes);
        Self::from_bytes_unchecked(&bytes)
    }

    /// Determine if this `FieldElement` is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Determine if this `FieldElement` is one.
    pub fn is_one(&self) -> Choice {
        self.ct_eq(&Self::ONE)
    }

    /// Determine if the constant term of this polynomial is set.
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Returns `self + rhs`, which is the bitwise XOR of both polynomials.
    pub const fn add(&self, rhs: &Self) -> Self {
        Self([
            self.0[0] ^ rhs.0[0],
            self.0[1] ^ rhs.0[1],
            self.0[2] ^ rhs.0[2],
        ])
    }

    /// Returns `self * rhs mod f`.
    pub const fn multiply(&self, rhs: &Self) -> Self {
        let mut wide = [0u64; 2 * LIMBS];
        let mut i = 0;

        while i < LIMBS {
            let mut j = 0;
            while j < LIMBS {
                let (lo, hi) = clmul(self.0[i], rhs.0[j]);
                wide[i + j] ^= lo;
                wide[i + j + 1] ^= hi;
                j += 1;
            }
            i += 1;
        }

        Self(reduce(wide))
    }

    /// Returns `self * self mod f`.
    ///
    /// Squaring is linear in characteristic 2: it interleaves a zero bit after
    /// every coefficient before reducing.
    pub const fn square(&self) -> Self {
        let mut wide = [0u64; 2 * LIMBS];
        let mut i = 0;

        while i < LIMBS {
            wide[2 * i] = spread_bits(self.0[i] as u32);
            wide[2 * i + 1] = spread_bits((self.0[i] >> 32) as u32);
            i += 1;
        }

        Self(reduce(wide))
    }

    /// Returns `self^(2^k)`, i.e. `k` successive squarings.
    pub const fn pow2k(&self, k: usize) -> Self {
        let mut x = *self;
        let mut i = 0;

        while i < k {
            x = x.square();
            i += 1;
        }

        x
    }

    /// Returns `self^exp`, where `exp` is a little-endian integer exponent.
    ///
    /// **This operation is variable time with respect to the exponent.**
    pub fn pow_vartime(&self, exp: &[u64]) -> Self {
        let mut res = Self::ONE;

        for e in exp.iter().rev() {
            for i in (0..64).rev() {
                res = res.square();

                if ((*e >> i) & 1) == 1 {
                    res = res.multiply(self);
                }
            }
        }

        res
    }

    /// Returns the multiplicative inverse of self, if self is non-zero.
    pub fn invert(&self) -> CtOption<Self> {
        CtOption::new(self.invert_unchecked(), !self.is_zero())
    }

    /// Extended Euclidean algorithm over GF(2)[x].
    ///
    /// Maintains `g1·a ≡ u` and `g2·a ≡ v (mod f)` while reducing `u` to 1.
    /// Returns zero for zero.
    pub(crate) fn invert_unchecked(&self) -> Self {
        if bool::from(self.is_zero()) {
            return Self::ZERO;
        }

        let mut u = self.0;
        let mut v = MODULUS;
        let mut g1 = Self::ONE.0;
        let mut g2 = Self::ZERO.0;

        while u != Self::ONE.0 {
            let (deg_u, deg_v) = (degree(&u), degree(&v));

            let shift = if deg_u < deg_v {
                core::mem::swap(&mut u, &mut v);
                core::mem::swap(&mut g1, &mut g2);
                deg_v - deg_u
            } else {
                deg_u - deg_v
            };

            xor_shifted(&mut u, &v, shift);
            xor_shifted(&mut g1, &g2, shift);
        }

        Self(g1)
    }

    /// Returns the unique square root of self.
    ///
    /// Squaring is an automorphism of GF(2^m), so the root is
    /// `self^(2^(m-1))` and always exists.
    pub const fn sqrt(&self) -> Self {
        self.pow2k(FIELD_BITS - 1)
    }

    /// Absolute trace `Tr(a) = a + a^2 + a^4 + ... + a^(2^(m-1))`.
    ///
    /// The result is always [`FieldElement::ZERO`] or [`FieldElement::ONE`].
    pub const fn trace(&self) -> Self {
        let mut t = *self;
        let mut i = 1;

        while i < FIELD_BITS {
            t = FieldElement::add(&t.square(), self);
            i += 1;
        }

        t
    }

    /// Half-trace `H(a) = a + a^4 + a^16 + ... + a^(4^((m-1)/2))`.
    ///
    /// For `m` odd and `Tr(a) = 0`, `z = H(a)` satisfies `z² + z = a`.
    pub const fn half_trace(&self) -> Self {
        let mut t = *self;
        let mut i = 0;

        while i < (FIELD_BITS - 1) / 2 {
            t = FieldElement::add(&t.square().square(), self);
            i += 1;
        }

        t
    }

    /// Solve `z² + u·z = w` for `z`.
    ///
    /// Returns `None` when the equation has no root in GF(2^163). When a
    /// root `z` exists, the other root is `z + u`.
    pub fn solve_quadratic(u: &Self, w: &Self) -> CtOption<Self> {
        if bool::from(u.is_zero()) {
            return CtOption::new(w.sqrt(), Choice::from(1));
        }

        if bool::from(w.is_zero()) {
            return CtOption::new(Self::ZERO, Choice::from(1));
        }

        // Substituting z = t·u gives t² + t = w / u².
        let v = w.multiply(&u.invert_unchecked().square());
        let t = v.half_trace();
        CtOption::new(t.multiply(u), v.trace().is_zero())
    }
}

/// Carry-less product of two 64-bit words, returned as `(lo, hi)`.
#[inline(always)]
const fn clmul(a: u64, b: u64) -> (u64, u64) {
    let mut lo = 0u64;
    let mut hi = 0u64;
    let mut i = 0;

    while i < 64 {
        if (b >> i) & 1 == 1 {
            lo ^= a << i;
            if i != 0 {
                hi ^= a >> (64 - i);
            }
        }
        i += 1;
    }

    (lo, hi)
}

/// Interleave a zero bit above each bit of `x`.
#[inline(always)]
const fn spread_bits(x: u32) -> u64 {
    let mut x = x as u64;
    x = (x | (x << 16)) & 0x0000_ffff_0000_ffff;
    x = (x | (x << 8)) & 0x00ff_00ff_00ff_00ff;
    x = (x | (x << 4)) & 0x0f0f_0f0f_0f0f_0f0f;
    x = (x | (x << 2)) & 0x3333_3333_3333_3333;
    x = (x | (x << 1)) & 0x5555_5555_5555_5555;
    x
}

/// Reduce a polynomial of degree < 326 modulo f(x).
///
/// Uses x^163 ≡ x^7 + x^6 + x^3 + 1: a word at bit offset 64·i folds onto
/// bit offset 64·(i-3) + 29.
const fn reduce(mut c: [u64; 2 * LIMBS]) -> [u64; LIMBS] {
    let mut i = 2 * LIMBS - 1;

    while i >= LIMBS {
        let t = c[i];
        c[i - 3] ^= (t << 29) ^ (t << 32) ^ (t << 35) ^ (t << 36);
        c[i - 2] ^= (t >> 35) ^ (t >> 32) ^ (t >> 29) ^ (t >> 28);
        i -= 1;
    }

    // bits 163..191 of the top limb
    let t = c[2] >> 35;
    c[0] ^= t ^ (t << 3) ^ (t << 6) ^ (t << 7);
    c[2] &= TOP_LIMB_MASK;

    [c[0], c[1], c[2]]
}

/// Degree of a non-zero polynomial.
fn degree(p: &[u64; LIMBS]) -> u32 {
    let mut i = LIMBS;

    while i > 0 {
        i -= 1;
        if p[i] != 0 {
            return 64 * i as u32 + 63 - p[i].leading_zeros();
        }
    }

    0
}

/// `dst ^= src << shift`, discarding bits shifted past the top limb.
fn xor_shifted(dst: &mut [u64; LIMBS], src: &[u64; LIMBS], shift: u32) {
    let words = (shift / 64) as usize;
    let bits = shift % 64;

    for i in words..LIMBS {
        let k = i - words;
        let mut w = src[k] << bits;

        if bits != 0 && k > 0 {
            w |= src[k - 1] >> (64 - bits);
        }

        dst[i] ^= w;
    }
}

//
// `subtle` trait impls
//

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self([
            u64::conditional_select(&a.0[0], &b.0[0], choice),
            u64::conditional_select(&a.0[1], &b.0[1], choice),
            u64::conditional_select(&a.0[2], &b.0[2], choice),
        ])
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

//
// `core` trait impls
//

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl DefaultIsZeroes for FieldElement {}

impl Eq for FieldElement {}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

/// Lexicographic order over the big endian encoding.
impl Ord for FieldElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.iter().rev().cmp(other.0.iter().rev())
    }
}

impl PartialOrd for FieldElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(0x")?;

        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<u64> for FieldElement {
    fn from(n: u64) -> Self {
        Self([n, 0, 0])
    }
}

impl From<FieldElement> for FieldBytes {
    fn from(fe: FieldElement) -> FieldBytes {
        fe.to_bytes()
    }
}

impl From<&FieldElement> for FieldBytes {
    fn from(fe: &FieldElement) -> FieldBytes {
        fe.to_bytes()
    }
}

//
// Arithmetic operator impls
//

impl Add<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, other: FieldElement) -> FieldElement {
        FieldElement::add(&self, &other)
    }
}

impl Add<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(&self, other)
    }
}

impl Add<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn add(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(self, other)
    }
}

impl AddAssign<FieldElement> for FieldElement {
    fn add_assign(&mut self, other: FieldElement) {
        *self = FieldElement::add(self, &other);
    }
}

impl AddAssign<&FieldElement> for FieldElement {
    fn add_assign(&mut self, other: &FieldElement) {
        *self = FieldElement::add(self, other);
    }
}

/// Subtraction coincides with addition in characteristic 2.
impl Sub<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: FieldElement) -> FieldElement {
        FieldElement::add(&self, &other)
    }
}

impl Sub<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn sub(self, other: &FieldElement) -> FieldElement {
        FieldElement::add(&self, other)
    }
}

impl SubAssign<FieldElement> for FieldElement {
    fn sub_assign(&mut self, other: FieldElement) {
        *self = FieldElement::add(self, &other);
    }
}

impl Mul<FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: FieldElement) -> FieldElement {
        FieldElement::multiply(&self, &other)
    }
}

impl Mul<&FieldElement> for FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement::multiply(&self, other)
    }
}

impl Mul<&FieldElement> for &FieldElement {
    type Output = FieldElement;

    fn mul(self, other: &FieldElement) -> FieldElement {
        FieldElement::multiply(self, other)
    }
}

impl MulAssign<FieldElement> for FieldElement {
    fn mul_assign(&mut self, other: FieldElement) {
        *self = FieldElement::multiply(self, &other);
    }
}

impl MulAssign<&FieldElement> for FieldElement {
    fn mul_assign(&mut self, other: &FieldElement) {
        *self = FieldElement::multiply(self, other);
    }
}

/// Every element is its own additive inverse.
impl Neg for FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        self
    }
}

impl Sum for FieldElement {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

impl Product for FieldElement {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ONE, |acc, x| acc * x)
    }
}

#[cfg(test)]
mod tests {
    use super::{FIELD_BITS, FieldElement, LIMBS, MODULUS};
    use crate::FieldBytes;
    use hex_literal::hex;
    use proptest::prelude::*;

    const A: FieldElement = FieldElement::from_be_hex("2E2F85F5DD74CE983A5C4237229DAF8A3F35823BE");
    const B: FieldElement = FieldElement::from_be_hex("3A4F8A1A1D2B3C7F00112233445566778899AABBC");

    /// Bit-serial shift-and-add multiplication used as a reference.
    fn mul_reference(a: &FieldElement, b: &FieldElement) -> FieldElement {
        let mut acc = FieldElement::ZERO;
        let mut a = a.0;

        for i in 0..FIELD_BITS {
            if (b.0[i / 64] >> (i % 64)) & 1 == 1 {
                acc = acc + FieldElement(a);
            }

            // multiply `a` by x, folding x^163 back into the field
            let carry = (a[2] >> 34) & 1;
            a = [a[0] << 1, (a[1] << 1) | (a[0] >> 63), (a[2] << 1) | (a[1] >> 63)];
            if carry == 1 {
                for (limb, m) in a.iter_mut().zip(MODULUS.iter()) {
                    *limb ^= m;
                }
            }
        }

        acc
    }

    /// Returns the monomial x^i.
    fn monomial(i: usize) -> FieldElement {
        let mut limbs = [0u64; LIMBS];
        limbs[i / 64] = 1 << (i % 64);
        FieldElement(limbs)
    }

    #[test]
    fn hex_decoding() {
        assert_eq!(FieldElement::from_be_hex(""), FieldElement::ZERO);
        assert_eq!(FieldElement::from_be_hex("1"), FieldElement::ONE);
        assert_eq!(FieldElement::from_be_hex("00001"), FieldElement::ONE);
        assert_eq!(FieldElement::from_be_hex("abc"), FieldElement::from(0xabc));
        assert_eq!(
            FieldElement::from_be_hex("7FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF").to_bytes(),
            hex!("07FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF")
        );
    }

    #[test]
    fn from_bytes() {
        assert_eq!(
            FieldElement::from_bytes(&FieldBytes::default()).unwrap(),
            FieldElement::ZERO
        );

        let mut one = FieldBytes::default();
        one[20] = 1;
        assert_eq!(FieldElement::from_bytes(&one).unwrap(), FieldElement::ONE);
        assert!(bool::from(FieldElement::from_bytes(&[0xff; 21]).is_none()));

        let mut too_wide = FieldBytes::default();
        too_wide[0] = 0x08;
        assert!(bool::from(FieldElement::from_bytes(&too_wide).is_none()));
    }

    #[test]
    fn from_slice() {
        assert_eq!(FieldElement::from_slice(&[]).unwrap(), FieldElement::ZERO);
        assert_eq!(FieldElement::from_slice(&[0x01, 0x02]).unwrap(), FieldElement::from(0x0102));
        assert!(bool::from(FieldElement::from_slice(&[0u8; 22]).is_none()));
    }

    #[test]
    fn from_digest_keeps_low_order_bytes() {
        let digest = hex!(
            "ffeeddccbbaa9988776655"
            "ff0102030405060708090a0b0c0d0e0f1011121314"
        );
        assert_eq!(
            FieldElement::from_digest(&digest).to_bytes(),
            hex!("070102030405060708090a0b0c0d0e0f1011121314")
        );
        assert_eq!(FieldElement::from_digest(&[0x2a]), FieldElement::from(0x2a));
    }

    #[test]
    fn to_bytes() {
        assert_eq!(FieldElement::ZERO.to_bytes(), [0; 21]);
        assert_eq!(A.to_bytes(), hex!("02E2F85F5DD74CE983A5C4237229DAF8A3F35823BE"));
    }

    #[test]
    fn known_answer_mul() {
        assert_eq!(
            A * B,
            FieldElement::from_be_hex("17D657E6378D815639C680B0492398BFB75C384B2")
        );
    }

    #[test]
    fn known_answer_invert() {
        assert_eq!(
            A.invert().unwrap(),
            FieldElement::from_be_hex("77F3DFEBEC1E87A572BCD4165FFB74225D6D07C15")
        );
    }

    #[test]
    fn invert_zero() {
        assert!(bool::from(FieldElement::ZERO.invert().is_none()));
        assert_eq!(FieldElement::ONE.invert().unwrap(), FieldElement::ONE);
    }

    #[test]
    fn reduction_of_top_monomial() {
        // x^162 · x = x^163 = x^7 + x^6 + x^3 + 1
        assert_eq!(monomial(162) * monomial(1), FieldElement::from(0xc9));
        // x^162 · x^162 = x^324
        assert_eq!(monomial(162).square(), mul_reference(&monomial(162), &monomial(162)));
    }

    #[test]
    fn trace_of_monomials() {
        for i in 0..FIELD_BITS {
            let expected = if i == 0 || i == 157 {
                FieldElement::ONE
            } else {
                FieldElement::ZERO
            };
            assert_eq!(monomial(i).trace(), expected, "Tr(x^{i})");
        }
    }

    #[test]
    fn solve_quadratic_without_linear_term() {
        // z² = w has the single root √w
        for w in [FieldElement::ZERO, FieldElement::ONE, A, B, monomial(162)] {
            let z = FieldElement::solve_quadratic(&FieldElement::ZERO, &w).unwrap();
            assert_eq!(z.square(), w);
            assert_eq!(z, w.sqrt());
        }
    }

    #[test]
    fn solve_quadratic_without_constant_term() {
        for u in [FieldElement::ONE, A, B, monomial(162)] {
            let z = FieldElement::solve_quadratic(&u, &FieldElement::ZERO).unwrap();
            assert_eq!(z, FieldElement::ZERO);

            // the other root is u itself
            assert_eq!(u.square() + u * u, FieldElement::ZERO);
        }
    }

    #[test]
    fn ordering() {
        assert!(FieldElement::ZERO < FieldElement::ONE);
        assert!(FieldElement::ONE < monomial(64));
        assert!(monomial(63) < monomial(64));
        assert!(B > A);
    }

    prop_compose! {
        fn field_element()(mut bytes in any::<[u8; 21]>()) -> FieldElement {
            bytes[0] &= 0x07;
            FieldElement::from_bytes(&bytes).unwrap()
        }
    }

    proptest! {
        #[test]
        fn add_is_self_inverse(a in field_element()) {
            prop_assert_eq!(a + a, FieldElement::ZERO);
        }

        #[test]
        fn mul_identity_and_zero(a in field_element()) {
            prop_assert_eq!(a * FieldElement::ONE, a);
            prop_assert_eq!(a * FieldElement::ZERO, FieldElement::ZERO);
        }

        #[test]
        fn mul_matches_reference(a in field_element(), b in field_element()) {
            prop_assert_eq!(a * b, mul_reference(&a, &b));
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn square_matches_mul(a in field_element()) {
            prop_assert_eq!(a.square(), a * a);
        }

        #[test]
        fn distributive(a in field_element(), b in field_element(), c in field_element()) {
            prop_assert_eq!(a * (b + c), a * b + a * c);
        }

        #[test]
        fn invert(a in field_element()) {
            prop_assume!(!bool::from(a.is_zero()));
            prop_assert_eq!(a * a.invert().unwrap(), FieldElement::ONE);
        }

        #[test]
        fn pow_adds_exponents(a in field_element(), j in 0u64..1000, k in 0u64..1000) {
            prop_assert_eq!(a.pow_vartime(&[j + k]), a.pow_vartime(&[j]) * a.pow_vartime(&[k]));
        }

        #[test]
        fn pow_small_exponents(a in field_element()) {
            prop_assert_eq!(a.pow_vartime(&[0]), FieldElement::ONE);
            prop_assert_eq!(a.pow_vartime(&[1]), a);
            prop_assert_eq!(a.pow_vartime(&[2]), a.square());
            prop_assert_eq!(a.pow_vartime(&[0, 1]), a.pow2k(64));
        }

        #[test]
        fn sqrt(a in field_element()) {
            prop_assert_eq!(a.sqrt().square(), a);
            prop_assert_eq!(a.square().sqrt(), a);
        }

        #[test]
        fn trace_is_binary_and_linear(a in field_element(), b in field_element()) {
            let t = a.trace();
            prop_assert!(t == FieldElement::ZERO || t == FieldElement::ONE);
            prop_assert_eq!((a + b).trace(), a.trace() + b.trace());
        }

        #[test]
        fn half_trace_solves_quadratic(a in field_element()) {
            prop_assume!(bool::from(a.trace().is_zero()));
            let z = a.half_trace();
            prop_assert_eq!(z * z + z, a);
        }

        #[test]
        fn solve_quadratic(u in field_element(), w in field_element()) {
            match Option::<FieldElement>::from(FieldElement::solve_quadratic(&u, &w)) {
                Some(z) => {
                    prop_assert_eq!(z.square() + u * z, w);
                    let other = z + u;
                    prop_assert_eq!(other.square() + u * other, w);
                }
                None => {
                    prop_assert!(!bool::from(u.is_zero()));
                    prop_assert_eq!((w * u.invert().unwrap().square()).trace(), FieldElement::ONE);
                }
            }
        }

        #[test]
        fn bytes_round_trip(a in field_element()) {
            prop_assert_eq!(FieldElement::from_bytes(&a.to_bytes()).unwrap(), a);
        }
    }
}
