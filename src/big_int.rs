use std::cmp::Ordering;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::limb_vec::{Limb, LimbVec, LIMB_BITS};

/// The canonical zero: empty magnitude, non-negative sign.
pub(crate) const ZERO: BigInt = BigInt { negative: false, mag: LimbVec::new() };

/// Decimal digits converted per multiply-and-add pass while parsing, and
/// per single-limb division while printing.
const CHUNK_DIGITS: usize = 9;

/// 10^CHUNK_DIGITS, the largest power of ten that fits in a limb.
const CHUNK_RADIX: Limb = 1_000_000_000;

/// POW10[i] = 10^i.
const POW10: [Limb; CHUNK_DIGITS + 1] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
    1_000_000_000,
];

/// An arbitrary-precision signed integer.
///
/// The value is sign-magnitude: a `negative` flag plus base-2^32 limbs in
/// least-significant-first order, held in an adaptive container that keeps
/// small magnitudes inline and shares heap storage between clones until one
/// of them writes. Cloning is therefore O(1) regardless of size.
///
/// # Example
/// ```
/// use slim_num::BigInt;
///
/// let a: BigInt = "10000000000000".parse().unwrap();
/// let b: BigInt = "900000000000".parse().unwrap();
/// assert_eq!((&a + &b).to_string(), "10900000000000");
/// assert_eq!((&a * &b).to_string(), "9000000000000000000000000");
/// assert_eq!((&a / &b).to_string(), "11");
/// ```
#[derive(Clone, Debug)]
pub struct BigInt {
    pub(crate) negative: bool,
    pub(crate) mag: LimbVec,
}

/// Returned when decimal text contains anything but an optional leading
/// `-` followed by ASCII digits.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("invalid character `{character}` in decimal integer")]
pub struct ParseBigIntError {
    character: char,
}

impl BigInt {
    /// Restores the canonical form: no trailing zero limb, and the zero
    /// value is never negative. Every operation that touches a magnitude
    /// runs this before handing its result out.
    pub(crate) fn normalize(&mut self) {
        while let Some(0) = self.mag.last() {
            self.mag.pop();
        }
        if self.mag.is_empty() {
            self.negative = false;
        }
    }

    pub fn is_zero(&self) -> bool {
        self.mag.is_empty()
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// The magnitude of this value, as a value. O(1): the limbs are shared
    /// until either copy writes.
    pub fn abs(&self) -> BigInt {
        BigInt { negative: false, mag: self.mag.clone() }
    }

    /// Adds one in place; stands in for the `++` operators.
    pub fn inc(&mut self) {
        *self += &BigInt::from(1_u32);
    }

    /// Subtracts one in place; stands in for the `--` operators.
    pub fn dec(&mut self) {
        *self -= &BigInt::from(1_u32);
    }

    fn from_magnitude_u64(magnitude: u64, negative: bool) -> BigInt {
        let low = magnitude as Limb;
        let high = (magnitude >> LIMB_BITS) as Limb;
        let mag = if high != 0 {
            LimbVec::from_slice(&[low, high])
        } else if low != 0 {
            LimbVec::from_slice(&[low])
        } else {
            LimbVec::new()
        };
        BigInt { negative: negative && magnitude != 0, mag }
    }
}

impl Default for BigInt {
    fn default() -> Self {
        ZERO
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
    $(
    impl From<$t> for BigInt {
        fn from(value: $t) -> Self {
            BigInt::from_magnitude_u64(value as u64, false)
        }
    }
    )*
    };
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
    $(
    impl From<$t> for BigInt {
        fn from(value: $t) -> Self {
            // unsigned_abs is exact for the most-negative value, which
            // plain negation overflows on
            BigInt::from_magnitude_u64(value.unsigned_abs() as u64, value < 0)
        }
    }
    )*
    };
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

/// mag = mag * factor + addend, in one carry pass.
fn destructive_mul_add(mag: &mut LimbVec, factor: Limb, addend: Limb) {
    let mut carry = addend as u64;
    for i in 0..mag.len() {
        let step = mag.get(i) as u64 * factor as u64 + carry;
        mag.set(i, step as Limb);
        carry = step >> LIMB_BITS;
    }
    if carry != 0 {
        mag.push(carry as Limb);
    }
}

impl FromStr for BigInt {
    type Err = ParseBigIntError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let (negative, digits) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        if let Some(character) = digits.chars().find(|c| !c.is_ascii_digit()) {
            return Err(ParseBigIntError { character });
        }

        let mut value = BigInt::default();
        let mut rest = digits;
        while !rest.is_empty() {
            let take = match rest.len() % CHUNK_DIGITS {
                0 => CHUNK_DIGITS,
                partial => partial,
            };
            let (group, tail) = rest.split_at(take);
            let mut group_value: Limb = 0;
            for digit in group.bytes() {
                group_value = group_value * 10 + (digit - b'0') as Limb;
            }
            destructive_mul_add(&mut value.mag, POW10[take], group_value);
            rest = tail;
        }
        // empty text and "-0...0" both land on canonical zero here
        value.negative = negative;
        value.normalize();
        Ok(value)
    }
}

impl Display for BigInt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return f.write_str("0");
        }
        let mut groups: Vec<Limb> = Vec::new();
        let mut rest = self.abs();
        while !rest.is_zero() {
            let (quotient, group) = rest.div_rem_limb(CHUNK_RADIX);
            groups.push(group);
            rest = quotient;
        }
        if self.negative {
            f.write_str("-")?;
        }
        let mut groups = groups.iter().rev();
        if let Some(leading) = groups.next() {
            write!(f, "{}", leading)?;
        }
        for group in groups {
            write!(f, "{:09}", group)?;
        }
        Ok(())
    }
}

impl BigInt {
    /// Unsigned comparison of the magnitudes: shorter is smaller, equal
    /// lengths compare limbs from the most significant end down.
    pub(crate) fn cmp_magnitude(&self, other: &BigInt) -> Ordering {
        let a = self.mag.as_slice();
        let b = other.mag.as_slice();
        if a.len() != b.len() {
            return a.len().cmp(&b.len());
        }
        for i in (0..a.len()).rev() {
            if a[i] != b[i] {
                return a[i].cmp(&b[i]);
            }
        }
        Ordering::Equal
    }
}

impl PartialEq for BigInt {
    fn eq(&self, other: &Self) -> bool {
        // structural equality is value equality thanks to normalize
        self.negative == other.negative && self.mag == other.mag
    }
}

impl Eq for BigInt {}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => self.cmp_magnitude(other),
            (true, true) => self.cmp_magnitude(other).reverse(),
        }
    }
}

#[test]
fn test_from_machine_integers() {
    assert_eq!(BigInt::from(0_u8).to_string(), "0");
    assert_eq!(BigInt::from(12_i8).to_string(), "12");
    assert_eq!(BigInt::from(-100_i16).to_string(), "-100");
    assert_eq!(BigInt::from(u64::MAX).to_string(), "18446744073709551615");
    assert_eq!(BigInt::from(-113132_i64).to_string(), "-113132");
    assert_eq!(BigInt::from(i64::MIN).to_string(), "-9223372036854775808");
    assert_eq!(BigInt::from(i32::MIN).to_string(), "-2147483648");
}

#[test]
fn test_parse_round_trip() {
    for text in [
        "0",
        "1",
        "-1",
        "4294967296",
        "18446744073709551616",
        "12345678909876523784950683472613487560983287654321",
        "-340282366920938463463374607431768211456",
    ] {
        let value: BigInt = text.parse().unwrap();
        assert_eq!(value.to_string(), text);
    }
}

#[test]
fn test_parse_edge_forms() {
    assert_eq!("".parse::<BigInt>().unwrap(), BigInt::default());
    assert_eq!("-".parse::<BigInt>().unwrap(), BigInt::default());
    assert_eq!("-0".parse::<BigInt>().unwrap(), BigInt::default());
    assert_eq!("-000".parse::<BigInt>().unwrap(), BigInt::default());
    assert_eq!("007".parse::<BigInt>().unwrap(), BigInt::from(7_u32));
    assert!(!"-0".parse::<BigInt>().unwrap().is_negative());
}

#[test]
fn test_parse_rejects_non_digits() {
    assert!("12x4".parse::<BigInt>().is_err());
    assert!("+12".parse::<BigInt>().is_err());
    assert!("1 2".parse::<BigInt>().is_err());
    assert!("--1".parse::<BigInt>().is_err());
    let err = "12a".parse::<BigInt>().unwrap_err();
    assert_eq!(err.to_string(), "invalid character `a` in decimal integer");
}

#[test]
fn test_comparisons() {
    let neg_big: BigInt = "-100000000000000000000".parse().unwrap();
    let neg_small: BigInt = "-5".parse().unwrap();
    let zero = BigInt::default();
    let pos_small: BigInt = "5".parse().unwrap();
    let pos_big: BigInt = "100000000000000000000".parse().unwrap();

    let ordered = [&neg_big, &neg_small, &zero, &pos_small, &pos_big];
    for window in ordered.windows(2) {
        assert!(window[0] < window[1]);
    }
    assert_eq!(neg_small.clone().abs(), pos_small);
    assert!(zero <= zero.clone());
}

#[test]
fn test_inc_dec() {
    let mut value = BigInt::from(-1_i32);
    value.inc();
    assert_eq!(value, BigInt::default());
    value.inc();
    assert_eq!(value, BigInt::from(1_u32));
    value.dec();
    value.dec();
    assert_eq!(value, BigInt::from(-1_i32));

    let mut carry: BigInt = "4294967295".parse().unwrap();
    carry.inc();
    assert_eq!(carry.to_string(), "4294967296");
}
