use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign,
    Sub, SubAssign,
    Mul, MulAssign,
    Div, DivAssign,
    Rem, RemAssign,
    Neg,
};

use crate::big_int::{BigInt, ZERO};
use crate::limb_vec::{Limb, LimbVec, LIMB_BITS};

/// The `BigInt op &BigInt` impl is the primitive for every binary
/// operator; this covers the remaining operand combinations by
/// forwarding to it. Clones of the left operand are O(1).
macro_rules! impl_binop_variants {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident) => {
        impl $trait for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                self.$method(&rhs)
            }
        }

        impl $trait<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                self.clone().$method(rhs)
            }
        }

        impl $trait<BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                self.clone().$method(&rhs)
            }
        }

        impl $assign_trait<&BigInt> for BigInt {
            fn $assign_method(&mut self, rhs: &BigInt) {
                *self = std::mem::take(self).$method(rhs);
            }
        }

        impl $assign_trait for BigInt {
            fn $assign_method(&mut self, rhs: BigInt) {
                *self = std::mem::take(self).$method(&rhs);
            }
        }
    };
}

pub(crate) use impl_binop_variants;

/// a += b over raw magnitudes, limb-wise with a double-width carry.
fn mag_add(a: &mut LimbVec, b: &LimbVec) {
    let mut carry: u64 = 0;
    for i in 0..a.len().max(b.len()) {
        let x = if i < a.len() { a.get(i) as u64 } else { 0 };
        let y = if i < b.len() { b.get(i) as u64 } else { 0 };
        let sum = x + y + carry;
        if i < a.len() {
            a.set(i, sum as Limb);
        } else {
            a.push(sum as Limb);
        }
        carry = sum >> LIMB_BITS;
    }
    if carry != 0 {
        a.push(carry as Limb);
    }
}

/// a -= b over raw magnitudes; requires |a| >= |b|. The borrow cascades
/// as far as it needs to.
fn mag_sub(a: &mut LimbVec, b: &LimbVec) {
    let mut borrow: u64 = 0;
    for i in 0..b.len() {
        let diff = (a.get(i) as u64)
            .wrapping_sub(b.get(i) as u64)
            .wrapping_sub(borrow);
        a.set(i, diff as Limb);
        borrow = diff >> 63;
    }
    let mut i = b.len();
    while borrow != 0 {
        let diff = (a.get(i) as u64).wrapping_sub(borrow);
        a.set(i, diff as Limb);
        borrow = diff >> 63;
        i += 1;
    }
}

/// Schoolbook product of two magnitudes.
fn mag_mul(a: &LimbVec, b: &LimbVec) -> LimbVec {
    let mut product = LimbVec::zeroed(a.len() + b.len());
    for i in 0..a.len() {
        let x = a.get(i) as u64;
        let mut carry: u64 = 0;
        for j in 0..b.len() {
            let step = product.get(i + j) as u64 + x * b.get(j) as u64 + carry;
            product.set(i + j, step as Limb);
            carry = step >> LIMB_BITS;
        }
        let mut k = i + b.len();
        while carry != 0 {
            let step = product.get(k) as u64 + carry;
            product.set(k, step as Limb);
            carry = step >> LIMB_BITS;
            k += 1;
        }
    }
    product
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> Self::Output {
        if !self.is_zero() {
            self.negative = !self.negative;
        }
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> Self::Output {
        self.clone().neg()
    }
}

impl Add<&BigInt> for BigInt {
    type Output = BigInt;

    fn add(mut self, rhs: &BigInt) -> Self::Output {
        if rhs.is_zero() {
            return self;
        }
        if self.is_zero() {
            return rhs.clone();
        }

        if self.negative == rhs.negative {
            mag_add(&mut self.mag, &rhs.mag);
            self.normalize();
            return self;
        }

        // opposite signs: subtract the smaller magnitude from the larger,
        // which also decides the result sign
        match self.cmp_magnitude(rhs) {
            Ordering::Equal => ZERO,
            Ordering::Greater => {
                mag_sub(&mut self.mag, &rhs.mag);
                self.normalize();
                self
            }
            Ordering::Less => {
                let mut result = rhs.clone();
                mag_sub(&mut result.mag, &self.mag);
                result.normalize();
                result
            }
        }
    }
}

impl_binop_variants!(Add, add, AddAssign, add_assign);

impl Sub<&BigInt> for BigInt {
    type Output = BigInt;

    fn sub(mut self, rhs: &BigInt) -> Self::Output {
        if rhs.is_zero() {
            return self;
        }
        if self.is_zero() {
            return -rhs.clone();
        }

        if self.negative != rhs.negative {
            mag_add(&mut self.mag, &rhs.mag);
            self.normalize();
            return self;
        }

        match self.cmp_magnitude(rhs) {
            Ordering::Equal => ZERO,
            Ordering::Greater => {
                mag_sub(&mut self.mag, &rhs.mag);
                self.normalize();
                self
            }
            Ordering::Less => {
                let negative = !self.negative;
                let mut result = rhs.clone();
                mag_sub(&mut result.mag, &self.mag);
                result.negative = negative;
                result.normalize();
                result
            }
        }
    }
}

impl_binop_variants!(Sub, sub, SubAssign, sub_assign);

impl Mul<&BigInt> for BigInt {
    type Output = BigInt;

    fn mul(self, rhs: &BigInt) -> Self::Output {
        if self.is_zero() || rhs.is_zero() {
            return ZERO;
        }
        let mut product = BigInt {
            negative: self.negative != rhs.negative,
            mag: mag_mul(&self.mag, &rhs.mag),
        };
        product.normalize();
        product
    }
}

impl_binop_variants!(Mul, mul, MulAssign, mul_assign);

impl BigInt {
    /// Long division of the magnitude by one limb, most significant limb
    /// first, carrying the remainder into the next step. The quotient
    /// keeps the sign of `self`; the remainder is the magnitude remainder.
    pub(crate) fn div_rem_limb(mut self, divisor: Limb) -> (BigInt, Limb) {
        debug_assert!(divisor != 0);
        let mut remainder: u64 = 0;
        for i in (0..self.mag.len()).rev() {
            let step = (remainder << LIMB_BITS) | self.mag.get(i) as u64;
            self.mag.set(i, (step / divisor as u64) as Limb);
            remainder = step % divisor as u64;
        }
        self.normalize();
        (self, remainder as Limb)
    }
}

/// Quotient of |a| / |b| as a non-negative value; `b` must be nonzero.
///
/// Knuth's normalized long division: both operands are scaled so the
/// divisor's leading limb has its top bit set, which bounds the error of
/// each trial digit to at most two corrections. The trial digit comes
/// from the top two remaining dividend limbs over the divisor's leading
/// limb, capped at the limb maximum.
fn mag_div(a: &BigInt, b: &BigInt) -> BigInt {
    if a.mag.len() < b.mag.len() {
        return ZERO;
    }
    if b.mag.len() == 1 {
        return a.abs().div_rem_limb(b.mag.get(0)).0;
    }

    let top = b.mag.get(b.mag.len() - 1) as u64;
    let factor = ((1_u64 << LIMB_BITS) / (top + 1)) as Limb;
    let mut rem = a.abs() * &BigInt::from(factor);
    let den = b.abs() * &BigInt::from(factor);

    let n = den.mag.len();
    let m = rem.mag.len() - n;
    let mut quotient = BigInt { negative: false, mag: LimbVec::zeroed(m) };

    // the quotient can have m + 1 digits; the top one is 0 or 1
    let shifted = &den << (LIMB_BITS * m as u32);
    if rem >= shifted {
        quotient.mag.push(1);
        rem -= &shifted;
    }

    for i in (0..m).rev() {
        let high = if n + i < rem.mag.len() { rem.mag.get(n + i) as u64 } else { 0 };
        let low = if n + i - 1 < rem.mag.len() { rem.mag.get(n + i - 1) as u64 } else { 0 };
        let estimate = ((high << LIMB_BITS) | low) / (den.mag.get(n - 1) as u64);
        let mut digit = estimate.min(Limb::MAX as u64) as Limb;

        rem -= &((&den * &BigInt::from(digit)) << (LIMB_BITS * i as u32));
        while rem.is_negative() {
            digit -= 1;
            rem += &(&den << (LIMB_BITS * i as u32));
        }
        quotient.mag.set(i, digit);
        if rem.is_zero() {
            break;
        }
    }
    quotient.normalize();
    quotient
}

impl BigInt {
    /// Quotient of truncating division, or `None` for a zero divisor.
    pub fn checked_div(&self, divisor: &BigInt) -> Option<BigInt> {
        if divisor.is_zero() {
            return None;
        }
        let mut quotient = mag_div(self, divisor);
        quotient.negative = !quotient.is_zero() && (self.negative != divisor.negative);
        Some(quotient)
    }

    /// Remainder of truncating division (sign follows the dividend), or
    /// `None` for a zero divisor.
    pub fn checked_rem(&self, divisor: &BigInt) -> Option<BigInt> {
        let (_, remainder) = self.checked_div_rem(divisor)?;
        Some(remainder)
    }

    /// Quotient and remainder in one call, or `None` for a zero divisor.
    /// The remainder is `self - (self / divisor) * divisor`.
    pub fn checked_div_rem(&self, divisor: &BigInt) -> Option<(BigInt, BigInt)> {
        let quotient = self.checked_div(divisor)?;
        let remainder = self - &(&quotient * divisor);
        Some((quotient, remainder))
    }

    /// Quotient and remainder of truncating division.
    ///
    /// # Panics
    /// Panics if `divisor` is zero.
    pub fn div_rem(&self, divisor: &BigInt) -> (BigInt, BigInt) {
        match self.checked_div_rem(divisor) {
            Some(pair) => pair,
            None => panic!("division by zero"),
        }
    }
}

impl Div<&BigInt> for BigInt {
    type Output = BigInt;

    fn div(self, rhs: &BigInt) -> Self::Output {
        match self.checked_div(rhs) {
            Some(quotient) => quotient,
            None => panic!("division by zero"),
        }
    }
}

impl_binop_variants!(Div, div, DivAssign, div_assign);

impl Rem<&BigInt> for BigInt {
    type Output = BigInt;

    fn rem(self, rhs: &BigInt) -> Self::Output {
        match self.checked_rem(rhs) {
            Some(remainder) => remainder,
            None => panic!("division by zero"),
        }
    }
}

impl_binop_variants!(Rem, rem, RemAssign, rem_assign);

#[cfg(test)]
mod tests {
    use super::*;

    fn big(text: &str) -> BigInt {
        text.parse().unwrap()
    }

    #[test]
    fn add_covers_all_sign_pairs() {
        assert_eq!(big("7") + big("5"), big("12"));
        assert_eq!(big("7") + big("-5"), big("2"));
        assert_eq!(big("-7") + big("5"), big("-2"));
        assert_eq!(big("-7") + big("-5"), big("-12"));
        assert_eq!(big("5") + big("-7"), big("-2"));
        assert_eq!(big("-5") + big("7"), big("2"));
        assert_eq!(big("7") + big("-7"), BigInt::default());
    }

    #[test]
    fn add_carries_across_limbs() {
        let a = big("123456789012345678901234567890");
        assert_eq!((&a + &big("1")).to_string(), "123456789012345678901234567891");
        assert_eq!(big("4294967295") + big("1"), big("4294967296"));
        assert_eq!(
            big("18446744073709551615") + big("18446744073709551615"),
            big("36893488147419103230")
        );
    }

    #[test]
    fn sub_covers_all_sign_pairs() {
        assert_eq!(big("7") - big("5"), big("2"));
        assert_eq!(big("5") - big("7"), big("-2"));
        assert_eq!(big("7") - big("-5"), big("12"));
        assert_eq!(big("-7") - big("5"), big("-12"));
        assert_eq!(big("-7") - big("-5"), big("-2"));
        assert_eq!(big("-5") - big("-7"), big("2"));
        assert_eq!(big("7") - big("7"), BigInt::default());
    }

    #[test]
    fn sub_borrow_cascades_past_one_limb() {
        // 2^64 - 1 forces the borrow through two zero limbs
        assert_eq!(big("18446744073709551616") - big("1"), big("18446744073709551615"));
        assert_eq!(
            big("79228162514264337593543950336") - big("1"),
            big("79228162514264337593543950335")
        );
    }

    #[test]
    fn mul_schoolbook() {
        assert_eq!(big("10000000000000000") * big("3001"), big("30010000000000000000"));
        assert_eq!(
            big("10000000000000000") * big("30000000000000000"),
            big("300000000000000000000000000000000")
        );
        assert_eq!(big("-3") * big("5"), big("-15"));
        assert_eq!(big("-3") * big("-5"), big("15"));
        assert_eq!(big("0") * big("-5"), BigInt::default());
    }

    #[test]
    fn div_one_limb_and_knuth() {
        assert_eq!(big("120") / big("13"), big("9"));
        assert_eq!(
            big("10000000000000000000000000000000000") / big("1000"),
            big("10000000000000000000000000000000")
        );
        let a = big(concat!(
            "1248712878947821648762389057105328957928307412789503279510743095710",
            "2375971208749210959128709478021974721456787654324567897654789765436",
            "7543567654678987654321456789087654325678908765432567890876543245678",
            "908765432567890876543876543245678907654356789"
        ));
        let b = big(concat!(
            "56789876546789765435876546789765467890876578765456789765432567897654",
            "32456789234567890854376"
        ));
        let q = big(concat!(
            "2198830064226313680004856612680547604070329562534575633658570404422",
            "2781621158596876349726562910906651562104831721609088222205401883168",
            "960593370061500432215"
        ));
        assert_eq!(&a / &b, q);
        // division law on the same operands
        let r = &a % &b;
        assert_eq!(&q * &b + &r, a);
        assert!(r.abs() < b.abs());
    }

    #[test]
    fn rem_on_multi_limb_operands() {
        assert_eq!(big("12") % big("8"), big("4"));
        assert_eq!(big("10000000000000000") % big("10"), BigInt::default());
        assert_eq!(
            big(concat!(
                "2345678987362534875960709876543234567890987632534654654345645357343",
                "4839063464369876543245"
            )) % big("526738495607659438721653478560954837265378495607"),
            big("393707270751296419349581795408095683999332705291")
        );
    }

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!(big("-7") / big("2"), big("-3"));
        assert_eq!(big("-7") % big("2"), big("-1"));
        assert_eq!(big("7") / big("-2"), big("-3"));
        assert_eq!(big("7") % big("-2"), big("1"));
        assert_eq!(big("-7") / big("-2"), big("3"));
        assert_eq!(big("-7") % big("-2"), big("-1"));
    }

    #[test]
    fn quotient_smaller_than_divisor_is_zero() {
        assert_eq!(big("5") / big("18446744073709551616"), BigInt::default());
        assert_eq!(big("-5") % big("18446744073709551616"), big("-5"));
    }

    #[test]
    fn checked_division_reports_zero_divisor() {
        let zero = BigInt::default();
        assert_eq!(big("5").checked_div(&zero), None);
        assert_eq!(big("5").checked_rem(&zero), None);
        assert_eq!(big("5").checked_div_rem(&zero), None);
        assert_eq!(big("17").checked_div(&big("5")), Some(big("3")));
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn div_by_zero_panics() {
        let _ = big("1") / BigInt::default();
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn rem_by_zero_panics() {
        let _ = big("1") % BigInt::default();
    }

    #[test]
    fn compound_assignment_forms() {
        let mut value = big("10");
        value += big("5");
        value -= &big("1");
        value *= big("3");
        value /= &big("2");
        value %= big("8");
        assert_eq!(value, big("5"));
    }

    #[test]
    fn neg_and_abs() {
        assert_eq!(-big("5"), big("-5"));
        assert_eq!(-big("-5"), big("5"));
        assert_eq!(-BigInt::default(), BigInt::default());
        assert_eq!(big("-5").abs(), big("5"));
    }
}
