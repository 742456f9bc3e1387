use std::ops::{
    BitAnd, BitAndAssign,
    BitOr, BitOrAssign,
    BitXor, BitXorAssign,
    Shl, ShlAssign,
    Shr, ShrAssign,
    Not,
};

use crate::arith::impl_binop_variants;
use crate::big_int::{BigInt, ZERO};
use crate::limb_vec::{Limb, LimbVec, LIMB_BITS};

/// Two's-complement bit pattern of `value` over exactly `width` limbs.
///
/// `width` must exceed the magnitude length so a sign-extension limb is
/// materialized; without it, results whose magnitude needs one limb more
/// than either operand (such as `-2^32`) cannot survive the trip back.
fn to_bit_pattern(value: &BigInt, width: usize) -> LimbVec {
    let mut bits = LimbVec::zeroed(width);
    for i in 0..value.mag.len() {
        bits.set(i, value.mag.get(i));
    }
    if value.negative {
        // negation in the two's-complement domain: invert, then add one
        for limb in bits.limbs_mut() {
            *limb = !*limb;
        }
        for i in 0..width {
            let (sum, overflow) = bits.get(i).overflowing_add(1);
            bits.set(i, sum);
            if !overflow {
                break;
            }
        }
    }
    bits
}

/// Inverse of `to_bit_pattern`: recovers sign-magnitude form from a bit
/// pattern and the already-known result sign.
fn from_bit_pattern(mut bits: LimbVec, negative: bool) -> BigInt {
    if negative {
        // subtract one, then invert
        for i in 0..bits.len() {
            let limb = bits.get(i);
            bits.set(i, limb.wrapping_sub(1));
            if limb != 0 {
                break;
            }
        }
        for limb in bits.limbs_mut() {
            *limb = !*limb;
        }
    }
    let mut result = BigInt { negative, mag: bits };
    result.normalize();
    result
}

/// The sign bit of two's complement obeys ordinary boolean algebra, so
/// each operator applies the same `$op` to the limbs and to the signs.
macro_rules! impl_bitwise_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl $trait<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                // one limb past the longer magnitude holds the sign extension
                let width = self.mag.len().max(rhs.mag.len()) + 1;
                let lhs_bits = to_bit_pattern(&self, width);
                let rhs_bits = to_bit_pattern(rhs, width);
                let mut bits = LimbVec::zeroed(width);
                for i in 0..width {
                    bits.set(i, lhs_bits.get(i) $op rhs_bits.get(i));
                }
                from_bit_pattern(bits, self.negative $op rhs.negative)
            }
        }

        impl_binop_variants!($trait, $method, $assign_trait, $assign_method);
    };
}

impl_bitwise_op!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bitwise_op!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bitwise_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl Not for BigInt {
    type Output = BigInt;

    fn not(self) -> Self::Output {
        // two's-complement identity: !a == -(a + 1)
        -(self + &BigInt::from(1_u32))
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> Self::Output {
        !self.clone()
    }
}

impl Shl<u32> for BigInt {
    type Output = BigInt;

    fn shl(mut self, shift: u32) -> Self::Output {
        if self.is_zero() || shift == 0 {
            return self;
        }
        let limb_shift = (shift / LIMB_BITS) as usize;
        let bit_shift = shift % LIMB_BITS;

        if bit_shift != 0 {
            let mut carry: Limb = 0;
            for i in 0..self.mag.len() {
                let limb = self.mag.get(i);
                self.mag.set(i, (limb << bit_shift) | carry);
                carry = limb >> (LIMB_BITS - bit_shift);
            }
            if carry != 0 {
                self.mag.push(carry);
            }
        }

        if limb_shift > 0 {
            // move every limb up and zero the low positions
            let old_len = self.mag.len();
            self.mag.grow(old_len + limb_shift);
            for i in (0..old_len).rev() {
                let limb = self.mag.get(i);
                self.mag.set(i + limb_shift, limb);
            }
            for i in 0..limb_shift {
                self.mag.set(i, 0);
            }
        }
        self.normalize();
        self
    }
}

impl Shl<u32> for &BigInt {
    type Output = BigInt;

    fn shl(self, shift: u32) -> Self::Output {
        self.clone() << shift
    }
}

impl ShlAssign<u32> for BigInt {
    fn shl_assign(&mut self, shift: u32) {
        *self = std::mem::take(self) << shift;
    }
}

impl Shr<u32> for BigInt {
    type Output = BigInt;

    fn shr(mut self, shift: u32) -> Self::Output {
        if self.is_zero() || shift == 0 {
            return self;
        }
        let limb_shift = (shift / LIMB_BITS) as usize;
        let bit_shift = shift % LIMB_BITS;
        let was_negative = self.negative;

        if limb_shift >= self.mag.len() {
            // the whole magnitude is shifted out
            return if was_negative { BigInt::from(-1_i32) } else { ZERO };
        }

        let mut discarded = false;
        for i in 0..limb_shift {
            discarded |= self.mag.get(i) != 0;
        }
        if limb_shift > 0 {
            let new_len = self.mag.len() - limb_shift;
            for i in 0..new_len {
                let limb = self.mag.get(i + limb_shift);
                self.mag.set(i, limb);
            }
            for _ in 0..limb_shift {
                self.mag.pop();
            }
        }

        if bit_shift != 0 {
            let low_mask: Limb = (1 << bit_shift) - 1;
            discarded |= (self.mag.get(0) & low_mask) != 0;
            let mut carry: Limb = 0;
            for i in (0..self.mag.len()).rev() {
                let limb = self.mag.get(i);
                self.mag.set(i, (limb >> bit_shift) | carry);
                carry = limb << (LIMB_BITS - bit_shift);
            }
        }

        self.normalize();
        if was_negative && discarded {
            // floor semantics: lost bits push a negative value downward
            self.dec();
        }
        self
    }
}

impl Shr<u32> for &BigInt {
    type Output = BigInt;

    fn shr(self, shift: u32) -> Self::Output {
        self.clone() >> shift
    }
}

impl ShrAssign<u32> for BigInt {
    fn shr_assign(&mut self, shift: u32) {
        *self = std::mem::take(self) >> shift;
    }
}
