use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return a [normalised](Decoded::is_normalised) `Decoded` that's the result of adding `x` and
  /// `y`, plus the sticky accumulator.
  ///
  /// # Safety
  ///
  /// `x` and `y` have to be [normalised](Decoded::is_normalised) and must not sum to exactly
  /// zero, or calling this function is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn add_kernel(
    x: Decoded<N, ES, Int>,
    y: Decoded<N, ES, Int>,
  ) -> (Decoded<N, ES, Int>, Int) {
    // Align the radix points: shift the fraction of the smaller-exponent operand right by the
    // exponent difference. If the difference exceeds the fraction width, the smaller operand
    // contributes nothing but sticky bits.
    let shift = x.exp - y.exp;
    let (x, y) = if shift.is_positive() { (x, y) } else { (y, x) };
    let shift = shift.abs().as_u32();
    if shift >= Int::BITS {
      return (x, y.frac)
    };
    let xfrac = x.frac;
    let yfrac = y.frac >> shift;
    let exp = x.exp;

    // Adding two same-sign values can overflow by exactly 1 place:
    //
    //     1.25 = 0b01_0100
    //   + 1.0  = 0b01_0000
    //   = 2.25 = 0b10_0100
    //
    // in which case the frac shifts right one place and the exponent bumps to compensate:
    //
    //   = 1.125 × 2¹ = 0b01_0010, exp += 1
    //
    // `overflowing_add_shift` does the add, the detection, and the conditional shift in one go.
    let (frac, overflow) = xfrac.overflowing_add_shift(yfrac);
    let exp = exp + overflow.into();

    // Adding values of opposite signs can instead cancel leading bits ("underflow" by n places):
    //
    //     -1.25 = 0b10_1100
    //   +  1.0  = 0b01_0000
    //   = -0.25 = 0b11_1100
    //
    // Renormalise by shifting left until the top two bits are 01 or 10 again, compensating in
    // the exponent:
    //
    //   = -1.00 × 2¯² = 0b10_0000, exp -= 2
    //
    // SAFETY: x + y is not 0 (precondition), so `frac` is not 0 or MIN
    let underflow = unsafe { frac.leading_run_minus_one() };
    let frac = frac << underflow;
    let exp = exp - Int::of_u32(underflow);

    // Two rounding fixups. First, an underflow by n re-exposes n of the bits that the alignment
    // shift discarded from `y.frac`; recover them into the result. Say `y.frac = 0b11110101`,
    // `shift = 4`, `underflow = 3`:
    //
    //    y.frac                        = 0b11110101|
    //    y.frac >> shift               = 0b00001111|0101
    //    y.frac >> (shift - underflow) = 0b01111010|1
    //
    // Second, whatever was discarded and *not* recovered is the sticky accumulator.
    let true_shift = shift.checked_sub(underflow).unwrap_or(0);
    let recovered = y.frac.mask_lsb(shift) >> true_shift;
    let sticky = y.frac.mask_lsb(true_shift);
    let frac = frac | recovered;

    (Decoded{frac, exp}, sticky)
  }

  pub(crate) fn add(self, other: Self) -> Self {
    if self.0 | other.0 == Int::ZERO {
      // 0 + 0
      Self::ZERO
    } else if self == Self::NAR || other == Self::NAR {
      Self::NAR
    } else if self.0 == Int::ZERO {
      other
    } else if other.0 == Int::ZERO {
      self
    } else if self.0.wrapping_add(other.0) == Int::ZERO {
      // x + (-x): the kernel cannot represent a zero result
      Self::ZERO
    } else {
      // SAFETY: neither `self` nor `other` is 0 or NaR, and they are not symmetrical
      unsafe {
        let (result, sticky) = Self::add_kernel(
          self.decode_regular(),
          other.decode_regular(),
        );
        result.encode_regular_round(sticky)
      }
    }
  }

  #[inline]
  pub(crate) fn sub(self, other: Self) -> Self {
    self.add(-other)
  }
}

use core::ops::{Add, AddAssign, Sub, SubAssign};
super::mk_ops!{Add, AddAssign, add, add_assign}
super::mk_ops!{Sub, SubAssign, sub, sub_assign}


#[cfg(test)]
mod tests_sub {
  super::mk_tests!{-, -=}
}
