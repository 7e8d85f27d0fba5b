use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return a [normalised](Decoded::is_normalised) `Decoded` that's the result of multiplying `x`
  /// and `y`, plus the sticky accumulator.
  ///
  /// # Safety
  ///
  /// `x` and `y` have to be [normalised](Decoded::is_normalised), or calling this function
  /// is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn mul_kernel(
    x: Decoded<N, ES, Int>,
    y: Decoded<N, ES, Int>,
  ) -> (Decoded<N, ES, Int>, Int) {
    // Multiplication is the easy one: exponents add, fractions multiply. Writing out the
    // fixed-point scaling with FRAC_DENOM = 2^FRAC_WIDTH = 2^(Int::BITS - 2):
    //
    //   (x.frac / FRAC_DENOM × 2^x.exp) × (y.frac / FRAC_DENOM × 2^y.exp)
    //   = ((x.frac × y.frac) >> Int::BITS) / FRAC_DENOM × 2^(x.exp + y.exp + 2)
    //
    // so
    //
    //   frac = (x.frac × y.frac) >> Int::BITS
    //    exp = x.exp + y.exp + 2
    //
    // with three details:
    //
    //   - the product is taken in the double-width type, so nothing overflows;
    //   - the low `Int::BITS` bits shifted out feed the sticky accumulator;
    //   - the product of two normalised fracs need not be normalised (1.5 × 1.5 = 2.25 has top
    //     bits 0b10 with a positive sign), so renormalise by shifting left `underflow` places
    //     and subtracting `underflow` from the exponent.
    use crate::underlying::Double;
    let mul = x.frac.doubling_mul(y.frac);
    // SAFETY: `x.frac` and `y.frac` are not 0, so their product is neither 0 nor MIN
    let underflow = unsafe { mul.leading_run_minus_one() };  // Can only be 0, 1, or 2
    let (frac, sticky) = (mul << underflow).components_hi_lo();
    let exp = x.exp + y.exp + Int::of_u32(2) - Int::of_u32(underflow);

    (Decoded{frac, exp}, sticky)
  }

  pub(crate) fn mul(self, other: Self) -> Self {
    if self == Self::NAR || other == Self::NAR {
      Self::NAR
    } else if self == Self::ZERO || other == Self::ZERO {
      Self::ZERO
    } else {
      // SAFETY: neither `self` nor `other` is 0 or NaR
      let a = unsafe { self.decode_regular() };
      let b = unsafe { other.decode_regular() };
      let (result, sticky) = unsafe { Self::mul_kernel(a, b) };
      // SAFETY: `result.is_normalised()` holds
      unsafe { result.encode_regular_round(sticky) }
    }
  }
}

use core::ops::{Mul, MulAssign};
super::mk_ops!{Mul, MulAssign, mul, mul_assign}
