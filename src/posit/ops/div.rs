use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return a [normalised](Decoded::is_normalised) `Decoded` that's the result of dividing `x` by
  /// `y`, plus the sticky accumulator.
  ///
  /// # Safety
  ///
  /// `x` and `y` have to be [normalised](Decoded::is_normalised), or calling this function
  /// is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn div_kernel(
    x: Decoded<N, ES, Int>,
    y: Decoded<N, ES, Int>,
  ) -> (Decoded<N, ES, Int>, Int) {
    // Like multiplication but mirrored: exponents subtract, fractions divide. With ÷ denoting
    // exact division and / the integer division that rounds towards -∞, the fixed-point scaling
    // works out to
    //
    //   frac = (x.frac << FRAC_WIDTH) / y.frac
    //    exp = x.exp - y.exp
    //
    // except that the quotient of two normalised fracs may itself need renormalising (it lands
    // in (1/2, 2) in magnitude), losing bits off the end if we shift after dividing. So compute
    // the underflow from a first division, then redo the division with the shift folded in:
    //
    //   frac = (x.frac << (FRAC_WIDTH + underflow)) / y.frac
    //    exp = x.exp - y.exp - underflow
    //
    // The remainder of the second division is exactly the discarded tail: it is the sticky
    // accumulator.
    let width = Decoded::<N, ES, Int>::FRAC_WIDTH;
    // SAFETY: `y.frac` is normalised, so it is neither 0 nor -1
    let (div, _) = unsafe { x.frac.shift_div_rem(y.frac, width) };
    // SAFETY: `x.frac` and `y.frac` are not 0, so `div` is neither 0 nor MIN
    let underflow = unsafe { div.leading_run_minus_one() };

    // SAFETY: as above
    let (frac, sticky) = unsafe { x.frac.shift_div_rem(y.frac, width + underflow) };
    let exp = x.exp - y.exp - Int::of_u32(underflow);

    (Decoded{frac, exp}, sticky)
  }

  pub(crate) fn div(self, other: Self) -> Self {
    if self == Self::NAR || other == Self::NAR || other == Self::ZERO {
      // Division by zero is NaR, the single error value.
      Self::NAR
    } else if self == Self::ZERO {
      Self::ZERO
    } else {
      // SAFETY: neither `self` nor `other` is 0 or NaR
      let a = unsafe { self.decode_regular() };
      let b = unsafe { other.decode_regular() };
      let (result, sticky) = unsafe { Self::div_kernel(a, b) };
      // SAFETY: `result.is_normalised()` holds
      unsafe { result.encode_regular_round(sticky) }
    }
  }
}

use core::ops::{Div, DivAssign};
super::mk_ops!{Div, DivAssign, div, div_assign}
