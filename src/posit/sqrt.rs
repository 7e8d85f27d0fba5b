use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Return a [normalised](Decoded::is_normalised) `Decoded` that is the result of √x, plus the
  /// sticky accumulator.
  ///
  /// # Safety
  ///
  /// `x` must be [normalised](Decoded::is_normalised) and `x.frac` must be positive, or calling
  /// this function is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn sqrt_kernel(x: Decoded<N, ES, Int>) -> (Decoded<N, ES, Int>, Int) {
    // Two steps. First make the exponent even, compensating in the fraction:
    //
    //   frac', exp' = frac     , exp        if exp is even
    //               = frac << 1, exp - 1    if exp is odd
    //
    // (`x.frac` is positive, so viewing it as unsigned leaves exactly one spare bit for the
    // shift). Then
    //
    //   √(frac' / FRAC_DENOM × 2^exp')
    //   = √(frac' × FRAC_DENOM) / FRAC_DENOM × 2^(exp' / 2)
    //
    // i.e. the resulting exp is `exp' >> 1` and the frac is the integer square root of
    // `frac' << FRAC_WIDTH`. The sticky accumulator collects the square root's discarded
    // remainder and the exponent's discarded low bit.
    use crate::underlying::Unsigned;
    let exp_odd = x.exp & Int::ONE;

    let frac_adjusted = x.frac.as_unsigned() << exp_odd.as_u32();
    let exp_adjusted = x.exp - exp_odd;

    let (root, inexact) = frac_adjusted.shift_sqrt(Decoded::<N, ES, Int>::FRAC_WIDTH);
    let frac = Int::of_unsigned(root);
    let exp = exp_adjusted >> 1;
    let sticky = Int::from(inexact) | (exp_adjusted & Int::ONE);

    (Decoded{frac, exp}, sticky)
  }

  /// Returns the square root of `self`, rounded. If `self` is negative or [NaR](Self::NAR),
  /// returns NaR.
  ///
  /// Standard: "[**sqrt**](https://posithub.org/docs/posit_standard-2.pdf#subsection.5.5)".
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// # use core::f64::consts::PI;
  /// assert_eq!(p16::sqrt((4. * PI).round_into()), p16::round_from(3.5449));
  /// assert_eq!(p16::MINUS_ONE.sqrt(), p16::NAR);
  /// ```
  pub fn sqrt(self) -> Self {
    if self < Self::ZERO {
      Self::NAR
    } else if self == Self::ZERO {
      Self::ZERO
    } else {
      // SAFETY: `self` is not 0 or NaR
      let x = unsafe { self.decode_regular() };
      // SAFETY: `self` is positive
      let (result, sticky) = unsafe { Self::sqrt_kernel(x) };
      // SAFETY: `result.is_normalised()` holds
      unsafe { result.encode_regular_round(sticky) }
    }
  }
}
