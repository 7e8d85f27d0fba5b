use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Returns the integer-valued posit nearest to `self`; ties go to the nearest even integer.
  ///
  /// Standard: "[**nearestInt**](https://posithub.org/docs/posit_standard-2.pdf#subsection.5.2)".
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(p32::round_from(3.1).nearest_int(), p32::round_from(3));
  /// assert_eq!(p32::round_from(3.5).nearest_int(), p32::round_from(4));
  /// assert_eq!(p32::round_from(4.5).nearest_int(), p32::round_from(4));
  /// assert_eq!(p32::round_from(3.9).nearest_int(), p32::round_from(4));
  /// ```
  pub fn nearest_int(self) -> Self {
    if self.is_special() { return self }
    // SAFETY: `self` is not 0 or NaR
    let decoded = unsafe { self.decode_regular() };

    // Split `decoded.frac` at the decimal dot into an `integral` part (to its left) and a
    // `fractional` part (to its right). With exp = 0 the dot sits 2 places from the left, after
    // the hidden bits; each unit of exp moves it one place right:
    //
    //         frac: 0b01_1101
    //          exp: +0          +2          -1
    //     integral: 0b01        0b0111      0b0
    //   fractional: 0b110100    0b010000    0b101110
    let integral_bits = (Int::ONE + Int::ONE).wrapping_add(decoded.exp);

    // No integral bits at all means |self| < 1/2, which rounds to 0 regardless of sign:
    //
    //   - positive: 0b01_xxxx ×2^-2 = [+0.25,+0.50[
    //   - negative: 0b10_xxxx ×2^-2 = [-0.50,-0.25[
    if integral_bits <= Int::ZERO {
      return Posit::ZERO
    }
    // No fractional bits at all means `self` is already an integer.
    if integral_bits >= Int::of_u32(Int::BITS) {
      return self;
    }

    let integral_bits = integral_bits.as_u32();
    let fractional_bits = Int::BITS - integral_bits;
    let integral = decoded.frac >> fractional_bits;
    let fractional = decoded.frac << integral_bits;

    // The fractional part drives the usual round-half-to-even decision: its msb is the round
    // bit, the rest is the sticky bit, and the parity comes from the integral part.
    let round = !fractional.is_positive();
    let sticky = fractional << 1 != Int::ZERO;
    let odd = integral.get_lsb();
    let round_up = crate::sig::round_up(odd, round, sticky);

    // Rounding up can carry out of the current msb run (0b01_11 + 1 = 0b10_00 needs one less
    // fractional bit and one more exp; a negative frac can do the reverse). Recompute the true
    // split with `leading_run_minus_one` instead of branching on each case.
    let integral_rounded = integral + Int::from(round_up);
    if integral_rounded == Int::ZERO {
      return Posit::ZERO
    }
    // SAFETY: `integral_rounded` is not 0 (checked) nor Int::MIN (impossible)
    let true_fractional_bits = unsafe { integral_rounded.leading_run_minus_one() };
    let frac = integral_rounded << true_fractional_bits;
    let exp = decoded.exp + (Int::of_u32(fractional_bits) - Int::of_u32(true_fractional_bits));

    // SAFETY: `frac` is normalised since it is non-zero and shifted to its leading run
    unsafe { Decoded { frac, exp }.encode_regular() }
  }

  /// Returns the largest integer-valued posit less than or equal to `self`.
  ///
  /// Standard: "[**floor**](https://posithub.org/docs/posit_standard-2.pdf#subsection.5.2)".
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(p32::round_from(3.1).floor(), p32::round_from(3));
  /// assert_eq!(p32::round_from(3.9).floor(), p32::round_from(3));
  /// assert_eq!(p32::round_from(-3.1).floor(), p32::round_from(-4));
  /// ```
  pub fn floor(self) -> Self {
    // Same template as [`nearest_int`], with no rounding decision at all: just truncate the
    // fractional bits (two's complement truncation already rounds towards -∞).

    if self.is_special() { return self }
    // SAFETY: `self` is not 0 or NaR
    let decoded = unsafe { self.decode_regular() };

    let integral_bits = (Int::ONE + Int::ONE).wrapping_add(decoded.exp);

    // |self| < 1/2 floors to 0 if positive, -1 if negative.
    if integral_bits <= Int::ZERO {
      return if self >= Posit::ZERO {Posit::ZERO} else {Posit::MINUS_ONE}
    }
    if integral_bits >= Int::of_u32(Int::BITS) {
      return self;
    }

    let integral_bits = integral_bits.as_u32();
    let frac = decoded.frac.mask_msb(integral_bits);
    let exp = decoded.exp;
    if frac == Int::ZERO {
      return Posit::ZERO
    }

    // SAFETY: `frac` keeps its leading run, and it is not 0 (checked)
    unsafe { Decoded { frac, exp }.encode_regular() }
  }

  /// Returns the smallest integer-valued posit greater than or equal to `self`.
  ///
  /// Standard: "[**ceil**](https://posithub.org/docs/posit_standard-2.pdf#subsection.5.2)".
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(p32::round_from(3.1).ceil(), p32::round_from(4));
  /// assert_eq!(p32::round_from(3.9).ceil(), p32::round_from(4));
  /// assert_eq!(p32::round_from(-3.1).ceil(), p32::round_from(-3));
  /// ```
  pub fn ceil(self) -> Self {
    // Same template as [`nearest_int`], with the simplest possible rounding decision: round up
    // iff any fractional bit is set.

    if self.is_special() { return self }
    // SAFETY: `self` is not 0 or NaR
    let decoded = unsafe { self.decode_regular() };

    let integral_bits = (Int::ONE + Int::ONE).wrapping_add(decoded.exp);
    // |self| < 1/2 ceils to 1 if positive, 0 if negative.
    if integral_bits <= Int::ZERO {
      return if self >= Posit::ZERO {Posit::ONE} else {Posit::ZERO}
    }
    if integral_bits >= Int::of_u32(Int::BITS) {
      return self;
    }

    let integral_bits = integral_bits.as_u32();
    let fractional_bits = Int::BITS - integral_bits;
    let integral = decoded.frac >> fractional_bits;
    let fractional = decoded.frac << integral_bits;

    let round_up: bool = fractional != Int::ZERO;

    let integral_rounded = integral + Int::from(round_up);
    if integral_rounded == Int::ZERO {
      return Posit::ZERO
    }
    // SAFETY: `integral_rounded` is not 0 (checked) nor Int::MIN (impossible)
    let true_fractional_bits = unsafe { integral_rounded.leading_run_minus_one() };
    let frac = integral_rounded << true_fractional_bits;
    let exp = decoded.exp + (Int::of_u32(fractional_bits) - Int::of_u32(true_fractional_bits));

    // SAFETY: `frac` is normalised since it is non-zero and shifted to its leading run
    unsafe { Decoded { frac, exp }.encode_regular() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::rational::Rational;
  use proptest::prelude::*;

  use malachite::base::rounding_modes::RoundingMode;

  /// Aux function: check that rounding `posit` to an integer gave `rounded_posit`, for the given
  /// `rounding_mode`.
  fn is_correct_rounded<const N: u32, const ES: u32, Int: crate::Int>(
    posit: Posit<N, ES, Int>,
    rounded_posit: Posit<N, ES, Int>,
    rounding_mode: RoundingMode,
  ) -> bool
  where
    Rational: From<i32> + TryFrom<Posit<N, ES, Int>, Error = super::rational::IsNaR>,
  {
    use malachite::base::num::arithmetic::traits::RoundToMultiple;
    let posit = Rational::try_from(posit)
      .map(|exact| exact.round_to_multiple(Rational::from(1), rounding_mode).0);
    let rounded_posit = Rational::try_from(rounded_posit);
    posit == rounded_posit
  }

  macro_rules! test_exhaustive {
    ($name:ident, $posit:ty, $round_fn:ident, $rounding_mode:expr) => {
      #[test]
      fn $name() {
        for p in <$posit>::cases_exhaustive_all() {
          let rounded = p.$round_fn();
          assert!(is_correct_rounded(p, rounded, $rounding_mode), "{p:?} {rounded:?}")
        }
      }
    };
  }

  macro_rules! test_proptest {
    ($name:ident, $posit:ty, $round_fn:ident, $rounding_mode:expr) => {
      proptest!{
        #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
        #[test]
        fn $name(p in <$posit>::cases_proptest_all()) {
          let rounded = p.$round_fn();
          assert!(is_correct_rounded(p, rounded, $rounding_mode), "{p:?} {rounded:?}")
        }
      }
    };
  }

  /// Instantiate the whole suite for one rounding function / rounding mode pair.
  macro_rules! mk_round_tests {
    ($round_fn:ident, $rounding_mode:expr) => {
      use super::*;

      test_exhaustive!{posit_10_0_exhaustive, Posit<10, 0, i16>, $round_fn, $rounding_mode}
      test_exhaustive!{posit_10_1_exhaustive, Posit<10, 1, i16>, $round_fn, $rounding_mode}
      test_exhaustive!{posit_10_2_exhaustive, Posit<10, 2, i16>, $round_fn, $rounding_mode}
      test_exhaustive!{posit_10_3_exhaustive, Posit<10, 3, i16>, $round_fn, $rounding_mode}

      test_exhaustive!{posit_8_0_exhaustive, Posit<8, 0, i8>, $round_fn, $rounding_mode}

      test_exhaustive!{p8_exhaustive, crate::p8, $round_fn, $rounding_mode}
      test_exhaustive!{p16_exhaustive, crate::p16, $round_fn, $rounding_mode}
      test_proptest!{p32_proptest, crate::p32, $round_fn, $rounding_mode}
      test_proptest!{p64_proptest, crate::p64, $round_fn, $rounding_mode}

      test_exhaustive!{posit_3_0_exhaustive, Posit::<3, 0, i8>, $round_fn, $rounding_mode}
      test_exhaustive!{posit_4_0_exhaustive, Posit::<4, 0, i8>, $round_fn, $rounding_mode}
      test_exhaustive!{posit_4_1_exhaustive, Posit::<4, 1, i8>, $round_fn, $rounding_mode}
    };
  }

  mod nearest_int {
    mk_round_tests!{nearest_int, RoundingMode::Nearest}
  }

  mod floor {
    mk_round_tests!{floor, RoundingMode::Floor}
  }

  mod ceil {
    mk_round_tests!{ceil, RoundingMode::Ceiling}
  }
}
