use super::*;

use crate::underlying::const_as;

/// Extract the mantissa and exponent fields of a finite [`f64`] into a [`Decoded`], plus the
/// sticky bits lost if the target fraction is narrower than the mantissa.
fn decode_finite_f64<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
>(num: f64) -> (Decoded<N, ES, Int>, Int) {
  debug_assert!(num.is_finite());
  const MANTISSA_DIGITS_EXPLICIT: u32 = f64::MANTISSA_DIGITS - 1;
  const EXP_BIAS: i64 = f64::MIN_EXP as i64 - 1;
  const HIDDEN_BIT: i64 = (i64::MIN as u64 >> 1) as i64;

  use crate::underlying::Sealed;
  let sign = num.is_sign_positive();
  let bits = num.abs().to_bits() as i64;
  let mantissa = bits.mask_lsb(MANTISSA_DIGITS_EXPLICIT);
  let mut exponent = bits >> MANTISSA_DIGITS_EXPLICIT;

  // An exponent field of 0 marks a subnormal. Normals carry an implicit unit (`1.xxx`) and a -1
  // bias in the exponent field; subnormals carry neither.
  let is_normal = exponent != 0;
  exponent -= i64::from(is_normal);

  // Turn the mantissa into a two's complement `frac`. The float field is unsigned and omits the
  // hidden bit, so restore the bit and negate if needed. Negating exactly 1.000… does not give
  // -1.000… but -2.000… one octave down, same asymmetry as in the posit `Decoded` itself.
  let frac: i64 = {
    const SHIFT_LEFT: u32 = 64 - MANTISSA_DIGITS_EXPLICIT - 2;
    let unsigned_frac = (mantissa << SHIFT_LEFT) | HIDDEN_BIT;
    if sign {
      unsigned_frac
    } else if mantissa != 0 {
      -unsigned_frac
    } else {
      exponent -= 1;
      i64::MIN
    }
  };
  // Move the frac from i64 width to `Int` width, which may be narrower or wider. Bits lost going
  // narrower accumulate onto `sticky`.
  let (mut frac, sticky): (Int, Int) = {
    let shift_left = Int::BITS as i64 - 64;
    if shift_left >= 0 {
      let shift_left = shift_left as u32;
      let frac = const_as::<i64, Int>(frac) << shift_left;
      (frac, Int::ZERO)
    } else {
      let shift_right = -shift_left as u32;
      let sticky = Int::from(frac.mask_lsb(shift_right) != 0);
      let frac = const_as::<i64, Int>(frac.lshr(shift_right));
      (frac, sticky)
    }
  };

  // A subnormal frac is "underflowing": shift its leading run up to the top and compensate in
  // the exponent, e.g. 0000001101 becomes 0110100000 with -5 on the exponent. If every bit of
  // the frac was lost to the narrowing above, floor at the smallest magnitude instead.
  if !is_normal {
    if frac == Int::ZERO {
      return (Decoded { frac: Int::ONE, exp: Int::MIN >> 1 }, Int::ZERO)
    }
    // SAFETY: just early returned if `frac == 0`
    let underflow = unsafe { frac.leading_run_minus_one() };
    frac = frac << underflow;
    exponent = exponent.wrapping_sub(underflow as i64);
  }

  // Represent the exponent in the target `Int`, clamped to the range a `Decoded::exp` can hold:
  // extreme conversions (f64 → p8) would otherwise overflow it. The clamp saturates well past
  // MAX_EXP, so the encoder still projects onto MAX/MIN as usual.
  let exponent = exponent.wrapping_add(EXP_BIAS);
  let exp =
    if const { Int::BITS < 64 } && exponent > const_as::<Int, i64>(Int::MAX >> 1) {
      Int::MAX >> 1
    } else if const { Int::BITS < 64 } && exponent < const_as::<Int, i64>(Int::MIN >> 1) {
      Int::MIN >> 1
    } else {
      const_as::<_, Int>(exponent)
    };

  (Decoded { exp, frac }, sticky)
}

/// Assemble the magnitude bits of an IEEE 754 binary float from a 64-bit significand `sig` (top
/// bit set) and the unbiased exponent `exp` of that top bit. Rounds to nearest, ties to even
/// mantissa; overflow gives infinity, underflow gives zero, with gradual underflow through the
/// subnormal range in between.
///
/// The format is described by its mantissa width (hidden bit included) and its unbiased normal
/// exponent range, so the same routine serves `f64` (53, -1022, 1023) and `f32` (24, -126, 127).
fn encode_finite_float<
  const MANTISSA_DIGITS: u32,
  const EXP_MIN: i64,
  const EXP_MAX: i64,
>(sig: u64, exp: i64) -> u64 {
  debug_assert!(sig.leading_zeros() == 0);
  const { assert!(MANTISSA_DIGITS < 64) }
  let bias = EXP_MAX;

  if exp > EXP_MAX {
    // Too large for the largest finite value: infinity (exponent field all 1s, mantissa 0).
    return ((2 * bias + 1) as u64) << (MANTISSA_DIGITS - 1)
  }

  // `drop` low bits of `sig` do not fit in the mantissa field. For a subnormal result the
  // mantissa additionally loses one place per exponent step below EXP_MIN.
  let mut drop = (64 - MANTISSA_DIGITS) as i64;
  if exp < EXP_MIN {
    let extra = EXP_MIN - exp;
    if extra >= 64 {
      // Every bit of `sig` is below half the smallest subnormal.
      return 0
    }
    drop += extra;
  }
  let drop = drop as u32;  // In [11, 127]

  // Exponent field, less the contribution of the hidden bit: `sig >> drop` still contains the
  // hidden bit, so adding it below bumps the field by exactly 1 (to `exp + bias` for a normal,
  // to 1 if a subnormal rounds up into the normal range).
  let field = if exp >= EXP_MIN { (exp + bias - 1) as u64 } else { 0 };

  let wide = sig as u128;
  let mantissa = (wide >> drop) as u64;
  let round = (wide >> (drop - 1)) & 1 != 0;
  let sticky = wide & ((1 << (drop - 1)) - 1) != 0;
  let round_up = crate::sig::round_up(mantissa & 1 != 0, round, sticky);

  // As in the posit encoder, the mantissa increment is allowed to carry into the exponent
  // field; at the very top that rolls a maxed-out mantissa over to infinity, which is the
  // correct rounding there.
  (field << (MANTISSA_DIGITS - 1)) + mantissa + u64::from(round_up)
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<f32> for Posit<N, ES, Int> {
  /// Convert an `f32` into a `Posit`, [rounding according to the standard]:
  ///
  /// - any infinity or NaN converts to [NaR](Posit::NAR);
  /// - any other value is rounded (if necessary).
  ///
  /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.5
  fn round_from(value: f32) -> Self {
    // f32 → f64 is lossless, so the f64 path rounds exactly once.
    Self::round_from(f64::from(value))
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<f64> for Posit<N, ES, Int> {
  /// Convert an `f64` into a `Posit`, [rounding according to the standard]:
  ///
  /// - any infinity or NaN converts to [NaR](Posit::NAR);
  /// - any other value is rounded (if necessary).
  ///
  /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.5
  fn round_from(value: f64) -> Self {
    use core::num::FpCategory;
    match value.classify() {
      FpCategory::Nan | FpCategory::Infinite => Self::NAR,
      FpCategory::Zero => Self::ZERO,
      FpCategory::Normal | FpCategory::Subnormal => {
        let (decoded, sticky) = decode_finite_f64(value);
        // SAFETY: `decode_finite_f64` returns a normalised `Decoded`
        unsafe { decoded.encode_regular_round(sticky) }
      }
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<Posit<N, ES, Int>> for f64 {
  /// Convert a `Posit` into an `f64`, [rounding according to the standard]:
  ///
  /// - [NaR](Posit::NAR) converts to NaN;
  /// - any other value is rounded (if necessary; a float-representable value converts exactly).
  ///
  /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.3
  fn round_from(value: Posit<N, ES, Int>) -> Self {
    match value.try_decode() {
      Err(Special::Zero) => 0.,
      Err(Special::NaR) => f64::NAN,
      Ok(decoded) => {
        // The posit value is frac / FRAC_DENOM × 2^exp. Normalise |frac| into a 64-bit
        // significand with its top bit set (note |frac| can be 2 × FRAC_DENOM: -2.000… exists
        // one octave down, so go through i128 before taking the magnitude).
        let frac: i128 = decoded.frac.into();
        let negative = frac < 0;
        let mag = frac.unsigned_abs() as u64;
        let normalise = mag.leading_zeros();
        let sig = mag << normalise;
        let exp: i64 = {
          let exp: i128 = decoded.exp.into();
          exp as i64 + 63 - normalise as i64 - Decoded::<N, ES, Int>::FRAC_WIDTH as i64
        };
        let bits = encode_finite_float::<
          {f64::MANTISSA_DIGITS}, {f64::MIN_EXP as i64 - 1}, {f64::MAX_EXP as i64 - 1},
        >(sig, exp);
        f64::from_bits(bits | (negative as u64) << 63)
      }
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> RoundFrom<Posit<N, ES, Int>> for f32 {
  /// Convert a `Posit` into an `f32`, [rounding according to the standard]:
  ///
  /// - [NaR](Posit::NAR) converts to NaN;
  /// - any other value is rounded (if necessary; a float-representable value converts exactly).
  ///
  /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.3
  fn round_from(value: Posit<N, ES, Int>) -> Self {
    // Cannot delegate to the f64 conversion and narrow: rounding twice is not rounding once.
    match value.try_decode() {
      Err(Special::Zero) => 0.,
      Err(Special::NaR) => f32::NAN,
      Ok(decoded) => {
        let frac: i128 = decoded.frac.into();
        let negative = frac < 0;
        let mag = frac.unsigned_abs() as u64;
        let normalise = mag.leading_zeros();
        let sig = mag << normalise;
        let exp: i64 = {
          let exp: i128 = decoded.exp.into();
          exp as i64 + 63 - normalise as i64 - Decoded::<N, ES, Int>::FRAC_WIDTH as i64
        };
        let bits = encode_finite_float::<
          {f32::MANTISSA_DIGITS}, {f32::MIN_EXP as i64 - 1}, {f32::MAX_EXP as i64 - 1},
        >(sig, exp);
        f32::from_bits((bits as u32) | (negative as u32) << 31)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Instantiate a suite of float → posit tests.
  macro_rules! make_tests {
    ($float:ty, $posit:ty) => {
      use super::*;
      use malachite::rational::Rational;
      use proptest::prelude::*;

      #[test]
      fn zero() {
        assert_eq!(<$posit>::round_from(0.0 as $float), <$posit>::ZERO)
      }

      #[test]
      fn one() {
        assert_eq!(<$posit>::round_from(1.0 as $float), <$posit>::ONE)
      }

      #[test]
      fn minus_one() {
        assert_eq!(<$posit>::round_from(-1.0 as $float), <$posit>::MINUS_ONE)
      }

      #[test]
      fn nan() {
        assert_eq!(<$posit>::round_from(<$float>::NAN), <$posit>::NAR)
      }

      #[test]
      fn min_positive() {
        if const { <$posit>::MAX_EXP as i64 <= 127 } {
          assert_eq!(<$posit>::round_from(<$float>::MIN_POSITIVE), <$posit>::MIN_POSITIVE)
        }
      }

      #[test]
      fn max_negative() {
        if const { <$posit>::MAX_EXP as i64 <= 127 } {
          assert_eq!(<$posit>::round_from(-<$float>::MIN_POSITIVE), <$posit>::MAX_NEGATIVE)
        }
      }

      proptest!{
        #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
        #[test]
        fn proptest(float: $float) {
          let posit = <$posit>::round_from(float);
          match Rational::try_from(float) {
            Ok(exact) => assert!(super::rational::is_correct_rounded(exact, posit)),
            Err(_) => assert!(posit == <$posit>::NAR),
          }
        }
      }
    };
  }

  mod from_f64 {
    use super::*;

    mod p8 { make_tests!{f64, crate::p8} }
    mod p16 { make_tests!{f64, crate::p16} }
    mod p32 { make_tests!{f64, crate::p32} }
    mod p64 { make_tests!{f64, crate::p64} }

    mod posit_8_0 { make_tests!{f64, Posit::<8, 0, i8>} }
    mod posit_10_0 { make_tests!{f64, Posit::<10, 0, i16>} }
    mod posit_10_1 { make_tests!{f64, Posit::<10, 1, i16>} }
    mod posit_10_2 { make_tests!{f64, Posit::<10, 2, i16>} }
    mod posit_10_3 { make_tests!{f64, Posit::<10, 3, i16>} }
  }

  mod from_f32 {
    use super::*;

    mod p8 { make_tests!{f32, crate::p8} }
    mod p16 { make_tests!{f32, crate::p16} }
    mod p32 { make_tests!{f32, crate::p32} }
    mod p64 { make_tests!{f32, crate::p64} }

    mod posit_8_0 { make_tests!{f32, Posit::<8, 0, i8>} }
    mod posit_10_0 { make_tests!{f32, Posit::<10, 0, i16>} }
    mod posit_10_1 { make_tests!{f32, Posit::<10, 1, i16>} }
    mod posit_10_2 { make_tests!{f32, Posit::<10, 2, i16>} }
    mod posit_10_3 { make_tests!{f32, Posit::<10, 3, i16>} }
  }

  mod into_float {
    use super::*;
    use malachite::rational::Rational;
    use malachite::base::num::conversion::traits::RoundingFrom;
    use malachite::base::rounding_modes::RoundingMode;
    use proptest::prelude::*;

    #[test]
    fn specials() {
      assert_eq!(f64::round_from(crate::p32::ZERO), 0.);
      assert!(f64::round_from(crate::p32::NAR).is_nan());
      assert_eq!(f32::round_from(crate::p32::ZERO), 0.);
      assert!(f32::round_from(crate::p32::NAR).is_nan());
    }

    /// Every p16 value fits exactly in an f64 (14 fraction bits, |exp| ≤ 56), so the conversion
    /// must be lossless.
    macro_rules! test_exact {
      ($name:ident, $posit:ty) => {
        #[test]
        fn $name() {
          for p in <$posit>::cases_exhaustive_all() {
            let float = f64::round_from(p);
            assert_eq!(Rational::try_from(float).ok(), Rational::try_from(p).ok(), "{p:?}");
          }
        }
      };
    }

    test_exact!{p16_exact, crate::p16}
    test_exact!{posit_10_0_exact, Posit::<10, 0, i16>}
    test_exact!{posit_10_3_exact, Posit::<10, 3, i16>}
    test_exact!{posit_8_0_exact, Posit::<8, 0, i8>}

    /// Aux macro: every regular posit converts to the float nearest its exact value, ties to
    /// even mantissa, as checked against malachite's own correctly rounded conversion.
    macro_rules! test_correct_rounded {
      ($name:ident, $float:ty, $posit:ty, exhaustive) => {
        #[test]
        fn $name() {
          for p in <$posit>::cases_exhaustive_all() {
            let Ok(exact) = Rational::try_from(p) else {
              assert!(<$float>::round_from(p).is_nan(), "{p:?}");
              continue
            };
            let (expected, _) = <$float>::rounding_from(&exact, RoundingMode::Nearest);
            assert_eq!(<$float>::round_from(p), expected, "{p:?}");
          }
        }
      };
      ($name:ident, $float:ty, $posit:ty, proptest) => {
        proptest!{
          #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
          #[test]
          fn $name(p in <$posit>::cases_proptest_all()) {
            prop_assume!(p != <$posit>::NAR);
            let exact = Rational::try_from(p).unwrap();
            let (expected, _) = <$float>::rounding_from(&exact, RoundingMode::Nearest);
            prop_assert_eq!(<$float>::round_from(p), expected);
          }
        }
      };
    }

    test_correct_rounded!{f32_from_p16, f32, crate::p16, exhaustive}
    test_correct_rounded!{f32_from_posit_10_3, f32, Posit::<10, 3, i16>, exhaustive}
    test_correct_rounded!{f32_from_p32, f32, crate::p32, proptest}
    test_correct_rounded!{f32_from_p64, f32, crate::p64, proptest}
    test_correct_rounded!{f64_from_p32, f64, crate::p32, proptest}
    test_correct_rounded!{f64_from_p64, f64, crate::p64, proptest}
  }
}
