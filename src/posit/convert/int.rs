use super::*;

use crate::underlying::const_as;

/// The kernel for converting a _signed_ int to a posit.
///
/// # Safety
///
/// `int` cannot be `FromInt::ZERO` or `FromInt::MIN`, or calling this function is *undefined
/// behaviour*.
#[inline]
unsafe fn round_from_signed_kernel<
  FromInt: crate::Int,
  const N: u32,
  const ES: u32,
  Int: crate::Int,
>(int: FromInt) -> (Decoded<N, ES, Int>, Int) {
  // Converting into a narrower `Int` needs a right shift *before* the width change (bits lost
  // there go to `sticky`); converting into a wider one needs a left shift *after* it.
  let shift_right = if const { Int::BITS >= FromInt::BITS } {0} else {FromInt::BITS - Int::BITS};
  let shift_left = if const { Int::BITS <= FromInt::BITS } {0} else {Int::BITS - FromInt::BITS};

  // To turn `int` into a frac starting with `0b01` or `0b10`, shift out all copies of the
  // leading bit but one, and put the radix point after the two that remain: the exp is then
  // `FRAC_WIDTH` minus the shift.
  //
  // Examples:
  //
  //   value: 0b00010011 (= 19)
  //    frac: 0b01001100
  //     exp: +4 (= (8 - 2) frac width - 2 underflow)
  //
  //   value: 0b11111111 (= -1)
  //    frac: 0b10000000
  //     exp: -1 (= (8 - 2) frac width - 7 underflow)
  //
  // SAFETY: `int` is not 0 nor MIN (function precondition)
  let underflow = unsafe { int.leading_run_minus_one() };
  let frac = const_as::<FromInt, Int>(int << underflow >> shift_right) << shift_left;
  let exp = {
    let exp = (FromInt::BITS - 2).wrapping_sub(underflow);
    const_as::<i32, Int>(exp as i32)
  };
  let sticky = {
    let true_shift = shift_right.saturating_sub(underflow);
    Int::from(int.mask_lsb(true_shift) != FromInt::ZERO)
  };

  (Decoded{frac, exp}, sticky)
}

/// The kernel for converting an _unsigned_ int to a posit (though it takes the value
/// reinterpreted as signed).
///
/// # Safety
///
/// `int` cannot be `FromInt::ZERO` or `FromInt::MIN`, or calling this function is *undefined
/// behaviour*.
#[inline]
unsafe fn round_from_unsigned_kernel<
  FromInt: crate::Int,
  const N: u32,
  const ES: u32,
  Int: crate::Int,
>(int: FromInt) -> (Decoded<N, ES, Int>, Int) {
  let shift_right = if const { Int::BITS >= FromInt::BITS } {0} else {FromInt::BITS - Int::BITS};
  let shift_left = if const { Int::BITS <= FromInt::BITS } {0} else {Int::BITS - FromInt::BITS};

  // Almost the same as [`round_from_signed_kernel`], except a leading 1 does not mean the value
  // is negative: it is a positive value one octave up, so the frac shifts 1 further place right
  // (`overflow`) to make room for a leading 0.
  //
  // Example:
  //
  //   value: 0b10010011 (= 147)
  //    frac: 0b01001001 (1 = sticky)
  //     exp: +7 (= (8 - 2) frac width - 0 underflow + 1 overflow)
  //
  // SAFETY: `int` is not 0 nor MIN (function precondition)
  let leading_zeros = unsafe { int.leading_zeros_nonzero() };
  let overflow = u32::from(leading_zeros == 0);
  let underflow = leading_zeros.saturating_sub(1);
  let frac =
    (const_as::<FromInt, Int>(int << underflow >> shift_right) << shift_left).lshr(overflow);
  let exp = {
    let exp = (FromInt::BITS - 2).wrapping_add(overflow).wrapping_sub(underflow);
    const_as::<i32, Int>(exp as i32)
  };
  let sticky = {
    let true_shift = shift_right.wrapping_add(overflow).saturating_sub(underflow);
    Int::from(int.mask_lsb(true_shift) != FromInt::ZERO)
  };

  (Decoded{frac, exp}, sticky)
}

macro_rules! make_impl {
  ($signed:ty, $unsigned:ty) => {
    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<$signed> for Posit<N, ES, Int> {
      #[doc = concat!("Convert an `", stringify!($signed), "` into a `Posit`, [rounding according to the standard]:")]
      ///
      #[doc = concat!("  - [`", stringify!($signed), "::MIN`] (the bit pattern `0b1000…`) converts to [NaR](Posit::NAR);")]
      ///   - any other value is rounded (if necessary).
      ///
      /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.4
      fn round_from(value: $signed) -> Self {
        // The standard maps the two sentinel bit patterns onto each other: int MIN ↔ NaR.
        if value == 0 { return Posit::ZERO }
        if value == <$signed>::MIN { return Posit::NAR }

        // Only relevant in extreme cases (i64::MAX into a tiny posit with tiny ES), but there
        // the exponent would overflow `Int`; saturate before it can.
        if const { <$signed>::BITS as i128 > 1 << Decoded::<N, ES, Int>::FRAC_WIDTH } {
          let limit = 1 << (1 << Decoded::<N, ES, Int>::FRAC_WIDTH);
          if value >=  limit { return Posit::MAX }
          if value <= -limit { return Posit::MIN }
        }

        // SAFETY: `value` is not 0 or MIN
        let (result, sticky) = unsafe { round_from_signed_kernel(value) };
        // SAFETY: the kernel returns a normalised `Decoded`
        unsafe { result.encode_regular_round(sticky) }
      }
    }

    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<$unsigned> for Posit<N, ES, Int> {
      #[doc = concat!("Convert a `", stringify!($unsigned), "` into a `Posit`, [rounding according to the standard]:")]
      ///
      ///   - the bit pattern `0b1000…` (most significant bit set, rest clear) converts to
      ///     [NaR](Posit::NAR);
      ///   - any other value is rounded (if necessary).
      ///
      /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.4
      fn round_from(value: $unsigned) -> Self {
        let int = value as $signed;

        if int == 0 { return Posit::ZERO }
        if int == <$signed>::MIN { return Posit::NAR }

        if const { <$unsigned>::BITS as i128 > 1 << Decoded::<N, ES, Int>::FRAC_WIDTH } {
          let limit = 1 << (1 << Decoded::<N, ES, Int>::FRAC_WIDTH);
          if value >= limit { return Posit::MAX }
        }

        // SAFETY: `value` is not 0 or MIN
        let (result, sticky) = unsafe { round_from_unsigned_kernel(int) };
        // SAFETY: the kernel returns a normalised `Decoded`
        unsafe { result.encode_regular_round(sticky) }
      }
    }

    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<Posit<N, ES, Int>> for $signed {
      #[doc = concat!("Convert a `Posit` into an `", stringify!($signed), "`, [rounding according to the standard]:")]
      ///
      #[doc = concat!("  - [NaR](Posit::NAR) converts to [`", stringify!($signed), "::MIN`] (the bit pattern `0b1000…`);")]
      ///   - any other value rounds to the nearest integer (ties to even), then saturates to the
      ///     representable range.
      ///
      /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.2
      fn round_from(value: Posit<N, ES, Int>) -> Self {
        if value.is_nar() { return <$signed>::MIN }
        let value = value.nearest_int();
        if value == Posit::ZERO { return 0 }
        // SAFETY: `value` is not 0 or NaR
        let decoded = unsafe { value.decode_regular() };

        // `value` is integer-valued: frac × 2^(exp - FRAC_WIDTH) shifts exactly. Magnitude is
        // at least 2^exp, so any exp past the target width saturates without computing.
        let exp: i128 = decoded.exp.into();
        let frac: i128 = decoded.frac.into();
        if exp >= <$signed>::BITS as i128 {
          return if frac > 0 { <$signed>::MAX } else { <$signed>::MIN }
        }
        let shift = exp - Decoded::<N, ES, Int>::FRAC_WIDTH as i128;
        let int = if shift >= 0 { frac << shift } else { frac >> -shift };

        if int > <$signed>::MAX as i128 {
          <$signed>::MAX
        } else if int < <$signed>::MIN as i128 {
          <$signed>::MIN
        } else {
          int as $signed
        }
      }
    }

    impl<
      const N: u32,
      const ES: u32,
      Int: crate::Int,
    > RoundFrom<Posit<N, ES, Int>> for $unsigned {
      #[doc = concat!("Convert a `Posit` into a `", stringify!($unsigned), "`, [rounding according to the standard]:")]
      ///
      ///   - [NaR](Posit::NAR) converts to the bit pattern `0b1000…` (most significant bit set,
      ///     rest clear);
      ///   - any other value rounds to the nearest integer (ties to even), then saturates to the
      ///     representable range (in particular, negative values saturate to 0).
      ///
      /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.2
      fn round_from(value: Posit<N, ES, Int>) -> Self {
        if value.is_nar() { return 1 << (<$unsigned>::BITS - 1) }
        let value = value.nearest_int();
        if value == Posit::ZERO { return 0 }
        // SAFETY: `value` is not 0 or NaR
        let decoded = unsafe { value.decode_regular() };

        let exp: i128 = decoded.exp.into();
        let frac: i128 = decoded.frac.into();
        if frac < 0 { return 0 }
        if exp >= <$unsigned>::BITS as i128 {
          return <$unsigned>::MAX
        }
        let shift = exp - Decoded::<N, ES, Int>::FRAC_WIDTH as i128;
        let int = if shift >= 0 { frac << shift } else { frac >> -shift };

        if int > <$unsigned>::MAX as i128 {
          <$unsigned>::MAX
        } else {
          int as $unsigned
        }
      }
    }
  }
}

make_impl!{i8, u8}
make_impl!{i16, u16}
make_impl!{i32, u32}
make_impl!{i64, u64}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::rational::Rational;
  use proptest::prelude::*;

  /// Aux function: check that `int` is converted to a posit with the correct rounding.
  fn is_correct_rounded_i<FromInt: crate::Int, const N: u32, const ES: u32, Int: crate::Int>(
    int: FromInt,
  ) -> bool
  where
    FromInt: Into<Rational> + RoundInto<Posit<N, ES, Int>>,
    Rational: TryFrom<Posit<N, ES, Int>, Error = super::rational::IsNaR>,
  {
    let posit: Posit<N, ES, Int> = int.round_into();
    if int == FromInt::MIN {
      posit == Posit::NAR
    } else {
      let exact: Rational = int.into();
      super::rational::is_correct_rounded(exact, posit)
    }
  }

  /// Aux function: check that `uint` is converted to a posit with the correct rounding.
  fn is_correct_rounded_u<FromInt: crate::Int, const N: u32, const ES: u32, Int: crate::Int>(
    uint: FromInt::Unsigned,
  ) -> bool
  where
    FromInt::Unsigned: Into<Rational> + RoundInto<Posit<N, ES, Int>>,
    Rational: TryFrom<Posit<N, ES, Int>, Error = super::rational::IsNaR>,
  {
    let posit = uint.round_into();
    if FromInt::of_unsigned(uint) == FromInt::MIN {
      posit == Posit::NAR
    } else {
      let exact: Rational = uint.into();
      super::rational::is_correct_rounded(exact, posit)
    }
  }

  macro_rules! test_both_directions {
    ($t:ident, $n:literal, $es:literal, $int:ty, $val:ident) => {
      let uint = $val.as_unsigned();
      assert!(is_correct_rounded_i::<$t, $n, $es, $int>($val), "{:?}", $val);
      assert!(is_correct_rounded_u::<$t, $n, $es, $int>(uint), "{:?}", uint);
    };
  }

  macro_rules! make_exhaustive {
    ($t:ident) => {
      mod $t {
        use super::*;
        use crate::underlying::Int;

        macro_rules! test_exhaustive {
          ($name:ident, $n:literal, $es:literal, $int:ty) => {
            #[test]
            fn $name() {
              for int in $t::MIN ..= $t::MAX {
                test_both_directions!{$t, $n, $es, $int, int}
              }
            }
          };
        }

        test_exhaustive!{posit_10_0_exhaustive, 10, 0, i16}
        test_exhaustive!{posit_10_1_exhaustive, 10, 1, i16}
        test_exhaustive!{posit_10_2_exhaustive, 10, 2, i16}
        test_exhaustive!{posit_10_3_exhaustive, 10, 3, i16}
        test_exhaustive!{posit_8_0_exhaustive, 8, 0, i8}
        test_exhaustive!{p8_exhaustive, 8, 2, i8}
        test_exhaustive!{p16_exhaustive, 16, 2, i16}
        test_exhaustive!{p32_exhaustive, 32, 2, i32}
        test_exhaustive!{p64_exhaustive, 64, 2, i64}
      }
    }
  }

  macro_rules! make_proptest {
    ($t:ident) => {
      mod $t {
        use super::*;
        use crate::underlying::Int;

        macro_rules! test_proptest {
          ($name:ident, $n:literal, $es:literal, $int:ty) => {
            proptest!{
              #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
              #[test]
              fn $name(int in any::<$t>()) {
                test_both_directions!{$t, $n, $es, $int, int}
              }
            }
          };
        }

        test_proptest!{posit_10_0_proptest, 10, 0, i16}
        test_proptest!{posit_10_1_proptest, 10, 1, i16}
        test_proptest!{posit_10_2_proptest, 10, 2, i16}
        test_proptest!{posit_10_3_proptest, 10, 3, i16}
        test_proptest!{posit_8_0_proptest, 8, 0, i8}
        test_proptest!{p8_proptest, 8, 2, i8}
        test_proptest!{p16_proptest, 16, 2, i16}
        test_proptest!{p32_proptest, 32, 2, i32}
        test_proptest!{p64_proptest, 64, 2, i64}
      }
    }
  }

  make_exhaustive!{i8}
  make_exhaustive!{i16}
  make_proptest!{i32}
  make_proptest!{i64}

  mod into_int {
    use super::*;
    use malachite::base::num::arithmetic::traits::RoundToMultiple;
    use malachite::base::rounding_modes::RoundingMode;

    /// Aux macro: the converted int must equal the exact value rounded to the nearest integer
    /// (ties to even) and clamped to the target range, per the rational oracle.
    macro_rules! assert_correct {
      ($to:ty, $p:expr, $nar:expr) => {
        let p = $p;
        let int = <$to>::round_from(p);
        match Rational::try_from(p) {
          Err(_) => assert_eq!(int, $nar, "{p:?}"),
          Ok(exact) => {
            let rounded = exact.round_to_multiple(Rational::from(1), RoundingMode::Nearest).0;
            let expected = if rounded > Rational::from(<$to>::MAX) {
              Rational::from(<$to>::MAX)
            } else if rounded < Rational::from(<$to>::MIN) {
              Rational::from(<$to>::MIN)
            } else {
              rounded
            };
            assert_eq!(Rational::from(int), expected, "{p:?}");
          }
        }
      };
    }

    macro_rules! make_tests {
      ($to_signed:ty, $to_unsigned:ty, $mod:ident) => {
        mod $mod {
          use super::*;

          #[test]
          fn p8_exhaustive() {
            for p in crate::p8::cases_exhaustive_all() {
              assert_correct!{$to_signed, p, <$to_signed>::MIN}
              assert_correct!{$to_unsigned, p, 1 << (<$to_unsigned>::BITS - 1)}
            }
          }

          #[test]
          fn p16_exhaustive() {
            for p in crate::p16::cases_exhaustive_all() {
              assert_correct!{$to_signed, p, <$to_signed>::MIN}
              assert_correct!{$to_unsigned, p, 1 << (<$to_unsigned>::BITS - 1)}
            }
          }

          proptest!{
            #![proptest_config(ProptestConfig::with_cases(crate::PROPTEST_CASES))]
            #[test]
            fn p32_proptest(p in crate::p32::cases_proptest_all()) {
              assert_correct!{$to_signed, p, <$to_signed>::MIN}
              assert_correct!{$to_unsigned, p, 1 << (<$to_unsigned>::BITS - 1)}
            }

            #[test]
            fn p64_proptest(p in crate::p64::cases_proptest_all()) {
              assert_correct!{$to_signed, p, <$to_signed>::MIN}
              assert_correct!{$to_unsigned, p, 1 << (<$to_unsigned>::BITS - 1)}
            }
          }
        }
      };
    }

    make_tests!{i8, u8, to_8}
    make_tests!{i16, u16, to_16}
    make_tests!{i32, u32, to_32}
    make_tests!{i64, u64, to_64}
  }
}
