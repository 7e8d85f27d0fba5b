use super::*;

use crate::Quire;

use malachite::{Integer, rational::Rational};
use malachite::base::num::arithmetic::traits::{PowerOf2, Pow, Abs, Reciprocal};

/// A shortcut trait with a couple of helper functions for lifting machine ints into [Rational]s.
pub trait IntExt: crate::Int {
  fn pow(self, other: Self) -> Rational {
    let exp: i128 = other.into();
    let exp: i64 = exp.try_into().expect("Exponent overflow in converting to rational");
    Rational::pow(Rational::from(self.into()), exp)
  }

  fn power_of_2(self) -> Rational {
    let exp: i128 = self.into();
    let exp: i64 = exp.try_into().expect("Exponent overflow in converting to rational");
    Rational::power_of_2(exp)
  }
}

impl IntExt for i64 {}
impl IntExt for i32 {}
impl IntExt for i16 {}
impl IntExt for i8 {}

/// The error type returned when a [Posit] or [Quire] cannot be converted to a [Rational]
/// because it is [NaR](Posit::NAR).
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub struct IsNaR;

impl<
  const N: u32,
  const ES: u32,
  Int: IntExt,
> Posit<N, ES, Int>
where
  Integer: From<Int>,
  Rational: From<Int>,
  Rational: From<Int::Unsigned>,
{
  /// Convert a regular (non-0, non-NaR) posit into a [Rational] value. Panics on 0 and NaR.
  ///
  /// This is a deliberately plodding, field-by-field rendition of the decoding algorithm,
  /// because it is the oracle the optimised implementations are checked against: it should be
  /// obviously correct at a glance, and share no cleverness with the code under test.
  fn into_rational_regular(self) -> Rational {
    // Work at the left edge of the machine type: shift out the junk bits, if any.
    let x = self.0 << Self::JUNK_BITS;

    if x == Int::ZERO || x == Int::MIN { panic!("Should not pass {x:b} to into_rational_regular") }

    // Extract the sign first; everything else reads from the two's complement absolute value.
    let sign = !x.is_positive();
    let x = x.abs();

    // Shift out the sign bit; bit N-2 now leads and determines the regime's direction. A 0
    // there means a run of 0s terminated by a 1 (the terminator is always present: `x` is
    // neither 0 nor NaR); a 1 means a run of 1s terminated by a 0 or by the end of the posit
    // (and in the latter case the shift just performed already supplied a terminating 0).
    let x = x << 1;
    let regime_sign = !x.is_positive() as u8;
    let regime_len =
      if regime_sign == 0 {
        x.leading_zeros()
      } else {
        (!x).leading_zeros()
      };
    // A run of n 0s encodes regime -n; a run of n 1s encodes regime n-1.
    let regime = if regime_sign == 0 { -(regime_len as i32) } else { regime_len as i32 - 1 };

    // Shift out the regime run and its terminating bit; the next ES bits (possibly cut short by
    // the end of the posit, in which case the missing low bits read as 0, exactly what the
    // shift fills in) are the exponent field.
    let x = (x << regime_len) << 1;
    let exponent = if const { Self::ES != 0 } {x.lshr(Int::BITS - Self::ES)} else {Int::ZERO};

    // What remains after the exponent is the fraction field, left-aligned: an unsigned
    // numerator over 2^Int::BITS (unsigned because the sign was peeled off up front), under an
    // implicit leading 1. Again, missing bits read as 0.
    let fraction = (x << Self::ES).as_unsigned();

    // Assemble: sign × useed^regime × 2^exponent × 1.fraction.
    let useed = IntExt::power_of_2(Int::ONE << Self::ES);

    let sign = (-Int::ONE).pow(Int::from(sign));
    let regime = useed.pow(regime as i64);
    let exponent = IntExt::power_of_2(exponent);
    let fraction = Rational::from(Int::ONE) + (Rational::from(fraction) / Rational::power_of_2(Int::BITS as i64));

    sign * regime * exponent * fraction
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: IntExt,
> TryFrom<Posit<N, ES, Int>> for Rational
where
  Integer: From<Int>,
  Rational: From<Int>,
  Rational: From<Int::Unsigned>,
{
  type Error = IsNaR;

  fn try_from(value: Posit<N, ES, Int>) -> Result<Self, Self::Error> {
    if value == Posit::ZERO {
      Ok(Rational::from(Int::ZERO))
    } else if value == Posit::NAR {
      Err(IsNaR)
    } else {
      Ok(value.into_rational_regular())
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: IntExt,
> From<Decoded<N, ES, Int>> for Rational
where
  Integer: From<Int>,
  Int: malachite::base::num::basic::signeds::PrimitiveSigned,
{
  fn from(value: Decoded<N, ES, Int>) -> Self {
    let frac = Rational::from_signeds(value.frac, Decoded::<N, ES, Int>::FRAC_DENOM);
    let exp = IntExt::power_of_2(value.exp);
    frac * exp
  }
}

impl<
  const N: u32,
  const ES: u32,
  const SIZE: usize,
> TryFrom<Quire<N, ES, SIZE>> for Rational {
  type Error = IsNaR;

  fn try_from(value: Quire<N, ES, SIZE>) -> Result<Self, Self::Error> {
    if value.is_nar() {
      Err(IsNaR)
    } else {
      // The quire is just a big fixed-point number with denominator 2^WIDTH. Assemble the
      // numerator limb by limb from the most significant end; the top limb is the signed one.
      let quire = value.as_u64_array();
      let mut numerator = Integer::from(quire[quire.len() - 1] as i64);
      for &limb in quire[.. quire.len() - 1].iter().rev() {
        numerator <<= 64u64;
        numerator += Integer::from(limb);
      }

      let denominator = Integer::power_of_2(Quire::<N, ES, SIZE>::WIDTH as u64);
      Ok(Rational::from_integers(numerator, denominator))
    }
  }
}

/// Check whether the rational number `exact` should round to `posit`:
///
///   - beyond the representable range (in either direction, towards huge or towards tiny):
///     `posit` must be the saturated extremum ([Posit::MAX], [Posit::MIN],
///     [Posit::MIN_POSITIVE] or [Posit::MAX_NEGATIVE]);
///   - where the posit grid is so sparse that exponent bits are cut (the outer octaves):
///     nearest in terms of absolute **ratio**, ties to the even bit pattern;
///   - everywhere else: nearest in terms of absolute **difference**, ties to the even bit
///     pattern.
pub fn is_correct_rounded<const N: u32, const ES: u32, Int: crate::Int>(
  exact: Rational,
  posit: Posit<N, ES, Int>,
) -> bool
where
  Rational: TryFrom<Posit<N, ES, Int>, Error = IsNaR>,
{
  // Only the exact number 0 rounds to posit 0, and no number at all rounds to NaR.
  if posit == Posit::<N, ES, Int>::ZERO { return exact == Rational::from(0) }
  if posit == Posit::<N, ES, Int>::NAR { return false }

  // Saturation: anything at or past the extrema sticks to them.
  if exact > Rational::from(0) {
    if exact >= Rational::try_from(Posit::<N, ES, Int>::MAX).unwrap() {
      return posit == Posit::<N, ES, Int>::MAX
    }
    else if exact <= Rational::try_from(Posit::<N, ES, Int>::MIN_POSITIVE).unwrap() {
      return posit == Posit::<N, ES, Int>::MIN_POSITIVE
    }
  } else if exact < Rational::from(0) {
    if exact <= Rational::try_from(Posit::<N, ES, Int>::MIN).unwrap() {
      return posit == Posit::<N, ES, Int>::MIN
    }
    else if exact >= Rational::try_from(Posit::<N, ES, Int>::MAX_NEGATIVE).unwrap() {
      return posit == Posit::<N, ES, Int>::MAX_NEGATIVE
    }
  } else {
    unreachable!()
  }

  // Remaining cases: round to nearest, where "distance" is arithmetic in the middle of the
  // dynamic range and geometric on the edges.
  let distance = {
    // Exponent bits get chopped once `1 + regime_len + 1 + ES > N`, i.e. once the regime run
    // passes `N - 2 - ES`. That regime corresponds to an exponent of `(N - 2 - ES) << ES`:
    // magnitudes beyond 2 to that power (or below its reciprocal) round geometrically.
    let geometric_cutoff = Rational::power_of_2(((N - 2 - ES) as i64) << ES);
    let arithmetic_range = (&geometric_cutoff).reciprocal() ..= geometric_cutoff;
    let is_arithmetic_rounding = arithmetic_range.contains(&(&exact).abs());

    move |x: &Rational, y: &Rational| {
      if is_arithmetic_rounding {
        x-y
      } else {
        if x.abs() >= y.abs() {x/y} else {y/x}
      }
    }
  };

  // `posit` represents exactly the number `curr`; its immediate neighbours on the posit grid
  // represent exactly `prev` and `next`.
  let prev = Rational::try_from(posit.prior());
  let curr = Rational::try_from(posit).unwrap();
  let next = Rational::try_from(posit.next());
  let posit_is_even = posit.to_bits() & Int::ONE == Int::ZERO;

  if exact == curr {
    // `exact` is exactly represented by `posit`.
    true
  } else if let Ok(prev) = prev && prev < exact && exact < curr {
    // `exact` lies in `]posit.prior(), posit[`: it must be closer to `posit` than to
    // `posit.prior()`, or equidistant with `posit` the even pattern.
    let distance_curr = distance(&curr, &exact);
    let distance_prev = distance(&exact, &prev);
    distance_curr < distance_prev || distance_curr == distance_prev && posit_is_even
  } else if let Ok(next) = next && curr < exact && exact < next {
    // Mirror image in `]posit, posit.next()[`.
    let distance_curr = distance(&exact, &curr);
    let distance_next = distance(&next, &exact);
    distance_curr < distance_next || distance_curr == distance_next && posit_is_even
  } else {
    // Not in either interval: some other posit is closer.
    false
  }
}

/// As [is_correct_rounded], where an `exact` of NaR must round to exactly NaR.
pub fn try_is_correct_rounded<const N: u32, const ES: u32, Int: crate::Int>(
  exact: Result<Rational, IsNaR>,
  posit: Posit<N, ES, Int>,
) -> bool
where
  Rational: TryFrom<Posit<N, ES, Int>, Error = IsNaR>,
{
  match exact {
    Ok(exact) => is_correct_rounded(exact, posit),
    Err(IsNaR) => posit == Posit::NAR,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Manually test all bit patterns for a 6-bit posit with 2-bit exponent (cf. Posit
  /// Arithmetic, John L. Gustafson, Chapter 2).
  #[test]
  fn exhaustive_posit_6_2() {
    type Posit = super::Posit<6, 2, i16>;

    assert_eq!(Rational::try_from(Posit::from_bits(0b000000)), Ok(Rational::from(0)));
    assert_eq!(Rational::try_from(Posit::from_bits(0b100000)), Err(IsNaR));

    for (bits, (num, den)) in [
      (0b000001, (1, 65536)),
      (0b000010, (1, 4096)),
      (0b000011, (1, 1024)),
      (0b000100, (1, 256)),
      (0b000101, (1, 128)),
      (0b000110, (1, 64)),
      (0b000111, (1, 32)),
      (0b001000, (2, 32)),
      (0b001001, (3, 32)),
      (0b001010, (4, 32)),
      (0b001011, (6, 32)),
      (0b001100, (8, 32)),
      (0b001101, (12, 32)),
      (0b001110, (16, 32)),
      (0b001111, (24, 32)),
      (0b010000, (1, 1)),
      (0b010001, (3, 2)),
      (0b010010, (2, 1)),
      (0b010011, (3, 1)),
      (0b010100, (4, 1)),
      (0b010101, (6, 1)),
      (0b010110, (8, 1)),
      (0b010111, (12, 1)),
      (0b011000, (16, 1)),
      (0b011001, (32, 1)),
      (0b011010, (64, 1)),
      (0b011011, (128, 1)),
      (0b011100, (256, 1)),
      (0b011101, (1024, 1)),
      (0b011110, (4096, 1)),
      (0b011111, (65536, 1)),
    ] {
      assert_eq!(Posit::from_bits( bits).try_into(), Ok(Rational::from_signeds( num, den)));
      assert_eq!(Posit::from_bits(-bits).try_into(), Ok(Rational::from_signeds(-num, den)));
    }
  }

  /// More manual examples, worked out by hand.
  #[test]
  #[allow(overflowing_literals)]
  fn examples() {
    assert_eq!(Posit::<6, 1, i8>::from_bits(0b100001).try_into(), Ok(Rational::from(-256)));
    assert_eq!(Posit::<6, 1, i8>::from_bits(0b000001).try_into(), Ok(Rational::from_signeds(1, 256)));
    assert_eq!(Posit::<6, 1, i8>::from_bits(0b001101).try_into(), Ok(Rational::from_signeds(5, 8)));
    assert_eq!(Posit::<6, 1, i8>::from_bits(0b110010).try_into(), Ok(Rational::from_signeds(-3, 4)));

    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_01_00_10000001000).try_into(), Ok(Rational::from_signeds(3080, 1 << 15)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_01_00_11011001000).try_into(), Ok(Rational::from_signeds(3784, 1 << 15)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_01_00_11011001000).try_into(), Ok(Rational::from_signeds(3784, 1 << 15)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_01_01_11011001000).try_into(), Ok(Rational::from_signeds(3784, 1 << 14)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_01_10_11011001000).try_into(), Ok(Rational::from_signeds(3784, 1 << 13)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_01_11_11011001000).try_into(), Ok(Rational::from_signeds(3784, 1 << 12)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_11110_10_11001000).try_into(), Ok(Rational::from(456 << 6)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_11110_01_11001000).try_into(), Ok(Rational::from(456 << 5)));

    assert_eq!(Posit::<16, 2, i16>::from_bits(0b1_00001_10_00111000).try_into(), Ok(Rational::from(-456 << 5)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b1_00001_01_00111000).try_into(), Ok(Rational::from(-456 << 6)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b1_001_01_0100111000).try_into(), Ok(Rational::from_signeds(-1736, 1 << 4)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b1_1110_10_100111000).try_into(), Ok(Rational::from_signeds(-712, 1 << 20)));

    assert_eq!(Posit::<16, 2, i16>::from_bits(0b1_11111111111110_1_).try_into(), Ok(Rational::from_signeds(-1, 1i64 << 50)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b1_11111111111110_0_).try_into(), Ok(Rational::from_signeds(-1, 1i64 << 48)));
    assert_eq!(Posit::<16, 2, i16>::from_bits(0b0_11111111110_00_10).try_into(), Ok(Rational::from(3i64 << 35)));

    assert_eq!(Posit::<16, 2, i16>::MAX.try_into(), Ok(Rational::from(1i64 << 56)));
    assert_eq!(Posit::<16, 2, i16>::MIN.try_into(), Ok(Rational::from(-1i64 << 56)));
    assert_eq!(Posit::<16, 2, i16>::MIN_POSITIVE.try_into(), Ok(Rational::from_signeds(1, 1i64 << 56)));
    assert_eq!(Posit::<16, 2, i16>::MAX_NEGATIVE.try_into(), Ok(Rational::from_signeds(1, -1i64 << 56)));

    assert_eq!(Posit::<16, 2, i16>::ZERO.try_into(), Ok(Rational::from(0)));
    assert_eq!(Posit::<16, 2, i16>::ONE.try_into(), Ok(Rational::from(1)));
    assert_eq!(Posit::<16, 2, i16>::MINUS_ONE.try_into(), Ok(Rational::from(-1)));
    assert_eq!(Rational::try_from(Posit::<16, 2, i16>::NAR), Err(IsNaR));
  }

  #[test]
  fn quire() {
    // Written most significant byte first for legibility.
    let bits = [
      0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(Rational::try_from(crate::q8::from_be_bytes(bits)), Ok(Rational::from(1)));
    let bits = [
      0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 123,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(Rational::try_from(crate::q8::from_be_bytes(bits)), Ok(Rational::from(123)));
    let bits = [
      0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 234, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(Rational::try_from(crate::q8::from_be_bytes(bits)), Ok(Rational::from(234 << 8)));
    let bits = [
      0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 123, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(Rational::try_from(crate::q8::from_be_bytes(bits)), Ok(Rational::from_signeds(123, 1 << 16)));
    let bits = [
      0xff, 0xff, 0xff, 0xff,
      0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(Rational::try_from(crate::q8::from_be_bytes(bits)), Ok(Rational::from(-1)));
    let bits = [
      0xff, 0xff, 0xff, 0xff,
      0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
      0xff, 0xf0, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(Rational::try_from(crate::q8::from_be_bytes(bits)), Ok(Rational::from_signeds(-1, 1 << 12)));
    let bits = [
      0x00, 0x00, 0x00, 0x10,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    ];
    assert_eq!(Rational::try_from(crate::q8::from_be_bytes(bits)), Ok(Rational::power_of_2(8 * 6 + 4_i64)));

    assert_eq!(Rational::try_from(crate::q32::NAR), Err(IsNaR))
  }
}
