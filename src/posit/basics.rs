use super::*;
use crate::underlying::const_as;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The logical size of this posit type in bits (the parameter `N`), which may be smaller than
  /// the size of the underlying machine type.
  pub const BITS: u32 = {
    assert!(
      N >= 3,
      "A posit cannot have fewer than 3 bits",
    );
    assert!(
      N <= Int::BITS,
      "Cannot represent an N-bit posit in an underlying machine type with fewer bits",
    );
    N
  };

  /// The number of exponent bits (the parameter `ES`).
  pub const ES: u32 = {
    assert!(
      ES <= N,
      "Cannot have more exponent bits ES than total bits N",
    );
    // ES cannot be arbitrarily large either: intermediate computations need exponents up to
    // 3 × MAX_EXP (e.g. a product of two near-MAX values compared against a third) to fit in
    // `Int` without overflow. Rounding up, we require 4 × MAX_EXP = 4 × (N-2) × 2^ES to be
    // representable, i.e. (N-2) < 2^(Int::BITS - ES - 2). Const-evaluable form: take ilog2 of
    // both sides.
    assert!(
      (N - 2).ilog2() + ES + 2 < Int::BITS,
      "The chosen ES is too big for this combination of N and underlying machine type. Lower \
      ES, or pick a wider underlying type.",
    );
    ES
  };

  /// When `Int` is wider than `N` bits, the top `Int::BITS - N` bits of the representation are
  /// junk: they always mirror bit `N-1` (maintained by [`Self::sign_extend`]). Zero in the common
  /// case where the widths match.
  pub(crate) const JUNK_BITS: u32 = Int::BITS - Self::BITS;

  /// Sign-extend an `Int` from the posit's logical width to the full machine width.
  #[inline]
  pub(crate) fn sign_extend(x: Int) -> Int {
    if const { Self::JUNK_BITS == 0 } {
      x
    } else {
      (x << Self::JUNK_BITS) >> Self::JUNK_BITS
    }
  }

  /// Construct a posit from its raw bit representation. Bits above the lowest `N`
  /// ([`Self::BITS`]) bits, if any, are ignored.
  #[inline]
  pub fn from_bits(bits: Int) -> Self {
    Self(Self::sign_extend(bits))
  }

  /// As [`Self::from_bits`], but skips the sign extension.
  ///
  /// # Safety
  ///
  /// `bits` must already be sign-extended from bit `N-1`, i.e. it must be a value previously
  /// returned by [`Self::to_bits`]. If `Int::BITS == Self::BITS` this always holds.
  #[inline]
  pub const unsafe fn from_bits_unchecked(bits: Int) -> Self {
    Self(bits)
  }

  /// The underlying bit representation, with bits above bit `N-1` (if any) sign-extended.
  #[inline]
  pub const fn to_bits(self) -> Int {
    self.0
  }

  /// As [`Self::from_bits`], taking the pattern as an unsigned machine int.
  #[inline]
  pub fn from_bits_unsigned(bits: Int::Unsigned) -> Self {
    Self::from_bits(Int::of_unsigned(bits))
  }

  /// As [`Self::to_bits`], returning the pattern as an unsigned machine int.
  #[inline]
  pub fn to_bits_unsigned(self) -> Int::Unsigned {
    self.0.as_unsigned()
  }

  /// Whether `self` is one of the two exception patterns ([0](Self::ZERO) or [NaR](Self::NAR)).
  /// Same as `self == Self::ZERO || self == Self::NAR`, but a single test: those are exactly the
  /// patterns whose bits below the sign bit are all zero.
  #[inline]
  pub(crate) fn is_special(&self) -> bool {
    (self.0 << Self::JUNK_BITS) << 1 == Int::ZERO
  }

  /// Whether `self` is [NaR](Self::NAR).
  #[inline]
  pub fn is_nar(self) -> bool {
    self.0 == Self::NAR.0
  }

  /// Whether `self` is [zero](Self::ZERO).
  #[inline]
  pub fn is_zero(self) -> bool {
    self.0 == Int::ZERO
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Decoded<N, ES, Int> {
  /// The [`frac`](Decoded::frac) field has its radix point this many bits from the right.
  pub(crate) const FRAC_WIDTH: u32 = Int::BITS - 2;

  /// The denominator of the fixed-point [`frac`](Decoded::frac) field, `2^FRAC_WIDTH`.
  pub(crate) const FRAC_DENOM: Int = const_as(1i128 << Self::FRAC_WIDTH);

  /// As [`Posit::BITS`].
  pub const BITS: u32 = Posit::<N, ES, Int>::BITS;

  /// As [`Posit::ES`].
  pub const ES: u32 = Posit::<N, ES, Int>::ES;

  /// As [`Posit::JUNK_BITS`].
  pub(crate) const JUNK_BITS: u32 = Posit::<N, ES, Int>::JUNK_BITS;

  /// Whether `self` is normalised:
  ///
  /// - `self.frac` starts with `0b01` or `0b10`, and
  /// - `self.exp >> ES` starts with `0b00` or `0b11` (automatic when `ES > 0`).
  pub(crate) fn is_normalised(self) -> bool {
    let frac = self.frac >> Self::FRAC_WIDTH;
    let exp = self.exp >> Self::FRAC_WIDTH;
    (frac == Int::ONE || frac == !Int::ONE) && (ES > 0 || exp == Int::ZERO || exp == !Int::ZERO)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bits() {
    assert_eq!(Posit::<8, 2, i8>::BITS, 8);
    assert_eq!(Posit::<16, 2, i16>::BITS, 16);
    assert_eq!(Posit::<32, 2, i32>::BITS, 32);
    assert_eq!(Posit::<64, 2, i64>::BITS, 64);

    assert_eq!(Posit::<8, 0, i8>::BITS, 8);
    assert_eq!(Posit::<16, 1, i16>::BITS, 16);
    assert_eq!(Posit::<64, 3, i64>::BITS, 64);

    assert_eq!(Posit::<6, 1, i8>::BITS, 6);
    assert_eq!(Posit::<10, 2, i64>::BITS, 10);
    assert_eq!(Posit::<32, 2, i64>::BITS, 32);
  }

  #[test]
  fn es() {
    assert_eq!(Posit::<8, 2, i8>::ES, 2);
    assert_eq!(Posit::<16, 2, i16>::ES, 2);
    assert_eq!(Posit::<32, 2, i32>::ES, 2);
    assert_eq!(Posit::<64, 2, i64>::ES, 2);

    assert_eq!(Posit::<8, 0, i8>::ES, 0);
    assert_eq!(Posit::<16, 1, i16>::ES, 1);
    assert_eq!(Posit::<64, 3, i64>::ES, 3);

    assert_eq!(Posit::<6, 1, i8>::ES, 1);
    assert_eq!(Posit::<10, 2, i64>::ES, 2);
  }

  #[test]
  fn es_max() {
    assert_eq!(Posit::<8, 3, i8>::ES, 3);
    assert_eq!(Posit::<16, 10, i16>::ES, 10);
    assert_eq!(Posit::<32, 25, i32>::ES, 25);
    assert_eq!(Posit::<64, 56, i64>::ES, 56);

    assert_eq!(Posit::<8, 8, i16>::ES, 8);
    assert_eq!(Posit::<16, 16, i32>::ES, 16);
    assert_eq!(Posit::<32, 32, i64>::ES, 32);
  }

  #[test]
  #[allow(overflowing_literals)]
  fn from_bits() {
    fn assert_roundtrip<const N: u32, const ES: u32, Int: crate::Int>(a: Int, b: Int) {
      assert_eq!(Posit::<N, ES, Int>::from_bits(a).to_bits(), b)
    }

    // N = width of type
    assert_roundtrip::<16, 2, i16>(
      0b0000_0101_0011_1010,
      0b0000_0101_0011_1010,
    );
    assert_roundtrip::<16, 2, i16>(
      0b1111_0101_0011_1010,
      0b1111_0101_0011_1010,
    );

    // N < width of type (needs sign-extension from bit 9)
    assert_roundtrip::<10, 2, i16>(
      0b000001_01_0011_1010,
      0b000000_01_0011_1010,
    );
    assert_roundtrip::<10, 2, i16>(
      0b111101_01_0011_1010,
      0b000000_01_0011_1010,
    );
    assert_roundtrip::<10, 2, i16>(
      0b010100_11_0011_1010,
      0b111111_11_0011_1010,
    );
  }

  #[test]
  fn special() {
    type P = Posit<10, 1, i16>;
    assert!(P::ZERO.is_special() && P::ZERO.is_zero() && !P::ZERO.is_nar());
    assert!(P::NAR.is_special() && P::NAR.is_nar() && !P::NAR.is_zero());
    assert!(!P::ONE.is_special());
    assert!(!P::MAX.is_special());
    assert!(!P::MIN.is_special());
    assert!(!P::MIN_POSITIVE.is_special());
    assert!(!P::MAX_NEGATIVE.is_special());
  }
}

mod tests_compile_fail {
  /// ```compile_fail
  /// use soft_unum::Posit;
  /// pub fn foo() -> u32 { Posit::<2, 0, i8>::BITS }
  /// ```
  #[allow(dead_code)]
  fn bits_fail_too_few() {}

  /// ```compile_fail
  /// use soft_unum::Posit;
  /// pub fn foo() -> u32 { Posit::<9, 0, i8>::BITS }
  /// ```
  #[allow(dead_code)]
  fn bits_fail_8_many() {}

  /// ```compile_fail
  /// use soft_unum::Posit;
  /// pub fn foo() -> u32 { Posit::<17, 1, i16>::BITS }
  /// ```
  #[allow(dead_code)]
  fn bits_fail_16_many() {}

  /// ```compile_fail
  /// use soft_unum::Posit;
  /// pub fn foo() -> u32 { Posit::<65, 3, i64>::BITS }
  /// ```
  #[allow(dead_code)]
  fn bits_fail_64_many() {}

  /// ```compile_fail
  /// use soft_unum::Posit;
  /// pub fn foo() -> u32 { Posit::<8, 4, i8>::ES }
  /// ```
  #[allow(dead_code)]
  fn es_fail_8_many() {}

  /// ```compile_fail
  /// use soft_unum::Posit;
  /// pub fn foo() -> u32 { Posit::<32, 26, i32>::ES }
  /// ```
  #[allow(dead_code)]
  fn es_fail_32_many() {}

  /// ```compile_fail
  /// use soft_unum::Posit;
  /// pub fn foo() -> u32 { Posit::<8, 9, i16>::ES }
  /// ```
  #[allow(dead_code)]
  fn es_fail_es_larger_than_n() {}
}
