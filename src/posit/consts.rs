use super::*;
use crate::underlying::const_as;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Zero (`0`), the additive identity.
  pub const ZERO: Self = Self(Int::ZERO);

  /// The NaR pattern `0b1000…0`, sign-extended, as an i128 (wide enough for any `Int`). The
  /// extremal constants below are all bit manipulations of this value.
  pub(crate) const NAR_I128: i128 = i128::MIN >> (128 - Int::BITS + Self::JUNK_BITS);

  /// Not-a-real (`NaR`), the single exceptional value.
  //
  // Bit pattern `0b1000...0`.
  pub const NAR: Self = Self(const_as(Self::NAR_I128));

  /// Largest representable value, equal to `-MIN`.
  //
  // Bit pattern `0b0111...1`.
  pub const MAX: Self = Self(const_as(!Self::NAR_I128));

  /// Smallest representable value, equal to `-MAX`.
  ///
  /// Not to be confused with the smallest absolute value, [`Self::MIN_POSITIVE`]!
  //
  // Bit pattern `0b100...01`.
  pub const MIN: Self = Self(const_as(Self::NAR_I128 + 1));

  /// Smallest *positive* value, equal to `-MAX_NEGATIVE`.
  //
  // Bit pattern `0b000...01`.
  pub const MIN_POSITIVE: Self = Self(Int::ONE);

  /// Largest *negative* value, equal to `-MIN_POSITIVE`.
  //
  // Bit pattern `0b1111...1`.
  pub const MAX_NEGATIVE: Self = Self(const_as(-1));

  /// The minimum exponent; [`Self::MIN_POSITIVE`] = 2 <sup>[`Self::MIN_EXP`]</sup>.
  pub const MIN_EXP: Int = {
    let max_regime = N as i128 - 2;
    const_as(-(max_regime << ES))
  };

  /// The maximum exponent; [`Self::MAX`] = 2 <sup>[`Self::MAX_EXP`]</sup>.
  pub const MAX_EXP: Int = {
    let max_regime = N as i128 - 2;
    const_as(max_regime << ES)
  };

  /// One (`1`), the multiplicative identity.
  //
  // Bit pattern `0b0100...0`.
  pub const ONE: Self = Self(const_as(-(Self::NAR_I128 >> 1)));

  /// Negative one (`-1`).
  //
  // Bit pattern `0b1100...0`.
  pub const MINUS_ONE: Self = Self(const_as(Self::NAR_I128 >> 1));
}
