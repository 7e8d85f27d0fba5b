use super::*;
use crate::underlying::const_as;

impl<
  const N1: u32,
  const ES1: u32,
  Int1: crate::Int,
> Posit<N1, ES1, Int1> {
  /// Very fast, the `ES` have to be the same.
  fn round_from_fast<
    const N2: u32,
    const ES2: u32,
    Int2: crate::Int,
  >(self) -> Posit<N2, ES2, Int2> {
    if const { ES1 != ES2 } { unimplemented!() }
    if const { N1 <= N2 } {
      // Widening needs no rounding at all: pad with zeroes on the right.
      let bits = const_as::<Int1, Int2>(self.to_bits()) << (N2 - N1);
      // SAFETY: `bits` is a valid N1-bit pattern, so shifted left it is a valid N2-bit pattern
      unsafe { Posit::from_bits_unchecked(bits) }
    } else {
      // Narrowing truncates `N1 - N2` bits off the end, which may require rounding up. The
      // leftmost truncated bit is the round bit, the rest collapse into sticky, and the parity
      // comes from the lsb of what remains.
      let sticky = self.to_bits().mask_lsb(N1 - N2 - 1) != Int1::ZERO;
      let round = const_as::<Int1, Int2>(self.to_bits() >> (N1 - N2 - 1)).get_lsb();
      let bits = const_as::<Int1, Int2>(self.to_bits() >> (N1 - N2));
      let round_up = Int2::from(crate::sig::round_up(bits.get_lsb(), round, sticky));
      // Two fixups on top of the plain nearest-even decision:
      //
      //   - never round up from `0b1111…` to `0b0000…` or from `0b0111…` to `0b1000…` (the
      //     regulars surrounding 0 and NaR must not collapse into them);
      //   - never truncate `0b000…1…` down to `0b0000…` or `0b100…1…` down to `0b1000…` (a
      //     non-zero, non-NaR value must stay regular).
      //
      // So: if the truncation landed on 0 or NaR, round up whenever anything non-zero was
      // chopped; and if rounding up crossed the sign boundary, take one step back.
      let is_special = Posit::<N2, ES2, Int2>::from_bits(bits).is_special();
      let round_up = round_up | ((Int2::from(round) | Int2::from(sticky)) & Int2::from(is_special));
      let bits_rounded = Posit::<N2, ES2, Int2>::sign_extend(bits.wrapping_add(round_up));
      let overflow = !(bits_rounded ^ bits).is_positive();
      Posit::from_bits(bits_rounded.wrapping_sub(Int2::from(overflow)))
    }
  }

  /// Slower, the `ES` may be different.
  fn round_from_slow<
    const N2: u32,
    const ES2: u32,
    Int2: crate::Int,
  >(self) -> Posit<N2, ES2, Int2> {
    if self == Self::ZERO {
      Posit::ZERO
    } else if self == Self::NAR {
      Posit::NAR
    } else {
      // SAFETY: `self` is not 0 or NaR
      let decoded = unsafe { self.decode_regular() };
      // Move `frac` and `exp` to the target width, collecting lost frac bits into `sticky`.
      let shift_right = if const { Int1::BITS <= Int2::BITS } {0} else {Int1::BITS - Int2::BITS};
      let shift_left = if const { Int1::BITS >= Int2::BITS } {0} else {Int2::BITS - Int1::BITS};
      let frac = const_as::<Int1, Int2>(decoded.frac >> shift_right) << shift_left;
      let exp = const_as::<Int1, Int2>(decoded.exp);
      let sticky = Int2::from(decoded.frac.mask_lsb(shift_right) != Int1::ZERO);
      // Corner case when narrowing: the source exponent may not fit in an `Int2` at all, in
      // which case pin it at the widest exponent `Int2` carries (the encoder saturates from
      // there as usual).
      if Int1::BITS > Int2::BITS
      && Self::MAX_EXP >= const_as(Decoded::<N2, ES2, Int2>::FRAC_DENOM)
      && decoded.exp.abs() >= const_as(Decoded::<N2, ES2, Int2>::FRAC_DENOM) {
        let exp = Decoded::<N2, ES2, Int2>::FRAC_DENOM - Int2::ONE;
        let exp = if decoded.exp.is_positive() {exp} else {-exp};
        // SAFETY: `decoded.frac` starts with `0b01` or `0b10`, hence so does the shifted `frac`
        return unsafe { Decoded{frac, exp}.encode_regular() }
      }
      // SAFETY: `decoded.frac` starts with `0b01` or `0b10`, hence so does the shifted `frac`;
      // `exp` is in range (the overflow risk is handled just above)
      unsafe { Decoded{frac, exp}.encode_regular_round(sticky) }
    }
  }
}

// A generic `RoundFrom<Posit<N1, ES1, Int1>> for Posit<N2, ES2, Int2>` would conflict with the
// blanket identity impl, so posit-to-posit conversion is an inherent method.

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Convert a posit into a differently-parameterised one, [rounding according to the standard].
  ///
  /// If the source and target have the same `ES` — as all the standard types do — this is just a
  /// shift of the bit pattern, making mixed-precision arithmetic cheap.
  ///
  /// [rounding according to the standard]: https://posithub.org/docs/posit_standard-2.pdf#subsection.6.1
  ///
  /// # Examples
  ///
  /// ```
  /// # use soft_unum::{p8, p64, RoundFrom, RoundInto};
  /// let pi: p64 = core::f64::consts::PI.round_into();
  /// let two: p8 = 2.round_into();
  /// let tau: p64 = pi * two.convert();
  /// assert_eq!(tau, core::f64::consts::TAU.round_into())
  /// ```
  pub fn convert<
    const N2: u32,
    const ES2: u32,
    Int2: crate::Int,
  >(self) -> Posit<N2, ES2, Int2> {
    if const { ES == ES2 } {
      self.round_from_fast()
    } else {
      self.round_from_slow()
    }
  }
}
