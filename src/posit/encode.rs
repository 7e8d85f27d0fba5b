use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Decoded<N, ES, Int> {
  /// Encode a posit, rounding if necessary. The rounding rule is the one used everywhere in this
  /// crate ([`crate::sig::round_up`]): round to nearest, ties to the even bit pattern, but never
  /// round a regular value to 0 or NaR (values beyond MAX/MIN saturate, values below
  /// MIN_POSITIVE/MAX_NEGATIVE stick to them).
  ///
  /// `sticky` is the sticky accumulator: it must be `Int::ZERO` **if and only if** all the bits
  /// lost before this call were 0. Accumulate any lost bits into `sticky`, then pass it here to
  /// get a correctly rounded posit.
  ///
  /// This function is suitable for encoding a [`Decoded`] that might need rounding (for example,
  /// the result of an arithmetic operation). If no rounding can be needed, see
  /// [`Self::encode_regular`].
  ///
  /// # Safety
  ///
  /// [`self.is_normalised()`](Self::is_normalised) has to hold, or calling this function
  /// is *undefined behaviour*.
  pub(crate) unsafe fn encode_regular_round(self, mut sticky: Int) -> Posit<N, ES, Int> {
    debug_assert!(
      self.is_normalised(),
      "Safety precondition violated: {:?} cannot have an underflowing frac or overflowing exp", self,
    );

    // Extract the regime part of the exponent (the bits above the lowest ES).
    let regime = self.exp >> ES;

    // The regime bits to produce are (n = `regime`, s = the posit's sign):
    //
    //   A run of -n  0s followed by a 1, if n is negative and s is positive
    //   A run of n+1 1s followed by a 0, if n is positive and s is positive
    //
    // and the flipped runs if s is negative (the fields are read from the two's complement of
    // the pattern). Since `-n = !n + 1`, folding the four cases over `n ^ s`:
    //
    //   A run of !n+1 0s followed by a 1, if n ^ s is negative
    //   A run of  n+1 1s followed by a 0, if n ^ s is positive
    //
    // And here is the trick that builds the pattern in three instructions: the two msb of
    // `regime` are always 00 or 11 (a regime never exceeds ±Int::BITS), and the two msb of
    // `frac` are always 01 or 10. So the two msb of `frac ^ exp` are 01 when `n ^ s` is
    // positive and 10 when negative; *negating* those two bits gives exactly the start of the
    // run we want, and shifting right by `regime_raw` (the `!`-style absolute value of the
    // regime, cf. `decode_regular`) extends the run to the right length.
    //
    //   regime         = 3            regime         = -3
    //   sign           = 0b01...      sign           = 0b01...
    //   !(frac^exp)    = 0b10...      !(frac^exp)    = 0b01...
    //   regime_raw     = 3            regime_raw     = 2
    //   shifted        = 0b11110...   shifted        = 0b0001....
    //   (4 1s then a 0: regime 3 ✓)   (3 0s then a 1: regime -3 ✓)
    let frac_xor_regime = self.frac ^ self.exp;
    let regime_raw = regime.not_if_negative(regime).as_u32();

    // A corner case before proceeding: a regular value never rounds to 0 or NaR, so the exponent
    // saturates at the representable range. Equivalently, the regime *length* saturates: clamp
    // `regime_raw` to `Self::BITS - 3` and force the lsb to 1 whenever it would exceed that (the
    // two saturated patterns, s000…001 and s111…111, both end in a 1). The rest of the code can
    // then assume `regime_raw < Self::BITS - 2`.
    let regime_raw_max = Self::BITS - 3;
    let regime_overflow = regime_raw > regime_raw_max;
    let regime_raw = if regime_overflow {regime_raw_max} else {regime_raw};

    // Assemble the regime bits, and combine with the sign bit (the msb of `frac`).
    let regime_bits = (!frac_xor_regime).mask_msb(2) >> regime_raw;
    let sign_and_regime_bits = self.frac.mask_msb(1) | regime_bits.lshr(1);
    let sign_and_regime_bits = sign_and_regime_bits >> Self::JUNK_BITS;

    // The exponent bits go right after the regime, negated if the posit is negative; the
    // fraction bits (sans hidden bits) immediately after that. Assemble both in one register
    // left-aligned, then shift into place: that keeps every lost bit at the bottom of a single
    // register, which is what makes the rounding bookkeeping below cheap.
    let exponent_bits = if const { ES != 0 } {
      self.exp.not_if_negative(self.frac) << (Int::BITS - ES)
    } else {
      Int::ZERO
    };
    let fraction_bits = (self.frac << 2).lshr(Self::ES);
    let exponent_and_fraction_bits = exponent_bits | fraction_bits;
    let exponent_and_fraction_bits = exponent_and_fraction_bits.lshr(Self::JUNK_BITS);

    // Rounding. Conceptually: write the value as an infinite-precision bit string, chop at the
    // posit's last representable bit, and apply round-to-nearest-even on the chopped part. The
    // decision needs three quantities: `odd` (the lsb kept), `round` (the first bit dropped),
    // and `sticky` (the or of every other bit dropped); `crate::sig::round_up` turns them into
    // the final increment.

    // If ES > 2 (or there are junk bits), some fraction bits were already lost when assembling
    // `exponent_and_fraction_bits` above.
    if const { Self::JUNK_BITS + Self::ES > 2 } {
      sticky |= self.frac.mask_lsb(Self::JUNK_BITS + Self::ES - 2);
    };
    // The lowest `regime_raw + 3` bits (1 sign bit, a run of regime_raw + 1 bits, 1 terminating
    // bit) of `exponent_and_fraction_bits` are shifted out: all but the last feed `sticky`, the
    // last one is `round`.
    //
    //   regime_raw+3 = 6
    //   sign_and_regime_bits               = 0b100001_000000…
    //   exponent_and_fraction_bits         = 0b11010010100011
    //   exponent_and_fraction_bits.lshr(6) = 0b…00000_1101001
    sticky |= exponent_and_fraction_bits.mask_lsb(2 + regime_raw);
    let exponent_and_fraction_bits = exponent_and_fraction_bits.lshr(2 + regime_raw);
    let round = exponent_and_fraction_bits.get_lsb();
    let exponent_and_fraction_bits = exponent_and_fraction_bits.lshr(1);

    // Assemble the unrounded result; its lsb is `odd`.
    let all_bits = sign_and_regime_bits | exponent_and_fraction_bits;
    let odd = all_bits.get_lsb();

    let round_up = crate::sig::round_up(odd, round, sticky != Int::ZERO);

    // Apply the increment (suppressed when the regime saturated: those patterns are final), and
    // force the lsb to 1 in the saturated case as discussed above.
    let bits = all_bits + Int::from(round_up & !regime_overflow);
    unsafe { Posit::from_bits_unchecked(bits | Int::from(regime_overflow)) }
  }

  /// Encode a posit, **ignoring rounding**.
  ///
  /// This function is suitable for encoding a [`Decoded`] that was obtained from
  /// [`Posit::decode_regular`], or that was otherwise crafted as an exactly representable value.
  /// If it might need rounding, see [`Self::encode_regular_round`].
  ///
  /// # Safety
  ///
  /// [`self.is_normalised()`](Self::is_normalised) has to hold, or calling this function
  /// is *undefined behaviour*.
  #[inline]
  pub(crate) unsafe fn encode_regular(self) -> Posit<N, ES, Int> {
    debug_assert!(
      self.is_normalised(),
      "Safety precondition violated: {:?} cannot have an underflowing frac or overflowing exp", self,
    );
    unsafe { self.encode_regular_round(Int::ZERO) }
  }

  /// Encode a posit, rounding if necessary. The core logic lives in
  /// [`Self::encode_regular_round`].
  ///
  /// If `!self.is_normalised()`, return `Err(())` instead.
  #[cfg(test)]
  pub(crate) fn try_encode_round(self, sticky: Int) -> Result<Posit<N, ES, Int>, ()> {
    if self.is_normalised() {
      Ok(unsafe { self.encode_regular_round(sticky) })
    } else {
      Err(())
    }
  }

  /// Encode a posit, **ignoring rounding**. The core logic lives in [`Self::encode_regular`].
  ///
  /// If `!self.is_normalised()`, return `Err(())` instead.
  #[cfg(test)]
  pub(crate) fn try_encode(self) -> Result<Posit<N, ES, Int>, ()> {
    if self.is_normalised() {
      Ok(unsafe { self.encode_regular() })
    } else {
      Err(())
    }
  }
}
