use super::*;

/// The two bit patterns that carry no fraction or exponent, returned as the error of
/// [`Posit::try_decode`].
#[derive(Debug)]
#[derive(Clone, Copy)]
#[derive(PartialEq, Eq)]
pub(crate) enum Special {
  Zero,
  NaR,
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// Decode a posit, reporting the zero and NaR patterns as [`Special`]. The core logic lives in
  /// [`Self::decode_regular`].
  pub(crate) fn try_decode(self) -> Result<Decoded<N, ES, Int>, Special> {
    if self == Self::ZERO {
      Err(Special::Zero)
    } else if self == Self::NAR {
      Err(Special::NaR)
    } else {
      // SAFETY: `self` is not 0 or NaR
      Ok(unsafe { self.decode_regular() })
    }
  }

  /// Decode a posit **which is not 0 or NaR** into its constituent `frac`tion and `exp`onent.
  ///
  /// # Safety
  ///
  /// `self` cannot be 0 or NaR, or calling this is undefined behaviour.
  pub(crate) unsafe fn decode_regular(self) -> Decoded<N, ES, Int> {
    // This routine sits under nearly every arithmetic operation, so it is written to be entirely
    // branchless (~20 instructions on a modern x86 CPU).
    //
    // The naïve decode would take the absolute value, peel off regime, exponent, and fraction
    // fields, then negate the fraction if the original was negative. Instead we work on the two's
    // complement pattern directly: the field extraction below is arranged so the sign never needs
    // a branch (nor the final negation).

    // Shift out the junk bits, if they exist.
    let x = self.0 << Self::JUNK_BITS;
    debug_assert!(
      x != Int::ZERO && x != Int::MIN,
      "Safety precondition violated: {self:?} cannot be 0 or NaR",
    );

    // Count the run of 0s or 1s after the sign bit; `regime_raw` is its length minus 1. Xoring
    // with the self-shifted value turns "run of equal bits" into "run of 0s", which a leading
    // zeros count measures.
    //
    //   x          = 0b10001..        x          = 0b011110..
    //   x << 1     = 0b0001...        x << 1     = 0b11110...
    //   x_xor      = 0b1001...        x_xor      = 0b10001...
    //   x_xor << 1 = 0b001....        x_xor << 1 = 0b0001....
    //   regime_raw = 2                regime_raw = 3
    //
    // SAFETY: x is not 0 or MIN, so x_xor << 1 is nonzero.
    let x_xor = x ^ (x << 1);
    let regime_raw = unsafe { (x_xor << 1).leading_zeros_nonzero() };
    debug_assert!(regime_raw <= Self::BITS - 2);

    // The regime field encodes
    //
    //   n-1, if the regime bits are a run of n 1s terminated by a 0
    //   -n,  if the regime bits are a run of n 0s terminated by a 1
    //
    // and for a negative posit the fields are read from the two's complement of the pattern,
    // which flips the run (the +1 of the complement is absorbed by the fields to the right).
    // Which case we are in is exactly the msb of `x_xor`: the sign bit xor the first regime bit.
    // And since `-n = !(n - 1)` in two's complement, both cases come from `regime_raw` with at
    // most a `!`:
    //
    //   n-1 = regime_raw,  if the msb of x_xor is 1
    //   -n  = !regime_raw, if the msb of x_xor is 0
    let regime = Int::of_u32(regime_raw).not_if_positive(x_xor);

    // Shift out the sign and regime bits (1 sign bit, a run of regime_raw + 1 bits, 1 terminating
    // bit).
    let y = (x << regime_raw) << 3;

    // The top ES bits of `y` are the exponent field, negated again if the posit is negative.
    let exponent = if const { Self::ES == 0 } {
      Int::ZERO
    } else {
      y.not_if_negative(x).lshr(Int::BITS - Self::ES)  // Logical, not arithmetic shift
    };

    // The rest of `y` is the fraction. No sign adjustment here: `frac` is itself signed (in two's
    // complement, with the same sign as the posit), so the raw bits are already what we want once
    // the hidden bits are attached below.
    let fraction =
      // Compile-time special case for ES == 2 (the standard's choice): one less instruction.
      if const { Self::ES == 2 } {
        y.mask_lsb(Int::BITS - 2)
      } else {
        (y << Self::ES).lshr(2)
      };

    // Attach the hidden bits (0b01 for a positive posit, 0b10 for a negative one: see the
    // documentation on `Decoded`) and assemble exp = regime × 2^ES + exponent.
    let frac = Int::MIN.lshr(x.is_positive() as u32) + fraction;
    let exp = (regime << Self::ES) + exponent;
    Decoded{frac, exp}
  }
}
