use super::*;
use crate::RoundFrom;
use crate::underlying::const_as;

impl<
  const N: u32,
  const ES: u32,
  const SIZE: usize,
> Quire<N, ES, SIZE> {
  /// Aux function: the number of leading bits equal to the sign bit, scanning limbs from the
  /// most significant end. Always at least 1 (the sign bit equals itself); equal to `BITS`
  /// exactly when the quire is 0 or all ones.
  fn leading_run(&self) -> u32 {
    let quire = self.as_u64_array();
    let sign = ((quire[quire.len() - 1] as i64) >> 63) as u64;
    let mut run = 0;
    for i in (0 .. quire.len()).rev() {
      let diff = quire[i] ^ sign;
      if diff != 0 {
        return run + diff.leading_zeros()
      }
      run += 64;
    }
    run
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const SIZE: usize,
> RoundFrom<&'_ Quire<N, ES, SIZE>> for Posit<N, ES, Int> {
  /// Round a quire back to a posit. This is the final step after a series of calculations in
  /// the quire, and the *only* step that actually rounds.
  ///
  /// Standard: "**qToP**".
  fn round_from(value: &'_ Quire<N, ES, SIZE>) -> Self {
    if value.is_nar() { return Posit::NAR }

    let quire = value.as_u64_array();
    let negative = (quire[quire.len() - 1] as i64) < 0;
    let run = value.leading_run();

    // Every bit equal to the sign: the quire is exactly 0, or all ones, i.e. -2^-WIDTH. The
    // latter is below every representable magnitude and rounds inward to MAX_NEGATIVE (a
    // regular value never rounds to 0).
    if run == Quire::<N, ES, SIZE>::BITS {
      return if negative {Posit::MAX_NEGATIVE} else {Posit::ZERO}
    }

    // The first bit that differs from the sign is `run` places from the top. The `Int::BITS`
    // bits topped by the sign copy just above it are the `frac` (its `0b01`/`0b10` prefix
    // straddles that first differing bit), and everything below collapses into `sticky`:
    //
    //   quire: 111111111111111111111|011010110001011|0011101011…
    //          sign run            ^^ frac          sticky
    //
    // The fixed point is `WIDTH` places from the right, so a value `value_width` bits wide
    // (sign excluded) has its leading bit at weight 2^(value_width - 1 - WIDTH).
    let value_width = Quire::<N, ES, SIZE>::BITS - run;

    // Corner case for quires with ≥ 64 spare bits: the exponent of a huge accumulated sum can
    // overflow a small `Int`, so saturate before any cast. The `if const` keeps the branch out
    // of the types that cannot hit it.
    if const { Quire::<N, ES, SIZE>::PROD_LIMIT >= 64 } {
      if value_width > 2 * Quire::<N, ES, SIZE>::WIDTH + 1 {
        return if negative {Posit::MIN} else {Posit::MAX}
      }
    }
    let exp = Int::of_u32(value_width) - Int::of_u32(Quire::<N, ES, SIZE>::WIDTH) - Int::ONE;

    // `shift` is how far the frac's lsb sits above the bottom of the quire.
    let shift = value_width as i64 + 1 - Int::BITS as i64;
    let (frac, sticky) = if shift <= 0 {
      // The whole value fits inside one frac: nothing is dropped, no rounding. All significant
      // bits live in the lowest limb (`value_width < Int::BITS ≤ 64`), and the limbs above
      // hold only sign extension, so `quire[0] as i64` is the value itself.
      let frac = const_as::<i64, Int>((quire[0] as i64) << ((-shift) as u32));
      (frac, Int::ZERO)
    } else {
      // Read a 64-bit window whose low bit sits `shift` places up, and truncate it to an
      // `Int`. The window's upper limb is only ever *used* while still in bounds; past the top
      // of the quire its bits land above `Int::BITS` and get truncated away, so a zero
      // placeholder serves.
      let word = (shift / 64) as usize;
      let bit = (shift % 64) as u32;
      let hi = if bit == 0 || word + 1 == quire.len() {0} else {quire[word + 1]};
      let raw = if bit == 0 {quire[word]} else {(quire[word] >> bit) | (hi << (64 - bit))};
      let frac = const_as::<i64, Int>(raw as i64);

      // Everything below the window feeds the sticky bit.
      let mut dropped = if bit == 0 {0} else {quire[word] << (64 - bit)};
      for &w in &quire[.. word] {
        dropped |= w
      }
      (frac, Int::from(dropped != 0))
    };

    // SAFETY: `frac` starts with `0b01` or `0b10` by construction, and `exp` is in range (the
    // overflow risk is handled just above).
    unsafe { Decoded{frac, exp}.encode_regular_round(sticky) }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const SIZE: usize,
> From<Posit<N, ES, Int>> for Quire<N, ES, SIZE> {
  /// Create a quire from a posit value. Exact: a posit always fits in its quire.
  ///
  /// Standard: "**pToQ**".
  fn from(value: Posit<N, ES, Int>) -> Self {
    if value == Posit::ZERO {
      Self::ZERO
    } else if value == Posit::NAR {
      Self::NAR
    } else {
      let mut quire = Self::ZERO;
      // SAFETY: `value` is not 0 or NaR
      quire.accumulate_decoded(unsafe { value.decode_regular() });
      quire
    }
  }
}
