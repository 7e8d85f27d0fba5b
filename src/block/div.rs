use super::*;
use crate::ArithmeticError;

impl<const N: u32, const L: usize, const SIGNED: bool> BlockInt<N, L, SIGNED> {
  /// Division with remainder. The quotient rounds towards zero and the remainder takes the sign
  /// of the dividend, matching native integer division, so that
  ///
  /// ```text
  /// quotient * divisor + remainder == dividend   (mod 2^N)
  /// ```
  ///
  /// holds for every non-zero divisor (including `MIN / -1`, where the quotient wraps).
  ///
  /// # Errors
  ///
  /// [`ArithmeticError::DivideByZero`] if `other` is zero.
  pub fn checked_div_rem(self, other: Self) -> Result<(Self, Self), ArithmeticError> {
    if other == Self::ZERO {
      return Err(ArithmeticError::DivideByZero)
    }
    // Work on magnitudes, as raw N-bit unsigned patterns. `wrapping_neg` maps MIN to its own
    // pattern 2^(N-1), which unsigned-reads as exactly |MIN|, so no width is lost.
    let a = if self.is_negative() { self.wrapping_neg() } else { self };
    let b = if other.is_negative() { other.wrapping_neg() } else { other };
    let (quo, rem) = a.udiv_rem(b);
    let quo = if self.is_negative() != other.is_negative() { quo.wrapping_neg() } else { quo };
    let rem = if self.is_negative() { rem.wrapping_neg() } else { rem };
    Ok((quo, rem))
  }

  /// Restoring long division of raw unsigned N-bit patterns.
  fn udiv_rem(self, other: Self) -> (Self, Self) {
    debug_assert!(other != Self::ZERO);
    let mut quo = Self::ZERO;
    let mut rem = Self::ZERO;
    for i in (0..N).rev() {
      // The partial remainder is < 2 * divisor, which can poke one bit above the width when the
      // divisor's top bit is set; that overflow bit alone already decides the comparison.
      let overflow = rem.get_bit(N - 1);
      rem = rem.shl(1);
      rem.limbs[0] |= self.get_bit(i) as u64;
      if overflow || rem.cmp_unsigned(&other) != core::cmp::Ordering::Less {
        rem = rem.wrapping_sub(other);
        quo.set_bit(i);
      }
    }
    (quo, rem)
  }
}
