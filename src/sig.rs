//! Normalized significand arithmetic over [`BlockInt`]s: widened, *un-rounded* intermediate
//! results, with rounding as a separate explicit step.
//!
//! This module also owns the crate's one and only rounding rule, [`round_up`]: round to
//! nearest, ties to even. The posit encoder and the quire readout both defer to it, so there is
//! a single place where tie-breaking is decided.

use crate::ArithmeticError;
use crate::block::BlockInt;

/// Round-to-nearest, ties-to-even, as a pure decision function.
///
/// `odd` is the lowest bit that will be kept, `round` the first bit dropped, and `sticky` the OR
/// of every bit below that. Returns whether to increment the kept bits:
///
///   - `round == 0`: round down (the dropped tail is below one half).
///   - `round == 1, sticky == 1`: round up (the tail is above one half).
///   - `round == 1, sticky == 0`: exactly halfway; round to the even neighbour, i.e. up iff the
///     kept part is `odd`.
#[inline]
pub fn round_up(odd: bool, round: bool, sticky: bool) -> bool {
  round & (odd | sticky)
}

/// An unsigned significand: `N` bits of magnitude with a radix point `rbits` positions up from
/// the bottom, representing `bits × 2^-rbits`. The hidden bit of a normalized significand is
/// *explicit* here, at position `rbits` exactly (so a normalized value lies in `[1, 2)`).
///
/// Arithmetic does not round, and does not silently overflow either: each operation returns a
/// result in a caller-chosen wider type, and [`rounding_direction`](Self::rounding_direction) /
/// [`round_to`](Self::round_to) narrow explicitly.
#[derive(Clone, Copy)]
#[derive(Debug)]
#[derive(PartialEq, Eq)]
pub struct Sig<const N: u32, const L: usize> {
  bits: BlockInt<N, L, false>,
  rbits: u32,
}

impl<const N: u32, const L: usize> Sig<N, L> {
  /// Make a significand of `bits × 2^-rbits`.
  ///
  /// # Errors
  ///
  /// [`ArithmeticError::InvalidConfiguration`] if `rbits >= N`: a significand needs at least one
  /// integer-part bit for the hidden bit to live in.
  pub fn new(bits: BlockInt<N, L, false>, rbits: u32) -> Result<Self, ArithmeticError> {
    if rbits >= N {
      return Err(ArithmeticError::InvalidConfiguration)
    }
    Ok(Self { bits, rbits })
  }

  #[inline]
  pub fn bits(&self) -> BlockInt<N, L, false> {
    self.bits
  }

  #[inline]
  pub fn rbits(&self) -> u32 {
    self.rbits
  }

  /// Whether the hidden bit is set and is the top set bit, i.e. the value is in `[1, 2)`.
  pub fn is_normalized(&self) -> bool {
    self.bits.leading_zeros() == N - 1 - self.rbits
  }

  /// Shift a non-zero significand so its top set bit lands on the hidden-bit position, returning
  /// the power-of-two factor taken out: `self == result × 2^adjust`.
  pub fn normalize(self) -> (Self, i32) {
    debug_assert!(self.bits != BlockInt::ZERO);
    let target = N - 1 - self.rbits;
    let lz = self.bits.leading_zeros();
    if lz >= target {
      let bits = self.bits.shl(lz - target);
      (Self { bits, ..self }, (target as i32) - (lz as i32))
    } else {
      let bits = self.bits.shr(lz.abs_diff(target));
      // Bits shifted out here are genuinely discarded; callers that care route through the
      // widened ops instead, which never take this path.
      (Self { bits, ..self }, (target as i32) - (lz as i32))
    }
  }

  /// Zero-extend into a wider significand with the same value.
  pub fn widen<const N2: u32, const L2: usize>(self) -> Sig<N2, L2> {
    const { assert!(N2 >= N) }
    let mut limbs = [0; L2];
    limbs[..L].copy_from_slice(self.bits.limbs());
    Sig { bits: BlockInt::from_limbs(limbs), rbits: self.rbits }
  }

  /// Exact sum, one bit wider than the operands so the carry can't fall off.
  pub fn add<const N2: u32, const L2: usize>(self, other: Self) -> Sig<N2, L2> {
    const { assert!(N2 > N) }
    debug_assert_eq!(self.rbits, other.rbits);
    let a = self.widen::<N2, L2>();
    let b = other.widen::<N2, L2>();
    Sig { bits: a.bits + b.bits, rbits: self.rbits }
  }

  /// Exact difference; `self` must not be below `other`.
  pub fn sub<const N2: u32, const L2: usize>(self, other: Self) -> Sig<N2, L2> {
    const { assert!(N2 >= N) }
    debug_assert_eq!(self.rbits, other.rbits);
    debug_assert!(self.bits >= other.bits);
    let a = self.widen::<N2, L2>();
    let b = other.widen::<N2, L2>();
    Sig { bits: a.bits - b.bits, rbits: self.rbits }
  }

  /// Exact product: twice as many bits, twice as many radix bits.
  pub fn mul<const N2: u32, const L2: usize>(self, other: Self) -> Sig<N2, L2> {
    const { assert!(N2 >= 2 * N) }
    let a = self.widen::<N2, L2>();
    let b = other.widen::<N2, L2>();
    Sig { bits: a.bits * b.bits, rbits: self.rbits + other.rbits }
  }

  /// Quotient computed to `precision` extra fraction bits, plus a sticky flag for the discarded
  /// remainder: `(self/other) × 2^precision` rounded down, with `sticky` iff that was inexact.
  ///
  /// # Errors
  ///
  /// [`ArithmeticError::DivideByZero`] if `other` is zero.
  ///
  /// [`ArithmeticError::InvalidConfiguration`] if the quotient's radix point falls outside the
  /// result width, i.e. `self.rbits + precision - other.rbits` is negative or `>= N2`.
  pub fn div<const N2: u32, const L2: usize>(
    self,
    other: Self,
    precision: u32,
  ) -> Result<(Sig<N2, L2>, bool), ArithmeticError> {
    const { assert!(N2 >= 2 * N) }
    let rbits = self.rbits
      .checked_add(precision)
      .and_then(|r| r.checked_sub(other.rbits))
      .filter(|&r| r < N2)
      .ok_or(ArithmeticError::InvalidConfiguration)?;
    let a = self.widen::<N2, L2>().bits.shl(precision);
    let b = other.widen::<N2, L2>().bits;
    let (quo, rem) = a.checked_div_rem(b)?;
    Ok((Sig { bits: quo, rbits }, rem != BlockInt::ZERO))
  }

  /// The round-to-nearest-even decision for narrowing this significand to keep only the bits at
  /// and above `target_lsb`: inspects the bit below the target (round) and the OR of everything
  /// under it (sticky).
  pub fn rounding_direction(&self, target_lsb: u32) -> bool {
    if target_lsb == 0 || target_lsb > N {
      // Past the width the round bit (bit `target_lsb - 1`) lies above every stored bit and is
      // zero, so the decision is always "down"; no need to scan the sticky range.
      return false
    }
    let odd = self.bits.get_bit(target_lsb);
    let round = self.bits.get_bit(target_lsb - 1);
    let mut sticky = false;
    for i in 0..target_lsb.saturating_sub(1) {
      sticky |= self.bits.get_bit(i);
    }
    round_up(odd, round, sticky)
  }

  /// Narrow: drop the bits below `target_lsb` and round to nearest, ties to even. Returns the
  /// kept bits (shifted down) and whether the result was rounded up.
  pub fn round_to(self, target_lsb: u32) -> (BlockInt<N, L, false>, bool) {
    let up = self.rounding_direction(target_lsb);
    let mut bits = self.bits.shr(target_lsb);
    if up {
      bits += BlockInt::ONE;
    }
    (bits, up)
  }
}
