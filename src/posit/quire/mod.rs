use super::*;

/// A *quire*: a fixed-point accumulator, `SIZE` bytes wide, in which sums and dot products of
/// `Posit<N, ES, _>` values are **exact**. Only the final readout back to a posit rounds, which
/// is what makes long cancellation-prone sums (linear solvers, neural network layers) come out
/// correctly rounded instead of drifting one ulp per operation.
///
/// `SIZE` is bounded from below by [`MIN_SIZE`](Self::MIN_SIZE), the width that holds the
/// product of any two posits (anything smaller is a compile-time error), and must be a multiple
/// of 8. Spare bytes above the minimum buy headroom: each spare bit doubles the number of terms
/// that can be accumulated before overflow (see [`SUM_LIMIT`](Self::SUM_LIMIT) and
/// [`PROD_LIMIT`](Self::PROD_LIMIT)). The standard sizes carry ≈30 spare bits, good for over a
/// billion fused products. An accumulation that overflows anyway saturates the quire to
/// [NaR](Self::NAR).
///
/// # Examples
///
/// ```
/// # use soft_unum::{p16, q16, RoundFrom};
/// let mut q = q16::ZERO;
/// q += p16::round_from(0.25);
/// q += p16::round_from(1024);
/// q -= p16::round_from(1024);
/// // In 16-bit arithmetic the 0.25 would have been absorbed by the 1024; the quire keeps it.
/// assert_eq!(p16::round_from(&q), p16::round_from(0.25));
/// ```
//
// Stored as a byte array in little-endian order, aligned to 8, so that the carry loop in
// `accumulate` can walk it as u64 limbs starting from the least significant end.
#[repr(align(8))]
#[derive(Clone, Copy)]
pub struct Quire<
  const N: u32,
  const ES: u32,
  const SIZE: usize,
> (
  /// Invariant: a fixed-point two's complement number with the unit bit
  /// [`WIDTH`](Self::WIDTH) places from the bottom, or the NaR pattern (top byte `0x80`, rest
  /// zero).
  pub(crate) [u8; SIZE]
);

/// Widths, field constants, raw byte conversions.
mod basics;

/// The carry-propagating core: splicing a shifted addend into the accumulator.
mod accumulate;

/// `+=`, `-=`, fused multiply-accumulate, fused dot product.
mod ops;

/// Posit to quire (exact), and quire to posit (the single rounding step).
mod convert;

impl<const N: u32, const ES: u32, const SIZE: usize> core::fmt::Debug for Quire<N, ES, SIZE> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "Quire<{N}, {ES}>(0x")?;
    let quire = self.as_u64_array();
    for i in (0 .. quire.len()).rev() {
      write!(f, "{}{:016x}", if i == quire.len() - 1 {""} else {"_"}, quire[i])?;
    }
    write!(f, ")")
  }
}
