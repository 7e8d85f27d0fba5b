use super::*;

use crate::block::arith::carry_add;
use crate::underlying::Double;

impl<
  const N: u32,
  const ES: u32,
  const SIZE: usize,
> Quire<N, ES, SIZE> {
  /// The core algorithm of the quire: add `value × 2^(shift − WIDTH)` to the accumulator. In
  /// other words, splice `value` into the fixed-point representation with its lsb `shift` places
  /// from the right, sign-extended to the full width:
  ///
  /// ```text
  /// self  = [self[0], self[1], self[2], self[3], self[4], self[5], self[6], self[7]]
  /// value =      …lo, mid, hi…                 <<  shift
  /// add   = [0      , 0      , lo     , mid    , hi     , sign   , sign   , sign   ]
  /// ```
  ///
  /// A 128-bit addend shifted by `shift % 64` spans at most three limbs; above them there is
  /// only sign extension. Every valid posit sum or product fits below the quire's top bit (see
  /// [`Self::MIN_SIZE`]), so bits pushed past the top are sign bits and carry no information.
  ///
  /// If the sum no longer fits, the quire saturates to [`Self::NAR`]: the readout then reports
  /// the overflow as NaR.
  fn accumulate_wide(&mut self, value: i128, shift: u32) {
    debug_assert!(shift < Self::BITS);
    let negative = value < 0;
    let sign_ext = if negative {u64::MAX} else {0};

    // Splay the addend over three limbs, pre-shifted by the sub-limb part of `shift`.
    let s = shift % 64;
    let v0 = value as u64;
    let v1 = (value >> 64) as u64;
    let limbs = if s == 0 {
      [v0, v1, sign_ext]
    } else {
      [v0 << s, (v1 << s) | (v0 >> (64 - s)), (sign_ext << s) | (v1 >> (64 - s))]
    };

    let offset = (shift / 64) as usize;
    let quire = self.as_u64_array_mut();
    let len = quire.len();
    let was_negative = (quire[len - 1] as i64) < 0;

    let mut carry = false;
    for i in offset .. len {
      let addend = if i - offset < 3 {limbs[i - offset]} else {sign_ext};
      let (sum, c) = carry_add(quire[i], addend, carry);
      quire[i] = sum;
      carry = c;
    }

    // A two's complement sum overflows exactly when both operands have one sign and the result
    // has the other. The quire has no second error sentinel, so an overflow saturates to NaR.
    let is_negative = (quire[len - 1] as i64) < 0;
    if was_negative == negative && is_negative != was_negative {
      *self = Self::NAR
    }
  }

  /// Add a decoded posit to the accumulator, exactly.
  ///
  /// The decoded value is `frac × 2^(exp − FRAC_WIDTH)`, and "1.0" sits `WIDTH` places from the
  /// right of the quire, so the `frac` lands with its lsb `WIDTH − FRAC_WIDTH + exp` places up.
  pub(crate) fn accumulate_decoded<Int: crate::Int>(&mut self, x: Decoded<N, ES, Int>) {
    const { assert!(Int::BITS <= 64, "Quire operations are currently not supported for N > 64") };
    debug_assert!(x.exp.abs() <= Posit::<N, ES, Int>::MAX_EXP + Int::ONE);

    let value: i128 = x.frac.into();
    let exp: i128 = x.exp.into();
    let shift = Self::WIDTH as i128 - Decoded::<N, ES, Int>::FRAC_WIDTH as i128 + exp;
    if shift >= 0 {
      self.accumulate_wide(value, shift as u32)
    } else {
      // `Int` is wide relative to `N` and `ES`: the lowest `frac` bits of any posit this small
      // are zero, so pre-shifting them out loses nothing.
      debug_assert_eq!(x.frac.mask_lsb((-shift) as u32), Int::ZERO);
      self.accumulate_wide(value >> ((-shift) as u32), 0)
    }
  }

  /// Add the product of two decoded posits to the accumulator, exactly.
  ///
  /// The `frac`s are multiplied in double width, so no bit of the product is ever dropped: the
  /// quire is wide enough for the product of any two posits by construction
  /// ([`Self::MIN_SIZE`]).
  pub(crate) fn accumulate_product<Int: crate::Int>(
    &mut self,
    x: Decoded<N, ES, Int>,
    y: Decoded<N, ES, Int>,
  ) {
    const { assert!(Int::BITS <= 64, "Quire operations are currently not supported for N > 64") };

    // A double-width `Int` always fits in an i128: reassemble the product from its halves.
    let (hi, lo) = x.frac.doubling_mul(y.frac).components_hi_lo();
    let (hi, lo): (i128, i128) = (hi.into(), lo.into());
    let product = (hi << Int::BITS) | (lo & ((1_i128 << Int::BITS) - 1));

    // The product's radix point is `2 × FRAC_WIDTH` places from its right.
    let exp: i128 = Into::<i128>::into(x.exp) + Into::<i128>::into(y.exp);
    let shift = Self::WIDTH as i128 - 2 * Decoded::<N, ES, Int>::FRAC_WIDTH as i128 + exp;
    if shift >= 0 {
      self.accumulate_wide(product, shift as u32)
    } else {
      // As in `accumulate_decoded`: every posit product is a multiple of 2^-WIDTH, so the bits
      // shifted out are zero.
      debug_assert_eq!(product & ((1_i128 << ((-shift) as u32)) - 1), 0);
      self.accumulate_wide(product >> ((-shift) as u32), 0)
    }
  }
}
