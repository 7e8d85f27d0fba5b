use super::{Int, Sealed};

/// Implementation of the width-independent parts of [`Sealed`].
macro_rules! impl_sealed {
  ($int:ty, $uint:ty, $nonzero:ident) => {
    const ZERO: Self = 0;
    const ONE: Self = 1;
    const MIN: Self = <$int>::MIN;
    const MAX: Self = <$int>::MAX;
    const BITS: u32 = <$int>::BITS;

    #[inline]
    fn as_u32(self) -> u32 {
      debug_assert!(u32::try_from(self).is_ok());
      self as u32
    }

    #[inline]
    fn of_u32(x: u32) -> Self {
      debug_assert!(Self::try_from(x).is_ok());
      x as $int
    }

    #[inline]
    fn is_positive(self) -> bool {
      self >= 0
    }

    #[inline]
    fn abs(self) -> Self {
      self.abs()
    }

    #[inline]
    fn lshr(self, n: u32) -> Self {
      ((self as $uint) >> n) as $int
    }

    #[inline]
    fn mask_lsb(self, n: u32) -> Self {
      let mask = (1 as $int << n).wrapping_sub(1);
      self & mask
    }

    #[inline]
    fn mask_msb(self, n: u32) -> Self {
      let mask = (1 as $int << (Self::BITS - n)).wrapping_sub(1);
      self & !mask
    }

    #[inline]
    fn get_lsb(self) -> bool {
      self & 1 == 1
    }

    fn leading_zeros(self) -> u32 {
      self.leading_zeros()
    }

    #[inline]
    unsafe fn leading_zeros_nonzero(self) -> u32 {
      unsafe { core::num::$nonzero::new_unchecked(self) }.leading_zeros()
    }

    #[inline]
    unsafe fn leading_run_minus_one(self) -> u32 {
      let y = self ^ (self << 1);
      let z = unsafe { core::num::$nonzero::new_unchecked(y) };
      z.leading_zeros()
    }

    #[inline]
    fn not_if_positive(self, control: Self) -> Self {
      // Slightly more ILP than `!self.not_if_negative(control)`
      let mask = control >> (Self::BITS - 1);
      !self ^ mask
    }

    #[inline]
    fn not_if_negative(self, control: Self) -> Self {
      let mask = control >> (Self::BITS - 1);
      self ^ mask
    }

    #[inline]
    fn wrapping_add(self, other: Self) -> Self { self.wrapping_add(other) }

    #[inline]
    fn wrapping_sub(self, other: Self) -> Self { self.wrapping_sub(other) }

    #[inline]
    fn wrapping_neg(self) -> Self { self.wrapping_neg() }

    #[inline]
    fn wrapping_abs(self) -> Self { self.wrapping_abs() }

    #[inline]
    fn overflowing_add(self, other: Self) -> (Self, bool) { self.overflowing_add(other) }

    #[inline]
    fn overflowing_add_shift(self, other: Self) -> (Self, bool) {
      let (mut result, carry) = self.overflowing_add(other);
      result >>= u32::from(carry);
      result ^= Self::from(carry) << (Self::BITS - 1);
      (result, carry)
    }
  }
}

/// Implementation of [`Int`], for the widths that have a primitive double-width counterpart.
macro_rules! impl_int {
  ($int:ty, $uint:ty, $double:ty) => {
    type Unsigned = $uint;
    type Double = $double;

    #[inline]
    fn as_unsigned(self) -> $uint { self as $uint }

    #[inline]
    fn of_unsigned(x: $uint) -> Self { x as $int }

    #[inline]
    fn doubling_mul(self, other: Self) -> Self::Double {
      self as $double * other as $double
    }

    unsafe fn shift_div_rem(self, other: Self, precision: u32) -> (Self, Self) {
      let a = (self as $double) << precision;
      let b = other as $double;
      let mut div = a / b;
      let rem = a % b;
      // PDP/C/Rust division rounds towards 0, not towards -∞. For positive numbers this is the
      // same. For negative numbers, we need to subtract 1 if the division is inexact.
      div -= ((div < 0) & (rem != 0)) as $double;
      (div as $int, rem as $int)
    }
  }
}

impl Sealed for i8 { impl_sealed!{i8, u8, NonZeroI8} }
impl Sealed for i16 { impl_sealed!{i16, u16, NonZeroI16} }
impl Sealed for i32 { impl_sealed!{i32, u32, NonZeroI32} }
impl Sealed for i64 { impl_sealed!{i64, u64, NonZeroI64} }
impl Sealed for i128 { impl_sealed!{i128, u128, NonZeroI128} }

impl Int for i8 { impl_int!{i8, u8, i16} }
impl Int for i16 { impl_int!{i16, u16, i32} }
impl Int for i32 { impl_int!{i32, u32, i64} }
impl Int for i64 { impl_int!{i64, u64, i128} }

#[cfg(test)]
#[allow(overflowing_literals)]
mod tests {
  use super::*;

  #[test]
  fn mask_lsb() {
    assert_eq!(0b01111110_i8.mask_lsb(3), 0b00000110_i8);
    assert_eq!(0xabcd_i16.mask_lsb(4), 0x000d_i16);
    assert_eq!(0xabcdabcd_i32.mask_lsb(4), 0x0000000d_i32);
    assert_eq!(0xdeadbeefdeadbeef_i64.mask_lsb(6), 0x2f_i64);
  }

  #[test]
  fn mask_msb() {
    assert_eq!(0b01111110_i8.mask_msb(3), 0b01100000_i8);
    assert_eq!(0xabcd_i16.mask_msb(4), 0xa000_i16);
    assert_eq!(0xabcdabcd_i32.mask_msb(4), 0xa0000000_i32);
    assert_eq!(0xdeadbeefdeadbeef_i64.mask_msb(12), 0xdea_i64 << 52);
  }

  #[test]
  fn leading_run_minus_one_zeroes() {
    unsafe {
      assert_eq!((0b00010101i8 as i8).leading_run_minus_one(), 2);
      assert_eq!((0b00010101i8 as i16).leading_run_minus_one(), 8 + 2);
      assert_eq!((0b00010101i8 as i32).leading_run_minus_one(), 24 + 2);
      assert_eq!((0b00010101i8 as i64).leading_run_minus_one(), 56 + 2);
    }
  }

  #[test]
  fn leading_run_minus_one_ones() {
    unsafe {
      assert_eq!((0b11111000i8 as i8).leading_run_minus_one(), 4);
      assert_eq!((0b11111000i8 as i16).leading_run_minus_one(), 8 + 4);
      assert_eq!((0b11111000i8 as i32).leading_run_minus_one(), 24 + 4);
      assert_eq!((0b11111000i8 as i64).leading_run_minus_one(), 56 + 4);
    }
  }

  #[test]
  fn not_if_negative() {
    assert_eq!((0b01110110i8 as i8).not_if_negative(1),  0b01110110i8 as i8);
    assert_eq!((0b01110110i8 as i8).not_if_negative(-1), 0b10001001i8 as i8);
    assert_eq!((0b01110110i8 as i16).not_if_negative(1),  0b01110110i8 as i16);
    assert_eq!((0b01110110i8 as i16).not_if_negative(-1), 0b10001001i8 as i16);
    assert_eq!((0b01110110i8 as i64).not_if_negative(1),  0b01110110i8 as i64);
    assert_eq!((0b01110110i8 as i64).not_if_negative(-1), 0b10001001i8 as i64);
  }

  #[test]
  fn not_if_positive() {
    assert_eq!((0b11100110i8 as i8).not_if_positive(1),  0b00011001i8 as i8);
    assert_eq!((0b11100110i8 as i8).not_if_positive(-1), 0b11100110i8 as i8);
    assert_eq!((0b11100110i8 as i32).not_if_positive(1),  0b00011001i8 as i32);
    assert_eq!((0b11100110i8 as i32).not_if_positive(-1), 0b11100110i8 as i32);
  }

  #[test]
  fn overflowing_add_shift() {
    assert_eq!(
      (0b01_000000i8).overflowing_add_shift(0b00_100000i8),
      (0b01_100000i8, false)
    );
    assert_eq!(
      (0b01_000000i8).overflowing_add_shift(0b01_000000i8),
      (0b01_000000i8, true)
    );
    assert_eq!(
      (0b10_000000i8).overflowing_add_shift(0b01_011000i8),
      (0b11_011000i8, false)
    );
    assert_eq!(
      (0b10_000000i8).overflowing_add_shift(0b10_011000i8),
      (0b10_001100i8, true)
    );
  }

  #[test]
  fn shift_div_rem() {
    unsafe {
      assert_eq!(100i32.shift_div_rem(7, 0), (14, 2));
      assert_eq!(100i32.shift_div_rem(7, 4), (228, 4));
      assert_eq!((-100i32).shift_div_rem(7, 0), (-15, -2));
      assert_eq!(1i32.shift_div_rem(3, 32), (0x5555_5555, 1));
    }
  }

  #[test]
  fn doubling_mul() {
    assert_eq!(0x4000_0000_i32.doubling_mul(0x4000_0000), 0x1000_0000_0000_0000_i64);
    assert_eq!((-3i8).doubling_mul(100), -300i16);
  }
}
