use super::*;

/// `a + b + carry`, returning the low word and the outgoing carry.
#[inline]
pub(crate) fn carry_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
  let (sum, c1) = a.overflowing_add(b);
  let (sum, c2) = sum.overflowing_add(carry as u64);
  (sum, c1 | c2)
}

/// `a - b - borrow`, returning the low word and the outgoing borrow.
#[inline]
pub(crate) fn borrow_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
  let (diff, b1) = a.overflowing_sub(b);
  let (diff, b2) = diff.overflowing_sub(borrow as u64);
  (diff, b1 | b2)
}

impl<const N: u32, const L: usize, const SIGNED: bool> BlockInt<N, L, SIGNED> {
  /// Addition mod 2^N.
  pub fn wrapping_add(self, other: Self) -> Self {
    let mut limbs = [0; L];
    let mut carry = false;
    for i in 0..L {
      (limbs[i], carry) = carry_add(self.limbs[i], other.limbs[i], carry);
    }
    Self { limbs }.masked()
  }

  /// Subtraction mod 2^N.
  pub fn wrapping_sub(self, other: Self) -> Self {
    let mut limbs = [0; L];
    let mut borrow = false;
    for i in 0..L {
      (limbs[i], borrow) = borrow_sub(self.limbs[i], other.limbs[i], borrow);
    }
    Self { limbs }.masked()
  }

  /// Two's complement negation mod 2^N (so `MIN.wrapping_neg() == MIN` when signed).
  #[inline]
  pub fn wrapping_neg(self) -> Self {
    Self::ZERO.wrapping_sub(self)
  }

  /// Schoolbook multiplication, truncated mod 2^N. The same limb product works for both
  /// signednesses: a two's complement product agrees with the unsigned product modulo 2^N.
  pub fn wrapping_mul(self, other: Self) -> Self {
    let mut limbs = [0u64; L];
    for i in 0..L {
      let mut carry = 0u64;
      for j in 0..L - i {
        let t = limbs[i + j] as u128
          + self.limbs[i] as u128 * other.limbs[j] as u128
          + carry as u128;
        limbs[i + j] = t as u64;
        carry = (t >> 64) as u64;
      }
    }
    Self { limbs }.masked()
  }

  /// Left shift; shifts of `N` or more yield zero.
  pub fn shl(self, n: u32) -> Self {
    if n >= N {
      return Self::ZERO
    }
    let word = (n / 64) as usize;
    let bit = n % 64;
    let mut limbs = [0; L];
    for i in (word..L).rev() {
      let mut v = self.limbs[i - word] << bit;
      if bit != 0 && i - word > 0 {
        v |= self.limbs[i - word - 1] >> (64 - bit);
      }
      limbs[i] = v;
    }
    Self { limbs }.masked()
  }

  /// Right shift: sign-extending from bit `N − 1` if `SIGNED`, zero-filling otherwise. Shifts of
  /// `N` or more yield 0 (or −1 for negative values).
  pub fn shr(self, n: u32) -> Self {
    let fill = if self.is_negative() { u64::MAX } else { 0 };
    if n >= N {
      return Self { limbs: [fill; L] }.masked()
    }
    // Extend the sign through the junk bits so the limb-level shift fills correctly.
    let mut src = self.limbs;
    if fill != 0 {
      src[L - 1] |= !Self::TOP_MASK;
    }
    let word = (n / 64) as usize;
    let bit = n % 64;
    let mut limbs = [fill; L];
    for i in 0..L - word {
      let mut v = src[i + word] >> bit;
      if bit != 0 {
        let hi = if i + word + 1 < L { src[i + word + 1] } else { fill };
        v |= hi << (64 - bit);
      }
      limbs[i] = v;
    }
    Self { limbs }.masked()
  }
}

macro_rules! impl_binop {
  ($trait:ident, $trait_assign:ident, $name:ident, $name_assign:ident, $imp:ident) => {
    impl<const N: u32, const L: usize, const SIGNED: bool>
    core::ops::$trait for BlockInt<N, L, SIGNED> {
      type Output = Self;

      #[inline]
      fn $name(self, rhs: Self) -> Self {
        self.$imp(rhs)
      }
    }

    impl<const N: u32, const L: usize, const SIGNED: bool>
    core::ops::$trait_assign for BlockInt<N, L, SIGNED> {
      #[inline]
      fn $name_assign(&mut self, rhs: Self) {
        *self = self.$imp(rhs)
      }
    }
  }
}

impl_binop!{Add, AddAssign, add, add_assign, wrapping_add}
impl_binop!{Sub, SubAssign, sub, sub_assign, wrapping_sub}
impl_binop!{Mul, MulAssign, mul, mul_assign, wrapping_mul}

impl<const N: u32, const L: usize, const SIGNED: bool>
core::ops::Neg for BlockInt<N, L, SIGNED> {
  type Output = Self;

  #[inline]
  fn neg(self) -> Self {
    self.wrapping_neg()
  }
}

impl<const N: u32, const L: usize, const SIGNED: bool>
core::ops::Not for BlockInt<N, L, SIGNED> {
  type Output = Self;

  fn not(self) -> Self {
    let mut limbs = self.limbs;
    for limb in &mut limbs {
      *limb = !*limb;
    }
    Self { limbs }.masked()
  }
}

macro_rules! impl_bitop {
  ($trait:ident, $name:ident, $op:tt) => {
    impl<const N: u32, const L: usize, const SIGNED: bool>
    core::ops::$trait for BlockInt<N, L, SIGNED> {
      type Output = Self;

      fn $name(self, rhs: Self) -> Self {
        let mut limbs = self.limbs;
        for i in 0..L {
          limbs[i] $op rhs.limbs[i];
        }
        Self { limbs }
      }
    }
  }
}

impl_bitop!{BitAnd, bitand, &=}
impl_bitop!{BitOr, bitor, |=}
impl_bitop!{BitXor, bitxor, ^=}

impl<const N: u32, const L: usize, const SIGNED: bool>
core::ops::Shl<u32> for BlockInt<N, L, SIGNED> {
  type Output = Self;

  #[inline]
  fn shl(self, n: u32) -> Self {
    self.shl(n)
  }
}

impl<const N: u32, const L: usize, const SIGNED: bool>
core::ops::Shr<u32> for BlockInt<N, L, SIGNED> {
  type Output = Self;

  #[inline]
  fn shr(self, n: u32) -> Self {
    self.shr(n)
  }
}
