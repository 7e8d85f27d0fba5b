use super::*;

impl<
  const N: u32,
  const ES: u32,
  const SIZE: usize,
> Quire<N, ES, SIZE> {
  /// The quire size in bits.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(q16::BITS, 256);
  /// ```
  pub const BITS: u32 = Self::SIZE as u32 * 8;

  /// The quire size in bytes.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(q16::SIZE, 32);
  /// ```
  pub const SIZE: usize = {
    assert!(SIZE >= Self::MIN_SIZE, "This quire type has fewer than the minimum number of bytes");
    SIZE
  };

  /// Construct a quire from its raw bit representation, as a byte array in little-endian order.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// let quire = q8::from_le_bytes([0,0,0,0,0,0, 1,0,0,0,0,0, 0,0,0,0]);
  /// assert_eq!(p8::round_from(&quire), p8::ONE);
  /// ```
  pub const fn from_le_bytes(bytes: [u8; SIZE]) -> Self {
    Self(bytes)
  }

  /// Construct a quire from its raw bit representation, as a byte array in big-endian order.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// let quire = q8::from_be_bytes([0,0,0,0, 0,0,0,0,0,1, 0,0,0,0,0,0]);
  /// assert_eq!(p8::round_from(&quire), p8::ONE);
  /// ```
  pub const fn from_be_bytes(mut bytes: [u8; SIZE]) -> Self {
    bytes.as_mut_slice().reverse();
    Self::from_le_bytes(bytes)
  }

  /// The quire size in u64s (= [`BITS`](Self::BITS) / 64).
  pub(crate) const LEN_U64: usize = Self::BITS as usize / 64;

  /// Access the storage as a slice of `u64` limbs, least significant first.
  ///
  /// Limitation: even though the length is known at compile time, we cannot return an
  /// `&[u64; LEN_U64]` due to limitations in the Rust type system; the compiler has to fold the
  /// slice length on its own.
  #[inline(always)]
  pub(crate) const fn as_u64_array(&self) -> &[u64] {
    const { assert!(SIZE % 8 == 0, "Quire SIZE must be a multiple of 64 bits (8 bytes)"); }
    const { assert!(cfg!(target_endian = "little"), "Big-endian targets are not currently supported") }
    let ptr = self.0.as_ptr() as *const u64;
    // SAFETY: ptr and len form a valid slice; the size and alignment is correct, and any bit
    // pattern is a valid u64 value.
    unsafe { core::slice::from_raw_parts(ptr, Self::LEN_U64) }
  }

  #[inline(always)]
  pub(crate) const fn as_u64_array_mut(&mut self) -> &mut [u64] {
    const { assert!(SIZE % 8 == 0, "Quire SIZE must be a multiple of 64 bits (8 bytes)"); }
    const { assert!(cfg!(target_endian = "little"), "Big-endian targets are not currently supported") }
    let ptr = self.0.as_mut_ptr() as *mut u64;
    // SAFETY: ptr and len form a valid slice; the size and alignment is correct, and any bit
    // pattern is a valid u64 value.
    unsafe { core::slice::from_raw_parts_mut(ptr, Self::LEN_U64) }
  }

  /// Auxiliary const: the maximum (positive) exponent of a `Posit<N, ES, Int>`. The size of the
  /// quire is directly related to this (see [`Self::MIN_SIZE`] and [`Self::WIDTH`] below).
  const MAX_EXP: u32 = {
    assert!(ES < 20, "Cannot use the quire with very high ES (≥ 20)");
    let max_regime = N - 2;
    max_regime << ES
  };

  /// The minimum [`SIZE`](Self::SIZE) of a quire for `Posit<N, ES, Int>`, in bytes.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(q16::MIN_SIZE, 29);
  /// ```
  pub const MIN_SIZE: usize = {
    // At worst we must represent [Posit::MAX]² + [Posit::MIN]² as a fixed-point number, which
    // takes 2×2×max_exp bits, plus 1 sign bit.
    let min_size_bits = 4 * Self::MAX_EXP + 1;
    min_size_bits.div_ceil(8) as usize
  };

  /// The minimum number of operations on the quire that can lead to overflow is
  /// 2 <sup>[`PROD_LIMIT`](Self::PROD_LIMIT)</sup>; any number of [`Self::add_prod`] calls
  /// smaller than that is guaranteed not to overflow.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(q32::PROD_LIMIT, 31);  // Can do at least 2^31 - 1 products without overflow
  /// ```
  pub const PROD_LIMIT: u32 = {
    // The biggest possible product (Posit::MAX × Posit::MAX) takes `4 × MAX_EXP` bits. It can be
    // accumulated `2^M` times before overflowing, where `M` is the number of spare bits above
    // that in this quire.
    let min_size_bits = 4 * Self::MAX_EXP + 1;
    Self::BITS as u32 - min_size_bits
  };

  /// The minimum number of additions of posits that can lead to overflow is
  /// 2 <sup>[`SUM_LIMIT`](Self::SUM_LIMIT)</sup>; any number of `+=` or `-=` operations smaller
  /// than that is guaranteed not to overflow.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert_eq!(q32::SUM_LIMIT, 151);  // Can sum at least 2^151 - 1 terms without overflow
  /// ```
  pub const SUM_LIMIT: u32 = {
    // The biggest possible posit value (Posit::MAX) takes `3 × MAX_EXP` bits above the quire's
    // lsb. It can be accumulated `2^M` times before overflowing, where `M` is the number of
    // spare bits above that in this quire.
    let min_size_bits = 3 * Self::MAX_EXP + 1;
    Self::BITS as u32 - min_size_bits
  };

  /// The position of the fixed point, that is: "1.0" is represented in the quire as `1 << WIDTH`.
  pub(crate) const WIDTH: u32 = {
    let _ = Self::SIZE;
    2 * Self::MAX_EXP
  };

  /// A quire that represents the posit number 0.
  pub const ZERO: Self = Self([0; SIZE]);

  /// A quire that represents the posit value `NaR`.
  pub const NAR: Self = {
    let mut nar = Self::ZERO;
    nar.0[Self::SIZE - 1] = i8::MIN as u8;
    nar
  };

  /// Checks whether `self` represents a NaR value.
  ///
  /// # Example
  ///
  /// ```
  /// # use soft_unum::*;
  /// assert!(q32::NAR.is_nar());
  /// ```
  pub const fn is_nar(&self) -> bool {
    let _ = Self::NAR;
    // This is more optimised than it looks. A non-NaR quire, the common case, almost always
    // starts with `0b00…001…` (positive) or `0b11…110…` (negative) and returns right away on
    // the first compare: the only way it can start with `0b1000…` and not be NaR is by being
    // *exceedingly* close to overflowing on the negative side. Only a NaR quire, or that rare
    // near-overflow case, scans the remaining limbs.
    let quire: &[u64] = self.as_u64_array();
    if quire[quire.len() - 1] != i64::MIN as u64 { return false }
    // Written in this awkward way because it's a `const fn`...
    let mut i = 0;
    while i < quire.len() - 1 {
      if quire[i] != 0 { return false }
      i += 1
    }
    true
  }
}


mod tests_compile_fail {
  /// ```compile_fail
  /// use soft_unum::Quire;
  /// let mut q: Quire<8, 2, /*16*/ 8> = Quire::ZERO;
  /// q += soft_unum::p8::ONE;
  /// ```
  #[allow(dead_code)]
  fn quire_size_too_small_8() {}

  /// ```compile_fail
  /// use soft_unum::Quire;
  /// let mut q: Quire<16, 2, /*32*/ 24> = Quire::ZERO;
  /// q += soft_unum::p16::ONE;
  /// ```
  #[allow(dead_code)]
  fn quire_size_too_small_16() {}

  /// ```compile_fail
  /// use soft_unum::Quire;
  /// let mut q: Quire<32, 2, /*64*/ 56> = Quire::ZERO;
  /// q += soft_unum::p32::ONE;
  /// ```
  #[allow(dead_code)]
  fn quire_size_too_small_32() {}

  /// ```compile_fail
  /// use soft_unum::Quire;
  /// let mut q: Quire<64, 2, /*128*/ 120> = Quire::ZERO;
  /// q += soft_unum::p64::ONE;
  /// ```
  #[allow(dead_code)]
  fn quire_size_too_small_64() {}
}
