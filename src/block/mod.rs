//! Fixed-width integers stored as arrays of 64-bit limbs: the substrate for number formats whose
//! width exceeds (or simply isn't) a native machine width.

pub(crate) mod arith;
mod div;

/// A fixed-width integer of exactly `N` bits, stored as `L` little-endian 64-bit limbs, with a
/// two's-complement (`SIGNED = true`) or plain binary (`SIGNED = false`) interpretation.
///
/// `L` must be the *minimal* number of limbs that holds `N` bits; any bits above `N` in the top
/// limb are kept zero by every operation ("clean" representation), so two equal values always
/// have equal limbs. Signedness affects comparisons, right shifts, division, and conversions to
/// native integers; the bit-level representation is the same either way.
///
/// Add, sub, and mul truncate mod 2^N. Division is checked (see
/// [`checked_div_rem`](Self::checked_div_rem)).
///
/// ```compile_fail
/// // 2 limbs can hold at most 128 bits.
/// let x = soft_unum::BlockInt::<130, 2, false>::ZERO;
/// ```
///
/// ```compile_fail
/// // 96 bits need exactly 2 limbs, not 3.
/// let x = soft_unum::BlockInt::<96, 3, false>::ZERO;
/// ```
#[derive(Clone, Copy)]
#[derive(PartialEq, Eq, Hash)]
pub struct BlockInt<const N: u32, const L: usize, const SIGNED: bool> {
  limbs: [u64; L],
}

impl<const N: u32, const L: usize, const SIGNED: bool> BlockInt<N, L, SIGNED> {
  /// Total bit width.
  pub const BITS: u32 = {
    assert!(N > 0, "width must be non-zero");
    assert!(64 * L >= N as usize, "not enough limbs for the requested width");
    assert!(64 * (L - 1) < N as usize, "too many limbs for the requested width");
    N
  };

  /// Valid bits in the most significant limb.
  const TOP_MASK: u64 = {
    let rem = Self::BITS % 64;
    if rem == 0 { u64::MAX } else { (1u64 << rem) - 1 }
  };

  pub const ZERO: Self = {
    let _ = Self::BITS;
    Self { limbs: [0; L] }
  };

  pub const ONE: Self = {
    let _ = Self::BITS;
    let mut limbs = [0; L];
    limbs[0] = 1;
    Self { limbs }
  };

  /// Largest representable value: 2^N − 1 unsigned, 2^(N−1) − 1 signed.
  pub const MAX: Self = {
    let mut limbs = [u64::MAX; L];
    limbs[L - 1] = Self::TOP_MASK;
    if SIGNED {
      limbs[L - 1] ^= 1 << ((N - 1) % 64);
    }
    Self { limbs }
  };

  /// Smallest representable value: 0 unsigned, −2^(N−1) signed.
  pub const MIN: Self = {
    let mut limbs = [0; L];
    if SIGNED {
      limbs[L - 1] = 1 << ((N - 1) % 64);
    }
    Self { limbs }
  };

  /// Clear any bits above `N` in the top limb. Internal ops call this after every computation
  /// that can dirty them.
  #[inline]
  pub(crate) fn masked(mut self) -> Self {
    self.limbs[L - 1] &= Self::TOP_MASK;
    self
  }

  /// The raw limbs, least significant first.
  #[inline]
  pub fn limbs(&self) -> &[u64; L] {
    &self.limbs
  }

  /// Build a value directly from limbs; bits above `N` are masked off.
  #[inline]
  pub fn from_limbs(limbs: [u64; L]) -> Self {
    Self { limbs }.masked()
  }

  /// Set the low (up to) 64 bits from `pattern` and clear the rest. The only "wire format":
  /// interop, persistence, and test-case replay all go through here and [`to_bits`](Self::to_bits).
  #[inline]
  pub fn set_bits(&mut self, pattern: u64) {
    *self = Self::from_bits(pattern)
  }

  /// As [`set_bits`](Self::set_bits), as a constructor.
  #[inline]
  pub fn from_bits(pattern: u64) -> Self {
    let mut limbs = [0; L];
    limbs[0] = pattern;
    Self { limbs }.masked()
  }

  /// The low (up to) 64 bits of the representation.
  #[inline]
  pub fn to_bits(self) -> u64 {
    self.limbs[0] & if L == 1 { Self::TOP_MASK } else { u64::MAX }
  }

  /// Value of bit `i` (0 = least significant). Bits at or above `N` read as zero.
  #[inline]
  pub fn get_bit(self, i: u32) -> bool {
    if i >= N { return false }
    self.limbs[(i / 64) as usize] >> (i % 64) & 1 == 1
  }

  #[inline]
  pub(crate) fn set_bit(&mut self, i: u32) {
    debug_assert!(i < N);
    self.limbs[(i / 64) as usize] |= 1 << (i % 64);
  }

  /// The sign bit (bit `N − 1`). Meaningful for any signedness; only interpreted as a sign when
  /// `SIGNED`.
  #[inline]
  pub fn sign_bit(self) -> bool {
    self.limbs[L - 1] >> ((N - 1) % 64) & 1 == 1
  }

  /// Whether the value is negative under its own interpretation (always false if unsigned).
  #[inline]
  pub fn is_negative(self) -> bool {
    SIGNED && self.sign_bit()
  }

  /// Number of leading zero bits, counted within the `N`-bit width.
  pub fn leading_zeros(self) -> u32 {
    let junk = 64 * L as u32 - N;
    let mut zeros = 0;
    for i in (0..L).rev() {
      if self.limbs[i] != 0 {
        return zeros + self.limbs[i].leading_zeros() - junk
      }
      zeros += 64;
    }
    N
  }

  /// Construct from a native unsigned integer (truncated mod 2^N if it doesn't fit).
  #[inline]
  pub fn from_u64(x: u64) -> Self {
    Self::from_bits(x)
  }

  /// Construct from a native signed integer, sign-extended to `N` bits (truncated mod 2^N if it
  /// doesn't fit).
  pub fn from_i64(x: i64) -> Self {
    let fill = if x < 0 { u64::MAX } else { 0 };
    let mut limbs = [fill; L];
    limbs[0] = x as u64;
    Self { limbs }.masked()
  }

  /// Convert to a native signed integer, sign-extending from bit `N − 1` if `SIGNED`. Truncates
  /// if the value doesn't fit in 64 bits.
  pub fn to_i64(self) -> i64 {
    if SIGNED && self.sign_bit() && N < 64 {
      (self.limbs[0] | !Self::TOP_MASK) as i64
    } else {
      self.limbs[0] as i64
    }
  }

  /// Convert to a native unsigned integer (the raw low bits; negative signed values yield their
  /// two's-complement pattern). Truncates if the value doesn't fit in 64 bits.
  #[inline]
  pub fn to_u64(self) -> u64 {
    self.to_bits()
  }

  /// Compare the raw `N`-bit patterns as unsigned quantities, regardless of `SIGNED`.
  pub(crate) fn cmp_unsigned(&self, other: &Self) -> core::cmp::Ordering {
    for i in (0..L).rev() {
      match self.limbs[i].cmp(&other.limbs[i]) {
        core::cmp::Ordering::Equal => continue,
        ord => return ord,
      }
    }
    core::cmp::Ordering::Equal
  }
}

impl<const N: u32, const L: usize, const SIGNED: bool> Ord for BlockInt<N, L, SIGNED> {
  fn cmp(&self, other: &Self) -> core::cmp::Ordering {
    match (self.is_negative(), other.is_negative()) {
      (true, false) => core::cmp::Ordering::Less,
      (false, true) => core::cmp::Ordering::Greater,
      // Same sign: two's complement order agrees with the unsigned order of the masked limbs.
      _ => self.cmp_unsigned(other),
    }
  }
}

impl<const N: u32, const L: usize, const SIGNED: bool> PartialOrd for BlockInt<N, L, SIGNED> {
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl<const N: u32, const L: usize, const SIGNED: bool> Default for BlockInt<N, L, SIGNED> {
  #[inline]
  fn default() -> Self {
    Self::ZERO
  }
}

impl<const N: u32, const L: usize, const SIGNED: bool> core::fmt::Debug for BlockInt<N, L, SIGNED> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "BlockInt<{N}>(0x")?;
    let top_nibbles = (Self::TOP_MASK.count_ones() as usize).div_ceil(4);
    write!(f, "{:0w$x}", self.limbs[L - 1], w = top_nibbles)?;
    for i in (0..L - 1).rev() {
      write!(f, "_{:016x}", self.limbs[i])?;
    }
    write!(f, ")")
  }
}
