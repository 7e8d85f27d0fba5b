//! A software posit arithmetic, generic over width and exponent size.
//!
//! The layout of this module follows the life of a posit: raw bits ([`basics`], [`consts`]) are
//! unpacked into a fraction/exponent pair ([`decode`]), arithmetic happens on that pair
//! ([`ops`], [`sqrt`], [`round_int`]), and the result is packed back with a single round
//! ([`encode`]). Exact multi-term sums bypass the per-operation round entirely via the
//! [`quire`] accumulator.
//!
//! Notation used in the comments:
//!
//!   - **Leftmost bits/msb**: most-significant bits.
//!   - **Rightmost bits/lsb**: least-significant bits.
//!   - **Bit 0, bit 1, .. bit N-1**: numbered least significant to most significant, starts at 0.

/// A posit number with `N` bits and `ES` exponent bits, stored sign-extended in the machine
/// integer `Int`.
///
/// ```
/// # use soft_unum::Posit;
/// type Foo = Posit::<32, 2, i32>;  // A 32-bit posit with 2-bit exponent field, in an i32
/// type Bar = Posit::<6, 1, i8>;  // A 6-bit posit with 1-bit exponent field, in an i8
/// ```
///
/// The bit pattern is `sign | regime | exponent | fraction`, where the regime is a
/// variable-length run-length code. Two patterns are special: all zeros is [zero](Self::ZERO)
/// and `0b10…0` is [NaR](Self::NAR) ("not a real", the single error sentinel; posits have no
/// infinities and no subnormals). Every other pattern is a *regular* posit.
///
/// The two's complement integer order of the sign-extended bit patterns is exactly the numeric
/// order of the values they encode, so comparison is plain integer comparison (with NaR below
/// every real number).
pub struct Posit<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> (
  /// Invariant: sign-extended, i.e. if `Int` is wider than `N` bits, the bits above bit `N-1`
  /// all equal bit `N-1`.
  pub(crate) Int
);

/// A regular (non-zero, non-NaR) posit, unpacked into a fraction and an exponent: the value is
/// `frac × 2^(exp - FRAC_WIDTH)`, both fields two's complement.
///
/// `frac` holds the significand with the radix point [`FRAC_WIDTH`](Self::FRAC_WIDTH) `=
/// Int::BITS - 2` places from the right, so its two top bits are the "hidden" bits:
///
///   - a positive value has `frac = 0b01f…f`, i.e. `+1.ff…` in `[1, 2)`;
///   - a negative value has `frac = 0b10f…f`, i.e. `-2 + 0.ff…` in `(-2, -1]`.
///
/// Note the asymmetry: this is *not* sign-magnitude. A negative value keeps its fraction bits in
/// two's complement form and sits one octave lower (e.g. `-1` is `frac = 0b10_0…0` with
/// `exp = -1`, not `frac = -1.0` with `exp = 0`). This convention is what lets decoding and
/// encoding stay branchless over the sign.
///
/// `exp` merges the regime and exponent fields: `exp = regime × 2^ES + exponent`.
pub(crate) struct Decoded<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> {
  pub frac: Int,
  pub exp: Int,
}

/// Widths, field constants, raw bit conversions.
mod basics;

/// Special and extremal values.
mod consts;

/// Bits to [`Decoded`]: regime/exponent/fraction extraction.
mod decode;
pub(crate) use decode::Special;

/// [`Decoded`] to bits, with a single correct round.
mod encode;

/// The standard library traits, written out by hand.
mod traits;

/// `Debug`, split into bit fields.
mod fmt;

/// Negation, absolute value, successor and predecessor.
mod unary;

/// `+ - * /`.
mod ops;

/// Rounding to integral values.
mod round_int;

/// Square root.
mod sqrt;

/// Conversions to and from native ints and floats.
pub(crate) mod convert;

/// The quire: an exact wide accumulator for posit sums and dot products.
pub(crate) mod quire;

/// Exact conversion to `malachite` rationals, the test oracle.
#[cfg(test)]
pub(crate) mod rational;


impl<const N: u32, const ES: u32, Int: crate::Int> Clone for Decoded<N, ES, Int> {
  #[inline]
  fn clone(&self) -> Self {
    *self
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int> Copy for Decoded<N, ES, Int> {}

impl<const N: u32, const ES: u32, Int: crate::Int> PartialEq for Decoded<N, ES, Int> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.frac == other.frac && self.exp == other.exp
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int> Eq for Decoded<N, ES, Int> {}
