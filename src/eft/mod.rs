//! Error-free transforms over native `f64`: operations that return both the rounded result and
//! the *exact* rounding error, as a pair of floats.
//!
//! These are the classic building blocks of compensated arithmetic (Knuth's two-sum, Dekker's
//! split product, Shewchuk's expansions): assuming round-to-nearest host arithmetic and no
//! overflow, each transform satisfies an exact identity like `a + b == s + r` where `s` is the
//! rounded result and `r` its error. Everything here is `core`-only; in particular the product
//! splitting does not rely on an FMA instruction.
//!
//! Two consumers are provided: [`Expansion`], a fixed-capacity multi-component exact sum, and
//! [`Dd`], a (value, error) double-double pair with the usual operators.

mod dd;
mod expansion;

pub use dd::Dd;
pub use expansion::Expansion;

/// `|a| ≥ |b|`, without `std`. Comparing the payload bits works because finite floats of one
/// sign order like their bit patterns.
#[inline]
pub(crate) fn magnitude_at_least(a: f64, b: f64) -> bool {
  (a.to_bits() & (u64::MAX >> 1)) >= (b.to_bits() & (u64::MAX >> 1))
}

/// Knuth's two-sum: `(s, r)` with `s = fl(a + b)` and `a + b == s + r` exactly, for any order
/// of magnitudes. 6 flops, branch-free.
#[inline]
pub fn two_sum(a: f64, b: f64) -> (f64, f64) {
  let s = a + b;
  let a_part = s - b;
  let b_part = s - a_part;
  let da = a - a_part;
  let db = b - b_part;
  (s, da + db)
}

/// Dekker's two-sum: as [`two_sum`] in 3 flops, valid only when `|a| >= |b|`.
#[inline]
pub fn fast_two_sum(a: f64, b: f64) -> (f64, f64) {
  debug_assert!(magnitude_at_least(a, b), "fast_two_sum({a:e}, {b:e}) requires |a| >= |b|");
  let s = a + b;
  (s, b - (s - a))
}

/// The Veltkamp splitting constant `2^27 + 1`: multiplying by it splits a 53-bit significand
/// into two non-overlapping 26-bit halves.
const SPLITTER: f64 = 134217729.0;

/// Split `a` into `(hi, lo)` with `a == hi + lo` exactly, each half fitting in 26 significand
/// bits so products of halves are exact.
#[inline]
fn split(a: f64) -> (f64, f64) {
  let c = SPLITTER * a;
  let hi = c - (c - a);
  (hi, a - hi)
}

/// Dekker's two-product: `(p, r)` with `p = fl(a × b)` and `a × b == p + r` exactly.
///
/// Exact provided neither the product nor the intermediate splits overflow or land in the
/// subnormal range. 17 flops, no FMA.
#[inline]
pub fn two_prod(a: f64, b: f64) -> (f64, f64) {
  let p = a * b;
  let (ah, al) = split(a);
  let (bh, bl) = split(b);
  let r = ((ah * bh - p) + ah * bl + al * bh) + al * bl;
  (p, r)
}
