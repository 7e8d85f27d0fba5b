#![cfg_attr(not(test), no_std)]
//! Bit-exact numeric types in software: [posit arithmetic](https://posithub.org/docs/posit_standard-2.pdf)
//! with exact [quire](Quire) accumulation, fixed-width [block integers](BlockInt), normalised
//! [significands](Sig), and [error-free float transforms](eft).
//!
//! # Introduction
//!
//! Posits are an alternative floating point format proposed by John Gustafson in 2017, with the
//! first published standard in 2022. Compared to IEEE754 floats they trade the fixed field
//! layout for a run-length-coded *regime*, giving more precision near 1 and more dynamic range
//! at the extremes, a single error value (NaR) instead of NaNs and infinities, and a total
//! order that coincides with the integer order of the bit patterns.
//!
//! The following references are useful if you are not yet familiar with posits:
//!
//!   - [Posit standard](https://posithub.org/docs/posit_standard-2.pdf) (2022)
//!   - [Original extended paper](https://posithub.org/docs/Posits4.pdf) (2017)
//!   - [Book](https://doi.org/10.1201/9781003466024) (2024)
//!
//! Every rounding operation in this crate rounds to nearest, ties to even, and is verified
//! against an exact rational oracle. The core is `no_std`, allocates nothing, and has no
//! global state.
//!
//! # Usage
//!
//! ```
//! // Use standard posit types, or define your own.
//! # use soft_unum::Posit;
//! use soft_unum::{p8, p16, p32, p64};  // Standard: n bits, 2 exponent bits
//! type MyPosit = Posit<24, 3, i32>;  // Non-standard: 24 bits, 3 exponent bits
//!
//! // Create posits from ints, IEEE floats, constants, or a raw bit representation.
//! # use soft_unum::{RoundFrom, RoundInto};
//! let a = p32::round_from(2.71_f64);
//! let b = p32::round_from(42_i32);
//! let c = p32::from_bits(0x7f001337);
//! let d = p32::MIN_POSITIVE;
//!
//! // Perform basic arithmetic and comparisons with the usual operators.
//! assert!(p16::round_from(2.14_f32) + p16::ONE == 3.14_f32.round_into());
//! assert!(p16::MIN_POSITIVE < 1e-15_f32.round_into());
//!
//! // Sum long series exactly in a quire, rounding once at the end.
//! use soft_unum::q16;
//! let mut q = q16::ZERO;
//! for _ in 0 .. 1000 { q += p16::round_from(0.1) }
//! assert_eq!(p16::round_from(&q), p16::round_from(0.1) * 1000.round_into());
//!
//! // Convert posits back to ints, IEEE floats, or a raw bit representation.
//! assert_eq!(p8::ONE.to_bits(), 0b01000000)
//! ```

mod block;
mod error;
mod posit;
mod sig;
mod underlying;

pub mod eft;

pub use block::BlockInt;
pub use error::ArithmeticError;
pub use posit::Posit;
pub use posit::quire::Quire;
pub use sig::Sig;
pub use underlying::Int;

/// Standard-defined 8-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p8 = Posit<8, 2, i8>;

/// Standard-defined 16-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p16 = Posit<16, 2, i16>;

/// Standard-defined 32-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p32 = Posit<32, 2, i32>;

/// Standard-defined 64-bit posit (with 2-bit exponent).
#[allow(non_camel_case_types)]
pub type p64 = Posit<64, 2, i64>;

/// Standard-defined quire for [p8]: 128 bits.
#[allow(non_camel_case_types)]
pub type q8 = Quire<8, 2, 16>;

/// Standard-defined quire for [p16]: 256 bits.
#[allow(non_camel_case_types)]
pub type q16 = Quire<16, 2, 32>;

/// Standard-defined quire for [p32]: 512 bits.
#[allow(non_camel_case_types)]
pub type q32 = Quire<32, 2, 64>;

/// Standard-defined quire for [p64]: 1024 bits.
#[allow(non_camel_case_types)]
pub type q64 = Quire<64, 2, 128>;

pub use posit::convert::{RoundFrom, RoundInto};

/// How many cases each proptest runs; exhaustive tests don't look at this. Lowered in debug
/// builds so that `cargo test` stays usable without `--release`.
#[cfg(test)]
pub(crate) const PROPTEST_CASES: u32 = if cfg!(debug_assertions) {0x1_0000} else {0x10_0000};
