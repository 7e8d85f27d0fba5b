/// The failure kinds the checked arithmetic entry points can report.
///
/// Hot paths never construct these: posit operators are total and use [NaR](crate::Posit::NAR)
/// as their sentinel, exactly like IEEE NaN. The checked entry points
/// ([`BlockInt::checked_div_rem`](crate::BlockInt::checked_div_rem),
/// [`Quire::fused_dot`](crate::Quire::fused_dot), [`Sig::new`](crate::Sig::new)) return this
/// type so callers can distinguish *why* a computation failed.
#[derive(Debug)]
#[derive(Clone, Copy)]
#[derive(PartialEq, Eq, Hash)]
pub enum ArithmeticError {
  /// Integer or fixed-point division with a zero divisor.
  DivideByZero,
  /// A parameter combination that violates a type invariant, e.g. a radix point position that
  /// doesn't fit the significand width, or mismatched vector lengths in a dot product.
  InvalidConfiguration,
  /// A quire accumulation exceeded the accumulator's capacity.
  QuireOverflow,
}

impl core::fmt::Display for ArithmeticError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::DivideByZero => write!(f, "division by zero"),
      Self::InvalidConfiguration => write!(f, "invalid numeric type configuration"),
      Self::QuireOverflow => write!(f, "quire accumulator capacity exceeded"),
    }
  }
}

impl core::error::Error for ArithmeticError {}
