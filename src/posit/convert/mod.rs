use super::*;

/// Value-to-value conversion following the rules the [posit standard] prescribes for the types
/// involved, which may *round* the input (see below). It is the reciprocal of [`RoundInto`].
///
/// The interface is identical to the standard [`From`], but — unlike the
/// [convention for the `From` trait](core::convert::From#when-to-implement-from) — these
/// conversions are _not necessarily lossless_: the result is the nearest representable value of
/// the target type. For the exact meaning of each particular conversion, consult the
/// documentation of the specific `round_from` implementation.
///
/// The usage guidelines for [`From`] carry over: prefer implementing [`RoundFrom`] (which
/// provides [`RoundInto`] for free via a blanket impl), and prefer [`RoundInto`] in generic trait
/// bounds. `RoundFrom<T> for T` is the identity.
///
/// # Rounding
///
/// "Rounding" here always means the [rule in the posit standard]:
///
///   - a value larger in magnitude than the largest posit rounds to it (no overflow to NaR);
///   - a non-zero value smaller in magnitude than the smallest positive posit rounds to it (no
///     underflow to zero);
///   - otherwise, round to the nearest bit pattern, ties to the even bit pattern.
///
/// # Examples
///
/// Rounding from ints and floats:
/// ```
/// # use soft_unum::*;
/// assert!(p16::round_from(1) == p16::round_from(1.00000001));
/// assert!(p32::round_from(1) <  p32::round_from(1.00000001));
///
/// assert_eq!(p32::round_from(f64::NAN), p32::NAR);
/// ```
///
/// Rounding to ints and floats:
/// ```
/// # use soft_unum::*;
/// assert_eq!(f32::round_from(p16::MIN_POSITIVE), 1.3877788e-17);
/// assert_eq!(i64::round_from(p8::MAX), 1 << 24);
///
/// assert!(f64::round_from(p32::NAR).is_nan());
/// ```
///
/// [posit standard]: https://posithub.org/docs/posit_standard-2.pdf#section.6
/// [rule in the posit standard]: https://posithub.org/docs/posit_standard-2.pdf#section.4
pub trait RoundFrom<T> {
  /// Converts to this type from the input type, rounding if the value is not exactly
  /// representable (see [Rounding](RoundFrom#rounding)).
  ///
  /// If you are looking for the usual Rust-y conversions ([`From`] if exact, [`TryFrom`] if
  /// fallible), use those traits instead.
  #[must_use]
  fn round_from(value: T) -> Self;
}

/// Value-to-value conversion following the rules the [posit standard] prescribes for the types
/// involved, which may *round* the input. It is the reciprocal of [`RoundFrom`]; see that trait
/// for the details, in particular [the rounding rule](RoundFrom#rounding).
///
/// As with [`Into`], do not implement this directly: implement [`RoundFrom`] and the blanket
/// impl provides `RoundInto` in the other direction.
///
/// # Examples
///
/// ```
/// # use soft_unum::*;
/// assert_eq!(p16::ONE.next(), 1.0004883_f64.round_into());
/// assert_eq!(p32::NAR, f64::NAN.round_into());
///
/// assert_eq!(5.960464477539063e-8, p8::MIN_POSITIVE.round_into());
/// assert_eq!(1_i64 << 56, p16::MAX.round_into());
/// ```
///
/// [posit standard]: https://posithub.org/docs/posit_standard-2.pdf#section.6
pub trait RoundInto<T> {
  /// Converts this type into the (usually inferred) target type, rounding if the value is not
  /// exactly representable (see [Rounding](RoundFrom#rounding)).
  #[must_use]
  fn round_into(self) -> T;
}

impl<T> RoundFrom<T> for T {
  fn round_from(value: T) -> Self {
    value
  }
}

impl<T, U> RoundInto<U> for T where U: RoundFrom<T> {
  fn round_into(self) -> U {
    U::round_from(self)
  }
}

mod float;
mod int;
mod posit;
