use super::*;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Posit<N, ES, Int> {
  /// The posit whose representation is the lexicographic successor of `self`'s.
  ///
  /// Unlike the arithmetic operations, `next` and `prior` do not map a [NaR](Posit::NAR) input
  /// to a NaR output: they walk the full circle of bit patterns.
  ///
  /// Standard: "**next**".
  #[inline]
  pub fn next(self) -> Self {
    Self::from_bits(self.0.wrapping_add(Int::ONE))
  }

  /// The posit whose representation is the lexicographic predecessor of `self`'s.
  ///
  /// Unlike the arithmetic operations, `next` and `prior` do not map a [NaR](Posit::NAR) input
  /// to a NaR output: they walk the full circle of bit patterns.
  ///
  /// Standard: "**prior**".
  #[inline]
  pub fn prior(self) -> Self {
    Self::from_bits(self.0.wrapping_sub(Int::ONE))
  }

  /// The absolute value of `self`. Exact (never rounds); NaR maps to NaR.
  ///
  /// Standard: "**abs**".
  #[inline]
  pub fn abs(self) -> Self {
    Posit::from_bits(self.0.wrapping_abs())
  }
}

// Negation is exact: the encoding is symmetric, so `-p` is just the two's complement of the
// pattern (which also maps NaR to NaR and 0 to 0).

impl<const N: u32, const ES: u32, Int: crate::Int>
core::ops::Neg for Posit<N, ES, Int> {
  type Output = Posit<N, ES, Int>;

  /// Standard: "**negate**".
  #[inline]
  fn neg(self) -> Self::Output {
    Posit::from_bits(self.0.wrapping_neg())
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
core::ops::Neg for &Posit<N, ES, Int> {
  type Output = Posit<N, ES, Int>;

  /// Standard: "**negate**".
  #[inline]
  fn neg(self) -> Self::Output {
    Posit::from_bits(self.0.wrapping_neg())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::rational::Rational;

  mod neg {
    use super::*;

    #[test]
    fn p8() {
      assert_eq!(-crate::p8::ZERO, crate::p8::ZERO);
      assert_eq!(-crate::p8::NAR, crate::p8::NAR);
      for p in crate::p8::cases_exhaustive() {
        assert_eq!(Rational::try_from(-p).unwrap(), -Rational::try_from(p).unwrap())
      }
    }

    #[test]
    fn posit_10_0() {
      assert_eq!(-Posit::<10, 0, i16>::ZERO, Posit::<10, 0, i16>::ZERO);
      assert_eq!(-Posit::<10, 0, i16>::NAR, Posit::<10, 0, i16>::NAR);
      for p in Posit::<10, 0, i16>::cases_exhaustive() {
        assert_eq!(Rational::try_from(-p).unwrap(), -Rational::try_from(p).unwrap())
      }
    }
  }

  mod abs {
    use super::*;

    #[test]
    fn p8() {
      use malachite::base::num::arithmetic::traits::Abs;
      assert_eq!(crate::p8::ZERO.abs(), crate::p8::ZERO);
      assert_eq!(crate::p8::NAR.abs(), crate::p8::NAR);
      for p in crate::p8::cases_exhaustive() {
        assert_eq!(Rational::try_from(p.abs()).unwrap(), Rational::try_from(p).unwrap().abs())
      }
    }

    #[test]
    fn posit_10_0() {
      use malachite::base::num::arithmetic::traits::Abs;
      assert_eq!(Posit::<10, 0, i16>::ZERO.abs(), Posit::<10, 0, i16>::ZERO);
      assert_eq!(Posit::<10, 0, i16>::NAR.abs(), Posit::<10, 0, i16>::NAR);
      for p in Posit::<10, 0, i16>::cases_exhaustive() {
        assert_eq!(Rational::try_from(p.abs()).unwrap(), Rational::try_from(p).unwrap().abs())
      }
    }
  }

  mod next_prior {
    use super::*;

    #[test]
    fn p8() {
      for p in crate::p8::cases_exhaustive() {
        assert_eq!(p.next().prior(), p);
        assert_eq!(p.prior().next(), p);
      }
      assert_eq!(crate::p8::MAX.next(), crate::p8::NAR);
      assert_eq!(crate::p8::NAR.next(), crate::p8::MIN);
      assert_eq!(crate::p8::ZERO.next(), crate::p8::MIN_POSITIVE);
      assert_eq!(crate::p8::ZERO.prior(), crate::p8::MAX_NEGATIVE);
    }
  }
}
