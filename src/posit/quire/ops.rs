use super::*;

impl<
  const N: u32,
  const ES: u32,
  const SIZE: usize,
> Quire<N, ES, SIZE> {
  pub(crate) fn add<Int: crate::Int>(&mut self, posit: Posit<N, ES, Int>) {
    if posit == Posit::ZERO {
      // Nothing to accumulate.
    } else if posit == Posit::NAR || self.is_nar() {
      *self = Quire::NAR
    } else {
      // SAFETY: `posit` is not 0 or NaR
      let decoded = unsafe { posit.decode_regular() };
      self.accumulate_decoded(decoded)
    }
  }

  pub(crate) fn sub<Int: crate::Int>(&mut self, posit: Posit<N, ES, Int>) {
    self.add(-posit)
  }

  /// Add the product `a × b` to the quire, *exactly*: unlike `a * b`, no intermediate rounding
  /// takes place. If either factor is NaR, or the quire already is, the quire becomes NaR.
  ///
  /// Standard: "**qMulAdd**".
  ///
  /// # Examples
  ///
  /// ```
  /// # use soft_unum::{p16, q16, RoundFrom};
  /// let mut q = q16::ZERO;
  /// q.add_prod(p16::round_from(0.1), p16::round_from(10));
  /// // Exactly the product of the two (rounded) factors, not 1.0 on the nose.
  /// assert_ne!(p16::round_from(&q), p16::ONE);
  /// ```
  pub fn add_prod<Int: crate::Int>(&mut self, a: Posit<N, ES, Int>, b: Posit<N, ES, Int>) {
    if a == Posit::NAR || b == Posit::NAR || self.is_nar() {
      // Note the order: NaR × 0 is NaR, so this check comes before the zero check.
      *self = Quire::NAR
    } else if a == Posit::ZERO || b == Posit::ZERO {
      // Nothing to accumulate.
    } else {
      // SAFETY: neither factor is 0 or NaR
      let (a, b) = unsafe { (a.decode_regular(), b.decode_regular()) };
      self.accumulate_product(a, b)
    }
  }

  /// Subtract the product `a × b` from the quire, *exactly*. Negating a posit is exact, so this
  /// is [`add_prod`](Self::add_prod) with a negated factor.
  ///
  /// Standard: "**qMulSub**".
  pub fn sub_prod<Int: crate::Int>(&mut self, a: Posit<N, ES, Int>, b: Posit<N, ES, Int>) {
    self.add_prod(a, -b)
  }

  /// The dot product of `xs` and `ys`, accumulated exactly and rounded once at the end.
  ///
  /// A NaR among the inputs is not an error: it propagates to a NaR result, the same as in
  /// ordinary posit arithmetic. The error cases are:
  ///
  ///   - [`InvalidConfiguration`](crate::ArithmeticError::InvalidConfiguration) if the vectors
  ///     differ in length;
  ///   - [`QuireOverflow`](crate::ArithmeticError::QuireOverflow) if the accumulation ran out of
  ///     headroom (impossible under 2 <sup>[`PROD_LIMIT`](Self::PROD_LIMIT)</sup> terms).
  ///
  /// Standard: "**fdp**".
  ///
  /// # Examples
  ///
  /// ```
  /// # use soft_unum::{p16, q16, RoundInto};
  /// let xs: [p16; 3] = [2.round_into(), 1024.round_into(), (-1024).round_into()];
  /// let ys: [p16; 3] = [1.round_into(), 1024.round_into(), 1024.round_into()];
  /// // 2 + 2^20 - 2^20: exact here, but lost to absorption if rounded pairwise at 16 bits.
  /// assert_eq!(q16::fused_dot(&xs, &ys), Ok(2.round_into()));
  /// ```
  pub fn fused_dot<Int: crate::Int>(
    xs: &[Posit<N, ES, Int>],
    ys: &[Posit<N, ES, Int>],
  ) -> Result<Posit<N, ES, Int>, crate::ArithmeticError> {
    use crate::RoundFrom;
    if xs.len() != ys.len() {
      return Err(crate::ArithmeticError::InvalidConfiguration)
    }
    if xs.iter().chain(ys).any(|&p| p == Posit::NAR) {
      return Ok(Posit::NAR)
    }
    let mut quire = Self::ZERO;
    for (&x, &y) in xs.iter().zip(ys) {
      quire.add_prod(x, y)
    }
    // The inputs were screened for NaR, so a NaR quire here can only mean overflow.
    if quire.is_nar() {
      return Err(crate::ArithmeticError::QuireOverflow)
    }
    Ok(Posit::round_from(&quire))
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const SIZE: usize,
> core::ops::AddAssign<Posit<N, ES, Int>> for Quire<N, ES, SIZE> {
  /// Standard: "**qAddP**".
  fn add_assign(&mut self, rhs: Posit<N, ES, Int>) {
    self.add(rhs)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const SIZE: usize,
> core::ops::AddAssign<&Posit<N, ES, Int>> for Quire<N, ES, SIZE> {
  /// Standard: "**qAddP**".
  fn add_assign(&mut self, rhs: &Posit<N, ES, Int>) {
    self.add(*rhs)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const SIZE: usize,
> core::ops::SubAssign<Posit<N, ES, Int>> for Quire<N, ES, SIZE> {
  /// Standard: "**qSubP**".
  fn sub_assign(&mut self, rhs: Posit<N, ES, Int>) {
    self.sub(rhs)
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
  const SIZE: usize,
> core::ops::SubAssign<&Posit<N, ES, Int>> for Quire<N, ES, SIZE> {
  /// Standard: "**qSubP**".
  fn sub_assign(&mut self, rhs: &Posit<N, ES, Int>) {
    self.sub(*rhs)
  }
}
