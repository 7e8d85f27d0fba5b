use super::*;

// Deriving these would add a spurious `Int: Clone` (etc.) bound on each impl, because the derive
// macro can't see that `Int: crate::Int` already implies them via `Sealed`. So we write them out.
//
// `Ord` deserves a remark: posits are constructed so that the numeric order of the values is the
// two's complement order of their (sign-extended) bit patterns, so every comparison here is a
// plain integer comparison. NaR compares below every real number, as the standard requires.

impl<const N: u32, const ES: u32, Int: crate::Int>
Clone for Posit<N, ES, Int> {
  #[inline]
  fn clone(&self) -> Self {
    Self(self.0)
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
Copy for Posit<N, ES, Int> {}

impl<const N: u32, const ES: u32, Int: crate::Int>
PartialEq for Posit<N, ES, Int> {
  #[inline]
  fn eq(&self, other: &Self) -> bool {
    self.0 == other.0
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
Eq for Posit<N, ES, Int> {}

impl<const N: u32, const ES: u32, Int: crate::Int>
PartialOrd for Posit<N, ES, Int> {
  #[inline]
  fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
    Some(self.cmp(other))
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
Ord for Posit<N, ES, Int> {
  #[inline]
  fn cmp(&self, other: &Self) -> core::cmp::Ordering {
    self.0.cmp(&other.0)
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
core::hash::Hash for Posit<N, ES, Int> {
  #[inline]
  fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
    self.0.hash(state);
  }
}

impl<const N: u32, const ES: u32, Int: crate::Int>
Default for Posit<N, ES, Int> {
  #[inline]
  fn default() -> Self {
    Self::ZERO
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use malachite::rational::Rational;

  #[test]
  fn total_order_p8() {
    // The two's complement order of the patterns is the numeric order of the values.
    for a in crate::p8::cases_exhaustive() {
      for b in crate::p8::cases_exhaustive() {
        let (ra, rb) = (Rational::try_from(a).unwrap(), Rational::try_from(b).unwrap());
        assert_eq!(a.cmp(&b), ra.cmp(&rb), "{a:?} vs {b:?}");
      }
    }
  }

  #[test]
  fn nar_sorts_below_everything() {
    for p in crate::p8::cases_exhaustive() {
      assert!(crate::p8::NAR < p);
    }
    assert!(crate::p8::NAR < crate::p8::ZERO);
    assert!(crate::p8::NAR < crate::p8::MIN);
  }
}
