use super::{fast_two_sum, two_sum};

/// A multi-component exact sum: a list of up to `M` floats whose mathematical sum is the value
/// represented, held in increasing order of magnitude with non-overlapping significands
/// (Shewchuk's *expansion* invariant). All operations are error-free: no information is lost
/// until the caller asks for the single-float [`approx`](Self::approx).
///
/// The capacity is fixed at compile time and nothing allocates. Growing past `M` *nonzero*
/// components panics; [`compress`](Self::compress) renormalises and drops zeros (or anything
/// below a caller-chosen tolerance) to reclaim slots.
#[derive(Clone, Copy)]
#[derive(Debug)]
pub struct Expansion<const M: usize> {
  terms: [f64; M],
  len: usize,
}

impl<const M: usize> Expansion<M> {
  /// The empty expansion, representing 0.
  pub const ZERO: Self = Self { terms: [0.0; M], len: 0 };

  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  /// The components, smallest magnitude first.
  pub fn terms(&self) -> &[f64] {
    &self.terms[.. self.len]
  }

  /// Add a single float, exactly (Shewchuk's GROW-EXPANSION). The term is two-summed through
  /// every component from the bottom up; the residues become the new low components and the
  /// surviving high part lands on top.
  pub fn grow(&mut self, term: f64) {
    let mut q = term;
    let mut terms = [0.0; M];
    let mut len = 0;
    for i in 0 .. self.len {
      let (s, r) = two_sum(q, self.terms[i]);
      q = s;
      if r != 0.0 {
        assert!(len < M, "expansion capacity exceeded");
        terms[len] = r;
        len += 1;
      }
    }
    if q != 0.0 || len == 0 {
      assert!(len < M, "expansion capacity exceeded");
      terms[len] = q;
      len += 1;
    }
    *self = Self { terms, len };
  }

  /// Add another expansion, exactly, component by component.
  pub fn sum<const M2: usize>(&mut self, other: &Expansion<M2>) {
    for &term in other.terms() {
      self.grow(term)
    }
  }

  /// Renormalise (Shewchuk's COMPRESS): components whose magnitude does not exceed `tolerance`
  /// are squeezed out, and afterwards the top component alone is within half an ulp of the full
  /// value. Never grows.
  ///
  /// With `tolerance = 0.0` only exact zeros are dropped and the value is unchanged exactly; a
  /// positive tolerance trades accuracy for slots, perturbing the value by at most `tolerance`
  /// per dropped component.
  pub fn compress(&mut self, tolerance: f64) {
    debug_assert!(tolerance >= 0.0);
    if self.len == 0 {
      return
    }

    // Downward sweep: absorb components into a running top; where a residue survives, the
    // rounded part is pinned and the residue carries on down.
    let mut pinned = [0.0; M];
    let mut bottom = self.len - 1;
    let mut q = self.terms[bottom];
    for i in (0 .. self.len - 1).rev() {
      let (s, r) = fast_two_sum(q, self.terms[i]);
      if r != 0.0 {
        pinned[bottom] = s;
        bottom -= 1;
        q = r;
      } else {
        q = s;
      }
    }
    pinned[bottom] = q;

    // Upward sweep: re-absorb from the bottom, emitting the residues as the final components
    // (minus any below the tolerance).
    let mut terms = [0.0; M];
    let mut len = 0;
    let mut q = pinned[bottom];
    for i in bottom + 1 .. self.len {
      let (s, r) = fast_two_sum(pinned[i], q);
      if r.abs() > tolerance {
        terms[len] = r;
        len += 1;
      }
      q = s;
    }
    if q.abs() > tolerance {
      terms[len] = q;
      len += 1;
    }

    *self = Self { terms, len };
  }

  /// Collapse to a single float: the correctly-rounded-ish sum of the components (exact to
  /// within one ulp; [`compress`](Self::compress) first for the tightest result).
  pub fn approx(&self) -> f64 {
    // Smallest first, so low components combine before they are swallowed by the top.
    let mut sum = 0.0;
    for &term in self.terms() {
      sum += term
    }
    sum
  }
}

impl<const M: usize> From<f64> for Expansion<M> {
  fn from(value: f64) -> Self {
    let mut e = Self::ZERO;
    e.grow(value);
    e
  }
}
