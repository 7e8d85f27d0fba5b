use super::{fast_two_sum, magnitude_at_least, two_prod, two_sum};

/// A double-double: an unevaluated sum `hi + lo` of two floats, with `|lo|` at most half an ulp
/// of `hi`. Roughly doubles the significand to ~106 bits while keeping the `f64` exponent
/// range.
///
/// The operators are the classic compensated kernels (Dekker/Bailey): each rounds only in the
/// last normalisation step, so results are accurate to a couple of units in the *second*
/// component's last place.
#[derive(Clone, Copy)]
#[derive(Debug)]
#[derive(PartialEq)]
pub struct Dd {
  hi: f64,
  lo: f64,
}

impl Dd {
  pub const ZERO: Self = Self { hi: 0.0, lo: 0.0 };
  pub const ONE: Self = Self { hi: 1.0, lo: 0.0 };

  /// Build from components, renormalising so the invariant holds.
  pub fn new(hi: f64, lo: f64) -> Self {
    let (hi, lo) = if magnitude_at_least(hi, lo) {fast_two_sum(hi, lo)} else {fast_two_sum(lo, hi)};
    Self { hi, lo }
  }

  /// The leading component: the value rounded to a single float.
  pub fn value(self) -> f64 {
    self.hi
  }

  /// The trailing component: the error of [`value`](Self::value).
  pub fn error(self) -> f64 {
    self.lo
  }
}

impl From<f64> for Dd {
  fn from(value: f64) -> Self {
    Self { hi: value, lo: 0.0 }
  }
}

impl core::ops::Neg for Dd {
  type Output = Self;
  fn neg(self) -> Self {
    Self { hi: -self.hi, lo: -self.lo }
  }
}

impl core::ops::Add for Dd {
  type Output = Self;
  fn add(self, other: Self) -> Self {
    // The accurate (two-two_sum) kernel: the cheap variant that folds both `lo`s into one
    // correction loses whole digits under cancellation of the `hi`s. The recombinations use
    // the unordered two_sum: cancellation can leave the correction larger than the sum.
    let (s1, s2) = two_sum(self.hi, other.hi);
    let (t1, t2) = two_sum(self.lo, other.lo);
    let (s1, s2) = two_sum(s1, s2 + t1);
    let (hi, lo) = two_sum(s1, s2 + t2);
    Self { hi, lo }
  }
}

impl core::ops::Sub for Dd {
  type Output = Self;
  fn sub(self, other: Self) -> Self {
    self + -other
  }
}

impl core::ops::Mul for Dd {
  type Output = Self;
  fn mul(self, other: Self) -> Self {
    let (p, e) = two_prod(self.hi, other.hi);
    let e = e + self.hi * other.lo + self.lo * other.hi;
    let (hi, lo) = fast_two_sum(p, e);
    Self { hi, lo }
  }
}

impl core::ops::Div for Dd {
  type Output = Self;
  fn div(self, other: Self) -> Self {
    // Long division, two digits: estimate, take the exact remainder, correct.
    let q1 = self.hi / other.hi;
    let r = self - other * Self::from(q1);
    let q2 = (r.hi + r.lo) / other.hi;
    let (hi, lo) = fast_two_sum(q1, q2);
    Self { hi, lo }
  }
}

impl core::ops::AddAssign for Dd {
  fn add_assign(&mut self, other: Self) {
    *self = *self + other
  }
}

impl core::ops::SubAssign for Dd {
  fn sub_assign(&mut self, other: Self) {
    *self = *self - other
  }
}

impl core::ops::MulAssign for Dd {
  fn mul_assign(&mut self, other: Self) {
    *self = *self * other
  }
}

impl core::ops::DivAssign for Dd {
  fn div_assign(&mut self, other: Self) {
    *self = *self / other
  }
}
