use super::{Double, Sealed};

macro_rules! impl_double {
  ($single:ty) => {
    type Single = $single;

    #[inline]
    fn components_hi_lo(self) -> ($single, $single) {
      let hi = (self >> <$single>::BITS) as $single;
      let lo = self as $single;
      (hi, lo)
    }

    #[inline]
    unsafe fn leading_run_minus_one(self) -> u32 {
      unsafe { <Self as Sealed>::leading_run_minus_one(self) }
    }
  };
}

impl Double for i16 {
  impl_double!{i8}
}

impl Double for i32 {
  impl_double!{i16}
}

impl Double for i64 {
  impl_double!{i32}
}

impl Double for i128 {
  impl_double!{i64}
}
