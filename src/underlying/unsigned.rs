use super::*;

macro_rules! impl_unsigned {
  ($uint:ty, $udouble:ty) => {
    fn shift_sqrt(self, precision: u32) -> (Self, bool) {
      let a = (self as $udouble) << precision;
      let root = a.isqrt();
      (root as $uint, root * root != a)
    }
  }
}

impl Unsigned for u8 {
  impl_unsigned!{u8, u16}
}

impl Unsigned for u16 {
  impl_unsigned!{u16, u32}
}

impl Unsigned for u32 {
  impl_unsigned!{u32, u64}
}

impl Unsigned for u64 {
  impl_unsigned!{u64, u128}
}
