use super::*;

/// One row of the [`const_as`] dispatch table: the cast from `$t` to each of the `$u`s.
macro_rules! const_as_row {
  ($x:ident, $t:ty => $($u:ty),*) => {
    $(
      if const { T::BITS == <$t>::BITS && U::BITS == <$u>::BITS } {
        // SAFETY: T, U, $t, $u are all guaranteed to be `iX` types, and the width checks above
        // mean `$t` is `T` and `$u` is `U`; therefore both transmute_copy are no-ops.
        let t = unsafe { ::core::mem::transmute_copy::<T, $t>(&$x) };
        let u = t as $u;
        return unsafe { ::core::mem::transmute_copy::<$u, U>(&u) }
      }
    )*
  }
}

/// A type-generic and `const` version of the keyword `as`, for casting between underlying ints.
///
/// ```ignore
/// assert_eq!(const_as::<i16, i32>(1234i16), 1234i16 as i32);
/// assert_eq!(const_as::<i128, i64>(-16i128), -16i128 as i64);
/// ```
pub const fn const_as<T: Sealed, U: Sealed>(x: T) -> U {
  const_as_row!(x, i8 => i8, i16, i32, i64, i128);
  const_as_row!(x, i16 => i8, i16, i32, i64, i128);
  const_as_row!(x, i32 => i8, i16, i32, i64, i128);
  const_as_row!(x, i64 => i8, i16, i32, i64, i128);
  const_as_row!(x, i128 => i8, i16, i32, i64, i128);
  unreachable!() // cannot be const { unreachable!() }
}

#[cfg(test)]
#[allow(overflowing_literals)]
mod tests {
  use super::*;

  #[test]
  fn widening() {
    const A: i32 = const_as(0x71_i8);
    assert_eq!(A, 0x00000071_i32);
    const B: i32 = const_as(0xf1_i8);
    assert_eq!(B, 0xfffffff1_i32);
  }

  #[test]
  fn narrowing() {
    const A: i32 = const_as(0xdeadbeef_i128);
    assert_eq!(A, 0xdeadbeef_i32);
    const B: i32 = const_as(-1i128);
    assert_eq!(B, -1i32);
  }

  #[test]
  fn same_width() {
    const A: i16 = const_as(0x1337_i16);
    assert_eq!(A, 0x1337_i16);
    const B: i32 = const_as(0i32);
    assert_eq!(B, 0i32);
  }
}
