use super::*;

use core::fmt::Debug;

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Debug for Posit<N, ES, Int> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    if const { Self::JUNK_BITS == 0 } {
      let bits = self.0;
      f.debug_tuple("Posit")
        .field(&format_args!("0b{bits:0w$b}", w=Int::BITS as usize))
        .finish()
    } else {
      // Visually separate the junk bits from the logical pattern.
      let bits_junk = (self.0 >> Self::BITS).mask_lsb(Self::JUNK_BITS);
      let bits_significant = self.0.mask_lsb(Self::BITS);
      f.debug_tuple("Posit")
        .field(&format_args!(
          "0b{bits_junk:0wj$b}_{bits_significant:0ws$b}",
          wj=Self::JUNK_BITS as usize, ws=Self::BITS as usize,
        ))
        .finish()
    }
  }
}

impl<
  const N: u32,
  const ES: u32,
  Int: crate::Int,
> Debug for Decoded<N, ES, Int> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // frac as hidden bits / explicit fraction / final (rounding) bit; exp as regime / exponent.
    let frac_hidden = self.frac.lshr(Int::BITS - 2);
    let frac_explicit = (self.frac << 2).lshr(3);
    let frac_round = self.frac & Int::ONE;
    let exp_regime = self.exp.lshr(ES);
    let exp_exponent = self.exp.mask_lsb(ES);
    let exp_total = self.exp;
    f.debug_struct("Decoded")
      .field("frac", &format_args!("0b{frac_hidden:02b}_{frac_explicit:0w$b}_{frac_round:b}",
        w=Int::BITS as usize - 3
      ))
      .field("exp", &format_args!("0b{exp_regime:0wr$b}_{exp_exponent:0we$b} ({exp_total:+})",
        wr=(Int::BITS - ES) as usize, we=ES as usize,
      ))
      .finish()
  }
}
