//! Carry and borrow predicates shared by the arithmetic operations.
//!
//! The `c` argument is the incoming carry (ADC) or borrow (SBC); pass `false`
//! for the plain forms.

pub fn carry(x: u8, y: u8, c: bool) -> bool {
  u16::from(x) + u16::from(y) + u16::from(c) > 0xff
}

/// Carry out of bit 3.
pub fn half_carry(x: u8, y: u8, c: bool) -> bool {
  (x & 0x0f) + (y & 0x0f) + u8::from(c) > 0x0f
}

pub fn borrow(x: u8, y: u8, c: bool) -> bool {
  u16::from(x) < u16::from(y) + u16::from(c)
}

/// Borrow into bit 3.
pub fn half_borrow(x: u8, y: u8, c: bool) -> bool {
  (x & 0x0f) < (y & 0x0f) + u8::from(c)
}

pub fn carry16(x: u16, y: u16) -> bool {
  u32::from(x) + u32::from(y) > 0xffff
}

/// Carry out of bit 11.
pub fn half_carry16(x: u16, y: u16) -> bool {
  (x & 0x0fff) + (y & 0x0fff) > 0x0fff
}
