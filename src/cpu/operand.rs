//! Addressing modes.
//!
//! Every operand implements `Operand` plus whichever capabilities it has:
//! a register is readable and writable, an immediate only readable, a flag is
//! a boolean. Operations ask for the capabilities they need, so binding an
//! operation to an operand that cannot be written does not compile.
//!
//! Immediates are read backwards from PC: by the time an instruction executes,
//! PC already points past its operand bytes.

use std::fmt::Display;

use crate::cpu::{Flag, Reg16, Reg8};
use crate::error::Result;
use crate::state::State;

pub trait Operand: Send + Sync {
  /// Bytes consumed from the instruction stream.
  fn size(&self) -> u16 {
    0
  }

  fn describe(&self, st: &State) -> String;
}

pub trait Read8: Operand {
  fn read8(&self, st: &State) -> Result<u8>;
}

pub trait Write8: Operand {
  fn write8(&self, st: &mut State, value: u8) -> Result<()>;
}

pub trait ReadWrite8: Read8 + Write8 {}
impl<T: Read8 + Write8> ReadWrite8 for T {}

pub trait Read16: Operand {
  fn read16(&self, st: &State) -> Result<u16>;
}

pub trait Write16: Operand {
  fn write16(&self, st: &mut State, value: u16) -> Result<()>;
}

pub trait ReadWrite16: Read16 + Write16 {}
impl<T: Read16 + Write16> ReadWrite16 for T {}

pub trait ReadI8: Operand {
  fn read_i8(&self, st: &State) -> Result<i8>;
}

pub trait ReadBool: Operand {
  fn read_bool(&self, st: &State) -> Result<bool>;
}

/// A bit number encoded in the opcode itself.
pub trait Bit: Operand {
  fn bit(&self) -> u8;
}

/// Render a value read from memory, or `?` if the read would fault.
fn show<T: Display>(value: Result<T>) -> String {
  match value {
    Ok(v) => v.to_string(),
    Err(_) => "?".to_string(),
  }
}

fn show_hex8(value: Result<u8>) -> String {
  show(value.map(|v| format!("0x{:02X}", v)))
}

fn show_hex16(value: Result<u16>) -> String {
  show(value.map(|v| format!("0x{:04X}", v)))
}

// Registers

impl Operand for Reg16 {
  fn describe(&self, _: &State) -> String {
    self.name().to_string()
  }
}

impl Read16 for Reg16 {
  fn read16(&self, st: &State) -> Result<u16> {
    Ok(st.regs.get(*self))
  }
}

impl Write16 for Reg16 {
  fn write16(&self, st: &mut State, value: u16) -> Result<()> {
    st.regs.set(*self, value);
    Ok(())
  }
}

impl Operand for Reg8 {
  fn describe(&self, _: &State) -> String {
    self.name().to_string()
  }
}

impl Read8 for Reg8 {
  fn read8(&self, st: &State) -> Result<u8> {
    Ok(st.regs.get8(*self))
  }
}

impl Write8 for Reg8 {
  fn write8(&self, st: &mut State, value: u8) -> Result<()> {
    st.regs.set8(*self, value);
    Ok(())
  }
}

impl Operand for Flag {
  fn describe(&self, _: &State) -> String {
    self.name().to_string()
  }
}

impl ReadBool for Flag {
  fn read_bool(&self, st: &State) -> Result<bool> {
    Ok(st.regs.flag(*self))
  }
}

/// A flag compared against an expected value: NZ, Z, NC and C.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Condition {
  pub flag: Flag,
  pub expect: bool,
}

impl Condition {
  pub const NZ: Condition = Condition { flag: Flag::Z, expect: false };
  pub const Z: Condition = Condition { flag: Flag::Z, expect: true };
  pub const NC: Condition = Condition { flag: Flag::C, expect: false };
  pub const C: Condition = Condition { flag: Flag::C, expect: true };
}

impl Operand for Condition {
  fn describe(&self, _: &State) -> String {
    if self.expect {
      self.flag.name().to_string()
    } else {
      format!("N{}", self.flag.name())
    }
  }
}

impl ReadBool for Condition {
  fn read_bool(&self, st: &State) -> Result<bool> {
    Ok(st.regs.flag(self.flag) == self.expect)
  }
}

/// The eight 8-bit targets encoded in three opcode bits: B, C, D, E, H, L,
/// (HL) and A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target8 {
  Reg(Reg8),
  IndirectHL,
}

impl Target8 {
  /// Cycles for each access that goes through (HL) instead of a register.
  pub fn extra_cycles(self) -> u32 {
    match self {
      Target8::Reg(_) => 0,
      Target8::IndirectHL => 4,
    }
  }
}

impl Operand for Target8 {
  fn describe(&self, st: &State) -> String {
    match self {
      Target8::Reg(r) => r.describe(st),
      Target8::IndirectHL => "(HL)".to_string(),
    }
  }
}

impl Read8 for Target8 {
  fn read8(&self, st: &State) -> Result<u8> {
    match self {
      Target8::Reg(r) => r.read8(st),
      Target8::IndirectHL => st.rb(st.regs.hl()),
    }
  }
}

impl Write8 for Target8 {
  fn write8(&self, st: &mut State, value: u8) -> Result<()> {
    match self {
      Target8::Reg(r) => r.write8(st, value),
      Target8::IndirectHL => {
        let addr = st.regs.hl();
        st.wb(addr, value)
      }
    }
  }
}

// Memory

/// The byte at the address given by another operand.
#[derive(Debug, Clone, Copy)]
pub struct Mem<A>(pub A);

impl<A: Read16> Operand for Mem<A> {
  fn size(&self) -> u16 {
    self.0.size()
  }

  fn describe(&self, st: &State) -> String {
    format!("({})", self.0.describe(st))
  }
}

impl<A: Read16> Read8 for Mem<A> {
  fn read8(&self, st: &State) -> Result<u8> {
    let addr = self.0.read16(st)?;
    st.rb(addr)
  }
}

impl<A: Read16> Write8 for Mem<A> {
  fn write8(&self, st: &mut State, value: u8) -> Result<()> {
    let addr = self.0.read16(st)?;
    st.wb(addr, value)
  }
}

/// The little-endian word at the address given by another operand.
#[derive(Debug, Clone, Copy)]
pub struct Mem16<A>(pub A);

impl<A: Read16> Operand for Mem16<A> {
  fn size(&self) -> u16 {
    self.0.size()
  }

  fn describe(&self, st: &State) -> String {
    format!("({})", self.0.describe(st))
  }
}

impl<A: Read16> Read16 for Mem16<A> {
  fn read16(&self, st: &State) -> Result<u16> {
    let addr = self.0.read16(st)?;
    st.rw(addr)
  }
}

impl<A: Read16> Write16 for Mem16<A> {
  fn write16(&self, st: &mut State, value: u16) -> Result<()> {
    let addr = self.0.read16(st)?;
    st.ww(addr, value)
  }
}

/// `0xFF00 + x`, the I/O page addressed by LDH and LD (C).
#[derive(Debug, Clone, Copy)]
pub struct HighPage<O>(pub O);

impl<O: Read8> Operand for HighPage<O> {
  fn size(&self) -> u16 {
    self.0.size()
  }

  fn describe(&self, st: &State) -> String {
    format!("0xFF00+{}", self.0.describe(st))
  }
}

impl<O: Read8> Read16 for HighPage<O> {
  fn read16(&self, st: &State) -> Result<u16> {
    Ok(0xff00 + u16::from(self.0.read8(st)?))
  }
}

// Immediates

#[derive(Debug, Clone, Copy)]
pub struct Imm8;

impl Operand for Imm8 {
  fn size(&self) -> u16 {
    1
  }

  fn describe(&self, st: &State) -> String {
    show_hex8(self.read8(st))
  }
}

impl Read8 for Imm8 {
  fn read8(&self, st: &State) -> Result<u8> {
    st.rb(st.regs.pc().wrapping_sub(self.size()))
  }
}

/// A signed byte, used as an offset from SP.
#[derive(Debug, Clone, Copy)]
pub struct ImmI8;

impl Operand for ImmI8 {
  fn size(&self) -> u16 {
    1
  }

  fn describe(&self, st: &State) -> String {
    show(self.read_i8(st))
  }
}

impl ReadI8 for ImmI8 {
  fn read_i8(&self, st: &State) -> Result<i8> {
    Ok(Imm8.read8(st)? as i8)
  }
}

/// A relative jump displacement.
///
/// Assemblers write `JR e` with e counted from the JR opcode, two bytes
/// before the PC the displacement is added to.
#[derive(Debug, Clone, Copy)]
pub struct Relative;

impl Operand for Relative {
  fn size(&self) -> u16 {
    1
  }

  fn describe(&self, st: &State) -> String {
    show(self.read_i8(st).map(|e| i16::from(e) + 2))
  }
}

impl ReadI8 for Relative {
  fn read_i8(&self, st: &State) -> Result<i8> {
    ImmI8.read_i8(st)
  }
}

#[derive(Debug, Clone, Copy)]
pub struct Imm16;

impl Operand for Imm16 {
  fn size(&self) -> u16 {
    2
  }

  fn describe(&self, st: &State) -> String {
    show_hex16(self.read16(st))
  }
}

impl Read16 for Imm16 {
  fn read16(&self, st: &State) -> Result<u16> {
    st.rw(st.regs.pc().wrapping_sub(self.size()))
  }
}

/// `SP + e`, the source of LD HL,SP+e. Reads as the signed offset; the
/// operation adds SP itself because it needs both halves for the flags.
#[derive(Debug, Clone, Copy)]
pub struct SpOffset;

impl Operand for SpOffset {
  fn size(&self) -> u16 {
    ImmI8.size()
  }

  fn describe(&self, st: &State) -> String {
    match self.read_i8(st) {
      Ok(e) if e < 0 => format!("SP-{}", -i16::from(e)),
      Ok(e) => format!("SP+{}", e),
      Err(_) => "SP+?".to_string(),
    }
  }
}

impl ReadI8 for SpOffset {
  fn read_i8(&self, st: &State) -> Result<i8> {
    ImmI8.read_i8(st)
  }
}

// Constants

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitIndex(pub u8);

impl Operand for BitIndex {
  fn describe(&self, _: &State) -> String {
    self.0.to_string()
  }
}

impl Bit for BitIndex {
  fn bit(&self) -> u8 {
    self.0
  }
}

/// A restart address, encoded in the RST opcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vector(pub u16);

impl Operand for Vector {
  fn describe(&self, _: &State) -> String {
    format!("0x{:02X}", self.0)
  }
}

impl Read16 for Vector {
  fn read16(&self, _: &State) -> Result<u16> {
    Ok(self.0)
  }
}
