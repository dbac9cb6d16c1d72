use crate::cpu::{Reg16, Registers};
use crate::error::{Error, Result};
use crate::mem::{BootRom, Cartridge, Memory, SerialSink};

/// Everything an instruction can observe or change.
pub struct State {
  pub regs: Registers,
  pub mem: Memory,
  /// Interrupt master enable.
  pub ime: bool,
  /// Set by HALT and STOP until an interrupt is pending.
  pub halted: bool,
}

impl State {
  /// With a boot ROM the machine starts from zero at 0x0000. Without one it
  /// starts at 0x0100 in the state the boot ROM would have left.
  pub fn new(bios: Option<BootRom>, cart: Cartridge) -> State {
    let regs = if bios.is_some() {
      Registers::new()
    } else {
      Registers::post_boot()
    };
    State {
      regs,
      mem: Memory::new(bios, cart),
      ime: false,
      halted: false,
    }
  }

  pub fn set_serial_sink(&mut self, sink: Box<dyn SerialSink>) {
    self.mem.set_serial_sink(sink);
  }

  pub fn rb(&self, addr: u16) -> Result<u8> {
    self.mem.rb(addr).map_err(|_| Error::UnmappedRead {
      addr,
      pc: self.regs.pc(),
    })
  }

  pub fn wb(&mut self, addr: u16, value: u8) -> Result<()> {
    let pc = self.regs.pc();
    self
      .mem
      .wb(addr, value)
      .map_err(|_| Error::UnmappedWrite { addr, value, pc })
  }

  /// Little-endian word read.
  pub fn rw(&self, addr: u16) -> Result<u16> {
    let lo = self.rb(addr)?;
    let hi = self.rb(addr.wrapping_add(1))?;
    Ok(u16::from(lo) | (u16::from(hi) << 8))
  }

  pub fn ww(&mut self, addr: u16, value: u16) -> Result<()> {
    self.wb(addr, value as u8)?;
    self.wb(addr.wrapping_add(1), (value >> 8) as u8)
  }

  pub fn push(&mut self, value: u16) -> Result<()> {
    let sp = self.regs.sp().wrapping_sub(2);
    self.regs.set(Reg16::SP, sp);
    self.ww(sp, value)
  }

  pub fn pop(&mut self) -> Result<u16> {
    let sp = self.regs.sp();
    let value = self.rw(sp)?;
    self.regs.set(Reg16::SP, sp.wrapping_add(2));
    Ok(value)
  }
}
