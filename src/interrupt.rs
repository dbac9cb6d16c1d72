use crate::cpu::Reg16;
use crate::error::Result;
use crate::mem::Memory;
use crate::state::State;

pub const IF: u16 = 0xff0f;
pub const IE: u16 = 0xffff;

/// Cycles taken to push PC and jump to a vector.
pub const DISPATCH_CYCLES: u32 = 20;

/// Interrupt sources in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
  VBlank,
  LcdStat,
  Timer,
  Serial,
  Joypad,
}

impl Interrupt {
  pub const ALL: [Interrupt; 5] = [
    Interrupt::VBlank,
    Interrupt::LcdStat,
    Interrupt::Timer,
    Interrupt::Serial,
    Interrupt::Joypad,
  ];

  /// Index 0-4, which is also the bit in IF and IE.
  pub fn index(self) -> u8 {
    self as u8
  }

  pub fn mask(self) -> u8 {
    1 << self.index()
  }

  pub fn vector(self) -> u16 {
    0x0040 + 8 * u16::from(self.index())
  }
}

impl Memory {
  pub fn request_interrupt(&mut self, int: Interrupt) {
    let flags = self.peek(IF) | int.mask();
    self.poke(IF, flags);
  }

  /// Interrupts both requested and enabled.
  pub fn pending_interrupts(&self) -> u8 {
    self.peek(IF) & self.peek(IE) & 0x1f
  }
}

impl State {
  /// Jump to the highest priority pending interrupt, if IME allows it.
  ///
  /// At most one interrupt is taken per call.
  pub fn dispatch_interrupt(&mut self) -> Result<Option<Interrupt>> {
    if !self.ime {
      return Ok(None);
    }
    let pending = self.mem.pending_interrupts();
    let int = match Interrupt::ALL.iter().find(|i| pending & i.mask() != 0) {
      Some(&int) => int,
      None => return Ok(None),
    };

    debug!(
      "INTERRUPT {:?}! IE=0b{:05b} IF=0b{:05b}",
      int,
      self.mem.peek(IE) & 0x1f,
      self.mem.peek(IF) & 0x1f
    );
    self.ime = false;
    let flags = self.mem.peek(IF) & !int.mask();
    self.mem.poke(IF, flags);
    let pc = self.regs.pc();
    self.push(pc)?;
    self.regs.set(Reg16::PC, int.vector());
    Ok(Some(int))
  }
}
