#![cfg_attr(feature = "cargo-clippy", allow(clippy::match_same_arms))]

mod bios;
mod cartridge;
mod joypad;
mod serial;
mod timer;

pub use self::bios::{BootRom, BIOS_SHA256, BIOS_SIZE};
pub use self::cartridge::{Cartridge, ROM_SIZE};
pub use self::joypad::{Joypad, Key};
pub use self::serial::{SerialSink, StdoutSink};
pub use self::timer::Timer;

use crate::interrupt::{Interrupt, IF};

/// The LCD takes 456 cycles to draw one line.
pub const CYCLES_PER_LINE: u64 = 456;
/// 144 visible lines followed by 10 V-Blank lines.
pub const LINES_PER_FRAME: u64 = 154;
pub const VBLANK_LINE: u8 = 144;

pub const VRAM_START: u16 = 0x8000;
pub const VRAM_END: u16 = 0x9fff;

/// An address (or address and operation) the bus does not emulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unmapped;

/// Post-boot values of the I/O registers the bus stores.
/// See http://nocash.emubase.de/pandocs.htm#powerupsequence
const POST_BOOT_IO: [(u16, u8); 11] = [
  (0xff40, 0x91), // LCDC
  (0xff42, 0x00), // SCY
  (0xff43, 0x00), // SCX
  (0xff45, 0x00), // LYC
  (0xff47, 0xfc), // BGP
  (0xff48, 0xff), // OBP0
  (0xff49, 0xff), // OBP1
  (0xff4a, 0x00), // WY
  (0xff4b, 0x00), // WX
  (0xff50, 0x01), // boot ROM off
  (0xffff, 0x00), // IE
];

/// The 16-bit address space.
///
/// Plain RAM and the I/O registers that are only stored live in one flat 64KiB
/// array. Everything with behaviour (boot ROM overlay, cartridge, timer,
/// joypad, LY, serial) is routed to its own piece of state.
pub struct Memory {
  bios: Option<BootRom>,
  bios_mapped: bool,
  cart: Cartridge,
  ram: Vec<u8>,

  pub timer: Timer,
  pub joypad: Joypad,
  serial: Option<Box<dyn SerialSink>>,

  /// Elapsed cycles since power on.
  cycles: u64,
}

/// The line being drawn after `cycles` cycles.
pub fn scanline(cycles: u64) -> u8 {
  ((cycles / CYCLES_PER_LINE) % LINES_PER_FRAME) as u8
}

impl Memory {
  pub fn new(bios: Option<BootRom>, cart: Cartridge) -> Memory {
    let mut mem = Memory {
      bios_mapped: bios.is_some(),
      bios,
      cart,
      ram: vec![0; 0x10000],
      timer: Timer::new(),
      joypad: Joypad::new(),
      serial: None,
      cycles: 0,
    };
    if !mem.bios_mapped {
      mem.post_boot();
    }
    mem
  }

  /// Skip the boot ROM: put the I/O registers where it would have left them.
  fn post_boot(&mut self) {
    for &(addr, value) in POST_BOOT_IO.iter() {
      self.poke(addr, value);
    }
    self.timer.set_clock(0xabcc);
  }

  pub fn set_serial_sink(&mut self, sink: Box<dyn SerialSink>) {
    self.serial = Some(sink);
  }

  pub fn bios_mapped(&self) -> bool {
    self.bios_mapped
  }

  pub fn cartridge(&self) -> &Cartridge {
    &self.cart
  }

  /// Read a byte at address `addr`.
  pub fn rb(&self, addr: u16) -> Result<u8, Unmapped> {
    let mut mask = 0x00;
    match addr {
      0x0000..=0x00ff => {
        return Ok(match self.bios {
          Some(ref bios) if self.bios_mapped => bios.rb(addr),
          _ => self.cart.rb(addr),
        });
      }
      0x0100..=0x7fff => return Ok(self.cart.rb(addr)),
      // VRAM: tile sets and BG maps
      0x8000..=0x9fff => (),
      // WRAM
      0xc000..=0xdfff => (),
      // WRAM Shadow
      0xe000..=0xfdff => return Ok(self.ram[(addr - 0x2000) as usize]),
      // OAM
      0xfe00..=0xfe9f => (),
      0xff00 => return Ok(self.joypad.rb()),
      // SB: Serial transfer data
      0xff01 => (),
      // SC: Serial transfer control
      0xff02 => mask = 0x7e,
      // DIV, TIMA, TMA, TAC
      0xff04..=0xff07 => return Ok(self.timer.rb(addr)),
      // IF: Interrupt Flag
      0xff0f => mask = 0xe0,
      // LCDC, SCY, SCX
      0xff40 | 0xff42 | 0xff43 => (),
      0xff41 => return Ok(self.stat()),
      // LY: computed from the cycle count
      0xff44 => return Ok(self.scanline()),
      // LYC, BGP, OBP0, OBP1, WY, WX
      0xff45 | 0xff47..=0xff4b => (),
      // Zero page
      0xff80..=0xfffe => (),
      // IE: Interrupt Enable
      0xffff => (),
      _ => return Err(Unmapped),
    }
    Ok(self.ram[addr as usize] | mask)
  }

  /// Write `value` at address `addr`.
  pub fn wb(&mut self, addr: u16, value: u8) -> Result<(), Unmapped> {
    match addr {
      0x8000..=0x9fff => (),
      0xc000..=0xdfff => (),
      0xe000..=0xfdff => {
        self.ram[(addr - 0x2000) as usize] = value;
        return Ok(());
      }
      0xfe00..=0xfe9f => (),
      0xff00 => {
        self.joypad.wb(value);
        return Ok(());
      }
      0xff01 => (),
      0xff02 => {
        if value == 0x81 {
          self.transfer();
          // The transfer completes at once.
          self.ram[addr as usize] = value & 0x7f;
          return Ok(());
        }
      }
      0xff04..=0xff07 => {
        self.timer.wb(addr, value);
        return Ok(());
      }
      0xff0f => (),
      // NR10-NR52. Sound is not emulated.
      0xff10..=0xff14 | 0xff16..=0xff1e | 0xff20..=0xff26 => return Ok(()),
      0xff40..=0xff43 | 0xff45 | 0xff47..=0xff4b => (),
      0xff50 => {
        if self.bios_mapped {
          debug!("boot ROM unmapped");
        }
        self.bios_mapped = false;
      }
      0xff80..=0xfffe => (),
      0xffff => (),
      _ => return Err(Unmapped),
    }
    self.ram[addr as usize] = value;
    Ok(())
  }

  /// Send SB down the link cable.
  fn transfer(&mut self) {
    let byte = self.ram[0xff01];
    match self.serial {
      Some(ref mut sink) => sink.send(byte),
      None => debug!("serial 0x{:02x} with nothing attached", byte),
    }
    self.request_interrupt(Interrupt::Serial);
  }

  /// Raw access to the backing array, bypassing the bus.
  pub fn peek(&self, addr: u16) -> u8 {
    self.ram[addr as usize]
  }

  pub fn poke(&mut self, addr: u16, value: u8) {
    self.ram[addr as usize] = value;
  }

  pub fn vram(&self) -> &[u8] {
    &self.ram[VRAM_START as usize..=VRAM_END as usize]
  }

  pub fn cycles(&self) -> u64 {
    self.cycles
  }

  pub fn scanline(&self) -> u8 {
    scanline(self.cycles)
  }

  /// STAT mode bits derived from the position in the frame, plus the LY=LYC
  /// coincidence bit.
  fn stat(&self) -> u8 {
    let line = self.scanline();
    let dot = self.cycles % CYCLES_PER_LINE;
    let mode = if line >= VBLANK_LINE {
      1
    } else if dot < 80 {
      2
    } else if dot < 252 {
      3
    } else {
      0
    };
    let coincidence = if line == self.ram[0xff45] { 0x04 } else { 0 };
    0x80 | (self.ram[0xff41] & 0x78) | coincidence | mode
  }

  /// Advance by a single cycle: the timer has to see every one of them.
  pub fn tick(&mut self) {
    let line = self.scanline();
    self.cycles += 1;

    if self.timer.tick() {
      self.request_interrupt(Interrupt::Timer);
    }
    if line < VBLANK_LINE && self.scanline() >= VBLANK_LINE {
      self.request_interrupt(Interrupt::VBlank);
    }
  }

  pub fn add_cycles(&mut self, cycles: u32) {
    for _ in 0..cycles {
      self.tick();
    }
  }

  pub fn key_down(&mut self, key: Key) {
    if self.joypad.key_down(key) {
      self.request_interrupt(Interrupt::Joypad);
    }
  }

  pub fn key_up(&mut self, key: Key) {
    self.joypad.key_up(key);
  }
}
