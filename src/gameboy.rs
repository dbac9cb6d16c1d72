use crate::cpu::Cpu;
use crate::error::Result;
use crate::interrupt::DISPATCH_CYCLES;
use crate::mem::{BootRom, Cartridge, Key, SerialSink};
use crate::state::State;
use crate::video::VideoSnapshot;

/// Cycles spent per step while halted.
const HALT_CYCLES: u32 = 4;

pub struct GameBoy {
  cpu: Cpu,
  pub state: State,
}

impl GameBoy {
  pub fn new(bios: Option<BootRom>, cart: Cartridge) -> Result<GameBoy> {
    info!("Loaded \"{}\"", cart.title());
    if !cart.header_checksum_ok() {
      warn!(
        "Header checksum mismatch: computed 0x{:02x}",
        cart.header_checksum()
      );
    }
    Ok(GameBoy {
      cpu: Cpu::new()?,
      state: State::new(bios, cart),
    })
  }

  pub fn set_serial_sink(&mut self, sink: Box<dyn SerialSink>) {
    self.state.set_serial_sink(sink);
  }

  /// Run one instruction, or idle if halted, then let the timer and the LCD
  /// catch up and take a pending interrupt.
  /// Return the cycles spent.
  pub fn step(&mut self) -> Result<u32> {
    let st = &mut self.state;
    let mut t = if st.halted {
      HALT_CYCLES
    } else {
      self.cpu.fetch_decode_execute(st)?
    };
    st.mem.add_cycles(t);

    // Any pending interrupt ends HALT, even with IME clear.
    if st.halted && st.mem.pending_interrupts() != 0 {
      st.halted = false;
    }

    if st.dispatch_interrupt()?.is_some() {
      st.mem.add_cycles(DISPATCH_CYCLES);
      t += DISPATCH_CYCLES;
    }
    Ok(t)
  }

  /// Step until LY wraps around to the top of the screen.
  pub fn run_frame(&mut self) -> Result<()> {
    loop {
      let line = self.state.mem.scanline();
      self.step()?;
      if self.state.mem.scanline() < line {
        return Ok(());
      }
    }
  }

  pub fn video_snapshot(&self) -> VideoSnapshot {
    VideoSnapshot::new(&self.state.mem)
  }

  pub fn key_down(&mut self, key: Key) {
    self.state.mem.key_down(key);
  }

  pub fn key_up(&mut self, key: Key) {
    self.state.mem.key_up(key);
  }
}
