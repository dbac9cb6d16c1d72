/// System clock bit watched by the timer, indexed by `TAC & 3`.
const TAPS: [u32; 4] = [9, 3, 5, 7];

#[derive(Debug, Default)]
pub struct Registers {
  /// Timer counter.
  pub tima: u8,
  /// Timer modulo.
  pub tma: u8,
  /// Timer control. Bit 2 enables the timer, bits 0-1 select the frequency.
  pub tac: u8,
}

#[derive(Debug, Default)]
pub struct Timer {
  pub reg: Registers,
  /// Free-running 16-bit system clock. DIV is its upper byte.
  clock: u16,
  /// Timer bit as seen on the previous cycle.
  delayed_bit: bool,
}

impl Timer {
  pub fn new() -> Timer {
    Timer::default()
  }

  pub fn clock(&self) -> u16 {
    self.clock
  }

  pub fn set_clock(&mut self, clock: u16) {
    self.clock = clock;
  }

  /// The timer bit: the enable bit ANDed with the selected clock tap.
  fn timer_bit(&self) -> bool {
    let enabled = self.reg.tac & 0x04 != 0;
    let tap = TAPS[(self.reg.tac & 0x03) as usize];
    enabled && (self.clock >> tap) & 1 != 0
  }

  /// Advance one cycle.
  /// Returns true if TIMA overflowed and the timer interrupt should fire.
  pub fn tick(&mut self) -> bool {
    self.clock = self.clock.wrapping_add(1);

    let bit = self.timer_bit();
    let mut overflow = false;
    // TIMA counts falling edges.
    if self.delayed_bit && !bit {
      self.reg.tima = self.reg.tima.wrapping_add(1);
      if self.reg.tima == 0 {
        self.reg.tima = self.reg.tma;
        overflow = true;
      }
    }
    self.delayed_bit = bit;
    overflow
  }

  pub fn rb(&self, addr: u16) -> u8 {
    match addr {
      0xff04 => (self.clock >> 8) as u8,
      0xff05 => self.reg.tima,
      0xff06 => self.reg.tma,
      0xff07 => self.reg.tac | 0xf8,
      _ => panic!("Invalid timer address 0x{:04x}", addr),
    }
  }

  pub fn wb(&mut self, addr: u16, value: u8) {
    match addr {
      // Any write resets the whole system clock.
      0xff04 => self.clock = 0,
      0xff05 => self.reg.tima = value,
      0xff06 => self.reg.tma = value,
      0xff07 => self.reg.tac = value & 0x07,
      _ => panic!("Invalid timer address 0x{:04x}", addr),
    }
  }
}
