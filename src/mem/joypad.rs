#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
  A,
  B,
  Start,
  Select,
  Left,
  Up,
  Down,
  Right,
}

/// The P1/JOYP register at 0xff00.
///
/// Buttons are active low. Bit 5 selects the action row, bit 4 the
/// direction row.
#[derive(Debug)]
pub struct Joypad {
  /// (action, direction), low nibble, 0 = pressed.
  rows: (u8, u8),
  select: u8,
}

impl Default for Joypad {
  fn default() -> Self {
    Joypad::new()
  }
}

impl Joypad {
  pub fn new() -> Joypad {
    Joypad {
      rows: (0x0f, 0x0f),
      select: 0x30,
    }
  }

  pub fn rb(&self) -> u8 {
    let mut low = 0x0f;
    if self.select & 0x20 == 0 {
      low &= self.rows.0;
    }
    if self.select & 0x10 == 0 {
      low &= self.rows.1;
    }
    0xc0 | self.select | low
  }

  pub fn wb(&mut self, value: u8) {
    self.select = value & 0x30;
  }

  /// Returns true if the key was not already held, which is when the
  /// hardware raises the joypad interrupt.
  pub fn key_down(&mut self, key: Key) -> bool {
    let (row, mask) = self.slot(key);
    let was_up = *row & mask != 0;
    *row &= !mask;
    debug!("Pressed {:?}. Joypad = {:?}", key, self);
    was_up
  }

  pub fn key_up(&mut self, key: Key) {
    let (row, mask) = self.slot(key);
    *row |= mask;
    debug!("Released {:?}. Joypad = {:?}", key, self);
  }

  fn slot(&mut self, key: Key) -> (&mut u8, u8) {
    match key {
      Key::Right => (&mut self.rows.1, 0x1),
      Key::Left => (&mut self.rows.1, 0x2),
      Key::Up => (&mut self.rows.1, 0x4),
      Key::Down => (&mut self.rows.1, 0x8),
      Key::A => (&mut self.rows.0, 0x1),
      Key::B => (&mut self.rows.0, 0x2),
      Key::Select => (&mut self.rows.0, 0x4),
      Key::Start => (&mut self.rows.0, 0x8),
    }
  }
}
