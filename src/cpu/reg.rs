use crate::cpu::Registers;

pub const Z: u8 = 0x80;
pub const N: u8 = 0x40;
pub const H: u8 = 0x20;
pub const C: u8 = 0x10;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Reg16 {
  AF,
  BC,
  DE,
  HL,
  PC,
  SP,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Reg8 {
  A,
  F,
  B,
  C,
  D,
  E,
  H,
  L,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flag {
  Z,
  N,
  H,
  C,
}

impl Reg16 {
  /// Stable index into the register file.
  pub fn index(self) -> usize {
    self as usize
  }

  pub fn name(self) -> &'static str {
    match self {
      Reg16::AF => "AF",
      Reg16::BC => "BC",
      Reg16::DE => "DE",
      Reg16::HL => "HL",
      Reg16::PC => "PC",
      Reg16::SP => "SP",
    }
  }
}

impl Reg8 {
  /// The 16-bit register this is a view of.
  pub fn parent(self) -> Reg16 {
    match self {
      Reg8::A | Reg8::F => Reg16::AF,
      Reg8::B | Reg8::C => Reg16::BC,
      Reg8::D | Reg8::E => Reg16::DE,
      Reg8::H | Reg8::L => Reg16::HL,
    }
  }

  fn is_high(self) -> bool {
    match self {
      Reg8::A | Reg8::B | Reg8::D | Reg8::H => true,
      Reg8::F | Reg8::C | Reg8::E | Reg8::L => false,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Reg8::A => "A",
      Reg8::F => "F",
      Reg8::B => "B",
      Reg8::C => "C",
      Reg8::D => "D",
      Reg8::E => "E",
      Reg8::H => "H",
      Reg8::L => "L",
    }
  }
}

impl Flag {
  pub fn mask(self) -> u8 {
    match self {
      Flag::Z => Z,
      Flag::N => N,
      Flag::H => H,
      Flag::C => C,
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Flag::Z => "Z",
      Flag::N => "N",
      Flag::H => "H",
      Flag::C => "C",
    }
  }
}

impl Registers {
  /// Power-on state: everything is zero and the boot ROM starts at 0x0000.
  pub fn new() -> Registers {
    Registers { words: [0; 6] }
  }

  /// The state the DMG boot ROM leaves behind when it jumps to 0x0100.
  pub fn post_boot() -> Registers {
    let mut regs = Registers::new();
    regs.set(Reg16::AF, 0x01b0);
    regs.set(Reg16::BC, 0x0013);
    regs.set(Reg16::DE, 0x00d8);
    regs.set(Reg16::HL, 0x014d);
    regs.set(Reg16::SP, 0xfffe);
    regs.set(Reg16::PC, 0x0100);
    regs
  }

  pub fn get(&self, r: Reg16) -> u16 {
    let value = self.words[r.index()];
    if r == Reg16::AF {
      // The low nibble of F does not exist.
      value & 0xfff0
    } else {
      value
    }
  }

  pub fn set(&mut self, r: Reg16, value: u16) {
    self.words[r.index()] = value;
  }

  pub fn get8(&self, r: Reg8) -> u8 {
    let word = self.get(r.parent());
    if r.is_high() {
      (word >> 8) as u8
    } else {
      word as u8
    }
  }

  pub fn set8(&mut self, r: Reg8, value: u8) {
    let word = self.get(r.parent());
    let word = if r.is_high() {
      (word & 0x00ff) | (u16::from(value) << 8)
    } else {
      (word & 0xff00) | u16::from(value)
    };
    self.set(r.parent(), word);
  }

  pub fn flag(&self, f: Flag) -> bool {
    self.get8(Reg8::F) & f.mask() != 0
  }

  pub fn set_flag(&mut self, f: Flag, value: bool) {
    let flags = self.get8(Reg8::F);
    let flags = if value {
      flags | f.mask()
    } else {
      flags & !f.mask()
    };
    self.set8(Reg8::F, flags);
  }

  /// Set all four flags at once.
  pub fn set_flags(&mut self, z: bool, n: bool, h: bool, c: bool) {
    let mut flags = 0;
    flags |= if z { Z } else { 0 };
    flags |= if n { N } else { 0 };
    flags |= if h { H } else { 0 };
    flags |= if c { C } else { 0 };
    self.set8(Reg8::F, flags);
  }

  pub fn af(&self) -> u16 {
    self.get(Reg16::AF)
  }
  pub fn bc(&self) -> u16 {
    self.get(Reg16::BC)
  }
  pub fn de(&self) -> u16 {
    self.get(Reg16::DE)
  }
  pub fn hl(&self) -> u16 {
    self.get(Reg16::HL)
  }
  pub fn pc(&self) -> u16 {
    self.get(Reg16::PC)
  }
  pub fn sp(&self) -> u16 {
    self.get(Reg16::SP)
  }
  pub fn a(&self) -> u8 {
    self.get8(Reg8::A)
  }

  pub fn set_pc(&mut self, value: u16) {
    self.set(Reg16::PC, value);
  }
  pub fn set_a(&mut self, value: u8) {
    self.set8(Reg8::A, value);
  }

  pub fn z(&self) -> bool {
    //! Zero flag
    self.flag(Flag::Z)
  }
  pub fn n(&self) -> bool {
    //! Subtract flag
    self.flag(Flag::N)
  }
  pub fn h(&self) -> bool {
    //! Half carry flag
    self.flag(Flag::H)
  }
  pub fn c(&self) -> bool {
    //! Carry flag
    self.flag(Flag::C)
  }
}
