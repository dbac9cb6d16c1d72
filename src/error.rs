use std::fmt;

use thiserror::Error;

/// Which of the two dispatch tables an opcode belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
  Primary,
  /// Opcodes following the 0xcb prefix.
  Extended,
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Table::Primary => write!(f, "primary"),
      Table::Extended => write!(f, "extended"),
    }
  }
}

/// Everything that can stop the emulator.
///
/// None of these are recoverable: they either mean the emulation is missing a
/// piece of hardware, or the program under emulation ran off into the weeds.
#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown {table} opcode {opcode:#04X} at PC={pc:#06X}")]
  UnresolvedOpcode { table: Table, opcode: u8, pc: u16 },

  #[error("unimplemented memory read at {addr:#06X} and PC={pc:#06X}")]
  UnmappedRead { addr: u16, pc: u16 },

  #[error(
    "unimplemented memory write {value:#04X}={value:#010b} at {addr:#06X} and PC={pc:#06X}"
  )]
  UnmappedWrite { addr: u16, value: u8, pc: u16 },

  #[error("opcode {opcode:#04X} assigned twice in the {table} table")]
  DuplicateOpcode { table: Table, opcode: u8 },

  #[error("opcode {opcode:#04X} in the {table} table would be {len} bytes long")]
  BadLength { table: Table, opcode: u8, len: u16 },

  #[error("malformed opcode pattern {0:?}")]
  BadPattern(String),

  #[error("boot ROM must be 256 bytes long, got {0}")]
  BootRomSize(usize),

  #[error("boot ROM has SHA-256 {0}, which is not a known DMG boot ROM")]
  BootRomDigest(String),

  #[error("cartridge must be {expected} bytes long, got {actual}")]
  CartridgeSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
