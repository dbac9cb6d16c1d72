use crate::error::{Error, Result};

/// Size of a cartridge without a memory bank controller.
pub const ROM_SIZE: usize = 0x8000;

const TITLE_START: usize = 0x0134;
const TITLE_END: usize = 0x0143;
const HEADER_CHECKSUM: usize = 0x014d;

/// A flat 32KiB ROM image with no bank switching.
#[derive(Debug)]
pub struct Cartridge {
  rom: Vec<u8>,
}

impl Cartridge {
  pub fn new(rom: Vec<u8>) -> Result<Cartridge> {
    if rom.len() != ROM_SIZE {
      return Err(Error::CartridgeSize {
        expected: ROM_SIZE,
        actual: rom.len(),
      });
    }
    Ok(Cartridge { rom })
  }

  pub fn rb(&self, addr: u16) -> u8 {
    self.rom[addr as usize]
  }

  /// The game title from the header, up to the first NUL.
  pub fn title(&self) -> String {
    self.rom[TITLE_START..=TITLE_END]
      .iter()
      .take_while(|&&b| b != 0)
      .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '?' })
      .collect()
  }

  /// The checksum the boot ROM computes over 0x0134-0x014c.
  pub fn header_checksum(&self) -> u8 {
    self.rom[TITLE_START..HEADER_CHECKSUM]
      .iter()
      .fold(0u8, |x, &b| x.wrapping_sub(b).wrapping_sub(1))
  }

  /// Whether the checksum stored at 0x014d matches the header. The boot ROM
  /// locks up when it does not.
  pub fn header_checksum_ok(&self) -> bool {
    self.header_checksum() == self.rom[HEADER_CHECKSUM]
  }
}
