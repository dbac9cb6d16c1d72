use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

pub const BIOS_SIZE: usize = 256;

/// SHA-256 of the DMG boot ROM.
pub const BIOS_SHA256: &str =
  "cf053eccb4ccafff9e67339d4e78e98dce7d1ed59be819d2a1ba2232c6fce1c7";

/// The 256-byte boot ROM mapped over 0x0000-0x00ff at power on.
#[derive(Clone)]
pub struct BootRom {
  data: [u8; BIOS_SIZE],
}

impl BootRom {
  /// Check the size and the digest of `bytes` before accepting them.
  pub fn new(bytes: &[u8]) -> Result<BootRom> {
    if bytes.len() != BIOS_SIZE {
      return Err(Error::BootRomSize(bytes.len()));
    }
    let digest = format!("{:x}", Sha256::digest(bytes));
    if digest != BIOS_SHA256 {
      return Err(Error::BootRomDigest(digest));
    }
    Ok(BootRom::unchecked(bytes))
  }

  /// Accept any 256 bytes. Used to run hand-written boot programs in tests.
  pub(crate) fn unchecked(bytes: &[u8]) -> BootRom {
    let mut data = [0; BIOS_SIZE];
    data.copy_from_slice(bytes);
    BootRom { data }
  }

  pub fn rb(&self, addr: u16) -> u8 {
    self.data[addr as usize]
  }
}
