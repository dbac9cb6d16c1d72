use std::io::{self, Write};
use std::sync::mpsc::Sender;

/// Receives every byte the program sends over the link cable.
///
/// Implementations must not block: the core calls `send` in the middle of an
/// instruction.
pub trait SerialSink {
  fn send(&mut self, byte: u8);
}

/// Prints each byte as a character, the way test ROMs expect to be read.
#[derive(Debug, Default)]
pub struct StdoutSink;

impl SerialSink for StdoutSink {
  fn send(&mut self, byte: u8) {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    // Nothing sensible to do if stdout is gone.
    let _ = out.write_all(&[byte]);
    let _ = out.flush();
  }
}

/// An unbounded channel, so a slow reader never stalls the core.
impl SerialSink for Sender<u8> {
  fn send(&mut self, byte: u8) {
    if Sender::send(self, byte).is_err() {
      debug!("serial receiver hung up, dropping 0x{:02x}", byte);
    }
  }
}
