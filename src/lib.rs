//! A DMG Game Boy processor and memory core.
//!
//! `GameBoy` is the entry point: build it from a cartridge (and optionally
//! the boot ROM), then call `run_frame` and render `video_snapshot`.

#[macro_use]
extern crate log;

pub mod cpu;
pub mod error;
pub mod gameboy;
pub mod interrupt;
pub mod mem;
pub mod state;
pub mod video;

pub use crate::error::{Error, Result};
pub use crate::gameboy::GameBoy;
