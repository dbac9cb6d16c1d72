use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use dmg_core::mem::{BootRom, Cartridge, StdoutSink};
use dmg_core::video::{GRAY, GREEN};
use dmg_core::GameBoy;

mod display;

use crate::display::Display;

#[derive(Parser)]
#[command(name = "dmg", about = "Run a 32KiB Game Boy cartridge")]
struct Args {
  /// Path to the cartridge image
  rom: PathBuf,

  /// Path to the DMG boot ROM. Without it the machine starts at 0x0100
  #[arg(long)]
  bios: Option<PathBuf>,

  /// Use the green palette of the original screen
  #[arg(long)]
  green: bool,

  /// Window scale
  #[arg(long, default_value_t = 4, value_parser = parse_scale)]
  scale: u32,

  /// Trace every instruction
  #[arg(long)]
  verbose: bool,
}

fn parse_scale(s: &str) -> std::result::Result<u32, String> {
  match s.parse::<u32>() {
    Ok(n @ 1) | Ok(n @ 2) | Ok(n @ 4) | Ok(n @ 8) => Ok(n),
    _ => Err(format!("{} is not one of 1, 2, 4, 8", s)),
  }
}

fn main() -> Result<()> {
  let args = Args::parse();

  let filter = if args.verbose { "trace" } else { "info" };
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or(filter),
  )
  .init();

  let bios = match args.bios {
    Some(ref path) => {
      let bytes = fs::read(path)
        .with_context(|| format!("reading boot ROM {}", path.display()))?;
      Some(BootRom::new(&bytes).context("loading boot ROM")?)
    }
    None => None,
  };
  let rom = fs::read(&args.rom)
    .with_context(|| format!("reading cartridge {}", args.rom.display()))?;
  let cart = Cartridge::new(rom).context("loading cartridge")?;

  let mut gb = GameBoy::new(bios, cart)?;
  gb.set_serial_sink(Box::new(StdoutSink));

  let palette = if args.green { GREEN } else { GRAY };
  let title = gb.state.mem.cartridge().title();
  let mut display = Display::new(&title, args.scale, palette)?;

  info!("Starting emulator");
  while display.is_open() {
    gb.run_frame().context("emulation stopped")?;
    display.redraw(&gb.video_snapshot())?;
    display.poll_keys(&mut gb);
  }
  Ok(())
}
