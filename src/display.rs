use anyhow::{anyhow, Result};
use minifb::{KeyRepeat, Scale, Window, WindowOptions};

use dmg_core::mem::Key;
use dmg_core::video::{Palette, VideoSnapshot, HEIGHT, WIDTH};
use dmg_core::GameBoy;

pub struct Display {
  window: Window,
  palette: Palette,
}

fn key_from_code(code: minifb::Key) -> Option<Key> {
  match code {
    minifb::Key::Z => Some(Key::A),
    minifb::Key::X => Some(Key::B),
    minifb::Key::Enter => Some(Key::Start),
    minifb::Key::Space => Some(Key::Select),
    minifb::Key::Left => Some(Key::Left),
    minifb::Key::Right => Some(Key::Right),
    minifb::Key::Up => Some(Key::Up),
    minifb::Key::Down => Some(Key::Down),
    _ => None,
  }
}

impl Display {
  pub fn new(title: &str, scale: u32, palette: Palette) -> Result<Display> {
    let scale = match scale {
      1 => Scale::X1,
      2 => Scale::X2,
      4 => Scale::X4,
      8 => Scale::X8,
      _ => return Err(anyhow!("unsupported window scale {}", scale)),
    };
    let mut window = Window::new(
      title,
      WIDTH,
      HEIGHT,
      WindowOptions {
        scale,
        ..WindowOptions::default()
      },
    )
    .map_err(|e| anyhow!("could not open a window: {}", e))?;
    // The DMG refreshes at about 59.7Hz.
    window.set_target_fps(60);
    Ok(Display { window, palette })
  }

  pub fn is_open(&self) -> bool {
    self.window.is_open() && !self.window.is_key_down(minifb::Key::Escape)
  }

  pub fn redraw(&mut self, frame: &VideoSnapshot) -> Result<()> {
    let pixels = frame.render(&self.palette);
    self
      .window
      .update_with_buffer(&pixels, WIDTH, HEIGHT)
      .map_err(|e| anyhow!("could not draw the frame: {}", e))
  }

  /// Forward key presses and releases since the last frame.
  pub fn poll_keys(&self, gb: &mut GameBoy) {
    for code in self.window.get_keys_pressed(KeyRepeat::No) {
      if let Some(key) = key_from_code(code) {
        gb.key_down(key);
      }
    }
    for code in self.window.get_keys_released() {
      if let Some(key) = key_from_code(code) {
        gb.key_up(key);
      }
    }
  }
}
