//! Background rendering from a copy of video memory.

use crate::mem::{Memory, VRAM_START};

pub const WIDTH: usize = 160;
pub const HEIGHT: usize = 144;

const LCDC: u16 = 0xff40;
const SCY: u16 = 0xff42;
const SCX: u16 = 0xff43;
const BGP: u16 = 0xff47;

/// Four shades, lightest first, as 0RGB.
pub type Palette = [u32; 4];

pub const GRAY: Palette = [0xffffff, 0xaaaaaa, 0x555555, 0x000000];
/// https://upload.wikimedia.org/wikipedia/commons/f/f7/Screen_color_test_Gameboy.png
pub const GREEN: Palette = [0x9bbc0f, 0x8bac0f, 0x306230, 0x0f380f];

/// What the renderer needs, copied out of the machine between frames.
#[derive(Clone)]
pub struct VideoSnapshot {
  vram: Vec<u8>,
  pub lcdc: u8,
  pub scx: u8,
  pub scy: u8,
  pub bgp: u8,
}

impl VideoSnapshot {
  pub fn new(mem: &Memory) -> VideoSnapshot {
    VideoSnapshot {
      vram: mem.vram().to_vec(),
      lcdc: mem.peek(LCDC),
      scx: mem.peek(SCX),
      scy: mem.peek(SCY),
      bgp: mem.peek(BGP),
    }
  }

  fn vram(&self, addr: u16) -> u8 {
    self.vram[(addr - VRAM_START) as usize]
  }

  fn lcd_enabled(&self) -> bool {
    self.lcdc & 0x80 != 0
  }

  fn bg_enabled(&self) -> bool {
    self.lcdc & 0x01 != 0
  }

  fn tile_map(&self) -> u16 {
    if self.lcdc & 0x08 != 0 {
      0x9c00
    } else {
      0x9800
    }
  }

  /// Address of the first byte of tile `index` in the selected tile set.
  fn tile_addr(&self, index: u8) -> u16 {
    if self.lcdc & 0x10 != 0 {
      0x8000 + u16::from(index) * 16
    } else {
      // Signed indices around 0x9000.
      (0x9000 + i32::from(index as i8) * 16) as u16
    }
  }

  /// Shade 0-3 of the background pixel at (x, y) in the 256x256 map.
  fn bg_shade(&self, x: u8, y: u8) -> u8 {
    let (tx, ty) = (u16::from(x / 8), u16::from(y / 8));
    let index = self.vram(self.tile_map() + ty * 32 + tx);
    let line = self.tile_addr(index) + u16::from(y % 8) * 2;
    let lo = self.vram(line);
    let hi = self.vram(line + 1);
    let bit = 7 - (x % 8);
    let color = ((hi >> bit) & 1) << 1 | ((lo >> bit) & 1);
    (self.bgp >> (color * 2)) & 0x03
  }

  /// Render the background layer into a WIDTH x HEIGHT buffer.
  pub fn render(&self, palette: &Palette) -> Vec<u32> {
    let mut screen = vec![palette[0]; WIDTH * HEIGHT];
    if !self.lcd_enabled() || !self.bg_enabled() {
      return screen;
    }
    for y in 0..HEIGHT {
      for x in 0..WIDTH {
        // The map wraps around in both directions.
        let bx = self.scx.wrapping_add(x as u8);
        let by = self.scy.wrapping_add(y as u8);
        screen[y * WIDTH + x] = palette[self.bg_shade(bx, by) as usize];
      }
    }
    screen
  }
}
