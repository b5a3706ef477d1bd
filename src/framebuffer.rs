//! The in-memory image which `Display::flush` copies to the panel.

use crate::command::consts::{NUM_PIXEL_COLS, NUM_PIXEL_ROWS};
use crate::config::Config;
use crate::draw::Canvas;

/// Bytes needed for the largest panel the controller can drive.
pub const MAX_BUFFER_LEN: usize = NUM_PIXEL_COLS as usize * NUM_PIXEL_ROWS as usize / 8;

/// A packed one-bit-per-pixel image laid out exactly like the controller's display RAM in
/// horizontal addressing mode: `width` columns per page, `height / 8` pages, least significant
/// bit topmost.
///
/// Drawing through [`Canvas`] only ever turns pixels on. `clear` and `clear_pixel` turn them off.
#[derive(Clone)]
pub struct Framebuffer {
    buf: [u8; MAX_BUFFER_LEN],
    width: usize,
    height: usize,
}

impl Framebuffer {
    /// Create an empty framebuffer sized for `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            buf: [0; MAX_BUFFER_LEN],
            width: config.width() as usize,
            height: config.height() as usize,
        }
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Turn on the pixel at (`x`, `y`). Coordinates outside the panel, negative ones included,
    /// are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32) {
        if let Some((index, mask)) = self.locate(x, y) {
            self.buf[index] |= mask;
        }
    }

    /// Turn off the pixel at (`x`, `y`). Coordinates outside the panel are ignored.
    pub fn clear_pixel(&mut self, x: i32, y: i32) {
        if let Some((index, mask)) = self.locate(x, y) {
            self.buf[index] &= !mask;
        }
    }

    /// Whether the pixel at (`x`, `y`) is on. Outside the panel every pixel reads as off.
    pub fn get_pixel(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .map_or(false, |(index, mask)| self.buf[index] & mask != 0)
    }

    /// The packed image, `width * height / 8` bytes, in the order the controller expects it.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.width * self.height / 8]
    }

    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((x + (y / 8) * self.width, 1 << (y % 8)))
    }
}

impl Canvas for Framebuffer {
    fn width(&self) -> i32 {
        self.width as i32
    }

    fn height(&self) -> i32 {
        self.height as i32
    }

    fn set_pixel(&mut self, x: i32, y: i32) {
        Framebuffer::set_pixel(self, x, y)
    }
}
