//! Drawing operations over anything that can turn pixels on.
//!
//! Every primitive is built only from `set_pixel` calls and never reads pixels back, so drawing
//! is additive and anything that falls outside the canvas is clipped silently by `set_pixel`.

pub mod glyph;
pub mod raster;

use crate::font::Font;

/// A monochrome surface with additive pixel writes.
///
/// Implementors supply the size and `set_pixel`; the shape, text and bitmap operations are
/// provided on top of them.
pub trait Canvas {
    fn width(&self) -> i32;

    fn height(&self) -> i32;

    /// Turn on the pixel at (`x`, `y`), or do nothing if it lies outside the canvas.
    fn set_pixel(&mut self, x: i32, y: i32);

    /// Draw a line from (`x0`, `y0`) to (`x1`, `y1`), both endpoints included.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        raster::line(self, x0, y0, x1, y1)
    }

    /// Outline the `w` x `h` rectangle with its top-left corner at (`x`, `y`).
    fn draw_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        raster::rect(self, x, y, w, h)
    }

    /// Fill the `w` x `h` rectangle with its top-left corner at (`x`, `y`).
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        raster::fill_rect(self, x, y, w, h)
    }

    /// Outline the circle of `radius` centred on (`x0`, `y0`).
    fn draw_circle(&mut self, x0: i32, y0: i32, radius: i32) {
        raster::circle(self, x0, y0, radius)
    }

    fn draw_triangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        raster::triangle(self, x0, y0, x1, y1, x2, y2)
    }

    fn fill_triangle(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, x2: i32, y2: i32) {
        raster::fill_triangle(self, x0, y0, x1, y1, x2, y2)
    }

    /// Draw one character with its top-left corner at (`x`, `y`).
    fn draw_char(&mut self, x: i32, y: i32, c: char, font: &Font) {
        glyph::draw_char(self, x, y, c, font)
    }

    /// Draw `text` on a single line starting at (`x`, `y`). Stops at the first NUL.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, font: &Font) {
        glyph::draw_text(self, x, y, text, font)
    }

    /// Draw `text` starting at (`x`, `y`), moving to the start of the next line whenever the
    /// next glyph would not fit in the canvas width.
    fn draw_text_wrapped(&mut self, x: i32, y: i32, text: &str, font: &Font) {
        glyph::draw_text_wrapped(self, x, y, text, font)
    }

    /// Blit a column-packed bitmap: 8-row strips, one byte per column, LSB on top.
    fn draw_bitmap(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32) {
        glyph::draw_bitmap(self, x, y, bitmap, w, h)
    }

    /// Blit a row-packed bitmap: each row padded to whole bytes, MSB on the left.
    fn draw_bitmap_horizontal(&mut self, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32) {
        glyph::draw_bitmap_horizontal(self, x, y, bitmap, w, h)
    }
}
