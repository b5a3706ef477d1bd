//! Text and bitmap rendering.

use itertools::iproduct;

use super::Canvas;
use crate::font::Font;

/// Characters above U+00FF and characters the font has no glyph for are skipped.
pub fn draw_char<C: Canvas + ?Sized>(c: &mut C, x: i32, y: i32, ch: char, font: &Font) {
    let code = match u8::try_from(u32::from(ch)) {
        Ok(code) => code,
        Err(_) => return,
    };
    let glyph = match font.glyph(code) {
        Some(glyph) => glyph,
        None => return,
    };
    let rows = font.glyph_height() as i32;

    for (col, &bits) in glyph.iter().enumerate() {
        for row in 0..rows {
            if bits & (1 << row) != 0 {
                c.set_pixel(x.saturating_add(col as i32), y.saturating_add(row));
            }
        }
    }
}

pub fn draw_text<C: Canvas + ?Sized>(c: &mut C, mut x: i32, y: i32, text: &str, font: &Font) {
    for ch in text.chars().take_while(|&ch| ch != '\0') {
        draw_char(c, x, y, ch, font);
        x = x.saturating_add(font.advance());
    }
}

/// The wrap decision is made after each glyph: if the next one would end past the right edge,
/// the cursor moves to column 0 one glyph height plus one row further down.
pub fn draw_text_wrapped<C: Canvas + ?Sized>(
    c: &mut C,
    mut x: i32,
    mut y: i32,
    text: &str,
    font: &Font,
) {
    let glyph_width = font.glyph_width() as i32;
    for ch in text.chars().take_while(|&ch| ch != '\0') {
        draw_char(c, x, y, ch, font);
        x = x.saturating_add(font.advance());
        if x.saturating_add(glyph_width) > c.width() {
            x = 0;
            y = y.saturating_add(font.line_height());
        }
    }
}

/// Byte `i + (j / 8) * w` holds pixel (`i`, `j`) in bit `j % 8`.
pub fn draw_bitmap<C: Canvas + ?Sized>(c: &mut C, x: i32, y: i32, bitmap: &[u8], w: i32, h: i32) {
    for (j, i) in iproduct!(0..h, 0..w) {
        let index = i as i64 + (j / 8) as i64 * w as i64;
        if byte_at(bitmap, index).map_or(false, |b| b & (1 << (j % 8)) != 0) {
            c.set_pixel(x.saturating_add(i), y.saturating_add(j));
        }
    }
}

/// Byte `j * ceil(w / 8) + i / 8` holds pixel (`i`, `j`) in bit `0x80 >> (i % 8)`.
pub fn draw_bitmap_horizontal<C: Canvas + ?Sized>(
    c: &mut C,
    x: i32,
    y: i32,
    bitmap: &[u8],
    w: i32,
    h: i32,
) {
    let bytes_per_row = (w as i64 + 7) / 8;
    for (j, i) in iproduct!(0..h, 0..w) {
        let index = j as i64 * bytes_per_row + (i / 8) as i64;
        if byte_at(bitmap, index).map_or(false, |b| b & (0x80 >> (i % 8)) != 0) {
            c.set_pixel(x.saturating_add(i), y.saturating_add(j));
        }
    }
}

fn byte_at(bitmap: &[u8], index: i64) -> Option<u8> {
    usize::try_from(index).ok().and_then(|i| bitmap.get(i).copied())
}
