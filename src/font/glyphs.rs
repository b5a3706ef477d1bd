//! Glyph tables for the built-in fonts, printable ASCII (32 to 126) in code order.

const GLYPH_COUNT: usize = 95;

/// Five columns per glyph, seven rows, LSB on top.
#[rustfmt::skip]
pub(super) const GLYPHS_5X7: [u8; GLYPH_COUNT * 5] = [
    0x00, 0x00, 0x00, 0x00, 0x00, // space
    0x00, 0x00, 0x5F, 0x00, 0x00, // !
    0x00, 0x07, 0x00, 0x07, 0x00, // "
    0x14, 0x7F, 0x14, 0x7F, 0x14, // #
    0x24, 0x2A, 0x7F, 0x2A, 0x12, // $
    0x23, 0x13, 0x08, 0x64, 0x62, // %
    0x36, 0x49, 0x55, 0x22, 0x50, // &
    0x00, 0x05, 0x03, 0x00, 0x00, // '
    0x00, 0x1C, 0x22, 0x41, 0x00, // (
    0x00, 0x41, 0x22, 0x1C, 0x00, // )
    0x08, 0x2A, 0x1C, 0x2A, 0x08, // *
    0x08, 0x08, 0x3E, 0x08, 0x08, // +
    0x00, 0x50, 0x30, 0x00, 0x00, // ,
    0x08, 0x08, 0x08, 0x08, 0x08, // -
    0x00, 0x60, 0x60, 0x00, 0x00, // .
    0x20, 0x10, 0x08, 0x04, 0x02, // /
    0x3E, 0x51, 0x49, 0x45, 0x3E, // 0
    0x00, 0x42, 0x7F, 0x40, 0x00, // 1
    0x42, 0x61, 0x51, 0x49, 0x46, // 2
    0x21, 0x41, 0x45, 0x4B, 0x31, // 3
    0x18, 0x14, 0x12, 0x7F, 0x10, // 4
    0x27, 0x45, 0x45, 0x45, 0x39, // 5
    0x3C, 0x4A, 0x49, 0x49, 0x30, // 6
    0x01, 0x71, 0x09, 0x05, 0x03, // 7
    0x36, 0x49, 0x49, 0x49, 0x36, // 8
    0x06, 0x49, 0x49, 0x29, 0x1E, // 9
    0x00, 0x36, 0x36, 0x00, 0x00, // :
    0x00, 0x56, 0x36, 0x00, 0x00, // ;
    0x00, 0x08, 0x14, 0x22, 0x41, // <
    0x14, 0x14, 0x14, 0x14, 0x14, // =
    0x41, 0x22, 0x14, 0x08, 0x00, // >
    0x02, 0x01, 0x51, 0x09, 0x06, // ?
    0x32, 0x49, 0x79, 0x41, 0x3E, // @
    0x7E, 0x11, 0x11, 0x11, 0x7E, // A
    0x7F, 0x49, 0x49, 0x49, 0x36, // B
    0x3E, 0x41, 0x41, 0x41, 0x22, // C
    0x7F, 0x41, 0x41, 0x22, 0x1C, // D
    0x7F, 0x49, 0x49, 0x49, 0x41, // E
    0x7F, 0x09, 0x09, 0x01, 0x01, // F
    0x3E, 0x41, 0x41, 0x51, 0x32, // G
    0x7F, 0x08, 0x08, 0x08, 0x7F, // H
    0x00, 0x41, 0x7F, 0x41, 0x00, // I
    0x20, 0x40, 0x41, 0x3F, 0x01, // J
    0x7F, 0x08, 0x14, 0x22, 0x41, // K
    0x7F, 0x40, 0x40, 0x40, 0x40, // L
    0x7F, 0x02, 0x04, 0x02, 0x7F, // M
    0x7F, 0x04, 0x08, 0x10, 0x7F, // N
    0x3E, 0x41, 0x41, 0x41, 0x3E, // O
    0x7F, 0x09, 0x09, 0x09, 0x06, // P
    0x3E, 0x41, 0x51, 0x21, 0x5E, // Q
    0x7F, 0x09, 0x19, 0x29, 0x46, // R
    0x46, 0x49, 0x49, 0x49, 0x31, // S
    0x01, 0x01, 0x7F, 0x01, 0x01, // T
    0x3F, 0x40, 0x40, 0x40, 0x3F, // U
    0x1F, 0x20, 0x40, 0x20, 0x1F, // V
    0x7F, 0x20, 0x18, 0x20, 0x7F, // W
    0x63, 0x14, 0x08, 0x14, 0x63, // X
    0x03, 0x04, 0x78, 0x04, 0x03, // Y
    0x61, 0x51, 0x49, 0x45, 0x43, // Z
    0x00, 0x00, 0x7F, 0x41, 0x41, // [
    0x02, 0x04, 0x08, 0x10, 0x20, // backslash
    0x41, 0x41, 0x7F, 0x00, 0x00, // ]
    0x04, 0x02, 0x01, 0x02, 0x04, // ^
    0x40, 0x40, 0x40, 0x40, 0x40, // _
    0x00, 0x01, 0x02, 0x04, 0x00, // `
    0x20, 0x54, 0x54, 0x54, 0x78, // a
    0x7F, 0x48, 0x44, 0x44, 0x38, // b
    0x38, 0x44, 0x44, 0x44, 0x20, // c
    0x38, 0x44, 0x44, 0x48, 0x7F, // d
    0x38, 0x54, 0x54, 0x54, 0x18, // e
    0x08, 0x7E, 0x09, 0x01, 0x02, // f
    0x0C, 0x52, 0x52, 0x52, 0x3E, // g
    0x7F, 0x08, 0x04, 0x04, 0x78, // h
    0x00, 0x44, 0x7D, 0x40, 0x00, // i
    0x20, 0x40, 0x44, 0x3D, 0x00, // j
    0x7F, 0x10, 0x28, 0x44, 0x00, // k
    0x00, 0x41, 0x7F, 0x40, 0x00, // l
    0x7C, 0x04, 0x18, 0x04, 0x78, // m
    0x7C, 0x08, 0x04, 0x04, 0x78, // n
    0x38, 0x44, 0x44, 0x44, 0x38, // o
    0x7C, 0x14, 0x14, 0x14, 0x08, // p
    0x08, 0x14, 0x14, 0x18, 0x7C, // q
    0x7C, 0x08, 0x04, 0x04, 0x08, // r
    0x48, 0x54, 0x54, 0x54, 0x20, // s
    0x04, 0x3F, 0x44, 0x40, 0x20, // t
    0x3C, 0x40, 0x40, 0x20, 0x7C, // u
    0x1C, 0x20, 0x40, 0x20, 0x1C, // v
    0x3C, 0x40, 0x30, 0x40, 0x3C, // w
    0x44, 0x28, 0x10, 0x28, 0x44, // x
    0x0C, 0x50, 0x50, 0x50, 0x3C, // y
    0x44, 0x64, 0x54, 0x4C, 0x44, // z
    0x00, 0x08, 0x36, 0x41, 0x00, // {
    0x00, 0x00, 0x7F, 0x00, 0x00, // |
    0x00, 0x41, 0x36, 0x08, 0x00, // }
    0x08, 0x04, 0x08, 0x10, 0x08, // ~
];

pub(super) const GLYPHS_5X8: [u8; GLYPH_COUNT * 5] = with_descenders(GLYPHS_5X7);

pub(super) const GLYPHS_6X8: [u8; GLYPH_COUNT * 6] = pad_columns(GLYPHS_5X8);

pub(super) const GLYPHS_8X8: [u8; GLYPH_COUNT * 8] = transpose(ROWS_8X8);

/// Lowercase letters whose 8-row shapes drop below the baseline.
const DESCENDERS: [(u8, [u8; 5]); 5] = [
    (b'g', [0x18, 0xA4, 0xA4, 0xA4, 0x7C]),
    (b'j', [0x40, 0x80, 0x84, 0x7D, 0x00]),
    (b'p', [0xFC, 0x24, 0x24, 0x24, 0x18]),
    (b'q', [0x18, 0x24, 0x24, 0x18, 0xFC]),
    (b'y', [0x9C, 0xA0, 0xA0, 0xA0, 0x7C]),
];

const fn with_descenders(mut glyphs: [u8; GLYPH_COUNT * 5]) -> [u8; GLYPH_COUNT * 5] {
    let mut i = 0;
    while i < DESCENDERS.len() {
        let (code, columns) = DESCENDERS[i];
        let base = (code - b' ') as usize * 5;
        let mut col = 0;
        while col < 5 {
            glyphs[base + col] = columns[col];
            col += 1;
        }
        i += 1;
    }
    glyphs
}

const fn pad_columns(narrow: [u8; GLYPH_COUNT * 5]) -> [u8; GLYPH_COUNT * 6] {
    let mut wide = [0; GLYPH_COUNT * 6];
    let mut glyph = 0;
    while glyph < GLYPH_COUNT {
        let mut col = 0;
        while col < 5 {
            wide[glyph * 6 + col] = narrow[glyph * 5 + col];
            col += 1;
        }
        glyph += 1;
    }
    wide
}

/// Turn row-major glyphs (one byte per row, MSB on the left) into column-major ones.
const fn transpose(rows: [u8; GLYPH_COUNT * 8]) -> [u8; GLYPH_COUNT * 8] {
    let mut columns = [0; GLYPH_COUNT * 8];
    let mut glyph = 0;
    while glyph < GLYPH_COUNT {
        let mut row = 0;
        while row < 8 {
            let bits = rows[glyph * 8 + row];
            let mut col = 0;
            while col < 8 {
                if bits & (0x80 >> col) != 0 {
                    columns[glyph * 8 + col] |= 1 << row;
                }
                col += 1;
            }
            row += 1;
        }
        glyph += 1;
    }
    columns
}

/// Eight rows per glyph, MSB on the left.
#[rustfmt::skip]
const ROWS_8X8: [u8; GLYPH_COUNT * 8] = [
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // space
    0x18, 0x18, 0x18, 0x18, 0x18, 0x00, 0x18, 0x00, // !
    0x6C, 0x6C, 0x24, 0x00, 0x00, 0x00, 0x00, 0x00, // "
    0x6C, 0x6C, 0xFE, 0x6C, 0xFE, 0x6C, 0x6C, 0x00, // #
    0x18, 0x7E, 0xC0, 0x7C, 0x06, 0xFC, 0x18, 0x00, // $
    0x00, 0xC6, 0xCC, 0x18, 0x30, 0x66, 0xC6, 0x00, // %
    0x38, 0x6C, 0x38, 0x76, 0xDC, 0xCC, 0x76, 0x00, // &
    0x18, 0x18, 0x30, 0x00, 0x00, 0x00, 0x00, 0x00, // '
    0x0C, 0x18, 0x30, 0x30, 0x30, 0x18, 0x0C, 0x00, // (
    0x30, 0x18, 0x0C, 0x0C, 0x0C, 0x18, 0x30, 0x00, // )
    0x00, 0x66, 0x3C, 0xFF, 0x3C, 0x66, 0x00, 0x00, // *
    0x00, 0x18, 0x18, 0x7E, 0x18, 0x18, 0x00, 0x00, // +
    0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x30, // ,
    0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00, // -
    0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00, // .
    0x06, 0x0C, 0x18, 0x30, 0x60, 0xC0, 0x80, 0x00, // /
    0x7C, 0xCE, 0xDE, 0xF6, 0xE6, 0xC6, 0x7C, 0x00, // 0
    0x18, 0x38, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00, // 1
    0x7C, 0xC6, 0x06, 0x7C, 0xC0, 0xC0, 0xFE, 0x00, // 2
    0xFC, 0x06, 0x06, 0x3C, 0x06, 0x06, 0xFC, 0x00, // 3
    0x0C, 0xCC, 0xCC, 0xCC, 0xFE, 0x0C, 0x0C, 0x00, // 4
    0xFE, 0xC0, 0xFC, 0x06, 0x06, 0xC6, 0x7C, 0x00, // 5
    0x7C, 0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0x7C, 0x00, // 6
    0xFE, 0x06, 0x06, 0x0C, 0x18, 0x18, 0x18, 0x00, // 7
    0x7C, 0xC6, 0xC6, 0x7C, 0xC6, 0xC6, 0x7C, 0x00, // 8
    0x7C, 0xC6, 0xC6, 0x7E, 0x06, 0x06, 0x7C, 0x00, // 9
    0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x00, // :
    0x00, 0x18, 0x18, 0x00, 0x00, 0x18, 0x18, 0x30, // ;
    0x0C, 0x18, 0x30, 0x60, 0x30, 0x18, 0x0C, 0x00, // <
    0x00, 0x00, 0x7E, 0x00, 0x7E, 0x00, 0x00, 0x00, // =
    0x30, 0x18, 0x0C, 0x06, 0x0C, 0x18, 0x30, 0x00, // >
    0x3C, 0x66, 0x0C, 0x18, 0x18, 0x00, 0x18, 0x00, // ?
    0x7C, 0xC6, 0xDE, 0xDE, 0xDE, 0xC0, 0x7E, 0x00, // @
    0x38, 0x6C, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0x00, // A
    0xFC, 0xC6, 0xC6, 0xFC, 0xC6, 0xC6, 0xFC, 0x00, // B
    0x7C, 0xC6, 0xC0, 0xC0, 0xC0, 0xC6, 0x7C, 0x00, // C
    0xF8, 0xCC, 0xC6, 0xC6, 0xC6, 0xCC, 0xF8, 0x00, // D
    0xFE, 0xC0, 0xC0, 0xF8, 0xC0, 0xC0, 0xFE, 0x00, // E
    0xFE, 0xC0, 0xC0, 0xF8, 0xC0, 0xC0, 0xC0, 0x00, // F
    0x7C, 0xC6, 0xC0, 0xCE, 0xC6, 0xC6, 0x7C, 0x00, // G
    0xC6, 0xC6, 0xC6, 0xFE, 0xC6, 0xC6, 0xC6, 0x00, // H
    0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x7E, 0x00, // I
    0x06, 0x06, 0x06, 0x06, 0xC6, 0xC6, 0x7C, 0x00, // J
    0xC6, 0xCC, 0xD8, 0xF0, 0xD8, 0xCC, 0xC6, 0x00, // K
    0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xC0, 0xFE, 0x00, // L
    0xC6, 0xEE, 0xFE, 0xD6, 0xC6, 0xC6, 0xC6, 0x00, // M
    0xC6, 0xE6, 0xF6, 0xDE, 0xCE, 0xC6, 0xC6, 0x00, // N
    0x7C, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C, 0x00, // O
    0xFC, 0xC6, 0xC6, 0xFC, 0xC0, 0xC0, 0xC0, 0x00, // P
    0x7C, 0xC6, 0xC6, 0xC6, 0xD6, 0xDE, 0x7C, 0x06, // Q
    0xFC, 0xC6, 0xC6, 0xFC, 0xD8, 0xCC, 0xC6, 0x00, // R
    0x7C, 0xC6, 0xC0, 0x7C, 0x06, 0xC6, 0x7C, 0x00, // S
    0x7E, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00, // T
    0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0xC6, 0x7C, 0x00, // U
    0xC6, 0xC6, 0xC6, 0xC6, 0x6C, 0x38, 0x10, 0x00, // V
    0xC6, 0xC6, 0xC6, 0xD6, 0xFE, 0xEE, 0xC6, 0x00, // W
    0xC6, 0xC6, 0x6C, 0x38, 0x6C, 0xC6, 0xC6, 0x00, // X
    0x66, 0x66, 0x66, 0x3C, 0x18, 0x18, 0x18, 0x00, // Y
    0xFE, 0x06, 0x0C, 0x18, 0x30, 0x60, 0xFE, 0x00, // Z
    0x3C, 0x30, 0x30, 0x30, 0x30, 0x30, 0x3C, 0x00, // [
    0xC0, 0x60, 0x30, 0x18, 0x0C, 0x06, 0x02, 0x00, // backslash
    0x3C, 0x0C, 0x0C, 0x0C, 0x0C, 0x0C, 0x3C, 0x00, // ]
    0x10, 0x38, 0x6C, 0xC6, 0x00, 0x00, 0x00, 0x00, // ^
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xFE, // _
    0x18, 0x18, 0x0C, 0x00, 0x00, 0x00, 0x00, 0x00, // `
    0x00, 0x00, 0x7C, 0x06, 0x7E, 0xC6, 0x7E, 0x00, // a
    0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0xC6, 0xFC, 0x00, // b
    0x00, 0x00, 0x7C, 0xC6, 0xC0, 0xC6, 0x7C, 0x00, // c
    0x06, 0x06, 0x7E, 0xC6, 0xC6, 0xC6, 0x7E, 0x00, // d
    0x00, 0x00, 0x7C, 0xC6, 0xFE, 0xC0, 0x7C, 0x00, // e
    0x1C, 0x30, 0x30, 0x7C, 0x30, 0x30, 0x30, 0x00, // f
    0x00, 0x00, 0x7E, 0xC6, 0xC6, 0x7E, 0x06, 0x7C, // g
    0xC0, 0xC0, 0xFC, 0xC6, 0xC6, 0xC6, 0xC6, 0x00, // h
    0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x3C, 0x00, // i
    0x18, 0x00, 0x38, 0x18, 0x18, 0x18, 0x18, 0x70, // j
    0xC0, 0xC0, 0xC6, 0xCC, 0xF8, 0xCC, 0xC6, 0x00, // k
    0x38, 0x18, 0x18, 0x18, 0x18, 0x18, 0x3C, 0x00, // l
    0x00, 0x00, 0xEC, 0xFE, 0xD6, 0xC6, 0xC6, 0x00, // m
    0x00, 0x00, 0xFC, 0xC6, 0xC6, 0xC6, 0xC6, 0x00, // n
    0x00, 0x00, 0x7C, 0xC6, 0xC6, 0xC6, 0x7C, 0x00, // o
    0x00, 0x00, 0xFC, 0xC6, 0xC6, 0xFC, 0xC0, 0xC0, // p
    0x00, 0x00, 0x7E, 0xC6, 0xC6, 0x7E, 0x06, 0x06, // q
    0x00, 0x00, 0xDC, 0xE6, 0xC0, 0xC0, 0xC0, 0x00, // r
    0x00, 0x00, 0x7E, 0xC0, 0x7C, 0x06, 0xFC, 0x00, // s
    0x30, 0x30, 0x7C, 0x30, 0x30, 0x30, 0x1C, 0x00, // t
    0x00, 0x00, 0xC6, 0xC6, 0xC6, 0xC6, 0x7E, 0x00, // u
    0x00, 0x00, 0xC6, 0xC6, 0xC6, 0x6C, 0x38, 0x00, // v
    0x00, 0x00, 0xC6, 0xC6, 0xD6, 0xFE, 0x6C, 0x00, // w
    0x00, 0x00, 0xC6, 0x6C, 0x38, 0x6C, 0xC6, 0x00, // x
    0x00, 0x00, 0xC6, 0xC6, 0xC6, 0x7E, 0x06, 0x7C, // y
    0x00, 0x00, 0xFE, 0x0C, 0x38, 0x60, 0xFE, 0x00, // z
    0x0E, 0x18, 0x18, 0x70, 0x18, 0x18, 0x0E, 0x00, // {
    0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x18, 0x00, // |
    0x70, 0x18, 0x18, 0x0E, 0x18, 0x18, 0x70, 0x00, // }
    0x72, 0x9C, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, // ~
];
