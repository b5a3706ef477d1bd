//! Bitmap fonts for the glyph renderer.
//!
//! Glyph data is stored one byte per glyph column, least significant bit on the top row, which is
//! the same packing the controller uses for its display RAM.

mod glyphs;

use crate::error::UnknownFont;

/// An immutable description of a fixed-width bitmap font.
#[derive(Debug, PartialEq, Eq)]
pub struct Font {
    width: u8,
    height: u8,
    space: u8,
    offset: u8,
    data: &'static [u8],
}

impl Font {
    /// Describe a font whose glyphs are `width` columns of `height` rows (at most 8), separated
    /// by `space` blank columns when laid out as text. `data` holds the glyph for character code
    /// `offset` first, followed by every consecutive code.
    pub const fn new(width: u8, height: u8, space: u8, offset: u8, data: &'static [u8]) -> Self {
        assert!(width > 0, "glyphs must be at least one column wide");
        assert!(height > 0 && height <= 8, "glyph columns are a single byte");
        assert!(data.len() % width as usize == 0, "glyph data must hold whole glyphs");
        Font {
            width,
            height,
            space,
            offset,
            data,
        }
    }

    pub fn glyph_width(&self) -> u8 {
        self.width
    }

    pub fn glyph_height(&self) -> u8 {
        self.height
    }

    /// Blank columns between two glyphs of a line of text.
    pub fn character_space(&self) -> u8 {
        self.space
    }

    /// Character code of the first glyph in the data table.
    pub fn character_offset(&self) -> u8 {
        self.offset
    }

    pub fn data(&self) -> &'static [u8] {
        self.data
    }

    /// Number of glyphs in the table.
    pub fn len(&self) -> usize {
        self.data.len() / self.width as usize
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Horizontal distance from one glyph to the next.
    pub fn advance(&self) -> i32 {
        self.width as i32 + self.space as i32
    }

    /// Vertical distance from one line of wrapped text to the next.
    pub fn line_height(&self) -> i32 {
        self.height as i32 + 1
    }

    /// The columns of the glyph for character `code`, if the font has one.
    pub fn glyph(&self, code: u8) -> Option<&'static [u8]> {
        let index = code.checked_sub(self.offset)? as usize * self.width as usize;
        self.data.get(index..index + self.width as usize)
    }
}

/// Printable ASCII, 5x7, with one blank column between glyphs.
pub static FONT_5X7: Font = Font::new(5, 7, 1, b' ', &glyphs::GLYPHS_5X7);

/// Printable ASCII, 5x8. The same shapes as [`FONT_5X7`] with true descenders on `g j p q y`.
pub static FONT_5X8: Font = Font::new(5, 8, 1, b' ', &glyphs::GLYPHS_5X8);

/// Printable ASCII, 6x8. The 5x8 shapes in a 6-column cell with the spacing built in.
pub static FONT_6X8: Font = Font::new(6, 8, 0, b' ', &glyphs::GLYPHS_6X8);

/// Printable ASCII, 8x8, filling the whole cell.
pub static FONT_8X8: Font = Font::new(8, 8, 0, b' ', &glyphs::GLYPHS_8X8);

/// Identifies one of the built-in fonts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FontId {
    Font5x7 = 0,
    #[default]
    Font5x8 = 1,
    Font6x8 = 2,
    Font8x8 = 3,
}

impl FontId {
    pub const ALL: [FontId; 4] = [
        FontId::Font5x7,
        FontId::Font5x8,
        FontId::Font6x8,
        FontId::Font8x8,
    ];

    /// Look up the font by its numeric identifier.
    pub fn from_u8(id: u8) -> Option<Self> {
        FontId::ALL.get(id as usize).copied()
    }

    pub fn font(self) -> &'static Font {
        match self {
            FontId::Font5x7 => &FONT_5X7,
            FontId::Font5x8 => &FONT_5X8,
            FontId::Font6x8 => &FONT_6X8,
            FontId::Font8x8 => &FONT_8X8,
        }
    }
}

impl TryFrom<u8> for FontId {
    type Error = UnknownFont;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        FontId::from_u8(id).ok_or(UnknownFont(id))
    }
}

impl From<FontId> for &'static Font {
    fn from(id: FontId) -> Self {
        id.font()
    }
}
