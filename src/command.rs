//! The command set for the SSD1306.
//!
//! Note 1: The display RAM of the SSD1306 is 128 columns by 64 rows, split into 8 pages of 8 rows
//! each. One byte of image data covers one column of one page, least significant bit on top. With
//! horizontal addressing the column pointer advances after every data byte and wraps to the next
//! page at the end of the column window.

use core::fmt;

use crate::error::Error;
use crate::interface::DisplayInterface;

pub mod consts {
    pub const NUM_PIXEL_COLS: u8 = 128;
    pub const NUM_PIXEL_ROWS: u8 = 64;
    pub const NUM_PAGES: u8 = NUM_PIXEL_ROWS / 8;
    pub const PIXEL_COL_MAX: u8 = NUM_PIXEL_COLS - 1;
    pub const PIXEL_ROW_MAX: u8 = NUM_PIXEL_ROWS - 1;
    pub const PAGE_MAX: u8 = NUM_PAGES - 1;
    /// The longest single command, opcode included.
    pub const MAX_COMMAND_LEN: usize = 3;
    /// Capacity of a `CommandBuffer`, enough for the whole init sequence.
    pub const COMMAND_BUFFER_LEN: usize = 32;
}

pub use self::consts::{NUM_PIXEL_COLS, NUM_PIXEL_ROWS};
use self::consts::*;

/// A command could not be encoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// An argument lies outside the range the controller accepts for this command.
    ArgumentOutOfRange,
    /// A `CommandBuffer` has no room left for the command.
    BufferFull,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::ArgumentOutOfRange => write!(f, "command argument out of range"),
            CommandError::BufferFull => write!(f, "command buffer full"),
        }
    }
}

/// How the RAM address pointer advances as image data is written.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddressMode {
    /// The column address increments after each byte, wrapping to the start column of the next
    /// page at the end of the column window.
    Horizontal,
    /// The page address increments after each byte, wrapping to the start page of the next column
    /// at the end of the page window.
    Vertical,
    /// The column address increments within the current page only.
    Page,
}

/// Setting of segment (column) remapping. Changing this setting will mirror the image
/// horizontally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnRemap {
    /// Column address 0 maps to SEG0.
    Forward,
    /// Column address 127 maps to SEG0.
    Reverse,
}

/// Setting of the COM line scanning of rows. Changing this setting will flip the image vertically.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComScanDirection {
    /// COM lines scan from COM0 to COM[N-1], so that row address 0 is the first row of the
    /// display.
    RowZeroFirst,
    /// COM lines scan from COM[N-1] to COM0, so that row address 0 is the last row of the display.
    RowZeroLast,
}

/// Setting the hardware layout of the COM pins. This is dictated by how the display module wires
/// the OLED matrix to the driver chip; see the module datasheet for the correct value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComLayout {
    /// Sequential COM pin configuration.
    Sequential,
    /// Alternative (odd/even interleaved) COM pin configuration. Used by most 128x64 modules.
    Alternative,
    /// Sequential, with left/right COM remapping.
    SequentialRemapped,
    /// Alternative, with left/right COM remapping.
    AlternativeRemapped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Control sleep mode. Sleeping turns the panel off while keeping display RAM.
    SetSleepMode(bool),
    /// Set the oscillator frequency (0-15) and the display clock divide ratio (1-16).
    SetClockDivider(u8, u8),
    /// Set the MUX ratio, the number of active COM lines and thus display rows. Range 16-64.
    SetMuxRatio(u8),
    /// Set the vertical shift of the COM lines relative to display RAM. Range 0-63.
    SetDisplayOffset(u8),
    /// Set the display RAM row shown on the first display row. Range 0-63.
    SetStartLine(u8),
    /// Enable or disable the internal charge pump regulator.
    SetChargePump(bool),
    /// Set the memory addressing mode.
    SetAddressMode(AddressMode),
    /// Set segment remapping.
    SetColumnRemap(ColumnRemap),
    /// Set the COM output scan direction.
    SetComScanDirection(ComScanDirection),
    /// Set the COM pins hardware configuration.
    SetComLayout(ComLayout),
    /// Set the contrast. Range 0-255.
    SetContrast(u8),
    /// Set the pre-charge period as (phase 1, phase 2) in DCLKs. Each phase is 1-15.
    SetPrechargePeriod(u8, u8),
    /// Set the raw VCOMH deselect level byte. Only bits 6:4 may be set.
    SetVcomhDeselectLevel(u8),
    /// Force every pixel on regardless of RAM content (`true`), or follow RAM (`false`).
    SetEntireDisplayOn(bool),
    /// Show RAM bits inverted (`true`) or normally (`false`).
    SetInverted(bool),
    /// Set the column window for horizontal or vertical addressing. Range 0-127, start <= end.
    SetColumnAddress(u8, u8),
    /// Set the page window for horizontal or vertical addressing. Range 0-7, start <= end.
    SetPageAddress(u8, u8),
}

macro_rules! ok_command {
    ($buf:ident, [$($byte:expr),+]) => {{
        let bytes = [$($byte),+];
        $buf[..bytes.len()].copy_from_slice(&bytes);
        Ok(&$buf[..bytes.len()])
    }};
}

impl Command {
    /// Encode the command, opcode and arguments, into `buf` and return the used prefix.
    pub fn encode(self, buf: &mut [u8; MAX_COMMAND_LEN]) -> Result<&[u8], CommandError> {
        match self {
            Command::SetSleepMode(ena) => ok_command!(
                buf,
                [match ena {
                    true => 0xAE,
                    false => 0xAF,
                }]
            ),
            Command::SetClockDivider(fosc, divide) => match (fosc, divide) {
                (0..=15, 1..=16) => ok_command!(buf, [0xD5, fosc << 4 | (divide - 1)]),
                _ => Err(CommandError::ArgumentOutOfRange),
            },
            Command::SetMuxRatio(ratio) => match ratio {
                16..=NUM_PIXEL_ROWS => ok_command!(buf, [0xA8, ratio - 1]),
                _ => Err(CommandError::ArgumentOutOfRange),
            },
            Command::SetDisplayOffset(offset) => match offset {
                0..=PIXEL_ROW_MAX => ok_command!(buf, [0xD3, offset]),
                _ => Err(CommandError::ArgumentOutOfRange),
            },
            Command::SetStartLine(line) => match line {
                0..=PIXEL_ROW_MAX => ok_command!(buf, [0x40 | line]),
                _ => Err(CommandError::ArgumentOutOfRange),
            },
            Command::SetChargePump(ena) => ok_command!(
                buf,
                [
                    0x8D,
                    match ena {
                        true => 0x14,
                        false => 0x10,
                    }
                ]
            ),
            Command::SetAddressMode(mode) => ok_command!(
                buf,
                [
                    0x20,
                    match mode {
                        AddressMode::Horizontal => 0x00,
                        AddressMode::Vertical => 0x01,
                        AddressMode::Page => 0x02,
                    }
                ]
            ),
            Command::SetColumnRemap(remap) => ok_command!(
                buf,
                [match remap {
                    ColumnRemap::Forward => 0xA0,
                    ColumnRemap::Reverse => 0xA1,
                }]
            ),
            Command::SetComScanDirection(dir) => ok_command!(
                buf,
                [match dir {
                    ComScanDirection::RowZeroFirst => 0xC0,
                    ComScanDirection::RowZeroLast => 0xC8,
                }]
            ),
            Command::SetComLayout(layout) => {
                let (alternative, remap) = match layout {
                    ComLayout::Sequential => (0x00, 0x00),
                    ComLayout::Alternative => (0x10, 0x00),
                    ComLayout::SequentialRemapped => (0x00, 0x20),
                    ComLayout::AlternativeRemapped => (0x10, 0x20),
                };
                ok_command!(buf, [0xDA, 0x02 | alternative | remap])
            }
            Command::SetContrast(contrast) => ok_command!(buf, [0x81, contrast]),
            Command::SetPrechargePeriod(phase_1, phase_2) => match (phase_1, phase_2) {
                (1..=15, 1..=15) => ok_command!(buf, [0xD9, phase_2 << 4 | phase_1]),
                _ => Err(CommandError::ArgumentOutOfRange),
            },
            Command::SetVcomhDeselectLevel(level) => match level & !0x70 {
                0 => ok_command!(buf, [0xDB, level]),
                _ => Err(CommandError::ArgumentOutOfRange),
            },
            Command::SetEntireDisplayOn(ena) => ok_command!(
                buf,
                [match ena {
                    true => 0xA5,
                    false => 0xA4,
                }]
            ),
            Command::SetInverted(ena) => ok_command!(
                buf,
                [match ena {
                    true => 0xA7,
                    false => 0xA6,
                }]
            ),
            Command::SetColumnAddress(start, end) => match (start, end) {
                (0..=PIXEL_COL_MAX, 0..=PIXEL_COL_MAX) if start <= end => {
                    ok_command!(buf, [0x21, start, end])
                }
                _ => Err(CommandError::ArgumentOutOfRange),
            },
            Command::SetPageAddress(start, end) => match (start, end) {
                (0..=PAGE_MAX, 0..=PAGE_MAX) if start <= end => ok_command!(buf, [0x22, start, end]),
                _ => Err(CommandError::ArgumentOutOfRange),
            },
        }
    }

    /// Encode the command and transmit it to the display at `iface` as a single command burst.
    pub fn send<DI>(self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        let mut buf = [0u8; MAX_COMMAND_LEN];
        let bytes = self.encode(&mut buf)?;
        iface.send_commands(bytes).map_err(Error::Interface)
    }
}

/// Accumulates encoded commands so a whole sequence goes out in one transfer.
pub struct CommandBuffer {
    buf: [u8; COMMAND_BUFFER_LEN],
    len: usize,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self {
            buf: [0; COMMAND_BUFFER_LEN],
            len: 0,
        }
    }

    /// Encode `cmd` onto the end of the buffer. On error the buffer is left unchanged.
    pub fn push(&mut self, cmd: Command) -> Result<&mut Self, CommandError> {
        let mut scratch = [0u8; MAX_COMMAND_LEN];
        let bytes = cmd.encode(&mut scratch)?;
        let end = self.len + bytes.len();
        if end > COMMAND_BUFFER_LEN {
            return Err(CommandError::BufferFull);
        }
        self.buf[self.len..end].copy_from_slice(bytes);
        self.len = end;
        Ok(self)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Transmit everything pushed so far as one command burst.
    pub fn send<DI>(&self, iface: &mut DI) -> Result<(), Error<DI::Error>>
    where
        DI: DisplayInterface,
    {
        log::trace!("sending {} command bytes", self.len);
        iface
            .send_commands(self.as_slice())
            .map_err(Error::Interface)
    }
}

impl Default for CommandBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interface::test_spy::TestSpyInterface;

    fn encoded(cmd: Command) -> Result<Vec<u8>, CommandError> {
        let mut buf = [0u8; MAX_COMMAND_LEN];
        cmd.encode(&mut buf).map(|b| b.to_vec())
    }

    #[test]
    fn sleep_mode() {
        assert_eq!(encoded(Command::SetSleepMode(true)), Ok(vec![0xAE]));
        assert_eq!(encoded(Command::SetSleepMode(false)), Ok(vec![0xAF]));
    }

    #[test]
    fn set_clock_divider() {
        assert_eq!(encoded(Command::SetClockDivider(8, 1)), Ok(vec![0xD5, 0x80]));
        assert_eq!(encoded(Command::SetClockDivider(15, 16)), Ok(vec![0xD5, 0xFF]));
        assert_eq!(encoded(Command::SetClockDivider(0, 0)), Err(CommandError::ArgumentOutOfRange));
        assert_eq!(encoded(Command::SetClockDivider(16, 1)), Err(CommandError::ArgumentOutOfRange));
        assert_eq!(encoded(Command::SetClockDivider(0, 17)), Err(CommandError::ArgumentOutOfRange));
    }

    #[test]
    fn set_mux_ratio() {
        assert_eq!(encoded(Command::SetMuxRatio(64)), Ok(vec![0xA8, 0x3F]));
        assert_eq!(encoded(Command::SetMuxRatio(16)), Ok(vec![0xA8, 0x0F]));
        assert_eq!(encoded(Command::SetMuxRatio(15)), Err(CommandError::ArgumentOutOfRange));
        assert_eq!(encoded(Command::SetMuxRatio(65)), Err(CommandError::ArgumentOutOfRange));
    }

    #[test]
    fn set_start_line_and_offset() {
        assert_eq!(encoded(Command::SetStartLine(0)), Ok(vec![0x40]));
        assert_eq!(encoded(Command::SetStartLine(63)), Ok(vec![0x7F]));
        assert_eq!(encoded(Command::SetStartLine(64)), Err(CommandError::ArgumentOutOfRange));
        assert_eq!(encoded(Command::SetDisplayOffset(23)), Ok(vec![0xD3, 23]));
        assert_eq!(encoded(Command::SetDisplayOffset(64)), Err(CommandError::ArgumentOutOfRange));
    }

    #[test]
    fn remapping() {
        assert_eq!(encoded(Command::SetColumnRemap(ColumnRemap::Forward)), Ok(vec![0xA0]));
        assert_eq!(encoded(Command::SetColumnRemap(ColumnRemap::Reverse)), Ok(vec![0xA1]));
        assert_eq!(
            encoded(Command::SetComScanDirection(ComScanDirection::RowZeroFirst)),
            Ok(vec![0xC0])
        );
        assert_eq!(
            encoded(Command::SetComScanDirection(ComScanDirection::RowZeroLast)),
            Ok(vec![0xC8])
        );
    }

    #[test]
    fn set_com_layout() {
        assert_eq!(encoded(Command::SetComLayout(ComLayout::Sequential)), Ok(vec![0xDA, 0x02]));
        assert_eq!(encoded(Command::SetComLayout(ComLayout::Alternative)), Ok(vec![0xDA, 0x12]));
        assert_eq!(
            encoded(Command::SetComLayout(ComLayout::SequentialRemapped)),
            Ok(vec![0xDA, 0x22])
        );
        assert_eq!(
            encoded(Command::SetComLayout(ComLayout::AlternativeRemapped)),
            Ok(vec![0xDA, 0x32])
        );
    }

    #[test]
    fn set_precharge_period() {
        assert_eq!(encoded(Command::SetPrechargePeriod(1, 15)), Ok(vec![0xD9, 0xF1]));
        assert_eq!(encoded(Command::SetPrechargePeriod(2, 2)), Ok(vec![0xD9, 0x22]));
        assert_eq!(encoded(Command::SetPrechargePeriod(0, 2)), Err(CommandError::ArgumentOutOfRange));
        assert_eq!(encoded(Command::SetPrechargePeriod(2, 16)), Err(CommandError::ArgumentOutOfRange));
    }

    #[test]
    fn set_vcomh_deselect_level() {
        assert_eq!(encoded(Command::SetVcomhDeselectLevel(0x40)), Ok(vec![0xDB, 0x40]));
        assert_eq!(encoded(Command::SetVcomhDeselectLevel(0x20)), Ok(vec![0xDB, 0x20]));
        assert_eq!(
            encoded(Command::SetVcomhDeselectLevel(0x41)),
            Err(CommandError::ArgumentOutOfRange)
        );
    }

    #[test]
    fn display_modes() {
        assert_eq!(encoded(Command::SetEntireDisplayOn(false)), Ok(vec![0xA4]));
        assert_eq!(encoded(Command::SetEntireDisplayOn(true)), Ok(vec![0xA5]));
        assert_eq!(encoded(Command::SetInverted(false)), Ok(vec![0xA6]));
        assert_eq!(encoded(Command::SetInverted(true)), Ok(vec![0xA7]));
        assert_eq!(encoded(Command::SetChargePump(true)), Ok(vec![0x8D, 0x14]));
        assert_eq!(encoded(Command::SetChargePump(false)), Ok(vec![0x8D, 0x10]));
        assert_eq!(encoded(Command::SetAddressMode(AddressMode::Horizontal)), Ok(vec![0x20, 0x00]));
        assert_eq!(encoded(Command::SetAddressMode(AddressMode::Page)), Ok(vec![0x20, 0x02]));
    }

    #[test]
    fn set_column_address() {
        let mut di = TestSpyInterface::new();
        Command::SetColumnAddress(0, 127).send(&mut di).unwrap();
        di.check_cmd(&[0x21, 0x00, 0x7F]);
        assert_eq!(
            Command::SetColumnAddress(0, 128).send(&mut di),
            Err(Error::Command(CommandError::ArgumentOutOfRange))
        );
        assert_eq!(
            Command::SetColumnAddress(42, 23).send(&mut di),
            Err(Error::Command(CommandError::ArgumentOutOfRange))
        );
    }

    #[test]
    fn set_page_address() {
        let mut di = TestSpyInterface::new();
        Command::SetPageAddress(0, 7).send(&mut di).unwrap();
        di.check_cmd(&[0x22, 0x00, 0x07]);
        assert_eq!(
            Command::SetPageAddress(0, 8).send(&mut di),
            Err(Error::Command(CommandError::ArgumentOutOfRange))
        );
    }

    #[test]
    fn command_buffer_batches() {
        let mut di = TestSpyInterface::new();
        let mut cmds = CommandBuffer::new();
        assert!(cmds.is_empty());
        cmds.push(Command::SetSleepMode(true))
            .unwrap()
            .push(Command::SetContrast(0x7F))
            .unwrap();
        assert_eq!(cmds.as_slice(), &[0xAE, 0x81, 0x7F]);
        cmds.send(&mut di).unwrap();
        di.check_cmd(&[0xAE, 0x81, 0x7F]);
    }

    #[test]
    fn command_buffer_rejects_bad_or_overflowing_commands() {
        let mut cmds = CommandBuffer::new();
        assert_eq!(
            cmds.push(Command::SetMuxRatio(8)).err(),
            Some(CommandError::ArgumentOutOfRange)
        );
        assert!(cmds.is_empty());
        for _ in 0..10 {
            cmds.push(Command::SetColumnAddress(0, 127)).unwrap();
        }
        assert_eq!(
            cmds.push(Command::SetColumnAddress(0, 127)).err(),
            Some(CommandError::BufferFull)
        );
        assert_eq!(cmds.as_slice().len(), 30);
    }
}
