//! Display configuration: panel geometry plus the two orientation/polarity switches which select
//! command bytes during initialization.

use crate::command::*;
use crate::error::ConfigError;

/// The smallest number of rows the controller can multiplex.
const MIN_ROWS: u32 = 16;

/// A validated configuration for the display. Geometry is mandatory and checked in the
/// constructor; the other options default to off and can be set by calling the builder methods.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    width: u8,
    height: u8,
    flip_direction: bool,
    inverted: bool,
}

impl Config {
    /// Create a new configuration for a panel of `width` x `height` pixels. Both must be multiples
    /// of 8, the width at most 128 and the height between 16 and 64.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if false
            || width == 0
            || width % 8 != 0
            || height % 8 != 0
            || width > NUM_PIXEL_COLS as u32
            || height < MIN_ROWS
            || height > NUM_PIXEL_ROWS as u32
        {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Config {
            width: width as u8,
            height: height as u8,
            flip_direction: false,
            inverted: false,
        })
    }

    /// Extend this `Config` to select the scan polarity. With `true` the panel is driven with
    /// forward segment mapping and top-to-bottom COM scan, otherwise both are reversed.
    pub fn flip_direction(self, flip_direction: bool) -> Self {
        Self {
            flip_direction,
            ..self
        }
    }

    /// Extend this `Config` to show lit pixels dark and vice versa.
    pub fn inverted(self, inverted: bool) -> Self {
        Self { inverted, ..self }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Number of 8-row pages.
    pub fn pages(&self) -> u8 {
        self.height / 8
    }

    /// Bytes of framebuffer needed at one bit per pixel.
    pub fn buffer_len(&self) -> usize {
        self.width as usize * self.pages() as usize
    }

    pub fn is_flipped(&self) -> bool {
        self.flip_direction
    }

    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// The segment remap and COM scan direction pair selected by `flip_direction`.
    pub(crate) fn scan_polarity(&self) -> (ColumnRemap, ComScanDirection) {
        match self.flip_direction {
            true => (ColumnRemap::Forward, ComScanDirection::RowZeroFirst),
            false => (ColumnRemap::Reverse, ComScanDirection::RowZeroLast),
        }
    }

    /// Append the full power-up sequence for this configuration to `cmds`.
    pub(crate) fn push_init_sequence(&self, cmds: &mut CommandBuffer) -> Result<(), CommandError> {
        let (column_remap, com_scan_direction) = self.scan_polarity();
        cmds.push(Command::SetSleepMode(true))?
            .push(Command::SetClockDivider(8, 1))?
            .push(Command::SetMuxRatio(self.height))?
            .push(Command::SetDisplayOffset(0))?
            .push(Command::SetStartLine(0))?
            .push(Command::SetChargePump(true))?
            .push(Command::SetAddressMode(AddressMode::Horizontal))?
            .push(Command::SetColumnRemap(column_remap))?
            .push(Command::SetComScanDirection(com_scan_direction))?
            .push(Command::SetComLayout(ComLayout::Alternative))?
            .push(Command::SetContrast(0x00))?
            .push(Command::SetPrechargePeriod(1, 15))?
            .push(Command::SetVcomhDeselectLevel(0x40))?
            .push(Command::SetEntireDisplayOn(false))?
            .push(Command::SetInverted(self.inverted))?
            .push(Command::SetSleepMode(false))?;
        Ok(())
    }
}
