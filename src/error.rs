//! Error types for the driver.
//!
//! Drawing into the framebuffer never fails. Errors only come from constructing a [`Config`]
//! with dimensions the SSD1306 cannot drive, and from talking to the controller.
//!
//! [`Config`]: crate::config::Config

use core::fmt;

use crate::command::{CommandError, NUM_PIXEL_COLS, NUM_PIXEL_ROWS};

/// Errors returned by [`Display`](crate::display::Display) operations which talk to the
/// controller.
///
/// Generic over the error type of the [`DisplayInterface`](crate::interface::DisplayInterface)
/// so callers can match on the underlying bus failure.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The interface failed to transfer bytes or toggle a control line.
    Interface(E),
    /// A command argument was out of the range accepted by the controller.
    Command(CommandError),
    /// The operation requires `Display::init` to have completed first.
    NotInitialized,
}

impl<E> From<CommandError> for Error<E> {
    fn from(e: CommandError) -> Self {
        Error::Command(e)
    }
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Interface(e) => write!(f, "interface error: {e:?}"),
            Error::Command(e) => write!(f, "{e}"),
            Error::NotInitialized => write!(f, "display has not been initialized"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for Error<E> {}

/// Errors that can occur when building a [`Config`](crate::config::Config).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width and height must be non-zero multiples of 8, at most 128 columns by 64 rows.
    InvalidDimensions {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidDimensions { width, height } => write!(
                f,
                "invalid dimensions {width}x{height} (max {NUM_PIXEL_COLS}x{NUM_PIXEL_ROWS}, both must be multiples of 8)"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

/// A numeric font identifier which names none of the built-in fonts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownFont(pub u8);

impl fmt::Display for UnknownFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no font with identifier {}", self.0)
    }
}

impl core::error::Error for UnknownFont {}
