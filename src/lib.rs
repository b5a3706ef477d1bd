//! Driver library and monochrome graphics engine for the Solomon Systech SSD1306 OLED display
//! controller.
//!
//! Drawing happens in an in-memory [`Framebuffer`] through the [`Canvas`] trait, which
//! [`Display`] also implements. [`Display::flush`] copies the framebuffer to the panel over any
//! [`DisplayInterface`], such as the bundled [`SpiInterface`] and [`I2cInterface`].
//!
//! With the `graphics` feature (on by default) the framebuffer and the display also implement the `embedded-graphics`
//! `DrawTarget` trait.
//!
//! ```ignore
//! let iface = SpiInterface::new(spi, dc, rst, delay);
//! let mut disp = Display::new(iface, Config::new(128, 64)?.flip_direction(true));
//! disp.init()?;
//! disp.draw_rect(0, 0, 128, 64);
//! disp.draw_text_wrapped(4, 4, "Hello, world!", FontId::Font5x8.font());
//! disp.flush()?;
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod command;
pub mod config;
pub mod display;
pub mod draw;
pub mod error;
pub mod font;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod interface;

// Re-exports for primary API.
pub use command::{consts, ComLayout, ComScanDirection};
pub use config::Config;
pub use display::{Display, State};
pub use draw::Canvas;
pub use error::{ConfigError, Error, UnknownFont};
pub use font::{Font, FontId, FONT_5X7, FONT_5X8, FONT_6X8, FONT_8X8};
pub use framebuffer::Framebuffer;
pub use interface::i2c::I2cInterface;
pub use interface::spi::SpiInterface;
pub use interface::{DisplayInterface, InterfaceError};
