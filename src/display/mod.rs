//! The main API to the display driver. A `Display` owns the interface to the controller, the
//! configuration it was built with, and the framebuffer that drawing operations write into.
//! Nothing reaches the panel until `flush` is called.


use log::{debug, trace, warn};

use crate::command::*;
use crate::config::Config;
use crate::draw::Canvas;
use crate::error::Error;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;

/// Where the controller is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    /// Not yet initialized, or the last `init` failed part way through.
    Uninitialized,
    /// Initialized and accepting flushes.
    Ready,
}

/// A driver for an SSD1306 display.
pub struct Display<DI>
where
    DI: DisplayInterface,
{
    iface: DI,
    config: Config,
    framebuffer: Framebuffer,
    state: State,
}

impl<DI> Display<DI>
where
    DI: DisplayInterface,
{
    /// Construct a new display driver for a panel described by `config`, connected to the
    /// interface `iface`. Nothing is sent until `init` is called.
    pub fn new(iface: DI, config: Config) -> Self {
        Display {
            iface,
            framebuffer: Framebuffer::new(&config),
            config,
            state: State::Uninitialized,
        }
    }

    /// Bring up the interface, pulse the panel reset line and send the full power-up sequence as
    /// a single command burst. The framebuffer is cleared, and the display is left switched on.
    ///
    /// Calling this again later re-initializes the controller from scratch.
    pub fn init(&mut self) -> Result<(), Error<DI::Error>> {
        self.state = State::Uninitialized;
        self.framebuffer.clear();

        self.iface.init().map_err(Error::Interface)?;
        debug!("resetting display");
        self.iface.reset().map_err(Error::Interface)?;

        let mut cmds = CommandBuffer::new();
        self.config.push_init_sequence(&mut cmds)?;
        cmds.send(&mut self.iface)?;

        debug!(
            "initialized {}x{} display (flipped: {}, inverted: {})",
            self.config.width(),
            self.config.height(),
            self.config.is_flipped(),
            self.config.is_inverted()
        );
        self.state = State::Ready;
        Ok(())
    }

    /// Copy the whole framebuffer to the display RAM. The framebuffer is left as it is, so
    /// flushing again sends the same image.
    pub fn flush(&mut self) -> Result<(), Error<DI::Error>> {
        self.ensure_ready("flush")?;

        let mut cmds = CommandBuffer::new();
        cmds.push(Command::SetColumnAddress(0, self.config.width() - 1))?
            .push(Command::SetPageAddress(0, self.config.pages() - 1))?;
        cmds.send(&mut self.iface)?;

        let bytes = self.framebuffer.as_bytes();
        trace!("flushing {} bytes of image data", bytes.len());
        self.iface.send_data_bulk(bytes).map_err(Error::Interface)
    }

    /// Turn every pixel of the framebuffer off. The panel is not touched until the next `flush`.
    pub fn clear(&mut self) {
        self.framebuffer.clear();
    }

    /// Control sleep mode. The display RAM is retained while asleep.
    pub fn sleep(&mut self, enabled: bool) -> Result<(), Error<DI::Error>> {
        self.ensure_ready("sleep")?;
        Command::SetSleepMode(enabled).send(&mut self.iface)
    }

    /// Control the contrast.
    pub fn contrast(&mut self, contrast: u8) -> Result<(), Error<DI::Error>> {
        self.ensure_ready("contrast")?;
        Command::SetContrast(contrast).send(&mut self.iface)
    }

    /// Switch between normal and inverted output without touching the framebuffer.
    pub fn invert(&mut self, inverted: bool) -> Result<(), Error<DI::Error>> {
        self.ensure_ready("invert")?;
        Command::SetInverted(inverted).send(&mut self.iface)
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Give back the interface, consuming the driver.
    pub fn release(self) -> DI {
        self.iface
    }

    fn ensure_ready(&self, op: &str) -> Result<(), Error<DI::Error>> {
        match self.state {
            State::Ready => Ok(()),
            State::Uninitialized => {
                warn!("{op} rejected: display not initialized");
                Err(Error::NotInitialized)
            }
        }
    }
}

impl<DI> Canvas for Display<DI>
where
    DI: DisplayInterface,
{
    fn width(&self) -> i32 {
        self.framebuffer.width()
    }

    fn height(&self) -> i32 {
        self.framebuffer.height()
    }

    fn set_pixel(&mut self, x: i32, y: i32) {
        self.framebuffer.set_pixel(x, y)
    }
}
