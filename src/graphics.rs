//! `embedded-graphics` support.
//!
//! [`Framebuffer`] and [`Display`] implement [`DrawTarget`] with [`BinaryColor`], so the
//! primitives, fonts and images of the `embedded-graphics` ecosystem can draw into the same
//! buffer as the built-in [`Canvas`](crate::draw::Canvas) operations. `BinaryColor::On` lights a
//! pixel and `BinaryColor::Off` clears it. Nothing is sent to the panel until `Display::flush`.

use core::convert::Infallible;

use embedded_graphics_core::draw_target::DrawTarget;
use embedded_graphics_core::geometry::{OriginDimensions, Point, Size};
use embedded_graphics_core::pixelcolor::BinaryColor;
use embedded_graphics_core::Pixel;

use crate::display::Display;
use crate::draw::Canvas;
use crate::framebuffer::Framebuffer;
use crate::interface::DisplayInterface;

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            match color {
                BinaryColor::On => self.set_pixel(x, y),
                BinaryColor::Off => self.clear_pixel(x, y),
            }
        }
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width() as u32, self.height() as u32)
    }
}

impl<DI> DrawTarget for Display<DI>
where
    DI: DisplayInterface,
{
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer_mut().draw_iter(pixels)
    }
}

impl<DI> OriginDimensions for Display<DI>
where
    DI: DisplayInterface,
{
    fn size(&self) -> Size {
        self.framebuffer().size()
    }
}
