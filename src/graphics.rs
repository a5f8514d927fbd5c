use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{Dimensions, OriginDimensions, Size},
    pixelcolor::{
        raw::{RawData, RawU16},
        Rgb565,
    },
    primitives::{PointsIter, Rectangle},
    Pixel,
};
use embedded_hal::digital::OutputPin;

use crate::interface::Interface;
use crate::models::Model;
use crate::{Display, Error};

fn raw(color: Rgb565) -> u16 {
    RawU16::from(color).into_inner()
}

impl<DI, M, RST, BL> DrawTarget for Display<DI, M, RST, BL>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
    BL: OutputPin,
{
    type Error = Error<DI::Error>;
    type Color = Rgb565;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, color) in pixels {
            if bounds.contains(point) {
                self.pixel(point.x as u16, point.y as u16, raw(color))?;
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let drawable = area.intersection(&self.bounding_box());
        if drawable.is_zero_sized() {
            return Ok(());
        }

        if drawable != *area {
            // partially visible, fall back to clipped single pixels
            let pixels = area
                .points()
                .zip(colors)
                .filter(|(point, _)| drawable.contains(*point))
                .map(|(point, color)| Pixel(point, color));
            return self.draw_iter(pixels);
        }

        let x = area.top_left.x as u16;
        let y = area.top_left.y as u16;
        let count = area.size.width as usize * area.size.height as usize;
        self.set_window(
            x,
            y,
            x + area.size.width as u16 - 1,
            y + area.size.height as u16 - 1,
        )?;
        self.stream_pixels(colors.into_iter().take(count).map(raw))
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }

        self.fill_rect(
            area.top_left.x as u16,
            area.top_left.y as u16,
            area.size.width as u16,
            area.size.height as u16,
            raw(color),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(raw(color))
    }
}

impl<DI, M, RST, BL> OriginDimensions for Display<DI, M, RST, BL>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
    BL: OutputPin,
{
    fn size(&self) -> Size {
        let (width, height) = self.options.display_size;
        Size::new(width.into(), height.into())
    }
}
