//! Drawing primitives built on the address window and the pixel streams.

use embedded_hal::digital::OutputPin;

use crate::interface::Interface;
use crate::models::Model;
use crate::{Display, Error};

impl<DI, M, RST, BL> Display<DI, M, RST, BL>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Draws a single pixel.
    pub fn pixel(&mut self, x: u16, y: u16, color: u16) -> Result<(), Error<DI::Error>> {
        self.set_window(x, y, x, y)?;
        self.di.begin_data().map_err(Error::Interface)?;
        self.di
            .send_data_slice(&color.to_be_bytes())
            .map_err(Error::Interface)?;
        self.di.end_data().map_err(Error::Interface)
    }

    /// Draws a horizontal line of `len` pixels starting at `(x, y)`.
    pub fn hline(&mut self, x: u16, y: u16, len: u16, color: u16) -> Result<(), Error<DI::Error>> {
        let x1 = Self::span_end(x, len)?;
        self.set_window(x, y, x1, y)?;
        self.stream_color(color, u32::from(len))
    }

    /// Draws a vertical line of `len` pixels starting at `(x, y)`.
    pub fn vline(&mut self, x: u16, y: u16, len: u16, color: u16) -> Result<(), Error<DI::Error>> {
        let y1 = Self::span_end(y, len)?;
        self.set_window(x, y, x, y1)?;
        self.stream_color(color, u32::from(len))
    }

    /// Draws a line between two points, both inclusive.
    ///
    /// Pixels that share a row (or a column for steep lines) are sent as one
    /// [`hline`](Self::hline) or [`vline`](Self::vline), so a line costs one
    /// window per slope step rather than one per pixel.
    pub fn line(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), Error<DI::Error>> {
        let (mut x0, mut y0, mut x1, mut y1) = (
            i32::from(x0),
            i32::from(y0),
            i32::from(x1),
            i32::from(y1),
        );

        // walk along the longer axis
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            core::mem::swap(&mut x0, &mut y0);
            core::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            core::mem::swap(&mut x0, &mut x1);
            core::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };
        let mut err = dx >> 1;

        let mut y = y0;
        let mut run_start = x0;
        let mut run_len = 0;

        for x in x0..=x1 {
            run_len += 1;
            err -= dy;
            if err < 0 {
                err += dx;
                self.line_run(steep, run_start, y, run_len, color)?;
                run_len = 0;
                y += ystep;
                run_start = x + 1;
            }
        }
        if run_len > 0 {
            self.line_run(steep, run_start, y, run_len, color)?;
        }
        Ok(())
    }

    /// Draws the outline of a `w`×`h` rectangle.
    pub fn rect(&mut self, x: u16, y: u16, w: u16, h: u16, color: u16) -> Result<(), Error<DI::Error>> {
        let right = Self::span_end(x, w)?;
        let bottom = Self::span_end(y, h)?;
        self.hline(x, y, w, color)?;
        self.vline(x, y, h, color)?;
        self.hline(x, bottom, w, color)?;
        self.vline(right, y, h, color)
    }

    /// Fills a `w`×`h` rectangle.
    pub fn fill_rect(
        &mut self,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        color: u16,
    ) -> Result<(), Error<DI::Error>> {
        let x1 = Self::span_end(x, w)?;
        let y1 = Self::span_end(y, h)?;
        self.set_window(x, y, x1, y1)?;
        self.stream_color(color, u32::from(w) * u32::from(h))
    }

    /// Fills the whole frame.
    pub fn fill(&mut self, color: u16) -> Result<(), Error<DI::Error>> {
        let (width, height) = self.options.display_size;
        self.fill_rect(0, 0, width, height, color)
    }

    /// Draws one run of a line. `start` runs along the driving axis, `cross`
    /// is the fixed coordinate on the other one.
    fn line_run(
        &mut self,
        steep: bool,
        start: i32,
        cross: i32,
        len: i32,
        color: u16,
    ) -> Result<(), Error<DI::Error>> {
        let (Ok(start), Ok(cross), Ok(len)) =
            (u16::try_from(start), u16::try_from(cross), u16::try_from(len))
        else {
            return Err(Error::OutOfBounds);
        };

        match (steep, len) {
            (true, 1) => self.pixel(cross, start, color),
            (true, _) => self.vline(cross, start, len, color),
            (false, 1) => self.pixel(start, cross, color),
            (false, _) => self.hline(start, cross, len, color),
        }
    }
}
