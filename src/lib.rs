#![no_std]
// associated re-typing not supported in rust yet
#![allow(clippy::type_complexity)]

//! This crate provides a blocking driver for SPI attached TFT panels driven by
//! ST7789 and ST77XX family controllers.
//!
//! Drawing requests (pixels, lines, rectangles, raw blits and full frame fills)
//! are turned into the controller's command/data protocol. Every pixel write is
//! preceded by an address window, and large fills are streamed through a small
//! fixed size buffer.
//!
//! ## Example
//! ```
//! use st77xx_spi::{color, interface::SpiInterface, models::ST77XX, options::Rotation, Builder};
//! # use st77xx_spi::_mock::{MockDelay, MockOutputPin, MockSpi};
//! # let (spi, dc, cs, rst, backlight) =
//! #     (MockSpi, MockOutputPin, MockOutputPin, MockOutputPin, MockOutputPin);
//! let mut delay = MockDelay;
//!
//! let di = SpiInterface::new(spi, dc).with_cs(cs);
//! let mut display = Builder::new(ST77XX, di)
//!     .reset_pin(rst)
//!     .backlight_pin(backlight)
//!     .display_size(135, 240)
//!     .rotation(Rotation::Deg90)
//!     .init(&mut delay)
//!     .unwrap();
//!
//! display.on(&mut delay).unwrap();
//! display.fill(color::BLUE).unwrap();
//! display.line(0, 0, 239, 134, color::WHITE).unwrap();
//! display.rect(10, 10, 50, 30, color::pack565(255, 128, 0)).unwrap();
//! assert_eq!(display.size(), (240, 135));
//! ```

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};

pub mod interface;
use interface::{Interface, NoPin};

pub mod options;
use options::{ModelOptions, Rotation};

mod builder;
pub use builder::*;

pub mod color;
pub mod dcs;

pub mod models;
use models::{Model, Rotatable};

mod graphics;
mod raster;

#[doc(hidden)]
pub mod _mock;
pub mod _troubleshooting;

/// Number of pixels staged per transfer when filling with a solid color.
pub const FILL_BUFFER_PIXELS: usize = 128;

/// Number of bytes sent per transfer when streaming pixel data.
pub const BLIT_CHUNK_BYTES: usize = 256;

/// Errors returned by [`Display`] operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<DI> {
    /// The display interface failed. The bus error is passed through unmodified.
    Interface(DI),
    /// Driving the reset or backlight line failed.
    Pin(digital::ErrorKind),
    /// The address window falls outside the display or is empty.
    ///
    /// Nothing is sent to the controller when this is returned.
    OutOfBounds,
    /// Rotation index outside `0..=3`.
    ///
    /// Nothing is sent to the controller when this is returned.
    InvalidRotation(u8),
}

///
/// Display driver to connect to TFT displays.
///
pub struct Display<DI, MODEL, RST, BL = NoPin>
where
    DI: Interface,
    MODEL: Model,
    RST: OutputPin,
    BL: OutputPin,
{
    // Command/data framing
    di: DI,
    // Model
    model: MODEL,
    // Reset pin
    rst: RST,
    // Backlight enable pin
    bl: BL,
    // Model Options, includes current size and rotation
    options: ModelOptions,
    sleeping: bool,
    backlight_on: bool,
}

impl<DI, M, RST, BL> Display<DI, M, RST, BL>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Returns the current logical `(width, height)`.
    ///
    /// The two values are swapped while the display is rotated by 90° or 270°.
    pub fn size(&self) -> (u16, u16) {
        self.options.display_size
    }

    /// Returns the fixed offset added to every coordinate sent to the controller.
    pub fn display_offset(&self) -> (u16, u16) {
        self.options.display_offset
    }

    ///
    /// Returns the model this display was built for.
    ///
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Runs the power on sequence.
    ///
    /// Resets the controller, configures 16 bit RGB565 pixels, clears the
    /// frame to black, turns the display on and finally re-applies the
    /// current rotation. May be called again to recover the controller.
    ///
    /// The rotation is kept when the sequence fails.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}: init", M::NAME);

        let rotation = self.options.rotation;
        self.options.set_rotation(Rotation::Deg0);

        let result = self.power_on(delay, rotation);
        // restored on failure too, so a retry applies it again
        self.options.set_rotation(rotation);
        result
    }

    fn power_on<D: DelayNs>(
        &mut self,
        delay: &mut D,
        rotation: Rotation,
    ) -> Result<(), Error<DI::Error>> {
        self.hard_reset(delay)?;
        self.soft_reset(delay)?;
        self.write_command(dcs::SLPOUT, &[])?;
        self.sleeping = false;

        self.write_command(dcs::COLMOD, &[dcs::pixel_format()])?;
        delay.delay_ms(10);
        self.write_command(dcs::MADCTL, &[dcs::init_address_mode()])?;

        self.write_command(dcs::INVON, &[])?;
        delay.delay_ms(10);
        self.write_command(dcs::NORON, &[])?;
        delay.delay_ms(10);

        self.fill(color::BLACK)?;
        self.write_command(dcs::DISPON, &[])?;
        delay.delay_ms(100);

        if rotation != Rotation::Deg0 {
            self.apply_rotation(rotation)?;
        }
        Ok(())
    }

    /// Pulses the reset line.
    ///
    /// The controller is selected for the whole pulse. The settle times are
    /// required by the controller.
    pub fn hard_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}: hard reset", M::NAME);

        self.di.select(true).map_err(Error::Interface)?;
        self.rst.set_high().map_err(Self::pin_error)?;
        delay.delay_ms(50);
        self.rst.set_low().map_err(Self::pin_error)?;
        delay.delay_ms(50);
        self.rst.set_high().map_err(Self::pin_error)?;
        delay.delay_ms(150);
        self.di.select(false).map_err(Error::Interface)
    }

    /// Sends the software reset command and waits for the controller to restart.
    pub fn soft_reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>> {
        self.write_command(dcs::SWRESET, &[])?;
        delay.delay_ms(150);
        Ok(())
    }

    ///
    /// Returns `true` if display is currently set to sleep.
    ///
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Enters (`true`) or leaves (`false`) sleep mode.
    pub fn sleep_mode(&mut self, enable: bool) -> Result<(), Error<DI::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}: sleep {=bool}", M::NAME, enable);

        let command = if enable { dcs::SLPIN } else { dcs::SLPOUT };
        self.write_command(command, &[])?;
        self.sleeping = enable;
        Ok(())
    }

    /// Turns color inversion on or off.
    pub fn inversion_mode(&mut self, enable: bool) -> Result<(), Error<DI::Error>> {
        let command = if enable { dcs::INVON } else { dcs::INVOFF };
        self.write_command(command, &[])
    }

    /// Returns `true` if the backlight was last switched on with [`on`](Self::on).
    pub fn is_on(&self) -> bool {
        self.backlight_on
    }

    /// Switches the backlight on and waits 10 ms.
    ///
    /// Without a backlight line only the delay is applied.
    pub fn on<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>> {
        self.bl.set_high().map_err(Self::pin_error)?;
        self.backlight_on = true;
        delay.delay_ms(10);
        Ok(())
    }

    /// Switches the backlight off and waits 10 ms.
    pub fn off<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), Error<DI::Error>> {
        self.bl.set_low().map_err(Self::pin_error)?;
        self.backlight_on = false;
        delay.delay_ms(10);
        Ok(())
    }

    /// Returns the current rotation.
    pub fn rotation(&self) -> Rotation {
        self.options.rotation
    }

    /// Sets the address window for the following pixel data, in logical
    /// coordinates. Both corners are inclusive.
    ///
    /// Returns [`Error::OutOfBounds`] without sending anything unless
    /// `x0 <= x1 < width` and `y0 <= y1 < height`.
    pub fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), Error<DI::Error>> {
        let (width, height) = self.options.display_size;
        if x0 > x1 || x1 >= width || y0 > y1 || y1 >= height {
            return Err(Error::OutOfBounds);
        }

        let (ox, oy) = self.options.display_offset;
        let columns = dcs::address_range(x0 + ox, x1 + ox);
        let rows = dcs::address_range(y0 + oy, y1 + oy);
        self.write_command(dcs::CASET, &columns)?;
        self.write_command(dcs::RASET, &rows)?;
        self.write_command(dcs::RAMWR, &[])
    }

    /// Sends raw RGB565 pixel data to the `width`×`height` area at `(x, y)`.
    ///
    /// At most `width * height * 2` bytes are taken from `data`. A shorter
    /// buffer only covers the start of the area; the rest of the area keeps
    /// its previous contents.
    pub fn blit(
        &mut self,
        data: &[u8],
        x: u16,
        y: u16,
        width: u16,
        height: u16,
    ) -> Result<(), Error<DI::Error>> {
        let x1 = Self::span_end(x, width)?;
        let y1 = Self::span_end(y, height)?;
        self.set_window(x, y, x1, y1)?;

        let area = u64::from(width) * u64::from(height) * 2;
        let limit = usize::try_from(area).map_or(data.len(), |area| data.len().min(area));

        self.di.begin_data().map_err(Error::Interface)?;
        for chunk in data[..limit].chunks(BLIT_CHUNK_BYTES) {
            self.di.send_data_slice(chunk).map_err(Error::Interface)?;
        }
        self.di.end_data().map_err(Error::Interface)
    }

    ///
    /// Release resources allocated to this driver back.
    /// This returns the display interface, reset pin and backlight pin, deconstructing the driver.
    ///
    pub fn release(self) -> (DI, RST, BL) {
        (self.di, self.rst, self.bl)
    }

    /// Returns the interface for sending raw commands.
    ///
    /// # Safety
    ///
    /// Sending raw commands to the controller can lead to undefined behaviour,
    /// because the rest of the code isn't aware of any state changes that were caused by sending raw commands.
    /// The user must ensure that the state of the controller isn't altered in a way that interferes with the normal
    /// operation of this crate.
    pub unsafe fn dcs(&mut self) -> &mut DI {
        &mut self.di
    }

    fn pin_error<E: digital::Error>(e: E) -> Error<DI::Error> {
        Error::Pin(e.kind())
    }

    /// Last coordinate of a span of `len` cells starting at `start`.
    fn span_end(start: u16, len: u16) -> Result<u16, Error<DI::Error>> {
        match len.checked_sub(1).and_then(|n| start.checked_add(n)) {
            Some(end) => Ok(end),
            None => Err(Error::OutOfBounds),
        }
    }

    fn write_command(&mut self, command: u8, args: &[u8]) -> Result<(), Error<DI::Error>> {
        self.di
            .send_command(Some(command), args)
            .map_err(Error::Interface)
    }

    /// Streams `count` pixels of `color` into the current window.
    fn stream_color(&mut self, color: u16, count: u32) -> Result<(), Error<DI::Error>> {
        let mut buffer = [0u8; FILL_BUFFER_PIXELS * 2];
        let bytes = color.to_be_bytes();
        for pixel in buffer.chunks_exact_mut(2) {
            pixel.copy_from_slice(&bytes);
        }

        let chunks = count / FILL_BUFFER_PIXELS as u32;
        let rest = (count % FILL_BUFFER_PIXELS as u32) as usize;

        self.di.begin_data().map_err(Error::Interface)?;
        for _ in 0..chunks {
            self.di.send_data_slice(&buffer).map_err(Error::Interface)?;
        }
        if rest > 0 {
            self.di
                .send_data_slice(&buffer[..rest * 2])
                .map_err(Error::Interface)?;
        }
        self.di.end_data().map_err(Error::Interface)
    }

    /// Streams individually colored pixels into the current window.
    fn stream_pixels<I>(&mut self, pixels: I) -> Result<(), Error<DI::Error>>
    where
        I: IntoIterator<Item = u16>,
    {
        let mut buffer = [0u8; BLIT_CHUNK_BYTES];
        let mut len = 0;

        self.di.begin_data().map_err(Error::Interface)?;
        for color in pixels {
            buffer[len..len + 2].copy_from_slice(&color.to_be_bytes());
            len += 2;
            if len == buffer.len() {
                self.di.send_data_slice(&buffer).map_err(Error::Interface)?;
                len = 0;
            }
        }
        if len > 0 {
            self.di
                .send_data_slice(&buffer[..len])
                .map_err(Error::Interface)?;
        }
        self.di.end_data().map_err(Error::Interface)
    }

    fn apply_rotation(&mut self, rotation: Rotation) -> Result<(), Error<DI::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("{=str}: rotation {=u8}", M::NAME, rotation.index());

        self.options.set_rotation(rotation);
        self.write_command(dcs::MADCTL, &[dcs::rotation_address_mode(rotation)])
    }
}

impl<DI, M, RST, BL> Display<DI, M, RST, BL>
where
    DI: Interface,
    M: Rotatable,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Rotates the display.
    ///
    /// Width and height are swapped whenever the rotation moves between
    /// landscape and portrait.
    pub fn set_rotation(&mut self, rotation: Rotation) -> Result<(), Error<DI::Error>> {
        self.apply_rotation(rotation)
    }

    /// Rotates the display by a rotation index in `0..=3`.
    ///
    /// Any other index returns [`Error::InvalidRotation`] and leaves the
    /// display untouched.
    pub fn rotate(&mut self, index: u8) -> Result<(), Error<DI::Error>> {
        match Rotation::from_index(index) {
            Some(rotation) => self.apply_rotation(rotation),
            None => Err(Error::InvalidRotation(index)),
        }
    }
}

impl<DI, M, RST, BL> core::fmt::Debug for Display<DI, M, RST, BL>
where
    DI: Interface,
    M: Model,
    RST: OutputPin,
    BL: OutputPin,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let (width, height) = self.options.display_size;
        f.debug_struct(M::NAME)
            .field("width", &width)
            .field("height", &height)
            .field("rotation", &self.options.rotation)
            .finish()
    }
}
