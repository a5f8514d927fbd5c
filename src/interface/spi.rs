//!
//! SPI interface for ST77XX displays.
//!
//! This module provides an implementation of the [`Interface`] trait for SPI-based TFT displays
//! wired with a data/command (DC) line and, optionally, a chip select (CS) line driven by the
//! driver itself. Bytes are sent directly from the provided slices, the interface keeps no
//! internal buffer.
//!
//! # Example
//!
//! ```rust
//! use st77xx_spi::interface::SpiInterface;
//! # use st77xx_spi::_mock::{MockOutputPin, MockSpi};
//!
//! let spi = /* your SPI bus */
//! # MockSpi;
//! let dc = /* your DC OutputPin */
//! # MockOutputPin;
//! let cs = /* your CS OutputPin */
//! # MockOutputPin;
//! let iface = SpiInterface::new(spi, dc).with_cs(cs);
//! // Use iface with the display builder
//! # let _ = iface;
//! ```

use embedded_hal::digital::{self, OutputPin};
use embedded_hal::spi::SpiBus;

use super::{Interface, NoPin};

/// Error type for the SPI interface.
///
/// Bus errors are passed through unmodified. Control line errors are reduced
/// to their [`digital::ErrorKind`] since DC and CS may be different pin types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiError<SPI> {
    /// SPI bus error
    Spi(SPI),
    /// Data/command or chip select line error
    Pin(digital::ErrorKind),
}

/// SPI interface for ST77XX displays.
///
/// Use [`SpiInterface::new`] to construct, [`SpiInterface::with_cs`] to attach a chip select
/// line and [`SpiInterface::release`] to deconstruct and recover the SPI and pin resources.
pub struct SpiInterface<SPI, DC, CS = NoPin> {
    spi: SPI,
    dc: DC,
    cs: CS,
}

impl<SPI, DC> SpiInterface<SPI, DC, NoPin>
where
    SPI: SpiBus,
    DC: OutputPin,
{
    /// Create a new SPI interface from an SPI bus and DC pin.
    ///
    /// The interface has no chip select line until one is attached with
    /// [`with_cs`](Self::with_cs).
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc, cs: NoPin }
    }

    /// Attach a chip select line, driven low for the duration of every transaction.
    pub fn with_cs<CS: OutputPin>(self, cs: CS) -> SpiInterface<SPI, DC, CS> {
        SpiInterface {
            spi: self.spi,
            dc: self.dc,
            cs,
        }
    }
}

impl<SPI, DC, CS> SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    /// Release the SPI bus and pins back, deconstructing the interface.
    pub fn release(self) -> (SPI, DC, CS) {
        (self.spi, self.dc, self.cs)
    }

    // Blocks until the bytes are on the wire so CS is never released early.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SpiError<SPI::Error>> {
        self.spi.write(bytes).map_err(SpiError::Spi)?;
        self.spi.flush().map_err(SpiError::Spi)
    }

    fn pin_error<E: digital::Error>(e: E) -> SpiError<SPI::Error> {
        SpiError::Pin(e.kind())
    }
}

impl<SPI, DC, CS> Interface for SpiInterface<SPI, DC, CS>
where
    SPI: SpiBus,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = SpiError<SPI::Error>;

    /// Send a command and its arguments to the display controller.
    ///
    /// The DC pin is set low for the command byte, then high for the argument bytes.
    fn send_command(&mut self, command: Option<u8>, args: &[u8]) -> Result<(), Self::Error> {
        self.select(true)?;
        if let Some(command) = command {
            self.dc.set_low().map_err(Self::pin_error)?;
            self.write(&[command])?;
        }
        if !args.is_empty() {
            self.dc.set_high().map_err(Self::pin_error)?;
            self.write(args)?;
        }
        self.select(false)
    }

    fn begin_data(&mut self) -> Result<(), Self::Error> {
        self.dc.set_high().map_err(Self::pin_error)?;
        self.select(true)
    }

    fn send_data_slice(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.write(data)
    }

    fn end_data(&mut self) -> Result<(), Self::Error> {
        self.select(false)
    }

    fn select(&mut self, active: bool) -> Result<(), Self::Error> {
        if active {
            self.cs.set_low().map_err(Self::pin_error)
        } else {
            self.cs.set_high().map_err(Self::pin_error)
        }
    }
}
