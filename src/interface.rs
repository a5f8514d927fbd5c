//! Interface traits and implementations

mod spi;
pub use spi::*;

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

/// Command and pixel interface
pub trait Interface {
    /// Error type
    type Error: core::fmt::Debug;

    /// Send an optional command byte followed by an optional data payload.
    ///
    /// The controller is selected for the whole transaction. With `command`
    /// set to `None` only the payload is sent, and an empty payload skips
    /// the data phase.
    fn send_command(&mut self, command: Option<u8>, args: &[u8]) -> Result<(), Self::Error>;

    /// Put the data/command line in data mode and select the controller,
    /// ready for a pixel stream.
    ///
    /// `RAMWR` (see [`crate::dcs::RAMWR`]) must be sent before calling this function.
    fn begin_data(&mut self) -> Result<(), Self::Error>;

    /// Send a raw slice of pixel bytes as a single bus transfer.
    ///
    /// Must be called between [`begin_data`](Self::begin_data) and
    /// [`end_data`](Self::end_data).
    fn send_data_slice(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Deselect the controller after a pixel stream.
    fn end_data(&mut self) -> Result<(), Self::Error>;

    /// Drive the chip select line. Does nothing if the interface has none.
    fn select(&mut self, active: bool) -> Result<(), Self::Error>;
}

impl<T: Interface + ?Sized> Interface for &mut T {
    type Error = T::Error;

    fn send_command(&mut self, command: Option<u8>, args: &[u8]) -> Result<(), Self::Error> {
        T::send_command(self, command, args)
    }

    fn begin_data(&mut self) -> Result<(), Self::Error> {
        T::begin_data(self)
    }

    fn send_data_slice(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        T::send_data_slice(self, data)
    }

    fn end_data(&mut self) -> Result<(), Self::Error> {
        T::end_data(self)
    }

    fn select(&mut self, active: bool) -> Result<(), Self::Error> {
        T::select(self, active)
    }
}

/// Placeholder for an optional control line that is not connected.
///
/// Every transition on a `NoPin` succeeds without touching hardware, so a
/// missing chip select or backlight line is fixed when the display is
/// built instead of being checked on every transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoPin;

impl ErrorType for NoPin {
    type Error = Infallible;
}

impl OutputPin for NoPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}
