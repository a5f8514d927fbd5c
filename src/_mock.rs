//! Infallible stand-ins for the bus, control lines and delay, used by the
//! documentation examples.

use core::convert::Infallible;

use embedded_hal::{delay::DelayNs, digital, spi};

pub struct MockSpi;

impl spi::ErrorType for MockSpi {
    type Error = Infallible;
}

impl spi::SpiBus for MockSpi {
    fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer(&mut self, _read: &mut [u8], _write: &[u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct MockOutputPin;

impl digital::ErrorType for MockOutputPin {
    type Error = Infallible;
}

impl digital::OutputPin for MockOutputPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub struct MockDelay;

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
