//! [super::Display] builder module

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::interface::{Interface, NoPin};
use crate::models::{Model, Rotatable};
use crate::options::{ModelOptions, Rotation};
use crate::{Display, Error};

/// Builder for [Display] instances.
///
/// Exposes all possible display options.
///
/// # Examples
/// ```
/// use st77xx_spi::{Builder, interface::SpiInterface, models::ST7789};
/// # use st77xx_spi::_mock::{MockDelay, MockOutputPin, MockSpi};
///
/// # let (spi, dc, rst) = (MockSpi, MockOutputPin, MockOutputPin);
/// let mut delay = MockDelay;
/// let di = SpiInterface::new(spi, dc);
///
/// let display = Builder::new(ST7789, di)
///     .reset_pin(rst)
///     .display_size(135, 240)
///     .init(&mut delay)
///     .unwrap();
///
/// assert_eq!(display.display_offset(), (52, 40));
/// ```
pub struct Builder<DI, MODEL, RST = NoPin, BL = NoPin>
where
    DI: Interface,
    MODEL: Model,
{
    di: DI,
    model: MODEL,
    rst: Option<RST>,
    bl: BL,
    display_size: Option<(u16, u16)>,
    display_offset: Option<(u16, u16)>,
    rotation: Rotation,
}

impl<DI, MODEL> Builder<DI, MODEL, NoPin, NoPin>
where
    DI: Interface,
    MODEL: Model,
{
    ///
    /// Constructs a new builder for given [Model].
    ///
    #[must_use]
    pub fn new(model: MODEL, di: DI) -> Self {
        Self {
            di,
            model,
            rst: None,
            bl: NoPin,
            display_size: None,
            display_offset: None,
            rotation: Rotation::Deg0,
        }
    }
}

impl<DI, MODEL, RST, BL> Builder<DI, MODEL, RST, BL>
where
    DI: Interface,
    MODEL: Model,
    RST: OutputPin,
    BL: OutputPin,
{
    /// Sets the reset pin. A reset pin is required.
    #[must_use]
    pub fn reset_pin<RST2: OutputPin>(self, rst: RST2) -> Builder<DI, MODEL, RST2, BL> {
        Builder {
            di: self.di,
            model: self.model,
            rst: Some(rst),
            bl: self.bl,
            display_size: self.display_size,
            display_offset: self.display_offset,
            rotation: self.rotation,
        }
    }

    /// Sets the backlight enable pin used by [Display::on] and [Display::off].
    #[must_use]
    pub fn backlight_pin<BL2: OutputPin>(self, bl: BL2) -> Builder<DI, MODEL, RST, BL2> {
        Builder {
            di: self.di,
            model: self.model,
            rst: self.rst,
            bl,
            display_size: self.display_size,
            display_offset: self.display_offset,
            rotation: self.rotation,
        }
    }

    ///
    /// Sets the native panel size, before any rotation.
    ///
    #[must_use]
    pub fn display_size(mut self, width: u16, height: u16) -> Self {
        self.display_size = Some((width, height));
        self
    }

    ///
    /// Sets the offset between the panel and the controller's memory.
    ///
    /// Only needed for panels the model has no preset for.
    ///
    #[must_use]
    pub fn display_offset(mut self, x: u16, y: u16) -> Self {
        self.display_offset = Some((x, y));
        self
    }

    /// Validates the configuration and returns the display, without sending
    /// anything to the controller.
    pub fn build(self) -> Result<Display<DI, MODEL, RST, BL>, ConfigurationError> {
        let rst = self.rst.ok_or(ConfigurationError::MissingResetPin)?;

        let (width, height) = self
            .display_size
            .ok_or(ConfigurationError::InvalidDisplaySize)?;
        if width == 0 || height == 0 {
            return Err(ConfigurationError::InvalidDisplaySize);
        }

        let display_offset = match self.display_offset {
            Some(offset) => offset,
            None => self
                .model
                .preset_offset(width, height)
                .ok_or(ConfigurationError::UnsupportedDisplaySize)?,
        };

        // either axis can span the longer side once rotated
        let last = width.max(height) - 1;
        let (ox, oy) = display_offset;
        if ox.checked_add(last).is_none() || oy.checked_add(last).is_none() {
            return Err(ConfigurationError::InvalidDisplayOffset);
        }

        let mut options = ModelOptions {
            display_size: (width, height),
            display_offset,
            rotation: Rotation::Deg0,
        };
        options.set_rotation(self.rotation);

        Ok(Display {
            di: self.di,
            model: self.model,
            rst,
            bl: self.bl,
            options,
            sleeping: true,
            backlight_on: false,
        })
    }

    ///
    /// Builds the display and runs its init sequence.
    ///
    pub fn init(
        self,
        delay: &mut impl DelayNs,
    ) -> Result<Display<DI, MODEL, RST, BL>, InitError<DI::Error>> {
        let mut display = self.build().map_err(InitError::InvalidConfiguration)?;
        display.init(delay).map_err(InitError::DisplayError)?;
        Ok(display)
    }
}

impl<DI, MODEL, RST, BL> Builder<DI, MODEL, RST, BL>
where
    DI: Interface,
    MODEL: Rotatable,
    RST: OutputPin,
    BL: OutputPin,
{
    ///
    /// Sets the rotation applied at the end of init.
    ///
    #[must_use]
    pub fn rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Error returned by [`Builder::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InitError<DI> {
    /// Error caused by the display while running the init sequence.
    DisplayError(Error<DI>),

    /// Invalid configuration error.
    ///
    /// This error is returned when the configuration passed to the builder is
    /// invalid. For example, when no reset pin was given.
    InvalidConfiguration(ConfigurationError),
}

/// Specifics of [InitError::InvalidConfiguration] if configuration was found invalid
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigurationError {
    /// No reset pin was set.
    MissingResetPin,
    /// The display size is missing or has a zero dimension.
    InvalidDisplaySize,
    /// The model has no preset offset for the display size and no offset
    /// was given with [`Builder::display_offset`].
    UnsupportedDisplaySize,
    /// The display offset pushes controller addresses past `u16::MAX`.
    InvalidDisplayOffset,
}
