//! # Troubleshooting guide
//!
//! This guide lists common issues that can cause a blank or corrupted display.
//!
//! ## Display stays black/blank
//!
//! ### Reset pin
//!
//! The reset pin on the ST77XX controllers is active low and must be driven
//! **high** for the display to operate. The builder refuses to build a
//! display without one, and [`Display::init`](crate::Display::init) pulses it
//! before anything else is sent.
//!
//! ### Backlight pin
//!
//! Init leaves the backlight alone. If a backlight pin was passed to the
//! builder, call [`Display::on`](crate::Display::on) after init. Otherwise
//! the backlight must be switched on by the application.
//!
//! ### Transport misconfiguration (e.g. SPI)
//!
//! Make sure that the transport layer is configured correctly. Typical mistakes
//! are the use of wrong SPI MODE or too fast transfer speeds that are not
//! supported by the display
//!
//! ### Drawing returns `OutOfBounds`
//!
//! Every drawing call checks its area against the current size before
//! anything is sent. Remember that rotating by 90° or 270° swaps width and
//! height.
//!
//! ## Image is shifted or wraps around
//!
//! Small panels only show part of the controller's memory. The visible part
//! starts at an offset that is looked up from the panel size for known panels
//! (240×240, 135×240 and, on [`ST77XX`](crate::models::ST77XX), 80×160). Any
//! other panel needs an explicit offset:
//!
//! ```
//! use st77xx_spi::{Builder, interface::SpiInterface, models::ST7789};
//! # use st77xx_spi::_mock::{MockDelay, MockOutputPin, MockSpi};
//!
//! # let di = SpiInterface::new(MockSpi, MockOutputPin);
//! # let rst = MockOutputPin;
//! # let mut delay = MockDelay;
//! let mut display = Builder::new(ST7789, di)
//!     .reset_pin(rst)
//!     .display_size(240, 280)
//!     .display_offset(0, 20)
//!     .init(&mut delay)
//!     .unwrap();
//! # let _ = display.fill(0);
//! ```
//!
//! ## Incorrect colors
//!
//! Colors are RGB565 values sent most significant byte first. Use
//! [`pack565`](crate::color::pack565) to convert 8 bit channels; the low bits
//! of each channel are dropped. Init turns color inversion on, which is what
//! IPS panels expect. If black and white appear swapped, turn it off again:
//!
//! ```
//! # use st77xx_spi::{Builder, interface::SpiInterface, models::ST7789};
//! # use st77xx_spi::_mock::{MockDelay, MockOutputPin, MockSpi};
//! # let di = SpiInterface::new(MockSpi, MockOutputPin);
//! # let mut delay = MockDelay;
//! # let mut display = Builder::new(ST7789, di)
//! #     .reset_pin(MockOutputPin)
//! #     .display_size(240, 240)
//! #     .init(&mut delay)
//! #     .unwrap();
//! display.inversion_mode(false).unwrap();
//! ```
