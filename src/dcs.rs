//! Command bytes and parameter values understood by the ST77XX family.
//!
//! Every transaction on the wire is one of these command bytes, optionally
//! followed by a parameter payload (see [`Interface::send_command`]).
//!
//! [`Interface::send_command`]: crate::interface::Interface::send_command

use crate::options::Rotation;

/// Software reset.
pub const SWRESET: u8 = 0x01;
/// Enter sleep mode.
pub const SLPIN: u8 = 0x10;
/// Leave sleep mode.
pub const SLPOUT: u8 = 0x11;
/// Normal display mode on.
pub const NORON: u8 = 0x13;
/// Display inversion off.
pub const INVOFF: u8 = 0x20;
/// Display inversion on.
pub const INVON: u8 = 0x21;
/// Display on.
pub const DISPON: u8 = 0x29;
/// Column address set.
pub const CASET: u8 = 0x2A;
/// Row address set.
pub const RASET: u8 = 0x2B;
/// Memory write. Arms the controller for the following pixel stream.
pub const RAMWR: u8 = 0x2C;
/// Memory data access control.
pub const MADCTL: u8 = 0x36;
/// Interface pixel format.
pub const COLMOD: u8 = 0x3A;

/// 65K color RGB interface.
pub const COLOR_MODE_65K: u8 = 0x50;
/// 16 bit per pixel control interface.
pub const COLOR_MODE_16BIT: u8 = 0x05;

/// Page address order.
pub const MADCTL_MY: u8 = 0x80;
/// Column address order.
pub const MADCTL_MX: u8 = 0x40;
/// Page/column order.
pub const MADCTL_MV: u8 = 0x20;
/// Line address order.
pub const MADCTL_ML: u8 = 0x10;
/// RGB subpixel order.
pub const MADCTL_RGB: u8 = 0x00;
/// BGR subpixel order.
pub const MADCTL_BGR: u8 = 0x08;

/// `COLMOD` parameter used during init: 65K colors, 16 bit pixels.
pub const fn pixel_format() -> u8 {
    COLOR_MODE_65K | COLOR_MODE_16BIT
}

/// `MADCTL` parameter used during init, before any rotation is applied.
pub const fn init_address_mode() -> u8 {
    MADCTL_ML | MADCTL_RGB
}

/// `MADCTL` parameter selecting `rotation`.
pub const fn rotation_address_mode(rotation: Rotation) -> u8 {
    let bits = match rotation {
        Rotation::Deg0 => 0x00,
        Rotation::Deg90 => MADCTL_MX | MADCTL_MV,
        Rotation::Deg180 => MADCTL_MY | MADCTL_MX,
        Rotation::Deg270 => MADCTL_MY | MADCTL_MV,
    };
    bits | MADCTL_RGB
}

/// Encodes an inclusive address range for `CASET`/`RASET`.
pub const fn address_range(start: u16, end: u16) -> [u8; 4] {
    let [s_hi, s_lo] = start.to_be_bytes();
    let [e_hi, e_lo] = end.to_be_bytes();
    [s_hi, s_lo, e_hi, e_lo]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_patterns() {
        assert_eq!(rotation_address_mode(Rotation::Deg0), 0x00);
        assert_eq!(rotation_address_mode(Rotation::Deg90), 0x60);
        assert_eq!(rotation_address_mode(Rotation::Deg180), 0xC0);
        assert_eq!(rotation_address_mode(Rotation::Deg270), 0xA0);
    }

    #[test]
    fn init_parameters() {
        assert_eq!(pixel_format(), 0x55);
        assert_eq!(init_address_mode(), 0x10);
    }

    #[test]
    fn address_range_is_big_endian() {
        assert_eq!(address_range(52, 186), [0x00, 0x34, 0x00, 0xBA]);
        assert_eq!(address_range(0x0123, 0x0456), [0x01, 0x23, 0x04, 0x56]);
    }
}
