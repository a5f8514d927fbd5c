//! RGB565 color helpers.
//!
//! Colors are plain `u16` values in RGB565 layout and are sent to the
//! controller most significant byte first.

/// Black.
pub const BLACK: u16 = 0x0000;
/// Blue.
pub const BLUE: u16 = 0x001F;
/// Red.
pub const RED: u16 = 0xF800;
/// Green.
pub const GREEN: u16 = 0x07E0;
/// Cyan.
pub const CYAN: u16 = 0x07FF;
/// Magenta.
pub const MAGENTA: u16 = 0xF81F;
/// Yellow.
pub const YELLOW: u16 = 0xFFE0;
/// White.
pub const WHITE: u16 = 0xFFFF;

/// Packs 8 bit channels into an RGB565 color.
///
/// The low bits of each channel are truncated, not rounded.
///
/// ```
/// use st77xx_spi::color::pack565;
///
/// assert_eq!(pack565(255, 0, 0), 0xF800);
/// assert_eq!(pack565(0x07, 0x03, 0x07), 0x0000);
/// ```
pub const fn pack565(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3)
}

/// Expands a 1 bit per pixel bitmap into big endian RGB565 pixel data.
///
/// Bits are consumed most significant first. Set bits become `fg`, clear
/// bits become `bg`. A row is `width` bits long and every row starts on a
/// fresh source byte: once a row is complete the remaining bits of the
/// current byte are skipped.
///
/// Expansion stops when `out` has no room for another pixel. Returns the
/// number of pixels written. A `width` of zero writes nothing.
///
/// ```
/// use st77xx_spi::color::{expand_bitmap, BLACK, WHITE};
///
/// let mut out = [0u8; 8];
/// let written = expand_bitmap(&[0b1011_0000], &mut out, 4, WHITE, BLACK);
///
/// assert_eq!(written, 4);
/// assert_eq!(out, [0xFF, 0xFF, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF]);
/// ```
pub fn expand_bitmap(bits: &[u8], out: &mut [u8], width: usize, fg: u16, bg: u16) -> usize {
    if width == 0 {
        return 0;
    }

    let fg = fg.to_be_bytes();
    let bg = bg.to_be_bytes();
    let mut pixels = out.chunks_exact_mut(2);
    let mut written = 0;
    let mut row_pos = 0;

    for &byte in bits {
        for bit in (0..8).rev() {
            let Some(pixel) = pixels.next() else {
                return written;
            };
            let color = if byte & (1 << bit) != 0 { &fg } else { &bg };
            pixel.copy_from_slice(color);
            written += 1;

            row_pos += 1;
            if row_pos >= width {
                row_pos = 0;
                break;
            }
        }
    }

    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(pack565(255, 255, 255), WHITE);
        assert_eq!(pack565(0, 0, 0), BLACK);
        assert_eq!(pack565(255, 0, 0), RED);
        assert_eq!(pack565(0, 255, 0), GREEN);
        assert_eq!(pack565(0, 0, 255), BLUE);
        assert_eq!(pack565(0, 255, 255), CYAN);
        assert_eq!(pack565(255, 0, 255), MAGENTA);
        assert_eq!(pack565(255, 255, 0), YELLOW);
    }

    #[test]
    fn pack_truncates_low_bits() {
        assert_eq!(pack565(0xFF, 0, 0), pack565(0xF8, 0, 0));
        assert_eq!(pack565(0, 0xFF, 0), pack565(0, 0xFC, 0));
        assert_eq!(pack565(0x12, 0x34, 0x56), 0x11AA);
    }

    #[test]
    fn expand_row_ignores_trailing_bits() {
        let mut out = [0xAAu8; 10];
        let n = expand_bitmap(&[0b1011_0000], &mut out, 4, 0xF800, 0x001F);

        assert_eq!(n, 4);
        assert_eq!(
            out[..8],
            [0xF8, 0x00, 0x00, 0x1F, 0xF8, 0x00, 0xF8, 0x00]
        );
        assert_eq!(out[8..], [0xAA, 0xAA]);
    }

    #[test]
    fn expand_rows_spanning_bytes() {
        // two rows of 10 pixels, each padded to two bytes
        let bits = [0b1000_0000, 0b0111_1111, 0b0000_0000, 0b0100_0000];
        let mut out = [0u8; 40];
        let n = expand_bitmap(&bits, &mut out, 10, WHITE, BLACK);

        assert_eq!(n, 20);
        let lit: [bool; 20] = core::array::from_fn(|i| out[i * 2] == 0xFF);
        assert_eq!(
            lit,
            [
                true, false, false, false, false, false, false, false, false, true, //
                false, false, false, false, false, false, false, false, false, true,
            ]
        );
    }

    #[test]
    fn expand_stops_at_end_of_output() {
        let mut out = [0u8; 5];
        let n = expand_bitmap(&[0xFF, 0xFF], &mut out, 16, WHITE, BLACK);

        assert_eq!(n, 2);
        assert_eq!(out, [0xFF, 0xFF, 0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn expand_zero_width() {
        let mut out = [0u8; 4];
        assert_eq!(expand_bitmap(&[0xFF], &mut out, 0, WHITE, BLACK), 0);
        assert_eq!(out, [0; 4]);
    }
}
