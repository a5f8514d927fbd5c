//! Display options.

/// Display rotation.
///
/// `Deg0` and `Deg180` keep the panel's native width and height, `Deg90` and
/// `Deg270` swap them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90° clockwise rotation.
    Deg90,
    /// 180° clockwise rotation.
    Deg180,
    /// 270° clockwise rotation.
    Deg270,
}

impl Rotation {
    /// Returns the rotation index in `0..=3`.
    pub const fn index(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Returns the rotation for an index in `0..=3`.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rotation::Deg0),
            1 => Some(Rotation::Deg90),
            2 => Some(Rotation::Deg180),
            3 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// Returns `true` if this rotation swaps width and height.
    pub const fn is_vertical(self) -> bool {
        self.index() & 1 == 1
    }
}

impl TryFrom<u8> for Rotation {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rotation::from_index(value).ok_or(value)
    }
}

/// Runtime geometry of a display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ModelOptions {
    /// Logical frame size `(width, height)` in the current rotation.
    pub display_size: (u16, u16),
    /// Fixed offset added to every coordinate before it is sent.
    pub display_offset: (u16, u16),
    /// Current rotation.
    pub rotation: Rotation,
}

impl ModelOptions {
    /// Stores `rotation`, swapping width and height when the orientation
    /// axis changes.
    pub(crate) fn set_rotation(&mut self, rotation: Rotation) {
        if self.rotation.is_vertical() != rotation.is_vertical() {
            let (w, h) = self.display_size;
            self.display_size = (h, w);
        }
        self.rotation = rotation;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_index_round_trip() {
        for i in 0..4 {
            assert_eq!(Rotation::from_index(i).map(Rotation::index), Some(i));
        }
        assert_eq!(Rotation::try_from(4), Err(4));
        assert_eq!(Rotation::try_from(255), Err(255));
    }

    #[test]
    fn quarter_turns_swap_size() {
        let mut options = ModelOptions {
            display_size: (135, 240),
            display_offset: (52, 40),
            rotation: Rotation::Deg0,
        };

        options.set_rotation(Rotation::Deg90);
        assert_eq!(options.display_size, (240, 135));

        options.set_rotation(Rotation::Deg270);
        assert_eq!(options.display_size, (240, 135));

        options.set_rotation(Rotation::Deg180);
        assert_eq!(options.display_size, (135, 240));
        assert_eq!(options.display_offset, (52, 40));
    }
}
