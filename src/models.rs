//! Display models.
//!
//! Both controller families share the same command set and init sequence.
//! They differ in the panel presets they know about and in whether the
//! orientation can be changed at runtime, which is expressed with the
//! [`Rotatable`] marker trait.

/// Display model.
pub trait Model {
    /// Model name, used in debug output.
    const NAME: &'static str;

    /// Returns the coordinate offset of a known panel with the given native
    /// size, or `None` if the panel is unknown to this model.
    fn preset_offset(&self, width: u16, height: u16) -> Option<(u16, u16)>;
}

/// Marker for models whose orientation can be changed with
/// [`Display::set_rotation`](crate::Display::set_rotation).
pub trait Rotatable: Model {}

/// ST7789 display in fixed orientation.
///
/// Known panels: 240×240 and 135×240.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ST7789;

impl Model for ST7789 {
    const NAME: &'static str = "ST7789";

    fn preset_offset(&self, width: u16, height: u16) -> Option<(u16, u16)> {
        match (width, height) {
            (240, 240) => Some((0, 0)),
            (135, 240) => Some((52, 40)),
            _ => None,
        }
    }
}

/// ST77XX family display with runtime rotation.
///
/// Known panels: 240×240, 135×240 and 80×160.
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ST77XX;

impl Model for ST77XX {
    const NAME: &'static str = "ST77XX";

    fn preset_offset(&self, width: u16, height: u16) -> Option<(u16, u16)> {
        match (width, height) {
            (80, 160) => Some((25, 0)),
            _ => ST7789.preset_offset(width, height),
        }
    }
}

impl Rotatable for ST77XX {}
