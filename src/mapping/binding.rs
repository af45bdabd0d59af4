//! # Button Bindings
//!
//! A binding connects one physical input of a device (button, axis or hat
//! direction) with one abstract [`Capability`] output.

use super::capability::Capability;
use crate::error::{PadmapError, Result};

/// How much of a bidirectional axis is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisHalf {
    /// Whole range, negative to positive
    #[default]
    Full,
    /// Center to positive end only
    Positive,
    /// Center to negative end only
    Negative,
}

impl AxisHalf {
    /// Half selected by a leading `+`/`-`, [`AxisHalf::Full`] otherwise.
    #[must_use]
    pub fn from_sign(sign: Option<char>) -> Self {
        match sign {
            Some('+') => AxisHalf::Positive,
            Some('-') => AxisHalf::Negative,
            _ => AxisHalf::Full,
        }
    }
}

/// Direction bits of a hat switch, as used in `h<hat>.<mask>` descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HatMask(u8);

/// Sub-axis of a hat switch reported by evdev.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HatAxis {
    X,
    Y,
}

impl HatMask {
    pub const UP: HatMask = HatMask(0x1);
    pub const RIGHT: HatMask = HatMask(0x2);
    pub const DOWN: HatMask = HatMask(0x4);
    pub const LEFT: HatMask = HatMask(0x8);

    const VERTICAL: u8 = Self::UP.0 | Self::DOWN.0;
    const HORIZONTAL: u8 = Self::LEFT.0 | Self::RIGHT.0;

    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        HatMask(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Selects the hat sub-axis that carries this direction.
    ///
    /// Up/down live on the y axis, left/right on the x axis. A mask with
    /// bits from both groups, or from neither, names no single axis.
    ///
    /// # Errors
    ///
    /// Returns [`PadmapError::AmbiguousHatMask`] when the mask does not
    /// select exactly one group.
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::mapping::binding::{HatAxis, HatMask};
    ///
    /// assert_eq!(HatMask::UP.sub_axis(0).unwrap(), HatAxis::Y);
    /// assert_eq!(HatMask::LEFT.sub_axis(0).unwrap(), HatAxis::X);
    /// assert!(HatMask::from_bits(0x3).sub_axis(0).is_err());
    /// ```
    pub fn sub_axis(self, hat: usize) -> Result<HatAxis> {
        let vertical = self.0 & Self::VERTICAL != 0;
        let horizontal = self.0 & Self::HORIZONTAL != 0;
        match (vertical, horizontal) {
            (true, false) => Ok(HatAxis::Y),
            (false, true) => Ok(HatAxis::X),
            _ => Err(PadmapError::AmbiguousHatMask { hat, mask: self.0 }),
        }
    }
}

/// Physical side of a binding, addressed by index into the device's
/// capability lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputBinding {
    Button { index: usize },
    Axis { index: usize, half: AxisHalf, invert: bool },
    Hat { index: usize, mask: HatMask },
}

/// Abstract side of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputBinding {
    Button(Capability),
    Axis { capability: Capability, half: AxisHalf },
}

impl OutputBinding {
    #[must_use]
    pub fn capability(&self) -> Capability {
        match *self {
            OutputBinding::Button(capability) => capability,
            OutputBinding::Axis { capability, .. } => capability,
        }
    }
}

/// One input paired with one output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonBinding {
    pub input: InputBinding,
    pub output: OutputBinding,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_half_from_sign() {
        assert_eq!(AxisHalf::from_sign(Some('+')), AxisHalf::Positive);
        assert_eq!(AxisHalf::from_sign(Some('-')), AxisHalf::Negative);
        assert_eq!(AxisHalf::from_sign(Some('a')), AxisHalf::Full);
        assert_eq!(AxisHalf::from_sign(None), AxisHalf::Full);
    }

    #[test]
    fn test_hat_sub_axis_vertical() {
        assert_eq!(HatMask::UP.sub_axis(0).unwrap(), HatAxis::Y);
        assert_eq!(HatMask::DOWN.sub_axis(0).unwrap(), HatAxis::Y);
        assert_eq!(HatMask::from_bits(0x5).sub_axis(0).unwrap(), HatAxis::Y);
    }

    #[test]
    fn test_hat_sub_axis_horizontal() {
        assert_eq!(HatMask::LEFT.sub_axis(1).unwrap(), HatAxis::X);
        assert_eq!(HatMask::RIGHT.sub_axis(1).unwrap(), HatAxis::X);
    }

    #[test]
    fn test_hat_sub_axis_ambiguous() {
        // Up + right mixes both groups
        let err = HatMask::from_bits(0x3).sub_axis(2).unwrap_err();
        assert!(matches!(err, PadmapError::AmbiguousHatMask { hat: 2, mask: 0x3 }));

        // No direction bits at all
        assert!(HatMask::from_bits(0).sub_axis(0).is_err());
        assert!(HatMask::from_bits(0x10).sub_axis(0).is_err());
    }

    #[test]
    fn test_output_capability() {
        assert_eq!(OutputBinding::Button(Capability::A).capability(), Capability::A);
        let axis = OutputBinding::Axis {
            capability: Capability::LeftX,
            half: AxisHalf::Full,
        };
        assert_eq!(axis.capability(), Capability::LeftX);
    }
}
