//! # Direction Normalizer
//!
//! Works out whether a template must invert the physical axis it binds.
//!
//! ## Sign Sources
//!
//! The result is the XOR of:
//!
//! | Source | Flips when |
//! |--------|------------|
//! | Request | The template asked for `-<capability>` |
//! | Output half | Axis output is the negative half |
//! | Input flag | Axis input carries `~` |
//! | Hat direction | D-Pad button bound to the opposite hat direction |
//!
//! Only axis inputs, and hat inputs driving a button, have a direction.

use super::resolver::Resolved;
use crate::mapping::binding::{AxisHalf, ButtonBinding, HatMask, InputBinding, OutputBinding};
use crate::mapping::capability::Capability;

/// Splits a leading `+`/`-` off a requested capability name.
///
/// Returns whether the request is inverted and the bare name.
///
/// # Examples
///
/// ```
/// use padmap::resolve::direction::split_sign;
///
/// assert_eq!(split_sign("-leftx"), (true, "leftx"));
/// assert_eq!(split_sign("+leftx"), (false, "leftx"));
/// assert_eq!(split_sign("leftx"), (false, "leftx"));
/// ```
#[must_use]
pub fn split_sign(requested: &str) -> (bool, &str) {
    if let Some(name) = requested.strip_prefix('-') {
        (true, name)
    } else if let Some(name) = requested.strip_prefix('+') {
        (false, name)
    } else {
        (false, requested)
    }
}

/// Computes the inversion flag for a binding.
///
/// # Arguments
///
/// * `requested_inverted` - Whether the template asked for the negative sign
/// * `binding` - Resolved binding
///
/// # Returns
///
/// `Some(invert)` for directional bindings, `None` for button inputs and
/// hat inputs driving an axis.
#[must_use]
pub fn invert(requested_inverted: bool, binding: &ButtonBinding) -> Option<bool> {
    match (binding.input, binding.output) {
        (InputBinding::Axis { invert, .. }, output) => {
            let negative_output = matches!(
                output,
                OutputBinding::Axis {
                    half: AxisHalf::Negative,
                    ..
                }
            );
            Some(requested_inverted ^ negative_output ^ invert)
        }
        (InputBinding::Hat { mask, .. }, OutputBinding::Button(capability)) => {
            Some(requested_inverted ^ opposite_hat_direction(capability, mask))
        }
        (InputBinding::Hat { .. }, OutputBinding::Axis { .. }) | (InputBinding::Button { .. }, _) => {
            None
        }
    }
}

/// Physical event name with a `-` prefix when the direction is inverted.
///
/// # Examples
///
/// ```
/// use padmap::device::snapshot::CapabilitySnapshot;
/// use padmap::mapping::{Capability, Mapping, Priority};
/// use padmap::resolve::direction::signed_event_name;
/// use padmap::resolve::resolver::resolve;
///
/// let mapping = Mapping::parse("guid,Pad,lefty:a1~", Priority::Default)?;
/// let snapshot = CapabilitySnapshot::scan(|_| false, |code| code <= 0x01);
/// let resolved = resolve(&mapping, Capability::LeftY, &snapshot).unwrap();
///
/// assert_eq!(signed_event_name(false, &resolved).as_deref(), Some("-ABS_Y"));
/// assert_eq!(signed_event_name(true, &resolved).as_deref(), Some("ABS_Y"));
/// # Ok::<(), padmap::error::PadmapError>(())
/// ```
#[must_use]
pub fn signed_event_name(requested_inverted: bool, resolved: &Resolved<'_>) -> Option<String> {
    invert(requested_inverted, resolved.binding).map(|inverted| {
        if inverted {
            format!("-{}", resolved.physical.name)
        } else {
            resolved.physical.name.clone()
        }
    })
}

// D-Pad button bound to the opposite physical hat direction.
fn opposite_hat_direction(output: Capability, mask: HatMask) -> bool {
    matches!(
        (output, mask),
        (Capability::DpadLeft, HatMask::RIGHT)
            | (Capability::DpadRight, HatMask::LEFT)
            | (Capability::DpadUp, HatMask::DOWN)
            | (Capability::DpadDown, HatMask::UP)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(half: AxisHalf, invert: bool, output_half: AxisHalf) -> ButtonBinding {
        ButtonBinding {
            input: InputBinding::Axis {
                index: 0,
                half,
                invert,
            },
            output: OutputBinding::Axis {
                capability: Capability::LeftX,
                half: output_half,
            },
        }
    }

    fn hat(mask: HatMask, output: Capability) -> ButtonBinding {
        ButtonBinding {
            input: InputBinding::Hat { index: 0, mask },
            output: OutputBinding::Button(output),
        }
    }

    // ==================== Sign Tests ====================

    #[test]
    fn test_split_sign_only_leading() {
        assert_eq!(split_sign("-"), (true, ""));
        assert_eq!(split_sign("--x"), (true, "-x"));
        assert_eq!(split_sign("x-"), (false, "x-"));
    }

    // ==================== Axis Tests ====================

    #[test]
    fn test_axis_plain() {
        let binding = axis(AxisHalf::Full, false, AxisHalf::Full);
        assert_eq!(invert(false, &binding), Some(false));
        assert_eq!(invert(true, &binding), Some(true));
    }

    #[test]
    fn test_axis_invert_flag_cancels_request() {
        let binding = axis(AxisHalf::Full, true, AxisHalf::Full);
        assert_eq!(invert(false, &binding), Some(true));
        assert_eq!(invert(true, &binding), Some(false));
    }

    #[test]
    fn test_axis_negative_output_half() {
        let binding = axis(AxisHalf::Full, false, AxisHalf::Negative);
        assert_eq!(invert(false, &binding), Some(true));

        let binding = axis(AxisHalf::Full, false, AxisHalf::Positive);
        assert_eq!(invert(false, &binding), Some(false));
    }

    #[test]
    fn test_axis_all_sources_combine() {
        // Request, negative half and invert flag: three flips
        let binding = axis(AxisHalf::Full, true, AxisHalf::Negative);
        assert_eq!(invert(true, &binding), Some(true));
        assert_eq!(invert(false, &binding), Some(false));
    }

    #[test]
    fn test_axis_input_half_does_not_flip() {
        let binding = axis(AxisHalf::Negative, false, AxisHalf::Full);
        assert_eq!(invert(false, &binding), Some(false));
    }

    #[test]
    fn test_axis_input_to_button_output() {
        let binding = ButtonBinding {
            input: InputBinding::Axis {
                index: 2,
                half: AxisHalf::Positive,
                invert: true,
            },
            output: OutputBinding::Button(Capability::A),
        };
        assert_eq!(invert(false, &binding), Some(true));
    }

    // ==================== Hat Tests ====================

    #[test]
    fn test_hat_matching_direction() {
        assert_eq!(invert(false, &hat(HatMask::UP, Capability::DpadUp)), Some(false));
        assert_eq!(invert(false, &hat(HatMask::LEFT, Capability::DpadLeft)), Some(false));
        assert_eq!(invert(true, &hat(HatMask::DOWN, Capability::DpadDown)), Some(true));
    }

    #[test]
    fn test_hat_opposite_direction() {
        for (mask, output) in [
            (HatMask::RIGHT, Capability::DpadLeft),
            (HatMask::LEFT, Capability::DpadRight),
            (HatMask::DOWN, Capability::DpadUp),
            (HatMask::UP, Capability::DpadDown),
        ] {
            assert_eq!(invert(false, &hat(mask, output)), Some(true));
            assert_eq!(invert(true, &hat(mask, output)), Some(false));
        }
    }

    #[test]
    fn test_hat_to_non_dpad_button() {
        assert_eq!(invert(false, &hat(HatMask::DOWN, Capability::A)), Some(false));
    }

    // ==================== Unsupported Tests ====================

    #[test]
    fn test_button_input_has_no_direction() {
        let binding = ButtonBinding {
            input: InputBinding::Button { index: 0 },
            output: OutputBinding::Button(Capability::A),
        };
        assert_eq!(invert(false, &binding), None);
        assert_eq!(invert(true, &binding), None);
    }

    #[test]
    fn test_hat_to_axis_has_no_direction() {
        let binding = ButtonBinding {
            input: InputBinding::Hat {
                index: 0,
                mask: HatMask::UP,
            },
            output: OutputBinding::Axis {
                capability: Capability::LeftY,
                half: AxisHalf::Negative,
            },
        };
        assert_eq!(invert(false, &binding), None);
    }
}
