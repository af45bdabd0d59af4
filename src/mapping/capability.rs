//! # Controller Capabilities
//!
//! Abstract buttons and axes of a game controller, independent of any
//! physical device.
//!
//! ## Capability Table
//!
//! | Capability | SDL name | Range |
//! |------------|----------|-------|
//! | A / B / X / Y | `a`, `b`, `x`, `y` | Button |
//! | Back / Guide / Start | `back`, `guide`, `start` | Button |
//! | Stick clicks | `leftstick`, `rightstick` | Button |
//! | Shoulders | `leftshoulder`, `rightshoulder` | Button |
//! | D-Pad | `dpup`, `dpdown`, `dpleft`, `dpright` | Button |
//! | Extra | `misc1`, `paddle1`..`paddle4`, `touchpad` | Button |
//! | Sticks | `leftx`, `lefty`, `rightx`, `righty` | Axis |
//! | Triggers | `lefttrigger`, `righttrigger` | Axis (trigger) |
//!
//! The declaration order is significant: every variant before
//! [`Capability::LeftX`] is in the button range, the rest are axes.

use std::fmt;

/// Abstract controller button or axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Capability {
    A,
    B,
    X,
    Y,
    Back,
    Guide,
    Start,
    LeftStick,
    RightStick,
    LeftShoulder,
    RightShoulder,
    DpadUp,
    DpadDown,
    DpadLeft,
    DpadRight,
    /// Xbox Series X share, PS5 microphone, Switch Pro capture button
    Misc1,
    /// Xbox Elite paddle P1
    Paddle1,
    /// Xbox Elite paddle P3
    Paddle2,
    /// Xbox Elite paddle P2
    Paddle3,
    /// Xbox Elite paddle P4
    Paddle4,
    /// PS4/PS5 touchpad button
    Touchpad,
    LeftX,
    LeftY,
    RightX,
    RightY,
    TriggerLeft,
    TriggerRight,
}

/// Which half of the capability enumeration a capability belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    Button,
    Axis,
}

/// Canonical SDL mapping names, in declaration order.
const SDL_NAMES: &[(&str, Capability)] = &[
    ("a", Capability::A),
    ("b", Capability::B),
    ("x", Capability::X),
    ("y", Capability::Y),
    ("back", Capability::Back),
    ("guide", Capability::Guide),
    ("start", Capability::Start),
    ("leftstick", Capability::LeftStick),
    ("rightstick", Capability::RightStick),
    ("leftshoulder", Capability::LeftShoulder),
    ("rightshoulder", Capability::RightShoulder),
    ("dpup", Capability::DpadUp),
    ("dpdown", Capability::DpadDown),
    ("dpleft", Capability::DpadLeft),
    ("dpright", Capability::DpadRight),
    ("misc1", Capability::Misc1),
    ("paddle1", Capability::Paddle1),
    ("paddle2", Capability::Paddle2),
    ("paddle3", Capability::Paddle3),
    ("paddle4", Capability::Paddle4),
    ("touchpad", Capability::Touchpad),
    ("leftx", Capability::LeftX),
    ("lefty", Capability::LeftY),
    ("rightx", Capability::RightX),
    ("righty", Capability::RightY),
    ("lefttrigger", Capability::TriggerLeft),
    ("righttrigger", Capability::TriggerRight),
];

/// Additional names accepted by template commands (xboxdrv vocabulary).
const TEMPLATE_ALIASES: &[(&str, Capability)] = &[
    ("tl", Capability::LeftStick),
    ("tr", Capability::RightStick),
    ("lb", Capability::LeftShoulder),
    ("rb", Capability::RightShoulder),
    ("dpad_y", Capability::DpadUp),
    ("duup", Capability::DpadUp),
    ("du", Capability::DpadUp),
    ("dd", Capability::DpadDown),
    ("ddown", Capability::DpadDown),
    ("dpad_x", Capability::DpadLeft),
    ("dlleft", Capability::DpadLeft),
    ("dl", Capability::DpadLeft),
    ("drright", Capability::DpadRight),
    ("dr", Capability::DpadRight),
    ("x1", Capability::LeftX),
    ("y1", Capability::LeftY),
    ("x2", Capability::RightX),
    ("y2", Capability::RightY),
    ("lt", Capability::TriggerLeft),
    ("rt", Capability::TriggerRight),
];

impl Capability {
    /// Every capability in enumeration order.
    pub const ALL: [Capability; 27] = [
        Capability::A,
        Capability::B,
        Capability::X,
        Capability::Y,
        Capability::Back,
        Capability::Guide,
        Capability::Start,
        Capability::LeftStick,
        Capability::RightStick,
        Capability::LeftShoulder,
        Capability::RightShoulder,
        Capability::DpadUp,
        Capability::DpadDown,
        Capability::DpadLeft,
        Capability::DpadRight,
        Capability::Misc1,
        Capability::Paddle1,
        Capability::Paddle2,
        Capability::Paddle3,
        Capability::Paddle4,
        Capability::Touchpad,
        Capability::LeftX,
        Capability::LeftY,
        Capability::RightX,
        Capability::RightY,
        Capability::TriggerLeft,
        Capability::TriggerRight,
    ];

    /// Looks up a capability by its canonical SDL mapping name (exact match).
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::mapping::capability::Capability;
    ///
    /// assert_eq!(Capability::from_sdl_name("leftshoulder"), Some(Capability::LeftShoulder));
    /// assert_eq!(Capability::from_sdl_name("lb"), None);
    /// ```
    #[must_use]
    pub fn from_sdl_name(name: &str) -> Option<Self> {
        SDL_NAMES
            .iter()
            .find(|(sdl_name, _)| *sdl_name == name)
            .map(|(_, capability)| *capability)
    }

    /// Looks up a capability by any name a template may use.
    ///
    /// Accepts canonical SDL names and the xboxdrv-style aliases,
    /// case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::mapping::capability::Capability;
    ///
    /// assert_eq!(Capability::from_alias("LB"), Some(Capability::LeftShoulder));
    /// assert_eq!(Capability::from_alias("X1"), Some(Capability::LeftX));
    /// assert_eq!(Capability::from_alias("dpup"), Some(Capability::DpadUp));
    /// ```
    #[must_use]
    pub fn from_alias(name: &str) -> Option<Self> {
        let lower = name.to_ascii_lowercase();
        Self::from_sdl_name(&lower).or_else(|| {
            TEMPLATE_ALIASES
                .iter()
                .find(|(alias, _)| *alias == lower)
                .map(|(_, capability)| *capability)
        })
    }

    /// Canonical SDL mapping name.
    #[must_use]
    pub fn sdl_name(self) -> &'static str {
        SDL_NAMES
            .iter()
            .find(|(_, capability)| *capability == self)
            .map_or("", |(name, _)| *name)
    }

    /// Button or axis range, by position in the enumeration.
    #[must_use]
    pub fn kind(self) -> CapabilityKind {
        if self < Capability::LeftX {
            CapabilityKind::Button
        } else {
            CapabilityKind::Axis
        }
    }

    /// Analog triggers rest at one end of their range.
    #[must_use]
    pub fn is_trigger(self) -> bool {
        matches!(self, Capability::TriggerLeft | Capability::TriggerRight)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sdl_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdl_names_cover_all_capabilities() {
        assert_eq!(SDL_NAMES.len(), Capability::ALL.len());
        for capability in Capability::ALL {
            let name = capability.sdl_name();
            assert!(!name.is_empty(), "{:?} has no SDL name", capability);
            assert_eq!(Capability::from_sdl_name(name), Some(capability));
        }
    }

    #[test]
    fn test_all_is_in_declaration_order() {
        let mut sorted = Capability::ALL;
        sorted.sort();
        assert_eq!(sorted, Capability::ALL);
    }

    #[test]
    fn test_kind_ranges() {
        assert_eq!(Capability::A.kind(), CapabilityKind::Button);
        assert_eq!(Capability::Touchpad.kind(), CapabilityKind::Button);
        assert_eq!(Capability::LeftX.kind(), CapabilityKind::Axis);
        assert_eq!(Capability::TriggerRight.kind(), CapabilityKind::Axis);

        let buttons = Capability::ALL
            .iter()
            .filter(|c| c.kind() == CapabilityKind::Button)
            .count();
        assert_eq!(buttons, 21);
    }

    #[test]
    fn test_only_triggers_are_triggers() {
        let triggers: Vec<_> = Capability::ALL.iter().filter(|c| c.is_trigger()).collect();
        assert_eq!(triggers, [&Capability::TriggerLeft, &Capability::TriggerRight]);
    }

    #[test]
    fn test_from_sdl_name_is_case_sensitive() {
        assert_eq!(Capability::from_sdl_name("A"), None);
        assert_eq!(Capability::from_sdl_name("a"), Some(Capability::A));
    }

    #[test]
    fn test_template_aliases() {
        assert_eq!(Capability::from_alias("tl"), Some(Capability::LeftStick));
        assert_eq!(Capability::from_alias("tr"), Some(Capability::RightStick));
        assert_eq!(Capability::from_alias("dpad_x"), Some(Capability::DpadLeft));
        assert_eq!(Capability::from_alias("DPAD_Y"), Some(Capability::DpadUp));
        assert_eq!(Capability::from_alias("rt"), Some(Capability::TriggerRight));
        assert_eq!(Capability::from_alias("nosuch"), None);
    }

    #[test]
    fn test_display_uses_sdl_name() {
        assert_eq!(Capability::TriggerLeft.to_string(), "lefttrigger");
        assert_eq!(Capability::DpadRight.to_string(), "dpright");
    }
}
