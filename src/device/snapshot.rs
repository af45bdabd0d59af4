//! # Capability Snapshot
//!
//! Ordered lists of a device's buttons, hats and axes. Mapping descriptors
//! such as `b3` or `a1` are indices into these lists, so the scan order below
//! must match the order SDL uses when it assigns those indices.
//!
//! ## Scan Order
//!
//! | List | Event codes |
//! |------|-------------|
//! | Buttons | `BTN_JOYSTICK..KEY_MAX`, then `BTN_MISC..BTN_JOYSTICK` |
//! | Hats | `ABS_HAT0X`, `ABS_HAT1X`, `ABS_HAT2X`, `ABS_HAT3X` with the next code as Y |
//! | Axes | `ABS_X..ABS_MAX`, skipping `ABS_HAT0X..=ABS_HAT3Y` |

use evdev::{AbsoluteAxisType, Key};
use serde::Serialize;
use tracing::debug;

use crate::mapping::binding::HatAxis;

/// First joystick button code.
pub const BTN_JOYSTICK: u16 = 0x120;
/// First miscellaneous button code.
pub const BTN_MISC: u16 = 0x100;
/// Highest key code.
pub const KEY_MAX: u16 = 0x2ff;
/// First hat axis code.
pub const ABS_HAT0X: u16 = 0x10;
/// Last hat axis code.
pub const ABS_HAT3Y: u16 = 0x17;
/// Highest absolute axis code.
pub const ABS_MAX: u16 = 0x3f;

/// Kernel event type of a descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EventKind {
    /// `EV_KEY`
    Key,
    /// `EV_ABS`
    Absolute,
}

/// One physical event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDescriptor {
    /// Position within its list
    pub index: usize,
    pub kind: EventKind,
    pub code: u16,
    /// Kernel event code name, e.g. `BTN_SOUTH` or `ABS_X`
    pub name: String,
}

impl EventDescriptor {
    #[must_use]
    pub fn key(index: usize, code: u16) -> Self {
        Self {
            index,
            kind: EventKind::Key,
            code,
            name: event_code_name(format!("{:?}", Key::new(code))),
        }
    }

    #[must_use]
    pub fn absolute(index: usize, code: u16) -> Self {
        Self {
            index,
            kind: EventKind::Absolute,
            code,
            name: event_code_name(format!("{:?}", AbsoluteAxisType(code))),
        }
    }
}

/// A hat switch, reported as two absolute axes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HatDescriptor {
    pub x: EventDescriptor,
    pub y: EventDescriptor,
}

impl HatDescriptor {
    #[must_use]
    pub fn axis(&self, axis: HatAxis) -> &EventDescriptor {
        match axis {
            HatAxis::X => &self.x,
            HatAxis::Y => &self.y,
        }
    }
}

/// Enumerated capabilities of one opened device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CapabilitySnapshot {
    pub buttons: Vec<EventDescriptor>,
    pub hats: Vec<HatDescriptor>,
    pub axes: Vec<EventDescriptor>,
}

impl CapabilitySnapshot {
    /// Builds a snapshot by probing which event codes a device supports.
    ///
    /// # Arguments
    ///
    /// * `has_key` - Whether an `EV_KEY` code is supported
    /// * `has_abs` - Whether an `EV_ABS` code is supported
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::device::snapshot::CapabilitySnapshot;
    ///
    /// // BTN_SOUTH, BTN_EAST and ABS_X, ABS_Y, ABS_HAT0X, ABS_HAT0Y
    /// let snapshot = CapabilitySnapshot::scan(
    ///     |code| code == 0x130 || code == 0x131,
    ///     |code| matches!(code, 0x00 | 0x01 | 0x10 | 0x11),
    /// );
    /// assert_eq!(snapshot.buttons[0].name, "BTN_SOUTH");
    /// assert_eq!(snapshot.axes.len(), 2);
    /// assert_eq!(snapshot.hats[0].y.name, "ABS_HAT0Y");
    /// ```
    pub fn scan(has_key: impl Fn(u16) -> bool, has_abs: impl Fn(u16) -> bool) -> Self {
        let mut snapshot = Self::default();

        for code in (BTN_JOYSTICK..KEY_MAX).chain(BTN_MISC..BTN_JOYSTICK) {
            if has_key(code) {
                let button = EventDescriptor::key(snapshot.buttons.len(), code);
                debug!("button {}: {}", button.index, button.name);
                snapshot.buttons.push(button);
            }
        }

        for code in (ABS_HAT0X..ABS_HAT3Y).step_by(2) {
            if has_abs(code) {
                let index = snapshot.hats.len();
                let hat = HatDescriptor {
                    x: EventDescriptor::absolute(index, code),
                    y: EventDescriptor::absolute(index, code + 1),
                };
                debug!("hat {}: {}", index, hat.x.name);
                snapshot.hats.push(hat);
            }
        }

        for code in (0..ABS_MAX).filter(|code| !(ABS_HAT0X..=ABS_HAT3Y).contains(code)) {
            if has_abs(code) {
                let axis = EventDescriptor::absolute(snapshot.axes.len(), code);
                debug!("axis {}: {}", axis.index, axis.name);
                snapshot.axes.push(axis);
            }
        }

        snapshot
    }
}

// evdev prints unnamed codes as "unknown ...: <code>"
fn event_code_name(debug_name: String) -> String {
    if debug_name.starts_with("unknown") {
        String::new()
    } else {
        debug_name
    }
}
