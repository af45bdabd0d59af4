//! # Template Commands
//!
//! Answers the `<COMMAND>` placeholders of a configuration template for one
//! gamepad.
//!
//! ## Commands
//!
//! | Command | Result |
//! |---------|--------|
//! | `MAP_EVDEV` | Event device path |
//! | `MAP_ABS:<capability>` | Absolute axis name of an axis or hat binding |
//! | `MAP_BUTTON:<capability>` | Key name of a button binding |
//! | `AXISMAP:[+-]<capability>` | Axis name, `-` prefixed when inverted |
//!
//! Capability names are case-insensitive and accept xboxdrv aliases
//! (`lb`, `x1`, `du`, ...).

use tracing::{error, warn};

use super::direction::{signed_event_name, split_sign};
use super::resolver::{resolve, Resolved};
use crate::device::snapshot::CapabilitySnapshot;
use crate::device::Gamepad;
use crate::mapping::binding::InputBinding;
use crate::mapping::capability::Capability;
use crate::mapping::parser::Mapping;

pub const MAP_EVDEV: &str = "MAP_EVDEV";
pub const MAP_ABS: &str = "MAP_ABS";
pub const MAP_BUTTON: &str = "MAP_BUTTON";
pub const AXISMAP: &str = "AXISMAP";

/// Outcome of one template command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Substitute the text
    Found(String),
    /// Not a command; leave the placeholder untouched
    NotFound,
    /// Substitute the text and comment out the line
    Unsupported(String),
}

/// Resolves template commands against one device.
///
/// # Examples
///
/// ```
/// use padmap::device::snapshot::CapabilitySnapshot;
/// use padmap::mapping::{Mapping, Priority};
/// use padmap::resolve::command::{CommandResolver, CommandResult};
///
/// let mapping = Mapping::parse("guid,Pad,a:b0,leftx:a0", Priority::Default)?;
/// let snapshot = CapabilitySnapshot::scan(|code| code == 0x130, |code| code == 0x00);
/// let resolver = CommandResolver::new("/dev/input/event5", Some(&mapping), &snapshot);
///
/// assert_eq!(resolver.execute("MAP_EVDEV"), CommandResult::Found("/dev/input/event5".into()));
/// assert_eq!(resolver.execute("MAP_BUTTON:a"), CommandResult::Found("BTN_SOUTH".into()));
/// assert_eq!(resolver.execute("AXISMAP:-leftx"), CommandResult::Found("-ABS_X".into()));
/// assert_eq!(resolver.execute("OTHER"), CommandResult::NotFound);
/// # Ok::<(), padmap::error::PadmapError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CommandResolver<'a> {
    device_path: &'a str,
    mapping: Option<&'a Mapping>,
    snapshot: &'a CapabilitySnapshot,
}

impl<'a> CommandResolver<'a> {
    #[must_use]
    pub fn new(
        device_path: &'a str,
        mapping: Option<&'a Mapping>,
        snapshot: &'a CapabilitySnapshot,
    ) -> Self {
        Self {
            device_path,
            mapping,
            snapshot,
        }
    }

    /// Resolver for a discovered gamepad.
    #[must_use]
    pub fn for_gamepad(gamepad: &'a Gamepad) -> Self {
        Self::new(gamepad.path(), gamepad.mapping.as_ref(), gamepad.capabilities())
    }

    /// Executes one command (the text between `<` and `>`).
    #[must_use]
    pub fn execute(&self, command: &str) -> CommandResult {
        match command.split_once(':') {
            None if command == MAP_EVDEV => self.map_evdev(),
            Some((MAP_ABS, name)) => self.map_abs(name),
            Some((MAP_BUTTON, name)) => self.map_button(name),
            Some((AXISMAP, name)) => self.axismap(name),
            _ => CommandResult::NotFound,
        }
    }

    fn map_evdev(&self) -> CommandResult {
        CommandResult::Found(self.device_path.to_string())
    }

    fn map_abs(&self, name: &str) -> CommandResult {
        let resolved = match self.lookup(name) {
            Ok(resolved) => resolved,
            Err(unsupported) => return unsupported,
        };

        match resolved.binding.input {
            InputBinding::Axis { .. } | InputBinding::Hat { .. } => {
                CommandResult::Found(resolved.physical.name.clone())
            }
            InputBinding::Button { .. } => {
                warn!("MAP_ABS: {} must be bound to an axis or hat", name);
                CommandResult::Unsupported(format!("ERROR {} is button", resolved.physical.name))
            }
        }
    }

    fn map_button(&self, name: &str) -> CommandResult {
        let resolved = match self.lookup(name) {
            Ok(resolved) => resolved,
            Err(unsupported) => return unsupported,
        };

        match resolved.binding.input {
            InputBinding::Button { .. } => CommandResult::Found(resolved.physical.name.clone()),
            InputBinding::Axis { .. } | InputBinding::Hat { .. } => {
                warn!("MAP_BUTTON: {} must be bound to a button", name);
                CommandResult::Unsupported(format!("ERROR {} is axes", resolved.physical.name))
            }
        }
    }

    fn axismap(&self, requested: &str) -> CommandResult {
        if requested.len() < 2 {
            return CommandResult::Unsupported(format!("Wrong axis name: {}", requested));
        }

        let (requested_inverted, name) = split_sign(requested);
        let resolved = match self.lookup(name) {
            Ok(resolved) => resolved,
            Err(unsupported) => return unsupported,
        };

        match signed_event_name(requested_inverted, &resolved) {
            Some(signed) => CommandResult::Found(signed),
            None => {
                error!("AXISMAP: {} must be bound to an axis or a hat direction", name);
                CommandResult::Unsupported(resolved.physical.name.clone())
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<Resolved<'a>, CommandResult> {
        let Some(capability) = Capability::from_alias(name) else {
            error!("Cannot find button mapping for: {}", name);
            return Err(CommandResult::Unsupported(format!("Unknown button: {}", name)));
        };

        self.mapping
            .and_then(|mapping| resolve(mapping, capability, self.snapshot))
            .ok_or_else(|| {
                error!("Unsupported gamepad button: {}", name);
                CommandResult::Unsupported(format!("Unsupported gamepad mapping: {}", name))
            })
    }
}
