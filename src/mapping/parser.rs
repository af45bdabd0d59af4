//! # Mapping Line Parser
//!
//! Parses SDL game controller mapping strings into [`Mapping`] records.
//!
//! ## Line Format
//!
//! ```text
//! <guid>,<name>,<directive>,<directive>,...
//! ```
//!
//! Each directive is `key:value`. Only the first colon splits, so values may
//! contain further colons. Recognized keys:
//!
//! | Key | Meaning |
//! |-----|---------|
//! | `platform` | Platform filter, e.g. `Linux` |
//! | `hint` | Free-form hint, stored under the key `hint` |
//! | `[+-]<capability>` | Binding for a controller capability |
//!
//! ## Binding Descriptors
//!
//! | Descriptor | Input |
//! |------------|-------|
//! | `[+-]a<d>[~]` | Axis `d`, optional half and inversion |
//! | `b<d>` | Button `d` |
//! | `h<d>.<m>` | Hat `d`, direction mask `m` |
//!
//! A bad directive is logged and skipped; only a line with fewer than three
//! fields fails as a whole.

use std::collections::BTreeMap;
use tracing::{debug, warn};

use super::binding::{AxisHalf, ButtonBinding, HatMask, InputBinding, OutputBinding};
use super::capability::{Capability, CapabilityKind};
use crate::error::{PadmapError, Result};

/// Hint table key under which every `hint:` directive is stored.
pub const HINT_KEY: &str = "hint";

/// Source rank of a mapping. Higher priority wins on GUID conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    /// Built-in dataset
    #[default]
    Default,
    /// Mappings loaded programmatically (mapping files)
    Api,
    /// User override from the environment
    User,
}

/// Parsed mapping for one device GUID.
///
/// # Examples
///
/// ```
/// use padmap::mapping::capability::Capability;
/// use padmap::mapping::parser::{Mapping, Priority};
///
/// let mapping = Mapping::parse(
///     "030000005e0400008e02000014010000,Xbox 360,a:b0,leftx:a0",
///     Priority::Default,
/// )?;
/// assert_eq!(mapping.name, "Xbox 360");
/// assert!(mapping.bindings.contains_key(&Capability::A));
/// # Ok::<(), padmap::error::PadmapError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    /// 32 character hex device identity
    pub guid: String,
    /// Human-readable controller name
    pub name: String,
    /// Platform the mapping applies to; `None` for all platforms
    pub platform: Option<String>,
    /// Source rank used for database conflicts
    pub priority: Priority,
    pub hints: BTreeMap<String, String>,
    /// One binding per capability; later directives overwrite earlier ones
    pub bindings: BTreeMap<Capability, ButtonBinding>,
}

impl Mapping {
    /// Parses one mapping line.
    ///
    /// # Arguments
    ///
    /// * `line` - Comma-separated mapping string
    /// * `priority` - Source rank recorded on the mapping
    ///
    /// # Errors
    ///
    /// Returns [`PadmapError::MalformedMappingLine`] if the line has fewer
    /// than three comma-separated fields. Problems in individual directives
    /// are logged and the directive is skipped.
    pub fn parse(line: &str, priority: Priority) -> Result<Self> {
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            return Err(PadmapError::MalformedMappingLine {
                line: line.to_string(),
                fields: fields.len(),
            });
        }

        let mut mapping = Mapping {
            guid: fields[0].to_string(),
            name: fields[1].to_string(),
            platform: None,
            priority,
            hints: BTreeMap::new(),
            bindings: BTreeMap::new(),
        };

        for directive in fields[2..].iter().filter(|d| !d.is_empty()) {
            mapping.apply_directive(directive);
        }

        Ok(mapping)
    }

    fn apply_directive(&mut self, directive: &str) {
        let Some((key, value)) = directive.split_once(':') else {
            warn!("Mapping {}: directive without value: {}", self.guid, directive);
            return;
        };

        if value.is_empty() {
            return;
        }

        match key {
            "platform" => self.platform = Some(value.to_string()),
            HINT_KEY => {
                self.hints.insert(HINT_KEY.to_string(), value.to_string());
            }
            _ => match parse_binding(key, value) {
                Ok((capability, binding)) => {
                    self.bindings.insert(capability, binding);
                }
                Err(e) => warn!("Mapping {}: skipping directive {}: {}", self.guid, directive, e),
            },
        }
    }
}

/// Parses a `key:value` binding directive.
///
/// The key names the capability, optionally wrapped in `+`/`-`. For axis
/// capabilities the leading key sign selects the output half; triggers are
/// always positive half axes.
///
/// # Errors
///
/// - [`PadmapError::UnknownCapability`] if the key is not an SDL capability name
/// - [`PadmapError::MalformedBindingDescriptor`] if the value cannot be parsed
pub fn parse_binding(key: &str, descriptor: &str) -> Result<(Capability, ButtonBinding)> {
    let name = key.trim_matches(|c| c == '+' || c == '-');
    let capability = Capability::from_sdl_name(name)
        .ok_or_else(|| PadmapError::UnknownCapability(key.to_string()))?;

    let output = match capability.kind() {
        CapabilityKind::Button => OutputBinding::Button(capability),
        CapabilityKind::Axis => {
            let half = if capability.is_trigger() {
                AxisHalf::Positive
            } else {
                AxisHalf::from_sign(key.chars().next())
            };
            OutputBinding::Axis { capability, half }
        }
    };

    let input = parse_descriptor(descriptor)?;
    debug!("Parsed binding {} -> {:?} / {:?}", key, input, output);

    Ok((capability, ButtonBinding { input, output }))
}

/// Parses the physical side of a binding (`a0`, `-a2~`, `b3`, `h0.4`).
///
/// Every index is exactly one digit; characters after the required digits
/// are ignored, except that a final `~` marks an inverted axis.
///
/// # Errors
///
/// Returns [`PadmapError::MalformedBindingDescriptor`] for an unknown input
/// type, a missing or non-digit index, or a premature end of the string.
///
/// # Examples
///
/// ```
/// use padmap::mapping::binding::{AxisHalf, InputBinding};
/// use padmap::mapping::parser::parse_descriptor;
///
/// let input = parse_descriptor("-a2~")?;
/// assert_eq!(input, InputBinding::Axis { index: 2, half: AxisHalf::Negative, invert: true });
/// # Ok::<(), padmap::error::PadmapError>(())
/// ```
pub fn parse_descriptor(descriptor: &str) -> Result<InputBinding> {
    let malformed = |reason| PadmapError::MalformedBindingDescriptor {
        descriptor: descriptor.to_string(),
        reason,
    };

    let mut bytes = descriptor.bytes().peekable();
    let half = match bytes.peek() {
        Some(b'+') | Some(b'-') => AxisHalf::from_sign(bytes.next().map(char::from)),
        _ => AxisHalf::Full,
    };

    match bytes.next() {
        Some(b'a') => {
            let index = usize::from(take_digit(&mut bytes).map_err(malformed)?);
            Ok(InputBinding::Axis {
                index,
                half,
                invert: descriptor.ends_with('~'),
            })
        }
        Some(b'b') => {
            let index = usize::from(take_digit(&mut bytes).map_err(malformed)?);
            Ok(InputBinding::Button { index })
        }
        Some(b'h') => {
            let index = usize::from(take_digit(&mut bytes).map_err(malformed)?);
            match bytes.next() {
                Some(b'.') => {}
                Some(_) => return Err(malformed("expected '.' after hat index")),
                None => return Err(malformed("unexpected end of descriptor")),
            }
            let mask = HatMask::from_bits(take_digit(&mut bytes).map_err(malformed)?);
            Ok(InputBinding::Hat { index, mask })
        }
        Some(_) => Err(malformed("unexpected input type")),
        None => Err(malformed("unexpected end of descriptor")),
    }
}

fn take_digit(bytes: &mut impl Iterator<Item = u8>) -> std::result::Result<u8, &'static str> {
    match bytes.next() {
        Some(b) if b.is_ascii_digit() => Ok(b - b'0'),
        Some(_) => Err("expected a digit"),
        None => Err("unexpected end of descriptor"),
    }
}
