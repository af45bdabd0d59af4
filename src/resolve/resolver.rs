//! # Binding Resolver
//!
//! Looks up the physical event that carries an abstract capability on a
//! specific device.
//!
//! Resolution never fails: a capability the mapping does not bind, an index
//! past the end of the device's lists, or an ambiguous hat mask all come back
//! as `None` so the caller can render the affected line as unsupported.

use tracing::{debug, error};

use crate::device::snapshot::{CapabilitySnapshot, EventDescriptor};
use crate::mapping::binding::{ButtonBinding, InputBinding};
use crate::mapping::capability::Capability;
use crate::mapping::parser::Mapping;

/// A capability bound to a physical event of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<'a> {
    /// Event source on the device
    pub physical: &'a EventDescriptor,
    /// Binding from the mapping that selected it
    pub binding: &'a ButtonBinding,
}

/// Resolves `capability` against a device snapshot.
///
/// # Arguments
///
/// * `mapping` - Mapping for the device's GUID
/// * `capability` - Abstract capability to look up
/// * `snapshot` - The device's enumerated capabilities
///
/// # Returns
///
/// The bound physical event, or `None` if the capability is unbound on this
/// device.
///
/// # Examples
///
/// ```
/// use padmap::device::snapshot::CapabilitySnapshot;
/// use padmap::mapping::{Capability, Mapping, Priority};
/// use padmap::resolve::resolver::resolve;
///
/// let mapping = Mapping::parse("guid,Pad,a:b0,b:b5", Priority::Default)?;
/// let snapshot = CapabilitySnapshot::scan(|code| code == 0x130, |_| false);
///
/// let a = resolve(&mapping, Capability::A, &snapshot).unwrap();
/// assert_eq!(a.physical.name, "BTN_SOUTH");
/// // b5 is past the end of the button list
/// assert!(resolve(&mapping, Capability::B, &snapshot).is_none());
/// # Ok::<(), padmap::error::PadmapError>(())
/// ```
#[must_use]
pub fn resolve<'a>(
    mapping: &'a Mapping,
    capability: Capability,
    snapshot: &'a CapabilitySnapshot,
) -> Option<Resolved<'a>> {
    let Some(binding) = mapping.bindings.get(&capability) else {
        debug!("{} is not bound in mapping {}", capability, mapping.guid);
        return None;
    };

    let physical = match binding.input {
        InputBinding::Button { index } => snapshot.buttons.get(index),
        InputBinding::Axis { index, .. } => snapshot.axes.get(index),
        InputBinding::Hat { index, mask } => match mask.sub_axis(index) {
            Ok(axis) => snapshot.hats.get(index).map(|hat| hat.axis(axis)),
            Err(e) => {
                error!("{} in mapping {}: {}", capability, mapping.guid, e);
                return None;
            }
        },
    };

    if physical.is_none() {
        debug!(
            "{} bound to {:?}, which the device does not have",
            capability, binding.input
        );
    }

    physical.map(|physical| Resolved { physical, binding })
}
