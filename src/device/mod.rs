//! # Device Module
//!
//! Gamepad discovery and identity.
//!
//! This module handles:
//! - Encoding the SDL device GUID from the evdev input id
//! - Enumerating buttons, hats and axes in SDL index order
//! - Finding joystick event devices and filtering them by GUID
//! - Attaching the database mapping for each discovered gamepad

pub mod guid;
pub mod snapshot;
pub mod source;

use tracing::{info, warn};

use crate::error::Result;
use crate::mapping::{Mapping, MappingDatabase};
use guid::Guid;
use snapshot::CapabilitySnapshot;
use source::{DeviceInfo, DeviceSource};

/// A discovered gamepad together with the mapping that applies to it.
#[derive(Debug, Clone)]
pub struct Gamepad {
    pub info: DeviceInfo,
    /// Owned copy of the database entry for this GUID
    pub mapping: Option<Mapping>,
}

impl Gamepad {
    /// Pairs a probed device with its mapping from `db`, if any.
    #[must_use]
    pub fn new(info: DeviceInfo, db: &MappingDatabase) -> Self {
        let mapping = db.lookup(&info.guid.to_string()).cloned();
        if mapping.is_none() {
            warn!("No mapping for {} ({})", info.name, info.guid);
        }
        Self { info, mapping }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.info.path
    }

    #[must_use]
    pub fn guid(&self) -> Guid {
        self.info.guid
    }

    #[must_use]
    pub fn capabilities(&self) -> &CapabilitySnapshot {
        &self.info.capabilities
    }
}

/// GUID allow and deny lists applied during discovery.
#[derive(Debug, Clone, Default)]
pub struct GuidFilter {
    /// When non-empty, only these GUIDs are used
    pub allow: Vec<String>,
    /// GUIDs that are never used
    pub deny: Vec<String>,
}

impl GuidFilter {
    /// Whether a device with this GUID should be used.
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::device::GuidFilter;
    ///
    /// let filter = GuidFilter { allow: vec![], deny: vec!["bad".to_string()] };
    /// assert!(filter.accepts("good"));
    /// assert!(!filter.accepts("bad"));
    /// ```
    #[must_use]
    pub fn accepts(&self, guid: &str) -> bool {
        if !self.allow.is_empty() && !self.allow.iter().any(|g| g == guid) {
            warn!("Skip gamepad, not in the guid list: {}", guid);
            return false;
        }
        if self.deny.iter().any(|g| g == guid) {
            warn!("Filter out gamepad: {}", guid);
            return false;
        }
        true
    }
}

/// Probes every candidate device without filtering.
///
/// Devices that fail to open are logged and skipped.
///
/// # Errors
///
/// Returns an error only if the candidate list itself cannot be read.
pub fn probe_all<S: DeviceSource + ?Sized>(source: &S) -> Result<Vec<DeviceInfo>> {
    let mut found = Vec::new();
    for path in source.event_devices()? {
        match source.probe(&path) {
            Ok(info) => found.push(info),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    Ok(found)
}

/// Discovers gamepads, applies the GUID filter and attaches mappings.
///
/// # Errors
///
/// Returns an error only if the candidate list itself cannot be read.
pub fn discover<S: DeviceSource + ?Sized>(
    source: &S,
    db: &MappingDatabase,
    filter: &GuidFilter,
) -> Result<Vec<Gamepad>> {
    let gamepads: Vec<Gamepad> = probe_all(source)?
        .into_iter()
        .filter(|info| filter.accepts(&info.guid.to_string()))
        .map(|info| Gamepad::new(info, db))
        .collect();

    info!("Discovered {} gamepads", gamepads.len());
    Ok(gamepads)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PadmapError;
    use crate::mapping::Priority;
    use source::MockDeviceSource;
    use std::path::{Path, PathBuf};

    const XBOX: Guid = Guid::new(3, 0x045e, 0x028e, 0x0114);
    const OTHER: Guid = Guid::new(3, 0x1234, 0x5678, 0x0001);

    fn info(path: &Path, guid: Guid) -> DeviceInfo {
        DeviceInfo {
            path: path.to_string_lossy().to_string(),
            name: "Test Pad".to_string(),
            guid,
            capabilities: CapabilitySnapshot::default(),
        }
    }

    fn source_with(devices: Vec<(&'static str, Option<Guid>)>) -> MockDeviceSource {
        let mut source = MockDeviceSource::new();
        let paths: Vec<PathBuf> = devices.iter().map(|(p, _)| PathBuf::from(p)).collect();
        source.expect_event_devices().return_once(move || Ok(paths));
        source.expect_probe().returning(move |path| {
            let guid = devices
                .iter()
                .find(|(p, _)| Path::new(p) == path)
                .and_then(|(_, guid)| *guid);
            match guid {
                Some(guid) => Ok(info(path, guid)),
                None => Err(PadmapError::Device("permission denied".to_string())),
            }
        });
        source
    }

    fn database() -> MappingDatabase {
        let mut db = MappingDatabase::new("Linux");
        db.bulk_load(
            &format!("{},Xbox 360,a:b0,leftx:a0", XBOX),
            Priority::Default,
        );
        db
    }

    #[test]
    fn test_discover_attaches_mapping() {
        let source = source_with(vec![("/dev/input/a", Some(XBOX)), ("/dev/input/b", Some(OTHER))]);
        let gamepads = discover(&source, &database(), &GuidFilter::default()).unwrap();

        assert_eq!(gamepads.len(), 2);
        assert_eq!(gamepads[0].path(), "/dev/input/a");
        assert_eq!(gamepads[0].mapping.as_ref().unwrap().name, "Xbox 360");
        assert!(gamepads[1].mapping.is_none());
    }

    #[test]
    fn test_discover_skips_unopenable_devices() {
        let source = source_with(vec![("/dev/input/a", None), ("/dev/input/b", Some(XBOX))]);
        let gamepads = discover(&source, &database(), &GuidFilter::default()).unwrap();

        assert_eq!(gamepads.len(), 1);
        assert_eq!(gamepads[0].guid(), XBOX);
    }

    #[test]
    fn test_discover_allow_list() {
        let source = source_with(vec![("/dev/input/a", Some(XBOX)), ("/dev/input/b", Some(OTHER))]);
        let filter = GuidFilter {
            allow: vec![OTHER.to_string()],
            deny: vec![],
        };
        let gamepads = discover(&source, &database(), &filter).unwrap();

        assert_eq!(gamepads.len(), 1);
        assert_eq!(gamepads[0].guid(), OTHER);
    }

    #[test]
    fn test_discover_deny_list_wins() {
        let source = source_with(vec![("/dev/input/a", Some(XBOX)), ("/dev/input/b", Some(OTHER))]);
        let filter = GuidFilter {
            allow: vec![XBOX.to_string()],
            deny: vec![XBOX.to_string()],
        };
        assert!(discover(&source, &database(), &filter).unwrap().is_empty());
    }

    #[test]
    fn test_discover_propagates_listing_error() {
        let mut source = MockDeviceSource::new();
        source
            .expect_event_devices()
            .return_once(|| Err(PadmapError::Device("no /dev/input".to_string())));
        source.expect_probe().never();

        assert!(discover(&source, &database(), &GuidFilter::default()).is_err());
    }

    #[test]
    fn test_mapping_is_an_owned_copy() {
        let source = source_with(vec![("/dev/input/a", Some(XBOX))]);
        let mut db = database();
        let gamepads = discover(&source, &db, &GuidFilter::default()).unwrap();

        // Reloading the database does not affect the discovered gamepad
        db.bulk_load(&format!("{},Replaced,a:b3", XBOX), Priority::User);
        assert_eq!(gamepads[0].mapping.as_ref().unwrap().name, "Xbox 360");
        assert_eq!(db.lookup(&XBOX.to_string()).unwrap().name, "Replaced");
    }
}
