//! # Device Source
//!
//! Finds gamepad event devices and reads their identity and capabilities
//! using the Linux evdev interface.
//!
//! ## Device Detection
//!
//! Joystick nodes are found under `/dev/input/by-path`, where udev creates a
//! link ending in `event-joystick` for every device classified as a joystick.

use evdev::Device;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::guid::Guid;
use super::snapshot::CapabilitySnapshot;
use crate::error::{PadmapError, Result};

/// Identity and capabilities of one probed device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceInfo {
    /// Event device path, as substituted for `MAP_EVDEV`
    pub path: String,
    pub name: String,
    #[serde(serialize_with = "serialize_guid")]
    pub guid: Guid,
    pub capabilities: CapabilitySnapshot,
}

fn serialize_guid<S: serde::Serializer>(guid: &Guid, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(guid)
}

/// Source of input devices.
#[cfg_attr(test, mockall::automock)]
pub trait DeviceSource {
    /// Candidate event device paths, in a deterministic order.
    fn event_devices(&self) -> Result<Vec<PathBuf>>;

    /// Opens one device and reads its identity and capabilities.
    fn probe(&self, path: &Path) -> Result<DeviceInfo>;
}

/// [`DeviceSource`] backed by evdev device nodes.
#[derive(Debug, Clone)]
pub struct EvdevSource {
    search_dir: PathBuf,
    suffix: String,
}

impl EvdevSource {
    /// Creates a source scanning `search_dir` for entries ending in `suffix`.
    ///
    /// # Examples
    ///
    /// ```
    /// use padmap::device::source::EvdevSource;
    ///
    /// let source = EvdevSource::new("/dev/input/by-path", "event-joystick");
    /// ```
    pub fn new<P: Into<PathBuf>>(search_dir: P, suffix: &str) -> Self {
        Self {
            search_dir: search_dir.into(),
            suffix: suffix.to_string(),
        }
    }
}

impl DeviceSource for EvdevSource {
    fn event_devices(&self) -> Result<Vec<PathBuf>> {
        if !self.search_dir.exists() {
            return Err(PadmapError::Device(format!(
                "{} directory not found",
                self.search_dir.display()
            )));
        }

        let mut devices: Vec<PathBuf> = fs::read_dir(&self.search_dir)
            .map_err(|e| {
                PadmapError::Device(format!(
                    "Failed to read {}: {}",
                    self.search_dir.display(),
                    e
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| PadmapError::Device(format!("Failed to read directory entry: {}", e)))?
            .into_iter()
            .map(|entry| entry.path())
            .filter(|path| path.to_string_lossy().ends_with(&self.suffix))
            .collect();

        // Sort for deterministic output numbering when several pads are connected
        devices.sort();
        debug!("Found {} candidate devices in {}", devices.len(), self.search_dir.display());
        Ok(devices)
    }

    fn probe(&self, path: &Path) -> Result<DeviceInfo> {
        let device = Device::open(path)
            .map_err(|e| PadmapError::Device(format!("Could not open {}: {}", path.display(), e)))?;

        let id = device.input_id();
        let guid = Guid::new(id.bus_type().0, id.vendor(), id.product(), id.version());
        info!("Opened device {} ({})", path.display(), guid);

        let keys = device.supported_keys();
        let axes = device.supported_absolute_axes();
        let capabilities = CapabilitySnapshot::scan(
            |code| keys.map_or(false, |keys| keys.contains(evdev::Key::new(code))),
            |code| axes.map_or(false, |axes| axes.contains(evdev::AbsoluteAxisType(code))),
        );

        Ok(DeviceInfo {
            path: path.to_string_lossy().to_string(),
            name: device.name().unwrap_or_default().to_string(),
            guid,
            capabilities,
        })
    }
}
