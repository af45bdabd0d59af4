//! # Error Types
//!
//! Custom error types for padmap using `thiserror`.

use thiserror::Error;

/// Main error type for padmap
#[derive(Debug, Error)]
pub enum PadmapError {
    /// Mapping line has fewer than the mandatory fields
    #[error("malformed mapping line ({fields} fields): {line}")]
    MalformedMappingLine { line: String, fields: usize },

    /// Directive key is not a known controller capability
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// Directive value does not follow the binding grammar
    #[error("malformed binding descriptor \"{descriptor}\": {reason}")]
    MalformedBindingDescriptor {
        descriptor: String,
        reason: &'static str,
    },

    /// Hat mask selects neither or both hat sub-axes
    #[error("ambiguous hat mask {mask:#x} on hat {hat}")]
    AmbiguousHatMask { hat: usize, mask: u8 },

    /// GUID string or byte buffer is not a valid device identity
    #[error("invalid guid \"{guid}\": {reason}")]
    InvalidGuid { guid: String, reason: &'static str },

    /// Input device errors
    #[error("Device error: {0}")]
    Device(String),

    /// No usable input device found
    #[error("no gamepad device found")]
    DeviceNotFound,

    /// Template rendering errors
    #[error("Template error: {0}")]
    Template(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for padmap
pub type Result<T> = std::result::Result<T, PadmapError>;
