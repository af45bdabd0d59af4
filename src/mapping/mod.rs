//! # Mapping Module
//!
//! SDL game controller mappings.
//!
//! This module handles:
//! - Capability names and the button/axis split
//! - Parsing mapping lines into typed bindings
//! - The GUID-keyed mapping database with priority rules
//! - The built-in mapping dataset

pub mod binding;
pub mod builtin;
pub mod capability;
pub mod database;
pub mod parser;

pub use binding::{AxisHalf, ButtonBinding, HatAxis, HatMask, InputBinding, OutputBinding};
pub use capability::{Capability, CapabilityKind};
pub use database::{MappingDatabase, UpsertOutcome};
pub use parser::{Mapping, Priority};
