//! # padmap
//!
//! Bake SDL game controller mappings into evdev-based configuration files.
//!
//! This library resolves the abstract controls of an SDL mapping string
//! (`a`, `leftx`, `dpup`, ...) to the physical evdev events of a connected
//! gamepad, and substitutes them into configuration templates for tools such
//! as xboxdrv.

pub mod config;
pub mod device;
pub mod error;
pub mod mapping;
pub mod resolve;
pub mod template;
