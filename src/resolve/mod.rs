//! # Resolve Module
//!
//! Turns abstract capabilities into physical event names for one device.
//!
//! This module handles:
//! - Looking up the physical event behind a mapping binding
//! - Computing the sign of directional bindings
//! - Answering template commands

pub mod command;
pub mod direction;
pub mod resolver;

pub use command::{CommandResolver, CommandResult};
pub use resolver::{resolve, Resolved};
