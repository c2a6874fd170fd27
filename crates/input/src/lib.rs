//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Command`] and provides a
//! key-repeat handler suitable for terminal environments, including terminals
//! without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{is_repeatable, map_key};
