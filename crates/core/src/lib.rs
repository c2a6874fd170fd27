//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the rules, state management and simulation logic. It
//! has no dependency on terminals, input devices or wall-clock time:
//!
//! - **Deterministic**: the same seed and the same `update`/`apply` sequence
//!   produce the same session
//! - **Headless**: renderers read a [`GameSnapshot`] and never reach inside
//!
//! # Module Structure
//!
//! - [`board`]: the grid with collision, placement, row clearing and analytics
//! - [`piece`]: a tetromino instance (kind, origin, rotation)
//! - [`pieces`]: shape catalog, kick tables and kick resolution
//! - [`game_state`]: the session state machine
//! - [`rng`]: seedable uniform piece randomizer
//! - [`scoring`]: line-clear points and level progression
//! - [`config`]: tunable rule constants
//! - [`snapshot`]: owned read-only view for rendering
//!
//! # Rules
//!
//! - **Uniform randomizer**: every kind is equally likely on every draw
//! - **Wall kicks**: five offsets per rotation, wider for I, none for O
//! - **Lock delay**: 500ms once the piece can no longer fall; moves and
//!   rotations restart it
//! - **Line clears**: full rows flash for 600ms before they are removed
//! - **Levels**: earned by score, each one speeding up gravity
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::Command;
//!
//! let mut game = GameState::with_seed(12345);
//!
//! game.apply(Command::MoveRight);
//! game.apply(Command::RotateCw);
//! game.apply(Command::HardDrop);
//!
//! // Locked without clearing anything; the next piece is already falling.
//! assert_eq!(game.score(), 0);
//! assert!(game.current().is_some());
//! ```
//!
//! # Timing
//!
//! Call [`GameState::update`] once per frame with the elapsed milliseconds.
//! The front end conventionally runs a 16ms tick.

pub mod board;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, RulesConfig};
pub use game_state::{GameEvent, GameState, Phase, Stats};
pub use piece::Piece;
pub use pieces::{get_kick_table, get_shape, try_rotate};
pub use rng::{Randomizer, SimpleRng};
pub use scoring::{line_clear_score, LevelProgress};
pub use snapshot::GameSnapshot;
