//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (engine logic, terminal rendering, input mapping).
//!
//! # Board Dimensions
//!
//! Standard playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: (3, 0); rows above 0 form the spawn buffer
//!
//! # Game Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `INITIAL_FALL_MS` | 1000 | Gravity at level 1 |
//! | `MIN_FALL_MS` | 100 | Fastest gravity |
//! | `LOCK_DELAY_MS` | 500 | Grace period before a grounded piece locks |
//! | `LINE_CLEAR_MS` | 600 | Line-clear animation window |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Command, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let parsed = PieceKind::from_str("t").unwrap();
//! assert_eq!(parsed, PieceKind::T);
//! assert_eq!(parsed.rotation_states(), 4);
//!
//! assert_eq!(Command::from_str("hardDrop"), Some(Command::HardDrop));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest board edge the engine accepts (coordinates are `i8`).
pub const MAX_BOARD_DIM: u8 = 64;

/// Default spawn column of a piece's 4x4 box.
pub const SPAWN_X: i8 = 3;

/// Default spawn row of a piece's 4x4 box.
pub const SPAWN_Y: i8 = 0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1.
pub const INITIAL_FALL_MS: u32 = 1000;

/// Fall interval floor.
pub const MIN_FALL_MS: u32 = 100;

/// Lock delay once the piece can no longer fall.
pub const LOCK_DELAY_MS: u32 = 500;

/// Duration of the line-clear animation window.
pub const LINE_CLEAR_MS: u32 = 600;

/// Key repeat: delay before a held key starts repeating.
pub const KEY_REPEAT_DELAY_MS: u32 = 150;

/// Key repeat: interval between repeats once started.
pub const KEY_REPEAT_INTERVAL_MS: u32 = 50;

/// Points per simultaneous row count (1..=4), multiplied by the level.
pub const LINE_SCORES: [u32; 4] = [10, 30, 60, 100];

/// Score needed to reach level 2.
pub const LEVEL_SCORE_BASE: u32 = 200;

/// Each level-up multiplies the threshold increment by this factor.
pub const LEVEL_SCORE_GROWTH: f64 = 1.5;

/// Each level-up divides the fall interval by this factor.
pub const SPEED_FACTOR: f64 = 1.2;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Number of distinct rotation states.
    ///
    /// O has one; I, S and Z alternate between two; T, J and L cycle through four.
    pub fn rotation_states(&self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I | PieceKind::S | PieceKind::Z => 2,
            PieceKind::T | PieceKind::J | PieceKind::L => 4,
        }
    }
}

/// Cell on the board (None = empty, Some = filled with the kind that placed it)
pub type Cell = Option<PieceKind>;

/// Discrete commands accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    HardDrop,
    TogglePause,
    Restart,
    Quit,
}

impl Command {
    /// Parse a command name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Command::MoveLeft),
            "moveright" => Some(Command::MoveRight),
            "softdrop" => Some(Command::SoftDrop),
            "rotatecw" | "rotateclockwise" => Some(Command::RotateCw),
            "rotateccw" | "rotatecounterclockwise" => Some(Command::RotateCcw),
            "harddrop" => Some(Command::HardDrop),
            "togglepause" | "pause" => Some(Command::TogglePause),
            "restart" => Some(Command::Restart),
            "quit" => Some(Command::Quit),
            _ => None,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::MoveLeft => "moveLeft",
            Command::MoveRight => "moveRight",
            Command::SoftDrop => "softDrop",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::HardDrop => "hardDrop",
            Command::TogglePause => "togglePause",
            Command::Restart => "restart",
            Command::Quit => "quit",
        }
    }

    /// Commands that still apply while the game is paused or over.
    pub fn is_meta(&self) -> bool {
        matches!(self, Command::TogglePause | Command::Restart | Command::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_kind_round_trips_through_str() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(PieceKind::from_str("X"), None);
    }

    #[test]
    fn piece_kind_index_matches_all_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn rotation_state_counts() {
        assert_eq!(PieceKind::O.rotation_states(), 1);
        assert_eq!(PieceKind::I.rotation_states(), 2);
        assert_eq!(PieceKind::S.rotation_states(), 2);
        assert_eq!(PieceKind::Z.rotation_states(), 2);
        assert_eq!(PieceKind::T.rotation_states(), 4);
        assert_eq!(PieceKind::J.rotation_states(), 4);
        assert_eq!(PieceKind::L.rotation_states(), 4);
    }

    #[test]
    fn command_parsing_is_case_insensitive() {
        assert_eq!(Command::from_str("MOVELEFT"), Some(Command::MoveLeft));
        assert_eq!(Command::from_str("rotateCcw"), Some(Command::RotateCcw));
        assert_eq!(Command::from_str("pause"), Some(Command::TogglePause));
        assert_eq!(Command::from_str("hold"), None);
    }

    #[test]
    fn meta_commands() {
        assert!(Command::TogglePause.is_meta());
        assert!(Command::Restart.is_meta());
        assert!(Command::Quit.is_meta());
        assert!(!Command::HardDrop.is_meta());
        assert!(!Command::MoveLeft.is_meta());
    }
}
