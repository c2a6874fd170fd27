//! Read-only frame snapshot of a game session.
//!
//! Renderers and tests read from a `GameSnapshot` instead of borrowing the
//! live [`GameState`](crate::GameState). `snapshot_into` reuses the buffers of
//! an existing snapshot so a render loop can keep one around between frames.

use crate::game_state::{Phase, Stats};
use crate::piece::Piece;
use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major, `width * height` cells.
    pub cells: Vec<Cell>,
    pub current: Option<Piece>,
    pub ghost: Option<Piece>,
    pub next: PieceKind,
    pub phase: Phase,
    pub paused: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub next_level_score: u32,
    pub clearing_rows: Vec<usize>,
    /// `0.0` unless a line clear is animating.
    pub clear_progress: f32,
    pub top_row_occupied: bool,
    pub column_heights: Vec<u8>,
    pub holes: u32,
    pub bumpiness: u32,
    pub stats: Stats,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            cells: vec![None; BOARD_WIDTH as usize * BOARD_HEIGHT as usize],
            current: None,
            ghost: None,
            next: PieceKind::I,
            phase: Phase::Falling,
            paused: false,
            score: 0,
            level: 1,
            lines: 0,
            next_level_score: 0,
            clearing_rows: Vec::new(),
            clear_progress: 0.0,
            top_row_occupied: false,
            column_heights: vec![0; BOARD_WIDTH as usize],
            holes: 0,
            bumpiness: 0,
            stats: Stats::default(),
        }
    }
}

impl GameSnapshot {
    /// Board cell at (x, y); `None` for empty or out-of-range cells.
    pub fn cell(&self, x: i8, y: i8) -> Cell {
        if x < 0 || y < 0 || x >= self.width as i8 || y >= self.height as i8 {
            return None;
        }
        self.cells[y as usize * self.width as usize + x as usize]
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn is_clearing(&self, y: usize) -> bool {
        self.clearing_rows.contains(&y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameState;

    #[test]
    fn test_default_is_empty_board() {
        let snap = GameSnapshot::default();
        assert_eq!(snap.cells.len(), 200);
        assert_eq!(snap.cell(0, 0), None);
        assert_eq!(snap.cell(-1, 5), None);
        assert_eq!(snap.cell(10, 5), None);
        assert!(!snap.game_over());
    }

    #[test]
    fn test_snapshot_into_reuses_buffers() {
        let mut state = GameState::with_seed(42);
        let mut snap = GameSnapshot::default();
        state.snapshot_into(&mut snap);
        let ptr = snap.cells.as_ptr();

        state.board_mut().set(9, 19, Some(PieceKind::S));
        state.snapshot_into(&mut snap);
        assert_eq!(snap.cells.as_ptr(), ptr);
        assert_eq!(snap.cell(9, 19), Some(PieceKind::S));
    }

    #[test]
    fn test_clearing_rows_reported() {
        let mut state = GameState::with_seed(42);
        state.set_next(PieceKind::I);
        state.spawn_next();
        for x in (0..3).chain(7..10) {
            state.board_mut().set(x, 19, Some(PieceKind::O));
        }
        state.apply(crate::types::Command::HardDrop);
        state.update(150);

        let snap = state.snapshot();
        assert_eq!(snap.phase, Phase::LineClearing);
        assert!(snap.is_clearing(19));
        assert!(!snap.is_clearing(18));
        assert_eq!(snap.clear_progress, 0.25);
        assert!(snap.current.is_none());
    }
}
