//! The renderer capability and the per-frame draw order.
//!
//! The engine knows nothing about rendering; a front end picks one
//! [`Renderer`] implementation and drives it with [`render_frame`].

use crate::core::{GameSnapshot, Piece};

/// How a piece should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceStyle {
    /// The falling piece.
    Active,
    /// The landing preview.
    Ghost,
}

/// Full-board messages drawn last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Paused,
    GameOver { score: u32 },
}

pub trait Renderer {
    /// Locked cells, including rows that are mid-clear.
    fn draw_board(&mut self, snap: &GameSnapshot);

    fn draw_piece(&mut self, piece: &Piece, style: PieceStyle);

    /// Everything outside the playfield: score, level, next piece, stats.
    fn draw_ui(&mut self, snap: &GameSnapshot);

    fn draw_overlay(&mut self, overlay: Overlay);
}

/// Which overlay, if any, a snapshot calls for. Game over wins over pause.
pub fn overlay_for(snap: &GameSnapshot) -> Option<Overlay> {
    if snap.game_over() {
        Some(Overlay::GameOver { score: snap.score })
    } else if snap.paused {
        Some(Overlay::Paused)
    } else {
        None
    }
}

/// Draw one frame: board, ghost, active piece, UI, then any overlay.
pub fn render_frame<R: Renderer + ?Sized>(renderer: &mut R, snap: &GameSnapshot) {
    renderer.draw_board(snap);

    if !snap.game_over() {
        if let Some(ghost) = snap.ghost.filter(|g| Some(*g) != snap.current) {
            renderer.draw_piece(&ghost, PieceStyle::Ghost);
        }
        if let Some(current) = snap.current {
            renderer.draw_piece(&current, PieceStyle::Active);
        }
    }

    renderer.draw_ui(snap);

    if let Some(overlay) = overlay_for(snap) {
        renderer.draw_overlay(overlay);
    }
}
