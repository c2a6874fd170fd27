//! Piece - a falling or placed tetromino instance.
//!
//! `Piece` is a small `Copy` value. Transforms (`moved`, `rotated`) return a
//! new piece and never validate; the engine probes the copy against the board
//! and only then commits it as the current piece.

use crate::pieces::{get_shape, PieceShape};
use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Column of the 4x4 box's left edge.
    pub x: i8,
    /// Row of the 4x4 box's top edge; negative while in the spawn buffer.
    pub y: i8,
    /// Always kept in `0..kind.rotation_states()`.
    pub rotation: u8,
}

impl Piece {
    pub fn new(kind: PieceKind, x: i8, y: i8) -> Self {
        Self {
            kind,
            x,
            y,
            rotation: 0,
        }
    }

    /// Same piece with an explicit rotation index (wrapped to the state count).
    pub fn with_rotation(mut self, rotation: u8) -> Self {
        self.rotation = rotation % self.kind.rotation_states();
        self
    }

    /// Mino offsets for the current rotation state.
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute (column, row) cells this piece occupies.
    pub fn blocks(&self) -> [(i8, i8); 4] {
        self.shape().map(|(dx, dy)| (self.x + dx, self.y + dy))
    }

    pub fn moved(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Next (or previous) rotation state, without validation.
    pub fn rotated(&self, clockwise: bool) -> Self {
        let states = self.kind.rotation_states();
        let rotation = if clockwise {
            (self.rotation + 1) % states
        } else {
            (self.rotation + states - 1) % states
        };
        Self { rotation, ..*self }
    }

    /// Occupied bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (i8, i8, i8, i8) {
        let blocks = self.blocks();
        let mut b = (i8::MAX, i8::MAX, i8::MIN, i8::MIN);
        for (x, y) in blocks {
            b.0 = b.0.min(x);
            b.1 = b.1.min(y);
            b.2 = b.2.max(x);
            b.3 = b.3.max(y);
        }
        b
    }
}
