//! Pieces module - tetromino catalog and kick resolution
//!
//! Every rotation state is a hand-authored 4x4 occupancy bitmap. Each row is a
//! nibble whose most significant bit is column 0, so `0b0110` fills columns 1
//! and 2. Bitmaps are decoded into mino offsets at compile time; a state that
//! does not contain exactly four minos fails the build.

use crate::piece::Piece;
use crate::types::PieceKind;

/// Offset of a single mino relative to the piece origin (column, row)
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from piece origin
pub type PieceShape = [MinoOffset; 4];

/// One rotation state: four rows, top to bottom.
type Bitmap = [u8; 4];

const fn decode(bitmap: Bitmap) -> PieceShape {
    let mut shape = [(0i8, 0i8); 4];
    let mut n = 0;
    let mut row = 0;
    while row < 4 {
        let mut col = 0;
        while col < 4 {
            if bitmap[row] & (0b1000 >> col) != 0 {
                assert!(n < 4, "rotation state has more than four minos");
                shape[n] = (col as i8, row as i8);
                n += 1;
            }
            col += 1;
        }
        row += 1;
    }
    assert!(n == 4, "rotation state has fewer than four minos");
    shape
}

const I_SHAPES: [PieceShape; 2] = [
    decode([0b0000, 0b1111, 0b0000, 0b0000]),
    decode([0b0010, 0b0010, 0b0010, 0b0010]),
];

const O_SHAPES: [PieceShape; 1] = [decode([0b0000, 0b0110, 0b0110, 0b0000])];

const T_SHAPES: [PieceShape; 4] = [
    decode([0b0000, 0b0100, 0b1110, 0b0000]),
    decode([0b0000, 0b0100, 0b0110, 0b0100]),
    decode([0b0000, 0b0000, 0b1110, 0b0100]),
    decode([0b0000, 0b0100, 0b1100, 0b0100]),
];

const S_SHAPES: [PieceShape; 2] = [
    decode([0b0000, 0b0110, 0b1100, 0b0000]),
    decode([0b0000, 0b0100, 0b0110, 0b0010]),
];

const Z_SHAPES: [PieceShape; 2] = [
    decode([0b0000, 0b1100, 0b0110, 0b0000]),
    decode([0b0000, 0b0010, 0b0110, 0b0100]),
];

const J_SHAPES: [PieceShape; 4] = [
    decode([0b0000, 0b1000, 0b1110, 0b0000]),
    decode([0b0000, 0b0110, 0b0100, 0b0100]),
    decode([0b0000, 0b0000, 0b1110, 0b0010]),
    decode([0b0000, 0b0100, 0b0100, 0b1100]),
];

const L_SHAPES: [PieceShape; 4] = [
    decode([0b0000, 0b0010, 0b1110, 0b0000]),
    decode([0b0000, 0b0100, 0b0100, 0b0110]),
    decode([0b0000, 0b0000, 0b1110, 0b1000]),
    decode([0b0000, 0b1100, 0b0100, 0b0100]),
];

/// All rotation states of a kind, in clockwise order.
pub fn shapes(kind: PieceKind) -> &'static [PieceShape] {
    match kind {
        PieceKind::I => &I_SHAPES,
        PieceKind::O => &O_SHAPES,
        PieceKind::T => &T_SHAPES,
        PieceKind::S => &S_SHAPES,
        PieceKind::Z => &Z_SHAPES,
        PieceKind::J => &J_SHAPES,
        PieceKind::L => &L_SHAPES,
    }
}

/// Get the shape (mino offsets) for a piece kind and rotation index.
///
/// The index is taken modulo the kind's state count, so any `u8` is accepted.
pub fn get_shape(kind: PieceKind, rotation: u8) -> PieceShape {
    let states = shapes(kind);
    states[rotation as usize % states.len()]
}

/// Origin offsets tried, in order, when rotating clockwise.
///
/// The first entry is the plain rotation. Counter-clockwise rotation uses the
/// same list mirrored horizontally.
pub type KickTable = [(i8, i8); 5];

/// The O piece never needs a kick.
const O_KICKS: KickTable = [(0, 0); 5];

/// Kicks for T, S, Z, J, L.
const STANDARD_KICKS: KickTable = [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)];

/// The I piece reaches two columns further out.
const I_KICKS: KickTable = [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)];

/// Get kick table for a piece kind
pub fn get_kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::O => &O_KICKS,
        PieceKind::I => &I_KICKS,
        _ => &STANDARD_KICKS,
    }
}

/// Try to rotate a piece, falling back to wall kicks.
///
/// `is_valid` is the board's collision predicate. Every trial happens on a
/// copy; the caller's piece is never touched. Returns the accepted piece and
/// the kick that produced it, or `None` if every offset collides. Kinds with a
/// single rotation state never rotate.
pub fn try_rotate(
    piece: &Piece,
    clockwise: bool,
    is_valid: impl Fn(&Piece) -> bool,
) -> Option<(Piece, (i8, i8))> {
    if piece.kind.rotation_states() == 1 {
        return None;
    }

    let rotated = piece.rotated(clockwise);
    let mirror = if clockwise { 1 } else { -1 };

    get_kick_table(piece.kind)
        .iter()
        .map(|&(dx, dy)| (dx * mirror, dy))
        .find_map(|(dx, dy)| {
            let candidate = rotated.moved(dx, dy);
            is_valid(&candidate).then_some((candidate, (dx, dy)))
        })
}
