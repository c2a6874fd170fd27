//! Piece catalog and rotation tests

use std::collections::BTreeSet;

use blockfall::core::{get_kick_table, get_shape, try_rotate, Board, Piece};
use blockfall::types::PieceKind;

fn cell_set(piece: &Piece) -> BTreeSet<(i8, i8)> {
    piece.blocks().into_iter().collect()
}

#[test]
fn test_full_cycle_returns_to_start() {
    for kind in PieceKind::ALL {
        let start = Piece::new(kind, 3, 5);
        for clockwise in [true, false] {
            let mut piece = start;
            for _ in 0..kind.rotation_states() {
                piece = piece.rotated(clockwise);
            }
            assert_eq!(piece.rotation, start.rotation, "{:?}", kind);
            assert_eq!(cell_set(&piece), cell_set(&start), "{:?}", kind);
        }
    }
}

#[test]
fn test_four_state_kinds_cycle_in_four_turns() {
    for kind in [PieceKind::T, PieceKind::J, PieceKind::L] {
        let mut piece = Piece::new(kind, 0, 0);
        let mut seen = BTreeSet::new();
        for _ in 0..4 {
            seen.insert(cell_set(&piece));
            piece = piece.rotated(true);
        }
        assert_eq!(seen.len(), 4, "{:?}", kind);
    }
}

#[test]
fn test_o_rotation_never_changes_cells() {
    let board = Board::new();
    let o = Piece::new(PieceKind::O, 4, 4);
    assert_eq!(cell_set(&o.rotated(true)), cell_set(&o));
    assert_eq!(cell_set(&o.rotated(false)), cell_set(&o));
    assert!(try_rotate(&o, true, |p| board.is_valid_position(p)).is_none());
}

#[test]
fn test_spawn_shapes_sit_in_rows_one_and_two() {
    for kind in PieceKind::ALL {
        let rows: BTreeSet<i8> = get_shape(kind, 0).iter().map(|&(_, dy)| dy).collect();
        let expected: BTreeSet<i8> = if kind == PieceKind::I {
            [1].into()
        } else {
            [1, 2].into()
        };
        assert_eq!(rows, expected, "{:?}", kind);
    }
}

#[test]
fn test_kick_tables_start_with_plain_rotation() {
    for kind in PieceKind::ALL {
        assert_eq!(get_kick_table(kind)[0], (0, 0));
    }
}

#[test]
fn test_rotation_against_right_wall_kicks_left() {
    let board = Board::new();
    // Upright J against the right wall: box columns 0..=1 at x = 8.
    let j = Piece::new(PieceKind::J, 8, 5).with_rotation(3);
    assert!(board.is_valid_position(&j));
    assert_eq!(j.bounds().2, 9);

    // Flat J needs three columns.
    let (rotated, kick) = try_rotate(&j, true, |p| board.is_valid_position(p)).unwrap();
    assert_eq!(kick, (-1, 0));
    assert_eq!((rotated.x, rotated.rotation), (7, 0));
}

#[test]
fn test_counter_clockwise_against_left_wall_kicks_right() {
    let board = Board::new();
    // Upright T against the left wall: box columns 1..=2 at x = -1.
    let t = Piece::new(PieceKind::T, -1, 5).with_rotation(1);
    assert!(board.is_valid_position(&t));
    assert_eq!(t.bounds().0, 0);

    let (rotated, kick) = try_rotate(&t, false, |p| board.is_valid_position(p)).unwrap();
    assert_eq!(kick, (1, 0));
    assert_eq!((rotated.x, rotated.rotation), (0, 0));
}

#[test]
fn test_blocked_rotation_leaves_piece_alone() {
    let mut board = Board::new();
    // Box the piece in so nothing but its current cells is free.
    for y in 0..20 {
        board.fill_row(y, Some(PieceKind::Z));
    }
    let s = Piece::new(PieceKind::S, 3, 5);
    for (x, y) in s.blocks() {
        board.set(x, y, None);
    }
    assert!(board.is_valid_position(&s));
    assert!(try_rotate(&s, true, |p| board.is_valid_position(p)).is_none());
    assert!(try_rotate(&s, false, |p| board.is_valid_position(p)).is_none());
}
