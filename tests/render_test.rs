//! Framebuffer rendering of game snapshots

use blockfall::core::{GameEvent, GameSnapshot, GameState, Phase};
use blockfall::term::{
    piece_color, render_frame, AnchorY, Effects, FrameBuffer, FrameRenderer, GameView, Rgb,
    Viewport,
};
use blockfall::types::{Command, PieceKind};

const VIEW: Viewport = Viewport {
    width: 80,
    height: 24,
};

/// Framebuffer column/row of the left half of board cell (x, y).
fn cell_origin(x: u16, y: u16) -> (u16, u16) {
    // Board frame is 22 wide at x = 29, 22 tall at y = 1.
    (29 + 1 + x * 2, 1 + 1 + y)
}

fn text(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
}

fn game_with_current(kind: PieceKind) -> GameState {
    let mut game = GameState::with_seed(4);
    game.set_next(kind);
    game.spawn_next();
    game
}

#[test]
fn border_corners_are_drawn() {
    let game = game_with_current(PieceKind::T);
    let fb = GameView::default().render(&game.snapshot(), VIEW);
    assert_eq!(fb.get(29, 1).map(|g| g.ch), Some('┌'));
    assert_eq!(fb.get(50, 1).map(|g| g.ch), Some('┐'));
    assert_eq!(fb.get(29, 22).map(|g| g.ch), Some('└'));
    assert_eq!(fb.get(50, 22).map(|g| g.ch), Some('┘'));
}

#[test]
fn locked_cell_is_two_columns_wide_in_piece_color() {
    let mut game = game_with_current(PieceKind::T);
    game.board_mut().set(0, 19, Some(PieceKind::Z));
    let fb = GameView::default().render(&game.snapshot(), VIEW);

    let (px, py) = cell_origin(0, 19);
    for dx in 0..2 {
        let glyph = fb.get(px + dx, py).unwrap();
        assert_eq!(glyph.ch, '█');
        assert_eq!(glyph.style.fg, piece_color(PieceKind::Z));
    }
    let (ex, ey) = cell_origin(1, 19);
    assert_eq!(fb.get(ex, ey).map(|g| g.ch), Some('·'));
}

#[test]
fn active_and_ghost_pieces_are_drawn() {
    let game = game_with_current(PieceKind::O);
    let fb = GameView::default().render(&game.snapshot(), VIEW);

    // O spawns with cells in columns 4..=5, rows 1..=2, and lands on 18..=19.
    let (ax, ay) = cell_origin(4, 1);
    let active = fb.get(ax, ay).unwrap();
    assert_eq!(active.ch, '█');
    assert!(active.style.bold);

    let (gx, gy) = cell_origin(5, 19);
    assert_eq!(fb.get(gx, gy).map(|g| g.ch), Some('░'));
}

#[test]
fn side_panel_shows_stats_when_wide_enough() {
    let mut game = game_with_current(PieceKind::I);
    game.apply(Command::HardDrop);
    let out = text(&GameView::default().render(&game.snapshot(), VIEW));
    for label in ["SCORE", "LEVEL", "LINES", "GOAL", "NEXT", "TIME", "PIECES", "HOLES"] {
        assert!(out.contains(label), "missing {}", label);
    }
    assert!(out.contains("200"), "goal for level 2");

    let narrow = text(&GameView::default().render(&game.snapshot(), Viewport::new(30, 24)));
    assert!(!narrow.contains("SCORE"));
}

#[test]
fn overlays() {
    let mut game = game_with_current(PieceKind::L);
    game.apply(Command::TogglePause);
    let out = text(&GameView::default().render(&game.snapshot(), VIEW));
    assert!(out.contains("PAUSED"));

    let mut game = GameState::with_seed(4);
    for y in 0..3 {
        game.board_mut().fill_row(y, Some(PieceKind::O));
    }
    game.spawn_next();
    let out = text(&GameView::default().render(&game.snapshot(), VIEW));
    assert!(out.contains("GAME OVER"));
    assert!(!out.contains("PAUSED"));
}

#[test]
fn clearing_row_flashes_white() {
    let mut game = game_with_current(PieceKind::I);
    for x in (0..3).chain(7..10) {
        game.board_mut().set(x, 19, Some(PieceKind::S));
    }
    game.apply(Command::HardDrop);
    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::LineClearing);

    let fb = GameView::default().render(&snap, VIEW);
    let (px, py) = cell_origin(0, 19);
    assert_eq!(fb.get(px, py).unwrap().style.fg, Rgb::new(255, 255, 255));

    // Second sixth of the window: the row shows its own colors, dimmed.
    game.update(150);
    let fb = GameView::default().render(&game.snapshot(), VIEW);
    let glyph = fb.get(px, py).unwrap();
    assert_eq!(glyph.style.fg, piece_color(PieceKind::S));
    assert!(glyph.style.dim);
}

#[test]
fn danger_border_when_top_row_filled() {
    let mut game = game_with_current(PieceKind::T);
    game.board_mut().set(9, 0, Some(PieceKind::I));
    let fb = GameView::default().render(&game.snapshot(), VIEW);
    assert_ne!(fb.get(29, 1).unwrap().style.fg, Rgb::new(200, 200, 200));
    assert!(text(&fb).contains("DANGER"));
}

#[test]
fn effects_banner_in_side_panel() {
    let game = game_with_current(PieceKind::T);
    let mut effects = Effects::new();
    effects.handle(&GameEvent::LinesCleared {
        rows: vec![16, 17, 18, 19],
        points: 100,
    });

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    view.render_into_with_effects(&game.snapshot(), Some(&effects), VIEW, &mut fb);
    assert!(text(&fb).contains("TETRIS +100"));
}

#[test]
fn frame_renderer_can_be_driven_directly() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let mut effects = Effects::new();
    effects.handle(&GameEvent::LevelUp { level: 3 });

    let snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(VIEW.width, VIEW.height);
    let mut renderer = FrameRenderer::new(&view, &mut fb, VIEW, snap.width, snap.height)
        .with_effects(&effects);
    render_frame(&mut renderer, &snap);

    assert_eq!(fb.get(29, 0).map(|g| g.ch), Some('┌'));
    assert!(text(&fb).contains("LEVEL 3"));
}

#[test]
fn tiny_viewport_does_not_panic() {
    let game = game_with_current(PieceKind::J);
    let snap = game.snapshot();
    for (w, h) in [(0, 0), (1, 1), (5, 3), (22, 22)] {
        let fb = GameView::default().render(&snap, Viewport::new(w, h));
        assert_eq!((fb.width(), fb.height()), (w, h));
    }
}
