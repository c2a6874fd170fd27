//! Key mapping and held-key repeat driving a game

use blockfall::core::GameState;
use blockfall::input::{is_repeatable, map_key, InputHandler};
use blockfall::types::{Command, PieceKind};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn game_with_current(kind: PieceKind) -> GameState {
    let mut game = GameState::with_seed(9);
    game.set_next(kind);
    game.spawn_next();
    game
}

#[test]
fn every_command_has_a_key() {
    let bound: Vec<Command> = [
        KeyCode::Left,
        KeyCode::Right,
        KeyCode::Down,
        KeyCode::Up,
        KeyCode::Char('z'),
        KeyCode::Char(' '),
        KeyCode::Char('p'),
        KeyCode::Char('r'),
        KeyCode::Esc,
    ]
    .into_iter()
    .filter_map(|code| map_key(key(code)))
    .collect();

    for command in [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::RotateCw,
        Command::RotateCcw,
        Command::HardDrop,
        Command::TogglePause,
        Command::Restart,
        Command::Quit,
    ] {
        assert!(bound.contains(&command), "{:?} unbound", command);
    }
}

#[test]
fn ctrl_c_quits_and_unknown_keys_are_ignored() {
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert_eq!(map_key(ctrl_c), Some(Command::Quit));
    assert_eq!(map_key(key(KeyCode::Char('c'))), None);
    assert_eq!(map_key(key(KeyCode::Tab)), None);
    assert_eq!(map_key(key(KeyCode::F(1))), None);
}

#[test]
fn only_motion_repeats() {
    let repeating: Vec<Command> = [
        Command::MoveLeft,
        Command::MoveRight,
        Command::SoftDrop,
        Command::RotateCw,
        Command::HardDrop,
        Command::Quit,
    ]
    .into_iter()
    .filter(|&c| is_repeatable(c))
    .collect();
    assert_eq!(repeating, vec![Command::MoveLeft, Command::MoveRight, Command::SoftDrop]);
}

#[test]
fn holding_left_slides_piece_to_the_wall() {
    let mut game = game_with_current(PieceKind::O);
    let mut input = InputHandler::new();

    let first = map_key(key(KeyCode::Left)).and_then(|c| input.press(c));
    assert_eq!(first, Some(Command::MoveLeft));
    game.apply(Command::MoveLeft);

    // Keep the hold alive the way terminal autorepeat does.
    for _ in 0..30 {
        assert_eq!(input.press(Command::MoveLeft), None);
        for command in input.update(16) {
            game.apply(command);
        }
    }

    let piece = game.current().unwrap();
    assert_eq!(piece.bounds().0, 0);
    assert!(input.is_held(Command::MoveLeft));

    input.release(Command::MoveLeft);
    assert!(input.update(1000).is_empty());
}

#[test]
fn single_tap_moves_piece_one_cell() {
    let mut game = game_with_current(PieceKind::T);
    let mut input = InputHandler::new();
    let start = game.current().unwrap().x;

    if let Some(command) = map_key(key(KeyCode::Right)).and_then(|c| input.press(c)) {
        game.apply(command);
    }
    // No release event follows, as in terminals without enhanced key reporting.
    for _ in 0..40 {
        for command in input.update(16) {
            game.apply(command);
        }
    }

    assert_eq!(game.current().unwrap().x, start + 1);
}

#[test]
fn repeats_follow_delay_then_interval() {
    // Release events available: only `release` ends the hold.
    let mut input = InputHandler::new().with_key_release_timeout_ms(10_000);
    input.press(Command::SoftDrop);

    assert!(input.update(149).is_empty());
    assert!(input.update(1).is_empty());
    assert_eq!(input.update(50).as_slice(), &[Command::SoftDrop]);
    assert_eq!(input.update(49).len(), 0);
    assert_eq!(input.update(1).len(), 1);
}

#[test]
fn held_keys_time_out_without_events() {
    let mut input = InputHandler::new().with_key_release_timeout_ms(100);
    input.press(Command::MoveRight);
    input.update(60);
    input.update(60);
    assert!(!input.is_held(Command::MoveRight));
}

#[test]
fn reset_after_restart_forgets_holds() {
    let mut game = game_with_current(PieceKind::T);
    let mut input = InputHandler::new();
    input.press(Command::MoveRight);
    input.press(Command::SoftDrop);

    let restart = map_key(key(KeyCode::Char('R'))).and_then(|c| input.press(c));
    assert_eq!(restart, Some(Command::Restart));
    assert!(game.apply(Command::Restart));
    input.reset();

    assert!(!input.is_held(Command::MoveRight));
    assert!(!input.is_held(Command::SoftDrop));
    assert!(input.update(500).is_empty());
}
