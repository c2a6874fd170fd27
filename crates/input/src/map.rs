//! Key mapping from terminal events to engine commands.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map a key press to an engine command.
pub fn map_key(key: KeyEvent) -> Option<Command> {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(Command::Quit);
    }

    match key.code {
        // Movement
        KeyCode::Left
        | KeyCode::Char('h')
        | KeyCode::Char('H')
        | KeyCode::Char('a')
        | KeyCode::Char('A') => Some(Command::MoveLeft),
        KeyCode::Right
        | KeyCode::Char('l')
        | KeyCode::Char('L')
        | KeyCode::Char('d')
        | KeyCode::Char('D') => Some(Command::MoveRight),
        KeyCode::Down
        | KeyCode::Char('j')
        | KeyCode::Char('J')
        | KeyCode::Char('s')
        | KeyCode::Char('S') => Some(Command::SoftDrop),

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('x')
        | KeyCode::Char('X') => Some(Command::RotateCw),
        KeyCode::Char('z')
        | KeyCode::Char('Z')
        | KeyCode::Char('y')
        | KeyCode::Char('Y') => Some(Command::RotateCcw),

        // Actions
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::HardDrop),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),

        _ => None,
    }
}

/// Commands that auto-repeat while their key is held.
pub fn is_repeatable(command: Command) -> bool {
    matches!(command, Command::MoveLeft | Command::MoveRight | Command::SoftDrop)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn press(code: KeyCode) -> Option<Command> {
        map_key(KeyEvent::from(code))
    }

    #[test]
    fn test_movement_keys() {
        assert_eq!(press(KeyCode::Left), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Right), Some(Command::MoveRight));
        assert_eq!(press(KeyCode::Down), Some(Command::SoftDrop));

        assert_eq!(press(KeyCode::Char('H')), Some(Command::MoveLeft));
        assert_eq!(press(KeyCode::Char('d')), Some(Command::MoveRight));
        assert_eq!(press(KeyCode::Char('J')), Some(Command::SoftDrop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(press(KeyCode::Up), Some(Command::RotateCw));
        assert_eq!(press(KeyCode::Char('x')), Some(Command::RotateCw));
        assert_eq!(press(KeyCode::Char('W')), Some(Command::RotateCw));
        assert_eq!(press(KeyCode::Char('z')), Some(Command::RotateCcw));
        assert_eq!(press(KeyCode::Char('Y')), Some(Command::RotateCcw));
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(press(KeyCode::Char(' ')), Some(Command::HardDrop));
        assert_eq!(press(KeyCode::Enter), Some(Command::HardDrop));
        assert_eq!(press(KeyCode::Char('p')), Some(Command::TogglePause));
        assert_eq!(press(KeyCode::Char('R')), Some(Command::Restart));
        assert_eq!(press(KeyCode::Char('c')), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(press(KeyCode::Esc), Some(Command::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_repeatable_commands() {
        assert!(is_repeatable(Command::MoveLeft));
        assert!(is_repeatable(Command::SoftDrop));
        assert!(!is_repeatable(Command::HardDrop));
        assert!(!is_repeatable(Command::RotateCw));
    }
}
