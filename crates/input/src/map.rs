//! Key mapping from terminal events to game commands.
//!
//! The mapping is phase independent. The same key can mean different things
//! in different phases (space starts a run from the menu and does nothing
//! while running); the core's transition table sorts that out.

use crate::types::Command;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game commands.
pub fn handle_key_event(key: KeyEvent) -> Option<Command> {
    match key.code {
        // Steering
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(Command::MoveUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(Command::MoveDown),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(Command::MoveRight),

        // Run
        KeyCode::Char('b') | KeyCode::Char('B') => Some(Command::PlaceBomb),
        // Pause toggles: the same key resumes a paused run.
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Command::Pause),

        // Menu
        KeyCode::Char(' ') | KeyCode::Enter => Some(Command::StartGame),
        KeyCode::Char('d') | KeyCode::Char('D') => Some(Command::CycleDifficulty),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(Command::Restart),
        KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc => Some(Command::ReturnToMenu),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),

        _ => None,
    }
}

/// Check if key should exit immediately regardless of phase.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(Command::MoveUp)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(Command::MoveDown)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(Command::MoveLeft)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('L'))),
            Some(Command::MoveRight)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('k'))),
            Some(Command::MoveUp)
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('b'))),
            Some(Command::PlaceBomb)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(Command::Pause)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(Command::StartGame)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(Command::CycleDifficulty)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(Command::ReturnToMenu)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(Command::Quit)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
    }
}
