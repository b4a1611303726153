//! Key mapping from terminal events to room actions.

use crate::cursor::GridCursor;
use crate::types::RoomAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to room actions.
///
/// Movement keys only steer `cursor` and return `None`.
pub fn handle_key_event(key: KeyEvent, cursor: &mut GridCursor) -> Option<RoomAction> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            cursor.step(0, -1);
            None
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            cursor.step(0, 1);
            None
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            cursor.step(-1, 0);
            None
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            cursor.step(1, 0);
            None
        }

        // Click
        KeyCode::Char(' ') | KeyCode::Enter => Some(RoomAction::Click(cursor.index())),

        // Round control
        KeyCode::Char('n') | KeyCode::Char('N') => Some(RoomAction::Start),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(RoomAction::Reset),
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Esc => Some(RoomAction::CloseResults),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(RoomAction::PlayAgain),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
