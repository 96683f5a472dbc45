use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the game to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Turn the snake
    Steer(Direction),
    /// Begin a fresh round
    Start,
    /// Freeze the running round
    Pause,
    /// Continue a paused round
    Resume,
    /// Leave the game
    Quit,
    /// Key means nothing to us
    None,
}

/// Reversal filter for steering requests
///
/// Returns `requested` unless it points straight back against `current`,
/// in which case the current direction stands. Between two ticks the last
/// accepted request wins.
pub fn apply_steer(current: Direction, requested: Direction) -> Direction {
    if current.is_opposite(requested) {
        current
    } else {
        requested
    }
}

/// Maps raw key events onto [`KeyAction`]s
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Steering - arrow keys
            KeyCode::Up => KeyAction::Steer(Direction::Up),
            KeyCode::Down => KeyAction::Steer(Direction::Down),
            KeyCode::Left => KeyAction::Steer(Direction::Left),
            KeyCode::Right => KeyAction::Steer(Direction::Right),

            // Steering - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Steer(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Steer(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Steer(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Steer(Direction::Right),

            // Round controls
            KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Start,
            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::Pause,
            KeyCode::Char(' ') => KeyAction::Resume,

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
