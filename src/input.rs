use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::Difficulty;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step `(dx, dy)` in grid coordinates; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Start,
    Pause,
    Restart,
    SetDifficulty(Difficulty),
    CycleDifficulty,
    ToggleWrap,
    ToggleGrid,
    ToggleSound,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
///
/// A snake that has not moved yet may take any direction.
#[must_use]
pub fn direction_change_is_valid(current: Option<Direction>, next: Direction) -> bool {
    current.is_none_or(|current| next != current.opposite())
}

/// Polls crossterm for key presses and translates them into game inputs.
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Waits up to `timeout` for one event and translates it.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => Ok(translate_key(key)),
            _ => Ok(None),
        }
    }
}

/// Maps a single key event to a game input.
#[must_use]
pub fn translate_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => GameInput::Direction(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => GameInput::Direction(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => GameInput::Direction(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => GameInput::Direction(Direction::Right),
        KeyCode::Char(' ') => GameInput::Pause,
        KeyCode::Enter => GameInput::Start,
        KeyCode::Char('r' | 'R') => GameInput::Restart,
        KeyCode::Char('1') => GameInput::SetDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => GameInput::SetDifficulty(Difficulty::Medium),
        KeyCode::Char('3') => GameInput::SetDifficulty(Difficulty::Hard),
        KeyCode::Tab => GameInput::CycleDifficulty,
        KeyCode::Char('b' | 'B') => GameInput::ToggleWrap,
        KeyCode::Char('g' | 'G') => GameInput::ToggleGrid,
        KeyCode::Char('m' | 'M') => GameInput::ToggleSound,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        _ => return None,
    };

    Some(input)
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

    use super::{Direction, GameInput, direction_change_is_valid, translate_key};
    use crate::config::Difficulty;

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn deltas_are_unit_vectors_that_cancel_with_opposites() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
            assert_eq!((dx + ox, dy + oy), (0, 0));
        }
    }

    #[test]
    fn direction_change_rejects_reverse() {
        assert!(!direction_change_is_valid(
            Some(Direction::Up),
            Direction::Down
        ));
        assert!(!direction_change_is_valid(
            Some(Direction::Right),
            Direction::Left
        ));
        assert!(direction_change_is_valid(
            Some(Direction::Up),
            Direction::Left
        ));
        assert!(direction_change_is_valid(None, Direction::Left));
    }

    #[test]
    fn arrows_and_wasd_map_to_directions() {
        assert_eq!(
            translate_key(KeyEvent::from(KeyCode::Up)),
            Some(GameInput::Direction(Direction::Up))
        );
        assert_eq!(
            translate_key(KeyEvent::from(KeyCode::Char('d'))),
            Some(GameInput::Direction(Direction::Right))
        );
    }

    #[test]
    fn control_keys_map_to_lifecycle_inputs() {
        assert_eq!(
            translate_key(KeyEvent::from(KeyCode::Char(' '))),
            Some(GameInput::Pause)
        );
        assert_eq!(
            translate_key(KeyEvent::from(KeyCode::Char('3'))),
            Some(GameInput::SetDifficulty(Difficulty::Hard))
        );
        assert_eq!(
            translate_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(GameInput::Quit)
        );
        assert_eq!(translate_key(KeyEvent::from(KeyCode::Char('z'))), None);
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = KeyEvent::from(KeyCode::Left);
        key.kind = KeyEventKind::Release;
        assert_eq!(translate_key(key), None);
    }
}
