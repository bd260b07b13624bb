use blockfall_engine::{Direction, InputEvent};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

/// Maps a terminal key event onto the engine's input events.
///
/// Arrow keys become directions. Presses, auto-repeats and releases map to
/// [`InputEvent::KeyDown`] (with `repeat` set for auto-repeats) and
/// [`InputEvent::KeyUp`]. Other keys return `None`.
///
/// Terminals only report repeats and releases when keyboard enhancement is
/// enabled, which [`Runtime::run`](crate::Runtime::run) requests.
#[must_use]
pub fn key_input(event: &KeyEvent) -> Option<InputEvent> {
    let key = match event.code {
        KeyCode::Down => Direction::Down,
        KeyCode::Up => Direction::Up,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        _ => return None,
    };
    let input = match event.kind {
        KeyEventKind::Press => InputEvent::press(key),
        KeyEventKind::Repeat => InputEvent::repeat(key),
        KeyEventKind::Release => InputEvent::release(key),
    };
    Some(input)
}
