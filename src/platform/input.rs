//! Keyboard mapping
//!
//! Only the four arrow keys mean anything; every other key is ignored.

use crate::sim::Direction;

/// Legacy DOM key codes for the arrow keys
pub const KEY_LEFT: u32 = 37;
pub const KEY_UP: u32 = 38;
pub const KEY_RIGHT: u32 = 39;
pub const KEY_DOWN: u32 = 40;

/// Map a DOM `keyCode` to a move
pub fn direction_from_key_code(code: u32) -> Option<Direction> {
    match code {
        KEY_LEFT => Some(Direction::Left),
        KEY_UP => Some(Direction::Up),
        KEY_RIGHT => Some(Direction::Right),
        KEY_DOWN => Some(Direction::Down),
        _ => None,
    }
}

/// Map a DOM `KeyboardEvent.key` name to a move
pub fn direction_from_key(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" | "Left" => Some(Direction::Left),
        "ArrowUp" | "Up" => Some(Direction::Up),
        "ArrowRight" | "Right" => Some(Direction::Right),
        "ArrowDown" | "Down" => Some(Direction::Down),
        _ => None,
    }
}
