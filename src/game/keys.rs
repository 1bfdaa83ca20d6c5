//! Keyboard input mapping.
//!
//! This module defines the [`GameKey`] enum, which abstracts game actions from
//! physical keys, and the mapping from winit key events to those actions.

use winit::keyboard;

/// In-game actions that can be triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// Flap the wings; also starts a round while idle (Space).
    Flap,
    /// Start over after a crash (Escape).
    Restart,
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it maps to an action.
///
/// # Returns
/// * `Some(GameKey)` for Space and Escape.
/// * `None` otherwise.
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            Space => GameKey::Flap,
            Escape => GameKey::Restart,
        }),
        keyboard::Key::Character(c) if c.as_str() == " " => Some(GameKey::Flap),
        _ => None,
    }
}
