//! Fixed gameplay constants.
//!
//! None of these are runtime configurable; the game is tuned around a 1000x500
//! playfield stepped at 60 ticks per second.

use std::time::Duration;

/// Playfield width in pixels.
pub const SCREEN_WIDTH: i32 = 1000;
/// Playfield height in pixels.
pub const SCREEN_HEIGHT: i32 = 500;
/// Target simulation and presentation rate.
pub const FPS: u32 = 60;
/// Length of one simulation tick.
pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / FPS as u64);

/// Added to the dragon's vertical velocity every tick.
pub const GRAVITY: f32 = 0.4;
/// Velocity the dragon is set to when it flaps (negative is up).
pub const FLAP_IMPULSE: f32 = -6.0;
/// Horizontal scroll of backgrounds, floors and poles, in pixels per tick.
pub const SCROLL_SPEED: i32 = 3;

/// Where the dragon enters from.
pub const PLAYER_START: (i32, i32) = (-50, 50);
/// Resting x position of the dragon. Also the line a pole must cross to score.
pub const PLAYER_X: i32 = 50;
/// Pixels per tick the dragon moves right until it reaches [`PLAYER_X`].
pub const PLAYER_EASE_SPEED: i32 = 3;

/// Vertical opening between the top and bottom column of a pole.
pub const POLE_GAP: i32 = 110;
/// Smallest y of a pole's vertical centre.
pub const POLE_MIN_CENTER_Y: i32 = 200;
/// Distance kept between the lowest pole centre and the top of the floor.
pub const POLE_FLOOR_MARGIN: i32 = 100;
/// Time between pole spawns while playing.
pub const SPAWN_PERIOD: Duration = Duration::from_millis(1500);

/// Vertical centre of the score display.
pub const SCORE_CENTER_Y: i32 = 50;
