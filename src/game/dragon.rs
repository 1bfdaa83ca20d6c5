//! The player-controlled dragon.
//!
//! The dragon falls under [`GRAVITY`] and flaps upward on demand. It enters
//! from the left edge and eases to [`PLAYER_X`], where it stays. Its wings
//! cycle through a fixed set of animation frames, one step per tick.

use crate::assets::ImageHandle;
use crate::game::config::{FLAP_IMPULSE, GRAVITY, PLAYER_EASE_SPEED, PLAYER_START, PLAYER_X};
use crate::game::geometry::Rect;
use crate::game::mask::Mask;
use std::sync::Arc;

/// Sprite names of the wing cycle, in playback order.
pub const DRAGON_FRAMES: [&str; 5] = ["DM", "DT", "DD", "DMD", "DMT"];

/// One animation frame and its precomputed collision mask.
#[derive(Debug)]
pub struct AnimationFrame {
    sprite: ImageHandle,
    mask: Mask,
}

impl AnimationFrame {
    /// Pairs `sprite` with a mask derived from its pixels.
    pub fn new(sprite: ImageHandle) -> Self {
        let mask = Mask::from_image(sprite.pixels());
        Self { sprite, mask }
    }
}

/// The player.
#[derive(Debug, Clone)]
pub struct Dragon {
    frames: Arc<[AnimationFrame]>,
    cursor: usize,
    rect: Rect,
    y: f32,
    velocity: f32,
}

impl Dragon {
    /// Places a dragon at its entry point, showing the first frame.
    ///
    /// # Panics
    /// If `frames` is empty.
    pub fn new(frames: Arc<[AnimationFrame]>) -> Self {
        assert!(!frames.is_empty(), "a dragon needs at least one frame");
        let (x, y) = PLAYER_START;
        let rect = Rect::new(x, y, frames[0].sprite.width(), frames[0].sprite.height());
        Self {
            frames,
            cursor: 0,
            rect,
            y: y as f32,
            velocity: 0.0,
        }
    }

    /// Advances the animation and integrates one tick of motion.
    pub fn update(&mut self) {
        // The last frame becomes the current one, so playback runs backwards
        // through the list.
        self.cursor = (self.cursor + self.frames.len() - 1) % self.frames.len();

        self.velocity += GRAVITY;
        self.y += self.velocity;
        self.rect.y = self.y.floor() as i32;

        if self.rect.x < PLAYER_X {
            self.rect.x += PLAYER_EASE_SPEED;
        }
    }

    /// Replaces whatever velocity has built up with the upward flap impulse.
    pub fn flap(&mut self) {
        self.velocity = FLAP_IMPULSE;
    }

    /// Vertical velocity in pixels per tick.
    #[cfg(test)]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Screen rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current animation frame.
    pub fn sprite(&self) -> &ImageHandle {
        &self.frames[self.cursor].sprite
    }

    /// Mask of the current animation frame.
    pub fn mask(&self) -> &Mask {
        &self.frames[self.cursor].mask
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x: i32, y: i32) {
        self.rect.x = x;
        self.rect.y = y;
        self.y = y as f32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;
    use image::{Rgba, RgbaImage};

    fn frames() -> Arc<[AnimationFrame]> {
        DRAGON_FRAMES
            .iter()
            .map(|name| {
                AnimationFrame::new(Arc::new(Sprite::new(
                    *name,
                    RgbaImage::from_pixel(40, 30, Rgba([0, 128, 0, 255])),
                )))
            })
            .collect()
    }

    #[test]
    fn gravity_accumulates_each_tick() {
        let mut dragon = Dragon::new(frames());
        for _ in 0..20 {
            let before = dragon.velocity();
            dragon.update();
            assert!((dragon.velocity() - before - GRAVITY).abs() < 1e-5);
        }
    }

    #[test]
    fn flap_overrides_accumulated_velocity() {
        let mut dragon = Dragon::new(frames());
        for _ in 0..30 {
            dragon.update();
        }
        assert!(dragon.velocity() > 10.0);

        dragon.flap();
        assert_eq!(dragon.velocity(), FLAP_IMPULSE);
        dragon.flap();
        assert_eq!(dragon.velocity(), FLAP_IMPULSE);
    }

    #[test]
    fn eases_in_to_resting_x() {
        let mut dragon = Dragon::new(frames());
        assert_eq!(dragon.rect().x, PLAYER_START.0);
        for _ in 0..100 {
            dragon.flap();
            dragon.update();
        }
        assert_eq!(dragon.rect().x, 52);
    }

    #[test]
    fn frames_rotate_last_to_front() {
        let mut dragon = Dragon::new(frames());
        assert_eq!(dragon.sprite().key(), "DM");

        let mut seen = Vec::new();
        for _ in 0..DRAGON_FRAMES.len() {
            dragon.update();
            seen.push(dragon.sprite().key().to_string());
        }
        assert_eq!(seen, ["DMT", "DMD", "DD", "DT", "DM"]);
    }

    #[test]
    fn position_follows_velocity() {
        let mut dragon = Dragon::new(frames());
        dragon.flap();
        dragon.update();
        // -6 + 0.4 = -5.6 from y = 50
        assert_eq!(dragon.rect().y, 44);
    }
}
