//! Endlessly scrolling tiles: the sky background and the floor.
//!
//! Each scroller kind is made of [`TILE_COUNT`] tiles laid side by side. Every
//! tick a tile moves left by [`SCROLL_SPEED`]; once it has fully left the
//! screen it jumps behind the last tile, so the row never shows a seam.

use crate::assets::ImageHandle;
use crate::game::config::{SCREEN_HEIGHT, SCROLL_SPEED};
use crate::game::geometry::Rect;
use crate::game::mask::Mask;
use std::sync::Arc;

/// Tiles per scroller row.
pub const TILE_COUNT: i32 = 2;

/// One tile of a scrolling row.
#[derive(Debug, Clone)]
pub struct Scroller {
    sprite: ImageHandle,
    mask: Option<Arc<Mask>>,
    rect: Rect,
}

impl Scroller {
    /// Background tile `index`, top-aligned.
    pub fn background(sprite: ImageHandle, index: i32) -> Self {
        let rect = Rect::new(sprite.width() * index, 0, sprite.width(), sprite.height());
        Self {
            sprite,
            mask: None,
            rect,
        }
    }

    /// Floor tile `index`, resting on the bottom of the screen.
    pub fn floor(sprite: ImageHandle, mask: Arc<Mask>, index: i32) -> Self {
        let rect = Rect::from_bottom_left(
            sprite.width() * index,
            SCREEN_HEIGHT,
            sprite.width(),
            sprite.height(),
        );
        Self {
            sprite,
            mask: Some(mask),
            rect,
        }
    }

    /// Scrolls one tick, wrapping behind the partner tile once off-screen.
    pub fn update(&mut self) {
        self.rect.x -= SCROLL_SPEED;
        if self.rect.right() <= 0 {
            self.rect.x += self.rect.width * TILE_COUNT;
        }
    }

    /// Screen rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current frame.
    pub fn sprite(&self) -> &ImageHandle {
        &self.sprite
    }

    /// Collision mask, present on floor tiles only.
    pub fn mask(&self) -> Option<&Mask> {
        self.mask.as_deref()
    }
}
