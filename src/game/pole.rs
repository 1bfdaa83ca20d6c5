//! Obstacles: a pair of totem columns with a gap between them.
//!
//! The column sprite is composited once into a [`PoleTemplate`] (the upper
//! copy flipped upside down, [`POLE_GAP`] pixels of air, then the lower copy).
//! Every spawned [`Pole`] shares that image and mask.

use crate::assets::{ImageHandle, Sprite};
use crate::game::config::{
    PLAYER_X, POLE_FLOOR_MARGIN, POLE_GAP, POLE_MIN_CENTER_Y, SCREEN_HEIGHT, SCREEN_WIDTH,
    SCROLL_SPEED,
};
use crate::game::geometry::Rect;
use crate::game::mask::Mask;
use image::{RgbaImage, imageops};
use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::Arc;

/// Sprite name of a single column.
pub const POLE_COLUMN: &str = "TOTEM_COLUMN";
/// Texture key of the composited pole.
pub const POLE_SPRITE_KEY: &str = "pole:composite";

/// Shared image and mask for every pole.
#[derive(Debug, Clone)]
pub struct PoleTemplate {
    sprite: ImageHandle,
    mask: Arc<Mask>,
}

impl PoleTemplate {
    /// Composites the flipped top column, the gap and the bottom column.
    pub fn new(column: &Sprite) -> Self {
        let column_pixels = column.pixels();
        let (width, column_height) = column_pixels.dimensions();

        let mut pixels = RgbaImage::new(width, column_height * 2 + POLE_GAP as u32);
        imageops::replace(&mut pixels, &imageops::flip_vertical(column_pixels), 0, 0);
        imageops::replace(
            &mut pixels,
            column_pixels,
            0,
            i64::from(column_height) + i64::from(POLE_GAP),
        );

        let mask = Arc::new(Mask::from_image(&pixels));
        Self {
            sprite: Arc::new(Sprite::new(POLE_SPRITE_KEY, pixels)),
            mask,
        }
    }
}

/// Range the vertical centre of a new pole is drawn from, given the floor height.
pub fn spawn_center_range(floor_height: i32) -> RangeInclusive<i32> {
    let max = SCREEN_HEIGHT - floor_height - POLE_FLOOR_MARGIN;
    POLE_MIN_CENTER_Y..=max.max(POLE_MIN_CENTER_Y)
}

/// A live obstacle.
#[derive(Debug, Clone)]
pub struct Pole {
    sprite: ImageHandle,
    mask: Arc<Mask>,
    rect: Rect,
    passed: bool,
}

impl Pole {
    /// Spawns a pole just past the right edge of the screen at a random height.
    pub fn spawn(template: &PoleTemplate, floor_height: i32, rng: &mut impl Rng) -> Self {
        let center_y = rng.gen_range(spawn_center_range(floor_height));
        Self::at(template, SCREEN_WIDTH, center_y)
    }

    /// Places a pole with its left edge at `x` and its vertical centre at `center_y`.
    pub fn at(template: &PoleTemplate, x: i32, center_y: i32) -> Self {
        let rect = Rect::from_mid_left(
            x,
            center_y,
            template.sprite.width(),
            template.sprite.height(),
        );
        Self {
            sprite: template.sprite.clone(),
            mask: template.mask.clone(),
            rect,
            passed: false,
        }
    }

    /// Scrolls one tick to the left.
    pub fn update(&mut self) {
        self.rect.x -= SCROLL_SPEED;
    }

    /// Whether the pole has fully left the screen and should be dropped.
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() <= 0
    }

    /// Reports the pass event: true on the first call after the pole has
    /// crossed the dragon's resting x, false on every other call.
    pub fn is_passed(&mut self) -> bool {
        if self.rect.x < PLAYER_X && !self.passed {
            self.passed = true;
            return true;
        }
        false
    }

    /// Vertical opening between the columns.
    #[cfg(test)]
    pub fn gap(&self) -> i32 {
        POLE_GAP
    }

    /// Screen rectangle of the lower column.
    #[cfg(test)]
    pub fn bottom_column(&self) -> Rect {
        let column_height = (self.rect.height - POLE_GAP) / 2;
        Rect::new(
            self.rect.x,
            self.rect.bottom() - column_height,
            self.rect.width,
            column_height,
        )
    }

    /// Screen rectangle of the whole pole, both columns and the gap.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Composite image.
    pub fn sprite(&self) -> &ImageHandle {
        &self.sprite
    }

    /// Composite mask.
    pub fn mask(&self) -> &Mask {
        &self.mask
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn template() -> PoleTemplate {
        // Column whose top row is red so the flip is observable.
        let mut column = RgbaImage::from_pixel(50, 300, Rgba([0, 0, 255, 255]));
        for x in 0..50 {
            column.put_pixel(x, 0, Rgba([255, 0, 0, 255]));
        }
        PoleTemplate::new(&Sprite::new(POLE_COLUMN, column))
    }

    #[test]
    fn composite_layout() {
        let template = template();
        let pixels = template.sprite.pixels();
        assert_eq!(pixels.dimensions(), (50, 710));

        // top column is upside down
        assert_eq!(pixels.get_pixel(0, 299), &Rgba([255, 0, 0, 255]));
        assert_eq!(pixels.get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        // gap is empty
        assert_eq!(pixels.get_pixel(10, 300)[3], 0);
        assert_eq!(pixels.get_pixel(10, 409)[3], 0);
        // bottom column upright
        assert_eq!(pixels.get_pixel(0, 410), &Rgba([255, 0, 0, 255]));

        assert_eq!(template.mask.count(), 50 * 600);
    }

    #[test]
    fn composite_key_cannot_shadow_an_asset() {
        let template = template();
        assert_eq!(template.sprite.key(), POLE_SPRITE_KEY);
        // Asset keys are file stems, cut at the first '.', and never contain ':'.
        assert!(template.sprite.key().contains(':'));
        assert_ne!(template.sprite.key(), "pole");
    }

    #[test]
    fn spawns_off_the_right_edge_within_range() {
        let template = template();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let pole = Pole::spawn(&template, 110, &mut rng);
            assert_eq!(pole.rect().x, SCREEN_WIDTH);
            assert!((200..=290).contains(&pole.rect().center_y()));
            assert_eq!(pole.gap(), 110);
        }
    }

    #[test]
    fn passes_exactly_once() {
        let mut pole = Pole::at(&template(), SCREEN_WIDTH, 250);
        let mut passes = 0;
        let mut first_pass_x = None;

        assert!(!pole.is_passed());
        while !pole.is_off_screen() {
            pole.update();
            if pole.is_passed() {
                passes += 1;
                first_pass_x.get_or_insert(pole.rect().x);
            }
        }

        assert_eq!(passes, 1);
        assert_eq!(first_pass_x, Some(49));
        assert!(!pole.is_passed());
    }

    #[test]
    fn bottom_column_sits_below_the_gap() {
        let pole = Pole::at(&template(), 500, 250);
        assert_eq!(pole.rect().y, -105);
        assert_eq!(pole.bottom_column(), Rect::new(500, 305, 50, 300));
    }

    #[test]
    fn center_range_never_inverts() {
        assert_eq!(spawn_center_range(110), 200..=290);
        assert_eq!(spawn_center_range(400), 200..=200);
    }
}
