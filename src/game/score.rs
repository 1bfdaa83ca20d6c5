//! Score display built from digit glyph sprites.

use crate::assets::{ImageHandle, Sprite};
use crate::game::config::{SCORE_CENTER_Y, SCREEN_WIDTH};
use crate::game::geometry::Rect;
use image::{RgbaImage, imageops};
use std::sync::Arc;

/// Sprite names of the digit glyphs, indexed by digit.
pub const DIGIT_GLYPHS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

/// The ten digit glyphs, `glyphs[d]` drawing digit `d`.
pub type DigitGlyphs = Arc<[ImageHandle; 10]>;

/// The running score and its rendered image.
#[derive(Debug, Clone)]
pub struct Score {
    glyphs: DigitGlyphs,
    value: u32,
    sprite: ImageHandle,
    rect: Rect,
}

impl Score {
    /// A score of zero.
    pub fn new(glyphs: DigitGlyphs) -> Self {
        let (sprite, rect) = compose(&glyphs, 0);
        Self {
            glyphs,
            value: 0,
            sprite,
            rect,
        }
    }

    /// Current value.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Adds one point and redraws.
    pub fn increment(&mut self) {
        self.set(self.value + 1);
    }

    /// Sets the value, redrawing only when it changes.
    pub fn set(&mut self, value: u32) {
        if value == self.value {
            return;
        }
        self.value = value;
        (self.sprite, self.rect) = compose(&self.glyphs, value);
    }

    /// Screen rectangle, centred horizontally.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Rendered digits.
    pub fn sprite(&self) -> &ImageHandle {
        &self.sprite
    }
}

/// Lays the glyphs of `value` out left to right.
fn compose(glyphs: &[ImageHandle; 10], value: u32) -> (ImageHandle, Rect) {
    let digits: Vec<&ImageHandle> = value
        .to_string()
        .bytes()
        .map(|digit| &glyphs[usize::from(digit - b'0')])
        .collect();

    let width: u32 = digits.iter().map(|glyph| glyph.pixels().width()).sum();
    let height = digits
        .iter()
        .map(|glyph| glyph.pixels().height())
        .max()
        .unwrap_or(0);

    let mut pixels = RgbaImage::new(width, height);
    let mut x = 0i64;
    for glyph in &digits {
        imageops::replace(&mut pixels, glyph.pixels(), x, 0);
        x += i64::from(glyph.pixels().width());
    }

    let rect = Rect::from_center(SCREEN_WIDTH / 2, SCORE_CENTER_Y, width as i32, height as i32);
    (Arc::new(Sprite::new(format!("score:{value}"), pixels)), rect)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Glyph `d` is `d + 10` pixels wide and tinted with `d` in the red channel.
    fn glyphs() -> DigitGlyphs {
        Arc::new(std::array::from_fn(|digit| {
            Arc::new(Sprite::new(
                DIGIT_GLYPHS[digit],
                RgbaImage::from_pixel(digit as u32 + 10, 30, Rgba([digit as u8, 0, 0, 255])),
            ))
        }))
    }

    #[test]
    fn zero_is_a_single_glyph() {
        let score = Score::new(glyphs());
        assert_eq!(score.value(), 0);
        assert_eq!(score.sprite().width(), 10);
        assert_eq!(score.rect(), Rect::new(495, 35, 10, 30));
    }

    #[test]
    fn digits_are_concatenated_in_order() {
        let mut score = Score::new(glyphs());
        score.set(207);

        let pixels = score.sprite().pixels();
        // 2 -> 12px, 0 -> 10px, 7 -> 17px
        assert_eq!(pixels.width(), 39);
        assert_eq!(pixels.get_pixel(0, 0)[0], 2);
        assert_eq!(pixels.get_pixel(12, 0)[0], 0);
        assert_eq!(pixels.get_pixel(22, 0)[0], 7);
        assert_eq!(score.rect().x, SCREEN_WIDTH / 2 - 39 / 2);
        assert_eq!(score.sprite().key(), "score:207");
    }

    #[test]
    fn increment_redraws() {
        let mut score = Score::new(glyphs());
        for _ in 0..10 {
            score.increment();
        }
        assert_eq!(score.value(), 10);
        assert_eq!(score.sprite().width(), 11 + 10);
    }
}
