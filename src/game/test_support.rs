//! In-memory assets shaped like the shipped ones.

use crate::assets::AssetRegistry;
use crate::game::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::dragon::DRAGON_FRAMES;
use crate::game::pole::POLE_COLUMN;
use crate::game::prefabs::{BACKGROUND_IMAGE, GAME_OVER_IMAGE, GROUND_IMAGE, START_BANNER_IMAGE};
use crate::game::score::DIGIT_GLYPHS;
use image::{Rgba, RgbaImage};

fn solid(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_pixel(width, height, Rgba([90, 60, 30, 255]))
}

/// Screen-sized sky, a 110px floor, 40x30 dragon frames, 50x300 columns and
/// 20x30 digits.
pub(crate) fn fixture_assets() -> AssetRegistry {
    let mut images = vec![
        (BACKGROUND_IMAGE, solid(SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32)),
        (GROUND_IMAGE, solid(SCREEN_WIDTH as u32, 110)),
        (POLE_COLUMN, solid(50, 300)),
        (START_BANNER_IMAGE, solid(200, 100)),
        (GAME_OVER_IMAGE, solid(200, 100)),
    ];
    images.extend(DRAGON_FRAMES.iter().map(|name| (*name, solid(40, 30))));
    images.extend(DIGIT_GLYPHS.iter().map(|name| (*name, solid(20, 30))));
    AssetRegistry::from_images(images)
}
