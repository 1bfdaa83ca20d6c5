//! Resolved assets for every entity kind.
//!
//! [`Prefabs`] looks up each sprite the game needs exactly once, so building
//! entities during play never touches the registry and cannot fail.

use crate::assets::{AssetError, AssetRegistry, ImageHandle};
use crate::game::dragon::{AnimationFrame, DRAGON_FRAMES, Dragon};
use crate::game::entity::{Banner, Entity, EntitySet};
use crate::game::mask::Mask;
use crate::game::pole::{POLE_COLUMN, Pole, PoleTemplate};
use crate::game::score::{DIGIT_GLYPHS, DigitGlyphs, Score};
use crate::game::scroller::{Scroller, TILE_COUNT};
use rand::Rng;
use std::sync::Arc;

/// Sky tile sprite.
pub const BACKGROUND_IMAGE: &str = "gamebackground";
/// Ground tile sprite.
pub const GROUND_IMAGE: &str = "ground";
/// Banner shown while idle.
pub const START_BANNER_IMAGE: &str = "message";
/// Banner shown after a crash.
pub const GAME_OVER_IMAGE: &str = "gameover";

/// Every image name the game looks up.
pub fn image_manifest() -> Vec<&'static str> {
    let mut names = vec![
        BACKGROUND_IMAGE,
        GROUND_IMAGE,
        START_BANNER_IMAGE,
        GAME_OVER_IMAGE,
        POLE_COLUMN,
    ];
    names.extend(DRAGON_FRAMES);
    names.extend(DIGIT_GLYPHS);
    names
}

/// Sprites, masks and composites shared by all entities.
#[derive(Debug, Clone)]
pub struct Prefabs {
    background: ImageHandle,
    ground: ImageHandle,
    ground_mask: Arc<Mask>,
    dragon_frames: Arc<[AnimationFrame]>,
    pole: PoleTemplate,
    start_banner: ImageHandle,
    game_over_banner: ImageHandle,
    digits: DigitGlyphs,
}

impl Prefabs {
    /// Resolves every sprite from `assets` and precomputes masks and composites.
    pub fn load(assets: &AssetRegistry) -> Result<Self, AssetError> {
        let ground = assets.get_image(GROUND_IMAGE)?.clone();
        let ground_mask = Arc::new(Mask::from_image(ground.pixels()));

        let dragon_frames = DRAGON_FRAMES
            .iter()
            .map(|name| -> Result<AnimationFrame, AssetError> {
                Ok(AnimationFrame::new(assets.get_image(name)?.clone()))
            })
            .collect::<Result<Arc<[_]>, _>>()?;

        let mut digits = Vec::with_capacity(DIGIT_GLYPHS.len());
        for name in DIGIT_GLYPHS {
            digits.push(assets.get_image(name)?.clone());
        }
        let digits: DigitGlyphs = Arc::new(std::array::from_fn(|digit| digits[digit].clone()));

        Ok(Self {
            background: assets.get_image(BACKGROUND_IMAGE)?.clone(),
            ground,
            ground_mask,
            dragon_frames,
            pole: PoleTemplate::new(assets.get_image(POLE_COLUMN)?),
            start_banner: assets.get_image(START_BANNER_IMAGE)?.clone(),
            game_over_banner: assets.get_image(GAME_OVER_IMAGE)?.clone(),
            digits,
        })
    }

    /// Height of the ground strip.
    pub fn floor_height(&self) -> i32 {
        self.ground.height()
    }

    /// Sky tile `index`.
    pub fn background(&self, index: i32) -> Scroller {
        Scroller::background(self.background.clone(), index)
    }

    /// Ground tile `index`.
    pub fn floor(&self, index: i32) -> Scroller {
        Scroller::floor(self.ground.clone(), self.ground_mask.clone(), index)
    }

    /// A fresh dragon at its entry point.
    pub fn dragon(&self) -> Dragon {
        Dragon::new(self.dragon_frames.clone())
    }

    /// A zero score.
    pub fn score(&self) -> Score {
        Score::new(self.digits.clone())
    }

    /// The idle message.
    pub fn start_banner(&self) -> Banner {
        Banner::centered(self.start_banner.clone())
    }

    /// The crash message.
    pub fn game_over_banner(&self) -> Banner {
        Banner::centered(self.game_over_banner.clone())
    }

    /// A pole entering from the right at a random height.
    pub fn pole(&self, rng: &mut impl Rng) -> Pole {
        Pole::spawn(&self.pole, self.floor_height(), rng)
    }

    /// A pole at a fixed place.
    pub fn pole_at(&self, x: i32, center_y: i32) -> Pole {
        Pole::at(&self.pole, x, center_y)
    }

    /// The entity set a new round starts with: sky, ground, dragon, score and
    /// the start banner.
    pub fn baseline(&self) -> EntitySet {
        let mut entities = EntitySet::new();
        for index in 0..TILE_COUNT {
            entities.insert(Entity::Background(self.background(index)));
        }
        for index in 0..TILE_COUNT {
            entities.insert(Entity::Floor(self.floor(index)));
        }
        entities.insert(Entity::Dragon(self.dragon()));
        entities.insert(Entity::StartBanner(self.start_banner()));
        entities.insert(Entity::Score(self.score()));
        entities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::test_support::fixture_assets;

    #[test]
    fn fixture_satisfies_manifest() {
        let assets = fixture_assets();
        assert!(assets.validate(&image_manifest(), &[]).is_ok());
    }

    #[test]
    fn missing_sprite_fails_to_load() {
        let assets = AssetRegistry::from_images([("ground", image::RgbaImage::new(1, 1))]);
        assert!(matches!(
            Prefabs::load(&assets),
            Err(AssetError::NotFound { .. })
        ));
    }
}
