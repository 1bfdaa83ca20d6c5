//! The closed set of things that live on screen.
//!
//! Every [`Entity`] has a rectangle, a current sprite and a draw [`Layer`].
//! [`EntitySet`] keeps them ordered by layer, then by insertion, which is
//! exactly the order they are drawn in.

use crate::assets::ImageHandle;
use crate::game::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::dragon::Dragon;
use crate::game::geometry::Rect;
use crate::game::mask::Mask;
use crate::game::pole::Pole;
use crate::game::score::Score;
use crate::game::scroller::Scroller;

/// Draw order, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Layer {
    /// Sky.
    Background,
    /// Poles.
    Obstacle,
    /// Ground, drawn over the foot of the poles.
    Floor,
    /// The player.
    Dragon,
    /// Score and banners.
    Ui,
}

/// A static, screen-centred image.
#[derive(Debug, Clone)]
pub struct Banner {
    sprite: ImageHandle,
    rect: Rect,
}

impl Banner {
    /// Centres `sprite` on the screen.
    pub fn centered(sprite: ImageHandle) -> Self {
        let rect = Rect::from_center(
            SCREEN_WIDTH / 2,
            SCREEN_HEIGHT / 2,
            sprite.width(),
            sprite.height(),
        );
        Self { sprite, rect }
    }
}

/// Everything that can be on screen.
#[derive(Debug, Clone)]
pub enum Entity {
    /// Scrolling sky tile.
    Background(Scroller),
    /// Scrolling ground tile.
    Floor(Scroller),
    /// The player.
    Dragon(Dragon),
    /// An obstacle.
    Pole(Pole),
    /// Score display.
    Score(Score),
    /// "Press space" message shown while idle.
    StartBanner(Banner),
    /// Message shown after a crash.
    GameOverBanner(Banner),
}

impl Entity {
    /// Layer this entity is drawn on.
    pub fn layer(&self) -> Layer {
        match self {
            Entity::Background(_) => Layer::Background,
            Entity::Pole(_) => Layer::Obstacle,
            Entity::Floor(_) => Layer::Floor,
            Entity::Dragon(_) => Layer::Dragon,
            Entity::Score(_) | Entity::StartBanner(_) | Entity::GameOverBanner(_) => Layer::Ui,
        }
    }

    /// Screen rectangle.
    pub fn rect(&self) -> Rect {
        match self {
            Entity::Background(tile) | Entity::Floor(tile) => tile.rect(),
            Entity::Dragon(dragon) => dragon.rect(),
            Entity::Pole(pole) => pole.rect(),
            Entity::Score(score) => score.rect(),
            Entity::StartBanner(banner) | Entity::GameOverBanner(banner) => banner.rect,
        }
    }

    /// Current sprite.
    pub fn sprite(&self) -> &ImageHandle {
        match self {
            Entity::Background(tile) | Entity::Floor(tile) => tile.sprite(),
            Entity::Dragon(dragon) => dragon.sprite(),
            Entity::Pole(pole) => pole.sprite(),
            Entity::Score(score) => score.sprite(),
            Entity::StartBanner(banner) | Entity::GameOverBanner(banner) => &banner.sprite,
        }
    }

    /// Things the dragon can crash into.
    pub fn is_collidable(&self) -> bool {
        matches!(self, Entity::Floor(_) | Entity::Pole(_))
    }

    /// Things the dragon scores by flying past.
    pub fn is_obstacle(&self) -> bool {
        matches!(self, Entity::Pole(_))
    }

    /// Reports an obstacle's pass event; see [`Pole::is_passed`]. Always
    /// false for everything else.
    pub fn is_passed(&mut self) -> bool {
        match self {
            Entity::Pole(pole) => pole.is_passed(),
            _ => false,
        }
    }

    /// Collision mask of collidable entities.
    pub fn mask(&self) -> Option<&Mask> {
        match self {
            Entity::Floor(tile) => tile.mask(),
            Entity::Pole(pole) => Some(pole.mask()),
            _ => None,
        }
    }

    /// Advances one simulation tick.
    pub fn update(&mut self) {
        match self {
            Entity::Background(tile) | Entity::Floor(tile) => tile.update(),
            Entity::Dragon(dragon) => dragon.update(),
            Entity::Pole(pole) => pole.update(),
            Entity::Score(_) | Entity::StartBanner(_) | Entity::GameOverBanner(_) => {}
        }
    }

    /// Whether the entity should be removed from the live set.
    pub fn is_expired(&self) -> bool {
        match self {
            Entity::Pole(pole) => pole.is_off_screen(),
            _ => false,
        }
    }
}

/// Live entities, kept in draw order.
#[derive(Debug, Clone, Default)]
pub struct EntitySet {
    entities: Vec<Entity>,
}

impl EntitySet {
    /// An empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entity` after every entity on its layer or below.
    pub fn insert(&mut self, entity: Entity) {
        let layer = entity.layer();
        let index = self
            .entities
            .partition_point(|existing| existing.layer() <= layer);
        self.entities.insert(index, entity);
    }

    /// Entities in draw order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Entities in draw order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Entities as a slice, in draw order.
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of live entities.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Keeps only entities matching `keep`.
    pub fn retain(&mut self, keep: impl FnMut(&Entity) -> bool) {
        self.entities.retain(keep);
    }

    /// Updates every entity one tick, then drops the expired ones.
    pub fn update(&mut self) {
        for entity in &mut self.entities {
            entity.update();
        }
        self.entities.retain(|entity| !entity.is_expired());
    }

    /// The player, if present.
    pub fn dragon(&self) -> Option<&Dragon> {
        self.entities.iter().find_map(|entity| match entity {
            Entity::Dragon(dragon) => Some(dragon),
            _ => None,
        })
    }

    /// The player, mutably.
    pub fn dragon_mut(&mut self) -> Option<&mut Dragon> {
        self.entities.iter_mut().find_map(|entity| match entity {
            Entity::Dragon(dragon) => Some(dragon),
            _ => None,
        })
    }

    /// The score display, if present.
    pub fn score(&self) -> Option<&Score> {
        self.entities.iter().find_map(|entity| match entity {
            Entity::Score(score) => Some(score),
            _ => None,
        })
    }

    /// The score display, mutably.
    pub fn score_mut(&mut self) -> Option<&mut Score> {
        self.entities.iter_mut().find_map(|entity| match entity {
            Entity::Score(score) => Some(score),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Sprite;
    use crate::game::pole::{POLE_COLUMN, PoleTemplate};
    use image::RgbaImage;
    use std::sync::Arc;

    fn banner(name: &str) -> Banner {
        Banner::centered(Arc::new(Sprite::new(name, RgbaImage::new(200, 100))))
    }

    fn background(name: &str) -> Entity {
        Entity::Background(Scroller::background(
            Arc::new(Sprite::new(name, RgbaImage::new(10, 10))),
            0,
        ))
    }

    #[test]
    fn insert_keeps_layer_then_insertion_order() {
        let mut set = EntitySet::new();
        set.insert(Entity::StartBanner(banner("message")));
        set.insert(background("sky-a"));
        set.insert(Entity::GameOverBanner(banner("gameover")));
        set.insert(background("sky-b"));

        let keys: Vec<&str> = set.iter().map(|entity| entity.sprite().key()).collect();
        assert_eq!(keys, ["sky-a", "sky-b", "message", "gameover"]);
    }

    #[test]
    fn banners_are_centered() {
        let banner = banner("message");
        assert_eq!(banner.rect, Rect::new(400, 200, 200, 100));
    }

    #[test]
    fn only_floors_and_poles_collide() {
        let sky = background("sky");
        assert!(!sky.is_collidable());
        assert!(sky.mask().is_none());
        assert!(!Entity::StartBanner(banner("message")).is_collidable());
    }

    #[test]
    fn only_obstacles_report_passes() {
        let column = RgbaImage::from_pixel(50, 300, image::Rgba([0, 0, 0, 255]));
        let template = PoleTemplate::new(&Sprite::new(POLE_COLUMN, column));
        let mut pole = Entity::Pole(Pole::at(&template, 40, 250));
        assert!(pole.is_obstacle());
        assert!(pole.is_passed());
        assert!(!pole.is_passed());

        let mut sky = background("sky");
        assert!(!sky.is_obstacle());
        assert!(!sky.is_passed());
    }
}
