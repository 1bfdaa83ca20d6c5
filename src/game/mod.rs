//! Game state management module.
//!
//! This module defines the [`GameState`] struct, which owns everything that
//! changes from tick to tick: the live entities, the pole spawn timer, the
//! current [`Phase`] and the sound effects queued for the audio system.
//!
//! A tick is split in two so the application can draw in between, matching
//! the order the player sees things:
//!
//! 1. [`GameState::process_events`] applies queued key presses and the spawn
//!    timer.
//! 2. The caller draws [`GameState::entities`].
//! 3. [`GameState::advance`] moves everything, checks for a crash and counts
//!    cleared poles.

pub mod audio;
pub mod collision;
pub mod config;
pub mod dragon;
pub mod entity;
pub mod geometry;
pub mod keys;
pub mod mask;
pub mod pole;
pub mod prefabs;
pub mod score;
pub mod scroller;
pub mod timer;

#[cfg(test)]
pub(crate) mod test_support;

use self::audio::SoundEffect;
use self::collision::check_collision;
use self::config::{SPAWN_PERIOD, TICK};
use self::entity::{Entity, EntitySet};
use self::keys::GameKey;
use self::prefabs::Prefabs;
use self::timer::SpawnTimer;
use crate::assets::{AssetError, AssetRegistry};
use rand::rngs::StdRng;

/// High-level state of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Start banner shown, nothing moves.
    Idle,
    /// Physics and pole spawning active.
    Playing,
    /// Everything frozen under the game over banner.
    GameOver,
}

/// Represents the entire mutable state of the game.
pub struct GameState {
    prefabs: Prefabs,
    entities: EntitySet,
    phase: Phase,
    spawn_timer: SpawnTimer,
    rng: StdRng,
    sounds: Vec<SoundEffect>,
}

impl GameState {
    /// Creates an idle game with the baseline entity set.
    ///
    /// # Errors
    /// Fails if `assets` is missing a sprite the game needs.
    pub fn new(assets: &AssetRegistry, rng: StdRng) -> Result<Self, AssetError> {
        let prefabs = Prefabs::load(assets)?;
        let entities = prefabs.baseline();
        Ok(Self {
            prefabs,
            entities,
            phase: Phase::Idle,
            spawn_timer: SpawnTimer::new(SPAWN_PERIOD, TICK),
            rng,
            sounds: Vec::new(),
        })
    }

    /// Runs a whole tick with no drawing in between.
    #[cfg(test)]
    pub fn tick(&mut self, keys: impl IntoIterator<Item = GameKey>) {
        self.process_events(keys);
        self.advance();
    }

    /// Applies the spawn timer and the key presses received since the last tick.
    pub fn process_events(&mut self, keys: impl IntoIterator<Item = GameKey>) {
        if self.spawn_timer.tick() {
            let pole = self.prefabs.pole(&mut self.rng);
            log::debug!("spawned pole centred at y={}", pole.rect().center_y());
            self.entities.insert(Entity::Pole(pole));
        }

        for key in keys {
            self.handle_key(key);
        }
    }

    /// Steps the simulation once the current frame has been drawn.
    pub fn advance(&mut self) {
        if self.phase == Phase::Playing {
            self.entities.update();
        }

        if self.phase != Phase::GameOver && self.crashed() {
            self.game_over();
        }

        if self.phase == Phase::Playing {
            let mut passed = 0;
            for entity in self.entities.iter_mut() {
                if entity.is_obstacle() && entity.is_passed() {
                    passed += 1;
                }
            }
            for _ in 0..passed {
                if let Some(score) = self.entities.score_mut() {
                    score.increment();
                    log::debug!("score: {}", score.value());
                }
                self.sounds.push(SoundEffect::Point);
            }
        }
    }

    fn handle_key(&mut self, key: GameKey) {
        match key {
            GameKey::Flap => {
                if self.phase == Phase::GameOver {
                    return;
                }
                if self.phase == Phase::Idle {
                    self.start();
                }
                if let Some(dragon) = self.entities.dragon_mut() {
                    dragon.flap();
                    self.sounds.push(SoundEffect::Flap);
                }
            }
            GameKey::Restart => {
                if self.phase == Phase::GameOver {
                    self.restart();
                }
            }
        }
    }

    fn crashed(&self) -> bool {
        self.entities
            .dragon()
            .is_some_and(|dragon| check_collision(dragon, self.entities.as_slice()))
    }

    fn start(&mut self) {
        self.entities
            .retain(|entity| !matches!(entity, Entity::StartBanner(_)));
        self.spawn_timer.start();
        self.phase = Phase::Playing;
        log::info!("round started");
    }

    fn game_over(&mut self) {
        self.entities
            .insert(Entity::GameOverBanner(self.prefabs.game_over_banner()));
        self.spawn_timer.stop();
        self.sounds.push(SoundEffect::Hit);
        self.phase = Phase::GameOver;
        log::info!("game over with score {}", self.score());
    }

    fn restart(&mut self) {
        self.entities = self.prefabs.baseline();
        self.spawn_timer.stop();
        self.phase = Phase::Idle;
        log::info!("restarted");
    }

    /// Current phase.
    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current score.
    pub fn score(&self) -> u32 {
        self.entities.score().map_or(0, |score| score.value())
    }

    /// Live entities in draw order.
    pub fn entities(&self) -> &EntitySet {
        &self.entities
    }

    /// The pole spawn timer.
    #[cfg(test)]
    pub fn spawn_timer(&self) -> &SpawnTimer {
        &self.spawn_timer
    }

    /// Takes the sound effects queued since the last call.
    pub fn drain_sounds(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }

    #[cfg(test)]
    pub(crate) fn insert_pole_at(&mut self, x: i32, center_y: i32) {
        let pole = self.prefabs.pole_at(x, center_y);
        self.entities.insert(Entity::Pole(pole));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{FLAP_IMPULSE, GRAVITY, POLE_GAP};
    use crate::game::test_support::fixture_assets;
    use rand::SeedableRng;

    const NO_KEYS: [GameKey; 0] = [];

    fn new_game() -> GameState {
        GameState::new(&fixture_assets(), StdRng::seed_from_u64(42)).unwrap()
    }

    fn count(game: &GameState, kind: fn(&Entity) -> bool) -> usize {
        game.entities().iter().filter(|entity| kind(entity)).count()
    }

    fn poles(game: &GameState) -> Vec<&pole::Pole> {
        game.entities()
            .iter()
            .filter_map(|entity| match entity {
                Entity::Pole(pole) => Some(pole),
                _ => None,
            })
            .collect()
    }

    fn velocity(game: &GameState) -> f32 {
        game.entities().dragon().unwrap().velocity()
    }

    /// Lets the dragon fall until it hits the floor.
    fn crash(game: &mut GameState) {
        for _ in 0..200 {
            if game.phase() == Phase::GameOver {
                return;
            }
            game.tick(NO_KEYS);
        }
        panic!("dragon never crashed");
    }

    #[test]
    fn baseline_entities() {
        let game = new_game();
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.entities().len(), 7);
        assert_eq!(count(&game, |e| matches!(e, Entity::Background(_))), 2);
        assert_eq!(count(&game, |e| matches!(e, Entity::Floor(_))), 2);
        assert_eq!(count(&game, |e| matches!(e, Entity::Dragon(_))), 1);
        assert_eq!(count(&game, |e| matches!(e, Entity::Score(_))), 1);
        assert_eq!(count(&game, |e| matches!(e, Entity::StartBanner(_))), 1);
        assert!(!game.spawn_timer().is_running());
    }

    #[test]
    fn entities_are_in_layer_order() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);
        game.insert_pole_at(600, 250);

        let layers: Vec<_> = game.entities().iter().map(Entity::layer).collect();
        let mut sorted = layers.clone();
        sorted.sort();
        assert_eq!(layers, sorted);
    }

    #[test]
    fn idle_world_is_frozen() {
        let mut game = new_game();
        let before: Vec<_> = game.entities().iter().map(Entity::rect).collect();
        for _ in 0..30 {
            game.tick(NO_KEYS);
        }
        let after: Vec<_> = game.entities().iter().map(Entity::rect).collect();
        assert_eq!(before, after);
        assert!(poles(&game).is_empty());
    }

    #[test]
    fn first_pole_after_spawn_period() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);

        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(count(&game, |e| matches!(e, Entity::StartBanner(_))), 0);
        assert!(game.spawn_timer().is_running());
        assert_eq!(game.drain_sounds(), [SoundEffect::Flap]);

        // Flapping every 29 ticks keeps the dragon level.
        for tick in 1..game.spawn_timer().period_ticks() {
            let keys = if tick % 29 == 0 { vec![GameKey::Flap] } else { vec![] };
            game.tick(keys);
            assert!(poles(&game).is_empty(), "pole appeared early at tick {tick}");
        }
        game.tick(NO_KEYS);

        assert_eq!(game.phase(), Phase::Playing);
        let poles = poles(&game);
        assert_eq!(poles.len(), 1);
        assert_eq!(poles[0].gap(), POLE_GAP);
        assert!((200..=290).contains(&poles[0].rect().center_y()));
    }

    #[test]
    fn velocity_follows_gravity_and_flaps() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);
        assert!((velocity(&game) - (FLAP_IMPULSE + GRAVITY)).abs() < 1e-5);

        for tick in 0..30 {
            let before = velocity(&game);
            if tick == 20 {
                game.process_events([GameKey::Flap]);
                assert_eq!(velocity(&game), FLAP_IMPULSE);
                game.advance();
                assert!((velocity(&game) - (FLAP_IMPULSE + GRAVITY)).abs() < 1e-5);
            } else {
                game.tick(NO_KEYS);
                assert!((velocity(&game) - before - GRAVITY).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn repeated_flaps_do_not_restart_spawn_timer() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);
        for _ in 0..10 {
            game.tick(NO_KEYS);
        }
        assert_eq!(game.spawn_timer().elapsed_ticks(), 10);

        game.tick([GameKey::Flap]);
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.spawn_timer().elapsed_ticks(), 11);
    }

    #[test]
    fn passing_a_pole_scores_once() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);
        game.drain_sounds();
        game.insert_pole_at(52, 250);

        game.tick(NO_KEYS);
        assert_eq!(game.score(), 1);
        assert_eq!(game.drain_sounds(), [SoundEffect::Point]);

        for _ in 0..5 {
            game.tick(NO_KEYS);
        }
        assert_eq!(game.score(), 1);
        assert!(game.drain_sounds().is_empty());
    }

    #[test]
    fn no_score_while_idle() {
        let mut game = new_game();
        game.insert_pole_at(40, 250);
        for _ in 0..5 {
            game.tick(NO_KEYS);
        }
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn crash_ends_the_round() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);
        game.drain_sounds();
        crash(&mut game);

        assert_eq!(game.phase(), Phase::GameOver);
        assert!(!game.spawn_timer().is_running());
        assert_eq!(game.drain_sounds(), [SoundEffect::Hit]);
        assert_eq!(count(&game, |e| matches!(e, Entity::GameOverBanner(_))), 1);

        // frozen
        let before: Vec<_> = game.entities().iter().map(Entity::rect).collect();
        game.tick(NO_KEYS);
        let after: Vec<_> = game.entities().iter().map(Entity::rect).collect();
        assert_eq!(before, after);
        assert!(game.drain_sounds().is_empty());
    }

    #[test]
    fn no_score_after_game_over() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);
        crash(&mut game);
        let score = game.score();
        game.drain_sounds();

        game.insert_pole_at(40, 250);
        for _ in 0..5 {
            game.tick(NO_KEYS);
        }

        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.score(), score);
        assert!(!game.drain_sounds().contains(&SoundEffect::Point));
    }

    #[test]
    fn flap_is_ignored_after_game_over() {
        let mut game = new_game();
        game.tick([GameKey::Flap]);
        crash(&mut game);
        game.drain_sounds();

        let before = velocity(&game);
        game.tick([GameKey::Flap]);
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(velocity(&game), before);
        assert!(game.drain_sounds().is_empty());
    }

    #[test]
    fn restart_only_works_after_game_over() {
        let mut game = new_game();
        game.tick([GameKey::Restart]);
        assert_eq!(game.phase(), Phase::Idle);

        game.tick([GameKey::Flap]);
        game.tick([GameKey::Restart]);
        assert_eq!(game.phase(), Phase::Playing);

        game.insert_pole_at(52, 250);
        game.tick(NO_KEYS);
        assert_eq!(game.score(), 1);
        crash(&mut game);

        game.tick([GameKey::Restart]);
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.entities().len(), 7);
        assert_eq!(count(&game, |e| matches!(e, Entity::StartBanner(_))), 1);
        assert!(poles(&game).is_empty());
        assert!(!game.spawn_timer().is_running());

        game.tick([GameKey::Flap]);
        assert_eq!(game.phase(), Phase::Playing);
    }
}
