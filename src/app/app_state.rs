//! AppState module for Dragon Escape.
//!
//! This module defines the [`AppState`] struct, which holds all state required once the
//! window is open: the renderer, the game, the audio device and the input queue.

use crate::app::{AppError, FrameClock};
use crate::assets::AssetRegistry;
use crate::game::GameState;
use crate::game::audio::GameAudioManager;
use crate::game::config::TICK;
use crate::game::keys::GameKey;
use crate::renderer::wgpu_lib::WgpuRenderer;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

/// Holds all state required for a running Dragon Escape session.
pub struct AppState {
    /// The WGPU renderer.
    pub wgpu_renderer: WgpuRenderer,
    /// The simulation.
    pub game_state: GameState,
    /// Sound output, `None` when no audio device could be opened.
    pub audio: Option<GameAudioManager>,
    /// Keys pressed since the last tick, in arrival order.
    pub pending_keys: Vec<GameKey>,
    /// Tick pacing.
    pub clock: FrameClock,
}

impl AppState {
    /// Asynchronously creates a new [`AppState`] with an initialized renderer and a fresh
    /// idle game.
    ///
    /// # Arguments
    /// - `instance`: The WGPU instance.
    /// - `surface`: The WGPU surface for rendering.
    /// - `width`: Initial surface width in physical pixels.
    /// - `height`: Initial surface height in physical pixels.
    /// - `assets`: Loaded sprites and sounds.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        width: u32,
        height: u32,
        assets: &AssetRegistry,
    ) -> Result<Self, AppError> {
        let wgpu_renderer = WgpuRenderer::new(instance, surface, width, height).await?;
        let game_state = GameState::new(assets, StdRng::from_entropy())?;

        let audio = match GameAudioManager::new(assets) {
            Ok(audio) => Some(audio),
            Err(err) => {
                log::warn!("audio disabled: {err}");
                None
            }
        };

        Ok(Self {
            wgpu_renderer,
            game_state,
            audio,
            pending_keys: Vec::new(),
            clock: FrameClock::new(TICK, Instant::now()),
        })
    }

    /// Plays every sound the game queued since the last call.
    pub fn play_sounds(&mut self) {
        let sounds = self.game_state.drain_sounds();
        let Some(audio) = self.audio.as_mut() else {
            return;
        };
        for effect in sounds {
            if let Err(err) = audio.play(effect) {
                log::warn!("{err}");
            }
        }
    }
}
