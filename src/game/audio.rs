use crate::assets::{AssetError, AssetKind, AssetRegistry};
use kira::sound::static_sound::StaticSoundData;
use kira::{AudioManager, AudioManagerSettings, DefaultBackend};
use std::collections::HashMap;
use thiserror::Error;

/// Sound effects the game loop asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Wing beat.
    Flap,
    /// Crash.
    Hit,
    /// Pole cleared.
    Point,
}

impl SoundEffect {
    /// Every effect.
    pub const ALL: [SoundEffect; 3] = [SoundEffect::Flap, SoundEffect::Hit, SoundEffect::Point];

    /// Name of the sound file backing this effect.
    pub const fn asset_name(self) -> &'static str {
        match self {
            SoundEffect::Flap => "wave1",
            SoundEffect::Hit => "hit1",
            SoundEffect::Point => "point",
        }
    }
}

/// Every sound name the game looks up.
pub fn sound_manifest() -> Vec<&'static str> {
    SoundEffect::ALL.iter().map(|effect| effect.asset_name()).collect()
}

/// Errors raised by the audio output.
#[derive(Debug, Error)]
pub enum AudioError {
    /// No output device could be opened.
    #[error("failed to open audio device: {0}")]
    Device(String),
    /// The mixer refused a sound.
    #[error("failed to play {effect:?}: {reason}")]
    Play {
        /// Effect that failed.
        effect: SoundEffect,
        /// Mixer error.
        reason: String,
    },
    /// A sound is missing from the registry.
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Plays the game's sound effects on the default output device.
pub struct GameAudioManager {
    audio_manager: AudioManager<DefaultBackend>,
    sounds: HashMap<SoundEffect, StaticSoundData>,
}

impl GameAudioManager {
    /// Opens the default device and resolves every effect from `assets`.
    pub fn new(assets: &AssetRegistry) -> Result<Self, AudioError> {
        let audio_manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|err| AudioError::Device(err.to_string()))?;

        let mut sounds = HashMap::new();
        for effect in SoundEffect::ALL {
            sounds.insert(effect, assets.get_sound(effect.asset_name())?.clone());
        }

        Ok(GameAudioManager {
            audio_manager,
            sounds,
        })
    }

    /// Starts `effect`. Overlapping plays mix.
    pub fn play(&mut self, effect: SoundEffect) -> Result<(), AudioError> {
        let Some(data) = self.sounds.get(&effect) else {
            return Err(AssetError::NotFound {
                kind: AssetKind::Sound,
                name: effect.asset_name().to_string(),
            }
            .into());
        };
        self.audio_manager
            .play(data.clone())
            .map_err(|err| AudioError::Play {
                effect,
                reason: format!("{err:?}"),
            })?;
        Ok(())
    }
}
