//! # Assets Module
//!
//! Loads every sprite and sound the game uses from a fixed directory layout,
//! once, before the window opens:
//!
//! ```text
//! <root>/sprites/<name>.<ext>   decoded with `image`
//! <root>/audios/<name>.<ext>    decoded with `kira`
//! ```
//!
//! Each file is registered under its stem (the file name up to the first `.`).
//! The resulting [`AssetRegistry`] is immutable and handed out by reference.

use image::RgbaImage;
use kira::sound::static_sound::StaticSoundData;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Subdirectory of the asset root holding images.
pub const SPRITES_DIR: &str = "sprites";
/// Subdirectory of the asset root holding sounds.
pub const AUDIOS_DIR: &str = "audios";

/// Which table an asset name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// A sprite from the sprites directory.
    Image,
    /// A sound from the audios directory.
    Sound,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Image => write!(f, "image"),
            AssetKind::Sound => write!(f, "sound"),
        }
    }
}

/// Errors raised while loading or looking up assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The directory could not be listed.
    #[error("cannot read asset directory {path}: {source}")]
    Directory {
        /// Directory that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An image file could not be decoded.
    #[error("cannot decode image {path}: {source}")]
    Image {
        /// File that failed.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },
    /// A sound file could not be decoded.
    #[error("cannot decode sound {path}: {source}")]
    Sound {
        /// File that failed.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: kira::sound::FromFileError,
    },
    /// A name was requested that was never loaded.
    #[error("no {kind} named `{name}` was loaded")]
    NotFound {
        /// Table the name was looked up in.
        kind: AssetKind,
        /// The missing name.
        name: String,
    },
}

/// A decoded RGBA image together with the key the renderer caches it under.
#[derive(Debug)]
pub struct Sprite {
    key: String,
    pixels: RgbaImage,
}

/// Shared handle to a [`Sprite`].
pub type ImageHandle = Arc<Sprite>;

impl Sprite {
    /// Wraps `pixels` under `key`. Sprites built at runtime (composites) use
    /// keys that cannot clash with file stems.
    pub fn new(key: impl Into<String>, pixels: RgbaImage) -> Self {
        Self {
            key: key.into(),
            pixels,
        }
    }

    /// Texture cache key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Decoded pixels.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Width in pixels.
    pub fn width(&self) -> i32 {
        self.pixels.width() as i32
    }

    /// Height in pixels.
    pub fn height(&self) -> i32 {
        self.pixels.height() as i32
    }
}

/// Name-keyed images and sounds, loaded once at startup.
#[derive(Default)]
pub struct AssetRegistry {
    images: HashMap<String, ImageHandle>,
    sounds: HashMap<String, StaticSoundData>,
}

impl AssetRegistry {
    /// Loads every file under `root/sprites` and `root/audios`.
    ///
    /// # Errors
    /// Fails if either directory cannot be read or any file fails to decode.
    pub fn load(root: &Path) -> Result<Self, AssetError> {
        let mut images = HashMap::new();
        for (name, path) in list_assets(&root.join(SPRITES_DIR))? {
            let pixels = image::open(&path)
                .map_err(|source| AssetError::Image {
                    path: path.clone(),
                    source,
                })?
                .to_rgba8();
            log::debug!("loaded image `{}` from {}", name, path.display());
            images.insert(name.clone(), Arc::new(Sprite::new(name, pixels)));
        }

        let mut sounds = HashMap::new();
        for (name, path) in list_assets(&root.join(AUDIOS_DIR))? {
            let data = StaticSoundData::from_file(&path).map_err(|source| AssetError::Sound {
                path: path.clone(),
                source,
            })?;
            log::debug!("loaded sound `{}` from {}", name, path.display());
            sounds.insert(name, data);
        }

        log::info!(
            "loaded {} images and {} sounds from {}",
            images.len(),
            sounds.len(),
            root.display()
        );
        Ok(Self { images, sounds })
    }

    /// Checks that every listed name was loaded.
    ///
    /// # Errors
    /// Returns [`AssetError::NotFound`] for the first missing name.
    pub fn validate(&self, images: &[&str], sounds: &[&str]) -> Result<(), AssetError> {
        for name in images {
            self.get_image(name)?;
        }
        for name in sounds {
            self.get_sound(name)?;
        }
        Ok(())
    }

    /// Looks up an image by name.
    pub fn get_image(&self, name: &str) -> Result<&ImageHandle, AssetError> {
        self.images.get(name).ok_or_else(|| AssetError::NotFound {
            kind: AssetKind::Image,
            name: name.to_string(),
        })
    }

    /// Looks up a sound by name.
    pub fn get_sound(&self, name: &str) -> Result<&StaticSoundData, AssetError> {
        self.sounds.get(name).ok_or_else(|| AssetError::NotFound {
            kind: AssetKind::Sound,
            name: name.to_string(),
        })
    }

    /// Builds a registry from in-memory images only.
    #[cfg(test)]
    pub(crate) fn from_images<'a>(images: impl IntoIterator<Item = (&'a str, RgbaImage)>) -> Self {
        Self {
            images: images
                .into_iter()
                .map(|(name, pixels)| (name.to_string(), Arc::new(Sprite::new(name, pixels))))
                .collect(),
            sounds: HashMap::new(),
        }
    }
}

/// Lists the regular files of `dir` as `(stem, path)` pairs, sorted by path.
fn list_assets(dir: &Path) -> Result<Vec<(String, PathBuf)>, AssetError> {
    let to_error = |source| AssetError::Directory {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(to_error)? {
        let path = entry.map_err(to_error)?.path();
        if path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    Ok(paths
        .into_iter()
        .filter_map(|path| {
            let file_name = path.file_name()?.to_str()?;
            let stem = file_name.split('.').next()?;
            (!stem.is_empty()).then(|| (stem.to_string(), path.clone()))
        })
        .collect())
}
