//! Dragon Escape - a side-scrolling arcade game
//!
//! This is the main entry point for Dragon Escape. The player keeps a dragon airborne with
//! the space bar and steers it through the gaps between totem poles that scroll in from
//! the right. Each pole cleared scores a point; touching a pole or the ground ends the
//! round, and Escape starts a new one.
//!
//! # Architecture
//! The application follows a modular architecture:
//! - `assets`: Loads sprites and sounds from disk once at startup
//! - `config`: Launch settings read from the environment
//! - `game/`: Entities, physics, collision and the round state machine
//! - `renderer/`: wgpu sprite pipeline
//! - `app/`: Window, event loop and per-tick sequencing
//!
//! # Usage
//! Run the application with `cargo run`. Assets are read from `./assets` unless
//! `DRAGON_ESCAPE_ASSETS` points elsewhere; set `RUST_LOG` to change log verbosity.

#![warn(missing_docs)]
pub mod app;
pub mod assets;
pub mod config;
pub mod game;
pub mod renderer;

use crate::app::AppError;
use crate::assets::AssetRegistry;
use crate::config::LaunchConfig;
use crate::game::audio::sound_manifest;
use crate::game::prefabs::image_manifest;
use std::process::ExitCode;
use winit::event_loop::EventLoop;

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

/// Main entry point for Dragon Escape.
///
/// Loads and validates every asset before the window opens. Any failure up to and
/// including window and GPU setup is logged and turns into exit status 1.
fn main() -> ExitCode {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = LaunchConfig::from_env();
    let assets = match load_assets(&config) {
        Ok(assets) => assets,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match pollster::block_on(run(assets)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_assets(config: &LaunchConfig) -> Result<AssetRegistry, AppError> {
    log::info!("loading assets from {}", config.asset_root.display());
    let assets = AssetRegistry::load(&config.asset_root)?;
    assets.validate(&image_manifest(), &sound_manifest())?;
    Ok(assets)
}

/// Asynchronously runs the event loop until the window closes.
///
/// # Errors
/// Returns the error that stopped the loop, if it was not a normal close.
async fn run(assets: AssetRegistry) -> Result<(), AppError> {
    let event_loop = EventLoop::new()?;
    let mut app = app::App::new(assets);

    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
