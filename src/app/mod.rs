//! Application module for Dragon Escape.
//!
//! This module ties the game to the window, the GPU and the audio device.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds everything that exists
//!   once the window is open
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`frame_clock`]: Fixed-timestep pacing
//! - [`update`]: The per-tick update and draw sequence
//!
//! # Event Flow
//!
//! Key presses are queued as they arrive. When the [`FrameClock`] says a tick is due,
//! the queued keys are applied, the frame is drawn, the simulation steps and any sounds
//! the game asked for are played.

pub mod app_state;
pub mod event_handler;
pub mod frame_clock;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
pub use frame_clock::FrameClock;

use crate::assets::AssetError;
use crate::renderer::RenderError;
use thiserror::Error;

/// Fatal errors that stop the application.
#[derive(Debug, Error)]
pub enum AppError {
    /// The event loop could not be created or failed while running.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// The window could not be created.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU setup failed.
    #[error(transparent)]
    Render(#[from] RenderError),
    /// The assets lack something the game needs.
    #[error(transparent)]
    Asset(#[from] AssetError),
}
