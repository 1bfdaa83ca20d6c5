//! Main renderer module.
//!
//! This module contains the sprite pipeline and the wgpu device/surface wrapper that
//! presents it.

use thiserror::Error;

/// Textured quad rendering for sprites.
pub mod sprite;
/// Core WGPU setup and frame presentation.
pub mod wgpu_lib;

/// Errors raised while setting up or driving the GPU.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The window surface could not be created.
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    /// No adapter can present to the surface.
    #[error("no suitable graphics adapter found")]
    NoAdapter,
    /// The adapter refused to open a device.
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    /// The surface offers no texture format.
    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
    /// A frame could not be acquired.
    #[error("failed to acquire frame: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
