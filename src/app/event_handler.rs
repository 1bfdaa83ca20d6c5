//! Event handler module for Dragon Escape.
//!
//! Contains the App struct and its event handling logic.

use crate::app::AppError;
use crate::app::app_state::AppState;
use crate::assets::AssetRegistry;
use crate::game::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::game::keys::winit_key_to_game_key;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow},
    window::{Window, WindowId},
};

/// Title of the game window.
pub const WINDOW_TITLE: &str = "Dragon Escape";

/// Main application struct that manages the window lifecycle and event handling.
///
/// # Lifecycle
/// 1. Created with [`App::new`] from the loaded assets
/// 2. The window is opened on the first `resumed` event, which also builds the [`AppState`]
/// 3. Events are handled via the [`ApplicationHandler`] trait methods
/// 4. The application runs until the window is closed or a fatal error occurs; the error,
///    if any, is kept for [`App::take_error`]
pub struct App {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// The current application state, None until the window is open.
    pub state: Option<AppState>,
    /// The application window, None until created.
    pub window: Option<Arc<Window>>,
    assets: AssetRegistry,
    error: Option<AppError>,
}

impl App {
    /// Creates a new [`App`] that will run the game on `assets`.
    pub fn new(assets: AssetRegistry) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
            assets,
            error: None,
        }
    }

    /// Takes the fatal error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    /// Creates the surface and application state for `window`.
    pub async fn set_window(&mut self, window: Window) -> Result<(), AppError> {
        let window = Arc::new(window);
        let size = window.inner_size();

        let surface = self
            .instance
            .create_surface(window.clone())
            .map_err(crate::renderer::RenderError::from)?;

        let state = AppState::new(
            &self.instance,
            surface,
            size.width,
            size.height,
            &self.assets,
        )
        .await?;

        self.window = Some(window);
        self.state = Some(state);
        Ok(())
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), AppError> {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(SCREEN_WIDTH as f64, SCREEN_HEIGHT as f64))
            .with_resizable(false);
        let window = event_loop.create_window(attributes)?;
        pollster::block_on(self.set_window(window))?;
        log::info!("window opened");
        Ok(())
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: AppError) {
        log::error!("{err}");
        self.error = Some(err);
        event_loop.exit();
    }
}

impl ApplicationHandler for App {
    /// Opens the window on the first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(state) = self.state.as_mut() {
                    state.wgpu_renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key,
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let (Some(state), Some(key)) =
                    (self.state.as_mut(), winit_key_to_game_key(&logical_key))
                {
                    state.pending_keys.push(key);
                }
            }
            WindowEvent::RedrawRequested => self.handle_redraw(),
            _ => {}
        }
    }

    /// Sleeps until the next tick and requests a redraw once it is due.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(state), Some(window)) = (self.state.as_ref(), self.window.as_ref()) else {
            return;
        };
        if state.clock.is_due(Instant::now()) {
            window.request_redraw();
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(state.clock.next_tick()));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = self.state.as_ref() {
            log::info!("exiting with score {}", state.game_state.score());
        }
    }
}
