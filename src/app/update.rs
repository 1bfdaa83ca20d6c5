//! Per-tick update and draw sequence.

use crate::app::App;
use crate::renderer::sprite::SpriteDraw;
use std::time::Instant;

impl App {
    /// Handles a redraw request.
    ///
    /// When a tick is due this runs the whole tick:
    /// 1. Queued keys and the spawn timer are applied to the game
    /// 2. The current entities are drawn and presented
    /// 3. The simulation advances one step
    /// 4. Sounds queued by the game are played
    ///
    /// Otherwise the current state is only redrawn. Ticks are driven by redraw
    /// requests, so the game pauses whenever the platform stops delivering them,
    /// as it may for a minimized or hidden window. If a redraw does arrive while
    /// minimized, the tick runs but drawing is skipped.
    pub fn handle_redraw(&mut self) {
        let (Some(window), Some(state)) = (self.window.as_ref(), self.state.as_mut()) else {
            return;
        };

        let now = Instant::now();
        let ticking = state.clock.is_due(now);

        if ticking {
            state.game_state.process_events(state.pending_keys.drain(..));
        }

        if !window.is_minimized().unwrap_or(false) {
            let draws: Vec<SpriteDraw<'_>> = state
                .game_state
                .entities()
                .iter()
                .map(|entity| SpriteDraw::new(entity.sprite(), entity.rect()))
                .collect();
            if let Err(err) = state.wgpu_renderer.render_frame(&draws) {
                log::warn!("dropped frame: {err}");
            }
        }

        if ticking {
            state.game_state.advance();
            state.clock.advance(now);
            state.play_sounds();
        }
    }
}
