//! Tick-counted repeating timer used to spawn poles.

use std::time::Duration;

/// Fires once every `period` worth of ticks while running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnTimer {
    period_ticks: u32,
    elapsed_ticks: u32,
    running: bool,
}

impl SpawnTimer {
    /// A stopped timer firing every `period`, measured in ticks of length `tick`.
    pub fn new(period: Duration, tick: Duration) -> Self {
        let period_ticks = (period.as_secs_f64() / tick.as_secs_f64()).round() as u32;
        Self {
            period_ticks: period_ticks.max(1),
            elapsed_ticks: 0,
            running: false,
        }
    }

    /// Starts counting from zero.
    pub fn start(&mut self) {
        self.elapsed_ticks = 0;
        self.running = true;
    }

    /// Stops and clears the count.
    pub fn stop(&mut self) {
        self.elapsed_ticks = 0;
        self.running = false;
    }

    /// Whether the timer is counting.
    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks counted since the last start or firing.
    #[cfg(test)]
    pub fn elapsed_ticks(&self) -> u32 {
        self.elapsed_ticks
    }

    /// Ticks between firings.
    #[cfg(test)]
    pub fn period_ticks(&self) -> u32 {
        self.period_ticks
    }

    /// Counts one tick. Returns true when the period has just elapsed.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.elapsed_ticks += 1;
        if self.elapsed_ticks >= self.period_ticks {
            self.elapsed_ticks = 0;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::config::{SPAWN_PERIOD, TICK};

    #[test]
    fn fires_every_period() {
        let mut timer = SpawnTimer::new(SPAWN_PERIOD, TICK);
        assert_eq!(timer.period_ticks(), 90);
        timer.start();

        let fired: Vec<u32> = (1..=270).filter(|_| timer.tick()).collect();
        assert_eq!(fired, [90, 180, 270]);
    }

    #[test]
    fn stopped_timer_never_fires() {
        let mut timer = SpawnTimer::new(Duration::from_millis(50), TICK);
        assert!((0..100).all(|_| !timer.tick()));

        timer.start();
        timer.tick();
        timer.stop();
        assert!(!timer.is_running());
        assert_eq!(timer.elapsed_ticks(), 0);
        assert!((0..100).all(|_| !timer.tick()));
    }
}
