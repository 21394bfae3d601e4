use core::time::Duration;
use web_time::Instant;

use crate::Outcome;

/// Pausable wall-clock timer for a single game.
#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if let Some(started_at) = self.started_at.take() {
            self.accumulated += started_at.elapsed();
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map(|started_at| started_at.elapsed())
                .unwrap_or_default()
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed().as_millis().try_into().unwrap_or(u64::MAX)
    }

    /// Runs while the game is being played: starts on the first reveal, stops when the
    /// game ends and clears on a new game.
    pub fn follow(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Started => self.start(),
            Outcome::Won | Outcome::Lost => self.stop(),
            Outcome::Reset => self.reset(),
            _ => {}
        }
    }
}
