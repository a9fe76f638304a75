use std::time::{Duration, Instant};

/// Per-turn clock handed to the bot by the turn driver.
///
/// The selector accepts it but never reads it; a time-aware cutoff would
/// need its own policy.
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    started: Instant,
    remaining_at_start: Option<Duration>,
    increment: Duration,
}

impl Timer {
    pub fn new(remaining: Option<Duration>, increment: Duration) -> Self {
        Self { started: Instant::now(), remaining_at_start: remaining, increment }
    }

    pub fn unlimited() -> Self { Self::new(None, Duration::ZERO) }

    /// Clock time left, or `None` when the game is untimed.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining_at_start.map(|r| r.saturating_sub(self.started.elapsed()))
    }

    pub fn increment(&self) -> Duration { self.increment }
}

impl Default for Timer {
    fn default() -> Self { Self::unlimited() }
}
