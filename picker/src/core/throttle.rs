//! Leading-edge throttle for search dispatch

use std::time::Duration;
use tokio::time::Instant;

/// Allows one call per interval. The first call of a window passes,
/// later calls inside it are rejected and nothing is replayed afterwards.
#[derive(Debug)]
pub struct Throttle {
    interval: Duration,
    window_start: Option<Instant>,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            window_start: None,
        }
    }

    /// Try to take the current window. Returns `false` when throttled.
    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        if let Some(start) = self.window_start {
            if now.duration_since(start) < self.interval {
                return false;
            }
        }
        self.window_start = Some(now);
        true
    }

    /// Time left until the next call would pass
    pub fn remaining(&self) -> Duration {
        self.window_start
            .map(|start| self.interval.saturating_sub(start.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    pub fn is_open(&self) -> bool {
        self.remaining().is_zero()
    }

    pub fn reset(&mut self) {
        self.window_start = None;
    }
}
