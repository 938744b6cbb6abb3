//! Fixed-timestep gravity
//!
//! The driver reports elapsed frame time; the scheduler says when the active
//! piece should fall one row.

use std::time::Duration;

/// Interval at level 1
const BASE_INTERVAL_MS: f64 = 1000.0;
/// Interval multiplier per level
const SPEEDUP: f64 = 0.88;
/// Fastest gravity, whatever the level
pub const MIN_INTERVAL_MS: u64 = 70;

/// Time between automatic one-row descents at `level`
pub fn drop_interval(level: u32) -> Duration {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let ms = (BASE_INTERVAL_MS * SPEEDUP.powi(exponent)).floor() as u64;
    Duration::from_millis(ms.max(MIN_INTERVAL_MS))
}

/// Accumulates frame time until the next gravity step is due
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropScheduler {
    accumulated: Duration,
}

impl DropScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `elapsed` and report whether a descent is due at `level`.
    ///
    /// Fires at most once per call; the accumulator restarts from zero and
    /// any excess time is dropped. Zero elapsed time never fires.
    pub fn tick(&mut self, elapsed: Duration, level: u32) -> bool {
        if elapsed.is_zero() {
            return false;
        }
        self.accumulated += elapsed;
        if self.accumulated >= drop_interval(level) {
            self.accumulated = Duration::ZERO;
            return true;
        }
        false
    }

    /// Time banked toward the next descent
    pub fn accumulated(&self) -> Duration {
        self.accumulated
    }

    pub fn reset(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
