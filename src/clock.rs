//! Frame clock sources.

use std::cell::Cell;
use std::time::Instant;

/// Monotonic, non-decreasing time in milliseconds since start
pub trait Clock {
    fn now_ms(&self) -> f64;

    /// Same clock in seconds (colour-cycle time base)
    fn elapsed_s(&self) -> f64 {
        self.now_ms() * 0.001
    }
}

/// Wall clock anchored at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Externally advanced clock for offline rendering and tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now_ms: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now_ms: Cell::new(start_ms),
        }
    }

    /// Move forward by `delta_ms`; negative deltas are ignored
    pub fn advance(&self, delta_ms: f64) {
        if delta_ms > 0.0 {
            self.now_ms.set(self.now_ms.get() + delta_ms);
        }
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms.get()
    }
}
