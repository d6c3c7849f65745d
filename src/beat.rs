//! Rolling-average beat detection.
//!
//! A beat fires when the current energy average rises a fixed ratio above
//! the mean of a short sliding window of recent averages, provided the
//! refractory period since the previous beat has elapsed.

use std::collections::VecDeque;

use tracing::debug;

use crate::error::ConfigError;
use crate::params::BeatConfig;

/// Sliding-window beat detector
///
/// The window includes the sample being tested, so the very first frame
/// can never fire (its baseline is itself).
#[derive(Debug, Clone)]
pub struct BeatDetector {
    config: BeatConfig,
    /// Most recent energy averages, oldest at the front
    history: VecDeque<f32>,
    /// Timestamp of the last detected beat (ms); 0 = none yet
    last_beat_ms: f64,
}

impl Default for BeatDetector {
    fn default() -> Self {
        Self::with_config(BeatConfig::default())
    }
}

impl BeatDetector {
    pub fn new(config: BeatConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: BeatConfig) -> Self {
        Self {
            history: VecDeque::with_capacity(config.history_len + 1),
            config,
            last_beat_ms: 0.0,
        }
    }

    /// Feed one frame's energy average and report whether it is a beat
    ///
    /// # Arguments
    /// * `current_average` - Mean magnitude of this frame's spectrum
    /// * `now_ms` - Monotonic timestamp in milliseconds
    pub fn detect(&mut self, current_average: f32, now_ms: f64) -> bool {
        self.history.push_back(current_average);
        while self.history.len() > self.config.history_len {
            self.history.pop_front();
        }

        let baseline = self.baseline();
        let spike = current_average > baseline * self.config.threshold_ratio;
        let cooled_down = now_ms - self.last_beat_ms > self.config.cooldown_ms;

        if spike && cooled_down {
            debug!(
                energy = current_average,
                baseline,
                since_last_ms = now_ms - self.last_beat_ms,
                "beat"
            );
            self.last_beat_ms = now_ms;
            true
        } else {
            false
        }
    }

    /// Mean of the current window (0 when empty)
    fn baseline(&self) -> f32 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f32>() / self.history.len() as f32
    }

}
