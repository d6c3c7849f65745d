//! Audio analysis and beat detection configuration.

use crate::error::ConfigError;

/// Byte-frequency analyser configuration
///
/// Defaults reproduce a browser `AnalyserNode` with `fftSize = 512`.
#[derive(Debug, Clone)]
pub struct AnalyserConfig {
    /// FFT window size (power of 2). Bin count is half of this.
    pub fft_size: usize,

    /// Time smoothing between consecutive spectra (0 = none, <1)
    pub smoothing_time_constant: f32,

    /// Magnitude (dB) mapped to byte value 0
    pub min_decibels: f32,

    /// Magnitude (dB) mapped to byte value 255
    pub max_decibels: f32,
}

impl Default for AnalyserConfig {
    fn default() -> Self {
        Self {
            fft_size: 512,
            smoothing_time_constant: 0.8,
            min_decibels: -100.0,
            max_decibels: -30.0,
        }
    }
}

impl AnalyserConfig {
    /// Number of frequency bins produced per frame
    pub fn frequency_bin_count(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.fft_size.is_power_of_two() || !(32..=32768).contains(&self.fft_size) {
            return Err(ConfigError::InvalidFftSize(self.fft_size));
        }
        ConfigError::check_range(
            "smoothing_time_constant",
            self.smoothing_time_constant as f64,
            0.0,
            1.0,
        )?;
        if self.min_decibels >= self.max_decibels {
            return Err(ConfigError::Invalid(format!(
                "min_decibels ({}) must be below max_decibels ({})",
                self.min_decibels, self.max_decibels
            )));
        }
        Ok(())
    }
}

/// Rolling-average beat detector tuning
#[derive(Debug, Clone)]
pub struct BeatConfig {
    /// Energy averages kept in the sliding window (~1 s at 60 fps)
    pub history_len: usize,

    /// Current energy must exceed baseline by this ratio
    pub threshold_ratio: f32,

    /// Refractory period after a beat (milliseconds)
    /// 300 ms allows up to ~200 BPM
    pub cooldown_ms: f64,
}

impl Default for BeatConfig {
    fn default() -> Self {
        Self {
            history_len: 60,
            threshold_ratio: 1.2,
            cooldown_ms: 300.0,
        }
    }
}

impl BeatConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_len == 0 {
            return Err(ConfigError::Invalid(
                "beat history length must be > 0".to_string(),
            ));
        }
        if self.threshold_ratio < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "beat threshold ratio must be >= 1, got {}",
                self.threshold_ratio
            )));
        }
        if self.cooldown_ms < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "beat cooldown must be >= 0 ms, got {}",
                self.cooldown_ms
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_analyser_bin_count() {
        let config = AnalyserConfig::default();
        assert_eq!(config.frequency_bin_count(), 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analyser_rejects_bad_fft_size() {
        let config = AnalyserConfig {
            fft_size: 500,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidFftSize(500)));
    }

    #[test]
    fn test_analyser_rejects_inverted_decibel_range() {
        let config = AnalyserConfig {
            min_decibels: -30.0,
            max_decibels: -100.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_beat_config_validation() {
        assert!(BeatConfig::default().validate().is_ok());

        let config = BeatConfig {
            history_len: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = BeatConfig {
            threshold_ratio: 0.9,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
