//! Byte-frequency analysis of a time-domain window.
//!
//! Follows the browser analyser pipeline: Blackman window, forward FFT,
//! magnitude normalised by FFT size, exponential time smoothing, then
//! decibels mapped linearly onto 0-255.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::ConfigError;
use crate::params::AnalyserConfig;

/// Stateful spectrum analyser (smoothing carries across frames)
pub struct ByteAnalyser {
    config: AnalyserConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    smoothed: Vec<f32>,
}

impl ByteAnalyser {
    pub fn new(config: AnalyserConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = (0..config.fft_size)
            .map(|i| blackman_window(i, config.fft_size))
            .collect();

        Ok(Self {
            fft,
            window,
            buffer: vec![Complex::new(0.0, 0.0); config.fft_size],
            smoothed: vec![0.0; config.frequency_bin_count()],
            config,
        })
    }

    pub fn fft_size(&self) -> usize {
        self.config.fft_size
    }

    pub fn bin_count(&self) -> usize {
        self.config.frequency_bin_count()
    }

    /// Analyse the newest `fft_size` samples of `time_domain` into `out`
    ///
    /// Short input is treated as preceded by silence. Bins beyond
    /// `bin_count()` in `out` are zeroed.
    pub fn analyse(&mut self, time_domain: &[f32], out: &mut [u8]) {
        let n = self.config.fft_size;
        let take = time_domain.len().min(n);
        let pad = n - take;
        let input = &time_domain[time_domain.len() - take..];

        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let value = if i < pad { 0.0 } else { input[i - pad] };
            *slot = Complex::new(value * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let tau = self.config.smoothing_time_constant;
        let scale = 1.0 / n as f32;
        for (k, smoothed) in self.smoothed.iter_mut().enumerate() {
            let magnitude = self.buffer[k].norm() * scale;
            let next = tau * *smoothed + (1.0 - tau) * magnitude;
            *smoothed = if next.is_finite() { next } else { 0.0 };
        }

        let bins = self.smoothed.len();
        for (k, byte) in out.iter_mut().enumerate() {
            *byte = if k < bins {
                self.to_byte(self.smoothed[k])
            } else {
                0
            };
        }
    }

    fn to_byte(&self, magnitude: f32) -> u8 {
        if magnitude <= 0.0 {
            return 0;
        }
        let db = 20.0 * magnitude.log10();
        let range = self.config.max_decibels - self.config.min_decibels;
        let scaled = (255.0 / range) * (db - self.config.min_decibels);
        scaled.floor().clamp(0.0, 255.0) as u8
    }
}

/// Blackman window coefficient (alpha = 0.16)
pub fn blackman_window(index: usize, size: usize) -> f32 {
    let x = index as f32 / size as f32;
    0.42 - 0.5 * (2.0 * PI * x).cos() + 0.08 * (4.0 * PI * x).cos()
}
