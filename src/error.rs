//! Error types for configuration, audio input and rendering.
//!
//! The per-frame pipeline (sampling, beat detection, frame mapping) has no
//! failure modes; these errors only come from setup and device I/O.

use thiserror::Error;

/// Parameter out of its documented range
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be within {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("FFT size must be a power of two between 32 and 32768, got {0}")]
    InvalidFftSize(usize),

    #[error("{0}")]
    Invalid(String),
}

impl ConfigError {
    /// Check `value` against an inclusive range
    pub fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        if value >= min && value <= max {
            Ok(())
        } else {
            Err(Self::OutOfRange {
                name,
                value,
                min,
                max,
            })
        }
    }
}

/// Audio source failures (device access, stream setup, file decoding)
#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no audio input device available (is microphone access allowed?)")]
    NoInputDevice,

    #[error("audio input device '{0}' not found")]
    DeviceNotFound(String),

    #[error("failed to query input device: {0}")]
    DeviceQuery(String),

    #[error("unsupported input sample format: {0}")]
    UnsupportedFormat(String),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),

    #[error("failed to read WAV file: {0}")]
    Wav(#[from] hound::Error),

    #[error("WAV file contains no samples")]
    EmptyWav,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// GPU setup failures
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
