//! Audio input and byte-frequency analysis.
//!
//! Captures time-domain samples (live microphone or a WAV file) and turns
//! the most recent window into per-bin byte magnitudes each frame.

mod analyser;
mod capture;
mod file;
mod window;

// Re-export public types
pub use analyser::{blackman_window, ByteAnalyser};
pub use capture::MicrophoneInput;
pub use file::WavFileInput;
pub use window::SampleWindow;

use crate::spectrum::FrequencySample;

/// Pull-style analyser accessor, polled once per frame
pub trait SpectrumSource {
    /// Bins written by [`fill`](Self::fill); fixed for the source's lifetime
    fn bin_count(&self) -> usize;

    /// Overwrite `sample` with the current spectrum
    ///
    /// `now_ms` is the frame timestamp; live sources may ignore it.
    fn fill(&mut self, now_ms: f64, sample: &mut FrequencySample);
}
