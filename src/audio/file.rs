//! WAV file spectrum source for offline analysis.

use std::path::Path;

use hound::{SampleFormat, WavReader};
use tracing::info;

use super::analyser::ByteAnalyser;
use super::SpectrumSource;
use crate::error::AudioError;
use crate::params::AnalyserConfig;
use crate::spectrum::FrequencySample;

/// Analyses a decoded WAV file at the position given by the frame clock
///
/// Playback is silent and loops when the clock passes the end of the file.
pub struct WavFileInput {
    /// Mono samples, -1..=1
    samples: Vec<f32>,
    sample_rate_hz: u32,
    analyser: ByteAnalyser,
    scratch: Vec<f32>,
}

impl WavFileInput {
    pub fn open(path: impl AsRef<Path>, config: AnalyserConfig) -> Result<Self, AudioError> {
        let path = path.as_ref();
        let reader = WavReader::open(path)?;
        let spec = reader.spec();
        let samples = decode_mono(reader)?;

        info!(
            path = %path.display(),
            sample_rate_hz = spec.sample_rate,
            channels = spec.channels,
            frames = samples.len(),
            "audio file"
        );

        Self::from_samples(samples, spec.sample_rate, config)
    }

    /// Source over already decoded mono samples
    pub fn from_samples(
        samples: Vec<f32>,
        sample_rate_hz: u32,
        config: AnalyserConfig,
    ) -> Result<Self, AudioError> {
        if samples.is_empty() {
            return Err(AudioError::EmptyWav);
        }
        let analyser = ByteAnalyser::new(config)?;
        Ok(Self {
            samples,
            sample_rate_hz,
            scratch: vec![0.0; analyser.fft_size()],
            analyser,
        })
    }

    /// Copy the `fft_size` samples ending at `now_ms`, wrapping at the end
    fn load_window(&mut self, now_ms: f64) {
        let len = self.samples.len();
        let position = (now_ms.max(0.0) * self.sample_rate_hz as f64 / 1000.0) as usize % len;
        let n = self.scratch.len();

        for (i, slot) in self.scratch.iter_mut().enumerate() {
            // Index of sample `n - i` steps before `position`, wrapped
            let back = (n - i) % len;
            *slot = self.samples[(position + len - back) % len];
        }
    }
}

impl SpectrumSource for WavFileInput {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn fill(&mut self, now_ms: f64, sample: &mut FrequencySample) {
        self.load_window(now_ms);
        self.analyser.analyse(&self.scratch, sample.bins_mut());
    }
}

/// Decode all frames, averaging channels to mono
fn decode_mono<R: std::io::Read>(reader: WavReader<R>) -> Result<Vec<f32>, AudioError> {
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.into_samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample.saturating_sub(1))) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / full_scale))
                .collect::<Result<_, _>>()?
        }
    };

    Ok(interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn write_sine_wav(path: &Path, freq_hz: f32, seconds: f32, channels: u16) {
        let spec = hound::WavSpec {
            channels,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        let frames = (44100.0 * seconds) as usize;
        for i in 0..frames {
            let v = (2.0 * PI * freq_hz * i as f32 / 44100.0).sin() * 0.5;
            for _ in 0..channels {
                writer.write_sample((v * i16::MAX as f32) as i16).unwrap();
            }
        }
        writer.finalize().unwrap();
    }

    #[test]
    fn test_open_decodes_stereo_to_mono() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        write_sine_wav(&path, 440.0, 0.5, 2);

        let input = WavFileInput::open(&path, AnalyserConfig::default()).unwrap();
        assert_eq!(input.samples.len(), 22050);
        assert_eq!(input.sample_rate_hz, 44100);
        assert_eq!(input.bin_count(), 256);
    }

    #[test]
    fn test_tone_energy_lands_near_expected_bin() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        // 44100 / 512 ≈ 86.13 Hz per bin; 1722.6 Hz ≈ bin 20
        write_sine_wav(&path, 1722.6, 1.0, 1);

        let mut input = WavFileInput::open(&path, AnalyserConfig::default()).unwrap();
        let mut sample = FrequencySample::new(input.bin_count());
        for frame in 0..20 {
            input.fill(100.0 + frame as f64 * 16.0, &mut sample);
        }

        let peak = sample
            .iter()
            .enumerate()
            .max_by_key(|(_, &v)| v)
            .map(|(i, _)| i)
            .unwrap();
        assert!((19..=21).contains(&peak), "peak at bin {}", peak);
        assert!(sample[200] < sample[20]);
    }

    #[test]
    fn test_position_wraps_past_end() {
        let samples: Vec<f32> = (0..1000).map(|i| i as f32).collect();
        let mut input =
            WavFileInput::from_samples(samples, 1000, AnalyserConfig::default()).unwrap();

        // 1.5 s into a 1 s file -> position 500
        input.load_window(1500.0);
        assert_eq!(input.scratch[input.scratch.len() - 1], 499.0);
        // Window of 512 reaches back across the start: 988..999, 0..499
        assert_eq!(input.scratch[0], 988.0);
        assert_eq!(input.scratch[12], 0.0);
    }

    #[test]
    fn test_empty_samples_rejected() {
        let result = WavFileInput::from_samples(Vec::new(), 44100, AnalyserConfig::default());
        assert!(matches!(result, Err(AudioError::EmptyWav)));
    }
}
