//! Per-frame pipeline: sample → detect → map.
//!
//! `Visualizer` is the state owned by the application (beat history and
//! the reusable spectrum buffer). One call to [`Visualizer::tick`] runs a
//! whole frame synchronously and returns what the renderer should apply.

use crate::audio::SpectrumSource;
use crate::beat::BeatDetector;
use crate::clock::Clock;
use crate::error::ConfigError;
use crate::mapper::{map_frame, FrameOutput};
use crate::params::{BeatConfig, VisualSettings};
use crate::spectrum::{reduce_energy, FrequencySample};

/// Result of one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Mean magnitude of this frame's spectrum
    pub energy: f32,

    /// Whether this frame was flagged as a beat
    pub beat: bool,

    /// Per-bar targets and rotation delta
    pub output: FrameOutput,
}

/// Audio-reactive frame state
pub struct Visualizer {
    detector: BeatDetector,
    sample: FrequencySample,
}

impl Visualizer {
    /// State for a source producing `bin_count` bins
    pub fn new(bin_count: usize, beat_config: BeatConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            detector: BeatDetector::new(beat_config)?,
            sample: FrequencySample::new(bin_count),
        })
    }

    /// Run one frame against `source` at the clock's current time
    ///
    /// # Arguments
    /// * `source` - Analyser polled once for this frame's spectrum
    /// * `clock` - Time base for both the beat cooldown and the colour cycle
    /// * `settings` - Current visual settings snapshot
    /// * `total_bars` - Number of bars the renderer currently holds
    pub fn tick(
        &mut self,
        source: &mut dyn SpectrumSource,
        clock: &dyn Clock,
        settings: &VisualSettings,
        total_bars: usize,
    ) -> FrameReport {
        let now_ms = clock.now_ms();
        source.fill(now_ms, &mut self.sample);
        let elapsed_s = clock.elapsed_s();

        let energy = reduce_energy(&self.sample);
        let beat = self.detector.detect(energy, now_ms);
        let output = map_frame(&self.sample, beat, elapsed_s, settings, total_bars);

        FrameReport {
            energy,
            beat,
            output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::mapper::ROTATION_STEP_RAD;

    /// Replays a fixed list of spectra, repeating the last one
    struct ScriptedSource {
        frames: Vec<Vec<u8>>,
        next: usize,
        bins: usize,
        calls: usize,
    }

    impl ScriptedSource {
        fn new(bins: usize, frames: Vec<Vec<u8>>) -> Self {
            Self {
                frames,
                next: 0,
                bins,
                calls: 0,
            }
        }
    }

    impl SpectrumSource for ScriptedSource {
        fn bin_count(&self) -> usize {
            self.bins
        }

        fn fill(&mut self, _now_ms: f64, sample: &mut FrequencySample) {
            self.calls += 1;
            let frame = &self.frames[self.next.min(self.frames.len() - 1)];
            self.next += 1;
            for (dst, src) in sample.bins_mut().iter_mut().zip(frame.iter()) {
                *dst = *src;
            }
        }
    }

    #[test]
    fn test_tick_polls_source_once_per_frame() {
        let mut source = ScriptedSource::new(4, vec![vec![64; 4]]);
        let mut visualizer = Visualizer::new(source.bin_count(), BeatConfig::default()).unwrap();
        let clock = ManualClock::new(1000.0);
        let settings = VisualSettings::default();

        for _ in 0..5 {
            visualizer.tick(&mut source, &clock, &settings, 4);
            clock.advance(16.0);
        }
        assert_eq!(source.calls, 5);
    }

    #[test]
    fn test_steady_signal_never_beats() {
        let mut source = ScriptedSource::new(8, vec![vec![100; 8]]);
        let mut visualizer = Visualizer::new(8, BeatConfig::default()).unwrap();
        let clock = ManualClock::new(1000.0);
        let settings = VisualSettings::default();

        for _ in 0..200 {
            let report = visualizer.tick(&mut source, &clock, &settings, 8);
            assert!(!report.beat);
            assert_eq!(report.energy, 100.0);
            assert!(report.output.bars.iter().all(|b| b.scale == 100.0 / 64.0));
            clock.advance(16.7);
        }
    }

    #[test]
    fn test_spike_boosts_bars_on_beat_frame() {
        let mut frames = vec![vec![10u8; 4]; 60];
        frames.push(vec![64u8; 4]);
        frames.push(vec![10u8; 4]);

        let mut source = ScriptedSource::new(4, frames);
        let mut visualizer = Visualizer::new(4, BeatConfig::default()).unwrap();
        let clock = ManualClock::new(1000.0);
        let settings = VisualSettings {
            beat_scale: 2.0,
            ..Default::default()
        };

        for _ in 0..60 {
            assert!(!visualizer.tick(&mut source, &clock, &settings, 4).beat);
            clock.advance(16.0);
        }

        let report = visualizer.tick(&mut source, &clock, &settings, 4);
        assert!(report.beat);
        assert!(report.output.bars.iter().all(|b| b.scale == 2.0));

        clock.advance(16.0);
        let report = visualizer.tick(&mut source, &clock, &settings, 4);
        assert!(!report.beat);
        assert_eq!(report.output.rotation_delta, ROTATION_STEP_RAD);
    }

    #[test]
    fn test_more_bars_than_bins() {
        let mut source = ScriptedSource::new(2, vec![vec![128, 128]]);
        let mut visualizer = Visualizer::new(2, BeatConfig::default()).unwrap();
        let clock = ManualClock::new(0.0);
        let settings = VisualSettings::default();

        let report = visualizer.tick(&mut source, &clock, &settings, 16);
        assert_eq!(report.output.bars.len(), 16);
        assert_eq!(report.output.bars[0].scale, 2.0);
        assert_eq!(report.output.bars[15].scale, 0.0);
    }

    #[test]
    fn test_colour_time_base_is_clock_seconds() {
        let mut source = ScriptedSource::new(4, vec![vec![0; 4]]);
        let mut visualizer = Visualizer::new(4, BeatConfig::default()).unwrap();
        // 25 s * 0.01 = 0.25 hue offset
        let clock = ManualClock::new(25_000.0);
        let settings = VisualSettings::default();

        let report = visualizer.tick(&mut source, &clock, &settings, 4);
        let hue = report.output.bars[0].hue.unwrap();
        assert!((hue - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_zero_bars_is_empty_frame() {
        let mut source = ScriptedSource::new(4, vec![vec![200; 4]]);
        let mut visualizer = Visualizer::new(4, BeatConfig::default()).unwrap();
        let clock = ManualClock::new(0.0);
        let report = visualizer.tick(&mut source, &clock, &VisualSettings::default(), 0);
        assert!(report.output.bars.is_empty());
    }

    #[test]
    fn test_invalid_beat_config_rejected() {
        let config = BeatConfig {
            history_len: 0,
            ..Default::default()
        };
        assert!(Visualizer::new(4, config).is_err());
    }
}
