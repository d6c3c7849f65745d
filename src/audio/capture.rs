//! Live microphone capture.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{info, warn};

use super::analyser::ByteAnalyser;
use super::window::SampleWindow;
use super::SpectrumSource;
use crate::error::AudioError;
use crate::params::AnalyserConfig;
use crate::spectrum::FrequencySample;

/// Microphone spectrum source
///
/// The input stream callback fills a shared sample window; each frame the
/// newest `fft_size` samples are analysed on the caller's thread.
pub struct MicrophoneInput {
    /// Most recent mono samples (shared with the stream callback)
    window: Arc<Mutex<SampleWindow>>,

    analyser: ByteAnalyser,

    /// Reused time-domain buffer
    scratch: Vec<f32>,

    /// Input stream (kept alive)
    _stream: cpal::Stream,
}

impl MicrophoneInput {
    /// Open the named input device, or the host default when `None`
    pub fn open(device_name: Option<&str>, config: AnalyserConfig) -> Result<Self, AudioError> {
        let analyser = ByteAnalyser::new(config)?;

        let host = cpal::default_host();
        let device = match device_name {
            Some(name) => find_input_device(&host, name)?,
            None => host.default_input_device().ok_or(AudioError::NoInputDevice)?,
        };

        let supported = device
            .default_input_config()
            .map_err(|e| AudioError::DeviceQuery(e.to_string()))?;

        info!(
            device = %device.name().unwrap_or_else(|_| "Unknown".to_string()),
            sample_rate_hz = supported.sample_rate().0,
            channels = supported.channels(),
            format = ?supported.sample_format(),
            "audio input"
        );

        let window = Arc::new(Mutex::new(SampleWindow::new(analyser.fft_size())));
        let format = supported.sample_format();
        let stream_config: cpal::StreamConfig = supported.into();

        let stream = match format {
            SampleFormat::F32 => build_stream::<f32>(&device, &stream_config, &window)?,
            SampleFormat::I16 => build_stream::<i16>(&device, &stream_config, &window)?,
            SampleFormat::U16 => build_stream::<u16>(&device, &stream_config, &window)?,
            SampleFormat::I32 => build_stream::<i32>(&device, &stream_config, &window)?,
            SampleFormat::I8 => build_stream::<i8>(&device, &stream_config, &window)?,
            SampleFormat::U8 => build_stream::<u8>(&device, &stream_config, &window)?,
            other => return Err(AudioError::UnsupportedFormat(format!("{:?}", other))),
        };

        stream.play()?;

        Ok(Self {
            window,
            scratch: vec![0.0; analyser.fft_size()],
            analyser,
            _stream: stream,
        })
    }
}

impl SpectrumSource for MicrophoneInput {
    fn bin_count(&self) -> usize {
        self.analyser.bin_count()
    }

    fn fill(&mut self, _now_ms: f64, sample: &mut FrequencySample) {
        {
            let window = self.window.lock().unwrap_or_else(PoisonError::into_inner);
            window.copy_latest(&mut self.scratch);
        }
        self.analyser.analyse(&self.scratch, sample.bins_mut());
    }
}

fn find_input_device(host: &cpal::Host, name: &str) -> Result<cpal::Device, AudioError> {
    let devices = host
        .input_devices()
        .map_err(|e| AudioError::DeviceQuery(e.to_string()))?;

    for device in devices {
        if device.name().map(|n| n == name).unwrap_or(false) {
            return Ok(device);
        }
    }
    Err(AudioError::DeviceNotFound(name.to_string()))
}

/// Append interleaved frames, recovering the window if a holder panicked
fn push_frames(window: &Mutex<SampleWindow>, data: &[f32], channels: usize) {
    window
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push_interleaved(data, channels);
}

/// Build an input stream converting `T` samples to mono `f32`
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    window: &Arc<Mutex<SampleWindow>>,
) -> Result<cpal::Stream, AudioError>
where
    T: SizedSample,
    f32: FromSample<T>,
{
    let channels = config.channels as usize;
    let window = Arc::clone(window);
    let mut converted: Vec<f32> = Vec::new();

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            converted.clear();
            converted.extend(data.iter().map(|s| s.to_sample::<f32>()));
            push_frames(&window, &converted, channels);
        },
        |err| warn!("audio input stream error: {}", err),
        None,
    )?;

    Ok(stream)
}
