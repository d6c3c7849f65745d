//! Command-line argument parsing.

use clap::Parser;
use std::path::PathBuf;

use crate::error::ConfigError;
use crate::params::VisualSettings;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "spectrobars")]
#[command(about = "Audio-reactive 3D bar visualizer", long_about = None)]
pub struct Args {
    /// Number of bars (16-256)
    #[arg(long, value_name = "COUNT", default_value_t = 64)]
    pub bars: usize,

    /// Gap between bars (world units)
    #[arg(long, value_name = "UNITS", default_value_t = 0.3)]
    pub spacing: f32,

    /// Hue cycles per second of the colour gradient (0.001-0.1)
    #[arg(long, value_name = "SPEED", default_value_t = 0.01)]
    pub color_speed: f32,

    /// Height multiplier on beat frames (1-3)
    #[arg(long, value_name = "FACTOR", default_value_t = 1.5)]
    pub beat_scale: f32,

    /// Keep bars in a single colour instead of the scrolling gradient
    #[arg(long)]
    pub no_gradient: bool,

    /// Disable scene rotation
    #[arg(long)]
    pub no_rotation: bool,

    /// Visualize a WAV file instead of the microphone
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Name of the audio input device (default: system default input)
    #[arg(long, value_name = "NAME", conflicts_with = "input")]
    pub device: Option<String>,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Initial visual settings from the command line
    pub fn visual_settings(&self) -> Result<VisualSettings, ConfigError> {
        let settings = VisualSettings {
            bar_count: self.bars,
            bar_spacing: self.spacing,
            color_speed: self.color_speed,
            beat_scale: self.beat_scale,
            gradient: !self.no_gradient,
            rotation: !self.no_rotation,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_visual_settings() {
        let args = Args::parse_from(["spectrobars"]);
        assert_eq!(args.visual_settings().unwrap(), VisualSettings::default());
        assert!(args.input.is_none());
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_flags_override_settings() {
        let args = Args::parse_from([
            "spectrobars",
            "--bars",
            "128",
            "--beat-scale",
            "2",
            "--no-gradient",
            "--no-rotation",
        ]);
        let settings = args.visual_settings().unwrap();
        assert_eq!(settings.bar_count, 128);
        assert_eq!(settings.beat_scale, 2.0);
        assert!(!settings.gradient);
        assert!(!settings.rotation);
    }

    #[test]
    fn test_out_of_range_bars_rejected() {
        let args = Args::parse_from(["spectrobars", "--bars", "4"]);
        assert!(args.visual_settings().is_err());
    }

    #[test]
    fn test_input_conflicts_with_device() {
        let result =
            Args::try_parse_from(["spectrobars", "--input", "a.wav", "--device", "mic"]);
        assert!(result.is_err());
    }
}
