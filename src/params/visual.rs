//! Live visual settings read by the frame mapper every frame.

use std::ops::RangeInclusive;

use crate::error::ConfigError;

/// Allowed number of bars
pub const BAR_COUNT_RANGE: RangeInclusive<usize> = 16..=256;

/// Allowed hue cycles per second
pub const COLOR_SPEED_RANGE: RangeInclusive<f32> = 0.001..=0.1;

/// Allowed beat-triggered scale multiplier
pub const BEAT_SCALE_RANGE: RangeInclusive<f32> = 1.0..=3.0;

/// Tunable visual parameters
///
/// Changing `bar_count` (or `bar_spacing`) requires the bar collection to be
/// rebuilt; every other field is picked up on the next frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualSettings {
    /// Number of bars in the scene
    pub bar_count: usize,

    /// Gap between adjacent unit-width bars (world units)
    pub bar_spacing: f32,

    /// Hue cycles per second of the scrolling gradient
    pub color_speed: f32,

    /// Height multiplier applied on beat frames (>= 1)
    pub beat_scale: f32,

    /// Recolour bars every frame with the scrolling rainbow
    pub gradient: bool,

    /// Spin the scene around its Y axis
    pub rotation: bool,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            bar_count: 64,
            bar_spacing: 0.3,
            color_speed: 0.01,
            beat_scale: 1.5,
            gradient: true,
            rotation: true,
        }
    }
}

impl VisualSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_range(
            "bar_count",
            self.bar_count as f64,
            *BAR_COUNT_RANGE.start() as f64,
            *BAR_COUNT_RANGE.end() as f64,
        )?;
        ConfigError::check_range(
            "color_speed",
            self.color_speed as f64,
            *COLOR_SPEED_RANGE.start() as f64,
            *COLOR_SPEED_RANGE.end() as f64,
        )?;
        ConfigError::check_range(
            "beat_scale",
            self.beat_scale as f64,
            *BEAT_SCALE_RANGE.start() as f64,
            *BEAT_SCALE_RANGE.end() as f64,
        )?;
        if !(self.bar_spacing.is_finite() && self.bar_spacing >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "bar_spacing must be a non-negative number, got {}",
                self.bar_spacing
            )));
        }
        Ok(())
    }

    /// Set bar count clamped to [`BAR_COUNT_RANGE`]
    ///
    /// Returns `true` when the value changed (bars must be rebuilt).
    pub fn set_bar_count(&mut self, count: usize) -> bool {
        let clamped = count.clamp(*BAR_COUNT_RANGE.start(), *BAR_COUNT_RANGE.end());
        let changed = clamped != self.bar_count;
        self.bar_count = clamped;
        changed
    }

    pub fn set_color_speed(&mut self, speed: f32) {
        self.color_speed = speed.clamp(*COLOR_SPEED_RANGE.start(), *COLOR_SPEED_RANGE.end());
    }

    pub fn set_beat_scale(&mut self, scale: f32) {
        self.beat_scale = scale.clamp(*BEAT_SCALE_RANGE.start(), *BEAT_SCALE_RANGE.end());
    }
}
