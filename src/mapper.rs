//! Per-frame mapping from spectrum magnitudes to bar scale, colour and
//! scene rotation.

use crate::params::VisualSettings;

/// Divides byte magnitudes (0-255) into bar heights of roughly 0-4 units
pub const SCALE_DIVISOR: f32 = 64.0;

/// Scene Y rotation added per frame while rotation is enabled (radians)
pub const ROTATION_STEP_RAD: f32 = 0.002;

/// Linear triple in 0..=1
pub type Rgb = [f32; 3];

/// Target state for one bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarVisual {
    /// Vertical scale factor (>= 0)
    pub scale: f32,

    /// Hue in [0, 1) when gradient colouring is active
    pub hue: Option<f32>,
}

impl BarVisual {
    /// Fully saturated, medium lightness colour for this bar's hue
    pub fn color(&self) -> Option<Rgb> {
        self.hue.map(|h| hsl_to_rgb(h, 1.0, 0.5))
    }
}

/// Everything the renderer needs to apply for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// One entry per bar, in bar order
    pub bars: Vec<BarVisual>,

    /// Increment to add to the scene's Y rotation (radians)
    pub rotation_delta: f32,
}

/// Map one frame of spectrum data onto `total_bars` bars
///
/// # Arguments
/// * `sample` - Byte magnitudes; bars past its end get height 0
/// * `beat` - Whether this frame was flagged as a beat
/// * `elapsed_s` - Time base for the colour cycle (seconds)
/// * `settings` - Current visual settings snapshot
/// * `total_bars` - Number of bars the renderer currently holds
pub fn map_frame(
    sample: &[u8],
    beat: bool,
    elapsed_s: f64,
    settings: &VisualSettings,
    total_bars: usize,
) -> FrameOutput {
    let bars = (0..total_bars)
        .map(|i| BarVisual {
            scale: bar_scale(sample.get(i).copied().unwrap_or(0), beat, settings.beat_scale),
            hue: if settings.gradient {
                bar_hue(i, total_bars, elapsed_s, settings.color_speed)
            } else {
                None
            },
        })
        .collect();

    let rotation_delta = if settings.rotation {
        ROTATION_STEP_RAD
    } else {
        0.0
    };

    FrameOutput {
        bars,
        rotation_delta,
    }
}

/// Bar height for a byte magnitude, boosted on beat frames
pub fn bar_scale(magnitude: u8, beat: bool, beat_scale: f32) -> f32 {
    let scale = magnitude as f32 / SCALE_DIVISOR;
    if beat {
        scale * beat_scale
    } else {
        scale
    }
}

/// Scrolling-rainbow hue for bar `index`
///
/// The bar index sets a static phase offset; time scrolls the whole band at
/// `color_speed` cycles per second. Returns `None` when there are no bars.
pub fn bar_hue(index: usize, total_bars: usize, elapsed_s: f64, color_speed: f32) -> Option<f32> {
    if total_bars == 0 {
        return None;
    }
    let phase = index as f64 / total_bars as f64 + elapsed_s * color_speed as f64;
    // Values just below 1 can round up to 1.0 in f32
    let hue = phase.rem_euclid(1.0) as f32;
    Some(if hue >= 1.0 { 0.0 } else { hue })
}

/// HSL to RGB, all components in 0..=1
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    if saturation <= 0.0 {
        return [lightness; 3];
    }

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    [
        hue_to_channel(p, q, hue + 1.0 / 3.0),
        hue_to_channel(p, q, hue),
        hue_to_channel(p, q, hue - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
