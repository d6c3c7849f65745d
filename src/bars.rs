//! Bar collection applied by the renderer.
//!
//! Holds the layout and the last applied visual state of every bar, plus the
//! accumulated scene rotation, and flattens them into GPU instance data.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use tracing::debug;

use crate::mapper::{FrameOutput, Rgb};
use crate::params::VisualSettings;

/// Per-instance data for the bar shader (model matrix + linear colour)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct BarInstance {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

/// One unit cube in the row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    /// Centre along X (world units)
    pub x: f32,
    /// Vertical scale (cube is centred, so it grows up and down)
    pub scale_y: f32,
    /// sRGB colour
    pub color: Rgb,
}

/// Row of bars centred on the origin
#[derive(Debug, Clone)]
pub struct BarField {
    bars: Vec<Bar>,
    rotation_y: f32,
    base_color: Rgb,
}

impl BarField {
    pub fn new(settings: &VisualSettings, base_color: Rgb) -> Self {
        let mut field = Self {
            bars: Vec::new(),
            rotation_y: 0.0,
            base_color,
        };
        field.rebuild(settings);
        field
    }

    /// Recreate all bars for the current count and spacing
    ///
    /// New bars start at unit height in the base colour. Scene rotation is
    /// preserved.
    pub fn rebuild(&mut self, settings: &VisualSettings) {
        let count = settings.bar_count;
        self.bars = (0..count)
            .map(|i| Bar {
                x: bar_x(i, count, settings.bar_spacing),
                scale_y: 1.0,
                color: self.base_color,
            })
            .collect();
        debug!(bars = count, spacing = settings.bar_spacing, "rebuilt bars");
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation_y
    }

    /// Apply one frame's targets
    ///
    /// Bars without a colour in `output` keep their previous colour. Extra
    /// entries (from a frame mapped before a rebuild) are ignored.
    pub fn apply(&mut self, output: &FrameOutput) {
        for (bar, visual) in self.bars.iter_mut().zip(output.bars.iter()) {
            bar.scale_y = visual.scale;
            if let Some(color) = visual.color() {
                bar.color = color;
            }
        }
        self.rotation_y += output.rotation_delta;
    }

    /// Instance data for every bar, scene rotation applied
    pub fn instances(&self) -> Vec<BarInstance> {
        let scene = Mat4::from_rotation_y(self.rotation_y);
        self.bars
            .iter()
            .map(|bar| {
                let model = scene
                    * Mat4::from_scale_rotation_translation(
                        Vec3::new(1.0, bar.scale_y, 1.0),
                        Quat::IDENTITY,
                        Vec3::new(bar.x, 0.0, 0.0),
                    );
                let [r, g, b] = bar.color;
                BarInstance {
                    model: model.to_cols_array_2d(),
                    color: [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), 1.0],
                }
            })
            .collect()
    }
}

/// X centre of bar `index` in a row of `count` unit-width bars
pub fn bar_x(index: usize, count: usize, spacing: f32) -> f32 {
    (index as f32 - count as f32 / 2.0) * (1.0 + spacing)
}

/// sRGB transfer function inverse (surface formats are sRGB)
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
