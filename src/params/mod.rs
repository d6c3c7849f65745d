//! Parameter definitions with units and documented semantics.
//!
//! All magic numbers are extracted here with:
//! - Units (milliseconds, radians, world units, etc.)
//! - Documented ranges and meanings
//! - A `validate()` per struct

mod audio;
mod render;
mod visual;

// Re-export all types
pub use audio::{AnalyserConfig, BeatConfig};
pub use render::RenderConfig;
pub use visual::{VisualSettings, BAR_COUNT_RANGE, BEAT_SCALE_RANGE, COLOR_SPEED_RANGE};
