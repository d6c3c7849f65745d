//! Keyboard controls for the live visual settings.
//!
//! | Key            | Action                          |
//! |----------------|---------------------------------|
//! | Up / Down      | bar count ±1                    |
//! | PageUp / Down  | bar count ±16                   |
//! | Right / Left   | colour speed ±0.005             |
//! | ] / [          | beat scale ±0.1                 |
//! | G              | toggle gradient colouring       |
//! | R              | toggle rotation                 |

use tracing::info;
use winit::keyboard::KeyCode;

use crate::params::VisualSettings;

const BAR_STEP_FINE: usize = 1;
const BAR_STEP_COARSE: usize = 16;
const COLOR_SPEED_STEP: f32 = 0.005;
const BEAT_SCALE_STEP: f32 = 0.1;

/// A single settings adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    AddBars(usize),
    RemoveBars(usize),
    FasterColor,
    SlowerColor,
    StrongerBeat,
    WeakerBeat,
    ToggleGradient,
    ToggleRotation,
}

impl ControlAction {
    /// Action bound to `key`, if any
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp => Some(Self::AddBars(BAR_STEP_FINE)),
            KeyCode::ArrowDown => Some(Self::RemoveBars(BAR_STEP_FINE)),
            KeyCode::PageUp => Some(Self::AddBars(BAR_STEP_COARSE)),
            KeyCode::PageDown => Some(Self::RemoveBars(BAR_STEP_COARSE)),
            KeyCode::ArrowRight => Some(Self::FasterColor),
            KeyCode::ArrowLeft => Some(Self::SlowerColor),
            KeyCode::BracketRight => Some(Self::StrongerBeat),
            KeyCode::BracketLeft => Some(Self::WeakerBeat),
            KeyCode::KeyG => Some(Self::ToggleGradient),
            KeyCode::KeyR => Some(Self::ToggleRotation),
            _ => None,
        }
    }

    /// Apply to `settings`; returns `true` when the bars must be rebuilt
    pub fn apply(self, settings: &mut VisualSettings) -> bool {
        let rebuild = match self {
            Self::AddBars(n) => settings.set_bar_count(settings.bar_count.saturating_add(n)),
            Self::RemoveBars(n) => settings.set_bar_count(settings.bar_count.saturating_sub(n)),
            Self::FasterColor => {
                settings.set_color_speed(settings.color_speed + COLOR_SPEED_STEP);
                false
            }
            Self::SlowerColor => {
                settings.set_color_speed(settings.color_speed - COLOR_SPEED_STEP);
                false
            }
            Self::StrongerBeat => {
                settings.set_beat_scale(settings.beat_scale + BEAT_SCALE_STEP);
                false
            }
            Self::WeakerBeat => {
                settings.set_beat_scale(settings.beat_scale - BEAT_SCALE_STEP);
                false
            }
            Self::ToggleGradient => {
                settings.gradient = !settings.gradient;
                false
            }
            Self::ToggleRotation => {
                settings.rotation = !settings.rotation;
                false
            }
        };

        info!(
            bar_count = settings.bar_count,
            color_speed = settings.color_speed,
            beat_scale = settings.beat_scale,
            gradient = settings.gradient,
            rotation = settings.rotation,
            "settings: {:?}",
            self
        );

        rebuild
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            ControlAction::from_key(KeyCode::ArrowUp),
            Some(ControlAction::AddBars(1))
        );
        assert_eq!(
            ControlAction::from_key(KeyCode::KeyG),
            Some(ControlAction::ToggleGradient)
        );
        assert_eq!(ControlAction::from_key(KeyCode::KeyQ), None);
    }

    #[test]
    fn test_bar_changes_request_rebuild() {
        let mut settings = VisualSettings::default();
        assert!(ControlAction::AddBars(16).apply(&mut settings));
        assert_eq!(settings.bar_count, 80);
        assert!(ControlAction::RemoveBars(1).apply(&mut settings));
        assert_eq!(settings.bar_count, 79);
    }

    #[test]
    fn test_bar_count_saturates_at_limits() {
        let mut settings = VisualSettings {
            bar_count: 16,
            ..Default::default()
        };
        assert!(!ControlAction::RemoveBars(16).apply(&mut settings));
        assert_eq!(settings.bar_count, 16);

        settings.bar_count = 250;
        assert!(ControlAction::AddBars(16).apply(&mut settings));
        assert_eq!(settings.bar_count, 256);
    }

    #[test]
    fn test_non_bar_changes_do_not_rebuild() {
        let mut settings = VisualSettings::default();

        assert!(!ControlAction::ToggleGradient.apply(&mut settings));
        assert!(!settings.gradient);
        assert!(!ControlAction::ToggleRotation.apply(&mut settings));
        assert!(!settings.rotation);

        assert!(!ControlAction::StrongerBeat.apply(&mut settings));
        assert!((settings.beat_scale - 1.6).abs() < 1e-6);

        assert!(!ControlAction::FasterColor.apply(&mut settings));
        assert!((settings.color_speed - 0.015).abs() < 1e-6);
    }

    #[test]
    fn test_weaker_beat_clamps_to_one() {
        let mut settings = VisualSettings::default();
        for _ in 0..20 {
            ControlAction::WeakerBeat.apply(&mut settings);
        }
        assert_eq!(settings.beat_scale, 1.0);
    }
}
