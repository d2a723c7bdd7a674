//! Environment presets
//!
//! A preset is a named bundle of background and lighting values. Switching
//! presets assigns the whole bundle in one shot; there is no blending or
//! transition between presets.

use serde::{Deserialize, Serialize};

use crate::backend::SceneBackend;
use crate::foundation::math::Color;

/// Intensity and color of one light
#[derive(Debug, Clone, PartialEq)]
pub struct LightSettings {
    /// Light intensity
    pub intensity: f32,
    /// Light color
    pub color: Color,
}

/// Resolved values for one environment preset
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSettings {
    /// Scene background color
    pub background: Color,
    /// Ambient light intensity
    pub ambient_intensity: f32,
    /// Primary directional key light
    pub key_light: LightSettings,
    /// Secondary accent point light
    pub accent_light: LightSettings,
}

/// Named environment presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EnvironmentPreset {
    /// Neutral gray backdrop with even lighting
    #[default]
    Studio,
    /// Near-dark backdrop with faint cool light
    Midnight,
    /// Dark backdrop with saturated magenta/cyan lights
    Neon,
    /// Bright warm backdrop with gentle lights
    Soft,
}

impl EnvironmentPreset {
    /// All presets in display order
    pub const ALL: [Self; 4] = [Self::Studio, Self::Midnight, Self::Neon, Self::Soft];

    /// Fixed value table for this preset
    pub fn settings(self) -> EnvironmentSettings {
        match self {
            Self::Studio => EnvironmentSettings {
                background: Color::new(0.16, 0.16, 0.18),
                ambient_intensity: 0.8,
                key_light: LightSettings {
                    intensity: 1.2,
                    color: Color::new(1.0, 1.0, 1.0),
                },
                accent_light: LightSettings {
                    intensity: 0.6,
                    color: Color::new(1.0, 0.95, 0.85),
                },
            },
            Self::Midnight => EnvironmentSettings {
                background: Color::new(0.01, 0.01, 0.05),
                ambient_intensity: 0.1,
                key_light: LightSettings {
                    intensity: 0.3,
                    color: Color::new(0.7, 0.8, 1.0),
                },
                accent_light: LightSettings {
                    intensity: 0.8,
                    color: Color::new(0.2, 0.3, 0.9),
                },
            },
            Self::Neon => EnvironmentSettings {
                background: Color::new(0.05, 0.0, 0.08),
                ambient_intensity: 0.2,
                key_light: LightSettings {
                    intensity: 0.5,
                    color: Color::new(1.0, 0.2, 0.8),
                },
                accent_light: LightSettings {
                    intensity: 1.5,
                    color: Color::new(0.1, 0.9, 1.0),
                },
            },
            Self::Soft => EnvironmentSettings {
                background: Color::new(0.94, 0.92, 0.88),
                ambient_intensity: 1.0,
                key_light: LightSettings {
                    intensity: 0.7,
                    color: Color::new(1.0, 0.98, 0.92),
                },
                accent_light: LightSettings {
                    intensity: 0.3,
                    color: Color::new(1.0, 0.85, 0.9),
                },
            },
        }
    }
}

/// Applies environment presets and remembers the active one
#[derive(Debug, Default)]
pub struct EnvironmentController {
    current: EnvironmentPreset,
}

impl EnvironmentController {
    /// Controller starting on the given preset (not yet applied)
    pub fn new(initial: EnvironmentPreset) -> Self {
        Self { current: initial }
    }

    /// Preset currently in effect
    pub fn current(&self) -> EnvironmentPreset {
        self.current
    }

    /// Switch presets and push the full bundle to the backend
    ///
    /// Re-applying the active preset pushes the same values again; that is
    /// harmless and keeps the operation a plain assignment.
    pub fn apply(&mut self, preset: EnvironmentPreset, backend: &mut impl SceneBackend) {
        self.current = preset;
        backend.apply_environment(&preset.settings());
        log::info!("environment: applied {preset:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HeadlessBackend;

    #[test]
    fn test_every_preset_has_distinct_background() {
        let mut backgrounds = Vec::new();
        for preset in EnvironmentPreset::ALL {
            let settings = preset.settings();
            assert!(
                !backgrounds.contains(&settings.background),
                "{preset:?} reuses another preset's background"
            );
            backgrounds.push(settings.background);
        }
    }

    #[test]
    fn test_lookup_is_deterministic() {
        for preset in EnvironmentPreset::ALL {
            assert_eq!(preset.settings(), preset.settings());
        }
    }

    #[test]
    fn test_apply_pushes_bundle_to_backend() {
        let mut backend = HeadlessBackend::new();
        let mut controller = EnvironmentController::default();

        controller.apply(EnvironmentPreset::Neon, &mut backend);

        assert_eq!(controller.current(), EnvironmentPreset::Neon);
        let applied = backend.environment().expect("environment should be set");
        assert_eq!(*applied, EnvironmentPreset::Neon.settings());
    }

    #[test]
    fn test_switching_presets_replaces_bundle() {
        let mut backend = HeadlessBackend::new();
        let mut controller = EnvironmentController::default();

        controller.apply(EnvironmentPreset::Midnight, &mut backend);
        controller.apply(EnvironmentPreset::Soft, &mut backend);

        let applied = backend.environment().unwrap();
        assert_eq!(*applied, EnvironmentPreset::Soft.settings());
    }
}
