//! Configuration system
//!
//! File-backed settings for the engine: motion tuning constants and the
//! editor's startup state. Files are TOML or RON, selected by extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentPreset;
use crate::gizmo::GizmoMode;

/// Configuration trait
///
/// Blanket load/save for any serde-capable settings struct. The format is
/// chosen from the file extension before any I/O happens, so an unsupported
/// path fails fast without touching the filesystem.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from a `.toml` or `.ron` file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        match extension(path) {
            Format::Toml => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Format::Ron => {
                let contents = std::fs::read_to_string(path)?;
                ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            Format::Unknown => Err(ConfigError::UnsupportedFormat(path.to_string())),
        }
    }

    /// Save configuration to a `.toml` or `.ron` file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = match extension(path) {
            Format::Toml => {
                toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
            }
            Format::Ron => ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Format::Unknown => return Err(ConfigError::UnsupportedFormat(path.to_string())),
        };
        std::fs::write(path, contents)?;
        Ok(())
    }
}

enum Format {
    Toml,
    Ron,
    Unknown,
}

fn extension(path: &str) -> Format {
    match Path::new(path).extension().and_then(|ext| ext.to_str()) {
        Some("toml") => Format::Toml,
        Some("ron") => Format::Ron,
        _ => Format::Unknown,
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// Motion tuning constants
///
/// Per-frame fields (`straight_step`, `return_step`, `spin_rate`) apply once
/// per simulation step; rate fields multiply elapsed time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationTuning {
    /// Z advance per frame per unit speed in straight mode
    pub straight_step: f32,
    /// Distance from home at which straight mode wraps around
    pub wrap_span: f32,
    /// Time multiplier for the left-right and up-down oscillations
    pub oscillation_rate: f32,
    /// Time multiplier for orbit angular progress
    pub orbit_rate: f32,
    /// Orbit radius used when an object's movement range is zero
    pub default_orbit_radius: f32,
    /// Per-axis approach factor per frame per unit speed in returning mode
    pub return_step: f32,
    /// Distance to home below which returning mode snaps and settles
    pub snap_epsilon: f32,
    /// Self-spin increment per frame, radians
    pub spin_rate: f32,
}

impl SimulationTuning {
    /// Create tuning with the stock constants
    pub fn new() -> Self {
        Self {
            straight_step: 0.02,
            wrap_span: 50.0,
            oscillation_rate: 2.0,
            orbit_rate: 0.5,
            default_orbit_radius: 5.0,
            return_step: 0.05,
            snap_epsilon: 0.01,
            spin_rate: 0.01,
        }
    }
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine startup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Motion tuning constants
    pub tuning: SimulationTuning,
    /// Environment preset applied at startup
    pub environment: EnvironmentPreset,
    /// Whether the selection gizmo starts visible
    pub gizmo_enabled: bool,
    /// Manipulation mode the gizmo starts in
    pub gizmo_mode: GizmoMode,
    /// Side length in pixels of the generated procedural texture bitmaps
    pub texture_resolution: u32,
}

impl EngineSettings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self {
            tuning: SimulationTuning::default(),
            environment: EnvironmentPreset::default(),
            gizmo_enabled: true,
            gizmo_mode: GizmoMode::default(),
            texture_resolution: 256,
        }
    }

    /// Set motion tuning
    #[must_use]
    pub fn with_tuning(mut self, tuning: SimulationTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Set the startup environment preset
    #[must_use]
    pub fn with_environment(mut self, preset: EnvironmentPreset) -> Self {
        self.environment = preset;
        self
    }

    /// Set gizmo visibility and mode
    #[must_use]
    pub fn with_gizmo(mut self, enabled: bool, mode: GizmoMode) -> Self {
        self.gizmo_enabled = enabled;
        self.gizmo_mode = mode;
        self
    }

    /// Set the procedural texture resolution
    #[must_use]
    pub fn with_texture_resolution(mut self, resolution: u32) -> Self {
        self.texture_resolution = resolution;
        self
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for EngineSettings {}
