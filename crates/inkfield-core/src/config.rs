//! Canvas configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::stroke::StrokeColor;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Inclusive range a tool size is clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeRange {
    pub min: f64,
    pub max: f64,
}

impl SizeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Defaults for the brush.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub size: f64,
    pub range: SizeRange,
    pub color: StrokeColor,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: 10.0,
            range: SizeRange::new(2.0, 60.0),
            color: StrokeColor::white(),
        }
    }
}

/// Defaults for both erasers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EraserConfig {
    pub size: f64,
    pub range: SizeRange,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            size: 20.0,
            range: SizeRange::new(4.0, 80.0),
        }
    }
}

/// Tunables for the drawing surface.
///
/// Every field has a default, so a partial JSON document is enough to
/// override a single value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Side length of the first raster, centred on the world origin.
    pub initial_size: u32,
    /// Safety margin kept around every touched point.
    pub growth_margin: u32,
    /// Extra pixels added to a side each time it has to grow.
    pub growth_quantum: u32,
    /// Largest raster side the surface will allocate.
    pub max_extent: u32,
    /// Padding around exported content.
    pub export_padding: u32,
    /// Clear color, also the ink of the pixel eraser.
    pub background: StrokeColor,
    pub brush: BrushConfig,
    pub eraser: EraserConfig,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            initial_size: 2048,
            growth_margin: 8,
            growth_quantum: 128,
            max_extent: 32768,
            export_padding: 8,
            background: StrokeColor::black(),
            brush: BrushConfig::default(),
            eraser: EraserConfig::default(),
        }
    }
}

impl CanvasConfig {
    /// Parse and validate a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Check the values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_size == 0 {
            return Err(ConfigError::Invalid("initial_size must be positive".into()));
        }
        if self.initial_size > self.max_extent {
            return Err(ConfigError::Invalid(format!(
                "initial_size {} exceeds max_extent {}",
                self.initial_size, self.max_extent
            )));
        }
        for (name, range) in [("brush", self.brush.range), ("eraser", self.eraser.range)] {
            if !(range.min >= 0.0 && range.min <= range.max) {
                return Err(ConfigError::Invalid(format!(
                    "{name} size range [{}, {}] is empty or negative",
                    range.min, range.max
                )));
            }
        }
        Ok(())
    }
}
