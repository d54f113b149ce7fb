//! Editor configuration for cadence-seq
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/cadence/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use cadence_core::{DEFAULT_STEP_COUNT, MAX_STEPS};
use cadence_widgets::GridConfig;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Pattern settings applied at startup
    pub pattern: PatternConfig,
    /// Grid display and gesture tuning
    pub display: DisplayConfig,
}

impl Default for SeqConfig {
    fn default() -> Self {
        Self {
            pattern: PatternConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

/// Pattern configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Steps in the pattern at startup (1..=MAX_STEPS)
    pub step_count: usize,
    /// Tempo in BPM
    pub tempo_bpm: f64,
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            step_count: DEFAULT_STEP_COUNT,
            tempo_bpm: 120.0,
        }
    }
}

impl PatternConfig {
    /// Step count clamped to the model's valid range
    pub fn clamped_step_count(&self) -> usize {
        self.step_count.clamp(1, MAX_STEPS)
    }
}

/// Display configuration section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Fixed column width per step in pixels
    pub step_width: f32,
    /// Height of the step cell row
    pub row_height: f32,
    /// Vertical drag sensitivity: pixels per parameter unit
    pub drag_pixels_per_unit: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let grid = GridConfig::default();
        Self {
            step_width: grid.step_width,
            row_height: grid.row_height,
            drag_pixels_per_unit: grid.drag_pixels_per_unit,
        }
    }
}

impl DisplayConfig {
    /// Build the injected grid configuration from the tuned values
    pub fn grid_config(&self) -> GridConfig {
        GridConfig {
            step_width: self.step_width,
            row_height: self.row_height,
            drag_pixels_per_unit: self.drag_pixels_per_unit,
            ..GridConfig::default()
        }
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/cadence/config.yaml
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("cadence")
        .join("config.yaml")
}

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
pub fn load_config(path: &Path) -> SeqConfig {
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return SeqConfig::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match serde_yaml::from_str::<SeqConfig>(&contents) {
            Ok(config) => {
                log::info!(
                    "load_config: Loaded config - {} steps at {:.1} BPM",
                    config.pattern.step_count,
                    config.pattern.tempo_bpm
                );
                config
            }
            Err(e) => {
                log::warn!("load_config: Failed to parse config: {}, using defaults", e);
                SeqConfig::default()
            }
        },
        Err(e) => {
            log::warn!(
                "load_config: Failed to read config file: {}, using defaults",
                e
            );
            SeqConfig::default()
        }
    }
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &SeqConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SeqConfig::default();
        assert_eq!(config.pattern.step_count, DEFAULT_STEP_COUNT);
        assert_eq!(config.pattern.tempo_bpm, 120.0);
        assert_eq!(config.display.step_width, GridConfig::default().step_width);
    }

    #[test]
    fn test_step_count_clamping() {
        let pattern = PatternConfig {
            step_count: 0,
            tempo_bpm: 120.0,
        };
        assert_eq!(pattern.clamped_step_count(), 1);

        let pattern = PatternConfig {
            step_count: 10_000,
            tempo_bpm: 120.0,
        };
        assert_eq!(pattern.clamped_step_count(), MAX_STEPS);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = SeqConfig {
            pattern: PatternConfig {
                step_count: 32,
                tempo_bpm: 140.0,
            },
            display: DisplayConfig {
                step_width: 48.0,
                row_height: 96.0,
                drag_pixels_per_unit: 6.0,
            },
        };

        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: SeqConfig = serde_yaml::from_str(&yaml).unwrap();

        assert_eq!(parsed.pattern.step_count, 32);
        assert_eq!(parsed.pattern.tempo_bpm, 140.0);
        assert_eq!(parsed.display.step_width, 48.0);
        assert_eq!(parsed.display.drag_pixels_per_unit, 6.0);
    }

    #[test]
    fn test_grid_config_carries_tuning() {
        let display = DisplayConfig {
            step_width: 40.0,
            row_height: 80.0,
            drag_pixels_per_unit: 4.0,
        };
        let grid = display.grid_config();
        assert_eq!(grid.step_width, 40.0);
        assert_eq!(grid.row_height, 80.0);
        assert_eq!(grid.drag_pixels_per_unit, 4.0);
        // Untuned fields keep their defaults
        assert_eq!(grid.click_slop, GridConfig::default().click_slop);
    }
}
