//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level sandbox configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Height-field generation settings.
    pub terrain: TerrainConfig,
    /// Sculpting brush shape.
    pub brush: BrushConfig,
    /// Camera used to turn pointer positions into rays.
    pub camera: CameraConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Height-field generation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Grid cells per side.
    pub resolution: u32,
    /// Tiles per side. Must divide `resolution`.
    pub tiles_per_side: u32,
    /// Seed for the noise gradient table.
    pub seed: u64,
    /// Number of gradient vectors in the noise table.
    pub lookup_size: usize,
    /// Noise frequency multiplier and amplitude divisor.
    pub noise_scale: f32,
    /// Uniform scale from terrain space to world space.
    pub world_scale: f32,
}

/// One crater of a multi-stamp brush.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StampConfig {
    /// Offset from the hit point in normalized terrain units.
    pub offset: [f32; 2],
    /// Multiplier on the brush depth.
    pub depth_scale: f32,
    /// Multiplier on the brush radius.
    pub radius_scale: f32,
}

/// Sculpting brush shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BrushConfig {
    /// Depth of a unit stamp.
    pub depth: f32,
    /// Radius of a unit stamp, in normalized terrain units.
    pub radius: f32,
    /// Radius multiplier for the extra tile-collection pass.
    pub wide_radius_factor: f32,
    /// Craters applied per stroke.
    pub stamps: Vec<StampConfig>,
}

/// Camera used to turn pointer positions into rays.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Eye position in world space.
    pub eye: [f32; 3],
    /// Point the camera looks at.
    pub target: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip plane distance.
    pub near: f32,
    /// Far clip plane distance.
    pub far: f32,
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 100,
            tiles_per_side: 10,
            seed: 1230,
            lookup_size: 1024,
            noise_scale: 512.0,
            world_scale: 10.0,
        }
    }
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            offset: [0.0, 0.0],
            depth_scale: 1.0,
            radius_scale: 1.0,
        }
    }
}

impl Default for BrushConfig {
    fn default() -> Self {
        let satellite = |x: f32, y: f32| StampConfig {
            offset: [x, y],
            depth_scale: 0.6,
            radius_scale: 0.7,
        };
        Self {
            depth: 0.02,
            radius: 0.05,
            wide_radius_factor: 2.0,
            stamps: vec![
                StampConfig::default(),
                satellite(0.02, 0.0),
                satellite(-0.01, 0.017),
                satellite(-0.01, -0.017),
            ],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, -12.0, 9.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Platform config directory for the sandbox (e.g. `~/.config/loam`).
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("loam"))
        .ok_or(ConfigError::NoConfigDir)
}

// --- Load / Save / Reload ---

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
    ron::from_str(&contents).map_err(ConfigError::ParseError)
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default terrain config to {}", path.display());
            return Ok(config);
        }

        let config = read_config(&path)?;
        log::info!(
            "Loaded terrain config from {} ({}x{} cells, seed {})",
            path.display(),
            config.terrain.resolution,
            config.terrain.resolution,
            config.terrain.seed
        );
        Ok(config)
    }

    /// Write this config to `config_dir/config.ron`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), text).map_err(ConfigError::WriteError)
    }

    /// Re-read `config.ron`. Returns `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Terrain config changed on disk");
        Ok(Some(fresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("resolution: 100"));
        assert!(ron_str.contains("tiles_per_side: 10"));
        assert!(ron_str.contains("seed: 1230"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(terrain: (resolution: 60, tiles_per_side: 6))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.terrain.resolution, 60);
        assert_eq!(config.terrain.seed, 1230);
        assert_eq!(config.brush, BrushConfig::default());
    }

    #[test]
    fn test_default_brush_has_four_stamps() {
        let brush = BrushConfig::default();
        assert_eq!(brush.stamps.len(), 4);
        assert_eq!(brush.stamps[0].offset, [0.0, 0.0]);
    }

    #[test]
    fn test_custom_stamps_parse() {
        let ron_str = "(brush: (stamps: [(offset: (0.1, 0.2), depth_scale: 0.5)]))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.brush.stamps.len(), 1);
        assert_eq!(config.brush.stamps[0].offset, [0.1, 0.2]);
        assert_eq!(config.brush.stamps[0].radius_scale, 1.0);
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.resolution = 200;
        config.brush.depth = 0.05;
        config.debug.log_level = "debug".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.seed = 7;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.map(|c| c.terrain.seed), Some(7));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_reload_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::default().reload(dir.path());
        assert!(matches!(result, Err(ConfigError::ReadError(_))));
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
