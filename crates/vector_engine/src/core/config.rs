//! # Engine Configuration
//!
//! One serializable tree for the physics loop, the asset root and logging.
//! Every section has defaults, so a config file only needs the values it
//! changes.
//!
//! ```toml
//! [physics]
//! gravity_scale_factor = 0.5
//!
//! [assets]
//! root = "game/assets"
//! ```

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::config::{Config, ConfigError};

/// Physics loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Multiplier applied to standard gravity (9.81)
    pub gravity_scale_factor: f32,
    /// Fixed simulation step in seconds
    pub fixed_timestep: f32,
    /// Upper bound on fixed steps run for one wall-clock frame
    pub max_steps_per_frame: u32,
    /// Stop at the first matching collision handler instead of firing all
    /// matching handlers
    pub short_circuit_handlers: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity_scale_factor: 1.0,
            fixed_timestep: 1.0 / 60.0,
            max_steps_per_frame: 5,
            short_circuit_handlers: false,
        }
    }
}

/// Asset lookup settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory containing `shaders/`, `textures/`, `meshes/` and `sounds/`
    pub root: PathBuf,
    /// Texture used when a requested texture cannot be loaded
    pub default_texture: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            default_texture: "white1x1.bmp".to_string(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level; `RUST_LOG` overrides it
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Top-level engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Physics loop settings
    pub physics: PhysicsConfig,
    /// Asset lookup settings
    pub assets: AssetConfig,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Builder pattern: set the gravity scale factor
    pub fn with_gravity_scale(mut self, factor: f32) -> Self {
        self.physics.gravity_scale_factor = factor;
        self
    }

    /// Builder pattern: set the asset root directory
    pub fn with_asset_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.assets.root = root.into();
        self
    }

    /// Check values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;
        if !physics.gravity_scale_factor.is_finite() || physics.gravity_scale_factor < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "gravity_scale_factor must be finite and non-negative, got {}",
                physics.gravity_scale_factor
            )));
        }
        if !physics.fixed_timestep.is_finite() || physics.fixed_timestep <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fixed_timestep must be positive, got {}",
                physics.fixed_timestep
            )));
        }
        if self.assets.default_texture.is_empty() {
            return Err(ConfigError::Invalid("default_texture must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.physics.gravity_scale_factor, 1.0);
        assert!(!config.physics.short_circuit_handlers);
        assert_eq!(config.assets.default_texture, "white1x1.bmp");
    }

    #[test]
    fn test_validation_rejects_bad_physics() {
        let config = EngineConfig::default().with_gravity_scale(-1.0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = EngineConfig::default();
        config.physics.fixed_timestep = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[physics]\ngravity_scale_factor = 0.5\n").unwrap();

        let config = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(config.physics.gravity_scale_factor, 0.5);
        assert_eq!(config.physics.max_steps_per_frame, 5);
        assert_eq!(config.assets, AssetConfig::default());
    }

    #[test]
    fn test_save_and_load_ron() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.ron");
        let config = EngineConfig::default().with_asset_root("game/assets");

        config.save_to_file(&path).unwrap();
        let loaded = EngineConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("engine.json");
        std::fs::write(&path, "{}").unwrap();

        assert!(matches!(
            EngineConfig::load_from_file(&path),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
