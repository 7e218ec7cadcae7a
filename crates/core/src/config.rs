//! Game configuration
//!
//! Read from TOML; every key is optional:
//!
//! ```toml
//! gravity_ms = 500
//! frame_ms = 17
//! rotation_anchor = "spawn"   # or "keep"
//! seed = 42
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::types::{FRAME_MS, GRAVITY_MS};

/// Where the horizontal offset goes when the piece rotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAnchor {
    /// Reset to the spawn column on every rotation.
    #[default]
    Spawn,
    /// Keep the current column.
    Keep,
}

impl RotationAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            RotationAnchor::Spawn => "spawn",
            RotationAnchor::Keep => "keep",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Gravity period in milliseconds.
    pub gravity_ms: u32,
    /// Frame (sample/render) period in milliseconds.
    pub frame_ms: u32,
    pub rotation_anchor: RotationAnchor,
    /// Spawn RNG seed. `None` lets the caller pick one.
    pub seed: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            gravity_ms: GRAVITY_MS,
            frame_ms: FRAME_MS,
            rotation_anchor: RotationAnchor::default(),
            seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{0} must be greater than zero")]
    ZeroInterval(&'static str),
}

impl GameConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity_ms == 0 {
            return Err(ConfigError::ZeroInterval("gravity_ms"));
        }
        if self.frame_ms == 0 {
            return Err(ConfigError::ZeroInterval("frame_ms"));
        }
        Ok(())
    }
}
