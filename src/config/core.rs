use crate::config::{ChunkSysConfig, GameplayConfig, PhysicsConfig, WorldGenConfig};
use crate::utils::error::ConfigError;
use crate::world::chunk::ChunkSize;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub worldgen: WorldGenConfig,
    pub chunks: ChunkSysConfig,
    pub physics: PhysicsConfig,
    pub gameplay: GameplayConfig,
}

impl EngineConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Missing sections and fields fall back to their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ChunkSize::new(self.chunks.chunk_width, self.chunks.chunk_height)?;
        self.chunks.validate()?;
        self.worldgen.validate()?;
        self.physics.validate()?;
        self.gameplay.validate()
    }
}
