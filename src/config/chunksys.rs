use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest accepted neighbourhood radius or draw distance, in chunks.
pub const MAX_CHUNK_RADIUS: u32 = 32;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkSysConfig {
    pub chunk_width: u32,
    pub chunk_height: u32,
    /// Chunks generated in each direction around the origin chunk.
    pub neighborhood_radius: u32,
    /// Radius used by `World::visible_chunks`. Nothing is streamed from it.
    pub draw_distance: u32,
    pub parallel_generation: bool,
}

impl Default for ChunkSysConfig {
    fn default() -> Self {
        Self {
            chunk_width: 64,
            chunk_height: 32,
            neighborhood_radius: 1,
            draw_distance: 1,
            parallel_generation: true,
        }
    }
}

impl ChunkSysConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("neighborhood_radius", self.neighborhood_radius),
            ("draw_distance", self.draw_distance),
        ] {
            if value > MAX_CHUNK_RADIUS {
                return Err(ConfigError::RadiusTooLarge {
                    name,
                    value,
                    max: MAX_CHUNK_RADIUS,
                });
            }
        }
        Ok(())
    }
}
