use crate::utils::error::ConfigError;
use crate::world::block::BlockId;
use crate::world::blocks_data;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainParams {
    /// Horizontal noise wavelength in blocks.
    pub scale: f64,
    pub magnitude: f64,
    pub offset: f64,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            scale: 30.0,
            magnitude: 0.5,
            offset: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceParams {
    /// Registry name of the resource block type.
    pub block: String,
    pub scale: [f64; 3],
    pub scarcity: f64,
}

/// A resource entry resolved against the block registry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceLayer {
    pub id: BlockId,
    pub scale: [f64; 3],
    pub scarcity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldGenConfig {
    pub seed: u64,
    pub terrain: TerrainParams,
    /// Applied in list order; a later entry overwrites cells claimed by an earlier one.
    pub resources: Vec<ResourceParams>,
}

impl Default for WorldGenConfig {
    fn default() -> Self {
        let resources = blocks_data::resources()
            .filter_map(|block| {
                block.resource.map(|profile| ResourceParams {
                    block: block.name.to_string(),
                    scale: profile.scale,
                    scarcity: profile.scarcity,
                })
            })
            .collect();

        Self {
            seed: 0,
            terrain: TerrainParams::default(),
            resources,
        }
    }
}

impl WorldGenConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let terrain = &self.terrain;
        if !terrain.scale.is_finite() || terrain.scale <= 0.0 {
            return Err(ConfigError::DegenerateNoiseScale {
                name: "terrain".to_string(),
                value: terrain.scale,
            });
        }
        if !terrain.magnitude.is_finite() {
            return Err(ConfigError::InvalidTerrain {
                name: "magnitude",
                value: terrain.magnitude,
            });
        }
        if !terrain.offset.is_finite() {
            return Err(ConfigError::InvalidTerrain {
                name: "offset",
                value: terrain.offset,
            });
        }

        self.resolve_resources().map(|_| ())
    }

    pub fn resolve_resources(&self) -> Result<Vec<ResourceLayer>, ConfigError> {
        self.resources
            .iter()
            .map(|params| {
                let block = blocks_data::get_by_name(&params.block)
                    .filter(|block| block.is_resource())
                    .ok_or_else(|| ConfigError::UnknownResource(params.block.clone()))?;

                if let Some(&value) = params
                    .scale
                    .iter()
                    .find(|s| !s.is_finite() || **s <= 0.0)
                {
                    return Err(ConfigError::DegenerateNoiseScale {
                        name: params.block.clone(),
                        value,
                    });
                }

                if !(0.0..=1.0).contains(&params.scarcity) {
                    return Err(ConfigError::ScarcityOutOfRange {
                        name: params.block.clone(),
                        value: params.scarcity,
                    });
                }

                Ok(ResourceLayer {
                    id: block.id,
                    scale: params.scale,
                    scarcity: params.scarcity,
                })
            })
            .collect()
    }
}
