use crate::world::chunk_coord::ChunkCoord;
use std::io;
use thiserror::Error;

/// Rejected setup parameters. Surfaced once, before any state is replaced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Chunk dimensions must lie in 1..=1024, got {width}x{height}")]
    InvalidChunkSize { width: u32, height: u32 },

    #[error("Chunk {0:?} reaches past the world coordinate range")]
    ChunkOutOfRange(ChunkCoord),

    #[error("{name} must be at most {max}, got {value}")]
    RadiusTooLarge {
        name: &'static str,
        value: u32,
        max: u32,
    },

    #[error("Noise scale for {name} must be finite and positive, got {value}")]
    DegenerateNoiseScale { name: String, value: f64 },

    #[error("Scarcity for {name} must lie in [0, 1], got {value}")]
    ScarcityOutOfRange { name: String, value: f64 },

    #[error("Block {0} is not a registered resource")]
    UnknownResource(String),

    #[error("Invalid terrain parameter {name}: {value}")]
    InvalidTerrain { name: &'static str, value: f64 },

    #[error("Capsule dimensions must be positive, got radius {radius} and height {height}")]
    InvalidCapsule { radius: f32, height: f32 },

    #[error("Invalid physics parameter {name}: {value}")]
    InvalidPhysics { name: &'static str, value: f32 },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum WorldError {
    #[error("Chunk not loaded at {0:?}")]
    ChunkNotLoaded(ChunkCoord),

    #[error("Position ({x}, {y}, {z}) out of chunk bounds")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
