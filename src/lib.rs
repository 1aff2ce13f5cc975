pub mod config;
pub mod physics;
pub mod player;
pub mod utils;
pub mod world;

// Re-export commonly used types
pub use config::EngineConfig;
pub use physics::PhysicsHandler;
pub use player::{Player, PlayerInput};
pub use utils::error::{ConfigError, WorldError};
pub use world::{BlockId, BlockSource, Chunk, ChunkCoord, Voxel, World};
