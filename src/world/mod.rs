pub mod block;
pub mod blocks_data;
pub mod chunk;
pub mod chunk_coord;
pub mod core;
pub mod generator;
pub mod instances;

pub use self::core::{BlockSource, World};
pub use block::{BlockId, InstanceHandle, Voxel};
pub use blocks_data::{BlockType, ResourceProfile, BLOCKS};
pub use chunk::{Chunk, ChunkSize, ChunkState};
pub use chunk_coord::{BlockPos, ChunkCoord};
pub use instances::{BatchHandle, HeadlessSink, InstanceBatch, InstanceSink};
