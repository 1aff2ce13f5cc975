use crate::config::{ChunkSysConfig, EngineConfig, WorldGenConfig};
use crate::utils::error::{ConfigError, WorldError};
use crate::world::block::{BlockId, Voxel};
use crate::world::chunk::{Chunk, ChunkSize, ChunkState};
use crate::world::chunk_coord::{BlockPos, ChunkCoord};
use crate::world::instances::{HeadlessSink, InstanceSink};
use glam::Vec3;
use rayon::prelude::*;
use std::collections::HashMap;

/// Read access to voxels by world block coordinate.
pub trait BlockSource {
    fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel>;

    fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).map_or(false, |voxel| !voxel.is_empty())
    }
}

/// Registry of loaded chunks keyed by chunk coordinate.
///
/// The world owns the renderer sink so every chunk it discards is disposed
/// against the same sink it was uploaded to.
pub struct World<S: InstanceSink = HeadlessSink> {
    config: ChunkSysConfig,
    size: ChunkSize,
    params: WorldGenConfig,
    chunks: HashMap<ChunkCoord, Chunk>,
    sink: S,
}

impl World<HeadlessSink> {
    pub fn new(config: &EngineConfig) -> Result<Self, ConfigError> {
        Self::with_sink(config, HeadlessSink::new())
    }
}

impl<S: InstanceSink> World<S> {
    pub fn with_sink(config: &EngineConfig, sink: S) -> Result<Self, ConfigError> {
        let size = ChunkSize::new(config.chunks.chunk_width, config.chunks.chunk_height)?;
        config.chunks.validate()?;
        config.worldgen.validate()?;

        Ok(Self {
            config: config.chunks.clone(),
            size,
            params: config.worldgen.clone(),
            chunks: HashMap::new(),
            sink,
        })
    }

    /// Discards every loaded chunk and builds the neighbourhood around the
    /// origin chunk from `params` with `seed` applied.
    ///
    /// Parameters are validated before anything is touched, so on error the
    /// previous world stays loaded.
    pub fn generate(&mut self, seed: u64, params: WorldGenConfig) -> Result<(), ConfigError> {
        let params = params.with_seed(seed);
        params.validate()?;

        let disposed = self.dispose_all();
        if disposed > 0 {
            log::debug!("Disposed {} chunks before regeneration", disposed);
        }

        let coords = ChunkCoord::square(ChunkCoord::new(0, 0), self.config.neighborhood_radius);
        let size = self.size;
        let build = |coord: &ChunkCoord| -> Result<Chunk, ConfigError> {
            let mut chunk = Chunk::new(*coord, size);
            chunk.generate(&params)?;
            Ok(chunk)
        };

        // Chunks only become visible once the whole neighbourhood is built.
        let built: Vec<Chunk> = if self.config.parallel_generation {
            coords.par_iter().map(build).collect::<Result<_, _>>()?
        } else {
            coords.iter().map(build).collect::<Result<_, _>>()?
        };

        for mut chunk in built {
            chunk.upload_instances(&mut self.sink);
            self.chunks.insert(chunk.coord, chunk);
        }

        log::info!(
            "Generated {} chunks ({}x{}) with seed {}",
            self.chunks.len(),
            size.width,
            size.height,
            seed
        );
        self.params = params;
        Ok(())
    }

    pub fn world_to_chunk_coords(&self, x: i32, y: i32, z: i32) -> BlockPos {
        BlockPos::from_world(x, y, z, self.size.width)
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        let pos = self.world_to_chunk_coords(x, y, z);
        self.chunks
            .get(&pos.chunk)?
            .get_block(pos.block.x, pos.block.y, pos.block.z)
            .copied()
    }

    /// Replaces a block and refreshes the chunk's instance batches. Returns the
    /// previous block id.
    pub fn set_block(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> Result<BlockId, WorldError> {
        let pos = self.world_to_chunk_coords(x, y, z);
        let chunk = self
            .chunks
            .get_mut(&pos.chunk)
            .ok_or(WorldError::ChunkNotLoaded(pos.chunk))?;

        let previous = chunk
            .get_block(pos.block.x, pos.block.y, pos.block.z)
            .map(|voxel| voxel.id)
            .ok_or(WorldError::OutOfBounds { x, y, z })?;
        chunk.set_block_id(pos.block.x, pos.block.y, pos.block.z, id);

        if chunk.has_live_instances() {
            chunk.generate_instances();
            chunk.upload_instances(&mut self.sink);
        }
        Ok(previous)
    }

    /// Adds a chunk, disposing any chunk it displaces. A chunk with exported
    /// instances is uploaded to the sink.
    pub fn insert_chunk(&mut self, mut chunk: Chunk) -> Result<(), WorldError> {
        if chunk.size() != self.size {
            return Err(WorldError::Config(ConfigError::InvalidChunkSize {
                width: chunk.size().width,
                height: chunk.size().height,
            }));
        }

        if chunk.state() == ChunkState::MeshDataReady && !chunk.has_live_instances() {
            chunk.upload_instances(&mut self.sink);
        }
        if let Some(mut displaced) = self.chunks.insert(chunk.coord, chunk) {
            displaced.dispose_instances(&mut self.sink);
        }
        Ok(())
    }

    /// Removes a chunk after releasing its instances.
    pub fn remove_chunk(&mut self, coord: ChunkCoord) -> Option<Chunk> {
        let mut chunk = self.chunks.remove(&coord)?;
        chunk.dispose_instances(&mut self.sink);
        Some(chunk)
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    /// Loaded chunk coordinates in ascending order.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let mut coords: Vec<ChunkCoord> = self.chunks.keys().copied().collect();
        coords.sort();
        coords
    }

    /// Chunks within the draw distance of the chunk containing `position`.
    pub fn visible_chunks(&self, position: Vec3) -> Vec<ChunkCoord> {
        let center = ChunkCoord::from_world_pos(position.x, position.z, self.size.width);
        ChunkCoord::square(center, self.config.draw_distance)
    }

    /// Highest solid block of the world column, if its chunk is loaded.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        let pos = self.world_to_chunk_coords(x, 0, z);
        self.chunks
            .get(&pos.chunk)?
            .surface_height(pos.block.x, pos.block.z)
    }

    pub fn size(&self) -> ChunkSize {
        self.size
    }

    pub fn params(&self) -> &WorldGenConfig {
        &self.params
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn dispose_all(&mut self) -> usize {
        let count = self.chunks.len();
        for (_, mut chunk) in self.chunks.drain() {
            chunk.dispose_instances(&mut self.sink);
        }
        count
    }
}

impl<S: InstanceSink> BlockSource for World<S> {
    fn get_block(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        World::<S>::get_block(self, x, y, z)
    }
}

impl<S: InstanceSink> Drop for World<S> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::instances::{BatchHandle, InstanceBatch};

    fn small_config() -> EngineConfig {
        let mut config = EngineConfig::default();
        config.chunks.chunk_width = 16;
        config.chunks.chunk_height = 16;
        config
    }

    fn generated_world(seed: u64) -> World {
        let config = small_config();
        let mut world = World::new(&config).unwrap();
        world.generate(seed, config.worldgen.clone()).unwrap();
        world
    }

    #[derive(Default)]
    struct CountingSink {
        next: u64,
        uploads: usize,
        releases: Vec<BatchHandle>,
    }

    impl InstanceSink for CountingSink {
        fn upload(&mut self, _coord: ChunkCoord, _batch: &InstanceBatch) -> BatchHandle {
            self.next += 1;
            self.uploads += 1;
            BatchHandle(self.next)
        }

        fn release(&mut self, _coord: ChunkCoord, handle: BatchHandle) {
            self.releases.push(handle);
        }
    }

    #[test]
    fn test_generate_builds_neighbourhood() {
        let world = generated_world(0);
        assert_eq!(world.chunk_coords(), ChunkCoord::square(ChunkCoord::new(0, 0), 1));
        assert!(world.get_block(0, 0, 0).is_some());
        assert!(world.get_block(-16, 0, -16).is_some());
        assert!(world.get_block(31, 15, 31).is_some());
    }

    #[test]
    fn test_absent_blocks_are_none() {
        let world = generated_world(0);
        assert!(world.get_block(32, 0, 0).is_none());
        assert!(world.get_block(-17, 0, 0).is_none());
        assert!(world.get_block(0, 16, 0).is_none());
        assert!(world.get_block(0, -1, 0).is_none());
        assert!(world.get_block(i32::MIN, i32::MAX, i32::MIN).is_none());
    }

    #[test]
    fn test_extreme_coordinates_with_uneven_width() {
        let mut config = small_config();
        config.chunks.chunk_width = 30;
        let mut world = World::new(&config).unwrap();
        world.generate(0, config.worldgen.clone()).unwrap();

        for (x, z) in [(i32::MIN, 0), (0, i32::MIN), (i32::MAX, i32::MAX), (i32::MIN, i32::MAX)] {
            assert!(world.get_block(x, 0, z).is_none());
            assert!(world.surface_height(x, z).is_none());
            assert!(world.set_block(x, 0, z, BlockId::STONE).is_err());
        }
        assert!(world.get_block(-30, 0, 59).is_some());
        assert!(world.get_block(-31, 0, 0).is_none());
        assert!(world.visible_chunks(Vec3::new(f32::MIN, 0.0, f32::MAX)).len() <= 9);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = generated_world(12);
        let b = generated_world(12);
        for coord in a.chunk_coords() {
            assert_eq!(
                a.chunk(coord).unwrap().voxels(),
                b.chunk(coord).unwrap().voxels()
            );
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let mut config = small_config();
        let mut parallel = World::new(&config).unwrap();
        parallel.generate(5, config.worldgen.clone()).unwrap();

        config.chunks.parallel_generation = false;
        let mut sequential = World::new(&config).unwrap();
        sequential.generate(5, config.worldgen.clone()).unwrap();

        for coord in parallel.chunk_coords() {
            assert_eq!(
                parallel.chunk(coord).unwrap().voxels(),
                sequential.chunk(coord).unwrap().voxels()
            );
        }
    }

    #[test]
    fn test_regeneration_disposes_previous_chunks() {
        let config = small_config();
        let mut world = World::with_sink(&config, CountingSink::default()).unwrap();
        world.generate(1, config.worldgen.clone()).unwrap();
        let first_uploads = world.sink().uploads;
        assert!(first_uploads > 0);
        assert!(world.sink().releases.is_empty());

        world.generate(2, config.worldgen.clone()).unwrap();
        let mut released = world.sink().releases.clone();
        assert_eq!(released.len(), first_uploads);
        released.sort_by_key(|h| h.0);
        released.dedup();
        assert_eq!(released.len(), first_uploads);
        assert_eq!(world.params().seed, 2);
    }

    #[test]
    fn test_invalid_params_keep_previous_world() {
        let config = small_config();
        let mut world = generated_world(3);
        let before = world.chunk(ChunkCoord::new(0, 0)).unwrap().voxels().to_vec();
        let live = world.sink().live_batches();

        let mut params = config.worldgen.clone();
        params.resources[0].scarcity = 2.0;
        assert!(matches!(
            world.generate(4, params),
            Err(ConfigError::ScarcityOutOfRange { .. })
        ));
        assert_eq!(world.chunk(ChunkCoord::new(0, 0)).unwrap().voxels(), &before[..]);
        assert_eq!(world.sink().live_batches(), live);
        assert_eq!(world.params().seed, 3);
    }

    #[test]
    fn test_set_block() {
        let mut world = generated_world(0);
        let surface = world.surface_height(-3, 5).unwrap();
        assert_eq!(world.get_block(-3, surface, 5).unwrap().id, BlockId::GRASS);

        let previous = world.set_block(-3, surface + 1, 5, BlockId::STONE).unwrap();
        assert_eq!(previous, BlockId::EMPTY);
        assert_eq!(world.surface_height(-3, 5), Some(surface + 1));
        assert!(world.get_block(-3, surface + 1, 5).unwrap().instance.is_some());

        assert!(matches!(
            world.set_block(500, 0, 0, BlockId::STONE),
            Err(WorldError::ChunkNotLoaded(_))
        ));
        assert!(matches!(
            world.set_block(0, 99, 0, BlockId::STONE),
            Err(WorldError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_insert_and_remove_in_any_order() {
        let config = small_config();
        let mut world = World::new(&config).unwrap();
        let size = world.size();

        for coord in [ChunkCoord::new(5, 5), ChunkCoord::new(-2, 7)] {
            let mut chunk = Chunk::new(coord, size);
            chunk.generate(&config.worldgen).unwrap();
            world.insert_chunk(chunk).unwrap();
        }
        assert!(world.get_block(5 * 16, 0, 5 * 16).is_some());
        let live = world.sink().live_batches();

        let mut replacement = Chunk::new(ChunkCoord::new(5, 5), size);
        replacement.generate(&config.worldgen).unwrap();
        world.insert_chunk(replacement).unwrap();
        assert_eq!(world.sink().live_batches(), live);

        let removed = world.remove_chunk(ChunkCoord::new(-2, 7)).unwrap();
        assert!(!removed.has_live_instances());
        assert!(world.remove_chunk(ChunkCoord::new(-2, 7)).is_none());
        assert_eq!(world.chunk_coords(), vec![ChunkCoord::new(5, 5)]);

        let wrong_size = Chunk::new(ChunkCoord::new(0, 0), ChunkSize::new(8, 8).unwrap());
        assert!(world.insert_chunk(wrong_size).is_err());
    }

    #[test]
    fn test_oversized_radius_rejected() {
        let mut config = small_config();
        config.chunks.neighborhood_radius = u32::MAX;
        assert!(matches!(
            World::new(&config),
            Err(ConfigError::RadiusTooLarge { .. })
        ));
    }

    #[test]
    fn test_visible_chunks() {
        let mut config = small_config();
        config.chunks.draw_distance = 2;
        let world = World::new(&config).unwrap();
        let visible = world.visible_chunks(Vec3::new(-1.0, 10.0, 20.0));
        assert_eq!(visible.len(), 25);
        assert!(visible.contains(&ChunkCoord::new(-3, 3)));
        assert!(visible.contains(&ChunkCoord::new(1, -1)));
    }
}
