use crate::config::WorldGenConfig;
use crate::utils::error::ConfigError;
use crate::world::block::{BlockId, InstanceHandle, Voxel};
use crate::world::blocks_data;
use crate::world::chunk_coord::ChunkCoord;
use crate::world::generator::{terrain, NoiseChannels, SeededRng};
use crate::world::instances::{BatchHandle, InstanceBatch, InstanceSink};
use glam::IVec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkSize {
    pub width: u32,
    pub height: u32,
}

/// Largest accepted chunk width or height.
pub const MAX_CHUNK_DIMENSION: u32 = 1024;

impl ChunkSize {
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        let valid = |v: u32| (1..=MAX_CHUNK_DIMENSION).contains(&v);
        if !valid(width) || !valid(height) {
            return Err(ConfigError::InvalidChunkSize { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.width as usize
    }
}

/// Generation progress of a chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkState {
    Empty,
    TerrainInitialized,
    ResourcesPlaced,
    TerrainShaped,
    MeshDataReady,
}

/// Dense `width × height × width` voxel grid anchored at a chunk coordinate.
#[derive(Debug)]
pub struct Chunk {
    pub coord: ChunkCoord,
    size: ChunkSize,
    voxels: Vec<Voxel>,
    state: ChunkState,
    batches: BTreeMap<BlockId, InstanceBatch>,
    uploaded: Vec<BatchHandle>,
}

impl Chunk {
    pub fn new(coord: ChunkCoord, size: ChunkSize) -> Self {
        Self {
            coord,
            size,
            voxels: vec![Voxel::EMPTY; size.volume()],
            state: ChunkState::Empty,
            batches: BTreeMap::new(),
            uploaded: Vec::new(),
        }
    }

    /// Runs the full pipeline: reset, resources, height field, instance export.
    ///
    /// Pure in `(params, coord, size)`: two chunks generated from equal inputs hold
    /// identical voxels.
    pub fn generate(&mut self, params: &WorldGenConfig) -> Result<(), ConfigError> {
        params.validate()?;
        let layers = params.resolve_resources()?;
        let origin = self
            .world_origin()
            .ok_or(ConfigError::ChunkOutOfRange(self.coord))?;

        if !self.uploaded.is_empty() {
            log::warn!(
                "Regenerating chunk {:?} with {} batches still uploaded",
                self.coord,
                self.uploaded.len()
            );
        }

        let mut rng = SeededRng::new(params.seed);
        let channels = NoiseChannels::new(&mut rng, layers.len());

        self.initialize_terrain();
        terrain::generate_resources(self, origin, &channels, &layers);
        self.state = ChunkState::ResourcesPlaced;
        terrain::generate_terrain(self, origin, &channels.height, &params.terrain);
        self.state = ChunkState::TerrainShaped;
        self.generate_instances();

        log::debug!(
            "Generated chunk {:?} with {} solid blocks",
            self.coord,
            self.batches.values().map(InstanceBatch::len).sum::<usize>()
        );
        Ok(())
    }

    pub(crate) fn initialize_terrain(&mut self) {
        self.voxels.fill(Voxel::EMPTY);
        self.batches.clear();
        self.state = ChunkState::TerrainInitialized;
    }

    /// Groups every non-empty cell into its block type's batch and stamps the
    /// cell with its index in that batch.
    pub fn generate_instances(&mut self) {
        let mut batches: BTreeMap<BlockId, InstanceBatch> = blocks_data::solid_blocks()
            .map(|block| (block.id, InstanceBatch::new(block.id)))
            .collect();

        let w = self.size.width as usize;
        let h = self.size.height as usize;
        for x in 0..w {
            for y in 0..h {
                for z in 0..w {
                    let index = self.index(x, y, z);
                    let voxel = &mut self.voxels[index];
                    if voxel.is_empty() {
                        voxel.instance = None;
                        continue;
                    }

                    let batch = batches
                        .entry(voxel.id)
                        .or_insert_with(|| InstanceBatch::new(voxel.id));
                    voxel.instance = Some(InstanceHandle(batch.len() as u32));
                    batch
                        .positions
                        .push(IVec3::new(x as i32, y as i32, z as i32));
                }
            }
        }

        self.batches = batches;
        self.state = ChunkState::MeshDataReady;
    }

    /// World coordinate of the `(0, 0, 0)` cell, or `None` when any cell of the
    /// chunk lies outside the `i32` range.
    pub fn world_origin(&self) -> Option<IVec3> {
        let origin = self.coord.origin(self.size.width)?;
        let last = self.size.width as i32 - 1;
        origin.x.checked_add(last)?;
        origin.z.checked_add(last)?;
        Some(origin)
    }

    pub fn size(&self) -> ChunkSize {
        self.size
    }

    pub fn state(&self) -> ChunkState {
        self.state
    }

    pub fn voxels(&self) -> &[Voxel] {
        &self.voxels
    }

    pub fn instance_batches(&self) -> impl Iterator<Item = &InstanceBatch> {
        self.batches.values()
    }

    pub fn has_live_instances(&self) -> bool {
        !self.uploaded.is_empty()
    }

    /// Hands every batch to the renderer. Batches already uploaded are released first.
    pub fn upload_instances(&mut self, sink: &mut dyn InstanceSink) {
        self.release_uploaded(sink);
        for batch in self.batches.values() {
            self.uploaded.push(sink.upload(self.coord, batch));
        }
    }

    /// Releases everything the renderer holds for this chunk. Must run before the
    /// chunk is dropped; calling it again is a no-op. Returns the number of
    /// batches released.
    pub fn dispose_instances(&mut self, sink: &mut dyn InstanceSink) -> usize {
        let released = self.release_uploaded(sink);
        self.batches.clear();
        for voxel in &mut self.voxels {
            voxel.instance = None;
        }
        if self.state == ChunkState::MeshDataReady {
            self.state = ChunkState::TerrainShaped;
        }
        released
    }

    fn release_uploaded(&mut self, sink: &mut dyn InstanceSink) -> usize {
        let released = self.uploaded.len();
        for handle in self.uploaded.drain(..) {
            sink.release(self.coord, handle);
        }
        released
    }

    pub fn is_in_bounds(&self, x: i32, y: i32, z: i32) -> bool {
        let w = self.size.width as i32;
        let h = self.size.height as i32;
        (0..w).contains(&x) && (0..h).contains(&y) && (0..w).contains(&z)
    }

    pub fn get_block(&self, x: i32, y: i32, z: i32) -> Option<&Voxel> {
        if !self.is_in_bounds(x, y, z) {
            return None;
        }
        Some(&self.voxels[self.index(x as usize, y as usize, z as usize)])
    }

    /// Returns `false` when the position lies outside the chunk.
    pub fn set_block_id(&mut self, x: i32, y: i32, z: i32, id: BlockId) -> bool {
        if !self.is_in_bounds(x, y, z) {
            return false;
        }
        let index = self.index(x as usize, y as usize, z as usize);
        self.voxels[index].id = id;
        true
    }

    fn is_empty_at(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_block(x, y, z).map_or(true, Voxel::is_empty)
    }

    /// True when all six face neighbours are filled. Neighbours outside this
    /// chunk count as empty, so boundary cells are never obscured.
    pub fn is_obscured(&self, x: i32, y: i32, z: i32) -> bool {
        const NEIGHBOURS: [(i32, i32, i32); 6] = [
            (0, 1, 0),
            (0, -1, 0),
            (1, 0, 0),
            (-1, 0, 0),
            (0, 0, 1),
            (0, 0, -1),
        ];

        NEIGHBOURS
            .iter()
            .all(|(dx, dy, dz)| !self.is_empty_at(x + dx, y + dy, z + dz))
    }

    /// Highest non-empty cell of the column, if any.
    pub fn surface_height(&self, x: i32, z: i32) -> Option<i32> {
        (0..self.size.height as i32)
            .rev()
            .find(|&y| !self.is_empty_at(x, y, z))
    }

    fn index(&self, x: usize, y: usize, z: usize) -> usize {
        let w = self.size.width as usize;
        let h = self.size.height as usize;
        (x * h + y) * w + z
    }
}

impl Drop for Chunk {
    fn drop(&mut self) {
        if !self.uploaded.is_empty() {
            log::warn!(
                "Chunk {:?} dropped with {} undisposed instance batches",
                self.coord,
                self.uploaded.len()
            );
        }
    }
}
