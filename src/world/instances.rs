//! Renderer-facing export of chunk contents.
//!
//! A chunk produces one `InstanceBatch` per block type. Batches are handed to an
//! `InstanceSink` (the renderer) which owns whatever it allocates for them until
//! the chunk releases them again through `Chunk::dispose_instances`.

use crate::world::block::BlockId;
use crate::world::chunk_coord::ChunkCoord;
use glam::IVec3;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceBatch {
    pub block: BlockId,
    /// Chunk-local cell positions. The index of a position is its instance handle.
    pub positions: Vec<IVec3>,
}

impl InstanceBatch {
    pub fn new(block: BlockId) -> Self {
        Self {
            block,
            positions: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Opaque token a sink returns for an uploaded batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchHandle(pub u64);

pub trait InstanceSink {
    fn upload(&mut self, coord: ChunkCoord, batch: &InstanceBatch) -> BatchHandle;
    fn release(&mut self, coord: ChunkCoord, handle: BatchHandle);
}

/// Sink for running without a renderer. Only tracks what is still allocated.
#[derive(Debug, Default)]
pub struct HeadlessSink {
    next_handle: u64,
    live: HashMap<BatchHandle, ChunkCoord>,
}

impl HeadlessSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_batches(&self) -> usize {
        self.live.len()
    }
}

impl InstanceSink for HeadlessSink {
    fn upload(&mut self, coord: ChunkCoord, batch: &InstanceBatch) -> BatchHandle {
        let handle = BatchHandle(self.next_handle);
        self.next_handle += 1;
        log::trace!("Uploaded {} instances of block {:?} for chunk {:?}", batch.len(), batch.block, coord);
        self.live.insert(handle, coord);
        handle
    }

    fn release(&mut self, coord: ChunkCoord, handle: BatchHandle) {
        match self.live.remove(&handle) {
            Some(owner) if owner != coord => log::warn!(
                "Batch {:?} uploaded for chunk {:?} released by chunk {:?}",
                handle,
                owner,
                coord
            ),
            Some(_) => {}
            None => log::warn!("Released unknown batch {:?} for chunk {:?}", handle, coord),
        }
    }
}
