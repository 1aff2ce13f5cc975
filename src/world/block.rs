use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const EMPTY: BlockId = BlockId(0);
    pub const GRASS: BlockId = BlockId(1);
    pub const DIRT: BlockId = BlockId(2);
    pub const STONE: BlockId = BlockId(3);
    pub const COAL_ORE: BlockId = BlockId(4);
    pub const IRON_ORE: BlockId = BlockId(5);

    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }
}

/// Index of a voxel inside its block type's instance batch.
///
/// Assigned during instance export for the renderer; the core never reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceHandle(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voxel {
    pub id: BlockId,
    pub instance: Option<InstanceHandle>,
}

impl Voxel {
    pub const EMPTY: Voxel = Voxel {
        id: BlockId::EMPTY,
        instance: None,
    };

    pub fn new(id: BlockId) -> Self {
        Self { id, instance: None }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

impl Default for Voxel {
    fn default() -> Self {
        Self::EMPTY
    }
}
