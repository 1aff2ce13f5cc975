// blocks_data.rs - Static block type registry

use crate::world::block::BlockId;

/// Noise profile of a block type that is scattered by the resource pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResourceProfile {
    pub scale: [f64; 3],
    pub scarcity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockType {
    pub id: BlockId,
    pub name: &'static str,
    pub resource: Option<ResourceProfile>,
}

impl BlockType {
    const fn terrain(id: BlockId, name: &'static str) -> Self {
        Self {
            id,
            name,
            resource: None,
        }
    }

    const fn resource(id: BlockId, name: &'static str, scale: f64, scarcity: f64) -> Self {
        Self {
            id,
            name,
            resource: Some(ResourceProfile {
                scale: [scale, scale, scale],
                scarcity,
            }),
        }
    }

    pub fn is_resource(&self) -> bool {
        self.resource.is_some()
    }
}

/// Every block type, in declaration order. Resource passes run in this order.
pub static BLOCKS: [BlockType; 6] = [
    BlockType::terrain(BlockId::EMPTY, "empty"),
    BlockType::terrain(BlockId::GRASS, "grass"),
    BlockType::terrain(BlockId::DIRT, "dirt"),
    BlockType::resource(BlockId::STONE, "stone", 30.0, 0.5),
    BlockType::resource(BlockId::COAL_ORE, "coal_ore", 20.0, 0.8),
    BlockType::resource(BlockId::IRON_ORE, "iron_ore", 60.0, 0.9),
];

pub fn get_by_name(name: &str) -> Option<&'static BlockType> {
    BLOCKS.iter().find(|block| block.name == name)
}

pub fn resources() -> impl Iterator<Item = &'static BlockType> {
    BLOCKS.iter().filter(|block| block.is_resource())
}

/// Block types that can appear in a generated chunk.
pub fn solid_blocks() -> impl Iterator<Item = &'static BlockType> {
    BLOCKS.iter().filter(|block| !block.id.is_empty())
}
