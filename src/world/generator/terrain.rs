use super::noise::{HeightChannel, NoiseChannels};
use crate::config::{ResourceLayer, TerrainParams};
use crate::world::block::BlockId;
use crate::world::chunk::Chunk;
use glam::IVec3;

/// Surface height of the world column `(wx, wz)`, clamped to `[0, chunk_height - 1]`.
///
/// Only world coordinates enter the formula, so neighbouring chunks agree on
/// every column along their shared border.
pub fn column_height(
    channel: &HeightChannel,
    terrain: &TerrainParams,
    chunk_height: u32,
    wx: i32,
    wz: i32,
) -> i32 {
    let value = channel.sample(wx as f64 / terrain.scale, wz as f64 / terrain.scale);
    let scaled = terrain.offset + terrain.magnitude * value;
    let height = (chunk_height as f64 * scaled).floor();
    height.clamp(0.0, chunk_height.saturating_sub(1) as f64) as i32
}

/// Scatters every resource layer through the chunk. Layers run in order and a
/// later layer overwrites cells an earlier one claimed.
/// `origin` is the world coordinate of the chunk's `(0, 0, 0)` cell.
pub fn generate_resources(
    chunk: &mut Chunk,
    origin: IVec3,
    channels: &NoiseChannels,
    layers: &[ResourceLayer],
) {
    let size = chunk.size();
    let w = size.width as i32;
    let h = size.height as i32;

    for (layer, channel) in layers.iter().zip(&channels.resources) {
        let [sx, sy, sz] = layer.scale;
        for x in 0..w {
            for y in 0..h {
                for z in 0..w {
                    let value = channel.sample(
                        (origin.x + x) as f64 / sx,
                        (origin.y + y) as f64 / sy,
                        (origin.z + z) as f64 / sz,
                    );
                    if value > layer.scarcity {
                        chunk.set_block_id(x, y, z, layer.id);
                    }
                }
            }
        }
    }
}

/// Fills empty cells below the surface with dirt, sets the surface cell to
/// grass, and clears everything above it, resources included.
pub fn generate_terrain(
    chunk: &mut Chunk,
    origin: IVec3,
    channel: &HeightChannel,
    terrain: &TerrainParams,
) {
    let size = chunk.size();
    let w = size.width as i32;
    let h = size.height as i32;

    for x in 0..w {
        for z in 0..w {
            let surface = column_height(channel, terrain, size.height, origin.x + x, origin.z + z);
            for y in 0..h {
                let current = chunk.get_block(x, y, z).map(|v| v.id);
                let id = match y.cmp(&surface) {
                    std::cmp::Ordering::Less => match current {
                        Some(id) if !id.is_empty() => continue,
                        _ => BlockId::DIRT,
                    },
                    std::cmp::Ordering::Equal => BlockId::GRASS,
                    std::cmp::Ordering::Greater => BlockId::EMPTY,
                };
                chunk.set_block_id(x, y, z, id);
            }
        }
    }
}
