use glam::{IVec2, IVec3};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;

/// Column coordinate of a chunk on the horizontal chunk grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkCoord(pub IVec2);

impl Serialize for ChunkCoord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        (self.0.x, self.0.y).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChunkCoord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let (x, z) = <(i32, i32)>::deserialize(deserializer)?;
        Ok(ChunkCoord::new(x, z))
    }
}

impl PartialOrd for ChunkCoord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ChunkCoord {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.0.x.cmp(&other.0.x) {
            Ordering::Equal => self.0.y.cmp(&other.0.y),
            ord => ord,
        }
    }
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self(IVec2::new(x, z))
    }

    pub fn x(&self) -> i32 {
        self.0.x
    }

    pub fn z(&self) -> i32 {
        self.0.y
    }

    /// Chunk owning the world column `(x, z)`.
    pub fn from_world(x: i32, z: i32, width: u32) -> Self {
        let width = width as i32;
        Self::new(x.div_euclid(width), z.div_euclid(width))
    }

    /// Chunk containing a continuous world position.
    pub fn from_world_pos(x: f32, z: f32, width: u32) -> Self {
        Self::from_world(x.floor() as i32, z.floor() as i32, width)
    }

    /// World block coordinate of the chunk's `(0, 0, 0)` cell, or `None` when
    /// it falls outside the `i32` range.
    pub fn origin(&self, width: u32) -> Option<IVec3> {
        let width = i32::try_from(width).ok()?;
        Some(IVec3::new(
            self.0.x.checked_mul(width)?,
            0,
            self.0.y.checked_mul(width)?,
        ))
    }

    /// Every coordinate in the square of the given radius, x-major. Coordinates
    /// past the `i32` range are left out.
    pub fn square(center: ChunkCoord, radius: u32) -> Vec<ChunkCoord> {
        let r = i64::from(radius);
        let side = 2 * r as usize + 1;
        let mut coords = Vec::with_capacity(side * side);
        for dx in -r..=r {
            for dz in -r..=r {
                let x = i32::try_from(i64::from(center.x()) + dx);
                let z = i32::try_from(i64::from(center.z()) + dz);
                if let (Ok(x), Ok(z)) = (x, z) {
                    coords.push(Self::new(x, z));
                }
            }
        }
        coords
    }
}

/// A world block position split into its owning chunk and in-chunk offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPos {
    pub chunk: ChunkCoord,
    /// `x` and `z` lie in `[0, width)`; `y` is passed through unchanged.
    pub block: IVec3,
}

impl BlockPos {
    pub fn from_world(x: i32, y: i32, z: i32, width: u32) -> Self {
        let w = width as i32;
        Self {
            chunk: ChunkCoord::from_world(x, z, width),
            block: IVec3::new(x.rem_euclid(w), y, z.rem_euclid(w)),
        }
    }

    pub fn to_world(&self, width: u32) -> Option<IVec3> {
        let origin = self.chunk.origin(width)?;
        Some(IVec3::new(
            origin.x.checked_add(self.block.x)?,
            self.block.y,
            origin.z.checked_add(self.block.z)?,
        ))
    }
}
