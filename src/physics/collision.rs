use crate::player::Player;
use crate::world::BlockSource;
use glam::{IVec3, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    /// Resolved along ±Y.
    Vertical,
    /// Resolved in the XZ plane.
    Horizontal,
}

/// Penetration of one voxel into the agent's collision cylinder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub block: IVec3,
    /// Point of the block closest to the capsule axis.
    pub point: Vec3,
    /// Unit direction the agent is pushed along.
    pub normal: Vec3,
    pub overlap: f32,
    pub kind: ContactKind,
}

/// Solid cells whose unit cube may touch the agent: the horizontal extent is
/// `position ± radius`, the vertical one `position.y ± height`.
pub fn broad_phase(player: &Player, world: &impl BlockSource) -> Vec<IVec3> {
    let p = player.position;
    let min = IVec3::new(
        (p.x - player.radius).floor() as i32,
        (p.y - player.height).floor() as i32,
        (p.z - player.radius).floor() as i32,
    );
    let max = IVec3::new(
        (p.x + player.radius).ceil() as i32,
        (p.y + player.height).ceil() as i32,
        (p.z + player.radius).ceil() as i32,
    );

    let mut candidates = Vec::new();
    for x in min.x..=max.x {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                if world.is_solid(x, y, z) {
                    candidates.push(IVec3::new(x, y, z));
                }
            }
        }
    }
    candidates
}

/// Point of the unit cube centred on `block` closest to the capsule axis at
/// the capsule's mid height.
pub fn closest_point(block: IVec3, player: &Player) -> Vec3 {
    let center = block.as_vec3();
    let target = Vec3::new(
        player.position.x,
        player.capsule_center().y,
        player.position.z,
    );
    target.clamp(center - Vec3::splat(0.5), center + Vec3::splat(0.5))
}

pub fn narrow_phase(candidates: &[IVec3], player: &Player) -> Vec<Contact> {
    candidates
        .iter()
        .filter_map(|&block| contact(block, player))
        .collect()
}

fn contact(block: IVec3, player: &Player) -> Option<Contact> {
    let point = closest_point(block, player);
    if !player.contains_point(point) {
        return None;
    }

    let d = point - player.capsule_center();
    let overlap_y = player.height / 2.0 - d.y.abs();
    let overlap_xz = player.radius - (d.x * d.x + d.z * d.z).sqrt();

    // A zero offset leaves no direction to push along.
    if overlap_y < overlap_xz {
        if d.y == 0.0 {
            return None;
        }
        Some(Contact {
            block,
            point,
            normal: Vec3::new(0.0, -d.y.signum(), 0.0),
            overlap: overlap_y,
            kind: ContactKind::Vertical,
        })
    } else {
        let normal = Vec3::new(-d.x, 0.0, -d.z).try_normalize()?;
        Some(Contact {
            block,
            point,
            normal,
            overlap: overlap_xz,
            kind: ContactKind::Horizontal,
        })
    }
}
