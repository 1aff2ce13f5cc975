use crate::config::PhysicsConfig;
use crate::physics::collision::{self, Contact, ContactKind};
use crate::player::Player;
use crate::utils::error::ConfigError;
use crate::world::BlockSource;
use glam::{IVec3, Vec3};
use std::time::Duration;

/// Broad and narrow phase output of the most recent step.
#[derive(Debug, Clone, Default)]
pub struct StepDebug {
    pub candidates: Vec<IVec3>,
    pub contacts: Vec<Contact>,
}

/// Fixed-step integrator resolving the capsule agent against solid voxels.
#[derive(Debug, Clone)]
pub struct PhysicsHandler {
    step_size: f32,
    gravity: f32,
    max_frame_delta: f32,
    accumulator: f32,
    last_step: StepDebug,
}

impl PhysicsHandler {
    pub fn new(config: &PhysicsConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            step_size: config.step_size(),
            gravity: config.gravity,
            max_frame_delta: config.max_frame_delta,
            accumulator: 0.0,
            last_step: StepDebug::default(),
        })
    }

    /// Feeds one frame into the accumulator and runs every whole step it
    /// covers. Returns the number of steps taken.
    pub fn update(&mut self, delta: Duration, player: &mut Player, world: &impl BlockSource) -> usize {
        let mut dt = delta.as_secs_f32();
        if dt > self.max_frame_delta {
            log::debug!(
                "Frame delta {:.3}s capped at {:.3}s",
                dt,
                self.max_frame_delta
            );
            dt = self.max_frame_delta;
        }
        self.accumulator += dt;

        let mut steps = 0;
        while self.accumulator >= self.step_size {
            self.step(player, world);
            self.accumulator -= self.step_size;
            steps += 1;
        }
        steps
    }

    pub fn step(&mut self, player: &mut Player, world: &impl BlockSource) {
        let dt = self.step_size;
        player.velocity.y -= self.gravity * dt;
        player.apply_input(dt);
        player.position.y += player.velocity.y * dt;
        self.detect_collisions(player, world);
    }

    pub fn detect_collisions(&mut self, player: &mut Player, world: &impl BlockSource) {
        player.on_ground = false;

        let candidates = collision::broad_phase(player, world);
        let mut contacts = collision::narrow_phase(&candidates, player);
        if !contacts.is_empty() {
            resolve_collisions(&mut contacts, player);
        }

        self.last_step = StepDebug {
            candidates,
            contacts,
        };
    }

    pub fn last_step(&self) -> &StepDebug {
        &self.last_step
    }

    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    /// Unsimulated time carried into the next update, always below one step.
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }
}

/// Applies contacts from the shallowest to the deepest. A contact is skipped
/// when an earlier correction already moved the agent clear of it.
fn resolve_collisions(contacts: &mut [Contact], player: &mut Player) {
    contacts.sort_by(|a, b| a.overlap.total_cmp(&b.overlap));

    for contact in contacts.iter() {
        if !player.contains_point(contact.point) {
            continue;
        }

        player.position += contact.normal * contact.overlap;

        let magnitude = player.world_velocity().dot(contact.normal);
        player.apply_world_delta_velocity(-contact.normal * magnitude);

        if contact.kind == ContactKind::Vertical && contact.normal.y > 0.0 {
            player.on_ground = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineConfig, GameplayConfig};
    use crate::player::MoveKey;
    use crate::world::{BlockId, Chunk, ChunkCoord, World};

    const FRAME: f32 = 1.0 / 60.0;

    fn test_player(position: Vec3) -> Player {
        let mut player = Player::new(&GameplayConfig {
            player_radius: 0.4,
            player_height: 1.0,
            ..Default::default()
        })
        .unwrap();
        player.position = position;
        player
    }

    fn test_world(solid: &[IVec3]) -> World {
        let mut config = EngineConfig::default();
        config.chunks.chunk_width = 16;
        config.chunks.chunk_height = 8;
        let mut world = World::new(&config).unwrap();

        let mut chunk = Chunk::new(ChunkCoord::new(0, 0), world.size());
        for pos in solid {
            assert!(chunk.set_block_id(pos.x, pos.y, pos.z, BlockId::STONE));
        }
        world.insert_chunk(chunk).unwrap();
        world
    }

    fn floor_world() -> World {
        let floor: Vec<IVec3> = (5..=12)
            .flat_map(|x| (5..=12).map(move |z| IVec3::new(x, 0, z)))
            .collect();
        test_world(&floor)
    }

    fn run_frames(
        physics: &mut PhysicsHandler,
        player: &mut Player,
        world: &World,
        frames: usize,
    ) {
        for _ in 0..frames {
            physics.update(Duration::from_secs_f32(FRAME), player, world);
        }
    }

    #[test]
    fn test_gravity_application() {
        let mut physics = PhysicsHandler::new(&PhysicsConfig::default()).unwrap();
        let mut player = test_player(Vec3::new(100.0, 50.0, 100.0));
        let world = test_world(&[]);

        physics.update(Duration::from_secs_f32(0.05), &mut player, &world);
        assert!(player.velocity.y < 0.0, "Player should be falling");
        assert!(player.position.y < 50.0);
        assert!(!player.on_ground);
    }

    #[test]
    fn test_delta_is_capped() {
        let mut physics = PhysicsHandler::new(&PhysicsConfig::default()).unwrap();
        let mut player = test_player(Vec3::new(100.0, 50.0, 100.0));
        let world = test_world(&[]);

        let steps = physics.update(Duration::from_secs(5), &mut player, &world);
        assert!((24..=25).contains(&steps), "took {steps} steps");
        assert!(physics.accumulator() < physics.step_size());
    }

    #[test]
    fn test_ground_collision() {
        let mut physics = PhysicsHandler::new(&PhysicsConfig::default()).unwrap();
        let mut player = test_player(Vec3::new(8.0, 2.0, 8.0));
        let world = floor_world();

        run_frames(&mut physics, &mut player, &world, 120);

        let center = player.capsule_center();
        assert!((center.y - 1.0).abs() < 0.01, "center at {}", center.y);
        assert!(player.on_ground, "Player should be on ground");
        assert!(player.velocity.y.abs() < 1e-3);

        let debug = physics.last_step();
        assert!(debug.candidates.contains(&IVec3::new(8, 0, 8)));
        assert_eq!(debug.contacts.len(), 1);
        assert_eq!(debug.contacts[0].block, IVec3::new(8, 0, 8));
    }

    #[test]
    fn test_wall_push_back() {
        let config = PhysicsConfig {
            gravity: 0.0,
            ..Default::default()
        };
        let mut physics = PhysicsHandler::new(&config).unwrap();
        let mut player = test_player(Vec3::new(0.5, 1.5, 0.0));
        player.input.handle_key(MoveKey::Right, true);
        let world = test_world(&[IVec3::new(2, 1, 0)]);

        let first_contact = (0..100).find(|_| {
            physics.step(&mut player, &world);
            !physics.last_step().contacts.is_empty()
        });
        assert!(first_contact.is_some(), "never reached the wall");
        assert_eq!(physics.last_step().contacts[0].kind, ContactKind::Horizontal);

        // The wall face sits at x = 1.5.
        for _ in 0..2 {
            let penetration = (player.position.x + player.radius - 1.5).max(0.0);
            assert!(penetration < 1e-4, "penetration {penetration}");
            assert!(player.world_velocity().x.abs() < 1e-4);
            assert!((player.position.y - 1.5).abs() < 1e-6);
            assert!(!player.on_ground);
            physics.step(&mut player, &world);
        }
    }

    #[test]
    fn test_ceiling_contact_does_not_ground() {
        let config = PhysicsConfig {
            gravity: 0.0,
            ..Default::default()
        };
        let mut physics = PhysicsHandler::new(&config).unwrap();
        let mut player = test_player(Vec3::new(0.0, 1.45, 0.0));
        player.velocity.y = 5.0;
        let world = test_world(&[IVec3::new(0, 2, 0)]);

        let first_contact = (0..100).find(|_| {
            physics.step(&mut player, &world);
            !physics.last_step().contacts.is_empty()
        });
        assert!(first_contact.is_some(), "never reached the ceiling");

        let contact = physics.last_step().contacts[0];
        assert_eq!(contact.kind, ContactKind::Vertical);
        assert_eq!(contact.normal, -Vec3::Y);
        assert!(!player.on_ground);
        assert!(player.velocity.y.abs() < 1e-4);
        // Ceiling bottom face sits at y = 1.5.
        assert!(player.position.y <= 1.5 + 1e-4);
    }

    #[test]
    fn test_skipped_floor_contact_does_not_ground() {
        let mut player = test_player(Vec3::new(0.0, 2.0, 0.0));
        let wall = Contact {
            block: IVec3::new(-1, 1, 0),
            point: Vec3::new(-0.1, 1.5, 0.0),
            normal: Vec3::X,
            overlap: 0.3,
            kind: ContactKind::Horizontal,
        };
        let floor = Contact {
            block: IVec3::new(0, 0, 0),
            point: Vec3::new(-0.35, 1.1, 0.0),
            normal: Vec3::Y,
            overlap: 0.35,
            kind: ContactKind::Vertical,
        };

        // The shallower wall correction carries the agent clear of the floor point.
        resolve_collisions(&mut [floor, wall], &mut player);
        assert!(!player.on_ground);
        assert!((player.position - Vec3::new(0.3, 2.0, 0.0)).length() < 1e-6);

        let mut player = test_player(Vec3::new(0.0, 2.0, 0.0));
        resolve_collisions(&mut [floor], &mut player);
        assert!(player.on_ground);
        assert!((player.position.y - 2.35).abs() < 1e-6);
    }

    #[test]
    fn test_open_space_has_no_contacts() {
        let mut physics = PhysicsHandler::new(&PhysicsConfig::default()).unwrap();
        let mut player = test_player(Vec3::new(8.0, 6.0, 8.0));
        let world = floor_world();

        physics.step(&mut player, &world);
        assert!(physics.last_step().contacts.is_empty());
        assert!(!player.on_ground);
    }
}
