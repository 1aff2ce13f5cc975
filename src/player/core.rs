use crate::config::GameplayConfig;
use crate::player::input::PlayerInput;
use crate::utils::error::ConfigError;
use glam::{Quat, Vec3};

/// Capsule agent. `position` is the top of the capsule; the collision axis is
/// centred `height / 2` below it.
#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec3,
    pub radius: f32,
    pub height: f32,
    /// Agent-local: `x` right, `y` up, `z` forward.
    pub velocity: Vec3,
    /// Rotation about +Y in radians. Zero faces -Z.
    pub yaw: f32,
    pub max_speed: f32,
    pub input: PlayerInput,
    pub on_ground: bool,
}

impl Player {
    pub fn new(config: &GameplayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            position: Vec3::from(config.spawn_point),
            radius: config.player_radius,
            height: config.player_height,
            velocity: Vec3::ZERO,
            yaw: 0.0,
            max_speed: config.max_speed,
            input: PlayerInput::default(),
            on_ground: false,
        })
    }

    fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation() * -Vec3::Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation() * Vec3::X
    }

    pub fn look(&mut self, delta_yaw: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
    }

    /// Copies the requested horizontal velocity from the input and moves along
    /// the facing. Vertical motion is left to the physics step.
    pub fn apply_input(&mut self, dt: f32) {
        let requested = self.input.local_velocity(self.max_speed);
        self.velocity.x = requested.x;
        self.velocity.z = requested.z;
        self.position += self.right() * (self.velocity.x * dt);
        self.position += self.forward() * (self.velocity.z * dt);
    }

    pub fn world_velocity(&self) -> Vec3 {
        self.right() * self.velocity.x + Vec3::Y * self.velocity.y + self.forward() * self.velocity.z
    }

    /// Adds a world-frame velocity change and stores the result back in the local frame.
    pub fn apply_world_delta_velocity(&mut self, delta: Vec3) {
        let world = self.world_velocity() + delta;
        self.velocity = Vec3::new(world.dot(self.right()), world.y, world.dot(self.forward()));
    }

    pub fn capsule_center(&self) -> Vec3 {
        self.position - Vec3::Y * (self.height / 2.0)
    }

    /// Whether `point` lies strictly inside the collision cylinder.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let offset = point - self.capsule_center();
        let r_sq = offset.x * offset.x + offset.z * offset.z;
        offset.y.abs() < self.height / 2.0 && r_sq < self.radius * self.radius
    }
}
