use glam::Vec3;

/// Movement keys of the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Backward,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

impl PlayerInput {
    pub fn handle_key(&mut self, key: MoveKey, pressed: bool) {
        match key {
            MoveKey::Forward => self.forward = pressed,
            MoveKey::Backward => self.backward = pressed,
            MoveKey::Left => self.left = pressed,
            MoveKey::Right => self.right = pressed,
        }
    }

    /// Requested agent-local velocity: `x` is right, `z` is forward, `y` is always zero.
    pub fn local_velocity(&self, max_speed: f32) -> Vec3 {
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => max_speed,
            (false, true) => -max_speed,
            _ => 0.0,
        };
        Vec3::new(
            axis(self.right, self.left),
            0.0,
            axis(self.forward, self.backward),
        )
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
