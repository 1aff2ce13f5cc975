use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub player_radius: f32,
    pub player_height: f32,
    pub max_speed: f32,
    pub spawn_point: [f32; 3],
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player_radius: 0.5,
            player_height: 1.75,
            max_speed: 10.0,
            spawn_point: [32.0, 16.0, 32.0],
        }
    }
}

impl GameplayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.player_radius) || !valid(self.player_height) {
            return Err(ConfigError::InvalidCapsule {
                radius: self.player_radius,
                height: self.player_height,
            });
        }
        Ok(())
    }
}
