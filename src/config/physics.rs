use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fixed steps per second.
    pub simulation_rate: f32,
    pub gravity: f32,
    /// Longest frame delta fed into the accumulator, in seconds.
    pub max_frame_delta: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            simulation_rate: 250.0,
            gravity: 32.0,
            max_frame_delta: 0.1,
        }
    }
}

impl PhysicsConfig {
    pub fn step_size(&self) -> f32 {
        1.0 / self.simulation_rate
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.simulation_rate.is_finite() || self.simulation_rate <= 0.0 {
            return Err(ConfigError::InvalidPhysics {
                name: "simulation_rate",
                value: self.simulation_rate,
            });
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(ConfigError::InvalidPhysics {
                name: "gravity",
                value: self.gravity,
            });
        }
        if !self.max_frame_delta.is_finite() || self.max_frame_delta < self.step_size() {
            return Err(ConfigError::InvalidPhysics {
                name: "max_frame_delta",
                value: self.max_frame_delta,
            });
        }
        Ok(())
    }
}
