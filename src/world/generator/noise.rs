use super::rng::SeededRng;
use noise::{NoiseFn, Simplex};

/// 2D simplex channel driving column heights.
#[derive(Debug, Clone)]
pub struct HeightChannel {
    simplex: Simplex,
}

impl HeightChannel {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
        }
    }

    /// Sample in `[-1, 1]` at world-space `(x, z)`, already divided by the scale.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        self.simplex.get([x, z]).clamp(-1.0, 1.0)
    }
}

/// 3D simplex channel deciding where one resource type appears.
#[derive(Debug, Clone)]
pub struct ResourceChannel {
    simplex: Simplex,
}

impl ResourceChannel {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
        }
    }

    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z]).clamp(-1.0, 1.0)
    }
}

#[derive(Debug, Clone)]
pub struct NoiseChannels {
    pub resources: Vec<ResourceChannel>,
    pub height: HeightChannel,
}

impl NoiseChannels {
    /// Resource channels are seeded first, in resource order, then the height channel.
    pub fn new(rng: &mut SeededRng, resource_count: usize) -> Self {
        let resources = (0..resource_count)
            .map(|_| ResourceChannel::new(rng.next_u32()))
            .collect();
        let height = HeightChannel::new(rng.next_u32());
        Self { resources, height }
    }

    pub fn from_seed(seed: u64, resource_count: usize) -> Self {
        Self::new(&mut SeededRng::new(seed), resource_count)
    }
}
