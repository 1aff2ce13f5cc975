pub mod noise;
pub mod rng;
pub mod terrain;

pub use self::noise::{HeightChannel, NoiseChannels, ResourceChannel};
pub use rng::SeededRng;
