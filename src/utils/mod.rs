pub mod error;

pub use error::{ConfigError, WorldError};
