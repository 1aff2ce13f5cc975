pub mod collision;
pub mod handler;

pub use collision::{Contact, ContactKind};
pub use handler::{PhysicsHandler, StepDebug};
