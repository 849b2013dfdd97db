//! Domain types: bodies, their registration specs, callbacks and lookups.

pub mod body;
pub mod handler;
pub mod query;
pub mod spec;

pub use body::{Body, BodyId, BodyKind, Velocity, DEFAULT_JUMP_VELOCITY};
pub use handler::{Axis, Collision, CollisionHandler, CollisionSource};
pub use query::BodyAttr;
pub use spec::{BodySpec, VelocitySpec};
