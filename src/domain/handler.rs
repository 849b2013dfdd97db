//! Collision callbacks.
//!
//! A handler is invoked synchronously in the middle of a tick, both when its
//! body is stopped by a static body in the map and when its next rectangle
//! overlaps another body. It gets the whole world mutably, so it can change
//! velocities, toggle `active`, remove bodies or stop the loop; the rest of
//! the tick sees those changes.

use crate::simulation::World;

use super::body::BodyId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionSource {
    /// Stopped against a static body's footprint along one axis.
    Map(Axis),
    /// Next rectangle strictly overlaps another body's current rectangle.
    Overlap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collision {
    /// The body whose handler is running.
    pub this: BodyId,
    /// The body it collided with.
    pub other: BodyId,
    pub source: CollisionSource,
}

pub trait CollisionHandler {
    fn on_collide(&mut self, world: &mut World, hit: &Collision);
}

impl<F> CollisionHandler for F
where
    F: FnMut(&mut World, &Collision),
{
    fn on_collide(&mut self, world: &mut World, hit: &Collision) {
        self(world, hit)
    }
}
