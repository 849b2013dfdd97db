//! Body - one simulated rectangle
//!
//! Animate bodies carry velocity and are moved every tick; non-animate bodies
//! are static obstacles stamped into the occupancy map when registered.

use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::core::rect::Rect;

use super::handler::CollisionHandler;

new_key_type! {
    /// Stable generational handle for a registered body.
    pub struct BodyId;
}

/// Vertical velocity used by `jump_start` when none is given.
pub const DEFAULT_JUMP_VELOCITY: i32 = -12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    #[serde(rename = "animate")]
    Animate,
    #[serde(rename = "non-animate")]
    NonAnimate,
}

/// Per-tick velocity in cells.
///
/// `ascent_floor` is the most negative vertical velocity allowed after
/// `jump_end`; `max_left` is carried but never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Velocity {
    pub left: i32,
    pub top: i32,
    pub max_left: i32,
    pub ascent_floor: i32,
}

impl Velocity {
    pub const fn new(left: i32, top: i32, max_left: i32, ascent_floor: i32) -> Self {
        Self { left, top, max_left, ascent_floor }
    }
}

pub struct Body {
    pub(crate) id: BodyId,
    pub(crate) name: String,
    pub(crate) kind: BodyKind,
    pub(crate) rect: Rect,
    pub(crate) velocity: Velocity,
    pub(crate) gravity: i32,
    pub(crate) active: bool,
    pub(crate) grounded: bool,
    pub(crate) handler: Option<Box<dyn CollisionHandler>>,
    /// Cells stamped into the occupancy map at registration (static bodies only).
    pub(crate) footprint: Option<Rect>,
}

impl Body {
    pub(crate) fn new(
        id: BodyId,
        name: String,
        kind: BodyKind,
        rect: Rect,
        velocity: Velocity,
        gravity: i32,
        active: bool,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            rect,
            velocity,
            gravity,
            active,
            grounded: false,
            handler: None,
            footprint: None,
        }
    }

    pub fn id(&self) -> BodyId { self.id }

    pub fn name(&self) -> &str { &self.name }

    pub fn kind(&self) -> BodyKind { self.kind }

    pub fn is_animate(&self) -> bool { self.kind == BodyKind::Animate }

    pub fn rect(&self) -> Rect { self.rect }

    pub fn velocity(&self) -> Velocity { self.velocity }

    pub fn velocity_mut(&mut self) -> &mut Velocity { &mut self.velocity }

    pub fn gravity(&self) -> i32 { self.gravity }

    pub fn is_active(&self) -> bool { self.active }

    /// True when the last vertical move was stopped by the map while falling.
    pub fn is_grounded(&self) -> bool { self.grounded }

    pub fn has_collision_handler(&self) -> bool { self.handler.is_some() }

    pub fn footprint(&self) -> Option<Rect> { self.footprint }

    /// Move without collision checks. Only the rendered position changes;
    /// the occupancy map is not restamped for static bodies.
    pub fn set_position(&mut self, left: i32, top: i32) {
        self.rect.left = left;
        self.rect.top = top;
    }

    /// Velocity after one tick of gravity. Pure.
    pub fn next_velocity(&self) -> Velocity {
        Velocity {
            top: self.velocity.top.saturating_add(self.gravity),
            ..self.velocity
        }
    }

    /// Rectangle after applying the committed velocity to the current position.
    pub fn next_position(&self) -> Rect {
        self.rect.translated(self.velocity.left, self.velocity.top)
    }

    /// Start a jump. Ignored while airborne.
    pub fn jump_start(&mut self, velocity: Option<i32>) {
        if self.grounded {
            self.velocity.top = velocity.unwrap_or(DEFAULT_JUMP_VELOCITY);
            self.grounded = false;
        }
    }

    /// One-shot jump for hosts that have no press/release pair.
    pub fn jump(&mut self, velocity: Option<i32>) {
        self.jump_start(velocity);
    }

    /// Cut a jump short: raise upward velocity to the ascent floor.
    pub fn jump_end(&mut self) {
        if self.velocity.top < self.velocity.ascent_floor {
            self.velocity.top = self.velocity.ascent_floor;
        }
    }

    pub fn die(&mut self) {
        self.active = false;
    }

    pub fn live(&mut self) {
        self.active = true;
    }
}

impl fmt::Debug for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Body")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("rect", &self.rect)
            .field("velocity", &self.velocity)
            .field("gravity", &self.gravity)
            .field("active", &self.active)
            .field("grounded", &self.grounded)
            .field("handler", &self.handler.is_some())
            .field("footprint", &self.footprint)
            .finish()
    }
}
