//! Attribute lookups over the body registry.

use super::body::{Body, BodyKind};

/// Attribute/value pair used by `World::find_by` and `World::find_all_by`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyAttr<'a> {
    Name(&'a str),
    Kind(BodyKind),
    Active(bool),
    Grounded(bool),
    HasCollisionHandler(bool),
}

impl BodyAttr<'_> {
    pub fn matches(&self, body: &Body) -> bool {
        match *self {
            BodyAttr::Name(name) => body.name() == name,
            BodyAttr::Kind(kind) => body.kind() == kind,
            BodyAttr::Active(active) => body.is_active() == active,
            BodyAttr::Grounded(grounded) => body.is_grounded() == grounded,
            BodyAttr::HasCollisionHandler(has) => body.has_collision_handler() == has,
        }
    }
}
