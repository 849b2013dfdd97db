use crate::core::error::SpawnError;
use crate::domain::{Body, BodyId, BodyKind, BodySpec, CollisionHandler};

use super::World;

pub(super) fn add_body(
    world: &mut World,
    spec: &BodySpec,
    handler: Option<Box<dyn CollisionHandler>>,
) -> Result<BodyId, SpawnError> {
    let valid = spec
        .validate(world.settings.width, world.settings.height)
        .and_then(|valid| {
            if world.find_by_name(&valid.name).is_some() {
                Err(SpawnError::DuplicateName(valid.name))
            } else {
                Ok(valid)
            }
        });
    let valid = match valid {
        Ok(valid) => valid,
        Err(err) => {
            world.diagnostics.error(&format!("Error: {}. Skipping", err));
            return Err(err);
        }
    };

    let gravity = world.settings.gravity;
    let id = world.bodies.insert_with_key(|id| {
        let mut body = Body::new(id, valid.name, valid.kind, valid.rect, valid.velocity, gravity, valid.active);
        body.handler = handler;
        body
    });
    world.order.push(id);

    if valid.kind == BodyKind::NonAnimate {
        world.map.stamp(&valid.rect, id);
        if let Some(body) = world.bodies.get_mut(id) {
            body.footprint = Some(valid.rect);
        }
    }

    if let Some(body) = world.bodies.get(id) {
        world.surface.attach(id, body.name(), &body.rect);
    }
    Ok(id)
}

/// Unregister a body and give its map cells back to any static body
/// registered underneath it.
pub(super) fn remove_body(world: &mut World, id: BodyId) -> Option<Body> {
    if !world.bodies.contains_key(id) {
        return None;
    }
    world.surface.detach(id);
    let body = world.bodies.remove(id)?;
    world.order.retain(|&other| other != id);

    if let Some(footprint) = body.footprint {
        world.map.clear_owned(&footprint, id);

        let statics: Vec<(BodyId, _)> = world
            .order
            .iter()
            .filter_map(|&other| {
                let fp = world.bodies.get(other)?.footprint?;
                fp.overlaps(&footprint).then_some((other, fp))
            })
            .collect();
        // later registrations win, same as stamping order
        world.map.fill_vacant(&footprint, |x, y| {
            statics
                .iter()
                .rev()
                .find(|(_, fp)| fp.contains(x, y))
                .map(|(owner, _)| *owner)
        });
    }

    Some(body)
}

pub(super) fn set_collision_handler(
    world: &mut World,
    id: BodyId,
    handler: Option<Box<dyn CollisionHandler>>,
) -> bool {
    match world.bodies.get_mut(id) {
        Some(body) => {
            body.handler = handler;
            true
        }
        None => false,
    }
}
