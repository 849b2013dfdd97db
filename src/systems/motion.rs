//! Per-body movement and collision resolution.
//!
//! Each tick an animate body:
//! 1. commits `next_velocity` (gravity applied),
//! 2. tries the horizontal and the vertical move separately against the map,
//!    stopping flush against the first obstruction on a blocked axis,
//! 3. checks its unresolved next rectangle against every other body.
//!
//! Collision handlers run inline and may change anything, so the body is
//! looked up again after every callback.

use crate::core::rect::Rect;
use crate::domain::{Axis, BodyId, Collision, CollisionSource};
use crate::simulation::World;
use crate::spatial::occupancy::Obstruction;

pub(crate) fn update_body(world: &mut World, id: BodyId) {
    let Some(body) = world.bodies.get_mut(id) else {
        return;
    };
    if !body.is_animate() || !body.is_active() {
        return;
    }

    body.velocity = body.next_velocity();
    let current = body.rect;
    let next = body.next_position();

    let along_x = current.with_left(next.left);
    let along_y = current.with_top(next.top);

    move_body(world, id, current, along_x, along_y);
    check_animate(world, id, next);

    if let Some(body) = world.bodies.get(id) {
        if body.rect != current {
            world.surface.update_rect(id, &body.rect);
        }
    }
}

/// Axis-separated move against the occupancy map.
pub(crate) fn move_body(world: &mut World, id: BodyId, current: Rect, along_x: Rect, along_y: Rect) {
    let hit_x = world.map.first_obstruction(&along_x);
    let hit_y = world.map.first_obstruction(&along_y);

    let Some(body) = world.bodies.get(id) else {
        return;
    };
    let distance = world.map.distance_to_collision(&current, body.velocity);

    // horizontal
    let Some(body) = world.bodies.get_mut(id) else {
        return;
    };
    match hit_x {
        None => body.rect.left = along_x.left,
        Some(hit) => {
            body.rect.left += clamp_travel(distance.left, along_x.left.saturating_sub(current.left));
            body.velocity.left = 0;
            notify_map_hit(world, id, hit, Axis::Horizontal);
        }
    }

    // vertical
    let Some(body) = world.bodies.get_mut(id) else {
        return;
    };
    match hit_y {
        None => {
            if body.velocity.top > 0 {
                body.grounded = false;
            }
            body.rect.top = along_y.top;
        }
        Some(hit) => {
            body.rect.top += clamp_travel(distance.top, along_y.top.saturating_sub(current.top));
            if body.velocity.top > 0 {
                body.grounded = true;
            }
            body.velocity.top = 0;
            notify_map_hit(world, id, hit, Axis::Vertical);
        }
    }
}

/// Open-interval overlap of `next` against every other body's current rectangle,
/// static and inactive ones included.
pub(crate) fn check_animate(world: &mut World, id: BodyId, next: Rect) {
    if !world.bodies.get(id).map_or(false, |b| b.has_collision_handler()) {
        return;
    }

    let others: Vec<BodyId> = world.order.iter().copied().filter(|&other| other != id).collect();
    for other in others {
        let Some(rect) = world.bodies.get(other).map(|b| b.rect) else {
            continue;
        };
        if next.overlaps(&rect) {
            dispatch(world, Collision { this: id, other, source: CollisionSource::Overlap });
        }
        if !world.bodies.contains_key(id) {
            return;
        }
    }
}

fn notify_map_hit(world: &mut World, id: BodyId, hit: Obstruction, axis: Axis) {
    if let Some(other) = hit.body() {
        dispatch(world, Collision { this: id, other, source: CollisionSource::Map(axis) });
    }
}

/// Run `hit.this`'s handler, if any, when `hit.other` is still registered.
///
/// The handler is taken out of the body for the duration of the call so it
/// can borrow the world mutably; it is put back unless the body was removed
/// or given a new handler meanwhile. A handler therefore cannot clear itself.
pub(crate) fn dispatch(world: &mut World, hit: Collision) {
    if !world.bodies.contains_key(hit.other) {
        return;
    }
    let Some(mut handler) = world.bodies.get_mut(hit.this).and_then(|b| b.handler.take()) else {
        return;
    };

    handler.on_collide(world, &hit);

    if let Some(body) = world.bodies.get_mut(hit.this) {
        if body.handler.is_none() {
            body.handler = Some(handler);
        }
    }
}

/// Limit probed travel to the requested move so a body that starts inside
/// an obstruction cannot jump past it.
fn clamp_travel(probed: i32, requested: i32) -> i32 {
    if requested >= 0 {
        probed.clamp(0, requested)
    } else {
        probed.clamp(requested, 0)
    }
}
