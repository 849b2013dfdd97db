use crate::systems::motion::update_body;

use super::{TickTimer, World};

/// One frame: every active animate body, in registration order.
///
/// Iterates a snapshot of the registry so collision handlers can add or
/// remove bodies mid-tick. Removed bodies are skipped, added ones wait for
/// the next tick.
pub(super) fn tick(world: &mut World) {
    let timer = TickTimer::start();
    let ids = world.order.clone();
    let mut updated = 0u32;

    for id in ids {
        let Some(body) = world.bodies.get(id) else {
            continue;
        };
        if !body.is_active() || !body.is_animate() {
            continue;
        }
        update_body(world, id);
        updated += 1;
    }

    world.stats.record(&timer, updated);
}

/// Body of a host timer callback. Returns true when the host has to
/// schedule the next tick.
pub(super) fn run_scheduled_tick(world: &mut World) -> bool {
    if !world.ticker.fire() {
        return false;
    }
    tick(world);
    world.ticker.rearm()
}

/// Blocking loop for native hosts: ticks every frame period until stopped.
pub(super) fn run(world: &mut World) {
    world.ticker.start();
    loop {
        if !run_scheduled_tick(world) && !world.ticker.is_scheduled() {
            break;
        }
        std::thread::sleep(world.ticker.period());
    }
}
