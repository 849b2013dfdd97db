use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::core::diagnostics::{Level, RecordingDiagnostics};
use crate::core::rect::Rect;
use crate::domain::{BodyKind, Collision, CollisionSource, Axis, Velocity, DEFAULT_JUMP_VELOCITY};
use crate::spatial::occupancy::Cell;

fn test_world(width: u32, height: u32, gravity: i32) -> (World, RecordingSurface, RecordingDiagnostics) {
    let surface = RecordingSurface::new();
    let diag = RecordingDiagnostics::new();
    let world = World::with_host(
        WorldConfig::new(width, height, gravity, 16),
        Box::new(surface.clone()),
        Box::new(diag.clone()),
    )
    .unwrap();
    (world, surface, diag)
}

fn recorder() -> (Rc<RefCell<Vec<Collision>>>, impl FnMut(&mut World, &Collision)) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    (log, move |_: &mut World, hit: &Collision| sink.borrow_mut().push(*hit))
}

fn tick_until_grounded(world: &mut World, id: BodyId, max_ticks: usize) {
    for _ in 0..max_ticks {
        world.tick();
        if world.body(id).unwrap().is_grounded() {
            return;
        }
    }
    panic!("body never landed");
}

// === construction ===

#[test]
fn missing_gravity_warns_and_defaults_to_zero() {
    let diag = RecordingDiagnostics::new();
    let config = WorldConfig { gravity: None, ..WorldConfig::new(10, 10, 0, 16) };
    let world = World::with_host(config, Box::new(NullSurface), Box::new(diag.clone())).unwrap();
    assert_eq!(world.gravity(), 0);
    assert_eq!(diag.count(Level::Warn), 1);
}

#[test]
fn missing_frame_rate_is_fatal() {
    let diag = RecordingDiagnostics::new();
    let config = WorldConfig { frame_rate: None, ..WorldConfig::new(10, 10, 1, 16) };
    let err = World::with_host(config, Box::new(NullSurface), Box::new(diag.clone())).err();
    assert_eq!(err, Some(WorldError::MissingFrameRate));
    assert!(diag.contains(Level::Error, "frame rate"));
}

#[test]
fn missing_or_empty_dimensions_are_fatal() {
    let config = WorldConfig { height: None, ..WorldConfig::new(10, 10, 1, 16) };
    assert_eq!(
        World::with_host(config, Box::new(NullSurface), Box::new(RecordingDiagnostics::new())).err(),
        Some(WorldError::MissingDimensions)
    );

    let config = WorldConfig::new(0, 10, 1, 16);
    assert!(matches!(
        World::with_host(config, Box::new(NullSurface), Box::new(RecordingDiagnostics::new())),
        Err(WorldError::EmptyDimensions { width: 0, height: 10 })
    ));
}

#[test]
fn map_matches_world_size() {
    let (world, _, _) = test_world(320, 480, 1);
    assert_eq!(world.map_width(), 320);
    assert_eq!(world.map_height(), 480);
    assert_eq!(world.map().size(), 320 * 480);
    assert_eq!(world.map().occupied_count(), 0);
}

// === registration ===

#[test]
fn add_body_registers_in_order() {
    let (mut world, _, _) = test_world(100, 100, 1);
    let a = world.add_body(BodySpec::animate("a", 0, 0, 5, 5)).unwrap();
    let b = world.add_body(BodySpec::non_animate("b", 10, 10, 5, 5)).unwrap();

    assert_eq!(world.ids(), &[a, b]);
    assert_eq!(world.index_of(b), Some(1));
    let found = world.find_by_name("b").unwrap();
    assert_eq!(found.id(), b);
    assert_eq!(found.kind(), BodyKind::NonAnimate);
    assert_eq!(found.rect(), Rect::new(10, 10, 5, 5));
    assert_eq!(found.gravity(), 1);
    assert!(found.is_active());
    assert!(world.find_by_name("nobody").is_none());
}

#[test]
fn static_bodies_are_stamped_and_animate_ones_are_not() {
    let (mut world, _, _) = test_world(100, 100, 1);
    world.add_body(BodySpec::animate("a", 0, 0, 5, 5)).unwrap();
    assert_eq!(world.map().occupied_count(), 0);

    let wall = world.add_body(BodySpec::non_animate("wall", 10, 20, 4, 3)).unwrap();
    assert_eq!(world.map().occupied_count(), 12);
    assert_eq!(world.map().get(10, 20), Some(Cell::OccupiedBy(wall)));
    assert_eq!(world.map().get(13, 22), Some(Cell::OccupiedBy(wall)));
    assert_eq!(world.map().get(14, 22), Some(Cell::Empty));
    assert_eq!(world.body(wall).unwrap().footprint(), Some(Rect::new(10, 20, 4, 3)));
}

#[test]
fn rejected_body_leaves_world_unchanged() {
    let (mut world, surface, diag) = test_world(100, 100, 1);
    world.add_body(BodySpec::non_animate("floor", 0, 95, 100, 5)).unwrap();
    let cells = world.map().occupied_count();

    let err = world.add_body(BodySpec::non_animate("wide", 50, 0, 60, 5)).unwrap_err();
    assert!(matches!(err, SpawnError::OutOfBounds { axis: "width", .. }));

    let err = world.add_body(BodySpec::animate("floor", 0, 0, 5, 5)).unwrap_err();
    assert_eq!(err, SpawnError::DuplicateName("floor".into()));

    assert_eq!(world.body_count(), 1);
    assert_eq!(world.map().occupied_count(), cells);
    assert_eq!(surface.events().len(), 1);
    assert_eq!(diag.count(Level::Error), 2);
    assert!(diag.contains(Level::Error, "Skipping"));
}

#[test]
fn rejected_static_body_never_stamps() {
    let (mut world, _, _) = test_world(100, 100, 1);

    let mut fractional = BodySpec::non_animate("fractional", 0, 0, 10, 10);
    fractional.width = 2.5;
    assert!(matches!(
        world.add_body(fractional),
        Err(SpawnError::Fractional { field: "width", .. })
    ));

    let mut negative = BodySpec::non_animate("negative", 0, 0, 10, 10);
    negative.top = -1.0;
    assert!(matches!(
        world.add_body(negative),
        Err(SpawnError::Negative { field: "top", .. })
    ));

    assert_eq!(world.body_count(), 0);
    assert_eq!(world.map().occupied_count(), 0);
}

#[test]
fn huge_footprint_is_rejected_by_the_world() {
    let (mut world, _, diag) = test_world(320, 480, 1);
    let mut spec = BodySpec::non_animate("huge", 0, 0, 1, 1);
    spec.left = 2e9;
    spec.width = 2e9;
    assert!(matches!(world.add_body(spec), Err(SpawnError::OutOfBounds { .. })));
    assert_eq!(world.body_count(), 0);
    assert_eq!(diag.count(Level::Error), 1);
}

#[test]
fn queries_by_attribute() {
    let (mut world, _, _) = test_world(100, 100, 1);
    let (_, handler) = recorder();
    let a = world.add_body_with_handler(BodySpec::animate("a", 0, 0, 5, 5), handler).unwrap();
    let s1 = world.add_body(BodySpec::non_animate("s1", 10, 10, 5, 5)).unwrap();
    let s2 = world.add_body(BodySpec::non_animate("s2", 20, 10, 5, 5).inactive()).unwrap();

    let statics: Vec<BodyId> = world.find_all_by(BodyAttr::Kind(BodyKind::NonAnimate)).iter().map(|b| b.id()).collect();
    assert_eq!(statics, vec![s1, s2]);
    assert_eq!(world.find_by(BodyAttr::HasCollisionHandler(true)).map(|b| b.id()), Some(a));
    assert_eq!(world.find_by(BodyAttr::Active(false)).map(|b| b.id()), Some(s2));
}

#[test]
fn set_gravity_reaches_existing_bodies() {
    let (mut world, _, _) = test_world(100, 100, 1);
    let a = world.add_body(BodySpec::animate("a", 0, 0, 5, 5)).unwrap();
    world.set_gravity(3);
    assert_eq!(world.gravity(), 3);
    assert_eq!(world.body(a).unwrap().gravity(), 3);
}

// === removal ===

#[test]
fn remove_body_clears_footprint() {
    let (mut world, surface, _) = test_world(50, 50, 1);
    let wall = world.add_body(BodySpec::non_animate("wall", 0, 0, 10, 10)).unwrap();
    assert_eq!(world.map().occupied_count(), 100);

    let removed = world.remove_body(wall).unwrap();
    assert_eq!(removed.name(), "wall");
    assert_eq!(world.map().occupied_count(), 0);
    assert!(!world.contains(wall));
    assert!(!surface.is_attached(wall));
    assert!(world.remove_body(wall).is_none());
}

#[test]
fn removal_hands_cells_back_to_static_underneath() {
    let (mut world, _, _) = test_world(50, 50, 1);
    let low = world.add_body(BodySpec::non_animate("low", 0, 0, 10, 10)).unwrap();
    let high = world.add_body(BodySpec::non_animate("high", 5, 0, 10, 10)).unwrap();
    assert_eq!(world.map().get(7, 0), Some(Cell::OccupiedBy(high)));

    world.remove_body(high);
    assert_eq!(world.map().get(7, 0), Some(Cell::OccupiedBy(low)));
    assert_eq!(world.map().get(12, 0), Some(Cell::Empty));
    assert_eq!(world.map().occupied_count(), 100);
}

#[test]
fn removing_earlier_body_keeps_later_ids() {
    let (mut world, _, _) = test_world(50, 50, 0);
    let a = world.add_body(BodySpec::animate("a", 0, 0, 5, 5)).unwrap();
    let b = world.add_body(BodySpec::animate("b", 10, 0, 5, 5)).unwrap();
    assert_eq!(world.index_of(b), Some(1));

    world.remove_body(a);
    assert_eq!(world.index_of(b), Some(0));
    assert_eq!(world.body(b).unwrap().name(), "b");
    world.body_mut(b).unwrap().velocity_mut().left = 1;
    world.tick();
    assert_eq!(world.body(b).unwrap().rect().left, 11);
}

// === motion ===

#[test]
fn falling_body_lands_on_floor() {
    let (mut world, _, _) = test_world(320, 480, 1);
    world.add_body(BodySpec::non_animate("floor", 0, 475, 320, 5)).unwrap();
    let player = world.add_body(BodySpec::animate("player", 10, 0, 50, 50)).unwrap();

    tick_until_grounded(&mut world, player, 60);
    let body = world.body(player).unwrap();
    assert_eq!(body.rect(), Rect::new(10, 425, 50, 50));
    assert_eq!(body.velocity().top, 0);

    // resting stays put
    world.tick();
    let body = world.body(player).unwrap();
    assert_eq!(body.rect().top, 425);
    assert!(body.is_grounded());
}

#[test]
fn jump_from_the_floor() {
    let (mut world, _, _) = test_world(320, 480, 1);
    world.add_body(BodySpec::non_animate("floor", 0, 475, 320, 5)).unwrap();
    let player = world
        .add_body(BodySpec::animate("player", 10, 0, 50, 50).with_velocity(Velocity::new(0, 0, 0, -6)))
        .unwrap();
    tick_until_grounded(&mut world, player, 60);

    world.body_mut(player).unwrap().jump_start(None);
    assert_eq!(world.body(player).unwrap().velocity().top, DEFAULT_JUMP_VELOCITY);
    world.tick();
    assert_eq!(world.body(player).unwrap().rect().top, 425 - 11);

    world.body_mut(player).unwrap().jump_end();
    world.tick();
    // -11 cut to -6, then gravity
    assert_eq!(world.body(player).unwrap().rect().top, 414 - 5);
    assert!(!world.body(player).unwrap().is_grounded());
}

#[test]
fn free_movement_reports_to_surface() {
    let (mut world, surface, _) = test_world(100, 100, 0);
    let a = world
        .add_body(BodySpec::animate("a", 0, 0, 10, 10).with_velocity(Velocity::new(3, 0, 0, 0)))
        .unwrap();
    world.tick();
    world.tick();

    assert_eq!(world.body(a).unwrap().rect(), Rect::new(6, 0, 10, 10));
    assert_eq!(surface.last_rect(a), Some(Rect::new(6, 0, 10, 10)));
    let updates = surface.events().iter().filter(|e| matches!(e, SurfaceEvent::Update(..))).count();
    assert_eq!(updates, 2);
}

#[test]
fn stops_flush_against_wall_and_reports_it() {
    let (mut world, _, _) = test_world(100, 100, 0);
    let wall = world.add_body(BodySpec::non_animate("wall", 50, 0, 10, 100)).unwrap();
    let (log, handler) = recorder();
    let mover = world
        .add_body_with_handler(
            BodySpec::animate("mover", 30, 0, 10, 10).with_velocity(Velocity::new(7, 0, 0, 0)),
            handler,
        )
        .unwrap();

    world.tick();
    assert_eq!(world.body(mover).unwrap().rect().left, 37);
    assert!(log.borrow().is_empty());

    world.tick();
    let body = world.body(mover).unwrap();
    assert_eq!(body.rect().left, 40);
    assert_eq!(body.velocity().left, 0);

    let hits = log.borrow().clone();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].source, CollisionSource::Map(Axis::Horizontal));
    assert_eq!(hits[0].other, wall);
    assert_eq!(hits[1].source, CollisionSource::Overlap);
    assert_eq!(hits[1].this, mover);
}

#[test]
fn world_edge_stops_without_callback() {
    let (mut world, _, _) = test_world(100, 100, 0);
    let (log, handler) = recorder();
    let a = world
        .add_body_with_handler(
            BodySpec::animate("a", 85, 0, 10, 10).with_velocity(Velocity::new(10, 0, 0, 0)),
            handler,
        )
        .unwrap();

    world.tick();
    assert_eq!(world.body(a).unwrap().rect().left, 90);
    assert_eq!(world.body(a).unwrap().velocity().left, 0);
    assert!(log.borrow().is_empty());
}

#[test]
fn overlap_is_strict() {
    let (mut world, _, _) = test_world(100, 100, 0);
    let (log, handler) = recorder();
    world.add_body_with_handler(BodySpec::animate("a", 0, 0, 10, 10), handler).unwrap();
    world.add_body(BodySpec::animate("touching", 10, 0, 10, 10)).unwrap();
    world.tick();
    assert!(log.borrow().is_empty());

    let other = world.add_body(BodySpec::animate("inside", 5, 5, 10, 10).inactive()).unwrap();
    world.tick();
    let hits = log.borrow().clone();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].other, other);
    assert_eq!(hits[0].source, CollisionSource::Overlap);
}

#[test]
fn overlapping_animate_bodies_both_report() {
    let (mut world, _, _) = test_world(100, 100, 0);
    let (a_log, a_handler) = recorder();
    let (b_log, b_handler) = recorder();
    let a = world.add_body_with_handler(BodySpec::animate("a", 0, 0, 10, 10), a_handler).unwrap();
    let b = world.add_body_with_handler(BodySpec::animate("b", 5, 5, 10, 10), b_handler).unwrap();

    world.tick();
    let a_hits = a_log.borrow().clone();
    let b_hits = b_log.borrow().clone();
    assert_eq!(a_hits.len(), 1);
    assert_eq!((a_hits[0].this, a_hits[0].other), (a, b));
    assert_eq!(b_hits.len(), 1);
    assert_eq!((b_hits[0].this, b_hits[0].other), (b, a));
}

#[test]
fn extreme_velocity_stops_at_the_edge() {
    let (mut world, _, _) = test_world(100, 100, 1);
    let right = world
        .add_body(BodySpec::animate("right", 0, 0, 5, 5).with_velocity(Velocity::new(i32::MAX, i32::MAX, 0, 0)))
        .unwrap();
    let up = world
        .add_body(BodySpec::animate("up", 50, 50, 5, 5).with_velocity(Velocity::new(i32::MIN, i32::MIN, 0, 0)))
        .unwrap();

    world.tick();
    let body = world.body(right).unwrap();
    assert_eq!(body.rect(), Rect::new(95, 95, 5, 5));
    assert_eq!(body.velocity().left, 0);
    assert!(body.is_grounded());

    let body = world.body(up).unwrap();
    assert_eq!(body.rect(), Rect::new(0, 0, 5, 5));
    assert_eq!(body.velocity().top, 0);
}

#[test]
fn zero_size_body_lands_on_the_world_edge() {
    let (mut world, _, _) = test_world(100, 100, 1);
    let dot = world.add_body(BodySpec::animate("dot", 10, 90, 0, 0)).unwrap();
    let line = world.add_body(BodySpec::animate("line", 20, 0, 0, 5)).unwrap();

    for _ in 0..50 {
        world.tick();
    }
    let body = world.body(dot).unwrap();
    assert_eq!(body.rect().top, 100);
    assert!(body.is_grounded());
    assert_eq!(body.velocity().top, 0);

    let body = world.body(line).unwrap();
    assert_eq!(body.rect().bottom(), 100);
    assert!(body.is_grounded());
}

#[test]
fn inactive_bodies_do_not_move() {
    let (mut world, _, _) = test_world(100, 100, 1);
    let a = world
        .add_body(BodySpec::animate("a", 0, 0, 5, 5).with_velocity(Velocity::new(2, 0, 0, 0)))
        .unwrap();
    world.body_mut(a).unwrap().die();
    world.tick();
    assert_eq!(world.body(a).unwrap().rect(), Rect::new(0, 0, 5, 5));
    assert_eq!(world.stats().bodies_updated(), 0);

    world.body_mut(a).unwrap().live();
    world.tick();
    assert_eq!(world.body(a).unwrap().rect(), Rect::new(2, 1, 5, 5));
    assert_eq!(world.stats().bodies_updated(), 1);
    assert_eq!(world.frame(), 2);
}

#[test]
fn handler_may_remove_bodies_mid_tick() {
    let (mut world, surface, _) = test_world(100, 100, 0);
    let remover = |world: &mut World, hit: &Collision| {
        world.remove_body(hit.other);
    };
    world.add_body_with_handler(BodySpec::animate("eater", 0, 0, 10, 10), remover).unwrap();
    let food = world
        .add_body(BodySpec::animate("food", 5, 5, 2, 2).with_velocity(Velocity::new(1, 0, 0, 0)))
        .unwrap();
    let runner = world
        .add_body(BodySpec::animate("runner", 50, 50, 5, 5).with_velocity(Velocity::new(1, 0, 0, 0)))
        .unwrap();

    world.tick();
    assert!(!world.contains(food));
    assert!(!surface.is_attached(food));
    assert_eq!(world.body_count(), 2);
    assert_eq!(world.body(runner).unwrap().rect().left, 51);
    assert_eq!(world.stats().bodies_updated(), 2);
}

#[test]
fn handler_may_remove_its_own_body() {
    let (mut world, _, _) = test_world(100, 100, 0);
    let suicide = |world: &mut World, hit: &Collision| {
        world.remove_body(hit.this);
    };
    let a = world.add_body_with_handler(BodySpec::animate("a", 0, 0, 10, 10), suicide).unwrap();
    world.add_body(BodySpec::animate("b", 5, 0, 10, 10)).unwrap();
    world.add_body(BodySpec::animate("c", 5, 5, 10, 10)).unwrap();

    world.tick();
    assert!(!world.contains(a));
    assert_eq!(world.body_count(), 2);
}

#[test]
fn bodies_added_mid_tick_wait_for_next_tick() {
    let (mut world, _, _) = test_world(100, 100, 0);
    let spawner = |world: &mut World, _: &Collision| {
        if world.find_by_name("spawned").is_none() {
            let spec = BodySpec::animate("spawned", 80, 80, 5, 5).with_velocity(Velocity::new(1, 0, 0, 0));
            let _ = world.add_body(spec);
        }
    };
    world.add_body_with_handler(BodySpec::animate("a", 0, 0, 10, 10), spawner).unwrap();
    world.add_body(BodySpec::non_animate("rock", 5, 5, 10, 10)).unwrap();

    world.tick();
    let spawned = world.find_by_name("spawned").unwrap().id();
    assert_eq!(world.body(spawned).unwrap().rect().left, 80);
    world.tick();
    assert_eq!(world.body(spawned).unwrap().rect().left, 81);
}

#[test]
fn replaced_handler_is_kept() {
    let (mut world, _, _) = test_world(100, 100, 0);
    let (log, second) = recorder();
    let mut second = Some(second);
    let swap = move |world: &mut World, hit: &Collision| {
        if let Some(next) = second.take() {
            world.set_collision_handler(hit.this, next);
        }
    };
    world.add_body_with_handler(BodySpec::animate("a", 0, 0, 10, 10), swap).unwrap();
    world.add_body(BodySpec::animate("b", 5, 5, 10, 10)).unwrap();

    world.tick();
    assert!(log.borrow().is_empty());
    world.tick();
    assert_eq!(log.borrow().len(), 1);
}

// === loop ===

#[test]
fn scheduled_ticks_follow_ticker() {
    let (mut world, _, _) = test_world(10, 10, 0);
    assert!(world.start());
    assert!(!world.start());
    assert!(world.is_running());

    assert!(world.run_scheduled_tick());
    assert_eq!(world.frame(), 1);

    world.stop();
    assert!(!world.run_scheduled_tick());
    assert_eq!(world.frame(), 1);
    assert!(!world.is_running());
}

#[test]
fn abandoned_schedule_allows_restart() {
    let (mut world, _, _) = test_world(10, 10, 0);
    assert!(world.start());
    world.abandon_schedule();
    assert!(!world.is_running());
    assert!(world.start());
}

#[test]
fn run_until_a_handler_stops_the_loop() {
    let mut world = World::with_host(
        WorldConfig::new(20, 20, 1, 1),
        Box::new(NullSurface),
        Box::new(RecordingDiagnostics::new()),
    )
    .unwrap();
    world.add_body(BodySpec::non_animate("floor", 0, 18, 20, 2)).unwrap();
    let stopper = |world: &mut World, hit: &Collision| {
        if hit.source == CollisionSource::Map(Axis::Vertical) {
            world.stop();
        }
    };
    let a = world.add_body_with_handler(BodySpec::animate("a", 0, 0, 5, 5), stopper).unwrap();

    world.run();
    assert!(!world.is_running());
    assert!(world.body(a).unwrap().is_grounded());
    assert_eq!(world.body(a).unwrap().rect().top, 13);
    assert!(world.frame() > 0);
}

#[test]
fn trace_map_goes_to_diagnostics() {
    let (mut world, _, diag) = test_world(3, 2, 0);
    world.add_body(BodySpec::non_animate("dot", 1, 1, 1, 1)).unwrap();
    let dump = world.trace_map();
    assert_eq!(dump, "0: OOO\n1: OXO\n");
    assert_eq!(diag.count(Level::Trace), 1);
}
