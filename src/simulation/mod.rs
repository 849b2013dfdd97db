//! World - owns the map, the body registry and the frame loop
//!
//! The world only orchestrates: validation lives in `domain::spec`, map
//! queries in `spatial::occupancy`, per-body movement in `systems::motion`.
//! Registry order is insertion order; ticks and lookups follow it.

use slotmap::SlotMap;

use crate::core::diagnostics::{ConsoleDiagnostics, Diagnostics};
use crate::core::error::{SpawnError, WorldError};
use crate::domain::{Body, BodyAttr, BodyId, BodySpec, CollisionHandler};
use crate::spatial::occupancy::OccupancyMap;

#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/ticker.rs"]
mod ticker;
#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
#[path = "host/surface.rs"]
mod surface;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;

pub use perf_stats::TickStats;
pub use settings::WorldConfig;
pub use surface::{NullSurface, RecordingSurface, RenderSurface, SurfaceEvent};
pub use ticker::Ticker;

pub(crate) use perf_stats::TickTimer;
use settings::Settings;

pub struct World {
    pub(crate) settings: Settings,
    pub(crate) map: OccupancyMap,
    pub(crate) bodies: SlotMap<BodyId, Body>,
    pub(crate) order: Vec<BodyId>,
    pub(crate) ticker: Ticker,
    pub(crate) stats: TickStats,
    pub(crate) surface: Box<dyn RenderSurface>,
    pub(crate) diagnostics: Box<dyn Diagnostics>,
}

impl World {
    /// Headless world reporting to the console.
    pub fn new(config: WorldConfig) -> Result<Self, WorldError> {
        Self::with_host(config, Box::new(NullSurface), Box::new(ConsoleDiagnostics))
    }

    /// World wired to a host render surface and diagnostics sink.
    pub fn with_host(
        config: WorldConfig,
        surface: Box<dyn RenderSurface>,
        diagnostics: Box<dyn Diagnostics>,
    ) -> Result<Self, WorldError> {
        init::create_world(&config, surface, diagnostics)
    }

    pub fn from_json(json: &str) -> Result<Self, WorldError> {
        Self::new(WorldConfig::from_json(json)?)
    }

    pub fn width(&self) -> u32 { self.settings.width }

    pub fn height(&self) -> u32 { self.settings.height }

    pub fn gravity(&self) -> i32 { self.settings.gravity }

    /// Tick period in milliseconds.
    pub fn frame_rate(&self) -> u32 { self.settings.frame_rate }

    pub fn set_gravity(&mut self, gravity: i32) {
        settings::set_gravity(self, gravity);
    }

    // === MAP ===

    pub fn map(&self) -> &OccupancyMap { &self.map }

    pub fn map_width(&self) -> u32 { self.map.width() }

    pub fn map_height(&self) -> u32 { self.map.height() }

    /// Dump the occupancy map as text and send it to the diagnostics sink.
    pub fn trace_map(&self) -> String {
        let dump = self.map.dump();
        self.diagnostics.trace(&dump);
        dump
    }

    // === BODIES ===

    /// Validate and register a body. On `Err` the world is unchanged and the
    /// reason has been reported to the diagnostics sink.
    pub fn add_body(&mut self, spec: BodySpec) -> Result<BodyId, SpawnError> {
        commands::add_body(self, &spec, None)
    }

    pub fn add_body_with_handler<H>(&mut self, spec: BodySpec, handler: H) -> Result<BodyId, SpawnError>
    where
        H: CollisionHandler + 'static,
    {
        commands::add_body(self, &spec, Some(Box::new(handler)))
    }

    /// Returns false if `id` is not registered.
    pub fn set_collision_handler<H>(&mut self, id: BodyId, handler: H) -> bool
    where
        H: CollisionHandler + 'static,
    {
        commands::set_collision_handler(self, id, Some(Box::new(handler)))
    }

    pub fn clear_collision_handler(&mut self, id: BodyId) -> bool {
        commands::set_collision_handler(self, id, None)
    }

    /// Unregister a body. Later bodies keep their ids.
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body> {
        commands::remove_body(self, id)
    }

    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.bodies.contains_key(id)
    }

    pub fn body_count(&self) -> usize {
        self.order.len()
    }

    /// Current registry position of `id`.
    pub fn index_of(&self, id: BodyId) -> Option<usize> {
        self.order.iter().position(|&other| other == id)
    }

    /// Ids in registry order.
    pub fn ids(&self) -> &[BodyId] {
        &self.order
    }

    pub fn bodies(&self) -> impl Iterator<Item = &Body> + '_ {
        self.order.iter().filter_map(move |&id| self.bodies.get(id))
    }

    // === QUERIES ===

    pub fn find_by_name(&self, name: &str) -> Option<&Body> {
        self.find_by(BodyAttr::Name(name))
    }

    /// First body in registry order matching `attr`.
    pub fn find_by(&self, attr: BodyAttr<'_>) -> Option<&Body> {
        self.bodies().find(|body| attr.matches(body))
    }

    pub fn find_all_by(&self, attr: BodyAttr<'_>) -> Vec<&Body> {
        self.bodies().filter(|body| attr.matches(body)).collect()
    }

    // === FRAME LOOP ===

    /// Advance one body by one frame. No-op for static or inactive bodies.
    pub fn update_body(&mut self, id: BodyId) {
        crate::systems::motion::update_body(self, id);
    }

    /// Advance every active animate body by one frame.
    pub fn tick(&mut self) {
        step::tick(self);
    }

    /// Mark the loop running. Returns true when the host has to schedule the
    /// first tick; false if one is already pending.
    pub fn start(&mut self) -> bool {
        self.ticker.start()
    }

    /// Stop after the current tick. A pending tick fires but does nothing.
    pub fn stop(&mut self) {
        self.ticker.stop();
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    /// Called by a host timer when a scheduled tick fires. Returns true when
    /// the host has to schedule the next one.
    pub fn run_scheduled_tick(&mut self) -> bool {
        step::run_scheduled_tick(self)
    }

    /// The host failed to schedule a tick it was asked for.
    pub fn abandon_schedule(&mut self) {
        self.ticker.abandon();
    }

    /// Block the current thread, ticking once per frame period until `stop`
    /// is called (usually from a collision handler).
    pub fn run(&mut self) {
        step::run(self);
    }

    pub fn stats(&self) -> TickStats {
        self.stats
    }

    pub fn frame(&self) -> u64 {
        self.stats.frame
    }

    pub fn diagnostics(&self) -> &dyn Diagnostics {
        self.diagnostics.as_ref()
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
