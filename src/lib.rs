//! Thingworld Engine - fixed-timestep rectangle physics for WASM hosts
//!
//! Architecture:
//! - core/        - Geometry, errors, diagnostics sink, safety macros
//! - spatial/     - Occupancy map and distance-to-collision probes
//! - domain/      - Bodies, registration specs, collision callbacks, queries
//! - systems/     - Per-body movement and collision resolution
//! - simulation/  - World orchestration and frame loop
//! - api/         - wasm-bindgen facade for JS hosts

// Safety macros must be declared before the modules that use them.
#[macro_use]
pub mod core;
pub mod spatial;
pub mod domain;
pub mod systems;
pub mod simulation;
pub mod api;

use wasm_bindgen::prelude::*;

#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&"Thingworld engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub use api::wasm::ThingWorld;
pub use crate::core::diagnostics::{ConsoleDiagnostics, Diagnostics, Level, RecordingDiagnostics, SilentDiagnostics};
pub use crate::core::error::{SpawnError, WorldError};
pub use crate::core::rect::Rect;
pub use domain::{
    Axis, Body, BodyAttr, BodyId, BodyKind, BodySpec, Collision, CollisionHandler, CollisionSource,
    Velocity, VelocitySpec, DEFAULT_JUMP_VELOCITY,
};
pub use simulation::{NullSurface, RecordingSurface, RenderSurface, SurfaceEvent, TickStats, World, WorldConfig};
