//! Per-tick timing and counters.

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
type Stamp = f64;
#[cfg(not(target_arch = "wasm32"))]
type Stamp = std::time::Instant;

/// Wall-clock time of one tick, in milliseconds.
pub(crate) struct TickTimer(Stamp);

impl TickTimer {
    #[cfg(target_arch = "wasm32")]
    pub(crate) fn start() -> Self {
        Self(js_sys::Date::now())
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn start() -> Self {
        Self(std::time::Instant::now())
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn elapsed_ms(&self) -> f64 {
        js_sys::Date::now() - self.0
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn elapsed_ms(&self) -> f64 {
        self.0.elapsed().as_secs_f64() * 1000.0
    }
}

/// Counters for the most recent tick.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickStats {
    pub(super) frame: u64,
    pub(super) last_tick_ms: f64,
    pub(super) bodies_updated: u32,
}

impl TickStats {
    pub(crate) fn record(&mut self, timer: &TickTimer, bodies_updated: u32) {
        self.frame += 1;
        self.last_tick_ms = timer.elapsed_ms();
        self.bodies_updated = bodies_updated;
    }
}

#[wasm_bindgen]
impl TickStats {
    /// Ticks completed since the world was created.
    #[wasm_bindgen(getter)]
    pub fn frame(&self) -> u64 { self.frame }

    #[wasm_bindgen(getter)]
    pub fn last_tick_ms(&self) -> f64 { self.last_tick_ms }

    /// Active animate bodies processed by the last tick.
    #[wasm_bindgen(getter)]
    pub fn bodies_updated(&self) -> u32 { self.bodies_updated }
}
