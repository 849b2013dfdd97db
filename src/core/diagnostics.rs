//! Diagnostics sink injected into the world.
//!
//! Validation and construction problems are reported here instead of being
//! raised to the caller. On wasm32 the console sink writes to the browser
//! console, elsewhere it emits `tracing` events under the `thingworld` target.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Trace => "trace",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

pub trait Diagnostics {
    fn report(&self, level: Level, message: &str);

    fn trace(&self, message: &str) {
        self.report(Level::Trace, message);
    }

    fn warn(&self, message: &str) {
        self.report(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.report(Level::Error, message);
    }
}

/// Default sink: browser console on wasm32, `tracing` natively.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleDiagnostics;

impl Diagnostics for ConsoleDiagnostics {
    fn report(&self, level: Level, message: &str) {
        #[cfg(target_arch = "wasm32")]
        {
            let msg = wasm_bindgen::JsValue::from_str(message);
            match level {
                Level::Trace => web_sys::console::debug_1(&msg),
                Level::Warn => web_sys::console::warn_1(&msg),
                Level::Error => web_sys::console::error_1(&msg),
            }
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            match level {
                Level::Trace => tracing::debug!(target: "thingworld", "{}", message),
                Level::Warn => tracing::warn!(target: "thingworld", "{}", message),
                Level::Error => tracing::error!(target: "thingworld", "{}", message),
            }
        }
    }
}

/// Drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentDiagnostics;

impl Diagnostics for SilentDiagnostics {
    fn report(&self, _level: Level, _message: &str) {}
}

/// Keeps every report in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    entries: Rc<RefCell<Vec<(Level, String)>>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.borrow().clone()
    }

    pub fn count(&self, level: Level) -> usize {
        self.entries.borrow().iter().filter(|(l, _)| *l == level).count()
    }

    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|(l, m)| *l == level && m.contains(needle))
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn report(&self, level: Level, message: &str) {
        self.entries.borrow_mut().push((level, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_clones_share_log() {
        let diag = RecordingDiagnostics::new();
        let sink: Box<dyn Diagnostics> = Box::new(diag.clone());
        sink.warn("no gravity");
        sink.error("bad body");
        assert_eq!(diag.count(Level::Warn), 1);
        assert!(diag.contains(Level::Error, "bad"));
        diag.clear();
        assert!(diag.entries().is_empty());
    }

    #[test]
    fn console_sink_is_safe_without_a_subscriber() {
        let sink: Box<dyn Diagnostics> = Box::new(ConsoleDiagnostics);
        sink.trace("map dump");
        sink.warn("no gravity");
        sink.error("bad body");
    }
}
