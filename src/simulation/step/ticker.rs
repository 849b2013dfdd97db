use std::time::Duration;

/// Fixed-period loop state.
///
/// At most one tick is ever pending: `start` only asks the host to schedule
/// when nothing is scheduled yet, and a fired tick reschedules itself only
/// while the loop is running. `stop` never interrupts a tick in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticker {
    period_ms: u32,
    running: bool,
    scheduled: bool,
}

impl Ticker {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            running: false,
            scheduled: false,
        }
    }

    pub fn period_ms(&self) -> u32 { self.period_ms }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms as u64)
    }

    pub fn is_running(&self) -> bool { self.running }

    pub fn is_scheduled(&self) -> bool { self.scheduled }

    /// Returns true when the caller has to schedule a tick.
    pub fn start(&mut self) -> bool {
        self.running = true;
        if self.scheduled {
            return false;
        }
        self.scheduled = true;
        true
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// A scheduled tick fired. Returns whether it should run.
    pub fn fire(&mut self) -> bool {
        self.scheduled = false;
        self.running
    }

    /// A tick finished. Returns true when the caller has to schedule the next one.
    pub fn rearm(&mut self) -> bool {
        if self.running && !self.scheduled {
            self.scheduled = true;
            return true;
        }
        false
    }

    /// The host could not schedule the pending tick; the loop is over.
    pub fn abandon(&mut self) {
        self.running = false;
        self.scheduled = false;
    }
}
