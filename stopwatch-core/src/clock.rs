//! Time source and periodic-tick seams.
//!
//! The controller never reads the wall clock or spawns timers itself; it goes
//! through [`Clock`] and [`Scheduler`] so the app can plug in real ones and
//! tests can drive time by hand.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Default refresh interval of the periodic tick (~100Hz).
pub const DEFAULT_TICK_MS: u64 = 10;

/// A monotonic millisecond time source.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Drives the periodic tick that refreshes elapsed time while running.
pub trait Scheduler {
    fn start_ticking(&mut self, interval_ms: u64);
    fn stop_ticking(&mut self);
}

/// Milliseconds since this clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// For headless use: elapsed time is only refreshed by explicit samples.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScheduler;

impl Scheduler for NoopScheduler {
    fn start_ticking(&mut self, _interval_ms: u64) {}
    fn stop_ticking(&mut self) {}
}
