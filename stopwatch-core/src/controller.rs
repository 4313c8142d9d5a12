//! The single owner of stopwatch state. Presentation code holds one of these
//! and calls into it on user input and on every tick.

use crate::clock::{Clock, Scheduler, DEFAULT_TICK_MS};
use crate::engine::{ClockEngine, TimerState};
use crate::laps::{LapHistory, LapRecord, LapRecorder};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Stopped,
    Running,
    Paused,
}

/// What the controls should look like in the current phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Controls {
    pub primary_label: &'static str,
    pub lap_enabled: bool,
    pub reset_enabled: bool,
    pub status: &'static str,
}

pub struct Stopwatch<C: Clock, S: Scheduler> {
    clock: C,
    scheduler: S,
    engine: ClockEngine,
    laps: LapRecorder,
    tick_interval_ms: u64,
    /// Whether the scheduler is currently started. Can be false while
    /// running if ticking was suspended.
    ticking: bool,
}

impl<C: Clock, S: Scheduler> Stopwatch<C, S> {
    pub fn new(clock: C, scheduler: S) -> Self {
        Self::with_interval(clock, scheduler, DEFAULT_TICK_MS)
    }

    pub fn with_interval(clock: C, scheduler: S, tick_interval_ms: u64) -> Self {
        Self {
            clock,
            scheduler,
            engine: ClockEngine::new(),
            laps: LapRecorder::new(),
            tick_interval_ms: tick_interval_ms.max(1),
            ticking: false,
        }
    }

    /// Returns `false` (and does nothing) if already running.
    pub fn start(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self.engine.start(now) {
            return false;
        }
        self.start_ticking();
        true
    }

    /// Returns `false` (and does nothing) if not running.
    pub fn pause(&mut self) -> bool {
        let now = self.clock.now_ms();
        if !self.engine.pause(now) {
            return false;
        }
        self.stop_ticking();
        true
    }

    /// Start if stopped or paused, pause if running. Returns whether the
    /// watch is running afterwards.
    pub fn toggle(&mut self) -> bool {
        if self.engine.is_running() {
            self.pause();
            false
        } else {
            self.start();
            true
        }
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.laps.clear();
        self.stop_ticking();
    }

    /// Stop the periodic tick without pausing, e.g. while nothing is shown.
    /// Elapsed time keeps accruing against the start reference.
    pub fn suspend_ticking(&mut self) {
        self.stop_ticking();
    }

    /// Undo [`suspend_ticking`](Self::suspend_ticking). Catches up elapsed
    /// time first. No-op unless running and suspended.
    pub fn resume_ticking(&mut self) {
        if !self.engine.is_running() || self.ticking {
            return;
        }
        self.tick();
        self.start_ticking();
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    fn start_ticking(&mut self) {
        if !self.ticking {
            self.ticking = true;
            self.scheduler.start_ticking(self.tick_interval_ms);
        }
    }

    fn stop_ticking(&mut self) {
        if self.ticking {
            self.ticking = false;
            self.scheduler.stop_ticking();
        }
    }

    /// `None` unless running.
    pub fn record_lap(&mut self) -> Option<LapRecord> {
        if !self.engine.is_running() {
            return None;
        }
        self.engine.tick(self.clock.now_ms());
        Some(self.laps.record(self.engine.current_elapsed()))
    }

    /// Periodic refresh. Returns the elapsed time to display.
    pub fn tick(&mut self) -> u64 {
        self.engine.tick(self.clock.now_ms());
        self.engine.current_elapsed()
    }

    pub fn current_elapsed(&self) -> u64 {
        self.engine.current_elapsed()
    }

    pub fn is_running(&self) -> bool {
        self.engine.is_running()
    }

    pub fn state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn laps(&self) -> &LapHistory {
        self.laps.history()
    }

    pub fn tick_interval_ms(&self) -> u64 {
        self.tick_interval_ms
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn phase(&self) -> Phase {
        if self.engine.is_running() {
            Phase::Running
        } else if self.engine.current_elapsed() > 0 || !self.laps.history().is_empty() {
            Phase::Paused
        } else {
            Phase::Stopped
        }
    }

    pub fn controls(&self) -> Controls {
        match self.phase() {
            Phase::Running => Controls {
                primary_label: "Pause",
                lap_enabled: true,
                reset_enabled: false,
                status: "Running",
            },
            Phase::Paused => Controls {
                primary_label: "Resume",
                lap_enabled: false,
                reset_enabled: true,
                status: "Paused",
            },
            Phase::Stopped => Controls {
                primary_label: "Start",
                lap_enabled: false,
                reset_enabled: true,
                status: "Press Space to Start",
            },
        }
    }
}
