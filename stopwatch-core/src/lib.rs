//! Pure stopwatch logic with no platform dependencies.
//! Time comes in through [`Clock`], periodic refresh goes out through
//! [`Scheduler`], so everything here is testable on host without a terminal.

pub mod clock;
pub mod controller;
pub mod engine;
pub mod export;
pub mod format;
pub mod laps;

pub use clock::{Clock, ManualClock, NoopScheduler, Scheduler, SystemClock, DEFAULT_TICK_MS};
pub use controller::{Controls, Phase, Stopwatch};
pub use engine::{ClockEngine, TimerState};
pub use export::{export_laps, export_line};
pub use format::{format, format_split, format_total, lap_label, ring_fraction, TimeParts};
pub use laps::{LapHistory, LapRecord, LapRecorder};
