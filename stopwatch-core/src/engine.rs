//! Elapsed-time bookkeeping.

/// Raw stopwatch state. `elapsed_ms` only moves forward while `running`.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct TimerState {
    pub running: bool,
    pub start_reference_ms: u64,
    pub elapsed_ms: u64,
}

/// Start/pause/reset over a [`TimerState`], with time passed in explicitly.
#[derive(Clone, Debug, Default)]
pub struct ClockEngine {
    state: TimerState,
}

impl ClockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if already running. Resumes from the current elapsed time.
    pub fn start(&mut self, now_ms: u64) -> bool {
        if self.state.running {
            return false;
        }
        self.state.start_reference_ms = now_ms.saturating_sub(self.state.elapsed_ms);
        self.state.running = true;
        true
    }

    /// Returns `false` if not running. Takes one last sample before freezing.
    pub fn pause(&mut self, now_ms: u64) -> bool {
        if !self.state.running {
            return false;
        }
        self.tick(now_ms);
        self.state.running = false;
        true
    }

    pub fn reset(&mut self) {
        self.state = TimerState::default();
    }

    /// Recompute elapsed time from the start reference. No-op while stopped.
    pub fn tick(&mut self, now_ms: u64) {
        if !self.state.running {
            return;
        }
        let sample = now_ms.saturating_sub(self.state.start_reference_ms);
        // A clock that steps backwards must not rewind the display.
        self.state.elapsed_ms = self.state.elapsed_ms.max(sample);
    }

    pub fn current_elapsed(&self) -> u64 {
        self.state.elapsed_ms
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn state(&self) -> TimerState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_basic() {
        let mut engine = ClockEngine::new();
        assert!(!engine.is_running());
        assert_eq!(engine.current_elapsed(), 0);

        assert!(engine.start(1000));
        engine.tick(1500);
        assert_eq!(engine.current_elapsed(), 500);
        engine.tick(2000);
        assert_eq!(engine.current_elapsed(), 1000);

        assert!(engine.pause(2000));
        engine.tick(5000);
        assert_eq!(engine.current_elapsed(), 1000); // Frozen while paused

        assert!(engine.start(5000));
        engine.tick(5500);
        assert_eq!(engine.current_elapsed(), 1500);

        engine.reset();
        assert_eq!(engine.state(), TimerState::default());
    }

    #[test]
    fn test_start_sets_reference_behind_now() {
        let mut engine = ClockEngine::new();
        engine.start(0);
        engine.pause(700);
        engine.start(10_000);
        assert_eq!(engine.state().start_reference_ms, 9_300);
    }

    #[test]
    fn test_double_start_is_noop() {
        let mut engine = ClockEngine::new();
        assert!(engine.start(100));
        let before = engine.state();
        assert!(!engine.start(900));
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn test_pause_when_stopped_is_noop() {
        let mut engine = ClockEngine::new();
        assert!(!engine.pause(500));
        assert_eq!(engine.current_elapsed(), 0);
    }

    #[test]
    fn test_pause_samples_final_time() {
        let mut engine = ClockEngine::new();
        engine.start(0);
        engine.tick(990);
        engine.pause(1004);
        assert_eq!(engine.current_elapsed(), 1004);
    }

    #[test]
    fn test_clock_stepping_backwards_keeps_elapsed() {
        let mut engine = ClockEngine::new();
        engine.start(1000);
        engine.tick(3000);
        engine.tick(2500);
        assert_eq!(engine.current_elapsed(), 2000);
    }

    #[test]
    fn test_elapsed_non_decreasing_across_start_pause_sequences() {
        let mut engine = ClockEngine::new();
        let mut now = 0u64;
        let mut last = 0u64;
        for step in 0..200u64 {
            now += 7 + step % 13;
            match step % 5 {
                0 => {
                    engine.start(now);
                }
                3 => {
                    let frozen = engine.current_elapsed();
                    if engine.pause(now) {
                        assert!(engine.current_elapsed() >= frozen);
                        let paused_at = engine.current_elapsed();
                        engine.tick(now + 1000);
                        assert_eq!(engine.current_elapsed(), paused_at);
                    }
                }
                _ => engine.tick(now),
            }
            assert!(engine.current_elapsed() >= last);
            last = engine.current_elapsed();
        }
    }
}
