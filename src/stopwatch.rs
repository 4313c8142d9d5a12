use stopwatch_core::{Clock, LapRecord, Scheduler, Stopwatch};

use crate::ui::View;

/// The stopwatch plus the bits of screen state that go with it.
pub struct StopwatchState<C: Clock, S: Scheduler> {
    pub timer: Stopwatch<C, S>,
    pub lap_scroll_offset: usize,
}

impl<C: Clock, S: Scheduler> StopwatchState<C, S> {
    pub fn new(timer: Stopwatch<C, S>) -> Self {
        Self {
            timer,
            lap_scroll_offset: 0,
        }
    }

    /// Newest lap goes to the top of the list, so jump back there.
    pub fn record_lap(&mut self) -> Option<LapRecord> {
        let lap = self.timer.record_lap()?;
        self.lap_scroll_offset = 0;
        Some(lap)
    }

    pub fn reset(&mut self) {
        self.timer.reset();
        self.lap_scroll_offset = 0;
    }

    pub fn scroll_older(&mut self) {
        if self.lap_scroll_offset + 1 < self.timer.laps().len() {
            self.lap_scroll_offset += 1;
        }
    }

    pub fn scroll_newer(&mut self) {
        self.lap_scroll_offset = self.lap_scroll_offset.saturating_sub(1);
    }

    pub fn view<'a>(&'a self, notice: Option<&'a str>, sound: bool) -> View<'a> {
        View {
            elapsed_ms: self.timer.current_elapsed(),
            laps: self.timer.laps(),
            controls: self.timer.controls(),
            lap_scroll_offset: self.lap_scroll_offset,
            notice,
            sound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stopwatch_core::{ManualClock, NoopScheduler};

    fn with_laps(n: u64) -> StopwatchState<ManualClock, NoopScheduler> {
        let clock = ManualClock::new(0);
        let mut state = StopwatchState::new(Stopwatch::new(clock.clone(), NoopScheduler));
        state.timer.start();
        for _ in 0..n {
            clock.advance(500);
            state.record_lap();
        }
        state
    }

    #[test]
    fn test_scroll_clamped_to_history() {
        let mut state = with_laps(3);
        state.scroll_newer();
        assert_eq!(state.lap_scroll_offset, 0);
        for _ in 0..10 {
            state.scroll_older();
        }
        assert_eq!(state.lap_scroll_offset, 2);
        state.scroll_newer();
        assert_eq!(state.lap_scroll_offset, 1);
    }

    #[test]
    fn test_new_lap_scrolls_to_top() {
        let mut state = with_laps(4);
        state.scroll_older();
        state.scroll_older();
        assert!(state.record_lap().is_some());
        assert_eq!(state.lap_scroll_offset, 0);
    }

    #[test]
    fn test_reset_clears_scroll_and_laps() {
        let mut state = with_laps(5);
        state.scroll_older();
        state.reset();
        assert_eq!(state.lap_scroll_offset, 0);
        assert!(state.timer.laps().is_empty());
        assert_eq!(state.view(None, false).elapsed_ms, 0);
    }

    #[test]
    fn test_lap_when_paused_keeps_scroll() {
        let mut state = with_laps(3);
        state.timer.pause();
        state.scroll_older();
        assert!(state.record_lap().is_none());
        assert_eq!(state.lap_scroll_offset, 1);
    }
}
