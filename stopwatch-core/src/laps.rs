//! Lap splits.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LapRecord {
    /// 1-based, sequential since the last reset.
    pub index: u32,
    pub split_ms: u64,
    pub total_ms: u64,
}

/// Laps in the order they were recorded.
#[derive(Clone, Debug, Default)]
pub struct LapHistory {
    records: Vec<LapRecord>,
}

impl LapHistory {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&LapRecord> {
        self.records.last()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LapRecord> + ExactSizeIterator {
        self.records.iter()
    }

    /// Most recent first, the order laps are listed on screen.
    pub fn iter_recent(&self) -> impl Iterator<Item = &LapRecord> {
        self.records.iter().rev()
    }

    fn push(&mut self, record: LapRecord) {
        self.records.push(record);
    }

    fn clear(&mut self) {
        self.records.clear();
    }
}

pub struct LapRecorder {
    history: LapHistory,
    last_lap_total_ms: u64,
    next_index: u32,
}

impl LapRecorder {
    pub fn new() -> Self {
        Self {
            history: LapHistory::default(),
            last_lap_total_ms: 0,
            next_index: 1,
        }
    }

    /// Record a lap at `total_ms` of elapsed time. The caller guarantees
    /// `total_ms` never goes below the previous lap's total.
    pub fn record(&mut self, total_ms: u64) -> LapRecord {
        let record = LapRecord {
            index: self.next_index,
            split_ms: total_ms.saturating_sub(self.last_lap_total_ms),
            total_ms,
        };
        self.history.push(record);
        self.last_lap_total_ms = total_ms;
        self.next_index += 1;
        record
    }

    pub fn clear(&mut self) {
        self.history.clear();
        self.last_lap_total_ms = 0;
        self.next_index = 1;
    }

    pub fn history(&self) -> &LapHistory {
        &self.history
    }
}

impl Default for LapRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_and_totals() {
        let mut rec = LapRecorder::new();
        let first = rec.record(1000);
        assert_eq!(first, LapRecord { index: 1, split_ms: 1000, total_ms: 1000 });
        let second = rec.record(2500);
        assert_eq!(second, LapRecord { index: 2, split_ms: 1500, total_ms: 2500 });
        let third = rec.record(2500);
        assert_eq!(third.split_ms, 0);
        assert_eq!(third.index, 3);
    }

    #[test]
    fn test_recent_first_iteration() {
        let mut rec = LapRecorder::new();
        rec.record(100);
        rec.record(300);
        rec.record(600);
        let recent: Vec<u32> = rec.history().iter_recent().map(|l| l.index).collect();
        assert_eq!(recent, vec![3, 2, 1]);
        let oldest: Vec<u32> = rec.history().iter().map(|l| l.index).collect();
        assert_eq!(oldest, vec![1, 2, 3]);
    }

    #[test]
    fn test_clear_restarts_numbering() {
        let mut rec = LapRecorder::new();
        rec.record(400);
        rec.record(900);
        rec.clear();
        assert!(rec.history().is_empty());
        let lap = rec.record(250);
        assert_eq!(lap, LapRecord { index: 1, split_ms: 250, total_ms: 250 });
    }

    #[test]
    fn test_split_is_difference_of_totals() {
        let mut rec = LapRecorder::new();
        for total in [120u64, 480, 481, 2000, 65_000] {
            rec.record(total);
        }
        let laps: Vec<_> = rec.history().iter().copied().collect();
        let mut prev = 0;
        for lap in laps {
            assert!(lap.total_ms >= prev);
            assert_eq!(lap.split_ms, lap.total_ms - prev);
            prev = lap.total_ms;
        }
    }
}
