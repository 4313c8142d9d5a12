use crate::format::{format_split, format_total, lap_label};
use crate::laps::{LapHistory, LapRecord};

/// "#01 | Split: +00:01.000 | Total: 00:01.000"
pub fn export_line(lap: &LapRecord) -> String {
    format!(
        "{} | Split: {} | Total: {}",
        lap_label(lap.index),
        format_split(lap.split_ms),
        format_total(lap.total_ms)
    )
}

/// One line per lap, most recent first.
pub fn export_laps(history: &LapHistory) -> String {
    history
        .iter_recent()
        .map(export_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::laps::LapRecorder;

    #[test]
    fn test_export_line() {
        let lap = LapRecord { index: 3, split_ms: 1500, total_ms: 62_500 };
        assert_eq!(export_line(&lap), "#03 | Split: +00:01.500 | Total: 01:02.500");
    }

    #[test]
    fn test_export_most_recent_first() {
        let mut rec = LapRecorder::new();
        rec.record(1000);
        rec.record(2500);
        assert_eq!(
            export_laps(rec.history()),
            "#02 | Split: +00:01.500 | Total: 00:02.500\n#01 | Split: +00:01.000 | Total: 00:01.000"
        );
    }

    #[test]
    fn test_export_empty() {
        assert_eq!(export_laps(&LapHistory::default()), "");
    }
}
