use std::fmt;

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;

/// Display components of a duration. Minutes are not wrapped at the hour.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimeParts {
    pub minutes: u64,
    pub seconds: u64,
    pub millis: u64,
}

/// Split milliseconds into minutes, seconds (0-59) and milliseconds (0-999).
pub fn format(ms: u64) -> TimeParts {
    TimeParts {
        minutes: ms / MS_PER_MINUTE,
        seconds: (ms % MS_PER_MINUTE) / MS_PER_SECOND,
        millis: ms % MS_PER_SECOND,
    }
}

impl TimeParts {
    /// Minutes, at least two digits.
    pub fn m(&self) -> String {
        format!("{:02}", self.minutes)
    }

    pub fn s(&self) -> String {
        format!("{:02}", self.seconds)
    }

    pub fn ms(&self) -> String {
        format!("{:03}", self.millis)
    }

    /// Position within the current minute, e.g. 12.345
    pub fn raw_seconds(&self) -> f64 {
        self.seconds as f64 + self.millis as f64 / 1000.0
    }
}

impl fmt::Display for TimeParts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}.{:03}", self.minutes, self.seconds, self.millis)
    }
}

/// Format milliseconds as "MM:SS.mmm"
pub fn format_total(ms: u64) -> String {
    format(ms).to_string()
}

/// Format a split as "+MM:SS.mmm"
pub fn format_split(ms: u64) -> String {
    format!("+{}", format(ms))
}

/// Lap number as shown in the list: "#01", "#12", "#100".
pub fn lap_label(index: u32) -> String {
    format!("#{:02}", index)
}

/// Fraction of the progress ring to fill; one full turn per minute.
pub fn ring_fraction(ms: u64) -> f64 {
    format(ms).raw_seconds() / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        let parts = format(0);
        assert_eq!((parts.m().as_str(), parts.s().as_str(), parts.ms().as_str()), ("00", "00", "000"));
    }

    #[test]
    fn test_format_components() {
        let parts = format(61_234);
        assert_eq!(parts.m(), "01");
        assert_eq!(parts.s(), "01");
        assert_eq!(parts.ms(), "234");
        assert_eq!(parts.to_string(), "01:01.234");
    }

    #[test]
    fn test_format_edges() {
        assert_eq!(format_total(59_999), "00:59.999");
        assert_eq!(format_total(60_000), "01:00.000");
        assert_eq!(format_total(7), "00:00.007");
        assert_eq!(format_total(45), "00:00.045");
    }

    #[test]
    fn test_minutes_not_wrapped_at_hour() {
        assert_eq!(format_total(3_600_000), "60:00.000");
        assert_eq!(format(6_000_000).m(), "100");
    }

    #[test]
    fn test_format_split_and_label() {
        assert_eq!(format_split(1500), "+00:01.500");
        assert_eq!(lap_label(1), "#01");
        assert_eq!(lap_label(100), "#100");
    }

    #[test]
    fn test_ring_fraction() {
        assert_eq!(ring_fraction(0), 0.0);
        assert_eq!(ring_fraction(30_000), 0.5);
        assert_eq!(ring_fraction(60_000), 0.0);
        assert!((ring_fraction(75_000) - 0.25).abs() < 1e-9);
        assert!(ring_fraction(59_999) < 1.0);
    }
}
