use crate::error::PlannerError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// Wall-clock time of day, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub fn new(hour: u16, minute: u16) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour * 60 + minute))
        } else {
            None
        }
    }

    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Minutes from `self` until `later`; zero when `later` is not after `self`.
    pub fn minutes_until(self, later: TimeOfDay) -> u16 {
        later.0.saturating_sub(self.0)
    }

    /// Shifts forward by `minutes`, or `None` when that passes midnight.
    pub fn plus_minutes(self, minutes: u16) -> Option<Self> {
        self.0.checked_add(minutes).and_then(Self::from_minutes)
    }
}

impl FromStr for TimeOfDay {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || PlannerError::InvalidTime(s.to_string());
        let (hour, minute) = trimmed.split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;
        TimeOfDay::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl Serialize for TimeOfDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeOfDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Half-open interval `[start, end)` within a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Option<Self> {
        (start < end).then_some(Self { start, end })
    }

    /// A range of `minutes` starting at `start`, if it ends before midnight.
    pub fn starting_at(start: TimeOfDay, minutes: u16) -> Option<Self> {
        start
            .plus_minutes(minutes)
            .and_then(|end| Self::new(start, end))
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.start.minutes_until(self.end)
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl FromStr for TimeRange {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s
            .split_once('-')
            .ok_or_else(|| PlannerError::InvalidTime(s.to_string()))?;
        let start: TimeOfDay = start.parse()?;
        let end: TimeOfDay = end.parse()?;
        TimeRange::new(start, end).ok_or_else(|| PlannerError::InvalidWindow {
            start: start.to_string(),
            end: end.to_string(),
        })
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

impl Serialize for TimeRange {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(hour: u16, minute: u16) -> TimeOfDay {
        TimeOfDay::new(hour, minute).unwrap()
    }

    #[test]
    fn parses_zero_padded_and_short_hours() {
        assert_eq!("09:05".parse::<TimeOfDay>().unwrap(), t(9, 5));
        assert_eq!("9:05".parse::<TimeOfDay>().unwrap(), t(9, 5));
        assert_eq!(" 23:59 ".parse::<TimeOfDay>().unwrap(), t(23, 59));
    }

    #[test]
    fn rejects_malformed_times() {
        for bad in ["", "9", "ab:cd", "24:00", "12:60", "12:5", "123:00", "-1:00"] {
            assert!(
                matches!(bad.parse::<TimeOfDay>(), Err(PlannerError::InvalidTime(_))),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn formats_as_zero_padded_24h() {
        assert_eq!(t(7, 0).to_string(), "07:00");
        assert_eq!(t(16, 30).to_string(), "16:30");
    }

    #[test]
    fn range_overlap_is_half_open() {
        let morning = TimeRange::new(t(9, 0), t(10, 30)).unwrap();
        let adjacent = TimeRange::new(t(10, 30), t(12, 0)).unwrap();
        let inside = TimeRange::new(t(10, 0), t(10, 15)).unwrap();
        assert!(!morning.overlaps(&adjacent));
        assert!(!adjacent.overlaps(&morning));
        assert!(morning.overlaps(&inside));
        assert!(inside.overlaps(&morning));
    }

    #[test]
    fn range_parses_display_form() {
        let range: TimeRange = "15:00 - 16:30".parse().unwrap();
        assert_eq!(range.start(), t(15, 0));
        assert_eq!(range.duration_minutes(), 90);
        assert_eq!(range.to_string(), "15:00 - 16:30");
    }

    #[test]
    fn starting_at_stops_at_midnight() {
        assert!(TimeRange::starting_at(t(23, 0), 90).is_none());
        assert_eq!(
            TimeRange::starting_at(t(21, 0), 90).unwrap().end(),
            t(22, 30)
        );
    }
}
