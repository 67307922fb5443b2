use crate::error::{PlannerError, PlannerResult};
use crate::time::TimeRange;
use chrono::Weekday;
use std::collections::HashMap;

/// Planning week in display order.
pub const WEEK: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Accepts full or three-letter day names in any case.
pub fn parse_day(value: &str) -> PlannerResult<Weekday> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| PlannerError::InvalidDay(value.to_string()))
}

/// Per-weekday blocked time ranges.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvailabilityCalendar {
    blocked: HashMap<Weekday, Vec<TimeRange>>,
}

impl AvailabilityCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self, day: Weekday, range: TimeRange) {
        self.blocked.entry(day).or_default().push(range);
    }

    pub fn blocked_on(&self, day: Weekday) -> &[TimeRange] {
        self.blocked.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when `range` touches none of the day's blocked ranges.
    pub fn is_available(&self, day: Weekday, range: &TimeRange) -> bool {
        !self
            .blocked_on(day)
            .iter()
            .any(|blocked| blocked.overlaps(range))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(s: &str) -> TimeRange {
        s.parse().unwrap()
    }

    #[test]
    fn parse_day_accepts_long_short_and_mixed_case() {
        assert_eq!(parse_day("Monday").unwrap(), Weekday::Mon);
        assert_eq!(parse_day("sun").unwrap(), Weekday::Sun);
        assert_eq!(parse_day(" THURSDAY ").unwrap(), Weekday::Thu);
        assert!(matches!(
            parse_day("Funday"),
            Err(PlannerError::InvalidDay(_))
        ));
    }

    #[test]
    fn week_starts_monday_and_names_round_trip() {
        assert_eq!(WEEK[0], Weekday::Mon);
        assert_eq!(WEEK[6], Weekday::Sun);
        for day in WEEK {
            assert_eq!(parse_day(day_name(day)).unwrap(), day);
        }
    }

    #[test]
    fn blocked_ranges_only_affect_their_day() {
        let mut calendar = AvailabilityCalendar::new();
        calendar.block(Weekday::Tue, range("12:00 - 14:00"));

        assert!(!calendar.is_available(Weekday::Tue, &range("13:00 - 14:30")));
        assert!(calendar.is_available(Weekday::Tue, &range("14:00 - 15:30")));
        assert!(calendar.is_available(Weekday::Wed, &range("13:00 - 14:30")));
        assert!(calendar.blocked_on(Weekday::Fri).is_empty());
    }
}
