use crate::analytics::Analytics;
use crate::calendar::{WEEK, day_name, parse_day};
use crate::time::TimeRange;
use chrono::Weekday;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// One fixed-length study block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    #[serde(rename = "time", alias = "timeRange")]
    range: TimeRange,
    subject: String,
    focus: String,
}

impl StudySession {
    pub fn new(range: TimeRange, subject: impl Into<String>, focus: impl Into<String>) -> Self {
        Self {
            range,
            subject: subject.into(),
            focus: focus.into(),
        }
    }

    pub fn range(&self) -> TimeRange {
        self.range
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn focus(&self) -> &str {
        &self.focus
    }

    pub fn hours(&self) -> f64 {
        f64::from(self.range.duration_minutes()) / 60.0
    }
}

/// Sessions for Monday through Sunday.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Vec<StudySession>; 7],
}

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    fn index(day: Weekday) -> usize {
        day.num_days_from_monday() as usize
    }

    pub fn day(&self, day: Weekday) -> &[StudySession] {
        &self.days[Self::index(day)]
    }

    /// Replaces a day's sessions, keeping them ordered by start time.
    pub fn set_day(&mut self, day: Weekday, mut sessions: Vec<StudySession>) {
        sessions.sort_by_key(|session| session.range.start());
        self.days[Self::index(day)] = sessions;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &[StudySession])> + '_ {
        WEEK.iter().map(move |&day| (day, self.day(day)))
    }

    pub fn sessions(&self) -> impl Iterator<Item = &StudySession> + '_ {
        self.days.iter().flatten()
    }

    pub fn session_count(&self) -> usize {
        self.days.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.session_count() == 0
    }
}

impl Serialize for WeeklySchedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(WEEK.len()))?;
        for (day, sessions) in self.iter() {
            map.serialize_entry(day_name(day), sessions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for WeeklySchedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct WeekVisitor;

        impl<'de> Visitor<'de> for WeekVisitor {
            type Value = WeeklySchedule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of day names to study sessions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut schedule = WeeklySchedule::new();
                while let Some((day, sessions)) =
                    access.next_entry::<String, Vec<StudySession>>()?
                {
                    let day = parse_day(&day).map_err(de::Error::custom)?;
                    schedule.set_day(day, sessions);
                }
                Ok(schedule)
            }
        }

        deserializer.deserialize_map(WeekVisitor)
    }
}

/// Weekly timetable plus the analytics derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub schedule: WeeklySchedule,
    pub analytics: Analytics,
}
