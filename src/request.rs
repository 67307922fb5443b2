use crate::calendar::{AvailabilityCalendar, parse_day};
use crate::error::{PlannerError, PlannerResult};
use crate::focus::LearningStyle;
use crate::time::{TimeOfDay, TimeRange};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub priority: f64,
}

impl Course {
    pub fn new(name: impl Into<String>, priority: f64) -> Self {
        Self {
            name: name.into(),
            priority,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnavailableTime {
    pub day: String,
    pub start: String,
    pub end: String,
}

impl UnavailableTime {
    pub fn new(day: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            day: day.into(),
            start: start.into(),
            end: end.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamDate {
    pub subject: String,
    pub date: String,
}

impl ExamDate {
    pub fn new(subject: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            date: date.into(),
        }
    }
}

/// Request body accepted by the planner, as sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<Course>>,
    #[serde(default)]
    pub study_hours_per_day: Option<f64>,
    /// Minutes between sessions. Numeric strings are accepted too.
    #[serde(default, deserialize_with = "minutes_from_number_or_string")]
    pub break_length: u16,
    /// Missing window times are rejected by `parse`, after the required-field check.
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default)]
    pub learning_style: String,
    #[serde(default)]
    pub unavailable_times: Vec<UnavailableTime>,
    #[serde(default)]
    pub exam_dates: Vec<ExamDate>,
}

impl Default for StudyRequest {
    fn default() -> Self {
        Self {
            name: None,
            courses: Some(Vec::new()),
            study_hours_per_day: Some(3.0),
            break_length: 15,
            start_time: "09:00".to_string(),
            end_time: "17:00".to_string(),
            learning_style: String::new(),
            unavailable_times: Vec::new(),
            exam_dates: Vec::new(),
        }
    }
}

impl StudyRequest {
    /// A request needs a course list and a non-zero daily study budget.
    pub fn has_required_fields(&self) -> bool {
        self.courses.is_some() && self.study_hours_per_day.is_some_and(|hours| hours != 0.0)
    }

    pub fn courses(&self) -> &[Course] {
        self.courses.as_deref().unwrap_or_default()
    }

    pub fn upsert_course(&mut self, course: Course) {
        let courses = self.courses.get_or_insert_with(Vec::new);
        match courses.iter_mut().find(|existing| existing.name == course.name) {
            Some(existing) => existing.priority = course.priority,
            None => courses.push(course),
        }
    }

    pub fn remove_course(&mut self, name: &str) -> bool {
        let Some(courses) = self.courses.as_mut() else {
            return false;
        };
        let before = courses.len();
        courses.retain(|course| course.name != name);
        courses.len() != before
    }

    /// Validates every field and converts the wire strings into typed values.
    pub fn parse(&self) -> PlannerResult<PlanningInput> {
        let courses = self.courses().to_vec();
        let mut names = HashSet::with_capacity(courses.len());
        for course in &courses {
            if !course.priority.is_finite() || course.priority < 0.0 {
                return Err(PlannerError::InvalidPriority {
                    course: course.name.clone(),
                    priority: course.priority,
                });
            }
            if !names.insert(course.name.as_str()) {
                return Err(PlannerError::DuplicateCourse(course.name.clone()));
            }
        }

        let study_hours_per_day = self.study_hours_per_day.unwrap_or(0.0);
        if !study_hours_per_day.is_finite() || study_hours_per_day < 0.0 {
            return Err(PlannerError::InvalidStudyHours(study_hours_per_day));
        }

        let start: TimeOfDay = self.start_time.parse()?;
        let end: TimeOfDay = self.end_time.parse()?;
        let window = TimeRange::new(start, end).ok_or_else(|| PlannerError::InvalidWindow {
            start: self.start_time.clone(),
            end: self.end_time.clone(),
        })?;

        let mut availability = AvailabilityCalendar::new();
        for unavailable in &self.unavailable_times {
            let day = parse_day(&unavailable.day)?;
            let start: TimeOfDay = unavailable.start.parse()?;
            let end: TimeOfDay = unavailable.end.parse()?;
            let range = TimeRange::new(start, end).ok_or_else(|| PlannerError::InvalidRange {
                day: unavailable.day.clone(),
                start: unavailable.start.clone(),
                end: unavailable.end.clone(),
            })?;
            availability.block(day, range);
        }

        let exams = self
            .exam_dates
            .iter()
            .map(|exam| {
                parse_exam_date(&exam.date)
                    .map(|date| Exam {
                        subject: exam.subject.clone(),
                        date,
                    })
                    .ok_or_else(|| PlannerError::InvalidDate {
                        subject: exam.subject.clone(),
                        value: exam.date.clone(),
                    })
            })
            .collect::<PlannerResult<Vec<_>>>()?;

        let learning_style = self
            .learning_style
            .parse()
            .unwrap_or(LearningStyle::Unspecified);

        Ok(PlanningInput {
            courses,
            study_hours_per_day,
            break_minutes: self.break_length,
            window,
            learning_style,
            availability,
            exams,
        })
    }
}

/// Exam with a parsed calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exam {
    pub subject: String,
    pub date: NaiveDate,
}

impl Exam {
    /// Whole days from `today` until the exam; negative once it has passed.
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}

/// Validated planner input.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningInput {
    pub courses: Vec<Course>,
    pub study_hours_per_day: f64,
    pub break_minutes: u16,
    pub window: TimeRange,
    pub learning_style: LearningStyle,
    pub availability: AvailabilityCalendar,
    pub exams: Vec<Exam>,
}

fn parse_exam_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn minutes_from_number_or_string<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawMinutes {
        Number(f64),
        Text(String),
    }

    let minutes = match RawMinutes::deserialize(deserializer)? {
        RawMinutes::Number(value) => value,
        RawMinutes::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid minutes '{text}'")))?,
    };
    if !minutes.is_finite() || minutes < 0.0 || minutes > f64::from(u16::MAX) {
        return Err(serde::de::Error::custom(format!(
            "minutes must be between 0 and {} (got {minutes})",
            u16::MAX
        )));
    }
    Ok(minutes.floor() as u16)
}
