use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PlannerError {
    InvalidTime(String),
    InvalidWindow { start: String, end: String },
    InvalidDay(String),
    InvalidRange { day: String, start: String, end: String },
    InvalidDate { subject: String, value: String },
    DuplicateCourse(String),
    InvalidPriority { course: String, priority: f64 },
    InvalidStudyHours(f64),
}

impl fmt::Display for PlannerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlannerError::InvalidTime(value) => {
                write!(f, "invalid time '{value}' (expected HH:MM, 24-hour clock)")
            }
            PlannerError::InvalidWindow { start, end } => {
                write!(f, "end time {end} must be after start time {start}")
            }
            PlannerError::InvalidDay(value) => write!(f, "unknown day '{value}'"),
            PlannerError::InvalidRange { day, start, end } => write!(
                f,
                "unavailable range on {day} must end after it starts ({start} - {end})"
            ),
            PlannerError::InvalidDate { subject, value } => write!(
                f,
                "exam for {subject} has invalid date '{value}' (expected YYYY-MM-DD)"
            ),
            PlannerError::DuplicateCourse(name) => write!(f, "duplicate course '{name}'"),
            PlannerError::InvalidPriority { course, priority } => write!(
                f,
                "course {course} has invalid priority {priority} (must be a non-negative number)"
            ),
            PlannerError::InvalidStudyHours(hours) => write!(
                f,
                "studyHoursPerDay must be a non-negative number (got {hours})"
            ),
        }
    }
}

impl std::error::Error for PlannerError {}

pub type PlannerResult<T> = Result<T, PlannerError>;
