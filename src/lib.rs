pub mod allocator;
pub mod analytics;
pub mod calendar;
pub mod config;
pub mod error;
pub mod focus;
#[cfg(feature = "http_api")]
pub mod http_api;
pub mod persistence;
pub mod planner;
pub mod request;
pub mod schedule;
pub mod time;

pub use allocator::{PrioritizedCourse, SessionAllocator};
pub use analytics::{Analytics, AnalyticsSummarizer, SubjectDistribution};
pub use calendar::AvailabilityCalendar;
pub use config::{ConfigError, ServerConfig};
pub use error::{PlannerError, PlannerResult};
pub use focus::LearningStyle;
pub use persistence::{
    PersistenceError, StudyProfile, load_request_from_json, save_request_to_json,
};
pub use planner::{plan_from_input, plan_week};
pub use request::{Course, Exam, ExamDate, PlanningInput, StudyRequest, UnavailableTime};
pub use schedule::{StudyPlan, StudySession, WeeklySchedule};
pub use time::{TimeOfDay, TimeRange};
