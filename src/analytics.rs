use crate::focus::{REVIEW_SUBJECT, STUDY_TECHNIQUES};
use crate::request::{Course, Exam};
use crate::schedule::WeeklySchedule;
use chrono::NaiveDate;
use rand::Rng;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const FOCUS_SHARE_THRESHOLD: f64 = 0.3;
const URGENT_EXAM_DAYS: i64 = 7;
const UPCOMING_EXAM_DAYS: i64 = 14;
const URGENT_MIN_HOURS: f64 = 10.0;
const UPCOMING_MIN_HOURS: f64 = 7.0;
const MIN_RECOMMENDATIONS: usize = 3;

/// Hours per subject, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubjectDistribution {
    entries: Vec<(String, f64)>,
}

impl SubjectDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, subject: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| name == subject)
            .map(|(_, hours)| *hours)
    }

    /// Adds `hours` to `subject`, creating the bucket when missing.
    pub fn add(&mut self, subject: &str, hours: f64) {
        match self.entries.iter_mut().find(|(name, _)| name == subject) {
            Some((_, total)) => *total += hours,
            None => self.entries.push((subject.to_string(), hours)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries
            .iter()
            .map(|(name, hours)| (name.as_str(), *hours))
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, hours)| hours).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for SubjectDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (subject, hours) in &self.entries {
            map.serialize_entry(subject, hours)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for SubjectDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = SubjectDistribution;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of subjects to hours")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut distribution = SubjectDistribution::new();
                while let Some((subject, hours)) = access.next_entry::<String, f64>()? {
                    distribution.add(&subject, hours);
                }
                Ok(distribution)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_study_hours: f64,
    pub subject_distribution: SubjectDistribution,
    pub recommendations: Vec<String>,
}

/// Derives study totals and advice from a finished weekly schedule.
pub struct AnalyticsSummarizer<'a> {
    courses: &'a [Course],
    exams: &'a [Exam],
    today: NaiveDate,
}

impl<'a> AnalyticsSummarizer<'a> {
    pub fn new(courses: &'a [Course], exams: &'a [Exam], today: NaiveDate) -> Self {
        Self {
            courses,
            exams,
            today,
        }
    }

    pub fn summarize<R: Rng>(&self, schedule: &WeeklySchedule, rng: &mut R) -> Analytics {
        let (total_study_hours, subject_distribution) = self.subject_hours(schedule);

        let mut recommendations = self.exam_recommendations(&subject_distribution);
        recommendations.extend(self.focus_recommendation(&subject_distribution, total_study_hours));

        let first = rng.random_range(0..STUDY_TECHNIQUES.len());
        recommendations.push(STUDY_TECHNIQUES[first].to_string());
        if recommendations.len() < MIN_RECOMMENDATIONS {
            let second = (first + 1) % STUDY_TECHNIQUES.len();
            recommendations.push(STUDY_TECHNIQUES[second].to_string());
        }

        Analytics {
            total_study_hours,
            subject_distribution,
            recommendations,
        }
    }

    fn subject_hours(&self, schedule: &WeeklySchedule) -> (f64, SubjectDistribution) {
        let mut distribution = SubjectDistribution::new();
        for course in self.courses {
            distribution.add(&course.name, 0.0);
        }
        distribution.add(REVIEW_SUBJECT, 0.0);

        let mut total = 0.0;
        for session in schedule.sessions() {
            distribution.add(session.subject(), session.hours());
            total += session.hours();
        }
        (total, distribution)
    }

    fn exam_recommendations(&self, distribution: &SubjectDistribution) -> Vec<String> {
        let mut recommendations = Vec::new();
        for exam in self.exams {
            let days = exam.days_until(self.today);
            let hours = distribution.get(&exam.subject).unwrap_or(0.0);
            if days <= URGENT_EXAM_DAYS {
                if hours < URGENT_MIN_HOURS {
                    recommendations.push(format!(
                        "Consider adding more {} sessions before the upcoming exam in {} days.",
                        exam.subject, days
                    ));
                }
            } else if days <= UPCOMING_EXAM_DAYS && hours < UPCOMING_MIN_HOURS {
                recommendations.push(format!(
                    "Increase study time for {} as the exam is approaching in {} days.",
                    exam.subject, days
                ));
            }
        }
        recommendations
    }

    /// Affirms the top-priority course when it holds a large share of the week.
    fn focus_recommendation(
        &self,
        distribution: &SubjectDistribution,
        total_hours: f64,
    ) -> Option<String> {
        let top = self.courses.iter().fold(None::<&Course>, |best, course| match best {
            Some(best) if best.priority >= course.priority => Some(best),
            _ => Some(course),
        })?;
        let hours = distribution.get(&top.name).unwrap_or(0.0);
        (hours > total_hours * FOCUS_SHARE_THRESHOLD).then(|| {
            format!(
                "Your {} focus is appropriate given its high priority.",
                top.name
            )
        })
    }
}
