//! Priority-weighted placement of study sessions across the week.
//!
//! The allocator works in three steps:
//!
//! 1. derive a working priority per course, boosted by exam proximity,
//! 2. split the week's session budget into per-course quotas,
//! 3. walk Monday to Sunday filling 3-hour-spaced slots, probing later hours when a slot
//!    collides with unavailable time or an already placed session.

use crate::calendar::WEEK;
use crate::focus::{REVIEW_FOCUS, REVIEW_SUBJECT};
use crate::request::{Course, Exam, PlanningInput};
use crate::schedule::{StudySession, WeeklySchedule};
use crate::time::{TimeOfDay, TimeRange};
use chrono::{NaiveDate, Weekday};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

pub const SESSION_MINUTES: u16 = 90;
const SLOT_SPACING_MINUTES: u16 = 180;
const PROBE_STEP_MINUTES: u16 = 60;

/// Start of the Sunday review block (15:00).
const REVIEW_START_MINUTES: u16 = 15 * 60;

/// Working copy of a course with its exam boost applied.
#[derive(Debug, Clone, PartialEq)]
pub struct PrioritizedCourse {
    pub name: String,
    pub base_priority: f64,
    pub exam_boost: u8,
    pub priority: f64,
    /// Position in the caller's course list.
    pub input_index: usize,
}

/// Priority boost for an exam `days_until` days away.
pub fn exam_boost(days_until: i64) -> u8 {
    match days_until {
        d if d <= 7 => 3,
        d if d <= 14 => 2,
        d if d <= 30 => 1,
        _ => 0,
    }
}

/// Sessions that fit in one day, limited by both the study budget and the window length.
pub fn max_sessions_per_day(study_hours_per_day: f64, window: &TimeRange, break_minutes: u16) -> usize {
    let by_budget = (study_hours_per_day * 60.0 / f64::from(SESSION_MINUTES)).floor();
    let by_budget = if by_budget.is_finite() && by_budget > 0.0 {
        by_budget as usize
    } else {
        0
    };
    let per_session = usize::from(SESSION_MINUTES) + usize::from(break_minutes);
    let by_window = usize::from(window.duration_minutes()) / per_session;
    by_budget.min(by_window)
}

/// Applies exam boosts and orders courses by boosted priority, highest first.
///
/// The sort is stable, so equal priorities keep the caller's order. Boosts from several
/// exams on the same subject add up.
pub fn prioritize_courses(
    courses: &[Course],
    exams: &[Exam],
    today: NaiveDate,
) -> Vec<PrioritizedCourse> {
    let mut boosts: HashMap<&str, u8> = HashMap::new();
    for exam in exams {
        let boost = boosts.entry(exam.subject.as_str()).or_insert(0);
        *boost = boost.saturating_add(exam_boost(exam.days_until(today)));
    }

    let mut prioritized: Vec<PrioritizedCourse> = courses
        .iter()
        .enumerate()
        .map(|(input_index, course)| {
            let exam_boost = boosts.get(course.name.as_str()).copied().unwrap_or(0);
            PrioritizedCourse {
                name: course.name.clone(),
                base_priority: course.priority,
                exam_boost,
                priority: course.priority + f64::from(exam_boost),
                input_index,
            }
        })
        .collect();
    prioritized.sort_by(|a, b| b.priority.partial_cmp(&a.priority).unwrap_or(Ordering::Equal));
    prioritized
}

/// Splits `total_sessions` between courses in proportion to their priority.
///
/// `courses` must already be in priority order; the returned quotas are index-aligned
/// with it. Every course receives at least one session unless there are more courses
/// than sessions, in which case the lowest-priority courses get none.
pub fn allocate_quotas(courses: &[PrioritizedCourse], total_sessions: usize) -> Vec<usize> {
    if courses.is_empty() || total_sessions == 0 {
        return vec![0; courses.len()];
    }

    let total_points: f64 = courses.iter().map(|course| course.priority).sum();
    let equal_share = total_sessions / courses.len();
    let mut quotas: Vec<usize> = courses
        .iter()
        .map(|course| {
            let share = if total_points > 0.0 {
                (course.priority / total_points * total_sessions as f64).floor() as usize
            } else {
                equal_share
            };
            share.max(1)
        })
        .collect();

    let mut allocated: usize = quotas.iter().sum();
    if allocated <= total_sessions {
        return quotas;
    }

    let scale = total_sessions as f64 / allocated as f64;
    for quota in quotas.iter_mut() {
        *quota = ((*quota as f64 * scale).floor() as usize).max(1);
    }
    allocated = quotas.iter().sum();

    // Lowest priority gives up sessions first, then the rest in rotating passes.
    if let Some(lowest) = quotas.last_mut() {
        while allocated > total_sessions && *lowest > 1 {
            *lowest -= 1;
            allocated -= 1;
        }
    }
    while allocated > total_sessions {
        let mut trimmed = false;
        for quota in quotas.iter_mut().rev().skip(1) {
            if allocated <= total_sessions {
                break;
            }
            if *quota > 1 {
                *quota -= 1;
                allocated -= 1;
                trimmed = true;
            }
        }
        if !trimmed {
            break;
        }
    }

    // Only reachable when every quota is 1 and courses outnumber sessions.
    for quota in quotas.iter_mut().rev() {
        if allocated <= total_sessions {
            break;
        }
        allocated -= *quota;
        *quota = 0;
    }

    quotas
}

/// Distributes a week of study sessions for one planning input.
pub struct SessionAllocator<'a> {
    input: &'a PlanningInput,
    today: NaiveDate,
}

impl<'a> SessionAllocator<'a> {
    pub fn new(input: &'a PlanningInput, today: NaiveDate) -> Self {
        Self { input, today }
    }

    pub fn max_sessions_per_day(&self) -> usize {
        max_sessions_per_day(
            self.input.study_hours_per_day,
            &self.input.window,
            self.input.break_minutes,
        )
    }

    pub fn prioritized_courses(&self) -> Vec<PrioritizedCourse> {
        prioritize_courses(&self.input.courses, &self.input.exams, self.today)
    }

    /// Per-course quotas keyed by course name, in priority order.
    pub fn quotas(&self) -> Vec<(String, usize)> {
        let courses = self.prioritized_courses();
        let quotas = allocate_quotas(&courses, self.max_sessions_per_day() * WEEK.len());
        courses
            .into_iter()
            .map(|course| course.name)
            .zip(quotas)
            .collect()
    }

    pub fn allocate<R: Rng>(&self, rng: &mut R) -> WeeklySchedule {
        let per_day = self.max_sessions_per_day();
        let courses = self.prioritized_courses();
        let quotas = allocate_quotas(&courses, per_day * WEEK.len());
        for (course, quota) in courses.iter().zip(&quotas) {
            debug!(
                course = %course.name,
                priority = course.priority,
                exam_boost = course.exam_boost,
                quota,
                "course quota"
            );
        }

        let focus_areas = self.input.learning_style.all_focus_areas();
        let mut remaining = quotas;
        let mut schedule = WeeklySchedule::new();

        for day in WEEK {
            let mut sessions: Vec<StudySession> = Vec::new();
            let mut slots = per_day;

            if day == Weekday::Sun && per_day > 0 {
                slots -= 1;
                if let Some(review) = self.reserve_review(&courses, &mut remaining, rng) {
                    sessions.push(review);
                }
            }

            for slot in 0..slots {
                let Some(index) = remaining.iter().position(|&left| left > 0) else {
                    continue;
                };
                remaining[index] -= 1;
                let course = &courses[index];

                let Some(candidate) = self.slot_start(slot) else {
                    debug!(?day, slot, course = %course.name, "slot starts at or past the end hour, unit consumed");
                    continue;
                };

                match self.find_free_range(day, candidate, &sessions) {
                    Some(range) => {
                        let focus = focus_areas[rng.random_range(0..focus_areas.len())];
                        sessions.push(StudySession::new(range, course.name.as_str(), focus));
                    }
                    None => {
                        remaining[index] += 1;
                        debug!(?day, slot, course = %course.name, "no free slot, session returned to pool");
                    }
                }
            }

            schedule.set_day(day, sessions);
        }

        schedule
    }

    /// Reserves the Sunday review block, charging one session to a random course.
    fn reserve_review<R: Rng>(
        &self,
        courses: &[PrioritizedCourse],
        remaining: &mut [usize],
        rng: &mut R,
    ) -> Option<StudySession> {
        if self.input.courses.is_empty() {
            return None;
        }
        let range = TimeOfDay::from_minutes(REVIEW_START_MINUTES)
            .and_then(|start| TimeRange::starting_at(start, SESSION_MINUTES))?;
        if !self.input.window.contains(&range)
            || !self.input.availability.is_available(Weekday::Sun, &range)
        {
            debug!(%range, "review block unavailable");
            return None;
        }

        let pick = rng.random_range(0..self.input.courses.len());
        if let Some(index) = courses.iter().position(|course| course.input_index == pick) {
            remaining[index] = remaining[index].saturating_sub(1);
        }
        Some(StudySession::new(range, REVIEW_SUBJECT, REVIEW_FOCUS))
    }

    /// Candidate start for a slot, or `None` when its hour is at or past the end hour.
    fn slot_start(&self, slot: usize) -> Option<TimeOfDay> {
        let offset = u16::try_from(slot)
            .ok()
            .and_then(|slot| slot.checked_mul(SLOT_SPACING_MINUTES))?;
        self.input
            .window
            .start()
            .plus_minutes(offset)
            .filter(|start| start.hour() < self.input.window.end().hour())
    }

    /// First session range at or after `candidate`, in hour steps, that fits the window
    /// and collides with neither unavailable time nor `placed`.
    fn find_free_range(
        &self,
        day: Weekday,
        candidate: TimeOfDay,
        placed: &[StudySession],
    ) -> Option<TimeRange> {
        let mut start = candidate;
        loop {
            let range = TimeRange::starting_at(start, SESSION_MINUTES)?;
            if !self.input.window.contains(&range) {
                return None;
            }
            let clear_of_sessions = placed
                .iter()
                .all(|session| !session.range().overlaps(&range));
            if clear_of_sessions && self.input.availability.is_available(day, &range) {
                return Some(range);
            }
            start = start.plus_minutes(PROBE_STEP_MINUTES)?;
        }
    }
}
