use chrono::{NaiveDate, Weekday};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use study_planner::calendar::WEEK;
use study_planner::focus::{REVIEW_FOCUS, REVIEW_SUBJECT};
use study_planner::{
    Course, ExamDate, LearningStyle, PlannerError, StudyRequest, UnavailableTime, plan_week,
};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

fn request(courses: &[(&str, f64)], hours: f64) -> StudyRequest {
    StudyRequest {
        courses: Some(
            courses
                .iter()
                .map(|(name, priority)| Course::new(*name, *priority))
                .collect(),
        ),
        study_hours_per_day: Some(hours),
        break_length: 10,
        ..StudyRequest::default()
    }
}

#[test]
fn equal_priorities_fill_fourteen_sessions() {
    let request = request(&[("A", 5.0), ("B", 5.0)], 3.0);
    let mut rng = StdRng::seed_from_u64(7);
    let plan = plan_week(&request, today(), &mut rng).unwrap();

    assert_eq!(plan.schedule.session_count(), 14);
    assert_eq!(plan.analytics.total_study_hours, 21.0);
    assert_eq!(plan.analytics.subject_distribution.get("A"), Some(10.5));
    assert_eq!(plan.analytics.subject_distribution.get("B"), Some(9.0));
    assert_eq!(
        plan.analytics.subject_distribution.get(REVIEW_SUBJECT),
        Some(1.5)
    );
    for day in &WEEK[..6] {
        assert_eq!(plan.schedule.day(*day).len(), 2, "{day:?}");
    }
}

#[test]
fn urgent_exam_is_called_out_with_days_remaining() {
    let mut request = request(&[("Math", 1.0), ("Physics", 10.0)], 3.0);
    request.exam_dates = vec![ExamDate::new("Math", "2025-03-06")];
    let mut rng = StdRng::seed_from_u64(11);
    let plan = plan_week(&request, today(), &mut rng).unwrap();

    assert!(
        plan.analytics
            .recommendations
            .iter()
            .any(|r| r.contains("Math") && r.contains("5 days")),
        "{:?}",
        plan.analytics.recommendations
    );
}

#[test]
fn same_seed_gives_same_plan() {
    let mut request = request(&[("Math", 4.0), ("Art", 2.0), ("History", 3.0)], 4.5);
    request.learning_style = "kinesthetic".to_string();
    request.unavailable_times = vec![UnavailableTime::new("Wednesday", "12:00", "14:00")];

    let first = plan_week(&request, today(), &mut StdRng::seed_from_u64(99)).unwrap();
    let second = plan_week(&request, today(), &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_course_list_gives_empty_week() {
    let request = request(&[], 3.0);
    let plan = plan_week(&request, today(), &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(plan.schedule.is_empty());
    assert_eq!(plan.analytics.total_study_hours, 0.0);
    assert_eq!(plan.analytics.recommendations.len(), 2);
}

#[test]
fn short_window_fits_no_sessions() {
    let mut request = request(&[("Math", 3.0)], 6.0);
    request.start_time = "09:00".to_string();
    request.end_time = "10:00".to_string();
    let plan = plan_week(&request, today(), &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(plan.schedule.is_empty());
}

#[test]
fn review_is_skipped_when_sunday_afternoon_is_blocked() {
    let mut request = request(&[("Math", 3.0)], 3.0);
    request.unavailable_times = vec![UnavailableTime::new("Sunday", "14:00", "18:00")];
    let plan = plan_week(&request, today(), &mut StdRng::seed_from_u64(1)).unwrap();
    assert!(
        plan.schedule
            .day(Weekday::Sun)
            .iter()
            .all(|session| session.subject() != REVIEW_SUBJECT)
    );
}

#[test]
fn invalid_window_is_reported() {
    let mut request = request(&[("Math", 3.0)], 3.0);
    request.end_time = "09:00".to_string();
    let err = plan_week(&request, today(), &mut StdRng::seed_from_u64(1)).unwrap_err();
    assert!(matches!(err, PlannerError::InvalidWindow { .. }));
}

#[test]
fn far_exam_does_not_cancel_a_near_one() {
    let mut request = request(&[("Art", 2.0), ("Math", 1.0)], 1.5);
    request.exam_dates = vec![
        ExamDate::new("Math", "2025-03-06"),
        ExamDate::new("Math", "2025-05-30"),
    ];
    let plan = plan_week(&request, today(), &mut StdRng::seed_from_u64(4)).unwrap();
    assert_eq!(plan.schedule.day(Weekday::Mon)[0].subject(), "Math");
}

#[test]
fn minute_end_time_skips_the_end_hour_slot() {
    let mut request = request(&[("A", 3.0), ("B", 1.0)], 6.0);
    request.start_time = "08:00".to_string();
    request.end_time = "17:30".to_string();
    request.break_length = 0;
    let plan = plan_week(&request, today(), &mut StdRng::seed_from_u64(8)).unwrap();

    assert!(plan.schedule.sessions().all(|s| s.range().start().hour() < 17));
    // A burns a unit on the 17:00 slot each day, so its 21 units end on Saturday.
    assert_eq!(plan.schedule.day(Weekday::Sat)[1].subject(), "B");
    assert_eq!(plan.analytics.subject_distribution.get("A"), Some(24.0));
}

fn arb_request() -> impl Strategy<Value = StudyRequest> {
    let courses = prop::collection::vec(0u8..=10, 0..6);
    let blocks = prop::collection::vec((0usize..7, 6u16..20, 1u16..4), 0..6);
    let styles = prop::sample::select(vec!["visual", "auditory", "reading", "kinesthetic", "other"]);
    (
        courses,
        0u8..=16,
        0u16..=45,
        6u16..=12,
        4u16..=12,
        prop::sample::select(vec![0u16, 15, 30, 45]),
        blocks,
        styles,
        prop::collection::vec((0usize..3, -5i64..60), 0..4),
    )
        .prop_map(
            |(priorities, half_hours, break_length, start, span, end_minute, blocks, style, exams)| {
                let courses: Vec<Course> = priorities
                    .iter()
                    .enumerate()
                    .map(|(idx, priority)| Course::new(format!("Course{idx}"), f64::from(*priority)))
                    .collect();
                // Few subjects on purpose, so one course often has several exams.
                let exam_dates = exams
                    .into_iter()
                    .filter(|(idx, _)| *idx < courses.len())
                    .map(|(idx, days)| {
                        let date = today() + chrono::Duration::days(days);
                        ExamDate::new(format!("Course{idx}"), date.to_string())
                    })
                    .collect();
                let end = (start + span).min(23);
                StudyRequest {
                    name: None,
                    courses: Some(courses),
                    study_hours_per_day: Some(f64::from(half_hours) / 2.0),
                    break_length,
                    start_time: format!("{start:02}:00"),
                    end_time: format!("{end:02}:{end_minute:02}"),
                    learning_style: style.to_string(),
                    unavailable_times: blocks
                        .into_iter()
                        .map(|(day, hour, len)| {
                            UnavailableTime::new(
                                format!("{:?}", WEEK[day]),
                                format!("{hour:02}:00"),
                                format!("{:02}:30", (hour + len).min(23)),
                            )
                        })
                        .collect(),
                    exam_dates,
                }
            },
        )
}

proptest! {
    #[test]
    fn generated_plans_hold_their_invariants(request in arb_request(), seed in any::<u64>()) {
        let input = request.parse().unwrap();
        let plan = plan_week(&request, today(), &mut StdRng::seed_from_u64(seed)).unwrap();
        let analytics = &plan.analytics;

        prop_assert_eq!(
            analytics.total_study_hours,
            plan.schedule.session_count() as f64 * 1.5
        );
        prop_assert!((analytics.subject_distribution.total() - analytics.total_study_hours).abs() < 1e-9);
        prop_assert!(analytics.recommendations.len() >= 2);

        let style: LearningStyle = request.learning_style.parse().unwrap();
        let labels = style.all_focus_areas();
        for (day, sessions) in plan.schedule.iter() {
            for pair in sessions.windows(2) {
                prop_assert!(pair[0].range().start() <= pair[1].range().start());
            }
            for (idx, session) in sessions.iter().enumerate() {
                let range = session.range();
                prop_assert_eq!(range.duration_minutes(), 90);
                prop_assert!(input.window.contains(&range));
                prop_assert!(range.start().hour() < input.window.end().hour());
                prop_assert!(input.availability.is_available(day, &range));
                for other in &sessions[idx + 1..] {
                    prop_assert!(!range.overlaps(&other.range()));
                }
                if session.subject() == REVIEW_SUBJECT {
                    prop_assert_eq!(day, Weekday::Sun);
                    prop_assert_eq!(session.focus(), REVIEW_FOCUS);
                } else {
                    prop_assert!(labels.iter().any(|label| *label == session.focus()));
                    prop_assert!(request.courses().iter().any(|c| c.name == session.subject()));
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn quotas_never_exceed_the_week(
        priorities in prop::collection::vec(0u8..=10, 1..8),
        total in 0usize..=28,
    ) {
        use study_planner::allocator::{allocate_quotas, prioritize_courses};

        let courses: Vec<Course> = priorities
            .iter()
            .enumerate()
            .map(|(idx, priority)| Course::new(format!("C{idx}"), f64::from(*priority)))
            .collect();
        let prioritized = prioritize_courses(&courses, &[], today());
        let quotas = allocate_quotas(&prioritized, total);

        prop_assert_eq!(quotas.len(), courses.len());
        prop_assert!(quotas.iter().sum::<usize>() <= total);
        if total >= courses.len() {
            prop_assert!(quotas.iter().all(|quota| *quota >= 1));
        }
    }
}
