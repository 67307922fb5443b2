use crate::allocator::SessionAllocator;
use crate::analytics::AnalyticsSummarizer;
use crate::error::PlannerResult;
use crate::request::{PlanningInput, StudyRequest};
use crate::schedule::StudyPlan;
use chrono::NaiveDate;
use rand::Rng;
use tracing::debug;

/// Validates `request` and builds the week's plan.
///
/// `today` anchors exam countdowns and `rng` drives focus labels, the Sunday review
/// charge and technique tips, so the same inputs and seed always give the same plan.
pub fn plan_week<R: Rng>(
    request: &StudyRequest,
    today: NaiveDate,
    rng: &mut R,
) -> PlannerResult<StudyPlan> {
    let input = request.parse()?;
    Ok(plan_from_input(&input, today, rng))
}

pub fn plan_from_input<R: Rng>(input: &PlanningInput, today: NaiveDate, rng: &mut R) -> StudyPlan {
    let schedule = SessionAllocator::new(input, today).allocate(rng);
    let analytics = AnalyticsSummarizer::new(&input.courses, &input.exams, today)
        .summarize(&schedule, rng);
    debug!(
        sessions = schedule.session_count(),
        hours = analytics.total_study_hours,
        "plan generated"
    );
    StudyPlan {
        schedule,
        analytics,
    }
}
