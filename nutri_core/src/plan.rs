//! Deterministic workout plan generation.
//!
//! Day `i` of a plan is catalog entry `i mod len` for the goal, so plans
//! longer than the catalog repeat entries. No randomness: the same request
//! always yields the same plan.

use crate::catalog::catalog_for;
use crate::{Error, Goal, Result, WorkoutPlanEntry};
use serde::{Deserialize, Serialize};

/// Longest plan that can be generated, in days
pub const MAX_PLAN_DAYS: u32 = 366;

/// Parameters of a plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanRequest {
    pub days_per_week: u32,
    pub goal: Goal,
    pub minutes_per_session: u32,
    pub preferred_time: String,
}

impl PlanRequest {
    /// Build a request from raw labels as the app's plan form submits them
    ///
    /// Unrecognized goals use the maintain catalog.
    pub fn from_labels(
        days_per_week: u32,
        goal: &str,
        minutes_per_session: u32,
        preferred_time: &str,
    ) -> Self {
        Self {
            days_per_week,
            goal: Goal::parse_or_default(goal),
            minutes_per_session,
            preferred_time: preferred_time.to_string(),
        }
    }
}

/// Generate a plan with one entry per training day
pub fn generate_plan(request: &PlanRequest) -> Result<Vec<WorkoutPlanEntry>> {
    if request.days_per_week == 0 {
        return Err(Error::InvalidInput(
            "days per week must be at least 1".into(),
        ));
    }
    if request.days_per_week > MAX_PLAN_DAYS {
        return Err(Error::InvalidInput(format!(
            "days per week must be at most {}, got {}",
            MAX_PLAN_DAYS, request.days_per_week
        )));
    }

    let catalog = catalog_for(request.goal);
    if catalog.is_empty() {
        return Err(Error::CatalogValidation(format!(
            "No workouts for goal {:?}",
            request.goal
        )));
    }

    let plan: Vec<WorkoutPlanEntry> = (0..request.days_per_week as usize)
        .map(|i| {
            let template = &catalog[i % catalog.len()];
            WorkoutPlanEntry {
                day_label: format!("Day {}", i + 1),
                exercise_name: template.name.clone(),
                description: template.description.clone(),
                duration_label: template.duration_label.clone(),
                intensity: template.intensity,
                preferred_time: request.preferred_time.clone(),
                minutes_per_session: request.minutes_per_session,
            }
        })
        .collect();

    tracing::info!(
        "Generated {}-day plan for {:?} ({} catalog entries)",
        plan.len(),
        request.goal,
        catalog.len()
    );
    Ok(plan)
}
