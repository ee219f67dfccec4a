//! Default workout catalogs, one per goal.
//!
//! The catalogs are static data: built once, shared read-only afterwards.

use crate::types::*;
use once_cell::sync::Lazy;

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

/// Workout templates for a goal from the default catalog
pub fn catalog_for(goal: Goal) -> &'static [WorkoutCatalogEntry] {
    get_default_catalog().entries(goal)
}

fn entry(
    name: &str,
    description: &str,
    duration_label: &str,
    intensity: Intensity,
) -> WorkoutCatalogEntry {
    WorkoutCatalogEntry {
        name: name.into(),
        description: description.into(),
        duration_label: duration_label.into(),
        intensity,
    }
}

/// Builds the default catalog
///
/// Prefer `get_default_catalog()`; this is kept for tests and custom catalogs.
pub fn build_default_catalog() -> Catalog {
    // Fat loss: conditioning first, strength to preserve muscle
    let lose = vec![
        entry(
            "HIIT Intervals",
            "30 s all-out effort, 30 s rest, repeated for 10 rounds",
            "20 min",
            Intensity::Max,
        ),
        entry(
            "Brisk Walk",
            "Steady walk at a pace where talking is possible but effortful",
            "40 min",
            Intensity::Low,
        ),
        entry(
            "Full-Body Circuit",
            "Squats, push-ups, lunges and rows back to back, 4 rounds",
            "30 min",
            Intensity::High,
        ),
        entry(
            "Cycling",
            "Moderate steady-state ride, flat or light hills",
            "45 min",
            Intensity::Medium,
        ),
        entry(
            "Jump Rope & Core",
            "Alternate 2 min of jump rope with 1 min of planks",
            "25 min",
            Intensity::High,
        ),
    ];

    // Muscle gain: split training with progressive load
    let gain = vec![
        entry(
            "Upper Body Push",
            "Bench press, overhead press and dips, 4 sets of 8-10",
            "50 min",
            Intensity::High,
        ),
        entry(
            "Lower Body",
            "Squats, Romanian deadlifts and lunges, 4 sets of 8-10",
            "50 min",
            Intensity::High,
        ),
        entry(
            "Upper Body Pull",
            "Pull-ups, barbell rows and curls, 4 sets of 8-10",
            "45 min",
            Intensity::High,
        ),
        entry(
            "Heavy Compound Day",
            "Deadlift and squat singles and triples building to a top set",
            "60 min",
            Intensity::Max,
        ),
        entry(
            "Mobility & Recovery",
            "Foam rolling and light stretching to support recovery",
            "20 min",
            Intensity::Low,
        ),
    ];

    // Maintenance: balanced mix
    let maintain = vec![
        entry(
            "Jogging",
            "Easy-pace run at conversational effort",
            "30 min",
            Intensity::Medium,
        ),
        entry(
            "Functional Training",
            "Kettlebell swings, carries and step-ups, 3 rounds",
            "35 min",
            Intensity::Medium,
        ),
        entry(
            "Yoga",
            "Flow sequence focusing on flexibility and balance",
            "40 min",
            Intensity::Low,
        ),
        entry(
            "Swimming",
            "Continuous laps alternating strokes",
            "30 min",
            Intensity::Medium,
        ),
    ];

    Catalog {
        lose,
        maintain,
        gain,
    }
}

impl Catalog {
    /// Entries for a goal
    pub fn entries(&self, goal: Goal) -> &[WorkoutCatalogEntry] {
        match goal {
            Goal::Lose => &self.lose,
            Goal::Gain => &self.gain,
            Goal::Maintain => &self.maintain,
        }
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for goal in [Goal::Lose, Goal::Maintain, Goal::Gain] {
            let entries = self.entries(goal);
            if entries.is_empty() {
                errors.push(format!("Catalog for {:?} has no entries", goal));
            }

            for (idx, e) in entries.iter().enumerate() {
                if e.name.trim().is_empty() {
                    errors.push(format!("{:?} entry {} has empty name", goal, idx));
                }
                if e.description.trim().is_empty() {
                    errors.push(format!("{:?} entry '{}' has empty description", goal, e.name));
                }
                if e.duration_label.trim().is_empty() {
                    errors.push(format!(
                        "{:?} entry '{}' has empty duration label",
                        goal, e.name
                    ));
                }
            }
        }

        errors
    }
}
