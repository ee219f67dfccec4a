//! CSV export of workout plans.

use crate::{Intensity, Result, WorkoutPlanEntry};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow<'a> {
    day: &'a str,
    exercise: &'a str,
    description: &'a str,
    duration: &'a str,
    intensity: Intensity,
    preferred_time: &'a str,
    minutes_per_session: u32,
}

impl<'a> From<&'a WorkoutPlanEntry> for CsvRow<'a> {
    fn from(entry: &'a WorkoutPlanEntry) -> Self {
        CsvRow {
            day: &entry.day_label,
            exercise: &entry.exercise_name,
            description: &entry.description,
            duration: &entry.duration_label,
            intensity: entry.intensity,
            preferred_time: &entry.preferred_time,
            minutes_per_session: entry.minutes_per_session,
        }
    }
}

/// Write a plan to CSV, replacing any existing file
///
/// Returns the number of rows written.
pub fn export_plan_csv(plan: &[WorkoutPlanEntry], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)?;
    for entry in plan {
        writer.serialize(CsvRow::from(entry))?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    file.sync_all()?;

    tracing::info!("Exported {} plan entries to {:?}", plan.len(), path);
    Ok(plan.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{generate_plan, PlanRequest};

    #[test]
    fn test_export_writes_header_and_rows() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.csv");
        let plan = generate_plan(&PlanRequest::from_labels(3, "maintain", 40, "evening")).unwrap();

        assert_eq!(export_plan_csv(&plan, &path).unwrap(), 3);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("day,exercise,description,duration,intensity"));
        assert!(lines[1].starts_with("Day 1,Jogging,"));
        assert!(lines[1].ends_with(",medium,evening,40"));
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plan.csv");

        let long = generate_plan(&PlanRequest::from_labels(6, "gain", 50, "morning")).unwrap();
        export_plan_csv(&long, &path).unwrap();
        let short = generate_plan(&PlanRequest::from_labels(1, "gain", 50, "morning")).unwrap();
        export_plan_csv(&short, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
