//! Core domain types for the Nutri computation layer.
//!
//! This module defines the fundamental types used throughout the system:
//! - Body measurements and BMI results
//! - Caloric profile inputs (sex, activity level, goal)
//! - Workout catalog and plan entries

use serde::{Deserialize, Serialize};

// ============================================================================
// Label helpers
// ============================================================================

/// Lowercase, trimmed form of a user- or API-supplied label
fn fold_label(label: &str) -> String {
    label.trim().to_lowercase().replace(['-', ' '], "_")
}

// ============================================================================
// Profile Types
// ============================================================================

/// Biological sex used by the BMR equation
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Sex {
    /// Parse a sex label ("M", "F", "male", "feminino", ...)
    pub fn from_label(label: &str) -> Option<Self> {
        match fold_label(label).as_str() {
            "m" | "male" | "masculino" => Some(Sex::Male),
            "f" | "female" | "feminino" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Lifestyle activity level for the TDEE multiplier
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Intense,
}

impl ActivityLevel {
    /// Parse a known activity label, English or Portuguese
    pub fn from_label(label: &str) -> Option<Self> {
        match fold_label(label).as_str() {
            "sedentary" | "sedentario" | "sedentário" => Some(ActivityLevel::Sedentary),
            "light" | "leve" => Some(ActivityLevel::Light),
            "moderate" | "moderado" => Some(ActivityLevel::Moderate),
            "intense" | "intenso" => Some(ActivityLevel::Intense),
            _ => None,
        }
    }

    /// Parse an activity label, falling back to `Sedentary` for anything unknown
    ///
    /// Sedentary is the lowest multiplier, so an unreadable label never
    /// overestimates energy needs.
    pub fn parse_or_default(label: &str) -> Self {
        match Self::from_label(label) {
            Some(level) => level,
            None => {
                tracing::warn!("Unknown activity level {:?}, using sedentary", label);
                ActivityLevel::Sedentary
            }
        }
    }
}

/// Fitness goal, shared by the calorie estimator and the plan generator
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    Lose,
    Maintain,
    Gain,
}

impl Goal {
    /// Parse a known goal label, English or Portuguese
    pub fn from_label(label: &str) -> Option<Self> {
        match fold_label(label).as_str() {
            "lose" | "lose_weight" | "emagrecer" | "perder" | "perder_peso" => Some(Goal::Lose),
            "gain" | "gain_muscle" | "ganhar" | "ganhar_massa" | "hipertrofia" => {
                Some(Goal::Gain)
            }
            "maintain" | "manter" | "manutencao" | "manutenção" => Some(Goal::Maintain),
            _ => None,
        }
    }

    /// Parse a goal label, falling back to `Maintain` for anything unknown
    pub fn parse_or_default(label: &str) -> Self {
        match Self::from_label(label) {
            Some(goal) => goal,
            None => {
                tracing::warn!("Unknown goal {:?}, using maintain", label);
                Goal::Maintain
            }
        }
    }
}

// ============================================================================
// BMI Types
// ============================================================================

/// A validated body measurement (transient, never persisted)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurement {
    pub weight_kg: f64,
    pub height_m: f64,
}

/// BMI classification bands
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    BelowWeight,
    Normal,
    Overweight,
    #[serde(rename = "obesity_1")]
    ObesityI,
    #[serde(rename = "obesity_2")]
    ObesityII,
    #[serde(rename = "obesity_3")]
    ObesityIII,
}

impl BmiCategory {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::BelowWeight => "Below normal weight",
            BmiCategory::Normal => "Normal weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObesityI => "Obesity class I",
            BmiCategory::ObesityII => "Obesity class II",
            BmiCategory::ObesityIII => "Obesity class III",
        }
    }
}

/// Outcome of a BMI computation
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct BmiResult {
    /// BMI rounded to one decimal place
    pub value: f64,
    pub category: BmiCategory,
}

// ============================================================================
// Calorie Types
// ============================================================================

/// Inputs of the daily caloric-need estimate
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CaloricProfile {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub age: u32,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
    pub goal: Goal,
}

// ============================================================================
// Workout Types
// ============================================================================

/// Perceived effort of a catalog workout
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
    Max,
}

/// A hand-authored workout template
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct WorkoutCatalogEntry {
    pub name: String,
    pub description: String,
    pub duration_label: String,
    pub intensity: Intensity,
}

/// One day of a generated workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutPlanEntry {
    pub day_label: String,
    pub exercise_name: String,
    pub description: String,
    pub duration_label: String,
    pub intensity: Intensity,
    pub preferred_time: String,
    pub minutes_per_session: u32,
}

/// The three per-goal workout catalogs
#[derive(Clone, Debug)]
pub struct Catalog {
    pub lose: Vec<WorkoutCatalogEntry>,
    pub maintain: Vec<WorkoutCatalogEntry>,
    pub gain: Vec<WorkoutCatalogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_labels() {
        assert_eq!(Goal::from_label("emagrecer"), Some(Goal::Lose));
        assert_eq!(Goal::from_label("  Ganhar Massa "), Some(Goal::Gain));
        assert_eq!(Goal::from_label("manter"), Some(Goal::Maintain));
        assert_eq!(Goal::from_label("lose"), Some(Goal::Lose));
        assert_eq!(Goal::from_label("bulk"), None);
    }

    #[test]
    fn test_unknown_goal_falls_back_to_maintain() {
        // Intentional: unrecognized goals use the maintain catalog / no adjustment
        assert_eq!(Goal::parse_or_default("bulk"), Goal::Maintain);
        assert_eq!(Goal::parse_or_default(""), Goal::Maintain);
    }

    #[test]
    fn test_activity_labels() {
        assert_eq!(ActivityLevel::from_label("moderado"), Some(ActivityLevel::Moderate));
        assert_eq!(ActivityLevel::from_label("Sedentário"), Some(ActivityLevel::Sedentary));
        assert_eq!(ActivityLevel::from_label("leve"), Some(ActivityLevel::Light));
        assert_eq!(ActivityLevel::from_label("INTENSE"), Some(ActivityLevel::Intense));
    }

    #[test]
    fn test_unknown_activity_falls_back_to_sedentary() {
        // Intentional: the safe default, not an error
        assert_eq!(
            ActivityLevel::parse_or_default("atleta"),
            ActivityLevel::Sedentary
        );
    }

    #[test]
    fn test_sex_labels() {
        assert_eq!(Sex::from_label("M"), Some(Sex::Male));
        assert_eq!(Sex::from_label("f"), Some(Sex::Female));
        assert_eq!(Sex::from_label("feminino"), Some(Sex::Female));
        assert_eq!(Sex::from_label("x"), None);
    }

    #[test]
    fn test_bmi_category_names() {
        assert_eq!(serde_json::to_string(&BmiCategory::BelowWeight).unwrap(), "\"below_weight\"");
        assert_eq!(serde_json::to_string(&BmiCategory::ObesityIII).unwrap(), "\"obesity_3\"");
    }

    #[test]
    fn test_sex_serializes_as_letter() {
        assert_eq!(serde_json::to_string(&Sex::Male).unwrap(), "\"M\"");
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"F\"");
    }
}
