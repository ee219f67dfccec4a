//! Daily caloric-need estimation.
//!
//! Mifflin-St Jeor BMR, scaled by an activity multiplier, then shifted by
//! a fixed goal adjustment:
//!
//! `BMR = 10 x weight_kg + 6.25 x height_cm - 5 x age + (5 | -161)`

use crate::config::CaloriesConfig;
use crate::{ActivityLevel, CaloricProfile, Error, Goal, Result, Sex};

/// Daily deficit / surplus applied for lose / gain goals (kcal)
pub const GOAL_ADJUSTMENT_KCAL: f64 = 500.0;

const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -161.0;

/// Basal metabolic rate in kcal/day
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age: u32, sex: Sex) -> f64 {
    let offset = match sex {
        Sex::Male => MALE_OFFSET,
        Sex::Female => FEMALE_OFFSET,
    };
    10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age) + offset
}

/// Activity multiplier for a level
pub fn activity_factor(level: ActivityLevel) -> f64 {
    match level {
        ActivityLevel::Sedentary => 1.2,
        ActivityLevel::Light => 1.375,
        ActivityLevel::Moderate => 1.55,
        ActivityLevel::Intense => 1.725,
    }
}

/// Scale BMR by activity level (total daily energy expenditure)
pub fn scale_by_activity(bmr: f64, level: ActivityLevel) -> f64 {
    bmr * activity_factor(level)
}

/// Apply the goal adjustment and round to whole kcal
pub fn apply_goal(calories: f64, goal: Goal) -> i64 {
    let adjusted = match goal {
        Goal::Lose => calories - GOAL_ADJUSTMENT_KCAL,
        Goal::Gain => calories + GOAL_ADJUSTMENT_KCAL,
        Goal::Maintain => calories,
    };
    adjusted.round() as i64
}

impl CaloricProfile {
    /// Unchecked composition of BMR, activity and goal
    pub fn daily_calories(&self) -> i64 {
        let bmr = compute_bmr(self.weight_kg, self.height_cm, self.age, self.sex);
        apply_goal(scale_by_activity(bmr, self.activity_level), self.goal)
    }

    /// Check the profile fields are in a range the equation makes sense for
    pub fn validate(&self) -> Result<()> {
        if !self.weight_kg.is_finite() || self.weight_kg <= 0.0 || self.weight_kg > 500.0 {
            return Err(Error::OutOfRange {
                field: "weight",
                value: self.weight_kg,
            });
        }
        if !self.height_cm.is_finite() || self.height_cm <= 50.0 || self.height_cm > 250.0 {
            return Err(Error::OutOfRange {
                field: "height",
                value: self.height_cm,
            });
        }
        if !(1..=120).contains(&self.age) {
            return Err(Error::OutOfRange {
                field: "age",
                value: f64::from(self.age),
            });
        }
        Ok(())
    }
}

/// Validated daily calorie estimate with a sanity floor
///
/// Results below `config.floor_kcal` are rejected rather than shown.
pub fn estimate_daily_calories(profile: &CaloricProfile, config: &CaloriesConfig) -> Result<i64> {
    profile.validate()?;

    let kcal = profile.daily_calories();
    if kcal < config.floor_kcal {
        tracing::warn!(
            "Daily calorie estimate {} kcal below floor {} kcal",
            kcal,
            config.floor_kcal
        );
        return Err(Error::ImplausibleCalories {
            kcal,
            floor: config.floor_kcal,
        });
    }

    tracing::debug!(
        "Estimated {} kcal/day ({:?}, {:?})",
        kcal,
        profile.activity_level,
        profile.goal
    );
    Ok(kcal)
}
