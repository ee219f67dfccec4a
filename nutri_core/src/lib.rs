#![forbid(unsafe_code)]

//! Core computation layer for the Nutri tracking app.
//!
//! This crate provides:
//! - Unit normalization for locale-typed numbers
//! - BMI calculation and classification
//! - Daily caloric-need estimation
//! - Workout catalog and deterministic plan generation
//! - Onboarding questionnaire state machine
//! - Records for the remote API, plus local outbox/state persistence

pub mod types;
pub mod error;
pub mod units;
pub mod bmi;
pub mod calories;
pub mod catalog;
pub mod plan;
pub mod quiz;
pub mod config;
pub mod logging;
pub mod records;
pub mod outbox;
pub mod store;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use units::{normalize_decimal, parse_decimal};
pub use bmi::{classify, compute as compute_bmi, validate as validate_measurement};
pub use calories::{apply_goal, compute_bmr, estimate_daily_calories, scale_by_activity};
pub use catalog::{catalog_for, get_default_catalog};
pub use plan::{generate_plan, PlanRequest};
pub use quiz::{FieldKey, QuizSession, QuizState, StepId};
pub use config::Config;
pub use records::{ApiError, GoalRecord, PlanRecord, RemoteApi, RequestOptions};
pub use outbox::OutboxApi;
pub use store::NutritionState;
