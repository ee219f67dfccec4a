//! Error types for the nutri_core library.

use crate::records::ApiError;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for nutri_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required field is blank or not a number
    #[error("{field} is required")]
    Missing { field: &'static str },

    /// A numeric field lies outside its accepted domain
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// BMI outside [10, 100] despite valid fields (usually a unit mix-up)
    #[error("Implausible BMI {0:.1}: check the units of weight and height")]
    ImplausibleResult(f64),

    /// Daily calorie estimate below the configured floor
    #[error("Implausible daily calories {kcal} kcal (floor is {floor} kcal)")]
    ImplausibleCalories { kcal: i64, floor: i64 },

    /// Request parameters that cannot be acted on
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Questionnaire step catalog is malformed
    #[error("Questionnaire definition error: {0}")]
    QuizDefinition(String),

    /// Remote collaborator returned an error
    #[error("API error {}: {}", .0.status, .0.message)]
    Api(ApiError),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// True for the validation kinds that a form shows inline next to a field
    pub fn is_field_error(&self) -> bool {
        matches!(self, Error::Missing { .. } | Error::OutOfRange { .. })
    }
}
