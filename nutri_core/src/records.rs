//! Records exchanged with the remote API.
//!
//! The remote service is a single generic request function. Record field
//! names match the service's JSON (Portuguese keys); everything else here is
//! plain serde.

use crate::{Error, Result, WorkoutPlanEntry};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path that stores the user's weight goal
pub const GOALS_PATH: &str = "/metas";

/// Path that stores the user's workout plan
pub const PLAN_PATH: &str = "/treinos/plano";

/// Error body returned by the remote service
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ApiError> for Error {
    fn from(e: ApiError) -> Self {
        Error::Api(e)
    }
}

/// HTTP-like method of a request
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
}

/// Options of a remote request
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub token: Option<String>,
    pub body: Option<Value>,
}

impl RequestOptions {
    /// A POST with a JSON body
    pub fn post(body: Value, token: Option<String>) -> Self {
        Self {
            method: Method::Post,
            token,
            body: Some(body),
        }
    }
}

/// The remote collaborator
///
/// Implementations return the success JSON body, or `Error::Api` carrying the
/// service's status and message.
pub trait RemoteApi {
    fn request(&mut self, path: &str, options: RequestOptions) -> Result<Value>;
}

/// Weight goal as the remote service stores it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GoalRecord {
    #[serde(rename = "peso_atual")]
    pub current_weight_kg: f64,
    #[serde(rename = "peso_meta")]
    pub target_weight_kg: f64,
    #[serde(rename = "dias")]
    pub days: u32,
    #[serde(rename = "calorias_diarias")]
    pub daily_calories: i64,
}

impl GoalRecord {
    /// Check the goal before sending it anywhere
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("current weight", self.current_weight_kg),
            ("target weight", self.target_weight_kg),
        ] {
            if !value.is_finite() || value <= 0.0 || value > 500.0 {
                return Err(Error::OutOfRange { field, value });
            }
        }
        if self.days == 0 {
            return Err(Error::OutOfRange {
                field: "days",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// Workout plan as the remote service stores it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanRecord {
    #[serde(rename = "plano")]
    pub plan: Vec<WorkoutPlanEntry>,
}

/// Send a goal record
pub fn submit_goal(
    api: &mut dyn RemoteApi,
    goal: &GoalRecord,
    token: Option<String>,
) -> Result<Value> {
    goal.validate()?;
    let body = serde_json::to_value(goal)?;
    api.request(GOALS_PATH, RequestOptions::post(body, token))
}

/// Send a workout plan
pub fn submit_plan(
    api: &mut dyn RemoteApi,
    plan: &PlanRecord,
    token: Option<String>,
) -> Result<Value> {
    if plan.plan.is_empty() {
        return Err(Error::InvalidInput("cannot submit an empty plan".into()));
    }
    let body = serde_json::to_value(plan)?;
    api.request(PLAN_PATH, RequestOptions::post(body, token))
}
