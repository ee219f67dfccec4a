//! Onboarding questionnaire state machine.
//!
//! A session walks a fixed, linear list of steps. Each step is either
//! informational, a single/multi-select question, a set of free-text fields,
//! or options plus fields. Progression is gated by [`QuizSession::can_advance`];
//! calling [`QuizSession::next`] without checking the guard is a caller bug the
//! session does not defend against.
//!
//! ```text
//! Aborted <-back- Step(0) <-> Step(1) <-> ... <-> Step(N-1) -next-> Completed
//! ```

use crate::units::parse_decimal;
use crate::{ActivityLevel, CaloricProfile, Error, Goal, Result, Sex};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ============================================================================
// Step Definitions
// ============================================================================

/// Identifier of a questionnaire step
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Welcome,
    Goal,
    ActivityLevel,
    Diet,
    Body,
    MealsPerDay,
    Finish,
}

/// Free-text field a step can declare
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum FieldKey {
    WeightKg,
    HeightCm,
    Age,
    TargetWeightKg,
}

impl FieldKey {
    /// Name used in validation errors and prompts
    pub fn name(&self) -> &'static str {
        match self {
            FieldKey::WeightKg => "weight",
            FieldKey::HeightCm => "height",
            FieldKey::Age => "age",
            FieldKey::TargetWeightKg => "target weight",
        }
    }

    /// Prompt shown next to the input
    pub fn prompt(&self) -> &'static str {
        match self {
            FieldKey::WeightKg => "Weight (kg)",
            FieldKey::HeightCm => "Height (cm)",
            FieldKey::Age => "Age (years)",
            FieldKey::TargetWeightKg => "Target weight (kg)",
        }
    }
}

/// A selectable answer
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizOption {
    pub id: String,
    pub text: String,
    pub selected: bool,
    pub description: Option<String>,
    pub recommended: bool,
}

/// One screen of the questionnaire
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuizStep {
    pub id: StepId,
    pub title: String,
    pub question: String,
    pub instruction: Option<String>,
    pub options: Vec<QuizOption>,
    pub multi_select: bool,
    pub additional_fields: Vec<FieldKey>,
}

impl QuizStep {
    /// A step with nothing to answer
    pub fn is_informational(&self) -> bool {
        self.options.is_empty() && self.additional_fields.is_empty()
    }
}

fn option(id: &str, text: &str, description: Option<&str>, recommended: bool) -> QuizOption {
    QuizOption {
        id: id.into(),
        text: text.into(),
        selected: false,
        description: description.map(Into::into),
        recommended,
    }
}

static DEFAULT_STEPS: Lazy<Vec<QuizStep>> = Lazy::new(build_default_steps);

/// The built-in onboarding steps
pub fn default_steps() -> &'static [QuizStep] {
    &DEFAULT_STEPS
}

fn build_default_steps() -> Vec<QuizStep> {
    vec![
        QuizStep {
            id: StepId::Welcome,
            title: "Welcome".into(),
            question: "A few questions to tailor your calorie target and workouts.".into(),
            instruction: None,
            options: vec![],
            multi_select: false,
            additional_fields: vec![],
        },
        QuizStep {
            id: StepId::Goal,
            title: "Your goal".into(),
            question: "What do you want to achieve?".into(),
            instruction: Some("Choose one".into()),
            options: vec![
                option("lose", "Lose weight", Some("Daily deficit of 500 kcal"), false),
                option("maintain", "Maintain weight", None, false),
                option("gain", "Gain muscle", Some("Daily surplus of 500 kcal"), false),
            ],
            multi_select: false,
            additional_fields: vec![],
        },
        QuizStep {
            id: StepId::ActivityLevel,
            title: "Activity".into(),
            question: "How active are you on a typical week?".into(),
            instruction: Some("Choose one".into()),
            options: vec![
                option("sedentary", "Sedentary", Some("Little or no exercise"), false),
                option("light", "Light", Some("Exercise 1-3 days a week"), false),
                option("moderate", "Moderate", Some("Exercise 3-5 days a week"), true),
                option("intense", "Intense", Some("Hard exercise 6-7 days a week"), false),
            ],
            multi_select: false,
            additional_fields: vec![],
        },
        QuizStep {
            id: StepId::Diet,
            title: "Diet".into(),
            question: "Any dietary preferences or restrictions?".into(),
            instruction: Some("Choose all that apply".into()),
            options: vec![
                option("none", "No restrictions", None, false),
                option("vegetarian", "Vegetarian", None, false),
                option("vegan", "Vegan", None, false),
                option("lactose_free", "Lactose free", None, false),
                option("gluten_free", "Gluten free", None, false),
                option("low_carb", "Low carb", None, false),
            ],
            multi_select: true,
            additional_fields: vec![],
        },
        QuizStep {
            id: StepId::Body,
            title: "About you".into(),
            question: "Tell us about your body so we can estimate your energy needs.".into(),
            instruction: Some("Decimals may use a comma".into()),
            options: vec![
                option("M", "Male", None, false),
                option("F", "Female", None, false),
            ],
            multi_select: false,
            additional_fields: vec![FieldKey::WeightKg, FieldKey::HeightCm, FieldKey::Age],
        },
        QuizStep {
            id: StepId::MealsPerDay,
            title: "Meals".into(),
            question: "How many meals do you usually eat per day?".into(),
            instruction: Some("Choose one".into()),
            options: vec![
                option("two", "2 meals", None, false),
                option("three", "3 meals", None, false),
                option("four", "4 meals", None, true),
                option("five_plus", "5 or more", None, false),
            ],
            multi_select: false,
            additional_fields: vec![],
        },
        QuizStep {
            id: StepId::Finish,
            title: "Almost done".into(),
            question: "Do you have a target weight in mind?".into(),
            instruction: Some("Optional".into()),
            options: vec![],
            multi_select: false,
            additional_fields: vec![FieldKey::TargetWeightKg],
        },
    ]
}

/// Check a step list is usable by a session
pub fn validate_steps(steps: &[QuizStep]) -> Result<()> {
    if steps.is_empty() {
        return Err(Error::QuizDefinition("questionnaire has no steps".into()));
    }

    let mut step_ids = HashSet::new();
    for step in steps {
        if !step_ids.insert(step.id) {
            return Err(Error::QuizDefinition(format!(
                "duplicate step {:?}",
                step.id
            )));
        }

        let mut option_ids = HashSet::new();
        for opt in &step.options {
            if opt.id.is_empty() {
                return Err(Error::QuizDefinition(format!(
                    "step {:?} has an option with empty id",
                    step.id
                )));
            }
            if !option_ids.insert(opt.id.as_str()) {
                return Err(Error::QuizDefinition(format!(
                    "step {:?} has duplicate option '{}'",
                    step.id, opt.id
                )));
            }
        }

        if step.multi_select && step.options.is_empty() {
            return Err(Error::QuizDefinition(format!(
                "step {:?} is multi-select but has no options",
                step.id
            )));
        }

        let mut field_keys = HashSet::new();
        for field in &step.additional_fields {
            if !field_keys.insert(*field) {
                return Err(Error::QuizDefinition(format!(
                    "step {:?} declares field {:?} twice",
                    step.id, field
                )));
            }
        }
    }

    Ok(())
}

// ============================================================================
// Session
// ============================================================================

/// Where a session is
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuizState {
    /// Showing the step at this index
    Step(usize),
    /// Advanced past the last step
    Completed,
    /// Went back from the first step
    Aborted,
}

impl QuizState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, QuizState::Completed | QuizState::Aborted)
    }
}

/// In-memory questionnaire session
#[derive(Clone, Debug)]
pub struct QuizSession {
    steps: Vec<QuizStep>,
    current: usize,
    state: QuizState,
    text_inputs: BTreeMap<FieldKey, String>,
}

impl QuizSession {
    /// Start a session over the built-in steps
    pub fn start() -> Result<Self> {
        Self::new(default_steps().to_vec())
    }

    /// Start a session over custom steps
    ///
    /// Any `selected` flags in the definitions are cleared.
    pub fn new(mut steps: Vec<QuizStep>) -> Result<Self> {
        validate_steps(&steps)?;
        for opt in steps.iter_mut().flat_map(|s| s.options.iter_mut()) {
            opt.selected = false;
        }

        Ok(Self {
            steps,
            current: 0,
            state: QuizState::Step(0),
            text_inputs: BTreeMap::new(),
        })
    }

    pub fn state(&self) -> QuizState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_step(&self) -> &QuizStep {
        &self.steps[self.current]
    }

    pub fn steps(&self) -> &[QuizStep] {
        &self.steps
    }

    /// 1-based position and total, for "Step 2 of 7"
    pub fn progress(&self) -> (usize, usize) {
        (self.current + 1, self.steps.len())
    }

    fn is_last_step(&self) -> bool {
        self.current + 1 == self.steps.len()
    }

    fn step(&self, id: StepId) -> Option<&QuizStep> {
        self.steps.iter().find(|s| s.id == id)
    }

    /// Select an option, toggling for multi-select and radio-style otherwise
    ///
    /// Returns false (and changes nothing) for an unknown step or option.
    pub fn select_option(&mut self, step_id: StepId, option_id: &str) -> bool {
        let Some(step) = self.steps.iter_mut().find(|s| s.id == step_id) else {
            tracing::debug!("select_option: unknown step {:?}", step_id);
            return false;
        };
        if !step.options.iter().any(|o| o.id == option_id) {
            tracing::debug!("select_option: unknown option {:?} on {:?}", option_id, step_id);
            return false;
        }

        if step.multi_select {
            for opt in step.options.iter_mut().filter(|o| o.id == option_id) {
                opt.selected = !opt.selected;
            }
        } else {
            for opt in &mut step.options {
                opt.selected = opt.id == option_id;
            }
        }
        true
    }

    /// Store free text for a field (validated only by the advance guard)
    pub fn set_text_field(&mut self, field: FieldKey, value: impl Into<String>) {
        self.text_inputs.insert(field, value.into());
    }

    pub fn text_value(&self, field: FieldKey) -> Option<&str> {
        self.text_inputs.get(&field).map(String::as_str)
    }

    /// Ids of the selected options on a step
    pub fn selected_options(&self, step_id: StepId) -> Vec<&str> {
        self.step(step_id)
            .map(|s| {
                s.options
                    .iter()
                    .filter(|o| o.selected)
                    .map(|o| o.id.as_str())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether the current step's requirements are met
    ///
    /// The last step always passes, even when its fields are blank.
    // TODO: confirm with product whether the final step should be gated like the others
    pub fn can_advance(&self) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        if self.is_last_step() {
            return true;
        }

        let step = self.current_step();
        if step.is_informational() {
            return true;
        }

        let options_ok = step.options.is_empty() || step.options.iter().any(|o| o.selected);
        let fields_ok = step.additional_fields.iter().all(|f| {
            self.text_inputs
                .get(f)
                .is_some_and(|v| !v.trim().is_empty())
        });
        options_ok && fields_ok
    }

    /// Move forward, or complete from the last step
    pub fn next(&mut self) -> QuizState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.is_last_step() {
            tracing::info!("Questionnaire completed");
            self.state = QuizState::Completed;
        } else {
            self.current += 1;
            self.state = QuizState::Step(self.current);
        }
        self.state
    }

    /// Move back, or abort from the first step
    pub fn back(&mut self) -> QuizState {
        if self.state.is_terminal() {
            return self.state;
        }
        if self.current == 0 {
            tracing::info!("Questionnaire aborted");
            self.state = QuizState::Aborted;
        } else {
            self.current -= 1;
            self.state = QuizState::Step(self.current);
        }
        self.state
    }

    /// Collect the answers in typed form
    pub fn summary(&self) -> QuizSummary {
        let single = |id: StepId| self.selected_options(id).first().map(|s| s.to_string());
        let number = |field: FieldKey| {
            self.text_value(field)
                .filter(|v| !v.trim().is_empty())
                .and_then(|v| parse_decimal(field.name(), v).ok())
        };

        QuizSummary {
            goal: single(StepId::Goal).and_then(|g| Goal::from_label(&g)),
            activity_level: single(StepId::ActivityLevel)
                .and_then(|a| ActivityLevel::from_label(&a)),
            diet: self
                .selected_options(StepId::Diet)
                .into_iter()
                .map(String::from)
                .collect(),
            sex: single(StepId::Body).and_then(|s| Sex::from_label(&s)),
            weight_kg: number(FieldKey::WeightKg),
            height_cm: number(FieldKey::HeightCm),
            age: number(FieldKey::Age)
                .filter(|a| *a >= 0.0 && a.fract() == 0.0)
                .map(|a| a as u32),
            meals_per_day: single(StepId::MealsPerDay),
            target_weight_kg: number(FieldKey::TargetWeightKg),
        }
    }
}

/// Typed answers of a questionnaire session
#[derive(Clone, Debug, Default, Serialize, PartialEq)]
pub struct QuizSummary {
    pub goal: Option<Goal>,
    pub activity_level: Option<ActivityLevel>,
    pub diet: Vec<String>,
    pub sex: Option<Sex>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub age: Option<u32>,
    pub meals_per_day: Option<String>,
    pub target_weight_kg: Option<f64>,
}

impl QuizSummary {
    /// Build a calorie profile; any unanswered input is reported as missing
    pub fn caloric_profile(&self) -> Result<CaloricProfile> {
        Ok(CaloricProfile {
            weight_kg: self.weight_kg.ok_or(Error::Missing { field: "weight" })?,
            height_cm: self.height_cm.ok_or(Error::Missing { field: "height" })?,
            age: self.age.ok_or(Error::Missing { field: "age" })?,
            sex: self.sex.ok_or(Error::Missing { field: "sex" })?,
            activity_level: self
                .activity_level
                .ok_or(Error::Missing { field: "activity level" })?,
            goal: self.goal.ok_or(Error::Missing { field: "goal" })?,
        })
    }
}
