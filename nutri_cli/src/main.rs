use clap::{Parser, Subcommand};
use nutri_core::outbox::read_outbox;
use nutri_core::quiz::QuizStep;
use nutri_core::records::{submit_goal, submit_plan};
use nutri_core::store::SavedPlan;
use nutri_core::*;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "nutri")]
#[command(about = "Nutrition and workout planning toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate and classify BMI
    Bmi {
        /// Weight in kg (comma or dot decimals)
        #[arg(long)]
        weight: String,

        /// Height in metres (comma or dot decimals)
        #[arg(long)]
        height: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Estimate daily calorie needs
    Calories {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Weight in kg
        #[arg(long)]
        weight: String,

        /// Goal (lose, maintain, gain)
        #[arg(long, default_value = "maintain")]
        goal: String,
    },

    /// Generate a weekly workout plan
    Plan {
        /// Training days per week
        #[arg(long)]
        days: u32,

        /// Goal (lose, maintain, gain)
        #[arg(long)]
        goal: String,

        /// Minutes per session (defaults to config)
        #[arg(long)]
        minutes: Option<u32>,

        /// Preferred time of day (defaults to config)
        #[arg(long)]
        time: Option<String>,

        /// Keep the plan locally and queue it for upload
        #[arg(long)]
        save: bool,

        /// Also write the plan to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Set a weight goal and queue it for upload
    Goal {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Current weight in kg
        #[arg(long)]
        current: String,

        /// Target weight in kg
        #[arg(long)]
        target: String,

        /// Days to reach the target
        #[arg(long)]
        days: u32,
    },

    /// Answer the onboarding questionnaire
    Quiz,

    /// List requests waiting for upload
    Outbox,
}

#[derive(clap::Args)]
struct ProfileArgs {
    /// Height in cm
    #[arg(long)]
    height_cm: String,

    /// Age in years
    #[arg(long)]
    age: u32,

    /// Sex (M or F)
    #[arg(long)]
    sex: String,

    /// Activity level (sedentary, light, moderate, intense)
    #[arg(long, default_value = "sedentary")]
    activity: String,
}

impl ProfileArgs {
    fn into_profile(self, weight: &str, goal: Goal) -> Result<CaloricProfile> {
        let sex = Sex::from_label(&self.sex)
            .ok_or_else(|| Error::InvalidInput(format!("unknown sex '{}': use M or F", self.sex)))?;
        Ok(CaloricProfile {
            weight_kg: parse_decimal("weight", weight)?,
            height_cm: parse_decimal("height", &self.height_cm)?,
            age: self.age,
            sex,
            activity_level: ActivityLevel::parse_or_default(&self.activity),
            goal,
        })
    }
}

struct Paths {
    state: PathBuf,
    outbox: PathBuf,
}

impl Paths {
    fn new(data_dir: &Path) -> Self {
        Self {
            state: data_dir.join("state.json"),
            outbox: data_dir.join("outbox").join("requests.jsonl"),
        }
    }
}

fn main() {
    nutri_core::logging::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        // Input the user can correct exits 2, everything else 1
        let code = if e.is_field_error() { 2 } else { 1 };
        std::process::exit(code);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let paths = Paths::new(&data_dir);
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Commands::Bmi {
            weight,
            height,
            json,
        } => cmd_bmi(&weight, &height, json),
        Commands::Calories {
            profile,
            weight,
            goal,
        } => cmd_calories(profile, &weight, &goal, &config),
        Commands::Plan {
            days,
            goal,
            minutes,
            time,
            save,
            csv,
            json,
        } => {
            let request = PlanRequest::from_labels(
                days,
                &goal,
                minutes.unwrap_or(config.plan.minutes_per_session),
                time.as_deref().unwrap_or(&config.plan.preferred_time),
            );
            cmd_plan(request, save, csv.as_deref(), json, &paths)
        }
        Commands::Goal {
            profile,
            current,
            target,
            days,
        } => cmd_goal(profile, &current, &target, days, &config, &paths),
        Commands::Quiz => {
            let stdin = io::stdin();
            cmd_quiz(&mut stdin.lock().lines(), &config)
        }
        Commands::Outbox => cmd_outbox(&paths),
    }
}

fn cmd_bmi(weight: &str, height: &str, json: bool) -> Result<()> {
    let measurement = Measurement::parse(weight, height)?;
    let result = compute_bmi(&measurement)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("BMI: {:.1} ({})", result.value, result.category.label());
    }
    Ok(())
}

fn cmd_calories(profile: ProfileArgs, weight: &str, goal: &str, config: &Config) -> Result<()> {
    let profile = profile.into_profile(weight, Goal::parse_or_default(goal))?;
    let kcal = estimate_daily_calories(&profile, &config.calories)?;

    println!(
        "BMR: {:.0} kcal",
        compute_bmr(profile.weight_kg, profile.height_cm, profile.age, profile.sex)
    );
    println!("Daily calories: {} kcal", kcal);
    Ok(())
}

fn cmd_plan(
    request: PlanRequest,
    save: bool,
    csv: Option<&Path>,
    json: bool,
    paths: &Paths,
) -> Result<()> {
    let errors = get_default_catalog().validate();
    if !errors.is_empty() {
        eprintln!("Catalog validation errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation("Invalid catalog".into()));
    }

    let plan = generate_plan(&request)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        display_plan(&request, &plan);
    }

    if let Some(csv_path) = csv {
        let rows = nutri_core::export::export_plan_csv(&plan, csv_path)?;
        println!("✓ Exported {} days to {}", rows, csv_path.display());
    }

    if save {
        let mut outbox = OutboxApi::new(&paths.outbox);
        submit_plan(&mut outbox, &PlanRecord { plan: plan.clone() }, None)?;

        let saved = SavedPlan::new(request, plan);
        NutritionState::update(&paths.state, |state| {
            state.plan = Some(saved);
            Ok(())
        })?;
        println!("✓ Plan saved and queued for upload");
    }

    Ok(())
}

fn cmd_goal(
    profile: ProfileArgs,
    current: &str,
    target: &str,
    days: u32,
    config: &Config,
    paths: &Paths,
) -> Result<()> {
    let current_kg = parse_decimal("current weight", current)?;
    let target_kg = parse_decimal("target weight", target)?;

    let goal = if target_kg < current_kg {
        Goal::Lose
    } else if target_kg > current_kg {
        Goal::Gain
    } else {
        Goal::Maintain
    };
    let profile = profile.into_profile(current, goal)?;
    let daily_calories = estimate_daily_calories(&profile, &config.calories)?;

    let record = GoalRecord {
        current_weight_kg: current_kg,
        target_weight_kg: target_kg,
        days,
        daily_calories,
    };

    let mut outbox = OutboxApi::new(&paths.outbox);
    submit_goal(&mut outbox, &record, None)?;
    NutritionState::update(&paths.state, |state| {
        state.goal = Some(record.clone());
        Ok(())
    })?;

    println!(
        "✓ Goal set: {:.1} kg → {:.1} kg in {} days ({:?})",
        current_kg, target_kg, days, goal
    );
    println!("  Daily calories: {} kcal", daily_calories);
    Ok(())
}

fn cmd_outbox(paths: &Paths) -> Result<()> {
    let entries = read_outbox(&paths.outbox)?;
    if entries.is_empty() {
        println!("Outbox is empty.");
        return Ok(());
    }

    println!("{} request(s) waiting for upload:", entries.len());
    for entry in &entries {
        println!(
            "  {} {:?} {} ({})",
            entry.id,
            entry.method,
            entry.path,
            entry.queued_at.to_rfc3339()
        );
    }
    Ok(())
}

fn display_plan(request: &PlanRequest, plan: &[WorkoutPlanEntry]) {
    println!("\n╭─────────────────────────────────────────╮");
    println!(
        "│  {:?} PLAN: {} days/week",
        request.goal, request.days_per_week
    );
    println!("╰─────────────────────────────────────────╯");
    println!(
        "  {} min per session, {}",
        request.minutes_per_session, request.preferred_time
    );
    println!();

    for entry in plan {
        println!(
            "  {}: {} ({}, {:?})",
            entry.day_label, entry.exercise_name, entry.duration_label, entry.intensity
        );
        println!("    → {}", entry.description);
    }
    println!();
}

// ============================================================================
// Questionnaire
// ============================================================================

/// Next input line, or None at end of input
fn read_input<I>(lines: &mut I) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => Ok(Some(line?.trim().to_string())),
        None => Ok(None),
    }
}

fn display_step(session: &QuizSession, step: &QuizStep) {
    let (position, total) = session.progress();
    println!("\n── Step {} of {}: {} ──", position, total, step.title);
    println!("{}", step.question);
    if let Some(ref instruction) = step.instruction {
        println!("({})", instruction);
    }

    for (idx, opt) in step.options.iter().enumerate() {
        let mark = if opt.selected { "x" } else { " " };
        let mut line = format!("  [{}] {}) {}", mark, idx + 1, opt.text);
        if let Some(ref description) = opt.description {
            line.push_str(&format!(" - {}", description));
        }
        if opt.recommended {
            line.push_str(" (recommended)");
        }
        println!("{}", line);
    }
}

fn cmd_quiz<I>(lines: &mut I, config: &Config) -> Result<()>
where
    I: Iterator<Item = io::Result<String>>,
{
    let mut session = QuizSession::start()?;

    while !session.state().is_terminal() {
        let step = session.current_step().clone();
        display_step(&session, &step);

        if step.options.is_empty() && step.additional_fields.is_empty() {
            print!("Press Enter to continue, 'b' to go back > ");
            match read_input(lines)? {
                None => break,
                Some(input) if input.eq_ignore_ascii_case("b") => {
                    session.back();
                }
                Some(_) => {
                    session.next();
                }
            }
            continue;
        }

        let mut went_back = false;
        if !step.options.is_empty() {
            print!("Choice number(s), 'b' to go back > ");
            let Some(input) = read_input(lines)? else {
                break;
            };
            if input.eq_ignore_ascii_case("b") {
                session.back();
                went_back = true;
            } else {
                for token in input.split([',', ' ']).filter(|t| !t.is_empty()) {
                    let chosen = token
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|idx| step.options.get(idx));
                    match chosen {
                        Some(opt) => {
                            session.select_option(step.id, &opt.id);
                        }
                        None => println!("  Ignoring unknown choice '{}'", token),
                    }
                }
            }
        }
        if went_back {
            continue;
        }

        let mut ended = false;
        for (idx, field) in step.additional_fields.iter().enumerate() {
            print!("{} > ", field.prompt());
            let Some(input) = read_input(lines)? else {
                ended = true;
                break;
            };
            if idx == 0 && step.options.is_empty() && input.eq_ignore_ascii_case("b") {
                session.back();
                went_back = true;
                break;
            }
            session.set_text_field(*field, input);
        }
        if ended {
            break;
        }
        if went_back {
            continue;
        }

        if session.can_advance() {
            session.next();
        } else {
            println!("  Please complete this step before continuing.");
        }
    }

    match session.state() {
        QuizState::Completed => display_quiz_summary(&session, config),
        _ => {
            println!("\nQuestionnaire cancelled.");
            Ok(())
        }
    }
}

fn display_quiz_summary(session: &QuizSession, config: &Config) -> Result<()> {
    let summary = session.summary();

    println!("\n✓ Questionnaire complete!");
    if let Some(goal) = summary.goal {
        println!("  Goal: {:?}", goal);
    }
    if let Some(level) = summary.activity_level {
        println!("  Activity: {:?}", level);
    }
    if !summary.diet.is_empty() {
        println!("  Diet: {}", summary.diet.join(", "));
    }

    if let (Some(weight_kg), Some(height_cm)) = (summary.weight_kg, summary.height_cm) {
        match validate_measurement(weight_kg, height_cm / 100.0).and_then(|m| compute_bmi(&m)) {
            Ok(bmi) => println!("  BMI: {:.1} ({})", bmi.value, bmi.category.label()),
            Err(e) => println!("  BMI unavailable: {}", e),
        }
    }

    match summary
        .caloric_profile()
        .and_then(|profile| estimate_daily_calories(&profile, &config.calories))
    {
        Ok(kcal) => println!("  Daily calories: {} kcal", kcal),
        Err(e) => println!("  Daily calories unavailable: {}", e),
    }

    if let Some(target) = summary.target_weight_kg {
        println!("  Target weight: {:.1} kg", target);
    }
    Ok(())
}
