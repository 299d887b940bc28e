use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::*;
use serde::Serialize;
use std::path::PathBuf;
use tabled::{settings::Style, Table, Tabled};

use weightrs::bmr::BmrCalculator;
use weightrs::composition::CompositionAnalyzer;
use weightrs::config::AppConfig;
use weightrs::energy::EnergyBalanceCalculator;
use weightrs::error::WeightRsError;
use weightrs::history::WeightHistoryReader;
use weightrs::logging::init_logging;
use weightrs::macronutrients::{MacroCalculator, MacroPlan, MacroRatios};
use weightrs::models::{Gender, Profile, WaistHipMeasurement};
use weightrs::plateau::PlateauDetector;
use weightrs::safety::SafetyValidator;
use weightrs::validation::InputValidator;

/// WeightRS - Weight Management Analysis CLI
///
/// Estimates basal metabolism and daily expenditure, plans calorie deficits
/// and macro splits, classifies body composition and detects weight plateaus.
#[derive(Parser)]
#[command(name = "weightrs")]
#[command(author = "WeightRS Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Weight Management Analysis CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Personal measurements shared by several commands
#[derive(Args)]
struct ProfileArgs {
    /// Gender (male/female)
    #[arg(short, long)]
    gender: String,

    /// Age in years
    #[arg(short, long)]
    age: u16,

    /// Height in centimetres
    #[arg(long)]
    height: u16,

    /// Weight in kilograms
    #[arg(short, long)]
    weight: f64,

    /// Body fat percentage
    #[arg(short, long)]
    body_fat: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate basal metabolic rate with all formulas
    Bmr {
        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Full metabolic profile with calorie targets and macros
    Profile {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Activity level (sedentary, light, moderate, active, extra_active)
        #[arg(long, default_value = "moderate")]
        activity: String,
    },

    /// Body composition analysis
    Composition {
        #[command(flatten)]
        profile: ProfileArgs,

        /// Waist circumference in centimetres
        #[arg(long)]
        waist: Option<f64>,

        /// Hip circumference in centimetres
        #[arg(long)]
        hip: Option<f64>,
    },

    /// Daily energy balance and projected loss
    Deficit {
        /// Calories eaten
        #[arg(short, long)]
        intake: i32,

        /// Basal metabolic rate
        #[arg(short, long)]
        bmr: i32,

        /// Calories burned by exercise
        #[arg(short, long, default_value = "0")]
        exercise: i32,

        /// Calories burned by non-exercise activity
        #[arg(short, long, default_value = "0")]
        neat: i32,

        /// Projection horizon in days
        #[arg(short, long, default_value = "7")]
        days: u32,
    },

    /// Macro-nutrient plan for a calorie target
    Macros {
        /// Daily calorie target
        #[arg(short = 't', long)]
        calories: i32,

        /// Protein share (0-1)
        #[arg(long)]
        protein: Option<f64>,

        /// Carbohydrate share (0-1)
        #[arg(long)]
        carbs: Option<f64>,

        /// Fat share (0-1)
        #[arg(long)]
        fat: Option<f64>,
    },

    /// Detect a weight plateau from a CSV history (date,weight_kg)
    Plateau {
        /// History file path
        #[arg(short, long)]
        file: PathBuf,

        /// Window length in weeks (overrides config)
        #[arg(long)]
        weeks: Option<u32>,

        /// Maximum change in kg still counted as a plateau (overrides config)
        #[arg(long)]
        threshold: Option<f64>,

        /// How long the plateau has lasted, for breakthrough suggestions
        #[arg(long)]
        duration_weeks: Option<u32>,
    },

    /// Check a daily calorie target against the safe floor
    CheckCalories {
        /// Daily calorie target
        #[arg(short, long)]
        target: i32,

        /// Basal metabolic rate
        #[arg(short, long)]
        bmr: i32,
    },

    /// Check the weekly rate of a weight-loss goal
    CheckRate {
        /// Total weight to lose in kg
        #[arg(long)]
        total_kg: f64,

        /// Number of weeks
        #[arg(long, allow_negative_numbers = true)]
        weeks: i32,
    },

    /// Show the effective configuration or write the default file
    Config {
        /// Write the default configuration to the config path
        #[arg(long)]
        init: bool,
    },
}

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "Metric")]
    metric: String,
    #[tabled(rename = "Value")]
    value: String,
}

fn row(metric: &str, value: impl ToString) -> Row {
    Row {
        metric: metric.to_string(),
        value: value.to_string(),
    }
}

fn print_table(rows: Vec<Row>) {
    println!("{}", Table::new(rows).with(Style::rounded()));
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    if items.is_empty() {
        return;
    }
    println!("\n{}", title.bold());
    for item in items {
        println!("  • {}", item);
    }
}

impl ProfileArgs {
    fn to_profile(&self) -> Result<Profile> {
        let gender = Gender::normalize(&self.gender);
        if !gender.recognized {
            eprintln!(
                "{}",
                format!("Unknown gender '{}', using {}", self.gender, gender.value).yellow()
            );
        }

        let mut profile = Profile::new(gender.value, self.age, self.height, self.weight);
        if let Some(body_fat) = self.body_fat {
            profile = profile.with_body_fat(body_fat);
        }

        InputValidator::validate_profile(&profile).map_err(WeightRsError::from)?;
        Ok(profile)
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from_file(path),
        None => Ok(AppConfig::load_or_default()),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        match e.downcast_ref::<WeightRsError>() {
            Some(err) => {
                tracing::error!(severity = ?err.severity(), "{}", err);
                eprintln!("{} {}", "Error:".red().bold(), err.user_message());
            }
            None => eprintln!("{} {:#}", "Error:".red().bold(), e),
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // `config --init` may target a file that does not exist yet
    let config = match cli.command {
        Commands::Config { init: true } => AppConfig::default(),
        _ => load_config(cli.config.as_ref())?,
    };
    init_logging(&config.logging.clone().with_verbosity(cli.verbose))?;

    let analysis = &config.analysis;

    match cli.command {
        Commands::Bmr { profile } => {
            let profile = profile.to_profile()?;
            let estimates = BmrCalculator::calculate_all(&profile);

            if cli.json {
                return print_json(&estimates);
            }

            println!("{}", "Basal Metabolic Rate".green().bold());
            let mut rows = vec![
                row("Harris-Benedict", format!("{} kcal", estimates.harris_benedict)),
                row("Mifflin-St Jeor", format!("{} kcal", estimates.mifflin_st_jeor)),
            ];
            if let Some(katch) = estimates.katch_mcardle {
                rows.push(row("Katch-McArdle", format!("{} kcal", katch)));
            }
            rows.push(row(
                "Recommended",
                format!("{} kcal ({})", estimates.recommended, estimates.formula.name()),
            ));
            print_table(rows);
            println!("{}", estimates.note.dimmed());
        }

        Commands::Profile { profile, activity } => {
            let profile = profile.to_profile()?;
            let report = analysis.metabolic_profiler().analyze_input(&profile, &activity);

            if cli.json {
                return print_json(&report);
            }

            if !report.tdee.level_recognized {
                eprintln!(
                    "{}",
                    format!("Unknown activity level '{}', using {}", activity, report.tdee.activity_level)
                        .yellow()
                );
            }

            println!("{}", "Metabolic Profile".green().bold());
            print_table(vec![
                row(
                    "BMR",
                    format!("{} kcal ({})", report.bmr.recommended, report.bmr.formula.name()),
                ),
                row(
                    "TDEE",
                    format!(
                        "{} kcal ({} × {})",
                        report.tdee.value, report.tdee.activity_level, report.tdee.activity_factor
                    ),
                ),
                row("BMI", report.assessment.bmi),
                row("Maintenance", format!("{} kcal", report.calorie_targets.maintenance)),
                row(
                    "Mild deficit",
                    format!(
                        "{} kcal ({} kg/week)",
                        report.calorie_targets.mild, report.projected_weekly_loss_kg.mild
                    ),
                ),
                row(
                    "Moderate deficit",
                    format!(
                        "{} kcal ({} kg/week)",
                        report.calorie_targets.moderate, report.projected_weekly_loss_kg.moderate
                    ),
                ),
                row(
                    "Aggressive deficit",
                    format!(
                        "{} kcal ({} kg/week)",
                        report.calorie_targets.aggressive, report.projected_weekly_loss_kg.aggressive
                    ),
                ),
            ]);

            println!("\n{}", "Macros at the moderate target".cyan().bold());
            print_macro_plan(&report.macro_plan);

            println!("\n{}", report.assessment.age_note.dimmed());
            println!("{}", report.assessment.activity_impact.dimmed());
            print_list("Recommendations", &report.recommendations);
        }

        Commands::Composition { profile, waist, hip } => {
            let profile = profile.to_profile()?;
            let measurement = WaistHipMeasurement {
                waist_cm: waist,
                hip_cm: hip,
            };
            InputValidator::validate_waist_hip(&measurement).map_err(WeightRsError::from)?;

            let report = CompositionAnalyzer::analyze(&profile, &measurement);

            if cli.json {
                return print_json(&report);
            }

            println!("{}", "Body Composition".green().bold());
            let mut rows = vec![
                row(
                    "BMI",
                    format!("{} ({})", report.bmi.value, report.bmi.category.label()),
                ),
                row(
                    "Ideal weight",
                    format!(
                        "{} kg ({:+} kg, {})",
                        report.bmi.ideal_weight_kg,
                        report.bmi.difference_from_ideal_kg,
                        report.bmi.weight_status.label()
                    ),
                ),
            ];
            if let Some(body_fat) = &report.body_fat {
                rows.push(row(
                    "Body fat",
                    format!("{}% ({})", body_fat.percentage, body_fat.category.label()),
                ));
                rows.push(row("Lean mass", format!("{} kg", body_fat.lean_mass_kg)));
                rows.push(row("Fat mass", format!("{} kg", body_fat.fat_mass_kg)));
            }
            if let Some(waist) = &report.waist_hip {
                rows.push(row(
                    "Waist",
                    format!("{} cm (threshold {} cm)", waist.waist_cm, waist.threshold_cm),
                ));
                if let (Some(ratio), Some(healthy)) = (waist.ratio, waist.ratio_healthy) {
                    rows.push(row(
                        "Waist-hip ratio",
                        format!("{} ({})", ratio, if healthy { "healthy" } else { "elevated" }),
                    ));
                }
            }
            print_table(rows);

            let headline = if report.concerns.is_empty() {
                report.overall_assessment.green()
            } else {
                report.overall_assessment.yellow()
            };
            println!("\n{}", headline);
            print_list("Recommendations", &report.recommendations);
        }

        Commands::Deficit {
            intake,
            bmr,
            exercise,
            neat,
            days,
        } => {
            let calculator = analysis.energy_calculator();
            let record = calculator.calculate_deficit(intake, bmr, exercise, neat);
            let projected_kg = EnergyBalanceCalculator::estimate_weight_loss(record.deficit, days);

            if cli.json {
                return print_json(&serde_json::json!({
                    "balance": record,
                    "days": days,
                    "projected_loss_kg": projected_kg,
                }));
            }

            println!("{}", "Energy Balance".green().bold());
            print_table(vec![
                row("Intake", format!("{} kcal", record.intake_calories)),
                row("BMR", format!("{} kcal", record.bmr)),
                row("Exercise", format!("{} kcal", record.exercise_burn)),
                row("NEAT", format!("{} kcal", record.neat_burn)),
                row("Thermic effect", format!("{} kcal", record.thermic_effect)),
                row("Total burn", format!("{} kcal", record.total_burn)),
                row("Deficit / BMR", format!("{}%", record.percentage_of_bmr)),
            ]);

            let balance = if record.is_deficit {
                format!("Deficit of {} kcal", record.deficit).green()
            } else {
                format!("Surplus of {} kcal", -record.deficit).yellow()
            };
            println!("\n{}", balance);
            println!("Projected change over {} days: {} kg", days, projected_kg);
        }

        Commands::Macros {
            calories,
            protein,
            carbs,
            fat,
        } => {
            let defaults = analysis.macro_ratios;
            let ratios = MacroRatios::new(
                protein.unwrap_or(defaults.protein),
                carbs.unwrap_or(defaults.carbohydrate),
                fat.unwrap_or(defaults.fat),
            );
            let plan = MacroCalculator::calculate(calories, ratios);

            if cli.json {
                return print_json(&plan);
            }

            println!("{}", format!("Macros for {} kcal", plan.target_calories).green().bold());
            print_macro_plan(&plan);
        }

        Commands::Plateau {
            file,
            weeks,
            threshold,
            duration_weeks,
        } => {
            let history = WeightHistoryReader::from_path(&file).map_err(WeightRsError::from)?;

            let mut plateau_config = analysis.plateau.clone();
            if let Some(weeks) = weeks {
                plateau_config.window_weeks = weeks;
            }
            if let Some(threshold) = threshold {
                plateau_config.threshold_kg = threshold;
            }

            let result = PlateauDetector::with_config(plateau_config).detect(&history);
            let suggestions = duration_weeks
                .filter(|_| result.in_plateau)
                .map(PlateauDetector::suggest_breakthrough)
                .unwrap_or_default();

            if cli.json {
                return print_json(&serde_json::json!({
                    "result": result,
                    "suggestions": suggestions,
                }));
            }

            println!("{}", "Plateau Analysis".green().bold());
            let mut rows = vec![
                row("Observations", history.len()),
                row("Window", format!("{} weeks", result.window_weeks)),
            ];
            if let (Some(start), Some(end)) = (result.start_weight, result.end_weight) {
                rows.push(row("Start → end", format!("{} kg → {} kg", start, end)));
            }
            if let Some(change) = result.weight_change {
                rows.push(row("Change", format!("{} kg", change)));
            }
            if let Some(avg) = result.avg_weight {
                rows.push(row("Average", format!("{} kg", avg)));
            }
            rows.push(row("Status", result.status.description()));
            print_table(rows);

            let narrative = if result.in_plateau {
                result.narrative.yellow()
            } else {
                result.narrative.normal()
            };
            println!("\n{}", narrative);
            print_list("Breakthrough suggestions", &suggestions);
        }

        Commands::CheckCalories { target, bmr } => {
            let verdict = SafetyValidator::validate_calorie_target(target, bmr);

            if cli.json {
                return print_json(&verdict);
            }

            let headline = if verdict.is_safe {
                "Calorie target is safe".green().bold()
            } else {
                "Calorie target is unsafe".red().bold()
            };
            println!("{}", headline);
            print_table(vec![
                row("Target", format!("{} kcal", verdict.target)),
                row("Minimum safe", format!("{} kcal", verdict.minimum_safe)),
                row("Difference", format!("{:+} kcal", verdict.difference)),
                row("Category", verdict.category.label()),
            ]);
            if let Some(warning) = &verdict.warning {
                println!("{}", warning.yellow());
            }
            println!("{}", verdict.recommendation);
        }

        Commands::CheckRate { total_kg, weeks } => {
            let verdict = SafetyValidator::validate_weight_loss_rate(total_kg, weeks);

            if cli.json {
                return print_json(&verdict);
            }

            let headline = format!("Weight-loss rate: {}", verdict.category.label());
            println!(
                "{}",
                if verdict.is_safe {
                    headline.green().bold()
                } else {
                    headline.red().bold()
                }
            );
            print_table(vec![
                row("Total", format!("{} kg", verdict.total_kg)),
                row("Weeks", verdict.weeks),
                row("Rate", format!("{} kg/week", verdict.rate_kg_per_week)),
            ]);
            if let Some(warning) = &verdict.warning {
                println!("{}", warning.yellow());
            }
            println!("{}", verdict.recommendation);
        }

        Commands::Config { init } => {
            if init {
                let path = cli.config.clone().unwrap_or_else(AppConfig::default_config_path);
                AppConfig::default().save_to_file(&path)?;
                println!(
                    "{}",
                    format!("✓ Default configuration written to {}", path.display()).green()
                );
            } else if cli.json {
                return print_json(&config);
            } else {
                println!("{}", toml::to_string_pretty(&config)?);
            }
        }
    }

    Ok(())
}

fn print_macro_plan(plan: &MacroPlan) {
    #[derive(Tabled)]
    struct MacroRow {
        #[tabled(rename = "Nutrient")]
        nutrient: &'static str,
        #[tabled(rename = "kcal")]
        calories: f64,
        #[tabled(rename = "Grams")]
        grams: f64,
        #[tabled(rename = "%")]
        percentage: f64,
    }

    let rows = [
        ("Protein", &plan.protein),
        ("Carbohydrate", &plan.carbohydrate),
        ("Fat", &plan.fat),
    ]
    .into_iter()
    .map(|(nutrient, allocation)| MacroRow {
        nutrient,
        calories: allocation.calories,
        grams: allocation.grams,
        percentage: allocation.percentage,
    });

    println!("{}", Table::new(rows).with(Style::rounded()));
}
