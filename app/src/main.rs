//! FitTrack CLI
//!
//! Local-first workout tracker: log workouts, review history and progress,
//! estimate body composition from a photo, and sync everything to a cloud
//! drive as one JSON document.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use fittrack_app::config::AppConfig;
use fittrack_app::error::{AppError, AppResult};
use fittrack_app::services::workouts::{LogExerciseInput, LogSetInput, LogWorkoutInput};
use fittrack_app::services::{BodyAnalysisService, ExportService, WorkoutService};
use fittrack_app::state::AppState;
use fittrack_shared::ValidationError;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fittrack", version, about = "Local-first workout tracker with cloud sync")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log a workout; repeat --exercise with "Name=WEIGHTxREPS,WEIGHTxREPS"
    Log {
        #[arg(short = 'e', long = "exercise", required = true)]
        exercises: Vec<String>,
        /// Workout date (RFC 3339); defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Show workout history, newest first
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Weekly training summary
    Summary {
        /// Any date inside the week of interest; defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Estimate body composition from a photo
    Analyze {
        image: PathBuf,
    },
    /// List stored body analyses, newest first
    Analyses {
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Sync local data with the cloud drive
    Sync,
    /// Export stored data
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Delete all locally stored records
    Clear {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ExportFormat {
    Json,
    Csv,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    let state = AppState::new(config);

    if let Err(e) = run(cli.command, &state).await {
        error!(error = %e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn run(command: Command, state: &AppState) -> AppResult<()> {
    match command {
        Command::Log { exercises, date } => {
            let input = LogWorkoutInput {
                date,
                exercises: exercises
                    .iter()
                    .map(|raw| parse_exercise_arg(raw))
                    .collect::<Result<Vec<_>, _>>()?,
            };
            let workout = WorkoutService::log_workout(state.store(), input).await?;
            println!(
                "Logged workout {} ({} exercises, {:.0} kg total volume)",
                workout.id,
                workout.exercises.len(),
                WorkoutService::total_volume(&workout)
            );
        }
        Command::History { limit } => {
            let workouts = WorkoutService::history(state.store(), Some(limit)).await?;
            if workouts.is_empty() {
                println!("No workouts logged yet");
            }
            for workout in workouts {
                println!(
                    "{}  {}  {} exercises  {:.0} kg",
                    workout.date.format("%Y-%m-%d %H:%M"),
                    workout.id,
                    workout.exercises.len(),
                    WorkoutService::total_volume(&workout)
                );
            }
        }
        Command::Summary { date } => {
            let date = date.unwrap_or_else(|| Utc::now().date_naive());
            let summary = WorkoutService::weekly_summary(state.store(), date).await?;
            println!(
                "Week {} .. {}: {} workouts, {} sets, {:.0} kg volume",
                summary.week_start, summary.week_end, summary.total_workouts,
                summary.total_sets, summary.total_volume
            );
            for day in summary.daily_breakdown {
                println!(
                    "  {}: {} workouts, {} sets, {:.0} kg",
                    day.date, day.workouts, day.sets, day.volume
                );
            }
        }
        Command::Analyze { image } => {
            let bytes = tokio::fs::read(&image).await?;
            let analysis =
                BodyAnalysisService::analyze(state.store(), state.inference(), &bytes).await?;
            println!(
                "Body fat {:.1}%, muscle mass {:.1}%, level {:?}, health {:?} (confidence {:.0}%)",
                analysis.body_fat_percentage,
                analysis.muscle_mass,
                analysis.fitness_level,
                analysis.overall_health,
                analysis.confidence
            );
            if let Some(notes) = analysis.notes {
                println!("{notes}");
            }
        }
        Command::Analyses { limit } => {
            let analyses = BodyAnalysisService::history(state.store(), Some(limit)).await?;
            if analyses.is_empty() {
                println!("No body analyses stored yet");
            }
            for analysis in analyses {
                println!(
                    "{}  body fat {:.1}%  muscle {:.1}%  confidence {:.0}%",
                    analysis.timestamp.format("%Y-%m-%d %H:%M"),
                    analysis.body_fat_percentage,
                    analysis.muscle_mass,
                    analysis.confidence
                );
            }
        }
        Command::Sync => {
            let report = state.sync().sync_now().await?;
            println!(
                "Sync complete: {} workouts, {} recent exercises, {} body analyses",
                report.workouts, report.recent_exercises, report.body_analyses
            );
        }
        Command::Export { format, output } => {
            let content = match format {
                ExportFormat::Json => {
                    let export = ExportService::export_json(state.store()).await?;
                    serde_json::to_string_pretty(&export)?
                }
                ExportFormat::Csv => ExportService::export_workouts_csv(state.store()).await?,
            };
            match output {
                Some(path) => {
                    tokio::fs::write(&path, content).await?;
                    info!(path = %path.display(), "export written");
                }
                None => println!("{content}"),
            }
        }
        Command::Clear { yes } => {
            if !yes {
                return Err(AppError::Validation(ValidationError::new(
                    "confirm",
                    "pass --yes to delete all local records",
                )));
            }
            state.store().clear_all().await?;
            println!("All local records deleted");
        }
    }
    Ok(())
}

/// Parse one --exercise argument of the form "Name=WEIGHTxREPS,WEIGHTxREPS"
fn parse_exercise_arg(raw: &str) -> Result<LogExerciseInput, ValidationError> {
    let (name, sets_raw) = raw
        .split_once('=')
        .ok_or_else(|| ValidationError::new("exercise", "expected NAME=WEIGHTxREPS,..."))?;

    let sets = sets_raw
        .split(',')
        .map(parse_set_arg)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(LogExerciseInput {
        exercise_name: name.trim().to_string(),
        sets,
    })
}

fn parse_set_arg(raw: &str) -> Result<LogSetInput, ValidationError> {
    let (weight, reps) = raw
        .trim()
        .split_once('x')
        .ok_or_else(|| ValidationError::new("set", "expected WEIGHTxREPS"))?;

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("weight", format!("'{weight}' is not a number")))?;
    let reps: u32 = reps
        .trim()
        .parse()
        .map_err(|_| ValidationError::new("reps", format!("'{reps}' is not a whole number")))?;

    Ok(LogSetInput { weight, reps })
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if AppConfig::is_production() {
            "fittrack=info,fittrack_app=info".into()
        } else {
            "fittrack=debug,fittrack_app=debug".into()
        }
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);

    if AppConfig::is_production() {
        // JSON logging for production (better for log aggregation)
        subscriber
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        // Pretty logging for development
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exercise_arg() {
        let parsed = parse_exercise_arg("Bench Press=80x8,75.5x10").unwrap();
        assert_eq!(parsed.exercise_name, "Bench Press");
        assert_eq!(parsed.sets.len(), 2);
        assert!((parsed.sets[0].weight - 80.0).abs() < f64::EPSILON);
        assert_eq!(parsed.sets[0].reps, 8);
        assert!((parsed.sets[1].weight - 75.5).abs() < f64::EPSILON);
        assert_eq!(parsed.sets[1].reps, 10);
    }

    #[test]
    fn test_parse_exercise_arg_rejects_bad_input() {
        assert!(parse_exercise_arg("Bench Press").is_err());
        assert!(parse_exercise_arg("Bench=80").is_err());
        assert!(parse_exercise_arg("Bench=eightyx8").is_err());
        assert!(parse_exercise_arg("Bench=80x8.5").is_err());
    }

    #[test]
    fn test_parse_set_arg_trims_whitespace() {
        let set = parse_set_arg(" 100 x 5 ").unwrap();
        assert!((set.weight - 100.0).abs() < f64::EPSILON);
        assert_eq!(set.reps, 5);
    }

    #[test]
    fn test_cli_parses_log_command() {
        let cli = Cli::try_parse_from([
            "fittrack",
            "log",
            "-e",
            "Squat=100x5",
            "-e",
            "Bench Press=80x8",
        ])
        .unwrap();
        match cli.command {
            Command::Log { exercises, date } => {
                assert_eq!(exercises.len(), 2);
                assert!(date.is_none());
            }
            _ => panic!("expected log command"),
        }
    }
}
