//! Workout logging and history service
//!
//! Provides business logic for workout tracking including:
//! - Workout logging with sets and exercises
//! - Recent-exercise list maintenance
//! - History and weekly training summaries

use crate::error::AppResult;
use crate::store::RecordStore;
use crate::sync::merge::merge_recent_exercises;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use fittrack_shared::models::{ExerciseEntry, ExerciseSet, Workout};
use fittrack_shared::validation::validate_workout;
use tracing::info;
use uuid::Uuid;

/// Input for logging a workout
#[derive(Debug, Clone)]
pub struct LogWorkoutInput {
    pub date: Option<DateTime<Utc>>,
    pub exercises: Vec<LogExerciseInput>,
}

/// Input for one exercise in a workout
#[derive(Debug, Clone)]
pub struct LogExerciseInput {
    pub exercise_name: String,
    pub sets: Vec<LogSetInput>,
}

/// Input for one set
#[derive(Debug, Clone)]
pub struct LogSetInput {
    pub weight: f64,
    pub reps: u32,
}

/// Weekly training summary
#[derive(Debug, Clone)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub total_workouts: usize,
    pub total_sets: usize,
    /// Total volume in kg: sum of weight * reps over every set
    pub total_volume: f64,
    pub daily_breakdown: Vec<DailySummary>,
}

/// Per-day workout summary
#[derive(Debug, Clone)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub workouts: usize,
    pub sets: usize,
    pub volume: f64,
}

/// Workout service for business logic
pub struct WorkoutService;

impl WorkoutService {
    /// Log a workout
    ///
    /// Validates the input, stamps identity and timestamps, persists the
    /// workout, and promotes its exercise names to the front of the
    /// recent-exercise list.
    pub async fn log_workout(store: &RecordStore, input: LogWorkoutInput) -> AppResult<Workout> {
        let now = Utc::now();
        let settings = store.settings().await?;

        let workout = Workout {
            id: Uuid::new_v4().to_string(),
            date: input.date.unwrap_or(now),
            updated_at: Some(now),
            device_id: settings.device_id,
            exercises: input
                .exercises
                .into_iter()
                .map(|e| ExerciseEntry {
                    exercise_name: e.exercise_name,
                    sets: e
                        .sets
                        .into_iter()
                        .map(|s| ExerciseSet {
                            weight: s.weight,
                            reps: s.reps,
                        })
                        .collect(),
                })
                .collect(),
        };
        validate_workout(&workout)?;

        let mut workouts = store.workouts().await?;
        workouts.push(workout.clone());
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        store.save_workouts(&workouts).await?;

        Self::refresh_recent_exercises(store, &workout).await?;

        info!(
            workout_id = %workout.id,
            exercises = workout.exercises.len(),
            volume = Self::total_volume(&workout),
            "logged workout"
        );
        Ok(workout)
    }

    /// Promote the workout's exercise names to the front of the capped,
    /// deduplicated recent-exercise list.
    async fn refresh_recent_exercises(store: &RecordStore, workout: &Workout) -> AppResult<()> {
        let latest: Vec<String> = workout
            .exercises
            .iter()
            .map(|e| e.exercise_name.clone())
            .collect();
        let existing = store.recent_exercises().await?;
        let refreshed = merge_recent_exercises(latest, existing);
        store.save_recent_exercises(&refreshed).await
    }

    /// Workout history, newest first
    pub async fn history(store: &RecordStore, limit: Option<usize>) -> AppResult<Vec<Workout>> {
        let mut workouts = store.workouts().await?;
        workouts.sort_by(|a, b| b.date.cmp(&a.date));
        if let Some(limit) = limit {
            workouts.truncate(limit);
        }
        Ok(workouts)
    }

    /// Total volume of a workout in kg: sum of weight * reps over every set
    pub fn total_volume(workout: &Workout) -> f64 {
        workout
            .exercises
            .iter()
            .flat_map(|e| &e.sets)
            .map(|s| s.weight * f64::from(s.reps))
            .sum()
    }

    /// Training summary for the week containing `date`
    pub async fn weekly_summary(store: &RecordStore, date: NaiveDate) -> AppResult<WeeklySummary> {
        let week_start = Self::week_start(date);
        let week_end = week_start + chrono::Duration::days(6);

        let workouts: Vec<Workout> = store
            .workouts()
            .await?
            .into_iter()
            .filter(|w| {
                let day = w.date.date_naive();
                day >= week_start && day <= week_end
            })
            .collect();

        let total_workouts = workouts.len();
        let total_sets = workouts
            .iter()
            .flat_map(|w| &w.exercises)
            .map(|e| e.sets.len())
            .sum();
        let total_volume = workouts.iter().map(Self::total_volume).sum();

        let mut daily_map: std::collections::HashMap<NaiveDate, DailySummary> =
            std::collections::HashMap::new();
        for workout in &workouts {
            let date = workout.date.date_naive();
            let entry = daily_map.entry(date).or_insert_with(|| DailySummary {
                date,
                workouts: 0,
                sets: 0,
                volume: 0.0,
            });
            entry.workouts += 1;
            entry.sets += workout.exercises.iter().map(|e| e.sets.len()).sum::<usize>();
            entry.volume += Self::total_volume(workout);
        }
        let mut daily_breakdown: Vec<DailySummary> = daily_map.into_values().collect();
        daily_breakdown.sort_by_key(|d| d.date);

        Ok(WeeklySummary {
            week_start,
            week_end,
            total_workouts,
            total_sets,
            total_volume,
            daily_breakdown,
        })
    }

    /// Get the Monday of the week containing the given date
    fn week_start(date: NaiveDate) -> NaiveDate {
        let days_from_monday = i64::from(date.weekday().num_days_from_monday());
        date - chrono::Duration::days(days_from_monday)
    }
}
