//! Input validation functions
//!
//! Records are validated before they reach the store or the reconciler; the
//! merge logic itself assumes well-formed input.

use crate::errors::ValidationError;
use crate::models::{BodyAnalysis, ExerciseSet, Workout, MAX_EXERCISES_PER_WORKOUT};

/// Upper bound on a single-set weight, in kilograms
pub const MAX_SET_WEIGHT_KG: f64 = 1000.0;

/// Upper bound on repetitions in a single set
pub const MAX_SET_REPS: u32 = 1000;

/// Upper bound on exercise name length
pub const MAX_EXERCISE_NAME_LEN: usize = 100;

/// Validate an exercise name
pub fn validate_exercise_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("exerciseName", "cannot be empty"));
    }
    if name.len() > MAX_EXERCISE_NAME_LEN {
        return Err(ValidationError::new(
            "exerciseName",
            format!("cannot exceed {MAX_EXERCISE_NAME_LEN} characters"),
        ));
    }
    Ok(())
}

/// Validate a single set
pub fn validate_set(set: &ExerciseSet) -> Result<(), ValidationError> {
    if set.weight.is_nan() || set.weight.is_infinite() {
        return Err(ValidationError::new("weight", "must be a valid number"));
    }
    if set.weight < 0.0 {
        return Err(ValidationError::new("weight", "cannot be negative"));
    }
    if set.weight > MAX_SET_WEIGHT_KG {
        return Err(ValidationError::new(
            "weight",
            format!("cannot exceed {MAX_SET_WEIGHT_KG} kg"),
        ));
    }
    if set.reps > MAX_SET_REPS {
        return Err(ValidationError::new(
            "reps",
            format!("cannot exceed {MAX_SET_REPS}"),
        ));
    }
    Ok(())
}

/// Validate a complete workout: 1-8 exercises, each with at least one set
pub fn validate_workout(workout: &Workout) -> Result<(), ValidationError> {
    if workout.exercises.is_empty() {
        return Err(ValidationError::new(
            "exercises",
            "a workout needs at least one exercise",
        ));
    }
    if workout.exercises.len() > MAX_EXERCISES_PER_WORKOUT {
        return Err(ValidationError::new(
            "exercises",
            format!("a workout cannot have more than {MAX_EXERCISES_PER_WORKOUT} exercises"),
        ));
    }
    for exercise in &workout.exercises {
        validate_exercise_name(&exercise.exercise_name)?;
        if exercise.sets.is_empty() {
            return Err(ValidationError::new(
                "sets",
                format!("exercise '{}' needs at least one set", exercise.exercise_name),
            ));
        }
        for set in &exercise.sets {
            validate_set(set)?;
        }
    }
    Ok(())
}

/// Validate a percentage-like field (0-100)
pub fn validate_percentage(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_nan() || value.is_infinite() {
        return Err(ValidationError::new(field, "must be a valid number"));
    }
    if !(0.0..=100.0).contains(&value) {
        return Err(ValidationError::new(field, "must be between 0 and 100"));
    }
    Ok(())
}

/// Validate a body analysis record
pub fn validate_body_analysis(analysis: &BodyAnalysis) -> Result<(), ValidationError> {
    validate_percentage("bodyFatPercentage", analysis.body_fat_percentage)?;
    validate_percentage("muscleMass", analysis.muscle_mass)?;
    validate_percentage("confidence", analysis.confidence)?;
    Ok(())
}
