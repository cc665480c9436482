//! FitTrack shared library
//!
//! Domain models, wire types, and validation shared between the application
//! crate and its tests.

pub mod errors;
pub mod models;
pub mod types;
pub mod validation;

// Re-export commonly used items
pub use errors::ValidationError;
pub use models::{
    BodyAnalysis, DeviceSettings, ExerciseEntry, ExerciseSet, FitnessLevel, OverallHealth,
    SyncDataset, Workout, MAX_EXERCISES_PER_WORKOUT, RECENT_EXERCISES_CAP,
};
pub use types::BodyCompositionEstimate;
