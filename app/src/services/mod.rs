//! Business logic services

pub mod analysis;
pub mod export;
pub mod workouts;

pub use analysis::BodyAnalysisService;
pub use export::ExportService;
pub use workouts::WorkoutService;
