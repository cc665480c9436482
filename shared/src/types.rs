//! Wire types for the external inference boundary

use crate::models::{BodyAnalysis, FitnessLevel, OverallHealth};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body-composition estimate as returned by the inference API
///
/// The application does not depend on how the estimate was produced (model
/// inference vs. a simulated fallback), only on this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BodyCompositionEstimate {
    pub body_fat_percentage: f64,
    pub muscle_mass: f64,
    pub fitness_level: FitnessLevel,
    pub overall_health: OverallHealth,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BodyCompositionEstimate {
    /// Stamp the estimate with identity and time, turning it into a record
    /// the store and sync layer understand.
    pub fn into_analysis(self, id: String, timestamp: DateTime<Utc>) -> BodyAnalysis {
        BodyAnalysis {
            id,
            timestamp,
            body_fat_percentage: self.body_fat_percentage,
            muscle_mass: self.muscle_mass,
            fitness_level: self.fitness_level,
            overall_health: self.overall_health,
            confidence: self.confidence,
            notes: self.notes,
        }
    }
}
