//! Body-composition analysis service
//!
//! Runs the inference boundary on a photo, validates the result, and stores
//! it as an analysis record. History is kept newest first.

use crate::error::AppResult;
use crate::remote::InferenceClient;
use crate::store::RecordStore;
use chrono::Utc;
use fittrack_shared::models::BodyAnalysis;
use fittrack_shared::validation::validate_body_analysis;
use tracing::info;
use uuid::Uuid;

/// Change between the oldest and newest stored analyses
#[derive(Debug, Clone)]
pub struct AnalysisTrend {
    pub body_fat_change: f64,
    pub muscle_mass_change: f64,
    pub span_days: i64,
    pub entries_count: usize,
}

/// Body-analysis service
pub struct BodyAnalysisService;

impl BodyAnalysisService {
    /// Run an analysis on a photo and persist the result
    pub async fn analyze(
        store: &RecordStore,
        inference: &InferenceClient,
        image: &[u8],
    ) -> AppResult<BodyAnalysis> {
        let estimate = inference.estimate(image).await?;
        let analysis = estimate.into_analysis(Uuid::new_v4().to_string(), Utc::now());
        validate_body_analysis(&analysis)?;

        let mut analyses = store.body_analyses().await?;
        analyses.push(analysis.clone());
        analyses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        store.save_body_analyses(&analyses).await?;

        info!(
            analysis_id = %analysis.id,
            body_fat = analysis.body_fat_percentage,
            confidence = analysis.confidence,
            "stored body analysis"
        );
        Ok(analysis)
    }

    /// Analysis history, newest first
    pub async fn history(store: &RecordStore, limit: Option<usize>) -> AppResult<Vec<BodyAnalysis>> {
        let mut analyses = store.body_analyses().await?;
        analyses.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        if let Some(limit) = limit {
            analyses.truncate(limit);
        }
        Ok(analyses)
    }

    /// Most recent analysis, if any
    pub async fn latest(store: &RecordStore) -> AppResult<Option<BodyAnalysis>> {
        Ok(Self::history(store, Some(1)).await?.into_iter().next())
    }

    /// Trend between the oldest and newest analyses; needs at least two
    pub async fn trend(store: &RecordStore) -> AppResult<Option<AnalysisTrend>> {
        let analyses = Self::history(store, None).await?;
        if analyses.len() < 2 {
            return Ok(None);
        }

        let newest = &analyses[0];
        let oldest = &analyses[analyses.len() - 1];
        Ok(Some(AnalysisTrend {
            body_fat_change: newest.body_fat_percentage - oldest.body_fat_percentage,
            muscle_mass_change: newest.muscle_mass - oldest.muscle_mass,
            span_days: (newest.timestamp - oldest.timestamp).num_days(),
            entries_count: analyses.len(),
        }))
    }
}
