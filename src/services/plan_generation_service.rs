use log::{info, warn};
use std::sync::Arc;

use crate::models::plan::GeneratedPlan;
use crate::models::preferences::{RecommendationPreferences, TravelPreferences};
use crate::models::recommendation::AiRecommendation;
use crate::services::fallback_plan_service::fallback_plan;
use crate::services::gemini_service::TextGenerator;
use crate::services::generation_error::GenerationError;
use crate::services::plan_validation::{coerce_plan, coerce_recommendations};
use crate::services::prompt_service::{build_plan_prompt, build_recommendation_prompt};

/// Result of one plan generation call.
///
/// Only plans degrade to `Fallback` with a mock plan. Recommendations have no
/// mock data, so `generate_recommendations` returns a plain `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome<T> {
    Generated(T),
    Fallback { data: T, error: GenerationError },
    Failed(GenerationError),
}

#[derive(Clone)]
pub struct AiPlanner {
    generator: Arc<dyn TextGenerator>,
}

impl AiPlanner {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Prompting → calling the model → extracting → validating. Any failure
    /// after the model has been configured falls back to the mock plan.
    pub async fn generate_plan(&self, prefs: &TravelPreferences) -> GenerationOutcome<GeneratedPlan> {
        let length = match prefs.validate() {
            Ok(length) => length,
            Err(err) => return GenerationOutcome::Failed(err),
        };

        let prompt = build_plan_prompt(prefs, length);
        info!(
            "Generating {}-day plan for {} ({} travellers)",
            length.days, prefs.destination, prefs.member_count
        );

        let result = match self.generator.generate(&prompt).await {
            Ok(raw) => coerce_plan(&raw),
            Err(err) => Err(err),
        };

        match result {
            Ok(plan) => GenerationOutcome::Generated(plan),
            Err(err) if err.is_recoverable() => {
                warn!("Plan generation for {} fell back to mock plan: {}", prefs.destination, err);
                GenerationOutcome::Fallback {
                    data: fallback_plan(prefs),
                    error: err,
                }
            }
            Err(err) => GenerationOutcome::Failed(err),
        }
    }

    pub async fn generate_recommendations(
        &self,
        prefs: &RecommendationPreferences,
    ) -> Result<Vec<AiRecommendation>, GenerationError> {
        prefs.validate()?;

        let prompt = build_recommendation_prompt(prefs);
        info!("Generating recommendations for {}", prefs.destination);

        let result = match self.generator.generate(&prompt).await {
            Ok(raw) => coerce_recommendations(&raw, prefs),
            Err(err) => Err(err),
        };

        result.map_err(|err| {
            warn!("Recommendation generation for {} failed: {}", prefs.destination, err);
            err
        })
    }
}
