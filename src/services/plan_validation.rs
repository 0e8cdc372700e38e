use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use uuid::Uuid;

use crate::models::plan::GeneratedPlan;
use crate::models::preferences::RecommendationPreferences;
use crate::models::recommendation::AiRecommendation;
use crate::services::generation_error::GenerationError;
use crate::services::response_extraction::{extract_json, ExtractionOutcome, JsonShape};

/// Shown instead of any image URL the model invents that does not look like an image.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/400x300.png?text=No+Image";

const IMAGE_URL_MIN_LEN: usize = 15;
const IMAGE_URL_MAX_LEN: usize = 300;

static IMAGE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://.*\.(jpg|jpeg|png|webp|gif|bmp|svg)(\?.*)?$")
        .expect("valid image url pattern")
});

fn parse_candidate(raw: &str, outcome: &ExtractionOutcome) -> Result<Value, GenerationError> {
    serde_json::from_str::<Value>(outcome.candidate(raw).trim()).map_err(|e| match outcome {
        ExtractionOutcome::NotFound => {
            GenerationError::Extraction(format!("no JSON found in model response ({})", e))
        }
        ExtractionOutcome::Found(_) => GenerationError::Parse(e.to_string()),
    })
}

/// Turns raw model text into a plan, or says why it could not.
pub fn coerce_plan(raw: &str) -> Result<GeneratedPlan, GenerationError> {
    let outcome = extract_json(raw, JsonShape::Object);
    let value = parse_candidate(raw, &outcome)?;

    let plan: GeneratedPlan = serde_path_to_error::deserialize(value).map_err(|e| {
        GenerationError::Schema(format!("{} at `{}`", e.inner(), e.path()))
    })?;

    validate_plan(&plan)?;
    Ok(plan)
}

fn validate_plan(plan: &GeneratedPlan) -> Result<(), GenerationError> {
    if plan.schedule.is_empty() {
        return Err(GenerationError::Schema(
            "schedule must contain at least one day".to_string(),
        ));
    }

    for (name, amount) in plan.budget.figures() {
        if !amount.is_finite() || amount < 0.0 {
            return Err(GenerationError::Schema(format!(
                "budget.{} must be a non-negative number, got {}",
                name, amount
            )));
        }
    }

    Ok(())
}

/// Turns raw model text into the recommendation list returned to the client.
///
/// Entries that do not mention the destination (or the region, when given)
/// are dropped, and unusable image URLs are swapped for the placeholder.
pub fn coerce_recommendations(
    raw: &str,
    prefs: &RecommendationPreferences,
) -> Result<Vec<AiRecommendation>, GenerationError> {
    let outcome = extract_json(raw, JsonShape::Array);
    let value = parse_candidate(raw, &outcome)?;

    let Value::Array(entries) = value else {
        return Err(GenerationError::Schema(
            "expected a JSON array of recommendations".to_string(),
        ));
    };

    let total = entries.len();
    let recommendations: Vec<AiRecommendation> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<AiRecommendation>(entry) {
            Ok(recommendation) => Some(recommendation),
            Err(e) => {
                warn!("Skipping undecodable recommendation: {}", e);
                None
            }
        })
        .filter(|rec| mentions_destination(rec, &prefs.destination, prefs.region()))
        .map(normalize_recommendation)
        .collect();

    if recommendations.len() < total {
        warn!(
            "Dropped {} of {} recommendations not located in {}",
            total - recommendations.len(),
            total,
            prefs.destination
        );
    }

    Ok(recommendations)
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

fn mentions(rec: &AiRecommendation, needle: &str) -> bool {
    let needle = strip_whitespace(needle);
    if needle.is_empty() {
        return false;
    }
    strip_whitespace(&rec.name).contains(&needle)
        || strip_whitespace(&rec.description).contains(&needle)
}

/// Case-sensitive substring test on whitespace-free text; the region is only
/// consulted when the destination is not mentioned.
pub fn mentions_destination(rec: &AiRecommendation, destination: &str, region: Option<&str>) -> bool {
    mentions(rec, destination) || region.is_some_and(|region| mentions(rec, region))
}

pub fn is_valid_image_url(url: &str) -> bool {
    let len = url.chars().count();
    (IMAGE_URL_MIN_LEN..=IMAGE_URL_MAX_LEN).contains(&len) && IMAGE_URL.is_match(url)
}

fn normalize_recommendation(mut rec: AiRecommendation) -> AiRecommendation {
    rec.id = Uuid::new_v4();
    rec.is_bookmarked = false;

    if !is_valid_image_url(&rec.image) {
        rec.image = PLACEHOLDER_IMAGE_URL.to_string();
    }

    rec.match_score = if rec.match_score.is_finite() {
        rec.match_score.clamp(0.0, 100.0)
    } else {
        0.0
    };

    rec
}
