use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::models::preferences::RecommendationPreferences;
use crate::models::recommendation::AiRecommendation;
use crate::routes::error_status;
use crate::services::plan_generation_service::AiPlanner;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub success: bool,
    pub recommendations: Vec<AiRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/*
    /api/ai/recommendations
*/
pub async fn generate_recommendations(
    planner: web::Data<AiPlanner>,
    input: web::Json<RecommendationPreferences>,
) -> impl Responder {
    let prefs = input.into_inner();

    match planner.generate_recommendations(&prefs).await {
        Ok(recommendations) => {
            let message = if recommendations.is_empty() {
                format!("No recommendations found for {}", prefs.destination)
            } else {
                format!("{} recommendations generated", recommendations.len())
            };

            HttpResponse::Ok().json(RecommendationResponse {
                success: true,
                recommendations,
                message: Some(message),
                error: None,
                error_code: None,
            })
        }
        Err(error) => {
            HttpResponse::build(error_status(&error)).json(RecommendationResponse {
                success: false,
                recommendations: Vec::new(),
                message: Some("Could not generate recommendations".to_string()),
                error: Some(error.to_string()),
                error_code: Some(error.error_code().to_string()),
            })
        }
    }
}
