use actix_web::{web, HttpResponse, Responder};
use log::error;
use serde::{Deserialize, Serialize};

use crate::models::plan::GeneratedPlan;
use crate::models::preferences::TravelPreferences;
use crate::routes::error_status;
use crate::services::plan_generation_service::{AiPlanner, GenerationOutcome};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<GeneratedPlan>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

/*
    /api/ai/generate-plan
*/
pub async fn generate_plan(
    planner: web::Data<AiPlanner>,
    input: web::Json<TravelPreferences>,
) -> impl Responder {
    let prefs = input.into_inner();

    match planner.generate_plan(&prefs).await {
        GenerationOutcome::Generated(plan) => HttpResponse::Ok().json(PlanResponse {
            success: true,
            plan: Some(plan),
            message: Some("Travel plan generated".to_string()),
            error: None,
            error_code: None,
        }),
        // The mock plan is still usable, so the client gets it with a 200.
        GenerationOutcome::Fallback { data, error } => HttpResponse::Ok().json(PlanResponse {
            success: false,
            plan: Some(data),
            message: Some("AI generation failed, returning a basic plan instead".to_string()),
            error: Some(error.to_string()),
            error_code: Some(error.error_code().to_string()),
        }),
        GenerationOutcome::Failed(err) => {
            error!("Plan generation for {} failed: {}", prefs.destination, err);
            HttpResponse::build(error_status(&err)).json(PlanResponse {
                success: false,
                plan: None,
                message: None,
                error: Some(err.to_string()),
                error_code: Some(err.error_code().to_string()),
            })
        }
    }
}
