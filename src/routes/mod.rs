use actix_web::{error::InternalError, http::StatusCode, web, HttpResponse};
use serde_json::json;

use crate::services::generation_error::GenerationError;

pub mod ai_plan;
pub mod ai_recommendation;
pub mod health;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/api/ai")
                .route("/generate-plan", web::post().to(ai_plan::generate_plan))
                .route(
                    "/recommendations",
                    web::post().to(ai_recommendation::generate_recommendations),
                ),
        );
}

/// Malformed bodies get the same `{success, error}` envelope as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = format!("Invalid request body: {}", err);
        let response = HttpResponse::BadRequest().json(json!({
            "success": false,
            "error": message,
            "errorCode": "INVALID_PREFERENCES",
        }));
        InternalError::from_response(err, response).into()
    })
}

pub(crate) fn error_status(err: &GenerationError) -> StatusCode {
    if err.is_precondition() {
        StatusCode::BAD_REQUEST
    } else if err.is_recoverable() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    }
}
