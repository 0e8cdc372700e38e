use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use log::{info, warn};

use trip_planner_api::config::ServerConfig;
use trip_planner_api::routes;
use trip_planner_api::services::gemini_service::{GeminiConfig, LazyGeminiGenerator};
use trip_planner_api::services::plan_generation_service::AiPlanner;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    }

    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env();

    // The Gemini client itself is built lazily on the first AI request.
    if !GeminiConfig::is_present() {
        warn!("GEMINI_API_KEY is not set; AI routes will fail until it is configured");
    }

    let planner = web::Data::new(AiPlanner::new(Arc::new(LazyGeminiGenerator)));

    info!("Starting HTTP server on {}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .app_data(planner.clone())
            .configure(routes::config)
    })
    .bind((config.host, config.port))?
    .run()
    .await
}
