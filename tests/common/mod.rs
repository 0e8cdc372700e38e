#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use futures::future::BoxFuture;
use serde_json::{json, Value};
use std::sync::Arc;

use trip_planner_api::routes;
use trip_planner_api::services::gemini_service::{LazyGeminiGenerator, TextGenerator};
use trip_planner_api::services::generation_error::GenerationError;
use trip_planner_api::services::plan_generation_service::AiPlanner;

/// Answers every prompt with the same canned model output.
pub struct StubGenerator {
    response: Result<String, GenerationError>,
}

impl TextGenerator for StubGenerator {
    fn generate<'a>(&'a self, _prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>> {
        let response = self.response.clone();
        Box::pin(async move { response })
    }
}

pub struct TestApp {
    pub planner: AiPlanner,
}

impl TestApp {
    pub fn with_response(raw: &str) -> Self {
        Self::with_generator(Arc::new(StubGenerator {
            response: Ok(raw.to_string()),
        }))
    }

    pub fn with_error(err: GenerationError) -> Self {
        Self::with_generator(Arc::new(StubGenerator { response: Err(err) }))
    }

    /// Uses the real lazily-initialized Gemini client.
    pub fn with_gemini() -> Self {
        Self::with_generator(Arc::new(LazyGeminiGenerator))
    }

    fn with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            planner: AiPlanner::new(generator),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.planner.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    }
}

pub fn kyoto_plan_request() -> Value {
    json!({
        "destination": "京都",
        "startDate": "2024-03-15",
        "endDate": "2024-03-17",
        "memberCount": 2,
        "budget": 100000,
        "interests": ["寺社", "和食"],
        "travelStyle": "relaxed",
        "description": "桜を見たい"
    })
}

pub fn kyoto_recommendation_request() -> Value {
    json!({
        "destination": "京都",
        "interests": ["歴史"],
        "budget": "medium",
        "travelStyle": "balanced",
        "groupSize": 3,
        "duration": "2日"
    })
}

pub const VALID_PLAN_RESPONSE: &str = r#"承知しました。以下がプランです。
```json
{
  "schedule": [
    {"day": 1, "date": "2024-03-15", "items": [
      {"time": "09:00", "title": "京都駅到着", "description": "新幹線で移動", "category": "transport"},
      {"time": "12:00", "title": "湯豆腐ランチ", "category": "food"}
    ]},
    {"day": 2, "date": "2024-03-16", "items": [
      {"time": "10:00", "title": "清水寺", "category": "sightseeing", "location": "東山"}
    ]}
  ],
  "places": [{"name": "清水寺", "category": "寺院", "rating": 4.7, "description": "世界遺産"}],
  "budget": {"transportation": 30000, "accommodation": 40000, "food": 20000, "activities": 10000},
  "recommendations": {"mustVisit": ["伏見稲荷大社"], "localFood": ["湯豆腐"], "tips": ["朝早く出発しましょう"]}
}
```"#;

pub const RECOMMENDATION_RESPONSE: &str = r#"[
  {"name": "清水寺", "category": "寺院", "rating": 4.7,
   "image": "https://images.example.com/kiyomizu.jpg",
   "description": "京都を代表する寺院", "aiReason": "歴史好きに最適", "matchScore": 95,
   "estimatedTime": "2時間", "priceRange": "¥400", "tags": ["世界遺産"]},
  {"name": "東京タワー", "category": "展望台", "rating": 4.3,
   "image": "https://images.example.com/tower.png",
   "description": "東京のランドマーク", "aiReason": "夜景", "matchScore": 70,
   "estimatedTime": "1時間", "priceRange": "¥1,200", "tags": ["夜景"]},
  {"name": "京都国立博物館", "category": "博物館", "rating": 4.5,
   "image": "not-a-url",
   "description": "国宝を展示", "aiReason": "歴史", "matchScore": 88,
   "estimatedTime": "3時間", "priceRange": "¥700", "tags": ["博物館"]}
]"#;
