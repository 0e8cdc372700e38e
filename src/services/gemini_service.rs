//! Gemini text generation client.
//!
//! The client is built on first use from the environment and then shared for
//! the lifetime of the process:
//!
//! - `GEMINI_API_KEY` (required)
//! - `GEMINI_MODEL` (default `gemini-1.5-flash`)
//! - `GEMINI_API_BASE` (default `https://generativelanguage.googleapis.com`)
//!
//! One request per prompt. There is no retry and no explicit timeout.

use futures::future::BoxFuture;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use tokio::sync::OnceCell;
use url::Url;

use crate::services::generation_error::GenerationError;

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const MAX_ERROR_BODY_CHARS: usize = 500;

static SHARED_CLIENT: OnceCell<GeminiClient> = OnceCell::const_new();

/// Anything that can turn a prompt into raw model text.
pub trait TextGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>>;
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Url,
}

impl GeminiConfig {
    pub fn from_env() -> Result<Self, GenerationError> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::Configuration("GEMINI_API_KEY not set".to_string()))?;

        let model = env::var("GEMINI_MODEL")
            .ok()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base = env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let base_url = Url::parse(&base).map_err(|e| {
            GenerationError::Configuration(format!("GEMINI_API_BASE is not a valid URL: {}", e))
        })?;

        Ok(Self {
            api_key,
            model,
            base_url,
        })
    }

    pub fn is_present() -> bool {
        env::var("GEMINI_API_KEY")
            .map(|key| !key.trim().is_empty())
            .unwrap_or(false)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("trip-planner-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                GenerationError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(Self { http, config })
    }

    /// The process-wide client, created from the environment on first call.
    ///
    /// Concurrent first calls all wait on the same initialization. A failed
    /// initialization is not cached, so fixing the environment takes effect on
    /// the next request.
    pub async fn shared() -> Result<&'static GeminiClient, GenerationError> {
        SHARED_CLIENT
            .get_or_try_init(|| async {
                let config = GeminiConfig::from_env()?;
                info!("Initializing Gemini client for model {}", config.model);
                GeminiClient::new(config)
            })
            .await
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.as_str().trim_end_matches('/'),
            self.config.model
        )
    }

    pub async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let body: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            warn!("Gemini request failed with status {}", status);
            return Err(GenerationError::Transport(format!(
                "Gemini request failed with status {}: {}",
                status, body
            )));
        }

        let payload: GenerateContentResponse = response.json().await.map_err(|e| {
            GenerationError::Transport(format!("Failed to decode Gemini response: {}", e))
        })?;

        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::Transport(
                "Gemini returned no text".to_string(),
            ));
        }

        Ok(text)
    }
}

impl TextGenerator for GeminiClient {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>> {
        Box::pin(self.generate_content(prompt))
    }
}

/// Resolves the shared client on every call, so a missing API key surfaces
/// per request instead of at startup.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyGeminiGenerator;

impl TextGenerator for LazyGeminiGenerator {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, GenerationError>> {
        Box::pin(async move {
            let client = GeminiClient::shared().await?;
            client.generate_content(prompt).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serial_test::serial;

    fn client_for(server_url: &str) -> GeminiClient {
        GeminiClient::new(GeminiConfig {
            api_key: "test-key".to_string(),
            model: "gemini-test".to_string(),
            base_url: Url::parse(server_url).unwrap(),
        })
        .unwrap()
    }

    #[actix_rt::test]
    async fn test_generate_content_joins_text_parts() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "contents": [{ "parts": [{ "text": "hello" }] }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"candidates":[{"content":{"parts":[{"text":"```json\n"},{"text":"{}\n```"}]}}]}"#,
            )
            .create_async()
            .await;

        let text = client_for(&server.url()).generate_content("hello").await.unwrap();

        mock.assert_async().await;
        assert_eq!(text, "```json\n{}\n```");
    }

    #[actix_rt::test]
    async fn test_error_status_is_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(429)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let err = client_for(&server.url()).generate_content("hello").await.unwrap_err();

        match err {
            GenerationError::Transport(msg) => assert!(msg.contains("quota exceeded")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[actix_rt::test]
    async fn test_empty_candidates_is_transport_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1beta/models/gemini-test:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let err = client_for(&server.url()).generate_content("hello").await.unwrap_err();
        assert!(matches!(err, GenerationError::Transport(_)));
    }

    #[test]
    #[serial]
    fn test_config_requires_api_key() {
        env::remove_var("GEMINI_API_KEY");
        let err = GeminiConfig::from_env().unwrap_err();
        assert!(matches!(err, GenerationError::Configuration(_)));
        assert!(!GeminiConfig::is_present());
    }

    #[test]
    #[serial]
    fn test_config_defaults() {
        env::set_var("GEMINI_API_KEY", "abc");
        env::remove_var("GEMINI_MODEL");
        env::remove_var("GEMINI_API_BASE");

        let config = GeminiConfig::from_env().unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.base_url.as_str(), "https://generativelanguage.googleapis.com/");

        env::remove_var("GEMINI_API_KEY");
    }

    #[test]
    #[serial]
    fn test_shared_client_fails_without_key() {
        env::remove_var("GEMINI_API_KEY");
        let result = tokio_test::block_on(LazyGeminiGenerator.generate("hello"));
        assert!(matches!(result, Err(GenerationError::Configuration(_))));
    }
}
