//! # Gemini Completion Client
//!
//! A [`CompletionClient`] backed by Google's Gemini `generateContent` REST endpoint.
//!
//! ## Environment
//!
//! [`GeminiClient::from_config`] reads `GEMINI_API_KEY` (or the legacy `GOOGLE_AI_API_KEY`),
//! `GEMINI_MODEL` and `GEMINI_BASE_URL` through [`util::config`]. Without a key there is no
//! client and the extractor goes straight to its deterministic fallback.

use crate::error::CompletionError;
use crate::traits::completion::CompletionClient;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use util::config;

/// Gemini-backed completion client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

/// Request body for the Gemini API.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest {
    /// The content to send to the LLM.
    contents: Vec<Content>,
    /// Optional generation configuration for the LLM.
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

/// Content wrapper for the Gemini API request.
#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

/// Sampling settings; extraction wants near-deterministic output.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

/// Response from the Gemini API.
#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
        }
    }

    /// Points the client at a different host (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builds a client from the global configuration, or `None` when no API key is set.
    pub fn from_config() -> Option<Self> {
        let api_key = config::gemini_api_key();
        if api_key.trim().is_empty() {
            return None;
        }
        Some(Self::new(api_key, config::gemini_model()).with_base_url(config::gemini_base_url()))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        if self.api_key.trim().is_empty() {
            return Err(CompletionError::MissingApiKey);
        }

        let request_body = GeminiRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: Some(GenerationConfig { temperature: 0.2 }),
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "sending completion request");

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(CompletionError::RateLimited);
        }
        if !status.is_success() {
            return Err(CompletionError::Http {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let decoded = serde_json::from_str::<GeminiResponse>(&response_text).map_err(|e| {
            CompletionError::InvalidResponse(format!("error decoding response body: {e}"))
        })?;

        let text: String = decoded
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }

        tracing::debug!(response_len = text.len(), "received completion response");
        Ok(text)
    }
}
