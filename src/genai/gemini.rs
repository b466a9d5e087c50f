//! Gemini generateContent adapter

use crate::config::EngineConfig;
use crate::error::{AppError, Result};
use crate::genai::{Completion, GenerativeClient};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Gemini text-completion client
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.timeout_secs))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: config.genai_base_url.trim_end_matches('/').to_string(),
            model: config.genai_model.clone(),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

/// Response payload; every level is optional so that unexpected shapes
/// degrade to an empty completion instead of a decode failure.
#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    message: Option<String>,
}

/// Map a decoded payload to a completion, surfacing explicit error payloads
fn completion_from_response(response: GenerateResponse) -> Result<Completion> {
    if let Some(err) = response.error {
        return Err(AppError::Upstream(
            err.message.unwrap_or_else(|| "API Error".to_string()),
        ));
    }

    let text = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text);

    Ok(Completion { text })
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(&self, api_key: &str, prompt: &str) -> Result<Completion> {
        let request = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{}/v1beta/models/{}:generateContent?key={}",
                self.base_url, self.model, api_key
            ))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "API Error: {}",
                status.as_u16()
            )));
        }

        let result: GenerateResponse = response.json().await?;

        completion_from_response(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_first_candidate_text() {
        let raw = r#"{
            "candidates": [
                {
                    "content": {
                        "parts": [{ "text": "📦 Restock the Oak Bookshelf before the weekend rush." }],
                        "role": "model"
                    },
                    "finishReason": "STOP"
                }
            ],
            "usageMetadata": { "totalTokenCount": 42 }
        }"#;

        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        let completion = completion_from_response(response).unwrap();

        assert_eq!(
            completion.text.as_deref(),
            Some("📦 Restock the Oak Bookshelf before the weekend rush.")
        );
    }

    #[test]
    fn test_missing_text_yields_empty_completion() {
        let raw = r#"{ "candidates": [ { "finishReason": "SAFETY" } ] }"#;

        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        let completion = completion_from_response(response).unwrap();

        assert!(completion.text.is_none());
    }

    #[test]
    fn test_error_payload_maps_to_upstream() {
        let raw = r#"{ "error": { "code": 429, "message": "Resource has been exhausted" } }"#;

        let response: GenerateResponse = serde_json::from_str(raw).unwrap();
        let err = completion_from_response(response).unwrap_err();

        assert!(matches!(err, AppError::Upstream(ref m) if m.contains("exhausted")));
    }
}
