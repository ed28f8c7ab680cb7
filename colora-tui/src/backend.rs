//! HTTP client for the Gemini generateContent endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::analysis::{build_prompt, parse_analysis, response_schema, AnalysisError, AnalysisService};
use crate::color::Color;
use crate::model::AnalysisResult;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Clone, Debug)]
pub struct GeminiSettings {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub language: String,
    pub timeout: Duration,
}

pub struct GeminiClient {
    settings: GeminiSettings,
    client: reqwest::Client,
}

impl GeminiClient {
    pub fn new(settings: GeminiSettings) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        Ok(Self { settings, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    fn request_body(&self, base: Color) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(base, &self.settings.language) }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        })
    }
}

/// Concatenated text parts of the first candidate.
fn candidate_text(resp: GenerateResponse) -> Result<String, AnalysisError> {
    let text: String = resp
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl AnalysisService for GeminiClient {
    async fn request_analysis(&self, base: Color) -> Result<AnalysisResult, AnalysisError> {
        let api_key = self.settings.api_key.as_deref().ok_or(AnalysisError::MissingApiKey)?;
        tracing::info!(%base, model = %self.settings.model, "requesting palette analysis");

        let resp = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&self.request_body(base))
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AnalysisError::Http { status: status.as_u16(), body });
        }
        let generated: GenerateResponse = resp
            .json()
            .await
            .map_err(|e| AnalysisError::Parse(e.to_string()))?;
        let result = parse_analysis(&candidate_text(generated)?);
        if let Err(e) = &result {
            tracing::error!(%base, error = %e, "failed to parse AI response");
        }
        result
    }
}
