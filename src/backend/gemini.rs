use super::{Generation, GenerativeBackend};
use crate::error::BackendError;
use crate::model::UsageMetadata;
use serde::Deserialize;
use serde_json::json;

const GENERATIVE_LANGUAGE_URL: &str = "https://generativelanguage.googleapis.com";

/// One Gemini model behind the Generative Language API.
///
/// The fallback chain is built from several of these, one per
/// (model, API version) pair, in priority order.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_version: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<GeminiUsage>,
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

#[derive(Debug, Deserialize)]
struct GeminiUsage {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<u64>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<u64>,
}

impl GeminiBackend {
    pub fn new(api_key: String, model: String, api_version: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model,
            api_version,
            base_url: GENERATIVE_LANGUAGE_URL.to_string(),
        }
    }

    /// Point this backend at a different host (for tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait::async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn generate(&self, prompt: &str) -> Result<Generation, BackendError> {
        let url = format!(
            "{}/{}/models/{}:generateContent?key={}",
            self.base_url, self.api_version, self.model, self.api_key
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": 0.3,
                "maxOutputTokens": 4096,
            },
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                backend: self.model.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                backend: self.model.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateContentResponse =
            response
                .json()
                .await
                .map_err(|source| BackendError::Request {
                    backend: self.model.clone(),
                    source,
                })?;

        let text = parsed
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .ok_or_else(|| BackendError::Unusable {
                backend: self.model.clone(),
                reason: "no text in response".to_string(),
            })?;

        let usage = parsed.usage_metadata.map(|u| UsageMetadata {
            input_tokens: u.prompt_token_count,
            output_tokens: u.candidates_token_count,
        });

        Ok(Generation { text, usage })
    }

    fn name(&self) -> &str {
        &self.model
    }
}
