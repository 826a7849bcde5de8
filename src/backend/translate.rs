use super::TranslationBackend;
use crate::error::BackendError;
use serde::Deserialize;
use serde_json::json;

const TRANSLATION_URL: &str = "https://translation.googleapis.com/language/translate/v2";

const BACKEND_NAME: &str = "google-translate";

/// Google Cloud Translation v2 backend.
pub struct GoogleTranslateBackend {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: Option<TranslateData>,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

/// Map an application language code to the API's code. Mostly identity;
/// Chinese needs a region suffix.
fn api_language_code(code: &str) -> &str {
    match code {
        "zh" => "zh-CN",
        other => other,
    }
}

impl GoogleTranslateBackend {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: TRANSLATION_URL.to_string(),
        }
    }

    /// Point this backend at a different endpoint (for tests).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait::async_trait]
impl TranslationBackend for GoogleTranslateBackend {
    async fn translate_batch(
        &self,
        texts: &[String],
        source: Option<&str>,
        target: &str,
    ) -> Result<Vec<String>, BackendError> {
        let url = format!("{}?key={}", self.base_url, self.api_key);

        let mut body = json!({
            "q": texts,
            "target": api_language_code(target),
            "format": "text",
        });
        if let Some(source) = source {
            body["source"] = json!(api_language_code(source));
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|source| BackendError::Request {
                backend: BACKEND_NAME.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                backend: BACKEND_NAME.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse =
            response
                .json()
                .await
                .map_err(|source| BackendError::Request {
                    backend: BACKEND_NAME.to_string(),
                    source,
                })?;

        let translations = parsed
            .data
            .map(|d| d.translations)
            .ok_or_else(|| BackendError::Unusable {
                backend: BACKEND_NAME.to_string(),
                reason: "missing translations in response".to_string(),
            })?;

        // One output per input; a missing entry keeps the source text.
        let translated = texts
            .iter()
            .enumerate()
            .map(|(i, original)| {
                translations
                    .get(i)
                    .and_then(|t| t.translated_text.clone())
                    .unwrap_or_else(|| original.clone())
            })
            .collect();

        Ok(translated)
    }

    fn name(&self) -> &str {
        BACKEND_NAME
    }
}
