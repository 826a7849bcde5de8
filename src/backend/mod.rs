//! Uniform request/response contracts over external AI services.
//!
//! Two capability seams: generative text (sentence reorganization,
//! summarization, Q&A) and batch translation. Engines hold a
//! priority-ordered list of generative backends and fall through the
//! list on failure.

pub mod gemini;
pub mod translate;

pub use gemini::GeminiBackend;
pub use translate::GoogleTranslateBackend;

use crate::config::BackendConfig;
use crate::error::{BackendError, ConfigurationError};
use crate::model::UsageMetadata;
use std::sync::Arc;
use tracing::{info, warn};

/// One generated response.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    /// Token usage, when the backend reports it.
    pub usage: Option<UsageMetadata>,
}

/// A generative-text backend (prompt in, text out).
#[async_trait::async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Generation, BackendError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// A batch translation backend.
#[async_trait::async_trait]
pub trait TranslationBackend: Send + Sync {
    /// Translate one batch of texts into `target`.
    ///
    /// Implementations should return one output per input, in order.
    async fn translate_batch(
        &self,
        texts: &[String],
        source: Option<&str>,
        target: &str,
    ) -> Result<Vec<String>, BackendError>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Try each backend in priority order, returning the first success.
pub async fn generate_with_fallback(
    backends: &[Arc<dyn GenerativeBackend>],
    prompt: &str,
) -> Result<Generation, BackendError> {
    let mut last: Option<BackendError> = None;

    for backend in backends {
        match backend.generate(prompt).await {
            Ok(generation) => {
                info!("Generated with backend: {}", backend.name());
                return Ok(generation);
            }
            Err(e) => {
                warn!("Backend {} failed: {}", backend.name(), e);
                last = Some(e);
            }
        }
    }

    Err(BackendError::Exhausted {
        last: last
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no backends configured".to_string()),
    })
}

/// Build the priority-ordered generative backend list from configuration.
pub fn generative_backends(
    config: &BackendConfig,
) -> Result<Vec<Arc<dyn GenerativeBackend>>, ConfigurationError> {
    let api_key = config
        .google_api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ConfigurationError("backends.google_api_key".to_string()))?;

    let backends = config
        .gemini_models
        .iter()
        .map(|model| {
            Arc::new(GeminiBackend::new(
                api_key.to_string(),
                model.model.clone(),
                model.api_version.clone(),
            )) as Arc<dyn GenerativeBackend>
        })
        .collect();

    Ok(backends)
}

/// Build the translation backend from configuration.
pub fn translation_backend(
    config: &BackendConfig,
) -> Result<Arc<dyn TranslationBackend>, ConfigurationError> {
    let api_key = config
        .google_api_key
        .as_deref()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| ConfigurationError("backends.google_api_key".to_string()))?;

    Ok(Arc::new(GoogleTranslateBackend::new(api_key.to_string())))
}
