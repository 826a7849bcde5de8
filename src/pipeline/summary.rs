use crate::backend::{generate_with_fallback, GenerativeBackend};
use crate::error::BackendError;
use crate::model::{SummaryResult, SummaryType};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Where transcript text lives, keyed by transcript id.
#[async_trait::async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(&self, id: &str) -> Result<String, BackendError>;
}

/// Transcript store backed by a map, for serving completed sessions out
/// of process memory.
pub struct InMemoryTranscripts {
    transcripts: HashMap<String, String>,
}

impl InMemoryTranscripts {
    pub fn new(transcripts: HashMap<String, String>) -> Self {
        Self { transcripts }
    }
}

#[async_trait::async_trait]
impl TranscriptSource for InMemoryTranscripts {
    async fn fetch(&self, id: &str) -> Result<String, BackendError> {
        self.transcripts
            .get(id)
            .cloned()
            .ok_or_else(|| BackendError::Unusable {
                backend: "transcripts".to_string(),
                reason: format!("unknown transcript id: {id}"),
            })
    }
}

/// One answered transcript question.
#[derive(Debug, Clone)]
pub struct QaResult {
    pub question: String,
    pub answer: String,
    pub language: String,
}

/// Generates summaries and answers questions over stored transcripts.
///
/// Unlike the other pipelines this one surfaces backend exhaustion to the
/// caller: there is no sensible degraded summary.
pub struct SummaryEngine {
    backends: Vec<Arc<dyn GenerativeBackend>>,
    transcripts: Arc<dyn TranscriptSource>,
}

impl SummaryEngine {
    pub fn new(
        backends: Vec<Arc<dyn GenerativeBackend>>,
        transcripts: Arc<dyn TranscriptSource>,
    ) -> Self {
        Self {
            backends,
            transcripts,
        }
    }

    /// Summarize the given transcripts.
    ///
    /// `custom_prompt` is required for [`SummaryType::Custom`] and ignored
    /// otherwise.
    pub async fn summarize(
        &self,
        transcript_ids: &[String],
        summary_type: SummaryType,
        custom_prompt: Option<&str>,
        language: &str,
    ) -> Result<SummaryResult, BackendError> {
        let transcript = self.assemble(transcript_ids).await?;

        let instruction = match template(summary_type) {
            Some(fixed) => fixed.to_string(),
            None => custom_prompt
                .filter(|p| !p.trim().is_empty())
                .ok_or_else(|| BackendError::Unusable {
                    backend: "summary".to_string(),
                    reason: "custom summary requires a prompt".to_string(),
                })?
                .to_string(),
        };

        let prompt = format!(
            "{instruction}\n\nTranscript:\n{transcript}{}",
            language_directive(language)
        );

        info!(
            "Summarizing {} transcript(s) ({:?}, language {})",
            transcript_ids.len(),
            summary_type,
            language
        );

        let generation = generate_with_fallback(&self.backends, &prompt).await?;

        Ok(SummaryResult {
            language: language.to_string(),
            summary_type,
            text: generation.text,
            usage: generation.usage,
        })
    }

    /// Answer a free-form question about the given transcripts.
    pub async fn answer(
        &self,
        transcript_ids: &[String],
        question: &str,
        language: &str,
    ) -> Result<QaResult, BackendError> {
        let transcript = self.assemble(transcript_ids).await?;

        let prompt = format!(
            "Answer the question below using only the meeting transcript. \
             If the transcript does not contain the answer, say so.\n\n\
             Transcript:\n{transcript}\n\nQuestion: {question}{}",
            language_directive(language)
        );

        info!(
            "Answering question over {} transcript(s) (language {})",
            transcript_ids.len(),
            language
        );

        let generation = generate_with_fallback(&self.backends, &prompt).await?;

        Ok(QaResult {
            question: question.to_string(),
            answer: generation.text,
            language: language.to_string(),
        })
    }

    async fn assemble(&self, transcript_ids: &[String]) -> Result<String, BackendError> {
        let mut parts = Vec::with_capacity(transcript_ids.len());
        for id in transcript_ids {
            parts.push(self.transcripts.fetch(id).await?);
        }
        Ok(parts.join("\n\n"))
    }
}

/// Fixed prompt for the named summary types; `None` for
/// [`SummaryType::Custom`], which uses the caller prompt.
fn template(summary_type: SummaryType) -> Option<&'static str> {
    match summary_type {
        SummaryType::General => Some(
            "Summarize the following meeting transcript concisely, \
             covering the main topics that were discussed.",
        ),
        SummaryType::Meeting => Some(
            "Write meeting minutes for the following transcript: attendee \
             topics, discussion points, decisions made, and next steps.",
        ),
        SummaryType::KeyPoints => Some(
            "Extract the key points from the following meeting transcript \
             as a short bulleted list.",
        ),
        SummaryType::ActionItems => Some(
            "Extract the action items from the following meeting transcript. \
             For each item include the owner when mentioned.",
        ),
        SummaryType::Custom => None,
    }
}

/// Append an instruction to respond in the target language, by native name
/// where we know it.
fn language_directive(language: &str) -> String {
    let name = match language {
        "ko" => "한국어",
        "en" => "English",
        "ja" => "日本語",
        "zh" => "中文",
        "es" => "Español",
        "fr" => "Français",
        "de" => "Deutsch",
        "pt" => "Português",
        "ru" => "Русский",
        "vi" => "Tiếng Việt",
        "th" => "ภาษาไทย",
        other => other,
    };
    format!("\n\nRespond in {name}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_uses_native_names() {
        assert_eq!(language_directive("ko"), "\n\nRespond in 한국어.");
        assert_eq!(language_directive("en"), "\n\nRespond in English.");
        assert_eq!(language_directive("xx"), "\n\nRespond in xx.");
    }
}
