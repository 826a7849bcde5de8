use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Connection lifecycle of a live captioning session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Connecting,
    Connected,
    Reconnecting,
    Disconnected,
}

/// One live captioning connection between a participant and the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub status: SessionStatus,
    pub participant_id: String,
    pub preferred_language: String,
}

/// Roster entry for one session participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,
    pub preferred_language: Option<String>,
}

/// A translated caption produced by the live channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleEvent {
    pub speaker_name: String,
    pub original_language: String,
    pub original_text: String,
    pub translated_text: String,
    pub target_language: String,
    pub timestamp: DateTime<Utc>,
    pub is_final: bool,
}

/// One unit of recognized speech.
///
/// Immutable once created, except for appended translations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utterance {
    /// Stable recognizer-assigned identifier.
    pub id: String,
    pub participant_id: Option<String>,
    pub original_language: String,
    pub original_text: String,
    pub audio_url: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub sequence_number: Option<u32>,
    pub translations: Vec<Translation>,
}

/// A translation of one utterance into one target language.
///
/// At most one exists per (utterance, target language) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Translation {
    pub utterance_id: String,
    pub target_language: String,
    pub translated_text: String,
    pub translation_engine: String,
    pub confidence: Option<f32>,
}

/// A complete sentence assembled from one or more source utterances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorganizedSegment {
    /// Source utterance ids this sentence was merged from. Never empty.
    pub merged_from: Vec<u64>,
    pub text: String,
}

/// Named prompt template for summary generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryType {
    General,
    Meeting,
    KeyPoints,
    ActionItems,
    /// Caller supplies the prompt.
    Custom,
}

/// Token usage reported by a generative backend, when available.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

/// A generated summary (or Q&A answer) over a transcript.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResult {
    pub language: String,
    pub summary_type: SummaryType,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageMetadata>,
}
