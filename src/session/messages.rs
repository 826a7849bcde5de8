use serde::{Deserialize, Serialize};

/// Messages the client sends over the session channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Heartbeat; the server answers with `pong`.
    Ping,
    /// One opaque audio chunk, base64-encoded.
    Audio { data: String },
    /// Switch this participant's subtitle language.
    LanguageChange { language: String },
}

/// Discriminated envelope for inbound session messages.
///
/// `data` stays untyped here; the event router deserializes it per
/// message type so one malformed payload never poisons the stream.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundEnvelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Payload of `participant_joined` / `participant_left` messages.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantPayload {
    pub participant_id: String,
    #[serde(default)]
    pub preferred_language: Option<String>,
}
