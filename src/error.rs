use thiserror::Error;

/// The session channel failed to open or closed unexpectedly.
///
/// Never surfaced as fatal: the connection manager absorbs these and
/// reflects them through connection-state events while it reconnects.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("failed to open session channel: {0}")]
    Open(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("session channel closed unexpectedly")]
    Closed,
}

/// An inbound session message could not be parsed.
///
/// Logged and dropped inside the event router; never propagated past it.
#[derive(Debug, Error)]
#[error("unparseable session message: {0}")]
pub struct ProtocolError(#[from] pub serde_json::Error);

/// A generative-text or translation backend call failed or returned
/// unusable content.
///
/// Drives fallback to the next backend in priority order, or to
/// identity/original-text substitution at the chunk/batch granularity.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("{backend}: request failed: {source}")]
    Request {
        backend: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{backend}: HTTP {status}: {body}")]
    Status {
        backend: String,
        status: u16,
        body: String,
    },

    #[error("{backend}: unusable response: {reason}")]
    Unusable { backend: String, reason: String },

    #[error("all backends failed, last error: {last}")]
    Exhausted { last: String },
}

/// Required credentials or configuration are missing.
///
/// Fails fast with an explicit error to the immediate caller; never retried.
#[derive(Debug, Error)]
#[error("missing configuration: {0}")]
pub struct ConfigurationError(pub String);
