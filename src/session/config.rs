use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay before the single reconnect attempt after an unexpected close.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(5000);

/// Interval between heartbeat pings while connected.
pub const HEARTBEAT_INTERVAL: Duration = Duration::from_millis(30_000);

/// Configuration for a captioning session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Captioning backend base URL (e.g. "https://captions.example.com/api/v1/ws")
    pub server_url: String,

    /// Unique session identifier
    pub session_id: String,

    /// Identifier of the local participant
    pub participant_id: String,

    /// Language this participant wants subtitles in
    pub preferred_language: String,

    /// Delay before the single reconnect attempt (default: 5 seconds)
    pub reconnect_delay: Duration,

    /// Heartbeat ping interval (default: 30 seconds)
    pub heartbeat_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            server_url: "ws://localhost:8000/api/v1/ws".to_string(),
            session_id: format!("meeting-{}", uuid::Uuid::new_v4()),
            participant_id: format!("participant-{}", uuid::Uuid::new_v4()),
            preferred_language: "en".to_string(),
            reconnect_delay: RECONNECT_DELAY,
            heartbeat_interval: HEARTBEAT_INTERVAL,
        }
    }
}

impl SessionConfig {
    /// Full channel URL for this session.
    ///
    /// An http(s) base is upgraded to the matching ws(s) scheme, so a
    /// securely served base always yields a secure channel.
    pub fn channel_url(&self) -> String {
        let base = if let Some(rest) = self.server_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.server_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            self.server_url.clone()
        };

        format!(
            "{}/meeting/{}?participant_id={}&preferred_language={}",
            base.trim_end_matches('/'),
            self.session_id,
            self.participant_id,
            self.preferred_language
        )
    }
}
