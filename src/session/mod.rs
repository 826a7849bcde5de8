//! Live captioning session layer
//!
//! This module keeps one participant's client synchronized with the
//! captioning backend over a persistent WebSocket channel:
//! - Connection lifecycle (connect / reconnect / heartbeat / teardown)
//! - Inbound message routing into the session state store
//! - Outbound audio and language-change messages

mod config;
mod manager;
mod messages;
mod router;

pub use config::{SessionConfig, HEARTBEAT_INTERVAL, RECONNECT_DELAY};
pub use manager::SessionManager;
pub use messages::{InboundEnvelope, OutboundMessage, ParticipantPayload};
pub use router::EventRouter;

use crate::model::{Participant, SubtitleEvent};

/// Observable side effects of the session layer, delivered through the
/// application's [`EventBus`](crate::bus::EventBus).
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// The channel is open.
    Connected,
    /// The channel closed (expectedly or not).
    Disconnected,
    /// A channel-level error. Informational; reconnection is handled
    /// internally.
    Error(String),
    Subtitle(SubtitleEvent),
    ParticipantJoined(Participant),
    ParticipantLeft { participant_id: String },
    MeetingEnded,
}
