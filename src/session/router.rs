use super::messages::{InboundEnvelope, ParticipantPayload};
use super::SessionEvent;
use crate::bus::EventBus;
use crate::error::ProtocolError;
use crate::model::{Participant, SubtitleEvent};
use crate::store::SessionStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes inbound session messages to the state store and event bus.
///
/// Malformed payloads and unknown message types are logged and dropped;
/// nothing escapes [`EventRouter::dispatch`].
pub struct EventRouter {
    store: Arc<SessionStore>,
    bus: EventBus<SessionEvent>,
}

impl EventRouter {
    pub fn new(store: Arc<SessionStore>, bus: EventBus<SessionEvent>) -> Self {
        Self { store, bus }
    }

    /// Dispatch one raw inbound frame.
    pub fn dispatch(&self, raw: &str) {
        let envelope: InboundEnvelope = match serde_json::from_str(raw) {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!("Dropping inbound frame: {}", ProtocolError(e));
                return;
            }
        };

        match envelope.kind.as_str() {
            "subtitle" => match serde_json::from_value::<SubtitleEvent>(envelope.data) {
                Ok(subtitle) => {
                    self.store.push_subtitle(subtitle.clone());
                    self.bus.publish(&SessionEvent::Subtitle(subtitle));
                }
                Err(e) => warn!("Dropping malformed subtitle payload: {}", ProtocolError(e)),
            },

            "participant_joined" => match serde_json::from_value::<ParticipantPayload>(envelope.data)
            {
                Ok(payload) => {
                    let participant = Participant {
                        id: payload.participant_id,
                        preferred_language: payload.preferred_language,
                    };
                    self.store.add_participant(participant.clone());
                    self.bus.publish(&SessionEvent::ParticipantJoined(participant));
                }
                Err(e) => warn!("Dropping malformed participant payload: {}", ProtocolError(e)),
            },

            "participant_left" => match serde_json::from_value::<ParticipantPayload>(envelope.data)
            {
                Ok(payload) => {
                    self.store.remove_participant(&payload.participant_id);
                    self.bus.publish(&SessionEvent::ParticipantLeft {
                        participant_id: payload.participant_id,
                    });
                }
                Err(e) => warn!("Dropping malformed participant payload: {}", ProtocolError(e)),
            },

            "meeting_ended" => {
                info!("Meeting ended");
                self.bus.publish(&SessionEvent::MeetingEnded);
            }

            // Liveness signal only; no state change.
            "pong" => {}

            "language_changed" => {
                info!("Language changed: {}", envelope.data);
            }

            other => {
                debug!("Dropping unknown message type: {}", other);
            }
        }
    }
}
