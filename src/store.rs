use crate::model::{Participant, Session, SubtitleEvent, SummaryResult, Translation, Utterance};
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Maximum number of subtitle events retained in the live history.
pub const SUBTITLE_HISTORY_CAP: usize = 50;

#[derive(Default)]
struct StoreState {
    session: Option<Session>,
    participants: Vec<Participant>,
    subtitles: VecDeque<SubtitleEvent>,
    utterances: Vec<Utterance>,
    summaries: Vec<SummaryResult>,
    connected: bool,
    recording: bool,
}

/// Process-wide reactive state for one captioning session.
///
/// The only owner of mutable session collections. Mutation happens
/// exclusively through the named actions below; all of them are
/// synchronous and total. Reads return snapshots. A single lock
/// serializes writers, so the store is safe to share across tasks.
pub struct SessionStore {
    state: Mutex<StoreState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
        }
    }

    // A poisoned lock still yields the data, keeping every action total.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------

    /// Replace the current session.
    pub fn set_session(&self, session: Option<Session>) {
        self.lock().session = session;
    }

    /// Replace the whole participant roster.
    pub fn set_participants(&self, participants: Vec<Participant>) {
        self.lock().participants = participants;
    }

    /// Add a participant, replacing any existing entry with the same id.
    pub fn add_participant(&self, participant: Participant) {
        let mut state = self.lock();
        state.participants.retain(|p| p.id != participant.id);
        state.participants.push(participant);
    }

    /// Remove a participant. Removing an absent id is a no-op.
    pub fn remove_participant(&self, participant_id: &str) {
        self.lock().participants.retain(|p| p.id != participant_id);
    }

    /// Append a subtitle, evicting the oldest entry once the history
    /// holds [`SUBTITLE_HISTORY_CAP`] items.
    pub fn push_subtitle(&self, subtitle: SubtitleEvent) {
        let mut state = self.lock();
        while state.subtitles.len() >= SUBTITLE_HISTORY_CAP {
            state.subtitles.pop_front();
        }
        state.subtitles.push_back(subtitle);
    }

    /// Clear the subtitle history.
    pub fn clear_subtitles(&self) {
        self.lock().subtitles.clear();
    }

    /// Replace the accumulated utterances.
    pub fn set_utterances(&self, utterances: Vec<Utterance>) {
        self.lock().utterances = utterances;
    }

    /// Append one utterance.
    pub fn add_utterance(&self, utterance: Utterance) {
        self.lock().utterances.push(utterance);
    }

    /// Append a translation to its utterance, replacing any existing
    /// translation for the same target language. Unknown utterance ids
    /// are ignored.
    pub fn add_translation(&self, translation: Translation) {
        let mut state = self.lock();
        if let Some(utterance) = state
            .utterances
            .iter_mut()
            .find(|u| u.id == translation.utterance_id)
        {
            utterance
                .translations
                .retain(|t| t.target_language != translation.target_language);
            utterance.translations.push(translation);
        }
    }

    /// Replace the stored summaries.
    pub fn set_summaries(&self, summaries: Vec<SummaryResult>) {
        self.lock().summaries = summaries;
    }

    pub fn set_connected(&self, connected: bool) {
        self.lock().connected = connected;
    }

    pub fn set_recording(&self, recording: bool) {
        self.lock().recording = recording;
    }

    /// Reset everything to the initial empty state.
    pub fn reset(&self) {
        *self.lock() = StoreState::default();
    }

    // ------------------------------------------------------------------
    // Reads (snapshots)
    // ------------------------------------------------------------------

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.lock().participants.clone()
    }

    pub fn subtitles(&self) -> Vec<SubtitleEvent> {
        self.lock().subtitles.iter().cloned().collect()
    }

    pub fn utterances(&self) -> Vec<Utterance> {
        self.lock().utterances.clone()
    }

    pub fn summaries(&self) -> Vec<SummaryResult> {
        self.lock().summaries.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.lock().connected
    }

    pub fn is_recording(&self) -> bool {
        self.lock().recording
    }
}
