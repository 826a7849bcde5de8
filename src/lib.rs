pub mod backend;
pub mod bus;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod pipeline;
pub mod session;
pub mod store;

pub use backend::{
    generate_with_fallback, GeminiBackend, Generation, GenerativeBackend, GoogleTranslateBackend,
    TranslationBackend,
};
pub use bus::{EventBus, Subscription};
pub use config::Config;
pub use error::{BackendError, ConfigurationError, ConnectionError, ProtocolError};
pub use http::{create_router, AppState};
pub use model::{
    Participant, ReorganizedSegment, Session, SessionStatus, SubtitleEvent, SummaryResult,
    SummaryType, Translation, UsageMetadata, Utterance,
};
pub use pipeline::{
    BatchTranslator, InMemoryTranscripts, QaResult, ReorganizeEngine, SourceUtterance,
    SummaryEngine, TranscriptSource, TranslationStats, REORGANIZE_CHUNK_SIZE,
    TRANSLATION_BATCH_SIZE,
};
pub use session::{
    EventRouter, OutboundMessage, SessionConfig, SessionEvent, SessionManager, HEARTBEAT_INTERVAL,
    RECONNECT_DELAY,
};
pub use store::{SessionStore, SUBTITLE_HISTORY_CAP};
