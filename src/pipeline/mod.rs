//! Batch text-processing pipelines
//!
//! Turns fragmented recognizer output into complete sentences, translates
//! large utterance sets across language pairs, and generates summaries or
//! answers over accumulated transcripts. All three pipelines share the
//! same discipline: fixed-size chunking, sequential processing, and
//! partial-failure tolerance via ordered backend fallback.

pub mod reorganize;
pub mod summary;
pub mod translate;

pub use reorganize::{ReorganizeEngine, SourceUtterance, REORGANIZE_CHUNK_SIZE};
pub use summary::{InMemoryTranscripts, QaResult, SummaryEngine, TranscriptSource};
pub use translate::{BatchTranslator, TranslationStats, TRANSLATION_BATCH_SIZE};
