use crate::backend::{generate_with_fallback, GenerativeBackend};
use crate::model::ReorganizedSegment;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Number of utterances sent to the backend per reorganization call.
pub const REORGANIZE_CHUNK_SIZE: usize = 30;

/// One fragmented recognizer utterance: recognizer-assigned id plus raw text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceUtterance {
    pub id: u64,
    pub text: String,
}

/// Converts fragmented spoken-style utterances into complete sentences.
///
/// Input is processed in fixed-size chunks, sequentially, so ids stay
/// monotonically traceable across chunk boundaries and memory stays
/// bounded. Failures degrade per chunk to an identity mapping; the
/// caller always gets segments back.
pub struct ReorganizeEngine {
    backends: Vec<Arc<dyn GenerativeBackend>>,
}

impl ReorganizeEngine {
    /// `backends` is tried in priority order for every chunk.
    pub fn new(backends: Vec<Arc<dyn GenerativeBackend>>) -> Self {
        Self { backends }
    }

    /// Reorganize `utterances` into complete sentences in their source
    /// language (or `target_language` when given).
    ///
    /// Never fails: chunks for which every backend or every parse
    /// attempt fails map each input pair to its own segment.
    pub async fn reorganize(
        &self,
        utterances: &[SourceUtterance],
        target_language: Option<&str>,
    ) -> Vec<ReorganizedSegment> {
        if utterances.is_empty() {
            return Vec::new();
        }

        info!(
            "Reorganizing {} utterances in {} chunk(s)",
            utterances.len(),
            utterances.len().div_ceil(REORGANIZE_CHUNK_SIZE)
        );

        let mut segments = Vec::new();
        for chunk in utterances.chunks(REORGANIZE_CHUNK_SIZE) {
            segments.extend(self.reorganize_chunk(chunk, target_language).await);
        }
        segments
    }

    async fn reorganize_chunk(
        &self,
        chunk: &[SourceUtterance],
        target_language: Option<&str>,
    ) -> Vec<ReorganizedSegment> {
        let prompt = build_prompt(chunk, target_language);

        match generate_with_fallback(&self.backends, &prompt).await {
            Ok(generation) => match parse_segments(&generation.text) {
                Some(segments) if !segments.is_empty() => segments,
                _ => {
                    warn!("Unparseable reorganization response, falling back to identity mapping");
                    identity_segments(chunk)
                }
            },
            Err(e) => {
                warn!("Reorganization chunk failed, using identity mapping: {}", e);
                identity_segments(chunk)
            }
        }
    }
}

/// Each input pair becomes its own segment, text unchanged.
fn identity_segments(chunk: &[SourceUtterance]) -> Vec<ReorganizedSegment> {
    chunk
        .iter()
        .map(|u| ReorganizedSegment {
            merged_from: vec![u.id],
            text: u.text.clone(),
        })
        .collect()
}

fn build_prompt(chunk: &[SourceUtterance], target_language: Option<&str>) -> String {
    let listing: String = chunk
        .iter()
        .map(|u| format!("[{}] {}\n", u.id, u.text))
        .collect();

    let language = target_language.unwrap_or("the source language");

    format!(
        "You are an expert at reorganizing live-interpretation transcripts.\n\
         \n\
         Below are sentences produced by real-time speech recognition. Each line starts with [id].\n\
         Reorganize incomplete or run-on fragments into natural, complete sentences.\n\
         \n\
         Rules:\n\
         1. Fragments whose meaning continues across lines may be merged into one sentence.\n\
         2. Produce grammatically complete sentences in {language}.\n\
         3. Preserve the original meaning while smoothing the wording.\n\
         4. Respond with a JSON array only.\n\
         5. Order the output by the smallest source id in merged_from.\n\
         \n\
         Input:\n\
         {listing}\n\
         Response format (JSON array only):\n\
         [\n\
           {{\"merged_from\": [1, 2], \"text\": \"merged sentence\"}},\n\
           {{\"merged_from\": [3], \"text\": \"standalone sentence\"}}\n\
         ]"
    )
}

/// Parse a backend response into segments.
///
/// Ladder: direct JSON array, then a fenced code block, then a bare
/// bracketed array. Segments with an empty `merged_from` violate the
/// data model and make the whole response unusable.
fn parse_segments(response: &str) -> Option<Vec<ReorganizedSegment>> {
    let candidates = [
        Some(response.trim()),
        extract_fenced_block(response),
        extract_bracketed_array(response),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Ok(segments) = serde_json::from_str::<Vec<ReorganizedSegment>>(candidate.trim()) {
            if segments.iter().all(|s| !s.merged_from.is_empty()) {
                return Some(segments);
            }
            return None;
        }
    }
    None
}

fn extract_fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")? + 3;
    let rest = &text[start..];
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let end = rest.find("```")?;
    Some(&rest[..end])
}

fn extract_bracketed_array(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}
