use crate::backend::TranslationBackend;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Number of texts per translation API call.
pub const TRANSLATION_BATCH_SIZE: usize = 100;

/// Pause between consecutive batches to stay under API rate limits.
const BATCH_PACING: Duration = Duration::from_millis(100);

/// Timing summary for one batch translation run.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationStats {
    pub total: usize,
    pub elapsed_ms: u128,
    pub avg_ms: u128,
}

/// Translates large text sets in fixed-size sequential batches.
///
/// A failed batch keeps its source texts in place, so the output always
/// has the same length and order as the input.
pub struct BatchTranslator {
    backend: Arc<dyn TranslationBackend>,
}

impl BatchTranslator {
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self { backend }
    }

    /// Translate `texts` into `target`.
    ///
    /// When `source` equals `target` the input is returned as-is without
    /// touching the backend.
    pub async fn translate(
        &self,
        texts: &[String],
        source: Option<&str>,
        target: &str,
    ) -> (Vec<String>, TranslationStats) {
        let started = std::time::Instant::now();

        if texts.is_empty() || source == Some(target) {
            return (
                texts.to_vec(),
                TranslationStats {
                    total: texts.len(),
                    elapsed_ms: 0,
                    avg_ms: 0,
                },
            );
        }

        info!(
            "Translating {} texts to {} in {} batch(es)",
            texts.len(),
            target,
            texts.len().div_ceil(TRANSLATION_BATCH_SIZE)
        );

        let mut translated = Vec::with_capacity(texts.len());
        let mut batches = texts.chunks(TRANSLATION_BATCH_SIZE).peekable();

        while let Some(batch) = batches.next() {
            match self.backend.translate_batch(batch, source, target).await {
                Ok(outputs) => {
                    // Positional fill; short responses keep the source text.
                    for (j, original) in batch.iter().enumerate() {
                        translated.push(outputs.get(j).cloned().unwrap_or_else(|| original.clone()));
                    }
                }
                Err(e) => {
                    warn!(
                        "Translation batch of {} failed, keeping source texts: {}",
                        batch.len(),
                        e
                    );
                    translated.extend_from_slice(batch);
                }
            }

            if batches.peek().is_some() {
                tokio::time::sleep(BATCH_PACING).await;
            }
        }

        let elapsed_ms = started.elapsed().as_millis();
        let stats = TranslationStats {
            total: translated.len(),
            elapsed_ms,
            avg_ms: elapsed_ms / translated.len().max(1) as u128,
        };

        info!(
            "Translated {} texts in {}ms ({}ms avg)",
            stats.total, stats.elapsed_ms, stats.avg_ms
        );

        (translated, stats)
    }
}
