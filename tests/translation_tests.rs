// Tests for the batch translation engine
//
// The core invariant: output length and order always match the input,
// no matter which batches fail.

use async_trait::async_trait;
use meeting_captions::pipeline::{BatchTranslator, TRANSLATION_BATCH_SIZE};
use meeting_captions::{BackendError, TranslationBackend};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Translation backend that uppercases successful batches and fails the
/// batch indices listed in `fail_batches`.
struct FlakyTranslator {
    calls: AtomicUsize,
    fail_batches: Vec<usize>,
}

impl FlakyTranslator {
    fn new(fail_batches: Vec<usize>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_batches,
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for FlakyTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        _source: Option<&str>,
        _target: &str,
    ) -> Result<Vec<String>, BackendError> {
        let batch_index = self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_batches.contains(&batch_index) {
            return Err(BackendError::Status {
                backend: "flaky".to_string(),
                status: 503,
                body: "scripted failure".to_string(),
            });
        }
        Ok(texts.iter().map(|t| t.to_uppercase()).collect())
    }

    fn name(&self) -> &str {
        "flaky"
    }
}

fn texts(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("text-{}", i)).collect()
}

#[tokio::test(start_paused = true)]
async fn test_length_and_order_preserved_across_batch_failures() {
    // 250 texts = 3 batches; the middle one fails.
    let backend = FlakyTranslator::new(vec![1]);
    let translator = BatchTranslator::new(backend.clone());

    let input = texts(2 * TRANSLATION_BATCH_SIZE + 50);
    let (output, stats) = translator.translate(&input, Some("en"), "ko").await;

    assert_eq!(backend.calls(), 3);
    assert_eq!(output.len(), input.len());
    assert_eq!(stats.total, input.len());

    for (i, translated) in output.iter().enumerate() {
        let batch = i / TRANSLATION_BATCH_SIZE;
        if batch == 1 {
            assert_eq!(translated, &input[i], "failed batch keeps source text");
        } else {
            assert_eq!(translated, &input[i].to_uppercase());
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_all_batches_failing_returns_input() {
    let backend = FlakyTranslator::new(vec![0, 1, 2]);
    let translator = BatchTranslator::new(backend.clone());

    let input = texts(2 * TRANSLATION_BATCH_SIZE + 1);
    let (output, _) = translator.translate(&input, Some("en"), "ko").await;

    assert_eq!(backend.calls(), 3);
    assert_eq!(output, input);
}

#[tokio::test]
async fn test_identity_short_circuit_makes_zero_calls() {
    let backend = FlakyTranslator::new(vec![]);
    let translator = BatchTranslator::new(backend.clone());

    let input = texts(120);
    let (output, stats) = translator.translate(&input, Some("ko"), "ko").await;

    assert_eq!(backend.calls(), 0);
    assert_eq!(output, input);
    assert_eq!(stats.total, input.len());
    assert_eq!(stats.elapsed_ms, 0);
}

#[tokio::test]
async fn test_empty_input_makes_zero_calls() {
    let backend = FlakyTranslator::new(vec![]);
    let translator = BatchTranslator::new(backend.clone());

    let (output, stats) = translator.translate(&[], None, "ko").await;

    assert_eq!(backend.calls(), 0);
    assert!(output.is_empty());
    assert_eq!(stats.total, 0);
}

#[tokio::test(start_paused = true)]
async fn test_exact_batch_boundary_is_one_call() {
    let backend = FlakyTranslator::new(vec![]);
    let translator = BatchTranslator::new(backend.clone());

    let input = texts(TRANSLATION_BATCH_SIZE);
    let (output, _) = translator.translate(&input, None, "ko").await;

    assert_eq!(backend.calls(), 1);
    assert_eq!(output.len(), TRANSLATION_BATCH_SIZE);
}

#[tokio::test(start_paused = true)]
async fn test_short_backend_response_keeps_source_for_missing_entries() {
    struct Truncating;

    #[async_trait]
    impl TranslationBackend for Truncating {
        async fn translate_batch(
            &self,
            texts: &[String],
            _source: Option<&str>,
            _target: &str,
        ) -> Result<Vec<String>, BackendError> {
            // Drops the last entry of every batch.
            Ok(texts[..texts.len() - 1]
                .iter()
                .map(|t| t.to_uppercase())
                .collect())
        }

        fn name(&self) -> &str {
            "truncating"
        }
    }

    let translator = BatchTranslator::new(Arc::new(Truncating));

    let input = texts(3);
    let (output, _) = translator.translate(&input, None, "ko").await;

    assert_eq!(output.len(), 3);
    assert_eq!(output[0], "TEXT-0");
    assert_eq!(output[2], "text-2", "missing entry keeps source text");
}
