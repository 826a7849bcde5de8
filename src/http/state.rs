use crate::pipeline::{BatchTranslator, ReorganizeEngine, SummaryEngine};
use std::sync::Arc;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub reorganizer: Arc<ReorganizeEngine>,
    pub translator: Arc<BatchTranslator>,
    pub summarizer: Arc<SummaryEngine>,
}

impl AppState {
    pub fn new(
        reorganizer: Arc<ReorganizeEngine>,
        translator: Arc<BatchTranslator>,
        summarizer: Arc<SummaryEngine>,
    ) -> Self {
        Self {
            reorganizer,
            translator,
            summarizer,
        }
    }
}
