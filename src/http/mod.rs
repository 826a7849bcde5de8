//! HTTP API fronting the batch pipelines
//!
//! - POST /api/reorganize - Reorganize recognizer fragments into sentences
//! - POST /api/translate/batch - Batch-translate a text list
//! - POST /api/summarize - Summarize stored transcripts
//! - POST /api/qa - Answer a question about stored transcripts
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
