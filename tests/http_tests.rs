// Tests for the HTTP batch API
//
// Drives the router directly with tower's oneshot, backed by scripted
// in-process backends.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use meeting_captions::pipeline::{
    BatchTranslator, InMemoryTranscripts, ReorganizeEngine, SummaryEngine,
};
use meeting_captions::{
    create_router, AppState, BackendError, Generation, GenerativeBackend, TranslationBackend,
};
use std::collections::HashMap;
use std::sync::Arc;
use tower::ServiceExt;

struct ScriptedGenerative {
    response: Option<String>,
}

#[async_trait]
impl GenerativeBackend for ScriptedGenerative {
    async fn generate(&self, _prompt: &str) -> Result<Generation, BackendError> {
        match &self.response {
            Some(text) => Ok(Generation {
                text: text.clone(),
                usage: None,
            }),
            None => Err(BackendError::Unusable {
                backend: "scripted".to_string(),
                reason: "scripted failure".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

struct UppercaseTranslator;

#[async_trait]
impl TranslationBackend for UppercaseTranslator {
    async fn translate_batch(
        &self,
        texts: &[String],
        _source: Option<&str>,
        _target: &str,
    ) -> Result<Vec<String>, BackendError> {
        Ok(texts.iter().map(|t| t.to_uppercase()).collect())
    }

    fn name(&self) -> &str {
        "uppercase"
    }
}

fn app(generative_response: Option<&str>) -> axum::Router {
    let generative: Vec<Arc<dyn GenerativeBackend>> = vec![Arc::new(ScriptedGenerative {
        response: generative_response.map(|s| s.to_string()),
    })];

    let mut transcripts = HashMap::new();
    transcripts.insert("t1".to_string(), "Alice: hello.".to_string());

    let state = AppState::new(
        Arc::new(ReorganizeEngine::new(generative.clone())),
        Arc::new(BatchTranslator::new(Arc::new(UppercaseTranslator))),
        Arc::new(SummaryEngine::new(
            generative,
            Arc::new(InMemoryTranscripts::new(transcripts)),
        )),
    );
    create_router(state)
}

async fn post_json(app: axum::Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
}

#[tokio::test]
async fn test_health_check() {
    let response = app(None)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reorganize_returns_segments() {
    let (status, body) = post_json(
        app(Some(r#"[{"merged_from": [1, 2], "text": "Hello there."}]"#)),
        "/api/reorganize",
        r#"{"utterances": [{"id": 1, "text": "hello"}, {"id": 2, "text": "there"}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["processedCount"], 2);
    assert_eq!(body["data"][0]["merged_from"][0], 1);
    assert_eq!(body["data"][0]["text"], "Hello there.");
}

#[tokio::test]
async fn test_reorganize_degrades_to_identity_on_backend_failure() {
    let (status, body) = post_json(
        app(None),
        "/api/reorganize",
        r#"{"utterances": [{"id": 7, "text": "orphan"}]}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK, "backend failure never surfaces as 500");
    assert_eq!(body["success"], true);
    assert_eq!(body["data"][0]["merged_from"][0], 7);
    assert_eq!(body["data"][0]["text"], "orphan");
}

#[tokio::test]
async fn test_reorganize_requires_utterances() {
    let (status, body) = post_json(app(Some("unused")), "/api/reorganize", r#"{"utterances": []}"#)
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_translate_batch() {
    let (status, body) = post_json(
        app(None),
        "/api/translate/batch",
        r#"{"texts": ["hello", "world"], "sourceLang": "en", "targetLang": "ko"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["translatedTexts"][0], "HELLO");
    assert_eq!(body["translatedTexts"][1], "WORLD");
    assert_eq!(body["stats"]["total"], 2);
}

#[tokio::test]
async fn test_translate_batch_requires_texts() {
    let (status, body) = post_json(
        app(None),
        "/api/translate/batch",
        r#"{"texts": [], "targetLang": "ko"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_translate_batch_requires_target() {
    let (status, body) = post_json(
        app(None),
        "/api/translate/batch",
        r#"{"texts": ["hello"], "targetLang": ""}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_summarize_success() {
    let (status, body) = post_json(
        app(Some("A short summary.")),
        "/api/summarize",
        r#"{"transcriptIds": ["t1"], "summaryType": "key_points", "language": "en"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["summary"], "A short summary.");
    assert_eq!(body["summaryType"], "key_points");
    assert_eq!(body["language"], "en");
}

#[tokio::test]
async fn test_summarize_backend_exhaustion_is_500() {
    let (status, body) = post_json(
        app(None),
        "/api/summarize",
        r#"{"transcriptIds": ["t1"], "summaryType": "general"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_summarize_custom_requires_prompt() {
    let (status, _body) = post_json(
        app(Some("unused")),
        "/api/summarize",
        r#"{"transcriptIds": ["t1"], "summaryType": "custom"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_qa_success() {
    let (status, body) = post_json(
        app(Some("Alice greeted everyone.")),
        "/api/qa",
        r#"{"transcriptIds": ["t1"], "question": "Who spoke first?"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["question"], "Who spoke first?");
    assert_eq!(body["answer"], "Alice greeted everyone.");
}

#[tokio::test]
async fn test_qa_requires_question() {
    let (status, _body) = post_json(
        app(Some("unused")),
        "/api/qa",
        r#"{"transcriptIds": ["t1"], "question": "  "}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
