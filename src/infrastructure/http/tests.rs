//! Router 集成测试

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

use super::{AppState, HttpServer};
use crate::application::ports::{speech_event_channel, SpeechCapabilityPort};
use crate::application::{DocumentIngestor, PlaybackController};
use crate::domain::playback::VoiceParams;
use crate::infrastructure::adapters::{
    SimulatedSpeechConfig, SimulatedSpeechEngine, UnavailablePdfExtractor,
};
use crate::infrastructure::{EventPublisher, InMemoryDocumentStore, PlaybackWorker};

const BOUNDARY: &str = "telltale-test-boundary";

fn test_router() -> Router {
    test_router_with_limit(1024 * 1024)
}

fn test_router_with_limit(max_upload_size: usize) -> Router {
    let (speech_tx, speech_rx) = speech_event_channel();
    let capability: Arc<dyn SpeechCapabilityPort> = Arc::new(SimulatedSpeechEngine::new(
        SimulatedSpeechConfig {
            words_per_minute: 1,
            ..Default::default()
        },
        speech_tx,
    ));

    let publisher = Arc::new(EventPublisher::new());
    let controller = PlaybackController::new(Some(capability), publisher.clone());
    let (worker, handle) = PlaybackWorker::new(controller, speech_rx);
    tokio::spawn(worker.run());

    let state = AppState::new(
        Arc::new(DocumentIngestor::new(Arc::new(UnavailablePdfExtractor), 5.0)),
        Arc::new(InMemoryDocumentStore::new()),
        Arc::new(handle),
        publisher,
        None,
        VoiceParams::default(),
        max_upload_size,
    );
    HttpServer::build_router(Arc::new(state))
}

async fn send(router: &Router, request: Request<Body>) -> Value {
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get(router: &Router, uri: &str) -> Value {
    send(
        router,
        Request::builder().uri(uri).body(Body::empty()).unwrap(),
    )
    .await
}

async fn post_json(router: &Router, uri: &str, body: Value) -> Value {
    send(
        router,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn multipart_file(file_name: &str, content_type: &str, content: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n",
            file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/document/upload")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn test_ping() {
    let router = test_router();
    let json = get(&router, "/api/ping").await;
    assert_eq!(json["errno"], 0);
    assert_eq!(json["data"]["status"], "ok");
    assert_eq!(json["data"]["document_loaded"], false);
}

#[tokio::test]
async fn test_document_not_found_before_load() {
    let router = test_router();

    let json = get(&router, "/api/document/get").await;
    assert_eq!(json["errno"], 404);

    let json = post_json(&router, "/api/playback/start", json!({})).await;
    assert_eq!(json["errno"], 404);
}

#[tokio::test]
async fn test_load_text_and_read_sentences() {
    let router = test_router();

    let json = post_json(
        &router,
        "/api/document/text",
        json!({"content": "Hello world. How are you?"}),
    )
    .await;
    assert_eq!(json["errno"], 0);
    assert_eq!(json["data"]["kind"], "plain_text");
    assert_eq!(json["data"]["total_sentences"], 2);

    let json = post_json(&router, "/api/document/sentences", json!({"start": 1})).await;
    assert_eq!(json["data"]["total"], 2);
    assert_eq!(
        json["data"]["sentences"],
        json!([{"index": 1, "text": " How are you?", "start_offset": 12, "end_offset": 25}])
    );
}

#[tokio::test]
async fn test_empty_text_rejected() {
    let router = test_router();
    let json = post_json(&router, "/api/document/text", json!({"content": ""})).await;
    assert_eq!(json["errno"], 400);
}

#[tokio::test]
async fn test_playback_lifecycle() {
    let router = test_router();
    post_json(
        &router,
        "/api/document/text",
        json!({"content": "One sentence. Another one."}),
    )
    .await;

    let json = post_json(&router, "/api/playback/start", json!({"rate": 1.5})).await;
    assert_eq!(json["errno"], 0);
    assert_eq!(json["data"]["state"], "speaking");
    assert_eq!(json["data"]["voice_params"]["rate"], 1.5);

    let json = post_json(&router, "/api/playback/pause", json!({})).await;
    assert_eq!(json["data"]["state"], "paused");

    let json = get(&router, "/api/playback/status").await;
    assert_eq!(json["data"]["state"], "paused");

    let json = post_json(&router, "/api/playback/stop", json!({})).await;
    assert_eq!(json["data"]["state"], "idle");

    // Idle 下的 resume 是 no-op
    let json = post_json(&router, "/api/playback/resume", json!({})).await;
    assert_eq!(json["errno"], 0);
    assert_eq!(json["data"]["state"], "idle");
}

#[tokio::test]
async fn test_upload_text_file() {
    let router = test_router();

    let json = send(
        &router,
        multipart_file("notes.txt", "application/octet-stream", b"Plain upload. Works!"),
    )
    .await;

    assert_eq!(json["errno"], 0);
    assert_eq!(json["data"]["total_sentences"], 2);
}

#[tokio::test]
async fn test_failed_upload_keeps_previous_document() {
    let router = test_router();
    post_json(&router, "/api/document/text", json!({"content": "Keep me."})).await;

    let json = send(
        &router,
        multipart_file("broken.pdf", "application/pdf", b"not really a pdf"),
    )
    .await;
    assert_eq!(json["errno"], 400);

    let json = send(&router, multipart_file("image.png", "image/png", b"\x89PNG")).await;
    assert_eq!(json["errno"], 400);

    let json = get(&router, "/api/document/get").await;
    assert_eq!(json["data"]["text"], "Keep me.");
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let router = test_router_with_limit(16);
    let json = post_json(&router, "/api/document/text", json!({"content": "Short."})).await;
    assert_eq!(json["errno"], 0);

    let json = send(
        &router,
        multipart_file("long.txt", "text/plain", b"This file is longer than sixteen bytes."),
    )
    .await;
    assert_eq!(json["errno"], 400);

    let json = post_json(
        &router,
        "/api/document/text",
        json!({"content": "This text is longer than sixteen bytes."}),
    )
    .await;
    assert_eq!(json["errno"], 400);

    let json = get(&router, "/api/document/get").await;
    assert_eq!(json["data"]["text"], "Short.");
}

#[tokio::test]
async fn test_voice_list() {
    let router = test_router();
    let json = get(&router, "/api/voice/list").await;
    assert_eq!(json["errno"], 0);
    assert_eq!(json["data"][0]["id"], "simulated-en");
}
