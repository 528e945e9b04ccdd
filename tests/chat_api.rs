use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use campus_chat_backend::config::Config;
use campus_chat_backend::error::ChatError;
use campus_chat_backend::handler::{chat, router, AppState};

fn test_config(base_url: String) -> Config {
    Config {
        api_key: Some("test-key".to_string()),
        model: "gemini-1.5-flash".to_string(),
        version_override: None,
        knowledge_path: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/knowledge.json"),
        base_url,
        port: 0,
    }
}

fn state_for(server: &MockServer) -> AppState {
    AppState {
        config: test_config(server.uri()),
        http: reqwest::Client::new(),
    }
}

fn generation_body(text: &str) -> Value {
    json!({ "candidates": [ { "content": { "parts": [ { "text": text } ] } } ] })
}

async fn response_json(error: ChatError) -> (u16, Value) {
    let response = error.into_response();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn replies_to_a_course_question() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generation_body("We offer X, Y, Z.")))
        .expect(1)
        .mount(&server)
        .await;

    let result = chat(
        State(state_for(&server)),
        Json(json!({ "message": "What courses do you offer?" })),
    )
    .await
    .unwrap();

    assert_eq!(result.0.reply, "We offer X, Y, Z.");
}

#[tokio::test]
async fn invalid_messages_are_rejected_without_outbound_calls() {
    let server = MockServer::start().await;

    for body in [
        json!({}),
        json!({ "message": "" }),
        json!({ "message": "   " }),
        json!({ "message": 42 }),
        json!({ "message": null }),
    ] {
        let err = chat(State(state_for(&server)), Json(body))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::InvalidMessage));
    }

    let (status, payload) = response_json(ChatError::InvalidMessage).await;
    assert_eq!(status, 400);
    assert!(payload["error"].as_str().unwrap().contains("message"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_api_key_is_500_without_outbound_calls() {
    let server = MockServer::start().await;
    let mut state = state_for(&server);
    state.config.api_key = None;

    let err = chat(State(state), Json(json!({ "message": "hello" })))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::MissingApiKey));

    let (status, payload) = response_json(err).await;
    assert_eq!(status, 500);
    assert!(payload["error"].as_str().unwrap().contains("GEMINI_API_KEY"));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_knowledge_document_is_500_without_outbound_calls() {
    let server = MockServer::start().await;
    let mut state = state_for(&server);
    state.config.knowledge_path = PathBuf::from("does/not/exist.json");

    let err = chat(State(state), Json(json!({ "message": "hello" })))
        .await
        .unwrap_err();
    assert!(matches!(err, ChatError::Knowledge(_)));

    let (status, payload) = response_json(err).await;
    assert_eq!(status, 500);
    assert_eq!(payload["error"], "Internal server error");

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn upstream_403_becomes_502_with_key_hint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
        .mount(&server)
        .await;

    let err = chat(
        State(state_for(&server)),
        Json(json!({ "message": "hello" })),
    )
    .await
    .unwrap_err();

    let (status, payload) = response_json(err).await;
    assert_eq!(status, 502);
    assert_eq!(payload["status"], 403);
    assert_eq!(payload["model"], "gemini-1.5-flash");
    assert_eq!(payload["apiVersion"], "v1");
    assert!(payload["details"].as_str().unwrap().contains("permission denied"));
    assert!(payload["hint"].as_str().unwrap().contains("key"));
}

#[tokio::test]
async fn exhausted_fallbacks_become_502_with_model_hint() {
    // Nothing mounted: the whole chain 404s.
    let server = MockServer::start().await;

    let err = chat(
        State(state_for(&server)),
        Json(json!({ "message": "hello" })),
    )
    .await
    .unwrap_err();

    let (status, payload) = response_json(err).await;
    assert_eq!(status, 502);
    assert_eq!(payload["status"], 404);
    assert_eq!(payload["model"], "gemini-1.5-flash");
    assert_eq!(payload["apiVersion"], "v1beta");
    assert!(payload["hint"].as_str().unwrap().contains("gemini-1.5-flash"));
}

#[tokio::test]
async fn router_serves_the_full_fallback_scenario() {
    let upstream = MockServer::start().await;

    // Primary, -latest, and version-toggle attempts all 404; the v1 listing
    // offers an exact match and the retry succeeds.
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .up_to_n_times(1)
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-1.5-flash-latest:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "models/gemini-1.5-flash", "supportedGenerationMethods": ["generateContent"] }
            ]
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/models/gemini-1.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(generation_body("We offer X, Y, Z.")))
        .mount(&upstream)
        .await;

    let app = router(state_for(&upstream));
    let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let response = reqwest::Client::new()
        .post(format!("http://{}/chat", addr))
        .json(&json!({ "message": "What courses do you offer?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let payload: Value = response.json().await.unwrap();
    assert_eq!(payload["reply"], "We offer X, Y, Z.");
}
