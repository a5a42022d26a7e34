//! `OpenAiClient` against a local stub of the chat completions endpoint.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use sensei_completion::{
    ChatMessage, CompletionError, CompletionService, OpenAiClient, OpenAiSettings,
};

#[derive(Clone, Default)]
struct Seen {
    auth: Arc<Mutex<Option<String>>>,
    body: Arc<Mutex<Option<Value>>>,
}

/// Serves `reply` on `/v1/chat/completions` and returns the base URL.
async fn spawn_stub(reply: fn(&Value) -> Response, seen: Seen) -> String {
    let app = Router::new()
        .route(
            "/v1/chat/completions",
            post(
                move |State(seen): State<Seen>,
                      headers: HeaderMap,
                      Json(body): Json<Value>| async move {
                    let auth = headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from);
                    *seen.auth.lock().expect("lock") = auth;
                    let response = reply(&body);
                    *seen.body.lock().expect("lock") = Some(body);
                    response
                },
            ),
        )
        .with_state(seen);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}/v1")
}

fn client(base_url: String, key: &str) -> OpenAiClient {
    OpenAiClient::new(OpenAiSettings {
        base_url,
        api_key: Some(key.into()),
        temperature: 0.3,
    })
    .expect("client")
}

fn ok_reply(body: &Value) -> Response {
    let last = body["messages"]
        .as_array()
        .and_then(|m| m.last())
        .and_then(|m| m["content"].as_str())
        .unwrap_or_default()
        .to_uppercase();
    Json(json!({
        "id": "cmpl-1",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": last}}]
    }))
    .into_response()
}

#[tokio::test]
async fn sends_bearer_model_and_messages() {
    let seen = Seen::default();
    let base = spawn_stub(ok_reply, seen.clone()).await;
    let reply = client(base, "sk-test")
        .complete(&[ChatMessage::user("hello")], "gpt-4o")
        .await
        .expect("complete");

    assert_eq!(reply, "HELLO");
    assert_eq!(
        seen.auth.lock().expect("lock").as_deref(),
        Some("Bearer sk-test")
    );
    let body = seen.body.lock().expect("lock").clone().expect("body");
    assert_eq!(body["model"], "gpt-4o");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "hello");
    assert!(body["temperature"].is_number());
}

#[tokio::test]
async fn null_content_is_empty_reply() {
    let base = spawn_stub(
        |_| Json(json!({"choices": [{"message": {"content": null}}]})).into_response(),
        Seen::default(),
    )
    .await;
    let reply = client(base, "k")
        .complete(&[ChatMessage::user("x")], "m")
        .await
        .expect("complete");
    assert_eq!(reply, "");
}

#[tokio::test]
async fn unauthorized_never_echoes_body() {
    let base = spawn_stub(
        |_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({"error": {"message": "Incorrect API key provided: sk-leak"}})),
            )
                .into_response()
        },
        Seen::default(),
    )
    .await;
    let err = client(base, "sk-leak")
        .complete(&[ChatMessage::user("x")], "m")
        .await
        .expect_err("401");
    assert_eq!(err, CompletionError::Authentication { status: 401 });
    assert!(!err.to_string().contains("sk-leak"));
}

#[tokio::test]
async fn too_many_requests_reads_retry_after() {
    let base = spawn_stub(
        |_| {
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, "12")],
                "slow down",
            )
                .into_response()
        },
        Seen::default(),
    )
    .await;
    let err = client(base, "k")
        .complete(&[ChatMessage::user("x")], "m")
        .await
        .expect_err("429");
    assert_eq!(err, CompletionError::RateLimited { retry_after: Some(12) });
}

#[tokio::test]
async fn server_error_keeps_upstream_message() {
    let base = spawn_stub(
        |_| {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": {"message": "overloaded"}})),
            )
                .into_response()
        },
        Seen::default(),
    )
    .await;
    let err = client(base, "k")
        .complete(&[ChatMessage::user("x")], "m")
        .await
        .expect_err("503");
    assert_eq!(
        err,
        CompletionError::Api {
            status: 503,
            message: "overloaded".into()
        }
    );
}

#[tokio::test]
async fn empty_choices_is_invalid_response() {
    let base = spawn_stub(
        |_| Json(json!({"choices": []})).into_response(),
        Seen::default(),
    )
    .await;
    let err = client(base, "k")
        .complete(&[ChatMessage::user("x")], "m")
        .await
        .expect_err("empty");
    assert!(matches!(err, CompletionError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = client(format!("http://{addr}/v1"), "sk-secret")
        .complete(&[ChatMessage::user("x")], "m")
        .await
        .expect_err("refused");
    assert!(matches!(err, CompletionError::Transport(_)));
    assert!(!err.to_string().contains("sk-secret"));
}
