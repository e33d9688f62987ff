//! Shared helpers for integration tests.

pub mod app_builder;

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
};
use serde_json::Value;
use tower::ServiceExt;

use self::app_builder::TestApp;

/// Send a JSON POST with the given caller principal and parse the response.
pub async fn post_json(
    app: &TestApp,
    caller: &str,
    path: &str,
    body: &Value,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(CONTENT_TYPE, "application/json");
    if !caller.is_empty() {
        builder = builder.header("X-Caller-Principal", caller);
    }
    let request = builder
        .body(Body::from(body.to_string()))
        .expect("request");

    send(app, request).await
}

/// Send a GET and parse the response.
pub async fn get_json(app: &TestApp, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(path)
        .body(Body::empty())
        .expect("request");

    send(app, request).await
}

async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app
        .router
        .clone()
        .oneshot(request)
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        // Non-JSON bodies (e.g. the Prometheus exposition format) come
        // back as a plain string value.
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, json)
}

/// Extract the machine-readable error code from a problem body.
pub fn error_code(body: &Value) -> &str {
    body.get("extensions")
        .and_then(|e| e.get("code"))
        .and_then(Value::as_str)
        .unwrap_or_default()
}

/// Seat a member through the admin endpoint, asserting success.
pub async fn seat_member(app: &TestApp, principal: &str, role: &str, district: u32) {
    let admin = app.admin.clone();
    let (status, body) = post_json(
        app,
        &admin,
        "/api/v1/members",
        &serde_json::json!({
            "principal": principal,
            "first_name": principal.to_uppercase(),
            "last_name": "Member",
            "role": role,
            "state": "VT",
            "district": district,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "seat {principal} failed: {body}");
}
