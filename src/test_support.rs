use axum::{
    body::Body,
    extract::FromRef,
    http::{header, Method, Request, StatusCode},
};
use tower::ServiceExt;
use uuid::Uuid;

use crate::app::build_app;
use crate::auth::token::SessionKeys;
use crate::state::AppState;

/// Request carrying a fresh session token for a random user.
pub fn authed(
    state: &AppState,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let token = SessionKeys::from_ref(state)
        .issue(Uuid::new_v4())
        .expect("issue session token");
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

/// Runs one request through the full router. Non-JSON bodies come back as `Null`.
pub async fn send(state: &AppState, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let res = build_app(state.clone())
        .oneshot(req)
        .await
        .expect("router is infallible");
    let status = res.status();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}
