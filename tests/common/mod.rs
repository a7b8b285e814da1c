// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use chrono::NaiveDate;
use fittrack::config::Config;
use fittrack::db::MemoryStore;
use fittrack::routes::create_router;
use fittrack::services::{SequentialIds, StorageAdapter, Tracker};
use fittrack::time_utils::FixedClock;
use fittrack::AppState;
use std::sync::Arc;

/// Date every test app treats as "today" (a Wednesday).
#[allow(dead_code)]
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()
}

/// Create a test app backed by the given in-memory store.
#[allow(dead_code)]
pub fn create_test_app_with(store: MemoryStore) -> (axum::Router, Arc<AppState>) {
    let tracker = Tracker::load(
        StorageAdapter::new(Box::new(store)),
        Box::new(FixedClock::new(today())),
        Box::new(SequentialIds::default()),
    );
    let state = Arc::new(AppState::new(Config::test_default(), tracker));
    (create_router(state.clone()), state)
}

/// Create a test app with an empty in-memory store.
/// Returns the router, the shared state and a handle on the store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, MemoryStore) {
    let store = MemoryStore::new();
    let (app, state) = create_test_app_with(store.clone());
    (app, state, store)
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
