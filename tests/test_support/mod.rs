// Copyright 2025 The Drasi Authors.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Helpers shared by the integration tests.

#![allow(clippy::unwrap_used)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use serviceapi::{build_router, InMemoryStore, SharedStore};
use std::sync::Arc;
use tower::ServiceExt;

/// Router over a fresh in-memory store, without persistence.
pub fn create_test_router() -> Router {
    let store: SharedStore = Arc::new(InMemoryStore::new());
    build_router(store, Arc::new(false), None)
}

/// Router that rejects every mutation.
pub fn create_read_only_router() -> Router {
    let store: SharedStore = Arc::new(InMemoryStore::new());
    build_router(store, Arc::new(true), None)
}

/// Send a request and parse the JSON answer.
///
/// Bodies are sent without a `Content-Type` header.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    read_response(router, request).await
}

pub async fn read_response(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

pub async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::DELETE, uri, None).await
}

/// Indicator as reported by the scanapi vulnerability scanner.
pub fn scanapi_indicator() -> Value {
    json!({
        "asset_identifier": "pytest.testing.com",
        "asset_type": "website",
        "zone": "pytest",
        "description": "scanapi vulnerability result",
        "event_source_name": "scanapi",
        "likelihood_indicator": "high",
        "details": {"coverage": true, "maximum": 0, "high": 1, "medium": 6, "low": 8}
    })
}

/// Indicator for `identifier` from `event_source_name`.
pub fn indicator(identifier: &str, event_source_name: &str, likelihood: &str) -> Value {
    json!({
        "asset_identifier": identifier,
        "asset_type": "hostname",
        "zone": "dmz",
        "description": format!("{event_source_name} finding"),
        "event_source_name": event_source_name,
        "likelihood_indicator": likelihood,
        "details": {}
    })
}

/// Minimal RRA document for `service`.
pub fn rra(service: &str, classification: &str, last_modified: &str) -> Value {
    let measure =
        |impact: &str, probability: &str| json!({"impact": impact, "probability": probability});
    let attribute = || {
        json!({
            "reputation": measure("high", "low"),
            "finances": measure("medium", ""),
            "productivity": measure("low", "low"),
        })
    };
    json!({
        "lastmodified": last_modified,
        "details": {
            "metadata": {"service": service, "owner": "ops"},
            "risk": {
                "confidentiality": attribute(),
                "integrity": attribute(),
                "availability": attribute(),
            },
            "data": {"default": classification},
        }
    })
}

/// Submit an indicator and return the issued asset id.
pub async fn submit(router: &Router, body: Value) -> u64 {
    let (status, json) = post(router, "/api/v1/indicator", body).await;
    assert_eq!(status, StatusCode::OK, "unexpected response: {json}");
    json["asset_id"].as_u64().unwrap()
}
