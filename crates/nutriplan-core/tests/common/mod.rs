//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::mpsc;
use wiremock::MockServer;

use nutriplan_core::api::ApiClient;
use nutriplan_core::auth::{AuthFlow, SessionStore, UiEvent};
use nutriplan_core::models::User;

pub fn doctor_value() -> Value {
    json!({
        "id": "doc_1",
        "email": "ana@example.com",
        "name": "Ana Torres",
        "role": "DOCTOR",
        "phone": null,
        "avatar": null,
        "createdAt": "2025-11-02T10:15:30.000Z",
        "updatedAt": "2025-11-02T10:15:30.000Z"
    })
}

pub fn patient_value() -> Value {
    json!({
        "id": "pat_1",
        "email": "luis@example.com",
        "name": "Luis Paredes",
        "role": "PATIENT",
        "phone": null,
        "avatar": null,
        "createdAt": "2025-11-03T09:00:00.000Z",
        "updatedAt": "2025-11-03T09:00:00.000Z"
    })
}

pub fn doctor() -> User {
    serde_json::from_value(doctor_value()).expect("fixture user parses")
}

/// Wrap a payload in the backend's response envelope.
pub fn enveloped(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn auth_response(user: Value, access: &str, refresh: &str) -> Value {
    enveloped(json!({
        "user": user,
        "accessToken": access,
        "refreshToken": refresh
    }))
}

pub fn token_pair(access: &str, refresh: &str) -> Value {
    enveloped(json!({ "accessToken": access, "refreshToken": refresh }))
}

pub fn error_body(message: &str) -> Value {
    json!({ "error": message })
}

/// Fresh in-memory store plus a client against the mock server.
pub fn client_with_store(server: &MockServer) -> (ApiClient, Arc<SessionStore>) {
    let store = Arc::new(SessionStore::in_memory());
    store.restore();
    let api = ApiClient::new(server.uri(), Arc::clone(&store)).expect("build client");
    (api, store)
}

/// Controller wired to a buffered event channel.
pub fn flow_with(api: ApiClient, store: Arc<SessionStore>) -> (AuthFlow, mpsc::Receiver<UiEvent>) {
    let (tx, rx) = mpsc::channel(32);
    (AuthFlow::new(api, store, tx), rx)
}

/// Collect every event the controller has emitted so far.
pub fn drain_events(rx: &mut mpsc::Receiver<UiEvent>) -> Vec<UiEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

/// Authorization header of a recorded request, if any.
pub fn bearer_of(request: &wiremock::Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
