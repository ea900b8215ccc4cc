//! Shared helpers for the router integration tests.
//!
//! Requests go through `build_app`, so every test exercises the same
//! middleware stack the binary serves.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use http_body_util::BodyExt;
use notes_core::{NewNote, Note, User};
use notes_server::{AppState, ServerConfig, build_app};
use notes_store::Repository;
use serde_json::Value;
use tower::ServiceExt;

/// A router plus direct access to the stores behind it.
pub struct TestApp {
    pub router: Router,
    pub repo: Repository,
}

impl TestApp {
    /// In-memory stores with default configuration.
    pub fn new() -> Self {
        Self::with(Repository::in_memory(), ServerConfig::default())
    }

    pub fn with(repo: Repository, config: ServerConfig) -> Self {
        let state = AppState::new(repo.clone(), config);
        let router = build_app(state).expect("test config is valid");
        Self { router, repo }
    }

    /// Send a request to `/notes`, returning the status and the parsed body.
    pub async fn notes(&self, method: Method, body: Option<Value>) -> (StatusCode, Value) {
        self.send(method, "/notes", body).await
    }

    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, json)
    }

    pub async fn seed_user(&self, username: &str) -> User {
        self.repo.users().create(username).await.unwrap()
    }

    pub async fn seed_note(&self, title: &str, owner: &User) -> Note {
        self.repo
            .notes()
            .create(NewNote::new(title, format!("{title} body"), owner.id))
            .await
            .unwrap()
    }

    pub async fn all_notes(&self) -> Vec<Note> {
        self.repo.notes().find_all().await.unwrap()
    }
}

/// The `message` field of a response body.
pub fn message(body: &Value) -> &str {
    body["message"].as_str().unwrap_or_default()
}
