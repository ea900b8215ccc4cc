//! Two creates with the same title racing through the check-then-insert
//! window.
//!
//! `GatedNotes` holds every `find_by_title` caller at a barrier until both
//! requests have passed the duplicate check, which forces the interleaving
//! deterministically.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use common::{TestApp, message};
use notes_core::{NewNote, Note, NoteId};
use notes_server::ServerConfig;
use notes_store::{MemoryStore, NoteStore, Repository, StoreResult};
use serde_json::{Value, json};
use tokio::sync::Barrier;

struct GatedNotes {
    inner: MemoryStore,
    gate: Barrier,
}

#[async_trait]
impl NoteStore for GatedNotes {
    async fn find_all(&self) -> StoreResult<Vec<Note>> {
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: NoteId) -> StoreResult<Option<Note>> {
        NoteStore::find_by_id(&self.inner, id).await
    }

    async fn find_by_title(&self, title: &str) -> StoreResult<Option<Note>> {
        let found = self.inner.find_by_title(title).await?;
        self.gate.wait().await;
        Ok(found)
    }

    async fn create(&self, note: NewNote) -> StoreResult<Note> {
        NoteStore::create(&self.inner, note).await
    }

    async fn save(&self, note: &Note) -> StoreResult<Note> {
        self.inner.save(note).await
    }

    async fn delete(&self, id: NoteId) -> StoreResult<bool> {
        NoteStore::delete(&self.inner, id).await
    }
}

fn gated_app(memory: MemoryStore) -> TestApp {
    let notes = GatedNotes {
        inner: memory.clone(),
        gate: Barrier::new(2),
    };
    let repo = Repository::new(Arc::new(notes), Arc::new(memory));
    TestApp::with(repo, ServerConfig::default())
}

/// Fire two identical-title creates at once and return both outcomes.
async fn race_two_creates(app: &TestApp) -> [(StatusCode, Value); 2] {
    let alice = app.seed_user("alice").await;
    let bob = app.seed_user("bob").await;

    let first = json!({ "title": "Groceries", "text": "milk", "user": alice.id.to_string() });
    let second = json!({ "title": "Groceries", "text": "eggs", "user": bob.id.to_string() });

    let (a, b) = tokio::join!(
        app.notes(Method::POST, Some(first)),
        app.notes(Method::POST, Some(second)),
    );
    [a, b]
}

#[tokio::test]
async fn handler_check_alone_lets_both_creates_through() {
    let app = gated_app(MemoryStore::without_title_constraint());

    let outcomes = race_two_creates(&app).await;

    for (status, body) in &outcomes {
        assert_eq!(*status, StatusCode::CREATED);
        assert_eq!(message(body), "New note has been added.");
    }
    let notes = app.all_notes().await;
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.title == "Groceries"));
}

#[tokio::test]
async fn store_constraint_admits_exactly_one_create() {
    let app = gated_app(MemoryStore::new());

    let outcomes = race_two_creates(&app).await;

    let mut statuses: Vec<_> = outcomes.iter().map(|(status, _)| *status).collect();
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::CONFLICT]);

    let (_, rejected) = outcomes
        .iter()
        .find(|(status, _)| *status == StatusCode::CONFLICT)
        .unwrap();
    assert_eq!(message(rejected), "Duplicate note title");

    assert_eq!(app.all_notes().await.len(), 1);
}
