//! In-memory backend for tests and local development.
//!
//! Both collections live behind one `RwLock`. By default the title check on
//! `create` and `save` runs inside the write lock, which gives the same
//! atomic guarantee as the PostgreSQL unique index.
//! [`MemoryStore::without_title_constraint`] turns that off so the
//! handler-level check-then-act window can be observed.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use notes_core::{NewNote, Note, NoteId, User, UserId};
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::store::{NoteStore, UserStore};

#[derive(Debug, Default)]
struct Collections {
    /// Kept in insertion order so `find_all` is stable.
    notes: Vec<Note>,
    users: HashMap<UserId, User>,
}

/// In-memory note and user store.
///
/// Clones share the same underlying collections.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<Collections>>,
    unique_titles: bool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store that rejects duplicate titles at write time.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Collections::default())),
            unique_titles: true,
        }
    }

    /// Create an empty store with no write-time title constraint.
    pub fn without_title_constraint() -> Self {
        Self {
            unique_titles: false,
            ..Self::new()
        }
    }

    /// Whether writes enforce title uniqueness.
    pub fn enforces_unique_titles(&self) -> bool {
        self.unique_titles
    }
}

fn reject_empty(note_title: &str, note_text: &str) -> StoreResult<()> {
    if note_title.is_empty() {
        return Err(StoreError::InvalidRecord("title is empty".to_string()));
    }
    if note_text.is_empty() {
        return Err(StoreError::InvalidRecord("text is empty".to_string()));
    }
    Ok(())
}

#[async_trait]
impl NoteStore for MemoryStore {
    async fn find_all(&self) -> StoreResult<Vec<Note>> {
        Ok(self.inner.read().await.notes.clone())
    }

    async fn find_by_id(&self, id: NoteId) -> StoreResult<Option<Note>> {
        let guard = self.inner.read().await;
        Ok(guard.notes.iter().find(|n| n.id == id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> StoreResult<Option<Note>> {
        let guard = self.inner.read().await;
        Ok(guard.notes.iter().find(|n| n.title == title).cloned())
    }

    async fn create(&self, note: NewNote) -> StoreResult<Note> {
        reject_empty(&note.title, &note.text)?;

        let mut guard = self.inner.write().await;
        if self.unique_titles && guard.notes.iter().any(|n| n.title == note.title) {
            return Err(StoreError::DuplicateTitle(note.title));
        }

        let now = Utc::now();
        let created = Note {
            id: NoteId::new(),
            title: note.title,
            text: note.text,
            user: note.user,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        guard.notes.push(created.clone());

        tracing::debug!(note_id = %created.id, "Inserted note");
        Ok(created)
    }

    async fn save(&self, note: &Note) -> StoreResult<Note> {
        reject_empty(&note.title, &note.text)?;

        let mut guard = self.inner.write().await;
        if self.unique_titles
            && guard
                .notes
                .iter()
                .any(|n| n.title == note.title && n.id != note.id)
        {
            return Err(StoreError::DuplicateTitle(note.title.clone()));
        }

        let stored = guard
            .notes
            .iter_mut()
            .find(|n| n.id == note.id)
            .ok_or(StoreError::NoteNotFound(note.id))?;

        stored.overwrite(
            note.title.clone(),
            note.text.clone(),
            note.user,
            note.completed,
        );
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete(&self, id: NoteId) -> StoreResult<bool> {
        let mut guard = self.inner.write().await;
        let before = guard.notes.len();
        guard.notes.retain(|n| n.id != id);
        Ok(guard.notes.len() != before)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
        Ok(self.inner.read().await.users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
        let guard = self.inner.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| guard.users.get(id).cloned())
            .collect())
    }

    async fn create(&self, username: &str) -> StoreResult<User> {
        let mut guard = self.inner.write().await;
        if guard.users.values().any(|u| u.username == username) {
            return Err(StoreError::InvalidRecord(format!(
                "username {username} is taken"
            )));
        }

        let user = User {
            id: UserId::new(),
            username: username.to_string(),
        };
        guard.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> StoreResult<bool> {
        Ok(self.inner.write().await.users.remove(&id).is_some())
    }
}
