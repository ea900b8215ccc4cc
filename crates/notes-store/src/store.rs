//! Collaborator traits for the two document collections.
//!
//! Handlers only ever talk to these traits, so any backend that provides
//! find-all, find-by-id, find-by-filter, create, save, and delete can stand
//! behind the notes API.

use async_trait::async_trait;
use notes_core::{NewNote, Note, NoteId, User, UserId};

use crate::error::StoreResult;

/// The collection of notes.
#[async_trait]
pub trait NoteStore: Send + Sync {
    /// Every note, oldest first.
    async fn find_all(&self) -> StoreResult<Vec<Note>>;

    /// Look up a note by id.
    async fn find_by_id(&self, id: NoteId) -> StoreResult<Option<Note>>;

    /// Look up the note holding `title`, if any.
    async fn find_by_title(&self, title: &str) -> StoreResult<Option<Note>>;

    /// Insert a new note. `completed` starts out false.
    ///
    /// Backends with a title constraint return [`StoreError::DuplicateTitle`]
    /// when the title is already taken at write time.
    ///
    /// [`StoreError::DuplicateTitle`]: crate::StoreError::DuplicateTitle
    async fn create(&self, note: NewNote) -> StoreResult<Note>;

    /// Persist every editable field of an existing note.
    async fn save(&self, note: &Note) -> StoreResult<Note>;

    /// Remove a note. Returns whether anything was deleted.
    async fn delete(&self, id: NoteId) -> StoreResult<bool>;
}

/// The collection of users.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>>;

    /// Resolve many users in a single round-trip. Unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>>;

    async fn create(&self, username: &str) -> StoreResult<User>;

    /// Remove a user. Returns whether anything was deleted.
    async fn delete(&self, id: UserId) -> StoreResult<bool>;
}
