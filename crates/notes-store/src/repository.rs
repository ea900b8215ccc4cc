//! Repository bundling the note and user stores.
//!
//! Application code holds a single `Repository` and reaches each collection
//! through it. Listing notes with their owners' names goes through
//! [`Repository::attach_usernames`], which resolves all owners in one
//! batched lookup instead of one query per note.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;

use notes_core::{Note, NoteWithUsername, UserId};

use crate::error::StoreResult;
use crate::memory::MemoryStore;
use crate::postgres::{PgStore, StoreConfig};
use crate::store::{NoteStore, UserStore};

/// Injected handles to the note and user collections.
#[derive(Clone)]
pub struct Repository {
    notes: Arc<dyn NoteStore>,
    users: Arc<dyn UserStore>,
    backend: &'static str,
}

impl Repository {
    /// Build a repository from arbitrary store implementations.
    pub fn new(notes: Arc<dyn NoteStore>, users: Arc<dyn UserStore>) -> Self {
        Self {
            notes,
            users,
            backend: "custom",
        }
    }

    /// A fresh in-memory repository with the title constraint enabled.
    pub fn in_memory() -> Self {
        Self::from_memory(MemoryStore::new())
    }

    /// Serve both collections from an existing in-memory store.
    pub fn from_memory(store: MemoryStore) -> Self {
        let shared = Arc::new(store);
        Self {
            notes: shared.clone(),
            users: shared,
            backend: "memory",
        }
    }

    /// Serve both collections from a PostgreSQL store.
    pub fn from_postgres(store: PgStore) -> Self {
        let shared = Arc::new(store);
        Self {
            notes: shared.clone(),
            users: shared,
            backend: "postgres",
        }
    }

    /// Connect to PostgreSQL and build a repository on top of it.
    pub async fn connect(config: StoreConfig) -> StoreResult<Self> {
        Ok(Self::from_postgres(PgStore::connect(config).await?))
    }

    /// The note collection.
    pub fn notes(&self) -> &dyn NoteStore {
        self.notes.as_ref()
    }

    /// The user collection.
    pub fn users(&self) -> &dyn UserStore {
        self.users.as_ref()
    }

    /// Short name of the backend, for logs and health output.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    /// Pair every note with its owner's username.
    ///
    /// Owners are resolved with a single `find_by_ids` call over the distinct
    /// owner ids. Notes whose owner no longer exists get `username: None`.
    /// Input order is preserved.
    pub async fn attach_usernames(&self, notes: Vec<Note>) -> StoreResult<Vec<NoteWithUsername>> {
        let owner_ids: Vec<UserId> = notes
            .iter()
            .map(|n| n.user)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let usernames: HashMap<UserId, String> = self
            .users
            .find_by_ids(&owner_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.username))
            .collect();

        let missing = owner_ids
            .iter()
            .filter(|id| !usernames.contains_key(id))
            .count();
        if missing > 0 {
            tracing::warn!(missing, "Notes reference users that no longer exist");
        }

        Ok(notes
            .into_iter()
            .map(|note| {
                let username = usernames.get(&note.user).cloned();
                NoteWithUsername { note, username }
            })
            .collect())
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use notes_core::{NewNote, User};

    use super::*;

    /// Counts lookups so tests can assert on round-trips.
    struct CountingUsers {
        inner: MemoryStore,
        batched_calls: AtomicUsize,
        single_calls: AtomicUsize,
    }

    #[async_trait]
    impl UserStore for CountingUsers {
        async fn find_by_id(&self, id: UserId) -> StoreResult<Option<User>> {
            self.single_calls.fetch_add(1, Ordering::SeqCst);
            UserStore::find_by_id(&self.inner, id).await
        }

        async fn find_by_ids(&self, ids: &[UserId]) -> StoreResult<Vec<User>> {
            self.batched_calls.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_ids(ids).await
        }

        async fn create(&self, username: &str) -> StoreResult<User> {
            UserStore::create(&self.inner, username).await
        }

        async fn delete(&self, id: UserId) -> StoreResult<bool> {
            UserStore::delete(&self.inner, id).await
        }
    }

    #[tokio::test]
    async fn test_attach_usernames_uses_one_batched_lookup() {
        let store = MemoryStore::new();
        let users = Arc::new(CountingUsers {
            inner: store.clone(),
            batched_calls: AtomicUsize::new(0),
            single_calls: AtomicUsize::new(0),
        });
        let repo = Repository::new(Arc::new(store.clone()), users.clone());

        let alice = repo.users().create("alice").await.unwrap();
        let bob = repo.users().create("bob").await.unwrap();
        for (title, owner) in [("a", alice.id), ("b", bob.id), ("c", alice.id)] {
            repo.notes()
                .create(NewNote::new(title, "body", owner))
                .await
                .unwrap();
        }

        let notes = repo.notes().find_all().await.unwrap();
        let listed = repo.attach_usernames(notes).await.unwrap();

        let names: Vec<_> = listed.iter().map(|n| n.username.as_deref()).collect();
        assert_eq!(names, [Some("alice"), Some("bob"), Some("alice")]);
        assert_eq!(users.batched_calls.load(Ordering::SeqCst), 1);
        assert_eq!(users.single_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_attach_usernames_tolerates_deleted_owner() {
        let repo = Repository::in_memory();
        let alice = repo.users().create("alice").await.unwrap();
        repo.notes()
            .create(NewNote::new("Groceries", "milk", alice.id))
            .await
            .unwrap();
        assert!(repo.users().delete(alice.id).await.unwrap());

        let notes = repo.notes().find_all().await.unwrap();
        let listed = repo.attach_usernames(notes).await.unwrap();

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].note.title, "Groceries");
        assert!(listed[0].username.is_none());
    }

    #[tokio::test]
    async fn test_attach_usernames_on_empty_input() {
        let repo = Repository::in_memory();
        let listed = repo.attach_usernames(Vec::new()).await.unwrap();
        assert!(listed.is_empty());
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(Repository::in_memory().backend(), "memory");
        let debug = format!("{:?}", Repository::in_memory());
        assert!(debug.contains("memory"));
    }
}
