//! Database models for the PostgreSQL backend.
//!
//! These types map directly to database rows and are used for sqlx
//! queries. They are kept separate from the domain types in notes-core and
//! converted at the store boundary.

use chrono::{DateTime, Utc};
use notes_core::{Note, NoteId, User, UserId};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row for the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct NoteRow {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub user_id: Uuid,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NoteRow> for Note {
    fn from(row: NoteRow) -> Self {
        Self {
            id: NoteId::from_uuid(row.id),
            title: row.title,
            text: row.text,
            user: UserId::from_uuid(row.user_id),
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Database row for the `users` table.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: UserId::from_uuid(row.id),
            username: row.username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn note_row_converts_field_for_field() {
        let now = Utc::now();
        let row = NoteRow {
            id: Uuid::new_v4(),
            title: "Groceries".into(),
            text: "milk".into(),
            user_id: Uuid::new_v4(),
            completed: true,
            created_at: now,
            updated_at: now,
        };
        let id = row.id;
        let owner = row.user_id;

        let note = Note::from(row);
        assert_eq!(note.id.0, id);
        assert_eq!(note.user.0, owner);
        assert_eq!(note.title, "Groceries");
        assert!(note.completed);
    }

    #[test]
    fn user_row_converts() {
        let row = UserRow {
            id: Uuid::nil(),
            username: "alice".into(),
        };
        let user = User::from(row);
        assert_eq!(user.id, UserId::from_uuid(Uuid::nil()));
        assert_eq!(user.username, "alice");
    }
}
