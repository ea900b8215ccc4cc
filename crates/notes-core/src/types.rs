//! Core data types for the notes service.
//!
//! A note is a titled piece of text owned by a user, with a completion flag.
//! Users are only referenced here: the notes service resolves their names for
//! display but never changes them.
//!
//! All types derive `Debug`, `Clone`, `Serialize`, and `Deserialize` for
//! inspection, copying, and JSON serialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for a note.
///
/// Wraps a UUID v4, providing type safety to distinguish note IDs from user
/// IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(pub Uuid);

impl NoteId {
    /// Creates a new random NoteId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a NoteId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NoteId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Unique identifier for a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Creates a new random UserId using UUID v4.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a UserId from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ============================================================================
// Records
// ============================================================================

/// An account that notes can belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
}

/// A note as held by the note store.
///
/// Titles are unique across all notes, not per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Store-assigned identifier.
    pub id: NoteId,

    /// Title, unique across the whole store.
    pub title: String,

    /// Body text.
    pub text: String,

    /// Owning user. Not guaranteed to still exist.
    pub user: UserId,

    /// Completion flag; new notes start incomplete.
    pub completed: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Overwrite every user-editable field.
    ///
    /// Updates replace the whole note rather than patching individual fields.
    pub fn overwrite(&mut self, title: String, text: String, user: UserId, completed: bool) {
        self.title = title;
        self.text = text;
        self.user = user;
        self.completed = completed;
    }
}

/// Fields required to create a note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    pub title: String,
    pub text: String,
    pub user: UserId,
}

impl NewNote {
    /// Creates a new NewNote.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>, user: UserId) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            user,
        }
    }
}

/// A note together with the name of its owner, as returned by listing.
///
/// Serializes flat: the note's fields plus `username`. The field is left out
/// entirely when the owner could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteWithUsername {
    #[serde(flatten)]
    pub note: Note,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}
