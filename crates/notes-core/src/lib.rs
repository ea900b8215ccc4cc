//! notes-core: Core types for the notes service
//!
//! This crate provides the domain types shared by the store, the HTTP
//! server and the CLI:
//! - Typed identifiers (`NoteId`, `UserId`)
//! - The `Note` and `User` records
//! - `NoteWithUsername`, the denormalized view returned when listing notes

pub mod types;

// Re-export commonly used types at crate root for convenience
pub use types::{NewNote, Note, NoteId, NoteWithUsername, User, UserId};
