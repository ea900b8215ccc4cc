//! notes-store: Storage layer for the notes service
//!
//! This crate provides:
//! - The `NoteStore` and `UserStore` collaborator traits
//! - A PostgreSQL backend (`PgStore`) with embedded migrations
//! - An in-memory backend (`MemoryStore`) for tests and local development
//! - `Repository`, which bundles both stores and performs the batched
//!   username join used when listing notes
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_store::{Repository, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! let repo = Repository::connect(config).await?;
//!
//! let notes = repo.notes().find_all().await?;
//! let listed = repo.attach_usernames(notes).await?;
//! ```

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::{PgStore, StoreConfig};
pub use repository::Repository;
pub use store::{NoteStore, UserStore};

// Re-export notes-core for downstream crates
pub use notes_core;
