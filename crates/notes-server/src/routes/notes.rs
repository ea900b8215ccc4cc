//! Note routes.
//!
//! All four operations live on `/notes` and read their inputs from the JSON
//! body:
//! - GET /notes - List every note with its owner's username
//! - POST /notes - Create a note
//! - PATCH /notes - Overwrite a note
//! - DELETE /notes - Delete a note
//!
//! Request fields are accepted as raw JSON values and checked here, so a
//! field of the wrong type is reported exactly like a missing one.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use notes_core::{NewNote, NoteId, NoteWithUsername, UserId};
use notes_store::Repository;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::DeleteLookup;
use crate::error::{ApiError, ApiResult};
use crate::extract::JsonBody;
use crate::state::AppState;

const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
const DUPLICATE_TITLE: &str = "Duplicate note title";
const NOTE_NOT_FOUND: &str = "Note not found.";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for POST /notes.
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
    /// Owner's user id.
    #[serde(default)]
    pub user: Option<Value>,
}

/// Request body for PATCH /notes.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateNoteRequest {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub user: Option<Value>,
    /// Must be a JSON boolean; `"true"` or `1` do not count.
    #[serde(default)]
    pub completed: Option<Value>,
}

/// Request body for DELETE /notes.
#[derive(Debug, Default, Deserialize)]
pub struct DeleteNoteRequest {
    #[serde(default)]
    pub id: Option<Value>,
}

/// Success body for the mutating endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// A present, non-empty string field.
fn required_str(field: &Option<Value>) -> Option<&str> {
    field.as_ref()?.as_str().filter(|s| !s.is_empty())
}

/// A field that is strictly a JSON boolean.
fn required_bool(field: &Option<Value>) -> Option<bool> {
    field.as_ref()?.as_bool()
}

// ============================================================================
// Route Handlers
// ============================================================================

/// GET /notes - List every note with its owner's username.
///
/// # Response
///
/// - 200 OK: `[ { "id": ..., "title": ..., "username": ... }, ... ]`
/// - 400 Bad Request: the store holds no notes
async fn list_notes(State(state): State<AppState>) -> ApiResult<Json<Vec<NoteWithUsername>>> {
    let repo = state.repository();

    let notes = repo.notes().find_all().await?;
    if notes.is_empty() {
        return Err(ApiError::NotFound("No notes found.".to_string()));
    }

    let listed = repo.attach_usernames(notes).await?;

    tracing::info!(count = listed.len(), "Listed notes");

    Ok(Json(listed))
}

/// POST /notes - Create a note.
///
/// # Request
///
/// Body: `{ "title": "...", "text": "...", "user": "<user id>" }`
///
/// # Response
///
/// - 201 Created: `{ "message": "New note has been added." }`
/// - 400 Bad Request: a field is missing, or the store rejected the note
/// - 409 Conflict: the user does not exist, or the title is taken
async fn create_note(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateNoteRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let repo = state.repository();

    let (Some(title), Some(text), Some(user)) = (
        required_str(&request.title),
        required_str(&request.text),
        required_str(&request.user),
    ) else {
        return Err(ApiError::Validation(ALL_FIELDS_REQUIRED.to_string()));
    };

    // An id that cannot be parsed cannot name an existing user.
    let author = match user.parse::<UserId>() {
        Ok(user_id) => repo.users().find_by_id(user_id).await?,
        Err(_) => None,
    };
    let Some(author) = author else {
        return Err(ApiError::Conflict("Author not found".to_string()));
    };

    if repo.notes().find_by_title(title).await?.is_some() {
        return Err(ApiError::Conflict(DUPLICATE_TITLE.to_string()));
    }

    let note = repo
        .notes()
        .create(NewNote::new(title, text, author.id))
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Failed to create note");
            e
        })?;

    tracing::info!(
        note_id = %note.id,
        user_id = %author.id,
        "Note created"
    );

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("New note has been added.")),
    ))
}

/// PATCH /notes - Overwrite a note.
///
/// All of title, text, user and completed are replaced; there is no partial
/// update.
///
/// # Request
///
/// Body: `{ "id": "...", "title": "...", "text": "...", "user": "...", "completed": false }`
///
/// # Response
///
/// - 200 OK: `{ "message": "Note title <title> has been updated." }`
/// - 400 Bad Request: a field is missing or mistyped, or the note does not exist
/// - 409 Conflict: another note already has the title
async fn update_note(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<UpdateNoteRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let repo = state.repository();

    let (Some(id), Some(title), Some(text), Some(user), Some(completed)) = (
        required_str(&request.id),
        required_str(&request.title),
        required_str(&request.text),
        required_str(&request.user),
        required_bool(&request.completed),
    ) else {
        return Err(ApiError::Validation(ALL_FIELDS_REQUIRED.to_string()));
    };

    let existing = match id.parse::<NoteId>() {
        Ok(note_id) => repo.notes().find_by_id(note_id).await?,
        Err(_) => None,
    };
    let Some(mut note) = existing else {
        return Err(ApiError::NotFound(NOTE_NOT_FOUND.to_string()));
    };

    if let Some(holder) = repo.notes().find_by_title(title).await?
        && holder.id != note.id
    {
        return Err(ApiError::Conflict(DUPLICATE_TITLE.to_string()));
    }

    let owner: UserId = user
        .parse()
        .map_err(|_| ApiError::Persistence("Invalid details.".to_string()))?;

    note.overwrite(title.to_string(), text.to_string(), owner, completed);
    let updated = repo.notes().save(&note).await?;

    tracing::info!(note_id = %updated.id, completed, "Note updated");

    Ok(Json(MessageResponse::new(format!(
        "Note title {} has been updated.",
        updated.title
    ))))
}

/// DELETE /notes - Delete a note.
///
/// # Request
///
/// Body: `{ "id": "..." }`
///
/// # Response
///
/// - 200 OK: `{ "message": "Note <title> has been deleted" }`
/// - 400 Bad Request: the id is missing or does not resolve
async fn delete_note(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<DeleteNoteRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let Some(id) = required_str(&request.id) else {
        return Err(ApiError::Validation("Note ID is required.".to_string()));
    };

    let message = match state.config().delete_lookup {
        DeleteLookup::Notes => delete_from_notes(state.repository(), id).await?,
        DeleteLookup::Users => delete_from_users(state.repository(), id).await?,
    };

    Ok(Json(MessageResponse::new(message)))
}

async fn delete_from_notes(repo: &Repository, id: &str) -> ApiResult<String> {
    let existing = match id.parse::<NoteId>() {
        Ok(note_id) => repo.notes().find_by_id(note_id).await?,
        Err(_) => None,
    };
    let Some(note) = existing else {
        return Err(ApiError::NotFound(NOTE_NOT_FOUND.to_string()));
    };

    if !repo.notes().delete(note.id).await? {
        // Removed by a concurrent request after the lookup.
        return Err(ApiError::NotFound(NOTE_NOT_FOUND.to_string()));
    }

    tracing::info!(note_id = %note.id, "Note deleted");

    Ok(format!("Note {} has been deleted", note.title))
}

/// Legacy delete: resolves the id in the user store and deletes the user.
///
/// Users carry no title, so the reply names the note `undefined`, exactly as
/// clients of the old endpoint received it.
async fn delete_from_users(repo: &Repository, id: &str) -> ApiResult<String> {
    tracing::warn!(
        id,
        "DELETE_LOOKUP=users: resolving the id against the user store"
    );

    let existing = match id.parse::<UserId>() {
        Ok(user_id) => repo.users().find_by_id(user_id).await?,
        Err(_) => None,
    };
    let Some(user) = existing else {
        return Err(ApiError::NotFound(NOTE_NOT_FOUND.to_string()));
    };

    repo.users().delete(user.id).await?;

    tracing::warn!(user_id = %user.id, "User deleted through the notes endpoint");

    Ok("Note undefined has been deleted".to_string())
}

/// Build note routes.
pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/notes",
        get(list_notes)
            .post(create_note)
            .patch(update_note)
            .delete(delete_note),
    )
}

// ============================================================================
// Tests
// ============================================================================
