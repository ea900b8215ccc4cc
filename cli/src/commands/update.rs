//! UPDATE command - Overwrite a note.
//!
//! Every field is sent; the server has no partial update.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use super::{MessageResponse, make_request, output};

/// Arguments for the update command.
#[derive(Args)]
pub struct UpdateArgs {
    /// Note ID to update
    pub id: Uuid,

    /// New title
    #[arg(long)]
    pub title: String,

    /// New text
    #[arg(long)]
    pub text: String,

    /// ID of the owning user
    #[arg(long)]
    pub user: Uuid,

    /// Completion flag
    #[arg(long, action = clap::ArgAction::Set, value_name = "BOOL")]
    pub completed: bool,
}

#[derive(Debug, Serialize)]
struct UpdateNoteRequest<'a> {
    id: Uuid,
    title: &'a str,
    text: &'a str,
    user: Uuid,
    completed: bool,
}

/// Execute the update command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: UpdateArgs,
) -> Result<()> {
    let url = format!("{}/notes", base_url);
    let body = UpdateNoteRequest {
        id: args.id,
        title: &args.title,
        text: &args.text,
        user: args.user,
        completed: args.completed,
    };

    let response: MessageResponse = make_request(client.patch(&url).json(&body)).await?;

    output(&response, human)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completed_is_sent_as_boolean() {
        let body = UpdateNoteRequest {
            id: Uuid::nil(),
            title: "Groceries",
            text: "milk",
            user: Uuid::nil(),
            completed: true,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["completed"], serde_json::Value::Bool(true));
    }
}
