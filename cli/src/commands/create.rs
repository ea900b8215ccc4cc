//! CREATE command - Add a note.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use uuid::Uuid;

use super::{MessageResponse, make_request, output};

/// Arguments for the create command.
#[derive(Args)]
pub struct CreateArgs {
    /// Note title (unique across all notes)
    #[arg(long)]
    pub title: String,

    /// Note text
    #[arg(long)]
    pub text: String,

    /// ID of the owning user
    #[arg(long)]
    pub user: Uuid,
}

#[derive(Debug, Serialize)]
struct CreateNoteRequest<'a> {
    title: &'a str,
    text: &'a str,
    user: Uuid,
}

/// Execute the create command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: CreateArgs,
) -> Result<()> {
    let url = format!("{}/notes", base_url);
    let body = CreateNoteRequest {
        title: &args.title,
        text: &args.text,
        user: args.user,
    };

    let response: MessageResponse = make_request(client.post(&url).json(&body)).await?;

    output(&response, human)
}
