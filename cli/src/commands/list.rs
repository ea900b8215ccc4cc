//! LIST command - List every note.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Args;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CliError, HumanReadable, format_timestamp, make_request, output, truncate};

/// The server answers an empty listing with 400 and this message.
const NO_NOTES: &str = "No notes found.";

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    /// Only show notes that are not completed
    #[arg(long)]
    pub pending: bool,
}

/// A listed note with its owner's name.
#[derive(Debug, Deserialize, Serialize)]
pub struct ListedNote {
    pub id: Uuid,
    pub title: String,
    pub text: String,
    pub user: Uuid,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ListNotesResponse {
    pub notes: Vec<ListedNote>,
}

impl HumanReadable for ListNotesResponse {
    fn print_human(&self) {
        println!("{}", "Notes".green().bold());
        println!("{}", "=".repeat(80));
        println!();

        if self.notes.is_empty() {
            println!("  {}", "(No notes)".dimmed());
            return;
        }

        for note in &self.notes {
            let status = if note.completed {
                "[x]".green()
            } else {
                "[ ]".normal()
            };
            println!("  {} {}", status, note.title.bold());
            println!("    {} {}", "ID:".cyan(), note.id);
            match &note.username {
                Some(name) => println!("    {} {}", "Owner:".cyan(), name),
                None => println!("    {} {}", "Owner:".cyan(), "(unknown user)".dimmed()),
            }
            if let Some(created) = &note.created_at {
                println!("    {} {}", "Created:".cyan(), format_timestamp(created));
            }
            println!("    {}", truncate(&note.text, 72).dimmed());
            println!();
        }

        println!("  {} {}", "Total:".cyan(), self.notes.len());
    }
}

/// Execute the list command.
pub async fn execute(
    client: &reqwest::Client,
    base_url: &str,
    human: bool,
    args: ListArgs,
) -> Result<()> {
    let url = format!("{}/notes", base_url);

    let mut response = match make_request::<ListNotesResponse>(client.get(&url)).await {
        Ok(response) => response,
        Err(CliError::Server { status: 400, message }) if message == NO_NOTES => {
            ListNotesResponse { notes: Vec::new() }
        }
        Err(e) => return Err(e.into()),
    };

    if args.pending {
        response.notes.retain(|n| !n.completed);
    }

    output(&response, human)
}
