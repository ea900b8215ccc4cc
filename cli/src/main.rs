//! Command-line client for the notes service.
//!
//! Commands:
//! - list: List every note with its owner's username
//! - create: Add a note
//! - update: Overwrite a note
//! - delete: Delete a note
//!
//! Configuration via environment:
//! - NOTES_URL: Base URL of the notes server (default: http://localhost:3000)

mod commands;

use clap::{Parser, Subcommand};

use commands::{create::CreateArgs, delete::DeleteArgs, list::ListArgs, update::UpdateArgs};

/// Notes service CLI
///
/// Prints JSON by default; pass --human for formatted output.
#[derive(Parser)]
#[command(name = "notes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output human-readable formatted text instead of JSON
    #[arg(long, global = true)]
    human: bool,

    /// Notes server URL
    #[arg(
        long,
        env = "NOTES_URL",
        default_value = "http://localhost:3000",
        global = true
    )]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every note
    List(ListArgs),

    /// Add a new note
    Create(CreateArgs),

    /// Overwrite an existing note
    Update(UpdateArgs),

    /// Delete a note
    Delete(DeleteArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let client = match commands::build_client(cli.timeout) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let url = cli.url.trim_end_matches('/');
    let result = match cli.command {
        Commands::List(args) => commands::list::execute(&client, url, cli.human, args).await,
        Commands::Create(args) => commands::create::execute(&client, url, cli.human, args).await,
        Commands::Update(args) => commands::update::execute(&client, url, cli.human, args).await,
        Commands::Delete(args) => commands::delete::execute(&client, url, cli.human, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
