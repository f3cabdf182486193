//! CLI entry point for Gamesight.

use clap::{Parser, Subcommand};

/// Gamesight CLI
#[derive(Parser, Debug)]
#[command(name = "gamesight", version, about = "Gamesight game-sales insights assistant")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the assistant a question
    Ask(AskArgs),
    /// Fetch stored query results for a correlation id
    Results(ResultsArgs),
}

/// Arguments for `gamesight ask`.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The natural-language question
    pub question: String,

    /// Display name sent along as a session attribute
    #[arg(short, long)]
    pub user: Option<String>,

    /// Reuse an existing session id instead of starting a new session
    #[arg(short, long)]
    pub session: Option<String>,

    /// Skip chart generation
    #[arg(long)]
    pub no_chart: bool,
}

/// Arguments for `gamesight results`.
#[derive(Parser, Debug)]
pub struct ResultsArgs {
    /// Correlation id the agent stored its query results under
    pub query_id: String,
}
