//! Command-line interface wiring for history-bot.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::config::Settings;

pub mod chat;
pub mod overview;
pub mod serve;

/// Top-level CLI definition.
#[derive(Debug, Parser)]
#[command(author, version, about = "Historical summaries and chat over a local LLM", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    /// Dispatch the selected sub-command.
    pub async fn dispatch(self, settings: Settings) -> Result<()> {
        match self.command {
            Commands::Serve(args) => serve::run(args, settings).await,
            Commands::Overview(args) => overview::run(args, settings).await,
            Commands::Chat(args) => chat::run(args, settings).await,
        }
    }
}

/// Supported sub-commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Serve the historical summary API.
    Serve(serve::Args),
    /// Ask a running summary API for a place's history.
    Overview(overview::Args),
    /// Chat with the persona directly against the model.
    Chat(chat::Args),
}
