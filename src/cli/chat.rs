//! CLI entry-point for the interactive persona chat.

use std::sync::Arc;

use anyhow::Result;
use clap::Args as ClapArgs;
use tokio::io::{stdin, stdout, BufReader};
use tracing::instrument;

use crate::{chat::ChatSession, config::Settings, llm::OllamaGenerator};

/// Args for the `chat` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// Model to talk to; overrides OLLAMA_MODEL.
    #[arg(long)]
    pub model: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let mut generator = OllamaGenerator::from_settings(&settings)?;
    if let Some(model) = args.model {
        generator = generator.with_model(model);
    }
    let session = ChatSession::new(Arc::new(generator))?.with_tracing(settings.trace_generations);
    session.run(BufReader::new(stdin()), stdout()).await?;
    Ok(())
}
