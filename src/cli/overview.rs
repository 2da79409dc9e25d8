//! CLI entry-point for requesting a historical overview from the API.

use anyhow::Result;
use clap::Args as ClapArgs;
use tracing::{info, instrument};

use crate::{client::SummaryClient, config::Settings};

/// Args for the `overview` command.
#[derive(Debug, Clone, ClapArgs)]
pub struct Args {
    /// City or place to summarise.
    pub place: String,
    /// Summary service root; overrides HISTORY_SERVER_URL.
    #[arg(long)]
    pub server: Option<String>,
}

#[instrument(skip(settings))]
pub async fn run(args: Args, settings: Settings) -> Result<()> {
    let client = match &args.server {
        Some(url) => SummaryClient::new(url),
        None => SummaryClient::from_settings(&settings),
    };
    info!(place = %args.place, "generating historical overview");
    let overview = client.fetch_overview(&args.place).await;
    println!("{overview}");
    Ok(())
}
