//! Client for the summary service.
//!
//! Every outcome, including failures, ends up as display-ready text.

use std::fmt;

use reqwest::Client;
use serde_json::Value;
use tracing::{instrument, warn};

use crate::{api::types::SummaryRequest, config::Settings};

/// Why an overview could not be produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverviewFailure {
    /// Transport error, non-2xx status, or a body that is not JSON.
    Connection(String),
    /// JSON arrived but without a `historical_summary` field.
    Format(String),
    /// Anything else, e.g. the HTTP client could not be built.
    Other(String),
}

impl fmt::Display for OverviewFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverviewFailure::Connection(cause) => write!(f, "Error connecting to server: {cause}"),
            OverviewFailure::Format(cause) => write!(f, "Unexpected response format: {cause}"),
            OverviewFailure::Other(cause) => write!(f, "An error occurred: {cause}"),
        }
    }
}

/// Result of one overview request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overview {
    Summary(String),
    Failed(OverviewFailure),
}

impl Overview {
    pub fn is_summary(&self) -> bool {
        matches!(self, Overview::Summary(_))
    }

    /// The text to show a user.
    pub fn into_text(self) -> String {
        match self {
            Overview::Summary(text) => text,
            Overview::Failed(failure) => failure.to_string(),
        }
    }
}

impl fmt::Display for Overview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overview::Summary(text) => f.write_str(text),
            Overview::Failed(failure) => failure.fmt(f),
        }
    }
}

/// Talks to `POST /history` on a summary service.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    http: Result<Client, String>,
    history_url: String,
}

impl SummaryClient {
    /// `base_url` is the service root, e.g. `http://localhost:8000`.
    pub fn new(base_url: &str) -> Self {
        Self::with_history_url(format!("{}/history", base_url.trim_end_matches('/')))
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_history_url(settings.history_url())
    }

    fn with_history_url(history_url: String) -> Self {
        let http = Client::builder()
            .user_agent(concat!("history-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| e.to_string());
        Self {
            http,
            history_url,
        }
    }

    /// Request an overview for `place`, returning the summary or a
    /// description of what went wrong.
    #[instrument(skip(self))]
    pub async fn fetch_overview(&self, place: &str) -> Overview {
        let outcome = self.request(place).await;
        if let Err(failure) = &outcome {
            warn!(%failure, url = %self.history_url, "overview request failed");
        }
        match outcome {
            Ok(text) => Overview::Summary(text),
            Err(failure) => Overview::Failed(failure),
        }
    }

    /// Same as [`fetch_overview`](Self::fetch_overview), flattened to text.
    pub async fn get_overview(&self, place: &str) -> String {
        self.fetch_overview(place).await.into_text()
    }

    async fn request(&self, place: &str) -> Result<String, OverviewFailure> {
        let http = self.http.as_ref().map_err(|e| OverviewFailure::Other(e.clone()))?;
        let body = SummaryRequest {
            place: place.to_string(),
        };
        let payload: Value = http
            .post(&self.history_url)
            .json(&body)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(connection)?
            .json()
            .await
            .map_err(connection)?;

        extract_summary(&payload)
    }
}

fn connection(err: reqwest::Error) -> OverviewFailure {
    OverviewFailure::Connection(err.to_string())
}

fn extract_summary(payload: &Value) -> Result<String, OverviewFailure> {
    match payload.get("historical_summary") {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Ok(other.to_string()),
        None => Err(OverviewFailure::Format("'historical_summary'".to_string())),
    }
}
