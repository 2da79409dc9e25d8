//! Runtime configuration utilities for history-bot.

use std::env;

use serde::Deserialize;

const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "gemma3:4b";
const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Application configuration resolved from `.env` and defaults.
///
/// Loaded once at startup and handed to each component; nothing reads the
/// process environment after that.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Base URL of the Ollama server.
    pub ollama_base_url: String,
    /// Model identifier passed to the backend.
    pub model: String,
    /// Optional bearer token for Ollama deployments behind an auth proxy.
    pub ollama_api_key: Option<String>,
    /// Where the overview client finds the summary service.
    pub server_url: String,
    /// Log every prompt and generated text at `info`.
    pub trace_generations: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Settings {
    /// Load configuration from environment with reasonable defaults.
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Ok(Self::from_lookup(|key| env::var(key).ok()))
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let ollama_base_url = non_empty("OLLAMA_BASE_URL")
            .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string());
        let model = non_empty("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let ollama_api_key = non_empty("OLLAMA_API_KEY");
        let server_url =
            non_empty("HISTORY_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let trace_generations = non_empty("TRACE_GENERATIONS")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            ollama_base_url: trim_slash(ollama_base_url),
            model,
            ollama_api_key,
            server_url: trim_slash(server_url),
            trace_generations,
        }
    }

    /// Full URL of the summary endpoint.
    pub fn history_url(&self) -> String {
        format!("{}/history", self.server_url)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
