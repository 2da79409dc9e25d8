//! Ollama `/api/generate` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{GenerationError, TextGenerator};
use crate::config::Settings;

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Non-streaming completion against a local Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaGenerator {
    http: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OllamaGenerator {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self, GenerationError> {
        let http = Client::builder()
            .user_agent(concat!("history-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GenerationError::Client(e.to_string()))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: None,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GenerationError> {
        let mut generator = Self::new(&settings.ollama_base_url, &settings.model)?;
        generator.api_key = settings.ollama_api_key.clone();
        Ok(generator)
    }

    /// Swap the model, keeping the connection settings.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let mut request = self.http.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request
            .send()
            .await
            .map_err(|e| GenerationError::Unreachable(e.to_string()))?;
        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerationError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(GenerationError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let payload: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| GenerationError::Malformed(e.to_string()))?;
        Ok(payload.response)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
