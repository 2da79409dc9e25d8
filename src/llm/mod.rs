//! Text-generation backends and the prompt → model chain.

pub mod ollama;
pub mod prompt;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

pub use ollama::OllamaGenerator;
pub use prompt::{ChatPromptTemplate, FormatPrompt, PromptError, Role};

/// Failures while producing text from a backend.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("could not build HTTP client: {0}")]
    Client(String),
    #[error("backend unreachable: {0}")]
    Unreachable(String),
    #[error("backend returned {status}: {message}")]
    Backend { status: u16, message: String },
    #[error("malformed backend output: {0}")]
    Malformed(String),
    #[error(transparent)]
    Prompt(#[from] PromptError),
}

impl GenerationError {
    /// Short label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Client(_) => "client",
            GenerationError::Unreachable(_) => "unreachable",
            GenerationError::Backend { .. } => "backend",
            GenerationError::Malformed(_) => "malformed",
            GenerationError::Prompt(_) => "prompt",
        }
    }
}

/// A backend that turns a finished prompt into generated text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

/// A prompt piped into a generator.
#[derive(Clone)]
pub struct Chain {
    prompt: Arc<dyn FormatPrompt>,
    generator: Arc<dyn TextGenerator>,
    trace: bool,
}

impl Chain {
    pub fn new<P>(prompt: P, generator: Arc<dyn TextGenerator>) -> Self
    where
        P: FormatPrompt + 'static,
    {
        Self {
            prompt: Arc::new(prompt),
            generator,
            trace: false,
        }
    }

    /// Log every prompt and output length at `info` instead of `debug`.
    pub fn with_tracing(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub async fn invoke(&self, vars: &[(&str, &str)]) -> Result<String, GenerationError> {
        let prompt = self.prompt.format_prompt(vars)?;
        let model = self.generator.model();
        if self.trace {
            info!(%model, %prompt, "invoking model");
        } else {
            debug!(%model, prompt_len = prompt.len(), "invoking model");
        }
        let output = self.generator.generate(&prompt).await?;
        if self.trace {
            info!(%model, output_len = output.len(), "model finished");
        }
        Ok(output)
    }
}
