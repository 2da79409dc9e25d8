#![allow(dead_code)]

use std::{
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use async_trait::async_trait;
use axum::Router;
use history_bot::llm::{GenerationError, TextGenerator};
use tokio::net::TcpListener;

/// Echoes a canned summary that mentions the prompt length.
#[derive(Default)]
pub struct CannedGenerator {
    pub calls: AtomicUsize,
}

impl CannedGenerator {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("A short history ({} prompt chars).", prompt.len()))
    }

    fn model(&self) -> &str {
        "canned"
    }
}

/// Keeps every prompt it is handed.
#[derive(Default)]
pub struct RecordingGenerator {
    pub prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok("Recorded.".into())
    }

    fn model(&self) -> &str {
        "recording"
    }
}

/// Always fails the way a stopped Ollama would.
pub struct DownGenerator;

#[async_trait]
impl TextGenerator for DownGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Unreachable(
            "error sending request for url (http://localhost:11434/api/generate)".into(),
        ))
    }

    fn model(&self) -> &str {
        "down"
    }
}

/// Serve `router` on an ephemeral loopback port.
pub async fn spawn(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router.into_make_service())
            .await
            .expect("serve");
    });
    addr
}

/// An address nothing is listening on.
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    addr
}
