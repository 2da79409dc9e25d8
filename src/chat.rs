//! Interactive persona chat straight against the text-generation backend.

use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info, warn};

use crate::llm::{Chain, ChatPromptTemplate, PromptError, Role, TextGenerator};

const PERSONA: &str = "You are a helpful and knowledgeable character named Arjun, a senior software engineer based in India. You work in the IT sector, have strong technical expertise in cloud computing, backend systems, and AI, and often help junior developers. You communicate clearly, use real-world analogies, and sometimes refer to the Indian tech industry and culture in your responses. Keep your answers conversational and concise, like you're talking to a colleague. Avoid long paragraphs.";

pub const BANNER: &str = "Talk with the Software Dev based in India (type 'exit' to leave)";

/// Persona prompt piped into a backend.
pub struct ChatSession {
    chain: Chain,
}

impl ChatSession {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Result<Self, PromptError> {
        let prompt = ChatPromptTemplate::from_messages([
            (Role::System, PERSONA),
            (Role::Human, "Question:{ques}"),
        ])?;
        Ok(Self {
            chain: Chain::new(prompt, generator),
        })
    }

    pub fn with_tracing(mut self, trace: bool) -> Self {
        self.chain = self.chain.with_tracing(trace);
        self
    }

    /// Answer one question. Backend failures come back as an `error:` line.
    pub async fn reply(&self, question: &str) -> String {
        match self.chain.invoke(&[("ques", question)]).await {
            Ok(answer) => answer,
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "chat generation failed");
                format!("error: {err}")
            }
        }
    }

    /// Read questions line by line until EOF or `exit`/`quit`.
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut answered = 0usize;

        output.write_all(format!("{BANNER}\n> ").as_bytes()).await?;
        output.flush().await?;
        while let Some(line) = lines.next_line().await? {
            let question = line.trim();
            if matches!(question, "exit" | "quit") {
                break;
            }
            if !question.is_empty() {
                let answer = self.reply(question).await;
                output.write_all(answer.as_bytes()).await?;
                output.write_all(b"\n").await?;
                answered += 1;
            }
            output.write_all(b"> ").await?;
            output.flush().await?;
        }
        info!(answered, "chat session ended");
        Ok(answered)
    }
}
