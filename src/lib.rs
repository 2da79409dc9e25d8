//! Historical summary API, its client, and a persona chat tool, all backed
//! by a local Ollama model.

pub mod api;
pub mod chat;
pub mod cli;
pub mod client;
pub mod config;
pub mod llm;
pub mod logging;
