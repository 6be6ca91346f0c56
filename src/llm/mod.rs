//! Summarizing and answering questions over loaded page documents.

mod openai;
pub mod prompt;
mod service;

pub use openai::OpenAiClient;
pub use service::{run_query, QueryKind};

use async_trait::async_trait;

use crate::error::Result;

/// A text-completion backend.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
