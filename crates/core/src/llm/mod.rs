pub mod error;
pub mod openrouter;
pub mod prompt;

use crate::domain::recommendation::{FlattenedText, Recommendation};

#[derive(Debug, Clone)]
pub struct GenerateInput {
    pub flattened_text: FlattenedText,
}

impl GenerateInput {
    pub fn new(flattened_text: FlattenedText) -> Self {
        Self { flattened_text }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenRouter,
}

#[async_trait::async_trait]
pub trait LlmClient: Send + Sync {
    fn provider(&self) -> Provider;

    /// One completion, returned unmodified. Any failure is fatal to the run.
    async fn generate_recommendation(&self, input: GenerateInput)
        -> anyhow::Result<Recommendation>;
}
