//! Provider traits — the engine's only two external dependencies.
//!
//! Both are opaque model calls whose correctness is assumed: the engine
//! validates shapes (dimension, emptiness) but never the content. Held in
//! [`crate::engine::MatchEngine`] as `Arc<dyn ...>` so tests and alternative
//! backends swap in without touching call sites.

use async_trait::async_trait;

use crate::errors::EngineError;

pub mod ollama;

pub use ollama::OllamaClient;

/// Produces a fixed-dimension embedding for a piece of text.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError>;
}

/// Tuning knobs for a single generation call.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
    pub stop_sequences: Vec<String>,
}

impl GenerationOptions {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
            stop_sequences: Vec::new(),
        }
    }

    pub fn with_stop_sequences<I, S>(mut self, stops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_sequences = stops.into_iter().map(Into::into).collect();
        self
    }
}

/// Completes a prompt into free text.
///
/// Failures abort the single in-flight operation; the engine performs no
/// retry of its own (the caller owns that boundary).
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, EngineError>;
}
