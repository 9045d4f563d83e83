//! Deterministic stub providers shared by module tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::EMBEDDING_DIMENSIONS;
use crate::errors::EngineError;
use crate::providers::{EmbeddingProvider, GenerationOptions, GenerationProvider};

/// Pads a short prefix out to a full-width embedding.
pub fn vec768(head: &[f32]) -> Vec<f32> {
    let mut v = vec![0.0; EMBEDDING_DIMENSIONS];
    v[..head.len()].copy_from_slice(head);
    v
}

/// Embedder with canned vectors per exact input text. Unknown inputs get a
/// deterministic byte-derived vector, so repeated embeds of the same text
/// always agree. Can be told to fail on inputs containing a substring.
pub struct StubEmbedder {
    canned: HashMap<String, Vec<f32>>,
    fail_on_substring: Option<String>,
    pub calls: AtomicUsize,
}

impl StubEmbedder {
    pub fn new() -> Self {
        Self {
            canned: HashMap::new(),
            fail_on_substring: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn with(mut self, text: &str, head: &[f32]) -> Self {
        self.canned.insert(text.to_string(), vec768(head));
        self
    }

    pub fn failing_on(mut self, substring: &str) -> Self {
        self.fail_on_substring = Some(substring.to_string());
        self
    }
}

#[async_trait]
impl EmbeddingProvider for StubEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(needle) = &self.fail_on_substring {
            if text.contains(needle.as_str()) {
                return Err(EngineError::Embedding("stub embedder failure".to_string()));
            }
        }
        if let Some(v) = self.canned.get(text) {
            return Ok(v.clone());
        }
        let mut v = vec![0.0f32; EMBEDDING_DIMENSIONS];
        for (i, b) in text.bytes().enumerate() {
            v[(i + b as usize) % 16] += 1.0;
        }
        v[0] += 1.0; // never a zero vector
        Ok(v)
    }
}

/// Always fails; for provider-error propagation tests.
pub struct FailingEmbedder;

#[async_trait]
impl EmbeddingProvider for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EngineError> {
        Err(EngineError::Embedding("stub embedder failure".to_string()))
    }
}

/// Returns a 3-dimension vector to trip the store's dimension check.
pub struct WrongDimensionEmbedder;

#[async_trait]
impl EmbeddingProvider for WrongDimensionEmbedder {
    async fn embed(&self, _text: &str) -> Result<Vec<f32>, EngineError> {
        Ok(vec![1.0, 0.0, 0.0])
    }
}

/// Generator returning a fixed reply, recording calls, prompt, and options.
pub struct StubGenerator {
    reply: String,
    pub calls: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
    pub last_options: Mutex<Option<GenerationOptions>>,
}

impl StubGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
            last_options: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerationProvider for StubGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        *self.last_options.lock().unwrap() = Some(options.clone());
        Ok(self.reply.clone())
    }
}

/// Always fails; for generation-error propagation tests.
pub struct FailingGenerator;

#[async_trait]
impl GenerationProvider for FailingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _options: &GenerationOptions,
    ) -> Result<String, EngineError> {
        Err(EngineError::Generation("stub generator failure".to_string()))
    }
}
