//! Ollama-backed provider. The single point of contact with the model server;
//! no other module issues HTTP calls.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::EngineError;
use crate::providers::{EmbeddingProvider, GenerationOptions, GenerationProvider};
use crate::text::truncate_chars;

/// Embedding model is fixed: the store's 768-dimension invariant depends on it.
const EMBEDDING_MODEL: &str = "nomic-embed-text";

/// Embedding inputs are capped before the call; chunks already fit, this
/// guards ad-hoc query strings.
const EMBED_INPUT_CHAR_LIMIT: usize = 2000;

const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateRequestOptions<'a>,
}

#[derive(Debug, Serialize)]
struct GenerateRequestOptions<'a> {
    temperature: f32,
    num_predict: u32,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stop: Vec<&'a str>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// Client for a local or remote Ollama server, implementing both provider
/// traits. One instance is shared for embedding and generation.
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::Embedding("text cannot be empty".to_string()));
        }

        let body = EmbeddingsRequest {
            model: EMBEDDING_MODEL,
            prompt: truncate_chars(text, EMBED_INPUT_CHAR_LIMIT),
        };

        let url = format!("{}/api/embeddings", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Embedding(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EngineError::Embedding(format!(
                "embeddings API returned {status}: {detail}"
            )));
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Embedding(e.to_string()))?;

        if parsed.embedding.is_empty() {
            return Err(EngineError::Embedding(
                "provider returned an empty embedding".to_string(),
            ));
        }

        debug!(dimensions = parsed.embedding.len(), "embedding generated");
        Ok(parsed.embedding)
    }
}

#[async_trait]
impl GenerationProvider for OllamaClient {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, EngineError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateRequestOptions {
                temperature: options.temperature,
                num_predict: options.max_tokens,
                stop: options.stop_sequences.iter().map(String::as_str).collect(),
            },
        };

        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| EngineError::Generation(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(EngineError::Generation(format!(
                "generate API returned {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Generation(e.to_string()))?;

        debug!(chars = parsed.response.len(), "generation completed");
        Ok(parsed.response)
    }
}
