use anyhow::{Context, Result};

/// Dimension of every embedding in the store. Matches nomic-embed-text.
pub const EMBEDDING_DIMENSIONS: usize = 768;

/// Default word count per resume chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 500;

/// Default word overlap between consecutive chunks.
pub const DEFAULT_CHUNK_OVERLAP: usize = 50;

/// Default number of chunks retrieved per question.
pub const DEFAULT_TOP_K: usize = 3;

/// Engine configuration loaded from environment variables.
/// Every variable has a working local default, so `from_env` only fails on
/// values that are present but unparseable.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub top_k: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            ollama_base_url: "http://localhost:11434".to_string(),
            ollama_model: "llama3.2:3b".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Self::default();
        Ok(EngineConfig {
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            ollama_model: std::env::var("OLLAMA_MODEL").unwrap_or(defaults.ollama_model),
            chunk_size: env_usize("CHUNK_SIZE", defaults.chunk_size)?,
            chunk_overlap: env_usize("CHUNK_OVERLAP", defaults.chunk_overlap)?,
            top_k: env_usize("TOP_K_RESULTS", defaults.top_k)?,
        })
    }
}

fn env_usize(key: &str, default: usize) -> Result<usize> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("'{key}' must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_local_ollama() {
        let config = EngineConfig::default();
        assert_eq!(config.ollama_base_url, "http://localhost:11434");
        assert_eq!(config.ollama_model, "llama3.2:3b");
        assert_eq!(config.chunk_size, 500);
        assert_eq!(config.chunk_overlap, 50);
        assert_eq!(config.top_k, 3);
    }
}
