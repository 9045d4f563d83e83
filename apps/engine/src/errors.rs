use thiserror::Error;

/// Engine-level error type. The consuming transport layer maps these onto
/// whatever wire format it speaks; the engine itself never touches HTTP.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The embedding provider failed, or the input text was empty.
    /// Aborts the single indexing/query call; the store stays consistent.
    #[error("Embedding failed: {0}")]
    Embedding(String),

    /// The generation provider failed after retrieval already succeeded.
    /// The retrieved context is discarded and the error surfaces as-is.
    #[error("Generation failed: {0}")]
    Generation(String),

    /// The embedding provider returned a vector of the wrong length.
    /// Signals a misconfigured provider; surfaced rather than coerced.
    #[error("Embedding dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
