//! Cosine similarity, the single distance primitive used by the vector store.

use crate::errors::EngineError;

/// Computes cosine similarity between two vectors, in [-1, 1].
///
/// Returns `DimensionMismatch` if the lengths differ. A zero-magnitude vector
/// on either side yields exactly `0.0`; that is a defined degenerate case,
/// not an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, EngineError> {
    if a.len() != b.len() {
        return Err(EngineError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let mut dot = 0.0f32;
    let mut norm_a = 0.0f32;
    let mut norm_b = 0.0f32;

    for (x, y) in a.iter().zip(b) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let norm_a = norm_a.sqrt();
    let norm_b = norm_b.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / (norm_a * norm_b))
}
