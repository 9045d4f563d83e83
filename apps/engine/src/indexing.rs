//! Chunk indexer — splits resume text into overlapping word windows and
//! feeds them into the vector store.

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::EngineError;
use crate::vector_store::{DocumentMetadata, VectorStore};

/// Splits `text` into word chunks of up to `chunk_size` words, consecutive
/// chunks sharing `overlap` words. Chunk *i* starts at word offset
/// `i * (chunk_size - overlap)`; the final chunk may be shorter. Words are
/// rejoined with single spaces, so original whitespace does not survive.
pub fn split_into_chunks(
    text: &str,
    chunk_size: usize,
    overlap: usize,
) -> Result<Vec<String>, EngineError> {
    if chunk_size == 0 {
        return Err(EngineError::Validation(
            "chunk size must be greater than zero".to_string(),
        ));
    }
    if overlap >= chunk_size {
        return Err(EngineError::Validation(format!(
            "overlap ({overlap}) must be smaller than chunk size ({chunk_size})"
        )));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    let step = chunk_size - overlap;

    let mut chunks = Vec::new();
    let mut start = 0usize;
    while start < words.len() {
        let end = usize::min(start + chunk_size, words.len());
        let chunk = words[start..end].join(" ");
        if !chunk.trim().is_empty() {
            chunks.push(chunk);
        }
        start += step;
    }

    debug!(words = words.len(), chunks = chunks.len(), "text split into chunks");
    Ok(chunks)
}

/// Result of indexing one resume. `chunks_indexed` can be lower than
/// `total_chunks` when individual chunks failed.
#[derive(Debug, Clone, Serialize)]
pub struct IndexOutcome {
    pub resume_id: String,
    pub chunks_indexed: usize,
    pub total_chunks: usize,
    pub document_ids: Vec<Uuid>,
}

/// Chunks `full_text` and adds each chunk to the store, tagged with the
/// resume id, its chunk position, and the caller's filename.
///
/// Indexing is best-effort: a failing chunk is logged and skipped rather
/// than failing the whole resume. The outcome reports how many chunks
/// actually landed.
pub async fn index_resume(
    store: &VectorStore,
    resume_id: &str,
    full_text: &str,
    filename: Option<String>,
    chunk_size: usize,
    overlap: usize,
) -> Result<IndexOutcome, EngineError> {
    info!(resume_id, "indexing resume");

    let chunks = split_into_chunks(full_text, chunk_size, overlap)?;
    let total_chunks = chunks.len();

    let mut document_ids = Vec::with_capacity(total_chunks);
    for (chunk_index, chunk) in chunks.iter().enumerate() {
        let metadata = DocumentMetadata {
            resume_id: Some(resume_id.to_string()),
            chunk_index,
            total_chunks,
            filename: filename.clone(),
        };
        match store.add(chunk, metadata).await {
            Ok(id) => document_ids.push(id),
            Err(e) => {
                warn!(resume_id, chunk_index, error = %e, "failed to index chunk, skipping");
            }
        }
    }

    info!(
        resume_id,
        indexed = document_ids.len(),
        total = total_chunks,
        "resume indexing complete"
    );

    Ok(IndexOutcome {
        resume_id: resume_id.to_string(),
        chunks_indexed: document_ids.len(),
        total_chunks,
        document_ids,
    })
}
