//! In-memory vector store for embedded resume chunks.
//!
//! Layout is an arena of live documents plus a derived resumeId → positions
//! map. Deletion tombstones the resume's slots, compacts the arena, and
//! rebuilds the map in one exclusive pass; every other operation is either a
//! shared read or a brief append that never reorders existing entries.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::config::EMBEDDING_DIMENSIONS;
use crate::errors::EngineError;
use crate::providers::EmbeddingProvider;
use crate::similarity::cosine_similarity;

/// Fixed metadata shape carried by every document. The only filterable
/// dimension is `resume_id`; widen this struct if a new one is ever needed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DocumentMetadata {
    pub resume_id: Option<String>,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub filename: Option<String>,
}

/// One embedded chunk. Immutable once stored; only its slot in the arena
/// changes (tombstoned on resume deletion).
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub id: Uuid,
    pub text: String,
    #[serde(skip_serializing)]
    pub embedding: Vec<f32>,
    pub metadata: DocumentMetadata,
    pub created_at: DateTime<Utc>,
}

/// Search scope. `all()` matches every live document.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub resume_id: Option<String>,
}

impl SearchFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn resume(resume_id: impl Into<String>) -> Self {
        Self {
            resume_id: Some(resume_id.into()),
        }
    }

    fn matches(&self, metadata: &DocumentMetadata) -> bool {
        match &self.resume_id {
            Some(id) => metadata.resume_id.as_deref() == Some(id.as_str()),
            None => true,
        }
    }
}

/// A search result: the matching document plus its similarity to the query.
#[derive(Debug, Clone, Serialize)]
pub struct SearchHit {
    pub id: Uuid,
    pub text: String,
    pub metadata: DocumentMetadata,
    pub similarity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub total_documents: usize,
    pub total_resumes: usize,
}

#[derive(Default)]
struct StoreInner {
    documents: Vec<Option<Document>>,
    resume_index: HashMap<String, Vec<usize>>,
}

/// The vector index. Owned by [`crate::engine::MatchEngine`] and passed by
/// handle; state lives only as long as the process.
///
/// Concurrency: reads and appends interleave freely under the lock —
/// `add` never reorders existing entries, so a concurrent `search` sees a
/// valid (possibly stale) snapshot. `delete_by_resume` reindexes positions
/// and therefore holds the write lock for its whole compact-and-rebuild pass.
/// Provider calls are awaited before any lock is taken.
pub struct VectorStore {
    embedder: Arc<dyn EmbeddingProvider>,
    inner: RwLock<StoreInner>,
}

impl VectorStore {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            inner: RwLock::new(StoreInner::default()),
        }
    }

    /// Embeds `text` and appends it as a new document, returning its id.
    ///
    /// Fails with `Embedding` if the text is empty after trimming or the
    /// provider errors, and with `DimensionMismatch` if the provider returns
    /// a vector of the wrong length. Nothing is stored on failure.
    pub async fn add(
        &self,
        text: &str,
        metadata: DocumentMetadata,
    ) -> Result<Uuid, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::Embedding("text cannot be empty".to_string()));
        }

        let embedding = self.embedder.embed(text).await?;
        if embedding.len() != EMBEDDING_DIMENSIONS {
            error!(
                expected = EMBEDDING_DIMENSIONS,
                actual = embedding.len(),
                "embedding provider returned wrong dimension"
            );
            return Err(EngineError::DimensionMismatch {
                expected: EMBEDDING_DIMENSIONS,
                actual: embedding.len(),
            });
        }

        let id = Uuid::new_v4();
        let document = Document {
            id,
            text: text.to_string(),
            embedding,
            metadata,
            created_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        let position = inner.documents.len();
        if let Some(resume_id) = document.metadata.resume_id.clone() {
            inner.resume_index.entry(resume_id).or_default().push(position);
        }
        inner.documents.push(Some(document));
        debug!(%id, position, "document added to vector store");
        Ok(id)
    }

    /// Embeds `query` and returns up to `top_k` hits among live documents
    /// matching `filter`, sorted by descending similarity. Ties keep
    /// insertion order. An empty candidate set is an empty result, not an
    /// error; a per-document similarity fault scores that document 0.
    pub async fn search(
        &self,
        query: &str,
        top_k: usize,
        filter: &SearchFilter,
    ) -> Result<Vec<SearchHit>, EngineError> {
        let query_embedding = self.embedder.embed(query).await?;

        let inner = self.inner.read().await;
        let mut hits: Vec<SearchHit> = Vec::new();
        for doc in inner.documents.iter().flatten() {
            if !filter.matches(&doc.metadata) {
                continue;
            }
            let similarity = match cosine_similarity(&query_embedding, &doc.embedding) {
                Ok(s) => s,
                Err(e) => {
                    warn!(document = %doc.id, error = %e, "similarity failed, scoring 0");
                    0.0
                }
            };
            hits.push(SearchHit {
                id: doc.id,
                text: doc.text.clone(),
                metadata: doc.metadata.clone(),
                similarity,
            });
        }
        drop(inner);

        // Stable sort: equal scores keep original insertion order.
        hits.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(top_k);

        debug!(results = hits.len(), "vector search completed");
        Ok(hits)
    }

    /// All live documents for a resume, in chunk order. Empty if the resume
    /// is unknown or fully deleted.
    pub async fn get_by_resume(&self, resume_id: &str) -> Vec<Document> {
        let inner = self.inner.read().await;
        let Some(indices) = inner.resume_index.get(resume_id) else {
            return Vec::new();
        };
        let mut docs: Vec<Document> = indices
            .iter()
            .filter_map(|&i| inner.documents.get(i).and_then(Clone::clone))
            .collect();
        docs.sort_by_key(|d| d.metadata.chunk_index);
        docs
    }

    /// Tombstones every document belonging to `resume_id`, compacts the
    /// arena, and rebuilds the resume index from scratch. O(n) in total
    /// document count. Holds the write lock throughout, so no read or append
    /// can observe half-reindexed positions. Returns the number removed.
    pub async fn delete_by_resume(&self, resume_id: &str) -> usize {
        let mut inner = self.inner.write().await;
        let Some(indices) = inner.resume_index.remove(resume_id) else {
            return 0;
        };

        let mut removed = 0usize;
        for idx in indices {
            if let Some(slot) = inner.documents.get_mut(idx) {
                if slot.take().is_some() {
                    removed += 1;
                }
            }
        }

        inner.documents.retain(Option::is_some);

        let mut rebuilt: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, doc) in inner.documents.iter().enumerate() {
            if let Some(doc) = doc {
                if let Some(rid) = &doc.metadata.resume_id {
                    rebuilt.entry(rid.clone()).or_default().push(position);
                }
            }
        }
        inner.resume_index = rebuilt;

        info!(
            resume_id,
            removed,
            remaining = inner.documents.len(),
            "resume documents deleted, index rebuilt"
        );
        removed
    }

    pub async fn document_count(&self) -> usize {
        self.inner.read().await.documents.iter().flatten().count()
    }

    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.read().await;
        StoreStats {
            total_documents: inner.documents.iter().flatten().count(),
            total_resumes: inner.resume_index.len(),
        }
    }

    /// Drops every document and index entry.
    pub async fn clear(&self) {
        let mut inner = self.inner.write().await;
        inner.documents.clear();
        inner.resume_index.clear();
        info!("vector store cleared");
    }
}
