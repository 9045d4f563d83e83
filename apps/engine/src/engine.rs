//! Engine facade. One explicitly owned object holding the vector store and
//! the providers; callers (the HTTP layer, tests) go through it rather than
//! reaching for module-level state.

use std::sync::Arc;

use tracing::info;

use crate::config::EngineConfig;
use crate::errors::EngineError;
use crate::indexing::{self, IndexOutcome};
use crate::matching::{match_skills, MatchResult};
use crate::providers::{EmbeddingProvider, GenerationProvider, OllamaClient};
use crate::rag::{self, RagAnswer};
use crate::ranking::{rank_resumes_for_job, RankingEntry, ResumeProfile};
use crate::skills::{self, SkillSource};
use crate::text::clean_text;
use crate::vector_store::{Document, StoreStats, VectorStore};

/// Resumes shorter than this (after cleaning) are rejected as unusable.
const MIN_RESUME_CHARS: usize = 100;

/// The retrieval-and-ranking engine. Construct once at startup, share by
/// reference (or `Arc`) across request handlers; dropping it discards all
/// indexed state.
pub struct MatchEngine {
    config: EngineConfig,
    store: VectorStore,
    generator: Arc<dyn GenerationProvider>,
}

impl MatchEngine {
    pub fn new(
        config: EngineConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        generator: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            config,
            store: VectorStore::new(embedder),
            generator,
        }
    }

    /// Convenience constructor wiring one Ollama client as both providers.
    pub fn with_ollama(config: EngineConfig) -> Self {
        let client = Arc::new(OllamaClient::new(
            config.ollama_base_url.clone(),
            config.ollama_model.clone(),
        ));
        info!(
            base_url = %config.ollama_base_url,
            model = %config.ollama_model,
            "engine initialized with Ollama providers"
        );
        Self::new(config, client.clone(), client)
    }

    /// Direct access to the vector store, mainly for callers that only need
    /// reads (stats endpoints, diagnostics).
    pub fn store(&self) -> &VectorStore {
        &self.store
    }

    /// Cleans, validates, chunks, and indexes one resume's text.
    pub async fn index_resume(
        &self,
        resume_id: &str,
        text: &str,
        filename: Option<String>,
    ) -> Result<IndexOutcome, EngineError> {
        let cleaned = clean_text(text);
        if cleaned.chars().count() < MIN_RESUME_CHARS {
            return Err(EngineError::Validation(format!(
                "resume content too short (minimum {MIN_RESUME_CHARS} characters)"
            )));
        }
        indexing::index_resume(
            &self.store,
            resume_id,
            &cleaned,
            filename,
            self.config.chunk_size,
            self.config.chunk_overlap,
        )
        .await
    }

    /// Answers a question about one resume from its indexed chunks.
    pub async fn query_resume(
        &self,
        resume_id: &str,
        question: &str,
    ) -> Result<RagAnswer, EngineError> {
        rag::query_resume(
            &self.store,
            self.generator.as_ref(),
            resume_id,
            question,
            self.config.top_k,
        )
        .await
    }

    /// Summarizes one resume from its indexed chunks.
    pub async fn summarize_resume(&self, resume_id: &str) -> Result<String, EngineError> {
        rag::summarize_resume(&self.store, self.generator.as_ref(), resume_id).await
    }

    /// Extracts a skill list from job or resume text. Never fails; degraded
    /// paths fall back to keyword scanning.
    pub async fn extract_skills(&self, text: &str, source: SkillSource) -> Vec<String> {
        skills::extract_skills(self.generator.as_ref(), text, source).await
    }

    /// Pure skill overlap between one job and one resume.
    pub fn match_skills(&self, job_skills: &[String], resume_skills: &[String]) -> MatchResult {
        match_skills(job_skills, resume_skills)
    }

    /// Top-10 ranking of `resumes` against `job_skills`.
    pub fn rank_resumes_for_job(
        &self,
        job_skills: &[String],
        resumes: &[ResumeProfile],
    ) -> Vec<RankingEntry> {
        rank_resumes_for_job(job_skills, resumes)
    }

    /// Removes every indexed document for a resume. Returns how many were
    /// deleted.
    pub async fn delete_resume_documents(&self, resume_id: &str) -> usize {
        self.store.delete_by_resume(resume_id).await
    }

    /// All indexed documents for a resume, in chunk order.
    pub async fn get_resume_documents(&self, resume_id: &str) -> Vec<Document> {
        self.store.get_by_resume(resume_id).await
    }

    pub async fn stats(&self) -> StoreStats {
        self.store.stats().await
    }
}
