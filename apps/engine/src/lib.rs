//! Retrieval-and-ranking engine for matching candidate resumes against job
//! postings.
//!
//! The crate combines two independent signals:
//! - semantic retrieval: resume text is chunked, embedded, and held in an
//!   in-memory vector store so questions about a specific resume can be
//!   answered with grounded generation ([`rag`]),
//! - deterministic skill overlap: a fuzzy, order-sensitive matcher
//!   ([`matching`]) that the ranking engine ([`ranking`]) applies across all
//!   resumes for a job.
//!
//! All state is process-lifetime only. Transport (HTTP, uploads, PDF
//! extraction) lives in the consuming service, not here. [`MatchEngine`] is
//! the facade callers hold.

pub mod config;
pub mod engine;
pub mod errors;
pub mod indexing;
pub mod matching;
pub mod prompts;
pub mod providers;
pub mod rag;
pub mod ranking;
pub mod similarity;
pub mod skills;
pub mod text;
pub mod vector_store;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::EngineConfig;
pub use engine::MatchEngine;
pub use errors::EngineError;
pub use matching::{match_skills, MatchResult};
pub use providers::{EmbeddingProvider, GenerationOptions, GenerationProvider};
pub use ranking::{rank_resumes_for_job, RankingEntry, ResumeProfile};
pub use vector_store::{Document, DocumentMetadata, SearchFilter, SearchHit, StoreStats, VectorStore};
