//! Retrieval pipeline: answers a question about one resume using chunks
//! retrieved from the vector store plus a constrained generation call.

use serde::Serialize;
use tracing::{debug, info};

use crate::errors::EngineError;
use crate::prompts::{NO_CONTEXT_ANSWER, RAG_ANSWER_PROMPT_TEMPLATE, SUMMARY_PROMPT_TEMPLATE};
use crate::providers::{GenerationOptions, GenerationProvider};
use crate::text::{truncate_chars, truncate_text};
use crate::vector_store::{SearchFilter, SearchHit, VectorStore};

const ANSWER_TEMPERATURE: f32 = 0.7;
const ANSWER_MAX_TOKENS: u32 = 300;
const SUMMARY_TEMPERATURE: f32 = 0.5;
const SUMMARY_MAX_TOKENS: u32 = 150;

/// Characters of each retrieved chunk echoed back to the caller, for
/// display only. Never re-used to prompt.
const CONTEXT_PREVIEW_CHARS: usize = 200;

/// Characters of joined resume text fed to the summary prompt.
const SUMMARY_INPUT_CHAR_LIMIT: usize = 2000;

/// Display-only preview of one retrieved chunk.
#[derive(Debug, Clone, Serialize)]
pub struct ContextPreview {
    pub text: String,
    pub similarity: f32,
}

/// A grounded answer. `confidence` is the similarity of the single
/// highest-ranked retrieved chunk, not an average.
#[derive(Debug, Clone, Serialize)]
pub struct RagAnswer {
    pub answer: String,
    pub context: Vec<ContextPreview>,
    pub confidence: f32,
}

/// Answers `question` using only chunks retrieved from `resume_id`'s
/// documents. When retrieval comes back empty the canned zero-confidence
/// answer is returned and no generation call is made, so the model cannot
/// hallucinate without a grounding set.
pub async fn query_resume(
    store: &VectorStore,
    generator: &dyn GenerationProvider,
    resume_id: &str,
    question: &str,
    top_k: usize,
) -> Result<RagAnswer, EngineError> {
    if question.trim().is_empty() {
        return Err(EngineError::Validation(
            "question cannot be empty".to_string(),
        ));
    }

    info!(resume_id, "answering resume question");

    let hits = store
        .search(question, top_k, &SearchFilter::resume(resume_id))
        .await?;

    if hits.is_empty() {
        debug!(resume_id, "no chunks retrieved, returning canned answer");
        return Ok(RagAnswer {
            answer: NO_CONTEXT_ANSWER.to_string(),
            context: Vec::new(),
            confidence: 0.0,
        });
    }

    let context_block = build_context_block(&hits);
    let prompt = RAG_ANSWER_PROMPT_TEMPLATE
        .replace("{context}", &context_block)
        .replace("{question}", question);

    let options = GenerationOptions::new(ANSWER_TEMPERATURE, ANSWER_MAX_TOKENS);
    let answer = generator.generate(&prompt, &options).await?;

    // Hits are sorted descending, so the first is the confidence proxy.
    let confidence = hits[0].similarity;
    let context = hits
        .iter()
        .map(|hit| ContextPreview {
            text: truncate_text(&hit.text, CONTEXT_PREVIEW_CHARS),
            similarity: hit.similarity,
        })
        .collect();

    Ok(RagAnswer {
        answer: answer.trim().to_string(),
        context,
        confidence,
    })
}

/// Summarizes a resume from its stored chunks. `NotFound` when the resume
/// has no documents in the store.
pub async fn summarize_resume(
    store: &VectorStore,
    generator: &dyn GenerationProvider,
    resume_id: &str,
) -> Result<String, EngineError> {
    let docs = store.get_by_resume(resume_id).await;
    if docs.is_empty() {
        return Err(EngineError::NotFound(format!(
            "resume '{resume_id}' has no documents in the vector store"
        )));
    }

    let full_text = docs
        .iter()
        .map(|d| d.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = SUMMARY_PROMPT_TEMPLATE.replace(
        "{resume_text}",
        truncate_chars(&full_text, SUMMARY_INPUT_CHAR_LIMIT),
    );

    let options = GenerationOptions::new(SUMMARY_TEMPERATURE, SUMMARY_MAX_TOKENS);
    let summary = generator.generate(&prompt, &options).await?;
    Ok(summary.trim().to_string())
}

/// Labeled context block: rank, similarity percentage, chunk text.
fn build_context_block(hits: &[SearchHit]) -> String {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "[Context {}] (Relevance: {:.1}%)\n{}",
                i + 1,
                hit.similarity * 100.0,
                hit.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}
