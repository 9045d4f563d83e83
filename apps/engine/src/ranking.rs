//! Ranking engine: applies the skill matcher across all resumes for a job
//! and produces an ordered top-10 list.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::matching::{match_skills, MatchResult};

/// At most this many entries come back from a ranking request.
const MAX_RANKED_RESUMES: usize = 10;

/// A resume as the ranking engine sees it: identity plus its extracted
/// skill set. Skill sets are replaced wholesale on update, never merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeProfile {
    pub resume_id: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    pub skills: Vec<String>,
}

/// One row of the ranking: resume identity plus its match result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub resume_id: String,
    pub filename: String,
    pub uploaded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Ranks every resume against `job_skills` and returns the top 10, sorted
/// by descending match percentage. Equal scores keep the resumes' original
/// relative order. Recomputed in full on every call; there is no cache to
/// go stale.
pub fn rank_resumes_for_job(
    job_skills: &[String],
    resumes: &[ResumeProfile],
) -> Vec<RankingEntry> {
    let mut entries: Vec<RankingEntry> = resumes
        .iter()
        .map(|resume| RankingEntry {
            resume_id: resume.resume_id.clone(),
            filename: resume.filename.clone(),
            uploaded_at: resume.uploaded_at,
            result: match_skills(job_skills, &resume.skills),
        })
        .collect();

    // sort_by_key is stable, so ties preserve input order.
    entries.sort_by_key(|entry| std::cmp::Reverse(entry.result.match_percentage));
    entries.truncate(MAX_RANKED_RESUMES);

    info!(
        evaluated = resumes.len(),
        returned = entries.len(),
        top_score = entries.first().map(|e| e.result.match_percentage).unwrap_or(0),
        "resumes ranked for job"
    );
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(id: &str, skills: &[&str]) -> ResumeProfile {
        ResumeProfile {
            resume_id: id.to_string(),
            filename: format!("{id}.pdf"),
            uploaded_at: Utc::now(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn job(skills: &[&str]) -> Vec<String> {
        skills.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ranking_sorted_descending_by_match() {
        let job = job(&["Rust", "Docker", "Postgres"]);
        let resumes = vec![
            profile("low", &["Docker"]),
            profile("high", &["Rust", "Docker", "Postgres"]),
            profile("mid", &["Rust", "Docker"]),
        ];

        let ranked = rank_resumes_for_job(&job, &resumes);
        let ids: Vec<&str> = ranked.iter().map(|e| e.resume_id.as_str()).collect();
        assert_eq!(ids, vec!["high", "mid", "low"]);
        assert_eq!(ranked[0].result.match_percentage, 100);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let job = job(&["Rust"]);
        let resumes = vec![
            profile("first", &["Rust"]),
            profile("second", &["Rust"]),
            profile("third", &["Rust"]),
        ];

        let ranked = rank_resumes_for_job(&job, &resumes);
        let ids: Vec<&str> = ranked.iter().map(|e| e.resume_id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_never_more_than_ten_entries() {
        let job = job(&["Rust"]);
        let resumes: Vec<ResumeProfile> = (0..25)
            .map(|i| profile(&format!("r{i}"), &["Rust"]))
            .collect();

        let ranked = rank_resumes_for_job(&job, &resumes);
        assert_eq!(ranked.len(), 10);
        // Truncation keeps the earliest of the tied resumes.
        assert_eq!(ranked[0].resume_id, "r0");
        assert_eq!(ranked[9].resume_id, "r9");
    }

    #[test]
    fn test_empty_resume_list_gives_empty_ranking() {
        assert!(rank_resumes_for_job(&job(&["Rust"]), &[]).is_empty());
    }

    #[test]
    fn test_empty_job_skills_ranks_everyone_at_zero() {
        let resumes = vec![profile("a", &["Rust"]), profile("b", &["Go"])];
        let ranked = rank_resumes_for_job(&[], &resumes);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|e| e.result.match_percentage == 0));
        assert_eq!(ranked[0].resume_id, "a");
    }

    #[test]
    fn test_entry_carries_resume_identity() {
        let resumes = vec![profile("r1", &["Rust"])];
        let ranked = rank_resumes_for_job(&job(&["Rust"]), &resumes);
        assert_eq!(ranked[0].filename, "r1.pdf");
        assert_eq!(ranked[0].result.matched_skills, vec!["Rust".to_string()]);
    }

    #[test]
    fn test_ranking_entry_serializes_flattened() {
        let resumes = vec![profile("r1", &["Rust"])];
        let ranked = rank_resumes_for_job(&job(&["Rust"]), &resumes);
        let value = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(value["resume_id"], serde_json::json!("r1"));
        // MatchResult fields sit at the top level, not nested.
        assert_eq!(value["match_percentage"], serde_json::json!(100));
    }
}
