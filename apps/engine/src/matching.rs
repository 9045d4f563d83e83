//! Fuzzy skill matcher. Computes 1:1 overlap between a job's required
//! skills and a resume's skills.
//!
//! The scan is greedy and first-fit over the caller's input order, so the
//! result is fully deterministic: each resume skill satisfies at most one
//! job skill and vice versa. The match predicate is, in order: exact
//! equality after normalization, containment in either direction (with a
//! java/javascript guard), then the synonym table.

use serde::{Deserialize, Serialize};

/// Unmatched resume skills reported back are capped to this many.
const EXTRA_SKILLS_CAP: usize = 10;

/// Overlap between one job's skills and one resume's skills. Recomputed on
/// demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_percentage: u32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
    pub total_required: usize,
    pub total_matched: usize,
}

impl MatchResult {
    fn empty() -> Self {
        Self {
            match_percentage: 0,
            matched_skills: Vec::new(),
            missing_skills: Vec::new(),
            extra_skills: Vec::new(),
            total_required: 0,
            total_matched: 0,
        }
    }
}

/// Alias lists for canonical skill spellings. Two skills also match when
/// either one's alias list contains (or is contained by) the other skill.
fn synonyms_for(skill: &str) -> &'static [&'static str] {
    match skill {
        "mongo" => &["mongodb", "mongo db"],
        "mongodb" => &["mongo", "mongo db"],
        "postgres" => &["postgresql", "psql"],
        "postgresql" => &["postgres", "psql"],
        "javascript" => &["js", "es6", "ecmascript"],
        "js" => &["javascript", "es6"],
        "typescript" => &["ts"],
        "ts" => &["typescript"],
        "react" => &["reactjs", "react.js"],
        "reactjs" => &["react", "react.js"],
        "node" => &["nodejs", "node.js"],
        "nodejs" => &["node", "node.js"],
        "git" => &["github", "gitlab", "version control"],
        "docker" => &["containerization", "containers"],
        "kubernetes" => &["k8s"],
        "k8s" => &["kubernetes"],
        "aws" => &["amazon web services"],
        "gcp" => &["google cloud platform"],
        "azure" => &["microsoft azure"],
        _ => &[],
    }
}

/// Whether a normalized job skill and resume skill count as the same skill.
fn skills_match(job_skill: &str, resume_skill: &str) -> bool {
    if job_skill == resume_skill {
        return true;
    }

    if resume_skill.contains(job_skill) || job_skill.contains(resume_skill) {
        // "java" must not match "javascript" through containment.
        if job_skill == "java" && resume_skill.contains("javascript") {
            return false;
        }
        if resume_skill == "java" && job_skill.contains("javascript") {
            return false;
        }
        return true;
    }

    let job_synonyms = synonyms_for(job_skill);
    if job_synonyms
        .iter()
        .any(|syn| *syn == resume_skill || resume_skill.contains(syn))
    {
        return true;
    }

    let resume_synonyms = synonyms_for(resume_skill);
    resume_synonyms
        .iter()
        .any(|syn| *syn == job_skill || job_skill.contains(syn))
}

/// Matches `resume_skills` against `job_skills` and reports the overlap.
///
/// Output skill strings keep the caller's original casing. An empty job
/// skill list yields a 0% result rather than a division by zero.
pub fn match_skills(job_skills: &[String], resume_skills: &[String]) -> MatchResult {
    if job_skills.is_empty() {
        return MatchResult::empty();
    }

    let normalized_job: Vec<String> = job_skills
        .iter()
        .map(|s| s.to_lowercase().trim().to_string())
        .collect();
    let normalized_resume: Vec<String> = resume_skills
        .iter()
        .map(|s| s.to_lowercase().trim().to_string())
        .collect();

    let mut claimed = vec![false; normalized_resume.len()];
    let mut matched_job = vec![false; normalized_job.len()];

    for (job_idx, job_skill) in normalized_job.iter().enumerate() {
        let found = normalized_resume.iter().enumerate().find(|(resume_idx, resume_skill)| {
            !claimed[*resume_idx] && skills_match(job_skill, resume_skill)
        });
        if let Some((resume_idx, _)) = found {
            claimed[resume_idx] = true;
            matched_job[job_idx] = true;
        }
    }

    let matched_skills: Vec<String> = job_skills
        .iter()
        .zip(&matched_job)
        .filter(|(_, matched)| **matched)
        .map(|(skill, _)| skill.clone())
        .collect();
    let missing_skills: Vec<String> = job_skills
        .iter()
        .zip(&matched_job)
        .filter(|(_, matched)| !**matched)
        .map(|(skill, _)| skill.clone())
        .collect();
    let extra_skills: Vec<String> = resume_skills
        .iter()
        .zip(&claimed)
        .filter(|(_, claimed)| !**claimed)
        .map(|(skill, _)| skill.clone())
        .take(EXTRA_SKILLS_CAP)
        .collect();

    let total_matched = matched_skills.len();
    let match_percentage =
        ((total_matched as f64 / job_skills.len() as f64) * 100.0).round() as u32;

    MatchResult {
        match_percentage,
        matched_skills,
        missing_skills,
        extra_skills,
        total_required: job_skills.len(),
        total_matched,
    }
}
