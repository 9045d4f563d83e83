//! Skill extraction — turns raw job-description or resume text into the
//! ordered skill lists the matcher consumes.
//!
//! Extraction is model-backed but never fails outright: short input, a
//! provider error, a conversational non-answer, or an empty list all fall
//! back to keyword scanning over a static list of common skills.

use tracing::{info, warn};

use crate::prompts::{JOB_SKILLS_PROMPT_TEMPLATE, RESUME_SKILLS_PROMPT_TEMPLATE};
use crate::providers::{GenerationOptions, GenerationProvider};
use crate::text::truncate_chars;

const EXTRACTION_TEMPERATURE: f32 = 0.3;
const EXTRACTION_MAX_TOKENS: u32 = 150;
const EXTRACTION_INPUT_CHAR_LIMIT: usize = 2000;
const MAX_SKILLS: usize = 30;

/// Replies containing these are the model chatting instead of listing.
const CONVERSATIONAL_MARKERS: &[&str] = &[
    "i don't see",
    "can you provide",
    "please provide",
    "i'm happy to help",
];

const COMMON_SKILLS: &[&str] = &[
    // Programming languages
    "JavaScript", "Python", "Java", "C++", "C#", "Ruby", "Go", "Rust",
    "TypeScript", "PHP", "Swift", "Kotlin", "Scala", "R", "MATLAB",
    // Frontend
    "React", "Angular", "Vue", "HTML", "CSS", "jQuery", "Bootstrap",
    "Tailwind CSS", "Next.js", "Nuxt.js", "Redux", "Webpack", "Vite",
    // Backend
    "Node.js", "Express", "Django", "Flask", "Spring Boot", "Laravel",
    "Ruby on Rails", "ASP.NET", "FastAPI", "NestJS",
    // Databases
    "MongoDB", "PostgreSQL", "MySQL", "Redis", "Cassandra", "DynamoDB",
    "SQLite", "Oracle", "SQL Server", "MariaDB", "Elasticsearch", "Neo4j",
    // Cloud and devops
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Jenkins", "CircleCI",
    "GitHub Actions", "Terraform", "Ansible", "CI/CD",
    // Tools
    "Git", "GitHub", "GitLab", "Bitbucket", "JIRA", "Confluence",
    "Postman", "VS Code", "IntelliJ", "npm", "yarn",
    // AI/ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch", "Keras",
    "Scikit-learn", "NLP", "Computer Vision", "LangChain", "OpenAI",
    // Soft skills
    "Leadership", "Communication", "Problem Solving", "Team Collaboration",
    "Agile", "Scrum", "Project Management", "Analytical Thinking",
    "Critical Thinking", "Time Management",
];

/// What kind of text skills are being extracted from. Drives the prompt,
/// the stop sequences, and the minimum-length threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillSource {
    Job,
    Resume,
}

impl SkillSource {
    fn prompt_template(self) -> &'static str {
        match self {
            SkillSource::Job => JOB_SKILLS_PROMPT_TEMPLATE,
            SkillSource::Resume => RESUME_SKILLS_PROMPT_TEMPLATE,
        }
    }

    fn stop_sequences(self) -> &'static [&'static str] {
        match self {
            SkillSource::Job => &[
                "\n\nExplanation:",
                "\n\nNote:",
                "\n\nRequired:",
                "\n\nQualifications:",
                "\n\nResponsibilities:",
            ],
            SkillSource::Resume => &[
                "\n\nExperience:",
                "\n\nEducation:",
                "\n\nNote:",
                "\n\nProjects:",
                "\n\nCertifications:",
            ],
        }
    }

    fn min_input_chars(self) -> usize {
        match self {
            SkillSource::Job => 20,
            SkillSource::Resume => 50,
        }
    }
}

/// Extracts an ordered, deduplicated skill list (at most 30 entries) from
/// `text`. Falls back to [`extract_skills_keyword_based`] whenever the
/// model path cannot produce a usable list.
pub async fn extract_skills(
    generator: &dyn GenerationProvider,
    text: &str,
    source: SkillSource,
) -> Vec<String> {
    if text.trim().chars().count() < source.min_input_chars() {
        warn!(?source, "input too short for model extraction, using keyword fallback");
        return extract_skills_keyword_based(text);
    }

    let prompt = source
        .prompt_template()
        .replace("{text}", truncate_chars(text, EXTRACTION_INPUT_CHAR_LIMIT));
    let options = GenerationOptions::new(EXTRACTION_TEMPERATURE, EXTRACTION_MAX_TOKENS)
        .with_stop_sequences(source.stop_sequences().iter().copied());

    let raw = match generator.generate(&prompt, &options).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!(?source, error = %e, "skill extraction failed, using keyword fallback");
            return extract_skills_keyword_based(text);
        }
    };

    let lowered = raw.to_lowercase();
    if CONVERSATIONAL_MARKERS.iter().any(|m| lowered.contains(m)) {
        warn!(?source, "model gave a conversational reply, using keyword fallback");
        return extract_skills_keyword_based(text);
    }

    let skills = parse_skill_list(&raw);
    if skills.is_empty() {
        warn!(?source, "model extracted no skills, using keyword fallback");
        return extract_skills_keyword_based(text);
    }

    info!(?source, count = skills.len(), "skills extracted");
    skills
}

/// Parses a model reply into a clean skill list: split on commas,
/// newlines, and semicolons; strip list decorations; drop junk entries;
/// dedupe preserving first occurrence; cap at 30.
fn parse_skill_list(raw: &str) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut skills = Vec::new();

    for piece in raw.split([',', '\n', ';']) {
        let skill = strip_list_decorations(piece);
        let char_count = skill.chars().count();
        if char_count < 2 || char_count >= 50 {
            continue;
        }
        let lowered = skill.to_lowercase();
        if lowered.contains("skill")
            || lowered.starts_with("and ")
            || lowered.starts_with("or ")
        {
            continue;
        }
        if seen.insert(lowered) {
            skills.push(skill.to_string());
        }
        if skills.len() == MAX_SKILLS {
            break;
        }
    }

    skills
}

/// Trims bullets ("- ", "* ", "• ") and numbering ("1. ") off a list item.
fn strip_list_decorations(piece: &str) -> &str {
    let piece = piece.trim();
    let piece = piece.trim_start_matches(['-', '*', '•']).trim_start();

    let digits = piece.chars().take_while(char::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = piece[digits..].strip_prefix('.') {
            return rest.trim_start();
        }
    }
    piece
}

/// Keyword fallback: case-insensitive scan of the common-skills list.
pub fn extract_skills_keyword_based(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let found: Vec<String> = COMMON_SKILLS
        .iter()
        .filter(|skill| lowered.contains(&skill.to_lowercase()))
        .map(|skill| skill.to_string())
        .collect();
    info!(count = found.len(), "keyword-based skill extraction");
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingGenerator, StubGenerator};

    const JD: &str = "We are looking for a backend engineer with solid \
        experience in Rust, PostgreSQL, and Docker, working in an agile team.";

    #[tokio::test]
    async fn test_model_reply_is_parsed_and_cleaned() {
        let generator = StubGenerator::replying(
            "- Rust\n- PostgreSQL\n1. Docker\nRust, kubernetes, and more; x",
        );
        let skills = extract_skills(&generator, JD, SkillSource::Job).await;
        // "Rust" dedupes, "and more" and "x" are junk-filtered.
        assert_eq!(
            skills,
            vec!["Rust", "PostgreSQL", "Docker", "kubernetes"]
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_extraction_uses_low_temperature_and_stops() {
        let generator = StubGenerator::replying("Rust, Docker");
        extract_skills(&generator, JD, SkillSource::Resume).await;

        let options = generator.last_options.lock().unwrap().clone().unwrap();
        assert!((options.temperature - 0.3).abs() < 1e-6);
        assert_eq!(options.max_tokens, 150);
        assert!(options
            .stop_sequences
            .contains(&"\n\nEducation:".to_string()));
    }

    #[tokio::test]
    async fn test_short_input_skips_the_model() {
        let generator = StubGenerator::replying("should not be called");
        let skills = extract_skills(&generator, "Need Python dev", SkillSource::Job).await;
        assert_eq!(generator.call_count(), 0);
        assert_eq!(skills, vec!["Python"]);
    }

    #[tokio::test]
    async fn test_conversational_reply_falls_back() {
        let generator =
            StubGenerator::replying("I'm happy to help! Can you provide the job description?");
        let skills = extract_skills(&generator, JD, SkillSource::Job).await;
        // Fallback scans the original text, not the reply.
        assert!(skills.contains(&"Rust".to_string()));
        assert!(skills.contains(&"PostgreSQL".to_string()));
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back() {
        let skills = extract_skills(&FailingGenerator, JD, SkillSource::Job).await;
        assert!(skills.contains(&"Rust".to_string()));
    }

    #[tokio::test]
    async fn test_empty_model_list_falls_back() {
        let generator = StubGenerator::replying("x; y");
        // Every candidate is shorter than 2 chars, so the parsed list is
        // empty and the fallback kicks in.
        let skills = extract_skills(&generator, JD, SkillSource::Job).await;
        assert!(skills.contains(&"Docker".to_string()));
    }

    #[test]
    fn test_parse_caps_at_thirty() {
        let raw: String = (0..40).map(|i| format!("skl{i}, ")).collect();
        // "skl" entries survive the junk filters only if they avoid the
        // literal word "skill"; they do.
        let skills = parse_skill_list(&raw);
        assert_eq!(skills.len(), 30);
    }

    #[test]
    fn test_parse_dedupes_case_insensitively() {
        let skills = parse_skill_list("Rust, rust, RUST, Go");
        assert_eq!(skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_parse_drops_skill_word_and_conjunctions() {
        let skills = parse_skill_list("Rust, soft skills, and teamwork, or golf, Docker");
        assert_eq!(skills, vec!["Rust", "Docker"]);
    }

    #[test]
    fn test_strip_list_decorations() {
        assert_eq!(strip_list_decorations(" - Rust"), "Rust");
        assert_eq!(strip_list_decorations("* Go "), "Go");
        assert_eq!(strip_list_decorations("• C++"), "C++");
        assert_eq!(strip_list_decorations("12. Docker"), "Docker");
        assert_eq!(strip_list_decorations("Python"), "Python");
    }

    #[test]
    fn test_keyword_fallback_finds_known_skills() {
        let skills = extract_skills_keyword_based(
            "Built services in Go with Redis caching, deployed on Kubernetes",
        );
        assert!(skills.contains(&"Go".to_string()));
        assert!(skills.contains(&"Redis".to_string()));
        assert!(skills.contains(&"Kubernetes".to_string()));
        assert!(!skills.contains(&"Python".to_string()));
    }

    #[test]
    fn test_keyword_fallback_empty_text() {
        assert!(extract_skills_keyword_based("").is_empty());
    }
}
