// All generation prompt constants for the engine, in one place.

/// Canned answer returned when retrieval finds nothing for a resume.
/// No generation call is made in that case.
pub const NO_CONTEXT_ANSWER: &str =
    "I couldn't find relevant information in this resume to answer your question.";

/// Grounded-answer prompt. Replace `{context}` and `{question}` before
/// sending. The instruction block restricts the model to the retrieved
/// chunks only.
pub const RAG_ANSWER_PROMPT_TEMPLATE: &str = r#"You are an AI assistant analyzing a resume. Answer the user's question based ONLY on the provided context from the resume.

Context from Resume:
{context}

User Question: {question}

Instructions:
- Answer directly and concisely
- Only use information from the context above
- If the context doesn't contain the answer, say "This information is not available in the resume"
- Be professional and accurate
- Do not make assumptions or add information not in the context

Answer:"#;

/// Resume summary prompt. Replace `{resume_text}` before sending.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Summarize this resume in 3-4 concise sentences, highlighting key skills, experience, and qualifications:

{resume_text}

Summary:"#;

/// Skill extraction prompt for a job description. Replace `{text}`.
/// Deliberately directive so the model emits a bare list, not conversation.
pub const JOB_SKILLS_PROMPT_TEMPLATE: &str = r#"Task: Extract technical skills from job description below.
Output format: comma-separated list only.

Job Description:
{text}

Extracted Skills (comma-separated):"#;

/// Skill extraction prompt for resume text. Replace `{text}`.
pub const RESUME_SKILLS_PROMPT_TEMPLATE: &str = r#"Task: Extract technical skills from resume below.
Output format: comma-separated list only.

Resume:
{text}

Extracted Skills (comma-separated):"#;
