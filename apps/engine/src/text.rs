//! Small text utilities shared by indexing, retrieval, and validation.

/// Normalizes line endings, collapses runs of spaces/tabs, and caps blank
/// lines at one. Newlines are kept so section structure survives cleaning.
pub fn clean_text(text: &str) -> String {
    let text = text.replace("\r\n", "\n");

    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    let mut newline_run = 0usize;

    for c in text.chars() {
        match c {
            ' ' | '\t' => pending_space = true,
            '\n' => {
                pending_space = false;
                newline_run += 1;
                if newline_run <= 2 {
                    out.push('\n');
                }
            }
            _ => {
                if pending_space && !out.is_empty() && !out.ends_with('\n') {
                    out.push(' ');
                }
                pending_space = false;
                newline_run = 0;
                out.push(c);
            }
        }
    }

    out.trim().to_string()
}

/// Truncates to at most `max_len` characters, appending "..." when anything
/// was cut. Character-based, so it never splits a multi-byte sequence.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let kept = max_len.saturating_sub(3);
    let mut out: String = text.chars().take(kept).collect();
    out.push_str("...");
    out
}

/// Hard character cap with no suffix. Used for provider input limits.
pub fn truncate_chars(text: &str, max_len: usize) -> &str {
    match text.char_indices().nth(max_len) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Whitespace-delimited word count.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
