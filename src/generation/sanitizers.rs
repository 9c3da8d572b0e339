//! Sanitizers for text copied from the document into generated comments

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("Invalid regex"));

/// Keep a comment from closing early
fn escape_comment_end(text: &str) -> String {
    text.replace("*/", "*\\/")
}

/// Lines of a block doc comment, trimmed at the end, with blank leading and
/// trailing lines removed
///
/// ```
/// use generate_front_api::generation::sanitizers::doc_comment_lines;
///
/// assert_eq!(doc_comment_lines("\nOrg name */\n\n"), vec!["Org name *\\/"]);
/// ```
pub fn doc_comment_lines(text: &str) -> Vec<String> {
    let lines: Vec<String> = text
        .lines()
        .map(|line| escape_comment_end(line.trim_end()))
        .collect();

    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].to_vec(),
        _ => Vec::new(),
    }
}

/// Collapse text onto one comment-safe line
pub fn inline_comment(text: &str) -> String {
    escape_comment_end(WHITESPACE.replace_all(text.trim(), " ").as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_comment_lines() {
        assert_eq!(doc_comment_lines("Org name"), vec!["Org name"]);
        assert_eq!(
            doc_comment_lines("First line  \nsecond line"),
            vec!["First line", "second line"]
        );
        assert!(doc_comment_lines("  \n \n").is_empty());
    }

    #[test]
    fn test_comment_end_is_escaped() {
        assert_eq!(doc_comment_lines("a */ b"), vec!["a *\\/ b"]);
        assert_eq!(inline_comment("a */ b"), "a *\\/ b");
    }

    #[test]
    fn test_inline_comment_collapses_whitespace() {
        assert_eq!(inline_comment("  Query\n   medical \t orgs "), "Query medical orgs");
        assert_eq!(inline_comment(""), "");
    }
}
