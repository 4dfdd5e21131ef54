//! Comment and logging-call stripping with copyright header preservation.
//!
//! Everything here is regex-driven and best-effort: nested comments, comment
//! markers inside string literals and unbalanced delimiters are not handled
//! specially and produce whatever the patterns match.

use crate::rules::Rules;
use crate::transform::Transform;

use regex::Regex;
use std::sync::LazyLock;

/// Block comment anchored at the start of the text, leading whitespace allowed
static HEADER_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A\s*/\*.*?\*/").unwrap());

/// Shortest `/* ... */` span, across lines
static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// `//` to end of line unless preceded by `:`, a quote or `/`.
/// The preceding character is captured and written back.
static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)(^|[^:"'/])//.*"#).unwrap());

/// Three or more newlines separated only by whitespace
static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n+").unwrap());

/// Check for copyright/license wording (case-insensitive)
fn mentions_license(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains("copyright") || lower.contains("license")
}

/// Split content into an optional protected header and the remaining text.
///
/// A leading block comment is tried first; failing that, the leading run of
/// blank and `//` lines. Either only counts when it mentions copyright or
/// license.
pub fn split_header(content: &str) -> (Option<&str>, &str) {
    if let Some(block) = HEADER_BLOCK.find(content) {
        if mentions_license(block.as_str()) {
            return (Some(block.as_str()), &content[block.end()..]);
        }
    }

    let mut header_end = 0;
    let mut pos = 0;
    for line in content.split('\n') {
        let trimmed = line.trim();
        if !(trimmed.is_empty() || trimmed.starts_with("//")) {
            break;
        }
        header_end = pos + line.len();
        pos += line.len() + 1;
    }

    let lines = &content[..header_end];
    if mentions_license(lines) {
        (Some(lines), &content[header_end..])
    } else {
        (None, content)
    }
}

/// Strips comments, logging calls and blank-line runs from source text
pub struct Cleaner {
    extensions: Vec<String>,
    log_patterns: Vec<Regex>,
}

impl Cleaner {
    pub fn new(rules: &Rules) -> Self {
        Cleaner {
            extensions: rules.clean_extensions(),
            log_patterns: rules.log_patterns().cloned().collect(),
        }
    }

    /// Clean one file's text. The header, if any, is reattached untouched
    /// and the result always ends with exactly one newline.
    pub fn clean(&self, content: &str) -> String {
        let (header, rest) = split_header(content);

        let body = BLOCK_COMMENT.replace_all(rest, "");
        let body = LINE_COMMENT.replace_all(&body, "${1}");

        // Every platform's patterns run on every file
        let mut body = body.into_owned();
        for pattern in &self.log_patterns {
            body = pattern.replace_all(&body, "").into_owned();
        }

        let body = BLANK_RUN.replace_all(&body, "\n\n");
        let body = body.trim();

        let result = match header {
            Some(header) => format!("{}\n\n{}", header.trim(), body),
            None => body.to_string(),
        };
        format!("{}\n", result.trim())
    }
}

impl Transform for Cleaner {
    fn name(&self) -> &str {
        "clean"
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn apply(&self, content: &str) -> String {
        self.clean(content)
    }
}
