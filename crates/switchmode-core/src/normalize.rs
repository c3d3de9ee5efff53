//! Whitespace normalization
//!
//! [`normalize`] is the full rule set for normalized regions and quotes;
//! [`clear_blank_lines`] is the lighter pass applied to a whole converted tree.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").expect("valid regex"));

static LINE_EDGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^ +|[ \x{A0}]+$").expect("valid regex"));

static NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \x{A0}]+$").expect("valid regex"));

static TEXT_EDGES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \n\r\t]+|[ \x{A0}\n\r\t]+$").expect("valid regex"));

/// Normalize whitespace in plain text.
///
/// Applied in order:
///
/// 1. runs of spaces collapse to one space
/// 2. leading spaces and trailing space/NBSP runs are stripped on every line
/// 3. three or more consecutive newlines collapse to a single blank line
/// 4. leading and trailing whitespace of the whole text is stripped
///
/// The result never contains a line made only of spaces, never more than one
/// blank line in a row and never starts or ends with a blank line.
/// `normalize(normalize(x)) == normalize(x)` holds for every input.
pub fn normalize(text: &str) -> String {
    let text = SPACE_RUNS.replace_all(text, " ");
    let text = LINE_EDGES.replace_all(&text, "");
    let text = NEWLINE_RUNS.replace_all(&text, "\n\n");
    let text = TEXT_EDGES.replace_all(&text, "");
    text.into_owned()
}

/// Final pass over merged tree text.
///
/// Lines made only of spaces and NBSPs become empty, then one leading and one
/// trailing newline are dropped. Other whitespace, including blank-line runs
/// and a trailing NBSP after content, is kept.
pub fn clear_blank_lines(text: &str) -> String {
    let cleared = BLANK_LINES.replace_all(text, "");
    let trimmed = cleared.strip_prefix('\n').unwrap_or(&*cleared);
    let trimmed = trimmed.strip_suffix('\n').unwrap_or(trimmed);
    trimmed.to_string()
}
