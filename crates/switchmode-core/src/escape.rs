//! Markup escaping

use std::borrow::Cow;

/// Characters that must not appear unescaped in markup, with their
/// replacements.
pub const MARKUP_ESCAPES: [(char, &str); 6] = [
    ('&', "&amp;"),
    ('<', "&lt;"),
    ('>', "&gt;"),
    ('"', "&quot;"),
    ('\'', "&#39;"),
    ('`', "&#96;"),
];

fn replacement(c: char) -> Option<&'static str> {
    MARKUP_ESCAPES
        .iter()
        .find(|(unsafe_char, _)| *unsafe_char == c)
        .map(|(_, entity)| *entity)
}

/// Whether `text` holds at least one character from [`MARKUP_ESCAPES`]
pub fn has_unsafe_chars(text: &str) -> bool {
    text.chars().any(|c| replacement(c).is_some())
}

/// Escape markup-unsafe characters.
///
/// Text without any unsafe character is returned borrowed and unscanned
/// beyond the initial check.
pub fn escape(text: &str) -> Cow<'_, str> {
    if !has_unsafe_chars(text) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        match replacement(c) {
            Some(entity) => result.push_str(entity),
            None => result.push(c),
        }
    }
    Cow::Owned(result)
}
