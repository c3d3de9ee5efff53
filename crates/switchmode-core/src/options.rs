//! Configuration options for the plain-text transforms

/// Tag wrapping each encoded line unless configured otherwise
pub const DEFAULT_WRAPPER_TAG: &str = "div";

/// Options for encoding plain text as markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupOptions {
    /// Element name each line is enclosed in
    pub wrapper_tag: String,
}

impl MarkupOptions {
    pub fn with_wrapper_tag(tag: impl Into<String>) -> Self {
        Self {
            wrapper_tag: tag.into(),
        }
    }

    /// Whether the wrapper tag is a plain element name (ASCII letters and
    /// digits, starting with a letter)
    pub fn has_valid_wrapper_tag(&self) -> bool {
        is_valid_tag_name(&self.wrapper_tag)
    }
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Self {
            wrapper_tag: DEFAULT_WRAPPER_TAG.to_string(),
        }
    }
}

pub fn is_valid_tag_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic()) && chars.all(|c| c.is_ascii_alphanumeric())
}
