//! # switchmode
//!
//! Convert rich document trees to plain text and plain text back
//! to markup, for editors that let users drop formatting and pick it up
//! again.
//!
//! ## Design
//!
//! The tree is read through the narrow [`DomNode`] trait, so any parser can
//! feed the converter. A walk produces a token stream of text runs and
//! boundary markers; the merger in `switchmode-core` resolves the markers to
//! newlines and spaces. Block quotes and regions marked with the normalize
//! class go through the full whitespace normalizer; the whole text only has
//! its space-only lines cleared.
//!
//! Layout rules:
//!
//! - paragraph-like blocks are separated by exactly one blank line
//! - block quotes are prefixed with `>` per nesting level
//! - table cells on a row are separated by single spaces
//!
//! The reverse direction escapes the text and wraps every line in its own
//! block element.
//!
//! ## Example (Node-based)
//!
//! ```rust
//! use switchmode::{Converter, Node};
//!
//! let converter = Converter::new();
//!
//! let root = Node::document_fragment()
//!     .with_child(Node::element("p").with_text("Hello"))
//!     .with_child(Node::element("p").with_text("World"));
//!
//! assert_eq!(converter.tree_to_text(Some(&root)), "Hello\n\nWorld");
//! assert_eq!(converter.text_to_markup("a\nb"), "<div>a</div><div>b</div>");
//! ```
//!
//! ## Example (HTML string)
//!
//! ```rust
//! use switchmode::Converter;
//!
//! let converter = Converter::new();
//! let text = converter.html_to_text("<blockquote>a<br>b</blockquote>");
//! assert_eq!(text, "> a\n> b");
//! ```

mod coalesce;
#[cfg(feature = "html")]
pub mod html;
pub mod node;
mod service;
mod switch;
mod tags;
mod tokenize;

pub use coalesce::{coalesce, Cancel, Debounce, DebounceState, Trigger};
#[cfg(feature = "html")]
pub use html::parse_html;
pub use node::{DomNode, Node, NodeKind, NodeType};
pub use service::{ConvertOptions, Converter, DEFAULT_BULLET, DEFAULT_NORMALIZE_CLASS};
pub use switch::Mode;
pub use switchmode_core::{
    encode, escape, merge, normalize, quote, Boundary, MarkupOptions, Token, TokenStream,
};
pub use tags::ElementClass;
pub use tokenize::{tokenize, Tokenizer};

/// Error type for switchmode operations
#[derive(Debug, thiserror::Error)]
pub enum SwitchmodeError {
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Coalescer driver is no longer running")]
    CoalescerClosed,
}

pub type Result<T> = std::result::Result<T, SwitchmodeError>;

/// Convert a document tree to plain text with default options
pub fn tree_to_text<N: DomNode>(root: Option<&N>) -> String {
    Converter::new().tree_to_text(root)
}

/// Convert plain text to markup.
///
/// `wrapper_tag` defaults to `div`. A tag that is not a plain element name
/// is ignored in favour of the default.
pub fn text_to_markup(text: &str, wrapper_tag: Option<&str>) -> String {
    let options = match wrapper_tag {
        Some(tag) if switchmode_core::is_valid_tag_name(tag) => MarkupOptions::with_wrapper_tag(tag),
        Some(tag) => {
            tracing::warn!(tag, "ignoring invalid wrapper tag");
            MarkupOptions::default()
        }
        None => MarkupOptions::default(),
    };
    encode(text, &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_functions() {
        let root = Node::element("p").with_text("x");
        assert_eq!(tree_to_text(Some(&root)), "x");
        assert_eq!(tree_to_text::<Node>(None), "");
        assert_eq!(text_to_markup("a\nb", None), "<div>a</div><div>b</div>");
        assert_eq!(text_to_markup("a", Some("p")), "<p>a</p>");
        assert_eq!(text_to_markup("a", Some("p><script")), "<div>a</div>");
    }

    #[test]
    fn test_error_display() {
        let err = SwitchmodeError::InvalidOption("bad".to_string());
        assert_eq!(err.to_string(), "Invalid option: bad");
    }
}
