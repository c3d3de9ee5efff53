//! Converter - the main entry point for tree to text and text to markup
//! conversion.

use switchmode_core::{clear_blank_lines, encode, merge, MarkupOptions, TokenStream};

use crate::node::DomNode;
use crate::tokenize::tokenize;
use crate::{Result, SwitchmodeError};

/// Class marking an element whose content is normalized on its own
pub const DEFAULT_NORMALIZE_CLASS: &str = "normalize";

/// Bullet written in front of every list item
pub const DEFAULT_BULLET: &str = "* ";

/// Options for [`Converter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Line written for a horizontal rule
    pub rule: String,

    /// Prefix written in front of every list item
    pub bullet: String,

    /// Class name that marks a normalized region
    pub normalize_class: String,

    /// Options for the text to markup direction
    pub markup: MarkupOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            rule: "-".repeat(40),
            bullet: DEFAULT_BULLET.to_string(),
            normalize_class: DEFAULT_NORMALIZE_CLASS.to_string(),
            markup: MarkupOptions::default(),
        }
    }
}

impl ConvertOptions {
    /// Check that the options cannot produce broken output
    pub fn validate(&self) -> Result<()> {
        if !self.markup.has_valid_wrapper_tag() {
            return Err(SwitchmodeError::InvalidOption(format!(
                "wrapper tag {:?} is not a plain element name",
                self.markup.wrapper_tag
            )));
        }
        if self.rule.is_empty() || self.rule.contains('\n') {
            return Err(SwitchmodeError::InvalidOption(
                "rule must be a single non-empty line".to_string(),
            ));
        }
        if self.bullet.contains('\n') {
            return Err(SwitchmodeError::InvalidOption(
                "bullet must not contain a newline".to_string(),
            ));
        }
        Ok(())
    }
}

/// Converts document trees to plain text and plain text to markup
#[derive(Debug, Clone, Default)]
pub struct Converter {
    options: ConvertOptions,
}

impl Converter {
    /// Create a new Converter with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a Converter with custom options
    pub fn with_options(options: ConvertOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    /// Get the current options
    pub fn options(&self) -> &ConvertOptions {
        &self.options
    }

    /// Walk a tree into its token stream without merging it
    pub fn tokenize<N: DomNode>(&self, root: &N) -> TokenStream {
        tokenize(root, &self.options)
    }

    /// Convert a document tree to plain text.
    ///
    /// Lines holding only spaces or NBSPs are emptied and one leading and
    /// one trailing newline dropped; block quotes and normalize-class regions
    /// are normalized on their own. An absent root converts to the empty
    /// string.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn tree_to_text<N: DomNode>(&self, root: Option<&N>) -> String {
        let Some(root) = root else {
            return String::new();
        };

        let stream = self.tokenize(root);
        let text = clear_blank_lines(&merge(&stream));
        tracing::debug!(tokens = stream.len(), chars = text.len(), "converted tree to text");
        text
    }

    /// Convert plain text to markup, one wrapper element per line
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn text_to_markup(&self, text: &str) -> String {
        encode(text, &self.options.markup)
    }

    /// Parse an HTML string and convert it to plain text
    #[cfg(feature = "html")]
    pub fn html_to_text(&self, html: &str) -> String {
        if html.is_empty() {
            return String::new();
        }
        let root = crate::html::parse_html(html);
        self.tree_to_text(Some(&root))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use pretty_assertions::assert_eq;

    fn body(children: Vec<Node>) -> Node {
        children
            .into_iter()
            .fold(Node::document_fragment(), Node::with_child)
    }

    fn p(text: &str) -> Node {
        Node::element("p").with_text(text)
    }

    #[test]
    fn test_two_paragraphs() {
        let converter = Converter::new();
        let root = body(vec![p("Hello"), p("World")]);
        assert_eq!(converter.tree_to_text(Some(&root)), "Hello\n\nWorld");
    }

    #[test]
    fn test_absent_root() {
        let converter = Converter::new();
        assert_eq!(converter.tree_to_text::<Node>(None), "");
    }

    #[test]
    fn test_quoted_reply() {
        let converter = Converter::new();
        let quote = Node::element("blockquote")
            .with_child(p("a"))
            .with_child(p("b"));
        let root = body(vec![p("Reply"), quote, p("Signed")]);
        // a quote only opens a new line; the paragraph after it still gets
        // its blank line
        assert_eq!(
            converter.tree_to_text(Some(&root)),
            "Reply\n> a\n>\n> b\n\nSigned"
        );
    }

    #[test]
    fn test_line_break_runs_are_kept() {
        let converter = Converter::new();
        let root = body(vec![
            Node::element("div").with_text("a"),
            Node::element("br"),
            Node::element("br"),
            Node::element("br"),
            Node::element("div").with_text("b"),
        ]);
        assert_eq!(converter.tree_to_text(Some(&root)), "a\n\n\n\nb");
    }

    #[test]
    fn test_signature_line_keeps_nbsp() {
        let converter = Converter::new();
        let root = body(vec![
            Node::element("div").with_text("Thanks"),
            Node::element("div").with_text("--\u{a0}"),
            Node::element("div").with_text("Ada"),
        ]);
        assert_eq!(converter.tree_to_text(Some(&root)), "Thanks\n--\u{a0}\nAda");
    }

    #[test]
    fn test_space_only_lines_are_emptied() {
        let converter = Converter::new();
        let root = body(vec![
            Node::element("div").with_text("a"),
            Node::element("div").with_text(" \u{a0} "),
            Node::element("div").with_text("b"),
        ]);
        assert_eq!(converter.tree_to_text(Some(&root)), "a\n\nb");
    }

    #[test]
    fn test_empty_blockquote_leaves_blank_line() {
        let converter = Converter::new();
        let root = body(vec![Node::text("a"), Node::element("blockquote"), Node::text("b")]);
        assert_eq!(converter.tree_to_text(Some(&root)), "a\n\nb");
    }

    #[test]
    fn test_list_after_paragraph() {
        let converter = Converter::new();
        let list = Node::element("ul")
            .with_child(Node::element("li").with_text("one"))
            .with_child(Node::element("li").with_text("two"));
        let root = body(vec![p("Items:"), list]);
        assert_eq!(converter.tree_to_text(Some(&root)), "Items:\n\n* one\n* two");
    }

    #[test]
    fn test_divs_are_single_lines() {
        let converter = Converter::new();
        let root = body(vec![
            Node::element("div").with_text("a"),
            Node::element("div").with_text("b"),
        ]);
        assert_eq!(converter.tree_to_text(Some(&root)), "a\nb");
    }

    #[test]
    fn test_table() {
        let converter = Converter::new();
        let row = |a: &str, b: &str| {
            Node::element("tr")
                .with_child(Node::element("td").with_text(a))
                .with_child(Node::element("td").with_text(b))
        };
        let table = Node::element("table")
            .with_child(Node::element("tbody").with_child(row("1", "2")).with_child(row("3", "4")));
        assert_eq!(converter.tree_to_text(Some(&table)), "1 2\n3 4");
    }

    #[test]
    fn test_rule_between_lines() {
        let converter = Converter::new();
        let root = body(vec![Node::text("above"), Node::element("hr"), Node::text("below")]);
        assert_eq!(
            converter.tree_to_text(Some(&root)),
            format!("above\n{}\nbelow", "-".repeat(40))
        );
    }

    #[test]
    fn test_custom_options() {
        let options = ConvertOptions {
            rule: "***".to_string(),
            bullet: "- ".to_string(),
            markup: MarkupOptions::with_wrapper_tag("p"),
            ..Default::default()
        };
        let converter = Converter::with_options(options).unwrap();
        let root = body(vec![
            Node::element("li").with_text("x"),
            Node::element("hr"),
        ]);
        assert_eq!(converter.tree_to_text(Some(&root)), "- x\n***");
        assert_eq!(converter.text_to_markup("a\nb"), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_invalid_wrapper_tag() {
        let options = ConvertOptions {
            markup: MarkupOptions::with_wrapper_tag("div onclick"),
            ..Default::default()
        };
        assert!(matches!(
            Converter::with_options(options),
            Err(SwitchmodeError::InvalidOption(_))
        ));
    }

    #[test]
    fn test_invalid_rule() {
        let options = ConvertOptions {
            rule: String::new(),
            ..Default::default()
        };
        assert!(Converter::with_options(options).is_err());
    }

    #[test]
    fn test_text_to_markup() {
        let converter = Converter::new();
        assert_eq!(converter.text_to_markup("a\nb"), "<div>a</div><div>b</div>");
    }
}
