//! HTML parsing support.
//!
//! Parses markup strings into the [`Node`] tree read by the tokenizer. This
//! is the tree-construction step a host would otherwise perform itself.

use scraper::{ElementRef, Html, Node as ScraperNode};

use crate::node::Node;

/// Parse an HTML fragment into a Node tree.
///
/// The returned root is the fragment's `html` element, which the tokenizer
/// treats as a transparent container.
///
/// # Example
///
/// ```rust
/// use switchmode::{parse_html, Converter};
///
/// let node = parse_html("<p>Hello <em>World</em></p>");
///
/// let converter = Converter::new();
/// assert_eq!(converter.tree_to_text(Some(&node)), "Hello World");
/// ```
pub fn parse_html(html: &str) -> Node {
    let document = Html::parse_fragment(html);
    scraper_to_node(document.root_element())
}

/// Convert a scraper ElementRef to our Node structure
fn scraper_to_node(element: ElementRef) -> Node {
    let tag = element.value().name();

    let attrs: Vec<(&str, &str)> = element.value().attrs().collect();

    let mut node = if attrs.is_empty() {
        Node::element(tag)
    } else {
        Node::element_with_attrs(tag, attrs)
    };

    for child in element.children() {
        match child.value() {
            ScraperNode::Text(text) => {
                node.add_child(Node::text(&text.text));
            }
            ScraperNode::Comment(comment) => {
                node.add_child(Node::comment(&comment.comment));
            }
            ScraperNode::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    node.add_child(scraper_to_node(child_element));
                }
            }
            _ => {}
        }
    }

    node
}
