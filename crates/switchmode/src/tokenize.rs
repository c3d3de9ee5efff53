//! Walk a document tree into a token stream
//!
//! The walk is depth-first and pre-order. Structure is recorded as boundary
//! markers next to the text, and only the merger decides how many of them
//! survive.

use once_cell::sync::Lazy;
use regex::Regex;
use switchmode_core::{merge, normalize, quote, Boundary, TokenStream};

use crate::node::{DomNode, NodeKind};
use crate::service::ConvertOptions;
use crate::tags::ElementClass;

static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \n\r\t]+").expect("valid regex"));

/// Tokenize `root` and its subtree with the given options.
pub fn tokenize<N: DomNode>(root: &N, options: &ConvertOptions) -> TokenStream {
    Tokenizer::new(options).tokenize(root)
}

/// State of a single tree walk.
///
/// A tokenizer is consumed by [`tokenize`](Tokenizer::tokenize), so the
/// "text inserted" flag can never carry over from one conversion to the next.
pub struct Tokenizer<'o> {
    options: &'o ConvertOptions,
    /// Set once the first paragraph-like element has opened without a
    /// leading blank line. Shared by the sub-streams of quoted and
    /// normalized regions within the same walk.
    text_inserted: bool,
}

impl<'o> Tokenizer<'o> {
    pub fn new(options: &'o ConvertOptions) -> Self {
        Self {
            options,
            text_inserted: false,
        }
    }

    pub fn tokenize<N: DomNode>(mut self, root: &N) -> TokenStream {
        let mut stream = TokenStream::new();
        self.convert_node(root, &mut stream);
        stream
    }

    fn convert_node<N: DomNode>(&mut self, node: &N, out: &mut TokenStream) {
        match node.kind() {
            NodeKind::Text => {
                let data = node.text().unwrap_or("");
                out.push(WHITESPACE_RUNS.replace_all(data, " ").into_owned());
            }
            NodeKind::Element => self.convert_element(node, out),
            NodeKind::Container => self.convert_children(node, out),
            NodeKind::Ignored => {}
        }
    }

    fn convert_children<N: DomNode>(&mut self, node: &N, out: &mut TokenStream) {
        for child in node.children() {
            self.convert_node(child, out);
        }
    }

    /// Convert the children of `node` into a fresh stream and merge it
    fn merged_children<N: DomNode>(&mut self, node: &N) -> String {
        let mut inner = TokenStream::new();
        self.convert_children(node, &mut inner);
        merge(&inner)
    }

    fn convert_element<N: DomNode>(&mut self, node: &N, out: &mut TokenStream) {
        let tag = node.tag_name();
        let class = ElementClass::classify(tag, node.has_class(&self.options.normalize_class));

        match class {
            ElementClass::BlockQuote => {
                out.push(Boundary::Block);
                let quoted = quote(&self.merged_children(node));
                out.push(Boundary::Block);
                out.push(quoted);
                out.push(Boundary::Block);
                out.push(Boundary::Block);
            }

            ElementClass::Normalize => {
                let normalized = normalize(&self.merged_children(node));
                out.push(normalized);
                out.push(Boundary::Block);
            }

            ElementClass::Paragraph => {
                if self.text_inserted || out.contains_text() {
                    out.push_spacer();
                } else {
                    out.push(Boundary::Block);
                    self.text_inserted = true;
                }
                self.convert_children(node, out);
                out.push(Boundary::Block);
            }

            ElementClass::Container => {
                out.push(Boundary::Block);
                self.convert_children(node, out);
                out.push(Boundary::Block);
            }

            ElementClass::LineBreak => {
                out.push("");
                out.push(Boundary::Block);
            }

            ElementClass::Rule => {
                out.push(Boundary::Block);
                out.push(self.options.rule.as_str());
                out.push(Boundary::Block);
            }

            ElementClass::ListItem => {
                out.push(Boundary::Block);
                out.push(self.options.bullet.as_str());
                self.convert_children(node, out);
                out.push(Boundary::Block);
            }

            ElementClass::Cell => {
                out.push(Boundary::Inline);
                self.convert_children(node, out);
                out.push(Boundary::Inline);
            }

            ElementClass::Transparent => {
                tracing::trace!(tag, "transparent element");
                self.convert_children(node, out);
            }
        }
    }
}
