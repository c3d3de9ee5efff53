//! switchmode-core - token stream merging and plain-text transforms
//!
//! This crate holds the DOM-independent half of switchmode: the token stream
//! produced by a tree walk, the boundary merger that turns it into text, and
//! the string transforms used on both sides of a conversion. It is used by
//! `switchmode`, which adds the document tree and the tokenizer.
//!
//! # Architecture
//!
//! ```text
//! Document Tree ──tokenize──▶ ┌──────────────┐
//!                             │ Token Stream │ ──merge──▶ plain text ──clear_blank_lines──▶ text
//!                             └──────────────┘
//!
//! plain text ──escape──▶ lines ──encode──▶ <div>…</div><div>…</div>
//! ```
//!
//! # Example
//!
//! ```rust
//! use switchmode_core::{merge, quote, Boundary, TokenStream};
//!
//! let mut stream = TokenStream::new();
//! stream.push(Boundary::Block);
//! stream.push("Hello");
//! stream.push(Boundary::Block);
//! stream.push(Boundary::Block);
//! stream.push("World");
//!
//! assert_eq!(merge(&stream), "\nHello\nWorld");
//! assert_eq!(quote("Hello\nWorld"), "> Hello\n> World");
//! ```

mod escape;
mod markup;
mod merge;
mod normalize;
mod options;
mod quote;
mod token;

pub use escape::{escape, has_unsafe_chars, MARKUP_ESCAPES};
pub use markup::{encode, SIGNATURE_MARKER};
pub use merge::merge;
pub use normalize::{clear_blank_lines, normalize};
pub use options::{is_valid_tag_name, MarkupOptions, DEFAULT_WRAPPER_TAG};
pub use quote::{quote, QUOTATION_MARKER};
pub use token::{Boundary, Token, TokenStream};
