//! Closed tag vocabulary understood by the tokenizer.

/// How the tokenizer treats an element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementClass {
    /// `blockquote`: content is merged and prefixed with quotation markers
    BlockQuote,
    /// Element carrying the normalize class: content is merged and normalized
    Normalize,
    /// Headings, `p`, `pre`, lists, definition lists and tables: separated
    /// from preceding content by a blank line
    Paragraph,
    /// Generic block containers: own line, no blank line
    Container,
    /// `br`
    LineBreak,
    /// `hr`
    Rule,
    /// `li`
    ListItem,
    /// `td` / `th`
    Cell,
    /// Anything else: children only
    Transparent,
}

/// Paragraph-like elements
pub const PARAGRAPH_ELEMENTS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", "pre", "p", "ol", "ul", "dl", "table",
];

/// Generic block containers
pub const CONTAINER_ELEMENTS: &[&str] = &["div", "address", "fieldset", "form", "dt", "dd", "tr"];

/// Table cells
pub const CELL_ELEMENTS: &[&str] = &["td", "th"];

fn is_one_of(tag: &str, names: &[&str]) -> bool {
    names.iter().any(|name| tag.eq_ignore_ascii_case(name))
}

impl ElementClass {
    /// Classify a tag name alone. Never yields [`ElementClass::Normalize`],
    /// which depends on the element's classes.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("blockquote") {
            ElementClass::BlockQuote
        } else if is_one_of(tag, PARAGRAPH_ELEMENTS) {
            ElementClass::Paragraph
        } else if is_one_of(tag, CONTAINER_ELEMENTS) {
            ElementClass::Container
        } else if tag.eq_ignore_ascii_case("br") {
            ElementClass::LineBreak
        } else if tag.eq_ignore_ascii_case("hr") {
            ElementClass::Rule
        } else if tag.eq_ignore_ascii_case("li") {
            ElementClass::ListItem
        } else if is_one_of(tag, CELL_ELEMENTS) {
            ElementClass::Cell
        } else {
            ElementClass::Transparent
        }
    }

    /// Classify an element. A block quote stays a block quote even when it
    /// carries the normalize class.
    pub fn classify(tag: &str, normalize: bool) -> Self {
        match Self::from_tag(tag) {
            ElementClass::BlockQuote => ElementClass::BlockQuote,
            _ if normalize => ElementClass::Normalize,
            class => class,
        }
    }
}
