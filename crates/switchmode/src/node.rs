//! Document tree nodes.
//!
//! The tokenizer only ever reads a tree through the narrow [`DomNode`] trait,
//! so any tree representation can be converted without copying it first.
//! [`Node`] is the owned, CDP-style implementation used by [`parse_html`]
//! and by callers building trees by hand.
//!
//! [`parse_html`]: crate::parse_html

/// Node types matching DOM nodeType values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Element node (nodeType = 1)
    Element = 1,
    /// Text node (nodeType = 3)
    Text = 3,
    /// Comment node (nodeType = 8)
    Comment = 8,
    /// Document node (nodeType = 9)
    Document = 9,
    /// Document fragment node (nodeType = 11)
    DocumentFragment = 11,
}

/// What the tokenizer sees of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Element with a tag name, classes and children
    Element,
    /// Character data
    Text,
    /// Document or fragment root: children only, no tag of its own
    Container,
    /// Comments and anything else that carries no content
    Ignored,
}

/// Read-only view of a document tree node.
pub trait DomNode {
    fn kind(&self) -> NodeKind;

    /// Tag name as stored by the tree; compared ASCII case-insensitively
    fn tag_name(&self) -> &str;

    fn has_class(&self, name: &str) -> bool;

    /// Character data for text nodes
    fn text(&self) -> Option<&str>;

    fn children(&self) -> impl Iterator<Item = &Self>;
}

/// A DOM node following the CDP DOM.Node structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// Node type (1 = Element, 3 = Text, etc.)
    pub node_type: NodeType,

    /// Node name (uppercase for elements, e.g., "DIV", "#text" for text nodes)
    pub node_name: String,

    /// Text content for text nodes
    pub node_value: Option<String>,

    /// Attributes as flat array [name, value, name, value, ...] (CDP style)
    /// Only present for element nodes
    pub attributes: Option<Vec<String>>,

    /// Child nodes
    pub children: Option<Vec<Node>>,
}

impl Node {
    /// Create a new element node
    pub fn element(tag_name: &str) -> Self {
        Self {
            node_type: NodeType::Element,
            node_name: tag_name.to_uppercase(),
            node_value: None,
            attributes: Some(Vec::new()),
            children: Some(Vec::new()),
        }
    }

    /// Create a new element node with attributes
    pub fn element_with_attrs(tag_name: &str, attrs: Vec<(&str, &str)>) -> Self {
        let flat_attrs: Vec<String> = attrs
            .into_iter()
            .flat_map(|(k, v)| [k.to_string(), v.to_string()])
            .collect();

        Self {
            attributes: Some(flat_attrs),
            ..Self::element(tag_name)
        }
    }

    /// Create a new text node
    pub fn text(content: &str) -> Self {
        Self {
            node_type: NodeType::Text,
            node_name: "#text".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a comment node
    pub fn comment(content: &str) -> Self {
        Self {
            node_type: NodeType::Comment,
            node_name: "#comment".to_string(),
            node_value: Some(content.to_string()),
            attributes: None,
            children: None,
        }
    }

    /// Create a document fragment node
    pub fn document_fragment() -> Self {
        Self {
            node_type: NodeType::DocumentFragment,
            node_name: "#document-fragment".to_string(),
            node_value: None,
            attributes: None,
            children: Some(Vec::new()),
        }
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Get an attribute value by name
    pub fn attr(&self, name: &str) -> Option<&str> {
        let attrs = self.attributes.as_ref()?;

        // CDP stores attributes as flat array: [name, value, name, value, ...]
        attrs
            .chunks_exact(2)
            .find(|pair| pair[0].eq_ignore_ascii_case(name))
            .map(|pair| pair[1].as_str())
    }

    /// Class names from the `class` attribute, in order
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").into_iter().flat_map(str::split_ascii_whitespace)
    }

    /// Get all child nodes
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter().flat_map(|c| c.iter())
    }

    /// Add a child node
    pub fn add_child(&mut self, child: Node) {
        if let Some(ref mut children) = self.children {
            children.push(child);
        } else {
            self.children = Some(vec![child]);
        }
    }

    /// Builder form of [`add_child`](Self::add_child)
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Builder form adding a text child
    pub fn with_text(self, content: &str) -> Self {
        self.with_child(Node::text(content))
    }
}

impl DomNode for Node {
    fn kind(&self) -> NodeKind {
        match self.node_type {
            NodeType::Element => NodeKind::Element,
            NodeType::Text => NodeKind::Text,
            NodeType::Document | NodeType::DocumentFragment => NodeKind::Container,
            NodeType::Comment => NodeKind::Ignored,
        }
    }

    fn tag_name(&self) -> &str {
        &self.node_name
    }

    fn has_class(&self, name: &str) -> bool {
        self.classes().any(|class| class == name)
    }

    fn text(&self) -> Option<&str> {
        self.node_value.as_deref()
    }

    fn children(&self) -> impl Iterator<Item = &Self> {
        Node::children(self)
    }
}
