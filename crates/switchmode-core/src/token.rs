//! Token stream
//!
//! The intermediate representation between a tree walk and the final plain
//! text. Text runs are interleaved with structural boundary markers which are
//! only resolved to whitespace by [`merge`](crate::merge()).

/// Strength of a structural boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Line-level boundary, renders as a newline
    Block,
    /// Cell-level boundary, renders as a space
    Inline,
}

/// A single entry of a [`TokenStream`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal run of characters. An empty run is still meaningful: it keeps
    /// two block boundaries apart so that they render as a blank line.
    Text(String),

    /// Structural marker carrying no text
    Boundary(Boundary),
}

impl Token {
    pub fn text(s: impl Into<String>) -> Self {
        Token::Text(s.into())
    }

    /// Whether this token carries at least one character of text
    pub fn has_text(&self) -> bool {
        matches!(self, Token::Text(s) if !s.is_empty())
    }
}

impl From<Boundary> for Token {
    fn from(boundary: Boundary) -> Self {
        Token::Boundary(boundary)
    }
}

impl From<&str> for Token {
    fn from(s: &str) -> Self {
        Token::Text(s.to_string())
    }
}

impl From<String> for Token {
    fn from(s: String) -> Self {
        Token::Text(s)
    }
}

/// Ordered, append-only sequence of tokens built during one tokenization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream {
    tokens: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a single token
    pub fn push(&mut self, token: impl Into<Token>) {
        self.tokens.push(token.into());
    }

    /// Append an empty paragraph spacer: `Block, "", Block`
    pub fn push_spacer(&mut self) {
        self.tokens.push(Token::Boundary(Boundary::Block));
        self.tokens.push(Token::Text(String::new()));
        self.tokens.push(Token::Boundary(Boundary::Block));
    }

    /// Whether any token holds non-empty text
    pub fn contains_text(&self) -> bool {
        self.tokens.iter().any(Token::has_text)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_vec(self) -> Vec<Token> {
        self.tokens
    }
}

impl Extend<Token> for TokenStream {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TokenStream {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl IntoIterator for TokenStream {
    type Item = Token;
    type IntoIter = std::vec::IntoIter<Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.into_iter()
    }
}
