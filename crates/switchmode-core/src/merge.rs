//! Boundary merging
//!
//! Reduces a [`TokenStream`] to plain text. Adjacent boundaries are collapsed
//! so that boundary strength only ever grows along a run (inline may become
//! block, never the reverse) and no two block boundaries end up next to each
//! other without something in between.

use crate::token::{Boundary, Token, TokenStream};

/// Borrowed view of a token used while merging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Text(&'a str),
    Block,
    Inline,
}

impl<'a> From<&'a Token> for Piece<'a> {
    fn from(token: &'a Token) -> Self {
        match token {
            Token::Text(s) => Piece::Text(s),
            Token::Boundary(Boundary::Block) => Piece::Block,
            Token::Boundary(Boundary::Inline) => Piece::Inline,
        }
    }
}

/// Merge a token stream into a single string.
///
/// Every surviving block boundary renders as `\n`, every surviving inline
/// boundary as a single space and text verbatim.
pub fn merge(stream: &TokenStream) -> String {
    let collapsed = collapse_boundaries(stream.as_slice());
    let pieces = dedupe_blocks(collapsed);

    let capacity = pieces
        .iter()
        .map(|p| match p {
            Piece::Text(s) => s.len(),
            _ => 1,
        })
        .sum();
    let mut output = String::with_capacity(capacity);

    for piece in pieces {
        match piece {
            Piece::Text(s) => output.push_str(s),
            Piece::Block => output.push('\n'),
            Piece::Inline => output.push(' '),
        }
    }

    tracing::trace!(tokens = stream.len(), bytes = output.len(), "merged token stream");
    output
}

/// First pass: inline boundaries never stack and never follow a block
/// boundary; a block boundary right after an inline one takes its place.
fn collapse_boundaries(tokens: &[Token]) -> Vec<Piece<'_>> {
    let mut iter = tokens.iter().map(Piece::from);
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut out = Vec::with_capacity(tokens.len());
    out.push(first);

    for piece in iter {
        // `out` always holds at least the first piece
        let Some(last) = out.last_mut() else {
            break;
        };
        match (piece, *last) {
            (Piece::Inline, Piece::Inline | Piece::Block) => {}
            (Piece::Block, Piece::Inline) => *last = Piece::Block,
            _ => out.push(piece),
        }
    }

    out
}

/// Second pass: runs of block boundaries collapse to one.
fn dedupe_blocks(pieces: Vec<Piece<'_>>) -> Vec<Piece<'_>> {
    let mut out: Vec<Piece<'_>> = Vec::with_capacity(pieces.len());

    for piece in pieces {
        if piece == Piece::Block && out.last() == Some(&Piece::Block) {
            continue;
        }
        out.push(piece);
    }

    out
}
