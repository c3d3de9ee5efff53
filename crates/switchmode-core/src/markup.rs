//! Plain text to markup encoding

use crate::escape::escape;
use crate::options::MarkupOptions;

/// Marker starting a signature separator line (`-- `)
pub const SIGNATURE_MARKER: &str = "--";

/// Encoded form of a signature separator line. The blank after the marker
/// is written as an entity so that markup whitespace handling cannot drop it.
const SIGNATURE_LINE: &str = "--&nbsp;";

/// Encode plain text as markup, one wrapper element per line.
///
/// ```rust
/// use switchmode_core::{encode, MarkupOptions};
///
/// let markup = encode("a\nb", &MarkupOptions::default());
/// assert_eq!(markup, "<div>a</div><div>b</div>");
/// ```
pub fn encode(text: &str, options: &MarkupOptions) -> String {
    let tag = options.wrapper_tag.as_str();
    let escaped = escape(text);

    // `<tag>` + `</tag>` around each line
    let per_line = tag.len() * 2 + 5;
    let lines = escaped.matches('\n').count() + 1;
    let mut output = String::with_capacity(escaped.len() + per_line * lines);

    for line in escaped.split('\n') {
        output.push('<');
        output.push_str(tag);
        output.push('>');
        if is_signature_line(line) {
            output.push_str(SIGNATURE_LINE);
        } else {
            output.push_str(line);
        }
        output.push_str("</");
        output.push_str(tag);
        output.push('>');
    }

    output
}

/// A line made of the signature marker and exactly one space or NBSP
fn is_signature_line(line: &str) -> bool {
    matches!(line.strip_prefix(SIGNATURE_MARKER), Some(" " | "\u{a0}"))
}
