//! Block-quote formatting

use crate::normalize::normalize;

/// Quotation marker prefixed to every quoted line
pub const QUOTATION_MARKER: char = '>';

/// Prefix every line of `text` with a quotation marker.
///
/// The text is normalized first. Lines that already start with the marker
/// gain one more marker directly in front (`> a` becomes `>> a`), other
/// non-empty lines gain the marker and a space, and empty lines become the
/// bare marker. Quoting an already quoted block therefore adds exactly one
/// nesting level.
///
/// Text that is empty after normalization stays empty.
pub fn quote(text: &str) -> String {
    let text = normalize(text);
    if text.is_empty() {
        return text;
    }

    let mut output = String::with_capacity(text.len() + 16);

    for (i, line) in text.split('\n').enumerate() {
        if i > 0 {
            output.push('\n');
        }
        output.push(QUOTATION_MARKER);
        if line.is_empty() {
            continue;
        }
        if !line.starts_with(QUOTATION_MARKER) {
            output.push(' ');
        }
        output.push_str(line);
    }

    output
}
