//! Data preparation around an editor mode switch.
//!
//! The host editor swaps its content between a rich (markup) and a plain
//! (text) representation. These helpers produce the data for the target
//! mode; everything else about the switch stays with the host.

#[cfg(feature = "html")]
use once_cell::sync::Lazy;
#[cfg(feature = "html")]
use regex::Regex;

use crate::service::Converter;

/// Images count as content when deciding whether a switch loses anything
#[cfg(feature = "html")]
static IMAGE_TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<img.*/>").expect("valid regex"));

/// Editing mode of the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Formatted content edited as markup
    #[default]
    Rich,
    /// Unformatted plain text
    Plain,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Rich => Mode::Plain,
            Mode::Plain => Mode::Rich,
        }
    }
}

/// Whitespace trimmed from the end of text handed to plain mode
#[cfg(feature = "html")]
fn is_trailing_space(c: char) -> bool {
    matches!(
        c,
        '\u{9}'..='\u{d}'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{180e}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

impl Converter {
    /// Markup for rich mode from plain text.
    ///
    /// Every pair of spaces becomes a non-breaking space followed by a space
    /// so that indentation and aligned text keep their width.
    pub fn to_rich(&self, text: &str) -> String {
        let text = text.replace("  ", "\u{a0} ");
        self.text_to_markup(&text)
    }

    /// Plain text for plain mode from markup
    #[cfg(feature = "html")]
    pub fn to_plain(&self, html: &str) -> String {
        let mut text = self.html_to_text(html);
        let end = text.trim_end_matches(is_trailing_space).len();
        text.truncate(end);
        text
    }

    /// Whether switching this markup to plain mode would drop visible
    /// content, so the host should ask before switching
    #[cfg(feature = "html")]
    pub fn needs_confirmation(&self, html: &str) -> bool {
        let html = IMAGE_TAGS.replace_all(html, "img");
        self.html_to_text(&html)
            .chars()
            .any(|c| !c.is_whitespace() && c != '\u{feff}')
    }

    /// Data for `target` converted from the data of the other mode
    #[cfg(feature = "html")]
    pub fn switch(&self, target: Mode, data: &str) -> String {
        tracing::debug!(?target, "switching mode");
        match target {
            Mode::Plain => self.to_plain(data),
            Mode::Rich => self.to_rich(data),
        }
    }
}
