//! Inline styled spans
//!
//! A paragraph's text is segmented into [`StyledSpan`]s, each a contiguous
//! run of characters sharing one [`Emphasis`].

use serde::{Deserialize, Serialize};

/// Emphasis applied to a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Emphasis {
    /// No emphasis
    #[default]
    Plain,
    /// Bold text
    Bold,
    /// Italic text
    Italic,
    /// Bold and italic text
    BoldItalic,
    /// Monospace/code text
    Code,
}

impl Emphasis {
    /// Whether the span renders bold
    pub fn is_bold(self) -> bool {
        matches!(self, Emphasis::Bold | Emphasis::BoldItalic)
    }

    /// Whether the span renders italic
    pub fn is_italic(self) -> bool {
        matches!(self, Emphasis::Italic | Emphasis::BoldItalic)
    }
}

/// A run of text with one emphasis style
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    /// The text, without delimiters
    pub text: String,
    /// The emphasis of the whole run
    pub emphasis: Emphasis,
}

impl StyledSpan {
    /// Create a span
    pub fn new(text: impl Into<String>, emphasis: Emphasis) -> Self {
        Self {
            text: text.into(),
            emphasis,
        }
    }

    /// Create an unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Emphasis::Plain)
    }
}

/// Concatenate span texts, ignoring style
pub fn plain_text(spans: &[StyledSpan]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_italic_flags() {
        assert!(Emphasis::BoldItalic.is_bold());
        assert!(Emphasis::BoldItalic.is_italic());
        assert!(!Emphasis::Code.is_bold());
        assert!(!Emphasis::Bold.is_italic());
    }

    #[test]
    fn test_plain_text_concatenates() {
        let spans = vec![
            StyledSpan::new("Bold", Emphasis::Bold),
            StyledSpan::plain(" text"),
        ];
        assert_eq!(plain_text(&spans), "Bold text");
    }
}
