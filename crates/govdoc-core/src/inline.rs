//! Inline formatting
//!
//! Segments one block's text into [`StyledSpan`]s by emphasis delimiters.
//!
//! The formatter is a left-to-right tokenizer over an ordered rule list. At
//! each position the rules are tried in order and the first one whose
//! delimiter both opens here and closes later on the same line wins. Because
//! `*` is a prefix of `**` and `**` a prefix of `***`, the longer delimiters
//! must be listed first.
//!
//! A backslash before `*`, a backtick or another backslash makes that
//! character literal, both outside and inside a span.
//!
//! # Example
//!
//! ```
//! use govdoc_ast::Emphasis;
//! use govdoc_core::format_inline;
//!
//! let spans = format_inline("**Bold** and `code`");
//! assert_eq!(spans.len(), 3);
//! assert_eq!(spans[0].emphasis, Emphasis::Bold);
//! assert_eq!(spans[2].text, "code");
//! ```

use govdoc_ast::{Emphasis, StyledSpan};

/// Escape character for literal delimiters
pub(crate) const ESCAPE: char = '\\';

pub(crate) fn is_escapable(ch: char) -> bool {
    matches!(ch, ESCAPE | '*' | '`')
}

/// A delimiter pair and the emphasis it applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmphasisRule {
    /// Opening and closing delimiter
    pub delimiter: &'static str,
    /// Emphasis applied to the enclosed text
    pub emphasis: Emphasis,
}

/// Default rules, most specific first
pub const EMPHASIS_RULES: &[EmphasisRule] = &[
    EmphasisRule {
        delimiter: "***",
        emphasis: Emphasis::BoldItalic,
    },
    EmphasisRule {
        delimiter: "**",
        emphasis: Emphasis::Bold,
    },
    EmphasisRule {
        delimiter: "*",
        emphasis: Emphasis::Italic,
    },
    EmphasisRule {
        delimiter: "`",
        emphasis: Emphasis::Code,
    },
];

/// Longest-match emphasis tokenizer
#[derive(Debug, Clone)]
pub struct InlineFormatter {
    rules: &'static [EmphasisRule],
}

impl Default for InlineFormatter {
    fn default() -> Self {
        Self::new(EMPHASIS_RULES)
    }
}

impl InlineFormatter {
    /// Create a formatter with an explicit rule order
    pub fn new(rules: &'static [EmphasisRule]) -> Self {
        Self { rules }
    }

    /// Split `text` into styled spans
    ///
    /// Concatenating the returned span texts yields `text` with the matched
    /// delimiters and escape backslashes removed. Unmatched delimiters stay
    /// in the output as literal characters of a plain span.
    pub fn format(&self, text: &str) -> Vec<StyledSpan> {
        let mut spans = Vec::new();
        let mut literal = String::new();
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            if let Some(escaped) = escaped_at(&text[pos..]) {
                literal.push(escaped);
                pos += ESCAPE.len_utf8() + escaped.len_utf8();
                continue;
            }

            if let Some((rule, raw)) = self.match_at(&text[pos..]) {
                if !literal.is_empty() {
                    spans.push(StyledSpan::plain(std::mem::take(&mut literal)));
                }
                spans.push(StyledSpan::new(unescape(raw), rule.emphasis));
                pos += raw.len() + 2 * rule.delimiter.len();
                continue;
            }

            literal.push(ch);
            pos += ch.len_utf8();
        }

        if !literal.is_empty() {
            spans.push(StyledSpan::plain(literal));
        }

        spans
    }

    /// Try every rule at the start of `rest`, returning the winning rule and
    /// the enclosed content, still escaped
    fn match_at<'t>(&self, rest: &'t str) -> Option<(&EmphasisRule, &'t str)> {
        self.rules.iter().find_map(|rule| {
            let body = rest.strip_prefix(rule.delimiter)?;
            let close = closing_delimiter(body, rule.delimiter)?;
            let content = &body[..close];
            if content.contains('\n') {
                return None;
            }
            Some((rule, content))
        })
    }
}

/// The literal character of an escape sequence at the start of `rest`
fn escaped_at(rest: &str) -> Option<char> {
    let mut chars = rest.chars();
    if chars.next()? != ESCAPE {
        return None;
    }
    chars.next().filter(|&next| is_escapable(next))
}

/// Offset of the first unescaped `delimiter` after at least one character
fn closing_delimiter(body: &str, delimiter: &str) -> Option<usize> {
    let mut idx = 0;
    while let Some(ch) = body[idx..].chars().next() {
        if idx > 0 && body[idx..].starts_with(delimiter) {
            return Some(idx);
        }
        idx += match escaped_at(&body[idx..]) {
            Some(escaped) => ESCAPE.len_utf8() + escaped.len_utf8(),
            None => ch.len_utf8(),
        };
    }
    None
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut idx = 0;
    while let Some(ch) = raw[idx..].chars().next() {
        match escaped_at(&raw[idx..]) {
            Some(escaped) => {
                out.push(escaped);
                idx += ESCAPE.len_utf8() + escaped.len_utf8();
            }
            None => {
                out.push(ch);
                idx += ch.len_utf8();
            }
        }
    }
    out
}

/// Format text with the default rules
pub fn format_inline(text: &str) -> Vec<StyledSpan> {
    InlineFormatter::default().format(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use govdoc_ast::plain_text;

    fn styles(spans: &[StyledSpan]) -> Vec<(&str, Emphasis)> {
        spans
            .iter()
            .map(|s| (s.text.as_str(), s.emphasis))
            .collect()
    }

    #[test]
    fn test_mixed_emphasis_yields_five_spans() {
        let spans = format_inline("**Bold** and *italic* and `code`");
        assert_eq!(
            styles(&spans),
            vec![
                ("Bold", Emphasis::Bold),
                (" and ", Emphasis::Plain),
                ("italic", Emphasis::Italic),
                (" and ", Emphasis::Plain),
                ("code", Emphasis::Code),
            ]
        );
        assert_eq!(plain_text(&spans), "Bold and italic and code");
    }

    #[test]
    fn test_triple_marker_is_bold_italic() {
        let spans = format_inline("***Key*** point");
        assert_eq!(
            styles(&spans),
            vec![("Key", Emphasis::BoldItalic), (" point", Emphasis::Plain)]
        );
    }

    #[test]
    fn test_double_marker_not_misread_as_italic() {
        let spans = format_inline("a **b** c");
        assert_eq!(spans[1], StyledSpan::new("b", Emphasis::Bold));
    }

    #[test]
    fn test_unmatched_marker_is_literal() {
        let spans = format_inline("5 * 3 = 15");
        assert_eq!(styles(&spans), vec![("5 * 3 = 15", Emphasis::Plain)]);

        let spans = format_inline("**unclosed bold");
        assert_eq!(plain_text(&spans), "**unclosed bold");
    }

    #[test]
    fn test_empty_content_is_not_a_span() {
        let spans = format_inline("``");
        assert_eq!(styles(&spans), vec![("``", Emphasis::Plain)]);
    }

    #[test]
    fn test_code_content_is_not_reparsed() {
        let spans = format_inline("run `a*b*c` now");
        assert_eq!(spans[1], StyledSpan::new("a*b*c", Emphasis::Code));
    }

    #[test]
    fn test_markers_do_not_span_lines() {
        let spans = format_inline("*first\nsecond*");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].emphasis, Emphasis::Plain);
    }

    #[test]
    fn test_multibyte_text_survives() {
        let spans = format_inline("Résumé **über** ☑");
        assert_eq!(plain_text(&spans), "Résumé über ☑");
        assert_eq!(spans[1], StyledSpan::new("über", Emphasis::Bold));
    }

    #[test]
    fn test_round_trip_strips_only_delimiters() {
        let fragments = [
            ("plain ", None),
            ("bold", Some("**")),
            (" mid ", None),
            ("both", Some("***")),
            ("it", Some("*")),
            (" tail ", None),
            ("x = 1", Some("`")),
        ];
        let mut source = String::new();
        let mut expected = String::new();
        for (text, delimiter) in fragments {
            let delimiter = delimiter.unwrap_or("");
            source.push_str(delimiter);
            source.push_str(text);
            source.push_str(delimiter);
            expected.push_str(text);
        }

        assert_eq!(plain_text(&format_inline(&source)), expected);
    }

    #[test]
    fn test_escaped_delimiters_are_literal() {
        let spans = format_inline(r"2 \* 3 \* 4");
        assert_eq!(styles(&spans), vec![("2 * 3 * 4", Emphasis::Plain)]);

        let spans = format_inline(r"path C:\\temp and \`tick\`");
        assert_eq!(plain_text(&spans), r"path C:\temp and `tick`");
    }

    #[test]
    fn test_escapes_inside_span() {
        let spans = format_inline(r"**a \*\* b** and `x\`y`");
        assert_eq!(
            styles(&spans),
            vec![
                ("a ** b", Emphasis::Bold),
                (" and ", Emphasis::Plain),
                ("x`y", Emphasis::Code),
            ]
        );
    }

    #[test]
    fn test_unknown_escape_kept() {
        let spans = format_inline(r"C:\dir");
        assert_eq!(plain_text(&spans), r"C:\dir");
    }

    #[test]
    fn test_empty_input() {
        assert!(format_inline("").is_empty());
    }
}
