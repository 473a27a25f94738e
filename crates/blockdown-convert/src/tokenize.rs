//! Inline-span tokenizer: splits one line of Markdown into styled spans.
//!
//! A single alternation pattern scans left to right; branch order fixes the
//! precedence (hyperlink > inline code > bold+italic > bold > italic >
//! strikethrough), and any text between matches becomes a plain span.
//! Delimiters are never nested or escaped: no `\*` literals, no emphasis
//! inside emphasis. Fenced-code lines never reach this function; the
//! block-level parser intercepts them first.

use blockdown_core::{Span, SpanStyle};
use regex::Regex;
use std::sync::LazyLock;

/// Branch order is the precedence order; do not reorder.
static INLINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\[([^\]]*)\]\(([^)]*)\)|`([^`]+)`|\*\*\*([^*]+)\*\*\*|\*\*([^*]+)\*\*|\*([^*]+)\*|~~([^~]+)~~",
    )
    .unwrap()
});

/// Tokenize a line of text into styled spans.
///
/// Total: never fails, empty input yields an empty sequence, and a line
/// with no recognized delimiter becomes one plain span.
pub fn tokenize(line: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut last_end = 0;

    for caps in INLINE_PATTERN.captures_iter(line) {
        let matched = caps.get(0).unwrap();
        if matched.start() > last_end {
            spans.push(Span::plain(&line[last_end..matched.start()]));
        }

        let span = if let Some(text) = caps.get(1) {
            let url = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            Span::styled(
                text.as_str(),
                SpanStyle {
                    link: Some(url.to_string()),
                    ..Default::default()
                },
            )
        } else if let Some(code) = caps.get(3) {
            Span::styled(
                code.as_str(),
                SpanStyle {
                    code: true,
                    ..Default::default()
                },
            )
        } else if let Some(both) = caps.get(4) {
            Span::styled(
                both.as_str(),
                SpanStyle {
                    bold: true,
                    italic: true,
                    ..Default::default()
                },
            )
        } else if let Some(bold) = caps.get(5) {
            Span::styled(
                bold.as_str(),
                SpanStyle {
                    bold: true,
                    ..Default::default()
                },
            )
        } else if let Some(italic) = caps.get(6) {
            Span::styled(
                italic.as_str(),
                SpanStyle {
                    italic: true,
                    ..Default::default()
                },
            )
        } else {
            let strike = caps.get(7).unwrap();
            Span::styled(
                strike.as_str(),
                SpanStyle {
                    strikethrough: true,
                    ..Default::default()
                },
            )
        };
        spans.push(span);
        last_end = matched.end();
    }

    if last_end < line.len() {
        spans.push(Span::plain(&line[last_end..]));
    }

    spans
}
