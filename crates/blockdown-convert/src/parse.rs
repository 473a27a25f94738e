//! Markdown -> Block parser.
//!
//! A single-pass line scanner with two states: `Scan` (classifying each
//! line into a block) and an in-fence state that accumulates raw lines
//! verbatim until a closing ``` or end of input. There is no backtracking
//! across blocks; an unterminated fence consumes the rest of the document
//! as code.
//!
//! Dispatch priority from `Scan`, first match wins: fence open, divider,
//! headings, checkbox items, bullets, numbered items, quotes, blank
//! (skipped), paragraph. Inline content goes through the span tokenizer
//! except fenced code, which becomes one verbatim unstyled span.

use crate::tokenize::tokenize;
use blockdown_core::{Block, BlockKind, HeadingLevel, Span};
use regex::Regex;
use std::sync::LazyLock;

/// Matches - [ ] or - [x] followed by the item text
static CHECKBOX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^- \[([ x])\]\s+(.*)$").unwrap());

/// Matches digit(s) followed by `. ` and the item text
static NUMBERED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.\s(.*)$").unwrap());

/// Language tag used when a fence has none
const DEFAULT_LANGUAGE: &str = "plain text";

struct FenceState {
    language: String,
    lines: Vec<String>,
}

impl FenceState {
    fn into_block(self) -> Block {
        Block::new(BlockKind::Code {
            language: self.language,
            spans: vec![Span::plain(self.lines.join("\n"))],
        })
    }
}

/// Parse a Markdown document into a sequence of blocks.
///
/// Total: empty and whitespace-only documents yield an empty sequence, and
/// the number of emitted blocks never exceeds the number of input lines.
pub fn parse(markdown: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut fence: Option<FenceState> = None;

    for line in markdown.lines() {
        if fence.is_some() {
            if line.trim() == "```" {
                if let Some(state) = fence.take() {
                    blocks.push(state.into_block());
                }
            } else if let Some(state) = fence.as_mut() {
                state.lines.push(line.to_string());
            }
            continue;
        }

        let trimmed = line.trim();

        if let Some(tag) = trimmed.strip_prefix("```") {
            let tag = tag.trim();
            fence = Some(FenceState {
                language: if tag.is_empty() {
                    DEFAULT_LANGUAGE.to_string()
                } else {
                    tag.to_string()
                },
                lines: Vec::new(),
            });
            continue;
        }

        if trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-') {
            blocks.push(Block::new(BlockKind::Divider));
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("### ") {
            blocks.push(heading(HeadingLevel::H3, rest));
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("## ") {
            blocks.push(heading(HeadingLevel::H2, rest));
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("# ") {
            blocks.push(heading(HeadingLevel::H1, rest));
            continue;
        }

        if let Some(caps) = CHECKBOX_PATTERN.captures(trimmed) {
            blocks.push(Block::new(BlockKind::ToDo {
                checked: &caps[1] == "x",
                spans: tokenize(&caps[2]),
            }));
            continue;
        }

        if let Some(rest) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            blocks.push(Block::new(BlockKind::BulletedListItem {
                spans: tokenize(rest),
            }));
            continue;
        }

        if let Some(caps) = NUMBERED_PATTERN.captures(trimmed) {
            blocks.push(Block::new(BlockKind::NumberedListItem {
                spans: tokenize(&caps[1]),
            }));
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("> ") {
            blocks.push(Block::new(BlockKind::Quote {
                spans: tokenize(rest),
            }));
            continue;
        }

        if trimmed.is_empty() {
            continue;
        }

        blocks.push(Block::new(BlockKind::Paragraph {
            spans: tokenize(trimmed),
        }));
    }

    // Unterminated fence: everything to end of input was code
    if let Some(state) = fence.take() {
        blocks.push(state.into_block());
    }

    blocks
}

fn heading(level: HeadingLevel, rest: &str) -> Block {
    Block::new(BlockKind::Heading {
        level,
        spans: tokenize(rest),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span_text(kind: &BlockKind) -> String {
        match kind {
            BlockKind::Paragraph { spans }
            | BlockKind::Heading { spans, .. }
            | BlockKind::BulletedListItem { spans }
            | BlockKind::NumberedListItem { spans }
            | BlockKind::ToDo { spans, .. }
            | BlockKind::Quote { spans }
            | BlockKind::Code { spans, .. } => Span::plain_text(spans),
            other => panic!("no spans on {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_blank_document() {
        assert!(parse("   \n\n  ").is_empty());
    }

    #[test]
    fn test_single_heading() {
        let blocks = parse("# Title");
        assert_eq!(blocks.len(), 1);
        assert!(matches!(
            blocks[0].kind,
            BlockKind::Heading {
                level: HeadingLevel::H1,
                ..
            }
        ));
        assert_eq!(span_text(&blocks[0].kind), "Title");
    }

    #[test]
    fn test_heading_levels() {
        let blocks = parse("# a\n## b\n### c");
        assert_eq!(blocks.len(), 3);
        let levels: Vec<_> = blocks
            .iter()
            .map(|b| match b.kind {
                BlockKind::Heading { level, .. } => level,
                _ => panic!("expected heading"),
            })
            .collect();
        assert_eq!(
            levels,
            vec![HeadingLevel::H1, HeadingLevel::H2, HeadingLevel::H3]
        );
    }

    #[test]
    fn test_heading_requires_space() {
        // `#tag` is not a heading
        let blocks = parse("#nospace");
        assert!(matches!(blocks[0].kind, BlockKind::Paragraph { .. }));
    }

    #[test]
    fn test_bulleted_items_in_order() {
        let blocks = parse("- Item 1\n- Item 2");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0].kind, BlockKind::BulletedListItem { .. }));
        assert!(matches!(blocks[1].kind, BlockKind::BulletedListItem { .. }));
        assert_eq!(span_text(&blocks[0].kind), "Item 1");
        assert_eq!(span_text(&blocks[1].kind), "Item 2");
    }

    #[test]
    fn test_star_bullet() {
        let blocks = parse("* starred");
        assert!(matches!(blocks[0].kind, BlockKind::BulletedListItem { .. }));
    }

    #[test]
    fn test_numbered_items() {
        let blocks = parse("1. first\n42. later");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0].kind, BlockKind::NumberedListItem { .. }));
        assert_eq!(span_text(&blocks[1].kind), "later");
    }

    #[test]
    fn test_checkbox_items() {
        let blocks = parse("- [ ] open\n- [x] done");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(
            blocks[0].kind,
            BlockKind::ToDo { checked: false, .. }
        ));
        assert!(matches!(
            blocks[1].kind,
            BlockKind::ToDo { checked: true, .. }
        ));
        assert_eq!(span_text(&blocks[1].kind), "done");
    }

    #[test]
    fn test_quote() {
        let blocks = parse("> quoted text");
        assert!(matches!(blocks[0].kind, BlockKind::Quote { .. }));
        assert_eq!(span_text(&blocks[0].kind), "quoted text");
    }

    #[test]
    fn test_divider() {
        for doc in ["---", "-----", "  ---  "] {
            let blocks = parse(doc);
            assert_eq!(blocks.len(), 1, "for input {doc:?}");
            assert!(matches!(blocks[0].kind, BlockKind::Divider));
        }
        // Two dashes are just a paragraph
        assert!(matches!(parse("--")[0].kind, BlockKind::Paragraph { .. }));
    }

    #[test]
    fn test_code_fence() {
        let blocks = parse("```ts\nconst x = 1;\n```");
        assert_eq!(blocks.len(), 1);
        if let BlockKind::Code { language, spans } = &blocks[0].kind {
            assert_eq!(language, "ts");
            assert_eq!(spans.len(), 1);
            assert_eq!(spans[0].text, "const x = 1;");
            assert_eq!(spans[0].style, Default::default());
        } else {
            panic!("Expected Code block");
        }
    }

    #[test]
    fn test_fence_without_language_defaults() {
        let blocks = parse("```\nraw\n```");
        if let BlockKind::Code { language, .. } = &blocks[0].kind {
            assert_eq!(language, "plain text");
        } else {
            panic!("Expected Code block");
        }
    }

    #[test]
    fn test_fence_content_is_verbatim() {
        // Formatting characters inside a fence stay literal
        let blocks = parse("```\n**not bold** and # not a heading\n- not a list\n```");
        assert_eq!(blocks.len(), 1);
        if let BlockKind::Code { spans, .. } = &blocks[0].kind {
            assert_eq!(spans[0].text, "**not bold** and # not a heading\n- not a list");
        } else {
            panic!("Expected Code block");
        }
    }

    #[test]
    fn test_unterminated_fence_consumes_rest() {
        let blocks = parse("before\n```py\nx = 1\ny = 2");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[0].kind, BlockKind::Paragraph { .. }));
        if let BlockKind::Code { language, spans } = &blocks[1].kind {
            assert_eq!(language, "py");
            assert_eq!(spans[0].text, "x = 1\ny = 2");
        } else {
            panic!("Expected Code block");
        }
    }

    #[test]
    fn test_paragraph_with_inline_formatting() {
        let blocks = parse("plain **bold** end");
        if let BlockKind::Paragraph { spans } = &blocks[0].kind {
            assert_eq!(spans.len(), 3);
            assert!(spans[1].style.bold);
        } else {
            panic!("Expected Paragraph block");
        }
    }

    #[test]
    fn test_blank_lines_emit_nothing() {
        let blocks = parse("a\n\n\nb");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_block_count_bounded_by_line_count() {
        let doc = "# h\n\n```\na\nb\nc\n```\n- item\n\ntext";
        let line_count = doc.lines().count();
        assert!(parse(doc).len() <= line_count);
    }

    #[test]
    fn test_mixed_document() {
        let doc = "# Title\n\nIntro paragraph.\n\n- one\n- two\n1. first\n> note\n---";
        let blocks = parse(doc);
        let kinds: Vec<&str> = blocks
            .iter()
            .map(|b| match &b.kind {
                BlockKind::Heading { .. } => "heading",
                BlockKind::Paragraph { .. } => "paragraph",
                BlockKind::BulletedListItem { .. } => "bullet",
                BlockKind::NumberedListItem { .. } => "numbered",
                BlockKind::Quote { .. } => "quote",
                BlockKind::Divider => "divider",
                other => panic!("unexpected kind {other:?}"),
            })
            .collect();
        assert_eq!(
            kinds,
            vec![
                "heading",
                "paragraph",
                "bullet",
                "bullet",
                "numbered",
                "quote",
                "divider"
            ]
        );
    }
}
