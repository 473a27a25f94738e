//! Block -> Markdown serializer.
//!
//! Walks a sequence of typed content blocks and renders each into zero or
//! more Markdown lines, two spaces of indent per nesting level. The
//! conversion itself is pure; the one injected capability is an async
//! child-fetch callback, invoked when a block asserts `has_children`. With
//! no callback supplied, children are silently skipped. Recursion is
//! strictly depth-first: a block's own lines always precede its children.

use blockdown_core::{Block, BlockKind, Result, Span};
use futures::future::BoxFuture;

/// Injected capability for fetching a block's children by identifier.
///
/// The owning client backs this with its paginated listing call; the
/// renderer only sees complete child lists. Failures propagate unchanged.
pub type ChildFetcher = dyn Fn(&str) -> BoxFuture<'static, Result<Vec<Block>>> + Send + Sync;

/// Render blocks to Markdown: lines joined by `\n`, no trailing newline.
pub async fn render(blocks: &[Block], fetcher: Option<&ChildFetcher>) -> Result<String> {
    render_at(blocks, fetcher, 0).await
}

fn render_at<'a>(
    blocks: &'a [Block],
    fetcher: Option<&'a ChildFetcher>,
    indent: usize,
) -> BoxFuture<'a, Result<String>> {
    Box::pin(async move {
        let pad = "  ".repeat(indent);
        let mut lines: Vec<String> = Vec::new();
        // Number of consecutive table rows seen in the current run;
        // resets whenever any other block intervenes, so separate table
        // runs each get their own header separator.
        let mut table_run_len = 0usize;

        for block in blocks {
            match &block.kind {
                BlockKind::Table => {
                    // Structural only: rows arrive as children
                    table_run_len = 0;
                }
                BlockKind::TableRow { cells } => {
                    if table_run_len == 1 {
                        lines.push(format!("{pad}{}", separator_row(cells.len())));
                    }
                    lines.push(format!("{pad}{}", table_row(cells)));
                    table_run_len += 1;
                }
                kind => {
                    table_run_len = 0;
                    for line in own_lines(kind) {
                        lines.push(format!("{pad}{line}"));
                    }
                }
            }

            if block.has_children
                && let Some(fetch) = fetcher
                && let Some(id) = block.id.as_deref()
            {
                log::debug!("fetching children of block {id}");
                let children = fetch(id).await?;
                let nested = render_at(&children, fetcher, indent + 1).await?;
                if !nested.is_empty() {
                    lines.push(nested);
                }
            }
        }

        Ok(lines.join("\n"))
    })
}

/// The block's own Markdown lines, before any children.
fn own_lines(kind: &BlockKind) -> Vec<String> {
    match kind {
        BlockKind::Paragraph { spans } => vec![render_spans(spans)],
        BlockKind::Heading { level, spans } => {
            vec![format!("{} {}", "#".repeat(level.depth()), render_spans(spans))]
        }
        BlockKind::BulletedListItem { spans } | BlockKind::Toggle { spans } => {
            vec![format!("- {}", render_spans(spans))]
        }
        // Literal `1.` for every item: the store numbers items, not this layer
        BlockKind::NumberedListItem { spans } => vec![format!("1. {}", render_spans(spans))],
        BlockKind::ToDo { checked, spans } => {
            let mark = if *checked { 'x' } else { ' ' };
            vec![format!("- [{mark}] {}", render_spans(spans))]
        }
        BlockKind::Code { language, spans } => {
            let mut lines = vec![format!("```{language}")];
            lines.extend(Span::plain_text(spans).split('\n').map(str::to_string));
            lines.push("```".to_string());
            lines
        }
        BlockKind::Quote { spans } => vec![format!("> {}", render_spans(spans))],
        BlockKind::Callout { icon, spans } => {
            let text = render_spans(spans);
            vec![match icon {
                Some(emoji) => format!("> {emoji} {text}"),
                None => format!("> {text}"),
            }]
        }
        BlockKind::Divider => vec!["---".to_string()],
        BlockKind::Image { source, caption } => {
            vec![format!("![{}]({})", Span::plain_text(caption), source.url())]
        }
        BlockKind::Bookmark { url, caption } | BlockKind::Embed { url, caption } => {
            let text = if caption.is_empty() {
                url.clone()
            } else {
                Span::plain_text(caption)
            };
            vec![format!("[{text}]({url})")]
        }
        BlockKind::Equation { expression } => vec![format!("$${expression}$$")],
        // Handled by the caller's table-run tracking
        BlockKind::Table | BlockKind::TableRow { .. } => Vec::new(),
    }
}

fn table_row(cells: &[Vec<Span>]) -> String {
    let rendered: Vec<String> = cells.iter().map(|cell| render_spans(cell)).collect();
    format!("| {} |", rendered.join(" | "))
}

fn separator_row(columns: usize) -> String {
    let dashes = vec!["---"; columns.max(1)];
    format!("| {} |", dashes.join(" | "))
}

/// Render a span sequence with Markdown style delimiters.
///
/// Code is applied innermost, then bold, then italic (combined bold+italic
/// nets `***text***`), then strikethrough; a hyperlink wraps the styled
/// text outermost.
pub fn render_spans(spans: &[Span]) -> String {
    spans.iter().map(render_span).collect()
}

fn render_span(span: &Span) -> String {
    let style = &span.style;
    let mut text = span.text.clone();

    if style.code {
        text = format!("`{text}`");
    }
    if style.bold {
        text = format!("**{text}**");
    }
    if style.italic {
        text = format!("*{text}*");
    }
    if style.strikethrough {
        text = format!("~~{text}~~");
    }
    if let Some(url) = &style.link {
        text = format!("[{text}]({url})");
    }

    text
}
