//! Core data models for the blockdown conversion engine.
//!
//! These types are designed to be:
//! - **Serializable**: All types derive Serialize/Deserialize
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Type-Safe**: Closed enums replace the store's string type tags
//!
//! The document store itself speaks loosely-typed JSON records keyed by a
//! `type` tag. The wire boundary lives here: [`Block::from_record`] decodes
//! store records into the closed [`BlockKind`] sum (dropping unknown kinds),
//! and [`Block::to_create_payload`] produces the block-creation payload the
//! store's append operation expects. All semantic decisions downstream of
//! this module run on exhaustive matches.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Inline style flags for a run of text within a block.
///
/// `underline` is decoded from store records but is not distinguished when
/// rendering to Markdown (Markdown has no underline syntax).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpanStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    /// Hyperlink target, if the span is a link
    pub link: Option<String>,
}

/// A contiguous run of styled text.
///
/// Invariant: the spans of a block concatenate in order to reconstruct the
/// block's full text exactly, ignoring style markers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub style: SpanStyle,
}

impl Span {
    /// Create an unstyled span
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: SpanStyle::default(),
        }
    }

    /// Create a span with explicit styling
    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Concatenate the raw text of a span sequence
    pub fn plain_text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Decode one rich-text item from a store record.
    ///
    /// Missing or malformed fields degrade to empty/unstyled defaults;
    /// this never fails.
    pub fn from_record(record: &Value) -> Self {
        let text = record
            .pointer("/text/content")
            .and_then(Value::as_str)
            .or_else(|| record.get("plain_text").and_then(Value::as_str))
            .unwrap_or_default()
            .to_string();

        let flag = |name: &str| {
            record
                .pointer(&format!("/annotations/{name}"))
                .and_then(Value::as_bool)
                .unwrap_or(false)
        };

        let link = record
            .pointer("/text/link/url")
            .or_else(|| record.get("href"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            text,
            style: SpanStyle {
                bold: flag("bold"),
                italic: flag("italic"),
                strikethrough: flag("strikethrough"),
                underline: flag("underline"),
                code: flag("code"),
                link,
            },
        }
    }

    /// Encode this span as a store-native rich-text item
    pub fn to_payload(&self) -> Value {
        let link = match &self.style.link {
            Some(url) => json!({ "url": url }),
            None => Value::Null,
        };
        json!({
            "type": "text",
            "text": { "content": self.text, "link": link },
            "annotations": {
                "bold": self.style.bold,
                "italic": self.style.italic,
                "strikethrough": self.style.strikethrough,
                "underline": self.style.underline,
                "code": self.style.code,
            },
            "plain_text": self.text,
        })
    }
}

/// Heading depth supported by the store (three levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
}

impl HeadingLevel {
    /// Number of `#` characters in the Markdown marker
    pub fn depth(self) -> usize {
        match self {
            HeadingLevel::H1 => 1,
            HeadingLevel::H2 => 2,
            HeadingLevel::H3 => 3,
        }
    }

    fn type_tag(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "heading_1",
            HeadingLevel::H2 => "heading_2",
            HeadingLevel::H3 => "heading_3",
        }
    }
}

/// Where an image's bytes live, carrying the kind-specific URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Store-hosted file (time-limited URL)
    File(String),
    /// Externally hosted URL
    External(String),
}

impl ImageSource {
    /// The URL regardless of hosting kind
    pub fn url(&self) -> &str {
        match self {
            ImageSource::File(url) | ImageSource::External(url) => url,
        }
    }
}

/// The closed set of content-block kinds this engine understands.
///
/// Store records with any other `type` tag are dropped at the wire
/// boundary ([`Block::from_record`] returns `None`) rather than erroring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockKind {
    Paragraph {
        spans: Vec<Span>,
    },
    Heading {
        level: HeadingLevel,
        spans: Vec<Span>,
    },
    BulletedListItem {
        spans: Vec<Span>,
    },
    NumberedListItem {
        spans: Vec<Span>,
    },
    ToDo {
        checked: bool,
        spans: Vec<Span>,
    },
    Toggle {
        spans: Vec<Span>,
    },
    Code {
        language: String,
        spans: Vec<Span>,
    },
    Quote {
        spans: Vec<Span>,
    },
    Callout {
        icon: Option<String>,
        spans: Vec<Span>,
    },
    Divider,
    Image {
        source: ImageSource,
        caption: Vec<Span>,
    },
    /// Structural only; content lives in `TableRow` children
    Table,
    TableRow {
        cells: Vec<Vec<Span>>,
    },
    Bookmark {
        url: String,
        caption: Vec<Span>,
    },
    Embed {
        url: String,
        caption: Vec<Span>,
    },
    Equation {
        expression: String,
    },
}

/// One unit of page content in the store's document model.
///
/// `has_children` asserts that nested child blocks exist; children are
/// fetched lazily by the owning client, never embedded inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: Option<String>,
    pub has_children: bool,
    pub kind: BlockKind,
}

impl Block {
    /// Create a block with no identity and no children
    pub fn new(kind: BlockKind) -> Self {
        Self {
            id: None,
            has_children: false,
            kind,
        }
    }

    /// Decode a store-native block record `{ id, type, has_children, <type>: {...} }`.
    ///
    /// Returns `None` for unrecognized `type` tags so callers can silently
    /// skip them. Missing payload fields degrade to empty defaults.
    pub fn from_record(record: &Value) -> Option<Self> {
        let type_tag = record.get("type")?.as_str()?;
        let payload = record.get(type_tag).cloned().unwrap_or_else(|| json!({}));

        let spans = |field: &str| -> Vec<Span> {
            payload
                .get(field)
                .and_then(Value::as_array)
                .map(|items| items.iter().map(Span::from_record).collect())
                .unwrap_or_default()
        };
        let rich_text = || spans("rich_text");

        let kind = match type_tag {
            "paragraph" => BlockKind::Paragraph { spans: rich_text() },
            "heading_1" => BlockKind::Heading {
                level: HeadingLevel::H1,
                spans: rich_text(),
            },
            "heading_2" => BlockKind::Heading {
                level: HeadingLevel::H2,
                spans: rich_text(),
            },
            "heading_3" => BlockKind::Heading {
                level: HeadingLevel::H3,
                spans: rich_text(),
            },
            "bulleted_list_item" => BlockKind::BulletedListItem { spans: rich_text() },
            "numbered_list_item" => BlockKind::NumberedListItem { spans: rich_text() },
            "to_do" => BlockKind::ToDo {
                checked: payload
                    .get("checked")
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
                spans: rich_text(),
            },
            "toggle" => BlockKind::Toggle { spans: rich_text() },
            "code" => BlockKind::Code {
                language: payload
                    .get("language")
                    .and_then(Value::as_str)
                    .unwrap_or("plain text")
                    .to_string(),
                spans: rich_text(),
            },
            "quote" => BlockKind::Quote { spans: rich_text() },
            "callout" => BlockKind::Callout {
                icon: payload
                    .pointer("/icon/emoji")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                spans: rich_text(),
            },
            "divider" => BlockKind::Divider,
            "image" => {
                let source = match payload.get("type").and_then(Value::as_str) {
                    Some("external") => ImageSource::External(
                        payload
                            .pointer("/external/url")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    ),
                    _ => ImageSource::File(
                        payload
                            .pointer("/file/url")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    ),
                };
                BlockKind::Image {
                    source,
                    caption: spans("caption"),
                }
            }
            "table" => BlockKind::Table,
            "table_row" => BlockKind::TableRow {
                cells: payload
                    .get("cells")
                    .and_then(Value::as_array)
                    .map(|rows| {
                        rows.iter()
                            .map(|cell| {
                                cell.as_array()
                                    .map(|items| items.iter().map(Span::from_record).collect())
                                    .unwrap_or_default()
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            "bookmark" => BlockKind::Bookmark {
                url: payload
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                caption: spans("caption"),
            },
            "embed" => BlockKind::Embed {
                url: payload
                    .get("url")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                caption: spans("caption"),
            },
            "equation" => BlockKind::Equation {
                expression: payload
                    .get("expression")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            _ => return None,
        };

        Some(Self {
            id: record.get("id").and_then(Value::as_str).map(str::to_string),
            has_children: record
                .get("has_children")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            kind,
        })
    }

    /// Encode this block as a store-native block-creation payload,
    /// ready for submission to the store's block-append operation.
    pub fn to_create_payload(&self) -> Value {
        let rich = |spans: &[Span]| -> Value {
            Value::Array(spans.iter().map(Span::to_payload).collect())
        };

        let (type_tag, payload): (&str, Value) = match &self.kind {
            BlockKind::Paragraph { spans } => ("paragraph", json!({ "rich_text": rich(spans) })),
            BlockKind::Heading { level, spans } => {
                (level.type_tag(), json!({ "rich_text": rich(spans) }))
            }
            BlockKind::BulletedListItem { spans } => {
                ("bulleted_list_item", json!({ "rich_text": rich(spans) }))
            }
            BlockKind::NumberedListItem { spans } => {
                ("numbered_list_item", json!({ "rich_text": rich(spans) }))
            }
            BlockKind::ToDo { checked, spans } => (
                "to_do",
                json!({ "rich_text": rich(spans), "checked": checked }),
            ),
            BlockKind::Toggle { spans } => ("toggle", json!({ "rich_text": rich(spans) })),
            BlockKind::Code { language, spans } => (
                "code",
                json!({ "rich_text": rich(spans), "language": language }),
            ),
            BlockKind::Quote { spans } => ("quote", json!({ "rich_text": rich(spans) })),
            BlockKind::Callout { icon, spans } => {
                let mut payload = json!({ "rich_text": rich(spans) });
                if let Some(emoji) = icon {
                    payload["icon"] = json!({ "type": "emoji", "emoji": emoji });
                }
                ("callout", payload)
            }
            BlockKind::Divider => ("divider", json!({})),
            BlockKind::Image { source, caption } => {
                let payload = match source {
                    ImageSource::External(url) => json!({
                        "type": "external",
                        "external": { "url": url },
                        "caption": rich(caption),
                    }),
                    ImageSource::File(url) => json!({
                        "type": "file",
                        "file": { "url": url },
                        "caption": rich(caption),
                    }),
                };
                ("image", payload)
            }
            BlockKind::Table => ("table", json!({})),
            BlockKind::TableRow { cells } => (
                "table_row",
                json!({
                    "cells": cells.iter().map(|cell| rich(cell)).collect::<Vec<_>>(),
                }),
            ),
            BlockKind::Bookmark { url, caption } => (
                "bookmark",
                json!({ "url": url, "caption": rich(caption) }),
            ),
            BlockKind::Embed { url, caption } => {
                ("embed", json!({ "url": url, "caption": rich(caption) }))
            }
            BlockKind::Equation { expression } => {
                ("equation", json!({ "expression": expression }))
            }
        };

        let mut record = serde_json::Map::new();
        record.insert("object".into(), json!("block"));
        record.insert("type".into(), json!(type_tag));
        record.insert(type_tag.to_string(), payload);
        Value::Object(record)
    }
}

/// A typed property value attached to a page, keyed by field name in the
/// database's schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Title(Vec<Span>),
    RichText(Vec<Span>),
    MultiSelect(Vec<String>),
    Number(f64),
    Checkbox(bool),
    Date {
        start: Option<String>,
        end: Option<String>,
        is_datetime: Option<bool>,
    },
    /// Passthrough for fully-formed property payloads the shorthand
    /// rules do not recognize
    Opaque(Value),
}

impl PropertyValue {
    /// Encode as a store-native property-value payload, ready for the
    /// store's page-create/update operation.
    pub fn to_payload(&self) -> Value {
        let rich = |spans: &[Span]| -> Value {
            Value::Array(spans.iter().map(Span::to_payload).collect())
        };

        match self {
            PropertyValue::Title(spans) => json!({ "title": rich(spans) }),
            PropertyValue::RichText(spans) => json!({ "rich_text": rich(spans) }),
            PropertyValue::MultiSelect(names) => json!({
                "multi_select": names.iter().map(|n| json!({ "name": n })).collect::<Vec<_>>(),
            }),
            PropertyValue::Number(n) => json!({ "number": n }),
            PropertyValue::Checkbox(b) => json!({ "checkbox": b }),
            PropertyValue::Date {
                start,
                end,
                is_datetime,
            } => {
                let mut date = serde_json::Map::new();
                if let Some(start) = start {
                    date.insert("start".into(), json!(start));
                }
                if let Some(end) = end {
                    date.insert("end".into(), json!(end));
                }
                if let Some(is_datetime) = is_datetime {
                    date.insert("is_datetime".into(), json!(is_datetime));
                }
                json!({ "date": date })
            }
            PropertyValue::Opaque(value) => value.clone(),
        }
    }
}

/// The store's paginated listing envelope for blocks, database rows,
/// comments, and users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    pub has_more: bool,
    pub next_cursor: Option<String>,
}

impl<T> Default for PaginatedList<T> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            has_more: false,
            next_cursor: None,
        }
    }
}
