//! # Blockdown Convert
//!
//! Bidirectional structural translation between the document store's typed
//! content blocks and linear Markdown text. This is a lossy, best-effort
//! round-trip: the supported style subset (bold, italic, bold+italic,
//! strikethrough, inline code, links) survives both directions, but
//! block -> Markdown -> block is not guaranteed to reproduce the original
//! tree.
//!
//! ## Modules
//!
//! - [`tokenize`] - inline-span tokenizer shared by both directions
//! - [`render`] - block tree -> Markdown, with an injected async
//!   child-fetch callback for nested blocks
//! - [`parse`] - Markdown -> block sequence, line-based state machine
//!
//! ## Usage
//!
//! ```
//! use blockdown_convert::parse;
//! use blockdown_core::BlockKind;
//!
//! let blocks = parse("# Title\n\n- item");
//! assert_eq!(blocks.len(), 2);
//! assert!(matches!(blocks[0].kind, BlockKind::Heading { .. }));
//! ```
//!
//! The conversion logic is synchronous and side-effect-free; the only
//! suspension point is the injected child fetcher, so the renderer can be
//! unit-tested with a trivial stub instead of network mocking.

pub mod parse;
pub mod render;
pub mod tokenize;

pub use parse::parse;
pub use render::{ChildFetcher, render, render_spans};
pub use tokenize::tokenize;
