//! # Blockdown Core
//!
//! Core data models, error types, and retry policy for the blockdown
//! conversion engine. This crate defines the canonical types that the
//! conversion and request-construction crates depend on.
//!
//! ## Architecture Principles
//!
//! - **Closed sum types**: [`BlockKind`] and [`PropertyValue`] replace the
//!   store's string type tags; every downstream decision is an exhaustive
//!   match, with unknown wire records dropped at the boundary.
//! - **Zero panic in libraries**: fallible operations return
//!   `Result<T, Error>`; malformed-but-recoverable input degrades to empty
//!   defaults instead of erroring.
//! - **Original errors survive**: the retry executor re-throws the upstream
//!   error unchanged, status code and `Retry-After` hint included.
//!
//! ## Core Modules
//!
//! - [`models`] - Content blocks, styled spans, property values, the
//!   paginated listing envelope
//! - [`error`] - The workspace error type and Result alias
//! - [`retry`] - Exponential backoff for transient store failures
//!
//! ## Usage
//!
//! ```
//! use blockdown_core::prelude::*;
//!
//! let block = Block::new(BlockKind::Paragraph {
//!     spans: vec![Span::plain("Hello")],
//! });
//! let payload = block.to_create_payload();
//! assert_eq!(payload["type"], "paragraph");
//! ```

pub mod error;
pub mod models;
pub mod retry;

pub use error::{Error, Result};
pub use models::{
    Block, BlockKind, HeadingLevel, ImageSource, PaginatedList, PropertyValue, Span, SpanStyle,
};
pub use retry::{RetryConfig, with_retry};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        Block, BlockKind, HeadingLevel, ImageSource, PaginatedList, PropertyValue, Span, SpanStyle,
    };
    pub use crate::retry::{RetryConfig, with_retry};
}
