//! # Blockdown Props
//!
//! Request-construction helpers invoked by the owning document-store
//! client: flattening simple key/value maps into the store's typed
//! property-value encoding, and normalizing loosely-formatted resource
//! references into canonical dashed identifiers.
//!
//! Both helpers are pure and total; malformed input degrades to a
//! passthrough result instead of erroring, deferring validation to the
//! store itself.
//!
//! ## Modules
//!
//! - [`flatten`] - key/value map -> typed property payloads
//! - [`ident`] - resource reference -> canonical dashed identifier

pub mod flatten;
pub mod ident;

pub use flatten::flatten;
pub use ident::normalize;
