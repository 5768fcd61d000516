//! Data models for portal entities.
//!
//! Everything here is transient: rebuilt from portal HTML on every request,
//! serialized straight onto the wire, never persisted.

mod document;
mod project;

pub use document::{DocumentLink, DocumentList};
pub use project::{Project, SearchResults};
