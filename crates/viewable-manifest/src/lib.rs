//! Manifest tree model for viewable-rs.
//!
//! This crate provides the in-memory form of a translated document's
//! manifest:
//! - [`RawNode`] / [`ManifestNode`] typed node model
//! - [`ManifestTree`] index arena with parent back-references, the
//!   view-to-geometry indices, and the shared property-database path
//! - [`Locator`] property-filtered search and id lookup

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod error;
pub mod locator;
pub mod node;
pub mod tree;

pub use error::{ManifestError, Result};
pub use locator::{Locator, PropertyFilter};
pub use node::{ManifestNode, Message, NodeId, NodeType, RawNode, Role};
pub use tree::{ManifestTree, SHARED_PROPERTY_DB_MIME};
