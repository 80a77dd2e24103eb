//! Resource path resolution for viewable-rs.
//!
//! This crate decides, for any manifest item, which concrete resource to
//! load and with what loader parameters:
//! - [`PathResolver`] urn rewriting, viewable format fallback, thumbnails
//! - [`LeafletOptions`] tiled raster pyramid loader parameters
//! - [`ResolverConfig`] explicit environment configuration
//!
//! Resolution never fails: anything unresolvable yields an empty string or
//! an untouched output record.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod leaflet;
pub mod path;

pub use config::ResolverConfig;
pub use leaflet::{LeafletOptions, TileMetrics, DEFAULT_TILE_SIZE};
pub use path::{PathResolver, F2D_MIME, SVF_MIME};
