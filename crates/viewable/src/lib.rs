//! Client-side resolution layer for translated-document manifests.
//!
//! Given the output manifest of a cloud translation pipeline, this crate
//! builds an indexed in-memory tree, decides which concrete resource each
//! viewable item loads (with what loader parameters), and converts
//! paper-space coordinates to model space on 2-D sheets with multiple
//! independently transformed, clipped viewports.
//!
//! The heavy lifting lives in the member crates and is re-exported here:
//! - [`viewable_manifest`]: node model, tree indices, property search
//! - [`viewable_resolve`]: format fallback, thumbnails, leaflet parameters
//! - [`viewable_sheet`]: viewport transforms and clip regions
//!
//! Transport, session acquisition, rendering, and property queries are
//! external collaborators; nothing here fetches or caches bytes.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod document;

pub use document::Document;

pub use viewable_manifest::{
    Locator, ManifestError, ManifestNode, ManifestTree, Message, NodeId, NodeType,
    PropertyFilter, RawNode, Role, SHARED_PROPERTY_DB_MIME,
};
pub use viewable_resolve::{
    LeafletOptions, PathResolver, ResolverConfig, TileMetrics, DEFAULT_TILE_SIZE, F2D_MIME,
    SVF_MIME,
};
pub use viewable_sheet::{
    point_in_polygon, Clip, ClipIndex, ClipRegion, PageDimensions, SheetData, SheetError,
    Viewport, ViewportTransforms,
};

// Re-export glam types for convenience
pub use viewable_sheet::{DMat4, DVec2, DVec3};
