//! 2-D sheet geometry for viewable-rs.
//!
//! This crate converts coordinates on a translated 2-D drawing:
//! - [`SheetData`] the sheet's geometry payload (page metadata, viewport
//!   transforms, clip regions)
//! - [`ViewportTransforms`] memoized page-to-model transforms, including
//!   the malformed-row repair heuristic
//! - [`ClipIndex`] clip region decoding and point-in-region queries
//!
//! Everything here is a pure computation over resident data; invalid
//! viewport ids and degenerate inputs resolve to neutral values.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod clip;
pub mod error;
pub mod page;
pub mod transform;

pub use clip::{point_in_polygon, ClipIndex, ClipRegion};
pub use error::{Result, SheetError};
pub use page::{Clip, PageDimensions, SheetData, Viewport};
pub use transform::ViewportTransforms;

// Re-export glam types for convenience
pub use glam::{DMat4, DVec2, DVec3};
