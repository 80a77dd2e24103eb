//! Leaflet (tiled raster pyramid) load parameters.

/// Tile edge length assumed when a leaflet node does not state one.
pub const DEFAULT_TILE_SIZE: u32 = 512;

/// Supplies tiling parameters the resolver does not own.
///
/// The level offset is a pure function of the tile size, defined by the
/// tiling collaborator that will consume the load options.
pub trait TileMetrics {
    /// Number of pyramid levels skipped for tiles of `tile_size` pixels.
    fn level_offset(&self, tile_size: u32) -> u32;
}

/// Loader parameters for a tiled raster pyramid, filled in by
/// [`PathResolver::extract_leaflet_params`](crate::PathResolver::extract_leaflet_params).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LeafletOptions {
    /// Resolved tile URL pattern.
    pub url_pattern: String,
    /// Tile edge length in pixels.
    pub tile_size: u32,
    /// Full texture width in pixels.
    pub tex_width: u32,
    /// Full texture height in pixels.
    pub tex_height: u32,
    /// Paper width in `paper_units`.
    pub paper_width: f64,
    /// Paper height in `paper_units`.
    pub paper_height: f64,
    /// Units of the paper dimensions.
    pub paper_units: String,
    /// Pyramid level offset for the chosen tile size.
    pub level_offset: u32,
    /// Deepest fetchable level; unset when no leaflet zip exists.
    pub max_level: Option<u32>,
}
