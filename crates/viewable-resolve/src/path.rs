//! Resource path resolution.
//!
//! Given an indexed manifest tree, [`PathResolver`] decides which concrete
//! resource an item loads and with what parameters: urn-to-URL rewriting,
//! the 2-D/3-D format fallback chain, thumbnail URLs, and leaflet tiling
//! parameters.

use std::fmt::Write as _;

use viewable_manifest::{Locator, ManifestTree, NodeId, NodeType, PropertyFilter, Role};

use crate::config::ResolverConfig;
use crate::leaflet::{LeafletOptions, TileMetrics, DEFAULT_TILE_SIZE};

/// MIME type of a 3-D scene resource.
pub const SVF_MIME: &str = "application/autodesk-svf";

/// MIME type of a 2-D vector drawing resource.
pub const F2D_MIME: &str = "application/autodesk-f2d";

/// Filename of a locally materialized manifest.
const MANIFEST_FILENAME: &str = "bubble.json";

/// Marker prefixing urns that are relative to the manifest's directory.
const LOCAL_FILE_MARKER: &str = "$file$";

/// Default thumbnail edge length in pixels.
const DEFAULT_THUMBNAIL_SIZE: u32 = 200;

/// Resolves manifest urns to loadable resource paths.
pub struct PathResolver {
    config: ResolverConfig,
    tile_metrics: Box<dyn TileMetrics>,
}

impl PathResolver {
    /// Creates a resolver from explicit configuration and the tiling
    /// collaborator that defines the leaflet level offset.
    pub fn new(mut config: ResolverConfig, tile_metrics: Box<dyn TileMetrics>) -> Self {
        if !config.viewing_service_base.is_empty() && !config.viewing_service_base.ends_with('/') {
            config.viewing_service_base.push('/');
        }
        Self {
            config,
            tile_metrics,
        }
    }

    /// Returns the resolver's configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Rewrites a manifest urn into a loadable path. First matching rule
    /// wins:
    ///
    /// 1. an empty urn is returned unchanged;
    /// 2. in offline mode, everything before the first `/` is replaced by
    ///    the configured local prefix;
    /// 3. a `urn`-schemed locator becomes `<base>items/<urn>`;
    /// 4. a `$file$`-relative locator, for a manifest materialized as
    ///    `bubble.json`, has the marker replaced by the manifest's
    ///    directory;
    /// 5. anything else is returned unchanged, which makes resolution
    ///    idempotent for already-resolved paths.
    #[must_use]
    pub fn resolve_full_path(&self, urn: &str) -> String {
        if urn.is_empty() {
            return String::new();
        }
        if self.config.offline {
            return match urn.find('/') {
                Some(at) => format!("{}{}", self.config.offline_prefix, &urn[at..]),
                None => format!("{}{urn}", self.config.offline_prefix),
            };
        }
        if urn.starts_with("urn") {
            return format!("{}items/{urn}", self.config.viewing_service_base);
        }
        if urn.starts_with(LOCAL_FILE_MARKER) && self.config.source_path.ends_with(MANIFEST_FILENAME)
        {
            let dir_len = self.config.source_path.len() - MANIFEST_FILENAME.len();
            let dir = &self.config.source_path[..dir_len];
            return urn.replacen(LOCAL_FILE_MARKER, dir, 1);
        }
        urn.to_string()
    }

    /// Resolves the concrete resource path a viewable item should load,
    /// optionally filling `out` with leaflet tiling parameters.
    ///
    /// For a `geometry` item the fallback chain depends on its role:
    /// - `3d`: the first direct child carrying the 3-D scene MIME;
    /// - `2d`: a direct `leaflet` child populates `out` when present but
    ///   never decides the path by itself; the path comes from the first
    ///   of: a direct child with the 2-D vector MIME, the leaflet child,
    ///   or a `tileRoot` descendant kept as a legacy fallback.
    ///
    /// A `view` item resolves through its owning geometry. Anything
    /// unresolvable yields an empty string.
    #[must_use]
    pub fn resolve_viewable_path(
        &self,
        tree: &ManifestTree,
        item: NodeId,
        out: Option<&mut LeafletOptions>,
    ) -> String {
        let node = tree.node(item);
        match node.node_type {
            Some(NodeType::Geometry) => self.resolve_geometry_path(tree, item, out),
            Some(NodeType::View) => {
                let geometry = node
                    .guid
                    .as_deref()
                    .and_then(|guid| tree.view_geometry(guid));
                match geometry {
                    Some(geometry) => self.resolve_viewable_path(tree, geometry, out),
                    None => String::new(),
                }
            }
            _ => String::new(),
        }
    }

    fn resolve_geometry_path(
        &self,
        tree: &ManifestTree,
        geometry: NodeId,
        out: Option<&mut LeafletOptions>,
    ) -> String {
        let locator = Locator::new(tree);
        let winner = match tree.node(geometry).role {
            Some(Role::ThreeD) => {
                locator.find_first(geometry, &PropertyFilter::new().mime(SVF_MIME), false)
            }
            Some(Role::TwoD) => {
                let leaflet =
                    locator.find_first(geometry, &PropertyFilter::new().role(Role::Leaflet), false);
                // Leaflet parameters are extracted whenever the
                // representation exists, even when a vector resource ends
                // up owning the path.
                if let (Some(leaflet), Some(out)) = (leaflet, out) {
                    self.extract_leaflet_params(out, tree, geometry, leaflet);
                }
                locator
                    .find_first(geometry, &PropertyFilter::new().mime(F2D_MIME), false)
                    .or(leaflet)
                    .or_else(|| {
                        let legacy = locator.find_first(
                            geometry,
                            &PropertyFilter::new().role(Role::TileRoot),
                            true,
                        );
                        if legacy.is_some() {
                            log::debug!(
                                "geometry {:?} resolved through legacy tile root",
                                tree.node(geometry).guid
                            );
                        }
                        legacy
                    })
            }
            _ => None,
        };
        winner
            .and_then(|id| tree.node(id).urn.as_deref())
            .map(|urn| self.resolve_full_path(urn))
            .unwrap_or_default()
    }

    /// Builds the thumbnail URL for `item` at the default 200x200 size.
    #[must_use]
    pub fn resolve_thumbnail_path(&self, tree: &ManifestTree, item: NodeId) -> String {
        self.resolve_thumbnail_path_sized(tree, item, DEFAULT_THUMBNAIL_SIZE, DEFAULT_THUMBNAIL_SIZE)
    }

    /// Builds the thumbnail URL for `item` at the requested size. The
    /// access-control session is appended only when one is configured. An
    /// item without a guid yields an empty string.
    #[must_use]
    pub fn resolve_thumbnail_path_sized(
        &self,
        tree: &ManifestTree,
        item: NodeId,
        width: u32,
        height: u32,
    ) -> String {
        let Some(guid) = tree.node(item).guid.as_deref() else {
            return String::new();
        };
        let mut url = format!(
            "{}thumbnails/{}?guid={}&width={width}&height={height}",
            self.config.viewing_service_base,
            self.config.document_urn,
            url_encode(guid),
        );
        if let Some(session) = &self.config.acm_session {
            let _ = write!(url, "&acmsession={session}");
        }
        url
    }

    /// Fills `out` with the tiling parameters of a leaflet representation.
    ///
    /// Copies the resolved tile URL pattern, tile size (512 when unstated),
    /// paper dimensions and units, and the texture resolution pair; the
    /// level offset comes from the tiling collaborator. `max_level` is set
    /// only when a `leaflet-zip` resource exists somewhere under the
    /// geometry.
    pub fn extract_leaflet_params(
        &self,
        out: &mut LeafletOptions,
        tree: &ManifestTree,
        geometry: NodeId,
        leaflet: NodeId,
    ) {
        let node = tree.node(leaflet);
        if let Some(urn) = node.urn.as_deref() {
            out.url_pattern = self.resolve_full_path(urn);
        }
        out.tile_size = node.tile_size.unwrap_or(DEFAULT_TILE_SIZE);
        if let Some([width, height]) = node.resolution {
            out.tex_width = width;
            out.tex_height = height;
        }
        out.paper_width = node.paper_width.unwrap_or(0.0);
        out.paper_height = node.paper_height.unwrap_or(0.0);
        out.paper_units = node.paper_units.clone().unwrap_or_default();
        out.level_offset = self.tile_metrics.level_offset(out.tile_size);

        let zip = Locator::new(tree).find_first(
            geometry,
            &PropertyFilter::new().role(Role::LeafletZip),
            true,
        );
        out.max_level = zip
            .and_then(|zip| tree.node(zip).max_level)
            .map(|max_level| max_level.saturating_sub(out.level_offset));
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn url_encode(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(byte as char);
            }
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}
