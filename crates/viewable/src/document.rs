//! A loaded document: manifest tree plus resolver.

use viewable_manifest::{
    Locator, ManifestTree, Message, NodeId, NodeType, PropertyFilter, Result, Role,
};
use viewable_resolve::{LeafletOptions, PathResolver, ResolverConfig, TileMetrics};

/// A translated document, ready for resolution queries.
///
/// Owns the indexed manifest tree and the path resolver configured for the
/// session that loaded it. Built once per loaded document and discarded
/// with it; all queries are synchronous and never perform I/O.
pub struct Document {
    tree: ManifestTree,
    resolver: PathResolver,
}

impl Document {
    /// Builds a document from a manifest JSON payload.
    pub fn from_manifest_json(
        payload: &str,
        config: ResolverConfig,
        tile_metrics: Box<dyn TileMetrics>,
    ) -> Result<Self> {
        let tree = ManifestTree::from_json(payload)?;
        log::debug!("document manifest loaded: {} nodes", tree.len());
        Ok(Self {
            tree,
            resolver: PathResolver::new(config, tile_metrics),
        })
    }

    /// Returns the indexed manifest tree.
    #[must_use]
    pub fn tree(&self) -> &ManifestTree {
        &self.tree
    }

    /// Returns the configured path resolver.
    #[must_use]
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Finds a node by any identifying field; see
    /// [`ManifestTree::find_by_id`].
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree.find_by_id(id)
    }

    /// Lists every geometry node of the given role, pre-order.
    #[must_use]
    pub fn geometries(&self, role: Role) -> Vec<NodeId> {
        let filter = PropertyFilter::new().node_type(NodeType::Geometry).role(role);
        Locator::new(&self.tree).find(self.tree.root(), &filter, true)
    }

    /// Collects the translation messages along the path from `node` to the
    /// root; see [`ManifestTree::messages`].
    #[must_use]
    pub fn messages(&self, node: Option<NodeId>, exclude_global: bool) -> Vec<Message> {
        self.tree.messages(node, exclude_global)
    }

    /// Returns the path prefix of the shared property database, if any.
    #[must_use]
    pub fn shared_property_db_path(&self) -> Option<&str> {
        self.tree.shared_property_db_path()
    }

    /// Resolves the resource path a viewable item should load; see
    /// [`PathResolver::resolve_viewable_path`].
    #[must_use]
    pub fn resolve_viewable_path(
        &self,
        item: NodeId,
        out: Option<&mut LeafletOptions>,
    ) -> String {
        self.resolver.resolve_viewable_path(&self.tree, item, out)
    }

    /// Builds the thumbnail URL for `item`; see
    /// [`PathResolver::resolve_thumbnail_path`].
    #[must_use]
    pub fn resolve_thumbnail_path(&self, item: NodeId) -> String {
        self.resolver.resolve_thumbnail_path(&self.tree, item)
    }

    /// Rewrites a manifest urn into a loadable path; see
    /// [`PathResolver::resolve_full_path`].
    #[must_use]
    pub fn resolve_full_path(&self, urn: &str) -> String {
        self.resolver.resolve_full_path(urn)
    }
}
