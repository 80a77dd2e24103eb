//! Property-filtered search over a manifest tree.

use crate::node::{ManifestNode, NodeId, NodeType, Role};
use crate::tree::ManifestTree;

/// A conjunction of field equality constraints.
///
/// A node matches when every set field is present on the node and strictly
/// equal; unset fields are unconstrained.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    node_type: Option<NodeType>,
    role: Option<Role>,
    mime: Option<String>,
    guid: Option<String>,
}

impl PropertyFilter {
    /// Creates an empty filter that matches every node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrains the structural kind.
    #[must_use]
    pub fn node_type(mut self, node_type: NodeType) -> Self {
        self.node_type = Some(node_type);
        self
    }

    /// Constrains the sibling role.
    #[must_use]
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Constrains the MIME type.
    #[must_use]
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    /// Constrains the guid.
    #[must_use]
    pub fn guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    /// Returns whether `node` satisfies every set constraint.
    #[must_use]
    pub fn matches(&self, node: &ManifestNode) -> bool {
        if let Some(want) = self.node_type {
            if node.node_type != Some(want) {
                return false;
            }
        }
        if let Some(want) = self.role {
            if node.role != Some(want) {
                return false;
            }
        }
        if let Some(want) = &self.mime {
            if node.mime.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        if let Some(want) = &self.guid {
            if node.guid.as_deref() != Some(want.as_str()) {
                return false;
            }
        }
        true
    }
}

/// Property-filtered lookup over a [`ManifestTree`].
pub struct Locator<'a> {
    tree: &'a ManifestTree,
}

impl<'a> Locator<'a> {
    /// Creates a locator over `tree`.
    #[must_use]
    pub fn new(tree: &'a ManifestTree) -> Self {
        Self { tree }
    }

    /// Returns the children of `node` satisfying `filter`.
    ///
    /// Direct children are tested in manifest order. With `recursive`, each
    /// child's subtree results are spliced in immediately after that
    /// child's own entry, yielding pre-order results with every matching
    /// descendant exactly once; recursion descends into non-matching
    /// children too.
    #[must_use]
    pub fn find(&self, node: NodeId, filter: &PropertyFilter, recursive: bool) -> Vec<NodeId> {
        let mut results = Vec::new();
        for &child in self.tree.children(node) {
            if filter.matches(self.tree.node(child)) {
                results.push(child);
            }
            if recursive {
                results.extend(self.find(child, filter, recursive));
            }
        }
        results
    }

    /// Convenience wrapper: first result of [`Locator::find`], if any.
    #[must_use]
    pub fn find_first(
        &self,
        node: NodeId,
        filter: &PropertyFilter,
        recursive: bool,
    ) -> Option<NodeId> {
        // Results come back pre-order, so the head is the document-order winner.
        self.find(node, filter, recursive).into_iter().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::RawNode;

    fn tree() -> ManifestTree {
        let raw: RawNode = serde_json::from_str(
            r#"{
              "type": "folder", "guid": "root",
              "children": [
                {"type": "geometry", "role": "2d", "guid": "a",
                 "children": [
                   {"type": "geometry", "role": "2d", "guid": "a1"},
                   {"type": "resource", "role": "graphics", "guid": "a2",
                    "mime": "application/autodesk-f2d"}
                 ]},
                {"type": "geometry", "role": "3d", "guid": "b",
                 "children": [
                   {"type": "geometry", "role": "2d", "guid": "b1"}
                 ]}
              ]
            }"#,
        )
        .expect("json");
        ManifestTree::build(&raw)
    }

    fn guids(tree: &ManifestTree, ids: &[NodeId]) -> Vec<String> {
        ids.iter()
            .map(|&id| tree.node(id).guid.clone().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_direct_children_only() {
        let tree = tree();
        let locator = Locator::new(&tree);
        let filter = PropertyFilter::new().node_type(NodeType::Geometry).role(Role::TwoD);
        let found = locator.find(tree.root(), &filter, false);
        assert_eq!(guids(&tree, &found), ["a"]);
    }

    #[test]
    fn test_recursive_is_preorder_without_duplicates() {
        let tree = tree();
        let locator = Locator::new(&tree);
        let filter = PropertyFilter::new().node_type(NodeType::Geometry).role(Role::TwoD);
        let found = locator.find(tree.root(), &filter, true);
        assert_eq!(guids(&tree, &found), ["a", "a1", "b1"]);
    }

    #[test]
    fn test_filter_requires_field_presence() {
        let tree = tree();
        let locator = Locator::new(&tree);
        // The root's children include nodes without a mime; only the f2d
        // resource carries one.
        let filter = PropertyFilter::new().mime("application/autodesk-f2d");
        let found = locator.find(tree.root(), &filter, true);
        assert_eq!(guids(&tree, &found), ["a2"]);
    }

    #[test]
    fn test_childless_node_yields_empty() {
        let tree = tree();
        let locator = Locator::new(&tree);
        let leaf = tree.find_by_id("a2").expect("leaf");
        assert!(locator.find(leaf, &PropertyFilter::new(), true).is_empty());
    }

    #[test]
    fn test_find_first_picks_document_order_winner() {
        let tree = tree();
        let locator = Locator::new(&tree);
        let filter = PropertyFilter::new().node_type(NodeType::Geometry);
        let first = locator.find_first(tree.root(), &filter, true).expect("match");
        assert_eq!(tree.node(first).guid.as_deref(), Some("a"));
    }
}
