//! Indexed manifest tree.
//!
//! [`ManifestTree::build`] makes one depth-first pass over the raw manifest:
//! it re-homes every node into an index arena (attaching parent
//! back-references), records which geometry owns each `view` node, counts
//! views per geometry, and derives the shared property-database path from
//! the first node that advertises one. The tree and its indices are
//! immutable after construction and live exactly as long as the loaded
//! document.

use std::collections::HashMap;

use crate::error::{ManifestError, Result};
use crate::node::{ManifestNode, Message, NodeId, NodeType, RawNode};

/// MIME type marking the document-wide shared property database.
pub const SHARED_PROPERTY_DB_MIME: &str = "application/autodesk-db";

/// Escaped separator token some storage backends embed in urns.
const ESCAPED_SEPARATOR: &str = "%2F";

/// An indexed, immutable view of a translated document's manifest.
pub struct ManifestTree {
    arena: Vec<ManifestNode>,
    root: NodeId,
    /// view guid -> arena id of the geometry that owns the view.
    view_geometry_of: HashMap<String, NodeId>,
    /// geometry guid -> number of direct `view` children.
    view_count_of: HashMap<String, usize>,
    shared_property_db_path: Option<String>,
}

impl ManifestTree {
    /// Builds the indexed tree from a raw manifest root.
    pub fn build(raw: &RawNode) -> Self {
        let mut tree = Self {
            arena: Vec::new(),
            root: NodeId(0),
            view_geometry_of: HashMap::new(),
            view_count_of: HashMap::new(),
            shared_property_db_path: None,
        };
        let root = tree.insert(raw, None);
        tree.root = root;
        tree
    }

    /// Deserializes a manifest JSON payload and builds the indexed tree.
    pub fn from_json(payload: &str) -> Result<Self> {
        if payload.trim().is_empty() {
            return Err(ManifestError::Empty);
        }
        let raw: RawNode = serde_json::from_str(payload)?;
        Ok(Self::build(&raw))
    }

    /// Recursively inserts `raw` and its subtree, maintaining all indices.
    fn insert(&mut self, raw: &RawNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.arena.len());
        self.arena.push(ManifestNode::from_raw(raw, parent));

        // Pre-order: the first property-db node in document order wins.
        if self.shared_property_db_path.is_none()
            && raw.mime.as_deref() == Some(SHARED_PROPERTY_DB_MIME)
        {
            if let Some(path) = raw.urn.as_deref().and_then(separator_prefix) {
                log::debug!("shared property db path: {path}");
                self.shared_property_db_path = Some(path);
            }
        }

        for child in &raw.children {
            let child_id = self.insert(child, Some(id));
            self.arena[id.0].children.push(child_id);
        }

        if self.arena[id.0].node_type == Some(NodeType::Geometry) {
            self.index_views(id);
        }
        id
    }

    /// Records every direct `view` child of the geometry at `id`.
    fn index_views(&mut self, id: NodeId) {
        let geometry_guid = self.arena[id.0].guid.clone();
        for child_id in self.arena[id.0].children.clone() {
            let child = &self.arena[child_id.0];
            if child.node_type != Some(NodeType::View) {
                continue;
            }
            if let Some(view_guid) = child.guid.clone() {
                self.view_geometry_of.insert(view_guid, id);
            }
            if let Some(guid) = &geometry_guid {
                *self.view_count_of.entry(guid.clone()).or_insert(0) += 1;
            }
        }
    }

    /// Returns the root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns the node stored at `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &ManifestNode {
        &self.arena[id.0]
    }

    /// Returns the children of `id` in manifest order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.arena[id.0].children
    }

    /// Returns the parent of `id`, or `None` for the root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena[id.0].parent
    }

    /// Returns the total number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns true if the tree holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Returns the geometry node owning the view with guid `view_guid`.
    #[must_use]
    pub fn view_geometry(&self, view_guid: &str) -> Option<NodeId> {
        self.view_geometry_of.get(view_guid).copied()
    }

    /// Returns the number of direct `view` children of the geometry with
    /// guid `geometry_guid`, or 0 when unknown.
    #[must_use]
    pub fn view_count(&self, geometry_guid: &str) -> usize {
        self.view_count_of.get(geometry_guid).copied().unwrap_or(0)
    }

    /// Returns the path prefix of the shared property database, if the
    /// manifest advertises one. Absence is a valid state, not an error.
    #[must_use]
    pub fn shared_property_db_path(&self) -> Option<&str> {
        self.shared_property_db_path.as_deref()
    }

    /// Finds the first node, in depth-first pre-order, whose identifying
    /// fields match `id`. Returns `None` when nothing matches.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        let mut stack = vec![self.root];
        while let Some(current) = stack.pop() {
            if self.node(current).matches_id(id) {
                return Some(current);
            }
            // Push in reverse so siblings pop in manifest order.
            for &child in self.children(current).iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// Collects the messages along the path from `node` up to the root.
    ///
    /// With `exclude_global` the walk stops one level below the root, so
    /// document-wide messages on the root node are left out. `None` yields
    /// an empty list.
    #[must_use]
    pub fn messages(&self, node: Option<NodeId>, exclude_global: bool) -> Vec<Message> {
        let mut collected = Vec::new();
        let mut current = node;
        while let Some(id) = current {
            if exclude_global && self.parent(id).is_none() {
                break;
            }
            collected.extend(self.node(id).messages.iter().cloned());
            current = self.parent(id);
        }
        collected
    }
}

/// Returns the prefix of `urn` up to and including its last separator,
/// preferring the escaped `%2F` token over a literal `/` when present.
fn separator_prefix(urn: &str) -> Option<String> {
    if let Some(at) = urn.rfind(ESCAPED_SEPARATOR) {
        return Some(urn[..at + ESCAPED_SEPARATOR.len()].to_string());
    }
    urn.rfind('/').map(|at| urn[..=at].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> RawNode {
        serde_json::from_str(
            r#"{
              "type": "folder", "guid": "root", "urn": "urn:adsk/doc",
              "messages": [{"type": "warning", "text": "global"}],
              "children": [
                {
                  "type": "geometry", "role": "2d", "guid": "geo-1",
                  "messages": [{"type": "warning", "text": "sheet warning"}],
                  "children": [
                    {"type": "view", "guid": "view-1a"},
                    {"type": "view", "guid": "view-1b",
                     "messages": [{"type": "error", "text": "view failed"}]},
                    {"type": "resource", "role": "graphics", "guid": "X1",
                     "mime": "application/autodesk-f2d",
                     "urn": "urn:adsk/doc/output/sheet.f2d"}
                  ]
                },
                {
                  "type": "geometry", "role": "3d", "guid": "geo-2",
                  "children": [
                    {"type": "view", "guid": "view-2a"},
                    {"type": "resource", "guid": "db-1",
                     "mime": "application/autodesk-db",
                     "urn": "urn:adsk/doc/output/objects.db"}
                  ]
                }
              ]
            }"#,
        )
        .expect("manifest JSON")
    }

    #[test]
    fn test_every_node_has_unique_parent() {
        let tree = ManifestTree::build(&manifest());
        for i in 0..tree.len() {
            let id = NodeId(i);
            match tree.parent(id) {
                None => assert_eq!(id, tree.root()),
                Some(parent) => {
                    let owners = (0..tree.len())
                        .filter(|&j| tree.children(NodeId(j)).contains(&id))
                        .count();
                    assert_eq!(owners, 1);
                    assert!(tree.children(parent).contains(&id));
                }
            }
        }
    }

    #[test]
    fn test_view_count_matches_direct_view_children() {
        let tree = ManifestTree::build(&manifest());
        assert_eq!(tree.view_count("geo-1"), 2);
        assert_eq!(tree.view_count("geo-2"), 1);
        assert_eq!(tree.view_count("nope"), 0);
    }

    #[test]
    fn test_view_geometry_lookup() {
        let tree = ManifestTree::build(&manifest());
        let geo = tree.view_geometry("view-1b").expect("indexed view");
        assert_eq!(tree.node(geo).guid.as_deref(), Some("geo-1"));
        assert!(tree.view_geometry("view-nope").is_none());
    }

    #[test]
    fn test_find_by_id_deep_and_absent() {
        let tree = ManifestTree::build(&manifest());
        // "X1" sits three levels down; matched in pre-order.
        let found = tree.find_by_id("X1").expect("deep guid");
        assert_eq!(tree.node(found).mime.as_deref(), Some("application/autodesk-f2d"));
        assert!(tree.find_by_id("absent-guid").is_none());
    }

    #[test]
    fn test_find_by_id_matches_non_guid_fields() {
        let tree = ManifestTree::build(&manifest());
        let found = tree.find_by_id("urn:adsk/doc/output/sheet.f2d").expect("urn match");
        assert_eq!(tree.node(found).guid.as_deref(), Some("X1"));
    }

    #[test]
    fn test_shared_property_db_path() {
        let tree = ManifestTree::build(&manifest());
        assert_eq!(tree.shared_property_db_path(), Some("urn:adsk/doc/output/"));
    }

    #[test]
    fn test_shared_property_db_path_escaped_separator() {
        let raw: RawNode = serde_json::from_str(
            r#"{"mime": "application/autodesk-db",
                "urn": "urn:adsk.objects:os.object:bucket%2Foutput%2Fobjects.db"}"#,
        )
        .expect("json");
        let tree = ManifestTree::build(&raw);
        assert_eq!(
            tree.shared_property_db_path(),
            Some("urn:adsk.objects:os.object:bucket%2Foutput%2F")
        );
    }

    #[test]
    fn test_shared_property_db_absent_is_not_an_error() {
        let raw: RawNode = serde_json::from_str(r#"{"type": "folder"}"#).expect("json");
        let tree = ManifestTree::build(&raw);
        assert!(tree.shared_property_db_path().is_none());
    }

    #[test]
    fn test_messages_walk_to_root() {
        let tree = ManifestTree::build(&manifest());
        let view = tree.find_by_id("view-1b");

        let all = tree.messages(view, false);
        let texts: Vec<&str> = all.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["view failed", "sheet warning", "global"]);

        let local = tree.messages(view, true);
        let texts: Vec<&str> = local.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, ["view failed", "sheet warning"]);

        assert!(tree.messages(None, false).is_empty());
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            ManifestTree::from_json("not json"),
            Err(ManifestError::Json(_))
        ));
        assert!(matches!(ManifestTree::from_json("  "), Err(ManifestError::Empty)));
    }
}
