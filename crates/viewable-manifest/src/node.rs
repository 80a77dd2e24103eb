//! Typed manifest nodes.
//!
//! A translation pipeline describes a document's available outputs as a tree
//! of typed nodes. [`RawNode`] is the deserialized wire form; a
//! [`ManifestTree`](crate::ManifestTree) re-homes raw nodes into an index
//! arena of [`ManifestNode`]s with parent back-references.

use serde::Deserialize;

/// Index of a node within a [`ManifestTree`](crate::ManifestTree) arena.
///
/// Node ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The structural kind of a manifest node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// A source or derivative file.
    File,
    /// A grouping folder.
    Folder,
    /// A renderable unit (3-D scene or 2-D drawing).
    Geometry,
    /// A named camera/sheet view belonging to a geometry.
    View,
    /// An auxiliary resource (thumbnail, tile, database, ...).
    Resource,
    /// Any kind this crate does not model explicitly.
    Other,
}

impl NodeType {
    /// Parses the wire value of a `type` field.
    pub fn parse(value: &str) -> Self {
        match value {
            "file" => Self::File,
            "folder" => Self::Folder,
            "geometry" => Self::Geometry,
            "view" => Self::View,
            "resource" => Self::Resource,
            _ => Self::Other,
        }
    }
}

/// The role a manifest node plays among its siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A 2-D drawing.
    TwoD,
    /// A 3-D scene.
    ThreeD,
    /// A graphics payload under a geometry.
    Graphics,
    /// A tiled raster pyramid representation of a 2-D drawing.
    Leaflet,
    /// A zip archive bundling leaflet tile levels.
    LeafletZip,
    /// Root of a legacy tile pyramid.
    TileRoot,
    /// A thumbnail image.
    Thumbnail,
    /// Any role this crate does not model explicitly.
    Other,
}

impl Role {
    /// Parses the wire value of a `role` field.
    pub fn parse(value: &str) -> Self {
        match value {
            "2d" => Self::TwoD,
            "3d" => Self::ThreeD,
            "graphics" => Self::Graphics,
            "leaflet" => Self::Leaflet,
            "leaflet-zip" => Self::LeafletZip,
            "tileRoot" => Self::TileRoot,
            "thumbnail" => Self::Thumbnail,
            _ => Self::Other,
        }
    }
}

/// A translation status or progress message attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Message {
    /// The message kind reported by the pipeline (e.g. "warning").
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message text.
    #[serde(default)]
    pub text: String,
}

/// A manifest node as it arrives off the wire.
///
/// Every field the pipeline may omit is optional; unknown fields are
/// ignored. Children own their subtrees until the tree is built.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawNode {
    /// Structural kind (`file`, `folder`, `geometry`, `view`, ...).
    #[serde(rename = "type")]
    pub node_type: Option<String>,
    /// Sibling role (`2d`, `3d`, `leaflet`, `leaflet-zip`, `tileRoot`, ...).
    pub role: Option<String>,
    /// MIME type of the referenced resource.
    pub mime: Option<String>,
    /// Unique id within the tree.
    pub guid: Option<String>,
    /// Opaque resource locator.
    pub urn: Option<String>,
    /// Translation status of this node.
    pub status: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Ordered child nodes, possibly empty.
    pub children: Vec<RawNode>,
    /// Ordered translation messages.
    pub messages: Vec<Message>,

    // Leaflet payload fields, present only on tiled raster nodes.
    /// Edge length of a tile in pixels.
    #[serde(rename = "tileSize")]
    pub tile_size: Option<u32>,
    /// Paper width in `paper_units`.
    #[serde(rename = "paperWidth")]
    pub paper_width: Option<f64>,
    /// Paper height in `paper_units`.
    #[serde(rename = "paperHeight")]
    pub paper_height: Option<f64>,
    /// Units of the paper dimensions.
    #[serde(rename = "paperUnits")]
    pub paper_units: Option<String>,
    /// Full texture resolution as `[width, height]` pixels.
    pub resolution: Option<[u32; 2]>,
    /// Deepest tile level available in a leaflet zip.
    pub max_level: Option<u32>,
}

/// A node re-homed into a tree arena.
///
/// `children` hold arena indices in manifest order; `parent` is a plain
/// back-index, so it carries no ownership and generic traversal over
/// `children` can never cycle through it.
#[derive(Debug, Clone)]
pub struct ManifestNode {
    /// Structural kind, when the wire form carried a recognized `type`.
    pub node_type: Option<NodeType>,
    /// Sibling role, when the wire form carried a recognized `role`.
    pub role: Option<Role>,
    /// MIME type of the referenced resource.
    pub mime: Option<String>,
    /// Unique id within the tree.
    pub guid: Option<String>,
    /// Opaque resource locator.
    pub urn: Option<String>,
    /// Translation status of this node.
    pub status: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Ordered translation messages attached to this node.
    pub messages: Vec<Message>,
    /// Edge length of a tile in pixels (leaflet nodes only).
    pub tile_size: Option<u32>,
    /// Paper width (leaflet nodes only).
    pub paper_width: Option<f64>,
    /// Paper height (leaflet nodes only).
    pub paper_height: Option<f64>,
    /// Units of the paper dimensions (leaflet nodes only).
    pub paper_units: Option<String>,
    /// Full texture resolution as `[width, height]` pixels.
    pub resolution: Option<[u32; 2]>,
    /// Deepest tile level available (leaflet-zip nodes only).
    pub max_level: Option<u32>,
    /// Back-reference to the owning node; `None` for the root.
    pub parent: Option<NodeId>,
    /// Arena indices of the children, in manifest order.
    pub children: Vec<NodeId>,
}

impl ManifestNode {
    pub(crate) fn from_raw(raw: &RawNode, parent: Option<NodeId>) -> Self {
        Self {
            node_type: raw.node_type.as_deref().map(NodeType::parse),
            role: raw.role.as_deref().map(Role::parse),
            mime: raw.mime.clone(),
            guid: raw.guid.clone(),
            urn: raw.urn.clone(),
            status: raw.status.clone(),
            name: raw.name.clone(),
            messages: raw.messages.clone(),
            tile_size: raw.tile_size,
            paper_width: raw.paper_width,
            paper_height: raw.paper_height,
            paper_units: raw.paper_units.clone(),
            resolution: raw.resolution,
            max_level: raw.max_level,
            parent,
            children: Vec::new(),
        }
    }

    /// Returns whether any identifying field of this node equals `id`.
    ///
    /// Id lookup matches on every string field a node carries (the parent
    /// back-reference is structural and never consulted). Guid uniqueness
    /// makes guid lookup well-defined; other fields are a convenience.
    pub fn matches_id(&self, id: &str) -> bool {
        [&self.guid, &self.urn, &self.mime, &self.status, &self.name]
            .into_iter()
            .any(|field| field.as_deref() == Some(id))
    }

    /// Returns whether this node is a `geometry` node.
    #[must_use]
    pub fn is_geometry(&self) -> bool {
        self.node_type == Some(NodeType::Geometry)
    }

    /// Returns whether this node is a `view` node.
    #[must_use]
    pub fn is_view(&self) -> bool {
        self.node_type == Some(NodeType::View)
    }
}
