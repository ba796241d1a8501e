use crate::scene::transform::Transform;
use crate::scene::{MeshKey, NodeHandle};

/// A minimal scene node.
///
/// # Hierarchy
///
/// Nodes form a tree through parent-child relationships:
/// - `parent`: optional handle to the parent node (None for root nodes)
/// - `children`: list of child node handles
///
/// Only the hierarchy, the transform and an optional mesh component are kept
/// on the node; everything else the optimizer needs lives in the [`Scene`]'s
/// resource pools.
///
/// [`Scene`]: crate::scene::Scene
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,

    /// Transform component, composed top-down during traversal.
    pub transform: Transform,

    /// Renderable geometry attached to this node, if any.
    pub mesh: Option<MeshKey>,

    /// Visibility flag; invisible subtrees still compose transforms but an
    /// invisible node contributes no mesh instance.
    pub visible: bool,
}

impl Node {
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            transform: Transform::new(),
            mesh: None,
            visible: true,
        }
    }

    /// Returns the parent node handle, if any.
    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    /// Returns a read-only slice of child node handles.
    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}
