use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use slotmap::SlotMap;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::resources::mesh::Mesh;
use crate::scene::node::Node;
use crate::scene::{MeshKey, NodeHandle};

static NEXT_SCENE_ID: AtomicU32 = AtomicU32::new(1);

/// Scene graph container.
///
/// Pure data layer: a node arena plus a mesh component pool. The optimizer
/// reads it and never writes to it; the same scene can be compressed any
/// number of times.
pub struct Scene {
    pub id: u32,

    pub nodes: SlotMap<NodeHandle, Node>,
    pub root_nodes: Vec<NodeHandle>,

    // ==== Component/resource pools ====
    pub meshes: SlotMap<MeshKey, Mesh>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed),
            nodes: SlotMap::with_key(),
            root_nodes: Vec::new(),
            meshes: SlotMap::with_key(),
        }
    }

    /// Adds a node to the scene as a root node.
    pub fn add_node(&mut self, node: Node) -> NodeHandle {
        let handle = self.nodes.insert(node);
        self.root_nodes.push(handle);
        handle
    }

    /// Adds a node as a child of `parent`.
    pub fn add_to_parent(&mut self, child: Node, parent: NodeHandle) -> NodeHandle {
        let handle = self.nodes.insert(child);

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(handle);
        }
        if let Some(c) = self.nodes.get_mut(handle) {
            c.parent = Some(parent);
        }

        handle
    }

    /// Re-parents `child` under `parent`, keeping both sides in sync.
    pub fn attach(&mut self, child: NodeHandle, parent: NodeHandle) {
        // Detach from the previous parent (or the root list)
        let old_parent = self.nodes.get(child).and_then(|n| n.parent);
        if let Some(old) = old_parent {
            if let Some(p) = self.nodes.get_mut(old)
                && let Some(pos) = p.children.iter().position(|&c| c == child)
            {
                p.children.remove(pos);
            }
        } else if let Some(pos) = self.root_nodes.iter().position(|&c| c == child) {
            self.root_nodes.remove(pos);
        }

        if let Some(p) = self.nodes.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.nodes.get_mut(child) {
            c.parent = Some(parent);
        }
    }

    #[must_use]
    pub fn get_node(&self, handle: NodeHandle) -> Option<&Node> {
        self.nodes.get(handle)
    }

    pub fn get_node_mut(&mut self, handle: NodeHandle) -> Option<&mut Node> {
        self.nodes.get_mut(handle)
    }

    // ========================================================================
    // Mesh components
    // ========================================================================

    /// Registers a mesh and attaches it to `node`.
    pub fn create_mesh(
        &mut self,
        node: NodeHandle,
        geometry: Arc<Geometry>,
        material: Arc<Material>,
    ) -> MeshKey {
        let key = self.meshes.insert(Mesh::new(geometry, material));
        if let Some(n) = self.nodes.get_mut(node) {
            n.mesh = Some(key);
        }
        key
    }

    #[must_use]
    pub fn get_mesh(&self, key: MeshKey) -> Option<&Mesh> {
        self.meshes.get(key)
    }

    /// Number of nodes carrying renderable geometry.
    #[must_use]
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }
}
