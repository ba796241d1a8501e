//! Stage 1: flatten the scene tree into mesh instances.

use std::sync::Arc;

use glam::Affine3A;

use crate::resources::geometry::Geometry;
use crate::resources::material::Material;
use crate::scene::{NodeHandle, Scene};

/// A flattened draw unit: a geometry snapshot, the composed world transform
/// of the node that carried it, and the (shared) material.
///
/// The geometry is cloned out of the scene so that later stages can transform
/// it freely without touching the caller's data.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub name: String,
    pub geometry: Geometry,
    pub world: Affine3A,
    pub material: Arc<Material>,
}

/// Walks the tree and emits one [`MeshInstance`] per visible node that
/// carries renderable geometry. Non-mesh nodes only contribute their
/// transform.
///
/// The walk is an explicit stack-based pre-order traversal, so arbitrarily
/// deep hierarchies cannot overflow the call stack. An empty tree yields an
/// empty list, which is not an error.
#[must_use]
pub fn collect_meshes(scene: &Scene) -> Vec<MeshInstance> {
    let mut out = Vec::new();

    // Roots pushed in reverse so that popping preserves scene order, keeping
    // the downstream grouping deterministic for identical input order.
    let mut stack: Vec<(NodeHandle, Affine3A)> = scene
        .root_nodes
        .iter()
        .rev()
        .map(|&handle| (handle, Affine3A::IDENTITY))
        .collect();

    while let Some((handle, parent_world)) = stack.pop() {
        let Some(node) = scene.get_node(handle) else {
            continue;
        };

        let world = parent_world * node.transform.local_matrix();

        if node.visible
            && let Some(mesh_key) = node.mesh
            && let Some(mesh) = scene.get_mesh(mesh_key)
            && mesh.visible
        {
            out.push(MeshInstance {
                name: mesh.name.clone(),
                geometry: (*mesh.geometry).clone(),
                world,
                material: mesh.material.clone(),
            });
        }

        for &child in node.children().iter().rev() {
            stack.push((child, world));
        }
    }

    out
}
