//! Scene graph for the input boundary.
//!
//! Manages the hierarchy the optimizer consumes:
//! - Node: scene node (parent/child relations plus transform)
//! - Transform: TRS component with local matrix
//! - Scene: node arena and mesh component pool
//!
//! Nodes live in a slotmap arena and reference each other by handle, so the
//! tree is parent-indexed and can be walked iteratively to arbitrary depth.

pub mod node;
pub mod scene;
pub mod transform;

pub use node::Node;
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct NodeHandle;
    pub struct MeshKey;
}
