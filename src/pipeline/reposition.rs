//! Stage 7: ground the merged output.
//!
//! Re-imported assets should sit on the ground regardless of where the
//! original asset's pivot was, so the whole merged result is shifted as one:
//! horizontal bounding-box center to `(0, *, 0)`, bounding-box minimum Y to
//! the configured reference height.

use glam::Vec3;

use crate::pipeline::MergedMesh;
use crate::resources::geometry::BoundingBox;

/// Translates all merged meshes so their union bounding box is centered on
/// the horizontal plane with its lowest point at `ground_y`. No-op for empty
/// output.
pub fn reposition(meshes: &mut [MergedMesh], ground_y: f32) {
    let mut union: Option<BoundingBox> = None;
    for mesh in meshes.iter() {
        if let Some(bbox) = mesh.geometry.compute_bounding_box() {
            union = Some(union.map_or(bbox, |acc| acc.union(&bbox)));
        }
    }

    let Some(bbox) = union else {
        return;
    };

    let center = bbox.center();
    let offset = Vec3::new(-center.x, ground_y - bbox.min.y, -center.z);
    if offset == Vec3::ZERO {
        return;
    }

    for mesh in meshes.iter_mut() {
        mesh.geometry.translate(offset);
    }
}
