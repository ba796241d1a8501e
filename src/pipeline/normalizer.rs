//! Stage 2: guarantee attribute shape before grouping and merging.
//!
//! After this stage every surviving geometry has normals sized `3n` and UVs
//! sized `2n` for `n` vertices, and no morph-target buffers. Downstream
//! concatenation can then never fail on attribute-shape mismatch.

use crate::errors::CompressError;
use crate::pipeline::collector::MeshInstance;

/// Normalizes one mesh instance, or drops it.
///
/// - No positions: the geometry contributes nothing and is dropped (logged,
///   non-fatal).
/// - Missing or mis-sized normals: derived from triangle winding.
/// - Missing or mis-sized UVs: replaced by a zero-filled buffer. Visually
///   wrong on purpose, but dimensionally safe for concatenation.
/// - Morph-target buffers: cleared unconditionally; merged static geometry
///   cannot support blend shapes.
#[must_use]
pub fn normalize(mut instance: MeshInstance) -> Option<MeshInstance> {
    let geometry = &mut instance.geometry;

    if !geometry.has_positions() {
        log::warn!(
            "normalize: {}",
            CompressError::MissingPositions {
                mesh: instance.name.clone(),
            }
        );
        return None;
    }

    let vertex_count = geometry.vertex_count();

    let normals_ok = geometry
        .normals()
        .is_some_and(|buf| buf.len() == vertex_count * 3);
    if !normals_ok {
        geometry.compute_vertex_normals();
    }

    let uvs_ok = geometry
        .uvs()
        .is_some_and(|buf| buf.len() == vertex_count * 2);
    if !uvs_ok {
        geometry.set_uvs(Some(vec![0.0; vertex_count * 2]));
    }

    if geometry.has_morph_targets() {
        log::debug!(
            "normalize: stripping {} morph targets from '{}'",
            geometry.morph_positions.len(),
            instance.name
        );
        geometry.clear_morph_targets();
    }

    Some(instance)
}
